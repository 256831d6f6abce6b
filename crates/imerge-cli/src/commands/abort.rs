//! `imerge abort` command - Discard the merge session.

use anyhow::{Context, Result};

use crate::commands::utils;
use crate::output;

/// Run the abort command.
pub fn run(verbose: bool) -> Result<()> {
    let ctx = utils::open(verbose)?;
    let session = ctx.session();

    let removed = session
        .abort()
        .context("Some merge session references could not be removed - retry `imerge abort`")?;

    if removed == 0 {
        output::info("No merge in progress");
    } else {
        output::success(&format!("Aborted merge, removed {removed} references"));
    }

    Ok(())
}

//! `imerge begin` command - Start an incremental merge session.

use anyhow::Result;

use crate::commands::utils;
use crate::output;

/// Run the begin command.
pub fn run(revision: &str, verbose: bool) -> Result<()> {
    let ctx = utils::open(verbose)?;
    let session = ctx.session();

    let begun = session.begin(revision)?;

    output::success(&format!(
        "Began merging {revision} ({}) into HEAD ({})",
        output::short_id(begun.theirs),
        output::short_id(begun.ours)
    ));
    output::info(&format!("Merge base: {}", output::short_id(begun.base)));
    output::info(&format!(
        "Recorded {} checkpoints under {}",
        begun.checkpoints.len(),
        ctx.namespace
    ));

    Ok(())
}

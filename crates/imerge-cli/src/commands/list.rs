//! `imerge list` command - Print the merge session's references.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::commands::utils;
use crate::output;

/// Run the list command.
pub fn run(json: bool, verbose: bool) -> Result<()> {
    let ctx = utils::open(verbose)?;
    let refs = ctx.session().list_checkpoints()?;

    if json {
        let out: BTreeMap<&str, String> = refs
            .iter()
            .map(|(name, oid)| (name.as_str(), oid.to_string()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if refs.is_empty() {
        output::info("No merge in progress");
        return Ok(());
    }

    for (name, oid) in &refs {
        output::essential(&format!("{oid} {name}"));
    }

    Ok(())
}

//! `imerge status` command - Show the merge session state.

use anyhow::Result;
use colored::Colorize;
use imerge_core::MergeSession;
use serde::Serialize;

use crate::commands::utils;
use crate::output;

const LABEL_WIDTH: usize = 8;

/// JSON output for status command.
#[derive(Debug, Serialize)]
struct StatusOutput {
    active: bool,
    namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theirs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base: Option<String>,
    checkpoints: usize,
}

impl StatusOutput {
    fn new(namespace: String, session: Option<&MergeSession>) -> Self {
        Self {
            active: session.is_some(),
            namespace,
            ours: session.map(|s| s.ours.to_string()),
            theirs: session.map(|s| s.theirs.to_string()),
            base: session.map(|s| s.base.to_string()),
            checkpoints: session.map_or(0, |s| s.checkpoints.len()),
        }
    }
}

/// Run the status command.
pub fn run(json: bool, verbose: bool) -> Result<()> {
    let ctx = utils::open(verbose)?;
    let current = ctx.session().current()?;

    if json {
        let out = StatusOutput::new(ctx.namespace.to_string(), current.as_ref());
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let Some(session) = current else {
        output::info("No merge in progress");
        return Ok(());
    };

    output::detail(&format!("  {}", "Merge in progress".bold()));
    output::hr();
    for (entry, oid) in session.entries() {
        output::detail(&format!(
            "  {} {}",
            output::entry_label(entry, LABEL_WIDTH),
            output::short_id(oid)
        ));
    }
    output::hr();
    output::info(&format!(
        "{} checkpoints, run `imerge abort` to discard",
        session.checkpoints.len()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imerge_git::Oid;

    fn oid(n: u8) -> Oid {
        Oid::from_bytes(&[n; 20]).unwrap()
    }

    #[test]
    fn test_status_output_idle() {
        let out = StatusOutput::new("refs/imerge".into(), None);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["active"], false);
        assert_eq!(json["checkpoints"], 0);
        assert!(json.get("ours").is_none());
    }

    #[test]
    fn test_status_output_active() {
        let session = MergeSession {
            ours: oid(3),
            theirs: oid(4),
            base: oid(1),
            checkpoints: vec![oid(3), oid(2)],
        };
        let out = StatusOutput::new("refs/imerge".into(), Some(&session));
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["active"], true);
        assert_eq!(json["checkpoints"], 2);
        assert_eq!(json["theirs"], oid(4).to_string());
    }
}

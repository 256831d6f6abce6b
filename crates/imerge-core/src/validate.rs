//! Precondition checks run before a merge session is created.
//!
//! An incremental merge only makes sense for two genuinely diverged
//! histories. Everything else is rejected here, before any reference is
//! written, with the first matching reason winning:
//!
//! 1. same commit
//! 2. already up to date
//! 3. unborn HEAD
//! 4. fast-forward-only repository preference
//! 5. no normal merge possible
//! 6. fast-forward available

use imerge_git::{GitOps, MergeAnalysis, MergePreference, Oid};
use tracing::debug;

use crate::error::{Error, Result};
use crate::resolve;

/// Classify a prospective merge of `theirs` into `ours`.
///
/// # Errors
/// Returns the first applicable topology error in priority order.
pub fn classify(ours: Oid, theirs: Oid, analysis: &MergeAnalysis) -> Result<()> {
    if ours == theirs {
        return Err(Error::SameCommit(ours));
    }
    if analysis.up_to_date {
        return Err(Error::AlreadyUpToDate);
    }
    if analysis.unborn {
        return Err(Error::UnbornHead);
    }
    if analysis.preference == MergePreference::FastForwardOnly {
        return Err(Error::FastForwardOnlyPolicy);
    }
    if !analysis.normal {
        return Err(Error::NoNormalMergePossible);
    }
    if analysis.fast_forward {
        return Err(Error::FastForwardAvailable);
    }
    Ok(())
}

/// Check that `ours` is still HEAD and that merging `theirs` needs a real merge.
///
/// # Errors
/// Returns `HeadMismatch` if HEAD has moved away from `ours`, a topology
/// error from [`classify`], or the repository error that stopped the check.
pub fn check<G: GitOps>(repo: &G, ours: Oid, theirs: Oid) -> Result<()> {
    let head = resolve::head_commit(repo)?;
    if head != ours {
        return Err(Error::HeadMismatch {
            expected: ours,
            actual: head,
        });
    }

    // Comparing ids first avoids asking libgit2 to analyze a self-merge
    if ours == theirs {
        return Err(Error::SameCommit(ours));
    }

    let analysis = repo.merge_analysis(theirs)?;
    debug!(?analysis, "merge analysis");
    classify(ours, theirs, &analysis)
}

//! Endpoint resolution for a merge session.
//!
//! "Theirs" comes from the caller's revision spec, "ours" is always the
//! commit HEAD points at. Nothing here writes to the repository.

use imerge_git::{GitOps, ObjectKind, Oid};
use tracing::debug;

use crate::error::{Error, Result};

/// The two commits a session merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub ours: Oid,
    pub theirs: Oid,
}

/// Resolve a revision spec to a commit id.
///
/// Accepts anything rev-parse does: branch names, full or abbreviated
/// hashes, `HEAD`, full reference names.
///
/// # Errors
/// Returns `UnresolvedRevision` if nothing (or more than one object) matches,
/// `NotACommit` if the spec names a tree, blob or other non-commit.
pub fn find_commit<G: GitOps>(repo: &G, spec: &str) -> Result<Oid> {
    let object = repo.resolve_revision(spec).map_err(|e| match e {
        imerge_git::Error::RevisionNotFound(_) | imerge_git::Error::AmbiguousRevision(_) => {
            Error::UnresolvedRevision(spec.into())
        }
        other => Error::Git(other),
    })?;

    if object.kind != ObjectKind::Commit {
        return Err(Error::NotACommit {
            spec: spec.into(),
            kind: object.kind,
        });
    }

    Ok(object.id)
}

/// Resolve the commit HEAD points at.
///
/// # Errors
/// Returns `UnbornHead` on a branch without commits and
/// `DetachedOrMissingHead` when HEAD does not lead to a commit.
pub fn head_commit<G: GitOps>(repo: &G) -> Result<Oid> {
    repo.head_commit().map_err(|e| match e {
        imerge_git::Error::UnbornHead => Error::UnbornHead,
        imerge_git::Error::RefNotFound(_) => Error::DetachedOrMissingHead,
        other => Error::Git(other),
    })
}

/// Resolve both endpoints for `spec` against the current HEAD.
///
/// # Errors
/// See [`find_commit`] and [`head_commit`].
pub fn find_ours_and_theirs<G: GitOps>(repo: &G, spec: &str) -> Result<Endpoints> {
    let theirs = find_commit(repo, spec)?;
    let ours = head_commit(repo)?;
    debug!(spec, %ours, %theirs, "resolved merge endpoints");
    Ok(Endpoints { ours, theirs })
}

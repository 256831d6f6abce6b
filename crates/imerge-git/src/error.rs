//! Error types for imerge-git.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not inside a git repository.
    #[error("not a git repository")]
    NotARepository,

    /// Revision spec did not name any object.
    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    /// Revision spec matched more than one object.
    #[error("ambiguous revision: {0}")]
    AmbiguousRevision(String),

    /// HEAD points at a branch with no commits yet.
    #[error("HEAD is unborn - the current branch has no commits")]
    UnbornHead,

    /// The two commits share no ancestor.
    #[error("no merge base between {0} and {1}")]
    NoMergeBase(git2::Oid, git2::Oid),

    /// Reference not found.
    #[error("reference not found: {0}")]
    RefNotFound(String),

    /// Reference already exists and would be overwritten.
    #[error("reference already exists: {0}")]
    RefExists(String),

    /// Underlying git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

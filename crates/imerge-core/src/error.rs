//! Error types for imerge-core.

use std::path::PathBuf;

use imerge_git::{ObjectKind, Oid};

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in imerge-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // === Input ===
    /// Revision spec did not resolve to exactly one object.
    #[error("cannot resolve revision '{0}'")]
    UnresolvedRevision(String),

    /// Revision spec resolved to something other than a commit.
    #[error("revision '{spec}' names a {kind}, not a commit")]
    NotACommit { spec: String, kind: ObjectKind },

    // === Topology ===
    /// Both sides are the same commit.
    #[error("cannot merge the same commit ({0})")]
    SameCommit(Oid),

    /// Their commit is already contained in ours.
    #[error("already up to date - cannot merge a parent commit")]
    AlreadyUpToDate,

    /// HEAD has no commits yet.
    #[error("cannot merge into an unborn HEAD")]
    UnbornHead,

    /// Repository config only allows fast-forward merges.
    #[error("repository preferences only allow fast-forward merges (merge.ff = only)")]
    FastForwardOnlyPolicy,

    /// No regular merge is possible between the commits.
    #[error("cannot perform a merge between the commits")]
    NoNormalMergePossible,

    /// The histories share no commit to merge from.
    #[error("refusing to merge unrelated histories")]
    UnrelatedHistories,

    /// A plain fast-forward resolves the merge.
    #[error("a fast-forward merge is available - use `git merge --ff-only` instead")]
    FastForwardAvailable,

    // === State ===
    /// HEAD cannot be resolved to a commit.
    #[error("HEAD is missing or does not point at a commit")]
    DetachedOrMissingHead,

    /// HEAD moved away from the commit chosen as ours.
    #[error("ours ({expected}) is not the current HEAD ({actual})")]
    HeadMismatch { expected: Oid, actual: Oid },

    /// A session's references already exist.
    #[error("a merge is already in progress - run `imerge abort` first")]
    SessionAlreadyInProgress,

    /// The ledger exists but cannot be read back as a session.
    #[error("merge session references are incomplete: {0}")]
    CorruptLedger(String),

    /// Session namespace is not a valid reference prefix.
    #[error("invalid session namespace '{prefix}': {reason}")]
    InvalidNamespace { prefix: String, reason: String },

    // === Repository ===
    /// Config file parsing error.
    #[error("failed to parse {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Git operation error.
    #[error(transparent)]
    Git(#[from] imerge_git::Error),
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad revision input from the caller.
    Input,
    /// Branch topology makes an incremental merge pointless or impossible.
    Topology,
    /// Session state does not allow the operation.
    State,
    /// Storage, config or libgit2 failure.
    Repository,
}

impl Error {
    /// Categorize this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnresolvedRevision(_) | Self::NotACommit { .. } => ErrorKind::Input,
            Self::SameCommit(_)
            | Self::AlreadyUpToDate
            | Self::UnbornHead
            | Self::FastForwardOnlyPolicy
            | Self::NoNormalMergePossible
            | Self::UnrelatedHistories
            | Self::FastForwardAvailable => ErrorKind::Topology,
            Self::DetachedOrMissingHead
            | Self::HeadMismatch { .. }
            | Self::SessionAlreadyInProgress
            | Self::CorruptLedger(_)
            | Self::InvalidNamespace { .. } => ErrorKind::State,
            Self::ConfigParse { .. } | Self::Io(_) | Self::Git(_) => ErrorKind::Repository,
        }
    }
}

//! Trait abstractions for git operations.
//!
//! This module defines the `GitOps` trait, the capability surface the merge
//! session core consumes. Keeping the core behind this trait lets it be
//! driven by a real repository or by an in-memory mock in tests.

use std::collections::BTreeMap;
use std::fmt;

use git2::Oid;

use crate::Result;

/// Kind of object a revision spec resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
    Tag,
    Unknown,
}

impl From<Option<git2::ObjectType>> for ObjectKind {
    fn from(kind: Option<git2::ObjectType>) -> Self {
        match kind {
            Some(git2::ObjectType::Commit) => Self::Commit,
            Some(git2::ObjectType::Tree) => Self::Tree,
            Some(git2::ObjectType::Blob) => Self::Blob,
            Some(git2::ObjectType::Tag) => Self::Tag,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
            Self::Tag => "tag",
            Self::Unknown => "unknown object",
        };
        f.write_str(name)
    }
}

/// An object named by a revision spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedObject {
    pub id: Oid,
    pub kind: ObjectKind,
}

/// Repository preference for how merges may be performed (`merge.ff`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePreference {
    #[default]
    None,
    /// `merge.ff = false`
    NoFastForward,
    /// `merge.ff = only`
    FastForwardOnly,
}

/// Classification of merging a commit into HEAD.
///
/// Flags are not exclusive: a pure fast-forward reports both
/// `fast_forward` and `normal`, mirroring libgit2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MergeAnalysis {
    /// The commit is already reachable from HEAD.
    pub up_to_date: bool,
    /// HEAD has no commits yet.
    pub unborn: bool,
    /// HEAD can simply be moved forward to the commit.
    pub fast_forward: bool,
    /// A regular three-way merge can be performed.
    pub normal: bool,
    /// Repository merge preference.
    pub preference: MergePreference,
}

impl MergeAnalysis {
    /// Analysis for two diverged histories that need a real merge.
    #[must_use]
    pub const fn diverged() -> Self {
        Self {
            up_to_date: false,
            unborn: false,
            fast_forward: false,
            normal: true,
            preference: MergePreference::None,
        }
    }
}

/// Trait for the repository operations the merge session relies on.
///
/// All operations are synchronous since git2 is a synchronous library.
#[allow(clippy::missing_errors_doc)]
pub trait GitOps {
    // === Objects ===

    /// Resolve a revision spec (branch, hash prefix, `HEAD`, ...) to an object.
    ///
    /// Annotated tags are peeled to the commit they point at.
    fn resolve_revision(&self, spec: &str) -> Result<ResolvedObject>;

    /// Get the commit HEAD currently points at.
    fn head_commit(&self) -> Result<Oid>;

    // === History ===

    /// Find the merge base of two commits.
    ///
    /// Returns `NoMergeBase` when the histories share no commit.
    fn merge_base(&self, one: Oid, two: Oid) -> Result<Oid>;

    /// Analyze merging `theirs` into HEAD.
    fn merge_analysis(&self, theirs: Oid) -> Result<MergeAnalysis>;

    /// Commits reachable from `to` but not from `from`, newest first.
    fn commits_between(&self, from: Oid, to: Oid) -> Result<Vec<Oid>>;

    // === References ===

    /// Look up a reference's target, `None` if it does not exist.
    fn find_reference(&self, name: &str) -> Result<Option<Oid>>;

    /// Create a reference. Fails with `RefExists` rather than overwrite.
    fn create_reference(&self, name: &str, target: Oid, log_message: &str) -> Result<()>;

    /// Delete a reference. Deleting a missing reference succeeds.
    fn delete_reference(&self, name: &str) -> Result<()>;

    /// All references whose name starts with `prefix/`.
    fn references_with_prefix(&self, prefix: &str) -> Result<BTreeMap<String, Oid>>;
}

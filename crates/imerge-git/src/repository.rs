//! Repository wrapper implementing [`GitOps`] on top of libgit2.

use std::collections::BTreeMap;
use std::path::Path;

use git2::{ErrorCode, ObjectType, Oid, Sort};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::traits::{GitOps, MergeAnalysis, MergePreference, ObjectKind, ResolvedObject};

/// High-level wrapper around a git repository.
pub struct Repository {
    inner: git2::Repository,
}

impl Repository {
    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::NotARepository,
            _ => Error::Git2(e),
        })?;
        debug!(git_dir = %inner.path().display(), "opened repository");
        Ok(Self { inner })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Wrap an already opened git2 repository.
    #[must_use]
    pub const fn from_git2(inner: git2::Repository) -> Self {
        Self { inner }
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Get a reference to the underlying git2 repository.
    ///
    /// Use sparingly - prefer the [`GitOps`] methods.
    #[must_use]
    pub const fn inner(&self) -> &git2::Repository {
        &self.inner
    }
}

impl GitOps for Repository {
    fn resolve_revision(&self, spec: &str) -> Result<ResolvedObject> {
        let object = self.inner.revparse_single(spec).map_err(|e| match e.code() {
            ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::UnbornBranch => {
                Error::RevisionNotFound(spec.into())
            }
            ErrorCode::Ambiguous => Error::AmbiguousRevision(spec.into()),
            _ => Error::Git2(e),
        })?;

        let kind = ObjectKind::from(object.kind());
        if kind == ObjectKind::Tag {
            // Annotated tags stand in for the commit they point at
            if let Ok(commit) = object.peel(ObjectType::Commit) {
                return Ok(ResolvedObject {
                    id: commit.id(),
                    kind: ObjectKind::Commit,
                });
            }
        }

        trace!(spec, id = %object.id(), %kind, "resolved revision");
        Ok(ResolvedObject {
            id: object.id(),
            kind,
        })
    }

    fn head_commit(&self) -> Result<Oid> {
        let missing = |e: git2::Error| match e.code() {
            ErrorCode::UnbornBranch => Error::UnbornHead,
            ErrorCode::NotFound | ErrorCode::Peel | ErrorCode::InvalidSpec => {
                Error::RefNotFound("HEAD".into())
            }
            _ => Error::Git2(e),
        };
        let head = self.inner.head().map_err(missing)?;
        Ok(head.peel_to_commit().map_err(missing)?.id())
    }

    fn merge_base(&self, one: Oid, two: Oid) -> Result<Oid> {
        self.inner.merge_base(one, two).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::NoMergeBase(one, two),
            _ => Error::Git2(e),
        })
    }

    fn merge_analysis(&self, theirs: Oid) -> Result<MergeAnalysis> {
        let annotated = self.inner.find_annotated_commit(theirs)?;
        let (analysis, preference) = self.inner.merge_analysis(&[&annotated])?;

        let preference = if preference.is_fastforward_only() {
            MergePreference::FastForwardOnly
        } else if preference.is_no_fast_forward() {
            MergePreference::NoFastForward
        } else {
            MergePreference::None
        };

        Ok(MergeAnalysis {
            up_to_date: analysis.is_up_to_date(),
            unborn: analysis.is_unborn(),
            fast_forward: analysis.is_fast_forward(),
            normal: analysis.is_normal(),
            preference,
        })
    }

    fn commits_between(&self, from: Oid, to: Oid) -> Result<Vec<Oid>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;
        revwalk.push(to)?;
        revwalk.hide(from)?;

        let commits = revwalk.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(commits)
    }

    fn find_reference(&self, name: &str) -> Result<Option<Oid>> {
        match self.inner.find_reference(name) {
            Ok(reference) => Ok(reference.target()),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn create_reference(&self, name: &str, target: Oid, log_message: &str) -> Result<()> {
        self.inner
            .reference(name, target, false, log_message)
            .map_err(|e| match e.code() {
                ErrorCode::Exists => Error::RefExists(name.into()),
                _ => Error::Git2(e),
            })?;
        Ok(())
    }

    fn delete_reference(&self, name: &str) -> Result<()> {
        let mut reference = match self.inner.find_reference(name) {
            Ok(reference) => reference,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        match reference.delete() {
            Err(e) if e.code() != ErrorCode::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn references_with_prefix(&self, prefix: &str) -> Result<BTreeMap<String, Oid>> {
        let scope = format!("{prefix}/");
        let mut refs = BTreeMap::new();

        for reference in self.inner.references_glob(&format!("{scope}*"))? {
            let reference = reference?;
            let Some(name) = reference.name() else {
                continue;
            };
            if !name.starts_with(&scope) {
                continue;
            }
            if let Some(target) = reference.target() {
                refs.insert(name.to_string(), target);
            }
        }

        Ok(refs)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.git_dir())
            .finish()
    }
}

//! In-memory `GitOps` for exercising session logic without a repository.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use imerge_git::{
    Error as GitError, GitOps, MergeAnalysis, ObjectKind, Oid, ResolvedObject,
    Result as GitResult,
};

/// Deterministic commit id for tests.
pub fn oid(n: u8) -> Oid {
    Oid::from_bytes(&[n; 20]).unwrap()
}

#[derive(Debug, Clone, Copy)]
pub enum MockHead {
    Commit(Oid),
    Unborn,
    Missing,
}

pub struct MockGitOps {
    pub head: RefCell<MockHead>,
    pub revisions: RefCell<HashMap<String, ResolvedObject>>,
    pub analysis: RefCell<MergeAnalysis>,
    pub base: RefCell<Option<Oid>>,
    pub walk: RefCell<Vec<Oid>>,
    pub refs: RefCell<BTreeMap<String, Oid>>,
    pub fail_create: RefCell<Option<String>>,
    pub fail_delete: RefCell<HashSet<String>>,
}

impl Default for MockGitOps {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitOps {
    pub fn new() -> Self {
        Self {
            head: RefCell::new(MockHead::Missing),
            revisions: RefCell::new(HashMap::new()),
            analysis: RefCell::new(MergeAnalysis::diverged()),
            base: RefCell::new(None),
            walk: RefCell::new(Vec::new()),
            refs: RefCell::new(BTreeMap::new()),
            fail_create: RefCell::new(None),
            fail_delete: RefCell::new(HashSet::new()),
        }
    }

    /// A diverged history: HEAD at `oid(10)`, `theirs` at `oid(20)`,
    /// base `oid(1)`, and `walk` as the commits from base to HEAD.
    pub fn diverged(walk: &[Oid]) -> Self {
        Self::new()
            .with_head(oid(10))
            .with_revision("HEAD", oid(10), ObjectKind::Commit)
            .with_revision("theirs", oid(20), ObjectKind::Commit)
            .with_base(oid(1))
            .with_walk(walk)
    }

    pub fn with_head(self, head: Oid) -> Self {
        *self.head.borrow_mut() = MockHead::Commit(head);
        self
    }

    pub fn with_unborn_head(self) -> Self {
        *self.head.borrow_mut() = MockHead::Unborn;
        self
    }

    pub fn with_revision(self, spec: &str, id: Oid, kind: ObjectKind) -> Self {
        self.revisions
            .borrow_mut()
            .insert(spec.to_string(), ResolvedObject { id, kind });
        self
    }

    pub fn with_analysis(self, analysis: MergeAnalysis) -> Self {
        *self.analysis.borrow_mut() = analysis;
        self
    }

    pub fn with_base(self, base: Oid) -> Self {
        *self.base.borrow_mut() = Some(base);
        self
    }

    pub fn with_walk(self, walk: &[Oid]) -> Self {
        *self.walk.borrow_mut() = walk.to_vec();
        self
    }

    pub fn with_ref(self, name: &str, target: Oid) -> Self {
        self.refs.borrow_mut().insert(name.to_string(), target);
        self
    }

    pub fn with_create_failure(self, name: &str) -> Self {
        *self.fail_create.borrow_mut() = Some(name.to_string());
        self
    }

    pub fn with_delete_failure(self, name: &str) -> Self {
        self.fail_delete.borrow_mut().insert(name.to_string());
        self
    }
}

impl GitOps for MockGitOps {
    fn resolve_revision(&self, spec: &str) -> GitResult<ResolvedObject> {
        self.revisions
            .borrow()
            .get(spec)
            .copied()
            .ok_or_else(|| GitError::RevisionNotFound(spec.to_string()))
    }

    fn head_commit(&self) -> GitResult<Oid> {
        match *self.head.borrow() {
            MockHead::Commit(oid) => Ok(oid),
            MockHead::Unborn => Err(GitError::UnbornHead),
            MockHead::Missing => Err(GitError::RefNotFound("HEAD".into())),
        }
    }

    fn merge_base(&self, one: Oid, two: Oid) -> GitResult<Oid> {
        (*self.base.borrow()).ok_or(GitError::NoMergeBase(one, two))
    }

    fn merge_analysis(&self, _theirs: Oid) -> GitResult<MergeAnalysis> {
        Ok(*self.analysis.borrow())
    }

    fn commits_between(&self, _from: Oid, _to: Oid) -> GitResult<Vec<Oid>> {
        Ok(self.walk.borrow().clone())
    }

    fn find_reference(&self, name: &str) -> GitResult<Option<Oid>> {
        Ok(self.refs.borrow().get(name).copied())
    }

    fn create_reference(&self, name: &str, target: Oid, _log_message: &str) -> GitResult<()> {
        if self.fail_create.borrow().as_deref() == Some(name) {
            return Err(GitError::Git2(git2::Error::from_str("simulated write failure")));
        }
        let mut refs = self.refs.borrow_mut();
        if refs.contains_key(name) {
            return Err(GitError::RefExists(name.to_string()));
        }
        refs.insert(name.to_string(), target);
        Ok(())
    }

    fn delete_reference(&self, name: &str) -> GitResult<()> {
        if self.fail_delete.borrow().contains(name) {
            return Err(GitError::Git2(git2::Error::from_str("simulated delete failure")));
        }
        self.refs.borrow_mut().remove(name);
        Ok(())
    }

    fn references_with_prefix(&self, prefix: &str) -> GitResult<BTreeMap<String, Oid>> {
        let scope = format!("{prefix}/");
        Ok(self
            .refs
            .borrow()
            .iter()
            .filter(|(name, _)| name.starts_with(&scope))
            .map(|(name, oid)| (name.clone(), *oid))
            .collect())
    }
}

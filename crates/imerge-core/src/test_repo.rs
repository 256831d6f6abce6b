//! Real on-disk repositories for tests.

use git2::{Oid, RepositoryInitOptions, Signature};
use imerge_git::Repository;
use tempfile::TempDir;

/// A temporary repository whose HEAD starts on an unborn `master`.
pub struct TestRepo {
    _temp: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("master");
        let git = git2::Repository::init_opts(temp.path(), &opts).unwrap();
        Self {
            _temp: temp,
            repo: Repository::from_git2(git),
        }
    }

    pub fn git(&self) -> &git2::Repository {
        self.repo.inner()
    }

    /// Commit `file` = `content` on top of `branch`, advancing it.
    pub fn commit_on(&self, branch: &str, file: &str, content: &str) -> Oid {
        let git = self.git();
        let refname = format!("refs/heads/{branch}");
        let sig = Signature::now("Rand Om Hacker", "random@hacker.com").unwrap();
        let blob = git.blob(content.as_bytes()).unwrap();

        let parent = git
            .find_reference(&refname)
            .ok()
            .and_then(|r| r.target())
            .map(|oid| git.find_commit(oid).unwrap());
        let base_tree = parent.as_ref().map(|c| c.tree().unwrap());
        let mut builder = git.treebuilder(base_tree.as_ref()).unwrap();
        builder.insert(file, blob, 0o100_644).unwrap();
        let tree = git.find_tree(builder.write().unwrap()).unwrap();

        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        git.commit(Some(&refname), &sig, &sig, content, &tree, &parents)
            .unwrap()
    }

    /// Create the initial commit on master.
    pub fn seed(&self) -> Oid {
        self.commit_on("master", "README", "first commit")
    }

    pub fn branch(&self, name: &str, at: Oid) {
        let commit = self.git().find_commit(at).unwrap();
        self.git().branch(name, &commit, false).unwrap();
    }

    pub fn head(&self) -> Oid {
        self.git().head().unwrap().peel_to_commit().unwrap().id()
    }

    pub fn set_config(&self, key: &str, value: &str) {
        self.git().config().unwrap().set_str(key, value).unwrap();
    }

    /// Master and `branch-1` diverging from a shared seed commit:
    /// six commits on `branch-1`, then seven on master.
    ///
    /// Returns the seed commit.
    pub fn diverged() -> (Self, Oid) {
        let repo = Self::new();
        let seed = repo.seed();
        repo.branch("branch-1", seed);

        for (file, content) in [
            ("file3", "bar1"),
            ("tfile", "bar"),
            ("file2", "bar2"),
            ("file1", "bar4"),
            ("tfile", "barss"),
            ("tfile", "barsss"),
        ] {
            repo.commit_on("branch-1", file, content);
        }
        for (file, content) in [
            ("ofile", "foos"),
            ("file1", "foo1"),
            ("ofile", "fooss"),
            ("ofile", "foosss"),
            ("ofile", "foossss"),
            ("file2", "foo2"),
            ("file3", "foo3"),
        ] {
            repo.commit_on("master", file, content);
        }

        (repo, seed)
    }
}

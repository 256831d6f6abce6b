//! Checkpoint ledger persisted as references.
//!
//! The ledger is written in one go by [`Ledger::initialize`] and removed in
//! one go by [`Ledger::clear`]. There is no partial update, so "namespace
//! empty" and "no session" always mean the same thing.

use std::collections::BTreeMap;

use imerge_git::{GitOps, Oid};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::namespace::{Entry, Namespace};

/// A merge session read back from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSession {
    pub ours: Oid,
    pub theirs: Oid,
    pub base: Oid,
    /// Commits to walk, index 0 nearest the tip.
    pub checkpoints: Vec<Oid>,
}

impl MergeSession {
    /// Every ledger entry this session consists of, fixed roles first.
    pub fn entries(&self) -> impl Iterator<Item = (Entry, Oid)> + '_ {
        [
            (Entry::Ours, self.ours),
            (Entry::Theirs, self.theirs),
            (Entry::Base, self.base),
        ]
        .into_iter()
        .chain(
            self.checkpoints
                .iter()
                .enumerate()
                .map(|(n, oid)| (Entry::Checkpoint(n), *oid)),
        )
    }
}

/// Reference-backed store for one repository's merge session.
#[derive(Debug)]
pub struct Ledger<'a, G: GitOps> {
    repo: &'a G,
    namespace: Namespace,
}

impl<'a, G: GitOps> Ledger<'a, G> {
    /// Create a ledger over `repo` rooted at `namespace`.
    #[must_use]
    pub const fn new(repo: &'a G, namespace: Namespace) -> Self {
        Self { repo, namespace }
    }

    /// Check whether any reference exists under the namespace.
    ///
    /// # Errors
    /// Returns error if references cannot be listed.
    pub fn exists(&self) -> Result<bool> {
        Ok(!self.enumerate()?.is_empty())
    }

    /// All references under the namespace mapped to their targets.
    ///
    /// # Errors
    /// Returns error if references cannot be listed.
    pub fn enumerate(&self) -> Result<BTreeMap<String, Oid>> {
        Ok(self.repo.references_with_prefix(self.namespace.prefix())?)
    }

    /// Write a new session.
    ///
    /// Emptiness is re-checked right before the first write. If any write
    /// fails, entries already written are removed again so the namespace is
    /// left empty.
    ///
    /// # Errors
    /// Returns `SessionAlreadyInProgress` if the namespace is not empty, or
    /// the reference write error that stopped initialization.
    pub fn initialize(&self, session: &MergeSession) -> Result<()> {
        if self.exists()? {
            return Err(Error::SessionAlreadyInProgress);
        }

        let mut written = Vec::new();
        for (entry, target) in session.entries() {
            let name = self.namespace.name(entry);
            let message = format!("imerge: begin {entry}");

            if let Err(e) = self.repo.create_reference(&name, target, &message) {
                warn!(reference = %name, error = %e, "ledger write failed, rolling back");
                self.rollback(&written);
                return Err(match e {
                    imerge_git::Error::RefExists(_) => Error::SessionAlreadyInProgress,
                    other => Error::Git(other),
                });
            }

            debug!(reference = %name, oid = %target, "wrote ledger entry");
            written.push(name);
        }

        Ok(())
    }

    fn rollback(&self, written: &[String]) {
        for name in written {
            if let Err(e) = self.repo.delete_reference(name) {
                warn!(reference = %name, error = %e, "rollback could not remove entry");
            }
        }
    }

    /// Delete every reference under the namespace.
    ///
    /// Every deletion is attempted even when earlier ones fail.
    /// Returns how many references were removed.
    ///
    /// # Errors
    /// Returns the first deletion error encountered.
    pub fn clear(&self) -> Result<usize> {
        let mut first_error = None;
        let mut removed = 0;

        for name in self.enumerate()?.keys() {
            match self.repo.delete_reference(name) {
                Ok(()) => {
                    debug!(reference = %name, "deleted ledger entry");
                    removed += 1;
                }
                Err(e) => {
                    warn!(reference = %name, error = %e, "failed to delete ledger entry");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(removed),
        }
    }

    /// Read the session back, `None` when the namespace is empty.
    ///
    /// Names in the namespace that are not session entries are ignored.
    ///
    /// # Errors
    /// Returns `CorruptLedger` if a fixed role is missing or checkpoint
    /// ordinals are not contiguous from zero.
    pub fn load(&self) -> Result<Option<MergeSession>> {
        let refs = self.enumerate()?;
        if refs.is_empty() {
            return Ok(None);
        }

        let mut ours = None;
        let mut theirs = None;
        let mut base = None;
        let mut checkpoints = BTreeMap::new();

        for (name, oid) in &refs {
            match self.namespace.parse(name) {
                Some(Entry::Ours) => ours = Some(*oid),
                Some(Entry::Theirs) => theirs = Some(*oid),
                Some(Entry::Base) => base = Some(*oid),
                Some(Entry::Checkpoint(n)) => {
                    checkpoints.insert(n, *oid);
                }
                None => debug!(reference = %name, "ignoring foreign reference"),
            }
        }

        let missing =
            |entry: Entry| Error::CorruptLedger(format!("missing {}", self.namespace.name(entry)));
        let ours = ours.ok_or_else(|| missing(Entry::Ours))?;
        let theirs = theirs.ok_or_else(|| missing(Entry::Theirs))?;
        let base = base.ok_or_else(|| missing(Entry::Base))?;

        // BTreeMap iterates in ordinal order, so contiguity means key == position
        if let Some(gap) = checkpoints.keys().enumerate().find(|(i, n)| i != *n) {
            return Err(missing(Entry::Checkpoint(gap.0)));
        }

        Ok(Some(MergeSession {
            ours,
            theirs,
            base,
            checkpoints: checkpoints.into_values().collect(),
        }))
    }
}

//! Merge session lifecycle.
//!
//! A repository is either idle (no references in the session namespace) or
//! has one session in progress. [`Session::begin`] moves from idle to in
//! progress, [`Session::abort`] moves back from either state.

use std::collections::BTreeMap;

use imerge_git::{GitOps, Oid};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ledger::{Ledger, MergeSession};
use crate::namespace::Namespace;
use crate::{resolve, validate};

/// Entry point for starting, inspecting and aborting a merge session.
///
/// The repository handle is passed in explicitly; the namespace decides
/// where in that repository the session lives.
#[derive(Debug)]
pub struct Session<'a, G: GitOps> {
    repo: &'a G,
    ledger: Ledger<'a, G>,
}

impl<'a, G: GitOps> Session<'a, G> {
    /// Create a session controller over `repo` using `namespace`.
    #[must_use]
    pub const fn new(repo: &'a G, namespace: Namespace) -> Self {
        Self {
            repo,
            ledger: Ledger::new(repo, namespace),
        }
    }

    /// Start a session merging `spec` into HEAD.
    ///
    /// Resolves both endpoints, validates the topology, computes the merge
    /// base and walks HEAD's commits back to it. The ledger is only written
    /// once all of that has succeeded, so a failure leaves no references
    /// behind.
    ///
    /// # Errors
    /// Returns `SessionAlreadyInProgress` if a session exists, an input or
    /// topology error if the merge is not suitable, or the repository error
    /// that stopped it.
    pub fn begin(&self, spec: &str) -> Result<MergeSession> {
        if self.ledger.exists()? {
            return Err(Error::SessionAlreadyInProgress);
        }

        let endpoints = resolve::find_ours_and_theirs(self.repo, spec)?;
        validate::check(self.repo, endpoints.ours, endpoints.theirs)?;

        let base = self
            .repo
            .merge_base(endpoints.ours, endpoints.theirs)
            .map_err(|e| match e {
                imerge_git::Error::NoMergeBase(..) => Error::UnrelatedHistories,
                other => Error::Git(other),
            })?;
        debug!(%base, "computed merge base");
        if base == endpoints.theirs {
            return Err(Error::AlreadyUpToDate);
        }
        if base == endpoints.ours {
            return Err(Error::FastForwardAvailable);
        }

        let checkpoints = self.walk(base, endpoints.ours)?;

        let session = MergeSession {
            ours: endpoints.ours,
            theirs: endpoints.theirs,
            base,
            checkpoints,
        };
        self.ledger.initialize(&session)?;

        info!(
            ours = %session.ours,
            theirs = %session.theirs,
            checkpoints = session.checkpoints.len(),
            "began merge session"
        );
        Ok(session)
    }

    /// Commits after `base` up to and including `tip`, newest first.
    fn walk(&self, base: Oid, tip: Oid) -> Result<Vec<Oid>> {
        let commits = self.repo.commits_between(base, tip)?;
        debug!(count = commits.len(), "walked checkpoint commits");
        Ok(commits)
    }

    /// Remove the session, if any.
    ///
    /// Safe to call repeatedly or with no session in progress. Returns how
    /// many references were removed.
    ///
    /// # Errors
    /// If references remain after every deletion was attempted, returns the
    /// first deletion error. The session then still reports as active and
    /// `abort` can be retried.
    pub fn abort(&self) -> Result<usize> {
        let cleared = self.ledger.clear();

        if !self.ledger.exists()? {
            let removed = match cleared {
                Ok(removed) => removed,
                Err(e) => {
                    // Someone else removed what we could not
                    debug!(error = %e, "deletion failed but namespace is empty");
                    0
                }
            };
            info!(removed, "aborted merge session");
            return Ok(removed);
        }

        match cleared {
            Err(e) => {
                warn!(error = %e, "merge session references remain after abort");
                Err(e)
            }
            // A concurrent begin wrote new entries while we were deleting
            Ok(_) => Err(Error::SessionAlreadyInProgress),
        }
    }

    /// All session references mapped to their commits.
    ///
    /// # Errors
    /// Returns error if references cannot be listed.
    pub fn list_checkpoints(&self) -> Result<BTreeMap<String, Oid>> {
        self.ledger.enumerate()
    }

    /// Check whether a session is in progress.
    ///
    /// # Errors
    /// Returns error if references cannot be listed.
    pub fn has_active_session(&self) -> Result<bool> {
        self.ledger.exists()
    }

    /// Read the in-progress session, `None` when idle.
    ///
    /// # Errors
    /// Returns `CorruptLedger` if the namespace holds an incomplete session.
    pub fn current(&self) -> Result<Option<MergeSession>> {
        self.ledger.load()
    }
}

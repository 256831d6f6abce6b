//! # imerge-core
//!
//! Core library for imerge, an incremental merge orchestrator.
//!
//! A merge session is persisted entirely as references under a reserved
//! namespace: the frozen endpoints (`ours`, `theirs`, `ca`) and one
//! checkpoint per commit to be walked (`m-0` nearest the tip). This crate
//! validates and resolves the endpoints, writes that ledger, and removes it
//! again on abort.

pub mod config;
pub mod error;
pub mod ledger;
pub mod namespace;
pub mod resolve;
pub mod session;
pub mod validate;

#[cfg(test)]
mod test_mocks;
#[cfg(test)]
mod test_repo;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use ledger::{Ledger, MergeSession};
pub use namespace::{Entry, Namespace};
pub use resolve::Endpoints;
pub use session::Session;

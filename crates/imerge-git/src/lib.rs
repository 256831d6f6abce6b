//! # imerge-git
//!
//! Repository capability layer for imerge, built on git2-rs.
//! Exposes the [`GitOps`] trait consumed by the merge session core
//! and a [`Repository`] implementation backed by libgit2.

mod error;
mod repository;
mod traits;

pub use error::{Error, Result};
pub use git2::Oid;
pub use repository::Repository;
pub use traits::{GitOps, MergeAnalysis, MergePreference, ObjectKind, ResolvedObject};

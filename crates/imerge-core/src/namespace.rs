//! Reference naming for merge session state.
//!
//! Every piece of session state is a reference under one reserved prefix.
//! [`Namespace`] is the only place those names are formatted or parsed.

use std::fmt;

use crate::error::{Error, Result};

/// A role a reference plays inside the session namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Entry {
    /// Frozen "our" endpoint (HEAD at begin time).
    Ours,
    /// Frozen "their" endpoint.
    Theirs,
    /// Merge base of the endpoints, stored as `ca`.
    Base,
    /// Checkpoint `m-<n>`, 0 nearest the walked tip.
    Checkpoint(usize),
}

impl Entry {
    const OURS: &'static str = "ours";
    const THEIRS: &'static str = "theirs";
    const BASE: &'static str = "ca";
    const CHECKPOINT_PREFIX: &'static str = "m-";

    fn parse(leaf: &str) -> Option<Self> {
        match leaf {
            Self::OURS => Some(Self::Ours),
            Self::THEIRS => Some(Self::Theirs),
            Self::BASE => Some(Self::Base),
            _ => {
                let digits = leaf.strip_prefix(Self::CHECKPOINT_PREFIX)?;
                // Reject "m-01" and "m-+1" so every ordinal has exactly one name
                if digits.is_empty()
                    || !digits.bytes().all(|b| b.is_ascii_digit())
                    || (digits.len() > 1 && digits.starts_with('0'))
                {
                    return None;
                }
                digits.parse().ok().map(Self::Checkpoint)
            }
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ours => f.write_str(Self::OURS),
            Self::Theirs => f.write_str(Self::THEIRS),
            Self::Base => f.write_str(Self::BASE),
            Self::Checkpoint(n) => write!(f, "{}{n}", Self::CHECKPOINT_PREFIX),
        }
    }
}

/// The reserved reference prefix holding one repository's merge session.
///
/// # Examples
///
/// ```
/// use imerge_core::{Entry, Namespace};
///
/// let ns = Namespace::default();
/// assert_eq!(ns.name(Entry::Base), "refs/imerge/ca");
/// assert_eq!(ns.name(Entry::Checkpoint(3)), "refs/imerge/m-3");
/// assert_eq!(ns.parse("refs/imerge/m-3"), Some(Entry::Checkpoint(3)));
/// assert!(Namespace::new("heads/imerge").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    /// Prefix used when none is configured.
    pub const DEFAULT_PREFIX: &'static str = "refs/imerge";

    /// Create a namespace rooted at `prefix`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNamespace`] unless `prefix` is a clean
    /// `refs/...` path without a trailing slash or glob characters.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self { prefix })
    }

    /// The reference prefix, without a trailing slash.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full reference name for an entry.
    #[must_use]
    pub fn name(&self, entry: Entry) -> String {
        format!("{}/{entry}", self.prefix)
    }

    /// Classify a full reference name, `None` if it is not a session entry.
    #[must_use]
    pub fn parse(&self, name: &str) -> Option<Entry> {
        let leaf = name
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix('/')?;
        Entry::parse(leaf)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self {
            prefix: Self::DEFAULT_PREFIX.into(),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

fn validate_prefix(prefix: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidNamespace {
        prefix: prefix.into(),
        reason: reason.into(),
    };

    let Some(rest) = prefix.strip_prefix("refs/") else {
        return Err(invalid("must start with 'refs/'"));
    };
    if rest.split('/').any(str::is_empty) {
        return Err(invalid("path segments cannot be empty"));
    }
    if rest.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(invalid("path segments cannot be '.' or '..'"));
    }
    if prefix
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || "*?[\\:^~".contains(c))
    {
        return Err(invalid("contains characters not allowed in references"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_role_names() {
        let ns = Namespace::default();
        assert_eq!(ns.name(Entry::Ours), "refs/imerge/ours");
        assert_eq!(ns.name(Entry::Theirs), "refs/imerge/theirs");
        assert_eq!(ns.name(Entry::Base), "refs/imerge/ca");
    }

    #[test]
    fn test_checkpoint_names_roundtrip() {
        let ns = Namespace::new("refs/session").unwrap();
        for n in [0, 6, 10, 123] {
            let name = ns.name(Entry::Checkpoint(n));
            assert_eq!(name, format!("refs/session/m-{n}"));
            assert_eq!(ns.parse(&name), Some(Entry::Checkpoint(n)));
        }
    }

    #[test]
    fn test_parse_rejects_foreign_names() {
        let ns = Namespace::default();
        assert_eq!(ns.parse("refs/heads/master"), None);
        assert_eq!(ns.parse("refs/imerge-other/ours"), None);
        assert_eq!(ns.parse("refs/imerge/m-"), None);
        assert_eq!(ns.parse("refs/imerge/m-01"), None);
        assert_eq!(ns.parse("refs/imerge/m-x"), None);
        assert_eq!(ns.parse("refs/imerge/test"), None);
        assert_eq!(ns.parse("refs/imerge/m-0"), Some(Entry::Checkpoint(0)));
    }

    #[test]
    fn test_invalid_prefixes() {
        for prefix in [
            "",
            "imerge",
            "refs/",
            "refs/imerge/",
            "refs//imerge",
            "refs/../heads",
            "refs/im*",
            "refs/my session",
        ] {
            assert!(
                matches!(Namespace::new(prefix), Err(Error::InvalidNamespace { .. })),
                "{prefix:?} should be rejected"
            );
        }
    }
}

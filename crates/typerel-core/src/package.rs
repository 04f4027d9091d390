//! Package identity and per-package details.

use serde::Serialize;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use typerel_types::PackageRef;

use crate::entity::{Aggregate, Interface, NamedType, TypeAlias};

/// Path reported for "no package"; registering it is a no-op.
pub const NO_PACKAGE_PATH: &str = ".";

// ============================================================================
// Identity
// ============================================================================

/// Import path of a package. Unique identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackagePath(String);

impl PackagePath {
    pub fn new(path: impl Into<String>) -> Self {
        PackagePath(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PackagePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared name of a package (the `package` clause).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Self {
        PackageName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name and path of a package.
///
/// Equality, hashing and ordering consider the path only.
#[derive(Debug, Clone, Serialize)]
pub struct PackageSummary {
    name: PackageName,
    path: PackagePath,
}

impl PackageSummary {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        PackageSummary {
            name: PackageName::new(name),
            path: PackagePath::new(path),
        }
    }

    pub fn name(&self) -> &PackageName {
        &self.name
    }

    pub fn path(&self) -> &PackagePath {
        &self.path
    }
}

impl From<&PackageRef> for PackageSummary {
    fn from(pkg: &PackageRef) -> Self {
        PackageSummary::new(pkg.path.clone(), pkg.name.clone())
    }
}

impl PartialEq for PackageSummary {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for PackageSummary {}

impl Hash for PackageSummary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for PackageSummary {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageSummary {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl fmt::Display for PackageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path)
    }
}

// ============================================================================
// Package Details
// ============================================================================

/// An edge to an imported package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    summary: PackageSummary,
}

impl Import {
    pub fn new(summary: PackageSummary) -> Self {
        Import { summary }
    }

    pub fn summary(&self) -> &PackageSummary {
        &self.summary
    }
}

/// Entities declared directly in one package.
#[derive(Debug, Clone, Default)]
pub struct PackageDetail {
    pub(crate) imports: Vec<Import>,
    pub(crate) aggregates: Vec<Arc<Aggregate>>,
    pub(crate) interfaces: Vec<Arc<Interface>>,
    pub(crate) named_types: Vec<Arc<NamedType>>,
    pub(crate) aliases: Vec<Arc<TypeAlias>>,
}

impl PackageDetail {
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    pub fn aggregates(&self) -> &[Arc<Aggregate>] {
        &self.aggregates
    }

    pub fn interfaces(&self) -> &[Arc<Interface>] {
        &self.interfaces
    }

    pub fn named_types(&self) -> &[Arc<NamedType>] {
        &self.named_types
    }

    pub fn type_aliases(&self) -> &[Arc<TypeAlias>] {
        &self.aliases
    }
}

/// A package: summary plus detail.
#[derive(Debug, Clone)]
pub struct Package {
    summary: PackageSummary,
    detail: PackageDetail,
}

impl Package {
    pub fn new(summary: PackageSummary, detail: PackageDetail) -> Self {
        Package { summary, detail }
    }

    pub fn summary(&self) -> &PackageSummary {
        &self.summary
    }

    pub fn detail(&self) -> &PackageDetail {
        &self.detail
    }

    pub fn path(&self) -> &PackagePath {
        self.summary.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn summary_identity_is_the_path() {
        let a = PackageSummary::new("example.com/x", "x");
        let renamed = PackageSummary::new("example.com/x", "y");
        let other = PackageSummary::new("example.com/w", "x");

        assert_eq!(a, renamed);
        assert_ne!(a, other);
        assert!(other < a);

        let set: HashSet<_> = [a, renamed, other].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}

//! Packages as reported by the front end.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::object::Object;

/// Identity of a package: import path plus declared name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageRef {
    pub path: String,
    pub name: String,
}

impl PackageRef {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        PackageRef {
            path: path.into(),
            name: name.into(),
        }
    }
}

// ============================================================================
// Scope
// ============================================================================

/// The package-level scope: top-level names to their objects.
///
/// Names iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    objects: BTreeMap<String, Object>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Insert an object, returning the object previously bound to the name.
    pub fn insert(&mut self, object: Object) -> Option<Object> {
        self.objects.insert(object.name().to_string(), object)
    }

    pub fn lookup(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Whether `object` is the object this scope binds its name to.
    pub fn declares(&self, object: &Object) -> bool {
        self.lookup(object.name()) == Some(object)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

// ============================================================================
// Checked Package
// ============================================================================

/// One package produced by a [`TypeChecker`](crate::TypeChecker) for a
/// directory.
#[derive(Debug, Clone)]
pub struct CheckedPackage {
    pub path: String,
    pub name: String,
    /// Imported packages keyed by import path.
    pub imports: BTreeMap<String, PackageRef>,
    /// Every definition in the package, local declarations included, in
    /// declaration order.
    pub defs: Vec<Object>,
    /// Package-level scope.
    pub scope: Scope,
}

impl CheckedPackage {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        CheckedPackage {
            path: path.into(),
            name: name.into(),
            imports: BTreeMap::new(),
            defs: Vec::new(),
            scope: Scope::new(),
        }
    }

    pub fn package_ref(&self) -> PackageRef {
        PackageRef::new(self.path.clone(), self.name.clone())
    }
}

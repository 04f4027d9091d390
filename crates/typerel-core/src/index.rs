//! Global entity indices.
//!
//! Entities are keyed by owning package path, then by name, giving O(1)
//! lookup. Enumeration is sorted by [`EntityKey`](crate::entity::EntityKey)
//! so results never depend on hash order.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::warn;

use crate::entity::{Aggregate, Entity, Interface, NamedType, TypeAlias};
use crate::package::{Package, PackagePath};

/// Index of one entity kind.
#[derive(Debug)]
pub struct EntityIndex<T> {
    entries: HashMap<PackagePath, HashMap<String, Arc<T>>>,
    len: usize,
}

impl<T> Default for EntityIndex<T> {
    fn default() -> Self {
        EntityIndex {
            entries: HashMap::new(),
            len: 0,
        }
    }
}

impl<T: Entity> EntityIndex<T> {
    pub fn new() -> Self {
        EntityIndex::default()
    }

    /// Insert an entity, returning the one it replaced.
    pub fn put(&mut self, entity: Arc<T>) -> Option<Arc<T>> {
        let key = entity.key();
        let previous = self
            .entries
            .entry(key.package.clone())
            .or_default()
            .insert(key.name.clone(), entity);
        match &previous {
            Some(_) => warn!(entity = %key, "replaced index entry"),
            None => self.len += 1,
        }
        previous
    }

    pub fn get(&self, package: &str, name: &str) -> Option<&Arc<T>> {
        self.entries.get(package)?.get(name)
    }

    pub fn contains(&self, package: &str, name: &str) -> bool {
        self.get(package, name).is_some()
    }

    /// Every entity, sorted by package path then name.
    pub fn all(&self) -> Vec<&Arc<T>> {
        let mut all: Vec<_> = self.entries.values().flat_map(HashMap::values).collect();
        all.sort_by_key(|e| e.key());
        all
    }

    /// Entities of one package, sorted by name.
    pub fn in_package(&self, package: &str) -> Vec<&Arc<T>> {
        let mut found: Vec<_> = self
            .entries
            .get(package)
            .map(|names| names.values().collect())
            .unwrap_or_default();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        found
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub type AggregateMap = EntityIndex<Aggregate>;
pub type InterfaceMap = EntityIndex<Interface>;
pub type NamedTypeMap = EntityIndex<NamedType>;
pub type TypeAliasMap = EntityIndex<TypeAlias>;

/// Registered packages by path, iterated in path order.
#[derive(Debug, Default)]
pub struct PackageMap {
    packages: BTreeMap<PackagePath, Arc<Package>>,
}

impl PackageMap {
    pub fn new() -> Self {
        PackageMap::default()
    }

    pub(crate) fn insert(&mut self, package: Arc<Package>) -> Option<Arc<Package>> {
        self.packages.insert(package.path().clone(), package)
    }

    pub fn get(&self, path: &str) -> Option<&Arc<Package>> {
        self.packages.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.packages.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Package>> {
        self.packages.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PackagePath> {
        self.packages.keys()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TypeAlias;
    use crate::package::PackageSummary;
    use typerel_types::{BasicKind, Object, PackageRef, Position, Type};

    fn alias(pkg: &str, name: &str) -> Arc<TypeAlias> {
        let owner = PackageRef::new(pkg, "p");
        let object = Object::alias(name, Position::default(), owner, Type::basic(BasicKind::Int));
        Arc::new(TypeAlias::from_object(&object, &PackageSummary::new(pkg, "p")).unwrap())
    }

    #[test]
    fn lookup_and_sorted_enumeration() {
        let mut index = TypeAliasMap::new();
        index.put(alias("example.com/b", "Z"));
        index.put(alias("example.com/a", "Y"));
        index.put(alias("example.com/b", "A"));

        assert_eq!(index.len(), 3);
        assert!(index.contains("example.com/a", "Y"));
        assert!(index.get("example.com/a", "Z").is_none());

        let keys: Vec<_> = index.all().iter().map(|a| a.key().to_string()).collect();
        assert_eq!(
            keys,
            vec!["example.com/a.Y", "example.com/b.A", "example.com/b.Z"]
        );
        let in_b = index.in_package("example.com/b");
        let names: Vec<_> = in_b.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["A", "Z"]);
    }

    #[test]
    fn replacing_keeps_count() {
        let mut index = TypeAliasMap::new();
        assert!(index.put(alias("example.com/a", "X")).is_none());
        assert!(index.put(alias("example.com/a", "X")).is_some());
        assert_eq!(index.len(), 1);
    }
}

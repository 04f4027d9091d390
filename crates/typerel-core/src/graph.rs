//! Package dependency graphs.
//!
//! A [`PackageGraph`] maps every registered package to the packages it
//! imports. Without external packages, only edges to registered packages
//! are kept. Keys and edge lists are sorted byte-wise by path, so two builds
//! from the same registry are equal.

use std::collections::BTreeMap;

use crate::package::{Import, PackagePath, PackageSummary};
use crate::relations::Relations;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageGraph {
    include_external: bool,
    edges: BTreeMap<PackagePath, Vec<PackageSummary>>,
}

impl PackageGraph {
    pub fn new(relations: &Relations, include_external: bool) -> Self {
        let packages = relations.packages();
        let mut edges = BTreeMap::new();
        for package in packages.iter() {
            let mut imports: Vec<PackageSummary> = package
                .detail()
                .imports()
                .iter()
                .map(Import::summary)
                .filter(|target| include_external || packages.contains(target.path().as_str()))
                .cloned()
                .collect();
            imports.sort();
            imports.dedup();
            edges.insert(package.path().clone(), imports);
        }
        PackageGraph {
            include_external,
            edges,
        }
    }

    /// Whether edges to unregistered packages are kept.
    pub fn include_external(&self) -> bool {
        self.include_external
    }

    /// Every registered package path, sorted.
    pub fn sorted_package_paths(&self) -> Vec<&PackagePath> {
        self.edges.keys().collect()
    }

    /// Packages imported by `path`, sorted by path. Empty for unknown paths.
    pub fn sorted_imports(&self, path: &str) -> &[PackageSummary] {
        self.edges.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.sorted_imports(from)
            .iter()
            .any(|target| target.path().as_str() == to)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{Package, PackageDetail};

    fn package(path: &str, imports: &[&str]) -> Package {
        let detail = PackageDetail {
            imports: imports
                .iter()
                .map(|p| Import::new(PackageSummary::new(*p, "x")))
                .collect(),
            ..PackageDetail::default()
        };
        Package::new(PackageSummary::new(path, "x"), detail)
    }

    fn relations() -> Relations {
        let mut relations = Relations::new();
        relations
            .add_package(package("example.com/app", &["fmt", "example.com/util", "example.com/db"]))
            .unwrap();
        relations
            .add_package(package("example.com/db", &["example.com/util", "database/sql"]))
            .unwrap();
        relations.add_package(package("example.com/util", &["fmt"])).unwrap();
        relations
    }

    fn paths(summaries: &[PackageSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.path().as_str()).collect()
    }

    #[test]
    fn internal_graph_drops_unregistered_targets() {
        let relations = relations();
        let graph = relations.package_graph();

        assert!(!graph.include_external());
        let sorted = graph.sorted_package_paths();
        let keys: Vec<_> = sorted.iter().map(|p| p.as_str()).collect();
        assert_eq!(keys, vec!["example.com/app", "example.com/db", "example.com/util"]);
        assert_eq!(
            paths(graph.sorted_imports("example.com/app")),
            vec!["example.com/db", "example.com/util"]
        );
        assert!(graph.sorted_imports("example.com/util").is_empty());
        assert!(graph.sorted_imports("example.com/unknown").is_empty());
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn external_graph_is_a_superset() {
        let relations = relations();
        let internal = relations.package_graph();
        let external = relations.package_graph_with_external();

        assert_eq!(
            paths(external.sorted_imports("example.com/app")),
            vec!["example.com/db", "example.com/util", "fmt"]
        );
        for path in internal.sorted_package_paths() {
            for target in internal.sorted_imports(path.as_str()) {
                assert!(external.contains_edge(path.as_str(), target.path().as_str()));
            }
        }
    }

    #[test]
    fn builds_are_deterministic() {
        let relations = relations();
        assert_eq!(relations.package_graph(), relations.package_graph());
    }
}

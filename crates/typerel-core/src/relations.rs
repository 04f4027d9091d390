//! The relation registry.
//!
//! [`Relations`] is the aggregation root of an analysis session. Its
//! lifecycle has two phases:
//!
//! 1. Loading: packages are added either by scanning directories
//!    ([`Relations::load`]) or directly ([`Relations::add_package`]). A
//!    scan checks every directory first and extracts entities afterwards.
//! 2. Finalized: [`Relations::register_relations`] computes the implements
//!    relation over every aggregate and interface. From then on the registry
//!    is read-only.
//!
//! Package graphs do not depend on the implements relation and can be built
//! in either phase.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use typerel_types::{AnalysisPass, CheckedPackage, TypeChecker, Universe};

use crate::entity::{Aggregate, Entity, Interface};
use crate::error::{RelationsError, RelationsResult};
use crate::extract::extract_package;
use crate::graph::PackageGraph;
use crate::implements::implements;
use crate::index::{AggregateMap, InterfaceMap, NamedTypeMap, PackageMap, TypeAliasMap};
use crate::options::LoadOptions;
use crate::package::{Package, NO_PACKAGE_PATH};
use crate::source::{AnalysisPackage, DirectoryPackage};
use crate::walk::{walk_directories, SkipRules};

/// Packages, entities and the relations between them.
#[derive(Debug)]
pub struct Relations {
    universe: Arc<Universe>,
    packages: PackageMap,
    aggregates: AggregateMap,
    interfaces: InterfaceMap,
    aliases: TypeAliasMap,
    named_types: NamedTypeMap,
    finalized: bool,
}

impl Default for Relations {
    fn default() -> Self {
        Relations::new()
    }
}

impl Relations {
    /// An empty registry with a fresh universe.
    pub fn new() -> Self {
        Relations::with_universe(Arc::new(Universe::new()))
    }

    /// An empty registry sharing an existing universe.
    pub fn with_universe(universe: Arc<Universe>) -> Self {
        Relations {
            universe,
            packages: PackageMap::new(),
            aggregates: AggregateMap::new(),
            interfaces: InterfaceMap::new(),
            aliases: TypeAliasMap::new(),
            named_types: NamedTypeMap::new(),
            finalized: false,
        }
    }

    /// Build a finalized registry from one analysis pass.
    pub fn from_analysis(pass: &AnalysisPass) -> RelationsResult<Relations> {
        let mut relations = Relations::with_universe(Arc::clone(&pass.universe));
        let package = extract_package(&AnalysisPackage::new(pass), &relations.universe);
        relations.add_package(package)?;
        relations.register_relations()?;
        Ok(relations)
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Load every root of `options`.
    ///
    /// Recursive roots are walked depth first, skipping hidden, `vendor` and
    /// ignored directories. Every directory is checked before any package is
    /// extracted, so entities see the named types of all loaded packages
    /// whatever the walk order. The first failure aborts the load.
    pub fn load(&mut self, options: &LoadOptions, checker: &mut dyn TypeChecker) -> RelationsResult<()> {
        let first = options.roots.first().map(PathBuf::as_path);
        self.ensure_loading(first.unwrap_or_else(|| Path::new(".")))?;

        let rules = SkipRules::new(&options.ignored);
        let mut pending = Vec::new();
        for root in &options.roots {
            if options.recursive {
                walk_directories(
                    root,
                    |path, depth| rules.should_skip(path, depth),
                    |dir| self.check_directory(dir, &mut *checker, &mut pending),
                )?;
            } else {
                self.check_directory(root, &mut *checker, &mut pending)?;
            }
        }
        self.register_checked(pending)?;

        info!(
            roots = options.roots.len(),
            packages = self.packages.len(),
            "loaded packages"
        );
        Ok(())
    }

    /// Check one directory and register the packages it holds.
    ///
    /// Packages already registered by an earlier call are skipped. Named
    /// types of other directories are only visible if they were loaded
    /// before; use [`Relations::load`] to load mutually dependent packages.
    pub fn parse_directory(&mut self, dir: &Path, checker: &mut dyn TypeChecker) -> RelationsResult<()> {
        self.ensure_loading(dir)?;
        let mut pending = Vec::new();
        self.check_directory(dir, checker, &mut pending)?;
        self.register_checked(pending)
    }

    fn ensure_loading(&self, path: &Path) -> RelationsResult<()> {
        if self.finalized {
            return Err(RelationsError::Finalized {
                path: path.display().to_string(),
            });
        }
        Ok(())
    }

    /// Check `dir` into a scratch universe and merge the packages not seen
    /// yet into the shared one. Checked packages are queued on `pending`.
    fn check_directory(
        &mut self,
        dir: &Path,
        checker: &mut dyn TypeChecker,
        pending: &mut Vec<CheckedPackage>,
    ) -> RelationsResult<()> {
        debug!(dir = %dir.display(), "parsing directory");
        let mut scratch = Universe::new();
        let checked = checker
            .check_dir(dir, &mut scratch)
            .map_err(|source| RelationsError::Load {
                dir: dir.to_path_buf(),
                source,
            })?;

        for pkg in checked {
            let seen = self.packages.contains(&pkg.path) || pending.iter().any(|p| p.path == pkg.path);
            if seen {
                debug!(package = %pkg.path, dir = %dir.display(), "skipping already registered package");
                continue;
            }
            let merged = Arc::make_mut(&mut self.universe).merge_package(&scratch, &pkg.path);
            debug!(package = %pkg.path, types = merged, "merged named types");
            pending.push(pkg);
        }
        Ok(())
    }

    fn register_checked(&mut self, pending: Vec<CheckedPackage>) -> RelationsResult<()> {
        for pkg in &pending {
            let package = extract_package(&DirectoryPackage::new(pkg), &self.universe);
            self.add_package(package)?;
        }
        Ok(())
    }

    /// Register a package and index its entities.
    ///
    /// The synthetic `"."` package is ignored.
    pub fn add_package(&mut self, package: Package) -> RelationsResult<()> {
        let path = package.path().as_str();
        if path == NO_PACKAGE_PATH {
            return Ok(());
        }
        if self.finalized {
            return Err(RelationsError::Finalized {
                path: path.to_string(),
            });
        }
        if self.packages.contains(path) {
            return Err(RelationsError::DuplicatePackage {
                path: path.to_string(),
            });
        }

        let detail = package.detail();
        for aggregate in detail.aggregates() {
            self.aggregates.put(Arc::clone(aggregate));
        }
        for interface in detail.interfaces() {
            self.interfaces.put(Arc::clone(interface));
        }
        for alias in detail.type_aliases() {
            self.aliases.put(Arc::clone(alias));
        }
        for named in detail.named_types() {
            self.named_types.put(Arc::clone(named));
        }
        self.packages.insert(Arc::new(package));
        Ok(())
    }

    /// Compute the implements relation for every aggregate.
    pub fn register_relations(&mut self) -> RelationsResult<()> {
        if self.finalized {
            return Err(RelationsError::AlreadyFinalized);
        }

        let interfaces = self.interfaces.all();
        let mut relations = 0;
        for aggregate in self.aggregates.all() {
            let mut implemented = InterfaceMap::new();
            for interface in interfaces.iter().copied() {
                if implements(&self.universe, aggregate.ty(), interface) {
                    implemented.put(Arc::clone(interface));
                }
            }
            relations += implemented.len();
            if !aggregate.resolve(implemented) {
                warn!(aggregate = %aggregate.qualified_name(), "implements relation already resolved");
            }
        }

        self.finalized = true;
        info!(
            aggregates = self.aggregates.len(),
            interfaces = self.interfaces.len(),
            relations,
            "registered implements relations"
        );
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn packages(&self) -> &PackageMap {
        &self.packages
    }

    pub fn aggregates(&self) -> &AggregateMap {
        &self.aggregates
    }

    pub fn interfaces(&self) -> &InterfaceMap {
        &self.interfaces
    }

    pub fn named_types(&self) -> &NamedTypeMap {
        &self.named_types
    }

    pub fn type_aliases(&self) -> &TypeAliasMap {
        &self.aliases
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Aggregates implementing `interface`, sorted by key.
    pub fn implementors(&self, interface: &Interface) -> RelationsResult<Vec<&Arc<Aggregate>>> {
        let key = interface.key();
        let mut found = Vec::new();
        for aggregate in self.aggregates.all() {
            if aggregate
                .implemented_interfaces()?
                .contains(key.package.as_str(), &key.name)
            {
                found.push(aggregate);
            }
        }
        Ok(found)
    }

    /// Dependency graph restricted to registered packages.
    pub fn package_graph(&self) -> PackageGraph {
        PackageGraph::new(self, false)
    }

    /// Dependency graph including edges to packages that were not loaded.
    pub fn package_graph_with_external(&self) -> PackageGraph {
        PackageGraph::new(self, true)
    }
}

/// Load `options` with `checker` and compute the implements relation.
pub fn load_relations(options: &LoadOptions, checker: &mut dyn TypeChecker) -> RelationsResult<Relations> {
    let mut relations = Relations::new();
    relations.load(options, checker)?;
    relations.register_relations()?;
    Ok(relations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{PackageDetail, PackageSummary};
    use typerel_types::{check_export, PackageExport};

    fn add_export(relations: &mut Relations, export: serde_json::Value) -> RelationsResult<()> {
        let export: PackageExport = serde_json::from_value(export).unwrap();
        let checked = check_export(export, Arc::make_mut(&mut relations.universe)).unwrap();
        let package = extract_package(&DirectoryPackage::new(&checked), &relations.universe);
        relations.add_package(package)
    }

    fn io_package() -> serde_json::Value {
        serde_json::json!({
            "path": "example.com/io",
            "name": "io",
            "decls": [
                {"kind": "type", "name": "Closer", "underlying": {"kind": "interface", "methods": [
                    {"name": "Close", "signature": {"results": [{"kind": "named", "name": "error"}]}}
                ]}},
                {"kind": "type", "name": "Empty", "underlying": {"kind": "interface"}},
                {"kind": "type", "name": "File", "underlying": {"kind": "struct"}, "methods": [
                    {"name": "Close", "pointer_receiver": true,
                     "signature": {"results": [{"kind": "named", "name": "error"}]}}
                ]},
                {"kind": "type", "name": "Buffer", "underlying": {"kind": "struct"}}
            ]
        })
    }

    #[test]
    fn implements_relation_after_finalization() {
        let mut relations = Relations::new();
        add_export(&mut relations, io_package()).unwrap();

        let file = Arc::clone(relations.aggregates().get("example.com/io", "File").unwrap());
        assert!(matches!(
            file.implemented_interfaces(),
            Err(RelationsError::Unresolved { .. })
        ));

        relations.register_relations().unwrap();
        let implemented = file.implemented_interfaces().unwrap();
        assert_eq!(implemented.len(), 1);
        assert!(implemented.contains("example.com/io", "Closer"));

        let buffer = relations.aggregates().get("example.com/io", "Buffer").unwrap();
        assert!(buffer.implemented_interfaces().unwrap().is_empty());

        let closer = relations.interfaces().get("example.com/io", "Closer").unwrap();
        let names: Vec<_> = relations
            .implementors(closer)
            .unwrap()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, vec!["File"]);

        let empty = relations.interfaces().get("example.com/io", "Empty").unwrap();
        assert!(relations.implementors(empty).unwrap().is_empty());
    }

    #[test]
    fn duplicate_package_is_rejected() {
        let mut relations = Relations::new();
        add_export(&mut relations, io_package()).unwrap();
        let err = add_export(&mut relations, io_package()).unwrap_err();
        assert!(matches!(err, RelationsError::DuplicatePackage { ref path } if path == "example.com/io"));
        assert_eq!(relations.aggregates().len(), 2);
    }

    #[test]
    fn no_package_path_is_ignored() {
        let mut relations = Relations::new();
        let package = Package::new(PackageSummary::new(".", ""), PackageDetail::default());
        relations.add_package(package).unwrap();
        assert!(relations.packages().is_empty());
    }

    #[test]
    fn finalized_registry_is_read_only() {
        let mut relations = Relations::new();
        relations.register_relations().unwrap();

        assert!(matches!(
            relations.register_relations(),
            Err(RelationsError::AlreadyFinalized)
        ));
        let err = add_export(&mut relations, io_package()).unwrap_err();
        assert!(matches!(err, RelationsError::Finalized { .. }));
        assert!(relations.packages().is_empty());
    }

    #[test]
    fn loading_after_finalization_leaves_universe_untouched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("io.symbols.json"),
            serde_json::to_string(&io_package()).unwrap(),
        )
        .unwrap();

        let mut relations = Relations::new();
        relations.register_relations().unwrap();
        let mut checker = typerel_types::ExportChecker::new();

        let err = relations
            .load(&LoadOptions::new().root(dir.path()), &mut checker)
            .unwrap_err();
        assert!(matches!(err, RelationsError::Finalized { .. }));
        let err = relations.parse_directory(dir.path(), &mut checker).unwrap_err();
        assert!(matches!(err, RelationsError::Finalized { .. }));

        assert_eq!(checker.files_read(), 0);
        assert_eq!(relations.universe().len(), Universe::new().len());
        assert!(!relations
            .universe()
            .contains(&typerel_types::TypeName::new("example.com/io", "File")));
        assert!(relations.packages().is_empty());
    }

    #[test]
    fn promoted_methods_explain_satisfaction() {
        let mut relations = Relations::new();
        add_export(
            &mut relations,
            serde_json::json!({
                "path": "example.com/net",
                "name": "net",
                "decls": [
                    {"kind": "type", "name": "Conn", "underlying": {"kind": "struct"}, "methods": [
                        {"name": "Close", "signature": {"results": [{"kind": "named", "name": "error"}]}}
                    ]},
                    {"kind": "type", "name": "TLSConn", "underlying": {"kind": "struct", "fields": [
                        {"name": "Conn", "embedded": true,
                         "type": {"kind": "pointer", "elem": {"kind": "named", "package": "example.com/net", "name": "Conn"}}}
                    ]}}
                ]
            }),
        )
        .unwrap();
        relations.register_relations().unwrap();

        let tls = relations.aggregates().get("example.com/net", "TLSConn").unwrap();
        assert!(tls.methods().is_empty());
        let promoted = tls.promoted_methods(relations.universe());
        assert_eq!(promoted.len(), 1);
        assert_eq!(promoted[0].name, "Close");
        assert_eq!(tls.embeds()[0].name(), "Conn");
    }
}

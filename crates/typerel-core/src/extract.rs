//! Package extraction.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use typerel_types::Universe;

use crate::entity::{classify, Classified};
use crate::package::{Import, Package, PackageDetail, PackageSummary};
use crate::source::PackageSource;

/// Extract every top-level entity of a package.
///
/// A definition is top-level iff the package scope binds its name to that
/// same object. Imports are sorted by path; entities of each kind by name.
pub fn extract_package(source: &dyn PackageSource, universe: &Universe) -> Package {
    let summary = PackageSummary::new(source.path(), source.name());

    let mut imports: Vec<Import> = source
        .imports()
        .iter()
        .map(|pkg| Import::new(PackageSummary::from(pkg)))
        .collect();
    imports.sort_by(|a, b| a.summary().cmp(b.summary()));
    imports.dedup();

    let scope = source.scope();
    let mut seen = HashSet::new();
    let mut top_level: Vec<_> = source
        .defs()
        .into_iter()
        .filter(|object| scope.declares(object))
        .filter(|object| seen.insert(object.name().to_string()))
        .collect();
    top_level.sort_by(|a, b| a.name().cmp(b.name()));

    let mut detail = PackageDetail {
        imports,
        ..PackageDetail::default()
    };
    for object in top_level {
        match classify(object, &summary, universe) {
            Some(Classified::Aggregate(a)) => detail.aggregates.push(Arc::new(a)),
            Some(Classified::Interface(i)) => detail.interfaces.push(Arc::new(i)),
            Some(Classified::NamedType(n)) => detail.named_types.push(Arc::new(n)),
            Some(Classified::Alias(a)) => detail.aliases.push(Arc::new(a)),
            None => {}
        }
    }

    debug!(
        package = %summary.path(),
        aggregates = detail.aggregates.len(),
        interfaces = detail.interfaces.len(),
        named_types = detail.named_types.len(),
        aliases = detail.aliases.len(),
        "extracted package"
    );
    Package::new(summary, detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::source::{AnalysisPackage, DirectoryPackage};
    use typerel_types::{check_export, AnalysisPass, CheckedPackage, PackageExport};

    fn shapes_package(universe: &mut Universe) -> CheckedPackage {
        let export: PackageExport = serde_json::from_value(serde_json::json!({
            "path": "example.com/shapes",
            "name": "shapes",
            "imports": [
                {"path": "math", "name": "math"},
                {"path": "fmt", "name": "fmt"}
            ],
            "decls": [
                {"kind": "type", "name": "Square", "underlying": {"kind": "struct"}},
                {"kind": "type", "name": "Circle", "underlying": {"kind": "struct"}},
                {"kind": "type", "name": "Shape", "underlying": {"kind": "interface"}},
                {"kind": "type", "name": "Unit", "underlying": {"kind": "basic", "name": "string"}},
                {"kind": "alias", "name": "Length", "target": {"kind": "basic", "name": "float64"}},
                {"kind": "func", "name": "New"},
                {"kind": "var", "name": "Default", "type": {"kind": "basic", "name": "int"}},
                {"kind": "type", "name": "scratch", "underlying": {"kind": "struct"}, "local": true},
                {"kind": "alias", "name": "Width", "target": {"kind": "basic", "name": "int"}, "local": true}
            ]
        }))
        .unwrap();
        check_export(export, universe).unwrap()
    }

    fn names<T: Entity>(entities: &[Arc<T>]) -> Vec<String> {
        entities.iter().map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn extracts_top_level_entities() {
        let mut universe = Universe::new();
        let checked = shapes_package(&mut universe);
        let package = extract_package(&DirectoryPackage::new(&checked), &universe);
        let detail = package.detail();

        assert_eq!(package.summary().name().as_str(), "shapes");
        assert_eq!(names(detail.aggregates()), vec!["Circle", "Square"]);
        assert_eq!(names(detail.interfaces()), vec!["Shape"]);
        assert_eq!(names(detail.named_types()), vec!["Unit"]);
        assert_eq!(names(detail.type_aliases()), vec!["Length"]);

        let imports: Vec<_> = detail
            .imports()
            .iter()
            .map(|i| i.summary().path().as_str())
            .collect();
        assert_eq!(imports, vec!["fmt", "math"]);
    }

    #[test]
    fn both_sources_agree() {
        let mut universe = Universe::new();
        let checked = shapes_package(&mut universe);
        let from_dir = extract_package(&DirectoryPackage::new(&checked), &universe);

        let pass = AnalysisPass::from_checked(checked, Arc::new(universe));
        let from_pass = extract_package(&AnalysisPackage::new(&pass), &pass.universe);

        let (a, b) = (from_dir.detail(), from_pass.detail());
        assert_eq!(from_dir.summary(), from_pass.summary());
        assert_eq!(a.imports(), b.imports());
        assert_eq!(names(a.aggregates()), names(b.aggregates()));
        assert_eq!(names(a.interfaces()), names(b.interfaces()));
        assert_eq!(names(a.named_types()), names(b.named_types()));
        assert_eq!(names(a.type_aliases()), names(b.type_aliases()));
    }
}

//! The analysis-pass boundary.
//!
//! Hosting analysis frameworks hand over one already type-checked package at
//! a time. Definitions are keyed by the identifier that introduced them; the
//! package clause identifier defines no object.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::object::{Object, Position};
use crate::package::{CheckedPackage, PackageRef, Scope};
use crate::universe::Universe;

/// An identifier occurrence in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident {
    pub name: String,
    pub pos: Position,
}

impl Ident {
    pub fn new(name: impl Into<String>, pos: Position) -> Self {
        Ident {
            name: name.into(),
            pos,
        }
    }
}

/// The package being analyzed.
#[derive(Debug, Clone)]
pub struct PackageHandle {
    pub path: String,
    pub name: String,
    pub imports: Vec<PackageRef>,
    pub scope: Scope,
}

/// Type information recorded by the host's checker.
#[derive(Debug, Clone, Default)]
pub struct TypesInfo {
    /// Defining identifiers to the objects they define. `None` for
    /// identifiers that define nothing, such as the package clause.
    pub defs: BTreeMap<Ident, Option<Object>>,
}

/// One unit of work handed over by a host framework.
#[derive(Debug, Clone)]
pub struct AnalysisPass {
    pub pkg: PackageHandle,
    pub info: TypesInfo,
    pub universe: Arc<Universe>,
}

impl AnalysisPass {
    /// Build a pass over a package produced by a [`TypeChecker`](crate::TypeChecker).
    pub fn from_checked(pkg: CheckedPackage, universe: Arc<Universe>) -> Self {
        let mut defs = BTreeMap::new();
        defs.insert(Ident::new(pkg.name.clone(), Position::default()), None);
        for object in pkg.defs {
            defs.insert(Ident::new(object.name(), object.pos().clone()), Some(object));
        }
        AnalysisPass {
            pkg: PackageHandle {
                path: pkg.path,
                name: pkg.name,
                imports: pkg.imports.into_values().collect(),
                scope: pkg.scope,
            },
            info: TypesInfo { defs },
            universe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_clause_has_no_object() {
        let mut checked = CheckedPackage::new("example.com/a", "a");
        let obj = Object::defined_type(
            "T",
            Position::new("a.go", 3, 6),
            checked.package_ref(),
        );
        checked.scope.insert(obj.clone());
        checked.defs.push(obj);

        let pass = AnalysisPass::from_checked(checked, Arc::new(Universe::new()));
        assert_eq!(pass.info.defs.len(), 2);
        assert_eq!(pass.info.defs.values().filter(|o| o.is_none()).count(), 1);
        assert_eq!(pass.pkg.scope.len(), 1);
    }
}

use typerel_types::{Object, Position, Type};

use super::Entity;
use crate::package::PackageSummary;

/// A type alias (`type A = B`).
#[derive(Debug, Clone)]
pub struct TypeAlias {
    pos: Position,
    name: String,
    package: PackageSummary,
    target: Type,
}

impl TypeAlias {
    /// Extract an alias, or `None` if `object` is not one.
    pub fn from_object(object: &Object, package: &PackageSummary) -> Option<Self> {
        if !object.is_alias() {
            return None;
        }
        Some(TypeAlias {
            pos: object.pos().clone(),
            name: object.name().to_string(),
            package: package.clone(),
            target: object.ty().clone(),
        })
    }

    /// The aliased type.
    pub fn target(&self) -> &Type {
        &self.target
    }
}

impl Entity for TypeAlias {
    fn name(&self) -> &str {
        &self.name
    }

    fn package(&self) -> &PackageSummary {
        &self.package
    }

    fn pos(&self) -> &Position {
        &self.pos
    }
}

use typerel_types::{Object, Position, Type, Universe};

use super::member::{declared_methods, Method};
use super::{is_defined_type, Entity, Interface};
use crate::package::PackageSummary;

/// A defined type that is neither an aggregate nor an interface, such as
/// `type Celsius float64`.
#[derive(Debug, Clone)]
pub struct NamedType {
    pos: Position,
    ty: Type,
    underlying: Type,
    name: String,
    package: PackageSummary,
    methods: Vec<Method>,
}

impl NamedType {
    /// Extract a named type, or `None` if `object` is not a defined type or
    /// its underlying type is a struct or interface.
    pub fn from_object(object: &Object, package: &PackageSummary, universe: &Universe) -> Option<Self> {
        if !is_defined_type(object) {
            return None;
        }
        let underlying = universe.underlying(object.ty());
        if matches!(underlying, Type::Struct(_) | Type::Interface(_)) {
            return None;
        }
        let methods = object
            .ty()
            .as_named()
            .map(|name| declared_methods(name, universe))
            .unwrap_or_default();
        Some(NamedType {
            pos: object.pos().clone(),
            ty: object.ty().clone(),
            underlying: underlying.clone(),
            name: object.name().to_string(),
            package: package.clone(),
            methods,
        })
    }

    /// The declared type.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn underlying(&self) -> &Type {
        &self.underlying
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Whether the type satisfies `interface`.
    pub fn implements(&self, interface: &Interface, universe: &Universe) -> bool {
        crate::implements::implements(universe, &self.ty, interface)
    }
}

impl Entity for NamedType {
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

use typerel_types::{InterfaceType, MethodSig, Object, Position, Type, Universe};

use super::member::{interface_members, Embed, Method};
use super::{is_defined_type, Entity};
use crate::package::PackageSummary;

/// A named interface.
#[derive(Debug, Clone)]
pub struct Interface {
    pos: Position,
    ty: Type,
    underlying: InterfaceType,
    name: String,
    package: PackageSummary,
    methods: Vec<Method>,
    embeds: Vec<Embed>,
    method_set: Vec<MethodSig>,
}

impl Interface {
    /// Extract an interface, or `None` if `object` is not a defined type
    /// with an interface underlying type.
    pub fn from_object(object: &Object, package: &PackageSummary, universe: &Universe) -> Option<Self> {
        if !is_defined_type(object) {
            return None;
        }
        let Type::Interface(underlying) = universe.underlying(object.ty()) else {
            return None;
        };
        let (methods, embeds) = interface_members(underlying, universe);
        Some(Interface {
            pos: object.pos().clone(),
            ty: object.ty().clone(),
            underlying: underlying.clone(),
            name: object.name().to_string(),
            package: package.clone(),
            methods,
            embeds,
            method_set: universe.interface_method_set(underlying),
        })
    }

    /// The declared (named) type.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The structural interface behind the name.
    pub fn underlying(&self) -> &InterfaceType {
        &self.underlying
    }

    /// Methods written in the interface body.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Embedded interfaces.
    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    /// Every method, embedded interfaces flattened, sorted by name.
    pub fn method_set(&self) -> &[MethodSig] {
        &self.method_set
    }

    /// Whether the complete method set is empty.
    pub fn is_empty(&self) -> bool {
        self.method_set.is_empty()
    }

    /// `"<package name>.<name>"`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package.name(), self.name)
    }
}

impl Entity for Interface {
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

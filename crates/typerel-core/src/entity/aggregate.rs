use std::sync::OnceLock;

use typerel_types::{Object, Position, Selection, Type, Universe};

use super::member::{declared_methods, struct_members, Embed, Field, Method};
use super::{is_defined_type, Entity, Interface};
use crate::error::{RelationsError, RelationsResult};
use crate::index::InterfaceMap;
use crate::package::PackageSummary;

/// A named struct type.
///
/// The set of interfaces an aggregate implements is computed by
/// [`Relations::register_relations`](crate::Relations::register_relations)
/// once every package is loaded. Until then it is unresolved and
/// [`implemented_interfaces`](Aggregate::implemented_interfaces) fails.
#[derive(Debug)]
pub struct Aggregate {
    pos: Position,
    ty: Type,
    name: String,
    package: PackageSummary,
    methods: Vec<Method>,
    fields: Vec<Field>,
    embeds: Vec<Embed>,
    implements: OnceLock<InterfaceMap>,
}

impl Aggregate {
    /// Extract an aggregate, or `None` if `object` is not a defined type
    /// with a struct underlying type.
    pub fn from_object(object: &Object, package: &PackageSummary, universe: &Universe) -> Option<Self> {
        if !is_defined_type(object) {
            return None;
        }
        let Type::Struct(st) = universe.underlying(object.ty()) else {
            return None;
        };
        let (fields, embeds) = struct_members(st, universe);
        let methods = object
            .ty()
            .as_named()
            .map(|name| declared_methods(name, universe))
            .unwrap_or_default();
        Some(Aggregate {
            pos: object.pos().clone(),
            ty: object.ty().clone(),
            name: object.name().to_string(),
            package: package.clone(),
            methods,
            fields,
            embeds,
            implements: OnceLock::new(),
        })
    }

    /// The declared (named) type.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Methods declared directly on the type.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Named fields; embedded members are in [`embeds`](Aggregate::embeds).
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    /// `"<package name>.<name>"`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package.name(), self.name)
    }

    /// Interfaces this aggregate implements.
    pub fn implemented_interfaces(&self) -> RelationsResult<&InterfaceMap> {
        self.implements.get().ok_or_else(|| RelationsError::Unresolved {
            aggregate: self.key().to_string(),
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.implements.get().is_some()
    }

    /// Record the implements relation. Returns false if already resolved.
    pub(crate) fn resolve(&self, interfaces: InterfaceMap) -> bool {
        self.implements.set(interfaces).is_ok()
    }

    /// Whether the aggregate satisfies `interface`, computed directly.
    pub fn implements(&self, interface: &Interface, universe: &Universe) -> bool {
        crate::implements::implements(universe, &self.ty, interface)
    }

    /// Methods of `*T` obtained through embedding, sorted by name.
    pub fn promoted_methods(&self, universe: &Universe) -> Vec<Selection> {
        universe
            .method_set(&self.ty.to_pointer())
            .iter()
            .filter(|s| s.is_promoted())
            .cloned()
            .collect()
    }
}

impl Entity for Aggregate {
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

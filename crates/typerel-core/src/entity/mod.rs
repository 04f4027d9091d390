//! Entity extraction.
//!
//! Each extractor turns one declared object into a typed entity, or reports
//! that it does not apply. [`classify`] runs them in a fixed order:
//!
//! 1. an alias is always a [`TypeAlias`], whatever it denotes
//! 2. a type whose underlying type is a struct is an [`Aggregate`]
//! 3. a type whose underlying type is an interface is an [`Interface`]
//! 4. any other defined type is a [`NamedType`]
//!
//! Functions, variables and constants are never classified.

mod aggregate;
mod alias;
mod interface;
mod member;
mod named_type;

pub use aggregate::Aggregate;
pub use alias::TypeAlias;
pub use interface::Interface;
pub use member::{Embed, EmbedKind, Field, Method};
pub use named_type::NamedType;

use std::fmt;

use typerel_types::{Object, Position, Universe};

use crate::package::{PackagePath, PackageSummary};

/// Common surface of all extracted entities.
pub trait Entity {
    fn name(&self) -> &str;

    /// The package the entity is declared in.
    fn package(&self) -> &PackageSummary;

    fn pos(&self) -> &Position;

    fn key(&self) -> EntityKey {
        EntityKey::new(self.package().path().clone(), self.name())
    }
}

/// Index key of an entity: owning package path plus name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey {
    pub package: PackagePath,
    pub name: String,
}

impl EntityKey {
    pub fn new(package: PackagePath, name: impl Into<String>) -> Self {
        EntityKey {
            package,
            name: name.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// Outcome of classifying one object.
#[derive(Debug)]
pub enum Classified {
    Aggregate(Aggregate),
    Interface(Interface),
    NamedType(NamedType),
    Alias(TypeAlias),
}

/// Classify a declared object.
pub fn classify(object: &Object, package: &PackageSummary, universe: &Universe) -> Option<Classified> {
    if let Some(alias) = TypeAlias::from_object(object, package) {
        return Some(Classified::Alias(alias));
    }
    if let Some(aggregate) = Aggregate::from_object(object, package, universe) {
        return Some(Classified::Aggregate(aggregate));
    }
    if let Some(interface) = Interface::from_object(object, package, universe) {
        return Some(Classified::Interface(interface));
    }
    NamedType::from_object(object, package, universe).map(Classified::NamedType)
}

/// Whether `object` declares a defined (non-alias) type.
fn is_defined_type(object: &Object) -> bool {
    object.is_type_name() && !object.is_alias()
}

#[cfg(test)]
mod tests {
    use super::*;
    use typerel_types::{
        BasicKind, InterfaceType, ObjectKind, PackageRef, Signature, StructField, StructType,
        Type, TypeName,
    };

    const PKG: &str = "example.com/zoo";

    fn pkg_ref() -> PackageRef {
        PackageRef::new(PKG, "zoo")
    }

    fn summary() -> PackageSummary {
        PackageSummary::new(PKG, "zoo")
    }

    fn defined(universe: &mut Universe, name: &str, underlying: Type) -> Object {
        universe.define(TypeName::new(PKG, name), underlying);
        Object::defined_type(name, Position::new("zoo.go", 1, 6), pkg_ref())
    }

    #[test]
    fn classification_order() {
        let mut u = Universe::new();
        let animal = defined(&mut u, "Animal", Type::Struct(StructType::default()));
        let speaker = defined(
            &mut u,
            "Speaker",
            Type::Interface(InterfaceType::new(vec![])),
        );
        let name = defined(&mut u, "Name", Type::basic(BasicKind::String));
        // An alias of a struct type is still an alias.
        let pet = Object::alias("Pet", Position::default(), pkg_ref(), Type::named(PKG, "Animal"));

        assert!(matches!(classify(&animal, &summary(), &u), Some(Classified::Aggregate(_))));
        assert!(matches!(classify(&speaker, &summary(), &u), Some(Classified::Interface(_))));
        assert!(matches!(classify(&name, &summary(), &u), Some(Classified::NamedType(_))));
        assert!(matches!(classify(&pet, &summary(), &u), Some(Classified::Alias(_))));
    }

    #[test]
    fn non_type_objects_are_misses() {
        let u = Universe::new();
        let func = Object::new(
            "Feed",
            Position::default(),
            pkg_ref(),
            ObjectKind::Func,
            Type::Signature(Signature::default()),
        );
        let var = Object::new(
            "count",
            Position::default(),
            pkg_ref(),
            ObjectKind::Var,
            Type::basic(BasicKind::Int),
        );
        assert!(classify(&func, &summary(), &u).is_none());
        assert!(classify(&var, &summary(), &u).is_none());
    }

    #[test]
    fn defined_type_over_named_struct_is_aggregate() {
        let mut u = Universe::new();
        defined(&mut u, "Animal", Type::Struct(StructType::default()));
        let dog = defined(&mut u, "Dog", Type::named(PKG, "Animal"));
        assert!(matches!(classify(&dog, &summary(), &u), Some(Classified::Aggregate(_))));
    }

    #[test]
    fn embeds_are_not_fields() {
        let mut u = Universe::new();
        defined(&mut u, "Base", Type::Struct(StructType::default()));
        defined(
            &mut u,
            "Speaker",
            Type::Interface(InterfaceType::new(vec![])),
        );
        let dog = defined(
            &mut u,
            "Dog",
            Type::Struct(StructType {
                fields: vec![
                    StructField::embedded(Type::pointer(Type::named(PKG, "Base"))),
                    StructField::embedded(Type::named(PKG, "Speaker")),
                    StructField::new("Name", Type::basic(BasicKind::String)),
                    StructField::new("age", Type::basic(BasicKind::Int)),
                ],
            }),
        );

        let Some(Classified::Aggregate(dog)) = classify(&dog, &summary(), &u) else {
            panic!("Dog should be an aggregate");
        };
        let fields: Vec<_> = dog.fields().iter().map(|f| (f.name(), f.is_exported())).collect();
        assert_eq!(fields, vec![("Name", true), ("age", false)]);

        let embeds: Vec<_> = dog
            .embeds()
            .iter()
            .map(|e| (e.name(), e.is_pointer(), e.kind()))
            .collect();
        assert_eq!(
            embeds,
            vec![
                ("Base", true, EmbedKind::Aggregate),
                ("Speaker", false, EmbedKind::Interface),
            ]
        );
        assert_eq!(dog.key().to_string(), "example.com/zoo.Dog");
        assert_eq!(dog.qualified_name(), "zoo.Dog");
    }
}

//! The structural implements policy.

use typerel_types::{Type, Universe};

use crate::entity::Interface;

/// Whether `ty` implements `interface`.
///
/// An interface with an empty method set (embedded interfaces included) is
/// never implemented. Otherwise `ty` is taken in pointer form, so both value
/// and pointer receiver methods count, and the question is answered by the
/// universe.
pub fn implements(universe: &Universe, ty: &Type, interface: &Interface) -> bool {
    if interface.is_empty() {
        return false;
    }
    universe.implements(&ty.to_pointer(), interface.underlying())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::PackageSummary;
    use typerel_types::{
        BasicKind, InterfaceType, MethodDecl, MethodSig, Object, PackageRef, Position, Signature,
        StructType, TypeName,
    };

    const PKG: &str = "example.com/io";

    fn interface(universe: &mut Universe, name: &str, iface: InterfaceType) -> Interface {
        universe.define(TypeName::new(PKG, name), Type::Interface(iface));
        let object = Object::defined_type(name, Position::default(), PackageRef::new(PKG, "io"));
        Interface::from_object(&object, &PackageSummary::new(PKG, "io"), universe).unwrap()
    }

    fn closer() -> InterfaceType {
        InterfaceType::new(vec![MethodSig::new(
            "Close",
            Signature::new(vec![], vec![Type::error()]),
        )])
    }

    fn file_type(universe: &mut Universe) -> Type {
        let name = TypeName::new(PKG, "File");
        universe.define(name.clone(), Type::Struct(StructType::default()));
        universe.add_method(
            &name,
            MethodDecl::new("Close", Signature::new(vec![], vec![Type::error()]), true),
        );
        Type::Named(name)
    }

    #[test]
    fn pointer_receiver_counts() {
        let mut u = Universe::new();
        let closer = interface(&mut u, "Closer", closer());
        let file = file_type(&mut u);
        assert!(implements(&u, &file, &closer));
        assert!(implements(&u, &Type::pointer(file), &closer));
    }

    #[test]
    fn empty_interface_is_never_implemented() {
        let mut u = Universe::new();
        let any = interface(&mut u, "Any", InterfaceType::default());
        let file = file_type(&mut u);
        assert!(!implements(&u, &file, &any));
        assert!(!implements(&u, &Type::basic(BasicKind::Int), &any));
    }

    #[test]
    fn embedding_only_interface_is_not_empty() {
        let mut u = Universe::new();
        interface(&mut u, "Closer", closer());
        let wrapped = interface(
            &mut u,
            "WrappedCloser",
            InterfaceType::default().with_embed(Type::named(PKG, "Closer")),
        );
        let file = file_type(&mut u);
        assert!(!wrapped.is_empty());
        assert!(implements(&u, &file, &wrapped));
    }

    #[test]
    fn wrong_signature_does_not_implement() {
        let mut u = Universe::new();
        let closer = interface(&mut u, "Closer", closer());
        let name = TypeName::new(PKG, "Pipe");
        u.define(name.clone(), Type::Struct(StructType::default()));
        u.add_method(&name, MethodDecl::new("Close", Signature::default(), false));
        assert!(!implements(&u, &Type::Named(name), &closer));
    }
}

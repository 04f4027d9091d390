//! Members of extracted entities: fields, methods and embeds.

use typerel_types::{is_exported, InterfaceType, Position, Signature, StructType, Type, TypeName, Universe};

/// A named (non-embedded) struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    ty: Type,
    exported: bool,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }
}

/// A method declared on a type or listed by an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    name: String,
    signature: Signature,
    pointer_receiver: bool,
    pos: Position,
}

impl Method {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Declared with a pointer receiver. Always false for interface methods.
    pub fn pointer_receiver(&self) -> bool {
        self.pointer_receiver
    }

    pub fn pos(&self) -> &Position {
        &self.pos
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// What an embedded member resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedKind {
    Aggregate,
    Interface,
    Other,
}

/// An embedded member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    name: String,
    ty: Type,
    pointer: bool,
    kind: EmbedKind,
}

impl Embed {
    fn new(name: String, ty: &Type, universe: &Universe) -> Self {
        let kind = match universe.underlying(ty.deref_pointer()) {
            Type::Struct(_) => EmbedKind::Aggregate,
            Type::Interface(_) => EmbedKind::Interface,
            _ => EmbedKind::Other,
        };
        Embed {
            name,
            ty: ty.clone(),
            pointer: ty.is_pointer(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The embedded type as written, pointer included.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Embedded through a pointer (`*T`).
    pub fn is_pointer(&self) -> bool {
        self.pointer
    }

    pub fn kind(&self) -> EmbedKind {
        self.kind
    }
}

/// Split a struct's members into plain fields and embeds.
pub(crate) fn struct_members(st: &StructType, universe: &Universe) -> (Vec<Field>, Vec<Embed>) {
    let mut fields = Vec::new();
    let mut embeds = Vec::new();
    for field in &st.fields {
        if field.embedded {
            embeds.push(Embed::new(field.name.clone(), &field.ty, universe));
        } else {
            fields.push(Field {
                name: field.name.clone(),
                ty: field.ty.clone(),
                exported: is_exported(&field.name),
            });
        }
    }
    (fields, embeds)
}

/// Explicit methods and embedded interfaces of an interface.
pub(crate) fn interface_members(iface: &InterfaceType, universe: &Universe) -> (Vec<Method>, Vec<Embed>) {
    let methods = iface
        .methods
        .iter()
        .map(|m| Method {
            name: m.name.clone(),
            signature: m.signature.clone(),
            pointer_receiver: false,
            pos: Position::default(),
        })
        .collect();
    let embeds = iface
        .embeds
        .iter()
        .map(|ty| {
            let name = match ty {
                Type::Named(name) => name.name.clone(),
                other => other.to_string(),
            };
            Embed::new(name, ty, universe)
        })
        .collect();
    (methods, embeds)
}

/// Methods declared on a named type.
pub(crate) fn declared_methods(name: &TypeName, universe: &Universe) -> Vec<Method> {
    universe
        .declared_methods(name)
        .iter()
        .map(|m| Method {
            name: m.name.clone(),
            signature: m.signature.clone(),
            pointer_receiver: m.pointer_receiver,
            pos: m.pos.clone(),
        })
        .collect()
}

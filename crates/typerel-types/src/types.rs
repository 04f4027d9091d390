//! Type handles produced by the compiler front end.
//!
//! A [`Type`] is a value describing the shape of a type. Named types are
//! referenced by their [`TypeName`] (package path plus name) rather than by
//! pointer, so recursive and cross-package types never form ownership cycles;
//! the [`Universe`](crate::Universe) resolves a name to its definition.
//!
//! Types deserialize from the symbol export format, tagged by `kind`:
//!
//! ```
//! use typerel_types::{BasicKind, Type};
//!
//! let ty: Type = serde_json::from_str(
//!     r#"{"kind": "pointer", "elem": {"kind": "basic", "name": "string"}}"#,
//! ).unwrap();
//! assert_eq!(ty, Type::pointer(Type::basic(BasicKind::String)));
//! assert_eq!(ty.to_string(), "*string");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Names
// ============================================================================

/// Qualified name of a named (defined) type.
///
/// Predeclared types such as `error` live in the empty package path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeName {
    /// Import path of the declaring package.
    #[serde(default)]
    pub package: String,
    /// Declared name.
    pub name: String,
}

impl TypeName {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeName {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Whether this names a predeclared type (no declaring package).
    pub fn is_predeclared(&self) -> bool {
        self.package.is_empty()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_predeclared() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

// ============================================================================
// Basic Types
// ============================================================================

/// Predeclared basic types.
///
/// `byte` and `rune` are accepted as spellings of `uint8` and `int32`; they
/// denote the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicKind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    #[serde(alias = "rune")]
    Int32,
    Int64,
    Uint,
    #[serde(alias = "byte")]
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    #[serde(rename = "unsafe.Pointer")]
    UnsafePointer,
}

impl BasicKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::String => "string",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::UnsafePointer => "unsafe.Pointer",
        }
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

// ============================================================================
// Composite Shapes
// ============================================================================

/// A function or method signature.
///
/// Parameter names carry no identity and are not recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<Type>,
    #[serde(default)]
    pub results: Vec<Type>,
    /// Whether the last parameter is variadic (`...T`, stored as `[]T`).
    #[serde(default)]
    pub variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<Type>, results: Vec<Type>) -> Self {
        Signature {
            params,
            results,
            variadic: false,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match param {
                Type::Slice { elem } if self.variadic && i == last => write!(f, "...{}", elem)?,
                _ => write!(f, "{}", param)?,
            }
        }
        write!(f, ")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " {}", single),
            many => {
                write!(f, " (")?;
                for (i, result) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", result)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// One field of a struct type.
///
/// For embedded fields `name` is the embedded type's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub embedded: bool,
}

impl StructField {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        StructField {
            name: name.into(),
            ty,
            embedded: false,
        }
    }

    /// An embedded field named after its type.
    pub fn embedded(ty: Type) -> Self {
        let name = match ty.deref_pointer() {
            Type::Named(name) => name.name.clone(),
            other => other.to_string(),
        };
        StructField {
            name,
            ty,
            embedded: true,
        }
    }
}

/// A struct type: an ordered field list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StructType {
    #[serde(default)]
    pub fields: Vec<StructField>,
}

/// A method signature declared in an interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    #[serde(default)]
    pub signature: Signature,
}

impl MethodSig {
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        MethodSig {
            name: name.into(),
            signature,
        }
    }
}

/// A structural interface: explicit methods plus embedded interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct InterfaceType {
    #[serde(default)]
    pub methods: Vec<MethodSig>,
    #[serde(default)]
    pub embeds: Vec<Type>,
}

impl InterfaceType {
    pub fn new(methods: Vec<MethodSig>) -> Self {
        InterfaceType {
            methods,
            embeds: Vec::new(),
        }
    }

    pub fn with_embed(mut self, embed: Type) -> Self {
        self.embeds.push(embed);
        self
    }
}

// ============================================================================
// Type
// ============================================================================

/// A type handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Basic {
        name: BasicKind,
    },
    /// Reference to a named type, resolved through the universe.
    Named(TypeName),
    Pointer {
        elem: Box<Type>,
    },
    Slice {
        elem: Box<Type>,
    },
    Array {
        len: u64,
        elem: Box<Type>,
    },
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: Box<Type>,
    },
    Signature(Signature),
    Struct(StructType),
    Interface(InterfaceType),
}

impl Type {
    pub fn basic(kind: BasicKind) -> Self {
        Type::Basic { name: kind }
    }

    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        Type::Named(TypeName::new(package, name))
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: Type) -> Self {
        Type::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// The predeclared `error` interface type.
    pub fn error() -> Self {
        Type::named("", "error")
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Type::Pointer { .. })
    }

    /// The pointer form of this type. Pointers are returned unchanged.
    pub fn to_pointer(&self) -> Type {
        match self {
            Type::Pointer { .. } => self.clone(),
            other => Type::pointer(other.clone()),
        }
    }

    /// Strip one level of pointer indirection.
    pub fn deref_pointer(&self) -> &Type {
        match self {
            Type::Pointer { elem } => elem,
            other => other,
        }
    }

    pub fn as_named(&self) -> Option<&TypeName> {
        match self {
            Type::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic { name } => write!(f, "{}", name.as_str()),
            Type::Named(name) => write!(f, "{}", name),
            Type::Pointer { elem } => write!(f, "*{}", elem),
            Type::Slice { elem } => write!(f, "[]{}", elem),
            Type::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            Type::Map { key, value } => write!(f, "map[{}]{}", key, value),
            Type::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {}", elem),
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
            },
            Type::Signature(sig) => write!(f, "func{}", sig),
            Type::Struct(st) => {
                write!(f, "struct{{")?;
                for (i, field) in st.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    if field.embedded {
                        write!(f, "{}", field.ty)?;
                    } else {
                        write!(f, "{} {}", field.name, field.ty)?;
                    }
                }
                write!(f, "}}")
            }
            Type::Interface(it) => {
                write!(f, "interface{{")?;
                let mut first = true;
                for embed in &it.embeds {
                    if !first {
                        write!(f, "; ")?;
                    }
                    first = false;
                    write!(f, "{}", embed)?;
                }
                for method in &it.methods {
                    if !first {
                        write!(f, "; ")?;
                    }
                    first = false;
                    write!(f, "{}{}", method.name, method.signature)?;
                }
                write!(f, "}}")
            }
        }
    }
}

//! Declared symbols.
//!
//! An [`Object`] is one named entity declared in a package: a type name, a
//! function, a variable or a constant. Objects are what the front end hands
//! to the core for classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::package::PackageRef;
use crate::types::Type;

// ============================================================================
// Source Positions
// ============================================================================

/// Position of a declaration in source.
///
/// Lines and columns are 1-indexed. A default position (empty file, zero
/// line) means the front end did not report one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// File path as reported by the front end.
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Position {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Position {
            file: file.into(),
            line,
            column,
        }
    }

    pub fn is_known(&self) -> bool {
        !self.file.is_empty() && self.line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        } else {
            write!(f, "-")
        }
    }
}

// ============================================================================
// Objects
// ============================================================================

/// What kind of entity an object declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A type declaration. `alias` is true for `type A = B`.
    TypeName { alias: bool },
    Func,
    Var,
    Const,
}

/// A declared symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    name: String,
    pos: Position,
    package: PackageRef,
    kind: ObjectKind,
    ty: Type,
}

impl Object {
    pub fn new(
        name: impl Into<String>,
        pos: Position,
        package: PackageRef,
        kind: ObjectKind,
        ty: Type,
    ) -> Self {
        Object {
            name: name.into(),
            pos,
            package,
            kind,
            ty,
        }
    }

    /// A defined type `type Name <underlying>`; its type is the named type.
    pub fn defined_type(name: impl Into<String>, pos: Position, package: PackageRef) -> Self {
        let name = name.into();
        let ty = Type::named(package.path.clone(), name.clone());
        Object::new(name, pos, package, ObjectKind::TypeName { alias: false }, ty)
    }

    /// An alias `type Name = target`; its type is the target.
    pub fn alias(name: impl Into<String>, pos: Position, package: PackageRef, target: Type) -> Self {
        Object::new(name, pos, package, ObjectKind::TypeName { alias: true }, target)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pos(&self) -> &Position {
        &self.pos
    }

    /// The package the object is declared in.
    pub fn package(&self) -> &PackageRef {
        &self.package
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The declared type: the named type for defined types, the target for
    /// aliases, the signature for functions.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn is_type_name(&self) -> bool {
        matches!(self.kind, ObjectKind::TypeName { .. })
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.kind, ObjectKind::TypeName { alias: true })
    }

    /// Exported names start with an upper-case letter.
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// Whether an identifier is exported from its package.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

//! typerel-types: the type-system side of typerel.
//!
//! This crate models what a compiler front end reports about a codebase:
//! type handles, declared objects, package scopes and the universe of named
//! types with their method sets. The relation engine in `typerel-core`
//! consumes it through two seams:
//!
//! - [`TypeChecker`]: turns a directory into checked packages. The bundled
//!   implementation is [`ExportChecker`], which reads compiler symbol
//!   exports (`*.symbols.json`).
//! - [`AnalysisPass`]: a single already checked package handed over by a
//!   hosting analysis framework.

pub mod analysis;
pub mod checker;
pub mod export;
pub mod object;
pub mod package;
pub mod types;
pub mod universe;

pub use analysis::{AnalysisPass, Ident, PackageHandle, TypesInfo};
pub use checker::{CheckError, CheckResult, TypeChecker};
pub use export::{check_export, read_export, DeclExport, ExportChecker, MethodExport, PackageExport, EXPORT_SUFFIX};
pub use object::{is_exported, Object, ObjectKind, Position};
pub use package::{CheckedPackage, PackageRef, Scope};
pub use types::{BasicKind, ChanDir, InterfaceType, MethodSig, Signature, StructField, StructType, Type, TypeName};
pub use universe::{MethodDecl, MethodSet, NamedDef, Selection, Universe};

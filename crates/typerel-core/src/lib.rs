//! typerel-core: entity extraction and type relations.
//!
//! Given type-checked packages, typerel-core classifies every top-level type
//! declaration as an [`Aggregate`], [`Interface`], [`NamedType`] or
//! [`TypeAlias`], indexes them across packages, and derives:
//!
//! - the structural implements relation between aggregates and interfaces
//! - the package dependency graph
//!
//! ```no_run
//! use typerel_core::{load_relations, LoadOptions};
//! use typerel_types::ExportChecker;
//!
//! let options = LoadOptions::new().root("./testdata").recursive(true);
//! let relations = load_relations(&options, &mut ExportChecker::new())?;
//!
//! for aggregate in relations.aggregates().all() {
//!     for interface in aggregate.implemented_interfaces()?.all() {
//!         println!("{} implements {}", aggregate.qualified_name(), interface.qualified_name());
//!     }
//! }
//! # Ok::<(), typerel_core::RelationsError>(())
//! ```

pub mod entity;
pub mod error;
pub mod extract;
pub mod graph;
pub mod implements;
pub mod index;
pub mod options;
pub mod package;
pub mod relations;
pub mod source;
pub mod walk;

pub use entity::{classify, Aggregate, Classified, Embed, EmbedKind, Entity, EntityKey, Field, Interface, Method, NamedType, TypeAlias};
pub use error::{RelationsError, RelationsResult};
pub use extract::extract_package;
pub use graph::PackageGraph;
pub use index::{AggregateMap, EntityIndex, InterfaceMap, NamedTypeMap, PackageMap, TypeAliasMap};
pub use options::LoadOptions;
pub use package::{Import, Package, PackageDetail, PackageName, PackagePath, PackageSummary};
pub use relations::{load_relations, Relations};
pub use source::{AnalysisPackage, DirectoryPackage, PackageSource};

//! Error types for the relation registry.
//!
//! Classification misses are not errors: an object that is not a type name
//! simply yields no entity. The errors here cover failed loads and misuse of
//! the registry lifecycle (adding after finalization, reading the implements
//! relation before it exists).

use std::path::PathBuf;

use thiserror::Error;
use typerel_types::CheckError;

/// Error type for registry operations.
#[derive(Debug, Error)]
pub enum RelationsError {
    /// The type checker failed on a directory.
    #[error("failed to load {}: {source}", .dir.display())]
    Load {
        dir: PathBuf,
        #[source]
        source: CheckError,
    },

    /// Walking a directory tree failed.
    #[error("failed to traverse {}: {source}", .root.display())]
    Traversal {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The package path is already registered.
    #[error("package already registered: {path}")]
    DuplicatePackage { path: String },

    /// A package or directory was added after the implements relation was computed.
    #[error("cannot add {path}: relations are finalized")]
    Finalized { path: String },

    /// `register_relations` was called twice.
    #[error("relations are already finalized")]
    AlreadyFinalized,

    /// The implements relation was read before finalization.
    #[error("implements relation of {aggregate} is not resolved yet")]
    Unresolved { aggregate: String },
}

/// Result type for registry operations.
pub type RelationsResult<T> = Result<T, RelationsError>;

//! The type-checker capability.
//!
//! A [`TypeChecker`] turns one directory into the packages it contains,
//! defining their named types in the caller's [`Universe`] as it goes.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::package::CheckedPackage;
use crate::universe::Universe;

// ============================================================================
// Error Types
// ============================================================================

/// Error produced while checking a directory.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Reading the directory or one of its files failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A symbol export file is not valid.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The compiler reported errors for the package.
    #[error("package {package} has {} compile error(s): {}", .errors.len(), .errors.join("; "))]
    Compile { package: String, errors: Vec<String> },

    /// Two top-level declarations share a name.
    #[error("{name} redeclared in package {package}")]
    Redeclared { package: String, name: String },
}

/// Result type for checker operations.
pub type CheckResult<T> = Result<T, CheckError>;

// ============================================================================
// Capability
// ============================================================================

/// Front end that type-checks the packages of one directory.
///
/// Implementations must define every named type they report (and its
/// methods) in `universe` before returning, so that later queries against
/// the universe see them. A directory holding no packages yields an empty
/// list, not an error.
pub trait TypeChecker {
    fn check_dir(&mut self, dir: &Path, universe: &mut Universe) -> CheckResult<Vec<CheckedPackage>>;
}

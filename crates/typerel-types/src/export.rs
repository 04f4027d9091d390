//! Symbol export files and the checker that reads them.
//!
//! A compiler that has type-checked a package can dump its declarations as a
//! `*.symbols.json` file next to the sources. [`ExportChecker`] reads those
//! files instead of type-checking source text itself.
//!
//! ```json
//! {
//!   "path": "example.com/shapes",
//!   "name": "shapes",
//!   "imports": [{"path": "fmt", "name": "fmt"}],
//!   "decls": [
//!     {
//!       "kind": "type",
//!       "name": "Circle",
//!       "pos": {"file": "circle.go", "line": 5, "column": 6},
//!       "underlying": {"kind": "struct", "fields": []},
//!       "methods": [
//!         {"name": "Area", "pointer_receiver": true,
//!          "signature": {"results": [{"kind": "basic", "name": "float64"}]}}
//!       ]
//!     },
//!     {"kind": "alias", "name": "Radius", "target": {"kind": "basic", "name": "float64"}}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::checker::{CheckError, CheckResult, TypeChecker};
use crate::object::{Object, ObjectKind, Position};
use crate::package::{CheckedPackage, PackageRef};
use crate::types::{Signature, Type, TypeName};
use crate::universe::{MethodDecl, Universe};

/// File name suffix of symbol export files.
pub const EXPORT_SUFFIX: &str = ".symbols.json";

// ============================================================================
// Export Format
// ============================================================================

/// One exported package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageExport {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub imports: Vec<PackageRef>,
    #[serde(default)]
    pub decls: Vec<DeclExport>,
    /// Compile errors reported for the package.
    #[serde(default)]
    pub errors: Vec<String>,
}

/// One declaration.
///
/// `local` declarations were made inside a function body. They are listed
/// among the package's definitions but are not in its scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeclExport {
    Type {
        name: String,
        #[serde(default)]
        pos: Position,
        underlying: Type,
        #[serde(default)]
        methods: Vec<MethodExport>,
        #[serde(default)]
        local: bool,
    },
    Alias {
        name: String,
        #[serde(default)]
        pos: Position,
        target: Type,
        #[serde(default)]
        local: bool,
    },
    Func {
        name: String,
        #[serde(default)]
        pos: Position,
        #[serde(default)]
        signature: Signature,
    },
    Var {
        name: String,
        #[serde(default)]
        pos: Position,
        #[serde(rename = "type")]
        ty: Type,
        #[serde(default)]
        local: bool,
    },
    Const {
        name: String,
        #[serde(default)]
        pos: Position,
        #[serde(rename = "type")]
        ty: Type,
        #[serde(default)]
        local: bool,
    },
}

/// A method declared on an exported type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodExport {
    pub name: String,
    #[serde(default)]
    pub pointer_receiver: bool,
    #[serde(default)]
    pub signature: Signature,
    #[serde(default)]
    pub pos: Position,
}

/// Read and parse one export file.
pub fn read_export(path: &Path) -> CheckResult<PackageExport> {
    let content = fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CheckError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Turn an export into a checked package, defining its types in `universe`.
pub fn check_export(export: PackageExport, universe: &mut Universe) -> CheckResult<CheckedPackage> {
    if !export.errors.is_empty() {
        return Err(CheckError::Compile {
            package: export.path,
            errors: export.errors,
        });
    }

    let mut pkg = CheckedPackage::new(export.path, export.name);
    let owner = pkg.package_ref();
    for import in export.imports {
        pkg.imports.insert(import.path.clone(), import);
    }

    for decl in export.decls {
        let (object, local) = match decl {
            DeclExport::Type {
                name,
                pos,
                underlying,
                methods,
                local,
            } => {
                if local {
                    let kind = ObjectKind::TypeName { alias: false };
                    (Object::new(name, pos, owner.clone(), kind, underlying), true)
                } else {
                    let type_name = TypeName::new(owner.path.clone(), name.clone());
                    universe.define(type_name.clone(), underlying);
                    for method in methods {
                        universe.add_method(
                            &type_name,
                            MethodDecl::new(method.name, method.signature, method.pointer_receiver)
                                .with_pos(method.pos),
                        );
                    }
                    (Object::defined_type(name, pos, owner.clone()), false)
                }
            }
            DeclExport::Alias {
                name,
                pos,
                target,
                local,
            } => (Object::alias(name, pos, owner.clone(), target), local),
            DeclExport::Func {
                name,
                pos,
                signature,
            } => {
                let ty = Type::Signature(signature);
                (Object::new(name, pos, owner.clone(), ObjectKind::Func, ty), false)
            }
            DeclExport::Var {
                name,
                pos,
                ty,
                local,
            } => (Object::new(name, pos, owner.clone(), ObjectKind::Var, ty), local),
            DeclExport::Const {
                name,
                pos,
                ty,
                local,
            } => (Object::new(name, pos, owner.clone(), ObjectKind::Const, ty), local),
        };

        if !local {
            if pkg.scope.lookup(object.name()).is_some() {
                return Err(CheckError::Redeclared {
                    package: pkg.path,
                    name: object.name().to_string(),
                });
            }
            pkg.scope.insert(object.clone());
        }
        pkg.defs.push(object);
    }

    Ok(pkg)
}

// ============================================================================
// Checker
// ============================================================================

/// [`TypeChecker`] reading `*.symbols.json` files.
///
/// Only files directly inside the directory are read, in file-name order.
#[derive(Debug, Default)]
pub struct ExportChecker {
    files_read: usize,
}

impl ExportChecker {
    pub fn new() -> Self {
        ExportChecker::default()
    }

    /// Number of export files read so far.
    pub fn files_read(&self) -> usize {
        self.files_read
    }

    fn export_files(dir: &Path) -> CheckResult<Vec<PathBuf>> {
        let io_err = |source: std::io::Error| CheckError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            let is_export = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(EXPORT_SUFFIX));
            if is_export && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl TypeChecker for ExportChecker {
    fn check_dir(&mut self, dir: &Path, universe: &mut Universe) -> CheckResult<Vec<CheckedPackage>> {
        let files = Self::export_files(dir)?;
        debug!(dir = %dir.display(), files = files.len(), "checking directory");

        let mut packages = Vec::with_capacity(files.len());
        for file in files {
            debug!(file = %file.display(), "reading symbol export");
            let export = read_export(&file)?;
            self.files_read += 1;
            packages.push(check_export(export, universe)?);
        }
        Ok(packages)
    }
}

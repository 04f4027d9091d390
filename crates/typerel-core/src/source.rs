//! Package sources.
//!
//! The package extractor reads packages through [`PackageSource`], so the
//! same extraction runs whether a package came from scanning a directory or
//! from a hosting analysis framework.

use typerel_types::{AnalysisPass, CheckedPackage, Object, PackageRef, Scope};

/// A type-checked package as seen by the extractor.
pub trait PackageSource {
    /// Import path.
    fn path(&self) -> &str;

    /// Declared package name.
    fn name(&self) -> &str;

    /// Directly imported packages.
    fn imports(&self) -> Vec<PackageRef>;

    /// Every definition in the package, local ones included.
    fn defs(&self) -> Vec<&Object>;

    /// The package-level scope.
    fn scope(&self) -> &Scope;
}

/// A package produced by a type checker while scanning a directory.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryPackage<'a> {
    pkg: &'a CheckedPackage,
}

impl<'a> DirectoryPackage<'a> {
    pub fn new(pkg: &'a CheckedPackage) -> Self {
        DirectoryPackage { pkg }
    }
}

impl PackageSource for DirectoryPackage<'_> {
    fn path(&self) -> &str {
        &self.pkg.path
    }

    fn name(&self) -> &str {
        &self.pkg.name
    }

    fn imports(&self) -> Vec<PackageRef> {
        self.pkg.imports.values().cloned().collect()
    }

    fn defs(&self) -> Vec<&Object> {
        self.pkg.defs.iter().collect()
    }

    fn scope(&self) -> &Scope {
        &self.pkg.scope
    }
}

/// The package of an analysis pass.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisPackage<'a> {
    pass: &'a AnalysisPass,
}

impl<'a> AnalysisPackage<'a> {
    pub fn new(pass: &'a AnalysisPass) -> Self {
        AnalysisPackage { pass }
    }
}

impl PackageSource for AnalysisPackage<'_> {
    fn path(&self) -> &str {
        &self.pass.pkg.path
    }

    fn name(&self) -> &str {
        &self.pass.pkg.name
    }

    fn imports(&self) -> Vec<PackageRef> {
        self.pass.pkg.imports.clone()
    }

    fn defs(&self) -> Vec<&Object> {
        // Identifiers without an object (the package clause) are skipped.
        self.pass.info.defs.values().flatten().collect()
    }

    fn scope(&self) -> &Scope {
        &self.pass.pkg.scope
    }
}

//! Load configuration.

use serde::Deserialize;
use std::path::PathBuf;

/// Options for [`load_relations`](crate::load_relations).
///
/// Deserializes from a config file; every field is optional.
///
/// ```
/// use typerel_core::LoadOptions;
///
/// let options = LoadOptions::new()
///     .root("./pkg")
///     .ignore("./pkg/generated")
///     .recursive(true);
/// assert_eq!(options.roots.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Directories to load, in order.
    pub roots: Vec<PathBuf>,
    /// Directories skipped during recursive loading, matched by full path.
    pub ignored: Vec<PathBuf>,
    /// Walk each root recursively instead of loading only the root itself.
    pub recursive: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        LoadOptions::default()
    }

    /// Add a root directory.
    pub fn root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.roots.push(dir.into());
        self
    }

    /// Add a directory to skip.
    pub fn ignore(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ignored.push(dir.into());
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let options: LoadOptions = serde_json::from_str(r#"{"roots": ["a", "b"]}"#).unwrap();
        assert_eq!(options.roots, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert!(options.ignored.is_empty());
        assert!(!options.recursive);
    }
}

//! Directory traversal.
//!
//! Traversal knows nothing about packages: it visits directories depth
//! first in file-name order and asks a predicate which ones to skip.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{RelationsError, RelationsResult};

/// Directory names never descended into.
const SKIPPED_DIR_NAMES: &[&str] = &["vendor"];

/// Visit `root` and every directory below it.
///
/// `skip(path, depth)` is asked for every directory (the root is depth 0).
/// A skipped directory is neither visited nor descended into. The walk stops
/// at the first error from the walker or from `visit`.
pub fn walk_directories<S, V>(root: &Path, skip: S, mut visit: V) -> RelationsResult<()>
where
    S: Fn(&Path, usize) -> bool,
    V: FnMut(&Path) -> RelationsResult<()>,
{
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !entry.file_type().is_dir() || !skip(entry.path(), entry.depth()));

    for entry in walker {
        let entry = entry.map_err(|source| RelationsError::Traversal {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            visit(entry.path())?;
        }
    }
    Ok(())
}

/// Skip rules for recursive loading.
///
/// - hidden (`.name`) and `vendor` directories are skipped, except the
///   walk root itself
/// - directories in the ignore set are skipped, the root included
#[derive(Debug, Clone, Default)]
pub struct SkipRules {
    ignored: HashSet<PathBuf>,
}

impl SkipRules {
    pub fn new(ignored: &[PathBuf]) -> Self {
        SkipRules {
            ignored: ignored.iter().cloned().collect(),
        }
    }

    pub fn should_skip(&self, path: &Path, depth: usize) -> bool {
        if self.ignored.contains(path) {
            return true;
        }
        if depth == 0 {
            return false;
        }
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.') || SKIPPED_DIR_NAMES.contains(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        for dir in ["b", "a/inner", ".git/objects", "vendor/dep", "a/vendor", "gen"] {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
        }
        fs::write(temp.path().join("a/file.txt"), "not a directory").unwrap();
        temp
    }

    fn visited(root: &Path, rules: &SkipRules) -> Vec<String> {
        let mut seen = Vec::new();
        walk_directories(
            root,
            |path, depth| rules.should_skip(path, depth),
            |dir| {
                let rel = dir.strip_prefix(root).unwrap();
                seen.push(rel.to_string_lossy().replace('\\', "/"));
                Ok(())
            },
        )
        .unwrap();
        seen
    }

    #[test]
    fn skips_hidden_and_vendor() {
        let temp = tree();
        let seen = visited(temp.path(), &SkipRules::default());
        assert_eq!(seen, vec!["", "a", "a/inner", "b", "gen"]);
    }

    #[test]
    fn skips_ignored_directories() {
        let temp = tree();
        let rules = SkipRules::new(&[temp.path().join("a")]);
        let seen = visited(temp.path(), &rules);
        assert_eq!(seen, vec!["", "b", "gen"]);
    }

    #[test]
    fn hidden_root_is_walked() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".hidden");
        fs::create_dir_all(root.join("pkg")).unwrap();
        let seen = visited(&root, &SkipRules::default());
        assert_eq!(seen, vec!["", "pkg"]);
    }

    #[test]
    fn ignored_root_is_skipped() {
        let temp = tree();
        let rules = SkipRules::new(&[temp.path().to_path_buf()]);
        assert!(visited(temp.path(), &rules).is_empty());
    }

    #[test]
    fn visit_error_stops_the_walk() {
        let temp = tree();
        let mut count = 0;
        let result = walk_directories(
            temp.path(),
            |_, _| false,
            |_| {
                count += 1;
                Err(RelationsError::AlreadyFinalized)
            },
        );
        assert!(matches!(result, Err(RelationsError::AlreadyFinalized)));
        assert_eq!(count, 1);
    }

    #[test]
    fn missing_root_is_a_traversal_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent");
        let result = walk_directories(&missing, |_, _| false, |_| Ok(()));
        match result {
            Err(RelationsError::Traversal { root, .. }) => assert_eq!(root, missing),
            other => panic!("expected traversal error, got {other:?}"),
        }
    }
}

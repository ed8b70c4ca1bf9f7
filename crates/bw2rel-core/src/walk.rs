//! Build-output directory traversal.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One regular file discovered under the build-output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEntry {
    /// Path relative to the root, `/`-separated regardless of host platform.
    pub relative: String,
    /// Absolute path of the file on disk.
    pub path: PathBuf,
}

/// Walk a build-output directory and yield every regular file under it.
///
/// Produces a lazy, finite sequence in deterministic (lexicographic per
/// directory) order. Symlinks are not followed. Decoupled from upload
/// logic so the publisher can consume one entry at a time.
///
/// # Errors
///
/// Returns an error if the root directory does not exist or cannot be read.
pub fn walk_artifacts(root: &Path) -> Result<Box<dyn Iterator<Item = ArtifactEntry>>> {
    let root = root
        .canonicalize()
        .with_context(|| format!("cannot read build output directory {}", root.display()))?;

    let iter = WalkDir::new(root.clone())
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(move |e| {
            let relative = e
                .path()
                .strip_prefix(&root)
                .ok()?
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            Some(ArtifactEntry {
                relative,
                path: e.into_path(),
            })
        });
    Ok(Box::new(iter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_files_with_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("b.txt"), "y").unwrap();

        let entries: Vec<_> = walk_artifacts(dir.path()).unwrap().collect();
        let relatives: Vec<_> = entries.iter().map(|e| e.relative.as_str()).collect();
        assert_eq!(relatives, vec!["a.txt", "sub/b.txt"]);
        for entry in &entries {
            assert!(entry.path.is_file());
        }
    }

    #[test]
    fn skips_directories_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("z/deep")).unwrap();
        std::fs::write(dir.path().join("z/deep/c.bin"), "c").unwrap();
        std::fs::write(dir.path().join("b.bin"), "b").unwrap();
        std::fs::write(dir.path().join("a.bin"), "a").unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();

        let relatives: Vec<_> = walk_artifacts(dir.path())
            .unwrap()
            .map(|e| e.relative)
            .collect();
        assert_eq!(relatives, vec!["a.bin", "b.bin", "z/deep/c.bin"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = walk_artifacts(&missing).err().unwrap();
        assert!(err.to_string().contains("cannot read build output"));
    }
}

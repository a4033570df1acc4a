/*!
[`FileManifest`]: a per-plugin scoped file writer. Every path a plugin
writes is resolved relative to the manifest's base directory
(`<outputDirectory>/<projectionName>/<artifactName>/`), with parent
directories created on demand and every written path recorded so a
build result can report exactly what was produced.
*/

use smithy_core::error::{ErrorKind, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// A file writer scoped to a single base directory. Every plugin
/// invocation owns exactly one; sharing a manifest across plugins would
/// let one plugin's writes collide with another's path bookkeeping.
#[derive(Debug)]
pub struct FileManifest {
    base_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileManifest {
    /// A manifest rooted at `base_dir`. Does not touch the filesystem
    /// until the first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            written: Vec::new(),
        }
    }

    /// The manifest's base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Every path written so far, relative to nothing in particular —
    /// each is the full path passed to [`FileManifest::write`].
    pub fn written_files(&self) -> &[PathBuf] {
        &self.written
    }

    /// Resolve `relative` against the base directory, rejecting any
    /// path (via `..` components or an absolute path) that would escape
    /// it. Does not require the path to exist.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let relative = relative.as_ref();
        if relative.is_absolute() {
            return Err(ErrorKind::ManifestPathEscape(relative.display().to_string()).into());
        }
        let mut resolved = self.base_dir.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(ErrorKind::ManifestPathEscape(relative.display().to_string()).into());
                }
            }
        }
        Ok(resolved)
    }

    /// Write `contents` to `relative` (resolved against the base
    /// directory), creating parent directories as needed, and record the
    /// resolved path.
    pub fn write(&mut self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = self.resolve(relative)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parent_directories_and_records_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = FileManifest::new(dir.path());
        manifest.write("nested/model.json", b"{}").unwrap();
        assert!(dir.path().join("nested/model.json").exists());
        assert_eq!(manifest.written_files().len(), 1);
    }

    #[test]
    fn resolve_rejects_parent_dir_escape() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = FileManifest::new(dir.path());
        assert!(manifest.resolve("../escape.json").is_err());
    }

    #[test]
    fn resolve_rejects_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = FileManifest::new(dir.path());
        assert!(manifest.resolve("/etc/passwd").is_err());
    }
}

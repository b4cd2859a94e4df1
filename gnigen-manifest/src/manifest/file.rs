use std::path::{Path, PathBuf};

use super::Manifest;
use crate::{Error, Result};

/// Represents a gnigen.toml file with both raw content and parsed manifest.
#[derive(Debug)]
pub struct GnigenToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl GnigenToml {
    /// Open and parse a gnigen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Absolute workspace root, resolved against the manifest's directory.
    pub fn workspace_dir(&self) -> Result<PathBuf> {
        let base = self.path.parent().unwrap_or(Path::new(""));
        let joined = base.join(&self.manifest.workspace);
        std::path::absolute(&joined).map_err(|e| Box::new(Error::Io { path: joined, source: e }))
    }
}

use std::{
    io,
    path::{Path, PathBuf},
};

/// File system access used by the exporter.
///
/// Paths handed to these methods are always absolute.
pub trait FileSystem {
    /// Replace the contents of `path` with `contents`, creating it if needed.
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Read the full contents of `path`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        (**self).write_file(path, contents)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        write_file(path, contents)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    tracing::trace!(path = %path.display(), bytes = contents.len(), "writing file");
    std::fs::write(path, contents)
}

/// Join `base` and `rel`, returning `base` unchanged for an empty `rel`.
pub fn join_workspace_path(base: &Path, rel: &str) -> PathBuf {
    if rel.is_empty() {
        base.to_path_buf()
    } else {
        base.join(rel)
    }
}

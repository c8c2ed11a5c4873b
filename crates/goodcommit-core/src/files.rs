//! File-reading capability for module auxiliary configuration.

use std::io;
use std::path::Path;

/// Reads files on behalf of modules.
///
/// Modules never touch the filesystem directly, so tests can feed them
/// in-memory configs.
pub trait FileSource {
    /// Read the whole file at `path`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`FileSource`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl FileSource for LocalFiles {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

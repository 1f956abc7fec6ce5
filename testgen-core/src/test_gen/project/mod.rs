//! Project file system capability
//!
//! Directory and file find-or-create operations are injected so the same
//! placement logic runs against a real checkout or an in-memory tree.

pub mod disk;
pub mod memory;

pub use disk::DiskProject;
pub use memory::InMemoryProject;

use std::io;
use std::path::{Path, PathBuf};

/// Find/create operations over a project tree
pub trait ProjectFileSystem: Send + Sync {
    fn is_directory(&self, path: &Path) -> bool;

    /// Create `path` and any missing ancestors
    fn create_directory_all(&self, path: &Path) -> io::Result<()>;

    fn find_subdirectory(&self, dir: &Path, name: &str) -> Option<PathBuf>;

    /// Create a single directory directly under `dir`
    fn create_subdirectory(&self, dir: &Path, name: &str) -> io::Result<PathBuf>;

    fn find_file(&self, dir: &Path, name: &str) -> Option<PathBuf>;

    /// Create a new file; fails if it already exists
    fn create_file(&self, dir: &Path, name: &str, contents: &str) -> io::Result<PathBuf>;

    fn read_file(&self, path: &Path) -> io::Result<String>;

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
}

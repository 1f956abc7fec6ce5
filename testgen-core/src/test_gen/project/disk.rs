//! Project tree backed by the real file system

use super::ProjectFileSystem;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct DiskProject;

impl DiskProject {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectFileSystem for DiskProject {
    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_directory_all(&self, path: &Path) -> io::Result<()> {
        debug!("Creating directory {:?}", path);
        fs::create_dir_all(path)
    }

    fn find_subdirectory(&self, dir: &Path, name: &str) -> Option<PathBuf> {
        let path = dir.join(name);
        path.is_dir().then_some(path)
    }

    fn create_subdirectory(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let path = dir.join(name);
        debug!("Creating directory {:?}", path);
        fs::create_dir(&path)?;
        Ok(path)
    }

    fn find_file(&self, dir: &Path, name: &str) -> Option<PathBuf> {
        let path = dir.join(name);
        path.is_file().then_some(path)
    }

    fn create_file(&self, dir: &Path, name: &str, contents: &str) -> io::Result<PathBuf> {
        let path = dir.join(name);
        debug!("Creating file {:?}", path);
        let mut file = fs::OpenOptions::new().write(true).create_new(true).open(&path)?;
        file.write_all(contents.as_bytes())?;
        Ok(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_or_create_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let project = DiskProject::new();
        let root = temp_dir.path().join("src").join("test").join("java");

        project.create_directory_all(&root).unwrap();
        assert!(project.is_directory(&root));

        assert!(project.find_subdirectory(&root, "com").is_none());
        let com = project.create_subdirectory(&root, "com").unwrap();
        assert_eq!(project.find_subdirectory(&root, "com"), Some(com.clone()));

        let file = project.create_file(&com, "FooTest.java", "class FooTest {}\n").unwrap();
        assert_eq!(project.find_file(&com, "FooTest.java"), Some(file.clone()));
        assert_eq!(project.read_file(&file).unwrap(), "class FooTest {}\n");

        let err = project.create_file(&com, "FooTest.java", "").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}

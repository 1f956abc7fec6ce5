//! In-memory project tree

use super::ProjectFileSystem;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tree {
    directories: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    read_only: Vec<PathBuf>,
}

impl Tree {
    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.read_only.iter().any(|prefix| path.starts_with(prefix)) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, format!("{:?} is read-only", path)));
        }
        Ok(())
    }

    fn require_directory(&self, dir: &Path) -> io::Result<()> {
        if self.directories.contains(dir) {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, format!("directory {:?} does not exist", dir)))
        }
    }
}

/// A project tree held in memory, for tests and previews
#[derive(Debug, Default)]
pub struct InMemoryProject {
    tree: Mutex<Tree>,
}

impl InMemoryProject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing file, creating its parent directories
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let path = path.into();
        {
            let mut tree = self.lock();
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut tree.directories, parent);
            }
            tree.files.insert(path, contents.into());
        }
        self
    }

    pub fn with_directory(self, path: impl AsRef<Path>) -> Self {
        insert_ancestors(&mut self.lock().directories, path.as_ref());
        self
    }

    /// Refuse every creation or write at or below `path`
    pub fn with_read_only(self, path: impl Into<PathBuf>) -> Self {
        self.lock().read_only.push(path.into());
        self
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    pub fn directories(&self) -> Vec<PathBuf> {
        self.lock().directories.iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn insert_ancestors(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        directories.insert(ancestor.to_path_buf());
    }
}

impl ProjectFileSystem for InMemoryProject {
    fn is_directory(&self, path: &Path) -> bool {
        self.lock().directories.contains(path)
    }

    fn create_directory_all(&self, path: &Path) -> io::Result<()> {
        let mut tree = self.lock();
        if tree.directories.contains(path) {
            return Ok(());
        }
        if tree.files.contains_key(path) {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, format!("{:?} is a file", path)));
        }
        tree.check_writable(path)?;
        insert_ancestors(&mut tree.directories, path);
        Ok(())
    }

    fn find_subdirectory(&self, dir: &Path, name: &str) -> Option<PathBuf> {
        let path = dir.join(name);
        self.lock().directories.contains(&path).then_some(path)
    }

    fn create_subdirectory(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let mut tree = self.lock();
        tree.require_directory(dir)?;
        let path = dir.join(name);
        if tree.directories.contains(&path) || tree.files.contains_key(&path) {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, format!("{:?} already exists", path)));
        }
        tree.check_writable(&path)?;
        tree.directories.insert(path.clone());
        Ok(path)
    }

    fn find_file(&self, dir: &Path, name: &str) -> Option<PathBuf> {
        let path = dir.join(name);
        self.lock().files.contains_key(&path).then_some(path)
    }

    fn create_file(&self, dir: &Path, name: &str, contents: &str) -> io::Result<PathBuf> {
        let mut tree = self.lock();
        tree.require_directory(dir)?;
        let path = dir.join(name);
        if tree.directories.contains(&path) || tree.files.contains_key(&path) {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, format!("{:?} already exists", path)));
        }
        tree.check_writable(&path)?;
        tree.files.insert(path.clone(), contents.to_string());
        Ok(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("file {:?} does not exist", path)))
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut tree = self.lock();
        if let Some(parent) = path.parent() {
            tree.require_directory(parent)?;
        }
        tree.check_writable(path)?;
        tree.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_directory_all_adds_ancestors() {
        let project = InMemoryProject::new();
        project.create_directory_all(Path::new("/p/src/test/java")).unwrap();
        assert!(project.is_directory(Path::new("/p/src/test")));
        assert!(project.is_directory(Path::new("/p")));
        assert!(project.is_directory(Path::new("/p/src/test/java")));
    }

    #[test]
    fn test_subdirectory_find_or_create() {
        let project = InMemoryProject::new().with_directory("/root");
        let root = Path::new("/root");
        assert!(project.find_subdirectory(root, "com").is_none());

        let created = project.create_subdirectory(root, "com").unwrap();
        assert_eq!(project.find_subdirectory(root, "com"), Some(created));

        let err = project.create_subdirectory(root, "com").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_files() {
        let project = InMemoryProject::new().with_file("/a/Foo.java", "class Foo {}");
        let dir = Path::new("/a");
        assert!(project.find_file(dir, "Foo.java").is_some());
        assert!(project.create_file(dir, "Foo.java", "").is_err());

        let created = project.create_file(dir, "Bar.java", "class Bar {}").unwrap();
        assert_eq!(project.read_file(&created).unwrap(), "class Bar {}");

        project.write_file(&created, "class Bar { int x; }").unwrap();
        assert_eq!(project.contents("/a/Bar.java").as_deref(), Some("class Bar { int x; }"));

        assert!(project.create_file(Path::new("/missing"), "X.java", "").is_err());
    }

    #[test]
    fn test_read_only_subtree() {
        let project = InMemoryProject::new().with_directory("/p/src").with_read_only("/p/src/test");
        let err = project.create_directory_all(Path::new("/p/src/test/java")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(!project.is_directory(Path::new("/p/src/test")));
    }
}

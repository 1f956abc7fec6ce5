//! Mirrors a source location into the test tree and places the test class there

use super::document::JavaSourceFile;
use super::project::ProjectFileSystem;
use super::{ClassHandle, Result, SourceLocation, TestGenError, TestLocation};
use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_SOURCE_SEGMENT: &str = "main";
pub const DEFAULT_TEST_SEGMENT: &str = "test";

pub struct TestLocationResolver {
    project: Arc<dyn ProjectFileSystem>,
    source_segment: String,
    test_segment: String,
}

impl TestLocationResolver {
    pub fn new(project: Arc<dyn ProjectFileSystem>) -> Self {
        Self {
            project,
            source_segment: DEFAULT_SOURCE_SEGMENT.to_string(),
            test_segment: DEFAULT_TEST_SEGMENT.to_string(),
        }
    }

    pub fn with_segments(mut self, source: impl Into<String>, test: impl Into<String>) -> Self {
        self.source_segment = source.into();
        self.test_segment = test.into();
        self
    }

    /// Replace the first `main` path segment of `source_root` with `test`.
    /// Touches nothing on disk.
    pub fn map_test_root(&self, source_root: &Path) -> Result<PathBuf> {
        let mut mapped = PathBuf::new();
        let mut replaced = false;

        for component in source_root.components() {
            match component {
                Component::Normal(segment) if !replaced && segment == OsStr::new(&self.source_segment) => {
                    mapped.push(&self.test_segment);
                    replaced = true;
                }
                other => mapped.push(other.as_os_str()),
            }
        }

        if !replaced {
            return Err(TestGenError::UnmappableSourceRoot {
                root: source_root.to_path_buf(),
                segment: self.source_segment.clone(),
            });
        }
        Ok(mapped)
    }

    /// Find or create the directory mirroring `source`'s package in the test tree
    pub fn resolve(&self, source: &SourceLocation, type_name: &str) -> Result<TestLocation> {
        let test_root = self.map_test_root(&source.source_root)?;
        debug!("Test root for {:?} is {:?}", source.source_file, test_root);

        if !self.project.is_directory(&test_root) {
            info!("Creating test root {:?}", test_root);
            self.project
                .create_directory_all(&test_root)
                .map_err(|e| directory_failure(&test_root, e))?;
        }

        let package_name = source.qualified_type_name.as_deref().and_then(package_prefix);

        let mut directory = test_root;
        if let Some(package) = &package_name {
            for segment in package.split('.') {
                directory = match self.project.find_subdirectory(&directory, segment) {
                    Some(existing) => existing,
                    None => {
                        debug!("Creating package directory {:?} under {:?}", segment, directory);
                        self.project
                            .create_subdirectory(&directory, segment)
                            .map_err(|e| directory_failure(&directory.join(segment), e))?
                    }
                };
            }
        }

        Ok(TestLocation { directory, test_class_name: format!("{}Test", type_name), package_name })
    }

    /// Reuse the test class file when it declares the class, otherwise create it
    pub fn find_or_create_test_class(&self, location: &TestLocation) -> Result<ClassHandle> {
        let file_name = location.file_name();
        let class_name = location.test_class_name.clone();

        if let Some(file) = self.project.find_file(&location.directory, &file_name) {
            let text = self.project.read_file(&file).map_err(|e| access_failure(&file, e))?;
            if JavaSourceFile::parse(&text).declares_type(&class_name) {
                debug!("Reusing test class {} in {:?}", class_name, file);
                return Ok(ClassHandle { file, class_name });
            }
            return Err(TestGenError::FileCreationFailure {
                source: io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("file exists but does not declare {}", class_name),
                ),
                path: file,
            });
        }

        let skeleton = JavaSourceFile::new_class(location.package_name.as_deref(), &class_name).render();
        let file = self
            .project
            .create_file(&location.directory, &file_name, &skeleton)
            .map_err(|e| TestGenError::FileCreationFailure { path: location.directory.join(&file_name), source: e })?;
        info!("Created test class {} in {:?}", class_name, file);
        Ok(ClassHandle { file, class_name })
    }
}

/// `com.acme.Calculator` -> `com.acme`; `None` for types in the default package
fn package_prefix(qualified_name: &str) -> Option<String> {
    qualified_name.rsplit_once('.').map(|(package, _)| package.to_string())
}

fn directory_failure(path: &Path, source: io::Error) -> TestGenError {
    TestGenError::DirectoryCreationFailure { path: path.to_path_buf(), source }
}

pub(crate) fn access_failure(path: &Path, source: io::Error) -> TestGenError {
    TestGenError::FileAccessFailure { path: path.to_path_buf(), source }
}

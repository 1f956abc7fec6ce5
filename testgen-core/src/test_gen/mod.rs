//! Parameterized test skeleton generation for Java source methods
//!
//! Given a method signature this module derives a parameterized test method,
//! an optional data-provider method, the mirrored test file and class that
//! should hold them, and the imports the generated code needs.

pub mod classifier;
pub mod document;
pub mod frameworks;
pub mod generator;
pub mod imports;
pub mod location;
pub mod orchestrator;
pub mod project;
pub mod strategy;

pub use classifier::{ParameterClass, ParameterClassifier};
pub use document::JavaSourceFile;
pub use frameworks::{FrameworkRegistry, TestFrameworkAdapter};
pub use generator::TestArtifactBuilder;
pub use imports::{ImportReconciler, ReconcileReport, SyntacticTypeResolver, TypeResolver};
pub use location::TestLocationResolver;
pub use orchestrator::{FilePresenter, GenerationOrchestrator, GenerationOutcome, LoggingPresenter};
pub use project::{DiskProject, InMemoryProject, ProjectFileSystem};
pub use strategy::{DataSourceStrategy, StrategyPolicy, StrategySelector};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestGenError {
    #[error("Source root {root:?} has no '{segment}' segment to mirror into a test root")]
    UnmappableSourceRoot { root: PathBuf, segment: String },

    #[error("Cannot generate a test for '{method}': {reason}")]
    UnsupportedSignature { method: String, reason: String },

    #[error("Failed to create directory {path:?}: {source}")]
    DirectoryCreationFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create file {path:?}: {source}")]
    FileCreationFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to access file {path:?}: {source}")]
    FileAccessFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Test class '{class_name}' not found in {path:?}")]
    MissingTestClass { path: PathBuf, class_name: String },

    #[error("Unknown framework '{name}', expected one of: {available}")]
    UnknownFramework { name: String, available: String },
}

pub type Result<T> = std::result::Result<T, TestGenError>;

/// A type as written in source, e.g. `int`, `String`, `Customer`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub presentable_name: String,
}

impl TypeRef {
    pub fn new(presentable_name: impl Into<String>) -> Self {
        Self { presentable_name: presentable_name.into() }
    }

    /// `void`, or no return type at all (constructors)
    pub fn is_void(&self) -> bool {
        let name = self.presentable_name.trim();
        name.is_empty() || name == "void"
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.presentable_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self { name: name.into(), type_ref: TypeRef::new(type_ref) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl Visibility {
    /// Derive visibility from declaration modifiers; no modifier means package-private
    pub fn from_modifiers<S: AsRef<str>>(modifiers: &[S]) -> Self {
        for modifier in modifiers {
            match modifier.as_ref() {
                "public" => return Self::Public,
                "protected" => return Self::Protected,
                "private" => return Self::Private,
                _ => {}
            }
        }
        Self::Package
    }
}

/// Snapshot of a source method taken at generation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub containing_type_name: String,
    pub name: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: TypeRef,
    pub visibility: Visibility,
}

impl MethodSignature {
    pub fn new(
        containing_type_name: impl Into<String>,
        name: impl Into<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            containing_type_name: containing_type_name.into(),
            name: name.into(),
            parameters: Vec::new(),
            return_type: TypeRef::new(return_type),
            visibility: Visibility::default(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, type_ref));
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// `Type.method`, for messages
    pub fn display_name(&self) -> String {
        format!("{}.{}", self.containing_type_name, self.name)
    }
}

/// Where the source method lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub source_file: PathBuf,
    pub source_root: PathBuf,
    pub qualified_type_name: Option<String>,
}

impl SourceLocation {
    pub fn new(source_file: impl Into<PathBuf>, source_root: impl Into<PathBuf>) -> Self {
        Self { source_file: source_file.into(), source_root: source_root.into(), qualified_type_name: None }
    }

    pub fn with_qualified_type_name(mut self, name: impl Into<String>) -> Self {
        self.qualified_type_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestLocation {
    pub directory: PathBuf,
    pub test_class_name: String,
    pub package_name: Option<String>,
}

impl TestLocation {
    pub fn file_name(&self) -> String {
        format!("{}.java", self.test_class_name)
    }
}

/// A test class inside a specific file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassHandle {
    pub file: PathBuf,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportSpec {
    OnDemand { path: String },
    Static { qualified_name: String, member_name: String },
}

impl ImportSpec {
    pub fn on_demand(path: impl Into<String>) -> Self {
        Self::OnDemand { path: path.into() }
    }

    pub fn static_member(qualified_name: impl Into<String>, member_name: impl Into<String>) -> Self {
        Self::Static { qualified_name: qualified_name.into(), member_name: member_name.into() }
    }

    /// Text whose presence in an import list means the import is already there
    pub fn needle(&self) -> String {
        match self {
            Self::OnDemand { path } => path.clone(),
            Self::Static { qualified_name, member_name } => format!("{}.{}", qualified_name, member_name),
        }
    }

    /// The import statement as it appears in source
    pub fn statement(&self) -> String {
        match self {
            Self::OnDemand { path } => format!("import {}.*;", path),
            Self::Static { qualified_name, member_name } => {
                format!("import static {}.{};", qualified_name, member_name)
            }
        }
    }
}

/// Text produced for one source method, not yet applied anywhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub test_method_name: String,
    pub test_method_text: String,
    pub provider_method_text: Option<String>,
    pub required_imports: BTreeSet<ImportSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_detection() {
        assert!(TypeRef::new("void").is_void());
        assert!(TypeRef::new("").is_void());
        assert!(!TypeRef::new("Void").is_void());
        assert!(!TypeRef::new("int").is_void());
    }

    #[test]
    fn test_visibility_from_modifiers() {
        assert_eq!(Visibility::from_modifiers(&["public", "static"]), Visibility::Public);
        assert_eq!(Visibility::from_modifiers(&["static", "private"]), Visibility::Private);
        assert_eq!(Visibility::from_modifiers::<&str>(&[]), Visibility::Package);
    }

    #[test]
    fn test_import_spec_text() {
        let on_demand = ImportSpec::on_demand("java.util.stream");
        assert_eq!(on_demand.statement(), "import java.util.stream.*;");
        assert_eq!(on_demand.needle(), "java.util.stream");

        let stat = ImportSpec::static_member("org.assertj.core.api.Assertions", "assertThat");
        assert_eq!(stat.statement(), "import static org.assertj.core.api.Assertions.assertThat;");
        assert_eq!(stat.needle(), "org.assertj.core.api.Assertions.assertThat");
    }

    #[test]
    fn test_import_spec_structural_identity() {
        let mut imports = BTreeSet::new();
        imports.insert(ImportSpec::on_demand("java.util.stream"));
        imports.insert(ImportSpec::on_demand(String::from("java.util.stream")));
        imports.insert(ImportSpec::static_member("a.B", "c"));
        imports.insert(ImportSpec::static_member("a.B", "c"));
        assert_eq!(imports.len(), 2);
    }
}

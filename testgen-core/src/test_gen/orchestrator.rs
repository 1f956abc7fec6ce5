//! Runs one generation request end to end

use super::document::JavaSourceFile;
use super::frameworks::FrameworkRegistry;
use super::generator::TestArtifactBuilder;
use super::imports::{ImportReconciler, ReconcileReport};
use super::location::{TestLocationResolver, access_failure};
use super::project::ProjectFileSystem;
use super::strategy::{DataSourceStrategy, StrategySelector};
use super::{ClassHandle, GeneratedArtifact, MethodSignature, Result, SourceLocation, TestGenError, TestLocation};
use crate::Config;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Shows the generated file to the user
pub trait FilePresenter: Send + Sync {
    fn present(&self, file: &Path);
}

/// Presenter that only logs the destination
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPresenter;

impl FilePresenter for LoggingPresenter {
    fn present(&self, file: &Path) {
        info!("Generated test written to {:?}", file);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub strategy: DataSourceStrategy,
    pub location: TestLocation,
    pub test_class: ClassHandle,
    pub artifact: GeneratedArtifact,
    pub imports: ReconcileReport,
}

pub struct GenerationOrchestrator {
    project: Arc<dyn ProjectFileSystem>,
    presenter: Arc<dyn FilePresenter>,
    selector: StrategySelector,
    builder: TestArtifactBuilder,
    resolver: TestLocationResolver,
    reconciler: ImportReconciler,
}

impl GenerationOrchestrator {
    pub fn new(project: Arc<dyn ProjectFileSystem>, presenter: Arc<dyn FilePresenter>) -> Self {
        Self {
            resolver: TestLocationResolver::new(project.clone()),
            project,
            presenter,
            selector: StrategySelector::default(),
            builder: TestArtifactBuilder::default(),
            reconciler: ImportReconciler::default(),
        }
    }

    /// Build an orchestrator from configuration; fails on an unknown framework name
    pub fn from_config(
        config: &Config,
        project: Arc<dyn ProjectFileSystem>,
        presenter: Arc<dyn FilePresenter>,
    ) -> Result<Self> {
        let registry = FrameworkRegistry::new();
        let available = registry.list_frameworks().join(", ");
        let adapter = registry
            .take_adapter(&config.framework)
            .ok_or_else(|| TestGenError::UnknownFramework { name: config.framework.clone(), available })?;
        Ok(Self {
            resolver: TestLocationResolver::new(project.clone())
                .with_segments(&config.source_segment, &config.test_segment),
            project,
            presenter,
            selector: StrategySelector::new(config.strategy),
            builder: TestArtifactBuilder::new(adapter),
            reconciler: ImportReconciler::default(),
        })
    }

    pub fn with_reconciler(mut self, reconciler: ImportReconciler) -> Self {
        self.reconciler = reconciler;
        self
    }

    /// Build the artifact for `method` without touching the project
    pub fn preview(&self, method: &MethodSignature) -> Result<(DataSourceStrategy, GeneratedArtifact)> {
        let strategy = self.selector.select(&method.parameters);
        let artifact = self.builder.build(method, strategy)?;
        Ok((strategy, artifact))
    }

    /// Generate the test for `method` into the mirrored test class.
    ///
    /// Signature and source-root problems are reported before anything is
    /// created. Directories created before a later failure are left in place.
    pub fn generate(&self, method: &MethodSignature, source: &SourceLocation) -> Result<GenerationOutcome> {
        info!("Generating {} test for {}", self.builder.framework_name(), method.display_name());

        let (strategy, artifact) = self.preview(method)?;
        let location = self.resolver.resolve(source, &method.containing_type_name)?;
        let test_class = self.resolver.find_or_create_test_class(&location)?;

        let text = self.project.read_file(&test_class.file).map_err(|e| access_failure(&test_class.file, e))?;
        let mut file = JavaSourceFile::parse(&text);

        if let Some(provider) = &artifact.provider_method_text {
            self.insert(&mut file, &test_class, provider)?;
        }
        self.insert(&mut file, &test_class, &artifact.test_method_text)?;

        let imports = self.reconciler.reconcile(&mut file, &artifact.required_imports);
        if !imports.unresolved.is_empty() {
            warn!("{} import(s) could not be resolved and were left out", imports.unresolved.len());
        }

        self.project
            .write_file(&test_class.file, &file.render())
            .map_err(|e| access_failure(&test_class.file, e))?;
        info!("Added {} to {}", artifact.test_method_name, test_class.class_name);

        self.presenter.present(&test_class.file);

        Ok(GenerationOutcome { strategy, location, test_class, artifact, imports })
    }

    fn insert(&self, file: &mut JavaSourceFile, test_class: &ClassHandle, member: &str) -> Result<()> {
        if file.insert_member(&test_class.class_name, member) {
            Ok(())
        } else {
            Err(TestGenError::MissingTestClass {
                path: test_class.file.clone(),
                class_name: test_class.class_name.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_gen::project::InMemoryProject;
    use crate::test_gen::{ImportSpec, StrategyPolicy};
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPresenter {
        presented: Mutex<Vec<PathBuf>>,
    }

    impl FilePresenter for RecordingPresenter {
        fn present(&self, file: &Path) {
            self.presented.lock().unwrap().push(file.to_path_buf());
        }
    }

    struct Fixture {
        project: Arc<InMemoryProject>,
        presenter: Arc<RecordingPresenter>,
        orchestrator: GenerationOrchestrator,
    }

    fn fixture(project: InMemoryProject) -> Fixture {
        let project = Arc::new(project);
        let presenter = Arc::new(RecordingPresenter::default());
        let orchestrator = GenerationOrchestrator::new(project.clone(), presenter.clone());
        Fixture { project, presenter, orchestrator }
    }

    fn source() -> SourceLocation {
        SourceLocation::new("/project/src/main/java/com/acme/Repo.java", "/project/src/main/java")
            .with_qualified_type_name("com.acme.Repo")
    }

    fn repo_find() -> MethodSignature {
        MethodSignature::new("Repo", "find", "Customer")
            .with_parameter("id", "String")
            .with_parameter("db", "Database")
    }

    const TEST_FILE: &str = "/project/src/test/java/com/acme/RepoTest.java";

    #[test]
    fn test_generate_provider_test_into_new_class() {
        let fx = fixture(InMemoryProject::new());
        let outcome = fx.orchestrator.generate(&repo_find(), &source()).unwrap();

        assert_eq!(outcome.strategy, DataSourceStrategy::GeneratedProvider);
        assert_eq!(outcome.test_class.file, PathBuf::from(TEST_FILE));

        let text = fx.project.contents(TEST_FILE).unwrap();
        assert!(text.starts_with("package com.acme;\n\nimport java.util.stream.*;\n"));
        assert!(text.contains("import static org.junit.jupiter.params.provider.Arguments.arguments;"));

        let provider = text.find("public static Stream<Arguments> testFind()").unwrap();
        let test = text.find("void testFind(String id, Database db, Customer expected)").unwrap();
        assert!(provider < test, "provider must precede the test method");

        assert_eq!(*fx.presenter.presented.lock().unwrap(), vec![PathBuf::from(TEST_FILE)]);
    }

    #[test]
    fn test_generate_inline_test_has_no_provider() {
        let fx = fixture(InMemoryProject::new());
        let method = MethodSignature::new("Calculator", "add", "int")
            .with_parameter("a", "int")
            .with_parameter("b", "int");
        let source = SourceLocation::new("/p/src/main/java/Calculator.java", "/p/src/main/java");

        let outcome = fx.orchestrator.generate(&method, &source).unwrap();
        assert_eq!(outcome.strategy, DataSourceStrategy::InlineLiteral);

        let text = fx.project.contents("/p/src/test/java/CalculatorTest.java").unwrap();
        assert!(text.contains("@CsvSource({})"));
        assert!(!text.contains("Stream<Arguments>"));
        assert!(!text.contains("Arguments.arguments"));
    }

    #[test]
    fn test_void_method_fails_before_any_mutation() {
        let fx = fixture(InMemoryProject::new());
        let method = MethodSignature::new("Repo", "save", "void").with_parameter("c", "Customer");

        let err = fx.orchestrator.generate(&method, &source()).unwrap_err();
        assert!(matches!(err, TestGenError::UnsupportedSignature { .. }));
        assert!(fx.project.directories().is_empty());
        assert!(fx.project.files().is_empty());
        assert!(fx.presenter.presented.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unmappable_root_fails_before_any_mutation() {
        let fx = fixture(InMemoryProject::new());
        let source = SourceLocation::new("/project/lib/Repo.java", "/project/lib");

        let err = fx.orchestrator.generate(&repo_find(), &source).unwrap_err();
        assert!(matches!(err, TestGenError::UnmappableSourceRoot { .. }));
        assert!(fx.project.directories().is_empty());
    }

    #[test]
    fn test_methods_of_one_type_share_a_class() {
        let fx = fixture(InMemoryProject::new());
        let count = MethodSignature::new("Repo", "count", "long");

        fx.orchestrator.generate(&repo_find(), &source()).unwrap();
        let second = fx.orchestrator.generate(&count, &source()).unwrap();

        assert_eq!(fx.project.files(), vec![PathBuf::from(TEST_FILE)]);
        assert!(second.imports.added.is_empty());

        let text = fx.project.contents(TEST_FILE).unwrap();
        assert!(text.contains("void testFind("));
        assert!(text.contains("void testCount(long expected)"));
        assert_eq!(text.matches("import java.util.stream.*;").count(), 1);
    }

    #[test]
    fn test_repeated_generation_appends_duplicates() {
        let fx = fixture(InMemoryProject::new());
        fx.orchestrator.generate(&repo_find(), &source()).unwrap();
        fx.orchestrator.generate(&repo_find(), &source()).unwrap();

        let text = fx.project.contents(TEST_FILE).unwrap();
        assert_eq!(text.matches("void testFind(").count(), 2);
        assert_eq!(text.matches("Stream<Arguments> testFind()").count(), 2);
    }

    #[test]
    fn test_existing_test_class_keeps_its_members() {
        let existing = "package com.acme;\n\nimport java.util.List;\n\nclass RepoTest {\n    @Test\n    void smoke() {\n    }\n}\n";
        let fx = fixture(InMemoryProject::new().with_file(TEST_FILE, existing));

        fx.orchestrator.generate(&repo_find(), &source()).unwrap();
        let text = fx.project.contents(TEST_FILE).unwrap();
        assert!(text.contains("import java.util.List;"));
        assert!(text.contains("    void smoke() {\n    }\n\n    public static Stream<Arguments> testFind() {"));
        assert!(text.ends_with("        assertThat(result).isEqualTo(expected);\n    }\n}\n"));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            framework: "junit5".to_string(),
            strategy: StrategyPolicy::AlwaysProvider,
            ..Config::default()
        };
        let project: Arc<dyn ProjectFileSystem> = Arc::new(InMemoryProject::new());
        let Ok(orchestrator) = GenerationOrchestrator::from_config(&config, project, Arc::new(LoggingPresenter)) else {
            panic!("junit5 should be a registered framework");
        };

        let method = MethodSignature::new("Calculator", "add", "int").with_parameter("a", "int");
        let (strategy, artifact) = orchestrator.preview(&method).unwrap();
        assert_eq!(strategy, DataSourceStrategy::GeneratedProvider);
        assert!(
            artifact
                .required_imports
                .contains(&ImportSpec::static_member("org.junit.jupiter.api.Assertions", "assertEquals"))
        );

        let unknown = Config { framework: "testng".to_string(), ..Config::default() };
        let project: Arc<dyn ProjectFileSystem> = Arc::new(InMemoryProject::new());
        match GenerationOrchestrator::from_config(&unknown, project, Arc::new(LoggingPresenter)) {
            Err(TestGenError::UnknownFramework { name, available }) => {
                assert_eq!(name, "testng");
                assert!(available.contains("junit5-assertj"));
            }
            _ => panic!("expected an unknown framework error"),
        }
    }
}

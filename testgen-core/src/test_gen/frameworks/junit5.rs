//! JUnit 5 parameterized test adapter

use super::TestFrameworkAdapter;
use crate::test_gen::{DataSourceStrategy, ImportSpec};
use std::collections::BTreeSet;

const PARAMS_PACKAGE: &str = "org.junit.jupiter.params";
const PROVIDER_PACKAGE: &str = "org.junit.jupiter.params.provider";
const STREAM_PACKAGE: &str = "java.util.stream";
const ARGUMENTS_TYPE: &str = "org.junit.jupiter.params.provider.Arguments";

/// Which library supplies the equality assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionLibrary {
    /// `assertThat(actual).isEqualTo(expected)`
    AssertJ,
    /// `assertEquals(expected, actual)`
    Jupiter,
}

/// Adapter for generating JUnit 5 `@ParameterizedTest` code
pub struct JUnit5Adapter {
    assertions: AssertionLibrary,
}

impl JUnit5Adapter {
    pub fn new(assertions: AssertionLibrary) -> Self {
        Self { assertions }
    }

    fn assertion_import(&self) -> ImportSpec {
        match self.assertions {
            AssertionLibrary::AssertJ => {
                ImportSpec::static_member("org.assertj.core.api.Assertions", "assertThat")
            }
            AssertionLibrary::Jupiter => {
                ImportSpec::static_member("org.junit.jupiter.api.Assertions", "assertEquals")
            }
        }
    }
}

impl Default for JUnit5Adapter {
    fn default() -> Self {
        Self::new(AssertionLibrary::AssertJ)
    }
}

impl TestFrameworkAdapter for JUnit5Adapter {
    fn framework_name(&self) -> &str {
        match self.assertions {
            AssertionLibrary::AssertJ => "junit5-assertj",
            AssertionLibrary::Jupiter => "junit5",
        }
    }

    fn test_annotations(&self, strategy: DataSourceStrategy) -> Vec<String> {
        let source = match strategy {
            DataSourceStrategy::InlineLiteral => "@CsvSource({})",
            // binds to the provider method with the same name as the test
            DataSourceStrategy::GeneratedProvider => "@MethodSource",
        };
        vec!["@ParameterizedTest".to_string(), source.to_string()]
    }

    fn provider_method(&self, name: &str) -> String {
        let mut code = String::new();
        code.push_str(&format!("public static Stream<Arguments> {}() {{\n", name));
        code.push_str("    return Stream.of(\n");
        code.push_str("            arguments()\n");
        code.push_str("    );\n");
        code.push_str("}\n");
        code
    }

    fn assertion(&self, actual: &str, expected: &str) -> String {
        match self.assertions {
            AssertionLibrary::AssertJ => format!("assertThat({}).isEqualTo({});", actual, expected),
            AssertionLibrary::Jupiter => format!("assertEquals({}, {});", expected, actual),
        }
    }

    fn required_imports(&self, strategy: DataSourceStrategy) -> BTreeSet<ImportSpec> {
        let mut imports = BTreeSet::from([
            ImportSpec::on_demand(PARAMS_PACKAGE),
            ImportSpec::on_demand(PROVIDER_PACKAGE),
            ImportSpec::on_demand(STREAM_PACKAGE),
            self.assertion_import(),
        ]);
        if strategy == DataSourceStrategy::GeneratedProvider {
            imports.insert(ImportSpec::static_member(ARGUMENTS_TYPE, "arguments"));
        }
        imports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_names() {
        assert_eq!(JUnit5Adapter::new(AssertionLibrary::AssertJ).framework_name(), "junit5-assertj");
        assert_eq!(JUnit5Adapter::new(AssertionLibrary::Jupiter).framework_name(), "junit5");
    }

    #[test]
    fn test_assertion_generation() {
        let assertj = JUnit5Adapter::new(AssertionLibrary::AssertJ);
        assert_eq!(assertj.assertion("result", "expected"), "assertThat(result).isEqualTo(expected);");

        let jupiter = JUnit5Adapter::new(AssertionLibrary::Jupiter);
        assert_eq!(jupiter.assertion("result", "expected"), "assertEquals(expected, result);");
    }

    #[test]
    fn test_annotations_follow_strategy() {
        let adapter = JUnit5Adapter::default();
        assert_eq!(
            adapter.test_annotations(DataSourceStrategy::InlineLiteral),
            vec!["@ParameterizedTest", "@CsvSource({})"]
        );
        assert_eq!(
            adapter.test_annotations(DataSourceStrategy::GeneratedProvider),
            vec!["@ParameterizedTest", "@MethodSource"]
        );
    }

    #[test]
    fn test_provider_method_shape() {
        let code = JUnit5Adapter::default().provider_method("testFind");
        assert!(code.starts_with("public static Stream<Arguments> testFind() {\n"));
        assert_eq!(code.matches("arguments()").count(), 1);
        assert!(code.ends_with("}\n"));
    }

    #[test]
    fn test_argument_factory_import_only_for_provider() {
        let adapter = JUnit5Adapter::default();
        let factory = ImportSpec::static_member(ARGUMENTS_TYPE, "arguments");

        let inline = adapter.required_imports(DataSourceStrategy::InlineLiteral);
        assert_eq!(inline.len(), 4);
        assert!(!inline.contains(&factory));

        let provider = adapter.required_imports(DataSourceStrategy::GeneratedProvider);
        assert_eq!(provider.len(), 5);
        assert!(provider.contains(&factory));
    }
}

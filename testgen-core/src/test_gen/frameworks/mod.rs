//! Test framework adapters for generating framework-specific test code

pub mod junit5;

use super::{DataSourceStrategy, ImportSpec};
use std::collections::BTreeSet;

/// Trait for test framework adapters
pub trait TestFrameworkAdapter: Send + Sync {
    /// Get the framework name
    fn framework_name(&self) -> &str;

    /// Annotations placed on the test method, outermost first
    fn test_annotations(&self, strategy: DataSourceStrategy) -> Vec<String>;

    /// Provider method returning a single placeholder argument tuple
    fn provider_method(&self, name: &str) -> String;

    /// Statement asserting that `actual` equals `expected`
    fn assertion(&self, actual: &str, expected: &str) -> String;

    /// Imports the generated code relies on
    fn required_imports(&self, strategy: DataSourceStrategy) -> BTreeSet<ImportSpec>;
}

/// Registry of available framework adapters
pub struct FrameworkRegistry {
    adapters: Vec<Box<dyn TestFrameworkAdapter>>,
}

impl FrameworkRegistry {
    pub fn new() -> Self {
        Self {
            adapters: vec![
                Box::new(junit5::JUnit5Adapter::new(junit5::AssertionLibrary::AssertJ)),
                Box::new(junit5::JUnit5Adapter::new(junit5::AssertionLibrary::Jupiter)),
            ],
        }
    }

    /// Get adapter by framework name
    pub fn get_adapter(&self, name: &str) -> Option<&dyn TestFrameworkAdapter> {
        self.adapters
            .iter()
            .find(|a| a.framework_name().eq_ignore_ascii_case(name))
            .map(|a| a.as_ref())
    }

    /// Take ownership of the adapter registered under `name`
    pub fn take_adapter(mut self, name: &str) -> Option<Box<dyn TestFrameworkAdapter>> {
        let index = self.adapters.iter().position(|a| a.framework_name().eq_ignore_ascii_case(name))?;
        Some(self.adapters.swap_remove(index))
    }

    /// List all available frameworks
    pub fn list_frameworks(&self) -> Vec<String> {
        self.adapters.iter().map(|a| a.framework_name().to_string()).collect()
    }
}

impl Default for FrameworkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper functions for code generation
pub mod codegen {
    /// Indent a block of code
    pub fn indent(code: &str, spaces: usize) -> String {
        let indent_str = " ".repeat(spaces);
        code.lines()
            .map(
                |line| {
                    if line.is_empty() {
                        line.to_string()
                    } else {
                        format!("{}{}", indent_str, line)
                    }
                },
            )
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Uppercase the first character
    pub fn capitalize(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_registry() {
        let registry = FrameworkRegistry::new();

        let frameworks = registry.list_frameworks();
        assert!(frameworks.contains(&"junit5-assertj".to_string()));
        assert!(frameworks.contains(&"junit5".to_string()));

        assert!(registry.get_adapter("junit5").is_some());
        assert!(registry.get_adapter("JUnit5-AssertJ").is_some()); // Case insensitive
        assert!(registry.get_adapter("testng").is_none());

        let adapter = FrameworkRegistry::new().take_adapter("junit5").unwrap();
        assert_eq!(adapter.framework_name(), "junit5");
    }

    #[test]
    fn test_codegen_helpers() {
        use codegen::*;

        let code = "line1\n\nline3";
        assert_eq!(indent(code, 4), "    line1\n\n    line3");

        assert_eq!(capitalize("add"), "Add");
        assert_eq!(capitalize("getURL"), "GetURL");
        assert_eq!(capitalize(""), "");
    }
}

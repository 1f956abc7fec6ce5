//! Renders the parameterized test method and its provider from a method signature

use super::frameworks::{TestFrameworkAdapter, codegen, junit5::JUnit5Adapter};
use super::{DataSourceStrategy, GeneratedArtifact, MethodSignature, Result, TestGenError};
use tracing::debug;

/// Name of the synthetic parameter holding the expected result
pub const EXPECTED_PARAM: &str = "expected";

/// Builds test artifacts. Pure: nothing is written anywhere.
pub struct TestArtifactBuilder {
    adapter: Box<dyn TestFrameworkAdapter>,
}

impl TestArtifactBuilder {
    pub fn new(adapter: Box<dyn TestFrameworkAdapter>) -> Self {
        Self { adapter }
    }

    pub fn framework_name(&self) -> &str {
        self.adapter.framework_name()
    }

    pub fn build(&self, method: &MethodSignature, strategy: DataSourceStrategy) -> Result<GeneratedArtifact> {
        if method.return_type.is_void() {
            let reason = if method.return_type.presentable_name.trim().is_empty() {
                "constructors have no return value to compare with the expected value"
            } else {
                "method returns void, there is no result to compare with the expected value"
            };
            return Err(TestGenError::UnsupportedSignature {
                method: method.display_name(),
                reason: reason.to_string(),
            });
        }

        let test_method_name = test_method_name(&method.name);
        debug!("Building {} for {} using {:?}", test_method_name, method.display_name(), strategy);

        let provider_method_text = match strategy {
            DataSourceStrategy::GeneratedProvider => Some(self.adapter.provider_method(&test_method_name)),
            DataSourceStrategy::InlineLiteral => None,
        };

        Ok(GeneratedArtifact {
            test_method_text: self.render_test_method(method, &test_method_name, strategy),
            test_method_name,
            provider_method_text,
            required_imports: self.adapter.required_imports(strategy),
        })
    }

    fn render_test_method(&self, method: &MethodSignature, name: &str, strategy: DataSourceStrategy) -> String {
        let mut params: Vec<String> = method
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_ref, p.name))
            .collect();
        params.push(format!("{} {}", method.return_type, EXPECTED_PARAM));

        let args: Vec<&str> = method.parameters.iter().map(|p| p.name.as_str()).collect();

        let mut body = String::new();
        body.push_str("// Given\n");
        body.push_str(&format!("var instance = new {}();\n", method.containing_type_name));
        body.push_str("\n// When\n");
        body.push_str(&format!("var result = instance.{}({});\n", method.name, args.join(", ")));
        body.push_str("\n// Then\n");
        body.push_str(&self.adapter.assertion("result", EXPECTED_PARAM));

        let mut code = String::new();
        for annotation in self.adapter.test_annotations(strategy) {
            code.push_str(&annotation);
            code.push('\n');
        }
        code.push_str(&format!("void {}({}) {{\n", name, params.join(", ")));
        code.push_str(&codegen::indent(&body, 4));
        code.push_str("\n}\n");
        code
    }
}

impl Default for TestArtifactBuilder {
    fn default() -> Self {
        Self::new(Box::new(JUnit5Adapter::default()))
    }
}

/// `add` -> `testAdd`
pub fn test_method_name(method_name: &str) -> String {
    format!("test{}", codegen::capitalize(method_name))
}

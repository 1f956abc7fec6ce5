//! Data-source strategy selection

use super::ParameterDescriptor;
use super::classifier::{ParameterClass, ParameterClassifier};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a parameterized test receives its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSourceStrategy {
    /// Literal rows written directly in the annotation
    InlineLiteral,
    /// A generated provider method bound by name
    GeneratedProvider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyPolicy {
    /// Inline literals when every parameter is simple, otherwise a provider
    #[default]
    Classified,
    AlwaysProvider,
}

#[derive(Debug, Clone, Default)]
pub struct StrategySelector {
    policy: StrategyPolicy,
}

impl StrategySelector {
    pub fn new(policy: StrategyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> StrategyPolicy {
        self.policy
    }

    pub fn select(&self, parameters: &[ParameterDescriptor]) -> DataSourceStrategy {
        if self.policy == StrategyPolicy::AlwaysProvider {
            return DataSourceStrategy::GeneratedProvider;
        }

        let complex: Vec<&str> = parameters
            .iter()
            .filter(|p| ParameterClassifier::classify(&p.type_ref) == ParameterClass::Complex)
            .map(|p| p.name.as_str())
            .collect();

        if complex.is_empty() {
            DataSourceStrategy::InlineLiteral
        } else {
            debug!("Complex parameters {:?} require a provider method", complex);
            DataSourceStrategy::GeneratedProvider
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(types: &[&str]) -> Vec<ParameterDescriptor> {
        types
            .iter()
            .enumerate()
            .map(|(i, ty)| ParameterDescriptor::new(format!("p{i}"), *ty))
            .collect()
    }

    #[test]
    fn test_all_simple_uses_inline_literal() {
        let selector = StrategySelector::default();
        assert_eq!(selector.select(&params(&["int", "int"])), DataSourceStrategy::InlineLiteral);
        assert_eq!(
            selector.select(&params(&["String", "boolean", "char"])),
            DataSourceStrategy::InlineLiteral
        );
    }

    #[test]
    fn test_any_complex_uses_provider() {
        let selector = StrategySelector::default();
        assert_eq!(
            selector.select(&params(&["String", "Database"])),
            DataSourceStrategy::GeneratedProvider
        );
        assert_eq!(selector.select(&params(&["Integer"])), DataSourceStrategy::GeneratedProvider);
    }

    #[test]
    fn test_zero_parameters_is_inline_literal() {
        let selector = StrategySelector::default();
        assert_eq!(selector.select(&[]), DataSourceStrategy::InlineLiteral);
    }

    #[test]
    fn test_always_provider_policy() {
        let selector = StrategySelector::new(StrategyPolicy::AlwaysProvider);
        assert_eq!(selector.select(&params(&["int"])), DataSourceStrategy::GeneratedProvider);
        assert_eq!(selector.select(&[]), DataSourceStrategy::GeneratedProvider);
    }
}

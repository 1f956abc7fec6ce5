//! Core functionality for testgen
//!
//! This crate contains the generation core for parameterized Java test
//! skeletons: signature transformation, data-source strategy selection,
//! test file placement, and import reconciliation.

pub mod test_gen;

use serde::{Deserialize, Serialize};
use test_gen::StrategyPolicy;
use test_gen::location::{DEFAULT_SOURCE_SEGMENT, DEFAULT_TEST_SEGMENT};

/// Configuration structure for testgen
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Framework adapter name, see `FrameworkRegistry::list_frameworks`
    pub framework: String,

    /// Data-source strategy policy
    pub strategy: StrategyPolicy,

    /// Path segment marking production sources
    pub source_segment: String,

    /// Path segment substituted to reach the test tree
    pub test_segment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            framework: "junit5-assertj".to_string(),
            strategy: StrategyPolicy::default(),
            source_segment: DEFAULT_SOURCE_SEGMENT.to_string(),
            test_segment: DEFAULT_TEST_SEGMENT.to_string(),
        }
    }
}

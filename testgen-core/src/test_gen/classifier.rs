//! Parameter type classification

use super::TypeRef;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Types that can be written directly as a literal in a data-source annotation.
/// Matched exactly: `Integer` is not `int`.
pub static SIMPLE_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["boolean", "byte", "char", "double", "float", "int", "long", "short", "String"]
        .into_iter()
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterClass {
    Simple,
    Complex,
}

pub struct ParameterClassifier;

impl ParameterClassifier {
    pub fn classify(type_ref: &TypeRef) -> ParameterClass {
        if SIMPLE_TYPES.contains(type_ref.presentable_name.as_str()) {
            ParameterClass::Simple
        } else {
            ParameterClass::Complex
        }
    }
}

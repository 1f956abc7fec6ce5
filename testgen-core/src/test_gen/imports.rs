//! Import reconciliation for the destination test file

use super::ImportSpec;
use super::document::JavaSourceFile;
use regex_utils::names;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Resolves the target type of a static import
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, qualified_name: &str) -> bool;
}

/// Accepts any well-formed qualified name
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticTypeResolver;

impl TypeResolver for SyntacticTypeResolver {
    fn resolve(&self, qualified_name: &str) -> bool {
        names::is_qualified_name(qualified_name)
    }
}

/// What a reconciliation pass did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub added: Vec<ImportSpec>,
    pub already_present: Vec<ImportSpec>,
    pub unresolved: Vec<ImportSpec>,
}

pub struct ImportReconciler {
    resolver: Box<dyn TypeResolver>,
}

impl ImportReconciler {
    pub fn new(resolver: Box<dyn TypeResolver>) -> Self {
        Self { resolver }
    }

    /// Add each required import unless the current import list text already
    /// contains it, then optimize the list.
    ///
    /// Presence is a literal substring test on the serialized import list:
    /// `org.junit.jupiter.params` counts as present once
    /// `org.junit.jupiter.params.provider.*` is imported.
    pub fn reconcile(&self, file: &mut JavaSourceFile, required: &BTreeSet<ImportSpec>) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        for spec in required {
            if file.import_list_text().contains(&spec.needle()) {
                debug!("Import already present: {}", spec.needle());
                report.already_present.push(spec.clone());
                continue;
            }

            if let ImportSpec::Static { qualified_name, member_name } = spec {
                if !self.resolver.resolve(qualified_name) {
                    warn!("Cannot resolve {} for static import of {}, skipping", qualified_name, member_name);
                    report.unresolved.push(spec.clone());
                    continue;
                }
            }

            debug!("Adding import: {}", spec.statement());
            file.add_import(spec);
            report.added.push(spec.clone());
        }

        file.optimize_imports();
        report
    }
}

impl Default for ImportReconciler {
    fn default() -> Self {
        Self::new(Box::new(SyntacticTypeResolver))
    }
}

//! Reads a Java source file into the inputs the generation core expects

use anyhow::{Context, Result, anyhow, bail};
use regex_utils::methods::{self, MethodDecl};
use regex_utils::{names, types};
use std::fs;
use std::path::{Path, PathBuf};
use testgen_core::test_gen::{MethodSignature, ParameterDescriptor, TypeRef, Visibility};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ScannedSource {
    pub path: PathBuf,
    pub package: Option<String>,
    pub type_name: String,
    pub methods: Vec<MethodDecl>,
}

impl ScannedSource {
    pub fn qualified_type_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{}.{}", package, self.type_name),
            None => self.type_name.clone(),
        }
    }

    /// First declaration named `name`
    pub fn find_method(&self, name: &str) -> Result<&MethodDecl> {
        let mut matches = self.methods.iter().filter(|m| m.name == name);
        let first = matches
            .next()
            .ok_or_else(|| anyhow!("No method named '{}' in {}", name, self.path.display()))?;
        let overloads = matches.count();
        if overloads > 0 {
            warn!("{} has {} overload(s) of '{}', using the first", self.type_name, overloads, name);
        }
        Ok(first)
    }
}

pub fn scan(path: &Path) -> Result<ScannedSource> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file {}", path.display()))?;
    scan_text(path, &source)
}

pub fn scan_text(path: &Path, source: &str) -> Result<ScannedSource> {
    let type_name = types::primary_type(source)
        .ok_or_else(|| anyhow!("No class, interface, enum or record found in {}", path.display()))?;
    let methods = methods::find_methods(source);
    debug!("Found {} method(s) in {}", methods.len(), type_name);

    Ok(ScannedSource { path: path.to_path_buf(), package: names::package_of(source), type_name, methods })
}

pub fn parse_signature(text: &str) -> Result<MethodDecl> {
    methods::parse_declaration(text).ok_or_else(|| anyhow!("Cannot parse method declaration '{}'", text))
}

pub fn to_signature(type_name: &str, decl: &MethodDecl) -> MethodSignature {
    MethodSignature {
        containing_type_name: type_name.to_string(),
        name: decl.name.clone(),
        parameters: decl
            .parameters
            .iter()
            .map(|p| ParameterDescriptor::new(&p.name, &p.type_name))
            .collect(),
        return_type: TypeRef::new(&decl.return_type),
        visibility: Visibility::from_modifiers(&decl.modifiers),
    }
}

/// Walk up from the source file's directory past one directory per package segment
pub fn infer_source_root(source_file: &Path, package: Option<&str>) -> Result<PathBuf> {
    let mut root = source_file
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("{} has no parent directory", source_file.display()))?;

    if let Some(package) = package {
        for segment in package.split('.').rev() {
            if root.file_name().and_then(|n| n.to_str()) != Some(segment) {
                bail!(
                    "{} does not sit in a directory matching package '{}'; pass --source-root",
                    source_file.display(),
                    package
                );
            }
            root.pop();
        }
    }
    Ok(root)
}

//! Generate a parameterized test for one method

use crate::cli::app::GenerateArgs;
use crate::cli::source_scan;
use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::sync::Arc;
use testgen_core::Config;
use testgen_core::test_gen::{
    DiskProject, FilePresenter, GenerationOrchestrator, SourceLocation,
};
use tracing::info;

/// Prints where the test landed
struct ConsolePresenter;

impl FilePresenter for ConsolePresenter {
    fn present(&self, file: &Path) {
        println!("✅ Test written to {}", file.display());
    }
}

/// Handle the generate command
pub fn execute(args: GenerateArgs, config: &Config) -> Result<()> {
    info!("Starting test generation with args: {:?}", args);

    let scanned = source_scan::scan(&args.source_file)?;
    let decl = match (&args.signature, &args.method) {
        (Some(signature), _) => source_scan::parse_signature(signature)?,
        (None, Some(name)) => scanned.find_method(name)?.clone(),
        (None, None) => return Err(anyhow!("Either --method or --signature is required")),
    };

    let qualified_name = args.qualified_class.clone().unwrap_or_else(|| scanned.qualified_type_name());
    let type_name = qualified_name.rsplit('.').next().unwrap_or(&qualified_name).to_string();
    let method = source_scan::to_signature(&type_name, &decl);

    let orchestrator =
        GenerationOrchestrator::from_config(config, Arc::new(DiskProject::new()), Arc::new(ConsolePresenter))?;

    if args.dry_run {
        let (strategy, artifact) = orchestrator.preview(&method)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&artifact)?);
        } else {
            println!("🔍 Dry run mode - no files will be written ({:?})\n", strategy);
            if let Some(provider) = &artifact.provider_method_text {
                println!("{}", provider);
            }
            println!("{}", artifact.test_method_text);
            for import in &artifact.required_imports {
                println!("{}", import.statement());
            }
        }
        return Ok(());
    }

    let source_root = match &args.source_root {
        Some(root) => root.clone(),
        None => {
            let package = qualified_name.rsplit_once('.').map(|(package, _)| package);
            source_scan::infer_source_root(&args.source_file, package)?
        }
    };
    let source = SourceLocation::new(&args.source_file, source_root).with_qualified_type_name(&qualified_name);

    let outcome = orchestrator
        .generate(&method, &source)
        .with_context(|| format!("Failed to generate a test for {}", method.display_name()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!(
            "📝 {} added to {} ({:?}, {} import(s) added)",
            outcome.artifact.test_method_name,
            outcome.test_class.class_name,
            outcome.strategy,
            outcome.imports.added.len()
        );
    }
    Ok(())
}

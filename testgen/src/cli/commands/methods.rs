//! List the method declarations found in a source file

use crate::cli::app::MethodsArgs;
use crate::cli::source_scan;
use anyhow::Result;
use testgen_core::test_gen::TypeRef;

/// Handle the methods command
pub fn execute(args: MethodsArgs) -> Result<()> {
    let scanned = source_scan::scan(&args.source_file)?;

    println!("{} ({} methods)", scanned.qualified_type_name(), scanned.methods.len());
    for decl in &scanned.methods {
        let params: Vec<String> =
            decl.parameters.iter().map(|p| format!("{} {}", p.type_name, p.name)).collect();
        let marker = if decl.return_type.is_empty() {
            "  (constructor, skipped)"
        } else if TypeRef::new(&decl.return_type).is_void() {
            "  (void, skipped)"
        } else {
            ""
        };
        println!("  {} {}({}){}", decl.return_type, decl.name, params.join(", "), marker);
    }
    Ok(())
}

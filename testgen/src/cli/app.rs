use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "testgen",
    version,
    about = "Generate parameterized JUnit 5 test skeletons for Java methods",
    long_about = "testgen derives a parameterized test method, a data provider, the mirrored test class, and the imports they need from a single Java method."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file (defaults to ./testgen.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a parameterized test for one method
    #[command(about = "Generate a parameterized test into the mirrored test class")]
    Generate(GenerateArgs),

    /// List the methods testgen can see in a source file
    #[command(about = "List method declarations found in a Java source file")]
    Methods(MethodsArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Java source file containing the method
    #[arg(help = "Java source file containing the method under test")]
    pub source_file: PathBuf,

    /// Name of the method to test; the first declaration wins for overloads
    #[arg(short, long, conflicts_with = "signature", required_unless_present = "signature")]
    pub method: Option<String>,

    /// Method declaration to use instead of scanning, e.g. "int add(int a, int b)"
    #[arg(short, long)]
    pub signature: Option<String>,

    /// Source root the file lives under (inferred from the package when omitted)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Fully qualified name of the containing type (inferred when omitted)
    #[arg(long = "class")]
    pub qualified_class: Option<String>,

    /// Print the generated code without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MethodsArgs {
    /// Java source file to scan
    pub source_file: PathBuf,
}

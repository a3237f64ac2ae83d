mod generate;
mod validate;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "remlgen")]
#[command(version)]
#[command(about = "Generate SQL DDL from REML schema definitions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a DDL script from a REML YAML file
    Generate {
        /// Input REML YAML file
        file: PathBuf,

        /// Output SQL file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target dialect: postgresql, mysql, mariadb, sqlite, sqlserver, oracle
        /// (defaults to the document's `database` field; unknown names
        /// fall back to postgresql)
        #[arg(short, long)]
        dialect: Option<String>,

        /// Validate and report without writing any output
        #[arg(long)]
        check: bool,

        /// Show the table emission order instead of generating DDL
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a REML YAML file and report structural issues
    Validate {
        /// Input REML YAML file
        file: PathBuf,

        /// Output results as JSON instead of human-readable text
        #[arg(long)]
        json: bool,

        /// Treat warnings as errors (non-zero exit on any warning)
        #[arg(long)]
        strict: bool,
    },

    /// Print JSON Schemas for REML documents and --json output types
    Schema {
        /// Schema name (prints all when omitted)
        name: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            file,
            output,
            dialect,
            check,
            dry_run,
        } => generate::run(file, output, dialect, check, dry_run),
        Commands::Validate { file, json, strict } => validate::run(file, json, strict),
        Commands::Schema { name } => run_schema(name),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "remlgen", &mut io::stdout());
            Ok(())
        }
    }
}

fn run_schema(name: Option<String>) -> anyhow::Result<()> {
    match name {
        Some(name) => match crate::json_schema::get_schema(&name) {
            Some(schema) => {
                println!("{}", serde_json::to_string_pretty(&schema)?);
                Ok(())
            }
            None => anyhow::bail!(
                "unknown schema: {}. Available: {}",
                name,
                crate::json_schema::schema_names().join(", ")
            ),
        },
        None => {
            let schemas = crate::json_schema::all_schemas();
            println!("{}", serde_json::to_string_pretty(&schemas)?);
            Ok(())
        }
    }
}

//! insertgen: INSERT templates from Go structs
//!
//! # Usage
//!
//! ```bash
//! # Print one INSERT template per struct
//! insertgen models/user.go
//!
//! # Fail with status 2 if the file does not parse
//! insertgen models/user.go --strict
//!
//! # Show how names were derived
//! insertgen explain models/user.go
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use insertgen::prelude::*;
use tracing::Level;

/// Exit status for a file that could not be read or parsed under `--strict`.
const EXIT_PARSE_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "insertgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate named-parameter INSERT templates from Go struct declarations", long_about = None)]
#[command(after_help = "EXAMPLES:
    insertgen models/user.go
    insertgen models/user.go --strict
    insertgen explain models/user.go")]
struct Cli {
    /// Go source file to scan (default: ./example.go)
    path: Option<PathBuf>,

    /// Exit with status 2 when the file cannot be read or parsed
    #[arg(long)]
    strict: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./insertgen.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show each struct with its derived table and column names
    Explain {
        /// Go source file to scan
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(cli.verbose, &config.log_level)?;

    let strict = cli.strict || config.strict;
    match &cli.command {
        Some(Commands::Explain { path }) => {
            let path = path.as_ref().unwrap_or(&config.input);
            explain(path, strict)
        }
        None => {
            let path = cli.path.as_ref().unwrap_or(&config.input);
            generate(path, strict)
        }
    }
}

fn init_logging(verbose: u8, configured: &str) -> Result<()> {
    let level = match verbose {
        0 => configured
            .parse::<Level>()
            .map_err(|_| anyhow!("invalid log_level '{}'", configured))?,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Scan `path`, reporting a parse failure once on stderr.
fn scan(path: &Path) -> Result<Option<Vec<StructDeclaration>>> {
    match try_extract_structs(path) {
        Ok(structs) => Ok(Some(structs)),
        Err(e) if e.is_parse_failure() => {
            eprintln!("{} {}", "Parse Error:".red().bold(), e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn failure_code(strict: bool) -> ExitCode {
    if strict {
        ExitCode::from(EXIT_PARSE_FAILURE)
    } else {
        ExitCode::SUCCESS
    }
}

fn generate(path: &Path, strict: bool) -> Result<ExitCode> {
    let Some(structs) = scan(path)? else {
        return Ok(failure_code(strict));
    };

    for decl in &structs {
        println!("{}", decl.to_query_builder().to_sql());
    }
    Ok(ExitCode::SUCCESS)
}

fn explain(path: &Path, strict: bool) -> Result<ExitCode> {
    println!("{}", "insertgen struct report".cyan().bold());
    println!();
    println!("{} {}", "File:".dimmed(), path.display().to_string().yellow());
    println!();

    let Some(structs) = scan(path)? else {
        return Ok(failure_code(strict));
    };

    if structs.is_empty() {
        println!("{}", "(no struct declarations)".dimmed());
        return Ok(ExitCode::SUCCESS);
    }

    for decl in &structs {
        let query = decl.to_query_builder();
        println!(
            "{} {} {}",
            decl.name.white().bold(),
            "→".dimmed(),
            query.table_name.cyan()
        );

        let width = decl.fields.iter().map(|f| f.chars().count()).max().unwrap_or(0);
        for (field, column) in decl.fields.iter().zip(&query.fields) {
            println!(
                "    {:width$} {} {}",
                field,
                "→".dimmed(),
                column.cyan(),
                width = width
            );
        }

        println!("  {} {}", "SQL:".green().bold(), query.to_sql().white());
        println!();
    }

    println!("{} struct(s) found", structs.len().to_string().cyan());
    Ok(ExitCode::SUCCESS)
}

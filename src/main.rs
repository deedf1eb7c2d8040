use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use tabby_grabby::error::Result;
use tabby_grabby::import;

#[derive(Parser)]
#[command(author, version, about = "Inspect Tabby Grabby export documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize an export file without touching any browser state
    Preview {
        /// Path to an exported JSON document
        file: PathBuf,
    },
    /// Check an export file against the document schema
    Validate {
        /// Path to an exported JSON document
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Cli::parse();

    let result = match args.command {
        Commands::Preview { file } => preview(&file),
        Commands::Validate { file } => validate(&file),
    };

    match result {
        Ok(ok) => {
            if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red());
            ExitCode::FAILURE
        }
    }
}

fn preview(file: &Path) -> Result<bool> {
    let bytes = std::fs::read(file)?;
    let preview = import::import_preview(bytes);

    if !preview.valid {
        println!(
            "{} {}",
            "invalid:".red(),
            preview.error.unwrap_or_default()
        );
        return Ok(false);
    }

    println!("{}", "valid export document".green());
    println!("  {} {}", "tabs:".bold(), preview.tab_count);
    println!("  {} {}", "bookmarks:".bold(), preview.bookmark_count);
    if let Some(info) = preview.export_info {
        println!(
            "  {} {} ({} v{})",
            "exported:".bold(),
            info.timestamp,
            info.extension_name,
            info.version
        );
    }
    Ok(true)
}

fn validate(file: &Path) -> Result<bool> {
    let bytes = std::fs::read(file)?;
    match import::parse_document(bytes) {
        Ok(_) => {
            println!("{}", "ok".green());
            Ok(true)
        }
        Err(e) => {
            println!("{} {e}", "invalid:".red());
            Ok(false)
        }
    }
}

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use log::debug;

use ocs_core::{Language, pipeline};
use ocs_snippets::TemplateRenderer;

#[derive(Parser)]
#[command(
    name = "ocs",
    about = "Generate default x-codeSamples overlays for OpenAPI documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a code-samples overlay for every operation in a document
    Generate {
        /// Path or http(s) URL of the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        schema: String,

        /// Snippet target language
        #[arg(short, long)]
        language: String,

        /// Write the overlay here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            schema,
            language,
            out,
        } => cmd_generate(&schema, &language, out),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "ocs", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn cmd_generate(schema: &str, language: &str, out: Option<PathBuf>) -> Result<()> {
    let language: Language = language.parse()?;
    let raw = read_path_or_url(schema)?;
    debug!("read {} bytes from {schema}", raw.len());

    let renderer = TemplateRenderer::new();
    let result = pipeline::generate_overlay(&raw, language, &renderer)?;

    let json = serde_json::to_string_pretty(&result.overlay)?;
    match out {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    // Per-operation failures go to stderr, never into the overlay.
    for error in result.errors.unwrap_or_default() {
        eprintln!(
            "Error generating code sample for {}: {}",
            error.selector, error.error
        );
    }

    Ok(())
}

/// Read the document from a local path or fetch it over http(s); URL vs.
/// path is distinguished purely by prefix.
fn read_path_or_url(source: &str) -> Result<String> {
    if source.starts_with("https://") || source.starts_with("http://") {
        let response =
            reqwest::blocking::get(source).with_context(|| format!("failed to fetch {source}"))?;
        return response
            .error_for_status()
            .with_context(|| format!("failed to fetch {source}"))?
            .text()
            .context("failed to read response body");
    }

    fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
}

//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Docrecon - parse PDF and DOCX documents into structured JSON.
#[derive(Debug, Parser)]
#[command(name = "docrecon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a document or a directory of documents
    Process(ProcessArgs),
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Path to a PDF/DOCX file or a directory containing PDF/DOCX files
    pub path: PathBuf,

    /// Directory to save output files
    #[arg(short, long, default_value = "parsed_outputs")]
    pub output_dir: PathBuf,

    /// Limit the number of files to process (useful for testing)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Mistral API key for the OCR backend
    #[arg(long, env = "MISTRAL_API_KEY", hide_env_values = true)]
    pub mistral_api_key: Option<String>,

    /// Gemini API key for the generative backend
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model to generate with
    #[arg(long, default_value = docrecon_llm::gemini::DEFAULT_MODEL)]
    pub gemini_model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["docrecon", "process", "inbox"]).unwrap();
        let Command::Process(args) = cli.command;
        assert_eq!(args.path, PathBuf::from("inbox"));
        assert_eq!(args.output_dir, PathBuf::from("parsed_outputs"));
        assert_eq!(args.limit, None);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "docrecon",
            "process",
            "doc.pdf",
            "--output-dir",
            "out",
            "--limit",
            "3",
            "--mistral-api-key",
            "mk",
            "--gemini-api-key",
            "gk",
            "--gemini-model",
            "gemini-test",
        ])
        .unwrap();

        let Command::Process(args) = cli.command;
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert_eq!(args.limit, Some(3));
        assert_eq!(args.mistral_api_key.as_deref(), Some("mk"));
        assert_eq!(args.gemini_api_key.as_deref(), Some("gk"));
        assert_eq!(args.gemini_model, "gemini-test");
    }

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["docrecon", "process"]).is_err());
    }
}

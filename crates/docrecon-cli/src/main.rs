//! Docrecon CLI - parse PDF and DOCX documents into structured JSON.

mod cli;

use clap::Parser;
use cli::{Cli, Command, ProcessArgs};
use docrecon_domain::DocumentKind;
use docrecon_engine::{DocumentProcessor, Reconciler, SourceExtractor};
use docrecon_extract::{DocxConverter, LayoutExtractor, MistralOcr, RawTextExtractor};
use docrecon_llm::GeminiProvider;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Command::Process(args) => process(args),
    }
}

fn process(args: ProcessArgs) -> anyhow::Result<i32> {
    let path = args.path.as_path();
    if !path.exists() {
        eprintln!("Error: Path does not exist: {}", path.display());
        return Ok(1);
    }

    let extractors: Vec<Box<dyn SourceExtractor>> = vec![
        Box::new(MistralOcr::from_key_or_env(args.mistral_api_key)?),
        Box::new(LayoutExtractor::new()),
        Box::new(RawTextExtractor::new()),
    ];
    let provider = GeminiProvider::from_key_or_env(args.gemini_api_key, args.gemini_model)?;
    let reconciler = Reconciler::new(provider);
    let processor = DocumentProcessor::new(
        extractors,
        Box::new(DocxConverter::new()),
        reconciler,
        &args.output_dir,
    )?;

    if path.is_file() {
        if DocumentKind::from_path(path).is_none() {
            eprintln!("Error: Unsupported file type: {}", path.display());
            return Ok(1);
        }
        let result = processor.process_file(path);
        Ok(if result.success { 0 } else { 1 })
    } else {
        let summary = processor.process_directory(path, args.limit)?;
        println!(
            "Processed {} files: {} successful, {} failed",
            summary.total(),
            summary.successful,
            summary.failed
        );
        Ok(if summary.all_succeeded() { 0 } else { 1 })
    }
}

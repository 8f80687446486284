use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use css_design_tokens::logging;
use css_design_tokens::{CssSource, ExtractorConfig, Origin, SourceKind, TokenExtractor};
use log::{error, info};

const DEFAULT_ORIGIN: &str = "http://localhost/";
const PROGRAM_NAME: &str = "css_design_tokens";

/// Parsed command line
#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    origin: Option<String>,
    files: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut config = None;
    let mut origin = None;
    let mut files = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config needs a file")?;
                config = Some(PathBuf::from(value));
            }
            "--origin" => {
                let value = iter.next().ok_or("--origin needs a url")?;
                origin = Some(value.clone());
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option {}", flag)),
            file => files.push(PathBuf::from(file)),
        }
    }

    if files.is_empty() {
        return Err("No CSS files given".to_string());
    }
    Ok(CliArgs {
        config,
        origin,
        files,
    })
}

fn read_sources(files: &[PathBuf]) -> Result<Vec<CssSource>, String> {
    files
        .iter()
        .map(|path| {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            Ok(CssSource::new(
                SourceKind::Link,
                Some(path.display().to_string()),
                content,
            ))
        })
        .collect()
}

fn run(args: CliArgs) -> Result<String, String> {
    let config = match &args.config {
        Some(path) => ExtractorConfig::from_path(path).map_err(|e| e.to_string())?,
        None => ExtractorConfig::default(),
    };
    let origin = Origin::from_url(args.origin.as_deref().unwrap_or(DEFAULT_ORIGIN))
        .map_err(|e| e.to_string())?;
    let sources = read_sources(&args.files)?;
    info!("Extracting tokens from {} files for {}", sources.len(), origin.url);

    let token_set = TokenExtractor::new(config).generate(&sources, origin);
    info!("Extracted {} tokens", token_set.summary.tokens_extracted);

    serde_json::to_string_pretty(&token_set).map_err(|e| e.to_string())
}

/// Program name and the arguments after it, argv may be empty
fn split_program_name(args: &[String]) -> (&str, &[String]) {
    match args.split_first() {
        Some((program, rest)) => (program.as_str(), rest),
        None => (PROGRAM_NAME, args),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let (program, options) = split_program_name(&args);

    let cli = match parse_args(options) {
        Ok(cli) => cli,
        Err(message) => {
            // logger isn't initialized yet
            eprintln!("{}", message);
            eprintln!("Usage: {} [--config FILE] [--origin URL] FILE...", program);
            eprintln!("  FILE: CSS file, read as a linked stylesheet");
            eprintln!("  --config: JSON or YAML extractor config");
            eprintln!("  --origin: page url the CSS was collected from");
            process::exit(1);
        }
    };

    if let Err(e) = logging::init_logger() {
        eprintln!("Failed to initialize logger: {}", e);
    }
    info!("Command line arguments: {:?}", args);

    match run(cli) {
        Ok(json) => println!("{}", json),
        Err(message) => {
            error!("{}", message);
            eprintln!("{}", message);
            process::exit(1);
        }
    }
}

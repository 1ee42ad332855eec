use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use resume_classifier::{ClassifierConfig, ResumeClassifier};
use tracing::info;

#[derive(Parser)]
#[command(name = "resume_classify", about = "Classify resume lines into structured fields")]
struct Cli {
    /// Extracted resume text (default: stdin)
    file: Option<PathBuf>,
    /// Person the resume belongs to
    #[arg(short, long, default_value = "")]
    owner: String,
    /// Config file name, without extension
    #[arg(short, long, default_value = resume_classifier::settings::DEFAULT_CONFIG_FILE)]
    config: String,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {:?}", path)),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("reading stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = ClassifierConfig::load_from(&cli.config)?;
    info!(settings_loaded = ?settings, msg = "Starting resume classifier");

    let text = read_input(cli.file.as_ref())?;
    let mut classifier = ResumeClassifier::from_config(text, cli.owner, cli.file, settings)?;
    let doc = classifier.classify()?;

    let out = if cli.pretty {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_json::to_string(doc)?
    };
    println!("{}", out);
    Ok(())
}

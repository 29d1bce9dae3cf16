mod batch;
mod config;
mod terminal_output;
mod writer;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use persocr_logging::init_logger;
use persocr_understanding::RemoteExtractor;

use batch::run_batch;
use config::Config;
use terminal_output::{note_error, note_info, rule};
use writer::ResultWriter;

#[derive(Parser)]
#[command(name = "persocr")]
#[command(about = "Persian OCR batch processor: extract text from a folder of images")]
#[command(version)]
struct Cli {
    /// Folder with the images (asked for interactively when omitted)
    folder: Option<PathBuf>,

    /// Vision model identifier sent to the service
    #[arg(long)]
    model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    init_logger(config.log_dir.as_deref(), &config.log_level)?;
    info!(config = ?config, "Loaded configuration");

    println!("Persian OCR Batch Processor");
    println!("{}", rule('='));
    println!("Note: the results kept in specified folder");

    let folder = match cli.folder {
        Some(folder) => folder,
        None => prompt_for_folder()?,
    };

    if !folder.is_dir() {
        note_error(&format!("Error: '{}' is not a valid directory", folder.display()));
        return Ok(());
    }

    let extractor = match config
        .extractor_config()
        .and_then(|c| RemoteExtractor::new(c).map_err(Into::into))
    {
        Ok(extractor) => extractor,
        Err(e) => {
            note_error(&format!("Error: {e}"));
            return Ok(());
        }
    };

    println!("\nStarting Persian OCR processing for: {}", folder.display());
    let start = Instant::now();
    let writer = ResultWriter::new(&folder);

    match run_batch(&folder, &extractor, &writer).await {
        Ok(summary) if summary.total > 0 => {
            note_info(&format!(
                "{} succeeded, {} failed",
                summary.succeeded, summary.failed
            ));
        }
        Ok(_) => {}
        Err(e) => {
            note_error(&format!("Error: {e}"));
            return Ok(());
        }
    }

    let total_time = start.elapsed();
    println!("\n{}", rule('='));
    println!(
        "Processing complete! Total time: {:.1} minutes",
        total_time.as_secs_f64() / 60.0
    );
    println!("Results saved to: {}", writer.output_dir().display());
    println!("{}", rule('='));

    Ok(())
}

/// Ask for the input folder; an empty answer means the current directory.
fn prompt_for_folder() -> Result<PathBuf> {
    print!("Enter folder path with images (or press Enter for current directory): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        Ok(std::env::current_dir()?)
    } else {
        Ok(PathBuf::from(answer))
    }
}

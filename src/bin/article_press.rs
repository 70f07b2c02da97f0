//! Command-line front end.
//!
//! `extract` runs the pure pipeline over a local file (or stdin) and prints
//! the assembled document. `generate` runs one full fetch → render → notify
//! job in the foreground using the environment configuration.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use article_press::logging::{init_logging, LogConfig, LogFormat};
use article_press::service::{JobOutcome, PdfRequest, Service, ServiceConfig};
use article_press::{extract_bytes, ExtractionStats};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "article-press")]
#[command(about = "Turn web articles into clean, print-ready documents")]
#[command(version)]
struct Cli {
    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text", env = "LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract an article from local HTML
    Extract {
        /// URL the HTML was fetched from (selects the site profile)
        #[arg(long)]
        url: String,
        /// HTML file to read (defaults to stdin)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Where to write the document (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Print title, profile and stats as JSON instead of the document
        #[arg(long)]
        json: bool,
    },

    /// Fetch, extract and render one article to PDF
    Generate {
        /// Article URL
        #[arg(long)]
        url: String,
        /// Request identifier, also the PDF file stem (random if omitted)
        #[arg(long)]
        request_id: Option<String>,
    },
}

#[derive(Serialize)]
struct Summary<'a> {
    title: &'a str,
    profile: &'static str,
    nodes: usize,
    fallback: bool,
    stats: ExtractionStats,
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    match input {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn run_extract(
    url: &str,
    input: Option<&PathBuf>,
    output: Option<&PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let bytes = read_input(input)?;
    let extraction = extract_bytes(&bytes, url);
    info!(
        title = %extraction.title,
        profile = %extraction.profile,
        nodes = extraction.node_count,
        fallback = extraction.used_fallback,
        "extracted"
    );

    let rendered = if json {
        let summary = Summary {
            title: &extraction.title,
            profile: extraction.profile.as_str(),
            nodes: extraction.node_count,
            fallback: extraction.used_fallback,
            stats: extraction.stats(),
        };
        serde_json::to_string_pretty(&summary)?
    } else {
        extraction.document
    };

    match output {
        Some(path) => fs::write(path, rendered).with_context(|| format!("writing {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}

async fn run_generate(url: String, request_id: Option<String>) -> anyhow::Result<()> {
    let request_id = request_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let request = PdfRequest::new(request_id, url);
    request.validate()?;

    let service = Service::from_config(ServiceConfig::from_env())?;
    match service.process(&request).await {
        JobOutcome::Completed { pdf_path, title } => {
            println!("{}\t{}", pdf_path.display(), title);
            Ok(())
        }
        JobOutcome::Failed { error } => bail!("PDF generation failed: {error}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig {
        format: cli.log_format,
        ..LogConfig::default()
    })?;

    match cli.command {
        Commands::Extract {
            url,
            input,
            output,
            json,
        } => run_extract(&url, input.as_ref(), output.as_ref(), json),
        Commands::Generate { url, request_id } => run_generate(url, request_id).await,
    }
}

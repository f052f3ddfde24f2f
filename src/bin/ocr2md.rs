//! CLI binary for ocr2md.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractConfig`, shows a spinner while the request is in flight, and
//! writes the chosen export formats.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ocr2md::{
    extract, ExtractConfig, ExtractObserver, Observer, MARKDOWN_FILENAME, PLAIN_TEXT_FILENAME,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Spinner observer ─────────────────────────────────────────────────────────

/// Terminal busy indicator: a spinner that runs for exactly the in-flight
/// window of the OCR request.
struct SpinnerObserver {
    bar: ProgressBar,
}

impl SpinnerObserver {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Extracting");
        Arc::new(Self { bar })
    }
}

impl ExtractObserver for SpinnerObserver {
    fn on_submit_start(&self, file_name: &str, payload_bytes: usize) {
        self.bar.set_message(format!(
            "{file_name}  {}",
            dim(&format!("{} KiB payload", payload_bytes / 1024))
        ));
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_submit_complete(&self, ok: bool, duration_ms: u64) {
        self.bar.finish_and_clear();
        if ok {
            eprintln!(
                "{} extracted in {}",
                green("✔"),
                bold(&format!("{:.1}s", duration_ms as f64 / 1000.0))
            );
        } else {
            eprintln!(
                "{} extraction failed after {}",
                red("✘"),
                dim(&format!("{:.1}s", duration_ms as f64 / 1000.0))
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic extraction (markdown to stdout)
  ocr2md scan.pdf

  # Write markdown to a file
  ocr2md scan.pdf -o scan.md

  # Images work the same way
  ocr2md receipt.jpg -o receipt.md

  # Write both default exports: ocr-result.md and ocr-result.txt
  ocr2md scan.pdf --export

  # Plain-text export only (markdown punctuation stripped)
  ocr2md scan.pdf --text-output scan.txt

  # Structured JSON with per-page fragments and stats
  ocr2md scan.pdf --json > result.json

ACCEPTED FILE TYPES:
  application/pdf  and any image/* type (PNG, JPEG, GIF, WebP, BMP, TIFF).
  The type is sniffed from the file content, not trusted from the name.

ENVIRONMENT VARIABLES:
  MISTRAL_API_KEY     Mistral API key (required)
  OCR2MD_MODEL        Override the model ID (default: mistral-ocr-latest)
  OCR2MD_BASE_URL     Override the API base URL

SETUP:
  1. Set the API key:   export MISTRAL_API_KEY=...
  2. Extract:           ocr2md document.pdf -o output.md
"#;

/// Extract Markdown from PDF and image files using the Mistral OCR API.
#[derive(Parser, Debug)]
#[command(
    name = "ocr2md",
    version,
    about = "Extract Markdown from PDF and image files using the Mistral OCR API",
    long_about = "Send a PDF or image to the hosted Mistral OCR endpoint and receive the \
document as Markdown, with optional plain-text export. One file in, one document out.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF or image file.
    input: PathBuf,

    /// Write Markdown to this file instead of stdout.
    #[arg(short, long, env = "OCR2MD_OUTPUT")]
    output: Option<PathBuf>,

    /// Also write a plain-text export (markdown punctuation stripped).
    #[arg(long, env = "OCR2MD_TEXT_OUTPUT")]
    text_output: Option<PathBuf>,

    /// Write both default exports (ocr-result.md, ocr-result.txt) to the
    /// current directory.
    #[arg(long)]
    export: bool,

    /// OCR model identifier.
    #[arg(long, env = "OCR2MD_MODEL", default_value = ocr2md::DEFAULT_MODEL)]
    model: String,

    /// API base URL.
    #[arg(long, env = "OCR2MD_BASE_URL", default_value = ocr2md::DEFAULT_BASE_URL)]
    base_url: String,

    /// OCR API call timeout in seconds.
    #[arg(long, env = "OCR2MD_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Output structured JSON (ExtractOutput) instead of Markdown.
    #[arg(long, env = "OCR2MD_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "OCR2MD_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "OCR2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "OCR2MD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config (fails fast on a missing API key) ───────────────────
    let observer: Option<Observer> = if show_progress {
        Some(SpinnerObserver::new() as Arc<dyn ExtractObserver>)
    } else {
        None
    };

    let key = std::env::var(ocr2md::API_KEY_ENV).unwrap_or_default();
    let mut builder = ExtractConfig::builder()
        .api_key(key)
        .model(&cli.model)
        .base_url(&cli.base_url)
        .api_timeout_secs(cli.api_timeout);
    if let Some(obs) = observer {
        builder = builder.observer(obs);
    }
    let config = builder.build()?;

    // ── Run extraction ───────────────────────────────────────────────────
    let output = extract(&cli.input, &config)
        .await
        .context("Extraction failed")?;

    // ── Emit results ─────────────────────────────────────────────────────
    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(());
    }

    let mut wrote_file = false;

    if let Some(ref path) = cli.output {
        ocr2md::pipeline::export::write_markdown(&output.markdown, path).await?;
        wrote_file = true;
        if !cli.quiet {
            eprintln!("  {} {}", dim("md →"), bold(&path.display().to_string()));
        }
    }

    if let Some(ref path) = cli.text_output {
        ocr2md::pipeline::export::write_plain_text(&output.markdown, path).await?;
        wrote_file = true;
        if !cli.quiet {
            eprintln!("  {} {}", dim("txt →"), bold(&path.display().to_string()));
        }
    }

    if cli.export {
        let md_path = PathBuf::from(MARKDOWN_FILENAME);
        let txt_path = PathBuf::from(PLAIN_TEXT_FILENAME);
        ocr2md::pipeline::export::write_markdown(&output.markdown, &md_path).await?;
        ocr2md::pipeline::export::write_plain_text(&output.markdown, &txt_path).await?;
        wrote_file = true;
        if !cli.quiet {
            eprintln!(
                "  {} {} and {}",
                dim("exports →"),
                bold(MARKDOWN_FILENAME),
                bold(PLAIN_TEXT_FILENAME)
            );
        }
    }

    if !wrote_file {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(output.markdown.as_bytes())
            .context("Failed to write to stdout")?;
        if !output.markdown.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    if !cli.quiet && !show_progress {
        eprintln!(
            "Extracted {} pages in {}ms",
            output.stats.page_count, output.stats.total_duration_ms
        );
    } else if !cli.quiet {
        eprintln!(
            "   {} pages  {}",
            dim(&output.stats.page_count.to_string()),
            dim(&format!("{}ms total", output.stats.total_duration_ms)),
        );
    }

    Ok(())
}

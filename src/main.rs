//! web2epub - package extracted web articles as EPUB

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use web2epub::{Article, EpubConfig, EpubExporter, ExtractedArticle, suggested_filename};

#[derive(Parser)]
#[command(name = "web2epub")]
#[command(version, about = "Package an extracted web article as EPUB", long_about = None)]
#[command(after_help = "EXAMPLES:
    web2epub article.json                      Convert extractor output to <Title>.epub
    web2epub body.html --title \"My Post\"       Convert a bare HTML fragment
    web2epub -i article.json                   Show word count and reading time")]
struct Cli {
    /// Extractor output (JSON with title, byline, content) or an HTML fragment
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to the title with non-alphanumerics replaced, plus .epub)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Article title (required for HTML input, overrides JSON)
    #[arg(long)]
    title: Option<String>,

    /// Article author (overrides JSON byline)
    #[arg(long)]
    author: Option<String>,

    /// Package identifier (defaults to the current time in milliseconds)
    #[arg(long)]
    identifier: Option<String>,

    /// Deflate compression level
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=9))]
    compression_level: Option<u32>,

    /// Show article statistics without packaging
    #[arg(short, long)]
    info: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

/// Extractor output as serialized by the surrounding service.
#[derive(Deserialize)]
struct ExtractedJson {
    title: String,
    #[serde(default)]
    byline: Option<String>,
    content: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let result = load_article(&cli).and_then(|article| {
        if cli.info {
            show_info(&article);
            Ok(())
        } else {
            convert(&cli, &article)
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "web2epub=warn" } else { "web2epub=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_article(cli: &Cli) -> Result<Article, String> {
    let raw = std::fs::read_to_string(&cli.input)
        .map_err(|e| format!("{}: {e}", cli.input.display()))?;

    let mut extracted = if is_json(&cli.input) {
        let json: ExtractedJson = serde_json::from_str(&raw)
            .map_err(|e| format!("{}: {e}", cli.input.display()))?;
        ExtractedArticle {
            title: json.title,
            byline: json.byline,
            content: json.content,
        }
    } else {
        ExtractedArticle {
            content: raw,
            ..Default::default()
        }
    };

    if let Some(title) = &cli.title {
        extracted.title = title.clone();
    }
    if let Some(author) = &cli.author {
        extracted.byline = Some(author.clone());
    }
    if extracted.title.trim().is_empty() {
        return Err("a title is required (use --title)".to_string());
    }

    debug!(input = %cli.input.display(), "loaded article");
    Ok(Article::from_extracted(extracted))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn show_info(article: &Article) {
    println!("Title: {}", article.title);
    println!("Byline: {}", article.byline);
    println!("Words: {}", article.word_count);
    println!("Reading time: {} min", article.reading_time);
}

fn convert(cli: &Cli, article: &Article) -> Result<(), String> {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(suggested_filename(&article.title)));

    let exporter = EpubExporter::new().with_config(EpubConfig {
        compression_level: cli.compression_level,
        identifier: cli.identifier.clone(),
    });
    let bytes = exporter.package(article).map_err(|e| e.to_string())?;
    std::fs::write(&output, &bytes).map_err(|e| format!("{}: {e}", output.display()))?;

    info!(
        "wrote {} ({} bytes, {} words)",
        output.display(),
        bytes.len(),
        article.word_count
    );
    Ok(())
}

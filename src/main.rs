//! CLI entry point: builds the exchange feeds and viewer pages in one run.
//!
//! With no arguments every exchange list is fetched from its published
//! location and the outputs land in the current directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use exchange_feeds::{
    atom::RunTimestamp, config::Config, fetch::BasicClient, pipeline, viewer::ViewerTemplate,
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "exchange_feeds")]
#[command(
    about = "Turn telephone exchange broadband lists into GeoRSS feeds and map pages",
    long_about = None
)]
struct Cli {
    /// Directory to write the .atom and .html files to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// HTML template for the viewer pages
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Exchange list location; "{slug}" is replaced by each list's slug
    #[arg(long)]
    sheet_url: Option<String>,

    /// Boundary lookup URL; an "{id}" query value is replaced by the exchange id
    #[arg(long)]
    bounds_url: Option<String>,

    /// Boundary requests in flight per list (1 = sequential)
    #[arg(short, long, default_value_t = 1)]
    concurrency: usize,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(path) = self.template {
            config.template_path = path;
        }
        if let Some(url) = self.sheet_url {
            config.sheet_url = url;
        }
        if let Some(url) = self.bounds_url {
            config.bounds_url = url;
        }
        config.concurrency = self.concurrency.max(1);
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/exchange_feeds.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("exchange_feeds.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let config = Cli::parse().apply(Config::from_env());
    info!(
        sheet_url = %config.sheet_url,
        bounds_url = %config.bounds_url,
        output_dir = %config.output_dir.display(),
        concurrency = config.concurrency,
        "Starting run"
    );

    let template = ViewerTemplate::load(&config.template_path)?;
    let updated = RunTimestamp::now();
    let client = BasicClient::new();

    let summary = pipeline::run(&client, &config, &template, updated).await?;
    for (slug, entries) in &summary.sources {
        info!(slug, entries, "Feed summary");
    }

    Ok(())
}

/// Filter from `var`, falling back to `default` when unset or invalid.
fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}

mod pipeline;

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use sd_core::Result;
use sd_deliver::TelegramSender;
use sd_extract::ArticleExtractor;
use sd_feeds::FeedScanner;
use sd_inference::create_model;
use tracing::info;

use pipeline::Pipeline;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File with one feed URL per line; blank lines are ignored
    #[arg(long, default_value = "feeds.txt")]
    feeds: PathBuf,

    /// Target day (YYYY-MM-DD); defaults to yesterday in local time
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Per-request timeout in seconds for feed and article fetches
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Retry budget for timed-out article fetches
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Model to use for summaries. Available models: hf (default), dummy
    #[arg(long, default_value = "hf")]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let feeds = load_feeds(&cli.feeds)?;
    let target = cli.date.unwrap_or_else(yesterday);
    info!("📅 Looking for posts published on {}", target);

    // Missing credentials are not checked here; the affected call fails
    // with the service's own authentication error.
    let token = std::env::var("TELEGRAM_TOKEN").unwrap_or_default();
    let chat_id = std::env::var("TELEGRAM_CHAT_ID").unwrap_or_default();
    let api_key = std::env::var("HUGGINGFACE_API_KEY").ok();

    let timeout = Duration::from_secs(cli.timeout);
    let model = create_model(&cli.model, api_key)?;
    info!("🧠 Inference model initialized (using {})", model.name());

    let pipeline = Pipeline {
        scanner: FeedScanner::new(timeout)?,
        extractor: ArticleExtractor::new(timeout, cli.retries)
            .map_err(|e| sd_core::Error::External(anyhow::Error::new(e)))?,
        model,
        sender: TelegramSender::new(token, chat_id),
    };

    pipeline.run(&feeds, target).await
}

fn load_feeds(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn yesterday() -> NaiveDate {
    Local::now().date_naive() - Days::new(1)
}

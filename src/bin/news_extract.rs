//! Command-line front end: fetch and extract articles, print JSON lines.
//!
//! ```sh
//! news-extract https://example.com/a https://example.com/b
//! curl -s https://example.com/a | news-extract --stdin --url https://example.com/a
//! RUST_LOG=news_extract=debug news-extract --min-words 50 https://example.com/a
//! ```

use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use news_extract::{
    ArticleResult, ExtractionRequest, Extractor, FetchOptions, Options, DEFAULT_USER_AGENT,
};

/// Extract article text and metadata from news pages.
///
/// Every flag can also be set through the environment variable shown.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Article URLs to fetch and extract
    #[arg(required_unless_present = "stdin")]
    urls: Vec<String>,

    /// Read markup from stdin instead of fetching
    #[arg(long, conflicts_with = "urls")]
    stdin: bool,

    /// Page URL of the markup read from stdin
    #[arg(long, env = "NEWS_EXTRACT_URL", default_value = "https://localhost/")]
    url: String,

    /// Fetch timeout in seconds
    #[arg(long, env = "NEWS_EXTRACT_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Minimum words for a usable article
    #[arg(long, env = "NEWS_EXTRACT_MIN_WORDS", default_value_t = 20)]
    min_words: usize,

    /// Maximum articles processed at once
    #[arg(long, env = "NEWS_EXTRACT_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// User agent sent with requests
    #[arg(long, env = "NEWS_EXTRACT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Favor recall over precision in the primary engine
    #[arg(long, env = "NEWS_EXTRACT_RECALL")]
    recall: bool,

    /// Authors to drop from metadata (repeatable)
    #[arg(long = "drop-author", env = "NEWS_EXTRACT_DROP_AUTHORS", value_delimiter = ',')]
    drop_authors: Vec<String>,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            min_word_count: self.min_words,
            favor_precision: !self.recall,
            author_blacklist: self.drop_authors.clone(),
            fetch: FetchOptions {
                timeout: Duration::from_secs(self.timeout),
                user_agent: self.user_agent.clone(),
                ..FetchOptions::default()
            },
            ..Options::default()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let cli = Cli::parse();

    let extractor = match Extractor::builder().options(cli.options()).build() {
        Ok(extractor) => extractor,
        Err(err) => {
            error!(error = %err, "could not set up the extractor");
            return ExitCode::FAILURE;
        }
    };

    let results = if cli.stdin {
        let mut markup = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut markup) {
            error!(error = %err, "could not read stdin");
            return ExitCode::FAILURE;
        }
        vec![(cli.url.clone(), extract_markup(&extractor, &cli.url, markup).await)]
    } else {
        info!(count = cli.urls.len(), concurrency = cli.concurrency, "extracting");
        extractor.extract_all(cli.urls.clone(), cli.concurrency).await
    };

    let mut failures = 0usize;
    let mut stdout = io::stdout().lock();
    for (url, result) in &results {
        if result.is_err() {
            failures += 1;
        }
        if let Err(err) = writeln!(stdout, "{}", render(url, result)) {
            error!(error = %err, "could not write output");
            return ExitCode::FAILURE;
        }
    }

    if failures == results.len() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn extract_markup(extractor: &Extractor, url: &str, markup: String) -> news_extract::Result<ArticleResult> {
    let request = ExtractionRequest::with_markup(url, markup)?;
    extractor.extract(&request).await
}

fn render(url: &str, result: &news_extract::Result<ArticleResult>) -> serde_json::Value {
    match result {
        Ok(article) => json!({ "url": url, "ok": true, "article": article }),
        Err(err) => json!({
            "url": url,
            "ok": false,
            "error": err.to_string(),
            "message": err.user_message(),
        }),
    }
}

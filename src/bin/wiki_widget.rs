//! Terminal front end for the Wikipedia search widget.
//!
//! Each stdin line is the full current query. Rendered output goes to
//! stdout; logs go to stderr.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use wiki_search::WikipediaClient;
use wiki_widget::{JsonPresenter, Session, TerminalPresenter, WidgetConfig};

/// Debounced Wikipedia search over stdin.
#[derive(Parser)]
#[command(name = "wiki-widget", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Quiet period before a query is searched, in milliseconds.
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Shortest query (in characters) that is searched.
    #[arg(long)]
    min_len: Option<usize>,

    /// MediaWiki API endpoint.
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Maximum hits requested per query.
    #[arg(long)]
    max_results: Option<usize>,

    /// Emit one JSON display state per line instead of text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Load the config file (explicit, default location, or built-in
    /// defaults) and apply flag overrides on top.
    fn load_config(&self) -> anyhow::Result<WidgetConfig> {
        let mut config = match &self.config {
            Some(path) => WidgetConfig::from_file(path)?,
            None => {
                let path = WidgetConfig::default_config_path();
                if path.exists() {
                    debug!(path = %path.display(), "loading default config");
                    WidgetConfig::from_file(&path)?
                } else {
                    WidgetConfig::default()
                }
            }
        };

        if let Some(ms) = self.debounce_ms {
            config.debounce_ms = ms;
        }
        if let Some(len) = self.min_len {
            config.min_query_len = len;
        }
        if let Some(endpoint) = &self.endpoint {
            config.search.endpoint.clone_from(endpoint);
        }
        if let Some(ms) = self.timeout_ms {
            config.search.timeout_ms = ms;
        }
        if let Some(n) = self.max_results {
            config.search.max_results = n;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wiki_widget=info,wiki_search=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.load_config()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(cli.json, config));
    // The stdin reader may still be parked in a blocking read.
    runtime.shutdown_background();
    result
}

async fn run(json: bool, config: WidgetConfig) -> anyhow::Result<()> {
    let client = Arc::new(WikipediaClient::new(&config.search)?);
    let endpoint = client.endpoint().to_owned();

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down...");
            cancel_clone.cancel();
        }
    });

    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(read_stdin(tx));

    if json {
        let session = Session::new(client, &config, JsonPresenter::new(std::io::stdout()));
        session.run(rx, cancel).await?;
    } else {
        let presenter = TerminalPresenter::new(std::io::stdout()).with_links(endpoint);
        let session = Session::new(client, &config, presenter);
        session.run(rx, cancel).await?;
    }

    Ok(())
}

/// Forward stdin lines until EOF. Dropping `tx` tells the session to drain.
async fn read_stdin(tx: mpsc::Sender<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(line).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "failed to read stdin");
                break;
            }
        }
    }
}

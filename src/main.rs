use anyhow::{Context, Result};
use clap::Parser;

use pagefeed::config::ServerConfig;
use pagefeed::fetch::USER_AGENT;
use pagefeed::server;

#[derive(Parser, Debug)]
#[command(name = "pagefeed", about = "Turn any HTML page into an RSS feed")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for request and pipeline logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = ServerConfig { port: args.port };

    // One pooled client for all requests, primary and content fetches alike
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;

    server::run(config, client).await
}

use anyhow::Result;
use axum::Router;
use clap::Parser;
use search_server::{build_app, load_index};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Documents to load at startup (JSON/JSONL file or directory)
    #[arg(long)]
    input: Option<String>,
    /// Stop words, space separated
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Maximum number of documents returned per query
    #[arg(long, default_value_t = 5)]
    top_k: usize,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let index = load_index(args.input.as_deref(), &args.stop_words, args.top_k)?;
    tracing::info!(documents = index.document_count(), "index ready");
    let app: Router = build_app(index);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search_core::input::load_into;
use search_core::{DocId, DocumentStatus, RequestQueue, ScoredDocument, SearchConfig, SearchIndex};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod paginate;

use paginate::paginate;

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Load documents into an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    /// Input path (JSON/JSONL file or directory)
    #[arg(long)]
    input: PathBuf,
    /// Stop words, space separated
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Maximum number of documents returned per query
    #[arg(long, default_value_t = 5)]
    top_k: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query and print the results page by page
    Search {
        #[arg(allow_hyphen_values = true)]
        query: String,
        /// Only documents with this status (actual, irrelevant, banned, removed)
        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
        /// Results per printed page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
    },
    /// Show which query words a document matches
    Match {
        #[arg(allow_hyphen_values = true)]
        query: String,
        #[arg(long, allow_hyphen_values = true)]
        id: DocId,
    },
    /// Read queries from stdin, one per line, then report empty-result requests
    Repl {
        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let stop_words: Vec<&str> = cli.stop_words.split(' ').collect();
    let config = SearchConfig::default().with_max_results(cli.top_k);
    let mut index = SearchIndex::with_config(stop_words, config).context("invalid stop words")?;
    let added = load_into(&mut index, &cli.input)?;
    tracing::info!(added, input = %cli.input.display(), "index ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Search { query, status, page_size } => {
            let found = index.find_top_documents_by_status(&query, status)?;
            print_pages(&mut out, &found, page_size)?;
        }
        Commands::Match { query, id } => {
            let (words, status) = index.match_document(&query, id)?;
            writeln!(out, "{{ document_id = {id}, status = {status}, words = [{}] }}", words.join(" "))?;
        }
        Commands::Repl { status } => run_repl(&index, status, io::stdin().lock(), &mut out)?,
    }
    Ok(())
}

fn print_pages<W: Write>(out: &mut W, found: &[ScoredDocument], page_size: usize) -> Result<()> {
    if found.is_empty() {
        writeln!(out, "No documents found")?;
        return Ok(());
    }
    for (n, page) in paginate(found, page_size).into_iter().enumerate() {
        writeln!(out, "Page {}", n + 1)?;
        for doc in page {
            writeln!(out, "{doc}")?;
        }
    }
    Ok(())
}

fn run_repl<R: BufRead, W: Write>(index: &SearchIndex, status: DocumentStatus, input: R, out: &mut W) -> Result<()> {
    let mut queue = RequestQueue::new();
    for line in input.lines() {
        let line = line?;
        match queue.add_find_request_by_status(index, &line, status) {
            Ok(found) if found.is_empty() => writeln!(out, "No documents found")?,
            Ok(found) => {
                for doc in &found {
                    writeln!(out, "{doc}")?;
                }
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        }
    }
    writeln!(out, "No-result requests: {}", queue.no_result_requests())?;
    Ok(())
}

//! peermatch — find companies similar to an ISIN's issuer.
//!
//! Thin shell over the library crates: config loading, tracing setup, and
//! the `init` / `search` / `vectordb` subcommands. The identity store and
//! the vector index must exist before `search` or `vectordb` run; both are
//! probed first.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use peermatch_core::config::MatcherConfig;
use peermatch_core::traits::IVectorIndex;
use peermatch_enrichment::{EnrichmentEngine, WikidataClient};
use peermatch_index::HttpVectorIndex;
use peermatch_matching::MatchingEngine;
use peermatch_storage::StorageEngine;

#[derive(Parser)]
#[command(name = "peermatch", version, about = "Find companies similar to an ISIN's issuer")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, env = "PEERMATCH_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the identity database schema.
    Init {
        /// Delete any existing database file first.
        #[arg(long)]
        recreate: bool,
    },
    /// Find the nearest peers for an instrument's issuer.
    Search {
        #[command(flatten)]
        selection: Selection,
        /// Number of neighbors to return.
        #[arg(long, default_value_t = 5)]
        top_k: usize,
        /// LEIs per batched knowledge-base request.
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Embed issuers into the vector index.
    Vectordb {
        #[command(flatten)]
        selection: Selection,
        /// LEIs per batched knowledge-base request.
        #[arg(long)]
        batch_size: Option<usize>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Selection {
    /// A single ISIN.
    #[arg(long)]
    isin: Option<String>,
    /// Comma-separated ISINs.
    #[arg(long, value_delimiter = ',')]
    isins: Option<Vec<String>>,
}

impl Selection {
    fn items(&self) -> Vec<String> {
        match (&self.isin, &self.isins) {
            (Some(one), _) => vec![one.clone()],
            (None, Some(many)) => many.clone(),
            (None, None) => Vec::new(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config =
        MatcherConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Init { recreate } => init(&config, recreate),
        Command::Search {
            selection,
            top_k,
            batch_size,
        } => {
            if let Some(size) = batch_size {
                config.enrichment.batch_size = size;
            }
            search(&config, &selection.items(), top_k)
        }
        Command::Vectordb {
            selection,
            batch_size,
        } => {
            if let Some(size) = batch_size {
                config.enrichment.batch_size = size;
            }
            vectordb(&config, &selection.items())
        }
    }
}

fn init(config: &MatcherConfig, recreate: bool) -> Result<()> {
    if recreate && config.db_path.exists() {
        fs::remove_file(&config.db_path)
            .with_context(|| format!("removing {}", config.db_path.display()))?;
    }
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    StorageEngine::open(&config.db_path).context("initializing identity database")?;
    println!("Initialized identity database at {}", config.db_path.display());
    Ok(())
}

/// Open the identity store, refusing to create it implicitly.
fn open_store(config: &MatcherConfig) -> Result<StorageEngine> {
    if !StorageEngine::probe(&config.db_path) {
        bail!(
            "identity database not initialized at {}; run `peermatch init` first",
            config.db_path.display()
        );
    }
    StorageEngine::open(&config.db_path).context("opening identity database")
}

/// Attach to the vector index and verify it is reachable.
fn open_index(config: &MatcherConfig) -> Result<HttpVectorIndex> {
    let index =
        HttpVectorIndex::connect(config.index.clone()).context("attaching to vector index")?;
    let count = index.count().context("probing vector index")?;
    tracing::debug!(count, "vector index reachable");
    Ok(index)
}

fn search(config: &MatcherConfig, raws: &[String], top_k: usize) -> Result<()> {
    let store = open_store(config)?;
    let index = open_index(config)?;
    let client = WikidataClient::new(config.enrichment.clone())?;
    let enrichment = EnrichmentEngine::new(&store, Box::new(client));
    let engine = MatchingEngine::new(&enrichment, &index);

    for raw in raws {
        let matches = engine
            .find_matches(raw, top_k)
            .with_context(|| format!("searching peers for {raw}"))?;
        println!("Peers for {raw}:");
        for (company, distance) in matches.companies.iter().zip(&matches.distances) {
            println!("  {company}, Distance: {distance:.4}");
        }
    }
    Ok(())
}

fn vectordb(config: &MatcherConfig, raws: &[String]) -> Result<()> {
    let store = open_store(config)?;
    let index = open_index(config)?;
    let client = WikidataClient::new(config.enrichment.clone())?;
    let enrichment = EnrichmentEngine::new(&store, Box::new(client));
    let engine = MatchingEngine::new(&enrichment, &index);

    let raw_refs: Vec<&str> = raws.iter().map(String::as_str).collect();
    let inserted = engine
        .insert_embeddings(&raw_refs)
        .context("inserting embeddings")?;
    println!("Stored embeddings for {inserted} identifiers");
    Ok(())
}

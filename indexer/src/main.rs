use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rpnsearch_core::collection::load_documents;
use rpnsearch_core::stats::{CollectionStatistics, PairSearch};
use rpnsearch_core::{BooleanRetrieval, InvertedIndex};
use tracing_subscriber::{fmt, EnvFilter};

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rpnsearch")]
#[command(about = "Boolean retrieval over a tagged document collection", long_about = None)]
struct Cli {
    /// Collection directory (or single file) of <DOC> records
    #[arg(long, global = true, default_value = "./collection")]
    collection: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and print sample posting lists
    Build {
        /// Terms to show, comma separated
        #[arg(long, value_delimiter = ',', default_value = "the,sanctions,african")]
        terms: Vec<String>,
        /// Maximum number of postings shown per term
        #[arg(long, default_value_t = 3)]
        show: usize,
    },
    /// Evaluate a file of postfix Boolean queries
    Query {
        /// One query per line, e.g. `iran israel AND`
        #[arg(long)]
        queries: PathBuf,
        /// Where to write one line of DOCNOs per query
        #[arg(long)]
        output: PathBuf,
        /// Also run this query and print its first results
        #[arg(long)]
        sample: Option<String>,
    },
    /// Write the collection statistics report
    Stats {
        #[arg(long)]
        output: PathBuf,
        /// How many terms to list at each end of the frequency ranking
        #[arg(long, default_value_t = 10)]
        top_n: usize,
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let index = build_index(&cli.collection)?;
    match cli.command {
        Commands::Build { terms, show } => print_terms(&index, &terms, show),
        Commands::Query { queries, output, sample } => {
            run_queries(&index, &queries, &output, sample.as_deref())
        }
        Commands::Stats { output, top_n, format } => write_stats(&index, &output, top_n, format),
    }
}

fn build_index(collection: &Path) -> Result<InvertedIndex> {
    let docs = load_documents(collection)
        .with_context(|| format!("failed to load collection {}", collection.display()))?;
    let index = InvertedIndex::from_documents(docs);
    tracing::info!(num_docs = index.num_documents(), num_terms = index.num_terms(), "index ready");
    Ok(index)
}

fn print_terms(index: &InvertedIndex, terms: &[String], show: usize) -> Result<()> {
    println!("Documents: {}  Terms: {}", index.num_documents(), index.num_terms());
    for term in terms {
        println!("{}", index.describe_term(term.trim(), Some(show)));
    }
    Ok(())
}

fn run_queries(
    index: &InvertedIndex,
    queries: &Path,
    output: &Path,
    sample: Option<&str>,
) -> Result<()> {
    let retrieval = BooleanRetrieval::new(index);
    let summary = retrieval
        .process_query_file(queries, output)
        .with_context(|| format!("failed to process queries from {}", queries.display()))?;
    println!("{} queries, results written to {}", summary.queries, output.display());

    if let Some(query) = sample {
        let doc_ids = retrieval.execute(query);
        let first = retrieval.to_docnos(&doc_ids[..doc_ids.len().min(5)]);
        println!("'{}': {} matching documents; first: {}", query, doc_ids.len(), first.join(" "));
    }
    Ok(())
}

fn write_stats(
    index: &InvertedIndex,
    output: &Path,
    top_n: usize,
    format: ReportFormat,
) -> Result<()> {
    let cfg = PairSearch::default();
    let report = CollectionStatistics::new(index).report(top_n, &cfg);
    let body = match format {
        ReportFormat::Text => report.render_text(&cfg),
        ReportFormat::Json => report.to_json().context("failed to serialize report")?,
    };
    fs::write(output, body).with_context(|| format!("failed to write {}", output.display()))?;
    println!("Statistics report written to {}", output.display());
    Ok(())
}

// Guzhu Search CLI Tool
// Loads a corpus directory and runs one lookup

use clap::Parser;
use guzhu::{distinct_sources, load_from_files, SearchMode, Session};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Gloss lookup - search a glossed character corpus by character or by
/// definition text, with optional variant-character expansion
#[derive(Parser, Debug)]
#[command(name = "guzhu-search")]
#[command(about = "Search a glossed character corpus", long_about = None)]
struct Args {
    /// Query: characters (forward mode) or definition text (reverse mode)
    #[arg(value_name = "QUERY")]
    query: String,

    /// Directory containing variants.json and the two dictionary partitions
    #[arg(short, long, default_value = "corpus")]
    data_dir: PathBuf,

    /// Search definitions instead of character keys
    #[arg(short = 'r', long)]
    reverse: bool,

    /// Expand the query through the variant-character table
    #[arg(short = 'v', long)]
    variants: bool,

    /// Restrict to these source titles (default: all)
    #[arg(short, long, value_name = "TITLE")]
    sources: Vec<String>,

    /// Maximum number of rows to display
    #[arg(short, long, default_value = "50")]
    limit: usize,

    /// Show the resolved equivalence class for each query character
    #[arg(long)]
    show_classes: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let bundle = load_from_files(&args.data_dir).await?;
    let mut session = Session::new();
    session.install(bundle.corpus, bundle.variants);

    if !args.sources.is_empty() {
        session.set_selected_sources(args.sources.iter().cloned());
    }

    let mode = if args.reverse {
        SearchMode::Reverse
    } else {
        SearchMode::Forward
    };

    if args.show_classes {
        if let Some(engine) = session.engine() {
            println!("Equivalence classes:");
            let classes = engine.equivalence_classes(&args.query, args.variants);
            for (ch, class) in args.query.trim().chars().zip(&classes) {
                println!("  {} → {}", ch, class.join(" / "));
            }
            println!();
        }
    }

    println!("Mode: {}", mode);
    let results = session.search(&args.query, mode, args.variants)?;

    if results.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    println!("Found {} matches:\n", results.len());
    for (idx, record) in results.iter().take(args.limit).enumerate() {
        println!(
            "{:>4}. {}  |  {}  [{}]",
            idx + 1,
            record.character,
            record.definition,
            record.source
        );
    }
    if results.len() > args.limit {
        println!("... {} more rows not shown", results.len() - args.limit);
    }

    let sources = distinct_sources(&results);
    println!("\nSources in this result set: {}", sources.join(", "));

    Ok(())
}

//! # Guzhu: Classical Gloss Lookup Engine
//!
//! A lookup engine over a fixed corpus of glossed character entries
//! (character → one or more {definition, source} records), with
//! variant-character equivalence expansion and source filtering.
//!
//! ## Two Search Modes
//!
//! 1. **Forward** - match the query (and its variant expansions) against
//!    the character keys of the index
//! 2. **Reverse** - match against the definition text of each entry
//!
//! ## Variant Expansion
//!
//! Each query character expands into its equivalence class (the union of
//! every variant group containing it), and the cartesian product of the
//! per-position classes becomes the concrete search patterns. The product
//! is bounded at 5000 combinations; larger queries are refused up front.
//!
//! ## Example Usage
//!
//! ```ignore
//! use guzhu::{load_from_files, SearchMode, Session};
//!
//! let bundle = load_from_files(std::path::Path::new("corpus")).await?;
//! let mut session = Session::new();
//! session.install(bundle.corpus, bundle.variants);
//!
//! // Forward lookup with variant expansion
//! let results = session.search("雲", SearchMode::Forward, true)?;
//!
//! // Reverse lookup over the glosses
//! let results = session.search("古文", SearchMode::Reverse, false)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **Corpus Builder** - concatenates the two dictionary partitions into
//!   the immutable entry index and the source inventory
//! - **Variant Resolver** - per-character equivalence classes
//! - **Pattern Generator** - bounded cartesian product of classes
//! - **Engine** - forward/reverse scans with dedup and corpus-order ranking
//! - **Session** - load lifecycle and the user's source selection
//! - **Loader** - concurrent three-file corpus acquisition

pub mod corpus;
pub mod highlight;
pub mod loader;
pub mod pattern;
pub mod search;
pub mod session;
pub mod types;
pub mod variants;

// Re-export main types and functions for convenience
pub use corpus::{Corpus, RawRecord, SourceInventory};
pub use highlight::Highlighter;
pub use loader::{load_from_files, load_from_urls, CorpusBundle};
pub use pattern::{possible_combination_count, PatternGenerator, COMBINATION_LIMIT};
pub use search::{distinct_sources, Engine};
pub use session::{LoadPhase, Session};
pub use types::{CorpusError, Entry, ResultRecord, SearchError, SearchMode};
pub use variants::VariantTable;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

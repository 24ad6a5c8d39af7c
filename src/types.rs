// Core type definitions
// Value types shared by the corpus builder, search engine and session layer

use thiserror::Error;

/// Search directions over the entry index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Match patterns against the character keys of the index
    /// Example: query "雲" finds every headword containing 雲 (or a variant)
    Forward,

    /// Match patterns against the definition text of each entry
    /// Example: query "古文" finds every gloss containing 古文
    Reverse,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Forward => write!(f, "Forward"),
            SearchMode::Reverse => write!(f, "Reverse"),
        }
    }
}

/// One gloss record stored under a character key in the index
///
/// The character itself is the index key, not repeated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Gloss text (may be empty in the raw corpus)
    pub definition: String,

    /// Title of the source work the gloss was taken from
    pub source: String,

    /// 0-based position in the concatenated raw corpus; the sole ordering key
    pub original_index: usize,
}

/// One match produced by a search, ready for presentation
///
/// Exactly one of `character`/`definition` carries highlight markup,
/// depending on the search mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// Character key, highlighted in forward mode
    pub character: String,

    /// Gloss text, highlighted in reverse mode
    pub definition: String,

    /// Source title, never annotated
    pub source: String,

    /// Corpus-order rank carried over from the matched [`Entry`]
    pub original_index: usize,
}

/// Value-compared deduplication key for one logical entry
///
/// Both text fields are taken pre-highlight so the same entry reached through
/// two different patterns collapses to one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub character: String,
    pub definition: String,
    pub source: String,
}

/// Search-time failures
///
/// All of these leave the index and the source selection untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("query is empty after trimming")]
    EmptyQuery,

    #[error("corpus is not loaded yet")]
    NotReady,

    #[error("variant expansion would produce {count} patterns, exceeding the limit of {limit}")]
    CombinationLimitExceeded { count: u64, limit: u64 },
}

/// Corpus acquisition and shape failures
///
/// Any of these fails the whole load; no partial index is ever exposed.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus file '{file}' is not a JSON array")]
    Format { file: String },

    #[error("fetching '{file}' returned status {status}")]
    Status { file: String, status: u16 },

    #[error("failed to fetch corpus file: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_mode_display() {
        assert_eq!(SearchMode::Forward.to_string(), "Forward");
        assert_eq!(SearchMode::Reverse.to_string(), "Reverse");
    }

    #[test]
    fn test_result_key_value_equality() {
        let a = ResultKey {
            character: "雲".to_string(),
            definition: "云也".to_string(),
            source: "說文".to_string(),
        };
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_combination_error_reports_count() {
        let err = SearchError::CombinationLimitExceeded {
            count: 5001,
            limit: 5000,
        };
        assert!(err.to_string().contains("5001"));
        assert!(err.to_string().contains("5000"));
    }
}

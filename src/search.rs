// Search engine
// Orchestrates variant expansion, pattern generation and index scanning

use crate::corpus::{Corpus, SourceInventory};
use crate::highlight::Highlighter;
use crate::pattern::{possible_combination_count, PatternGenerator, COMBINATION_LIMIT};
use crate::types::{ResultKey, ResultRecord, SearchError, SearchMode};
use crate::variants::VariantTable;
use rustc_hash::FxHashSet;

/// Immutable lookup engine over a loaded corpus
///
/// Holds the entry index and the variant table; every search runs
/// synchronously against them with only call-local scratch state, so repeated
/// identical calls produce identical ordered output.
pub struct Engine {
    corpus: Corpus,
    variants: VariantTable,
    highlighter: Highlighter,
}

impl Engine {
    pub fn new(corpus: Corpus, variants: VariantTable) -> Self {
        Self {
            corpus,
            variants,
            highlighter: Highlighter::default(),
        }
    }

    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn inventory(&self) -> &SourceInventory {
        self.corpus.inventory()
    }

    pub fn variants(&self) -> &VariantTable {
        &self.variants
    }

    /// Per-position equivalence classes for a query, for callers that want
    /// to show the expansion or pre-check the combination count.
    pub fn equivalence_classes(&self, query: &str, expand_variants: bool) -> Vec<Vec<String>> {
        self.variants.equivalence_classes(query.trim(), expand_variants)
    }

    /// Execute a search restricted to the selected sources.
    ///
    /// Results are deduplicated by (character, definition, source) and
    /// stably sorted by corpus order. An empty selection yields an empty
    /// list, not an error.
    pub fn search(
        &self,
        query: &str,
        mode: SearchMode,
        expand_variants: bool,
        selected_sources: &FxHashSet<String>,
    ) -> Result<Vec<ResultRecord>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let classes = self.variants.equivalence_classes(query, expand_variants);
        let count = possible_combination_count(&classes);
        if count > COMBINATION_LIMIT {
            return Err(SearchError::CombinationLimitExceeded {
                count,
                limit: COMBINATION_LIMIT,
            });
        }

        // Bounded above by COMBINATION_LIMIT, so materializing is fine
        let patterns: Vec<String> = PatternGenerator::new(&classes).collect();
        tracing::debug!(query, %mode, pattern_count = patterns.len(), "searching");

        let mut results = match mode {
            SearchMode::Forward => self.search_forward(&patterns, selected_sources),
            SearchMode::Reverse => self.search_reverse(&patterns, selected_sources),
        };

        // Stable sort; original_index is unique per entry today, but the
        // ordering contract must survive if that key is ever relaxed
        results.sort_by_key(|r| r.original_index);
        Ok(results)
    }

    /// Forward mode: match patterns against the character keys.
    ///
    /// The first pattern (in generator order) contained in a key wins and
    /// highlights that key for every eligible entry under it; later patterns
    /// are not tried against the same key.
    fn search_forward(
        &self,
        patterns: &[String],
        selected_sources: &FxHashSet<String>,
    ) -> Vec<ResultRecord> {
        let mut seen: FxHashSet<ResultKey> = FxHashSet::default();
        let mut results = Vec::new();

        for (key, entries) in self.corpus.iter() {
            let Some(pattern) = patterns.iter().find(|p| key.contains(p.as_str())) else {
                continue;
            };
            let highlighted_key = self.highlighter.apply(key, pattern);

            for entry in entries {
                if !selected_sources.contains(&entry.source) {
                    continue;
                }
                let dedup = ResultKey {
                    character: key.clone(),
                    definition: entry.definition.clone(),
                    source: entry.source.clone(),
                };
                if !seen.insert(dedup) {
                    continue;
                }
                results.push(ResultRecord {
                    character: highlighted_key.clone(),
                    definition: entry.definition.clone(),
                    source: entry.source.clone(),
                    original_index: entry.original_index,
                });
            }
        }
        results
    }

    /// Reverse mode: match patterns against each entry's definition text.
    ///
    /// Per entry, the first pattern contained in the definition wins and the
    /// scan stops for that entry.
    fn search_reverse(
        &self,
        patterns: &[String],
        selected_sources: &FxHashSet<String>,
    ) -> Vec<ResultRecord> {
        let mut seen: FxHashSet<ResultKey> = FxHashSet::default();
        let mut results = Vec::new();

        for (key, entries) in self.corpus.iter() {
            for entry in entries {
                if !selected_sources.contains(&entry.source) {
                    continue;
                }
                let Some(pattern) = patterns
                    .iter()
                    .find(|p| entry.definition.contains(p.as_str()))
                else {
                    continue;
                };
                let dedup = ResultKey {
                    character: key.clone(),
                    definition: entry.definition.clone(),
                    source: entry.source.clone(),
                };
                if !seen.insert(dedup) {
                    continue;
                }
                results.push(ResultRecord {
                    character: key.clone(),
                    definition: self.highlighter.apply(&entry.definition, pattern),
                    source: entry.source.clone(),
                    original_index: entry.original_index,
                });
            }
        }
        results
    }
}

/// Distinct source titles among a result set, in result order.
///
/// The presentation layer uses this to build its post-search filter controls.
pub fn distinct_sources(records: &[ResultRecord]) -> Vec<&str> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    records
        .iter()
        .filter(|r| seen.insert(r.source.as_str()))
        .map(|r| r.source.as_str())
        .collect()
}

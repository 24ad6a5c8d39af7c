// Corpus builder
// Turns the two raw dictionary partitions into the immutable entry index
// and the source inventory

use crate::types::{CorpusError, Entry};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

/// One record as it appears in the dictionary JSON files
///
/// All fields are optional in the wild; a record without a `character` is
/// dropped during the build.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub character: String,

    #[serde(default)]
    pub definition: String,

    /// Source work title; becomes `Entry::source`
    #[serde(default)]
    pub title: String,
}

/// Immutable character → entries mapping plus the observed sources
///
/// Built once at load time; read-only for the rest of the process.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    index: FxHashMap<String, Vec<Entry>>,
    inventory: SourceInventory,
}

impl Corpus {
    /// Build the index from the two partitions, part1 entirely before part2.
    ///
    /// `original_index` is the record's position in the raw concatenation.
    /// Records without a character still consume an index position (numbering
    /// reflects raw order, not post-filter order) but are not inserted.
    pub fn build(part1: Vec<RawRecord>, part2: Vec<RawRecord>) -> Self {
        let mut index: FxHashMap<String, Vec<Entry>> = FxHashMap::default();
        let mut inventory = SourceInventory::default();

        for (original_index, record) in part1.into_iter().chain(part2).enumerate() {
            if record.character.is_empty() {
                continue;
            }
            if !record.title.is_empty() {
                inventory.observe(&record.title);
            }
            index.entry(record.character).or_default().push(Entry {
                definition: record.definition,
                source: record.title,
                original_index,
            });
        }

        Self { index, inventory }
    }

    /// Iterate over (character key, entries) pairs, no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Entry>)> {
        self.index.iter()
    }

    /// Entries stored under one character key
    pub fn entries(&self, character: &str) -> Option<&Vec<Entry>> {
        self.index.get(character)
    }

    /// Number of distinct character keys
    pub fn key_count(&self) -> usize {
        self.index.len()
    }

    /// Total number of entries across all keys
    pub fn entry_count(&self) -> usize {
        self.index.values().map(|v| v.len()).sum()
    }

    pub fn inventory(&self) -> &SourceInventory {
        &self.inventory
    }
}

/// Parse one partition body, requiring a JSON array of records.
///
/// `file` is only used for the error message.
pub fn parse_partition(value: Value, file: &str) -> Result<Vec<RawRecord>, CorpusError> {
    if !value.is_array() {
        return Err(CorpusError::Format {
            file: file.to_string(),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Distinct source titles observed at build time, with entry counts
///
/// Used for presentation ordering and for seeding the default selection;
/// never consulted during matching itself.
#[derive(Debug, Clone, Default)]
pub struct SourceInventory {
    counts: FxHashMap<String, usize>,
}

impl SourceInventory {
    fn observe(&mut self, title: &str) {
        *self.counts.entry(title.to_string()).or_insert(0) += 1;
    }

    pub fn contains(&self, title: &str) -> bool {
        self.counts.contains_key(title)
    }

    /// Number of entries carrying the given title
    pub fn count(&self, title: &str) -> usize {
        self.counts.get(title).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All titles, unordered
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Titles in presentation order: entry count descending, then titles
    /// starting with a Han character before others, then lexicographic.
    pub fn titles_by_prevalence(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        titles.sort_by(|a, b| {
            self.count(b)
                .cmp(&self.count(a))
                .then_with(|| starts_with_han(b).cmp(&starts_with_han(a)))
                .then_with(|| a.cmp(b))
        });
        titles
    }
}

fn starts_with_han(title: &str) -> bool {
    title
        .chars()
        .next()
        .is_some_and(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(character: &str, definition: &str, title: &str) -> RawRecord {
        RawRecord {
            character: character.to_string(),
            definition: definition.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_build_concatenates_partitions_in_order() {
        let corpus = Corpus::build(
            vec![record("雲", "云也", "A")],
            vec![record("云", "雲之古文", "B")],
        );

        assert_eq!(corpus.entries("雲").unwrap()[0].original_index, 0);
        assert_eq!(corpus.entries("云").unwrap()[0].original_index, 1);
    }

    #[test]
    fn test_build_drops_characterless_records_but_keeps_numbering() {
        let corpus = Corpus::build(
            vec![record("", "orphan gloss", "A"), record("雲", "云也", "A")],
            vec![],
        );

        // The orphan consumed index 0; the kept record is index 1
        assert_eq!(corpus.key_count(), 1);
        assert_eq!(corpus.entries("雲").unwrap()[0].original_index, 1);
    }

    #[test]
    fn test_build_groups_entries_under_one_key() {
        let corpus = Corpus::build(
            vec![record("雲", "云也", "A"), record("雲", "山川气也", "B")],
            vec![],
        );

        assert_eq!(corpus.key_count(), 1);
        assert_eq!(corpus.entries("雲").unwrap().len(), 2);
        assert_eq!(corpus.entry_count(), 2);
    }

    #[test]
    fn test_inventory_counts() {
        let corpus = Corpus::build(
            vec![
                record("雲", "云也", "說文"),
                record("云", "雲之古文", "說文"),
                record("日", "實也", "釋名"),
            ],
            vec![],
        );

        let inv = corpus.inventory();
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.count("說文"), 2);
        assert_eq!(inv.count("釋名"), 1);
        assert!(!inv.contains("玉篇"));
    }

    #[test]
    fn test_inventory_ignores_untitled_records() {
        let corpus = Corpus::build(vec![record("雲", "云也", "")], vec![]);
        assert!(corpus.inventory().is_empty());
        // The entry itself is still indexed
        assert_eq!(corpus.entry_count(), 1);
    }

    #[test]
    fn test_titles_by_prevalence_order() {
        let corpus = Corpus::build(
            vec![
                record("一", "d1", "Latin"),
                record("二", "d2", "說文"),
                record("三", "d3", "說文"),
                record("四", "d4", "玉篇"),
            ],
            vec![],
        );

        // 說文 has the highest count; 玉篇 (Han) precedes Latin at equal count
        assert_eq!(
            corpus.inventory().titles_by_prevalence(),
            vec!["說文", "玉篇", "Latin"]
        );
    }

    #[test]
    fn test_parse_partition_accepts_array() {
        let value = json!([
            {"character": "雲", "definition": "云也", "title": "A"},
            {"definition": "no character", "title": "B"}
        ]);
        let records = parse_partition(value, "dictionary_part1.json").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].character, "雲");
        assert_eq!(records[1].character, "");
    }

    #[test]
    fn test_parse_partition_rejects_non_array() {
        let err = parse_partition(json!({"oops": true}), "dictionary_part1.json").unwrap_err();
        assert!(matches!(err, CorpusError::Format { .. }));
    }
}

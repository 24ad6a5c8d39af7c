// Variant-character resolution
// Expands a query character into its equivalence class of interchangeable forms

use crate::types::CorpusError;
use serde_json::Value;

/// Table of variant groups loaded from `variants.json`
///
/// Each group is an unordered set of interchangeable forms. Groups may
/// overlap; a character may appear in any number of groups. Members are kept
/// as strings because a form is not guaranteed to be a single code point.
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    groups: Vec<Vec<String>>,
}

impl VariantTable {
    pub fn new(groups: Vec<Vec<String>>) -> Self {
        Self { groups }
    }

    /// Parse the table body, requiring an array of arrays of strings.
    pub fn from_value(value: Value, file: &str) -> Result<Self, CorpusError> {
        if !value.is_array() {
            return Err(CorpusError::Format {
                file: file.to_string(),
            });
        }
        let groups: Vec<Vec<String>> = serde_json::from_value(value)?;
        Ok(Self { groups })
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Equivalence class of one character: the union of every group
    /// containing it, deduplicated in first-seen order. Falls back to the
    /// singleton class when no group matches.
    pub fn resolve(&self, ch: char) -> Vec<String> {
        let mut needle = [0u8; 4];
        let needle: &str = ch.encode_utf8(&mut needle);

        let mut class: Vec<String> = Vec::new();
        for group in &self.groups {
            if group.iter().any(|member| member == needle) {
                for member in group {
                    if !class.iter().any(|seen| seen == member) {
                        class.push(member.clone());
                    }
                }
            }
        }

        if class.is_empty() {
            class.push(needle.to_string());
        }
        class
    }

    /// One class per query code point, in query order.
    ///
    /// With expansion off every class is the singleton of its own character.
    pub fn equivalence_classes(&self, query: &str, expand: bool) -> Vec<Vec<String>> {
        query
            .chars()
            .map(|ch| {
                if expand {
                    self.resolve(ch)
                } else {
                    vec![ch.to_string()]
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> VariantTable {
        VariantTable::new(vec![
            vec!["雲".to_string(), "云".to_string()],
            vec!["云".to_string(), "員".to_string()],
            vec!["日".to_string(), "囸".to_string()],
        ])
    }

    #[test]
    fn test_resolve_single_group() {
        assert_eq!(table().resolve('雲'), vec!["雲", "云"]);
    }

    #[test]
    fn test_resolve_unions_overlapping_groups() {
        // 云 appears in two groups; the union keeps first-seen order
        assert_eq!(table().resolve('云'), vec!["雲", "云", "員"]);
    }

    #[test]
    fn test_resolve_unknown_is_singleton() {
        assert_eq!(table().resolve('月'), vec!["月"]);
    }

    #[test]
    fn test_classes_follow_query_order() {
        let classes = table().equivalence_classes("雲日", true);
        assert_eq!(classes, vec![vec!["雲", "云"], vec!["日", "囸"]]);
    }

    #[test]
    fn test_classes_without_expansion_are_singletons() {
        let classes = table().equivalence_classes("雲日", false);
        assert_eq!(classes, vec![vec!["雲"], vec!["日"]]);
    }

    #[test]
    fn test_from_value_accepts_nested_arrays() {
        let value = json!([["雲", "云"], ["日", "囸"]]);
        let table = VariantTable::from_value(value, "variants.json").unwrap();
        assert_eq!(table.group_count(), 2);
    }

    #[test]
    fn test_from_value_rejects_non_array() {
        let err = VariantTable::from_value(json!("nope"), "variants.json").unwrap_err();
        assert!(matches!(err, CorpusError::Format { .. }));
    }

    #[test]
    fn test_multi_code_point_member_survives_resolution() {
        let table = VariantTable::new(vec![vec!["云".to_string(), "云云".to_string()]]);
        assert_eq!(table.resolve('云'), vec!["云", "云云"]);
    }
}

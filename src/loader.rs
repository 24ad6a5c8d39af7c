// Corpus loader
// Fetches the three corpus files concurrently and builds the index
// atomically: either everything parses or nothing is installed

use crate::corpus::{parse_partition, Corpus};
use crate::types::CorpusError;
use crate::variants::VariantTable;
use serde_json::Value;
use std::path::Path;

/// File names inside a corpus directory or under a base URL
pub const VARIANTS_FILE: &str = "variants.json";
pub const DICT_PART1_FILE: &str = "dictionary_part1.json";
pub const DICT_PART2_FILE: &str = "dictionary_part2.json";

/// Everything a [`crate::session::Session`] needs to become ready
#[derive(Debug)]
pub struct CorpusBundle {
    pub variants: VariantTable,
    pub corpus: Corpus,
}

fn assemble(variants: Value, part1: Value, part2: Value) -> Result<CorpusBundle, CorpusError> {
    let variants = VariantTable::from_value(variants, VARIANTS_FILE)?;
    let part1 = parse_partition(part1, DICT_PART1_FILE)?;
    let part2 = parse_partition(part2, DICT_PART2_FILE)?;

    let corpus = Corpus::build(part1, part2);
    tracing::info!(
        keys = corpus.key_count(),
        entries = corpus.entry_count(),
        sources = corpus.inventory().len(),
        variant_groups = variants.group_count(),
        "corpus loaded"
    );
    Ok(CorpusBundle { variants, corpus })
}

/// Load the three corpus files from under `base_url` (joined with `/`).
///
/// The fetches run concurrently and join; any non-success status or
/// malformed body fails the whole load.
pub async fn load_from_urls(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<CorpusBundle, CorpusError> {
    let base = base_url.trim_end_matches('/');
    let (variants, part1, part2) = futures::try_join!(
        fetch_json(client, base, VARIANTS_FILE),
        fetch_json(client, base, DICT_PART1_FILE),
        fetch_json(client, base, DICT_PART2_FILE),
    )?;
    assemble(variants, part1, part2)
}

async fn fetch_json(
    client: &reqwest::Client,
    base: &str,
    file: &str,
) -> Result<Value, CorpusError> {
    let url = format!("{base}/{file}");
    tracing::debug!(%url, "fetching corpus file");
    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CorpusError::Status {
            file: file.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.json().await?)
}

/// Load the three corpus files from a local directory.
///
/// Same atomicity as the URL path; reads run concurrently.
pub async fn load_from_files(dir: &Path) -> Result<CorpusBundle, CorpusError> {
    let (variants, part1, part2) = futures::try_join!(
        read_json(dir, VARIANTS_FILE),
        read_json(dir, DICT_PART1_FILE),
        read_json(dir, DICT_PART2_FILE),
    )?;
    assemble(variants, part1, part2)
}

async fn read_json(dir: &Path, file: &str) -> Result<Value, CorpusError> {
    let path = dir.join(file);
    tracing::debug!(path = %path.display(), "reading corpus file");
    let bytes = tokio::fs::read(&path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assemble_builds_bundle() {
        let bundle = assemble(
            json!([["雲", "云"]]),
            json!([{"character": "雲", "definition": "云也", "title": "A"}]),
            json!([{"character": "云", "definition": "雲之古文", "title": "B"}]),
        )
        .unwrap();

        assert_eq!(bundle.corpus.key_count(), 2);
        assert_eq!(bundle.corpus.entry_count(), 2);
        assert_eq!(bundle.variants.group_count(), 1);
        // part2 records are numbered after part1
        assert_eq!(bundle.corpus.entries("云").unwrap()[0].original_index, 1);
    }

    #[test]
    fn test_assemble_rejects_non_array_partition() {
        let err = assemble(json!([]), json!({"not": "an array"}), json!([])).unwrap_err();
        assert!(matches!(err, CorpusError::Format { ref file } if file == DICT_PART1_FILE));
    }

    #[test]
    fn test_assemble_rejects_non_array_variants() {
        let err = assemble(json!(42), json!([]), json!([])).unwrap_err();
        assert!(matches!(err, CorpusError::Format { ref file } if file == VARIANTS_FILE));
    }
}

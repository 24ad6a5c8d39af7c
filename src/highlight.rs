// Highlight markup
// Wraps matched substrings for the presentation layer

/// Wraps occurrences of a matched pattern in open/close markers
#[derive(Debug, Clone)]
pub struct Highlighter {
    open: String,
    close: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new("<mark>", "</mark>")
    }
}

impl Highlighter {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    /// Return a copy of `text` with every non-overlapping occurrence of
    /// `needle` wrapped. The input is never mutated, so a field can only be
    /// annotated once per result record.
    pub fn apply(&self, text: &str, needle: &str) -> String {
        if needle.is_empty() {
            return text.to_string();
        }
        let wrapped = format!("{}{}{}", self.open, needle, self.close);
        text.replace(needle, &wrapped)
    }
}

//! Placeholder tag discovery.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{TemplateError, TemplateResult};

/// Placeholder syntax: `{{`, optional whitespace, a name made of ASCII
/// letters, `_` or `-`, optional whitespace, `}}`.
pub(crate) const TAG_PATTERN: &str = r"\{\{\s*([A-Za-z_-]+)\s*\}\}";

pub(crate) fn tag_regex() -> Regex {
    Regex::new(TAG_PATTERN).expect("placeholder pattern is a valid regex")
}

/// Finds the placeholder names referenced by a template.
pub struct TagExtractor {
    tag_pattern: Regex,
}

impl Default for TagExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TagExtractor {
    pub fn new() -> Self {
        Self {
            tag_pattern: tag_regex(),
        }
    }

    /// Unique tag names in `text`, whitespace inside the braces ignored.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        self.tag_pattern
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Read a template from disk and extract its tags.
    pub fn extract_file(&self, path: &Path) -> TemplateResult<BTreeSet<String>> {
        if !path.is_file() {
            return Err(TemplateError::NotFound(path.to_path_buf()));
        }

        let text = fs::read_to_string(path)?;
        let tags = self.extract(&text);
        debug!("Found {} tag(s) in {:?}", tags.len(), path);
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ignores_inner_whitespace() {
        let extractor = TagExtractor::new();
        let tags = extractor.extract("{{image_id}} {{  image_id }} {{\tcidr_ip\n}}");

        let expected: BTreeSet<String> = ["cidr_ip", "image_id"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_extract_accepts_hyphens_and_underscores() {
        let extractor = TagExtractor::new();
        let tags = extractor.extract(r#"{"Key": "{{ key-name }}", "Other": "{{ _private }}"}"#);

        assert!(tags.contains("key-name"));
        assert!(tags.contains("_private"));
    }

    #[test]
    fn test_extract_skips_non_tags() {
        let extractor = TagExtractor::new();
        let tags = extractor.extract("{ single } {{ has space }} {{ digit1 }} {{}}");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_extract_file_missing() {
        let extractor = TagExtractor::new();
        let err = extractor
            .extract_file(Path::new("definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }
}

use serde_json::Value;

use crate::article::NewArticle;
use crate::{Error, Result};

/// A parsed import payload: a JSON list of article objects.
///
/// Parsing validates only the document shape. Entries convert to
/// [`NewArticle`] one at a time, so a caller can insert the valid
/// leading entries and stop at the first bad one. Entries after the
/// first bad one are never looked at.
#[derive(Debug)]
pub struct ImportDocument {
    entries: Vec<Value>,
}

impl ImportDocument {
    /// Parse raw JSON bytes into an import document
    pub fn parse(data: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(data)
            .map_err(|e| Error::Import(format!("Invalid JSON format: {e}")))?;

        match value {
            Value::Array(entries) => Ok(Self { entries }),
            _ => Err(Error::Import(
                "JSON content must be a list of articles".to_string(),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert entries in document order, one `Result` per entry
    pub fn articles(&self) -> impl Iterator<Item = Result<NewArticle>> + '_ {
        self.entries.iter().map(entry_article)
    }
}

fn entry_article(entry: &Value) -> Result<NewArticle> {
    let title = string_field(entry, "title");
    let content = string_field(entry, "content");
    let tags = string_field(entry, "tags");

    match (title, content, tags) {
        (Some(title), Some(content), Some(tags)) => Ok(NewArticle {
            title,
            content,
            tags,
        }),
        _ => Err(Error::Import("Missing fields in some articles".to_string())),
    }
}

/// Present, a string, and non-empty. Anything else counts as missing.
fn string_field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_list() {
        let data = br#"[
            {"title": "One", "content": "First", "tags": "a,b"},
            {"title": "Two", "content": "Second", "tags": "c"}
        ]"#;
        let doc = ImportDocument::parse(data).unwrap();
        assert_eq!(doc.len(), 2);

        let articles: Vec<_> = doc.articles().collect();
        assert_eq!(articles[0].as_ref().unwrap().title, "One");
        assert_eq!(articles[1].as_ref().unwrap().tags, "c");
    }

    #[test]
    fn test_parse_rejects_non_list() {
        let err = ImportDocument::parse(br#"{"title": "One"}"#).unwrap_err();
        assert!(err.to_string().contains("must be a list"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = ImportDocument::parse(b"not json").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON format"));
    }

    #[test]
    fn test_entries_before_bad_one_still_convert() {
        let data = br#"[
            {"title": "Good", "content": "ok", "tags": "t"},
            {"title": "", "content": "ok", "tags": "t"},
            {"title": "Never checked", "content": "ok", "tags": "t"}
        ]"#;
        let doc = ImportDocument::parse(data).unwrap();
        let mut articles = doc.articles();

        assert!(articles.next().unwrap().is_ok());
        assert!(articles.next().unwrap().is_err());
    }

    #[test]
    fn test_missing_and_non_string_fields_are_invalid() {
        let data = br#"[
            {"content": "no title", "tags": "t"},
            {"title": 42, "content": "numeric title", "tags": "t"}
        ]"#;
        let doc = ImportDocument::parse(data).unwrap();
        for entry in doc.articles() {
            assert!(entry.is_err());
        }
    }
}

use serde::{Deserialize, Serialize};

/// A stored article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Comma-separated tag text, stored as written
    pub tags: String,
}

/// Data required to create a new article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub tags: String,
}

impl Article {
    /// Get a preview of the content (first N characters)
    pub fn content_preview(&self, max_len: usize) -> String {
        let text = self.content.as_str();

        if max_len == 0 {
            return String::new();
        }

        if text.len() <= max_len {
            text.to_string()
        } else {
            let mut end = 0;
            for (idx, ch) in text.char_indices() {
                let next = idx + ch.len_utf8();
                if next > max_len {
                    break;
                }
                end = next;
            }
            format!("{}...", &text[..end])
        }
    }

    /// Split the stored tag text into individual tags
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

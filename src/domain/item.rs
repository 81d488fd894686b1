use serde::{Deserialize, Serialize};

/// One normalized article summary, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    /// May be empty when the entry carried no link.
    pub link: String,
    pub source: String,
}

impl NewsItem {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        link: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            link: link.into(),
            source: source.into(),
        }
    }

    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }
}

/// A feed entry as extracted from a parsed document, before normalization.
///
/// Every field is optional; [`RawEntry::body`] encodes which field wins when
/// an entry carries more than one candidate for the body text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl RawEntry {
    /// Summary first, then description, then empty.
    pub fn body(&self) -> &str {
        self.summary
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("")
    }
}

/// A parsed feed document: feed-level title plus its entries.
#[derive(Debug, Clone, Default)]
pub struct RawFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

impl RawFeed {
    /// Feed title when present and non-blank, otherwise the source URL.
    pub fn source_label<'a>(&'a self, url: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_prefers_summary() {
        let entry = RawEntry {
            summary: Some("Short summary".into()),
            description: Some("Long description".into()),
            ..Default::default()
        };
        assert_eq!(entry.body(), "Short summary");
    }

    #[test]
    fn test_body_falls_back_to_description() {
        let entry = RawEntry {
            description: Some("Long description".into()),
            ..Default::default()
        };
        assert_eq!(entry.body(), "Long description");
    }

    #[test]
    fn test_body_empty_when_neither() {
        let entry = RawEntry::default();
        assert_eq!(entry.body(), "");
    }

    #[test]
    fn test_source_label_uses_feed_title() {
        let feed = RawFeed {
            title: Some("World News".into()),
            entries: Vec::new(),
        };
        assert_eq!(feed.source_label("https://example.com/rss"), "World News");
    }

    #[test]
    fn test_source_label_falls_back_to_url() {
        let feed = RawFeed::default();
        assert_eq!(
            feed.source_label("https://example.com/rss"),
            "https://example.com/rss"
        );
    }

    #[test]
    fn test_has_link() {
        assert!(NewsItem::new("t", "s", "https://example.com", "src").has_link());
        assert!(!NewsItem::new("t", "s", "", "src").has_link());
    }
}

use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{Result, TickerError};
use crate::domain::{NewsItem, RawEntry, RawFeed};

/// Convert feed markup into display text.
///
/// Entities are decoded first, then `<br>`, `<br/>` and `<br />` (any case)
/// become newlines, every remaining `<...>` tag is dropped and the result is
/// trimmed. Never fails; an unterminated `<` is kept as literal text.
pub fn clean_html(raw: &str) -> String {
    let decoded = decode_html_entities(raw);
    let with_breaks = replace_line_breaks(&decoded);
    strip_tags(&with_breaks).trim().to_string()
}

fn replace_line_breaks(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' {
            if let Some(end) = line_break_end(bytes, i) {
                out.push_str(&text[copied..i]);
                out.push('\n');
                i = end;
                copied = end;
                continue;
            }
        }
        i += 1;
    }

    out.push_str(&text[copied..]);
    out
}

/// If a line-break tag starts at `start`, the byte index just past its `>`.
fn line_break_end(bytes: &[u8], start: usize) -> Option<usize> {
    let name = bytes.get(start + 1..start + 3)?;
    if !name.eq_ignore_ascii_case(b"br") {
        return None;
    }

    let mut i = start + 3;
    while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
        i += 1;
    }
    if bytes.get(i) == Some(&b'/') {
        i += 1;
    }
    (bytes.get(i) == Some(&b'>')).then_some(i + 1)
}

fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            // `<>` is not a tag
            Some(0) => {
                out.push('<');
                rest = after;
            }
            Some(close) => rest = &after[close + 1..],
            None => {
                out.push('<');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse an RSS/Atom/JSON Feed document into raw entries.
    pub fn parse(&self, body: &[u8]) -> Result<RawFeed> {
        let feed = parser::parse(body).map_err(|e| TickerError::FeedParse(e.to_string()))?;

        let entries = feed
            .entries
            .into_iter()
            .map(|entry| RawEntry {
                title: entry.title.map(|t| t.content),
                summary: entry.summary.map(|s| s.content),
                description: entry.content.and_then(|c| c.body),
                link: entry.links.into_iter().next().map(|l| l.href),
            })
            .collect();

        Ok(RawFeed {
            title: feed.title.map(|t| t.content),
            entries,
        })
    }

    /// Turn a parsed feed into display-ready items labelled with its source.
    pub fn normalize(&self, source_url: &str, feed: &RawFeed) -> Vec<NewsItem> {
        let source = clean_html(feed.source_label(source_url));

        feed.entries
            .iter()
            .map(|entry| NewsItem {
                title: clean_html(entry.title.as_deref().unwrap_or("")),
                summary: clean_html(entry.body()),
                link: entry.link.clone().unwrap_or_default(),
                source: source.clone(),
            })
            .collect()
    }
}

use std::collections::HashSet;

use url::Url;

/// Separator inserted between research sessions in the artifact.
pub const SESSION_SEPARATOR: &str = "\n\n---\n\n";

/// The cumulative markdown document produced across research sessions.
///
/// The buffer is append-only while a stream is active. A session boundary
/// inserts [`SESSION_SEPARATOR`] before new content is appended to prior
/// content; the first session starts on an empty buffer with no separator.
#[derive(Debug, Clone, Default)]
pub struct Artifact {
    content: String,
}

impl Artifact {
    /// Creates an empty artifact.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Marks a session boundary.
    ///
    /// Inserts the separator only when prior content exists, so a fresh
    /// document never starts with one.
    pub fn begin_session(&mut self) {
        if !self.content.is_empty() {
            self.content.push_str(SESSION_SEPARATOR);
        }
    }

    /// Appends streamed text in arrival order. No reordering, no dedup.
    pub fn append(&mut self, text: &str) {
        self.content.push_str(text);
    }
}

/// A web source the provider used to substantiate generated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

impl Citation {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }

    /// Hostname for compact display, falling back to the raw uri when it
    /// does not parse as a URL.
    pub fn hostname(&self) -> String {
        Url::parse(&self.uri)
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned))
            .unwrap_or_else(|| self.uri.clone())
    }
}

/// Deduplicated, insertion-ordered collection of citations.
///
/// Keyed by uri equality: the first citation for a uri wins, later ones are
/// dropped, so merging is idempotent and first-appearance order is stable.
#[derive(Debug, Clone, Default)]
pub struct SourceList {
    items: Vec<Citation>,
    seen: HashSet<String>,
}

impl SourceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Citation> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Citation] {
        &self.items
    }

    pub fn contains_uri(&self, uri: &str) -> bool {
        self.seen.contains(uri)
    }

    /// Merges citations, dropping any whose uri is already present.
    ///
    /// Returns how many citations were actually added.
    pub fn merge<I>(&mut self, citations: I) -> usize
    where
        I: IntoIterator<Item = Citation>,
    {
        let mut added = 0;
        for citation in citations {
            if self.seen.insert(citation.uri.clone()) {
                self.items.push(citation);
                added += 1;
            }
        }
        added
    }
}

impl<'a> IntoIterator for &'a SourceList {
    type Item = &'a Citation;
    type IntoIter = std::slice::Iter<'a, Citation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

//! The content document model.

use std::path::PathBuf;

use crate::frontmatter::FrontMatter;

/// A single authored or generated content document.
///
/// # Slug Convention
///
/// `segments` holds the URL slug segments derived from the source path with
/// ordering prefixes and the locale suffix stripped. Index documents
/// (`index.md`, `index.mdx`) map to their directory's URL, so a root
/// `index.mdx` has no segments at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Source path relative to the content root.
    pub source_path: PathBuf,
    /// URL slug segments after marker stripping.
    pub segments: Vec<String>,
    /// True for `index.*` files bound to their directory's URL.
    pub is_index: bool,
    /// Explicit locale from the filename suffix; `None` for locale-neutral
    /// documents.
    pub locale: Option<String>,
    /// Parsed front matter.
    pub front: FrontMatter,
    /// Document body with the front matter block removed. Opaque to the
    /// resolver.
    pub body: String,
}

impl Document {
    /// Resolved display title.
    ///
    /// Precedence: front matter `title`, first `#` heading in the body,
    /// humanized last slug segment (`"Index"` for a root index document).
    #[must_use]
    pub fn title(&self) -> String {
        if let Some(title) = &self.front.title {
            return title.clone();
        }
        if let Some(h1) = first_heading(&self.body) {
            return h1.to_owned();
        }
        match self.segments.last() {
            Some(segment) => humanize(segment),
            None => "Index".to_owned(),
        }
    }

    /// Explicit sibling ordering hint, if any.
    #[must_use]
    pub fn order(&self) -> Option<i64> {
        self.front.order
    }
}

/// Extract the first level-1 heading from a markdown body.
fn first_heading(body: &str) -> Option<&str> {
    body.lines().find_map(|line| {
        let rest = line.strip_prefix("# ")?;
        let title = rest.trim();
        (!title.is_empty()).then_some(title)
    })
}

/// Title-case a slug segment: `"setup-guide"` becomes `"Setup Guide"`.
fn humanize(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

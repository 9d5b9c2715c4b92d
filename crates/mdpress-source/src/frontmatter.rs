//! YAML front matter support.
//!
//! Front matter is a YAML block delimited by `---` lines at the top of a
//! content document:
//!
//! ```text
//! ---
//! title: Getting Started
//! description: First steps
//! order: 2
//! ---
//! Body text...
//! ```
//!
//! All fields are optional; a document without a front matter block parses
//! to [`FrontMatter::default`].

use serde::{Deserialize, Serialize};

/// Front matter metadata of a content document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Page title. Overrides H1 extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page description for navigation and search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Explicit ordering hint among siblings. Lower values sort first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    /// Icon identifier, resolved by the rendering layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Request full-width layout. Set on generated API reference pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<bool>,
}

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// Opening `---` without a closing delimiter.
    #[error("Unterminated front matter block")]
    Unterminated,
    /// Malformed YAML inside the block.
    #[error("Invalid front matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a document into front matter and body.
///
/// Returns default front matter and the full content when no block is
/// present. The returned body excludes the delimiter lines.
///
/// # Errors
///
/// Returns [`FrontMatterError`] if the block is unterminated or the YAML
/// is malformed.
pub fn split_front_matter(content: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let Some(rest) = content.strip_prefix("---\n").or_else(|| {
        content.strip_prefix("---\r\n")
    }) else {
        return Ok((FrontMatter::default(), content));
    };

    // Closing delimiter is a line containing exactly `---`.
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let front = if yaml.trim().is_empty() {
                FrontMatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((front, body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

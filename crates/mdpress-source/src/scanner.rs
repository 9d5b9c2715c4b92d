//! Document discovery by filesystem walking.
//!
//! The scanner walks a content directory, identifies `.md`/`.mdx` files,
//! strips slug markers, and parses front matter into [`Document`] values.
//! Results are sorted by source path, so a scan is deterministic regardless
//! of filesystem enumeration order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use mdpress_config::LocaleSet;

use crate::document::Document;
use crate::frontmatter::{FrontMatterError, split_front_matter};
use crate::slug::{split_locale, split_order_prefix};

/// Error returned when scanning fails.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// I/O error reading a directory or file.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed front matter in a content document.
    #[error("Front matter error in {}: {source}", path.display())]
    FrontMatter {
        /// Source file relative to the content root.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: FrontMatterError,
    },
}

/// Result of a content scan.
#[derive(Debug, Default)]
pub struct ContentSet {
    /// All content documents, sorted by source path.
    pub documents: Vec<Document>,
    /// Ordering prefixes found on directory names, keyed by slug segments.
    /// Carried separately because a directory may have no index document
    /// of its own.
    pub folder_orders: BTreeMap<Vec<String>, i64>,
}

/// Discovers content documents under a source directory.
///
/// Skips hidden files (leading `.`) and underscore-prefixed partials, in
/// both file and directory positions. A missing source directory scans to
/// an empty document set.
pub struct Scanner {
    source_dir: PathBuf,
    locales: LocaleSet,
}

impl Scanner {
    /// Create a new scanner.
    ///
    /// The locale set decides which filename suffixes count as locale
    /// markers during slug derivation.
    #[must_use]
    pub fn new(source_dir: PathBuf, locales: LocaleSet) -> Self {
        Self {
            source_dir,
            locales,
        }
    }

    /// Scan the content tree and return all documents plus folder
    /// ordering hints.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] on unreadable entries or malformed front
    /// matter. Scanning never writes to the content tree.
    pub fn scan(&self) -> Result<ContentSet, ScanError> {
        let mut content = ContentSet::default();
        if self.source_dir.exists() {
            self.scan_directory(&self.source_dir, Path::new(""), &[], &mut content)?;
        }
        content
            .documents
            .sort_by(|a, b| a.source_path.cmp(&b.source_path));
        Ok(content)
    }

    fn scan_directory(
        &self,
        dir: &Path,
        rel_dir: &Path,
        segments: &[String],
        content: &mut ContentSet,
    ) -> Result<(), ScanError> {
        let entries = fs::read_dir(dir).map_err(|source| ScanError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut names: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.file_name())
            .collect();
        names.sort();

        for name in names {
            let name_str = name.to_string_lossy();
            if name_str.starts_with('.') || name_str.starts_with('_') {
                continue;
            }

            let path = dir.join(&name);
            let rel_path = rel_dir.join(&name);

            if path.is_dir() {
                let (order, stripped) = split_order_prefix(&name_str);
                let mut child_segments = segments.to_vec();
                child_segments.push(stripped.to_owned());
                if let Some(order) = order {
                    content.folder_orders.insert(child_segments.clone(), order);
                }
                self.scan_directory(&path, &rel_path, &child_segments, content)?;
            } else if let Some(document) = self.build_document(&path, &rel_path, segments)? {
                content.documents.push(document);
            }
        }

        Ok(())
    }

    /// Build a [`Document`] from a single file, or `None` for non-content
    /// files.
    fn build_document(
        &self,
        path: &Path,
        rel_path: &Path,
        segments: &[String],
    ) -> Result<Option<Document>, ScanError> {
        let Some(ext) = path.extension().map(|e| e.to_string_lossy()) else {
            return Ok(None);
        };
        if ext != "md" && ext != "mdx" {
            return Ok(None);
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (stem, locale) = split_locale(&stem, &self.locales);

        let content = fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (mut front, body) =
            split_front_matter(&content).map_err(|source| ScanError::FrontMatter {
                path: rel_path.to_path_buf(),
                source,
            })?;

        let (prefix_order, stripped) = split_order_prefix(stem);
        // Front matter order wins over the filename prefix.
        front.order = front.order.or(prefix_order);

        let is_index = stripped == "index";
        let mut doc_segments = segments.to_vec();
        if !is_index {
            doc_segments.push(stripped.to_owned());
        }

        Ok(Some(Document {
            source_path: rel_path.to_path_buf(),
            segments: doc_segments,
            is_index,
            locale: locale.map(str::to_owned),
            front,
            body: body.to_owned(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn locales() -> LocaleSet {
        LocaleSet {
            locales: vec!["en".to_owned(), "zh".to_owned()],
            ..LocaleSet::default()
        }
    }

    fn scan(root: &Path) -> ContentSet {
        Scanner::new(root.to_path_buf(), locales()).scan().unwrap()
    }

    fn scan_docs(root: &Path) -> Vec<Document> {
        scan(root).documents
    }

    #[test]
    fn test_missing_dir_scans_empty() {
        let temp = tempfile::tempdir().unwrap();

        let docs = scan_docs(&temp.path().join("nonexistent"));

        assert!(docs.is_empty());
    }

    #[test]
    fn test_flat_files_become_documents() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("guide.mdx"), "# Guide\n").unwrap();
        fs::write(temp.path().join("api.md"), "# API\n").unwrap();

        let docs = scan_docs(temp.path());

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].segments, vec!["api".to_owned()]);
        assert_eq!(docs[1].segments, vec!["guide".to_owned()]);
    }

    #[test]
    fn test_index_binds_to_directory_url() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("guides");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("index.mdx"), "# Guides\n").unwrap();

        let docs = scan_docs(temp.path());

        assert_eq!(docs.len(), 1);
        assert!(docs[0].is_index);
        assert_eq!(docs[0].segments, vec!["guides".to_owned()]);
    }

    #[test]
    fn test_root_index_has_no_segments() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("index.mdx"), "# Home\n").unwrap();

        let docs = scan_docs(temp.path());

        assert_eq!(docs.len(), 1);
        assert!(docs[0].is_index);
        assert!(docs[0].segments.is_empty());
    }

    #[test]
    fn test_order_prefix_stripped_and_recorded() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("02-setup.mdx"), "# Setup\n").unwrap();

        let docs = scan_docs(temp.path());

        assert_eq!(docs[0].segments, vec!["setup".to_owned()]);
        assert_eq!(docs[0].front.order, Some(2));
    }

    #[test]
    fn test_front_matter_order_wins_over_prefix() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join("02-setup.mdx"),
            "---\norder: 7\n---\n# Setup\n",
        )
        .unwrap();

        let docs = scan_docs(temp.path());

        assert_eq!(docs[0].front.order, Some(7));
    }

    #[test]
    fn test_directory_order_prefix_stripped_from_segments() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("01-guides");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("setup.mdx"), "# Setup\n").unwrap();

        let docs = scan_docs(temp.path());

        assert_eq!(
            docs[0].segments,
            vec!["guides".to_owned(), "setup".to_owned()]
        );
    }

    #[test]
    fn test_locale_suffix_stripped() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("guide.zh.mdx"), "# 指南\n").unwrap();
        fs::write(temp.path().join("guide.mdx"), "# Guide\n").unwrap();

        let docs = scan_docs(temp.path());

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].locale, None);
        assert_eq!(docs[1].locale, Some("zh".to_owned()));
        assert_eq!(docs[0].segments, docs[1].segments);
    }

    #[test]
    fn test_localized_index() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("index.zh.mdx"), "# 首页\n").unwrap();

        let docs = scan_docs(temp.path());

        assert!(docs[0].is_index);
        assert_eq!(docs[0].locale, Some("zh".to_owned()));
        assert!(docs[0].segments.is_empty());
    }

    #[test]
    fn test_skips_hidden_and_underscore_entries() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join(".draft.mdx"), "# Draft\n").unwrap();
        fs::write(temp.path().join("_partial.mdx"), "# Partial\n").unwrap();
        fs::create_dir(temp.path().join("_snippets")).unwrap();
        fs::write(temp.path().join("_snippets/a.mdx"), "# A\n").unwrap();
        fs::write(temp.path().join("visible.mdx"), "# Visible\n").unwrap();

        let docs = scan_docs(temp.path());

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].segments, vec!["visible".to_owned()]);
    }

    #[test]
    fn test_skips_non_content_files() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("data.json"), "{}").unwrap();
        fs::write(temp.path().join("notes.txt"), "notes").unwrap();
        fs::write(temp.path().join("page.mdx"), "# Page\n").unwrap();

        let docs = scan_docs(temp.path());

        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_malformed_front_matter_is_error() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("bad.mdx"), "---\ntitle: [oops\n---\n").unwrap();

        let result = Scanner::new(temp.path().to_path_buf(), locales()).scan();

        assert!(matches!(result, Err(ScanError::FrontMatter { .. })));
    }

    #[test]
    fn test_scan_is_sorted_by_source_path() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("zebra.mdx"), "# Z\n").unwrap();
        fs::write(temp.path().join("alpha.mdx"), "# A\n").unwrap();
        let dir = temp.path().join("middle");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("page.mdx"), "# M\n").unwrap();

        let docs = scan_docs(temp.path());

        let paths: Vec<_> = docs.iter().map(|d| d.source_path.clone()).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn test_directory_order_prefix_recorded() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("01-zebra");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("page.mdx"), "# Page\n").unwrap();

        let content = scan(temp.path());

        assert_eq!(
            content.folder_orders.get(["zebra".to_owned()].as_slice()),
            Some(&1)
        );
        assert_eq!(
            content.documents[0].segments,
            vec!["zebra".to_owned(), "page".to_owned()]
        );
    }

    #[test]
    fn test_index_with_order_prefix_binds_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("guides");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("01-index.mdx"), "# Guides\n").unwrap();

        let docs = scan_docs(temp.path());

        assert!(docs[0].is_index);
        assert_eq!(docs[0].segments, vec!["guides".to_owned()]);
        assert_eq!(docs[0].front.order, Some(1));
    }
}

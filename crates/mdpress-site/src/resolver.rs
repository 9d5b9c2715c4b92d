//! The content resolver.
//!
//! [`ResolverContext`] is a pure projection from a scanned document set and
//! a locale configuration to per-locale page trees plus a locale-aware URL
//! lookup. It is built once per build pass and holds no hidden state; pass
//! it to every lookup call.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use mdpress_config::{LocaleSet, NeutralPolicy};
use mdpress_source::{ContentSet, Document};

use crate::tree::{Page, PageTree, PageTreeBuilder};

/// Fatal resolution error. All variants are configuration errors surfaced
/// at build time; none are recoverable at lookup time.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Two documents in the same locale strip to the same URL.
    #[error(
        "Duplicate slug {url} in locale '{locale}': {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateSlug {
        /// Conflicting URL.
        url: String,
        /// Locale in which the conflict occurs.
        locale: String,
        /// First document claiming the URL.
        first: PathBuf,
        /// Second document claiming the URL.
        second: PathBuf,
    },
    /// A localized document has no default-locale counterpart, so the
    /// fallback chain cannot guarantee a resolvable URL in every locale.
    #[error("Document {url} exists in locale '{locale}' but not in the default locale")]
    MissingDefaultDocument {
        /// URL missing from the default locale.
        url: String,
        /// Locale that provides the only variant.
        locale: String,
    },
    /// The designated default locale is not in the locale list.
    #[error("Default locale '{locale}' is not in the configured locale set")]
    DefaultLocaleNotConfigured {
        /// The offending default locale.
        locale: String,
    },
}

/// A document bound to a URL during tree construction.
struct Binding<'a> {
    doc: &'a Document,
    /// True when the binding came from a locale-neutral document under the
    /// all-locales policy; explicit translations shadow it.
    neutral: bool,
}

/// Locale-aware URL resolver and page-tree forest.
///
/// Built with [`ResolverContext::build`]; lookups never touch the
/// filesystem.
pub struct ResolverContext {
    base_url: String,
    locales: LocaleSet,
    trees: HashMap<String, PageTree>,
}

impl ResolverContext {
    /// Build the resolver from a scanned content set.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] on duplicate post-strip slugs within a
    /// locale, when a localized document lacks a default-locale
    /// counterpart, or when the default locale is not in the locale list.
    pub fn build(
        base_url: &str,
        locales: &LocaleSet,
        content: &ContentSet,
    ) -> Result<Self, ResolveError> {
        if !locales.contains(&locales.default) {
            return Err(ResolveError::DefaultLocaleNotConfigured {
                locale: locales.default.clone(),
            });
        }

        let mut trees = HashMap::new();
        for locale in &locales.locales {
            let tree = build_locale_tree(base_url, locales, locale, content)?;
            tracing::debug!(locale, pages = tree.pages().len(), "built page tree");
            trees.insert(locale.clone(), tree);
        }

        let context = Self {
            base_url: base_url.to_owned(),
            locales: locales.clone(),
            trees,
        };
        context.check_default_coverage()?;
        Ok(context)
    }

    /// Look up a document page by URL and locale.
    ///
    /// Falls back to the default locale's page at the same URL when the
    /// requested locale has none. Returns `None` when neither exists — the
    /// not-found outcome is a value, not an error. Folder pages without a
    /// bound document do not satisfy a lookup.
    #[must_use]
    pub fn get(&self, url: &str, locale: &str) -> Option<&Page> {
        if let Some(page) = document_page(self.trees.get(locale), url) {
            return Some(page);
        }
        if locale != self.locales.default {
            return document_page(self.trees.get(&self.locales.default), url);
        }
        None
    }

    /// Page tree for one locale.
    #[must_use]
    pub fn tree(&self, locale: &str) -> Option<&PageTree> {
        self.trees.get(locale)
    }

    /// Site URL prefix.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured locale set.
    #[must_use]
    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Verify every localized URL also resolves in the default locale.
    fn check_default_coverage(&self) -> Result<(), ResolveError> {
        let default_tree = &self.trees[&self.locales.default];
        for (locale, tree) in &self.trees {
            if locale == &self.locales.default {
                continue;
            }
            for page in tree.pages() {
                if page.source_path.is_some()
                    && default_tree.get(&page.url).is_none_or(|p| p.source_path.is_none())
                {
                    return Err(ResolveError::MissingDefaultDocument {
                        url: page.url.clone(),
                        locale: locale.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Page bound to a document at `url`; bare folder nodes do not count.
fn document_page<'a>(tree: Option<&'a PageTree>, url: &str) -> Option<&'a Page> {
    tree.and_then(|t| t.get(url)).filter(|p| p.source_path.is_some())
}

/// True when `doc` is visible in `locale` under the configured neutral
/// policy.
fn visible_in_locale(doc: &Document, locales: &LocaleSet, locale: &str) -> bool {
    match &doc.locale {
        Some(explicit) => explicit == locale,
        None => match locales.neutral {
            NeutralPolicy::DefaultLocale => locale == locales.default,
            NeutralPolicy::AllLocales => true,
        },
    }
}

fn resolve_url(base_url: &str, segments: &[String]) -> String {
    if segments.is_empty() {
        base_url.to_owned()
    } else {
        format!("{base_url}/{}", segments.join("/"))
    }
}

/// Build the page tree for one locale.
///
/// Documents bind to URLs first (duplicates are fatal, explicit
/// translations shadow neutral documents), then folder nodes materialize
/// for every intermediate directory level, parents before children.
fn build_locale_tree(
    base_url: &str,
    locales: &LocaleSet,
    locale: &str,
    content: &ContentSet,
) -> Result<PageTree, ResolveError> {
    // Keyed by slug segments; BTreeMap iteration gives prefixes before
    // extensions, so parents are always built first.
    let mut bindings: BTreeMap<Vec<String>, Binding<'_>> = BTreeMap::new();

    for doc in &content.documents {
        if !visible_in_locale(doc, locales, locale) {
            continue;
        }
        let neutral = doc.locale.is_none() && locales.neutral == NeutralPolicy::AllLocales;

        match bindings.entry(doc.segments.clone()) {
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(Binding { doc, neutral });
            }
            std::collections::btree_map::Entry::Occupied(mut entry) => {
                let existing = entry.get();
                // An explicit translation shadows the neutral variant.
                if existing.neutral && !neutral {
                    entry.insert(Binding { doc, neutral });
                } else if existing.neutral == neutral {
                    return Err(ResolveError::DuplicateSlug {
                        url: resolve_url(base_url, &doc.segments),
                        locale: locale.to_owned(),
                        first: existing.doc.source_path.clone(),
                        second: doc.source_path.clone(),
                    });
                }
                // Neutral arriving after explicit: keep the explicit one.
            }
        }
    }

    // Materialize folder levels that have no document of their own.
    let folders: BTreeSet<Vec<String>> = bindings
        .keys()
        .flat_map(|segments| (0..segments.len()).map(|n| segments[..n].to_vec()))
        .filter(|prefix| !prefix.is_empty() && !bindings.contains_key(prefix))
        .collect();

    let mut builder = PageTreeBuilder::new();
    let mut url_to_idx: HashMap<String, usize> = HashMap::new();

    let mut keys: Vec<&Vec<String>> = bindings.keys().chain(folders.iter()).collect();
    keys.sort();

    for segments in keys {
        let url = resolve_url(base_url, segments);
        let parent_idx = find_parent(base_url, segments, &url_to_idx);
        // Directory name prefixes order folders that carry no order of
        // their own.
        let folder_order = content.folder_orders.get(segments.as_slice()).copied();

        let page = match bindings.get(segments) {
            Some(binding) => Page {
                title: binding.doc.title(),
                url: url.clone(),
                order: binding.doc.order().or(folder_order),
                source_path: Some(binding.doc.source_path.clone()),
            },
            None => Page {
                title: humanize_segment(segments.last().map_or("", String::as_str)),
                url: url.clone(),
                order: folder_order,
                source_path: None,
            },
        };

        let idx = builder.add_page(page, parent_idx);
        url_to_idx.insert(url, idx);
    }

    Ok(builder.build())
}

/// Find the nearest existing ancestor for a slug path.
fn find_parent(
    base_url: &str,
    segments: &[String],
    url_to_idx: &HashMap<String, usize>,
) -> Option<usize> {
    for n in (0..segments.len()).rev() {
        let url = resolve_url(base_url, &segments[..n]);
        if let Some(&idx) = url_to_idx.get(&url) {
            return Some(idx);
        }
    }
    None
}

/// Title-case a slug segment for folders without a bound document.
fn humanize_segment(segment: &str) -> String {
    segment
        .split('-')
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

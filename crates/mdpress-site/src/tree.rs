//! Page tree for one locale.
//!
//! Pages are stored in a flat `Vec<Page>` with parent/children relationships
//! tracked by indices. This provides:
//! - O(1) URL lookups via the `url_index` `HashMap`
//! - O(d) breadcrumb building where d is the page depth
//!
//! A page is a folder when it has children; folders may still bind an index
//! document. Sibling order is fixed at build time: explicit `order` values
//! ascending first, then lexicographic URL order for unordered pages.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

/// Navigation item with children for UI trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Resolved URL (with the site base prefix).
    pub url: String,
    /// Child navigation items, in sibling order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Breadcrumb navigation item.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Resolved URL.
    pub url: String,
}

/// A single node of the page tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Display title.
    pub title: String,
    /// Resolved URL (with the site base prefix).
    pub url: String,
    /// Explicit sibling ordering hint. `None` sorts after ordered siblings.
    pub order: Option<i64>,
    /// Bound content document, relative to the content root. `None` for
    /// folders materialized purely from directory nesting.
    pub source_path: Option<PathBuf>,
}

/// Page tree for one locale with O(1) URL lookups.
pub struct PageTree {
    pages: Vec<Page>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
    url_index: HashMap<String, usize>,
}

impl PageTree {
    /// Get a page by its resolved URL.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&Page> {
        self.url_index.get(url).map(|&i| &self.pages[i])
    }

    /// True if the page at `url` has children.
    #[must_use]
    pub fn is_folder(&self, url: &str) -> bool {
        self.url_index
            .get(url)
            .is_some_and(|&i| !self.children[i].is_empty())
    }

    /// All pages, in depth-first sibling order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages bound to a content document.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.pages.iter().filter(|p| p.source_path.is_some()).count()
    }

    /// Ordered children of the page at `url`.
    #[must_use]
    pub fn children_of(&self, url: &str) -> Vec<&Page> {
        self.url_index
            .get(url)
            .map(|&i| self.children[i].iter().map(|&j| &self.pages[j]).collect())
            .unwrap_or_default()
    }

    /// Root pages in sibling order.
    #[must_use]
    pub fn roots(&self) -> Vec<&Page> {
        self.roots.iter().map(|&i| &self.pages[i]).collect()
    }

    /// Navigation forest for the sidebar renderer.
    ///
    /// When a root index page exists its children form the top level, so
    /// the home page itself does not appear in its own sidebar. Without a
    /// root index, all root pages form the top level.
    #[must_use]
    pub fn navigation(&self, base_url: &str) -> Vec<NavItem> {
        let top: Vec<usize> = match self.url_index.get(base_url) {
            Some(&root) => self.children[root].clone(),
            None => self.roots.clone(),
        };
        top.iter().map(|&i| self.build_nav_item(i)).collect()
    }

    fn build_nav_item(&self, idx: usize) -> NavItem {
        NavItem {
            title: self.pages[idx].title.clone(),
            url: self.pages[idx].url.clone(),
            children: self.children[idx]
                .iter()
                .map(|&j| self.build_nav_item(j))
                .collect(),
        }
    }

    /// Breadcrumbs for the page at `url`: ancestors root-first, excluding
    /// the page itself. Unknown URLs yield no breadcrumbs.
    #[must_use]
    pub fn breadcrumbs(&self, url: &str) -> Vec<BreadcrumbItem> {
        let Some(&idx) = self.url_index.get(url) else {
            return Vec::new();
        };

        let mut ancestors = Vec::new();
        let mut current = self.parents[idx];
        while let Some(i) = current {
            ancestors.push(BreadcrumbItem {
                title: self.pages[i].title.clone(),
                url: self.pages[i].url.clone(),
            });
            current = self.parents[i];
        }
        ancestors.reverse();
        ancestors
    }
}

/// Builder for [`PageTree`] instances.
///
/// Pages must be added parents-first; `build` fixes sibling order and
/// freezes the URL index.
pub(crate) struct PageTreeBuilder {
    pages: Vec<Page>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
}

impl PageTreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            pages: Vec::new(),
            children: Vec::new(),
            parents: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Add a page under `parent_idx` and return its index.
    pub(crate) fn add_page(&mut self, page: Page, parent_idx: Option<usize>) -> usize {
        let idx = self.pages.len();
        self.pages.push(page);
        self.children.push(Vec::new());
        self.parents.push(parent_idx);

        if let Some(parent) = parent_idx {
            self.children[parent].push(idx);
        } else {
            self.roots.push(idx);
        }
        idx
    }

    pub(crate) fn build(mut self) -> PageTree {
        // Deterministic sibling order: explicit `order` ascending, then
        // lexicographic URL. Independent of insertion order.
        let sort_key = |pages: &[Page], &i: &usize| {
            (pages[i].order.unwrap_or(i64::MAX), pages[i].url.clone())
        };
        for list in &mut self.children {
            list.sort_by_key(|i| sort_key(&self.pages, i));
        }
        self.roots.sort_by_key(|i| sort_key(&self.pages, i));

        let url_index = self
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| (page.url.clone(), i))
            .collect();

        PageTree {
            pages: self.pages,
            children: self.children,
            parents: self.parents,
            roots: self.roots,
            url_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(title: &str, url: &str, order: Option<i64>) -> Page {
        Page {
            title: title.to_owned(),
            url: url.to_owned(),
            order,
            source_path: Some(PathBuf::from(format!("{title}.mdx"))),
        }
    }

    #[test]
    fn test_get_by_url() {
        let mut builder = PageTreeBuilder::new();
        builder.add_page(page("Guide", "/docs/guide", None), None);
        let tree = builder.build();

        assert_eq!(tree.get("/docs/guide").unwrap().title, "Guide");
        assert!(tree.get("/docs/missing").is_none());
    }

    #[test]
    fn test_children_sorted_by_explicit_order() {
        let mut builder = PageTreeBuilder::new();
        let root = builder.add_page(page("Root", "/docs", None), None);
        builder.add_page(page("C", "/docs/c", Some(3)), Some(root));
        builder.add_page(page("A", "/docs/a", Some(1)), Some(root));
        builder.add_page(page("B", "/docs/b", Some(2)), Some(root));
        let tree = builder.build();

        let urls: Vec<_> = tree.children_of("/docs").iter().map(|p| p.url.clone()).collect();
        assert_eq!(urls, vec!["/docs/a", "/docs/b", "/docs/c"]);
    }

    #[test]
    fn test_ordered_pages_precede_unordered() {
        let mut builder = PageTreeBuilder::new();
        let root = builder.add_page(page("Root", "/docs", None), None);
        builder.add_page(page("Alpha", "/docs/alpha", None), Some(root));
        builder.add_page(page("Zeta", "/docs/zeta", Some(1)), Some(root));
        let tree = builder.build();

        let urls: Vec<_> = tree.children_of("/docs").iter().map(|p| p.url.clone()).collect();
        assert_eq!(urls, vec!["/docs/zeta", "/docs/alpha"]);
    }

    #[test]
    fn test_unordered_pages_sort_lexicographically() {
        let mut builder = PageTreeBuilder::new();
        let root = builder.add_page(page("Root", "/docs", None), None);
        builder.add_page(page("Zeta", "/docs/zeta", None), Some(root));
        builder.add_page(page("Alpha", "/docs/alpha", None), Some(root));
        let tree = builder.build();

        let urls: Vec<_> = tree.children_of("/docs").iter().map(|p| p.url.clone()).collect();
        assert_eq!(urls, vec!["/docs/alpha", "/docs/zeta"]);
    }

    #[test]
    fn test_is_folder() {
        let mut builder = PageTreeBuilder::new();
        let root = builder.add_page(page("Root", "/docs", None), None);
        builder.add_page(page("Leaf", "/docs/leaf", None), Some(root));
        let tree = builder.build();

        assert!(tree.is_folder("/docs"));
        assert!(!tree.is_folder("/docs/leaf"));
    }

    #[test]
    fn test_navigation_excludes_root_index() {
        let mut builder = PageTreeBuilder::new();
        let root = builder.add_page(page("Home", "/docs", None), None);
        builder.add_page(page("Guide", "/docs/guide", None), Some(root));
        let tree = builder.build();

        let nav = tree.navigation("/docs");

        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].title, "Guide");
    }

    #[test]
    fn test_navigation_without_root_index_uses_roots() {
        let mut builder = PageTreeBuilder::new();
        builder.add_page(page("Guide", "/docs/guide", None), None);
        builder.add_page(page("API", "/docs/api", None), None);
        let tree = builder.build();

        let nav = tree.navigation("/docs");

        assert_eq!(nav.len(), 2);
    }

    #[test]
    fn test_navigation_nests_children() {
        let mut builder = PageTreeBuilder::new();
        let folder = builder.add_page(page("Guides", "/docs/guides", None), None);
        builder.add_page(page("Setup", "/docs/guides/setup", None), Some(folder));
        let tree = builder.build();

        let nav = tree.navigation("/docs");

        assert_eq!(nav[0].children.len(), 1);
        assert_eq!(nav[0].children[0].url, "/docs/guides/setup");
    }

    #[test]
    fn test_nav_item_serialization_skips_empty_children() {
        let item = NavItem {
            title: "Guide".to_owned(),
            url: "/docs/guide".to_owned(),
            children: Vec::new(),
        };

        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["title"], "Guide");
        assert!(json.get("children").is_none());
    }

    #[test]
    fn test_breadcrumbs_root_first() {
        let mut builder = PageTreeBuilder::new();
        let root = builder.add_page(page("Home", "/docs", None), None);
        let guides = builder.add_page(page("Guides", "/docs/guides", None), Some(root));
        builder.add_page(page("Setup", "/docs/guides/setup", None), Some(guides));
        let tree = builder.build();

        let crumbs = tree.breadcrumbs("/docs/guides/setup");

        assert_eq!(crumbs.len(), 2);
        assert_eq!(crumbs[0].title, "Home");
        assert_eq!(crumbs[1].title, "Guides");
    }

    #[test]
    fn test_breadcrumbs_unknown_url_empty() {
        let tree = PageTreeBuilder::new().build();

        assert!(tree.breadcrumbs("/docs/missing").is_empty());
    }

    #[test]
    fn test_document_count_ignores_bare_folders() {
        let mut builder = PageTreeBuilder::new();
        let folder = builder.add_page(
            Page {
                title: "Guides".to_owned(),
                url: "/docs/guides".to_owned(),
                order: None,
                source_path: None,
            },
            None,
        );
        builder.add_page(page("Setup", "/docs/guides/setup", None), Some(folder));
        let tree = builder.build();

        assert_eq!(tree.document_count(), 1);
        assert_eq!(tree.pages().len(), 2);
    }
}

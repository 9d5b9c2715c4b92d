//! Content resolver for mdpress.
//!
//! Turns a scanned document set and a locale configuration into per-locale
//! page trees with a locale-aware URL lookup. Resolution is a pure
//! projection: no side effects, rebuilt wholesale on any content change.
//!
//! # Example
//!
//! ```ignore
//! use mdpress_config::Config;
//! use mdpress_site::ResolverContext;
//! use mdpress_source::Scanner;
//!
//! let config = Config::load(std::path::Path::new("."))?;
//! let scanner = Scanner::new(
//!     config.content_resolved.source_dir.clone(),
//!     config.i18n.clone(),
//! );
//! let content = scanner.scan()?;
//! let resolver = ResolverContext::build(&config.site.base_url, &config.i18n, &content)?;
//!
//! let page = resolver.get("/docs/guide", "zh");
//! let nav = resolver.tree("en").unwrap().navigation(resolver.base_url());
//! ```

mod resolver;
mod tree;

pub use resolver::{ResolveError, ResolverContext};
pub use tree::{BreadcrumbItem, NavItem, Page, PageTree};

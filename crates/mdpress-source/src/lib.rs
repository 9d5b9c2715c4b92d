//! Content documents and filesystem scanning for mdpress.
//!
//! A content tree is a directory of `.md`/`.mdx` files with optional YAML
//! front matter. File and directory names may carry ordering prefixes
//! (`01-intro.mdx`) and files may carry a locale suffix (`intro.zh.mdx`);
//! both are stripped when deriving URL slugs.
//!
//! Scanning is a pure read: the scanner never mutates the content tree.

mod document;
mod frontmatter;
mod scanner;
mod slug;

pub use document::Document;
pub use frontmatter::{FrontMatter, FrontMatterError, split_front_matter};
pub use scanner::{ContentSet, ScanError, Scanner};
pub use slug::{slugify, split_locale, split_order_prefix};

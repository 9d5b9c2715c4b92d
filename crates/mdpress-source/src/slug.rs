//! Slug derivation helpers.
//!
//! File and directory names carry two kinds of markers that never appear in
//! URLs: numeric ordering prefixes (`01-intro`) and locale suffixes
//! (`intro.zh`). Both are stripped per path segment; directory nesting maps
//! to URL path nesting unchanged.

use mdpress_config::LocaleSet;

/// Split a numeric ordering prefix off a path segment.
///
/// `"01-intro"` yields `(Some(1), "intro")`; segments without a prefix are
/// returned unchanged. A bare number (`"01"`) is not a prefix.
#[must_use]
pub fn split_order_prefix(segment: &str) -> (Option<i64>, &str) {
    let Some((digits, rest)) = segment.split_once('-') else {
        return (None, segment);
    };
    if digits.is_empty() || rest.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (None, segment);
    }
    match digits.parse() {
        Ok(order) => (Some(order), rest),
        Err(_) => (None, segment),
    }
}

/// Split a locale suffix off a file stem.
///
/// `"intro.zh"` yields `("intro", Some("zh"))` when `zh` is a configured
/// locale. Unknown suffixes are left in place, so `notes.v2` stays a
/// single slug segment.
#[must_use]
pub fn split_locale<'a>(stem: &'a str, locales: &LocaleSet) -> (&'a str, Option<&'a str>) {
    if let Some((base, suffix)) = stem.rsplit_once('.')
        && !base.is_empty()
        && locales.contains(suffix)
    {
        return (base, Some(suffix));
    }
    (stem, None)
}

/// Turn arbitrary text into a URL slug segment.
///
/// Lowercases ASCII, maps runs of non-alphanumeric characters to single
/// hyphens, and trims leading/trailing hyphens.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

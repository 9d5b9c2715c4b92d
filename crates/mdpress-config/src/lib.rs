//! Configuration management for mdpress.
//!
//! Parses `mdpress.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The configuration owns three concerns:
//!
//! - content settings (`[content]`): where the document tree lives,
//! - the locale set (`[i18n]`): supported locales, the default locale, and
//!   the visibility policy for locale-neutral documents,
//! - navigation chrome (`[[links]]`): a plain ordered list of link
//!   descriptors interpreted by the rendering layer. mdpress only parses
//!   and validates them.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpress.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Locale configuration.
    pub i18n: LocaleSet,
    /// Navigation chrome links, in display order.
    #[serde(rename = "links")]
    pub links: Vec<LinkDescriptor>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site-wide settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title shown in the navigation header.
    pub title: String,
    /// URL prefix for all resolved documentation pages.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            base_url: "/docs".to_owned(),
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    api_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default, Clone)]
pub struct ContentConfig {
    /// Source directory for content documents.
    pub source_dir: PathBuf,
    /// Destination subtree for generated API reference pages,
    /// relative to `source_dir`.
    pub api_dir: PathBuf,
}

/// Visibility policy for documents without an explicit locale segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeutralPolicy {
    /// Neutral documents belong to the default locale; other locales reach
    /// them through lookup fallback only.
    #[default]
    DefaultLocale,
    /// Neutral documents appear in every locale's page tree unless shadowed
    /// by an explicit translation at the same URL.
    AllLocales,
}

/// Ordered locale set with a designated default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleSet {
    /// Supported locale identifiers, in display order.
    pub locales: Vec<String>,
    /// Default locale. Must be a member of `locales`.
    pub default: String,
    /// Policy for locale-neutral documents.
    pub neutral: NeutralPolicy,
}

impl Default for LocaleSet {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_owned()],
            default: "en".to_owned(),
            neutral: NeutralPolicy::DefaultLocale,
        }
    }
}

impl LocaleSet {
    /// Check whether an identifier names a supported locale.
    #[must_use]
    pub fn contains(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// Validate the locale set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the set is empty, contains
    /// duplicates, or the default locale is not a member.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales cannot be empty".to_owned(),
            ));
        }
        for (i, locale) in self.locales.iter().enumerate() {
            if locale.is_empty() {
                return Err(ConfigError::Validation(
                    "i18n.locales entries cannot be empty".to_owned(),
                ));
            }
            if self.locales[..i].contains(locale) {
                return Err(ConfigError::Validation(format!(
                    "duplicate locale '{locale}' in i18n.locales"
                )));
            }
        }
        if !self.contains(&self.default) {
            return Err(ConfigError::Validation(format!(
                "i18n.default '{}' is not listed in i18n.locales",
                self.default
            )));
        }
        Ok(())
    }
}

/// Kind of a navigation chrome link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    /// Plain text link.
    Link,
    /// Icon-only link with accessible label.
    Icon,
    /// Dropdown menu of nested links.
    Menu,
}

/// A single navigation chrome link descriptor.
///
/// Pure data: the rendering layer decides how each kind is displayed and
/// which icon asset `icon` refers to.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkDescriptor {
    /// Link kind.
    pub kind: LinkKind,
    /// Accessible label.
    pub label: String,
    /// Display text.
    #[serde(default)]
    pub text: Option<String>,
    /// Link target. Required for `link` and `icon` kinds.
    #[serde(default)]
    pub url: Option<String>,
    /// Icon identifier, resolved by the rendering layer.
    #[serde(default)]
    pub icon: Option<String>,
    /// Nested links for `menu` kind.
    #[serde(default)]
    pub items: Vec<LinkDescriptor>,
}

impl LinkDescriptor {
    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        require_non_empty(&self.label, &format!("links[{index}].label"))?;
        match self.kind {
            LinkKind::Menu => {
                if self.items.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "links[{index}] is a menu but has no items"
                    )));
                }
                for item in &self.items {
                    item.validate(index)?;
                }
            }
            LinkKind::Link | LinkKind::Icon => {
                let url = self.url.as_deref().unwrap_or_default();
                require_non_empty(url, &format!("links[{index}].url"))?;
            }
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Create a default config with paths resolved against a base directory.
    #[must_use]
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            content: ContentConfigRaw::default(),
            i18n: LocaleSet::default(),
            links: Vec::new(),
            content_resolved: ContentConfig {
                source_dir: base.join("content"),
                api_dir: PathBuf::from("api-reference"),
            },
            config_path: None,
        }
    }

    /// Load configuration by searching for `mdpress.toml` in `start_dir`
    /// and its parent directories.
    ///
    /// Falls back to defaults (resolved against `start_dir`) when no config
    /// file exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a found file cannot be read, parsed, or
    /// validated.
    pub fn load(start_dir: &Path) -> Result<Self, ConfigError> {
        match Self::find_config_file(start_dir) {
            Some(path) => Self::load_from(&path),
            None => {
                let config = Self::default_with_base(start_dir);
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load configuration from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, invalid
    /// TOML, or fails validation.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.content_resolved = ContentConfig {
            source_dir: base.join(config.content.source_dir.as_deref().unwrap_or("content")),
            api_dir: PathBuf::from(config.content.api_dir.as_deref().unwrap_or("api-reference")),
        };
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        Ok(config)
    }

    /// Walk up from `start_dir` looking for a config file.
    #[must_use]
    fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = Some(start_dir);
        while let Some(current) = dir {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            dir = current.parent();
        }
        None
    }

    /// Validate the full configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.base_url, "site.base_url")?;
        if !self.site.base_url.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base_url must start with '/': {}",
                self.site.base_url
            )));
        }
        self.i18n.validate()?;
        for (i, link) in self.links.iter().enumerate() {
            link.validate(i)?;
        }
        Ok(())
    }
}

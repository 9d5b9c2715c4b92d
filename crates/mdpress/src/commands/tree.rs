//! `mdpress tree` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpress_config::Config;
use mdpress_site::{NavItem, ResolverContext};
use mdpress_source::Scanner;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Path to configuration file (default: auto-discover mdpress.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Locale to print the tree for (default: the configured default locale).
    #[arg(short, long)]
    locale: Option<String>,

    /// Print the tree as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl TreeArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load(&std::env::current_dir()?)?,
        };

        let locale = self
            .locale
            .unwrap_or_else(|| config.i18n.default.clone());
        if !config.i18n.contains(&locale) {
            return Err(CliError::Validation(format!(
                "locale '{locale}' is not configured"
            )));
        }

        let scanner = Scanner::new(
            config.content_resolved.source_dir.clone(),
            config.i18n.clone(),
        );
        let content = scanner.scan()?;
        let resolver = ResolverContext::build(&config.site.base_url, &config.i18n, &content)?;

        let Some(tree) = resolver.tree(&locale) else {
            return Err(CliError::Validation(format!(
                "no page tree for locale '{locale}'"
            )));
        };
        let navigation = tree.navigation(&config.site.base_url);

        if self.json {
            let json = serde_json::to_string_pretty(&navigation)
                .map_err(|e| CliError::Validation(e.to_string()))?;
            output.info(&json);
        } else {
            output.info(&format!(
                "{} ({} documents, locale '{locale}')",
                config.site.title,
                tree.document_count()
            ));
            for item in &navigation {
                print_item(output, item, 0);
            }
        }
        Ok(())
    }
}

fn print_item(output: &Output, item: &NavItem, depth: usize) {
    output.info(&format!(
        "{}{} ({})",
        "  ".repeat(depth),
        item.title,
        item.url
    ));
    for child in &item.children {
        print_item(output, child, depth + 1);
    }
}

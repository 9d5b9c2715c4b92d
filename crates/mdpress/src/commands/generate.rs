//! `mdpress generate` command implementation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Args;
use mdpress_config::Config;
use mdpress_openapi::generate;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// OpenAPI description files (JSON).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Destination directory (default: the configured API directory inside
    /// the content tree).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdpress.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl GenerateArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let destination_root = match self.output {
            Some(dir) => dir,
            None => {
                let config = match &self.config {
                    Some(path) => Config::load_from(path)?,
                    None => Config::load(&std::env::current_dir()?)?,
                };
                config
                    .content_resolved
                    .source_dir
                    .join(&config.content_resolved.api_dir)
            }
        };

        let mut total = 0;
        for (input, destination) in plan_destinations(&self.inputs, &destination_root)? {
            output.info(&format!(
                "Generating {} -> {}",
                input.display(),
                destination.display()
            ));
            let written = generate(input, &destination)?;
            total += written.len();
        }
        output.success(&format!("Generated {total} reference pages"));
        Ok(())
    }
}

/// Map each input to its destination subtree.
///
/// A single input owns the output root; multiple inputs get one subtree
/// per input file stem so their trees cannot clobber each other.
fn plan_destinations<'a>(
    inputs: &'a [PathBuf],
    output: &Path,
) -> Result<Vec<(&'a PathBuf, PathBuf)>, CliError> {
    if let [input] = inputs {
        return Ok(vec![(input, output.to_owned())]);
    }

    let mut seen = HashSet::new();
    let mut plan = Vec::with_capacity(inputs.len());
    for input in inputs {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                CliError::Validation(format!("input has no usable file name: {}", input.display()))
            })?;
        if !seen.insert(stem.to_owned()) {
            return Err(CliError::Validation(format!(
                "inputs share the file stem '{stem}', their output would overlap"
            )));
        }
        plan.push((input, output.join(stem)));
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_single_input_owns_output_root() {
        let inputs = vec![PathBuf::from("api.json")];
        let plan = plan_destinations(&inputs, Path::new("out")).unwrap();
        assert_eq!(plan, vec![(&inputs[0], PathBuf::from("out"))]);
    }

    #[test]
    fn test_multiple_inputs_get_stem_subtrees() {
        let inputs = vec![PathBuf::from("specs/pets.json"), PathBuf::from("store.json")];
        let plan = plan_destinations(&inputs, Path::new("out")).unwrap();
        assert_eq!(
            plan,
            vec![
                (&inputs[0], PathBuf::from("out/pets")),
                (&inputs[1], PathBuf::from("out/store")),
            ]
        );
    }

    #[test]
    fn test_duplicate_stems_are_rejected() {
        let inputs = vec![PathBuf::from("a/api.json"), PathBuf::from("b/api.json")];
        let err = plan_destinations(&inputs, Path::new("out")).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }
}

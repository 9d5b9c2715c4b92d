//! Full-regeneration driver.
//!
//! The complete file set is rendered in memory before anything on disk is
//! touched. Only when every operation has rendered successfully is the
//! destination subtree cleared and rewritten, so a malformed input never
//! leaves a half-written tree behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use oas3::Spec;
use tracing::{debug, info};

use crate::GenerateError;
use crate::render::{RenderedDoc, operation_label, render_operation};

/// Generate reference docs for one OpenAPI description.
///
/// Reads `input`, renders one MDX document per operation, clears
/// `destination`, and writes the rendered set. Returns the written paths in
/// output order.
///
/// # Errors
///
/// Returns [`GenerateError`] when the input cannot be read or parsed,
/// declares no operations, contains an unresolvable reference, or when the
/// destination cannot be rewritten.
pub fn generate(input: &Path, destination: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let spec = load_spec(input)?;

    let mut docs: BTreeMap<PathBuf, (String, RenderedDoc)> = BTreeMap::new();
    for (path, method, operation) in spec.operations() {
        let doc = render_operation(&spec, &path, method.as_str(), &operation)?;
        let label = operation_label(method.as_str(), &path);
        if let Some((first, _)) = docs.get(&doc.rel_path) {
            return Err(GenerateError::OutputCollision {
                path: doc.rel_path,
                first: first.clone(),
                second: label,
            });
        }
        debug!(operation = %label, output = %doc.rel_path.display(), "rendered operation");
        docs.insert(doc.rel_path.clone(), (label, doc));
    }

    if docs.is_empty() {
        return Err(GenerateError::NoOperations {
            path: input.to_owned(),
        });
    }

    write_docs(destination, docs.into_values().map(|(_, doc)| doc))
}

fn load_spec(input: &Path) -> Result<Spec, GenerateError> {
    let content = fs::read_to_string(input).map_err(|source| GenerateError::Io {
        path: input.to_owned(),
        source,
    })?;
    let spec = oas3::from_json(content).map_err(|e| GenerateError::Parse {
        path: input.to_owned(),
        message: e.to_string(),
    })?;
    if spec.paths.as_ref().is_none_or(BTreeMap::is_empty) {
        return Err(GenerateError::NoOperations {
            path: input.to_owned(),
        });
    }
    Ok(spec)
}

/// Clear the destination subtree and write the rendered set.
fn write_docs(
    destination: &Path,
    docs: impl Iterator<Item = RenderedDoc>,
) -> Result<Vec<PathBuf>, GenerateError> {
    if destination.exists() {
        fs::remove_dir_all(destination).map_err(|source| GenerateError::Io {
            path: destination.to_owned(),
            source,
        })?;
    }
    fs::create_dir_all(destination).map_err(|source| GenerateError::Io {
        path: destination.to_owned(),
        source,
    })?;

    let mut written = Vec::new();
    for doc in docs {
        let target = destination.join(&doc.rel_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| GenerateError::Io {
                path: parent.to_owned(),
                source,
            })?;
        }
        fs::write(&target, &doc.content).map_err(|source| GenerateError::Io {
            path: target.clone(),
            source,
        })?;
        written.push(target);
    }
    info!(
        destination = %destination.display(),
        files = written.len(),
        "regenerated reference docs"
    );
    Ok(written)
}

//! OpenAPI reference generation.
//!
//! Turns an OpenAPI 3.x description into a tree of MDX documents, one per
//! operation, grouped by tag. Generation is full-regeneration: the complete
//! file set is rendered in memory first, and only when every operation has
//! rendered successfully is the destination subtree cleared and rewritten.
//! Running the generator twice over the same input produces byte-identical
//! output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

mod generator;
mod render;

pub use generator::generate;
pub use render::RenderedDoc;

/// Error raised while generating reference docs from an OpenAPI description.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The input file or the destination tree could not be read or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file is not a parseable OpenAPI description.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The description parsed but declares no paths, so there is nothing
    /// to generate from.
    #[error("{path} declares no paths")]
    NoOperations { path: PathBuf },

    /// An operation references a schema component that cannot be resolved.
    #[error("schema error in {operation}: {message}")]
    Schema { operation: String, message: String },

    /// Two operations map to the same output file.
    #[error("operations {first} and {second} both map to {path}")]
    OutputCollision {
        path: PathBuf,
        first: String,
        second: String,
    },
}

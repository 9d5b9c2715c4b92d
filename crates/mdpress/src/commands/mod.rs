//! CLI command implementations.

pub(crate) mod generate;
pub(crate) mod tree;

pub(crate) use generate::GenerateArgs;
pub(crate) use tree::TreeArgs;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Pos;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read maze config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse maze config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("unknown {kind} `{value}` (expected one of: {expected})")]
    UnknownVariant { kind: &'static str, value: String, expected: &'static str },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid { field, reason: reason.into() }
    }
}

/// Failures of a solve call. An unreachable goal is not one of them: solvers
/// report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("cannot solve an empty grid")]
    EmptyGrid,
    #[error("position {pos:?} lies outside the {width}x{height} grid")]
    OutOfBounds { pos: Pos, width: usize, height: usize },
    #[error("node {node} is outside a graph of {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },
    #[error("{solver}: graph contains a negative-weight cycle")]
    NegativeCycle { solver: &'static str },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

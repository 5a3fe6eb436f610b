//! Error types for route compilation.

use thiserror::Error;

/// Errors raised while compiling a path pattern.
///
/// Routes are compiled once at startup, so these surface before the server
/// accepts any traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Path pattern must start with '/': {0}")]
    MissingLeadingSlash(String),

    /// A segment has a `{` without a matching `}` or the other way round.
    #[error("Unbalanced braces in path pattern: {0}")]
    UnbalancedBraces(String),

    #[error("Only one placeholder is allowed per segment: {0}")]
    MultiplePlaceholders(String),

    #[error("Placeholder has no name: {0}")]
    EmptyPlaceholder(String),

    /// `*` used anywhere but as the whole last segment.
    #[error("Wildcard must be the last segment: {0}")]
    MisplacedWildcard(String),
}

use thiserror::Error;

use super::Representation;

/// Errors surfaced by color operations.
///
/// Malformed color strings and out-of-range numbers are not errors: they are
/// recovered locally (zero fallback, clamping). What remains here are requests
/// that have no meaningful answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// No scalar mapping exists between the two representations
    /// (anything to or from `gradient`).
    #[error("cannot convert {from} color to {to}")]
    UnsupportedConversion {
        from: Representation,
        to: Representation,
    },

    /// The name is not a component of any representation.
    #[error("unknown color component `{0}`")]
    UnknownComponent(String),

    /// The value kind does not fit the component slot
    /// (a number for an anchor, a point for a channel, ...).
    #[error("invalid value for color component `{name}`: expected {expected}")]
    InvalidComponent {
        name: &'static str,
        expected: &'static str,
    },

    /// The argument list cannot form a color at all.
    #[error("invalid color arguments: {0}")]
    InvalidArguments(String),

    #[error("unknown color representation `{0}`")]
    UnknownRepresentation(String),
}

//! Structured error types for traithull.

use thiserror::Error;

/// Unified error type for all traithull operations.
///
/// Degenerate geometry and undersized samples are not errors; they are
/// handled by numeric policy in the hull and stats crates.
#[derive(Debug, Error)]
pub enum TraitHullError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed trait or plot file)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (empty sets, dimension mismatch, bad arguments)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A species id that is not a key of the trait matrix
    #[error("unknown species: {0}")]
    UnknownSpecies(String),

    /// The geometry engine could not be run at all
    #[error("geometry engine error: {0}")]
    Geometry(String),
}

/// Convenience alias used throughout traithull.
pub type Result<T> = std::result::Result<T, TraitHullError>;

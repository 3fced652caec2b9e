//! Shared primitives for the traithull functional-diversity toolkit.
//!
//! - **Error types** — [`TraitHullError`] and [`Result`]
//! - **Traits** — [`Summarizable`]
//! - **Data model** — [`TraitMatrix`], [`SpeciesSet`], [`PlotMatrix`]

pub mod error;
pub mod matrix;
pub mod traits;

pub use error::{Result, TraitHullError};
pub use matrix::{PlotMatrix, SpeciesSet, TraitMatrix};
pub use traits::*;

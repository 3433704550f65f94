//! Core data model for the pumplab pumping-lemma workbench.
//!
//! This crate holds everything that has no behavior beyond plain data and
//! string algebra:
//!
//! - [`types`]: formal language classes and the two lemma shapes
//! - [`error`]: the [`PumpError`] taxonomy shared by every pumplab crate
//! - [`language`]: [`LanguageDefinition`] and the [`Recognizer`] capability
//! - [`catalog`]: the read-only [`Catalog`] of registered languages
//! - [`decomposition`]: x/y/z and u/v/w/x/y splits of a source string
//! - [`pump`]: building pumped strings from a decomposition
//!
//! Validation, membership testing, generation and analysis live in
//! `pumplab-check`, which builds on these types.

pub mod catalog;
pub mod decomposition;
pub mod error;
pub mod language;
pub mod pump;
pub mod types;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogBuilder};
pub use decomposition::{
    ContextFreeDecomposition, Decomposition, RegularDecomposition, SegmentLengths,
};
pub use error::PumpError;
pub use language::{
    GenerationRule, LanguageDefinition, LanguageSummary, Recognizer, RecognizerFailure,
    SuggestionRule,
};
pub use pump::{pump, pump_context_free, pump_regular};
pub use types::{FormalType, Shape};

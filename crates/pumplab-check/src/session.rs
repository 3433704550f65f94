//! An explicit, immutable workbench session.
//!
//! A [`Session`] records the current language, source string, decomposition,
//! pump count and the most recent results. Every transition borrows the
//! current session and returns a fresh one; nothing is mutated in place, so
//! a caller can keep older sessions around for undo or comparison.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pumplab_core::catalog::Catalog;
use pumplab_core::decomposition::{Decomposition, SegmentLengths};
use pumplab_core::error::PumpError;
use pumplab_core::language::LanguageDefinition;
use pumplab_core::pump::pump_count;
use pumplab_core::types::Shape;

use crate::analyze::{analyze_language, evaluate, AnalysisConfig, AnalysisVerdict, PumpingResult};
use crate::generate::generate_for;
use crate::validate::{validate, ConstraintReport};

/// Errors from session transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The transition needs a language and none has been selected.
    #[error("no language selected")]
    NoLanguage,

    #[error(transparent)]
    Pump(#[from] PumpError),
}

/// Snapshot of one interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    language: Option<String>,
    shape: Shape,
    source: String,
    decomposition: Decomposition,
    pump_count: usize,
    last_result: Option<PumpingResult>,
    last_verdict: Option<AnalysisVerdict>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            language: None,
            shape: Shape::Regular,
            source: String::new(),
            decomposition: Decomposition::initial(Shape::Regular, ""),
            pump_count: 1,
            last_result: None,
            last_verdict: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    pub fn pump_count(&self) -> usize {
        self.pump_count
    }

    pub fn last_result(&self) -> Option<&PumpingResult> {
        self.last_result.as_ref()
    }

    pub fn last_verdict(&self) -> Option<&AnalysisVerdict> {
        self.last_verdict.as_ref()
    }

    /// Switches to language `id`. The source string and results are cleared;
    /// the decomposition shape follows the language's formal type.
    pub fn select_language(&self, catalog: &Catalog, id: &str) -> Result<Session, SessionError> {
        let lang = catalog.lookup(id)?;
        let shape = lang.shape();
        Ok(Session {
            language: Some(lang.id().to_string()),
            shape,
            decomposition: Decomposition::initial(shape, ""),
            ..Session::default()
        })
    }

    /// Replaces the source string and resets the decomposition to the
    /// initial split for the session's shape.
    pub fn with_source(&self, source: impl Into<String>) -> Session {
        let source = source.into();
        Session {
            language: self.language.clone(),
            shape: self.shape,
            decomposition: Decomposition::initial(self.shape, &source),
            source,
            pump_count: self.pump_count,
            last_result: None,
            last_verdict: None,
        }
    }

    /// [`Session::with_source`] with a canonical sample of `length`
    /// characters for the selected language.
    pub fn with_generated_sample(
        &self,
        catalog: &Catalog,
        length: usize,
    ) -> Result<Session, SessionError> {
        let lang = self.current(catalog)?;
        let sample = generate_for(lang, length)?;
        Ok(self.with_source(sample))
    }

    /// Re-splits the source with new segment lengths.
    pub fn with_lengths(&self, lengths: &SegmentLengths) -> Session {
        Session {
            decomposition: lengths.apply(&self.source),
            last_result: None,
            last_verdict: None,
            ..self.clone()
        }
    }

    /// Sets the count used by [`Session::pump_current`].
    pub fn with_pump_count(&self, count: i64) -> Result<Session, SessionError> {
        let pump_count = pump_count(count)?;
        Ok(Session {
            pump_count,
            last_result: None,
            ..self.clone()
        })
    }

    /// Constraint report for the current decomposition.
    pub fn constraints(&self, catalog: &Catalog) -> Result<ConstraintReport, SessionError> {
        let lang = self.current(catalog)?;
        Ok(validate(
            &self.source,
            &self.decomposition,
            lang.pumping_length(),
        ))
    }

    /// Pumps the current decomposition by the current count and classifies
    /// the result.
    pub fn pump_current(&self, catalog: &Catalog) -> Result<Session, SessionError> {
        let lang = self.current(catalog)?;
        let count = i64::try_from(self.pump_count).unwrap_or(i64::MAX);
        let result = evaluate(lang, &self.decomposition, count)?;
        Ok(Session {
            last_result: Some(result),
            ..self.clone()
        })
    }

    /// Runs a full analysis sweep over the current decomposition.
    pub fn test_all(
        &self,
        catalog: &Catalog,
        config: &AnalysisConfig,
    ) -> Result<Session, SessionError> {
        let lang = self.current(catalog)?;
        let verdict = analyze_language(lang, &self.decomposition, &config.pump_counts)?;
        Ok(Session {
            last_verdict: Some(verdict),
            ..self.clone()
        })
    }

    /// Clears source, decomposition, count and results; keeps the language.
    pub fn reset(&self) -> Session {
        Session {
            language: self.language.clone(),
            shape: self.shape,
            decomposition: Decomposition::initial(self.shape, ""),
            ..Session::default()
        }
    }

    fn current<'c>(&self, catalog: &'c Catalog) -> Result<&'c LanguageDefinition, SessionError> {
        let id = self.language.as_deref().ok_or(SessionError::NoLanguage)?;
        Ok(catalog.lookup(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(id: &str, source: &str) -> Session {
        Session::new()
            .select_language(Catalog::standard(), id)
            .unwrap()
            .with_source(source)
    }

    #[test]
    fn selecting_a_language_sets_shape() {
        let catalog = Catalog::standard();
        let s = Session::new().select_language(catalog, "a^nb^nc^n").unwrap();
        assert_eq!(s.language(), Some("a^nb^nc^n"));
        assert_eq!(s.shape(), Shape::ContextFree);
        assert_eq!(s.source(), "");
        assert_eq!(s.pump_count(), 1);
    }

    #[test]
    fn unknown_language_leaves_caller_untouched() {
        let s = Session::new();
        let err = s.select_language(Catalog::standard(), "nope").unwrap_err();
        assert_eq!(err, SessionError::Pump(PumpError::NotFound { id: "nope".into() }));
        assert_eq!(s, Session::new());
    }

    #[test]
    fn source_gets_initial_decomposition() {
        let s = started("a*b*", "aaabbb");
        assert_eq!(s.decomposition(), &Decomposition::regular("a", "a", "abbb"));
    }

    #[test]
    fn transitions_do_not_mutate_the_previous_session() {
        let before = started("a^nb^n", "aaabbb");
        let after = before.with_lengths(&SegmentLengths::ContextFree { u: 2, v: 1, w: 0, x: 1 });
        assert_eq!(
            after.decomposition(),
            &Decomposition::context_free("aa", "a", "", "b", "bb")
        );
        assert_eq!(
            before.decomposition(),
            &Decomposition::initial(Shape::ContextFree, "aaabbb")
        );
    }

    #[test]
    fn pump_current_records_result() {
        let catalog = Catalog::standard();
        let s = started("a^nb^n", "aaabbb")
            .with_lengths(&SegmentLengths::ContextFree { u: 2, v: 1, w: 0, x: 1 })
            .with_pump_count(3)
            .unwrap()
            .pump_current(catalog)
            .unwrap();
        let result = s.last_result().unwrap();
        assert_eq!(result.produced, "aaaaabbbbb");
        assert_eq!(result.accepted, Some(true));
    }

    #[test]
    fn negative_pump_count_rejected() {
        let s = started("a*b*", "ab");
        assert_eq!(
            s.with_pump_count(-2),
            Err(SessionError::Pump(PumpError::InvalidPumpCount { count: -2 }))
        );
    }

    #[test]
    fn test_all_runs_default_sweep() {
        let catalog = Catalog::standard();
        let s = started("a^nb^n", "aaabbb")
            .with_lengths(&SegmentLengths::ContextFree { u: 1, v: 1, w: 1, x: 1 })
            .test_all(catalog, &AnalysisConfig::default())
            .unwrap();
        let verdict = s.last_verdict().unwrap();
        assert_eq!(verdict.results.len(), 5);
        assert!(verdict.has_violation);
    }

    #[test]
    fn generated_sample_needs_language() {
        let catalog = Catalog::standard();
        assert_eq!(
            Session::new().with_generated_sample(catalog, 6),
            Err(SessionError::NoLanguage)
        );
        let s = Session::new()
            .select_language(catalog, "a^nb^n")
            .unwrap()
            .with_generated_sample(catalog, 6)
            .unwrap();
        assert_eq!(s.source(), "aaabbb");
    }

    #[test]
    fn reset_keeps_language() {
        let s = started("palindromes", "abcba")
            .with_pump_count(4)
            .unwrap()
            .reset();
        assert_eq!(s.language(), Some("palindromes"));
        assert_eq!(s.source(), "");
        assert_eq!(s.pump_count(), 1);
        assert_eq!(s.shape(), Shape::ContextFree);
    }
}

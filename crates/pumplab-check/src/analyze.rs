//! Pumping analysis: pump a decomposition over a sweep of counts, classify
//! each produced string, and summarize the outcome as a verdict.
//!
//! A recognizer failure on one pumped string is recorded on that result and
//! excluded from both the violation and the acceptance tallies. Any such
//! failure marks the whole verdict as degraded.

use serde::{Deserialize, Serialize};

use pumplab_core::catalog::Catalog;
use pumplab_core::decomposition::Decomposition;
use pumplab_core::error::PumpError;
use pumplab_core::language::LanguageDefinition;
use pumplab_core::pump::{check_pump, pump, pump_count};
use pumplab_core::types::{FormalType, Shape};

use crate::membership::classify;
use crate::validate::{validate, ConstraintReport};

/// Which pump counts an analysis sweeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub pump_counts: Vec<i64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pump_counts: vec![0, 1, 2, 3, 4],
        }
    }
}

/// One pumped string and how the recognizer classified it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PumpingResult {
    pub pump_count: usize,
    pub produced: String,
    /// `None` exactly when `recognizer_error` is set.
    pub accepted: Option<bool>,
    pub recognizer_error: Option<PumpError>,
}

impl PumpingResult {
    /// Classified and rejected.
    pub fn is_rejected(&self) -> bool {
        self.accepted == Some(false)
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted == Some(true)
    }

    pub fn is_errored(&self) -> bool {
        self.recognizer_error.is_some()
    }
}

/// Aggregate outcome of an analysis sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisVerdict {
    pub language: String,
    /// Formal type the narrative was written for.
    pub formal_type: FormalType,
    pub shape: Shape,
    pub source: String,
    pub results: Vec<PumpingResult>,
    pub has_violation: bool,
    pub violating_results: Vec<PumpingResult>,
    pub accepted_results: Vec<PumpingResult>,
    pub errored_results: Vec<PumpingResult>,
    /// At least one pumped string could not be classified.
    pub degraded: bool,
    /// The analyzed decomposition checked against the language's pumping
    /// length.
    pub constraints: ConstraintReport,
    pub conclusion: String,
    pub explanation: String,
    pub violation_details: Option<String>,
}

/// Pumps `d` once and classifies the result with `lang`.
///
/// Fails only on a negative count; a recognizer failure is recorded on the
/// returned result.
pub fn evaluate(
    lang: &LanguageDefinition,
    d: &Decomposition,
    count: i64,
) -> Result<PumpingResult, PumpError> {
    let pump_count = pump_count(count)?;
    let produced = pump(d, count)?;
    let result = match classify(lang, &produced) {
        Ok(outcome) => PumpingResult {
            pump_count,
            produced,
            accepted: Some(outcome.accepted),
            recognizer_error: None,
        },
        Err(err) => PumpingResult {
            pump_count,
            produced,
            accepted: None,
            recognizer_error: Some(err),
        },
    };
    tracing::debug!(
        language = lang.id(),
        i = result.pump_count,
        produced = %result.produced,
        accepted = ?result.accepted,
        "pumped"
    );
    Ok(result)
}

/// Analyzes `d` against language `id` over `pump_counts`, in order.
///
/// Every count is checked before any string is pumped, so a negative count
/// fails the whole call without partial work.
pub fn analyze(
    catalog: &Catalog,
    id: &str,
    d: &Decomposition,
    pump_counts: &[i64],
) -> Result<AnalysisVerdict, PumpError> {
    let lang = catalog.lookup(id)?;
    analyze_language(lang, d, pump_counts)
}

/// [`analyze`] for an already resolved language.
pub fn analyze_language(
    lang: &LanguageDefinition,
    d: &Decomposition,
    pump_counts: &[i64],
) -> Result<AnalysisVerdict, PumpError> {
    for &count in pump_counts {
        check_pump(d, count)?;
    }

    let results = pump_counts
        .iter()
        .map(|&count| evaluate(lang, d, count))
        .collect::<Result<Vec<_>, _>>()?;

    let source = d.reconstruct();
    let constraints = validate(&source, d, lang.pumping_length());
    let verdict = summarize(lang, d.shape(), source, results, constraints);

    tracing::info!(
        language = lang.id(),
        tested = verdict.results.len(),
        violation = verdict.has_violation,
        degraded = verdict.degraded,
        "analysis complete"
    );
    Ok(verdict)
}

fn summarize(
    lang: &LanguageDefinition,
    shape: Shape,
    source: String,
    results: Vec<PumpingResult>,
    constraints: ConstraintReport,
) -> AnalysisVerdict {
    let pick = |f: fn(&PumpingResult) -> bool| -> Vec<PumpingResult> {
        results.iter().filter(|r| f(r)).cloned().collect()
    };
    let violating_results = pick(PumpingResult::is_rejected);
    let accepted_results = pick(PumpingResult::is_accepted);
    let errored_results = pick(PumpingResult::is_errored);

    let has_violation = !violating_results.is_empty();
    let degraded = !errored_results.is_empty();
    let class = lang.shape().class_name();

    let (conclusion, mut explanation) = if results.is_empty() {
        (
            "No Pump Counts Tested".to_string(),
            "No pumped strings were produced, so there is nothing to judge. Supply at least one pump count."
                .to_string(),
        )
    } else if has_violation {
        (
            "Pumping Lemma Violation Detected!".to_string(),
            format!(
                "Not all pumped strings are accepted by the language. This suggests that either:\n  \
                 1. The language is not {class}, or\n  \
                 2. The current decomposition doesn't satisfy the pumping lemma conditions."
            ),
        )
    } else {
        (
            "No Violation Found".to_string(),
            format!(
                "All pumped strings are accepted by the language. This decomposition satisfies \
                 the pumping lemma conditions for the tested values. However, this doesn't prove \
                 the language is {class} - you would need to show this holds for ALL possible \
                 decompositions."
            ),
        )
    };

    if degraded {
        explanation.push_str(&format!(
            "\nNote: {} of {} pumped strings could not be classified because the recognizer \
             failed; this verdict covers only the classified strings.",
            errored_results.len(),
            results.len()
        ));
    }

    let violation_details = has_violation.then(|| {
        let listed: Vec<String> = violating_results
            .iter()
            .map(|r| format!("\"{}\" (i={})", r.produced, r.pump_count))
            .collect();
        format!("Rejected strings: {}", listed.join(", "))
    });

    AnalysisVerdict {
        language: lang.id().to_string(),
        formal_type: lang.formal_type(),
        shape,
        source,
        results,
        has_violation,
        violating_results,
        accepted_results,
        errored_results,
        degraded,
        constraints,
        conclusion,
        explanation,
        violation_details,
    }
}

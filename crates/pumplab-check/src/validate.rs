//! Decomposition validation against the pumping-lemma constraints.
//!
//! Validation never fails: a decomposition that does not reconstruct its
//! source is reported through [`ConstraintReport::mismatch`], and each lemma
//! constraint is reported as a [`Constraint`] with its measured value. The
//! report is a pure function of its inputs.

use serde::{Deserialize, Serialize};

use pumplab_core::decomposition::{ContextFreeDecomposition, Decomposition, RegularDecomposition};
use pumplab_core::error::PumpError;
use pumplab_core::types::Shape;

/// One named lemma constraint and whether it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Constraint in lemma notation, e.g. `|xy| ≤ p`.
    pub name: String,
    pub satisfied: bool,
    /// The measured length the constraint is about.
    pub measured: usize,
    /// Measurement rendered for display, e.g. `|xy| = 2, p = 2`.
    pub value: String,
    pub description: String,
}

/// The segments did not concatenate to the source string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub expected: String,
    pub actual: String,
}

impl From<Mismatch> for PumpError {
    fn from(m: Mismatch) -> Self {
        PumpError::DecompositionMismatch {
            expected: m.expected,
            actual: m.actual,
        }
    }
}

/// Result of validating a decomposition against a pumping length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintReport {
    pub shape: Shape,
    pub pumping_length: usize,
    /// The two lemma constraints for `shape`, length bound first.
    pub constraints: Vec<Constraint>,
    /// AND of every entry in `constraints`.
    pub all_satisfied: bool,
    pub mismatch: Option<Mismatch>,
}

impl ConstraintReport {
    /// All constraints hold and the decomposition reconstructs its source.
    pub fn is_valid(&self) -> bool {
        self.all_satisfied && self.mismatch.is_none()
    }

    /// One message per problem, in the order they were checked.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.mismatch.is_some() {
            errors.push("Decomposition does not match original string".to_string());
        }
        for c in self.constraints.iter().filter(|c| !c.satisfied) {
            errors.push(format!("{} violated ({})", c.name, c.value));
        }
        errors
    }

    fn new(
        shape: Shape,
        pumping_length: usize,
        constraints: Vec<Constraint>,
        mismatch: Option<Mismatch>,
    ) -> Self {
        let all_satisfied = constraints.iter().all(|c| c.satisfied);
        Self {
            shape,
            pumping_length,
            constraints,
            all_satisfied,
            mismatch,
        }
    }
}

fn len(s: &str) -> usize {
    s.chars().count()
}

fn mismatch(source: &str, actual: String) -> Option<Mismatch> {
    (actual != source).then(|| Mismatch {
        expected: source.to_string(),
        actual,
    })
}

/// Checks `|xy| ≤ p` and `|y| ≥ 1`.
pub fn validate_regular(
    source: &str,
    d: &RegularDecomposition,
    pumping_length: usize,
) -> ConstraintReport {
    let xy = len(&d.x) + len(&d.y);
    let y = len(&d.y);
    let constraints = vec![
        Constraint {
            name: "|xy| ≤ p".to_string(),
            satisfied: xy <= pumping_length,
            measured: xy,
            value: format!("|xy| = {}, p = {}", xy, pumping_length),
            description: "The x and y segments together cannot exceed the pumping length"
                .to_string(),
        },
        Constraint {
            name: "|y| ≥ 1".to_string(),
            satisfied: y >= 1,
            measured: y,
            value: format!("|y| = {}", y),
            description: "The y segment must be non-empty".to_string(),
        },
    ];
    let actual = format!("{}{}{}", d.x, d.y, d.z);
    ConstraintReport::new(
        Shape::Regular,
        pumping_length,
        constraints,
        mismatch(source, actual),
    )
}

/// Checks `|vwx| ≤ p` and `|vx| ≥ 1`.
pub fn validate_context_free(
    source: &str,
    d: &ContextFreeDecomposition,
    pumping_length: usize,
) -> ConstraintReport {
    let vwx = len(&d.v) + len(&d.w) + len(&d.x);
    let vx = len(&d.v) + len(&d.x);
    let constraints = vec![
        Constraint {
            name: "|vwx| ≤ p".to_string(),
            satisfied: vwx <= pumping_length,
            measured: vwx,
            value: format!("|vwx| = {}, p = {}", vwx, pumping_length),
            description: "The v, w, and x segments together cannot exceed the pumping length"
                .to_string(),
        },
        Constraint {
            name: "|vx| ≥ 1".to_string(),
            satisfied: vx >= 1,
            measured: vx,
            value: format!("|vx| = {}", vx),
            description: "At least one of v or x must be non-empty".to_string(),
        },
    ];
    let actual = format!("{}{}{}{}{}", d.u, d.v, d.w, d.x, d.y);
    ConstraintReport::new(
        Shape::ContextFree,
        pumping_length,
        constraints,
        mismatch(source, actual),
    )
}

/// Validates a decomposition of either shape.
pub fn validate(source: &str, d: &Decomposition, pumping_length: usize) -> ConstraintReport {
    match d {
        Decomposition::Regular(r) => validate_regular(source, r, pumping_length),
        Decomposition::ContextFree(c) => validate_context_free(source, c, pumping_length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_decomposition_within_bounds() {
        let d = RegularDecomposition::new("a", "a", "abbb");
        let report = validate_regular("aaabbb", &d, 2);
        assert!(report.all_satisfied);
        assert!(report.is_valid());
        assert_eq!(report.constraints[0].measured, 2);
        assert_eq!(report.constraints[0].value, "|xy| = 2, p = 2");
        assert_eq!(report.constraints[1].measured, 1);
    }

    #[test]
    fn regular_xy_too_long() {
        let d = RegularDecomposition::new("aaa", "b", "bb");
        let report = validate_regular("aaabbb", &d, 2);
        assert!(!report.all_satisfied);
        assert!(!report.constraints[0].satisfied);
        assert!(report.constraints[1].satisfied);
        assert_eq!(report.errors(), vec!["|xy| ≤ p violated (|xy| = 4, p = 2)"]);
    }

    #[test]
    fn regular_empty_y() {
        let d = RegularDecomposition::new("a", "", "aabbb");
        let report = validate_regular("aaabbb", &d, 3);
        assert!(report.constraints[0].satisfied);
        assert!(!report.constraints[1].satisfied);
        assert!(!report.is_valid());
    }

    #[test]
    fn context_free_both_pumped_segments_empty() {
        let d = ContextFreeDecomposition::new("aa", "", "a", "", "bbb");
        let report = validate_context_free("aaabbb", &d, 3);
        assert!(report.constraints[0].satisfied);
        assert!(!report.constraints[1].satisfied);
        assert_eq!(report.constraints[1].value, "|vx| = 0");
    }

    #[test]
    fn context_free_one_pumped_segment_is_enough() {
        let d = ContextFreeDecomposition::new("aa", "a", "", "", "bbb");
        let report = validate_context_free("aaabbb", &d, 3);
        assert!(report.is_valid());
    }

    #[test]
    fn context_free_window_too_wide() {
        let d = ContextFreeDecomposition::new("", "aa", "a", "bb", "b");
        let report = validate_context_free("aaabbb", &d, 4);
        assert!(!report.constraints[0].satisfied);
        assert_eq!(report.constraints[0].measured, 5);
    }

    #[test]
    fn mismatch_is_reported_not_raised() {
        let d = RegularDecomposition::new("a", "a", "bbb");
        let report = validate_regular("aaabbb", &d, 2);
        assert!(report.all_satisfied);
        assert!(!report.is_valid());
        assert_eq!(
            report.mismatch,
            Some(Mismatch {
                expected: "aaabbb".into(),
                actual: "aabbb".into()
            })
        );
        assert_eq!(report.errors()[0], "Decomposition does not match original string");

        let err: PumpError = report.mismatch.unwrap().into();
        assert!(matches!(err, PumpError::DecompositionMismatch { .. }));
    }

    #[test]
    fn dispatches_on_shape() {
        let d = Decomposition::context_free("a", "a", "a", "b", "bb");
        let report = validate("aaabbb", &d, 3);
        assert_eq!(report.shape, Shape::ContextFree);
        assert_eq!(report.constraints[0].name, "|vwx| ≤ p");
    }
}

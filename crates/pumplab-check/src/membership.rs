//! Membership testing through a language's recognizer.
//!
//! Recognizer failures never escape as panics or foreign error types: they
//! are wrapped into [`PumpError::RecognizerError`] carrying the language id.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use pumplab_core::catalog::Catalog;
use pumplab_core::error::PumpError;
use pumplab_core::language::{LanguageDefinition, RecognizerFailure};

/// Successful classification of one candidate string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipOutcome {
    pub accepted: bool,
}

/// Classifies `candidate` with an already resolved language.
///
/// A panicking recognizer is reported the same way as one that returns `Err`.
pub fn classify(lang: &LanguageDefinition, candidate: &str) -> Result<MembershipOutcome, PumpError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| lang.recognize(candidate)))
        .unwrap_or_else(|payload| Err(RecognizerFailure::new(panic_message(payload.as_ref()))));
    match outcome {
        Ok(accepted) => {
            tracing::debug!(language = lang.id(), candidate, accepted, "membership");
            Ok(MembershipOutcome { accepted })
        }
        Err(failure) => {
            tracing::warn!(
                language = lang.id(),
                candidate,
                error = %failure,
                "recognizer failed"
            );
            Err(PumpError::RecognizerError {
                language: lang.id().to_string(),
                message: failure.message,
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str));
    match detail {
        Some(detail) => format!("recognizer panicked: {}", detail),
        None => "recognizer panicked".to_string(),
    }
}

/// Looks up `id` and classifies `candidate`.
pub fn test_membership(
    catalog: &Catalog,
    id: &str,
    candidate: &str,
) -> Result<MembershipOutcome, PumpError> {
    let lang = catalog.lookup(id)?;
    classify(lang, candidate)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use pumplab_core::language::FnRecognizer;
    use pumplab_core::types::FormalType;

    use super::*;

    #[test]
    fn standard_languages_classify() {
        let catalog = Catalog::standard();
        assert_eq!(
            test_membership(catalog, "a^nb^n", "aaabbb"),
            Ok(MembershipOutcome { accepted: true })
        );
        assert_eq!(
            test_membership(catalog, "a^nb^n", "aaabbbb"),
            Ok(MembershipOutcome { accepted: false })
        );
        assert_eq!(
            test_membership(catalog, "(ab)*", "ababab"),
            Ok(MembershipOutcome { accepted: true })
        );
    }

    #[test]
    fn unknown_language() {
        assert_eq!(
            test_membership(Catalog::standard(), "nope", "a"),
            Err(PumpError::NotFound { id: "nope".into() })
        );
    }

    #[test]
    fn recognizer_failure_is_wrapped() {
        let catalog = Catalog::builder()
            .register(LanguageDefinition::new(
                "broken",
                FormalType::Regular,
                NonZeroUsize::MIN,
                FnRecognizer::new("broken", |_: &str| {
                    Err(RecognizerFailure::new("stack exhausted"))
                }),
            ))
            .build();
        assert_eq!(
            test_membership(&catalog, "broken", "ab"),
            Err(PumpError::RecognizerError {
                language: "broken".into(),
                message: "stack exhausted".into(),
            })
        );
    }

    #[test]
    fn recognizer_panic_is_wrapped() {
        let catalog = Catalog::builder()
            .register(LanguageDefinition::new(
                "panicky",
                FormalType::Regular,
                NonZeroUsize::MIN,
                FnRecognizer::new("panicky", |input: &str| {
                    if input.len() > 2 {
                        panic!("input too deep");
                    }
                    Ok(true)
                }),
            ))
            .build();
        assert_eq!(
            test_membership(&catalog, "panicky", "ab"),
            Ok(MembershipOutcome { accepted: true })
        );
        assert_eq!(
            test_membership(&catalog, "panicky", "abc"),
            Err(PumpError::RecognizerError {
                language: "panicky".into(),
                message: "recognizer panicked: input too deep".into(),
            })
        );
    }

    #[test]
    fn repeated_calls_agree() {
        let catalog = Catalog::standard();
        let first = test_membership(catalog, "palindromes", "abcba");
        let second = test_membership(catalog, "palindromes", "abcba");
        assert_eq!(first, second);
    }
}

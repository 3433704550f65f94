//! Language definitions and the recognizer capability.
//!
//! A [`LanguageDefinition`] bundles everything the engine needs to know about
//! one formal language: its class, pumping length, canonical examples, and a
//! [`Recognizer`] deciding membership. Definitions are immutable once built
//! and are shared by reference through the [`Catalog`](crate::Catalog).

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroUsize;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{FormalType, Shape};

// ---------------------------------------------------------------------------
// Recognizers
// ---------------------------------------------------------------------------

/// Failure raised by a recognizer that could not classify an input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RecognizerFailure {
    pub message: String,
}

impl RecognizerFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A pure membership predicate over strings.
///
/// Implementations must be referentially transparent: the same input always
/// yields the same answer, with no hidden state, randomness, or I/O.
///
/// Failure is reported through `Err`. A recognizer that panics is treated as
/// failed by the membership tester, but the default panic hook still prints
/// to stderr, so implementations should not panic.
pub trait Recognizer: fmt::Debug + Send + Sync {
    /// Decide whether `input` belongs to the language.
    fn recognize(&self, input: &str) -> Result<bool, RecognizerFailure>;
}

/// Whole-string regular expression match.
#[derive(Debug)]
pub struct PatternRecognizer {
    pattern: String,
    compiled: Result<Regex, String>,
}

impl PatternRecognizer {
    /// Compiles `pattern` anchored at both ends.
    ///
    /// An invalid pattern does not fail construction; every call to
    /// [`Recognizer::recognize`] reports it instead.
    pub fn new(pattern: &str) -> Self {
        let compiled = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| e.to_string());
        Self {
            pattern: pattern.to_string(),
            compiled,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Recognizer for PatternRecognizer {
    fn recognize(&self, input: &str) -> Result<bool, RecognizerFailure> {
        match &self.compiled {
            Ok(re) => Ok(re.is_match(input)),
            Err(e) => Err(RecognizerFailure::new(format!(
                "invalid pattern '{}': {}",
                self.pattern, e
            ))),
        }
    }
}

/// Accepts the empty string, or one non-empty run of each symbol in order
/// with every run the same length (`a^n b^n`, `a^n b^n c^n`, ...).
#[derive(Debug, Clone)]
pub struct EqualRunsRecognizer {
    symbols: Vec<char>,
}

impl EqualRunsRecognizer {
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }
}

impl Recognizer for EqualRunsRecognizer {
    fn recognize(&self, input: &str) -> Result<bool, RecognizerFailure> {
        if input.is_empty() {
            return Ok(true);
        }
        let runs = runs(input);
        if runs.len() != self.symbols.len() {
            return Ok(false);
        }
        let symbols_match = runs
            .iter()
            .zip(&self.symbols)
            .all(|((c, _), expected)| c == expected);
        let first = runs[0].1;
        Ok(symbols_match && runs.iter().all(|(_, n)| *n == first))
    }
}

/// Strings that read the same forwards and backwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct PalindromeRecognizer;

impl Recognizer for PalindromeRecognizer {
    fn recognize(&self, input: &str) -> Result<bool, RecognizerFailure> {
        Ok(input.chars().eq(input.chars().rev()))
    }
}

/// Adapts a closure into a [`Recognizer`].
pub struct FnRecognizer<F> {
    label: String,
    f: F,
}

impl<F> FnRecognizer<F>
where
    F: Fn(&str) -> Result<bool, RecognizerFailure> + Send + Sync,
{
    pub fn new(label: impl Into<String>, f: F) -> Self {
        Self {
            label: label.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnRecognizer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRecognizer")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<F> Recognizer for FnRecognizer<F>
where
    F: Fn(&str) -> Result<bool, RecognizerFailure> + Send + Sync,
{
    fn recognize(&self, input: &str) -> Result<bool, RecognizerFailure> {
        (self.f)(input)
    }
}

/// Maximal runs of identical characters, in order.
fn runs(input: &str) -> Vec<(char, usize)> {
    let mut out: Vec<(char, usize)> = Vec::new();
    for c in input.chars() {
        match out.last_mut() {
            Some((last, n)) if *last == c => *n += 1,
            _ => out.push((c, 1)),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Generation and suggestion rules
// ---------------------------------------------------------------------------

/// How to synthesize a canonical string of a requested length when the
/// catalog has no precomputed example for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum GenerationRule {
    /// `first^floor(n/2) second^(n - floor(n/2))`; odd lengths favor `second`.
    SplitHalves { first: char, second: char },
    /// `floor(n/2)` copies of `first second`, plus `first` when `n` is odd.
    AlternatingPair { first: char, second: char },
    /// `fill^floor(n/2)`, `center` when `n` is odd, then the mirrored half.
    Mirror { fill: char, center: char },
    /// `n` split evenly across the symbols; the remainder goes to the
    /// trailing blocks.
    EqualBlocks { symbols: Vec<char> },
}

/// A structural hint for a decomposition that pumps cleanly within the
/// language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SuggestionRule {
    /// `x = ""`, `y` = the leading symbol.
    LeadingSymbol { symbol: char },
    /// `x = ""`, `y` = the leading block.
    LeadingBlock { block: String },
    /// On `left^n right^n`: `v` = last `left`, `x` = first `right`.
    BalancedCenter { left: char, right: char },
    /// On a palindrome: `v`/`x` straddle the center.
    MirrorCenter,
}

// ---------------------------------------------------------------------------
// Language definition
// ---------------------------------------------------------------------------

/// One catalog entry.
#[derive(Debug)]
pub struct LanguageDefinition {
    id: String,
    name: String,
    description: String,
    formal_type: FormalType,
    pumping_length: NonZeroUsize,
    sample_strings: Vec<String>,
    counter_examples: Vec<String>,
    length_examples: BTreeMap<usize, String>,
    generation: Option<GenerationRule>,
    suggestion: Option<SuggestionRule>,
    recognizer: Box<dyn Recognizer>,
}

impl LanguageDefinition {
    /// Creates a definition with no examples or rules; the display name
    /// defaults to the id.
    pub fn new(
        id: impl Into<String>,
        formal_type: FormalType,
        pumping_length: NonZeroUsize,
        recognizer: impl Recognizer + 'static,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            formal_type,
            pumping_length,
            sample_strings: Vec::new(),
            counter_examples: Vec::new(),
            length_examples: BTreeMap::new(),
            generation: None,
            suggestion: None,
            recognizer: Box::new(recognizer),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sample_strings = samples.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_counter_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.counter_examples = examples.into_iter().map(Into::into).collect();
        self
    }

    /// Registers a precomputed canonical string; its length is the key.
    pub fn with_length_example(mut self, example: impl Into<String>) -> Self {
        let example = example.into();
        self.length_examples.insert(example.chars().count(), example);
        self
    }

    pub fn with_generation(mut self, rule: GenerationRule) -> Self {
        self.generation = Some(rule);
        self
    }

    pub fn with_suggestion(mut self, rule: SuggestionRule) -> Self {
        self.suggestion = Some(rule);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn formal_type(&self) -> FormalType {
        self.formal_type
    }

    /// Default lemma shape for testing this language.
    pub fn shape(&self) -> Shape {
        self.formal_type.lemma_shape()
    }

    /// The bound `p` from the pumping lemma; always at least 1.
    pub fn pumping_length(&self) -> usize {
        self.pumping_length.get()
    }

    pub fn sample_strings(&self) -> &[String] {
        &self.sample_strings
    }

    pub fn counter_examples(&self) -> &[String] {
        &self.counter_examples
    }

    /// Precomputed canonical example of exactly `length` characters.
    pub fn length_example(&self, length: usize) -> Option<&str> {
        self.length_examples.get(&length).map(String::as_str)
    }

    pub fn generation(&self) -> Option<&GenerationRule> {
        self.generation.as_ref()
    }

    pub fn suggestion(&self) -> Option<&SuggestionRule> {
        self.suggestion.as_ref()
    }

    /// Runs the bound recognizer on `input`.
    pub fn recognize(&self, input: &str) -> Result<bool, RecognizerFailure> {
        self.recognizer.recognize(input)
    }

    /// Serializable view for listings.
    pub fn summary(&self) -> LanguageSummary {
        LanguageSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            formal_type: self.formal_type,
            pumping_length: self.pumping_length(),
            sample_strings: self.sample_strings.clone(),
            counter_examples: self.counter_examples.clone(),
        }
    }
}

/// Plain-data view of a [`LanguageDefinition`], without its recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub formal_type: FormalType,
    pub pumping_length: usize,
    pub sample_strings: Vec<String>,
    pub counter_examples: Vec<String>,
}

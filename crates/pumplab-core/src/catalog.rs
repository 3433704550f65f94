//! The language catalog: a read-only registry of [`LanguageDefinition`]s.
//!
//! Definitions are stored in an [`IndexMap`] so listings follow registration
//! order. A catalog is assembled once through [`CatalogBuilder`] and then only
//! read; [`Catalog::standard`] returns the process-wide built-in catalog.

use std::num::NonZeroUsize;
use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::error::PumpError;
use crate::language::{
    EqualRunsRecognizer, GenerationRule, LanguageDefinition, PalindromeRecognizer,
    PatternRecognizer, SuggestionRule,
};
use crate::types::FormalType;

/// Registry of languages keyed by id.
#[derive(Debug, Default)]
pub struct Catalog {
    languages: IndexMap<String, LanguageDefinition>,
}

impl Catalog {
    /// The built-in catalog, constructed on first use and shared for the
    /// lifetime of the process.
    pub fn standard() -> &'static Catalog {
        static STANDARD: OnceLock<Catalog> = OnceLock::new();
        STANDARD.get_or_init(|| {
            standard_languages()
                .into_iter()
                .fold(Catalog::builder(), CatalogBuilder::register)
                .build()
        })
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Looks up a language by id.
    pub fn lookup(&self, id: &str) -> Result<&LanguageDefinition, PumpError> {
        self.languages
            .get(id)
            .ok_or_else(|| PumpError::NotFound { id: id.to_string() })
    }

    pub fn get(&self, id: &str) -> Option<&LanguageDefinition> {
        self.languages.get(id)
    }

    /// All languages of one formal type, in registration order.
    pub fn list_by_type(&self, formal_type: FormalType) -> Vec<&LanguageDefinition> {
        self.languages
            .values()
            .filter(|lang| lang.formal_type() == formal_type)
            .collect()
    }

    /// All languages in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageDefinition> {
        self.languages.values()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Accumulates definitions before freezing them into a [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    languages: IndexMap<String, LanguageDefinition>,
}

impl CatalogBuilder {
    /// Adds a definition. Re-registering an id replaces the definition but
    /// keeps its original position.
    pub fn register(mut self, definition: LanguageDefinition) -> Self {
        self.languages
            .insert(definition.id().to_string(), definition);
        self
    }

    pub fn build(self) -> Catalog {
        Catalog {
            languages: self.languages,
        }
    }
}

fn pumping_length(p: usize) -> NonZeroUsize {
    NonZeroUsize::new(p).unwrap_or(NonZeroUsize::MIN)
}

/// The fixed table behind [`Catalog::standard`].
fn standard_languages() -> Vec<LanguageDefinition> {
    vec![
        LanguageDefinition::new(
            "a*b*",
            FormalType::Regular,
            pumping_length(2),
            PatternRecognizer::new("a*b*"),
        )
        .with_description("Zero or more a's followed by zero or more b's")
        .with_samples(["", "a", "b", "ab", "aabb", "aaaabbbb"])
        .with_counter_examples(["ba", "aba", "abab"])
        .with_length_example("abb")
        .with_length_example("aabb")
        .with_length_example("aaabb")
        .with_length_example("aaabbb")
        .with_length_example("aaaabbbb")
        .with_length_example("aaaaabbbbb")
        .with_generation(GenerationRule::SplitHalves {
            first: 'a',
            second: 'b',
        })
        .with_suggestion(SuggestionRule::LeadingSymbol { symbol: 'a' }),
        LanguageDefinition::new(
            "(ab)*",
            FormalType::Regular,
            pumping_length(3),
            PatternRecognizer::new("(ab)*"),
        )
        .with_description("Zero or more repetitions of \"ab\"")
        .with_samples(["", "ab", "abab", "ababab"])
        .with_counter_examples(["a", "b", "aab", "abb", "ba"])
        .with_length_example("abab")
        .with_length_example("ababab")
        .with_length_example("abababab")
        .with_length_example("ababababab")
        .with_generation(GenerationRule::AlternatingPair {
            first: 'a',
            second: 'b',
        })
        .with_suggestion(SuggestionRule::LeadingBlock {
            block: "ab".to_string(),
        }),
        LanguageDefinition::new(
            "a^nb^n",
            FormalType::ContextFree,
            pumping_length(3),
            EqualRunsRecognizer::new(['a', 'b']),
        )
        .with_name("a^n b^n")
        .with_description("Equal number of a's followed by equal number of b's")
        .with_samples(["", "ab", "aabb", "aaabbb", "aaaabbbb"])
        .with_counter_examples(["a", "b", "aab", "abb", "abab"])
        .with_length_example("aabb")
        .with_length_example("aaabbb")
        .with_length_example("aaaabbbb")
        .with_length_example("aaaaabbbbb")
        .with_generation(GenerationRule::SplitHalves {
            first: 'a',
            second: 'b',
        })
        .with_suggestion(SuggestionRule::BalancedCenter {
            left: 'a',
            right: 'b',
        }),
        LanguageDefinition::new(
            "palindromes",
            FormalType::ContextFree,
            pumping_length(4),
            PalindromeRecognizer,
        )
        .with_name("Palindromes")
        .with_description("Strings that read the same forwards and backwards")
        .with_samples(["", "a", "aa", "aba", "abba", "abcba"])
        .with_counter_examples(["ab", "abc", "abcd"])
        .with_length_example("aba")
        .with_length_example("abba")
        .with_length_example("abcba")
        .with_length_example("abccba")
        .with_length_example("abcdcba")
        .with_generation(GenerationRule::Mirror {
            fill: 'a',
            center: 'c',
        })
        .with_suggestion(SuggestionRule::MirrorCenter),
        LanguageDefinition::new(
            "a^nb^nc^n",
            FormalType::NeitherCflNorRegular,
            pumping_length(4),
            EqualRunsRecognizer::new(['a', 'b', 'c']),
        )
        .with_name("a^n b^n c^n")
        .with_description("Equal number of a's, b's, and c's (NOT context-free)")
        .with_samples(["", "abc", "aabbcc", "aaabbbccc"])
        .with_counter_examples(["ab", "aab", "abb", "abcc", "aabbc"])
        .with_generation(GenerationRule::EqualBlocks {
            symbols: vec!['a', 'b', 'c'],
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::FnRecognizer;

    #[test]
    fn standard_catalog_registration_order() {
        let ids: Vec<&str> = Catalog::standard().iter().map(|l| l.id()).collect();
        assert_eq!(
            ids,
            vec!["a*b*", "(ab)*", "a^nb^n", "palindromes", "a^nb^nc^n"]
        );
    }

    #[test]
    fn lookup_unknown_is_not_found() {
        let err = Catalog::standard().lookup("a^nb^nd^n").unwrap_err();
        assert_eq!(
            err,
            PumpError::NotFound {
                id: "a^nb^nd^n".into()
            }
        );
    }

    #[test]
    fn list_by_type_is_stable() {
        let catalog = Catalog::standard();
        let regular: Vec<&str> = catalog
            .list_by_type(FormalType::Regular)
            .iter()
            .map(|l| l.id())
            .collect();
        assert_eq!(regular, vec!["a*b*", "(ab)*"]);

        let cfl: Vec<&str> = catalog
            .list_by_type(FormalType::ContextFree)
            .iter()
            .map(|l| l.id())
            .collect();
        assert_eq!(cfl, vec!["a^nb^n", "palindromes"]);

        assert_eq!(catalog.list_by_type(FormalType::NeitherCflNorRegular).len(), 1);
    }

    #[test]
    fn samples_are_members_and_counter_examples_are_not() {
        for lang in Catalog::standard().iter() {
            for s in lang.sample_strings() {
                assert_eq!(lang.recognize(s), Ok(true), "{} sample {:?}", lang.id(), s);
            }
            for s in lang.counter_examples() {
                assert_eq!(
                    lang.recognize(s),
                    Ok(false),
                    "{} counter-example {:?}",
                    lang.id(),
                    s
                );
            }
            assert!(lang.pumping_length() >= 1);
        }
    }

    #[test]
    fn builder_replaces_in_place() {
        let catalog = Catalog::builder()
            .register(LanguageDefinition::new(
                "first",
                FormalType::Regular,
                NonZeroUsize::MIN,
                PatternRecognizer::new("a*"),
            ))
            .register(LanguageDefinition::new(
                "second",
                FormalType::Regular,
                NonZeroUsize::MIN,
                PatternRecognizer::new("b*"),
            ))
            .register(LanguageDefinition::new(
                "first",
                FormalType::ContextFree,
                NonZeroUsize::MIN,
                FnRecognizer::new("always", |_: &str| Ok(true)),
            ))
            .build();

        let ids: Vec<&str> = catalog.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(
            catalog.get("first").map(|l| l.formal_type()),
            Some(FormalType::ContextFree)
        );
    }
}

//! Canonical sample generation.
//!
//! [`generate_sample`] is deterministic for a fixed `(language, length)`:
//! it prefers the language's precomputed example of that length and
//! otherwise synthesizes one from the language's [`GenerationRule`].
//!
//! [`random_sample`] picks among the language's sample strings with a
//! seeded ChaCha8 generator, so a given seed always yields the same pick.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use pumplab_core::catalog::Catalog;
use pumplab_core::error::PumpError;
use pumplab_core::language::{GenerationRule, LanguageDefinition};

/// Configuration for [`random_sample`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Seed for the ChaCha8 generator.
    pub seed: u64,
}

/// Canonical member string of `length` characters for language `id`.
pub fn generate_sample(catalog: &Catalog, id: &str, length: usize) -> Result<String, PumpError> {
    let lang = catalog.lookup(id)?;
    generate_for(lang, length)
}

/// [`generate_sample`] for an already resolved language.
pub fn generate_for(lang: &LanguageDefinition, length: usize) -> Result<String, PumpError> {
    if let Some(example) = lang.length_example(length) {
        tracing::debug!(language = lang.id(), length, "using precomputed example");
        return Ok(example.to_string());
    }
    match lang.generation() {
        Some(rule) => Ok(synthesize(rule, length)),
        None => Err(PumpError::UnsupportedGeneration {
            language: lang.id().to_string(),
            length,
        }),
    }
}

/// Builds a string of exactly `length` characters following `rule`.
pub fn synthesize(rule: &GenerationRule, length: usize) -> String {
    let half = length / 2;
    let odd = length % 2 == 1;
    match rule {
        GenerationRule::SplitHalves { first, second } => {
            let mut s = run(*first, half);
            s.push_str(&run(*second, length - half));
            s
        }
        GenerationRule::AlternatingPair { first, second } => {
            let mut s: String = std::iter::repeat([*first, *second])
                .take(half)
                .flatten()
                .collect();
            if odd {
                s.push(*first);
            }
            s
        }
        GenerationRule::Mirror { fill, center } => {
            let left = run(*fill, half);
            let mut s = left.clone();
            if odd {
                s.push(*center);
            }
            s.extend(left.chars().rev());
            s
        }
        GenerationRule::EqualBlocks { symbols } => {
            if symbols.is_empty() {
                return String::new();
            }
            let k = symbols.len();
            let base = length / k;
            let extra = length % k;
            symbols
                .iter()
                .enumerate()
                .map(|(idx, c)| {
                    let bump = usize::from(idx >= k - extra);
                    run(*c, base + bump)
                })
                .collect()
        }
    }
}

fn run(c: char, n: usize) -> String {
    std::iter::repeat(c).take(n).collect()
}

/// Picks one of the language's sample strings.
///
/// Non-empty samples are preferred; the empty string is only returned when
/// it is the sole kind of sample the language lists.
pub fn random_sample(catalog: &Catalog, id: &str, config: &SampleConfig) -> Result<String, PumpError> {
    let lang = catalog.lookup(id)?;
    let samples = lang.sample_strings();
    let non_empty: Vec<&String> = samples.iter().filter(|s| !s.is_empty()).collect();
    let pool: Vec<&String> = if non_empty.is_empty() {
        samples.iter().collect()
    } else {
        non_empty
    };
    if pool.is_empty() {
        return Err(PumpError::UnsupportedGeneration {
            language: lang.id().to_string(),
            length: 0,
        });
    }
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let pick = pool[rng.gen_range(0..pool.len())].clone();
    tracing::debug!(language = lang.id(), seed = config.seed, sample = %pick, "random sample");
    Ok(pick)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use pumplab_core::language::PalindromeRecognizer;
    use pumplab_core::types::FormalType;

    use super::*;

    #[test]
    fn precomputed_examples_win() {
        let catalog = Catalog::standard();
        assert_eq!(generate_sample(catalog, "a^nb^n", 6).unwrap(), "aaabbb");
        assert_eq!(generate_sample(catalog, "a*b*", 3).unwrap(), "abb");
        assert_eq!(generate_sample(catalog, "palindromes", 7).unwrap(), "abcdcba");
    }

    #[test]
    fn synthesized_when_no_example() {
        let catalog = Catalog::standard();
        assert_eq!(generate_sample(catalog, "a^nb^n", 7).unwrap(), "aaabbbb");
        assert_eq!(generate_sample(catalog, "(ab)*", 5).unwrap(), "ababa");
        assert_eq!(generate_sample(catalog, "palindromes", 9).unwrap(), "aaaacaaaa");
        assert_eq!(generate_sample(catalog, "a^nb^nc^n", 6).unwrap(), "aabbcc");
        assert_eq!(generate_sample(catalog, "a*b*", 0).unwrap(), "");
    }

    #[test]
    fn rules_produce_requested_length() {
        let rules = [
            GenerationRule::SplitHalves { first: 'a', second: 'b' },
            GenerationRule::AlternatingPair { first: 'a', second: 'b' },
            GenerationRule::Mirror { fill: 'a', center: 'c' },
            GenerationRule::EqualBlocks { symbols: vec!['a', 'b', 'c'] },
        ];
        for rule in &rules {
            for n in 0..20 {
                assert_eq!(synthesize(rule, n).chars().count(), n, "{rule:?} at {n}");
            }
        }
    }

    #[test]
    fn equal_blocks_remainder_goes_to_trailing_blocks() {
        let rule = GenerationRule::EqualBlocks { symbols: vec!['a', 'b', 'c'] };
        assert_eq!(synthesize(&rule, 7), "aabbccc");
        assert_eq!(synthesize(&rule, 8), "aabbbccc");
    }

    #[test]
    fn deterministic_generation() {
        let catalog = Catalog::standard();
        let first = generate_sample(catalog, "a^nb^n", 6);
        for _ in 0..10 {
            assert_eq!(generate_sample(catalog, "a^nb^n", 6), first);
        }
    }

    #[test]
    fn no_rule_is_unsupported() {
        let catalog = Catalog::builder()
            .register(LanguageDefinition::new(
                "bare",
                FormalType::ContextFree,
                NonZeroUsize::MIN,
                PalindromeRecognizer,
            ))
            .build();
        assert_eq!(
            generate_sample(&catalog, "bare", 4),
            Err(PumpError::UnsupportedGeneration {
                language: "bare".into(),
                length: 4
            })
        );
        assert!(matches!(
            random_sample(&catalog, "bare", &SampleConfig::default()),
            Err(PumpError::UnsupportedGeneration { .. })
        ));
    }

    #[test]
    fn unknown_language() {
        assert_eq!(
            generate_sample(Catalog::standard(), "zzz", 4),
            Err(PumpError::NotFound { id: "zzz".into() })
        );
    }

    #[test]
    fn random_sample_is_seeded_and_non_empty() {
        let catalog = Catalog::standard();
        for seed in 0..32 {
            let config = SampleConfig { seed };
            let a = random_sample(catalog, "a^nb^n", &config).unwrap();
            let b = random_sample(catalog, "a^nb^n", &config).unwrap();
            assert_eq!(a, b);
            assert!(!a.is_empty());
            assert!(catalog.lookup("a^nb^n").unwrap().sample_strings().contains(&a));
        }
    }
}

//! Suggested decompositions that pump cleanly within a language.
//!
//! Each suggestion satisfies both lemma constraints for the language's
//! pumping length and keeps every pumped string inside the language.

use pumplab_core::catalog::Catalog;
use pumplab_core::decomposition::Decomposition;
use pumplab_core::error::PumpError;
use pumplab_core::language::{LanguageDefinition, SuggestionRule};

/// Suggests a decomposition of `source` for language `id`.
///
/// `Ok(None)` means the language has no suggestion rule or the rule does not
/// apply to this source.
pub fn suggest_decomposition(
    catalog: &Catalog,
    id: &str,
    source: &str,
) -> Result<Option<Decomposition>, PumpError> {
    let lang = catalog.lookup(id)?;
    Ok(suggest_for(lang, source))
}

/// [`suggest_decomposition`] for an already resolved language.
pub fn suggest_for(lang: &LanguageDefinition, source: &str) -> Option<Decomposition> {
    let suggestion = apply(lang.suggestion()?, source);
    if suggestion.is_none() {
        tracing::debug!(language = lang.id(), source, "no suggestion applies");
    }
    suggestion
}

fn apply(rule: &SuggestionRule, source: &str) -> Option<Decomposition> {
    match rule {
        SuggestionRule::LeadingSymbol { symbol } => {
            let rest = source.strip_prefix(*symbol)?;
            Some(Decomposition::regular("", symbol.to_string(), rest))
        }
        SuggestionRule::LeadingBlock { block } => {
            if block.is_empty() {
                return None;
            }
            let rest = source.strip_prefix(block.as_str())?;
            Some(Decomposition::regular("", block.as_str(), rest))
        }
        SuggestionRule::BalancedCenter { left, right } => balanced_center(source, *left, *right),
        SuggestionRule::MirrorCenter => mirror_center(source),
    }
}

/// `left^k right^k` with `k ≥ 1`: pump the innermost pair.
fn balanced_center(source: &str, left: char, right: char) -> Option<Decomposition> {
    let k = source.chars().take_while(|&c| c == left).count();
    let tail: Vec<char> = source.chars().skip(k).collect();
    if k == 0 || tail.len() != k || tail.iter().any(|&c| c != right) {
        return None;
    }
    let run = |c: char, n: usize| -> String { std::iter::repeat(c).take(n).collect() };
    Some(Decomposition::context_free(
        run(left, k - 1),
        left.to_string(),
        "",
        right.to_string(),
        run(right, k - 1),
    ))
}

/// Non-empty palindrome: pump the center character, or the two characters
/// either side of the center.
fn mirror_center(source: &str) -> Option<Decomposition> {
    let chars: Vec<char> = source.chars().collect();
    let n = chars.len();
    if n == 0 || !chars.iter().eq(chars.iter().rev()) {
        return None;
    }
    let slice = |from: usize, to: usize| -> String { chars[from..to].iter().collect() };
    let mid = n / 2;
    if n % 2 == 1 {
        Some(Decomposition::context_free(
            slice(0, mid),
            slice(mid, mid + 1),
            "",
            "",
            slice(mid + 1, n),
        ))
    } else {
        Some(Decomposition::context_free(
            slice(0, mid - 1),
            slice(mid - 1, mid),
            "",
            slice(mid, mid + 1),
            slice(mid + 1, n),
        ))
    }
}

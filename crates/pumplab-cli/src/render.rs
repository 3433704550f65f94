//! Plain-text rendering of engine results for terminal output.

use pumplab_check::{AnalysisVerdict, ConstraintReport, LanguageListing, PumpingResult};
use pumplab_core::decomposition::Decomposition;
use pumplab_core::language::LanguageDefinition;
use pumplab_core::types::FormalType;

fn quoted(s: &str) -> String {
    if s.is_empty() {
        "ε".to_string()
    } else {
        format!("\"{}\"", s)
    }
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

/// Joins `lines`, newline-terminating each.
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

fn constraint_lines(report: &ConstraintReport) -> impl Iterator<Item = String> + '_ {
    report
        .constraints
        .iter()
        .map(|c| format!("  {} {:<10} {}", mark(c.satisfied), c.name, c.value))
}

pub fn listing(groups: &[(FormalType, Vec<LanguageListing>)]) -> String {
    let mut lines = Vec::new();
    for (formal_type, langs) in groups {
        lines.push(format!("{}:", formal_type));
        if langs.is_empty() {
            lines.push("  (none)".to_string());
        }
        lines.extend(langs.iter().map(|lang| {
            if lang.name == lang.id {
                format!("  {}", lang.id)
            } else {
                format!("  {:<14} {}", lang.id, lang.name)
            }
        }));
    }
    block(lines)
}

pub fn language(lang: &LanguageDefinition) -> String {
    let join = |items: &[String]| -> String {
        items.iter().map(|s| quoted(s)).collect::<Vec<_>>().join(", ")
    };
    let mut lines = vec![format!("{} ({})", lang.name(), lang.id())];
    if !lang.description().is_empty() {
        lines.push(format!("  {}", lang.description()));
    }
    lines.extend([
        format!("  type:            {}", lang.formal_type()),
        format!("  lemma shape:     {}", lang.shape()),
        format!("  pumping length:  {}", lang.pumping_length()),
        format!("  samples:         {}", join(lang.sample_strings())),
        format!("  counter-examples: {}", join(lang.counter_examples())),
    ]);
    block(lines)
}

pub fn report(source: &str, d: &Decomposition, report: &ConstraintReport) -> String {
    let mut lines = vec![
        format!("source:  {}", quoted(source)),
        format!("split:   {}", d.render()),
        format!("p = {}", report.pumping_length),
    ];
    lines.extend(constraint_lines(report));
    if let Some(m) = &report.mismatch {
        lines.push(format!(
            "  ✗ segments concatenate to {}, expected {}",
            quoted(&m.actual),
            quoted(&m.expected)
        ));
    }
    let status = if report.is_valid() {
        "valid decomposition"
    } else {
        "invalid decomposition"
    };
    lines.push(status.to_string());
    block(lines)
}

pub fn result(r: &PumpingResult) -> String {
    let status = match (&r.recognizer_error, r.accepted) {
        (Some(err), _) => format!("error: {}", err),
        (None, Some(true)) => "accepted".to_string(),
        (None, _) => "rejected".to_string(),
    };
    format!("i={:<3} {:<24} {}", r.pump_count, quoted(&r.produced), status)
}

pub fn verdict(d: &Decomposition, v: &AnalysisVerdict) -> String {
    let mut lines = vec![
        format!("{} [{}], source {}", v.language, v.formal_type, quoted(&v.source)),
        format!("split: {}", d.render()),
    ];
    lines.extend(constraint_lines(&v.constraints));
    lines.push(String::new());
    lines.extend(v.results.iter().map(|r| format!("  {}", result(r))));
    lines.push(String::new());
    lines.push(v.conclusion.clone());
    lines.push(v.explanation.clone());
    lines.extend(v.violation_details.clone());
    block(lines)
}

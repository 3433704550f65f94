//! Pumping lemma workbench CLI.
//!
//! Provides the `pumplab` binary, a thin presentation layer over
//! [`PumpingService`]. Every subcommand prints plain text by default or
//! pretty JSON with `--json`.
//!
//! Reads configuration from environment variables:
//! - `PUMPLAB_LOG`: maximum log level written to stderr (default: "warn")
//! - `PUMPLAB_SEED`: seed for `sample --random` (default: "0")
//! - `PUMPLAB_PUMP_COUNTS`: comma-separated sweep for `analyze` (default: "0,1,2,3,4")
//!
//! Exit codes: 0 = success, 1 = user error, 2 = recognizer failure or
//! degraded verdict, 3 = output serialization failure.

mod render;

use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use pumplab_check::{
    AnalysisConfig, ConstraintReport, LanguageListing, PumpingService, SampleConfig, Session,
    SessionError,
};
use pumplab_core::decomposition::{Decomposition, SegmentLengths};
use pumplab_core::error::PumpError;
use pumplab_core::language::LanguageSummary;
use pumplab_core::types::{FormalType, Shape};

/// Pumping lemma workbench.
#[derive(Parser)]
#[command(name = "pumplab", about = "Explore the pumping lemmas for regular and context-free languages")]
struct Cli {
    /// Print JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List catalog languages, grouped by formal type.
    List {
        /// Only list one formal type: regular, context-free or neither.
        #[arg(short = 't', long = "type")]
        formal_type: Option<FormalType>,
    },

    /// Show one language's definition.
    Show { id: String },

    /// Check a decomposition against a language's pumping length.
    Validate {
        id: String,
        source: String,

        /// Segment lengths: `x,y` or `u,v,w,x`.
        #[arg(short, long)]
        lengths: String,
    },

    /// Pump a decomposition of a string.
    Pump {
        source: String,

        /// Segment lengths: `x,y` or `u,v,w,x` (default: initial split).
        #[arg(short, long)]
        lengths: Option<String>,

        /// Pump count i.
        #[arg(short, long, allow_negative_numbers = true, default_value_t = 1)]
        count: i64,

        /// Lemma shape when no lengths are given: regular or context-free.
        #[arg(long)]
        shape: Option<Shape>,
    },

    /// Test whether a string belongs to a language.
    Test { id: String, candidate: String },

    /// Produce a canonical member string.
    Sample {
        id: String,

        /// Length of the generated string.
        #[arg(short, long, default_value_t = 6)]
        length: usize,

        /// Pick one of the language's sample strings instead.
        #[arg(long)]
        random: bool,

        /// Seed for `--random` (default: $PUMPLAB_SEED).
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Pump a decomposition over several counts and report a verdict.
    Analyze {
        id: String,
        source: String,

        /// Segment lengths: `x,y` or `u,v,w,x` (default: initial split).
        #[arg(short, long)]
        lengths: Option<String>,

        /// Comma-separated pump counts (default: $PUMPLAB_PUMP_COUNTS).
        #[arg(short, long, allow_hyphen_values = true)]
        counts: Option<String>,
    },

    /// Suggest a decomposition that pumps cleanly.
    Suggest { id: String, source: String },

    /// Walk through a full session on a generated sample.
    Walkthrough {
        id: String,

        /// Length of the generated sample.
        #[arg(short, long, default_value_t = 6)]
        length: usize,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Pump(#[from] PumpError),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("{0}")]
    Usage(String),

    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Pump(e) | CliError::Session(SessionError::Pump(e))
                if e.is_recognizer_error() =>
            {
                2
            }
            CliError::Output(_) => 3,
            _ => 1,
        }
    }
}

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct EnvConfig {
    seed: u64,
    pump_counts: Vec<i64>,
}

impl EnvConfig {
    fn from_env() -> Self {
        let seed = match std::env::var("PUMPLAB_SEED") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("ignoring invalid PUMPLAB_SEED '{}'", raw);
                SampleConfig::default().seed
            }),
            Err(_) => SampleConfig::default().seed,
        };
        let pump_counts = match std::env::var("PUMPLAB_PUMP_COUNTS") {
            Ok(raw) => parse_counts(&raw).unwrap_or_else(|e| {
                tracing::warn!("ignoring PUMPLAB_PUMP_COUNTS: {}", e);
                AnalysisConfig::default().pump_counts
            }),
            Err(_) => AnalysisConfig::default().pump_counts,
        };
        Self { seed, pump_counts }
    }
}

fn init_tracing() {
    let level = std::env::var("PUMPLAB_LOG")
        .ok()
        .and_then(|raw| tracing::Level::from_str(raw.trim()).ok())
        .unwrap_or(tracing::Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    let env = EnvConfig::from_env();
    let service = PumpingService::standard();

    let exit_code = match run(service, &env, cli.json, cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

/// Executes one subcommand, returning the exit code on success.
fn run(
    service: PumpingService<'static>,
    env: &EnvConfig,
    json: bool,
    command: Commands,
) -> Result<i32, CliError> {
    match command {
        Commands::List { formal_type } => {
            let types = match formal_type {
                Some(t) => vec![t],
                None => FormalType::ALL.to_vec(),
            };
            let groups: Vec<(FormalType, Vec<LanguageListing>)> = types
                .into_iter()
                .map(|t| (t, service.list_languages(t)))
                .collect();
            emit(json, &groups, || render::listing(&groups))?;
        }

        Commands::Show { id } => {
            let lang = service.get_language(&id)?;
            #[derive(Serialize)]
            struct Shown {
                #[serde(flatten)]
                summary: LanguageSummary,
                shape: Shape,
            }
            let shown = Shown {
                summary: lang.summary(),
                shape: lang.shape(),
            };
            emit(json, &shown, || render::language(lang))?;
        }

        Commands::Validate {
            id,
            source,
            lengths,
        } => {
            let d = parse_lengths(&lengths)?.apply(&source);
            let report = service.validate_decomposition(&id, &source, &d)?;
            #[derive(Serialize)]
            struct Validated<'a> {
                decomposition: &'a Decomposition,
                report: &'a ConstraintReport,
                errors: Vec<String>,
            }
            let out = Validated {
                decomposition: &d,
                report: &report,
                errors: report.errors(),
            };
            emit(json, &out, || render::report(&source, &d, &report))?;
        }

        Commands::Pump {
            source,
            lengths,
            count,
            shape,
        } => {
            let d = decomposition_for(&source, lengths.as_deref(), shape, Shape::Regular)?;
            let produced = service.pump(&d, count)?;
            #[derive(Serialize)]
            struct Pumped<'a> {
                decomposition: &'a Decomposition,
                count: i64,
                produced: &'a str,
            }
            let out = Pumped {
                decomposition: &d,
                count,
                produced: &produced,
            };
            emit(json, &out, || {
                format!("{}\ni={} -> {}\n", d.render(), count, produced)
            })?;
        }

        Commands::Test { id, candidate } => {
            let outcome = service.test_membership(&id, &candidate)?;
            #[derive(Serialize)]
            struct Tested<'a> {
                language: &'a str,
                candidate: &'a str,
                accepted: bool,
            }
            let out = Tested {
                language: &id,
                candidate: &candidate,
                accepted: outcome.accepted,
            };
            emit(json, &out, || {
                let verb = if outcome.accepted { "accepted" } else { "rejected" };
                format!("\"{}\" {} by {}\n", candidate, verb, id)
            })?;
        }

        Commands::Sample {
            id,
            length,
            random,
            seed,
        } => {
            let sample = if random {
                let config = SampleConfig {
                    seed: seed.unwrap_or(env.seed),
                };
                service.random_sample(&id, &config)?
            } else {
                service.generate_sample(&id, length)?
            };
            emit(json, &sample, || format!("{}\n", sample))?;
        }

        Commands::Analyze {
            id,
            source,
            lengths,
            counts,
        } => {
            let lang = service.get_language(&id)?;
            let d = decomposition_for(&source, lengths.as_deref(), None, lang.shape())?;
            let counts = match counts {
                Some(raw) => parse_counts(&raw)?,
                None => env.pump_counts.clone(),
            };
            let verdict = service.analyze(&id, &d, &counts)?;
            emit(json, &verdict, || render::verdict(&d, &verdict))?;
            if verdict.degraded {
                return Ok(2);
            }
        }

        Commands::Suggest { id, source } => {
            let suggestion = service.suggest(&id, &source)?;
            let report = suggestion
                .as_ref()
                .map(|d| service.validate_decomposition(&id, &source, d))
                .transpose()?;
            #[derive(Serialize)]
            struct Suggested<'a> {
                decomposition: Option<&'a Decomposition>,
                report: Option<&'a ConstraintReport>,
            }
            let out = Suggested {
                decomposition: suggestion.as_ref(),
                report: report.as_ref(),
            };
            emit(json, &out, || match (&suggestion, &report) {
                (Some(d), Some(r)) => render::report(&source, d, r),
                _ => format!("no suggestion for \"{}\" in {}\n", source, id),
            })?;
        }

        Commands::Walkthrough { id, length } => return walkthrough(service, env, json, &id, length),
    }
    Ok(0)
}

/// Select, generate, split, pump once, then sweep.
fn walkthrough(
    service: PumpingService<'static>,
    env: &EnvConfig,
    json: bool,
    id: &str,
    length: usize,
) -> Result<i32, CliError> {
    let catalog = service.catalog();
    let session = Session::new()
        .select_language(catalog, id)?
        .with_generated_sample(catalog, length)?;
    let session = match service.suggest(id, session.source())? {
        Some(d) => session.with_lengths(&lengths_of(&d)),
        None => session,
    };
    let session = session.with_pump_count(2)?.pump_current(catalog)?;
    let config = AnalysisConfig {
        pump_counts: env.pump_counts.clone(),
    };
    let session = session.test_all(catalog, &config)?;
    let report = session.constraints(catalog)?;

    emit(json, &session, || {
        let mut out = render::report(session.source(), session.decomposition(), &report);
        if let Some(r) = session.last_result() {
            out.push_str(&format!("\npumped once: {}\n", render::result(r)));
        }
        if let Some(v) = session.last_verdict() {
            out.push('\n');
            out.push_str(&render::verdict(session.decomposition(), v));
        }
        out
    })?;

    let degraded = session.last_verdict().is_some_and(|v| v.degraded);
    Ok(if degraded { 2 } else { 0 })
}

/// Prints `value` as pretty JSON, or the text rendering.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

/// Builds a decomposition from explicit lengths, or the initial split for
/// `shape` (falling back to `default_shape`).
fn decomposition_for(
    source: &str,
    lengths: Option<&str>,
    shape: Option<Shape>,
    default_shape: Shape,
) -> Result<Decomposition, CliError> {
    match lengths {
        Some(raw) => {
            let lengths = parse_lengths(raw)?;
            if let Some(shape) = shape {
                if shape != lengths.shape() {
                    return Err(CliError::Usage(format!(
                        "--lengths '{}' describes a {} split but --shape is {}",
                        raw,
                        lengths.shape().class_name(),
                        shape.class_name()
                    )));
                }
            }
            Ok(lengths.apply(source))
        }
        None => Ok(Decomposition::initial(
            shape.unwrap_or(default_shape),
            source,
        )),
    }
}

/// The free segment lengths of an existing decomposition.
fn lengths_of(d: &Decomposition) -> SegmentLengths {
    match d {
        Decomposition::Regular(r) => SegmentLengths::Regular {
            x: r.x.chars().count(),
            y: r.y.chars().count(),
        },
        Decomposition::ContextFree(c) => SegmentLengths::ContextFree {
            u: c.u.chars().count(),
            v: c.v.chars().count(),
            w: c.w.chars().count(),
            x: c.x.chars().count(),
        },
    }
}

/// Parse `x,y` or `u,v,w,x`.
fn parse_lengths(s: &str) -> Result<SegmentLengths, CliError> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim().parse::<usize>().map_err(|_| {
                CliError::Usage(format!("invalid segment length '{}' in '{}'", part.trim(), s))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    SegmentLengths::from_slice(&values).ok_or_else(|| {
        CliError::Usage(format!(
            "expected 2 lengths (x,y) or 4 lengths (u,v,w,x), got {}",
            values.len()
        ))
    })
}

/// Parse a comma-separated list of pump counts. Negative counts parse here
/// and are rejected by the engine.
fn parse_counts(s: &str) -> Result<Vec<i64>, CliError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| CliError::Usage(format!("invalid pump count '{}'", part)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_by_arity() {
        assert_eq!(
            parse_lengths("1, 1").unwrap(),
            SegmentLengths::Regular { x: 1, y: 1 }
        );
        assert_eq!(
            parse_lengths("1,1,1,1").unwrap(),
            SegmentLengths::ContextFree { u: 1, v: 1, w: 1, x: 1 }
        );
        assert!(matches!(parse_lengths("1,2,3"), Err(CliError::Usage(_))));
        assert!(matches!(parse_lengths("1,-2"), Err(CliError::Usage(_))));
    }

    #[test]
    fn counts_keep_negatives_for_the_engine() {
        assert_eq!(parse_counts("0, 1,2").unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_counts("-1,2").unwrap(), vec![-1, 2]);
        assert_eq!(parse_counts("").unwrap(), Vec::<i64>::new());
        assert!(parse_counts("1,two").is_err());
    }

    #[test]
    fn shape_and_lengths_must_agree() {
        let err = decomposition_for("aaabbb", Some("1,1"), Some(Shape::ContextFree), Shape::Regular)
            .unwrap_err();
        assert_eq!(err.exit_code(), 1);

        let d = decomposition_for("aaabbb", None, Some(Shape::ContextFree), Shape::Regular).unwrap();
        assert_eq!(d.shape(), Shape::ContextFree);
    }

    #[test]
    fn exit_codes() {
        let recognizer = PumpError::RecognizerError {
            language: "x".into(),
            message: "boom".into(),
        };
        assert_eq!(CliError::from(recognizer.clone()).exit_code(), 2);
        assert_eq!(CliError::from(SessionError::Pump(recognizer)).exit_code(), 2);
        assert_eq!(
            CliError::from(PumpError::NotFound { id: "x".into() }).exit_code(),
            1
        );
        assert_eq!(CliError::from(SessionError::NoLanguage).exit_code(), 1);
    }

    #[test]
    fn lengths_of_round_trips_through_apply() {
        let d = Decomposition::context_free("aa", "a", "", "b", "bb");
        assert_eq!(lengths_of(&d).apply("aaabbb"), d);
    }

    #[test]
    fn walkthrough_runs_on_every_standard_language() {
        let env = EnvConfig {
            seed: 0,
            pump_counts: vec![0, 1, 2],
        };
        for lang in PumpingService::standard().catalog().iter() {
            let code = walkthrough(PumpingService::standard(), &env, true, lang.id(), 6).unwrap();
            assert_eq!(code, 0, "{}", lang.id());
        }
    }

    #[test]
    fn cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["pumplab", "pump", "ab", "-l", "0,1", "-c", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Pump { count: -1, .. }));

        let cli = Cli::try_parse_from(["pumplab", "list", "--type", "cfl", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::List {
                formal_type: Some(FormalType::ContextFree)
            }
        ));
    }
}

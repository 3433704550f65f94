//! Formal language classes and pumping-lemma shapes.
//!
//! A [`FormalType`] describes what a language *is*; a [`Shape`] describes
//! which lemma is being applied to it. The two are related but distinct: a
//! language that is neither regular nor context-free is still tested with
//! the context-free lemma to exhibit the failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The formal class of a language in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormalType {
    /// Recognizable by a finite automaton.
    Regular,
    /// Generated by a context-free grammar but not regular.
    ContextFree,
    /// Neither context-free nor regular (e.g. `a^n b^n c^n`).
    NeitherCflNorRegular,
}

impl FormalType {
    /// All formal types in catalog display order.
    pub const ALL: [FormalType; 3] = [
        FormalType::Regular,
        FormalType::ContextFree,
        FormalType::NeitherCflNorRegular,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            FormalType::Regular => "Regular",
            FormalType::ContextFree => "Context-Free",
            FormalType::NeitherCflNorRegular => "Neither CFL nor Regular",
        }
    }

    /// The lemma shape used by default when testing a language of this type.
    pub fn lemma_shape(self) -> Shape {
        match self {
            FormalType::Regular => Shape::Regular,
            FormalType::ContextFree | FormalType::NeitherCflNorRegular => Shape::ContextFree,
        }
    }
}

impl fmt::Display for FormalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular" => Ok(FormalType::Regular),
            "context-free" | "contextfree" | "cfl" => Ok(FormalType::ContextFree),
            "neither" | "non-cfl" | "neither-cfl-nor-regular" => {
                Ok(FormalType::NeitherCflNorRegular)
            }
            _ => Err(format!(
                "invalid formal type '{}', expected regular/context-free/neither",
                s
            )),
        }
    }
}

/// Which pumping lemma a decomposition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// `s = xyz`, pumping `y`.
    Regular,
    /// `s = uvwxy`, pumping `v` and `x` together.
    ContextFree,
}

impl Shape {
    /// Segment names in concatenation order.
    pub fn segment_names(self) -> &'static [&'static str] {
        match self {
            Shape::Regular => &["x", "y", "z"],
            Shape::ContextFree => &["u", "v", "w", "x", "y"],
        }
    }

    /// Number of leading segments whose lengths are chosen explicitly; the
    /// trailing segment always takes the remainder of the source.
    pub fn free_segments(self) -> usize {
        self.segment_names().len() - 1
    }

    /// Class name used in narrative text ("regular" / "context-free").
    pub fn class_name(self) -> &'static str {
        match self {
            Shape::Regular => "regular",
            Shape::ContextFree => "context-free",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Regular => f.write_str("xyz"),
            Shape::ContextFree => f.write_str("uvwxy"),
        }
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular" | "xyz" => Ok(Shape::Regular),
            "context-free" | "contextfree" | "uvwxy" => Ok(Shape::ContextFree),
            _ => Err(format!(
                "invalid shape '{}', expected regular/xyz or context-free/uvwxy",
                s
            )),
        }
    }
}

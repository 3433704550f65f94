//! String decompositions for the two pumping lemmas.
//!
//! A [`Decomposition`] is a tagged split of a source string: `x/y/z` for the
//! regular lemma or `u/v/w/x/y` for the context-free lemma. Decompositions
//! are values; editing one means building a new one, usually from a source
//! string and a set of [`SegmentLengths`].
//!
//! All lengths are measured in characters, not bytes.

use serde::{Deserialize, Serialize};

use crate::error::PumpError;
use crate::types::Shape;

/// `s = xyz`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegularDecomposition {
    pub x: String,
    pub y: String,
    pub z: String,
}

/// `s = uvwxy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextFreeDecomposition {
    pub u: String,
    pub v: String,
    pub w: String,
    pub x: String,
    pub y: String,
}

impl RegularDecomposition {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }
}

impl ContextFreeDecomposition {
    pub fn new(
        u: impl Into<String>,
        v: impl Into<String>,
        w: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
    ) -> Self {
        Self {
            u: u.into(),
            v: v.into(),
            w: w.into(),
            x: x.into(),
            y: y.into(),
        }
    }
}

/// A decomposition of either shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum Decomposition {
    Regular(RegularDecomposition),
    ContextFree(ContextFreeDecomposition),
}

impl From<RegularDecomposition> for Decomposition {
    fn from(d: RegularDecomposition) -> Self {
        Decomposition::Regular(d)
    }
}

impl From<ContextFreeDecomposition> for Decomposition {
    fn from(d: ContextFreeDecomposition) -> Self {
        Decomposition::ContextFree(d)
    }
}

impl Decomposition {
    pub fn regular(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        RegularDecomposition::new(x, y, z).into()
    }

    pub fn context_free(
        u: impl Into<String>,
        v: impl Into<String>,
        w: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
    ) -> Self {
        ContextFreeDecomposition::new(u, v, w, x, y).into()
    }

    /// Splits `source` according to `lengths`; see [`SegmentLengths::apply`].
    pub fn from_lengths(source: &str, lengths: &SegmentLengths) -> Self {
        lengths.apply(source)
    }

    /// The starting decomposition offered for a fresh source string:
    /// `x=1, y=1, z=rest` or `u=1, v=1, w=middle, x=1, y=1`, each clamped to
    /// what the source can supply.
    pub fn initial(shape: Shape, source: &str) -> Self {
        let n = source.chars().count();
        match shape {
            Shape::Regular => SegmentLengths::Regular { x: 1, y: 1 }.apply(source),
            Shape::ContextFree => {
                let u = n.min(1);
                let v = n.saturating_sub(u).min(1);
                let x = n.saturating_sub(u + v + 1).min(1);
                let w = n.saturating_sub(u + v + x + 1);
                SegmentLengths::ContextFree { u, v, w, x }.apply(source)
            }
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Decomposition::Regular(_) => Shape::Regular,
            Decomposition::ContextFree(_) => Shape::ContextFree,
        }
    }

    /// `(name, segment)` pairs in concatenation order.
    pub fn segments(&self) -> Vec<(&'static str, &str)> {
        match self {
            Decomposition::Regular(d) => vec![("x", &d.x), ("y", &d.y), ("z", &d.z)],
            Decomposition::ContextFree(d) => vec![
                ("u", &d.u),
                ("v", &d.v),
                ("w", &d.w),
                ("x", &d.x),
                ("y", &d.y),
            ],
        }
    }

    /// Concatenation of all segments in order.
    pub fn reconstruct(&self) -> String {
        self.segments().into_iter().map(|(_, s)| s).collect()
    }

    /// Character lengths of the segments, in order.
    pub fn lengths(&self) -> Vec<usize> {
        self.segments()
            .into_iter()
            .map(|(_, s)| s.chars().count())
            .collect()
    }

    /// Characters added by each extra pump: `|y|` or `|v| + |x|`.
    pub fn pumped_length(&self) -> usize {
        match self {
            Decomposition::Regular(d) => d.y.chars().count(),
            Decomposition::ContextFree(d) => d.v.chars().count() + d.x.chars().count(),
        }
    }

    /// Checks that the segments concatenate to `source` exactly.
    pub fn ensure_reconstructs(&self, source: &str) -> Result<(), PumpError> {
        let actual = self.reconstruct();
        if actual == source {
            Ok(())
        } else {
            Err(PumpError::DecompositionMismatch {
                expected: source.to_string(),
                actual,
            })
        }
    }

    /// Plain-text rendering, one bracketed group per segment; empty segments
    /// render as `ε`.
    pub fn render(&self) -> String {
        self.segments()
            .into_iter()
            .map(|(name, s)| {
                if s.is_empty() {
                    format!("{}[ε]", name)
                } else {
                    format!("{}[{}]", name, s)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Requested segment lengths; the trailing segment (`z` or `y`) is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum SegmentLengths {
    Regular { x: usize, y: usize },
    ContextFree { u: usize, v: usize, w: usize, x: usize },
}

impl SegmentLengths {
    /// Interprets 2 lengths as `x,y` and 4 lengths as `u,v,w,x`.
    pub fn from_slice(lengths: &[usize]) -> Option<Self> {
        match *lengths {
            [x, y] => Some(SegmentLengths::Regular { x, y }),
            [u, v, w, x] => Some(SegmentLengths::ContextFree { u, v, w, x }),
            _ => None,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            SegmentLengths::Regular { .. } => Shape::Regular,
            SegmentLengths::ContextFree { .. } => Shape::ContextFree,
        }
    }

    fn as_vec(&self) -> Vec<usize> {
        match *self {
            SegmentLengths::Regular { x, y } => vec![x, y],
            SegmentLengths::ContextFree { u, v, w, x } => vec![u, v, w, x],
        }
    }

    /// Splits `source` into segments of the requested lengths.
    ///
    /// Lengths are clamped left to right: each segment takes at most what is
    /// left of the source, and the trailing segment takes the remainder. The
    /// result always concatenates back to `source`.
    pub fn apply(&self, source: &str) -> Decomposition {
        let mut parts = split_clamped(source, &self.as_vec()).into_iter();
        let mut next = || parts.next().unwrap_or_default();
        match self {
            SegmentLengths::Regular { .. } => Decomposition::regular(next(), next(), next()),
            SegmentLengths::ContextFree { .. } => {
                Decomposition::context_free(next(), next(), next(), next(), next())
            }
        }
    }
}

/// Cuts `source` into `lengths.len() + 1` pieces at character boundaries.
fn split_clamped(source: &str, lengths: &[usize]) -> Vec<String> {
    let mut parts = Vec::with_capacity(lengths.len() + 1);
    let mut rest = source;
    for &len in lengths {
        let cut = rest
            .char_indices()
            .nth(len)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(cut);
        parts.push(head.to_string());
        rest = tail;
    }
    parts.push(rest.to_string());
    parts
}

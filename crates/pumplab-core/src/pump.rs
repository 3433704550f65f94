//! Pumped-string construction.
//!
//! Pumping `i` times replaces the repeatable segments with `i` copies of
//! themselves; `i = 0` removes them. Counts arrive as `i64` so that a
//! negative request can be rejected rather than wrapped.
//!
//! The produced length is computed with checked arithmetic before anything
//! is allocated; a result longer than [`MAX_PUMPED_LEN`] bytes is refused.

use crate::decomposition::{ContextFreeDecomposition, Decomposition, RegularDecomposition};
use crate::error::PumpError;

/// Largest pumped string, in bytes, that [`pump`] will build.
pub const MAX_PUMPED_LEN: usize = 1 << 20;

/// Converts a requested pump count into a repetition count.
pub fn pump_count(count: i64) -> Result<usize, PumpError> {
    usize::try_from(count).map_err(|_| PumpError::InvalidPumpCount { count })
}

/// Byte length of `d` pumped `i` times, or `None` on overflow.
pub fn pumped_len(d: &Decomposition, i: usize) -> Option<usize> {
    match d {
        Decomposition::Regular(r) => grown(r.x.len() + r.z.len(), r.y.len(), i),
        Decomposition::ContextFree(c) => {
            grown(c.u.len() + c.w.len() + c.y.len(), c.v.len() + c.x.len(), i)
        }
    }
}

fn grown(fixed: usize, pumped: usize, i: usize) -> Option<usize> {
    pumped.checked_mul(i)?.checked_add(fixed)
}

/// Validates `count` for `d`: non-negative, and the pumped string fits in
/// [`MAX_PUMPED_LEN`].
pub fn check_pump(d: &Decomposition, count: i64) -> Result<usize, PumpError> {
    let i = pump_count(count)?;
    within_limit(pumped_len(d, i), count).map(|_| i)
}

fn within_limit(len: Option<usize>, count: i64) -> Result<usize, PumpError> {
    match len {
        Some(len) if len <= MAX_PUMPED_LEN => Ok(len),
        _ => Err(PumpError::PumpedTooLong {
            count,
            max: MAX_PUMPED_LEN,
        }),
    }
}

/// `x y^i z`; `x z` when `i = 0`.
pub fn pump_regular(d: &RegularDecomposition, count: i64) -> Result<String, PumpError> {
    let i = pump_count(count)?;
    within_limit(grown(d.x.len() + d.z.len(), d.y.len(), i), count)?;
    Ok(format!("{}{}{}", d.x, repeated(&d.y, i), d.z))
}

/// `u v^i w x^i y`; `u w y` when `i = 0`.
pub fn pump_context_free(d: &ContextFreeDecomposition, count: i64) -> Result<String, PumpError> {
    let i = pump_count(count)?;
    within_limit(
        grown(d.u.len() + d.w.len() + d.y.len(), d.v.len() + d.x.len(), i),
        count,
    )?;
    Ok(format!(
        "{}{}{}{}{}",
        d.u,
        repeated(&d.v, i),
        d.w,
        repeated(&d.x, i),
        d.y
    ))
}

/// `s` repeated `i` times; empty for `i = 0`.
fn repeated(s: &str, i: usize) -> String {
    if i == 0 {
        String::new()
    } else {
        s.repeat(i)
    }
}

/// Pumps a decomposition of either shape.
pub fn pump(d: &Decomposition, count: i64) -> Result<String, PumpError> {
    match d {
        Decomposition::Regular(r) => pump_regular(r, count),
        Decomposition::ContextFree(c) => pump_context_free(c, count),
    }
}

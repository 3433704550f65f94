//! Algebraic properties of pumping, checked over arbitrary sources and
//! segment lengths.
//!
//! Decompositions are always built through `SegmentLengths::apply`, so every
//! generated decomposition reconstructs its source.

use proptest::prelude::*;

use pumplab_core::decomposition::{Decomposition, SegmentLengths};
use pumplab_core::error::PumpError;
use pumplab_core::pump::pump;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn source() -> impl Strategy<Value = String> {
    "[abc]{0,12}"
}

fn lengths() -> impl Strategy<Value = SegmentLengths> {
    prop_oneof![
        (0usize..8, 0usize..8).prop_map(|(x, y)| SegmentLengths::Regular { x, y }),
        (0usize..6, 0usize..6, 0usize..6, 0usize..6)
            .prop_map(|(u, v, w, x)| SegmentLengths::ContextFree { u, v, w, x }),
    ]
}

fn decomposition() -> impl Strategy<Value = (String, Decomposition)> {
    (source(), lengths()).prop_map(|(s, l)| {
        let d = l.apply(&s);
        (s, d)
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn applied_lengths_reconstruct_the_source((s, d) in decomposition()) {
        prop_assert_eq!(d.reconstruct(), s.clone());
        prop_assert!(d.ensure_reconstructs(&s).is_ok());
    }

    #[test]
    fn pumping_once_is_identity((s, d) in decomposition()) {
        prop_assert_eq!(pump(&d, 1).unwrap(), s);
    }

    #[test]
    fn pumping_zero_removes_only_the_pumped_segments((_s, d) in decomposition()) {
        let expected: String = match &d {
            Decomposition::Regular(r) => format!("{}{}", r.x, r.z),
            Decomposition::ContextFree(c) => format!("{}{}{}", c.u, c.w, c.y),
        };
        prop_assert_eq!(pump(&d, 0).unwrap(), expected);
    }

    #[test]
    fn growth_is_linear_in_the_pump_count(
        (_s, d) in decomposition(),
        i1 in 1i64..6,
        delta in 1i64..6,
    ) {
        let i2 = i1 + delta;
        let short = pump(&d, i1).unwrap().chars().count();
        let long = pump(&d, i2).unwrap().chars().count();
        prop_assert_eq!(long - short, delta as usize * d.pumped_length());
    }

    #[test]
    fn negative_counts_never_pump((_s, d) in decomposition(), count in i64::MIN..0) {
        prop_assert_eq!(pump(&d, count), Err(PumpError::InvalidPumpCount { count }));
    }
}

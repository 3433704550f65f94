//! The pumping-lemma engine.
//!
//! Built on the data model in `pumplab-core`, this crate answers the
//! questions a workbench asks about a decomposition:
//!
//! - [`validate`]: does it satisfy the lemma's length constraints?
//! - [`membership`]: is a string in the language?
//! - [`generate`]: what is a canonical member of a given length?
//! - [`analyze`]: do the pumped strings stay in the language?
//! - [`suggest`]: which decomposition pumps cleanly?
//!
//! [`session::Session`] threads those calls through an immutable session
//! value, and [`service::PumpingService`] bundles them behind one facade.
//! Every operation is synchronous and free of shared mutable state.

pub mod analyze;
pub mod generate;
pub mod membership;
pub mod service;
pub mod session;
pub mod suggest;
pub mod validate;

pub use analyze::{AnalysisConfig, AnalysisVerdict, PumpingResult};
pub use generate::SampleConfig;
pub use membership::MembershipOutcome;
pub use service::{LanguageListing, PumpingService};
pub use session::{Session, SessionError};
pub use validate::{Constraint, ConstraintReport, Mismatch};

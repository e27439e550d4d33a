//! Closed-set variant registry with exhaustive-match checking
//!
//! Two components: [`registry`] defines immutable closed sets of named,
//! optionally payload-carrying variants, and [`check`] verifies that a
//! match construct over such a set handles every variant. Everything is a
//! pure computation over immutable data; the checker reports defects as
//! structured findings rather than errors, so a front-end can show the full
//! diagnostic picture before rejecting a program or configuration.

pub mod check;
pub mod error;
pub mod registry;
pub mod report;
pub mod span;
pub mod util;

pub use check::{check, ArmPattern, CheckResult, MatchArm};
pub use error::{DefineError, Result, ValueError};
pub use registry::{ClosedType, PayloadType, PayloadValue, Value, Variant};
pub use span::Span;

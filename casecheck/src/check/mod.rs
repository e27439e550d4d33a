//! Match-arm exhaustiveness checking
//!
//! [`check`] verifies that a set of match arms covers every variant of a
//! closed type, or is explicitly escaped by a wildcard arm. It is a pure
//! function: no state survives a call, and it never fails. Every defect it
//! finds is collected into one [`CheckResult`] so a caller gets the complete
//! diagnostic picture from a single invocation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::registry::ClosedType;
use crate::span::Span;

/// What a single arm matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmPattern {
    /// One concrete variant, by name.
    Variant(String),
    /// Catch-all. Must be the last arm; anything after it is unreachable.
    Wildcard,
}

/// One arm of a match construct, paired with its source span when the
/// front-end has one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchArm {
    pub pattern: ArmPattern,
    pub span: Option<Span>,
}

impl MatchArm {
    pub fn variant(name: impl Into<String>) -> Self {
        Self {
            pattern: ArmPattern::Variant(name.into()),
            span: None,
        }
    }

    pub fn wildcard() -> Self {
        Self {
            pattern: ArmPattern::Wildcard,
            span: None,
        }
    }

    pub fn with_span(mut self, span: impl Into<Span>) -> Self {
        self.span = Some(span.into());
        self
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.pattern, ArmPattern::Wildcard)
    }
}

/// Result of an exhaustiveness check
///
/// `ok` answers the exhaustiveness question only: it is true iff `missing`
/// is empty. Duplicate, unreachable, and unknown arms are reported alongside
/// without affecting `ok`; a front-end that wants to reject those too gates
/// on [`CheckResult::is_clean`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the match is exhaustive.
    pub ok: bool,
    /// Uncovered variants, in declaration order. Empty whenever a wildcard
    /// arm is present.
    pub missing: Vec<String>,
    /// Variants named by more than one concrete arm, in declaration order.
    pub duplicate_arms: Vec<String>,
    /// Indices of arms positioned after the first wildcard, ascending.
    pub unreachable_arms: Vec<usize>,
    /// Concrete arm names that are not variants of the checked type, in arm
    /// order.
    pub unknown_arms: Vec<String>,
    /// Variants handled by a concrete arm, in declaration order.
    pub explicit: Vec<String>,
    /// Variants absorbed by a wildcard arm, in declaration order.
    pub implicit: Vec<String>,
}

impl CheckResult {
    /// True iff the check produced no finding of any kind.
    pub fn is_clean(&self) -> bool {
        self.ok
            && self.duplicate_arms.is_empty()
            && self.unreachable_arms.is_empty()
            && self.unknown_arms.is_empty()
    }
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_clean() {
            return write!(f, "exhaustive");
        }
        let mut parts = vec![];
        if !self.missing.is_empty() {
            parts.push(format!("missing case(s): {}", self.missing.join(", ")));
        }
        if !self.duplicate_arms.is_empty() {
            parts.push(format!("duplicate arm(s): {}", self.duplicate_arms.join(", ")));
        }
        if !self.unknown_arms.is_empty() {
            parts.push(format!("unknown arm(s): {}", self.unknown_arms.join(", ")));
        }
        if !self.unreachable_arms.is_empty() {
            let indices: Vec<String> = self.unreachable_arms.iter().map(|i| i.to_string()).collect();
            parts.push(format!("unreachable arm(s) at: {}", indices.join(", ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// Check whether `arms` covers every variant of `ty`.
///
/// Coverage is order-independent: only reachability cares where an arm sits.
/// A wildcard arm forces `missing` empty but the explicitly covered variants
/// are still recorded, so diagnostics can tell explicit handling from
/// wildcard absorption.
pub fn check(ty: &ClosedType, arms: &[MatchArm]) -> CheckResult {
    let mut covered: HashSet<&str> = HashSet::new();
    let mut duplicated: HashSet<&str> = HashSet::new();
    let mut unknown_arms: Vec<String> = vec![];
    let mut first_wildcard: Option<usize> = None;

    for (i, arm) in arms.iter().enumerate() {
        match &arm.pattern {
            ArmPattern::Wildcard => {
                if first_wildcard.is_none() {
                    first_wildcard = Some(i);
                }
            }
            ArmPattern::Variant(name) => {
                if !ty.contains(name) {
                    if !unknown_arms.iter().any(|n| n == name) {
                        unknown_arms.push(name.clone());
                    }
                } else if !covered.insert(name.as_str()) {
                    duplicated.insert(name.as_str());
                }
            }
        }
    }

    let unreachable_arms: Vec<usize> = match first_wildcard {
        Some(w) => (w + 1..arms.len()).collect(),
        None => vec![],
    };

    // Declaration order drives every variant-keyed list.
    let mut missing = vec![];
    let mut duplicate_arms = vec![];
    let mut explicit = vec![];
    let mut implicit = vec![];

    for variant in ty.variants() {
        let name = variant.name();
        if covered.contains(name) {
            explicit.push(name.to_string());
        } else if first_wildcard.is_some() {
            implicit.push(name.to_string());
        } else {
            missing.push(name.to_string());
        }
        if duplicated.contains(name) {
            duplicate_arms.push(name.to_string());
        }
    }

    CheckResult {
        ok: missing.is_empty(),
        missing,
        duplicate_arms,
        unreachable_arms,
        unknown_arms,
        explicit,
        implicit,
    }
}

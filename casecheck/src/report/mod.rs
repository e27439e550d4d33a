//! Diagnostic rendering
//!
//! Turns a [`CheckResult`] into human-readable ariadne reports over the
//! match construct's source text, and into a stable JSON form for tooling.
//! Arms without spans still produce a report, just without a source label.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use serde_json::json;

use crate::check::{ArmPattern, CheckResult, MatchArm};
use crate::registry::ClosedType;
use crate::util::{suggest_variant, suggestion_hint};

/// Render every finding in `result` as ariadne reports against `source`.
///
/// `filename` and `source` come from the front-end that authored the match
/// construct. Color is disabled so the output is stable for logs and tests.
pub fn render_check(
    ty: &ClosedType,
    arms: &[MatchArm],
    result: &CheckResult,
    filename: &str,
    source: &str,
) -> String {
    let mut buf: Vec<u8> = vec![];
    let config = Config::default().with_color(false);

    if !result.missing.is_empty() {
        Report::build(ReportKind::Error, (filename, arms_extent(arms)))
            .with_config(config)
            .with_message(format!(
                "non-exhaustive match over `{}`: missing case(s): {}",
                ty.name(),
                result.missing.join(", ")
            ))
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
    }

    for name in &result.duplicate_arms {
        let mut report = Report::build(ReportKind::Error, (filename, arms_extent(arms)))
            .with_config(config)
            .with_message(format!("duplicate arm for variant `{name}`"));
        for (occurrence, arm) in concrete_arms_named(arms, name).enumerate() {
            if let Some(span) = arm.span {
                let label = Label::new((filename, span.start..span.end)).with_color(Color::Red);
                report = report.with_label(if occurrence == 0 {
                    label.with_message("first arm for this variant")
                } else {
                    label.with_message("arm repeated here")
                });
            }
        }
        report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
    }

    for name in &result.unknown_arms {
        let suggestion = suggest_variant(name, ty.variants().iter().map(|v| v.name()));
        let message = format!(
            "`{name}` is not a variant of `{}`{}",
            ty.name(),
            suggestion_hint(suggestion)
        );
        let mut report = Report::build(ReportKind::Error, (filename, arms_extent(arms)))
            .with_config(config)
            .with_message(&message);
        if let Some(arm) = concrete_arms_named(arms, name).next()
            && let Some(span) = arm.span
        {
            report = report.with_label(
                Label::new((filename, span.start..span.end))
                    .with_message("unknown variant")
                    .with_color(Color::Red),
            );
        }
        report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
    }

    for &index in &result.unreachable_arms {
        let mut report = Report::build(ReportKind::Warning, (filename, arms_extent(arms)))
            .with_config(config)
            .with_message(format!(
                "arm {index} is unreachable: it follows a wildcard arm"
            ));
        if let Some(span) = arms.get(index).and_then(|a| a.span) {
            report = report.with_label(
                Label::new((filename, span.start..span.end))
                    .with_message("never reached")
                    .with_color(Color::Yellow),
            );
        }
        report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Machine-readable form of a check result.
pub fn check_result_json(result: &CheckResult) -> serde_json::Value {
    json!({
        "ok": result.ok,
        "clean": result.is_clean(),
        "missing": result.missing,
        "duplicate_arms": result.duplicate_arms,
        "unreachable_arms": result.unreachable_arms,
        "unknown_arms": result.unknown_arms,
        "explicit": result.explicit,
        "implicit": result.implicit,
    })
}

/// Merged extent of all spanned arms, for report positioning. Falls back to
/// an empty range when no arm carries a span.
fn arms_extent(arms: &[MatchArm]) -> std::ops::Range<usize> {
    let mut merged: Option<crate::span::Span> = None;
    for arm in arms {
        if let Some(span) = arm.span {
            merged = Some(match merged {
                Some(m) => m.merge(span),
                None => span,
            });
        }
    }
    merged.map(Into::into).unwrap_or(0..0)
}

fn concrete_arms_named<'a>(
    arms: &'a [MatchArm],
    name: &'a str,
) -> impl Iterator<Item = &'a MatchArm> {
    arms.iter()
        .filter(move |arm| matches!(&arm.pattern, ArmPattern::Variant(n) if n == name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{check, MatchArm};
    use crate::registry::ClosedType;

    fn compass() -> ClosedType {
        ClosedType::define_units("CompassPoint", ["north", "south", "east", "west"]).unwrap()
    }

    #[test]
    fn test_missing_case_message() {
        let ty = compass();
        let source = "match direction { north => 1, south => 2 }";
        let arms = vec![
            MatchArm::variant("north").with_span(18..23),
            MatchArm::variant("south").with_span(30..35),
        ];
        let result = check(&ty, &arms);
        let rendered = render_check(&ty, &arms, &result, "demo.cch", source);
        assert!(rendered.contains("missing case(s): east, west"));
    }

    #[test]
    fn test_unknown_arm_gets_suggestion() {
        let ty = compass();
        let source = "match direction { nort => 1 }";
        let arms = vec![MatchArm::variant("nort").with_span(18..22), MatchArm::wildcard()];
        let result = check(&ty, &arms);
        let rendered = render_check(&ty, &arms, &result, "demo.cch", source);
        assert!(rendered.contains("not a variant of `CompassPoint`"));
        assert!(rendered.contains("did you mean `north`?"));
    }

    #[test]
    fn test_unreachable_arm_warning() {
        let ty = compass();
        let source = "match direction { _ => 0, north => 1 }";
        let arms = vec![
            MatchArm::wildcard().with_span(18..19),
            MatchArm::variant("north").with_span(26..31),
        ];
        let result = check(&ty, &arms);
        let rendered = render_check(&ty, &arms, &result, "demo.cch", source);
        assert!(rendered.contains("arm 1 is unreachable"));
    }

    #[test]
    fn test_clean_result_renders_nothing() {
        let ty = compass();
        let arms = vec![
            MatchArm::variant("north"),
            MatchArm::variant("south"),
            MatchArm::variant("east"),
            MatchArm::variant("west"),
        ];
        let result = check(&ty, &arms);
        let rendered = render_check(&ty, &arms, &result, "demo.cch", "");
        assert!(rendered.is_empty());
    }

    #[test]
    fn test_json_export() {
        let ty = compass();
        let arms = vec![MatchArm::variant("north")];
        let result = check(&ty, &arms);
        let value = check_result_json(&result);
        assert_eq!(value["ok"], false);
        assert_eq!(value["missing"], json!(["south", "east", "west"]));
        assert_eq!(value["explicit"], json!(["north"]));
    }
}

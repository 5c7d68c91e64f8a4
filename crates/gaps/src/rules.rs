//! Rule-based method selection for a single gap.
//!
//! Decision table, first match wins:
//!
//! | Gap size | Condition | Method |
//! |----------|-----------|--------|
//! | 1 | | linear |
//! | short | stable | linear |
//! | short | unstable | spline |
//! | medium | stable and consistent trend | linear |
//! | medium | level jump below threshold | polynomial |
//! | medium | otherwise | spline |
//! | long | edge gap | linear |
//! | long | both sides, strong trend on either | polynomial |
//! | long | both sides, otherwise | spline |
//! | long | one side only | linear |

use gapfill_methods::Method;
use serde::Serialize;

use crate::config::RuleThresholds;
use crate::context::LocalContext;

/// The decision-table row that produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    SingleDay,
    ShortStable,
    ShortUnstable,
    MediumStable,
    MediumSmallJump,
    MediumLargeJump,
    LongEdge,
    LongStrongTrend,
    LongComplex,
    LongOneSided,
}

impl Rule {
    /// Method this row selects.
    pub fn method(self) -> Method {
        match self {
            Rule::SingleDay
            | Rule::ShortStable
            | Rule::MediumStable
            | Rule::LongEdge
            | Rule::LongOneSided => Method::Linear,
            Rule::MediumSmallJump | Rule::LongStrongTrend => Method::Polynomial,
            Rule::ShortUnstable | Rule::MediumLargeJump | Rule::LongComplex => Method::Spline,
        }
    }

    fn rationale(self, gap_size: usize) -> String {
        match self {
            Rule::SingleDay => "single missing day: linear interpolation is sufficient".to_string(),
            Rule::ShortStable | Rule::MediumStable => {
                format!("stable trend around a {gap_size}-day gap: linear interpolation is sufficient")
            }
            Rule::ShortUnstable => {
                format!("short {gap_size}-day gap with unstable neighbours: spline for flexibility")
            }
            Rule::MediumSmallJump => {
                format!("medium {gap_size}-day gap with a trend and small level jump: polynomial")
            }
            Rule::MediumLargeJump => {
                format!("medium {gap_size}-day gap with a large level jump: spline")
            }
            Rule::LongEdge => {
                format!("{gap_size}-day gap near the series edge: conservative linear choice")
            }
            Rule::LongStrongTrend => {
                format!("long {gap_size}-day gap with a strong neighbouring trend: polynomial")
            }
            Rule::LongComplex => {
                format!("long {gap_size}-day gap with complex patterns: spline")
            }
            Rule::LongOneSided => {
                format!("{gap_size}-day gap with data on one side only: conservative linear choice")
            }
        }
    }
}

/// Method chosen for one gap, with the row that matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSelection {
    pub method: Method,
    pub rule: Rule,
    /// Human-readable reason for the choice.
    pub rationale: String,
}

/// Selects a method for a gap using the default [`RuleThresholds`].
///
/// Pure: the same context always yields the same selection. Only `linear`,
/// `polynomial` and `spline` are ever chosen.
pub fn select_method(context: &LocalContext) -> MethodSelection {
    select_method_with(context, &RuleThresholds::default())
}

/// Selects a method for a gap using explicit thresholds.
pub fn select_method_with(context: &LocalContext, thresholds: &RuleThresholds) -> MethodSelection {
    let rule = match_rule(context, thresholds);
    MethodSelection {
        method: rule.method(),
        rule,
        rationale: rule.rationale(context.gap_size),
    }
}

fn match_rule(ctx: &LocalContext, t: &RuleThresholds) -> Rule {
    let size = ctx.gap_size;
    if size == 1 {
        Rule::SingleDay
    } else if size <= t.short_gap_max() {
        if ctx.is_stable {
            Rule::ShortStable
        } else {
            Rule::ShortUnstable
        }
    } else if size <= t.medium_gap_max() {
        if ctx.is_stable && ctx.trend_consistency < t.trend_consistency() {
            Rule::MediumStable
        } else if ctx.level_jump < t.level_jump() {
            Rule::MediumSmallJump
        } else {
            Rule::MediumLargeJump
        }
    } else if ctx.is_edge_gap {
        Rule::LongEdge
    } else if ctx.has_before && ctx.has_after {
        if ctx.before.trend.abs() > t.strong_trend() || ctx.after.trend.abs() > t.strong_trend() {
            Rule::LongStrongTrend
        } else {
            Rule::LongComplex
        }
    } else {
        Rule::LongOneSided
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::WindowSummary;

    fn context(gap_size: usize, is_stable: bool, is_edge_gap: bool) -> LocalContext {
        let side = WindowSummary {
            points: 5,
            trend: 0.5,
            volatility: 1.0,
            mean: 10.0,
        };
        LocalContext {
            gap_size,
            before: side,
            after: side,
            has_before: true,
            has_after: true,
            trend_consistency: 0.0,
            level_jump: 0.0,
            is_stable,
            gap_position: if is_edge_gap { 0.05 } else { 0.5 },
            is_edge_gap,
        }
    }

    #[test]
    fn single_day_is_always_linear() {
        for (stable, edge) in [(true, true), (true, false), (false, true), (false, false)] {
            let sel = select_method(&context(1, stable, edge));
            assert_eq!(sel.method, Method::Linear);
            assert_eq!(sel.rule, Rule::SingleDay);
        }
    }

    #[test]
    fn short_gaps_follow_stability() {
        assert_eq!(select_method(&context(2, true, false)).method, Method::Linear);
        assert_eq!(select_method(&context(3, false, false)).method, Method::Spline);
        assert_eq!(select_method(&context(2, false, true)).method, Method::Spline);
    }

    #[test]
    fn medium_gaps() {
        assert_eq!(select_method(&context(5, true, false)).rule, Rule::MediumStable);

        let small_jump = context(5, false, false);
        assert_eq!(select_method(&small_jump).method, Method::Polynomial);

        let mut large_jump = context(5, false, false);
        large_jump.level_jump = 25.0;
        assert_eq!(select_method(&large_jump).method, Method::Spline);

        // Stable but with an inconsistent trend falls through to the jump test.
        let mut inconsistent = context(6, true, false);
        inconsistent.trend_consistency = 6.0;
        assert_eq!(select_method(&inconsistent).rule, Rule::MediumSmallJump);
    }

    #[test]
    fn long_gaps() {
        assert_eq!(select_method(&context(10, true, true)).rule, Rule::LongEdge);
        assert_eq!(select_method(&context(10, false, false)).rule, Rule::LongComplex);

        let mut trending = context(10, false, false);
        trending.after.trend = -7.5;
        assert_eq!(select_method(&trending).method, Method::Polynomial);

        let mut one_sided = context(10, false, false);
        one_sided.has_after = false;
        assert_eq!(select_method(&one_sided).rule, Rule::LongOneSided);
    }

    #[test]
    fn only_three_methods_are_selected() {
        for size in [1, 2, 5, 10] {
            for stable in [true, false] {
                for edge in [true, false] {
                    let m = select_method(&context(size, stable, edge)).method;
                    assert_ne!(m, Method::Log);
                }
            }
        }
    }

    #[test]
    fn same_context_same_selection() {
        for size in [1, 2, 5, 10] {
            for stable in [true, false] {
                for edge in [true, false] {
                    let ctx = context(size, stable, edge);
                    let first = select_method(&ctx);
                    let again = select_method(&ctx.clone());
                    assert_eq!(first, again, "size {size}, stable {stable}, edge {edge}");
                    assert_eq!(select_method(&context(size, stable, edge)), first);
                }
            }
        }
    }

    #[test]
    fn custom_thresholds_shift_the_table() {
        let t = RuleThresholds::new().with_short_gap_max(5);
        let sel = select_method_with(&context(5, false, false), &t);
        assert_eq!(sel.rule, Rule::ShortUnstable);
    }

    #[test]
    fn rationale_mentions_gap_size() {
        let sel = select_method(&context(10, false, false));
        assert!(sel.rationale.contains("10-day"), "{}", sel.rationale);
    }

    #[test]
    fn rule_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Rule::LongStrongTrend).unwrap(),
            "\"long_strong_trend\""
        );
    }
}

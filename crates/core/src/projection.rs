//! Attendance percentage and goal projection.
//!
//! All arithmetic is done on percentages (0..=100) rather than fractions so
//! that common goals such as 70 or 80 do not pick up binary rounding error
//! before `floor`/`ceil` is applied.

use crate::model::{Goal, SubjectCounter};

/// Where a subject stands relative to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// No class has been held yet.
    NoData,
    /// At or above goal; `can_miss` more classes may be skipped in a row.
    Safe { can_miss: u64 },
    /// Below goal; the next `must_attend_next` classes must all be attended.
    Danger { must_attend_next: u64 },
    /// Below a 100% goal, which no amount of future attendance can restore.
    Unreachable,
}

impl Projection {
    /// Below goal with at least one class held.
    #[must_use]
    pub fn is_at_risk(&self) -> bool {
        matches!(self, Self::Danger { .. } | Self::Unreachable)
    }
}

/// Attendance percentage, `100.0` when no class has been held yet.
#[must_use]
pub fn percentage(counter: &SubjectCounter) -> f64 {
    ratio_percent(u64::from(counter.attended()), u64::from(counter.total()))
}

#[allow(clippy::cast_precision_loss)]
fn ratio_percent(attended: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    100.0 * attended as f64 / total as f64
}

/// Project how many classes may be missed, or must be attended, to stay at
/// or get back to `goal`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn project(counter: &SubjectCounter, goal: Goal) -> Projection {
    let attended = f64::from(counter.attended());
    let total = f64::from(counter.total());
    let goal_percent = goal.percent();

    if counter.total() == 0 {
        return Projection::NoData;
    }

    if percentage(counter) >= goal_percent {
        // floor(attended / g) - total
        let reachable_total = (attended * 100.0 / goal_percent).floor();
        let can_miss = (reachable_total - total).max(0.0);
        return Projection::Safe {
            can_miss: can_miss as u64,
        };
    }

    if goal.is_full() {
        return Projection::Unreachable;
    }

    // ceil((g * total - attended) / (1 - g))
    let needed = ((goal_percent * total - 100.0 * attended) / (100.0 - goal_percent)).ceil();
    Projection::Danger {
        must_attend_next: needed.max(0.0) as u64,
    }
}

/// Totals across one student's subjects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub subjects: usize,
    pub attended: u64,
    pub total: u64,
    pub percentage: f64,
    pub at_risk: usize,
}

/// Aggregate subject counters against a goal.
#[must_use]
pub fn summarize<'a>(counters: impl IntoIterator<Item = &'a SubjectCounter>, goal: Goal) -> Summary {
    let mut subjects = 0;
    let mut attended = 0_u64;
    let mut total = 0_u64;
    let mut at_risk = 0;

    for counter in counters {
        subjects += 1;
        attended += u64::from(counter.attended());
        total += u64::from(counter.total());
        if project(counter, goal).is_at_risk() {
            at_risk += 1;
        }
    }

    Summary {
        subjects,
        attended,
        total,
        percentage: ratio_percent(attended, total),
        at_risk,
    }
}

//! Recurrence engine: the next due date of a repeating task.
//!
//! The engine is a set of pure functions. It holds no state between calls,
//! so it can be called from any number of threads without coordination.
//!
//! # Flow
//! 1. parse the anchor date (`YYYYMMDD`)
//! 2. parse the rule text into a [`RecurrenceRule`]
//! 3. dispatch on the variant to the matching evaluator

mod daily;
mod monthly;
mod occurrences;
mod weekly;
mod yearly;

use tracing::debug;

use crate::domain::{CalendarDate, RecurrenceError, RecurrenceRule};

pub use self::occurrences::Occurrences;

/// Next date strictly after `now` on which a task anchored at `anchor` is due.
///
/// # Errors
/// - `InvalidDate` when `anchor` is not `YYYYMMDD`
/// - `EmptyRule`, `UnknownRuleKind` and the per-kind validation errors
///   from [`RecurrenceRule::parse`]
/// - `NoOccurrenceFound` when a monthly rule has no match in its window
pub fn next_occurrence(
    now: CalendarDate,
    anchor: &str,
    rule: &str,
) -> Result<CalendarDate, RecurrenceError> {
    let anchor = CalendarDate::parse(anchor)?;
    let parsed = RecurrenceRule::parse(rule)?;
    let next = parsed.next_after(anchor, now)?;
    debug!(%now, %anchor, rule, %next, "computed next occurrence");
    Ok(next)
}

impl RecurrenceRule {
    /// Evaluate an already parsed rule.
    pub fn next_after(
        &self,
        anchor: CalendarDate,
        now: CalendarDate,
    ) -> Result<CalendarDate, RecurrenceError> {
        match *self {
            Self::Yearly => yearly::next_after(anchor, now),
            Self::Daily { every } => daily::next_after(anchor, now, every),
            Self::Weekly { days } => weekly::next_after(anchor, now, days),
            Self::Monthly { days, months } => monthly::next_after(anchor, now, days, months),
        }
    }

    /// Successive due dates after `after`, for a task anchored at `anchor`.
    pub fn occurrences(&self, anchor: CalendarDate, after: CalendarDate) -> Occurrences {
        Occurrences::new(*self, anchor, after)
    }
}

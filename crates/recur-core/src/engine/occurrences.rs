use crate::domain::{CalendarDate, RecurrenceError, RecurrenceRule};

/// Iterator over successive due dates of one rule.
///
/// Each step evaluates the rule with the previous result as "now", keeping
/// the same anchor so yearly Feb 29 anchors do not drift. The iterator
/// yields at most one error and then stops.
#[derive(Debug, Clone)]
pub struct Occurrences {
    rule: RecurrenceRule,
    anchor: CalendarDate,
    cursor: CalendarDate,
    done: bool,
}

impl Occurrences {
    pub(super) fn new(rule: RecurrenceRule, anchor: CalendarDate, after: CalendarDate) -> Self {
        Self {
            rule,
            anchor,
            cursor: after,
            done: false,
        }
    }
}

impl Iterator for Occurrences {
    type Item = Result<CalendarDate, RecurrenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.rule.next_after(self.anchor, self.cursor) {
            Ok(date) => {
                self.cursor = date;
                Some(Ok(date))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Limits applied by the [`Scheduler`](super::Scheduler).
///
/// Every field has a default, so a partial TOML table is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Longest accepted rule text, in characters.
    pub max_rule_len: usize,

    /// Agenda page size when none (or an out-of-range one) is requested.
    pub default_page_size: usize,

    pub min_page_size: usize,
    pub max_page_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_rule_len: 128,
            default_page_size: 50,
            min_page_size: 10,
            max_page_size: 50,
        }
    }
}

impl SchedulerConfig {
    /// Requested size if it is within bounds, the default otherwise.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|size| (self.min_page_size..=self.max_page_size).contains(size))
            .unwrap_or(self.default_page_size)
    }
}

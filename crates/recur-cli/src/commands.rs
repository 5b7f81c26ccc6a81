//! Subcommand handlers. Each returns the text to print on stdout.

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use recur_core::app::{AgendaQuery, Completion, Scheduler};
use recur_core::domain::{CalendarDate, RuleKind, TaskDraft, TaskId, TaskRecord};
use recur_core::impls::InMemoryTaskStore;
use recur_core::ports::{Clock, FixedClock, SystemClock};
use recur_core::{RecurrenceRule, next_occurrence};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::AgendaArgs;
use crate::config::CliConfig;

/// `--now` style argument, or today's date when absent.
fn date_or_today(raw: Option<&str>) -> Result<CalendarDate> {
    match raw {
        Some(raw) => Ok(CalendarDate::parse(raw)?),
        None => Ok(SystemClock.today()?),
    }
}

pub fn next(date: &str, repeat: &str, now: Option<&str>) -> Result<String> {
    let now = date_or_today(now)?;
    let next = next_occurrence(now, date, repeat)?;
    Ok(next.to_string())
}

pub fn upcoming(
    config: &CliConfig,
    date: &str,
    repeat: &str,
    from: Option<&str>,
    count: Option<usize>,
) -> Result<String> {
    let anchor = CalendarDate::parse(date)?;
    let rule = RecurrenceRule::parse(repeat)?;
    let from = date_or_today(from)?;
    let count = count.unwrap_or(config.upcoming_count);

    let dates = rule
        .occurrences(anchor, from)
        .take(count)
        .map(|next| next.map(|d| d.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(%anchor, %from, count, "listed upcoming dates");
    Ok(dates.join("\n"))
}

#[derive(Debug, Serialize)]
struct RuleReport<'a> {
    rule: &'a str,
    kind: RuleKind,
    canonical: String,
}

pub fn check(rule: &str) -> Result<String> {
    let parsed = RecurrenceRule::parse(rule)?;
    let report = RuleReport {
        rule,
        kind: parsed.kind(),
        canonical: parsed.to_string(),
    };
    Ok(serde_json::to_string(&report)?)
}

#[derive(Debug, Serialize)]
struct CompletedTask {
    title: String,
    #[serde(flatten)]
    completion: Completion,
}

#[derive(Debug, Serialize)]
struct AgendaReport {
    today: CalendarDate,
    completed: Vec<CompletedTask>,
    deleted: Vec<String>,
    tasks: Vec<TaskRecord>,
}

/// Tasks loaded from the file that are still in the store, by title.
struct LoadedTasks {
    live: Vec<TaskRecord>,
    removed: HashSet<String>,
}

impl LoadedTasks {
    /// First stored task titled `title`.
    ///
    /// `Ok(None)` when every task with that title was already removed in
    /// this run; an error when the file never had such a task.
    fn find(&self, title: &str) -> Result<Option<TaskId>> {
        match self.live.iter().find(|t| t.title == title) {
            Some(task) => Ok(Some(task.id)),
            None if self.removed.contains(title) => {
                warn!(title, "task already removed, skipping");
                Ok(None)
            }
            None => bail!("no task titled {title:?}"),
        }
    }

    fn remove(&mut self, id: TaskId) {
        if let Some(index) = self.live.iter().position(|t| t.id == id) {
            let task = self.live.remove(index);
            self.removed.insert(task.title);
        }
    }
}

pub async fn agenda(config: &CliConfig, args: &AgendaArgs) -> Result<String> {
    let today = date_or_today(args.today.as_deref())?;
    let file = &args.file;
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read tasks: {}", file.display()))?;
    let drafts: Vec<TaskDraft> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse tasks: {}", file.display()))?;

    let scheduler = Scheduler::new(
        InMemoryTaskStore::new(),
        FixedClock::new(today),
        config.scheduler.clone(),
    );

    let mut loaded = LoadedTasks {
        live: Vec::with_capacity(drafts.len()),
        removed: HashSet::new(),
    };
    for (index, draft) in drafts.into_iter().enumerate() {
        let title = draft.title.clone();
        let record = scheduler
            .create_task(draft)
            .await
            .with_context(|| format!("task #{index} ({title:?})"))?;
        loaded.live.push(record);
    }
    info!(count = loaded.live.len(), %today, "tasks loaded");

    let mut completed = Vec::with_capacity(args.complete.len());
    for title in &args.complete {
        let Some(id) = loaded.find(title)? else {
            continue;
        };
        let completion = scheduler
            .complete_task(id)
            .await
            .with_context(|| format!("failed to complete {title:?}"))?;
        if completion == Completion::Removed {
            loaded.remove(id);
        }
        completed.push(CompletedTask {
            title: title.clone(),
            completion,
        });
    }

    let mut deleted = Vec::with_capacity(args.delete.len());
    for title in &args.delete {
        let Some(id) = loaded.find(title)? else {
            continue;
        };
        scheduler
            .delete_task(id)
            .await
            .with_context(|| format!("failed to delete {title:?}"))?;
        loaded.remove(id);
        deleted.push(title.clone());
    }

    let query = AgendaQuery {
        search: args.search.clone(),
        limit: args.limit,
        page: args.page,
    };
    let report = AgendaReport {
        today,
        completed,
        deleted,
        tasks: scheduler.agenda(&query).await?,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

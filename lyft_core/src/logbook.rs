//! Top-level workout operations.
//!
//! Each operation is one store transaction: the log mutation and the summary
//! update commit together, or neither does.
//!
//! - Appending workouts updates the summary incrementally with per-week deltas.
//! - Editing or deleting sets recomputes the affected week from the full log.
//!   Deltas are never used on these paths.

use crate::aggregate::{aggregate_full, aggregate_incremental, weeks_in_log};
use crate::input::validate_entries;
use crate::store::{Ledger, LogFilter, WorkoutStore};
use crate::summary::{apply_absolute, apply_delta};
use crate::week::{week_of, weeks_in_year, WeekId};
use crate::{
    Error, LoggedEntries, LoggedSet, MuscleSets, Result, SetKey, SetPerformance, SetUpdate,
};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// What to remove from the log
#[derive(Clone, Debug, PartialEq)]
pub enum DeleteTarget {
    /// Every set logged on a date
    Workout { date: NaiveDate },
    /// Every set of one exercise on a date
    Exercise { date: NaiveDate, exercise: String },
    /// One set
    Set(SetKey),
}

impl DeleteTarget {
    pub fn date(&self) -> NaiveDate {
        match self {
            DeleteTarget::Workout { date } => *date,
            DeleteTarget::Exercise { date, .. } => *date,
            DeleteTarget::Set(key) => key.date,
        }
    }

    fn filter(&self) -> LogFilter {
        match self {
            DeleteTarget::Workout { date } => LogFilter::Date(*date),
            DeleteTarget::Exercise { date, exercise } => LogFilter::Exercise {
                date: *date,
                exercise: exercise.clone(),
            },
            DeleteTarget::Set(key) => LogFilter::Set(key.clone()),
        }
    }
}

/// The workout log together with its weekly summary
pub struct Logbook<S: WorkoutStore> {
    store: S,
    provision_rows: bool,
}

impl<S: WorkoutStore> Logbook<S> {
    /// Open a logbook that creates summary rows on demand
    pub fn new(store: S) -> Self {
        Self {
            store,
            provision_rows: true,
        }
    }

    /// When disabled, touching a week without a summary row fails the
    /// operation with `UnknownWeek`
    pub fn with_provisioning(mut self, enabled: bool) -> Self {
        self.provision_rows = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append workouts and add their volume to the weekly summary
    ///
    /// Sets of an exercise already logged that day are numbered after the
    /// last stored set. Returns the weeks whose summary changed.
    pub fn add_workouts(&mut self, entries: &LoggedEntries) -> Result<Vec<WeekId>> {
        validate_entries(entries)?;
        let deltas = aggregate_incremental(entries)?;
        let provision = self.provision_rows;

        let weeks = self.store.transaction(|ledger| {
            let mut sets = entries.to_logged_sets();
            for set in &mut sets {
                set.set_index += ledger.last_set_index(set.date, &set.exercise);
            }
            ledger.write_log(sets)?;
            for (week, delta) in &deltas {
                if provision {
                    ledger.ensure_summary_row(*week);
                }
                apply_delta(ledger, *week, delta)?;
            }
            Ok(deltas.keys().copied().collect::<Vec<_>>())
        })?;

        tracing::info!(
            "Logged {} sets across {} week(s)",
            entries.set_count(),
            weeks.len()
        );
        Ok(weeks)
    }

    /// Change reps and/or weight of one logged set
    pub fn edit_set(&mut self, key: &SetKey, update: SetUpdate) -> Result<LoggedSet> {
        if update.reps.is_none() && update.weight.is_none() {
            return Err(Error::Validation("nothing to change: give reps and/or weight".into()));
        }
        // Fields left unchanged are checked with values that always pass
        SetPerformance::new(update.reps.unwrap_or(1), update.weight.unwrap_or(0.0))?;

        let provision = self.provision_rows;
        let week = week_of(key.date);
        let updated = self.store.transaction(|ledger| {
            let updated = ledger.update_log(key, update)?;
            recompute_week(ledger, week, provision)?;
            Ok(updated)
        })?;

        tracing::info!(
            "Updated set {} of '{}' on {} ({} reps @ {})",
            key.set_index,
            key.exercise,
            key.date,
            updated.reps,
            updated.weight
        );
        Ok(updated)
    }

    /// Remove a workout, an exercise of a workout, or a single set
    ///
    /// Returns the number of sets removed.
    pub fn delete(&mut self, target: &DeleteTarget) -> Result<usize> {
        let provision = self.provision_rows;
        let week = week_of(target.date());
        let filter = target.filter();

        let removed = self.store.transaction(|ledger| {
            let removed = ledger.delete_log(&filter);
            if removed > 0 {
                recompute_week(ledger, week, provision)?;
            }
            Ok(removed)
        })?;

        if removed == 0 {
            tracing::warn!("Nothing matched {:?}", target);
        } else {
            tracing::info!("Deleted {} set(s), recomputed {}", removed, week);
        }
        Ok(removed)
    }

    /// Recompute every summary row from the log
    ///
    /// Covers every week with logged sets plus every existing row, so rows
    /// whose sets were all removed are reset to zero.
    pub fn recompute_all(&mut self) -> Result<Vec<WeekId>> {
        let provision = self.provision_rows;
        let weeks = self.store.transaction(|ledger| {
            let mut weeks: BTreeSet<WeekId> = weeks_in_log(ledger.log());
            weeks.extend(ledger.summary_rows().map(|(week, _)| week));
            for week in &weeks {
                recompute_week(ledger, *week, provision)?;
            }
            Ok(weeks.into_iter().collect::<Vec<_>>())
        })?;

        tracing::info!("Recomputed {} week(s)", weeks.len());
        Ok(weeks)
    }

    /// Create a zero summary row for every ISO week of `year`
    ///
    /// Returns the number of rows created.
    pub fn provision_year(&mut self, year: i32) -> Result<usize> {
        let weeks = weeks_in_year(year)?;
        let created = self.store.transaction(|ledger| {
            Ok(weeks
                .iter()
                .filter(|week| ledger.ensure_summary_row(**week))
                .count())
        })?;
        tracing::info!("Provisioned {} summary row(s) for {}", created, year);
        Ok(created)
    }

    /// Stored summary for one week
    pub fn week_summary(&self, week: WeekId) -> Result<MuscleSets> {
        self.store.load()?.read_summary(week)
    }

    /// All stored summary rows in week order
    pub fn summary_table(&self) -> Result<Vec<(WeekId, MuscleSets)>> {
        let ledger = self.store.load()?;
        Ok(ledger
            .summary_rows()
            .map(|(week, sets)| (week, *sets))
            .collect())
    }

    /// Logged sets of one week in log order
    pub fn sets_for_week(&self, week: WeekId) -> Result<Vec<LoggedSet>> {
        Ok(self.store.load()?.read_log(&LogFilter::Week(week)))
    }
}

/// Overwrite one week's row with its volume computed from the full log
fn recompute_week(ledger: &mut Ledger, week: WeekId, provision: bool) -> Result<()> {
    if provision {
        ledger.ensure_summary_row(week);
    }
    let snapshot = aggregate_full(ledger.log(), week)?;
    apply_absolute(ledger, week, &snapshot)
}

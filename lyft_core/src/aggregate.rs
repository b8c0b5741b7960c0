//! Aggregation engine: groups logged sets by ISO week and computes volume.
//!
//! Two modes:
//! - `aggregate_incremental` turns freshly entered workouts into per-week
//!   deltas to add onto existing totals. Only valid for pure appends.
//! - `aggregate_full` recomputes one week's absolute total from the whole log.
//!   Required after any edit or delete.

use crate::week::{week_of, WeekId};
use crate::{volume, LoggedEntries, LoggedSet, MuscleSets, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Per-week volume deltas for newly entered workouts
pub fn aggregate_incremental(entries: &LoggedEntries) -> Result<BTreeMap<WeekId, MuscleSets>> {
    let mut counts: BTreeMap<WeekId, BTreeMap<&str, u32>> = BTreeMap::new();

    for workout in &entries.workouts {
        let week = week_of(workout.date);
        let week_counts = counts.entry(week).or_default();
        for entry in &workout.exercises {
            *week_counts.entry(entry.exercise.as_str()).or_default() += entry.sets.len() as u32;
        }
    }

    let mut deltas = BTreeMap::new();
    for (week, week_counts) in counts {
        let delta = volume::volume_for_counts(week_counts)?;
        tracing::debug!("Incremental volume for {}: {:.2} sets", week, delta.total());
        deltas.insert(week, delta);
    }
    Ok(deltas)
}

/// Absolute volume of `week` computed from the complete log
pub fn aggregate_full(log: &[LoggedSet], week: WeekId) -> Result<MuscleSets> {
    let (start, end) = week.bounds();

    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for set in log.iter().filter(|s| s.date >= start && s.date <= end) {
        *counts.entry(set.exercise.as_str()).or_default() += 1;
    }

    let total = volume::volume_for_counts(counts)?;
    tracing::debug!("Full volume for {}: {:.2} sets", week, total.total());
    Ok(total)
}

/// Every week that has at least one logged set
pub fn weeks_in_log(log: &[LoggedSet]) -> BTreeSet<WeekId> {
    log.iter().map(|s| week_of(s.date)).collect()
}

//! CSV import of workouts.
//!
//! Each row is one performed set:
//!
//! ```text
//! date,exercise,reps,weight
//! 2021-03-01,Barbell Bench Press,5,100
//! ```
//!
//! Rows are grouped by date and then by exercise, keeping first-appearance
//! order, so the sets of an exercise are numbered in file order.

use crate::input::{parse_date, parse_reps, parse_weight};
use crate::{Error, ExerciseEntry, LoggedEntries, Result, SetPerformance, WorkoutEntry};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// CSV row format for imported sets
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    exercise: String,
    reps: String,
    weight: String,
}

/// Read workouts from a CSV file
pub fn read_entries_csv(path: &Path) -> Result<LoggedEntries> {
    let file = std::fs::File::open(path)?;
    let entries = read_entries(file)?;
    tracing::info!(
        "Read {} sets in {} workouts from {:?}",
        entries.set_count(),
        entries.workouts.len(),
        path
    );
    Ok(entries)
}

/// Read workouts from any CSV source
///
/// The first malformed row aborts the whole import.
pub fn read_entries<R: Read>(reader: R) -> Result<LoggedEntries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut workouts: Vec<WorkoutEntry> = Vec::new();

    for (i, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1
        let line = i + 2;
        let row = result?;

        let date = parse_date(&row.date).map_err(|e| at_line(line, e))?;
        let reps = parse_reps(&row.reps).map_err(|e| at_line(line, e))?;
        let weight = parse_weight(&row.weight).map_err(|e| at_line(line, e))?;
        let set = SetPerformance::new(reps, weight).map_err(|e| at_line(line, e))?;
        if row.exercise.is_empty() {
            return Err(at_line(line, Error::Validation("exercise is empty".into())));
        }

        let idx = match workouts.iter().position(|w| w.date == date) {
            Some(idx) => idx,
            None => {
                workouts.push(WorkoutEntry {
                    date,
                    exercises: Vec::new(),
                });
                workouts.len() - 1
            }
        };
        let workout = &mut workouts[idx];

        match workout
            .exercises
            .iter_mut()
            .find(|e| e.exercise == row.exercise)
        {
            Some(entry) => entry.sets.push(set),
            None => workout.exercises.push(ExerciseEntry {
                exercise: row.exercise,
                sets: vec![set],
            }),
        }
    }

    Ok(LoggedEntries::new(workouts))
}

fn at_line(line: usize, err: Error) -> Error {
    match err {
        Error::InvalidDate(msg) => Error::InvalidDate(format!("line {}: {}", line, msg)),
        Error::Validation(msg) => Error::Validation(format!("line {}: {}", line, msg)),
        other => other,
    }
}

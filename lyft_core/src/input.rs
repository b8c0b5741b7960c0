//! Input parsing and validation for data-entry front ends.
//!
//! Front ends collect raw strings however they like and call into here; every
//! function returns either a typed value or a structured error, so no front
//! end has to loop on its own validation rules.

use crate::{catalog, Error, LoggedEntries, Result, SetPerformance};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Date format used for workouts
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` workout date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| Error::InvalidDate(format!("'{}' is not a YYYY-MM-DD date ({})", s.trim(), e)))
}

impl SetPerformance {
    /// Build a validated set: reps must be positive, weight finite and non-negative
    pub fn new(reps: u32, weight: f64) -> Result<Self> {
        if reps == 0 {
            return Err(Error::Validation("reps must be at least 1".into()));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::Validation(format!(
                "weight must be a non-negative number, got {}",
                weight
            )));
        }
        Ok(Self { reps, weight })
    }
}

/// Parse a set written as `REPSxWEIGHT` (e.g. `5x102.5`)
pub fn parse_set(s: &str) -> Result<SetPerformance> {
    let invalid = || Error::Validation(format!("'{}' is not a set (expected REPSxWEIGHT)", s));
    let (reps, weight) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let reps = parse_reps(reps)?;
    let weight = parse_weight(weight)?;
    SetPerformance::new(reps, weight)
}

/// Parse a rep count
pub fn parse_reps(s: &str) -> Result<u32> {
    let reps: i64 = s
        .trim()
        .parse()
        .map_err(|_| Error::Validation(format!("'{}' is not a rep count", s.trim())))?;
    if reps <= 0 {
        return Err(Error::Validation(format!("reps must be positive, got {}", reps)));
    }
    u32::try_from(reps).map_err(|_| Error::Validation(format!("rep count {} is too large", reps)))
}

/// Parse a weight
pub fn parse_weight(s: &str) -> Result<f64> {
    let weight: f64 = s
        .trim()
        .parse()
        .map_err(|_| Error::Validation(format!("'{}' is not a weight", s.trim())))?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::Validation(format!(
            "weight must be a non-negative number, got {}",
            s.trim()
        )));
    }
    Ok(weight)
}

/// `count` identical sets
pub fn uniform_sets(count: u32, reps: u32, weight: f64) -> Result<Vec<SetPerformance>> {
    if count == 0 {
        return Err(Error::Validation("at least one set is required".into()));
    }
    let set = SetPerformance::new(reps, weight)?;
    Ok(vec![set; count as usize])
}

/// Check entries before anything is written
///
/// Rejects unknown exercises, exercises without sets, invalid reps or
/// weights, and an exercise listed twice for the same date (its set indices
/// would collide).
pub fn validate_entries(entries: &LoggedEntries) -> Result<()> {
    if entries.set_count() == 0 {
        return Err(Error::Validation("no sets to log".into()));
    }

    let mut seen = HashSet::new();
    for workout in &entries.workouts {
        for entry in &workout.exercises {
            catalog::lookup(&entry.exercise)?;

            if entry.sets.is_empty() {
                return Err(Error::Validation(format!(
                    "'{}' on {} has no sets",
                    entry.exercise, workout.date
                )));
            }
            for set in &entry.sets {
                SetPerformance::new(set.reps, set.weight)?;
            }
            if !seen.insert((workout.date, entry.exercise.as_str())) {
                return Err(Error::Validation(format!(
                    "'{}' is listed more than once for {}",
                    entry.exercise, workout.date
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExerciseEntry, WorkoutEntry};

    fn entries(date: &str, exercises: Vec<(&str, Vec<SetPerformance>)>) -> LoggedEntries {
        LoggedEntries::new(vec![WorkoutEntry {
            date: parse_date(date).unwrap(),
            exercises: exercises
                .into_iter()
                .map(|(name, sets)| ExerciseEntry {
                    exercise: name.into(),
                    sets,
                })
                .collect(),
        }])
    }

    fn sets(n: u32) -> Vec<SetPerformance> {
        uniform_sets(n, 5, 100.0).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2021-03-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
        );
        assert!(matches!(parse_date("2021-02-30"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date("03/01/2021"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date(""), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn test_parse_set() {
        let set = parse_set("5x102.5").unwrap();
        assert_eq!(set.reps, 5);
        assert_eq!(set.weight, 102.5);
        assert_eq!(parse_set("12X0").unwrap().weight, 0.0);

        assert!(matches!(parse_set("0x100"), Err(Error::Validation(_))));
        assert!(matches!(parse_set("-3x100"), Err(Error::Validation(_))));
        assert!(matches!(parse_set("5x-10"), Err(Error::Validation(_))));
        assert!(matches!(parse_set("5xNaN"), Err(Error::Validation(_))));
        assert!(matches!(parse_set("5 100"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_set_performance_new() {
        assert!(SetPerformance::new(1, 0.0).is_ok());
        assert!(SetPerformance::new(0, 10.0).is_err());
        assert!(SetPerformance::new(5, -0.5).is_err());
        assert!(SetPerformance::new(5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_uniform_sets() {
        let sets = uniform_sets(3, 8, 60.0).unwrap();
        assert_eq!(sets.len(), 3);
        assert!(sets.iter().all(|s| s.reps == 8 && s.weight == 60.0));
        assert!(uniform_sets(0, 8, 60.0).is_err());
        assert!(uniform_sets(3, 0, 60.0).is_err());
    }

    #[test]
    fn test_validate_accepts_good_entries() {
        let e = entries(
            "2021-03-01",
            vec![("Barbell Bench Press", sets(3)), ("DB Lateral Raises", sets(2))],
        );
        assert!(validate_entries(&e).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_exercise() {
        let e = entries("2021-03-01", vec![("Bench", sets(3))]);
        assert!(matches!(validate_entries(&e), Err(Error::UnknownExercise(_))));
    }

    #[test]
    fn test_validate_rejects_bad_sets() {
        let e = entries("2021-03-01", vec![("Cable Flys", vec![])]);
        assert!(matches!(validate_entries(&e), Err(Error::Validation(_))));

        let e = entries(
            "2021-03-01",
            vec![("Cable Flys", vec![SetPerformance { reps: 0, weight: 10.0 }])],
        );
        assert!(matches!(validate_entries(&e), Err(Error::Validation(_))));

        let e = entries(
            "2021-03-01",
            vec![("Cable Flys", vec![SetPerformance { reps: 10, weight: -1.0 }])],
        );
        assert!(matches!(validate_entries(&e), Err(Error::Validation(_))));

        assert!(validate_entries(&LoggedEntries::default()).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_exercise_for_date() {
        let e = entries(
            "2021-03-01",
            vec![("Cable Flys", sets(2)), ("Cable Flys", sets(1))],
        );
        assert!(matches!(validate_entries(&e), Err(Error::Validation(_))));

        // Same exercise on different dates is fine
        let mut e = entries("2021-03-01", vec![("Cable Flys", sets(2))]);
        e.workouts
            .extend(entries("2021-03-02", vec![("Cable Flys", sets(2))]).workouts);
        assert!(validate_entries(&e).is_ok());
    }
}

//! Built-in exercise catalog.
//!
//! Maps every supported exercise to the muscles it recruits and whether each
//! muscle works as a primary, secondary or tertiary mover.

use crate::types::MoverTier::{Primary as P, Secondary as S, Tertiary as T};
use crate::types::MuscleGroup::*;
use crate::{Error, MoverTier, MuscleGroup, Result};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};

/// An exercise and the muscles it moves
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExerciseDefinition {
    pub name: &'static str,
    pub movers: &'static [(MuscleGroup, MoverTier)],
}

impl ExerciseDefinition {
    /// Mover tier of a muscle for this exercise, if it is recruited at all
    pub fn tier_of(&self, muscle: MuscleGroup) -> Option<MoverTier> {
        self.movers
            .iter()
            .find(|(m, _)| *m == muscle)
            .map(|(_, tier)| *tier)
    }
}

const fn ex(
    name: &'static str,
    movers: &'static [(MuscleGroup, MoverTier)],
) -> ExerciseDefinition {
    ExerciseDefinition { name, movers }
}

static EXERCISES: &[ExerciseDefinition] = &[
    // Chest
    ex("Barbell Bench Press", &[(Pectorals, P), (Triceps, P), (FrontDeltoids, P)]),
    ex("Close Grip Barbell Bench Press", &[(Pectorals, P), (Triceps, P), (FrontDeltoids, P)]),
    ex("DB Bench Press", &[(Pectorals, P), (Triceps, P), (FrontDeltoids, P)]),
    ex("DB Incline Bench Press", &[(Pectorals, P), (FrontDeltoids, P), (Triceps, P)]),
    ex("Decline Press Machine", &[(Pectorals, P), (Triceps, S)]),
    ex("Cable Flys", &[(Pectorals, P)]),
    // Squat patterns
    ex("Back Squat", &[(Quadriceps, P), (Glutes, S), (LowerBack, T)]),
    ex("Paused Back Squats", &[(Quadriceps, P), (Glutes, S), (LowerBack, T)]),
    ex("Front Squat", &[(Quadriceps, P), (Trapezius, T)]),
    ex("Paused Front Squats", &[(Quadriceps, P), (Trapezius, T)]),
    ex("Single DB Split Squat", &[(Quadriceps, P), (Hamstrings, S), (Glutes, S)]),
    ex("DB Split Squat", &[(Quadriceps, P), (Hamstrings, S), (Glutes, S)]),
    ex("Walking DB Lunges", &[(Quadriceps, P), (Hamstrings, P), (Glutes, P)]),
    ex("Unilateral Leg Press", &[(Quadriceps, P)]),
    ex("Leg Extensions", &[(Quadriceps, P)]),
    // Hinge patterns
    ex("Smith Machine Hip Thrust", &[(Glutes, P), (Hamstrings, S)]),
    ex(
        "Deadlift",
        &[
            (Hamstrings, P),
            (Glutes, P),
            (LowerBack, P),
            (Forearms, P),
            (Quadriceps, S),
            (Trapezius, S),
        ],
    ),
    ex(
        "Hex Bar Deadlift",
        &[(Hamstrings, P), (Glutes, P), (LowerBack, P), (Quadriceps, S), (Trapezius, S)],
    ),
    ex("Romanian Deadlift", &[(Hamstrings, P), (Glutes, P), (LowerBack, P), (Forearms, S)]),
    ex("Back Extensions", &[(LowerBack, P), (Hamstrings, T), (Glutes, T)]),
    ex("Seated Leg Curls", &[(Hamstrings, P)]),
    ex("Lying Leg Curls", &[(Hamstrings, P)]),
    ex("Gliding Leg Curls", &[(Hamstrings, P), (Glutes, T)]),
    // Calves
    ex("Seated Calf Raises", &[(Calves, P)]),
    ex("Seated Calf Press Machine", &[(Calves, P)]),
    ex("Leg Press Calf Raises", &[(Calves, P)]),
    // Shoulders
    ex("Barbell Overhead Press", &[(FrontDeltoids, P), (SideDeltoids, S), (Triceps, S)]),
    ex("DB Overhead Press", &[(FrontDeltoids, P), (SideDeltoids, S), (Triceps, S)]),
    ex("DB Lateral Raises", &[(SideDeltoids, P)]),
    ex("Lateral Raise Machine", &[(SideDeltoids, P)]),
    ex("Rear Delt Facepulls", &[(RearDeltoids, P)]),
    ex("Reverse Pec Deck", &[(RearDeltoids, P)]),
    // Back
    ex(
        "Barbell Pendlay Row",
        &[(Trapezius, P), (Lats, P), (Biceps, S), (RearDeltoids, S), (LowerBack, T)],
    ),
    ex(
        "Barbell Bent Over Row",
        &[(Trapezius, P), (Lats, P), (Biceps, S), (RearDeltoids, S), (LowerBack, T)],
    ),
    ex("Lat Pulldowns", &[(Lats, P), (Trapezius, S), (Biceps, S)]),
    ex("Pull Ups", &[(Lats, P), (Trapezius, P), (Biceps, S)]),
    ex("Low Row Machine", &[(Trapezius, P), (Lats, S), (RearDeltoids, S)]),
    ex("High Row Machine", &[(Trapezius, P), (Lats, S), (RearDeltoids, S)]),
    // Arms
    ex("Cable Bicep Curls", &[(Biceps, P)]),
    ex("DB Bicep Curls", &[(Biceps, P)]),
    ex("EZ Bar Bicep Curls", &[(Biceps, P)]),
    ex("Machine Preacher Curls", &[(Biceps, P)]),
    ex("French Press", &[(Triceps, P)]),
    ex("EZ Bar Wrist Curls", &[(Forearms, P)]),
    // Abs
    ex("Abdominal Crunch Machine", &[(Abdominals, P)]),
    ex("Decline Crunch", &[(Abdominals, P)]),
    ex("Ab Wheel Rollouts", &[(Abdominals, P)]),
];

/// Name index over the static table, built once
static INDEX: Lazy<BTreeMap<&'static str, &'static ExerciseDefinition>> =
    Lazy::new(|| EXERCISES.iter().map(|def| (def.name, def)).collect());

/// Look up an exercise by its exact name
pub fn lookup(name: &str) -> Result<&'static ExerciseDefinition> {
    INDEX
        .get(name)
        .copied()
        .ok_or_else(|| Error::UnknownExercise(name.to_string()))
}

pub fn contains(name: &str) -> bool {
    INDEX.contains_key(name)
}

/// All exercises, ordered by name
pub fn exercises() -> impl Iterator<Item = &'static ExerciseDefinition> {
    INDEX.values().copied()
}

/// Exercise names that case-insensitively contain `query`
pub fn suggest(query: &str) -> Vec<&'static str> {
    let query = query.trim().to_lowercase();
    exercises()
        .map(|def| def.name)
        .filter(|name| name.to_lowercase().contains(&query))
        .collect()
}

/// Validate the catalog for consistency
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn validate() -> Vec<String> {
    let mut errors = Vec::new();

    if INDEX.len() != EXERCISES.len() {
        errors.push(format!(
            "Catalog has {} entries but only {} distinct names",
            EXERCISES.len(),
            INDEX.len()
        ));
    }

    for def in EXERCISES {
        if def.name.trim().is_empty() {
            errors.push("Exercise has empty name".to_string());
        }
        if def.movers.is_empty() {
            errors.push(format!("Exercise '{}' recruits no muscles", def.name));
        }
        if !def.movers.iter().any(|(_, tier)| *tier == MoverTier::Primary) {
            errors.push(format!("Exercise '{}' has no primary mover", def.name));
        }

        let mut seen = HashSet::new();
        for (muscle, _) in def.movers {
            if !seen.insert(*muscle) {
                errors.push(format!(
                    "Exercise '{}' lists {} more than once",
                    def.name, muscle
                ));
            }
        }
    }

    errors
}

/// Validate the catalog and fail on the first problem
pub fn ensure_valid() -> Result<()> {
    let errors = validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::CatalogValidation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        assert_eq!(exercises().count(), 47);
    }

    #[test]
    fn test_default_catalog_validates() {
        let errors = validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_lookup_bench_press() {
        let def = lookup("Barbell Bench Press").unwrap();
        assert_eq!(def.tier_of(Pectorals), Some(MoverTier::Primary));
        assert_eq!(def.tier_of(Triceps), Some(MoverTier::Primary));
        assert_eq!(def.tier_of(FrontDeltoids), Some(MoverTier::Primary));
        assert_eq!(def.tier_of(SideDeltoids), None);
    }

    #[test]
    fn test_lookup_mixed_tiers() {
        let def = lookup("Back Squat").unwrap();
        assert_eq!(def.tier_of(Quadriceps), Some(MoverTier::Primary));
        assert_eq!(def.tier_of(Glutes), Some(MoverTier::Secondary));
        assert_eq!(def.tier_of(LowerBack), Some(MoverTier::Tertiary));
    }

    #[test]
    fn test_unknown_exercise() {
        assert!(matches!(
            lookup("Underwater Basket Weaving"),
            Err(Error::UnknownExercise(name)) if name == "Underwater Basket Weaving"
        ));
        // Names are exact
        assert!(lookup("barbell bench press").is_err());
    }

    #[test]
    fn test_suggest() {
        let hits = suggest("deadlift");
        assert_eq!(hits, vec!["Deadlift", "Hex Bar Deadlift", "Romanian Deadlift"]);
    }

    #[test]
    fn test_neck_is_tracked_but_never_trained() {
        assert!(exercises().all(|def| def.tier_of(Neck).is_none()));
    }
}

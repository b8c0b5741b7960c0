//! Core domain types for the Lyft workout log.
//!
//! This module defines the fundamental types used throughout the system:
//! - Muscle groups and mover tiers
//! - The per-muscle volume record (`MuscleSets`)
//! - Logged sets and the entry structure supplied by front ends

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

// ============================================================================
// Muscle Types
// ============================================================================

/// The closed set of muscle groups tracked by the weekly summary
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Lats,
    LowerBack,
    Trapezius,
    FrontDeltoids,
    SideDeltoids,
    RearDeltoids,
    Pectorals,
    Triceps,
    Biceps,
    Forearms,
    Abdominals,
    Glutes,
    Hamstrings,
    Quadriceps,
    Calves,
    Neck,
}

impl MuscleGroup {
    /// All muscle groups, in summary column order
    pub const ALL: [MuscleGroup; 16] = [
        MuscleGroup::Lats,
        MuscleGroup::LowerBack,
        MuscleGroup::Trapezius,
        MuscleGroup::FrontDeltoids,
        MuscleGroup::SideDeltoids,
        MuscleGroup::RearDeltoids,
        MuscleGroup::Pectorals,
        MuscleGroup::Triceps,
        MuscleGroup::Biceps,
        MuscleGroup::Forearms,
        MuscleGroup::Abdominals,
        MuscleGroup::Glutes,
        MuscleGroup::Hamstrings,
        MuscleGroup::Quadriceps,
        MuscleGroup::Calves,
        MuscleGroup::Neck,
    ];

    /// Position in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            MuscleGroup::Lats => "Lats",
            MuscleGroup::LowerBack => "Lower_Back",
            MuscleGroup::Trapezius => "Trapezius",
            MuscleGroup::FrontDeltoids => "Front_Deltoids",
            MuscleGroup::SideDeltoids => "Side_Deltoids",
            MuscleGroup::RearDeltoids => "Rear_Deltoids",
            MuscleGroup::Pectorals => "Pectorals",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Forearms => "Forearms",
            MuscleGroup::Abdominals => "Abdominals",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Quadriceps => "Quadriceps",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::Neck => "Neck",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MuscleGroup {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let wanted = s.trim().replace(' ', "_");
        MuscleGroup::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| crate::Error::Validation(format!("unknown muscle group '{}'", s)))
    }
}

/// How strongly an exercise recruits a muscle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoverTier {
    Primary,
    Secondary,
    Tertiary,
}

impl MoverTier {
    /// Thirds of a set credited to the muscle per performed set
    pub fn thirds(self) -> u64 {
        match self {
            MoverTier::Primary => 3,
            MoverTier::Secondary => 2,
            MoverTier::Tertiary => 1,
        }
    }

    /// Sets credited to the muscle per performed set
    pub fn fraction(self) -> f64 {
        self.thirds() as f64 / 3.0
    }

    /// Integer mover weight (1 = primary, 2 = secondary, 3 = tertiary)
    pub fn weight(self) -> u8 {
        match self {
            MoverTier::Primary => 1,
            MoverTier::Secondary => 2,
            MoverTier::Tertiary => 3,
        }
    }

    pub fn from_weight(weight: u8) -> Option<Self> {
        match weight {
            1 => Some(MoverTier::Primary),
            2 => Some(MoverTier::Secondary),
            3 => Some(MoverTier::Tertiary),
            _ => None,
        }
    }
}

// ============================================================================
// Volume Record
// ============================================================================

/// Accumulated training volume ("sets") per muscle group
///
/// Every muscle is a named field, so a record can never be partially
/// populated. Deserialization requires all sixteen fields and nothing else.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MuscleSets {
    pub lats: f64,
    pub lower_back: f64,
    pub trapezius: f64,
    pub front_deltoids: f64,
    pub side_deltoids: f64,
    pub rear_deltoids: f64,
    pub pectorals: f64,
    pub triceps: f64,
    pub biceps: f64,
    pub forearms: f64,
    pub abdominals: f64,
    pub glutes: f64,
    pub hamstrings: f64,
    pub quadriceps: f64,
    pub calves: f64,
    pub neck: f64,
}

impl MuscleSets {
    /// A fresh record with every muscle at zero
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, muscle: MuscleGroup) -> f64 {
        match muscle {
            MuscleGroup::Lats => self.lats,
            MuscleGroup::LowerBack => self.lower_back,
            MuscleGroup::Trapezius => self.trapezius,
            MuscleGroup::FrontDeltoids => self.front_deltoids,
            MuscleGroup::SideDeltoids => self.side_deltoids,
            MuscleGroup::RearDeltoids => self.rear_deltoids,
            MuscleGroup::Pectorals => self.pectorals,
            MuscleGroup::Triceps => self.triceps,
            MuscleGroup::Biceps => self.biceps,
            MuscleGroup::Forearms => self.forearms,
            MuscleGroup::Abdominals => self.abdominals,
            MuscleGroup::Glutes => self.glutes,
            MuscleGroup::Hamstrings => self.hamstrings,
            MuscleGroup::Quadriceps => self.quadriceps,
            MuscleGroup::Calves => self.calves,
            MuscleGroup::Neck => self.neck,
        }
    }

    pub fn get_mut(&mut self, muscle: MuscleGroup) -> &mut f64 {
        match muscle {
            MuscleGroup::Lats => &mut self.lats,
            MuscleGroup::LowerBack => &mut self.lower_back,
            MuscleGroup::Trapezius => &mut self.trapezius,
            MuscleGroup::FrontDeltoids => &mut self.front_deltoids,
            MuscleGroup::SideDeltoids => &mut self.side_deltoids,
            MuscleGroup::RearDeltoids => &mut self.rear_deltoids,
            MuscleGroup::Pectorals => &mut self.pectorals,
            MuscleGroup::Triceps => &mut self.triceps,
            MuscleGroup::Biceps => &mut self.biceps,
            MuscleGroup::Forearms => &mut self.forearms,
            MuscleGroup::Abdominals => &mut self.abdominals,
            MuscleGroup::Glutes => &mut self.glutes,
            MuscleGroup::Hamstrings => &mut self.hamstrings,
            MuscleGroup::Quadriceps => &mut self.quadriceps,
            MuscleGroup::Calves => &mut self.calves,
            MuscleGroup::Neck => &mut self.neck,
        }
    }

    pub fn add(&mut self, muscle: MuscleGroup, sets: f64) {
        *self.get_mut(muscle) += sets;
    }

    /// Iterate over (muscle, sets) in summary column order
    pub fn iter(&self) -> impl Iterator<Item = (MuscleGroup, f64)> + '_ {
        MuscleGroup::ALL.iter().map(move |m| (*m, self.get(*m)))
    }

    pub fn is_zero(&self) -> bool {
        self.iter().all(|(_, sets)| sets == 0.0)
    }

    /// Sum of sets over all muscles
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, sets)| sets).sum()
    }
}

impl AddAssign for MuscleSets {
    fn add_assign(&mut self, rhs: Self) {
        for (muscle, sets) in rhs.iter() {
            self.add(muscle, sets);
        }
    }
}

impl AddAssign<&MuscleSets> for MuscleSets {
    fn add_assign(&mut self, rhs: &MuscleSets) {
        *self += *rhs;
    }
}

// ============================================================================
// Logged Workout Types
// ============================================================================

/// Reps and weight of one performed set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetPerformance {
    pub reps: u32,
    pub weight: f64,
}

/// One performed set as stored in the log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggedSet {
    pub date: NaiveDate,
    pub exercise: String,
    /// 1-based, unique per exercise per date
    pub set_index: u32,
    pub reps: u32,
    pub weight: f64,
}

impl LoggedSet {
    pub fn key(&self) -> SetKey {
        SetKey {
            date: self.date,
            exercise: self.exercise.clone(),
            set_index: self.set_index,
        }
    }
}

/// Identifies a single logged set
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetKey {
    pub date: NaiveDate,
    pub exercise: String,
    pub set_index: u32,
}

/// Changes to apply to a logged set; `None` leaves the field as is
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SetUpdate {
    pub reps: Option<u32>,
    pub weight: Option<f64>,
}

/// All sets of one exercise within a workout, in performed order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseEntry {
    pub exercise: String,
    pub sets: Vec<SetPerformance>,
}

/// One workout: a date and the exercises performed on it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseEntry>,
}

/// Workouts as supplied by a data-entry front end
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggedEntries {
    pub workouts: Vec<WorkoutEntry>,
}

impl LoggedEntries {
    pub fn new(workouts: Vec<WorkoutEntry>) -> Self {
        Self { workouts }
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.iter().all(|w| w.exercises.iter().all(|e| e.sets.is_empty()))
    }

    pub fn set_count(&self) -> usize {
        self.workouts
            .iter()
            .flat_map(|w| &w.exercises)
            .map(|e| e.sets.len())
            .sum()
    }

    /// Flatten into log rows, numbering sets 1..n per exercise
    pub fn to_logged_sets(&self) -> Vec<LoggedSet> {
        let mut rows = Vec::with_capacity(self.set_count());
        for workout in &self.workouts {
            for entry in &workout.exercises {
                for (i, set) in entry.sets.iter().enumerate() {
                    rows.push(LoggedSet {
                        date: workout.date,
                        exercise: entry.exercise.clone(),
                        set_index: i as u32 + 1,
                        reps: set.reps,
                        weight: set.weight,
                    });
                }
            }
        }
        rows
    }
}

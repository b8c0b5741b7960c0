//! Volume calculator: converts performed sets into per-muscle set credit.
//!
//! Each set of an exercise credits one full set to its primary movers, two
//! thirds of a set to its secondary movers and one third to its tertiary
//! movers.
//!
//! Credit is counted exactly as whole thirds in a `VolumeTally` and only
//! turned into `f64` sets at the end, so a week's volume is the same value
//! however many separate additions produced it.

use crate::{catalog, Error, MuscleGroup, MuscleSets, Result};

/// Exact per-muscle volume, in thirds of a set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VolumeTally {
    thirds: [u64; 16],
}

impl VolumeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the credit of `set_count` sets of `exercise`
    pub fn add_exercise(&mut self, exercise: &str, set_count: u32) -> Result<()> {
        let definition = catalog::lookup(exercise)?;
        for (muscle, tier) in definition.movers {
            self.thirds[muscle.index()] += u64::from(set_count) * tier.thirds();
        }
        Ok(())
    }

    pub fn thirds(&self, muscle: MuscleGroup) -> u64 {
        self.thirds[muscle.index()]
    }

    /// Recover the tally behind a stored volume record
    ///
    /// Fails when a value is not a whole number of thirds, which only happens
    /// if the record was written by something other than this crate.
    pub fn from_sets(sets: &MuscleSets) -> Result<Self> {
        let mut tally = Self::new();
        for (muscle, value) in sets.iter() {
            tally.thirds[muscle.index()] = thirds_of(value).ok_or_else(|| {
                Error::Store(format!(
                    "{} volume {} is not a whole number of thirds; run recompute",
                    muscle, value
                ))
            })?;
        }
        Ok(tally)
    }

    pub fn to_sets(&self) -> MuscleSets {
        let mut sets = MuscleSets::zero();
        for muscle in MuscleGroup::ALL {
            *sets.get_mut(muscle) = sets_from_thirds(self.thirds(muscle));
        }
        sets
    }
}

impl std::ops::AddAssign for VolumeTally {
    fn add_assign(&mut self, rhs: Self) {
        for (total, extra) in self.thirds.iter_mut().zip(rhs.thirds) {
            *total += extra;
        }
    }
}

/// Sets represented by a count of thirds
pub fn sets_from_thirds(thirds: u64) -> f64 {
    thirds as f64 / 3.0
}

/// Inverse of `sets_from_thirds`; `None` for values it cannot produce
pub fn thirds_of(sets: f64) -> Option<u64> {
    if !sets.is_finite() || sets < 0.0 {
        return None;
    }
    let thirds = (sets * 3.0).round();
    if thirds > (1u64 << 52) as f64 {
        return None;
    }
    let thirds = thirds as u64;
    (sets_from_thirds(thirds) == sets).then_some(thirds)
}

/// Volume contributed by `set_count` sets of one exercise
pub fn compute(exercise: &str, set_count: u32) -> Result<MuscleSets> {
    let mut tally = VolumeTally::new();
    tally.add_exercise(exercise, set_count)?;
    Ok(tally.to_sets())
}

/// Exact volume of per-exercise set counts
///
/// Both aggregation modes reduce through here.
pub fn tally_counts<'a, I>(counts: I) -> Result<VolumeTally>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let mut tally = VolumeTally::new();
    for (exercise, set_count) in counts {
        tally.add_exercise(exercise, set_count)?;
    }
    Ok(tally)
}

/// Sum the volume of per-exercise set counts
pub fn volume_for_counts<'a, I>(counts: I) -> Result<MuscleSets>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    Ok(tally_counts(counts)?.to_sets())
}

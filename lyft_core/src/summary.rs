//! Summary synchronizer: reconciles computed week volumes with stored rows.

use crate::store::Ledger;
use crate::volume::{sets_from_thirds, thirds_of, VolumeTally};
use crate::week::WeekId;
use crate::{Error, MuscleGroup, MuscleSets, Result};

/// Add `delta` onto the stored row for `week`
///
/// The sum is taken in whole thirds of a set, so a row built from many deltas
/// holds exactly the value a full recompute of the week produces. Muscles
/// with a zero delta are left alone. Fails with `UnknownWeek` when the row
/// has not been provisioned.
pub fn apply_delta(ledger: &mut Ledger, week: WeekId, delta: &MuscleSets) -> Result<()> {
    let mut row = ledger.read_summary(week)?;
    let delta_thirds = VolumeTally::from_sets(delta)?;

    for muscle in MuscleGroup::ALL {
        let stored = row.get(muscle);
        let added = delta_thirds.thirds(muscle);
        if added == 0 {
            continue;
        }
        let current = thirds_of(stored).ok_or_else(|| {
            Error::Store(format!(
                "{} in {} holds {}, which no set count produces; run recompute",
                muscle, week, stored
            ))
        })?;
        *row.get_mut(muscle) = sets_from_thirds(current + added);
    }

    ledger.write_summary(week, row)?;
    tracing::debug!("Added {:.2} sets to {}", delta.total(), week);
    Ok(())
}

/// Overwrite the stored row for `week` with `snapshot`
///
/// Every muscle is written, zeros included: a muscle whose sets were all
/// deleted must read back as zero. Fails with `UnknownWeek` when the row has
/// not been provisioned.
pub fn apply_absolute(ledger: &mut Ledger, week: WeekId, snapshot: &MuscleSets) -> Result<()> {
    ledger.write_summary(week, *snapshot)?;
    tracing::debug!("Set {} to {:.2} sets", week, snapshot.total());
    Ok(())
}

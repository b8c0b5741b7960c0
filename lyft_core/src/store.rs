//! Persistence for the workout log and the weekly summary.
//!
//! The log and its derived summary live in one `Ledger` document. Every
//! mutation runs inside `WorkoutStore::transaction`, which hands the closure a
//! working copy and only commits it when the closure returns `Ok`, so a failed
//! operation leaves both log and summary untouched.

use crate::week::{week_of, WeekId};
use crate::{Error, LoggedSet, MuscleSets, Result, SetKey, SetUpdate};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// ============================================================================
// Ledger
// ============================================================================

/// Selects logged sets
#[derive(Clone, Debug, PartialEq)]
pub enum LogFilter {
    All,
    /// Every set of one workout
    Date(NaiveDate),
    /// Every set of one exercise within a workout
    Exercise { date: NaiveDate, exercise: String },
    /// A single set
    Set(SetKey),
    /// Every set whose date falls in an ISO week
    Week(WeekId),
}

impl LogFilter {
    pub fn matches(&self, set: &LoggedSet) -> bool {
        match self {
            LogFilter::All => true,
            LogFilter::Date(date) => set.date == *date,
            LogFilter::Exercise { date, exercise } => {
                set.date == *date && set.exercise == *exercise
            }
            LogFilter::Set(key) => {
                set.date == key.date
                    && set.exercise == key.exercise
                    && set.set_index == key.set_index
            }
            LogFilter::Week(week) => week_of(set.date) == *week,
        }
    }
}

/// The persisted document: the source-of-truth log plus summary rows
///
/// Both keys are required and no others are accepted, so a document of any
/// other shape is reported as corrupt instead of loading as an empty log.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Ledger {
    log: Vec<LoggedSet>,
    summary: BTreeMap<WeekId, MuscleSets>,
}

impl Ledger {
    /// Logged sets matching `filter`, in log order
    pub fn read_log(&self, filter: &LogFilter) -> Vec<LoggedSet> {
        self.log.iter().filter(|s| filter.matches(s)).cloned().collect()
    }

    pub fn log(&self) -> &[LoggedSet] {
        &self.log
    }

    /// Highest set index logged for an exercise on a date, 0 if none
    pub fn last_set_index(&self, date: NaiveDate, exercise: &str) -> u32 {
        self.log
            .iter()
            .filter(|s| s.date == date && s.exercise == exercise)
            .map(|s| s.set_index)
            .max()
            .unwrap_or(0)
    }

    /// Append sets, rejecting any (date, exercise, set index) already present
    pub fn write_log(&mut self, sets: Vec<LoggedSet>) -> Result<()> {
        let mut taken: HashSet<SetKey> = self.log.iter().map(LoggedSet::key).collect();
        for set in &sets {
            if !taken.insert(set.key()) {
                return Err(Error::Validation(format!(
                    "set {} of '{}' on {} is already logged",
                    set.set_index, set.exercise, set.date
                )));
            }
        }
        self.log.extend(sets);
        Ok(())
    }

    /// Change reps and/or weight of one logged set
    pub fn update_log(&mut self, key: &SetKey, update: SetUpdate) -> Result<LoggedSet> {
        let set = self
            .log
            .iter_mut()
            .find(|s| s.date == key.date && s.exercise == key.exercise && s.set_index == key.set_index)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "no set {} of '{}' logged on {}",
                    key.set_index, key.exercise, key.date
                ))
            })?;

        if let Some(reps) = update.reps {
            set.reps = reps;
        }
        if let Some(weight) = update.weight {
            set.weight = weight;
        }
        Ok(set.clone())
    }

    /// Remove matching sets, returning how many were removed
    pub fn delete_log(&mut self, filter: &LogFilter) -> usize {
        let before = self.log.len();
        self.log.retain(|s| !filter.matches(s));
        before - self.log.len()
    }

    pub fn read_summary(&self, week: WeekId) -> Result<MuscleSets> {
        self.summary
            .get(&week)
            .copied()
            .ok_or(Error::UnknownWeek(week))
    }

    /// Replace a summary row; the row must already exist
    pub fn write_summary(&mut self, week: WeekId, sets: MuscleSets) -> Result<()> {
        let row = self.summary.get_mut(&week).ok_or(Error::UnknownWeek(week))?;
        *row = sets;
        Ok(())
    }

    /// Create a zero row for `week` if missing; returns true if created
    pub fn ensure_summary_row(&mut self, week: WeekId) -> bool {
        let mut created = false;
        self.summary.entry(week).or_insert_with(|| {
            created = true;
            MuscleSets::zero()
        });
        created
    }

    pub fn has_summary_row(&self, week: WeekId) -> bool {
        self.summary.contains_key(&week)
    }

    /// All summary rows in week order
    pub fn summary_rows(&self) -> impl Iterator<Item = (WeekId, &MuscleSets)> {
        self.summary.iter().map(|(week, sets)| (*week, sets))
    }
}

// ============================================================================
// Stores
// ============================================================================

/// Transactional access to a ledger
pub trait WorkoutStore {
    /// Read a snapshot of the current ledger
    fn load(&self) -> Result<Ledger>;

    /// Run `f` against a working copy and commit it only if `f` succeeds
    fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Ledger) -> Result<T>;
}

/// In-memory store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    ledger: Ledger,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }
}

impl WorkoutStore for MemoryStore {
    fn load(&self) -> Result<Ledger> {
        Ok(self.ledger.clone())
    }

    fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Ledger) -> Result<T>,
    {
        let mut working = self.ledger.clone();
        let value = f(&mut working)?;
        self.ledger = working;
        Ok(value)
    }
}

/// JSON file store with file locking and atomic replacement
///
/// An exclusive lock on a sibling `.lock` file is held for the whole
/// transaction, so concurrent processes serialize instead of losing updates.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for the ledger at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn open_lock(&self) -> Result<File> {
        self.ensure_parent_dir()?;
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;
        Ok(file)
    }

    /// Read the ledger; the caller holds the lock
    fn read_ledger(&self) -> Result<Ledger> {
        if !self.path.exists() {
            tracing::info!("No ledger found at {:?}, starting empty", self.path);
            return Ok(Ledger::default());
        }

        let mut contents = String::new();
        File::open(&self.path)?.read_to_string(&mut contents)?;

        // A broken ledger is never replaced by an empty one: the log is the
        // source of truth.
        let ledger: Ledger = serde_json::from_str(&contents).map_err(|e| {
            Error::Store(format!("ledger {:?} is corrupt: {}", self.path, e))
        })?;

        tracing::debug!(
            "Loaded ledger from {:?} ({} sets, {} summary rows)",
            self.path,
            ledger.log.len(),
            ledger.summary.len()
        );
        Ok(ledger)
    }

    /// Atomically replace the ledger; the caller holds the lock
    fn write_ledger(&self, ledger: &Ledger) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| {
            Error::Store(format!("ledger path {:?} has no parent directory", self.path))
        })?;
        let temp = NamedTempFile::new_in(parent)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, ledger)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Committed ledger to {:?}", self.path);
        Ok(())
    }
}

impl WorkoutStore for FileStore {
    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            return Ok(Ledger::default());
        }

        let lock = self.open_lock()?;
        lock.lock_shared()?;
        let result = self.read_ledger();
        lock.unlock()?;
        result
    }

    fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Ledger) -> Result<T>,
    {
        let lock = self.open_lock()?;
        lock.lock_exclusive()?;

        let result = self.read_ledger().and_then(|mut ledger| {
            let value = f(&mut ledger)?;
            self.write_ledger(&ledger)?;
            Ok(value)
        });

        if let Err(ref e) = result {
            tracing::warn!("Transaction on {:?} rolled back: {}", self.path, e);
        }

        lock.unlock()?;
        result
    }
}

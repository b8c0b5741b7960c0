#![forbid(unsafe_code)]

//! Core domain model and business logic for the Lyft workout log.
//!
//! This crate provides:
//! - Domain types (muscle groups, volume records, logged sets)
//! - The exercise catalog and per-set volume computation
//! - ISO week partitioning and the two aggregation modes
//! - Persistence of the log and its weekly summary
//! - Input validation and CSV import for front ends

pub mod types;
pub mod error;
pub mod week;
pub mod catalog;
pub mod volume;
pub mod aggregate;
pub mod summary;
pub mod input;
pub mod import;
pub mod store;
pub mod logbook;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use week::{week_bounds, week_of, WeekId};
pub use config::Config;
pub use store::{FileStore, Ledger, LogFilter, MemoryStore, WorkoutStore};
pub use logbook::{DeleteTarget, Logbook};
pub use aggregate::{aggregate_full, aggregate_incremental};

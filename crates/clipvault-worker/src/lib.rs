//! Background tasks for ClipVault.
//!
//! This crate provides:
//! - A job handler trait and its error type
//! - The retention sweep that removes expired share records and their blobs
//! - A cron scheduler that runs handlers on a schedule

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobExecutionError, JobHandler};
pub use jobs::{RetentionSweeper, SweepReport};
pub use scheduler::CronScheduler;

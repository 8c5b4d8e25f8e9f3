//! Concurrent task model
//!
//! The temperature display runs two independent periodic tasks over
//! lock-free shared state. On the device each one is an Embassy task; on
//! the host the cooperative scheduler interleaves them deterministically.

pub mod cooperative;
pub mod shared;
pub mod tasks;

pub use cooperative::{CooperativeScheduler, RunRecord, SchedulerError};
pub use shared::{DisplaySnapshot, ReadingWriter, SharedDisplayState, UnitWriter};
pub use tasks::{render_readings, InputWatchTask, PeriodicTask, SenseDisplayTask, SenseReport};

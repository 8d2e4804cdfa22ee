//! Background Tasks Module
//!
//! # Tasks
//! - Snapshot cleanup: drops expired cart snapshots at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;

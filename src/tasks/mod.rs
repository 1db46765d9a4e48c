//! Background Tasks Module
//!
//! Tasks that run periodically alongside foreground cache operations.
//!
//! # Tasks
//! - Sweep: removes expired cache entries at the configured interval

mod sweep;

pub(crate) use sweep::spawn_sweep_task;

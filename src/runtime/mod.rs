//! Async runtime glue: the scheduler and its cancellable tick loop

pub mod scheduler;
pub mod task;

pub use scheduler::TickScheduler;
pub use task::{ScheduledTask, SharedEngine};

pub mod core;
pub mod records;
pub mod sim;

pub use crate::core::{MlqCore, Process, QueueLevel, SchedEvent};
pub use crate::sim::{ProcessRecord, Report, Sim, SimError};

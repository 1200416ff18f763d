pub mod driver;
pub mod event;
pub mod observer;
pub mod queue;
pub mod state;

pub use driver::MlqCore;
pub use event::SchedEvent;
pub use queue::{ReadyQueue, ReadyQueueSet};
pub use state::{Metrics, Pid, ProcState, Process, QueueLevel, SchedCtx, StateError, Ticks};

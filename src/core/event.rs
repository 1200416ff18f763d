use crate::core::{Pid, QueueLevel, Ticks};

/// One observable scheduling transition within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedEvent {
    Admitted {
        pid: Pid,
        level: QueueLevel,
    },
    Dispatched {
        pid: Pid,
        level: QueueLevel,
        quantum: Ticks,
    },
    // Running process pushed back to the tail of its own queue because
    // a higher level became non-empty.
    Preempted {
        pid: Pid,
        level: QueueLevel,
        by: QueueLevel,
    },
    QuantumExpired {
        pid: Pid,
        level: QueueLevel,
    },
    Completed {
        pid: Pid,
        at: Ticks,
    },
}

use super::state::{ProcState, SchedCtx};

/// Debug-build watchdog: re-checks the structural invariants of the
/// simulation state after every tick.
#[derive(Debug)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        if let Some(pid) = ctx.running {
            let process = ctx.process(pid);
            debug_assert_eq!(
                process.state,
                ProcState::Running,
                "CPU-occupying process {pid} must be Running"
            );
            debug_assert!(
                !ctx.queues.contains(pid),
                "running process {pid} must not appear in any ready queue"
            );
        }

        for (pid, process) in ctx.processes.iter().enumerate() {
            debug_assert!(
                process.remaining <= process.burst,
                "process {pid} remaining burst exceeds its original burst"
            );

            match process.state {
                ProcState::Pending => debug_assert!(
                    !ctx.queues.contains(pid),
                    "pending process {pid} already enqueued"
                ),
                ProcState::Ready => {
                    debug_assert_eq!(
                        ctx.queues.level_of(pid),
                        Some(process.level),
                        "ready process {pid} missing from its own level's queue"
                    );
                    debug_assert!(
                        ctx.queues.queue(process.level).contains(pid),
                        "membership claims process {pid} in {}, but the queue does not hold it",
                        process.level
                    );
                }
                ProcState::Running => debug_assert_eq!(
                    ctx.running,
                    Some(pid),
                    "Running process {pid} not on the CPU"
                ),
                ProcState::Completed => {
                    debug_assert!(
                        !ctx.queues.contains(pid),
                        "completed process {pid} still present in a ready queue"
                    );
                    debug_assert!(
                        process.is_complete(),
                        "completed process {pid} has remaining burst"
                    );
                    if let Some(m) = process.metrics {
                        debug_assert_eq!(
                            m.turnaround,
                            m.completion - process.arrival,
                            "process {pid} turnaround identity broken"
                        );
                        debug_assert_eq!(
                            m.waiting,
                            m.turnaround - process.burst,
                            "process {pid} waiting identity broken"
                        );
                        debug_assert!(
                            m.response <= m.waiting,
                            "process {pid} responded after its whole wait"
                        );
                    } else {
                        debug_assert!(false, "completed process {pid} has no metrics");
                    }
                }
            }
        }
    }
}

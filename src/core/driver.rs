use super::event::SchedEvent;
use super::observer::Observer;
use super::state::{Pid, ProcState, SchedCtx, StateError};

/// The multilevel-queue engine: owns the whole simulation state and
/// advances it one tick at a time.
pub struct MlqCore {
    pub ctx: SchedCtx,
    observer: Observer,
}

impl MlqCore {
    pub fn new() -> Self {
        Self {
            ctx: SchedCtx::new(),
            observer: Observer::new(),
        }
    }

    /// Admit an arrived process into its level's queue. A process whose
    /// burst is already zero never needs the CPU and completes right at
    /// the admission tick, with its first-run left unset.
    pub fn admit(&mut self, pid: Pid) -> Result<SchedEvent, StateError> {
        debug_assert_eq!(
            self.ctx.process(pid).state,
            ProcState::Pending,
            "process {pid} admitted twice"
        );
        if self.ctx.process(pid).remaining == 0 {
            let at = self.ctx.now;
            self.ctx.mark_completed(pid, at)?;
            return Ok(SchedEvent::Completed { pid, at });
        }
        let level = self.ctx.process(pid).level;
        self.ctx.enqueue(pid);
        Ok(SchedEvent::Admitted { pid, level })
    }

    /// Advance the simulation by one tick. In strict order: preemption
    /// check, dispatch, execution, completion check, quantum-expiry
    /// check, clock advance. Arrivals are admitted by the caller before
    /// each tick.
    pub fn tick(&mut self) -> Result<Vec<SchedEvent>, StateError> {
        let mut events = Vec::new();

        self.check_preemption(&mut events);

        if self.ctx.cpu_is_idle() {
            self.dispatch_next(&mut events);
        }

        if let Some(pid) = self.ctx.running {
            let now = self.ctx.now;
            let process = self.ctx.process_mut(pid);
            process.record_first_run(now);
            process.run_tick();
            self.ctx.quantum = self.ctx.quantum.saturating_sub(1);

            let process = self.ctx.process(pid);
            if process.is_complete() {
                // The unit of work spans the whole tick, so the process
                // finishes at its end.
                let at = now + 1;
                self.ctx.clear_cpu();
                self.ctx.mark_completed(pid, at)?;
                events.push(SchedEvent::Completed { pid, at });
            } else if self.ctx.quantum == 0 && process.level.expires_by_quantum() {
                let level = process.level;
                self.ctx.clear_cpu();
                self.ctx.enqueue(pid);
                events.push(SchedEvent::QuantumExpired { pid, level });
            }
        }

        self.ctx.advance_time(1);
        self.observer.observe(&self.ctx);
        Ok(events)
    }

    /// If any level strictly above the running process's own holds
    /// work, push the running process back to the tail of its own
    /// queue and discard its quantum. At most one preemption per tick;
    /// the vacated CPU is refilled by the dispatch phase.
    fn check_preemption(&mut self, events: &mut Vec<SchedEvent>) {
        let Some(pid) = self.ctx.running else {
            return;
        };
        let level = self.ctx.process(pid).level;
        if let Some(by) = self.ctx.queues.highest_ready_above(level) {
            self.ctx.clear_cpu();
            self.ctx.enqueue(pid);
            events.push(SchedEvent::Preempted { pid, level, by });
        }
    }

    /// Fill the idle CPU from the highest non-empty level, handing out
    /// that level's quantum.
    fn dispatch_next(&mut self, events: &mut Vec<SchedEvent>) {
        let Some(level) = self.ctx.queues.highest_ready() else {
            return;
        };
        let pid = self
            .ctx
            .queues
            .pop_next(level)
            .expect("non-empty queue must yield a process");
        let quantum = level.quantum_for(self.ctx.process(pid).remaining);
        self.ctx.set_running(pid, quantum);
        events.push(SchedEvent::Dispatched {
            pid,
            level,
            quantum,
        });
    }

    pub fn now(&self) -> super::state::Ticks {
        self.ctx.now
    }
}

impl Default for MlqCore {
    fn default() -> Self {
        Self::new()
    }
}

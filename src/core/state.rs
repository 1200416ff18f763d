use std::error::Error;
use std::fmt;

use super::queue::ReadyQueueSet;

// Index into the process table Vec
pub type Pid = usize;
pub type Ticks = u64;

/// Ready-queue level. Lower levels hold higher-priority work:
/// level 1 preempts 2 and 3, level 2 preempts 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueueLevel {
    Level1,
    Level2,
    Level3,
}

impl QueueLevel {
    pub const ALL: [QueueLevel; 3] = [QueueLevel::Level1, QueueLevel::Level2, QueueLevel::Level3];

    pub fn from_number(n: u64) -> Option<QueueLevel> {
        match n {
            1 => Some(QueueLevel::Level1),
            2 => Some(QueueLevel::Level2),
            3 => Some(QueueLevel::Level3),
            _ => None,
        }
    }

    pub fn number(self) -> u64 {
        match self {
            QueueLevel::Level1 => 1,
            QueueLevel::Level2 => 2,
            QueueLevel::Level3 => 3,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.number() as usize - 1
    }

    /// Quantum handed out on dispatch. Levels 1 and 2 are round robin
    /// with fixed slices; level 3 is shortest-job-first and gets its
    /// whole remaining burst, so it only stops on completion or
    /// preemption.
    pub fn quantum_for(self, remaining: Ticks) -> Ticks {
        match self {
            QueueLevel::Level1 => 1,
            QueueLevel::Level2 => 3,
            QueueLevel::Level3 => remaining,
        }
    }

    pub fn expires_by_quantum(self) -> bool {
        self != QueueLevel::Level3
    }
}

impl fmt::Display for QueueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Pending,
    Ready,
    Running,
    Completed,
}

/// Timing metrics derived once a process completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub completion: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
    pub response: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    CompletionBeforeArrival {
        label: String,
        arrival: Ticks,
        completion: Ticks,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::CompletionBeforeArrival {
                label,
                arrival,
                completion,
            } => write!(
                f,
                "process {label} completed at t={completion}, before its arrival at t={arrival}"
            ),
        }
    }
}

impl Error for StateError {}

/// A simulated process: static attributes from the input record plus
/// the mutable execution state the engine drives tick by tick.
///
/// Identity is the label alone; two processes with equal labels are the
/// same entity.
#[derive(Debug, Clone)]
pub struct Process {
    pub label: String,
    pub burst: Ticks,
    pub arrival: Ticks,
    pub level: QueueLevel,
    pub priority: i64,

    pub remaining: Ticks,
    pub first_run: Option<Ticks>,
    pub state: ProcState,
    pub metrics: Option<Metrics>,
}

impl Process {
    pub fn new(
        label: String,
        burst: Ticks,
        arrival: Ticks,
        level: QueueLevel,
        priority: i64,
    ) -> Self {
        Self {
            label,
            burst,
            arrival,
            level,
            priority,
            remaining: burst,
            first_run: None,
            state: ProcState::Pending,
            metrics: None,
        }
    }

    /// Execute one tick of work.
    pub fn run_tick(&mut self) {
        if self.remaining > 0 {
            self.remaining -= 1;
        }
    }

    /// Capture the response-time baseline. Only the first call sticks;
    /// later re-dispatches are no-ops.
    pub fn record_first_run(&mut self, tick: Ticks) {
        if self.first_run.is_none() {
            self.first_run = Some(tick);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Derive the final metrics from the completion tick. A completion
    /// tick earlier than the arrival tick is an engine defect, never a
    /// recoverable condition.
    pub fn finish(&mut self, completion: Ticks) -> Result<(), StateError> {
        if completion < self.arrival {
            return Err(StateError::CompletionBeforeArrival {
                label: self.label.clone(),
                arrival: self.arrival,
                completion,
            });
        }
        let turnaround = completion - self.arrival;
        let waiting = turnaround - self.burst;
        let response = match self.first_run {
            Some(t) => t - self.arrival,
            None => 0,
        };
        self.metrics = Some(Metrics {
            completion,
            turnaround,
            waiting,
            response,
        });
        Ok(())
    }
}

impl PartialEq for Process {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for Process {}

/// Whole-simulation state owned by the engine: the clock, the process
/// table, the three ready queues, the CPU slot and its quantum, and the
/// completed set.
#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub processes: Vec<Process>,
    pub queues: ReadyQueueSet,
    pub running: Option<Pid>,
    pub quantum: Ticks,
    pub completed: Vec<Pid>,
}

impl SchedCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            processes: Vec::new(),
            queues: ReadyQueueSet::new(),
            running: None,
            quantum: 0,
            completed: Vec::new(),
        }
    }

    pub fn create_process(&mut self, process: Process) -> Pid {
        let pid = self.processes.len();
        self.processes.push(process);
        pid
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn process(&self, pid: Pid) -> &Process {
        &self.processes[pid]
    }

    pub fn process_mut(&mut self, pid: Pid) -> &mut Process {
        &mut self.processes[pid]
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.running.is_none()
    }

    pub fn all_completed(&self) -> bool {
        self.completed.len() == self.processes.len()
    }

    /// Place a process at the tail of its own level's queue.
    pub fn enqueue(&mut self, pid: Pid) {
        let process = &self.processes[pid];
        debug_assert!(
            process.state != ProcState::Completed,
            "completed process {pid} cannot be enqueued"
        );
        debug_assert_ne!(self.running, Some(pid), "process {pid} is still on the CPU");
        let (level, burst) = (process.level, process.burst);
        self.queues.enqueue(level, pid, burst);
        self.processes[pid].state = ProcState::Ready;
    }

    pub fn set_running(&mut self, pid: Pid, quantum: Ticks) {
        debug_assert!(self.running.is_none(), "CPU already occupied");
        debug_assert!(
            !self.queues.contains(pid),
            "running process {pid} must not sit in a ready queue"
        );
        self.running = Some(pid);
        self.quantum = quantum;
        self.processes[pid].state = ProcState::Running;
    }

    pub fn clear_cpu(&mut self) {
        self.running = None;
        self.quantum = 0;
    }

    pub fn mark_completed(&mut self, pid: Pid, completion: Ticks) -> Result<(), StateError> {
        debug_assert!(
            !self.queues.contains(pid),
            "completing process {pid} that is still enqueued"
        );
        let process = &mut self.processes[pid];
        process.finish(completion)?;
        process.state = ProcState::Completed;
        self.completed.push(pid);
        Ok(())
    }
}

impl Default for SchedCtx {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn proc_at(arrival: Ticks, burst: Ticks) -> Process {
        Process::new("A".into(), burst, arrival, QueueLevel::Level1, 0)
    }

    #[test]
    fn run_tick_floors_at_zero() {
        let mut p = proc_at(0, 2);
        p.run_tick();
        p.run_tick();
        assert!(p.is_complete());
        p.run_tick();
        assert_eq!(p.remaining, 0);
    }

    #[test]
    fn first_run_is_recorded_once() {
        let mut p = proc_at(3, 5);
        p.record_first_run(7);
        p.record_first_run(9);
        assert_eq!(p.first_run, Some(7));
    }

    #[test]
    fn finish_derives_metrics() {
        let mut p = proc_at(2, 4);
        p.record_first_run(5);
        p.finish(11).unwrap();
        let m = p.metrics.unwrap();
        assert_eq!(m.completion, 11);
        assert_eq!(m.turnaround, 9);
        assert_eq!(m.waiting, 5);
        assert_eq!(m.response, 3);
    }

    #[test]
    fn finish_before_arrival_is_an_error() {
        let mut p = proc_at(5, 1);
        let err = p.finish(4).unwrap_err();
        assert_eq!(
            err,
            StateError::CompletionBeforeArrival {
                label: "A".into(),
                arrival: 5,
                completion: 4,
            }
        );
        assert!(p.metrics.is_none());
    }

    #[test]
    fn never_dispatched_process_reports_zero_response() {
        let mut p = proc_at(4, 0);
        p.finish(4).unwrap();
        assert_eq!(p.metrics.unwrap().response, 0);
    }

    #[test]
    fn identity_is_the_label() {
        let a = Process::new("P1".into(), 3, 0, QueueLevel::Level1, 0);
        let b = Process::new("P1".into(), 9, 4, QueueLevel::Level3, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn level_quantums() {
        assert_eq!(QueueLevel::Level1.quantum_for(10), 1);
        assert_eq!(QueueLevel::Level2.quantum_for(10), 3);
        assert_eq!(QueueLevel::Level3.quantum_for(10), 10);
        assert!(QueueLevel::Level1.expires_by_quantum());
        assert!(QueueLevel::Level2.expires_by_quantum());
        assert!(!QueueLevel::Level3.expires_by_quantum());
    }

    #[test]
    fn level_numbers_round_trip() {
        for level in QueueLevel::ALL {
            assert_eq!(QueueLevel::from_number(level.number()), Some(level));
        }
        assert_eq!(QueueLevel::from_number(0), None);
        assert_eq!(QueueLevel::from_number(4), None);
    }
}

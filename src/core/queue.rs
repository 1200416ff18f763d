use std::collections::VecDeque;

use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;

use super::state::{Pid, QueueLevel, Ticks};

/// Ordering key for the shortest-job-first queue. KeyedPriorityQueue is
/// a max-heap, so Ord is flipped to pop the smallest original burst
/// first; `seq` keeps equal bursts in insertion order.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct JobOrder {
    burst: Ticks,
    seq: u64,
}

impl PartialOrd for JobOrder {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JobOrder {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .burst
            .cmp(&self.burst)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// One ready queue and its discipline. The set of disciplines is
/// closed: levels 1 and 2 are FIFO, level 3 picks the shortest
/// original burst.
#[derive(Debug)]
pub enum ReadyQueue {
    Fifo { procs: VecDeque<Pid> },
    ShortestJob { procs: KeyedPriorityQueue<Pid, JobOrder> },
}

impl ReadyQueue {
    fn new_fifo() -> Self {
        Self::Fifo {
            procs: VecDeque::new(),
        }
    }

    fn new_shortest_job() -> Self {
        Self::ShortestJob {
            procs: KeyedPriorityQueue::new(),
        }
    }

    fn push(&mut self, pid: Pid, burst: Ticks, seq: u64) {
        match self {
            Self::Fifo { procs } => procs.push_back(pid),
            Self::ShortestJob { procs } => {
                procs.push(pid, JobOrder { burst, seq });
            }
        }
    }

    fn pop(&mut self) -> Option<Pid> {
        match self {
            Self::Fifo { procs } => procs.pop_front(),
            Self::ShortestJob { procs } => procs.pop().map(|(pid, _)| pid),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { procs } => procs.len(),
            Self::ShortestJob { procs } => procs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, pid: Pid) -> bool {
        match self {
            Self::Fifo { procs } => procs.contains(&pid),
            Self::ShortestJob { procs } => procs.get_priority(&pid).is_some(),
        }
    }
}

/// The three fixed ready queues, one per level, plus a membership map
/// backing the one-place-at-a-time invariant.
#[derive(Debug)]
pub struct ReadyQueueSet {
    queues: [ReadyQueue; 3],
    membership: FxHashMap<Pid, QueueLevel>,
    next_seq: u64,
}

impl ReadyQueueSet {
    pub fn new() -> Self {
        Self {
            queues: [
                ReadyQueue::new_fifo(),
                ReadyQueue::new_fifo(),
                ReadyQueue::new_shortest_job(),
            ],
            membership: FxHashMap::default(),
            next_seq: 0,
        }
    }

    /// Enqueue at the tail position of the level's discipline. `burst`
    /// is the original burst length, the ordering key at level 3.
    pub fn enqueue(&mut self, level: QueueLevel, pid: Pid, burst: Ticks) {
        assert!(
            !self.membership.contains_key(&pid),
            "process {pid} already present in a ready queue"
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queues[level.index()].push(pid, burst, seq);
        self.membership.insert(pid, level);
    }

    /// Pop the process the level's discipline selects next: FIFO head
    /// for levels 1 and 2, minimum original burst for level 3.
    pub fn pop_next(&mut self, level: QueueLevel) -> Option<Pid> {
        let pid = self.queues[level.index()].pop()?;
        let removed = self.membership.remove(&pid);
        debug_assert_eq!(removed, Some(level), "process {pid} missing queue membership");
        Some(pid)
    }

    pub fn is_empty(&self, level: QueueLevel) -> bool {
        self.queues[level.index()].is_empty()
    }

    pub fn len(&self, level: QueueLevel) -> usize {
        self.queues[level.index()].len()
    }

    /// The highest non-empty level strictly above (numerically below)
    /// the given one, if any.
    pub fn highest_ready_above(&self, level: QueueLevel) -> Option<QueueLevel> {
        QueueLevel::ALL
            .into_iter()
            .take_while(|l| *l < level)
            .find(|l| !self.is_empty(*l))
    }

    /// The highest non-empty level overall.
    pub fn highest_ready(&self) -> Option<QueueLevel> {
        QueueLevel::ALL.into_iter().find(|l| !self.is_empty(*l))
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.membership.contains_key(&pid)
    }

    pub fn level_of(&self, pid: Pid) -> Option<QueueLevel> {
        self.membership.get(&pid).copied()
    }

    pub(crate) fn queue(&self, level: QueueLevel) -> &ReadyQueue {
        &self.queues[level.index()]
    }
}

impl Default for ReadyQueueSet {
    fn default() -> Self {
        Self::new()
    }
}

use std::error::Error;
use std::fmt;

use log::{debug, info, warn};

use super::record::ProcessRecord;
use super::report::Report;
use crate::core::{MlqCore, Pid, Process, SchedEvent, StateError, Ticks};

/// Hard ceiling on simulated time. Reaching it means a discipline
/// failed to drain, which is a defect to surface, not a result to
/// truncate silently.
pub const MAX_TICKS: Ticks = 10_000;

#[derive(Debug)]
pub enum SimError {
    Invariant(StateError),
    /// The tick ceiling was hit with work still outstanding. Carries
    /// the report over whatever did complete.
    TickCeiling {
        ticks: Ticks,
        partial: Report,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Invariant(e) => write!(f, "scheduling invariant violated: {e}"),
            SimError::TickCeiling { ticks, partial } => write!(
                f,
                "simulation aborted at t={ticks} with {} process(es) completed",
                partial.rows.len()
            ),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimError::Invariant(e) => Some(e),
            SimError::TickCeiling { .. } => None,
        }
    }
}

impl From<StateError> for SimError {
    fn from(e: StateError) -> Self {
        SimError::Invariant(e)
    }
}

/// Drives an [`MlqCore`] over a workload: feeds due arrivals in before
/// every tick and loops until every process completes or the ceiling
/// is hit.
pub struct Sim {
    pub core: MlqCore,
    // Pids sorted by (arrival, input order); cursor marks the first
    // not-yet-admitted entry.
    pending: Vec<Pid>,
    cursor: usize,
}

impl Sim {
    pub fn new(records: Vec<ProcessRecord>) -> Self {
        let mut core = MlqCore::new();
        let mut pending: Vec<Pid> = records
            .into_iter()
            .map(|r| {
                core.ctx.create_process(Process::new(
                    r.label, r.burst, r.arrival, r.level, r.priority,
                ))
            })
            .collect();
        // Pids are assigned in input order, so the stable sort keeps
        // equal arrivals in that order.
        pending.sort_by_key(|&pid| core.ctx.process(pid).arrival);

        Self {
            core,
            pending,
            cursor: 0,
        }
    }

    /// One simulation step: admission, then the engine tick.
    pub fn step(&mut self) -> Result<Vec<SchedEvent>, SimError> {
        let mut events = self.admit_arrivals()?;
        events.extend(self.core.tick()?);
        Ok(events)
    }

    fn admit_arrivals(&mut self) -> Result<Vec<SchedEvent>, SimError> {
        let now = self.core.now();
        let mut events = Vec::new();
        // The pending list is arrival-sorted; stop at the first entry
        // that has not arrived yet.
        while let Some(&pid) = self.pending.get(self.cursor) {
            if self.core.ctx.process(pid).arrival > now {
                break;
            }
            events.push(self.core.admit(pid)?);
            self.cursor += 1;
        }
        Ok(events)
    }

    pub fn all_completed(&self) -> bool {
        self.core.ctx.all_completed()
    }

    /// Run the whole simulation and report the per-process metrics.
    pub fn run(&mut self) -> Result<Report, SimError> {
        while !self.all_completed() {
            let now = self.core.now();
            if now >= MAX_TICKS {
                warn!("tick ceiling {MAX_TICKS} reached, aborting");
                return Err(SimError::TickCeiling {
                    ticks: now,
                    partial: self.report(),
                });
            }
            for event in self.step()? {
                debug!("t={now} {event:?}");
            }
        }
        info!(
            "simulation completed at t={} with {} process(es)",
            self.core.now(),
            self.core.ctx.completed.len()
        );
        Ok(self.report())
    }

    pub fn report(&self) -> Report {
        Report::from_ctx(&self.core.ctx)
    }
}

use average::{Estimate, Mean};

use crate::core::{SchedCtx, Ticks};

/// Output row for one completed process, in the input record's field
/// order followed by the derived metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: String,
    pub burst: Ticks,
    pub arrival: Ticks,
    pub level: u64,
    pub priority: i64,
    pub waiting: Ticks,
    pub completion: Ticks,
    pub response: Ticks,
    pub turnaround: Ticks,
}

/// Arithmetic means across all completed processes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub waiting: f64,
    pub completion: f64,
    pub response: f64,
    pub turnaround: f64,
}

/// Per-process rows in label order plus the summary means. A report
/// built mid-run covers only the processes completed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub summary: Summary,
}

impl Report {
    pub fn from_ctx(ctx: &SchedCtx) -> Self {
        let mut rows: Vec<ReportRow> = ctx
            .completed
            .iter()
            .map(|&pid| {
                let process = ctx.process(pid);
                let m = process
                    .metrics
                    .expect("completed process must carry metrics");
                ReportRow {
                    label: process.label.clone(),
                    burst: process.burst,
                    arrival: process.arrival,
                    level: process.level.number(),
                    priority: process.priority,
                    waiting: m.waiting,
                    completion: m.completion,
                    response: m.response,
                    turnaround: m.turnaround,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.label.cmp(&b.label));

        let summary = Summary {
            waiting: mean(rows.iter().map(|r| r.waiting)),
            completion: mean(rows.iter().map(|r| r.completion)),
            response: mean(rows.iter().map(|r| r.response)),
            turnaround: mean(rows.iter().map(|r| r.turnaround)),
        };

        Report { rows, summary }
    }
}

// `Mean` estimates 0.0 when fed no samples, which is the value an
// empty report wants anyway.
fn mean(values: impl Iterator<Item = Ticks>) -> f64 {
    let mean: Mean = values.map(|v| v as f64).collect();
    mean.estimate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MlqCore, Process, QueueLevel};
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_come_out_in_label_order_with_means() {
        let mut core = MlqCore::new();
        for (label, burst) in [("B", 4), ("A", 2)] {
            let pid = core
                .ctx
                .create_process(Process::new(label.into(), burst, 0, QueueLevel::Level3, 1));
            core.admit(pid).unwrap();
        }
        for _ in 0..6 {
            core.tick().unwrap();
        }
        assert!(core.ctx.all_completed());

        let report = Report::from_ctx(&core.ctx);
        assert_eq!(
            report.rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        // A: completes at 2, waits 0; B: completes at 6, waits 2.
        assert_eq!(report.summary.waiting, 1.0);
        assert_eq!(report.summary.completion, 4.0);
        assert_eq!(report.summary.turnaround, 4.0);
    }

    #[test]
    fn empty_report_has_zero_means() {
        let core = MlqCore::new();
        let report = Report::from_ctx(&core.ctx);
        assert!(report.rows.is_empty());
        assert_eq!(report.summary.waiting, 0.0);
    }
}

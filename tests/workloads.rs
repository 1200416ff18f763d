use mlq_sim::records::render_report;
use mlq_sim::{ProcessRecord, QueueLevel, Sim};
use pretty_assertions::assert_eq;
use rand::prelude::*;

fn random_workload(count: usize, seed: u64) -> Vec<ProcessRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| ProcessRecord {
            label: format!("P{i:02}"),
            burst: rng.random_range(1..=9),
            arrival: rng.random_range(0..=30),
            level: QueueLevel::from_number(rng.random_range(1..=3)).unwrap(),
            priority: rng.random_range(-5..=5),
        })
        .collect()
}

#[test]
fn metric_identities_hold_for_every_process() {
    let records = random_workload(40, 7);
    let mut sim = Sim::new(records.clone());
    let report = sim.run().unwrap();

    assert_eq!(report.rows.len(), records.len());
    for row in &report.rows {
        assert_eq!(row.turnaround, row.completion - row.arrival, "{}", row.label);
        assert_eq!(row.waiting, row.turnaround - row.burst, "{}", row.label);
        assert!(
            row.response <= row.waiting,
            "{} responded after its whole wait",
            row.label
        );
        assert!(
            row.completion >= row.arrival + row.burst,
            "{} finished in less than its burst",
            row.label
        );
    }
}

#[test]
fn identical_inputs_produce_identical_reports() {
    let records = random_workload(25, 99);

    let first = render_report(&Sim::new(records.clone()).run().unwrap(), "in.txt", true);
    let second = render_report(&Sim::new(records).run().unwrap(), "in.txt", true);
    assert_eq!(first, second);
}

#[test]
fn level1_work_always_finishes_before_queued_lower_levels_start() {
    // With everything arriving at t=0, strict priority means no
    // level-2 or level-3 process runs until level 1 drains.
    let mut records = random_workload(10, 3);
    for (i, r) in records.iter_mut().enumerate() {
        r.arrival = 0;
        r.level = if i < 4 {
            QueueLevel::Level1
        } else {
            QueueLevel::Level2
        };
    }
    let level1_total: u64 = records
        .iter()
        .filter(|r| r.level == QueueLevel::Level1)
        .map(|r| r.burst)
        .sum();

    let mut sim = Sim::new(records);
    let report = sim.run().unwrap();
    for row in report.rows.iter().filter(|r| r.level == 2) {
        assert!(
            row.response >= level1_total,
            "{} started before level 1 drained",
            row.label
        );
    }
}

use std::fs;

use mlq_sim::records::{load_records, write_report};
use mlq_sim::Sim;
use pretty_assertions::assert_eq;

#[test]
fn file_in_file_out_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mlq.txt");
    let output = dir.path().join("output_mlq.txt");

    fs::write(
        &input,
        "# label; BT; AT; Q; Pr\n\
         A;5;0;1;2\n\
         B;2;0;3;1\n\
         bogus line\n\
         C;4;0;3;1\n",
    )
    .unwrap();

    let records = load_records(&input).unwrap();
    assert_eq!(records.len(), 3);

    let mut sim = Sim::new(records);
    let report = sim.run().unwrap();
    write_report(&output, &report, "mlq.txt", true).unwrap();

    // A alone at level 1 finishes untouched at t=5; then SJF serves B
    // (burst 2) before C (burst 4).
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(
        text,
        "# source: mlq.txt\n\
         # label; BT; AT; Q; Pr; WT; CT; RT; TAT\n\
         A;5;0;1;2;0;5;0;5\n\
         B;2;0;3;1;5;7;5;7\n\
         C;4;0;3;1;7;11;7;11\n\
         \n\
         WT=4.0; CT=7.7; RT=4.0; TAT=7.7;\n"
    );
}

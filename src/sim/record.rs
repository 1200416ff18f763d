use crate::core::{QueueLevel, Ticks};

/// One validated process definition as supplied by the record loader.
/// `priority` is carried through to the output but never consulted by
/// the scheduling disciplines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub label: String,
    pub burst: Ticks,
    pub arrival: Ticks,
    pub level: QueueLevel,
    pub priority: i64,
}

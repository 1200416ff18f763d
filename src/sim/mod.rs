pub mod driver;
pub mod record;
pub mod report;

pub use driver::{Sim, SimError, MAX_TICKS};
pub use record::ProcessRecord;
pub use report::{Report, ReportRow, Summary};

//! Display layer: weekday stamping and the CSV table sink.

pub mod table;

pub use table::{PlanRow, stamp_weekdays, write_csv};

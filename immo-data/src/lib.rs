//! Scenario files, year table export and logging for the investment calculator.

pub mod export;
pub mod logging;
pub mod scenario;

pub use export::{ExportError, YearTableExporter, format_amount};
pub use logging::init_logging;
pub use scenario::{Scenario, ScenarioError, ScenarioLoader};

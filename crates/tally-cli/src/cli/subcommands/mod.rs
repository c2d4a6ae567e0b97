mod audit;
mod catalog;
mod report;
mod schedule;

pub use audit::{AuditAddArgs, AuditCommands};
pub use catalog::CatalogCommands;
pub use report::ReportCommands;
pub use schedule::ScheduleCommands;

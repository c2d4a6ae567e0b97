pub mod audit;
pub mod catalog;
pub mod dispatch;
pub mod init;
pub mod report;
pub mod schedule;
pub mod schema;
pub mod shared;
pub mod summary;

pub mod account;
pub mod audit_log;
pub mod listing;
pub mod notification;
pub mod telemetry;
pub mod vehicle;

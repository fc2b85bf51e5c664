pub mod accounts;
pub mod audit_logs;

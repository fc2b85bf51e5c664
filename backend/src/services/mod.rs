pub mod account;
pub mod audit;
pub mod email;
pub mod export;
pub mod listing;
pub mod notification;
pub mod telemetry;
pub mod vehicle;

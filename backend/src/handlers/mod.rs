pub mod admin;
pub mod auth;
pub mod export;
pub mod listings;
pub mod notifications;
pub mod telemetry;
pub mod vehicles;

//! Backend for the Cars Platform marketplace: role-gated vehicle, listing,
//! and notification APIs with a transactional audit trail.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod policies;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;

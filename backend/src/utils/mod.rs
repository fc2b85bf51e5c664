pub mod csv;
pub mod jwt;
pub mod metadata;
pub mod password;
pub mod pdf;

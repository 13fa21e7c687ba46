pub mod auth;
pub mod datetime;
pub mod error;
pub mod notice;

pub use datetime::flexible_datetime;

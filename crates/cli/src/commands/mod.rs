pub mod config;
pub mod toggle;

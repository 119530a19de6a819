pub mod config;
pub mod library;

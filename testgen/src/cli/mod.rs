pub mod app;
pub mod commands;
pub mod config;
pub mod source_scan;

pub use app::{Cli, Commands};

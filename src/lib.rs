pub mod aggregate;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod logging;
pub mod parallel;
pub mod server;

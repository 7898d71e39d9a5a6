//! CLI library components for the `qms` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;

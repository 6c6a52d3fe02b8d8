//! CLI library components for the catalog feed compiler.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;

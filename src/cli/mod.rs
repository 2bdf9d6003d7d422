//! Command-line interface module.
//!
//! Provides argument parsing, command handling, and listing output.

pub mod args;
pub mod commands;
pub mod render;

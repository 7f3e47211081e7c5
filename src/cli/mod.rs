//! Command-line interface
//!
//! Argument parsing and command dispatch for the `roulette-bot` binary.

pub mod args;
pub mod commands;

//! `roulette-bot` - Russian roulette game engine for chat bots
//!
//! A chat user "pulls the trigger" and either survives, extending their
//! streak, or is shot and timed out. The crate provides the game engine with
//! per-channel locking, daily resets, channel records and JSON persistence,
//! plus the HTTP service and CLI that expose it.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod observability;
pub mod render;
pub mod server;
pub mod store;

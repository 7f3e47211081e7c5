//! `record` and `status` command handlers
//!
//! Both commands only read the stored documents. They never play, so no
//! daily reset is triggered.

use crate::cli::args::ChannelArgs;
use crate::cli::commands::open_engine;
use crate::config::Settings;
use crate::error::RouletteError;
use crate::input::require_channel;
use crate::render::{self, ChannelStatus, RecordResponse, ResponseFormat};

/// Prints the record of a channel.
///
/// # Errors
///
/// Returns a usage error for a blank channel.
pub fn record(settings: &Settings, args: &ChannelArgs) -> Result<(), RouletteError> {
    let channel = require_channel(Some(args.channel.as_str()))?;
    let engine = open_engine(settings);
    let record = engine.record(channel);

    match args.format {
        ResponseFormat::Text => println!("{}", render::record_text(channel, record.as_ref())),
        ResponseFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&RecordResponse::new(channel, record.as_ref()))?
        ),
    }
    Ok(())
}

/// Prints the counters, limited state and record of a channel.
///
/// # Errors
///
/// Returns a usage error for a blank channel.
pub fn status(settings: &Settings, args: &ChannelArgs) -> Result<(), RouletteError> {
    let channel = require_channel(Some(args.channel.as_str()))?;
    let engine = open_engine(settings);
    let counters = engine.counters(channel);
    let limited = engine.limited_state(channel);
    let record = engine.record(channel);

    let status = ChannelStatus {
        channel,
        counters: &counters,
        limited: &limited,
        record: record.as_ref(),
    };
    match args.format {
        ResponseFormat::Text => println!("{}", render::status_text(&status)),
        ResponseFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
    }
    Ok(())
}

//! Caller-side validation of channel and user identifiers.
//!
//! The engine trusts its inputs; the HTTP and CLI layers run these checks
//! before handing a request over.

use crate::error::InputError;

/// Returns the trimmed channel, or [`InputError::MissingChannel`] if it is
/// absent or blank.
///
/// # Errors
///
/// Returns [`InputError::MissingChannel`] for a missing or blank channel.
pub fn require_channel(channel: Option<&str>) -> Result<&str, InputError> {
    non_blank(channel).ok_or(InputError::MissingChannel)
}

/// Returns the trimmed `(channel, user)` pair.
///
/// # Errors
///
/// Returns [`InputError::MissingUser`] or [`InputError::MissingChannel`],
/// checking the user first.
pub fn require_player<'a>(
    channel: Option<&'a str>,
    user: Option<&'a str>,
) -> Result<(&'a str, &'a str), InputError> {
    let user = non_blank(user).ok_or(InputError::MissingUser)?;
    let channel = require_channel(channel)?;
    Ok((channel, user))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

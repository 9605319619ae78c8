//! Realtime channel keys
//!
//! Both participants of a conversation, and the relay, derive the same key for
//! a pair of users without any lookup: sort the two ids in their decimal text
//! form and join them with `-`. Users 7 and 3 share the channel `"3-7"`, and
//! users 9 and 10 share `"10-9"` because `"10"` sorts before `"9"`.

use super::error::SharedError;
use super::messaging::UserId;

/// Separator between the two ids of a channel key
pub const CHANNEL_KEY_SEPARATOR: char = '-';

/// Canonical channel key for a pair of users, independent of argument order.
pub fn channel_key(a: UserId, b: UserId) -> String {
    let (a, b) = (a.to_string(), b.to_string());
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{}{}{}", first, CHANNEL_KEY_SEPARATOR, second)
}

/// Parse a channel key back into its two participants.
///
/// Ids come back in key order. Only canonical keys are accepted: two positive
/// ids in text order, with no padding or whitespace. Anything else would name a channel that no client
/// ever derives.
pub fn parse_channel_key(key: &str) -> Result<(UserId, UserId), SharedError> {
    let invalid = || SharedError::validation("channel", format!("Invalid channel key '{}'", key));

    let (left, right) = key.split_once(CHANNEL_KEY_SEPARATOR).ok_or_else(invalid)?;
    let first: UserId = left.parse().map_err(|_| invalid())?;
    let second: UserId = right.parse().map_err(|_| invalid())?;

    if first <= 0 || second <= 0 || channel_key(first, second) != key {
        return Err(invalid());
    }

    Ok((first, second))
}

/// Whether `user_id` is one of the two participants named by `key`.
pub fn channel_includes(key: &str, user_id: UserId) -> bool {
    parse_channel_key(key)
        .map(|(first, second)| first == user_id || second == user_id)
        .unwrap_or(false)
}

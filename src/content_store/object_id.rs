//! Store identifiers.
//!
//! Ids are 12 bytes rendered as 24 lowercase hex characters: a big-endian
//! seconds timestamp followed by 8 random bytes, so ids sort roughly by
//! creation time.

use chrono::{DateTime, Utc};
use std::fmt::Write;

pub fn generate_object_id(now: DateTime<Utc>) -> String {
    let seconds = now.timestamp().clamp(0, u32::MAX as i64) as u32;
    let tail: [u8; 8] = rand::random();

    let mut id = String::with_capacity(24);
    for byte in seconds.to_be_bytes().iter().chain(tail.iter()) {
        let _ = write!(id, "{:02x}", byte);
    }
    id
}

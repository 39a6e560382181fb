//! Timed-state rules.
//!
//! Every timer is an absolute comparison between `now` and a timestamp captured when the
//! state began. Nothing here reads a clock; callers pass the time in.

use crate::config::{EXPLOSION_FRAME_MS, HIDE_DURATION_MS, POWER_DURATION_MS};

fn elapsed(since: u64, now: u64) -> u64 {
    now.saturating_sub(since)
}

/// A hidden player comes back once more than [`HIDE_DURATION_MS`] has passed
pub fn hide_expired(hidden: bool, hide_start: u64, now: u64) -> bool {
    hidden && elapsed(hide_start, now) > HIDE_DURATION_MS
}

/// Power level after decay, with the timestamp the next decay is measured from.
///
/// Returns `None` while nothing changes.
pub fn power_decay(level: u32, power_start: u64, now: u64) -> Option<(u32, u64)> {
    (level > 1 && elapsed(power_start, now) > POWER_DURATION_MS).then_some((level - 1, now))
}

/// Explosion frames flip every [`EXPLOSION_FRAME_MS`]
pub fn explosion_frame_due(last_frame: u64, now: u64) -> bool {
    elapsed(last_frame, now) >= EXPLOSION_FRAME_MS
}

/// Whether a banner expiring at `until` is still showing
pub fn banner_active(until: Option<u64>, now: u64) -> bool {
    until.is_some_and(|until| now < until)
}

//! Reservation id generation.
//!
//! Ids look like `SC-M5Q2X1AB-0K3ZP`: a fixed prefix, the creation time in
//! base-36 milliseconds and five base-36 characters, all uppercase. They sort
//! by creation time and are collision-resistant, not collision-proof. The
//! document store rejects a duplicate key, so no retry happens here.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use common::ReservationId;
use rand::Rng;

use crate::Result;

/// Prefix shared by every reservation id.
pub const RESERVATION_ID_PREFIX: &str = "SC-";

const SUFFIX_LEN: usize = 5;
const SUFFIX_SPACE: u64 = 36u64.pow(SUFFIX_LEN as u32);
const SEQUENCE_SPACE: u64 = 4096;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generates a reservation id for the current time.
pub fn generate_reservation_id() -> Result<ReservationId> {
    generate_reservation_id_with(Utc::now(), &mut rand::thread_rng())
}

/// Generates a reservation id for `now` using `rng` for the suffix.
///
/// The low bits of the suffix carry a process-wide sequence number, so ids
/// generated within the same millisecond differ unless more than 4096 are
/// generated in it.
pub fn generate_reservation_id_with<R: Rng>(
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<ReservationId> {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed) % SEQUENCE_SPACE;
    let random = rng.gen_range(0..SUFFIX_SPACE / SEQUENCE_SPACE);
    let suffix = random * SEQUENCE_SPACE + sequence;

    let raw = format!(
        "{RESERVATION_ID_PREFIX}{}-{:0>width$}",
        to_base36(millis),
        to_base36(suffix),
        width = SUFFIX_LEN
    );

    let id = ReservationId::new(raw.to_ascii_uppercase())?;
    metrics::counter!("reservation_ids_generated_total").increment(1);
    tracing::debug!(reservation_id = %id, "reservation id generated");
    Ok(id)
}

/// Renders `value` in lowercase base 36.
pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Checks a string against `SC-<base36 timestamp>-<5 base36 chars>`.
pub fn is_reservation_id_format(id: &str) -> bool {
    let is_base36 = |s: &str| {
        !s.is_empty()
            && s
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
    };

    let Some(rest) = id.strip_prefix(RESERVATION_ID_PREFIX) else {
        return false;
    };
    match rest.split_once('-') {
        Some((timestamp, suffix)) => {
            is_base36(timestamp) && suffix.len() == SUFFIX_LEN && is_base36(suffix)
        }
        None => false,
    }
}

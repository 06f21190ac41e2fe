//! Free-text time expressions to grid slots.
//!
//! Accepts the shapes people say out loud: `3pm`, `3:30 pm`, `15:30`,
//! `7 o'clock`, with arbitrary whitespace and case. Output is always a
//! member of [`slot_grid`](crate::models::slot::slot_grid).

use chrono::NaiveTime;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::models::slot::{nearest_slot, Slot, MAX_SNAP_MINUTES};

static OCLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"o['’]?clock?").expect("valid o'clock regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// Hour or minute is not an integer, or the text has no time at all.
    Malformed(String),
    OutOfRange { hour: u32, minute: u32 },
    /// A valid clock time that is too far from every slot.
    NoSlotWithinRange(NaiveTime),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(text) => write!(f, "not a time expression: `{text}`"),
            Self::OutOfRange { hour, minute } => {
                write!(f, "time out of range: hour {hour}, minute {minute}")
            }
            Self::NoSlotWithinRange(time) => write!(
                f,
                "no slot within {MAX_SNAP_MINUTES} minutes of {}",
                time.format("%H:%M")
            ),
        }
    }
}

impl Error for TimeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

fn split_meridiem(text: &str) -> (&str, Option<Meridiem>) {
    if let Some(rest) = text.strip_suffix("am") {
        (rest, Some(Meridiem::Am))
    } else if let Some(rest) = text.strip_suffix("pm") {
        (rest, Some(Meridiem::Pm))
    } else {
        (text, None)
    }
}

/// Parses a time expression into a clock time without snapping to the grid.
///
/// An `o'clock` expression with no am/pm and an hour from 1 to 11 is read
/// as afternoon or evening. Plain numbers keep their literal 24-hour value.
pub fn parse_clock_time(text: &str) -> Result<NaiveTime, TimeError> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    let malformed = || TimeError::Malformed(text.trim().to_string());

    let said_oclock = OCLOCK_RE.is_match(&compact);
    let rewritten = OCLOCK_RE.replace_all(&compact, ":00");
    let (numeric, meridiem) = split_meridiem(&rewritten);

    let mut parts = numeric.split(':');
    let hour_text = parts.next().unwrap_or_default();
    let minute_text = parts.next();
    if parts.next().is_some() {
        return Err(malformed());
    }

    let mut hour: u32 = hour_text.parse().map_err(|_| malformed())?;
    let minute: u32 = match minute_text {
        Some(value) => value.parse().map_err(|_| malformed())?,
        None => 0,
    };

    match meridiem {
        Some(Meridiem::Pm) if hour < 12 => hour += 12,
        Some(Meridiem::Am) if hour == 12 => hour = 0,
        None if said_oclock && (1..12).contains(&hour) => hour += 12,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(TimeError::OutOfRange { hour, minute })
}

/// Normalizes a time expression to a grid slot, snapping off-grid times to
/// the nearest slot when it is at most 30 minutes away.
pub fn normalize_time(text: &str) -> Result<Slot, TimeError> {
    let time = parse_clock_time(text)?;
    if let Some(slot) = Slot::from_time(time) {
        return Ok(slot);
    }
    let slot = nearest_slot(time).ok_or(TimeError::NoSlotWithinRange(time))?;
    debug!(
        "event=time_snapped module=time_parser requested={} slot={}",
        time.format("%H:%M"),
        slot
    );
    Ok(slot)
}

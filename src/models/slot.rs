//! Fixed day grid of canonical time slots.
//!
//! The grid runs from 05:00 to 23:00 inclusive in 30 minute steps. Every
//! slot held by a [`crate::models::schedule::Schedule`] is a member of it.

use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

pub const GRID_START_HOUR: u32 = 5;
pub const GRID_END_HOUR: u32 = 23;
pub const SLOT_STEP_MINUTES: u32 = 30;
/// Largest distance at which an off-grid time still snaps to a slot.
pub const MAX_SNAP_MINUTES: u32 = 30;

static SLOT_GRID: Lazy<Vec<Slot>> = Lazy::new(|| {
    let first = GRID_START_HOUR * 60;
    let last = GRID_END_HOUR * 60;
    (first..=last)
        .step_by(SLOT_STEP_MINUTES as usize)
        .filter_map(|minutes| NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0))
        .map(Slot)
        .collect()
});

/// Returns the ordered slot grid. The same slice is returned on every call.
pub fn slot_grid() -> &'static [Slot] {
    SLOT_GRID.as_slice()
}

/// One canonical position in the day grid, rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(NaiveTime);

impl Slot {
    /// Looks up the grid slot for an exact canonical `HH:MM` string.
    pub fn from_canonical(text: &str) -> Option<Self> {
        slot_grid()
            .iter()
            .copied()
            .find(|slot| slot.canonical() == text)
    }

    /// Looks up the grid slot at exactly `time`.
    pub fn from_time(time: NaiveTime) -> Option<Self> {
        slot_grid().iter().copied().find(|slot| slot.0 == time)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    pub fn minutes(&self) -> u32 {
        minutes_since_midnight(self.0)
    }

    pub fn canonical(&self) -> String {
        self.0.format("%H:%M").to_string()
    }

    /// 12-hour label such as `3:30 PM`.
    pub fn display_label(&self) -> String {
        format_display(self.0)
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Slot::from_canonical(&raw)
            .ok_or_else(|| D::Error::custom(format!("`{raw}` is not a planner slot")))
    }
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Formats any clock time the way the grid displays it (`9:00 AM`, `12:30 PM`).
pub fn format_display(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Converts a canonical `HH:MM` string to its 12-hour display label.
pub fn format_time_display(canonical: &str) -> Option<String> {
    NaiveTime::parse_from_str(canonical, "%H:%M")
        .ok()
        .map(format_display)
}

/// Finds the grid slot closest to `time`.
///
/// Returns `None` when the closest slot is more than [`MAX_SNAP_MINUTES`]
/// away. Equal distances resolve to the earlier slot.
pub fn nearest_slot(time: NaiveTime) -> Option<Slot> {
    let target = i64::from(minutes_since_midnight(time));
    // min_by_key keeps the first of several equal minima.
    let (slot, distance) = slot_grid()
        .iter()
        .map(|slot| (*slot, (i64::from(slot.minutes()) - target).abs()))
        .min_by_key(|(_, distance)| *distance)?;
    (distance <= i64::from(MAX_SNAP_MINUTES)).then_some(slot)
}

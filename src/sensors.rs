//! Latest vital-sign readings and their redraw flags.
//!
//! Acquisition tasks publish into one-deep overwrite channels; the bridge
//! pulls from them and keeps a value only if it differs from the stored
//! one, setting that field's dirty flag. The screen manager clears a flag
//! after it paints the value.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::sync::Latest;

/// The four displayed readings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorField {
    HeartRate,
    BloodOxygen,
    BodyTemperature,
    StepCount,
}

impl SensorField {
    /// Screen and telemetry order.
    pub const ALL: [SensorField; 4] = [
        SensorField::HeartRate,
        SensorField::BloodOxygen,
        SensorField::BodyTemperature,
        SensorField::StepCount,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            SensorField::HeartRate => "Heart Rate",
            SensorField::BloodOxygen => "Blood Oxygen",
            SensorField::BodyTemperature => "Body Temp",
            SensorField::StepCount => "step count",
        }
    }
}

/// Stored readings, each paired with a "needs redraw" flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    values: [i32; 4],
    dirty: [bool; 4],
}

impl SensorSnapshot {
    pub const fn new() -> Self {
        Self {
            values: [0; 4],
            dirty: [false; 4],
        }
    }

    pub fn value(&self, field: SensorField) -> i32 {
        self.values[field.index()]
    }

    pub fn is_dirty(&self, field: SensorField) -> bool {
        self.dirty[field.index()]
    }

    /// Store `value` if it differs; returns whether the field became dirty.
    pub fn update(&mut self, field: SensorField, value: i32) -> bool {
        let i = field.index();
        if self.values[i] == value {
            return false;
        }
        self.values[i] = value;
        self.dirty[i] = true;
        true
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty = [true; 4];
    }

    /// Consume the dirty flag, returning the value to paint.
    pub fn take_dirty(&mut self, field: SensorField) -> Option<i32> {
        let i = field.index();
        if core::mem::take(&mut self.dirty[i]) {
            Some(self.values[i])
        } else {
            None
        }
    }
}

/// Snapshot shared between the screen manager, input path and telemetry.
///
/// Critical sections are a handful of loads and stores; safe to use from
/// any task.
pub struct SensorBoard {
    inner: Mutex<CriticalSectionRawMutex, RefCell<SensorSnapshot>>,
}

impl SensorBoard {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(SensorSnapshot::new())),
        }
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        self.inner.lock(|s| *s.borrow())
    }

    pub fn update(&self, field: SensorField, value: i32) -> bool {
        self.inner.lock(|s| s.borrow_mut().update(field, value))
    }

    pub fn mark_all_dirty(&self) {
        self.inner.lock(|s| s.borrow_mut().mark_all_dirty());
    }

    pub fn take_dirty(&self, field: SensorField) -> Option<i32> {
        self.inner.lock(|s| s.borrow_mut().take_dirty(field))
    }
}

impl Default for SensorBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// One overwrite channel per reading, fed by the acquisition tasks.
pub struct SensorChannels {
    channels: [Latest<i32>; 4],
}

impl SensorChannels {
    pub const fn new() -> Self {
        Self {
            channels: [Latest::new(), Latest::new(), Latest::new(), Latest::new()],
        }
    }

    pub fn channel(&self, field: SensorField) -> &Latest<i32> {
        &self.channels[field.index()]
    }

    /// Publish a new sample; replaces any unread one.
    pub fn publish(&self, field: SensorField, value: i32) {
        self.channel(field).publish(value);
    }
}

impl Default for SensorChannels {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge one optional sample into the board. Absence is not an error.
pub fn merge_sample(board: &SensorBoard, field: SensorField, sample: Option<i32>) -> bool {
    match sample {
        Some(value) => {
            let changed = board.update(field, value);
            #[cfg(feature = "defmt")]
            if changed {
                defmt::debug!("Sensor: {} -> {}", field, value);
            }
            changed
        }
        None => false,
    }
}

/// Non-blocking bridge pass over all four channels.
///
/// Returns how many fields changed.
pub fn poll_channels(channels: &SensorChannels, board: &SensorBoard) -> usize {
    SensorField::ALL
        .iter()
        .filter(|&&field| merge_sample(board, field, channels.channel(field).try_receive()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_value_does_not_dirty() {
        let mut s = SensorSnapshot::new();
        assert!(s.update(SensorField::HeartRate, 72));
        assert_eq!(s.take_dirty(SensorField::HeartRate), Some(72));
        assert!(!s.update(SensorField::HeartRate, 72));
        assert!(!s.is_dirty(SensorField::HeartRate));
    }

    #[test]
    fn change_dirties_only_that_field() {
        let mut s = SensorSnapshot::new();
        s.update(SensorField::HeartRate, 72);
        s.take_dirty(SensorField::HeartRate);
        assert!(s.update(SensorField::HeartRate, 75));
        assert!(s.is_dirty(SensorField::HeartRate));
        assert!(!s.is_dirty(SensorField::BloodOxygen));
        assert_eq!(s.take_dirty(SensorField::HeartRate), Some(75));
        assert_eq!(s.take_dirty(SensorField::HeartRate), None);
    }

    #[test]
    fn bridge_keeps_latest_and_ignores_absence() {
        let channels = SensorChannels::new();
        let board = SensorBoard::new();
        channels.publish(SensorField::BloodOxygen, 97);
        channels.publish(SensorField::BloodOxygen, 98);
        channels.publish(SensorField::StepCount, 1200);
        assert_eq!(poll_channels(&channels, &board), 2);

        let snap = board.snapshot();
        assert_eq!(snap.value(SensorField::BloodOxygen), 98);
        assert_eq!(snap.value(SensorField::StepCount), 1200);
        assert_eq!(snap.value(SensorField::HeartRate), 0);
        assert!(!snap.is_dirty(SensorField::HeartRate));

        assert_eq!(poll_channels(&channels, &board), 0);
        assert_eq!(board.snapshot().value(SensorField::BloodOxygen), 98);
    }

    #[test]
    fn labels_follow_screen_order() {
        let labels: [&str; 4] = SensorField::ALL.map(SensorField::label);
        assert_eq!(labels, ["Heart Rate", "Blood Oxygen", "Body Temp", "step count"]);
    }
}

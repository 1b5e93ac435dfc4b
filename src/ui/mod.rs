//! User interface subsystem - TFT screens + navigation button.
//!
//! The screen manager owns which screen is shown and repaints only what
//! changed. Screen switches are requested by the input path and committed
//! by the manager under the screen lock, at most one per scheduling pass.
//!
//! ## Components
//!
//! - **State machine**: [`transition`] maps `(state, request)` to the next
//!   state plus the region to clear, independent of any drawing.
//! - **Layout**: fixed geometry and paint routines for each screen.
//! - **Manager**: plans a pass under the lock and renders it outside.
//! - **Input**: turns timer notifications into screen requests.

pub mod input_logic;
pub mod layout;
pub mod manager;

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;

use crate::calendar::CalendarEvent;
use crate::sensors::SensorField;

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Time and date - the resting screen.
    #[default]
    Clock,
    /// Four labelled vital-sign rows.
    Sensor,
    /// Fever alert. Drawable and reachable through
    /// [`ScreenRequest::ShowWarning`], but nothing raises that request yet.
    Warning,
}

/// Requests that can change the current screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenRequest {
    /// A debounced press of the navigation button.
    ShowSensors,
    /// The auto-revert countdown expired.
    Revert,
    /// Alert hook for the warning screen.
    ShowWarning,
}

/// Surface areas that are blanked before repainting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    None,
    FullSurface,
    /// Whole date/time block (year rollover or full repaint).
    ClockFace,
    /// Month/day text plus hours and minutes.
    ClockMonth,
    /// Day digits plus hours and minutes.
    ClockDay,
    /// Hours and minutes.
    ClockHour,
    /// Minutes only.
    ClockMinute,
    /// Sensor frame, labels and values.
    SensorPanel,
    /// One sensor value cell.
    SensorValue(SensorField),
    WarningPanel,
}

impl Region {
    /// Clock sub-region that a calendar event invalidates.
    pub fn for_calendar(event: CalendarEvent) -> Region {
        match event {
            CalendarEvent::None => Region::None,
            CalendarEvent::Minute => Region::ClockMinute,
            CalendarEvent::Hour => Region::ClockHour,
            CalendarEvent::Day => Region::ClockDay,
            CalendarEvent::Month => Region::ClockMonth,
            CalendarEvent::Year => Region::ClockFace,
        }
    }
}

/// Shared screen identity. Only mutated under the screen lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenState {
    pub current: Screen,
    pub previous: Screen,
    /// Calendar event behind the most recent clock repaint.
    pub last_calendar_event: CalendarEvent,
}

impl ScreenState {
    pub const fn new() -> Self {
        Self {
            current: Screen::Clock,
            previous: Screen::Clock,
            last_calendar_event: CalendarEvent::None,
        }
    }

    /// Commit a transition. `previous` changes only here, together with `current`.
    pub fn apply(&mut self, t: &Transition) {
        self.previous = t.from;
        self.current = t.to;
    }
}

/// Outcome of a committed screen request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
    /// Area left behind by the old screen.
    pub clear: Region,
    /// Every sensor value must be repainted on entry.
    pub refresh_sensors: bool,
}

/// Pure screen state machine.
///
/// Returns `None` when the request has no effect in the current screen.
pub fn transition(state: &ScreenState, request: ScreenRequest) -> Option<Transition> {
    let from = state.current;
    let (to, clear, refresh_sensors) = match (from, request) {
        (Screen::Clock, ScreenRequest::ShowSensors) => (Screen::Sensor, Region::ClockFace, true),
        // Another press while already showing sensors re-arms and refreshes.
        (Screen::Sensor, ScreenRequest::ShowSensors) => (Screen::Sensor, Region::None, true),
        (Screen::Sensor, ScreenRequest::Revert) => (Screen::Clock, Region::SensorPanel, false),
        (Screen::Warning, ScreenRequest::Revert) => (Screen::Clock, Region::WarningPanel, false),
        (Screen::Clock, ScreenRequest::ShowWarning) => (Screen::Warning, Region::ClockFace, false),
        (Screen::Sensor, ScreenRequest::ShowWarning) => {
            (Screen::Warning, Region::SensorPanel, false)
        }
        (Screen::Clock, ScreenRequest::Revert)
        | (Screen::Warning, ScreenRequest::ShowSensors)
        | (Screen::Warning, ScreenRequest::ShowWarning) => return None,
    };
    Some(Transition {
        from,
        to,
        clear,
        refresh_sensors,
    })
}

//! Shared application state, created once at startup and handed to every
//! task by `&'static` reference.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

use crate::sensors::{SensorBoard, SensorChannels};
use crate::sync::Latest;
use crate::timer::TimerSignals;
use crate::ui::{ScreenRequest, ScreenState};

pub struct AppContext {
    /// Screen identity. Only the screen manager locks it.
    pub screen: Mutex<CriticalSectionRawMutex, ScreenState>,
    /// Pending screen switch, committed by the manager on its next pass.
    pub requests: Latest<ScreenRequest>,
    pub timers: TimerSignals,
    pub sensors: SensorBoard,
    pub channels: SensorChannels,
}

impl AppContext {
    pub const fn new() -> Self {
        Self {
            screen: Mutex::new(ScreenState::new()),
            requests: Latest::new(),
            timers: TimerSignals::new(),
            sensors: SensorBoard::new(),
            channels: SensorChannels::new(),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

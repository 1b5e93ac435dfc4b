//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and layout
//! constants live here so they can be tuned in one place.

// Display

/// Panel width in pixels (ILI9341, portrait).
pub const DISPLAY_WIDTH: i32 = 240;

/// Panel height in pixels (ILI9341, portrait).
pub const DISPLAY_HEIGHT: i32 = 320;

/// Panel SPI clock (MHz).
pub const DISPLAY_SPI_MHZ: u32 = 8;

// Soft timers

/// Period of the soft-timer tick (ms).
pub const TICK_PERIOD_MS: u64 = 100;

/// Ticks a raw button edge must survive before the press is confirmed (300 ms).
pub const DEBOUNCE_TICKS: u16 = 3;

/// Ticks the sensor screen stays up without a press (30 s).
pub const REVERT_TICKS: u16 = 300;

/// Ticks per "one second elapsed" event at the nominal tick period.
pub const SECOND_TICKS: u16 = (1000 / TICK_PERIOD_MS) as u16;

/// Historical one-second threshold.
///
/// At a 100 ms tick this fires every 100 s; kept only so the legacy
/// cadence can be reproduced through [`TimerConfig::LEGACY`].
pub const LEGACY_SECOND_TICKS: u16 = 1000;

/// Thresholds for the three soft timers driven by the periodic tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Ticks between "one second elapsed" events.
    pub second_ticks: u16,
    /// Ticks between a latched raw edge and the confirming re-sample.
    pub debounce_ticks: u16,
    /// Ticks from arming until the auto-revert timeout fires.
    pub revert_ticks: u16,
}

impl TimerConfig {
    /// Thresholds consistent with a 100 ms tick.
    pub const DEFAULT: Self = Self {
        second_ticks: SECOND_TICKS,
        debounce_ticks: DEBOUNCE_TICKS,
        revert_ticks: REVERT_TICKS,
    };

    /// Historical thresholds (slow 100 s clock check).
    pub const LEGACY: Self = Self {
        second_ticks: LEGACY_SECOND_TICKS,
        debounce_ticks: DEBOUNCE_TICKS,
        revert_ticks: REVERT_TICKS,
    };
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// Scheduling

/// Screen manager scheduling period (ms).
pub const SCHEDULING_PERIOD_MS: u64 = 100;

/// Maximum wait for the screen lock before a redraw pass is skipped (ms).
pub const SCREEN_LOCK_WAIT_MS: u64 = 100;

/// Per-channel sensor receive windows (ms), in [`crate::sensors::SensorField::ALL`] order.
pub const SENSOR_WAIT_MS: [u64; 4] = [100, 100, 50, 100];

/// Input task wait window for a press or timeout notification (ms).
pub const INPUT_WAIT_MS: u64 = 100;

/// Input task sleep when neither a press nor a timeout fired (ms).
pub const INPUT_IDLE_SLEEP_MS: u64 = 200;

/// Input task sleep after posting a screen request (ms).
pub const INPUT_SETTLE_MS: u64 = 100;

/// Power button debounce interval (ms).
pub const POWER_BUTTON_DEBOUNCE_MS: u64 = 50;

// Telemetry

/// Telemetry push cadence (ms), independent of the redraw cadence.
pub const TELEMETRY_PERIOD_MS: u64 = 1000;

/// Serial Bluetooth module baud rate.
pub const TELEMETRY_BAUD: u32 = 9600;

/// Telemetry record buffer capacity (bytes).
pub const TELEMETRY_RECORD_LEN: usize = 56;

// Calendar

/// Wall-clock time assumed at boot (seconds since the Unix epoch).
///
/// The nRF52840 has no battery-backed calendar; uptime is added to this.
pub const BOOT_EPOCH_SECS: i64 = 1_704_067_200; // 2024-01-01 00:00:00

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Navigation button → P0.11  (active-high, rising edge)
//   Power button      → P0.12  (active-high, rising edge)
//   TFT SCK           → P0.19
//   TFT MOSI          → P0.20
//   TFT CS            → P0.17
//   TFT DC            → P0.21
//   TFT RESET         → P0.22
//   TFT backlight     → P0.23
//   UART TX (HC-05)   → P0.06

//! Unified error type for healthgear.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Scheduling
    /// The screen lock could not be taken within its wait window.
    /// The redraw pass is skipped and retried on the next cycle.
    LockTimeout,

    // Telemetry
    /// Record did not fit the fixed-size output buffer.
    BufferOverflow,

    // Buses
    /// SPI or UART write failed.
    Transport,

    // Bring-up
    /// Panel initialisation failed before the UI started.
    Display,
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::BufferOverflow
    }
}

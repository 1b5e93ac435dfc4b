//! Library interface for healthgear.
//!
//! All UI logic is pure and host-testable: the drawing engine, calendar
//! rollover detection, soft timers, screen state machine and telemetry
//! formatting. The embedded binary (`main.rs`, `embedded` feature) only
//! wires these onto the nRF52840 peripherals.
//!
//! Usage: `cargo test` on the host, `cargo run --release --features embedded`
//! on the target (probe-rs runner).

#![cfg_attr(not(test), no_std)]

// ═══════════════════════════════════════════════════════════════════════════
// Core
// ═══════════════════════════════════════════════════════════════════════════

pub mod config;
pub mod context;
pub mod error;
pub mod sync;

// ═══════════════════════════════════════════════════════════════════════════
// Drawing and timekeeping
// ═══════════════════════════════════════════════════════════════════════════

pub mod calendar;
pub mod canvas;
pub mod timer;

// ═══════════════════════════════════════════════════════════════════════════
// Data, screens and outputs
// ═══════════════════════════════════════════════════════════════════════════

pub mod power_logic;
pub mod sensors;
pub mod telemetry;
pub mod ui;

// ═══════════════════════════════════════════════════════════════════════════
// Target-only tasks
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(feature = "embedded")]
pub mod tasks;

pub use context::AppContext;
pub use error::Error;

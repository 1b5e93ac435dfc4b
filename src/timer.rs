//! Soft timers driven by the fixed 100 ms tick.
//!
//! One periodic handler derives three events from plain counters:
//! "one second elapsed", "button press confirmed" (debounced) and
//! "screen auto-revert timeout". The handler runs in interrupt-like
//! context: no blocking, no loops, only arithmetic and non-blocking
//! raise/take on single-slot notifications.

use embedded_hal::digital::InputPin;

use crate::config::TimerConfig;
use crate::sync::Notify;

/// Events produced by one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickEvents {
    pub second_elapsed: bool,
    pub press_confirmed: bool,
    pub timeout: bool,
}

/// Counter state of the three soft timers.
#[derive(Clone, Debug)]
pub struct SoftTimers {
    config: TimerConfig,
    second_accumulator: u16,
    debounce_accumulator: u16,
    debouncing: bool,
    timeout_accumulator: u16,
    armed: bool,
}

impl SoftTimers {
    pub const fn new(config: TimerConfig) -> Self {
        Self {
            config,
            second_accumulator: 0,
            debounce_accumulator: 0,
            debouncing: false,
            timeout_accumulator: 0,
            armed: false,
        }
    }

    pub fn is_debouncing(&self) -> bool {
        self.debouncing
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advance all counters by one tick.
    ///
    /// `raw_press` is a pending raw button edge, `arm` a pending request to
    /// (re)start the auto-revert countdown. The button line is sampled only
    /// when a debounce window completes; a read error counts as released.
    pub fn step<B: InputPin>(&mut self, raw_press: bool, arm: bool, button: &mut B) -> TickEvents {
        let mut events = TickEvents::default();

        if raw_press {
            self.debounce_accumulator = 0;
            self.debouncing = true;
        }

        if self.debouncing {
            self.debounce_accumulator += 1;
            if self.debounce_accumulator >= self.config.debounce_ticks {
                events.press_confirmed = button.is_high().unwrap_or(false);
                // Reset regardless of level so a held button cannot re-trigger.
                self.debouncing = false;
                self.debounce_accumulator = 0;
            }
        }

        self.second_accumulator += 1;
        if self.second_accumulator >= self.config.second_ticks {
            events.second_elapsed = true;
            self.second_accumulator = 0;
        }

        if arm {
            self.timeout_accumulator = 0;
            self.armed = true;
        }

        if self.armed {
            self.timeout_accumulator += 1;
            if self.timeout_accumulator >= self.config.revert_ticks {
                events.timeout = true;
                self.armed = false;
                self.timeout_accumulator = 0;
            }
        }

        events
    }
}

/// Notifications shared between the tick handler and the tasks.
pub struct TimerSignals {
    /// Raw button edge, raised by the edge interrupt.
    pub raw_press: Notify,
    /// Request to (re)arm the auto-revert countdown.
    pub arm_timeout: Notify,
    /// One second elapsed.
    pub second: Notify,
    /// Debounced press confirmed.
    pub press: Notify,
    /// Auto-revert countdown expired.
    pub timeout: Notify,
}

impl TimerSignals {
    pub const fn new() -> Self {
        Self {
            raw_press: Notify::new(),
            arm_timeout: Notify::new(),
            second: Notify::new(),
            press: Notify::new(),
            timeout: Notify::new(),
        }
    }
}

impl Default for TimerSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodic tick handler: pending requests in, notifications out.
pub struct TickHandler<'a, B> {
    timers: SoftTimers,
    signals: &'a TimerSignals,
    button: B,
}

impl<'a, B: InputPin> TickHandler<'a, B> {
    pub fn new(config: TimerConfig, signals: &'a TimerSignals, button: B) -> Self {
        Self {
            timers: SoftTimers::new(config),
            signals,
            button,
        }
    }

    pub fn timers(&self) -> &SoftTimers {
        &self.timers
    }

    /// Button line, for callers that also wait on its edges.
    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }

    /// Run one tick. Bounded work, never blocks.
    pub fn on_tick(&mut self) -> TickEvents {
        let raw_press = self.signals.raw_press.try_take();
        let arm = self.signals.arm_timeout.try_take();
        let events = self.timers.step(raw_press, arm, &mut self.button);

        if events.second_elapsed {
            self.signals.second.raise();
        }
        if events.press_confirmed {
            self.signals.press.raise();
        }
        if events.timeout {
            self.signals.timeout.raise();
        }
        events
    }
}

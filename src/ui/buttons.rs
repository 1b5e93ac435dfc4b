//! GPIO button input.
//!
//! Two physical buttons (active-high with internal pull-down):
//!   - NAV   - raw edges feed the tick-driven debouncer, see
//!             [`wait_nav_edge`]
//!   - POWER - toggles the panel backlight, debounced here
//!
//! The navigation pin is owned by the tick task because the debouncer
//! re-samples its level; only the power button has its own task.

use crate::config::POWER_BUTTON_DEBOUNCE_MS;
use crate::power_logic::DisplayPower;
use defmt::info;
use embassy_nrf::gpio::{AnyPin, Input, Level, Output, OutputDrive, Pull};
use embassy_time::{Duration, Timer};

/// Navigation button line.
pub fn nav_button(pin: AnyPin) -> Input<'static> {
    Input::new(pin, Pull::Down)
}

/// Resolve on the next press edge of the navigation button.
pub async fn wait_nav_edge(btn: &mut Input<'static>) {
    btn.wait_for_rising_edge().await;
}

/// Power button loop. Never returns.
pub async fn power_button_task(pin: AnyPin, backlight: AnyPin) -> ! {
    let mut btn = Input::new(pin, Pull::Down);
    let mut power = DisplayPower::new(Output::new(backlight, Level::High, OutputDrive::Standard));

    loop {
        btn.wait_for_rising_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(POWER_BUTTON_DEBOUNCE_MS)).await;

        if btn.is_high() {
            let on = power.toggle();
            info!("Button: power -> {}", on);

            // Wait for release to avoid repeat triggers.
            btn.wait_for_falling_edge().await;
            Timer::after(Duration::from_millis(POWER_BUTTON_DEBOUNCE_MS)).await;
        }
    }
}

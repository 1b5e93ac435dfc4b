//! Embassy tasks wiring the library onto the nRF52840.
//!
//!   - `tick_task`      - 100 ms soft-timer tick; also owns the navigation
//!                        button and latches its raw edges.
//!   - `input_task`     - turns confirmed presses and timeouts into screen
//!                        requests.
//!   - `screen_task`    - scheduling loop: redraw pass, then sensor bridge.
//!   - `telemetry_task` - pushes the latest readings over the UART link.
//!   - `power_task`     - backlight toggle button.
//!
//! Every wait on shared state is bounded; nothing blocks forever on a
//! notification that may never come.

use core::fmt;

use defmt::{debug, info, warn};
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::AnyPin;
use embassy_nrf::peripherals;
use embassy_nrf::uarte::UarteTx;
use embassy_time::{with_timeout, Duration, Instant, Ticker, Timer};

use crate::calendar::EpochClock;
use crate::config::{
    TimerConfig, BOOT_EPOCH_SECS, INPUT_IDLE_SLEEP_MS, INPUT_SETTLE_MS, INPUT_WAIT_MS,
    SCHEDULING_PERIOD_MS, SCREEN_LOCK_WAIT_MS, SENSOR_WAIT_MS, TELEMETRY_PERIOD_MS,
    TICK_PERIOD_MS,
};
use crate::context::AppContext;
use crate::sensors::{merge_sample, SensorField};
use crate::telemetry::{SerialTelemetry, TelemetrySink, Vitals};
use crate::timer::TickHandler;
use crate::ui::display::PanelCanvas;
use crate::ui::buttons;
use crate::ui::input_logic::{self, InputAction};
use crate::ui::manager::ScreenManager;

const fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn uptime_secs() -> u64 {
    Instant::now().as_secs()
}

/// Wall clock: boot epoch plus uptime.
pub type DeviceClock = EpochClock<fn() -> u64>;

pub fn device_clock() -> DeviceClock {
    EpochClock::new(BOOT_EPOCH_SECS, uptime_secs as fn() -> u64)
}

/// Character stream over the telemetry UART.
pub struct UartWriter(pub UarteTx<'static, peripherals::UARTE0>);

impl fmt::Write for UartWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.blocking_write(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

#[embassy_executor::task]
pub async fn tick_task(ctx: &'static AppContext, nav: AnyPin) -> ! {
    let mut ticks = TickHandler::new(TimerConfig::DEFAULT, &ctx.timers, buttons::nav_button(nav));
    let mut ticker = Ticker::every(ms(TICK_PERIOD_MS));

    loop {
        let fired = select(ticker.next(), buttons::wait_nav_edge(ticks.button_mut())).await;
        match fired {
            Either::First(()) => {
                let events = ticks.on_tick();
                if events.press_confirmed {
                    debug!("Tick: press confirmed");
                }
                if events.timeout {
                    debug!("Tick: auto-revert timeout");
                }
            }
            Either::Second(()) => ctx.timers.raw_press.raise(),
        }
    }
}

#[embassy_executor::task]
pub async fn input_task(ctx: &'static AppContext) -> ! {
    let signals = &ctx.timers;
    loop {
        let fired = with_timeout(ms(INPUT_WAIT_MS), select(signals.press.wait(), signals.timeout.wait())).await;
        let action = match fired {
            Ok(Either::First(())) => input_logic::dispatch(ctx, true, signals.timeout.try_take()),
            Ok(Either::Second(())) => input_logic::dispatch(ctx, signals.press.try_take(), true),
            Err(_) => InputAction::None,
        };

        match action {
            InputAction::None => Timer::after(ms(INPUT_IDLE_SLEEP_MS)).await,
            _ => {
                info!("Input: {}", action);
                Timer::after(ms(INPUT_SETTLE_MS)).await
            }
        }
    }
}

/// Bounded wait on each sensor channel; absence leaves the value alone.
async fn bridge_sensors(ctx: &AppContext) {
    for field in SensorField::ALL {
        let wait = ms(SENSOR_WAIT_MS[field.index()]);
        let sample = with_timeout(wait, ctx.channels.channel(field).receive()).await.ok();
        merge_sample(&ctx.sensors, field, sample);
    }
}

#[embassy_executor::task]
pub async fn screen_task(ctx: &'static AppContext, mut canvas: PanelCanvas) -> ! {
    let mut manager = ScreenManager::new(ctx, device_clock());
    manager.boot(&mut canvas);
    info!("Screen: boot paint done");

    let mut ticker = Ticker::every(ms(SCHEDULING_PERIOD_MS));
    let mut reported_errors = 0;
    loop {
        match with_timeout(ms(SCREEN_LOCK_WAIT_MS), ctx.screen.lock()).await {
            Ok(mut state) => {
                let plan = manager.plan_locked(&mut state);
                drop(state);
                manager.render(&mut canvas, &plan);
            }
            Err(_) => warn!("Screen: lock busy, pass skipped"),
        }

        let errors = canvas.sink().error_count();
        if errors != reported_errors {
            warn!("Screen: {} pixel writes failed", errors - reported_errors);
            reported_errors = errors;
        }

        bridge_sensors(ctx).await;
        ticker.next().await;
    }
}

#[embassy_executor::task]
pub async fn telemetry_task(ctx: &'static AppContext, mut link: SerialTelemetry<UartWriter>) -> ! {
    let mut ticker = Ticker::every(ms(TELEMETRY_PERIOD_MS));
    loop {
        ticker.next().await;
        let vitals = Vitals::from(&ctx.sensors.snapshot());
        if let Err(e) = link.report(&vitals) {
            warn!("Telemetry: {}", e);
        }
    }
}

#[embassy_executor::task]
pub async fn power_task(button: AnyPin, backlight: AnyPin) -> ! {
    buttons::power_button_task(button, backlight).await
}

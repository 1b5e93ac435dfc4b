//! Screen manager: commits screen switches and repaints what changed.
//!
//! Each scheduling pass is split in two:
//!
//! 1. [`ScreenManager::plan_locked`] runs while the screen lock is held. It
//!    commits at most one pending request and decides what to repaint.
//! 2. [`ScreenManager::render`] runs after the lock is released and draws
//!    exactly the plan, so the screen identity it paints is the one captured
//!    under the lock.

use super::layout;
use super::{transition, Region, Screen, ScreenState};
use crate::calendar::{check_rollover, CalendarCache, CalendarEvent, DateTime, TimeSource};
use crate::canvas::{Canvas, PixelSink};
use crate::context::AppContext;
use crate::error::Error;
use crate::sensors::SensorField;

/// Work for one render step, captured under the screen lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RedrawPlan {
    /// Screen to paint.
    pub screen: Screen,
    /// Area the previous screen left behind.
    pub exit: Region,
    /// Clock sub-region to clear and the time to paint over it.
    pub clock: Option<(Region, DateTime)>,
    /// `screen` was entered during this pass.
    pub entered: bool,
}

impl RedrawPlan {
    fn idle(screen: Screen) -> Self {
        Self {
            screen,
            exit: Region::None,
            clock: None,
            entered: false,
        }
    }
}

pub struct ScreenManager<'a, T> {
    ctx: &'a AppContext,
    clock: T,
    cache: CalendarCache,
}

impl<'a, T: TimeSource> ScreenManager<'a, T> {
    pub fn new(ctx: &'a AppContext, mut clock: T) -> Self {
        let now = clock.now();
        Self {
            ctx,
            clock,
            cache: CalendarCache::new(now),
        }
    }

    /// Initial paint: blank surface, full clock, every sensor field dirty.
    pub fn boot<S: PixelSink>(&mut self, canvas: &mut Canvas<S>) {
        let now = self.clock.now();
        self.cache.resync(now);
        layout::clear(canvas, Region::FullSurface);
        layout::paint_clock(canvas, &now);
        self.ctx.sensors.mark_all_dirty();
    }

    /// Commit a pending request and decide the repaint. Caller holds the lock.
    pub fn plan_locked(&mut self, state: &mut ScreenState) -> RedrawPlan {
        let mut plan = RedrawPlan::idle(state.current);

        if let Some(request) = self.ctx.requests.try_receive() {
            if let Some(t) = transition(state, request) {
                state.apply(&t);
                if t.refresh_sensors {
                    self.ctx.sensors.mark_all_dirty();
                }
                plan.screen = t.to;
                plan.exit = t.clear;
                plan.entered = t.from != t.to;
                #[cfg(feature = "defmt")]
                defmt::info!("Screen: {} -> {}", t.from, t.to);
            }
        }

        if plan.screen == Screen::Clock {
            if plan.entered {
                // Full repaint; any pending second is folded into it.
                self.ctx.timers.second.try_take();
                let now = self.clock.now();
                self.cache.resync(now);
                state.last_calendar_event = CalendarEvent::Year;
                plan.clock = Some((Region::ClockFace, now));
            } else if self.ctx.timers.second.try_take() {
                let now = self.clock.now();
                let event = check_rollover(&now, &mut self.cache);
                if event != CalendarEvent::None {
                    state.last_calendar_event = event;
                    plan.clock = Some((Region::for_calendar(event), now));
                }
            }
        }
        plan
    }

    /// Plan without waiting for the lock.
    pub fn plan(&mut self) -> Result<RedrawPlan, Error> {
        let ctx = self.ctx;
        let mut state = ctx.screen.try_lock().map_err(|_| Error::LockTimeout)?;
        Ok(self.plan_locked(&mut state))
    }

    /// Draw a plan. Does not touch the screen state.
    pub fn render<S: PixelSink>(&mut self, canvas: &mut Canvas<S>, plan: &RedrawPlan) {
        layout::clear(canvas, plan.exit);

        match plan.screen {
            Screen::Clock => {
                if let Some((region, now)) = plan.clock {
                    layout::clear(canvas, region);
                    layout::paint_clock(canvas, &now);
                }
            }
            Screen::Sensor => {
                layout::paint_sensor_frame(canvas);
                for field in SensorField::ALL {
                    if let Some(value) = self.ctx.sensors.take_dirty(field) {
                        layout::paint_sensor_value(canvas, field, value);
                    }
                }
            }
            Screen::Warning => {
                if plan.entered {
                    layout::paint_warning(canvas);
                }
            }
        }
    }

    /// One complete pass. Skipped with `LockTimeout` when the lock is busy.
    pub fn run_pass<S: PixelSink>(&mut self, canvas: &mut Canvas<S>) -> Result<RedrawPlan, Error> {
        let plan = self.plan()?;
        self.render(canvas, &plan);
        Ok(plan)
    }
}

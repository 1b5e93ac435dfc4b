//! Input step: debounced presses and timeouts become screen requests.

use super::ScreenRequest;
use crate::context::AppContext;

/// What one input step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputAction {
    None,
    ShowSensors,
    Revert,
}

impl InputAction {
    pub fn request(self) -> Option<ScreenRequest> {
        match self {
            InputAction::None => None,
            InputAction::ShowSensors => Some(ScreenRequest::ShowSensors),
            InputAction::Revert => Some(ScreenRequest::Revert),
        }
    }
}

/// Turn observed notifications into a screen request.
///
/// A press wins over a timeout seen in the same window; it also re-arms
/// the auto-revert countdown, so the stale timeout is dropped.
pub fn dispatch(ctx: &AppContext, pressed: bool, timed_out: bool) -> InputAction {
    let action = if pressed {
        ctx.timers.arm_timeout.raise();
        InputAction::ShowSensors
    } else if timed_out {
        InputAction::Revert
    } else {
        InputAction::None
    };

    if let Some(request) = action.request() {
        #[cfg(feature = "defmt")]
        defmt::debug!("Input: {}", request);
        ctx.requests.publish(request);
    }
    action
}

/// Non-blocking input step: consume whatever is pending.
pub fn poll(ctx: &AppContext) -> InputAction {
    let pressed = ctx.timers.press.try_take();
    let timed_out = ctx.timers.timeout.try_take();
    dispatch(ctx, pressed, timed_out)
}

/// Alert hook for the warning screen. Nothing in the firmware calls it.
pub fn raise_warning(ctx: &AppContext) {
    ctx.requests.publish(ScreenRequest::ShowWarning);
}

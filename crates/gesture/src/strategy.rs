use std::any::Any;

use foundation::math::Vec2;
use foundation::time::Time;

use crate::event::{GestureKind, GestureSample};
use crate::input::TouchPoint;
use crate::state::GestureState;
use crate::tracking::Tracking;

/// Timer change requested by a strategy hook.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TimerRequest {
    Keep,
    /// Fail the gesture if it is still possible after this many seconds.
    FailAfter(f64),
    Cancel,
}

/// What a strategy hook can see and ask for while handling input.
///
/// Tracking has already been updated for the current event when a hook runs.
#[derive(Debug)]
pub struct HookContext<'a> {
    tracking: &'a Tracking,
    state: GestureState,
    now: Time,
    timer: TimerRequest,
}

impl<'a> HookContext<'a> {
    pub fn new(tracking: &'a Tracking, state: GestureState, now: Time) -> Self {
        Self {
            tracking,
            state,
            now,
            timer: TimerRequest::Keep,
        }
    }

    pub fn tracking(&self) -> &'a Tracking {
        self.tracking
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn now(&self) -> Time {
        self.now
    }

    pub fn fail_after(&mut self, seconds: f64) {
        self.timer = TimerRequest::FailAfter(seconds);
    }

    pub fn cancel_timer(&mut self) {
        self.timer = TimerRequest::Cancel;
    }

    pub fn timer_request(&self) -> TimerRequest {
        self.timer
    }
}

/// Gesture-specific behavior plugged into the shared recognizer driver.
///
/// Input hooks return the state the recognizer should move to, if any. The
/// driver decides whether the transition is allowed.
pub trait GestureStrategy: Any {
    fn kind(&self) -> GestureKind;

    fn mouse_down(&mut self, _cx: &mut HookContext<'_>, _button: u8) -> Option<GestureState> {
        None
    }

    fn mouse_move(&mut self, _cx: &mut HookContext<'_>) -> Option<GestureState> {
        None
    }

    fn mouse_up(&mut self, _cx: &mut HookContext<'_>, _button: u8) -> Option<GestureState> {
        None
    }

    fn touch_start(&mut self, _cx: &mut HookContext<'_>, _changed: &[TouchPoint]) -> Option<GestureState> {
        None
    }

    fn touch_move(&mut self, _cx: &mut HookContext<'_>, _changed: &[TouchPoint]) -> Option<GestureState> {
        None
    }

    /// Called for both touch end and touch cancel.
    fn touch_end(
        &mut self,
        _cx: &mut HookContext<'_>,
        _changed: &[TouchPoint],
        _cancelled: bool,
    ) -> Option<GestureState> {
        None
    }

    /// Runs after an accepted transition to `Began`, before listeners see it.
    fn began(&mut self, _tracking: &Tracking) {}

    /// Runs after an accepted transition to `Changed`, before listeners see it.
    fn changed(&mut self, _tracking: &Tracking) {}

    fn reset(&mut self) {}

    /// Location reported to listeners.
    fn location(&self, tracking: &Tracking) -> Option<Vec2> {
        Some(tracking.location())
    }

    fn sample(&self) -> GestureSample {
        GestureSample::None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Transition rule shared by continuous gestures.
///
/// From `Possible`, the gesture begins once the motion is significant and the
/// pointer configuration matches, and fails when the motion is significant but
/// the configuration does not. Once in progress every further call reports
/// `Changed`.
pub fn continuous_transition(
    state: GestureState,
    interpret: impl FnOnce() -> bool,
    recognize: impl FnOnce() -> bool,
) -> Option<GestureState> {
    match state {
        GestureState::Possible if interpret() => Some(if recognize() {
            GestureState::Began
        } else {
            GestureState::Failed
        }),
        GestureState::Began | GestureState::Changed => Some(GestureState::Changed),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::continuous_transition;
    use crate::state::GestureState::*;

    #[test]
    fn continuous_rule() {
        assert_eq!(continuous_transition(Possible, || false, || true), None);
        assert_eq!(continuous_transition(Possible, || true, || true), Some(Began));
        assert_eq!(continuous_transition(Possible, || true, || false), Some(Failed));
        assert_eq!(continuous_transition(Began, || false, || false), Some(Changed));
        assert_eq!(continuous_transition(Changed, || false, || false), Some(Changed));
        assert_eq!(continuous_transition(Failed, || true, || true), None);
    }
}

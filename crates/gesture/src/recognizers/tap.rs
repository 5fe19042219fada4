use std::any::Any;

use foundation::math::Vec2;

use crate::config::TapConfig;
use crate::event::{GestureKind, GestureSample, Tap};
use crate::input::TouchPoint;
use crate::state::GestureState;
use crate::strategy::{GestureStrategy, HookContext};
use crate::tracking::Tracking;

/// Discrete tap: a fixed number of quick touches with a fixed finger count.
#[derive(Debug, Clone, Default)]
pub struct TapRecognizer {
    config: TapConfig,
    taps: Vec<Tap>,
}

impl TapRecognizer {
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            taps: Vec::new(),
        }
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    fn tap_start(&mut self, cx: &mut HookContext<'_>) {
        let tracking = cx.tracking();
        self.taps.push(Tap {
            touch_count: tracking.touch_count(),
            location: tracking.location(),
        });
        cx.fail_after(self.config.max_tap_duration);
    }

    fn tap_change(&mut self, tracking: &Tracking) {
        if let Some(tap) = self.taps.last_mut() {
            if tap.touch_count < tracking.touch_count() {
                tap.touch_count = tracking.touch_count();
                tap.location = tracking.location();
            }
        }
    }

    fn tap_end(&mut self, cx: &mut HookContext<'_>) -> Option<GestureState> {
        let tap = self.taps.last()?;
        if tap.touch_count != self.config.number_of_touches {
            Some(GestureState::Failed)
        } else if self.taps.len() == self.config.number_of_taps {
            Some(GestureState::Recognized)
        } else {
            cx.fail_after(self.config.max_tap_interval);
            None
        }
    }
}

impl GestureStrategy for TapRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Tap
    }

    fn mouse_down(&mut self, cx: &mut HookContext<'_>, _button: u8) -> Option<GestureState> {
        (cx.state() == GestureState::Possible).then_some(GestureState::Failed)
    }

    fn touch_start(&mut self, cx: &mut HookContext<'_>, changed: &[TouchPoint]) -> Option<GestureState> {
        if cx.state() != GestureState::Possible {
            return None;
        }
        let count = cx.tracking().touch_count();
        if count > self.config.number_of_touches {
            Some(GestureState::Failed)
        } else {
            if count == changed.len() {
                self.tap_start(cx);
            } else {
                self.tap_change(cx.tracking());
            }
            None
        }
    }

    fn touch_move(&mut self, cx: &mut HookContext<'_>, _changed: &[TouchPoint]) -> Option<GestureState> {
        let moved = cx.tracking().touch_translation().magnitude() > self.config.threshold;
        (cx.state() == GestureState::Possible && moved).then_some(GestureState::Failed)
    }

    fn touch_end(&mut self, cx: &mut HookContext<'_>, _changed: &[TouchPoint], cancelled: bool) -> Option<GestureState> {
        if cx.state() != GestureState::Possible {
            return None;
        }
        if cancelled {
            return Some(GestureState::Failed);
        }
        if cx.tracking().touch_count() == 0 {
            self.tap_end(cx)
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.taps.clear();
    }

    fn location(&self, _tracking: &Tracking) -> Option<Vec2> {
        self.taps.first().map(|t| t.location)
    }

    fn sample(&self) -> GestureSample {
        GestureSample::Taps(self.taps.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

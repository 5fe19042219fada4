use std::any::Any;

use foundation::math::Vec2;

use super::SmoothedTranslation;
use crate::config::PanConfig;
use crate::event::{GestureKind, GestureSample};
use crate::input::TouchPoint;
use crate::state::GestureState;
use crate::strategy::{GestureStrategy, HookContext, continuous_transition};
use crate::tracking::Tracking;

/// Touch pan with a bounded number of fingers.
#[derive(Debug, Clone, Default)]
pub struct PanRecognizer {
    config: PanConfig,
    motion: SmoothedTranslation,
}

impl PanRecognizer {
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            motion: SmoothedTranslation::default(),
        }
    }

    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    pub fn translation(&self) -> Vec2 {
        self.motion.value()
    }
}

impl GestureStrategy for PanRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Pan
    }

    fn mouse_down(&mut self, cx: &mut HookContext<'_>, _button: u8) -> Option<GestureState> {
        (cx.state() == GestureState::Possible).then_some(GestureState::Failed)
    }

    fn touch_move(&mut self, cx: &mut HookContext<'_>, _changed: &[TouchPoint]) -> Option<GestureState> {
        let tracking = cx.tracking();
        let actual = self.motion.track(tracking);
        let count = tracking.touch_count();
        continuous_transition(
            cx.state(),
            || actual.magnitude() > self.config.threshold,
            || count != 0 && count >= self.config.min_touches && count <= self.config.max_touches,
        )
    }

    fn touch_end(&mut self, cx: &mut HookContext<'_>, _changed: &[TouchPoint], cancelled: bool) -> Option<GestureState> {
        if cx.tracking().touch_count() != 0 || !cx.state().is_in_progress() {
            return None;
        }
        Some(if cancelled {
            GestureState::Cancelled
        } else {
            GestureState::Ended
        })
    }

    fn began(&mut self, _tracking: &Tracking) {
        self.motion.begin();
    }

    fn changed(&mut self, _tracking: &Tracking) {
        self.motion.change(self.config.weight);
    }

    fn reset(&mut self) {
        self.motion.reset();
    }

    fn sample(&self) -> GestureSample {
        GestureSample::Translation(self.motion.value())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

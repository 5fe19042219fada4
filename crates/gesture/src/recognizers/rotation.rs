use std::any::Any;

use foundation::math::normalize_degrees;

use crate::config::RotationConfig;
use crate::event::{GestureKind, GestureSample};
use crate::input::TouchPoint;
use crate::state::GestureState;
use crate::strategy::{GestureStrategy, HookContext};
use crate::tracking::Tracking;

use super::{claim_touches, touch_pair};

/// Two-finger twist in degrees. Positive values turn clockwise on screen.
#[derive(Debug, Clone)]
pub struct RotationRecognizer {
    config: RotationConfig,
    rotation: f64,
    offset_rotation: f64,
    reference_angle: f64,
    touch_ids: Vec<i64>,
}

impl Default for RotationRecognizer {
    fn default() -> Self {
        Self::new(RotationConfig::default())
    }
}

impl RotationRecognizer {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            rotation: 0.0,
            offset_rotation: 0.0,
            reference_angle: 0.0,
            touch_ids: Vec::with_capacity(2),
        }
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Cumulative rotation since the first pair of touches went down.
    pub fn rotation(&self) -> f64 {
        self.rotation + self.offset_rotation
    }

    /// Screen angle of the line between the two touches, in degrees.
    fn angle(&self, tracking: &Tracking) -> Option<f64> {
        touch_pair(tracking, &self.touch_ids).map(|(a, b)| {
            let d = a - b;
            d.y.atan2(d.x).to_degrees()
        })
    }
}

impl GestureStrategy for RotationRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Rotation
    }

    fn mouse_down(&mut self, cx: &mut HookContext<'_>, _button: u8) -> Option<GestureState> {
        (cx.state() == GestureState::Possible).then_some(GestureState::Failed)
    }

    fn touch_start(&mut self, cx: &mut HookContext<'_>, changed: &[TouchPoint]) -> Option<GestureState> {
        if claim_touches(&mut self.touch_ids, changed) {
            self.reference_angle = self.angle(cx.tracking()).unwrap_or(0.0);
            self.offset_rotation += self.rotation;
            self.rotation = 0.0;
        }
        None
    }

    fn touch_move(&mut self, cx: &mut HookContext<'_>, _changed: &[TouchPoint]) -> Option<GestureState> {
        let angle = self.angle(cx.tracking())?;
        match cx.state() {
            GestureState::Possible => {
                let turned = normalize_degrees(angle - self.reference_angle).abs() > self.config.threshold;
                turned.then_some(GestureState::Began)
            }
            GestureState::Began | GestureState::Changed => Some(GestureState::Changed),
            _ => None,
        }
    }

    fn touch_end(&mut self, cx: &mut HookContext<'_>, changed: &[TouchPoint], cancelled: bool) -> Option<GestureState> {
        self.touch_ids.retain(|id| !changed.iter().any(|p| p.id == *id));
        if cx.tracking().touch_count() != 0 || !cx.state().is_in_progress() {
            return None;
        }
        Some(if cancelled {
            GestureState::Cancelled
        } else {
            GestureState::Ended
        })
    }

    fn changed(&mut self, tracking: &Tracking) {
        if let Some(angle) = self.angle(tracking) {
            let current = normalize_degrees(angle - self.reference_angle);
            self.rotation = self.rotation * (1.0 - self.config.weight) + current * self.config.weight;
        }
    }

    fn reset(&mut self) {
        self.rotation = 0.0;
        self.offset_rotation = 0.0;
        self.reference_angle = 0.0;
        self.touch_ids.clear();
    }

    fn sample(&self) -> GestureSample {
        GestureSample::Rotation(self.rotation())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

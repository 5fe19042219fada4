use std::any::Any;

use foundation::math::Vec2;

use super::SmoothedTranslation;
use crate::config::TiltConfig;
use crate::event::{GestureKind, GestureSample};
use crate::input::TouchPoint;
use crate::state::GestureState;
use crate::strategy::{GestureStrategy, HookContext, continuous_transition};
use crate::tracking::{Touch, Tracking};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Vertical {
    Up,
    Down,
}

/// Vertical component of a touch's motion, when vertical motion dominates.
fn vertical_direction(touch: &Touch) -> Option<Vertical> {
    let d = touch.translation();
    if d.x.abs() > d.y.abs() {
        None
    } else if d.y < 0.0 {
        Some(Vertical::Up)
    } else if d.y > 0.0 {
        Some(Vertical::Down)
    } else {
        None
    }
}

/// Two fingers sliding up or down together, roughly side by side.
#[derive(Debug, Clone, Default)]
pub struct TiltRecognizer {
    config: TiltConfig,
    motion: SmoothedTranslation,
}

impl TiltRecognizer {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            motion: SmoothedTranslation::default(),
        }
    }

    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    pub fn translation(&self) -> Vec2 {
        self.motion.value()
    }

    fn any_touch_moved(&self, tracking: &Tracking) -> bool {
        tracking
            .touches()
            .iter()
            .any(|t| t.translation().magnitude() > self.config.threshold)
    }

    fn is_tilt(&self, tracking: &Tracking) -> bool {
        let [a, b] = tracking.touches() else {
            return false;
        };
        let start_distance = a.start_location.distance_to(b.start_location);
        let distance = a.location.distance_to(b.location);
        if start_distance > self.config.max_touch_distance
            || (distance - start_distance).abs() > self.config.max_touch_divergence
        {
            return false;
        }
        match (vertical_direction(a), vertical_direction(b)) {
            (Some(da), Some(db)) => da == db,
            _ => false,
        }
    }
}

impl GestureStrategy for TiltRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Tilt
    }

    fn mouse_down(&mut self, cx: &mut HookContext<'_>, _button: u8) -> Option<GestureState> {
        (cx.state() == GestureState::Possible).then_some(GestureState::Failed)
    }

    fn touch_move(&mut self, cx: &mut HookContext<'_>, _changed: &[TouchPoint]) -> Option<GestureState> {
        let tracking = cx.tracking();
        self.motion.track(tracking);
        continuous_transition(
            cx.state(),
            || self.any_touch_moved(tracking),
            || self.is_tilt(tracking),
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

#[cfg(test)]
mod tests {
    use super::TiltRecognizer;
    use crate::config::TiltConfig;
    use crate::coordinator::GestureCoordinator;
    use crate::input::{InputEvent, TouchPoint};
    use crate::state::GestureState;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn pair(ax: f64, ay: f64, bx: f64, by: f64) -> Vec<TouchPoint> {
        vec![TouchPoint::new(1, ax, ay), TouchPoint::new(2, bx, by)]
    }

    #[test]
    fn two_fingers_up_tilt() {
        let mut gc = GestureCoordinator::new();
        let tilt = gc.add(TiltRecognizer::new(TiltConfig::default()));

        gc.handle_input(&InputEvent::touch_start(pair(100.0, 300.0, 200.0, 300.0)));
        let began = gc.handle_input(&InputEvent::touch_move(pair(100.0, 270.0, 200.0, 270.0)));
        assert_eq!(began[0].state, GestureState::Began);

        let changed = gc.handle_input(&InputEvent::touch_move(pair(100.0, 240.0, 200.0, 240.0)));
        let t = changed[0].translation().unwrap();
        assert_close(t.y, -12.0, 1e-9);
        assert_close(t.x, 0.0, 1e-12);

        let ended = gc.handle_input(&InputEvent::touch_end(pair(100.0, 240.0, 200.0, 240.0)));
        assert_eq!(ended[0].state, GestureState::Ended);
        assert_eq!(gc.state(tilt).unwrap(), GestureState::Possible);
    }

    #[test]
    fn opposite_directions_fail() {
        let mut gc = GestureCoordinator::new();
        let tilt = gc.add(TiltRecognizer::new(TiltConfig::default()));
        gc.handle_input(&InputEvent::touch_start(pair(100.0, 300.0, 200.0, 300.0)));
        gc.handle_input(&InputEvent::touch_move(pair(100.0, 270.0, 200.0, 330.0)));
        assert_eq!(gc.state(tilt).unwrap(), GestureState::Failed);
    }

    #[test]
    fn horizontal_slide_fails() {
        let mut gc = GestureCoordinator::new();
        let tilt = gc.add(TiltRecognizer::new(TiltConfig::default()));
        gc.handle_input(&InputEvent::touch_start(pair(100.0, 300.0, 200.0, 300.0)));
        gc.handle_input(&InputEvent::touch_move(pair(130.0, 300.0, 230.0, 300.0)));
        assert_eq!(gc.state(tilt).unwrap(), GestureState::Failed);
    }

    #[test]
    fn fingers_too_far_apart_fail() {
        let mut gc = GestureCoordinator::new();
        let tilt = gc.add(TiltRecognizer::new(TiltConfig::default()));
        gc.handle_input(&InputEvent::touch_start(pair(0.0, 300.0, 300.0, 300.0)));
        gc.handle_input(&InputEvent::touch_move(pair(0.0, 270.0, 300.0, 270.0)));
        assert_eq!(gc.state(tilt).unwrap(), GestureState::Failed);
    }

    #[test]
    fn single_finger_fails() {
        let mut gc = GestureCoordinator::new();
        let tilt = gc.add(TiltRecognizer::new(TiltConfig::default()));
        gc.handle_input(&InputEvent::touch_start(vec![TouchPoint::new(1, 0.0, 300.0)]));
        gc.handle_input(&InputEvent::touch_move(vec![TouchPoint::new(1, 0.0, 260.0)]));
        assert_eq!(gc.state(tilt).unwrap(), GestureState::Failed);
    }
}

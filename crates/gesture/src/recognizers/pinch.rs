use std::any::Any;

use crate::config::PinchConfig;
use crate::event::{GestureKind, GestureSample};
use crate::input::TouchPoint;
use crate::state::GestureState;
use crate::strategy::{GestureStrategy, HookContext};
use crate::tracking::Tracking;

use super::{claim_touches, touch_pair};

/// Two-finger pinch measured as a ratio of finger separation.
///
/// Lifting one finger and putting another down keeps the accumulated scale:
/// the new pair starts measuring from its own separation and the previous
/// scale is carried as an offset.
#[derive(Debug, Clone)]
pub struct PinchRecognizer {
    config: PinchConfig,
    scale: f64,
    offset_scale: f64,
    reference_distance: f64,
    touch_ids: Vec<i64>,
}

impl Default for PinchRecognizer {
    fn default() -> Self {
        Self::new(PinchConfig::default())
    }
}

impl PinchRecognizer {
    pub fn new(config: PinchConfig) -> Self {
        Self {
            config,
            scale: 1.0,
            offset_scale: 1.0,
            reference_distance: 0.0,
            touch_ids: Vec::with_capacity(2),
        }
    }

    pub fn config(&self) -> &PinchConfig {
        &self.config
    }

    /// Cumulative scale since the first pair of touches went down.
    pub fn scale(&self) -> f64 {
        self.scale * self.offset_scale
    }

    fn distance(&self, tracking: &Tracking) -> Option<f64> {
        touch_pair(tracking, &self.touch_ids).map(|(a, b)| a.distance_to(b))
    }
}

impl GestureStrategy for PinchRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Pinch
    }

    fn mouse_down(&mut self, cx: &mut HookContext<'_>, _button: u8) -> Option<GestureState> {
        (cx.state() == GestureState::Possible).then_some(GestureState::Failed)
    }

    fn touch_start(&mut self, cx: &mut HookContext<'_>, changed: &[TouchPoint]) -> Option<GestureState> {
        if claim_touches(&mut self.touch_ids, changed) {
            self.reference_distance = self.distance(cx.tracking()).unwrap_or(0.0);
            self.offset_scale *= self.scale;
            self.scale = 1.0;
        }
        None
    }

    fn touch_move(&mut self, cx: &mut HookContext<'_>, _changed: &[TouchPoint]) -> Option<GestureState> {
        let distance = self.distance(cx.tracking())?;
        match cx.state() {
            GestureState::Possible => {
                let moved = (distance - self.reference_distance).abs() > self.config.threshold;
                moved.then_some(GestureState::Began)
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
        if self.reference_distance <= 0.0 {
            return;
        }
        if let Some(distance) = self.distance(tracking) {
            let ratio = (distance / self.reference_distance).abs();
            self.scale = self.scale * (1.0 - self.config.weight) + ratio * self.config.weight;
        }
    }

    fn reset(&mut self) {
        self.scale = 1.0;
        self.offset_scale = 1.0;
        self.reference_distance = 0.0;
        self.touch_ids.clear();
    }

    fn sample(&self) -> GestureSample {
        GestureSample::Scale(self.scale())
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
    use super::PinchRecognizer;
    use crate::config::PinchConfig;
    use crate::coordinator::GestureCoordinator;
    use crate::input::{InputEvent, TouchPoint};
    use crate::state::GestureState;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn pair(ax: f64, bx: f64) -> Vec<TouchPoint> {
        vec![TouchPoint::new(1, ax, 200.0), TouchPoint::new(2, bx, 200.0)]
    }

    #[test]
    fn spreading_fingers_converges_to_ratio() {
        let mut gc = GestureCoordinator::new();
        let pinch = gc.add(PinchRecognizer::new(PinchConfig::default()));

        gc.handle_input(&InputEvent::touch_start(pair(100.0, 200.0)));
        assert!(gc.handle_input(&InputEvent::touch_move(pair(95.0, 205.0))).is_empty());

        let began = gc.handle_input(&InputEvent::touch_move(pair(80.0, 220.0)));
        assert_eq!(began[0].state, GestureState::Began);
        assert_eq!(began[0].scale(), Some(1.0));

        let mut last = 0.0;
        for _ in 0..40 {
            let events = gc.handle_input(&InputEvent::touch_move(pair(75.0, 225.0)));
            last = events[0].scale().unwrap();
        }
        assert_close(last, 1.5, 1e-6);

        let ended = gc.handle_input(&InputEvent::touch_end(pair(75.0, 225.0)));
        assert_eq!(ended[0].state, GestureState::Ended);
        assert_eq!(gc.state(pinch).unwrap(), GestureState::Possible);
        assert_eq!(gc.strategy::<PinchRecognizer>(pinch).unwrap().scale(), 1.0);
    }

    #[test]
    fn replacing_a_finger_keeps_accumulated_scale() {
        let mut gc = GestureCoordinator::new();
        let pinch = gc.add(PinchRecognizer::new(PinchConfig::default()));

        gc.handle_input(&InputEvent::touch_start(pair(100.0, 200.0)));
        for _ in 0..40 {
            gc.handle_input(&InputEvent::touch_move(pair(50.0, 250.0)));
        }
        let before = gc.strategy::<PinchRecognizer>(pinch).unwrap().scale();
        assert_close(before, 2.0, 1e-6);

        gc.handle_input(&InputEvent::touch_end(vec![TouchPoint::new(2, 250.0, 200.0)]));
        gc.handle_input(&InputEvent::touch_start(vec![TouchPoint::new(3, 150.0, 200.0)]));
        let after = gc.strategy::<PinchRecognizer>(pinch).unwrap().scale();
        assert_close(after, before, 1e-12);
        assert_eq!(gc.state(pinch).unwrap(), GestureState::Changed);

        // A full release ends the session; the next pair starts from 1.
        gc.handle_input(&InputEvent::touch_end(vec![
            TouchPoint::new(1, 50.0, 200.0),
            TouchPoint::new(3, 150.0, 200.0),
        ]));
        assert_eq!(gc.state(pinch).unwrap(), GestureState::Possible);
        gc.handle_input(&InputEvent::touch_start(pair(100.0, 200.0)));
        assert_eq!(gc.strategy::<PinchRecognizer>(pinch).unwrap().scale(), 1.0);
    }

    #[test]
    fn single_touch_never_pinches() {
        let mut gc = GestureCoordinator::new();
        let pinch = gc.add(PinchRecognizer::new(PinchConfig::default()));
        gc.handle_input(&InputEvent::touch_start(vec![TouchPoint::new(1, 0.0, 0.0)]));
        assert!(gc.handle_input(&InputEvent::touch_move(vec![TouchPoint::new(1, 300.0, 0.0)])).is_empty());
        assert_eq!(gc.state(pinch).unwrap(), GestureState::Possible);
    }
}

use std::any::Any;

use foundation::math::Vec2;

use crate::config::DragConfig;
use crate::event::{GestureKind, GestureSample};
use crate::input::TouchPoint;
use crate::state::GestureState;
use crate::strategy::{GestureStrategy, HookContext, continuous_transition};
use crate::tracking::Tracking;

/// Mouse drag with a configured button combination.
#[derive(Debug, Clone, Default)]
pub struct DragRecognizer {
    config: DragConfig,
    translation: Vec2,
    reference: Vec2,
}

impl DragRecognizer {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Smoothed pointer motion since the drag began.
    pub fn translation(&self) -> Vec2 {
        self.translation
    }
}

impl GestureStrategy for DragRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Drag
    }

    fn mouse_move(&mut self, cx: &mut HookContext<'_>) -> Option<GestureState> {
        let tracking = cx.tracking();
        continuous_transition(
            cx.state(),
            || tracking.location().distance_to(tracking.start_location()) > self.config.threshold,
            || tracking.button_mask() != 0 && tracking.button_mask() == self.config.buttons,
        )
    }

    fn mouse_up(&mut self, cx: &mut HookContext<'_>, _button: u8) -> Option<GestureState> {
        (cx.tracking().button_mask() == 0 && cx.state().is_in_progress()).then_some(GestureState::Ended)
    }

    fn touch_start(&mut self, cx: &mut HookContext<'_>, _changed: &[TouchPoint]) -> Option<GestureState> {
        (cx.state() == GestureState::Possible).then_some(GestureState::Failed)
    }

    fn began(&mut self, tracking: &Tracking) {
        self.reference = tracking.location();
    }

    fn changed(&mut self, tracking: &Tracking) {
        let delta = tracking.location() - self.reference;
        self.translation = self.translation.lerp(delta, self.config.weight);
    }

    fn reset(&mut self) {
        self.translation = Vec2::ZERO;
        self.reference = Vec2::ZERO;
    }

    fn sample(&self) -> GestureSample {
        GestureSample::Translation(self.translation)
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
    use super::DragRecognizer;
    use crate::config::DragConfig;
    use crate::coordinator::GestureCoordinator;
    use crate::input::{InputEvent, TouchPoint};
    use crate::state::GestureState;
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn primary_drag_lifecycle() {
        let mut gc = GestureCoordinator::new();
        let drag = gc.add(DragRecognizer::new(DragConfig::default()));

        assert!(gc.handle_input(&InputEvent::mouse_down(0, 100.0, 100.0)).is_empty());

        let began = gc.handle_input(&InputEvent::mouse_move(110.0, 100.0));
        assert_eq!(began.len(), 1);
        assert_eq!(began[0].state, GestureState::Began);
        assert_eq!(began[0].translation(), Some(Vec2::ZERO));

        let changed = gc.handle_input(&InputEvent::mouse_move(120.0, 100.0));
        assert_eq!(changed[0].state, GestureState::Changed);
        let t = changed[0].translation().unwrap();
        assert_close(t.x, 3.0, 1e-12);
        assert_close(t.y, 0.0, 1e-12);

        let ended = gc.handle_input(&InputEvent::mouse_up(0, 120.0, 100.0));
        assert_eq!(ended.len(), 1);
        assert_eq!(ended[0].state, GestureState::Ended);
        assert_eq!(gc.state(drag).unwrap(), GestureState::Possible);
        assert_eq!(gc.strategy::<DragRecognizer>(drag).unwrap().translation(), Vec2::ZERO);
    }

    #[test]
    fn small_motion_stays_possible() {
        let mut gc = GestureCoordinator::new();
        let drag = gc.add(DragRecognizer::new(DragConfig::default()));
        gc.handle_input(&InputEvent::mouse_down(0, 0.0, 0.0));
        assert!(gc.handle_input(&InputEvent::mouse_move(3.0, 4.0)).is_empty());
        assert_eq!(gc.state(drag).unwrap(), GestureState::Possible);
    }

    #[test]
    fn wrong_button_fails_until_release() {
        let mut gc = GestureCoordinator::new();
        let primary = gc.add(DragRecognizer::new(DragConfig::default()));
        let secondary = gc.add(DragRecognizer::new(DragConfig::secondary()));

        gc.handle_input(&InputEvent::mouse_down(2, 50.0, 50.0));
        let events = gc.handle_input(&InputEvent::mouse_move(80.0, 50.0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].recognizer, secondary);
        assert_eq!(gc.state(primary).unwrap(), GestureState::Failed);

        gc.handle_input(&InputEvent::mouse_up(2, 80.0, 50.0));
        assert_eq!(gc.state(primary).unwrap(), GestureState::Possible);
        assert_eq!(gc.state(secondary).unwrap(), GestureState::Possible);
    }

    #[test]
    fn touch_start_fails_drag() {
        let mut gc = GestureCoordinator::new();
        let drag = gc.add(DragRecognizer::new(DragConfig::default()));
        gc.handle_input(&InputEvent::touch_start(vec![TouchPoint::new(1, 5.0, 5.0)]));
        assert_eq!(gc.state(drag).unwrap(), GestureState::Failed);
        gc.handle_input(&InputEvent::touch_end(vec![TouchPoint::new(1, 5.0, 5.0)]));
        assert_eq!(gc.state(drag).unwrap(), GestureState::Possible);
    }

    #[test]
    fn mouse_ignored_while_touching() {
        let mut gc = GestureCoordinator::new();
        let drag = gc.add(DragRecognizer::new(DragConfig::default()));
        gc.set_enabled(drag, true).unwrap();
        gc.handle_input(&InputEvent::touch_start(vec![TouchPoint::new(1, 5.0, 5.0)]));
        gc.handle_input(&InputEvent::mouse_down(0, 5.0, 5.0));
        assert_eq!(gc.tracking(drag).unwrap().button_mask(), 0);
    }

    #[test]
    fn prevented_input_ignored_while_possible() {
        let mut gc = GestureCoordinator::new();
        let drag = gc.add(DragRecognizer::new(DragConfig::default()));
        let mut down = InputEvent::mouse_down(0, 0.0, 0.0);
        down.prevent_default();
        gc.handle_input(&down);
        assert_eq!(gc.tracking(drag).unwrap().button_mask(), 0);
    }
}

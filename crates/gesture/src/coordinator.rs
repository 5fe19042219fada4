use std::rc::Rc;

use foundation::math::Vec2;
use foundation::time::Time;
use foundation::{Arena, Handle};
use runtime::{EventBus, ListenerList, TimerQueue};
use tracing::{debug, trace};

use crate::error::{GestureError, Result};
use crate::event::GestureEvent;
use crate::input::{InputEvent, MouseAction, MouseInput, TouchAction, TouchInput};
use crate::state::GestureState;
use crate::strategy::{GestureStrategy, HookContext, TimerRequest};
use crate::tracking::Tracking;

/// Callback invoked for every listener-worthy state change of a recognizer.
pub type GestureListener = dyn Fn(&GestureEvent);

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecognizerId(Handle);

impl std::fmt::Display for RecognizerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "recognizer{}", self.0)
    }
}

struct Slot {
    strategy: Box<dyn GestureStrategy>,
    tracking: Tracking,
    state: GestureState,
    pending: Option<GestureState>,
    enabled: bool,
    recognize_with: Vec<RecognizerId>,
    requires_failure_of: Vec<RecognizerId>,
    dependants: Vec<RecognizerId>,
    listeners: ListenerList<GestureListener>,
}

/// Owns a group of recognizers attached to one input surface.
///
/// Every input event is offered to each recognizer in registration order.
/// State changes worth reporting are collected and returned from
/// [`handle_input`](Self::handle_input); the caller passes each one to
/// [`notify`](Self::notify) once it is ready to run listeners.
pub struct GestureCoordinator {
    slots: Arena<Slot>,
    recognized: Vec<RecognizerId>,
    timers: TimerQueue<RecognizerId>,
    outbox: EventBus<GestureEvent>,
    now: Time,
}

impl Default for GestureCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureCoordinator {
    pub fn new() -> Self {
        Self {
            slots: Arena::new(),
            recognized: Vec::new(),
            timers: TimerQueue::new(),
            outbox: EventBus::new(),
            now: Time::ZERO,
        }
    }

    pub fn add(&mut self, strategy: impl GestureStrategy) -> RecognizerId {
        let id = RecognizerId(self.slots.alloc(Slot {
            strategy: Box::new(strategy),
            tracking: Tracking::default(),
            state: GestureState::Possible,
            pending: None,
            enabled: true,
            recognize_with: Vec::new(),
            requires_failure_of: Vec::new(),
            dependants: Vec::new(),
            listeners: ListenerList::new(),
        }));
        debug!(recognizer = %id, "gesture recognizer added");
        id
    }

    pub fn ids(&self) -> impl Iterator<Item = RecognizerId> + use<> {
        self.slots.handles().map(RecognizerId)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current time as last observed from input or [`advance_time`](Self::advance_time).
    pub fn now(&self) -> Time {
        self.now
    }

    fn slot(&self, id: RecognizerId) -> Result<&Slot> {
        self.slots.get(id.0).ok_or(GestureError::UnknownRecognizer(id))
    }

    fn slot_mut(&mut self, id: RecognizerId) -> Result<&mut Slot> {
        self.slots.get_mut(id.0).ok_or(GestureError::UnknownRecognizer(id))
    }

    pub fn state(&self, id: RecognizerId) -> Result<GestureState> {
        Ok(self.slot(id)?.state)
    }

    pub fn is_enabled(&self, id: RecognizerId) -> Result<bool> {
        Ok(self.slot(id)?.enabled)
    }

    /// A disabled recognizer ignores input but keeps its state.
    pub fn set_enabled(&mut self, id: RecognizerId, enabled: bool) -> Result<()> {
        self.slot_mut(id)?.enabled = enabled;
        Ok(())
    }

    pub fn location(&self, id: RecognizerId) -> Result<Option<Vec2>> {
        let slot = self.slot(id)?;
        Ok(slot.strategy.location(&slot.tracking))
    }

    pub fn touch_count(&self, id: RecognizerId) -> Result<usize> {
        Ok(self.slot(id)?.tracking.touch_count())
    }

    pub fn touch_location(&self, id: RecognizerId, index: usize) -> Result<Vec2> {
        self.slot(id)?.tracking.touch_location(index)
    }

    pub fn tracking(&self, id: RecognizerId) -> Result<&Tracking> {
        Ok(&self.slot(id)?.tracking)
    }

    /// Recognizers currently in `Began` or `Changed`, oldest first.
    pub fn recognized(&self) -> &[RecognizerId] {
        &self.recognized
    }

    pub fn strategy<T: GestureStrategy>(&self, id: RecognizerId) -> Result<&T> {
        self.slot(id)?
            .strategy
            .as_any()
            .downcast_ref::<T>()
            .ok_or(GestureError::StrategyMismatch(id))
    }

    pub fn strategy_mut<T: GestureStrategy>(&mut self, id: RecognizerId) -> Result<&mut T> {
        self.slot_mut(id)?
            .strategy
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(GestureError::StrategyMismatch(id))
    }

    /// Lets `id` begin while `other` is in progress. One-directional.
    pub fn recognize_with(&mut self, id: RecognizerId, other: RecognizerId) -> Result<()> {
        self.slot(other)?;
        let slot = self.slot_mut(id)?;
        if !slot.recognize_with.contains(&other) {
            slot.recognize_with.push(other);
        }
        Ok(())
    }

    pub fn can_recognize_with(&self, id: RecognizerId, other: RecognizerId) -> Result<bool> {
        self.slot(other)?;
        Ok(self.slot(id)?.recognize_with.contains(&other))
    }

    /// Holds back `id` from beginning until `other` has failed.
    pub fn require_failure(&mut self, id: RecognizerId, other: RecognizerId) -> Result<()> {
        self.slot(other)?;
        let slot = self.slot_mut(id)?;
        if !slot.requires_failure_of.contains(&other) {
            slot.requires_failure_of.push(other);
        }
        let other_slot = self.slot_mut(other)?;
        if !other_slot.dependants.contains(&id) {
            other_slot.dependants.push(id);
        }
        Ok(())
    }

    /// Returns false when the listener was already registered.
    pub fn add_listener(&mut self, id: RecognizerId, listener: Rc<GestureListener>) -> Result<bool> {
        Ok(self.slot_mut(id)?.listeners.add(listener))
    }

    /// Returns false when the listener was not registered.
    pub fn remove_listener(&mut self, id: RecognizerId, listener: &Rc<GestureListener>) -> Result<bool> {
        Ok(self.slot_mut(id)?.listeners.remove(listener))
    }

    /// Runs the listeners of the event's recognizer, newest first.
    pub fn notify(&self, event: &GestureEvent) {
        let Ok(slot) = self.slot(event.recognizer) else {
            return;
        };
        for listener in slot.listeners.delivery_order() {
            listener(event);
        }
    }

    /// Feeds one input event to every recognizer.
    ///
    /// Timers that expire at or before the event's timestamp fire first.
    /// Wheel events are not gestures and pass through untouched.
    pub fn handle_input(&mut self, input: &InputEvent) -> Vec<GestureEvent> {
        self.fire_timers(input.time());
        let ids: Vec<_> = self.ids().collect();
        match input {
            InputEvent::Mouse(mouse) => {
                for id in ids {
                    self.handle_mouse(id, mouse);
                }
            }
            InputEvent::Touch(touch) => {
                for id in ids {
                    self.handle_touch(id, touch);
                }
            }
            InputEvent::Wheel(_) => {}
        }
        self.outbox.drain()
    }

    /// Fires every timer due at `now` and returns the resulting events.
    pub fn advance_time(&mut self, now: Time) -> Vec<GestureEvent> {
        self.fire_timers(now);
        self.outbox.drain()
    }

    /// Convenience for callers without their own default handling: handles the
    /// input and immediately notifies listeners.
    pub fn dispatch(&mut self, input: &InputEvent) -> Vec<GestureEvent> {
        let events = self.handle_input(input);
        for event in &events {
            self.notify(event);
        }
        events
    }

    fn fire_timers(&mut self, now: Time) {
        self.now = self.now.max(now);
        for id in self.timers.pop_due(self.now) {
            let still_possible = self.slot(id).map(|s| s.state == GestureState::Possible);
            if still_possible == Ok(true) {
                trace!(recognizer = %id, "gesture timer expired");
                self.transition(id, GestureState::Failed);
                self.settle(id);
            }
        }
    }

    fn handle_mouse(&mut self, id: RecognizerId, mouse: &MouseInput) {
        let now = self.now;
        let Ok(slot) = self.slot_mut(id) else {
            return;
        };
        if !slot.enabled || slot.tracking.touch_count() > 0 {
            return;
        }
        if mouse.default_prevented && slot.state == GestureState::Possible {
            return;
        }

        let Slot {
            strategy,
            tracking,
            state,
            ..
        } = slot;
        let accepted = match mouse.action {
            MouseAction::Down => tracking.mouse_down(mouse.button_bit(), mouse.point()),
            MouseAction::Move => tracking.mouse_move(mouse.point()),
            MouseAction::Up => tracking.mouse_up(mouse.button_bit()),
        };
        if !accepted {
            return;
        }

        let mut cx = HookContext::new(tracking, *state, now);
        let request = match mouse.action {
            MouseAction::Down => strategy.mouse_down(&mut cx, mouse.button),
            MouseAction::Move => strategy.mouse_move(&mut cx),
            MouseAction::Up => strategy.mouse_up(&mut cx, mouse.button),
        };
        let timer = cx.timer_request();
        self.apply_hook_result(id, request, timer);
        self.settle(id);
    }

    fn handle_touch(&mut self, id: RecognizerId, touch: &TouchInput) {
        let now = self.now;
        let Ok(slot) = self.slot_mut(id) else {
            return;
        };
        if !slot.enabled {
            return;
        }
        if touch.default_prevented && slot.state == GestureState::Possible {
            return;
        }

        let Slot {
            strategy,
            tracking,
            state,
            ..
        } = slot;
        let changed = touch.changed.as_slice();
        match touch.action {
            TouchAction::Start => tracking.touches_started(changed),
            TouchAction::Move => tracking.touches_moved(changed),
            TouchAction::End | TouchAction::Cancel => tracking.touches_ended(changed),
        }

        let mut cx = HookContext::new(tracking, *state, now);
        let request = match touch.action {
            TouchAction::Start => strategy.touch_start(&mut cx, changed),
            TouchAction::Move => strategy.touch_move(&mut cx, changed),
            TouchAction::End => strategy.touch_end(&mut cx, changed, false),
            TouchAction::Cancel => strategy.touch_end(&mut cx, changed, true),
        };
        let timer = cx.timer_request();
        self.apply_hook_result(id, request, timer);
        self.settle(id);
    }

    fn apply_hook_result(&mut self, id: RecognizerId, request: Option<GestureState>, timer: TimerRequest) {
        match timer {
            TimerRequest::Keep => {}
            TimerRequest::FailAfter(seconds) => self.timers.schedule(id, self.now.after(seconds)),
            TimerRequest::Cancel => {
                self.timers.cancel(id);
            }
        }
        if let Some(state) = request {
            self.transition(id, state);
        }
    }

    /// Returns a finished recognizer to `Possible` once all pointers are up.
    fn settle(&mut self, id: RecognizerId) {
        let Ok(slot) = self.slot(id) else {
            return;
        };
        if slot.enabled && slot.state.is_terminal() && slot.tracking.is_idle() {
            self.reset(id);
            self.transition(id, GestureState::Possible);
        }
    }

    fn reset(&mut self, id: RecognizerId) {
        self.timers.cancel(id);
        if let Ok(slot) = self.slot_mut(id) {
            slot.tracking.reset();
            slot.strategy.reset();
            slot.pending = None;
        }
    }

    fn transition(&mut self, id: RecognizerId, new_state: GestureState) {
        if self.negotiate(id, new_state) {
            self.enter(id, new_state);
        }
    }

    /// Decides whether `id` may enter `new_state` right now.
    fn negotiate(&mut self, id: RecognizerId, new_state: GestureState) -> bool {
        if !new_state.needs_negotiation() {
            return true;
        }

        for &active in &self.recognized {
            if active == id {
                continue;
            }
            let allows = self
                .slot(active)
                .map(|s| s.recognize_with.contains(&id))
                .unwrap_or(true);
            if !allows {
                debug!(recognizer = %id, blocked_by = %active, to = %new_state, "gesture transition rejected");
                return false;
            }
        }

        let Ok(slot) = self.slot(id) else {
            return false;
        };
        let waiting_on = slot.requires_failure_of.iter().copied().find(|&dep| {
            self.slot(dep)
                .map(|s| s.state != GestureState::Failed)
                .unwrap_or(false)
        });
        if let Some(dep) = waiting_on {
            debug!(recognizer = %id, waiting_on = %dep, to = %new_state, "gesture transition pending");
            if let Ok(slot) = self.slot_mut(id) {
                slot.pending = Some(new_state);
            }
            return false;
        }
        true
    }

    fn enter(&mut self, id: RecognizerId, new_state: GestureState) {
        let Ok(slot) = self.slot_mut(id) else {
            return;
        };
        let old_state = slot.state;
        slot.state = new_state;
        if new_state == GestureState::Failed {
            slot.pending = None;
        }
        match new_state {
            GestureState::Began => slot.strategy.began(&slot.tracking),
            GestureState::Changed => slot.strategy.changed(&slot.tracking),
            _ => {}
        }
        trace!(recognizer = %id, kind = %slot.strategy.kind(), from = %old_state, to = %new_state, "gesture transition");

        if new_state.is_in_progress() {
            if !self.recognized.contains(&id) {
                self.recognized.push(id);
            }
        } else {
            self.recognized.retain(|&r| r != id);
        }

        if new_state.is_terminal() {
            self.timers.cancel(id);
        }

        if new_state.notifies_listeners() {
            if let Some(event) = self.snapshot(id) {
                self.outbox.emit(event);
            }
        }

        if new_state.notifies_dependants() {
            self.notify_dependants(id, new_state);
        }

        self.settle(id);
    }

    fn notify_dependants(&mut self, id: RecognizerId, new_state: GestureState) {
        let dependants = match self.slot(id) {
            Ok(slot) => slot.dependants.clone(),
            Err(_) => return,
        };
        for dependant in dependants {
            let Ok(slot) = self.slot_mut(dependant) else {
                continue;
            };
            match new_state {
                GestureState::Began | GestureState::Recognized => {
                    if slot.state != GestureState::Failed {
                        self.transition(dependant, GestureState::Failed);
                    }
                }
                GestureState::Failed => {
                    if slot.state != GestureState::Possible {
                        continue;
                    }
                    if let Some(pending) = slot.pending.take() {
                        self.transition(dependant, pending);
                    }
                }
                _ => {}
            }
        }
    }

    fn snapshot(&self, id: RecognizerId) -> Option<GestureEvent> {
        let slot = self.slot(id).ok()?;
        Some(GestureEvent {
            recognizer: id,
            kind: slot.strategy.kind(),
            state: slot.state,
            location: slot.strategy.location(&slot.tracking),
            touch_count: slot.tracking.touch_count(),
            sample: slot.strategy.sample(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    use super::{GestureCoordinator, GestureListener, RecognizerId};
    use crate::config::{DragConfig, PanConfig, PinchConfig, RotationConfig, TiltConfig};
    use crate::error::GestureError;
    use crate::event::GestureEvent;
    use crate::input::{InputEvent, TouchPoint};
    use crate::recognizers::{DragRecognizer, PanRecognizer, PinchRecognizer, RotationRecognizer, TiltRecognizer};
    use crate::state::GestureState;
    use pretty_assertions::assert_eq;

    struct TouchNavigation {
        gc: GestureCoordinator,
        pan: RecognizerId,
        pinch: RecognizerId,
        rotation: RecognizerId,
        tilt: RecognizerId,
    }

    /// Pan, pinch and rotation run together and all wait for tilt to fail.
    fn touch_navigation() -> TouchNavigation {
        let mut gc = GestureCoordinator::new();
        let pan = gc.add(PanRecognizer::new(PanConfig::default()));
        let pinch = gc.add(PinchRecognizer::new(PinchConfig::default()));
        let rotation = gc.add(RotationRecognizer::new(RotationConfig::default()));
        let tilt = gc.add(TiltRecognizer::new(TiltConfig::default()));
        for (a, b) in [(pan, pinch), (pan, rotation), (pinch, pan), (pinch, rotation), (rotation, pan), (rotation, pinch)] {
            gc.recognize_with(a, b).unwrap();
        }
        for id in [pan, pinch, rotation] {
            gc.require_failure(id, tilt).unwrap();
        }
        TouchNavigation {
            gc,
            pan,
            pinch,
            rotation,
            tilt,
        }
    }

    fn pair(ax: f64, ay: f64, bx: f64, by: f64) -> Vec<TouchPoint> {
        vec![TouchPoint::new(1, ax, ay), TouchPoint::new(2, bx, by)]
    }

    #[test]
    fn pan_pinch_rotation_begin_together_once_tilt_fails() {
        let TouchNavigation {
            mut gc,
            pan,
            pinch,
            rotation,
            tilt,
        } = touch_navigation();

        gc.handle_input(&InputEvent::touch_start(pair(100.0, 200.0, 200.0, 200.0)));
        let events = gc.handle_input(&InputEvent::touch_move(pair(60.0, 150.0, 260.0, 290.0)));

        let began: Vec<_> = events
            .iter()
            .filter(|e| e.state == GestureState::Began)
            .map(|e| e.recognizer)
            .collect();
        assert_eq!(began, vec![pan, pinch, rotation]);
        assert_eq!(gc.state(tilt).unwrap(), GestureState::Failed);
        assert_eq!(gc.recognized(), &[pan, pinch, rotation]);

        let events = gc.handle_input(&InputEvent::touch_move(pair(55.0, 150.0, 265.0, 290.0)));
        assert!(events.iter().all(|e| e.state == GestureState::Changed));
        assert_eq!(events.len(), 3);

        gc.handle_input(&InputEvent::touch_end(pair(55.0, 150.0, 265.0, 290.0)));
        for id in [pan, pinch, rotation, tilt] {
            assert_eq!(gc.state(id).unwrap(), GestureState::Possible);
        }
        assert!(gc.recognized().is_empty());
    }

    #[test]
    fn tilt_claims_touches_before_pan() {
        let TouchNavigation {
            mut gc,
            pan,
            pinch,
            rotation,
            tilt,
        } = touch_navigation();

        gc.handle_input(&InputEvent::touch_start(pair(100.0, 300.0, 200.0, 300.0)));
        let events = gc.handle_input(&InputEvent::touch_move(pair(100.0, 270.0, 200.0, 270.0)));

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].recognizer, tilt);
        assert_eq!(events[0].state, GestureState::Began);
        for id in [pan, pinch, rotation] {
            assert_eq!(gc.state(id).unwrap(), GestureState::Failed);
        }
    }

    #[test]
    fn exclusive_recognizer_is_rejected_while_another_is_active() {
        let mut gc = GestureCoordinator::new();
        let first = gc.add(DragRecognizer::new(DragConfig::default()));
        let second = gc.add(DragRecognizer::new(DragConfig::default()));

        gc.handle_input(&InputEvent::mouse_down(0, 0.0, 0.0));
        let events = gc.handle_input(&InputEvent::mouse_move(20.0, 0.0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].recognizer, first);
        assert_eq!(gc.state(second).unwrap(), GestureState::Possible);

        gc.recognize_with(first, second).unwrap();
        assert!(gc.can_recognize_with(first, second).unwrap());
        assert!(!gc.can_recognize_with(second, first).unwrap());
        let events = gc.handle_input(&InputEvent::mouse_move(30.0, 0.0));
        assert_eq!(events.len(), 2);
        assert_eq!(gc.recognized(), &[first, second]);
    }

    #[test]
    fn listeners_run_newest_first_and_dedupe() {
        let mut gc = GestureCoordinator::new();
        let drag = gc.add(DragRecognizer::new(DragConfig::default()));
        let log = Rc::new(RefCell::new(Vec::new()));

        let first_log = log.clone();
        let first: Rc<GestureListener> = Rc::new(move |e: &GestureEvent| first_log.borrow_mut().push(("first", e.state)));
        let second_log = log.clone();
        let second: Rc<GestureListener> =
            Rc::new(move |e: &GestureEvent| second_log.borrow_mut().push(("second", e.state)));

        assert!(gc.add_listener(drag, first.clone()).unwrap());
        assert!(!gc.add_listener(drag, first.clone()).unwrap());
        assert!(gc.add_listener(drag, second.clone()).unwrap());

        gc.dispatch(&InputEvent::mouse_down(0, 0.0, 0.0));
        gc.dispatch(&InputEvent::mouse_move(20.0, 0.0));
        assert_eq!(
            *log.borrow(),
            vec![("second", GestureState::Began), ("first", GestureState::Began)]
        );

        assert!(gc.remove_listener(drag, &second).unwrap());
        log.borrow_mut().clear();
        gc.dispatch(&InputEvent::mouse_up(0, 20.0, 0.0));
        assert_eq!(*log.borrow(), vec![("first", GestureState::Ended)]);
    }

    #[test]
    fn panicking_listener_leaves_state_consistent() {
        let mut gc = GestureCoordinator::new();
        let drag = gc.add(DragRecognizer::new(DragConfig::default()));
        let listener: Rc<GestureListener> = Rc::new(|e: &GestureEvent| {
            if e.state == GestureState::Began {
                panic!("listener failed on began");
            }
        });
        gc.add_listener(drag, listener).unwrap();

        gc.dispatch(&InputEvent::mouse_down(0, 0.0, 0.0));
        let result = panic::catch_unwind(AssertUnwindSafe(|| gc.dispatch(&InputEvent::mouse_move(20.0, 0.0))));
        assert!(result.is_err());
        assert_eq!(gc.state(drag).unwrap(), GestureState::Began);
        assert_eq!(gc.recognized(), &[drag]);

        let changed = gc.dispatch(&InputEvent::mouse_move(30.0, 0.0));
        assert_eq!(changed[0].state, GestureState::Changed);
        let ended = gc.dispatch(&InputEvent::mouse_up(0, 30.0, 0.0));
        assert_eq!(ended[0].state, GestureState::Ended);
        assert_eq!(gc.state(drag).unwrap(), GestureState::Possible);
        assert!(gc.recognized().is_empty());
    }

    #[test]
    fn disabled_recognizer_ignores_input() {
        let mut gc = GestureCoordinator::new();
        let drag = gc.add(DragRecognizer::new(DragConfig::default()));
        gc.set_enabled(drag, false).unwrap();
        assert!(!gc.is_enabled(drag).unwrap());
        gc.handle_input(&InputEvent::mouse_down(0, 0.0, 0.0));
        assert!(gc.handle_input(&InputEvent::mouse_move(50.0, 0.0)).is_empty());
        assert_eq!(gc.tracking(drag).unwrap().button_mask(), 0);
    }

    #[test]
    fn errors_for_bad_lookups() {
        let mut gc = GestureCoordinator::new();
        let drag = gc.add(DragRecognizer::new(DragConfig::default()));
        let mut other = GestureCoordinator::new();
        other.add(DragRecognizer::new(DragConfig::default()));
        let foreign = other.add(DragRecognizer::new(DragConfig::default()));

        assert_eq!(gc.state(foreign), Err(GestureError::UnknownRecognizer(foreign)));
        assert_eq!(
            gc.touch_location(drag, 0),
            Err(GestureError::IndexOutOfRange { index: 0, count: 0 })
        );
        assert!(matches!(
            gc.strategy::<PanRecognizer>(drag),
            Err(GestureError::StrategyMismatch(_))
        ));
        assert!(gc.recognize_with(drag, foreign).is_err());
    }

    #[test]
    fn wheel_events_pass_through() {
        let mut gc = GestureCoordinator::new();
        gc.add(DragRecognizer::new(DragConfig::default()));
        let events = gc.handle_input(&InputEvent::wheel(3.0, crate::input::WheelDeltaMode::Line));
        assert!(events.is_empty());
    }
}

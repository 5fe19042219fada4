//! Look-at navigator: maps recognized gestures and wheel input onto a camera
//! orbiting a point on the globe.
//!
//! Mouse:
//! - primary drag pans the look-at point
//! - secondary drag changes heading (horizontal) and tilt (vertical)
//! - wheel zooms
//!
//! Touch:
//! - one or more fingers pan, two fingers pinch to zoom and twist to rotate
//! - two fingers sliding vertically together tilt

use std::rc::Rc;

use foundation::Viewport;
use foundation::math::{Mat4, Position, Ray, Vec2, perspective_pixel_size};
use foundation::time::Time;
use gesture::{
    DragRecognizer, GestureCoordinator, GestureEvent, GestureListener, GestureState, InputEvent, PanRecognizer,
    PinchRecognizer, RecognizerId, RotationRecognizer, TapRecognizer, TiltRecognizer, WheelInput,
};
use runtime::{ListenerList, RedrawRequest};
use tracing::debug;

use crate::config::NavigatorConfig;
use crate::error::{NavigatorError, Result};
use crate::globe::Globe;
use crate::limits::{apply_limits, max_range_2d};
use crate::state::NavigatorState;
use crate::view::{ViewingParameters, extract_viewing_parameters};

/// Degrees of heading change for a drag across the full viewport width.
const HEADING_PER_VIEWPORT_WIDTH: f64 = 360.0;

/// Degrees of tilt change for a drag across the full viewport height.
const TILT_PER_VIEWPORT_HEIGHT: f64 = 90.0;

/// Fraction of a pixel's ground size the range moves per wheel pixel.
const WHEEL_ZOOM_FACTOR: f64 = 0.5;

/// What a raw input listener wants done with the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    Continue,
    /// Suppress the navigator's default handling of this event.
    PreventDefault,
}

/// Observer of raw input, called before any gesture processing.
pub type InputListener = dyn Fn(&InputEvent) -> InputDisposition;

/// Ids of the recognizers installed by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorRecognizers {
    pub primary_drag: RecognizerId,
    pub secondary_drag: RecognizerId,
    pub pan: RecognizerId,
    pub pinch: RecognizerId,
    pub rotation: RecognizerId,
    pub tilt: RecognizerId,
    pub tap: RecognizerId,
}

/// Camera controller for one globe view.
pub struct LookAtNavigator {
    globe: Box<dyn Globe>,
    viewport: Viewport,
    config: NavigatorConfig,

    /// Camera as last written by a gesture or setter; limits applied.
    camera: ViewingParameters,

    gestures: GestureCoordinator,
    recognizers: NavigatorRecognizers,
    input_listeners: ListenerList<InputListener>,
    redraw: RedrawRequest,

    /// Screen point where the current 2D pan began.
    begin_point: Vec2,
    /// Translation (3D) or screen point (2D) at the previous pan sample.
    last_point: Vec2,
    begin_heading: f64,
    begin_tilt: f64,
    begin_range: f64,
    last_rotation: f64,
}

impl LookAtNavigator {
    pub fn new(globe: Box<dyn Globe>, viewport: Viewport, config: NavigatorConfig) -> Result<Self> {
        check_viewport(&viewport)?;
        config.validate()?;

        let r = &config.recognizers;
        let mut gestures = GestureCoordinator::new();
        let recognizers = NavigatorRecognizers {
            primary_drag: gestures.add(DragRecognizer::new(r.primary_drag)),
            secondary_drag: gestures.add(DragRecognizer::new(r.secondary_drag)),
            pan: gestures.add(PanRecognizer::new(r.pan)),
            pinch: gestures.add(PinchRecognizer::new(r.pinch)),
            rotation: gestures.add(RotationRecognizer::new(r.rotation)),
            tilt: gestures.add(TiltRecognizer::new(r.tilt)),
            tap: gestures.add(TapRecognizer::new(r.tap)),
        };

        let NavigatorRecognizers {
            pan,
            pinch,
            rotation,
            tilt,
            ..
        } = recognizers;
        for (a, b) in [
            (pan, pinch),
            (pan, rotation),
            (pinch, pan),
            (pinch, rotation),
            (rotation, pan),
            (rotation, pinch),
        ] {
            gestures.recognize_with(a, b)?;
        }
        for id in [pan, pinch, rotation] {
            gestures.require_failure(id, tilt)?;
        }

        let mut navigator = Self {
            globe,
            viewport,
            camera: ViewingParameters {
                look_at: config.look_at(),
                range: config.range,
                heading: config.heading,
                tilt: config.tilt,
                roll: config.roll,
            },
            config,
            gestures,
            recognizers,
            input_listeners: ListenerList::new(),
            redraw: RedrawRequest::default(),
            begin_point: Vec2::ZERO,
            last_point: Vec2::ZERO,
            begin_heading: 0.0,
            begin_tilt: 0.0,
            begin_range: 0.0,
            last_rotation: 0.0,
        };
        navigator.apply_limits();
        debug!(
            lat = navigator.camera.look_at.latitude,
            lon = navigator.camera.look_at.longitude,
            range = navigator.camera.range,
            flat = navigator.globe.is_2d(),
            "look-at navigator created"
        );
        Ok(navigator)
    }

    pub fn with_defaults(globe: Box<dyn Globe>, viewport: Viewport) -> Result<Self> {
        Self::new(globe, viewport, NavigatorConfig::default())
    }

    pub fn globe(&self) -> &dyn Globe {
        self.globe.as_ref()
    }

    /// Swaps the globe, for example when switching between 2D and 3D.
    pub fn set_globe(&mut self, globe: Box<dyn Globe>) {
        self.globe = globe;
        self.apply_limits();
        self.redraw.request();
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        check_viewport(&viewport)?;
        self.viewport = viewport;
        self.redraw.request();
        Ok(())
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn camera(&self) -> &ViewingParameters {
        &self.camera
    }

    pub fn look_at(&self) -> Position {
        self.camera.look_at
    }

    pub fn range(&self) -> f64 {
        self.camera.range
    }

    pub fn heading(&self) -> f64 {
        self.camera.heading
    }

    pub fn tilt(&self) -> f64 {
        self.camera.tilt
    }

    pub fn roll(&self) -> f64 {
        self.camera.roll
    }

    pub fn set_look_at(&mut self, position: Position) {
        self.camera.look_at = position;
        self.camera_changed();
    }

    pub fn set_range(&mut self, range: f64) {
        self.camera.range = range;
        self.camera_changed();
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.camera.heading = heading;
        self.camera_changed();
    }

    pub fn set_tilt(&mut self, tilt: f64) {
        self.camera.tilt = tilt;
        self.camera_changed();
    }

    pub fn set_roll(&mut self, roll: f64) {
        self.camera.roll = roll;
        self.camera_changed();
    }

    pub fn recognizers(&self) -> &NavigatorRecognizers {
        &self.recognizers
    }

    pub fn gestures(&self) -> &GestureCoordinator {
        &self.gestures
    }

    /// Access for wiring application recognizers or relationships.
    pub fn gestures_mut(&mut self) -> &mut GestureCoordinator {
        &mut self.gestures
    }

    /// Application listeners run before the navigator's own handling.
    pub fn add_gesture_listener(&mut self, id: RecognizerId, listener: Rc<GestureListener>) -> Result<bool> {
        Ok(self.gestures.add_listener(id, listener)?)
    }

    pub fn remove_gesture_listener(&mut self, id: RecognizerId, listener: &Rc<GestureListener>) -> Result<bool> {
        Ok(self.gestures.remove_listener(id, listener)?)
    }

    /// Returns false when the listener was already registered.
    pub fn add_input_listener(&mut self, listener: Rc<InputListener>) -> bool {
        self.input_listeners.add(listener)
    }

    pub fn remove_input_listener(&mut self, listener: &Rc<InputListener>) -> bool {
        self.input_listeners.remove(listener)
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw.is_requested()
    }

    /// Clears the redraw flag, returning whether a redraw was pending.
    pub fn take_redraw_request(&mut self) -> bool {
        self.redraw.take()
    }

    /// Range beyond which a 2D map would no longer fill the view.
    pub fn max_range_2d(&self) -> f64 {
        max_range_2d(self.globe.as_ref(), self.config.near_distance)
    }

    /// Camera snapshot with limits applied.
    pub fn current_state(&mut self) -> NavigatorState {
        self.apply_limits();
        NavigatorState::new(
            self.globe.as_ref(),
            self.camera,
            self.viewport,
            self.config.near_distance,
            self.config.far_distance,
        )
    }

    /// Routes one input event through the input listeners, then to either the
    /// wheel handler or the gesture recognizers.
    ///
    /// Returns the gesture events produced, in delivery order.
    pub fn handle_input(&mut self, mut input: InputEvent) -> Vec<GestureEvent> {
        for listener in self.input_listeners.delivery_order() {
            if listener(&input) == InputDisposition::PreventDefault {
                input.prevent_default();
            }
        }

        match &input {
            InputEvent::Wheel(wheel) => {
                if !wheel.default_prevented {
                    self.handle_wheel(wheel);
                }
                Vec::new()
            }
            _ => {
                let events = self.gestures.handle_input(&input);
                self.deliver(&events);
                events
            }
        }
    }

    /// Lets time-based gestures expire without new input.
    pub fn advance_time(&mut self, now: Time) -> Vec<GestureEvent> {
        let events = self.gestures.advance_time(now);
        self.deliver(&events);
        events
    }

    fn deliver(&mut self, events: &[GestureEvent]) {
        for event in events {
            self.gestures.notify(event);
            self.handle_gesture(event);
        }
    }

    fn handle_gesture(&mut self, event: &GestureEvent) {
        let ids = self.recognizers;
        let id = event.recognizer;
        if id == ids.primary_drag || id == ids.pan {
            if self.globe.is_2d() {
                self.handle_pan_or_drag_2d(event);
            } else {
                self.handle_pan_or_drag_3d(event);
            }
        } else if id == ids.secondary_drag {
            self.handle_secondary_drag(event);
        } else if id == ids.pinch {
            self.handle_pinch(event);
        } else if id == ids.rotation {
            self.handle_rotation(event);
        } else if id == ids.tilt {
            self.handle_tilt(event);
        }
        self.redraw.request();
    }

    fn handle_pan_or_drag_3d(&mut self, event: &GestureEvent) {
        let Some(translation) = event.translation() else {
            return;
        };
        match event.state {
            GestureState::Began => self.last_point = Vec2::ZERO,
            GestureState::Changed => {
                let forward_px = translation.y - self.last_point.y;
                let side_px = translation.x - self.last_point.x;
                self.last_point = translation;

                let meters_per_px = perspective_pixel_size(&self.viewport, self.camera.range.max(1.0));
                let radius = self.globe.max_radius();
                let forward_deg = (forward_px * meters_per_px / radius).to_degrees();
                let side_deg = -(side_px * meters_per_px / radius).to_degrees();

                let (sin_h, cos_h) = self.camera.heading.to_radians().sin_cos();
                self.camera.look_at.latitude += forward_deg * cos_h - side_deg * sin_h;
                self.camera.look_at.longitude += forward_deg * sin_h + side_deg * cos_h;
                self.apply_limits();
            }
            _ => {}
        }
    }

    /// Keeps the map point under the pointer pinned to it by translating the
    /// modelview between the previous and current pointer intersections.
    fn handle_pan_or_drag_2d(&mut self, event: &GestureEvent) {
        let Some(translation) = event.translation() else {
            return;
        };
        match event.state {
            GestureState::Began => {
                let location = event.location.unwrap_or_default();
                self.begin_point = location;
                self.last_point = location;
            }
            GestureState::Changed => {
                let current = self.begin_point + translation;
                let previous = std::mem::replace(&mut self.last_point, current);

                let state = self.current_state();
                let hits = state
                    .ray_through_screen_point(previous)
                    .and_then(|ray| self.globe.intersect(&ray))
                    .zip(
                        state
                            .ray_through_screen_point(current)
                            .and_then(|ray| self.globe.intersect(&ray)),
                    );
                let Some((p1, p2)) = hits else {
                    debug!(?previous, ?current, "2D pan skipped: pointer misses the map");
                    return;
                };

                let modelview = *state.modelview() * Mat4::translation_by(p2 - p1);
                let origin = Ray::new(modelview.extract_eye_point(), modelview.extract_forward_vector())
                    .and_then(|ray| self.globe.intersect(&ray));
                let Some(origin) = origin else {
                    debug!("2D pan skipped: view center misses the map");
                    return;
                };

                let params = extract_viewing_parameters(self.globe.as_ref(), &modelview, origin, self.camera.roll);
                self.camera.look_at = params.look_at;
                self.camera.range = params.range;
                self.camera.heading = params.heading;
                self.camera.tilt = params.tilt;
                self.apply_limits();
            }
            _ => {}
        }
    }

    fn handle_secondary_drag(&mut self, event: &GestureEvent) {
        let Some(translation) = event.translation() else {
            return;
        };
        match event.state {
            GestureState::Began => {
                self.begin_heading = self.camera.heading;
                self.begin_tilt = self.camera.tilt;
            }
            GestureState::Changed => {
                let heading_deg = HEADING_PER_VIEWPORT_WIDTH * translation.x / self.viewport.width;
                let tilt_deg = TILT_PER_VIEWPORT_HEIGHT * translation.y / self.viewport.height;
                self.camera.heading = self.begin_heading + heading_deg;
                self.camera.tilt = self.begin_tilt + tilt_deg;
                self.apply_limits();
            }
            _ => {}
        }
    }

    fn handle_pinch(&mut self, event: &GestureEvent) {
        let Some(scale) = event.scale() else {
            return;
        };
        match event.state {
            GestureState::Began => self.begin_range = self.camera.range,
            GestureState::Changed => {
                if scale != 0.0 {
                    self.camera.range = self.begin_range / scale;
                    self.apply_limits();
                }
            }
            _ => {}
        }
    }

    fn handle_rotation(&mut self, event: &GestureEvent) {
        let Some(rotation) = event.rotation() else {
            return;
        };
        match event.state {
            GestureState::Began => self.last_rotation = 0.0,
            GestureState::Changed => {
                self.camera.heading -= rotation - self.last_rotation;
                self.last_rotation = rotation;
                self.apply_limits();
            }
            _ => {}
        }
    }

    fn handle_tilt(&mut self, event: &GestureEvent) {
        let Some(translation) = event.translation() else {
            return;
        };
        match event.state {
            GestureState::Began => self.begin_tilt = self.camera.tilt,
            GestureState::Changed => {
                let tilt_deg = TILT_PER_VIEWPORT_HEIGHT * -translation.y / self.viewport.height;
                self.camera.tilt = self.begin_tilt + tilt_deg;
                self.apply_limits();
            }
            _ => {}
        }
    }

    fn handle_wheel(&mut self, wheel: &WheelInput) {
        let delta = wheel.delta_pixels();
        let meters_per_px = perspective_pixel_size(&self.viewport, self.camera.range.max(1.0));
        let meters = WHEEL_ZOOM_FACTOR * delta * meters_per_px;
        self.camera.range += meters;
        self.apply_limits();
        self.redraw.request();
        debug!(delta, meters, range = self.camera.range, "wheel zoom");
    }

    fn camera_changed(&mut self) {
        self.apply_limits();
        self.redraw.request();
    }

    fn apply_limits(&mut self) {
        apply_limits(
            &mut self.camera,
            self.globe.as_ref(),
            self.config.near_distance,
            self.config.enable_2d_limits,
        );
    }
}

fn check_viewport(viewport: &Viewport) -> Result<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(NavigatorError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

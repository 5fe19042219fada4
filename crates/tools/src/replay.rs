//! Scripted input replay.
//!
//! A [`Script`] is a JSON list of steps: raw input events, clock advances,
//! and frame boundaries. Replaying it against a [`LookAtNavigator`] yields a
//! deterministic report of camera state per redrawn frame plus every gesture
//! event delivered along the way.

use std::cell::RefCell;
use std::rc::Rc;

use foundation::time::Time;
use gesture::{GestureEvent, GestureListener, GestureState, InputEvent};
use navigator::{LookAtNavigator, NavigatorError};
use runtime::{EventBus, Frame};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Seconds per replayed frame.
pub const FRAME_DT_S: f64 = 1.0 / 60.0;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Input { event: InputEvent },
    /// Moves the gesture clock without input so timeouts can fire.
    Advance { time_ms: f64 },
    /// Ends the current frame; the camera is recorded if a redraw was requested.
    Frame,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(text: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub recognizer: String,
    pub kind: String,
    pub state: GestureState,
    pub location: Option<[f64; 2]>,
    pub touch_count: usize,
}

impl From<&GestureEvent> for TraceEntry {
    fn from(e: &GestureEvent) -> Self {
        Self {
            recognizer: e.recognizer.to_string(),
            kind: e.kind.to_string(),
            state: e.state,
            location: e.location.map(|p| [p.x, p.y]),
            touch_count: e.touch_count,
        }
    }
}

/// Camera as drawn at the end of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraReport {
    pub frame: u64,
    pub time_s: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub range: f64,
    pub heading: f64,
    pub tilt: f64,
    pub roll: f64,
}

impl CameraReport {
    fn capture(frame: &Frame, navigator: &LookAtNavigator) -> Self {
        let look_at = navigator.look_at();
        Self {
            frame: frame.index,
            time_s: frame.time.seconds(),
            latitude: look_at.latitude,
            longitude: look_at.longitude,
            altitude: look_at.altitude,
            range: navigator.range(),
            heading: navigator.heading(),
            tilt: navigator.tilt(),
            roll: navigator.roll(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub frames: Vec<CameraReport>,
    pub gestures: Vec<TraceEntry>,
    pub final_camera: CameraReport,
}

/// Drives a navigator through scripts, recording what a renderer would see.
pub struct Replay {
    navigator: LookAtNavigator,
    frame: Frame,
    trace: Rc<RefCell<EventBus<TraceEntry>>>,
    frames: Vec<CameraReport>,
}

impl Replay {
    pub fn new(mut navigator: LookAtNavigator) -> Result<Self, ReplayError> {
        let trace = Rc::new(RefCell::new(EventBus::new()));
        let ids: Vec<_> = navigator.gestures().ids().collect();
        for id in ids {
            let sink = trace.clone();
            let listener: Rc<GestureListener> =
                Rc::new(move |e: &GestureEvent| sink.borrow_mut().emit(TraceEntry::from(e)));
            navigator.add_gesture_listener(id, listener)?;
        }
        Ok(Self {
            navigator,
            frame: Frame::new(0, FRAME_DT_S),
            trace,
            frames: Vec::new(),
        })
    }

    pub fn navigator(&self) -> &LookAtNavigator {
        &self.navigator
    }

    pub fn step(&mut self, step: &Step) {
        match step {
            Step::Input { event } => {
                let events = self.navigator.handle_input(event.clone());
                debug!(delivered = events.len(), "input replayed");
            }
            Step::Advance { time_ms } => {
                self.navigator.advance_time(Time::from_millis(*time_ms));
            }
            Step::Frame => self.end_frame(),
        }
    }

    pub fn run(&mut self, script: &Script) -> ReplayReport {
        for step in &script.steps {
            self.step(step);
        }
        info!(
            steps = script.steps.len(),
            frames = self.frames.len(),
            "replay finished"
        );
        self.report()
    }

    /// Report of everything recorded so far; drains the gesture trace.
    pub fn report(&mut self) -> ReplayReport {
        ReplayReport {
            frames: std::mem::take(&mut self.frames),
            gestures: self.trace.borrow_mut().drain(),
            final_camera: CameraReport::capture(&self.frame, &self.navigator),
        }
    }

    fn end_frame(&mut self) {
        if self.navigator.take_redraw_request() {
            self.frames.push(CameraReport::capture(&self.frame, &self.navigator));
        }
        self.frame = self.frame.next();
    }
}

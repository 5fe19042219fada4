use foundation::math::Vec2;

use crate::coordinator::RecognizerId;
use crate::state::GestureState;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Drag,
    Pan,
    Pinch,
    Rotation,
    Tap,
    Tilt,
    /// Application-defined recognizer.
    Custom(&'static str),
}

impl GestureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Pan => "pan",
            Self::Pinch => "pinch",
            Self::Rotation => "rotation",
            Self::Tap => "tap",
            Self::Tilt => "tilt",
            Self::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed tap within a tap gesture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tap {
    /// Most touches seen down at once during the tap.
    pub touch_count: usize,
    pub location: Vec2,
}

/// Gesture-specific measurement carried by an event.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureSample {
    /// Smoothed screen translation in pixels.
    Translation(Vec2),
    /// Cumulative scale factor.
    Scale(f64),
    /// Cumulative rotation in degrees.
    Rotation(f64),
    Taps(Vec<Tap>),
    None,
}

/// Snapshot of a recognizer taken when it changed state.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    pub recognizer: RecognizerId,
    pub kind: GestureKind,
    pub state: GestureState,
    pub location: Option<Vec2>,
    pub touch_count: usize,
    pub sample: GestureSample,
}

impl GestureEvent {
    pub fn translation(&self) -> Option<Vec2> {
        match self.sample {
            GestureSample::Translation(t) => Some(t),
            _ => None,
        }
    }

    pub fn scale(&self) -> Option<f64> {
        match self.sample {
            GestureSample::Scale(s) => Some(s),
            _ => None,
        }
    }

    pub fn rotation(&self) -> Option<f64> {
        match self.sample {
            GestureSample::Rotation(r) => Some(r),
            _ => None,
        }
    }

    pub fn taps(&self) -> &[Tap] {
        match &self.sample {
            GestureSample::Taps(taps) => taps,
            _ => &[],
        }
    }
}

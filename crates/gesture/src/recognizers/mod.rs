mod drag;
mod pan;
mod pinch;
mod rotation;
mod tap;
mod tilt;

pub use drag::DragRecognizer;
pub use pan::PanRecognizer;
pub use pinch::PinchRecognizer;
pub use rotation::RotationRecognizer;
pub use tap::TapRecognizer;
pub use tilt::TiltRecognizer;

use foundation::math::Vec2;

use crate::tracking::Tracking;

/// Exponentially smoothed touch translation shared by pan and tilt.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct SmoothedTranslation {
    /// Raw centroid translation as of the last touch event.
    actual: Vec2,
    /// `actual` at the moment the gesture began.
    reference: Vec2,
    translation: Vec2,
}

impl SmoothedTranslation {
    pub(crate) fn track(&mut self, tracking: &Tracking) -> Vec2 {
        self.actual = tracking.touch_translation();
        self.actual
    }

    pub(crate) fn begin(&mut self) {
        self.reference = self.actual;
    }

    pub(crate) fn change(&mut self, weight: f64) {
        self.translation = self.translation.lerp(self.actual - self.reference, weight);
    }

    pub(crate) fn value(&self) -> Vec2 {
        self.translation
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Looks up the two tracked touches by id.
pub(crate) fn touch_pair(tracking: &Tracking, ids: &[i64]) -> Option<(Vec2, Vec2)> {
    match ids {
        [a, b] => Some((tracking.touch(*a)?.location, tracking.touch(*b)?.location)),
        _ => None,
    }
}

/// Records newly started touches until two are being followed.
pub(crate) fn claim_touches(ids: &mut Vec<i64>, changed: &[crate::input::TouchPoint]) -> bool {
    if ids.len() >= 2 {
        return false;
    }
    for p in changed {
        if ids.len() == 2 {
            break;
        }
        if !ids.contains(&p.id) {
            ids.push(p.id);
        }
    }
    ids.len() == 2
}

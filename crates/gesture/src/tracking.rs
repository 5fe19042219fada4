use foundation::math::Vec2;

use crate::error::{GestureError, Result};
use crate::input::TouchPoint;

/// A touch currently down on the surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Touch {
    pub id: i64,
    pub location: Vec2,
    pub start_location: Vec2,
}

impl Touch {
    /// Offset from where this touch first went down.
    pub fn translation(&self) -> Vec2 {
        self.location - self.start_location
    }
}

/// Pointer bookkeeping shared by every recognizer.
///
/// For touches, `location` is the centroid of the active touches. Adding or
/// removing a touch moves the centroid without any finger moving, so the jump
/// is folded into `centroid_shift`. The quantity
/// `location - start_location + centroid_shift` therefore only changes when
/// touches actually move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracking {
    button_mask: u32,
    touches: Vec<Touch>,
    location: Vec2,
    start_location: Vec2,
    centroid_shift: Vec2,
}

impl Tracking {
    pub fn button_mask(&self) -> u32 {
        self.button_mask
    }

    pub fn touches(&self) -> &[Touch] {
        &self.touches
    }

    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    pub fn touch(&self, id: i64) -> Option<&Touch> {
        self.touches.iter().find(|t| t.id == id)
    }

    pub fn touch_location(&self, index: usize) -> Result<Vec2> {
        self.touches
            .get(index)
            .map(|t| t.location)
            .ok_or(GestureError::IndexOutOfRange {
                index,
                count: self.touches.len(),
            })
    }

    pub fn location(&self) -> Vec2 {
        self.location
    }

    pub fn start_location(&self) -> Vec2 {
        self.start_location
    }

    pub fn centroid_shift(&self) -> Vec2 {
        self.centroid_shift
    }

    /// Centroid motion since the first touch, corrected for touches coming
    /// and going.
    pub fn touch_translation(&self) -> Vec2 {
        self.location - self.start_location + self.centroid_shift
    }

    /// No buttons held and no touches down.
    pub fn is_idle(&self) -> bool {
        self.button_mask == 0 && self.touches.is_empty()
    }

    /// Returns false when the button was already down.
    pub(crate) fn mouse_down(&mut self, bit: u32, point: Vec2) -> bool {
        if bit == 0 || self.button_mask & bit != 0 {
            return false;
        }
        self.button_mask |= bit;
        if self.button_mask == bit {
            self.location = point;
            self.start_location = point;
        }
        true
    }

    /// Returns false when no button is held.
    pub(crate) fn mouse_move(&mut self, point: Vec2) -> bool {
        if self.button_mask == 0 {
            return false;
        }
        self.location = point;
        true
    }

    /// Returns false when the button was not down.
    pub(crate) fn mouse_up(&mut self, bit: u32) -> bool {
        if bit == 0 || self.button_mask & bit == 0 {
            return false;
        }
        self.button_mask &= !bit;
        true
    }

    pub(crate) fn touches_started(&mut self, changed: &[TouchPoint]) {
        let was_empty = self.touches.is_empty();
        for p in changed {
            if self.touch(p.id).is_some() {
                continue;
            }
            self.touches.push(Touch {
                id: p.id,
                location: p.point(),
                start_location: p.point(),
            });
        }
        if self.touches.is_empty() {
            return;
        }
        if was_empty {
            self.location = self.centroid();
            self.centroid_shift = Vec2::ZERO;
            self.start_location = self.location;
        } else {
            self.recenter();
        }
    }

    pub(crate) fn touches_moved(&mut self, changed: &[TouchPoint]) {
        for p in changed {
            if let Some(t) = self.touches.iter_mut().find(|t| t.id == p.id) {
                t.location = p.point();
            }
        }
        if !self.touches.is_empty() {
            self.location = self.centroid();
        }
    }

    /// Handles both touch end and touch cancel.
    pub(crate) fn touches_ended(&mut self, changed: &[TouchPoint]) {
        self.touches.retain(|t| !changed.iter().any(|p| p.id == t.id));
        if self.touches.is_empty() {
            self.location = Vec2::ZERO;
            self.centroid_shift = Vec2::ZERO;
        } else {
            self.recenter();
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    fn recenter(&mut self) {
        self.centroid_shift += self.location;
        self.location = self.centroid();
        self.centroid_shift -= self.location;
    }

    fn centroid(&self) -> Vec2 {
        let sum = self
            .touches
            .iter()
            .fold(Vec2::ZERO, |acc, t| acc + t.location);
        sum / self.touches.len() as f64
    }
}

/// Drawable region in CSS pixels, origin at the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn with_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// True when both dimensions are positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, Result};

fn check(ok: bool, field: &'static str, reason: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(GestureError::InvalidConfig {
            field,
            reason: reason.to_string(),
        })
    }
}

fn check_weight(weight: f64, field: &'static str) -> Result<()> {
    check(weight > 0.0 && weight <= 1.0, field, "must be in (0, 1]")
}

fn check_threshold(threshold: f64, field: &'static str) -> Result<()> {
    check(threshold >= 0.0 && threshold.is_finite(), field, "must be finite and >= 0")
}

/// Mouse drag with a specific button combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Button mask that must be held exactly (bit `1 << button`).
    pub buttons: u32,
    /// Pixels the pointer must travel before the drag is interpreted.
    pub threshold: f64,
    /// Smoothing weight applied to each new translation sample.
    pub weight: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            buttons: 1,
            threshold: 5.0,
            weight: 0.3,
        }
    }
}

impl DragConfig {
    /// Default drag bound to the secondary button.
    pub fn secondary() -> Self {
        Self {
            buttons: 4,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check(self.buttons != 0, "drag.buttons", "must name at least one button")?;
        check_threshold(self.threshold, "drag.threshold")?;
        check_weight(self.weight, "drag.weight")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanConfig {
    pub min_touches: usize,
    pub max_touches: usize,
    pub threshold: f64,
    pub weight: f64,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            min_touches: 1,
            max_touches: usize::MAX,
            threshold: 20.0,
            weight: 0.4,
        }
    }
}

impl PanConfig {
    pub fn validate(&self) -> Result<()> {
        check(self.min_touches >= 1, "pan.min_touches", "must be at least 1")?;
        check(
            self.max_touches >= self.min_touches,
            "pan.max_touches",
            "must not be below min_touches",
        )?;
        check_threshold(self.threshold, "pan.threshold")?;
        check_weight(self.weight, "pan.weight")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// Change in touch separation, in pixels, that starts the pinch.
    pub threshold: f64,
    pub weight: f64,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            weight: 0.4,
        }
    }
}

impl PinchConfig {
    pub fn validate(&self) -> Result<()> {
        check_threshold(self.threshold, "pinch.threshold")?;
        check_weight(self.weight, "pinch.weight")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Angle, in degrees, that starts the rotation.
    pub threshold: f64,
    pub weight: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            weight: 0.4,
        }
    }
}

impl RotationConfig {
    pub fn validate(&self) -> Result<()> {
        check_threshold(self.threshold, "rotation.threshold")?;
        check_weight(self.weight, "rotation.weight")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    pub number_of_taps: usize,
    pub number_of_touches: usize,
    /// Movement, in pixels, that disqualifies a tap.
    pub threshold: f64,
    /// Longest a single tap may be held (seconds).
    pub max_tap_duration: f64,
    /// Longest wait between consecutive taps (seconds).
    pub max_tap_interval: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            number_of_taps: 1,
            number_of_touches: 1,
            threshold: 20.0,
            max_tap_duration: 0.5,
            max_tap_interval: 0.4,
        }
    }
}

impl TapConfig {
    pub fn validate(&self) -> Result<()> {
        check(self.number_of_taps >= 1, "tap.number_of_taps", "must be at least 1")?;
        check(self.number_of_touches >= 1, "tap.number_of_touches", "must be at least 1")?;
        check_threshold(self.threshold, "tap.threshold")?;
        check(self.max_tap_duration > 0.0, "tap.max_tap_duration", "must be positive")?;
        check(self.max_tap_interval > 0.0, "tap.max_tap_interval", "must be positive")
    }
}

/// Two-finger vertical slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    pub threshold: f64,
    pub weight: f64,
    /// Widest starting separation of the two touches, in pixels.
    pub max_touch_distance: f64,
    /// Largest change in separation while sliding, in pixels.
    pub max_touch_divergence: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            weight: 0.4,
            max_touch_distance: 250.0,
            max_touch_divergence: 50.0,
        }
    }
}

impl TiltConfig {
    pub fn validate(&self) -> Result<()> {
        check_threshold(self.threshold, "tilt.threshold")?;
        check_weight(self.weight, "tilt.weight")?;
        check(self.max_touch_distance >= 0.0, "tilt.max_touch_distance", "must be >= 0")?;
        check(self.max_touch_divergence >= 0.0, "tilt.max_touch_divergence", "must be >= 0")
    }
}

/// Tuning for the recognizers a navigator installs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub primary_drag: DragConfig,
    pub secondary_drag: DragConfig,
    pub pan: PanConfig,
    pub pinch: PinchConfig,
    pub rotation: RotationConfig,
    pub tilt: TiltConfig,
    pub tap: TapConfig,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            primary_drag: DragConfig::default(),
            secondary_drag: DragConfig::secondary(),
            pan: PanConfig::default(),
            pinch: PinchConfig::default(),
            rotation: RotationConfig::default(),
            tilt: TiltConfig::default(),
            tap: TapConfig::default(),
        }
    }
}

impl RecognizerConfig {
    pub fn validate(&self) -> Result<()> {
        self.primary_drag.validate()?;
        self.secondary_drag.validate()?;
        self.pan.validate()?;
        self.pinch.validate()?;
        self.rotation.validate()?;
        self.tilt.validate()?;
        self.tap.validate()
    }
}

use foundation::math::Position;
use gesture::RecognizerConfig;
use serde::{Deserialize, Serialize};

use crate::error::{NavigatorError, Result};

/// Initial camera and tuning for a [`LookAtNavigator`](crate::LookAtNavigator).
///
/// Angles are degrees, distances meters. Missing JSON fields fall back to the
/// defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Distance from the eye to the look-at point.
    pub range: f64,
    pub heading: f64,
    pub tilt: f64,
    pub roll: f64,
    pub near_distance: f64,
    pub far_distance: f64,
    /// Cap range and force a top-down view on 2D globes.
    pub enable_2d_limits: bool,
    pub recognizers: RecognizerConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            latitude: 30.0,
            longitude: -110.0,
            altitude: 0.0,
            range: 10e6,
            heading: 0.0,
            tilt: 0.0,
            roll: 0.0,
            near_distance: 1.0,
            far_distance: 1e9,
            enable_2d_limits: true,
            recognizers: RecognizerConfig::default(),
        }
    }
}

impl NavigatorConfig {
    pub fn look_at(&self) -> Position {
        Position::new(self.latitude, self.longitude, self.altitude)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &'static str, reason: &str| {
            Err(NavigatorError::InvalidConfig {
                field,
                reason: reason.to_string(),
            })
        };
        let finite = [
            self.latitude,
            self.longitude,
            self.altitude,
            self.range,
            self.heading,
            self.tilt,
            self.roll,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return invalid("camera", "all camera values must be finite");
        }
        if self.range <= 0.0 {
            return invalid("range", "must be positive");
        }
        if self.near_distance <= 0.0 {
            return invalid("near_distance", "must be positive");
        }
        if self.far_distance <= self.near_distance {
            return invalid("far_distance", "must exceed near_distance");
        }
        self.recognizers.validate()?;
        Ok(())
    }
}

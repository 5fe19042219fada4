use foundation::math::{clamp_latitude, normalize_degrees, normalize_longitude, perspective_near_width};

use tracing::trace;

use crate::globe::Globe;
use crate::view::ViewingParameters;

/// Closest the eye may get to the look-at point, in meters.
pub const MIN_RANGE: f64 = 1.0;

/// Range at which the full width of a 2D map fills the near clip plane.
pub fn max_range_2d(globe: &dyn Globe, near_distance: f64) -> f64 {
    let map_width = 2.0 * std::f64::consts::PI * globe.equatorial_radius();
    map_width * near_distance / perspective_near_width(near_distance)
}

/// Brings camera parameters back into their valid ranges. Idempotent.
pub fn apply_limits(params: &mut ViewingParameters, globe: &dyn Globe, near_distance: f64, enable_2d_limits: bool) {
    params.look_at.latitude = clamp_latitude(params.look_at.latitude);
    params.look_at.longitude = normalize_longitude(params.look_at.longitude);

    params.range = params.range.clamp(MIN_RANGE, f64::MAX);
    if globe.is_2d() && enable_2d_limits {
        let max_range = max_range_2d(globe, near_distance);
        if params.range > max_range {
            trace!(range = params.range, max_range, "range capped for 2D map");
            params.range = max_range;
        }
    }

    params.heading = normalize_degrees(params.heading);
    params.tilt = params.tilt.clamp(0.0, 90.0);
    params.roll = normalize_degrees(params.roll);

    if globe.is_2d() && enable_2d_limits {
        params.tilt = 0.0;
    }
}

/// Wraps an angle in degrees into `[-180, 180)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if (-180.0..180.0).contains(&degrees) {
        return degrees;
    }
    // rem_euclid of a tiny negative rounds up to exactly 360.
    let wrapped = (degrees + 180.0).rem_euclid(360.0);
    if wrapped >= 360.0 { -180.0 } else { wrapped - 180.0 }
}

/// Wraps a longitude in degrees into `[-180, 180)`.
pub fn normalize_longitude(degrees: f64) -> f64 {
    normalize_degrees(degrees)
}

/// Clamps a latitude in degrees into `[-90, 90]`.
pub fn clamp_latitude(degrees: f64) -> f64 {
    degrees.clamp(-90.0, 90.0)
}

use foundation::math::{Ellipsoid, EnuFrame, Position, Ray, Vec3, WGS84_A, WGS84_B};

/// Surface model the navigator moves over.
pub trait Globe {
    fn equatorial_radius(&self) -> f64;

    fn polar_radius(&self) -> f64;

    /// Flat projections report true; range and tilt limits differ for them.
    fn is_2d(&self) -> bool;

    fn point_from_position(&self, position: Position) -> Vec3;

    fn position_from_point(&self, point: Vec3) -> Position;

    /// East-north-up frame at `position`.
    fn local_frame(&self, position: Position) -> EnuFrame;

    /// Nearest surface point along `ray`, if the ray hits the globe.
    fn intersect(&self, ray: &Ray) -> Option<Vec3>;

    fn max_radius(&self) -> f64 {
        self.equatorial_radius().max(self.polar_radius())
    }
}

/// Ellipsoidal 3D globe, WGS84 by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidGlobe {
    ellipsoid: Ellipsoid,
}

impl Default for EllipsoidGlobe {
    fn default() -> Self {
        Self::new(Ellipsoid::WGS84)
    }
}

impl EllipsoidGlobe {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}

impl Globe for EllipsoidGlobe {
    fn equatorial_radius(&self) -> f64 {
        self.ellipsoid.equatorial_radius()
    }

    fn polar_radius(&self) -> f64 {
        self.ellipsoid.polar_radius()
    }

    fn is_2d(&self) -> bool {
        false
    }

    fn point_from_position(&self, position: Position) -> Vec3 {
        self.ellipsoid.geodetic_to_cartesian(position.to_geodetic())
    }

    fn position_from_point(&self, point: Vec3) -> Position {
        Position::from_geodetic(self.ellipsoid.cartesian_to_geodetic(point))
    }

    fn local_frame(&self, position: Position) -> EnuFrame {
        EnuFrame::on_ellipsoid(&self.ellipsoid, position.to_geodetic())
    }

    fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        ray.intersect_ellipsoid(&self.ellipsoid)
    }
}

/// Equirectangular map on the `z = 0` plane.
///
/// X grows east and Y grows north, both in meters along the equator, so the
/// map spans `2 * PI * equatorial_radius` east to west.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGlobe {
    equatorial_radius: f64,
    polar_radius: f64,
}

impl Default for FlatGlobe {
    fn default() -> Self {
        Self::new(WGS84_A, WGS84_B)
    }
}

impl FlatGlobe {
    pub fn new(equatorial_radius: f64, polar_radius: f64) -> Self {
        Self {
            equatorial_radius,
            polar_radius,
        }
    }
}

impl Globe for FlatGlobe {
    fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    fn polar_radius(&self) -> f64 {
        self.polar_radius
    }

    fn is_2d(&self) -> bool {
        true
    }

    fn point_from_position(&self, position: Position) -> Vec3 {
        Vec3::new(
            self.equatorial_radius * position.longitude.to_radians(),
            self.equatorial_radius * position.latitude.to_radians(),
            position.altitude,
        )
    }

    fn position_from_point(&self, point: Vec3) -> Position {
        Position::new(
            (point.y / self.equatorial_radius).to_degrees(),
            (point.x / self.equatorial_radius).to_degrees(),
            point.z,
        )
    }

    fn local_frame(&self, position: Position) -> EnuFrame {
        EnuFrame::axis_aligned(self.point_from_position(position))
    }

    fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        ray.intersect_z_plane(0.0)
    }
}

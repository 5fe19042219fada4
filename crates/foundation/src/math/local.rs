use super::{Ellipsoid, Geodetic, Mat4, Vec3};

/// Local East-North-Up coordinates (meters).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl Enu {
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }
}

/// Orthonormal East-North-Up basis anchored at a Cartesian origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EnuFrame {
    pub origin: Vec3,
    pub east: Vec3,
    pub north: Vec3,
    pub up: Vec3,
}

impl EnuFrame {
    /// Frame on `ellipsoid` at `origin`. The up axis is the geodetic normal.
    pub fn on_ellipsoid(ellipsoid: &Ellipsoid, origin: Geodetic) -> Self {
        let sin_lat = origin.lat_rad.sin();
        let cos_lat = origin.lat_rad.cos();
        let sin_lon = origin.lon_rad.sin();
        let cos_lon = origin.lon_rad.cos();

        Self {
            origin: ellipsoid.geodetic_to_cartesian(origin),
            east: Vec3::new(-sin_lon, cos_lon, 0.0),
            north: Vec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat),
            up: Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat),
        }
    }

    /// Axis-aligned frame: east +X, north +Y, up +Z.
    pub fn axis_aligned(origin: Vec3) -> Self {
        Self {
            origin,
            east: Vec3::new(1.0, 0.0, 0.0),
            north: Vec3::new(0.0, 1.0, 0.0),
            up: Vec3::new(0.0, 0.0, 1.0),
        }
    }

    pub fn to_local(&self, point: Vec3) -> Enu {
        let d = point - self.origin;
        Enu::new(d.dot(self.east), d.dot(self.north), d.dot(self.up))
    }

    pub fn to_world(&self, enu: Enu) -> Vec3 {
        self.origin + self.east * enu.east + self.north * enu.north + self.up * enu.up
    }

    /// Matrix mapping local coordinates to world coordinates.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_basis(self.east, self.north, self.up, self.origin)
    }
}

pub fn ecef_to_enu(point: Vec3, origin: Geodetic) -> Enu {
    EnuFrame::on_ellipsoid(&Ellipsoid::WGS84, origin).to_local(point)
}

pub fn enu_to_ecef(enu: Enu, origin: Geodetic) -> Vec3 {
    EnuFrame::on_ellipsoid(&Ellipsoid::WGS84, origin).to_world(enu)
}

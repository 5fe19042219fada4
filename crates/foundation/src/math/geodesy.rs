use super::Vec3;

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Geodetic coordinates in radians and meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geodetic {
    pub lat_rad: f64,
    pub lon_rad: f64,
    pub alt_m: f64,
}

impl Geodetic {
    pub fn new(lat_rad: f64, lon_rad: f64, alt_m: f64) -> Self {
        Self {
            lat_rad,
            lon_rad,
            alt_m,
        }
    }
}

/// Geographic position in degrees and meters, as used by camera state.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    pub fn to_geodetic(self) -> Geodetic {
        Geodetic::new(
            self.latitude.to_radians(),
            self.longitude.to_radians(),
            self.altitude,
        )
    }

    pub fn from_geodetic(geo: Geodetic) -> Self {
        Self::new(geo.lat_rad.to_degrees(), geo.lon_rad.to_degrees(), geo.alt_m)
    }
}

/// Oblate ellipsoid of revolution about the Z axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipsoid {
    equatorial_radius: f64,
    polar_radius: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        equatorial_radius: WGS84_A,
        polar_radius: WGS84_B,
    };

    pub fn new(equatorial_radius: f64, polar_radius: f64) -> Self {
        Self {
            equatorial_radius,
            polar_radius,
        }
    }

    pub fn sphere(radius: f64) -> Self {
        Self::new(radius, radius)
    }

    pub fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    pub fn polar_radius(&self) -> f64 {
        self.polar_radius
    }

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        let a = self.equatorial_radius;
        let b = self.polar_radius;
        (a * a - b * b) / (a * a)
    }

    /// Second eccentricity squared.
    pub fn ep2(&self) -> f64 {
        let a = self.equatorial_radius;
        let b = self.polar_radius;
        (a * a - b * b) / (b * b)
    }

    pub fn geodetic_to_cartesian(&self, geo: Geodetic) -> Vec3 {
        let sin_lat = geo.lat_rad.sin();
        let cos_lat = geo.lat_rad.cos();
        let sin_lon = geo.lon_rad.sin();
        let cos_lon = geo.lon_rad.cos();
        let e2 = self.e2();

        let n = self.equatorial_radius / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let x = (n + geo.alt_m) * cos_lat * cos_lon;
        let y = (n + geo.alt_m) * cos_lat * sin_lon;
        let z = (n * (1.0 - e2) + geo.alt_m) * sin_lat;

        Vec3::new(x, y, z)
    }

    pub fn cartesian_to_geodetic(&self, point: Vec3) -> Geodetic {
        let a = self.equatorial_radius;
        let b = self.polar_radius;
        let e2 = self.e2();
        let p = point.x.hypot(point.y);
        let lon = point.y.atan2(point.x);

        let theta = (point.z * a).atan2(p * b);
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        let lat = (point.z + self.ep2() * b * sin_theta * sin_theta * sin_theta)
            .atan2(p - e2 * a * cos_theta * cos_theta * cos_theta);

        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        // Near the poles p / cos(lat) degenerates; measure along Z instead.
        let alt = if cos_lat.abs() > 1e-10 {
            p / cos_lat - n
        } else {
            point.z.abs() - b
        };

        Geodetic::new(lat, lon, alt)
    }

    /// Outward surface normal at `geo`.
    pub fn surface_normal(&self, geo: Geodetic) -> Vec3 {
        let cos_lat = geo.lat_rad.cos();
        Vec3::new(
            cos_lat * geo.lon_rad.cos(),
            cos_lat * geo.lon_rad.sin(),
            geo.lat_rad.sin(),
        )
    }
}

pub fn geodetic_to_ecef(geo: Geodetic) -> Vec3 {
    Ellipsoid::WGS84.geodetic_to_cartesian(geo)
}

pub fn ecef_to_geodetic(ecef: Vec3) -> Geodetic {
    Ellipsoid::WGS84.cartesian_to_geodetic(ecef)
}

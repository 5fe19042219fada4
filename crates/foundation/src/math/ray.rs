use super::{Ellipsoid, Vec3};

/// Half-line with a unit-length direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Returns `None` when `dir` has no length.
    pub fn new(origin: Vec3, dir: Vec3) -> Option<Self> {
        dir.normalized().map(|dir| Self { origin, dir })
    }

    pub fn point_at(&self, t: f64) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Nearest intersection in front of the origin with an ellipsoid centered
    /// at the world origin.
    pub fn intersect_ellipsoid(&self, ellipsoid: &Ellipsoid) -> Option<Vec3> {
        // Stretch Z so the ellipsoid becomes a sphere of the equatorial radius.
        let r = ellipsoid.equatorial_radius();
        let k = r / ellipsoid.polar_radius();
        let o = Vec3::new(self.origin.x, self.origin.y, self.origin.z * k);
        let d = Vec3::new(self.dir.x, self.dir.y, self.dir.z * k);

        let a = d.dot(d);
        let b = 2.0 * o.dot(d);
        let c = o.dot(o) - r * r;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 || a == 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let t0 = (-b - sq) / (2.0 * a);
        let t1 = (-b + sq) / (2.0 * a);
        let t = if t0 > 0.0 {
            t0
        } else if t1 > 0.0 {
            t1
        } else {
            return None;
        };
        Some(self.point_at(t))
    }

    /// Intersection with the plane `z = height`, if it lies ahead.
    pub fn intersect_z_plane(&self, height: f64) -> Option<Vec3> {
        if self.dir.z.abs() < 1e-15 {
            return None;
        }
        let t = (height - self.origin.z) / self.dir.z;
        (t > 0.0).then(|| self.point_at(t))
    }
}

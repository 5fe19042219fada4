use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Screen-space point or offset in CSS pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn copy_from(&mut self, other: Vec2) {
        *self = other;
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(self, other: Vec2) -> f64 {
        (self - other).magnitude()
    }

    /// Linear blend: `self * (1 - weight) + target * weight`.
    pub fn lerp(self, target: Vec2, weight: f64) -> Self {
        self * (1.0 - weight) + target * weight
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, s: f64) -> Self::Output {
        Self::new(self.x * s, self.y * s)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, s: f64) -> Self::Output {
        Self::new(self.x / s, self.y / s)
    }
}

/// Cartesian point or direction in meters.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(self / len)
        } else {
            None
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, s: f64) -> Self::Output {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, s: f64) -> Self::Output {
        Self::new(self.x / s, self.y / s, self.z / s)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::{Vec2, Vec3};

    #[test]
    fn vec2_add_sub() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-0.5, 4.0);
        assert_eq!(a + b, Vec2::new(0.5, 6.0));
        assert_eq!(a - b, Vec2::new(1.5, -2.0));
    }

    #[test]
    fn vec2_in_place_ops() {
        let mut v = Vec2::ZERO;
        v.set(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
        v += Vec2::new(1.0, 1.0);
        v -= Vec2::new(4.0, 5.0);
        assert_eq!(v, Vec2::ZERO);
        v.copy_from(Vec2::new(6.0, 8.0));
        assert_eq!(v.distance_to(Vec2::ZERO), 10.0);
    }

    #[test]
    fn vec2_lerp_weights_target() {
        let v = Vec2::ZERO.lerp(Vec2::new(10.0, 0.0), 0.3);
        assert!((v.x - 3.0).abs() < 1e-12);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn vec3_add_sub_dot() {
        let a = Vec3::new(1.0, 2.0, -1.0);
        let b = Vec3::new(0.5, -2.0, 3.0);
        assert_eq!(a + b, Vec3::new(1.5, 0.0, 2.0));
        assert_eq!(a - b, Vec3::new(0.5, 4.0, -4.0));
        assert_eq!(a.dot(b), -6.5);
    }

    #[test]
    fn vec3_cross_and_normalize() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(Vec3::new(0.0, 3.0, 4.0).normalized(), Some(Vec3::new(0.0, 0.6, 0.8)));
        assert_eq!(Vec3::ZERO.normalized(), None);
    }
}

use super::Mat4;
use crate::viewport::Viewport;

/// Horizontal field of view of the perspective camera, in degrees.
pub const FIELD_OF_VIEW_DEG: f64 = 45.0;

/// Size of the frustum cross-section at a given distance from the eye.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrustumRectangle {
    pub width: f64,
    pub height: f64,
}

fn half_fov_tan() -> f64 {
    (FIELD_OF_VIEW_DEG / 2.0).to_radians().tan()
}

/// Frustum cross-section `distance` meters in front of the eye. The width
/// follows the horizontal field of view; the height keeps the viewport aspect.
pub fn perspective_frustum_rectangle(viewport: &Viewport, distance: f64) -> FrustumRectangle {
    let width = 2.0 * distance * half_fov_tan();
    let height = width * viewport.height / viewport.width;
    FrustumRectangle { width, height }
}

/// Meters covered by one screen pixel at `distance` from the eye.
pub fn perspective_pixel_size(viewport: &Viewport, distance: f64) -> f64 {
    perspective_frustum_rectangle(viewport, distance).height / viewport.height
}

/// Width of the near clip plane.
pub fn perspective_near_width(near_distance: f64) -> f64 {
    2.0 * near_distance * half_fov_tan()
}

/// OpenGL-style perspective projection for the fixed field of view.
pub fn perspective_projection(viewport: &Viewport, near: f64, far: f64) -> Mat4 {
    let tan = half_fov_tan();
    let right = near * tan;
    let top = right * viewport.height / viewport.width;
    Mat4::from_rows([
        near / right, 0.0, 0.0, 0.0, //
        0.0, near / top, 0.0, 0.0, //
        0.0, 0.0, -(far + near) / (far - near), -2.0 * far * near / (far - near), //
        0.0, 0.0, -1.0, 0.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::{perspective_frustum_rectangle, perspective_near_width, perspective_pixel_size};
    use crate::viewport::Viewport;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn frustum_keeps_viewport_aspect() {
        let vp = Viewport::with_size(800.0, 400.0);
        let rect = perspective_frustum_rectangle(&vp, 1000.0);
        assert_close(rect.width, 2000.0 * 22.5_f64.to_radians().tan(), 1e-9);
        assert_close(rect.height, rect.width / 2.0, 1e-9);
    }

    #[test]
    fn pixel_size_scales_with_distance() {
        let vp = Viewport::with_size(800.0, 400.0);
        let near = perspective_pixel_size(&vp, 10.0);
        let far = perspective_pixel_size(&vp, 1000.0);
        assert_close(far / near, 100.0, 1e-9);
        assert_close(near, perspective_frustum_rectangle(&vp, 10.0).width / 800.0, 1e-12);
    }

    #[test]
    fn near_width_matches_frustum() {
        let vp = Viewport::with_size(100.0, 100.0);
        assert_close(perspective_near_width(2.0), perspective_frustum_rectangle(&vp, 2.0).width, 1e-12);
    }
}

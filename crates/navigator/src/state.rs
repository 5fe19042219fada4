use foundation::Viewport;
use foundation::math::{FIELD_OF_VIEW_DEG, Mat4, Ray, Vec2, Vec3, perspective_pixel_size, perspective_projection};

use crate::globe::Globe;
use crate::view::{ViewingParameters, look_at_modelview};

/// Immutable snapshot of everything needed to draw or pick one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigatorState {
    params: ViewingParameters,
    modelview: Mat4,
    projection: Mat4,
    viewport: Viewport,
    eye_point: Vec3,
    near_distance: f64,
    far_distance: f64,
}

impl NavigatorState {
    pub fn new(
        globe: &dyn Globe,
        params: ViewingParameters,
        viewport: Viewport,
        near_distance: f64,
        far_distance: f64,
    ) -> Self {
        let modelview = look_at_modelview(globe, &params);
        Self {
            params,
            modelview,
            projection: perspective_projection(&viewport, near_distance, far_distance),
            viewport,
            eye_point: modelview.extract_eye_point(),
            near_distance,
            far_distance,
        }
    }

    pub fn params(&self) -> &ViewingParameters {
        &self.params
    }

    pub fn modelview(&self) -> &Mat4 {
        &self.modelview
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn eye_point(&self) -> Vec3 {
        self.eye_point
    }

    pub fn near_distance(&self) -> f64 {
        self.near_distance
    }

    pub fn far_distance(&self) -> f64 {
        self.far_distance
    }

    /// Meters per pixel at `distance` from the eye.
    pub fn pixel_size_at(&self, distance: f64) -> f64 {
        perspective_pixel_size(&self.viewport, distance)
    }

    /// World-space ray from the eye through a point in window coordinates.
    pub fn ray_through_screen_point(&self, point: Vec2) -> Option<Ray> {
        let vp = &self.viewport;
        if !vp.is_valid() {
            return None;
        }
        let tan = (FIELD_OF_VIEW_DEG / 2.0).to_radians().tan();
        let nx = 2.0 * (point.x - vp.x) / vp.width - 1.0;
        let ny = 1.0 - 2.0 * (point.y - vp.y) / vp.height;
        let eye_dir = Vec3::new(nx * tan, ny * tan / vp.aspect(), -1.0);
        Ray::new(self.eye_point, self.modelview.transpose_transform_vector(eye_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::NavigatorState;
    use crate::globe::{FlatGlobe, Globe};
    use crate::view::ViewingParameters;
    use foundation::Viewport;
    use foundation::math::{Position, Vec2};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn top_down(range: f64) -> NavigatorState {
        NavigatorState::new(
            &FlatGlobe::default(),
            ViewingParameters {
                look_at: Position::new(0.0, 0.0, 0.0),
                range,
                heading: 0.0,
                tilt: 0.0,
                roll: 0.0,
            },
            Viewport::with_size(800.0, 600.0),
            1.0,
            1e9,
        )
    }

    #[test]
    fn center_ray_hits_look_at() {
        let state = top_down(1000.0);
        let ray = state.ray_through_screen_point(Vec2::new(400.0, 300.0)).unwrap();
        let hit = FlatGlobe::default().intersect(&ray).unwrap();
        assert_close(hit.x, 0.0, 1e-9);
        assert_close(hit.y, 0.0, 1e-9);
    }

    #[test]
    fn screen_edges_match_pixel_size() {
        let state = top_down(1000.0);
        let globe = FlatGlobe::default();
        let right = globe
            .intersect(&state.ray_through_screen_point(Vec2::new(800.0, 300.0)).unwrap())
            .unwrap();
        assert_close(right.x, 400.0 * state.pixel_size_at(1000.0), 1e-6);

        // Screen y grows downward, map y grows north.
        let top = globe
            .intersect(&state.ray_through_screen_point(Vec2::new(400.0, 0.0)).unwrap())
            .unwrap();
        assert_close(top.y, 300.0 * state.pixel_size_at(1000.0), 1e-6);
    }

    #[test]
    fn invalid_viewport_has_no_rays() {
        let mut state = top_down(1000.0);
        state.viewport = foundation::Viewport::with_size(0.0, 0.0);
        assert!(state.ray_through_screen_point(Vec2::new(0.0, 0.0)).is_none());
    }
}

use foundation::math::{Mat4, Position, Vec3, normalize_degrees};

use crate::globe::Globe;

/// Camera orbiting a point on the globe.
///
/// `heading` is clockwise from north and `tilt` is measured from straight
/// down, both in degrees. `roll` spins the view about the line of sight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingParameters {
    pub look_at: Position,
    pub range: f64,
    pub heading: f64,
    pub tilt: f64,
    pub roll: f64,
}

/// Modelview matrix for a look-at camera.
///
/// The eye sits `range` meters from the look-at point and looks down eye-space
/// -Z with +Y up. World to eye is
/// `T(0, 0, -range) * Rz(roll) * Rx(-tilt) * Rz(heading) * local⁻¹`.
pub fn look_at_modelview(globe: &dyn Globe, params: &ViewingParameters) -> Mat4 {
    let local = globe.local_frame(params.look_at).to_matrix();
    Mat4::translation(0.0, 0.0, -params.range)
        * Mat4::rotation_z(params.roll)
        * Mat4::rotation_x(-params.tilt)
        * Mat4::rotation_z(params.heading)
        * local.rigid_inverse()
}

/// Recovers look-at parameters from a modelview matrix.
///
/// `origin` is the world point the camera orbits. Roll cannot be separated
/// from heading when looking straight down, so the caller supplies it.
pub fn extract_viewing_parameters(globe: &dyn Globe, modelview: &Mat4, origin: Vec3, roll: f64) -> ViewingParameters {
    let look_at = globe.position_from_point(origin);
    let local = globe.local_frame(look_at).to_matrix();
    // Strip the roll so only T(0, 0, -range) * Rx(-tilt) * Rz(heading) remains.
    let m = Mat4::rotation_z(-roll) * *modelview * local;

    let heading = (-m.at(0, 1)).atan2(m.at(0, 0)).to_degrees();
    let tilt = m.at(1, 2).atan2(m.at(2, 2)).to_degrees();
    let range = m.translation_part().length();

    ViewingParameters {
        look_at,
        range,
        heading: normalize_degrees(heading),
        tilt,
        roll,
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewingParameters, extract_viewing_parameters, look_at_modelview};
    use crate::globe::{EllipsoidGlobe, FlatGlobe, Globe};
    use foundation::math::{Position, Vec3};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn round_trip(globe: &dyn Globe, params: ViewingParameters) {
        let mv = look_at_modelview(globe, &params);
        let origin = globe.point_from_position(params.look_at);
        let back = extract_viewing_parameters(globe, &mv, origin, params.roll);
        assert_close(back.look_at.latitude, params.look_at.latitude, 1e-9);
        assert_close(back.look_at.longitude, params.look_at.longitude, 1e-9);
        assert_close(back.range, params.range, 1e-6);
        assert_close(back.heading, params.heading, 1e-9);
        assert_close(back.tilt, params.tilt, 1e-9);
        assert_close(back.roll, params.roll, 0.0);
    }

    #[test]
    fn ellipsoid_round_trip() {
        let globe = EllipsoidGlobe::default();
        for (lat, lon, range, heading, tilt, roll) in [
            (30.0, -110.0, 10e6, 0.0, 0.0, 0.0),
            (-12.5, 45.0, 25_000.0, 35.0, 60.0, 0.0),
            (60.0, 170.0, 1_000.0, -120.0, 89.0, 15.0),
        ] {
            round_trip(
                &globe,
                ViewingParameters {
                    look_at: Position::new(lat, lon, 0.0),
                    range,
                    heading,
                    tilt,
                    roll,
                },
            );
        }
    }

    #[test]
    fn flat_round_trip() {
        let globe = FlatGlobe::default();
        round_trip(
            &globe,
            ViewingParameters {
                look_at: Position::new(10.0, 20.0, 0.0),
                range: 5e5,
                heading: 45.0,
                tilt: 30.0,
                roll: 0.0,
            },
        );
    }

    #[test]
    fn eye_sits_above_look_at_when_untilted() {
        let globe = FlatGlobe::default();
        let params = ViewingParameters {
            look_at: Position::new(0.0, 0.0, 0.0),
            range: 1000.0,
            heading: 0.0,
            tilt: 0.0,
            roll: 0.0,
        };
        let mv = look_at_modelview(&globe, &params);
        let eye = mv.extract_eye_point();
        assert_close(eye.distance_to(Vec3::new(0.0, 0.0, 1000.0)), 0.0, 1e-9);
        let fwd = mv.extract_forward_vector();
        assert_close(fwd.z, -1.0, 1e-12);
    }

    #[test]
    fn heading_puts_east_at_top_of_screen() {
        let globe = FlatGlobe::default();
        let params = ViewingParameters {
            look_at: Position::new(0.0, 0.0, 0.0),
            range: 1000.0,
            heading: 90.0,
            tilt: 0.0,
            roll: 0.0,
        };
        let mv = look_at_modelview(&globe, &params);
        let east = mv.transform_point(Vec3::new(100.0, 0.0, 0.0));
        assert_close(east.x, 0.0, 1e-9);
        assert!(east.y > 99.0);
    }
}

use glam::{Mat4, Vec3};

/// Position on the circle of `radius` in the X-Z plane at angle `t` (radians).
///
/// Pure function of its inputs: `(r·cos t, 0, r·sin t)`.
#[inline]
pub fn orbit_position(t: f64, radius: f32) -> Vec3 {
    let (sin, cos) = t.sin_cos();
    Vec3::new(radius * cos as f32, 0.0, radius * sin as f32)
}

/// Camera that circles `target` at a fixed radius.
///
/// With the default `angular_speed` of 1 rad/s the angle equals elapsed seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitCamera {
    pub radius: f32,
    pub angular_speed: f32,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: 2.5,
            angular_speed: 1.0,
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl OrbitCamera {
    /// Eye position after `elapsed` seconds.
    pub fn position(&self, elapsed: f64) -> Vec3 {
        self.target + orbit_position(elapsed * self.angular_speed as f64, self.radius)
    }

    /// View matrix after `elapsed` seconds.
    pub fn view(&self, elapsed: f64) -> Mat4 {
        Mat4::look_at_rh(self.position(elapsed), self.target, self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn position_stays_on_circle() {
        let mut t = -50.0;
        while t < 50.0 {
            let p = orbit_position(t, 2.5);
            assert!((p.x * p.x + p.z * p.z - 6.25).abs() < EPS, "t = {t}: {p:?}");
            assert_eq!(p.y, 0.0);
            t += 0.173;
        }
    }

    #[test]
    fn position_at_known_angles() {
        let p = orbit_position(0.0, 2.5);
        assert!((p - Vec3::new(2.5, 0.0, 0.0)).length() < EPS);

        let p = orbit_position(std::f64::consts::FRAC_PI_2, 2.5);
        assert!((p - Vec3::new(0.0, 0.0, 2.5)).length() < EPS);
    }

    #[test]
    fn position_is_stateless() {
        let cam = OrbitCamera::default();
        assert_eq!(cam.position(12.34), cam.position(12.34));
    }

    #[test]
    fn view_maps_target_onto_negative_z_axis() {
        let cam = OrbitCamera::default();
        for t in [0.0, 0.7, 2.0, 4.5] {
            let v = cam.view(t).transform_point3(Vec3::ZERO);
            assert!(v.x.abs() < EPS && v.y.abs() < EPS, "t = {t}: {v:?}");
            assert!((v.z + 2.5).abs() < EPS, "t = {t}: {v:?}");
        }
    }

    #[test]
    fn view_maps_eye_to_origin() {
        let cam = OrbitCamera::default();
        let eye = cam.position(1.3);
        assert!(cam.view(1.3).transform_point3(eye).length() < EPS);
    }
}

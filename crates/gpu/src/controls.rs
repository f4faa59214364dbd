//! Orbit camera controls with damping, zoom, pan and auto-rotation.
//!
//! The camera orbits its target on a sphere (z-up). Input accumulates into
//! pending deltas; each [`OrbitControls::update`] applies a damped share of
//! them and decays the rest, so motion eases out over several frames.

use std::f64::consts::PI;

use foundation::math::Vec3;

use crate::camera::Camera3D;

/// Keeps the polar angle off the poles, where azimuth is undefined.
const POLE_EPS: f64 = 1e-6;

/// Motion below this is treated as "camera did not move".
const MOVE_EPS: f64 = 1e-9;

/// Damping factors are defined per frame at this rate.
const REFERENCE_FPS: f64 = 60.0;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Spherical {
    radius: f64,
    /// Azimuth around +z, from +x.
    theta: f64,
    /// Angle from +z.
    phi: f64,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius <= MOVE_EPS {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.y.atan2(offset.x),
            phi: (offset.z / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * cos_theta,
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub enabled: bool,
    pub enable_damping: bool,
    /// Share of pending motion applied per reference frame.
    pub damping_factor: f64,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub auto_rotate: bool,
    /// 2.0 is one orbit every 30 seconds.
    pub auto_rotate_speed: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_polar: f64,
    pub max_polar: f64,

    delta_theta: f64,
    delta_phi: f64,
    scale: f64,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_damping: true,
            damping_factor: 0.05,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            min_distance: 0.5,
            max_distance: 500.0,
            min_polar: 0.0,
            max_polar: PI,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orbit around the target, counter-clockwise seen from above.
    pub fn rotate_left(&mut self, angle: f64) {
        if self.enable_rotate {
            self.delta_theta -= angle;
        }
    }

    /// Tilt toward the top of the orbit.
    pub fn rotate_up(&mut self, angle: f64) {
        if self.enable_rotate {
            self.delta_phi -= angle;
        }
    }

    /// Move closer by `factor` (> 1 zooms in).
    pub fn dolly_in(&mut self, factor: f64) {
        if self.enable_zoom && factor > 0.0 {
            self.scale /= factor;
        }
    }

    pub fn dolly_out(&mut self, factor: f64) {
        if self.enable_zoom && factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Shift camera and target in the view plane, in world units.
    pub fn pan(&mut self, camera: &Camera3D, right: f64, up: f64) {
        if !self.enable_pan {
            return;
        }
        let forward = (camera.target - camera.position).normalize_or(-Vec3::UP);
        let right_axis = forward
            .cross(camera.up)
            .normalize_or(Vec3::new(1.0, 0.0, 0.0));
        let up_axis = right_axis.cross(forward);
        self.pan_offset += right_axis.scale(right) + up_axis.scale(up);
    }

    /// Drop pending motion after the camera was placed externally.
    pub fn sync(&mut self, _camera: &Camera3D) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;
    }

    pub fn has_pending_motion(&self) -> bool {
        self.delta_theta.abs() > MOVE_EPS
            || self.delta_phi.abs() > MOVE_EPS
            || (self.scale - 1.0).abs() > MOVE_EPS
            || self.pan_offset.length() > MOVE_EPS
    }

    fn auto_rotate_angle(&self, dt_s: f64) -> f64 {
        2.0 * PI / 60.0 * self.auto_rotate_speed * dt_s
    }

    /// Advance by `dt_s` seconds. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera3D, dt_s: f64) -> bool {
        if !self.enabled {
            return false;
        }
        let dt_s = dt_s.max(0.0);
        if self.auto_rotate && self.enable_rotate {
            self.delta_theta -= self.auto_rotate_angle(dt_s);
        }

        let share = if self.enable_damping {
            1.0 - (1.0 - self.damping_factor.clamp(0.0, 1.0)).powf(dt_s * REFERENCE_FPS)
        } else {
            1.0
        };

        let mut s = Spherical::from_offset(camera.offset());
        s.theta += self.delta_theta * share;
        s.phi = (s.phi + self.delta_phi * share)
            .clamp(self.min_polar, self.max_polar)
            .clamp(POLE_EPS, PI - POLE_EPS);
        s.radius = (s.radius * self.scale).clamp(self.min_distance, self.max_distance);

        let target = camera.target + self.pan_offset.scale(share);
        let position = target + s.to_offset();

        let keep = 1.0 - share;
        self.delta_theta *= keep;
        self.delta_phi *= keep;
        self.pan_offset = self.pan_offset.scale(keep);
        self.scale = 1.0;

        let moved = (position - camera.position).length() > MOVE_EPS
            || (target - camera.target).length() > MOVE_EPS;
        camera.place(position, target);
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::OrbitControls;
    use crate::camera::Camera3D;
    use foundation::math::Vec3;
    use std::f64::consts::PI;

    const DT: f64 = 1.0 / 60.0;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn azimuth(camera: &Camera3D) -> f64 {
        let o = camera.offset();
        o.y.atan2(o.x)
    }

    #[test]
    fn idle_controls_leave_camera_alone() {
        let mut controls = OrbitControls::new();
        let mut camera = Camera3D::default();
        let before = camera;
        assert!(!controls.update(&mut camera, DT));
        assert_close(camera.position.x, before.position.x, 1e-9);
        assert_close(camera.position.y, before.position.y, 1e-9);
        assert_close(camera.position.z, before.position.z, 1e-9);
    }

    #[test]
    fn damping_applies_a_share_per_frame() {
        let mut controls = OrbitControls::new();
        let mut camera = Camera3D::default();
        let start = azimuth(&camera);
        let distance = camera.distance();

        controls.rotate_left(0.5);
        assert!(controls.update(&mut camera, DT));
        assert_close(azimuth(&camera), start - 0.5 * 0.05, 1e-9);
        assert_close(camera.distance(), distance, 1e-9);
        assert_close(camera.position.z, 5.0, 1e-9);

        for _ in 0..600 {
            controls.update(&mut camera, DT);
        }
        assert_close(azimuth(&camera), start - 0.5, 1e-6);
        assert!(!controls.has_pending_motion());
    }

    #[test]
    fn auto_rotate_orbits_at_configured_speed() {
        let mut controls = OrbitControls {
            auto_rotate: true,
            enable_damping: false,
            ..OrbitControls::default()
        };
        let mut camera = Camera3D::default();
        let start = azimuth(&camera);

        assert!(controls.update(&mut camera, 1.0));
        assert_close(azimuth(&camera), start - 2.0 * PI / 30.0, 1e-9);
        assert_close(camera.distance(), 50f64.sqrt(), 1e-9);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn zoom_respects_toggle_and_clamps() {
        let mut controls = OrbitControls {
            enable_damping: false,
            ..OrbitControls::default()
        };
        let mut camera = Camera3D::look_at(Vec3::new(0.0, -4.0, 3.0), Vec3::ZERO);

        controls.dolly_in(2.0);
        controls.update(&mut camera, DT);
        assert_close(camera.distance(), 2.5, 1e-9);

        controls.dolly_in(100.0);
        controls.update(&mut camera, DT);
        assert_close(camera.distance(), controls.min_distance, 1e-9);

        controls.enable_zoom = false;
        controls.dolly_out(4.0);
        assert!(!controls.update(&mut camera, DT));
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let mut controls = OrbitControls {
            enable_damping: false,
            ..OrbitControls::default()
        };
        let mut camera = Camera3D::default();
        let offset = camera.offset();

        controls.pan(&camera, 1.0, 0.0);
        controls.update(&mut camera, DT);
        assert_close(camera.target.x, 1.0, 1e-9);
        assert_close(camera.target.y, 0.0, 1e-9);
        assert_close(camera.offset().y, offset.y, 1e-9);
        assert_close(camera.offset().z, offset.z, 1e-9);

        controls.enable_pan = false;
        controls.pan(&camera, 3.0, 3.0);
        assert!(!controls.has_pending_motion());
    }

    #[test]
    fn sync_discards_pending_motion() {
        let mut controls = OrbitControls::new();
        let mut camera = Camera3D::default();
        controls.rotate_left(1.0);
        controls.rotate_up(0.2);
        camera.place(Vec3::new(3.0, 0.0, 4.0), Vec3::ZERO);
        controls.sync(&camera);
        assert!(!controls.update(&mut camera, DT));
        assert_close(camera.position.x, 3.0, 1e-9);
    }

    #[test]
    fn polar_angle_stays_off_the_pole() {
        let mut controls = OrbitControls {
            enable_damping: false,
            ..OrbitControls::default()
        };
        let mut camera = Camera3D::default();
        controls.rotate_up(10.0);
        controls.update(&mut camera, DT);
        assert!(camera.offset().z < camera.distance());
        assert!(camera.view_proj(1.0).iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn disabled_controls_do_nothing() {
        let mut controls = OrbitControls {
            enabled: false,
            auto_rotate: true,
            ..OrbitControls::default()
        };
        let mut camera = Camera3D::default();
        assert!(!controls.update(&mut camera, 1.0));
        assert_eq!(camera, Camera3D::default());
    }
}

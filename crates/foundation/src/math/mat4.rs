use super::Vec3;

/// Column-major 4x4 matrix, laid out the way WGSL expects it.
pub type Mat4 = [[f32; 4]; 4];

pub const MAT4_IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub fn mat4_mul(a: Mat4, b: Mat4) -> Mat4 {
    // c = a * b
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

/// Right-handed perspective projection with a [0, 1] depth range.
pub fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

/// Right-handed view matrix.
///
/// When the view direction is parallel to `up` (e.g. looking straight down
/// onto the terrain), +y is used as the up hint instead.
pub fn mat4_look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalize_or(Vec3::new(0.0, 1.0, 0.0));
    let s = match f.cross(up).try_normalize() {
        Some(s) => s,
        None => f
            .cross(Vec3::new(0.0, 1.0, 0.0))
            .normalize_or(Vec3::new(1.0, 0.0, 0.0)),
    };
    let u = s.cross(f);

    let ex = -s.dot(eye);
    let ey = -u.dot(eye);
    let ez = f.dot(eye);

    [
        [s.x as f32, u.x as f32, (-f.x) as f32, 0.0],
        [s.y as f32, u.y as f32, (-f.y) as f32, 0.0],
        [s.z as f32, u.z as f32, (-f.z) as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

pub fn mat4_transform_point(m: Mat4, p: Vec3) -> [f32; 4] {
    let v = [p.x as f32, p.y as f32, p.z as f32, 1.0];
    let mut out = [0.0f32; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = m[0][row] * v[0] + m[1][row] * v[1] + m[2][row] * v[2] + m[3][row] * v[3];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{MAT4_IDENTITY, mat4_look_at_rh, mat4_mul, mat4_transform_point};
    use crate::math::Vec3;

    fn assert_close(a: f32, b: f32, eps: f32) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn identity_is_neutral() {
        let view = mat4_look_at_rh(Vec3::new(3.0, -4.0, 2.0), Vec3::ZERO, Vec3::UP);
        assert_eq!(mat4_mul(MAT4_IDENTITY, view), view);
        assert_eq!(mat4_mul(view, MAT4_IDENTITY), view);
    }

    #[test]
    fn look_at_puts_target_on_negative_view_axis() {
        let eye = Vec3::new(0.0, -5.0, 5.0);
        let view = mat4_look_at_rh(eye, Vec3::ZERO, Vec3::UP);
        let p = mat4_transform_point(view, Vec3::ZERO);
        assert_close(p[0], 0.0, 1e-5);
        assert_close(p[1], 0.0, 1e-5);
        assert_close(p[2], -(50.0f32).sqrt(), 1e-4);
    }

    #[test]
    fn look_at_straight_down_is_finite() {
        let view = mat4_look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);
        assert!(view.iter().flatten().all(|v| v.is_finite()));
        let p = mat4_transform_point(view, Vec3::ZERO);
        assert_close(p[2], -5.0, 1e-5);
    }
}

//! Math type re-exports and exporter-wide constants.
//!
//! All coordinates are double precision; single precision would lose
//! digits in the `%.6f` output of large scenes.

pub use glam::{DMat4, DQuat, DVec3, DVec4, EulerRot};

/// A world-space coordinate.
pub type Vertex = DVec3;

/// Degrees per radian, as used for orientation output.
pub const RAD2DEG: f64 = 57.295_779_513_082_32;

/// Frames per second used to convert keyframe times to seconds.
pub const DEFAULT_FRAME_RATE: f64 = 25.0;

/// Speed used for curve trajectories without a `speed` attribute.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Apply a world transform to a local-space point.
#[inline]
pub fn to_world(matrix: &DMat4, local: DVec3) -> Vertex {
    matrix.transform_point3(local)
}

/// Compose a world matrix from location, XYZ Euler rotation (radians) and scale.
///
/// The rotation matrix is `Rz * Ry * Rx`, so X is applied first.
pub fn compose_matrix(location: DVec3, rotation_euler: DVec3, scale: DVec3) -> DMat4 {
    let rotation = DQuat::from_euler(
        EulerRot::ZYX,
        rotation_euler.z,
        rotation_euler.y,
        rotation_euler.x,
    );
    DMat4::from_scale_rotation_translation(scale, rotation, location)
}

/// Convert XYZ Euler angles (radians) to the Z, Y, X degree triple of an
/// orientation record.
#[inline]
pub fn euler_zyx_degrees(rotation_euler: DVec3) -> DVec3 {
    DVec3::new(
        rotation_euler.z * RAD2DEG,
        rotation_euler.y * RAD2DEG,
        rotation_euler.x * RAD2DEG,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_compose_identity() {
        let m = compose_matrix(DVec3::ZERO, DVec3::ZERO, DVec3::ONE);
        assert!(m.abs_diff_eq(DMat4::IDENTITY, 1e-12));
    }

    #[test]
    fn test_compose_translation_scale() {
        let m = compose_matrix(DVec3::new(1.0, 2.0, 3.0), DVec3::ZERO, DVec3::splat(2.0));
        assert!(close(to_world(&m, DVec3::new(1.0, 1.0, 1.0)), DVec3::new(3.0, 4.0, 5.0)));
    }

    #[test]
    fn test_compose_rotation_order() {
        // 90 degrees about X, then 90 degrees about Z: +Y -> +Z -> +Z
        let half_pi = std::f64::consts::FRAC_PI_2;
        let m = compose_matrix(DVec3::ZERO, DVec3::new(half_pi, 0.0, half_pi), DVec3::ONE);
        assert!(close(to_world(&m, DVec3::Y), DVec3::Z));
        // +X stays on X under Rx, then Rz maps it to +Y
        assert!(close(to_world(&m, DVec3::X), DVec3::Y));
    }

    #[test]
    fn test_euler_degrees_order() {
        let d = euler_zyx_degrees(DVec3::new(0.1, 0.2, std::f64::consts::PI));
        assert!((d.x - 180.0).abs() < 1e-9);
        assert!((d.y - 0.2 * RAD2DEG).abs() < 1e-12);
        assert!((d.z - 0.1 * RAD2DEG).abs() < 1e-12);
    }
}

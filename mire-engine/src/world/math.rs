// math.rs - Scalar and orientation helpers

use glam::{Mat3, Quat, Vec3};

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Rotation that turns local +Z toward `dir`, keeping `up` as close to
/// local +Y as possible. Degenerate directions yield the identity.
pub fn face_towards(dir: Vec3, up: Vec3) -> Quat {
    let Some(z) = dir.try_normalize() else {
        return Quat::IDENTITY;
    };
    let x = match up.cross(z).try_normalize() {
        Some(x) => x,
        // Looking straight along `up`: pick any perpendicular axis.
        None => z.any_orthonormal_vector(),
    };
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// Euler XYZ rotation, the order the page's toolkit uses for joints.
#[inline]
pub fn euler(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_euler(glam::EulerRot::XYZ, x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn face_towards_maps_forward_onto_direction() {
        let dir = Vec3::new(1.0, 2.0, -3.0);
        let q = face_towards(dir, Vec3::Y);
        let got = q * Vec3::Z;
        assert!(got.abs_diff_eq(dir.normalize(), 1e-5), "{got:?}");
    }

    #[test]
    fn face_towards_handles_vertical_and_zero() {
        let q = face_towards(Vec3::Y, Vec3::Y);
        assert!((q * Vec3::Z).abs_diff_eq(Vec3::Y, 1e-5));
        assert_eq!(face_towards(Vec3::ZERO, Vec3::Y), Quat::IDENTITY);
    }
}

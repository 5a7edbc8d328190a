use glam::Vec3;

/// Rotate a vector around the z axis by `radians` (standard 2D rotation
/// matrix). z is carried through unchanged.
pub fn rotate_z(v: Vec3, radians: f32) -> Vec3 {
    let (sin, cos) = radians.sin_cos();
    Vec3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn() {
        let v = rotate_z(Vec3::new(1.0, 0.0, 3.0), FRAC_PI_2);
        assert!((v.x - 0.0).abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn full_turn_is_identity() {
        let v = rotate_z(Vec3::new(0.3, -0.7, 0.0), std::f32::consts::TAU);
        assert!((v.x - 0.3).abs() < 1e-5);
        assert!((v.y + 0.7).abs() < 1e-5);
    }
}

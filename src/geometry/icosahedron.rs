use crate::math::Point3;

/// The golden ratio, `(1 + sqrt(5)) / 2`.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// The 12 vertices of an icosahedron with edge length 2.
///
/// Points are the cyclic permutations of `(0, ±1, ±phi)`, in the order
/// `(0, ±1, ±phi)`, `(±1, ±phi, 0)`, `(±phi, 0, ±1)`. Passing an approximate
/// `phi` (such as 1.618) gives a slightly irregular shape that the default
/// tolerance band still resolves into 30 edges.
#[must_use]
pub fn icosahedron_seed(phi: f64) -> [Point3; 12] {
    [
        Point3::new(0.0, 1.0, phi),
        Point3::new(0.0, -1.0, phi),
        Point3::new(0.0, 1.0, -phi),
        Point3::new(0.0, -1.0, -phi),
        Point3::new(1.0, phi, 0.0),
        Point3::new(-1.0, phi, 0.0),
        Point3::new(1.0, -phi, 0.0),
        Point3::new(-1.0, -phi, 0.0),
        Point3::new(phi, 0.0, 1.0),
        Point3::new(-phi, 0.0, 1.0),
        Point3::new(phi, 0.0, -1.0),
        Point3::new(-phi, 0.0, -1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn all_seed_points_share_a_radius() {
        let seed = icosahedron_seed(GOLDEN_RATIO);
        let r = seed[0].coords.norm();
        for p in &seed {
            assert_relative_eq!(p.coords.norm(), r, epsilon = 1e-12);
        }
    }

    #[test]
    fn golden_ratio_identity() {
        assert_relative_eq!(GOLDEN_RATIO * GOLDEN_RATIO, GOLDEN_RATIO + 1.0, epsilon = 1e-12);
    }
}

use crate::math::Vec3;

/// Axis-aligned bounding box
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb3 {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb3 { min, max }
    }

    /// Returns `None` for an empty point set.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bb = Aabb3::new(*first, *first);
        for p in rest {
            bb.min = bb.min.min(*p);
            bb.max = bb.max.max(*p);
        }
        Some(bb)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Sphere enclosing a set of points.
///
/// Built the usual renderer way: centered on the bounding box, radius reaching
/// the farthest point. Not the minimal enclosing sphere in general, but exact
/// for symmetric meshes such as a UV sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f64,
}

impl BoundingSphere {
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let center = Aabb3::from_points(points)?.center();
        let radius = points
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0_f64, f64::max);
        Some(BoundingSphere { center, radius })
    }
}

#[cfg(test)]
mod tests {
    use super::{Aabb3, BoundingSphere};
    use crate::math::Vec3;

    #[test]
    fn empty_point_set_has_no_bounds() {
        assert!(Aabb3::from_points(&[]).is_none());
        assert!(BoundingSphere::from_points(&[]).is_none());
    }

    #[test]
    fn aabb_tracks_extremes() {
        let bb = Aabb3::from_points(&[
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-1.0, 4.0, 2.0),
            Vec3::new(0.0, 0.0, -3.0),
        ])
        .unwrap();
        assert_eq!(bb.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bb.max, Vec3::new(1.0, 4.0, 2.0));
        assert_eq!(bb.center(), Vec3::new(0.0, 1.0, -0.5));
    }

    #[test]
    fn octahedron_sphere_is_centered_with_unit_radius() {
        let pts = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let s = BoundingSphere::from_points(&pts).unwrap();
        assert_eq!(s.center, Vec3::ZERO);
        assert_eq!(s.radius, 1.0);
    }

    #[test]
    fn single_point_has_zero_radius() {
        let s = BoundingSphere::from_points(&[Vec3::new(2.0, 3.0, 4.0)]).unwrap();
        assert_eq!(s.center, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(s.radius, 0.0);
    }
}

use super::vec3::Vec3;

/// Axis-aligned box used for screen-volume rejection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds3 {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or the empty default box.
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };
        let mut bounds = Self::new(*first, *first);
        for p in rest {
            bounds.expand(*p);
        }
        bounds
    }

    /// Strict containment: points on a face are outside.
    pub fn contains(&self, p: Vec3) -> bool {
        self.min.x < p.x
            && p.x < self.max.x
            && self.min.y < p.y
            && p.y < self.max.y
            && self.min.z < p.z
            && p.z < self.max.z
    }

    pub fn expand(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(self.min.max(other.min), self.max.min(other.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_strict() {
        let b = Bounds3::new(Vec3::ZERO, Vec3::ONE);
        assert!(b.contains(Vec3::new(0.5, 0.5, 0.5)));
        assert!(!b.contains(Vec3::new(0.0, 0.5, 0.5)));
        assert!(!b.contains(Vec3::new(0.5, 1.0, 0.5)));
    }

    #[test]
    fn from_points_spans_all() {
        let b = Bounds3::from_points(&[
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-1.0, 3.0, 2.0),
            Vec3::new(0.0, 0.0, -4.0),
        ]);
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -4.0));
        assert_eq!(b.max, Vec3::new(1.0, 3.0, 2.0));
        assert_eq!(Bounds3::from_points(&[]), Bounds3::default());
    }

    #[test]
    fn intersect_takes_overlap() {
        let a = Bounds3::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0));
        let b = Bounds3::new(Vec3::ONE, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a.intersect(&b), Bounds3::new(Vec3::ONE, Vec3::new(2.0, 2.0, 2.0)));
    }
}

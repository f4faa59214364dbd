use crate::math::Vec3;

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb3 {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb3 { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Aabb3::new(first, first);
        for p in iter {
            bounds.min = Vec3::new(
                bounds.min.x.min(p.x),
                bounds.min.y.min(p.y),
                bounds.min.z.min(p.z),
            );
            bounds.max = Vec3::new(
                bounds.max.x.max(p.x),
                bounds.max.y.max(p.y),
                bounds.max.z.max(p.z),
            );
        }
        Some(bounds)
    }

    pub fn translated(&self, by: Vec3) -> Self {
        Aabb3::new(self.min + by, self.max + by)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

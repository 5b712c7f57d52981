use glam::{Mat4, Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn transform(&self, matrix: &Mat4) -> BoundingSphere {
        let center = matrix.transform_point3(self.center);
        let scale = matrix.to_scale_rotation_translation().0;
        let radius = self.radius * scale.abs().max_element();
        BoundingSphere { center, radius }
    }

    /// Touching spheres count as intersecting.
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let radius_sum = self.radius + other.radius;
        (self.center - other.center).length_squared() <= radius_sum * radius_sum
    }
}

/// Axis-aligned rectangle on the ground (XZ) plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(point1: Vec2, point2: Vec2) -> Rect {
        let min = point1.min(point2);
        let max = point1.max(point2);
        Rect { min, max }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Rect {
        let half = size * 0.5;
        Rect::new(center - half, center + half)
    }

    pub fn expanded(&self, margin: f32) -> Rect {
        Rect::new(self.min - Vec2::splat(margin), self.max + Vec2::splat(margin))
    }

    /// Inclusive: rectangles sharing an edge intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_spheres_intersect() {
        let a = BoundingSphere::new(Vec3::ZERO, 1.0);
        let b = BoundingSphere::new(Vec3::new(3.0, 0.0, 0.0), 2.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = BoundingSphere::new(Vec3::new(3.01, 0.0, 0.0), 2.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn transformed_sphere_follows_translation_and_scale() {
        let sphere = BoundingSphere::new(Vec3::ZERO, 1.0);
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, 3.0, 1.0),
            glam::Quat::IDENTITY,
            Vec3::new(2.0, 0.0, 0.0),
        );
        let moved = sphere.transform(&matrix);
        assert!(moved.center.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));
        assert!((moved.radius - 3.0).abs() < 1e-5);
    }

    #[test]
    fn rect_edges_are_inclusive() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = Rect::new(Vec2::new(2.0, 1.0), Vec2::new(4.0, 3.0));
        let c = Rect::new(Vec2::new(2.5, 1.0), Vec2::new(4.0, 3.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.expanded(0.5).intersects(&c));
        assert_eq!(
            Rect::centered(Vec2::new(1.0, 1.0), Vec2::splat(2.0)),
            a
        );
    }
}

use glam::Vec3;

use crate::math::bounds::BoundingSphere;

/// Tube radius three.js uses for its default torus and torus knot.
const DEFAULT_TUBE: f32 = 0.4;

/// Parametric description of the mesh a geometry factory builds for a node.
/// All shapes are centered on the node origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Box { size: Vec3 },
    Cylinder { radius: f32, height: f32 },
    /// Four-sided pyramid with a square base of `side` length.
    Pyramid { side: f32, height: f32 },
    Sphere { radius: f32 },
    Dodecahedron { radius: f32 },
    Icosahedron { radius: f32 },
    Torus { radius: f32 },
    TorusKnot { radius: f32 },
    /// Flat annulus extruded along Y.
    Ring { inner: f32, outer: f32, height: f32 },
}

impl Primitive {
    pub fn bounding_sphere(&self) -> BoundingSphere {
        let radius = match *self {
            Primitive::Box { size } => (size * 0.5).length(),
            Primitive::Cylinder { radius, height } => Vec3::new(radius, height * 0.5, 0.0).length(),
            Primitive::Pyramid { side, height } => {
                Vec3::new(side * 0.5, height * 0.5, side * 0.5).length()
            }
            Primitive::Sphere { radius }
            | Primitive::Dodecahedron { radius }
            | Primitive::Icosahedron { radius } => radius,
            Primitive::Torus { radius } => radius + DEFAULT_TUBE,
            // A (2, 3) knot swings out to 1.5x its nominal radius.
            Primitive::TorusKnot { radius } => radius * 1.5 + DEFAULT_TUBE,
            Primitive::Ring { outer, height, .. } => Vec3::new(outer, height * 0.5, 0.0).length(),
        };

        BoundingSphere::new(Vec3::ZERO, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_sphere_reaches_corners() {
        let sphere = Primitive::Box {
            size: Vec3::new(2.0, 3.0, 2.0),
        }
        .bounding_sphere();
        assert!((sphere.radius - 4.25f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn radial_shapes_use_their_radius() {
        assert_eq!(Primitive::Dodecahedron { radius: 1.5 }.bounding_sphere().radius, 1.5);
        assert!((Primitive::Torus { radius: 1.75 }.bounding_sphere().radius - 2.15).abs() < 1e-6);
    }
}

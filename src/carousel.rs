use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::Vec3;

use crate::animation::{
    AnimationError, Axis, Direction, DofProfile, DofTable, Motion, PartId, PartRegistry, Rate,
};
use crate::config::CraneConfig;
use crate::scene_graph::{Object3D, ObjectId, Primitive, Scene};

const CYLINDER_RADIUS: f32 = 1.0;
const CYLINDER_HEIGHT: f32 = 21.0;
const RING_HEIGHT: f32 = 4.0;
const FIGURES_PER_RING: usize = 8;

const PLATFORM_SPEED: f32 = FRAC_PI_4;
const FIGURE_SPEED: f32 = FRAC_PI_2;

struct RingSpec {
    name: &'static str,
    inner: f32,
    outer: f32,
    /// Highest point of the ring's travel along the cylinder.
    max_height: f32,
}

const RINGS: [RingSpec; 3] = [
    RingSpec {
        name: "innerRing",
        inner: 1.0,
        outer: 4.0,
        max_height: 15.0,
    },
    RingSpec {
        name: "centralRing",
        inner: 4.0,
        outer: 8.0,
        max_height: 10.0,
    },
    RingSpec {
        name: "outerRing",
        inner: 8.0,
        outer: 12.0,
        max_height: 5.0,
    },
];

/// Shapes cycled through when seating figures on a ring.
const FIGURES: [Primitive; 4] = [
    Primitive::Box {
        size: Vec3::new(1.0, 1.5, 1.0),
    },
    Primitive::Dodecahedron { radius: 0.75 },
    Primitive::Icosahedron { radius: 0.75 },
    Primitive::TorusKnot { radius: 0.5 },
];

fn carousel_profiles(config: &CraneConfig) -> DofTable {
    let mut table = DofTable::new()
        .with(
            "platform",
            DofProfile::new(
                Axis::Y,
                -PI,
                PI,
                Motion::Rotate { clamp: false },
                Rate::Fixed {
                    per_second: PLATFORM_SPEED,
                },
            ),
        )
        .with(
            "figure",
            DofProfile::new(
                Axis::Y,
                -PI,
                PI,
                Motion::Rotate { clamp: false },
                Rate::Fixed {
                    per_second: FIGURE_SPEED,
                },
            ),
        );

    for ring in &RINGS {
        table = table.with(
            ring.name,
            DofProfile::new(
                Axis::Y,
                0.0,
                ring.max_height,
                Motion::Translate,
                Rate::Sweep {
                    seconds: config.movement_time,
                },
            )
            .bouncing(),
        );
    }

    table
}

/// A spinning platform with three rings that ride up and down its central
/// cylinder, each carrying a circle of spinning figures.
pub struct CarouselDemo {
    pub parts: PartRegistry,
    pub rings: Vec<PartId>,
}

impl CarouselDemo {
    pub fn build(scene: &mut Scene, config: &CraneConfig) -> Result<Self, AnimationError> {
        let table = carousel_profiles(config);
        let mut parts = PartRegistry::new();

        let platform = scene.add_object(Object3D::group("platform", Vec3::ZERO));
        scene.add_child(
            platform,
            Object3D::mesh(
                "mainCylinder",
                Primitive::Cylinder {
                    radius: CYLINDER_RADIUS,
                    height: CYLINDER_HEIGHT,
                },
                Vec3::Y * (CYLINDER_HEIGHT / 2.0),
            ),
        );

        let mut rings = Vec::new();
        let mut figures = Vec::new();
        for ring in &RINGS {
            let group =
                scene.add_child(platform, Object3D::group(ring.name, Vec3::Y * RING_HEIGHT));
            scene.add_child(
                group,
                Object3D::mesh(
                    "ring",
                    Primitive::Ring {
                        inner: ring.inner,
                        outer: ring.outer,
                        height: RING_HEIGHT,
                    },
                    Vec3::ZERO,
                ),
            );
            figures.extend(seat_figures(scene, group, (ring.inner + ring.outer) / 2.0));
            rings.push(parts.register(&table, ring.name, ring.name, vec![group])?);
        }

        let platform = parts.register(&table, "platform", "platform", vec![platform])?;
        let figures = parts.register(&table, "figures", "figure", figures)?;

        // The platform and the figures never stop.
        parts.set_flag(platform, Direction::YPositive, true);
        parts.set_flag(figures, Direction::YPositive, true);

        log::info!(
            "Built carousel scene: {} objects, {} meshes",
            scene.objects.len(),
            scene.mesh_count()
        );

        Ok(Self { parts, rings })
    }

    /// Starts or stops a ring's up-and-down travel.
    pub fn toggle(&mut self, name: &str) {
        let id = match self.parts.id(name) {
            Ok(id) => id,
            Err(err) => {
                log::warn!("{err}");
                return;
            }
        };

        let running = self
            .parts
            .get(id)
            .is_some_and(|part| part.is_moving());
        self.parts.set_flag(id, Direction::YPositive, !running);
        log::info!("{name} {}", if running { "stopped" } else { "started" });
    }

    pub fn update(&mut self, scene: &mut Scene, time_delta: f32) {
        self.parts.step_all(scene, time_delta);
    }

    pub fn moving_rings(&self) -> usize {
        self.rings
            .iter()
            .filter_map(|id| self.parts.get(*id))
            .filter(|part| part.is_moving())
            .count()
    }
}

fn seat_figures(scene: &mut Scene, ring: ObjectId, radius: f32) -> Vec<ObjectId> {
    (0..FIGURES_PER_RING)
        .map(|i| {
            let angle = TAU * i as f32 / FIGURES_PER_RING as f32;
            let primitive = FIGURES[i % FIGURES.len()];
            let height = primitive.bounding_sphere().radius;
            let position = Vec3::new(radius * angle.cos(), height, radius * angle.sin());
            scene.add_child(ring, Object3D::mesh("figure", primitive, position))
        })
        .collect()
}

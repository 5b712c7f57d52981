use glam::{Vec2, Vec3};
use rand::Rng;

use crate::animation::error::AnimationError;
use crate::math::bounds::{BoundingSphere, Rect};
use crate::scene_graph::{ObjectId, Scene};

/// Sphere-sphere overlap, touching included.
pub fn colliding(position_a: Vec3, position_b: Vec3, radius_a: f32, radius_b: f32) -> bool {
    BoundingSphere::new(position_a, radius_a).intersects(&BoundingSphere::new(position_b, radius_b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CargoState {
    Live,
    Grabbed,
    Deposited,
}

#[derive(Debug, Clone)]
pub struct Cargo {
    pub object: ObjectId,
    pub radius: f32,
    /// Height of the object's origin above whatever it rests on.
    pub rest_height: f32,
    pub spawn: Vec3,
    pub state: CargoState,
}

/// Index of the first live cargo object within `reach` of `sensor`.
/// Iteration order decides between several objects in range.
pub fn find_collision(
    scene: &Scene,
    sensor: ObjectId,
    reach: f32,
    cargo: &[Cargo],
) -> Option<usize> {
    let sensor = BoundingSphere::new(scene.world_position(sensor), reach);

    cargo.iter().position(|item| {
        item.state == CargoState::Live
            && BoundingSphere::new(Vec3::ZERO, item.radius)
                .transform(&scene.world_matrix(item.object))
                .intersects(&sensor)
    })
}

/// Square region on the ground where cargo may be scattered, minus the
/// footprints of fixed structures.
#[derive(Debug, Clone)]
pub struct PlacementArea {
    /// Half side of the sampling square before it is shrunk for an object.
    pub reach: f32,
    pub obstacles: Vec<Rect>,
    pub max_attempts: usize,
}

impl PlacementArea {
    fn half_extent(&self, radius: f32) -> f32 {
        (self.reach - radius * 2.0).max(0.0)
    }

    /// A spot is free when the object's footprint clears every obstacle and
    /// its bounding sphere clears every already placed object.
    pub fn is_free(&self, position: Vec3, radius: f32, placed: &[BoundingSphere]) -> bool {
        let footprint =
            Rect::centered(Vec2::new(position.x, position.z), Vec2::ZERO).expanded(radius);

        !self.obstacles.iter().any(|obstacle| footprint.intersects(obstacle))
            && !placed
                .iter()
                .any(|other| colliding(position, other.center, radius, other.radius))
    }

    /// Rejection-samples a free position at `height`. After `max_attempts`
    /// misses, scans a grid over the same square before giving up.
    pub fn place_randomly<R: Rng>(
        &self,
        rng: &mut R,
        radius: f32,
        height: f32,
        placed: &[BoundingSphere],
    ) -> Result<Vec3, AnimationError> {
        let half_extent = self.half_extent(radius);

        for attempt in 0..self.max_attempts {
            let candidate = Vec3::new(
                rng.gen_range(-half_extent..=half_extent),
                height,
                rng.gen_range(-half_extent..=half_extent),
            );

            if self.is_free(candidate, radius, placed) {
                log::trace!("Placed object of radius {radius} after {} attempts", attempt + 1);
                return Ok(candidate);
            }
        }

        log::warn!(
            "Random placement gave up after {} attempts, scanning grid",
            self.max_attempts
        );
        self.grid_search(radius, height, placed)
            .ok_or(AnimationError::NoFreePlacement {
                radius,
                attempts: self.max_attempts,
            })
    }

    fn grid_search(&self, radius: f32, height: f32, placed: &[BoundingSphere]) -> Option<Vec3> {
        let half_extent = self.half_extent(radius);
        let step = radius.max(0.25);
        let steps = (half_extent * 2.0 / step).floor() as usize;

        (0..=steps)
            .flat_map(|i| (0..=steps).map(move |j| (i, j)))
            .map(|(i, j)| {
                Vec3::new(
                    -half_extent + i as f32 * step,
                    height,
                    -half_extent + j as f32 * step,
                )
            })
            .find(|candidate| self.is_free(*candidate, radius, placed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::Object3D;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NUM_SAMPLES: usize = 2000;
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1337;

    fn area() -> PlacementArea {
        PlacementArea {
            reach: 21.0,
            obstacles: vec![
                Rect::centered(Vec2::ZERO, Vec2::new(6.0, 6.0)),
                Rect::centered(Vec2::new(12.0, 15.0), Vec2::new(10.0, 6.0)),
            ],
            max_attempts: 10_000,
        }
    }

    fn random_point(rng: &mut StdRng) -> Vec3 {
        Vec3::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        )
    }

    #[test]
    fn colliding_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(SEED);
        for _ in 0..NUM_SAMPLES {
            let a = random_point(&mut rng);
            let b = random_point(&mut rng);
            let ra = rng.gen_range(0.0..3.0);
            let rb = rng.gen_range(0.0..3.0);
            assert_eq!(colliding(a, b, ra, rb), colliding(b, a, rb, ra));
        }
    }

    #[test]
    fn colliding_boundary_is_inclusive() {
        assert!(colliding(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 2.5, 1.5));
        assert!(!colliding(Vec3::ZERO, Vec3::new(4.001, 0.0, 0.0), 2.5, 1.5));
    }

    #[test]
    fn sampled_positions_clear_obstacles_and_each_other() {
        let area = area();
        let mut rng = StdRng::seed_from_u64(SEED);

        for _ in 0..50 {
            let mut placed: Vec<BoundingSphere> = Vec::new();
            for radius in [2.06, 1.5, 2.0, 2.15, 1.9] {
                let position = area.place_randomly(&mut rng, radius, radius, &placed).unwrap();

                let footprint =
                    Rect::centered(Vec2::new(position.x, position.z), Vec2::ZERO).expanded(radius);
                for obstacle in &area.obstacles {
                    assert!(!footprint.intersects(obstacle));
                }
                assert!(position.x.abs() <= area.reach - radius * 2.0);
                assert!(position.z.abs() <= area.reach - radius * 2.0);

                placed.push(BoundingSphere::new(position, radius));
            }

            for (i, a) in placed.iter().enumerate() {
                for b in &placed[i + 1..] {
                    assert!(!a.intersects(b));
                }
            }
        }
    }

    #[test]
    fn exhausted_sampling_falls_back_to_grid() {
        let area = PlacementArea {
            max_attempts: 0,
            ..area()
        };
        let mut rng = StdRng::seed_from_u64(SEED);
        let position = area.place_randomly(&mut rng, 1.0, 1.0, &[]).unwrap();
        assert!(area.is_free(position, 1.0, &[]));
    }

    #[test]
    fn fully_blocked_area_reports_error() {
        let area = PlacementArea {
            reach: 4.0,
            obstacles: vec![Rect::centered(Vec2::ZERO, Vec2::splat(20.0))],
            max_attempts: 100,
        };
        let mut rng = StdRng::seed_from_u64(SEED);
        let err = area.place_randomly(&mut rng, 1.0, 1.0, &[]).unwrap_err();
        assert!(matches!(err, AnimationError::NoFreePlacement { attempts: 100, .. }));
    }

    #[test]
    fn first_live_cargo_in_reach_wins() {
        let mut scene = Scene::new();
        let claw = scene.add_object(Object3D::group("claw", Vec3::new(0.0, 5.0, 0.0)));
        let near = scene.add_object(Object3D::group("near", Vec3::new(0.0, 2.0, 0.0)));
        let also_near = scene.add_object(Object3D::group("also_near", Vec3::new(1.0, 2.0, 0.0)));
        let far = scene.add_object(Object3D::group("far", Vec3::new(10.0, 2.0, 0.0)));

        let cargo = |object, state| Cargo {
            object,
            radius: 1.5,
            rest_height: 1.5,
            spawn: Vec3::ZERO,
            state,
        };
        let mut items = vec![
            cargo(far, CargoState::Live),
            cargo(near, CargoState::Live),
            cargo(also_near, CargoState::Live),
        ];

        assert_eq!(find_collision(&scene, claw, 2.5, &items), Some(1));

        items[1].state = CargoState::Deposited;
        assert_eq!(find_collision(&scene, claw, 2.5, &items), Some(2));

        items[2].state = CargoState::Grabbed;
        assert_eq!(find_collision(&scene, claw, 2.5, &items), None);
    }
}

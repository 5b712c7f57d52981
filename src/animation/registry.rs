use std::collections::HashMap;

use id_arena::{Arena, Id};

use crate::animation::applier;
use crate::animation::dof::{DofProfile, DofTable, Motion};
use crate::animation::error::AnimationError;
use crate::animation::movement::{self, Direction, MovementFlags};
use crate::scene_graph::{ObjectId, Scene};

pub type PartId = Id<DynamicPart>;

/// A controllable piece of a scene: one or more nodes sharing a motion
/// profile and a set of held movement flags.
#[derive(Debug, Clone)]
pub struct DynamicPart {
    pub name: &'static str,
    pub nodes: Vec<ObjectId>,
    pub profile: DofProfile,
    pub flags: MovementFlags,
    /// +1 or -1; flipped by bouncing profiles at their bounds.
    direction: f32,
    length: f32,
}

impl DynamicPart {
    pub fn is_moving(&self) -> bool {
        !self.flags.is_empty()
    }

    pub fn set_flag(&mut self, direction: Direction, held: bool) {
        self.flags.set(direction.flag(), held);
    }

    /// Current value of the controlled attribute, read from the first node
    /// for rotations and translations.
    pub fn value(&self, scene: &Scene) -> Option<f32> {
        if let Motion::Resize { .. } = self.profile.motion {
            return Some(self.length);
        }

        let transform = scene.get_object_transform(*self.nodes.first()?)?;
        let attribute = match self.profile.motion {
            Motion::Rotate { .. } => transform.rotation(),
            _ => transform.translation(),
        };
        Some(self.profile.axis.of(attribute))
    }

    /// Whether holding `direction` can no longer move this part.
    pub fn at_limit(&self, scene: &Scene, direction: Direction) -> bool {
        match (self.profile.limit_toward(direction), self.value(scene)) {
            (Some(limit), Some(value)) => value == limit,
            _ => false,
        }
    }

    pub fn step(&mut self, scene: &mut Scene, time_delta: f32) {
        let displacement = movement::displacement(self.flags, self.profile.velocity(), time_delta);
        let delta = self.profile.axis.of(displacement) * self.direction;
        let profile = self.profile;

        let mut landed_on_bound = false;
        let mut length = self.length;
        for &node in &self.nodes {
            let applied = scene.modify_transform(node, |transform| {
                applier::apply(transform, &profile, self.length, delta)
            });

            if let Some(value) = applied {
                landed_on_bound |= profile.is_clamped() && profile.lands_on_bound(value);
                length = value;
            }
        }

        if let Motion::Resize { .. } = profile.motion {
            self.length = length;
        }

        if profile.bounce && landed_on_bound {
            self.direction = -self.direction;
            log::trace!("{} bounced, direction now {}", self.name, self.direction);
        }
    }
}

/// All dynamic parts of a scene, indexed by name. Profiles are resolved at
/// registration so that a missing profile fails scene construction instead
/// of silently not animating.
pub struct PartRegistry {
    parts: Arena<DynamicPart>,
    by_name: HashMap<&'static str, PartId>,
}

impl PartRegistry {
    pub fn new() -> Self {
        Self {
            parts: Arena::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        table: &DofTable,
        name: &'static str,
        profile: &str,
        nodes: Vec<ObjectId>,
    ) -> Result<PartId, AnimationError> {
        self.insert(table, name, profile, nodes, None)
    }

    /// Registers a part driven by a resize profile, starting `length` long.
    pub fn register_resizable(
        &mut self,
        table: &DofTable,
        name: &'static str,
        profile: &str,
        nodes: Vec<ObjectId>,
        length: f32,
    ) -> Result<PartId, AnimationError> {
        self.insert(table, name, profile, nodes, Some(length))
    }

    fn insert(
        &mut self,
        table: &DofTable,
        name: &'static str,
        profile_name: &str,
        nodes: Vec<ObjectId>,
        length: Option<f32>,
    ) -> Result<PartId, AnimationError> {
        let profile = *table
            .get(profile_name)
            .ok_or_else(|| AnimationError::UnconfiguredProfile {
                part: name.to_string(),
                profile: profile_name.to_string(),
            })?;

        // `f32::clamp` panics on either of these.
        if profile.min.is_nan() || profile.max.is_nan() || profile.min > profile.max {
            return Err(AnimationError::InvalidBounds {
                part: name.to_string(),
                min: profile.min,
                max: profile.max,
            });
        }

        let length = match (profile.motion, length) {
            (Motion::Resize { .. }, None) => {
                return Err(AnimationError::MissingLength(name.to_string()))
            }
            (_, length) => length.unwrap_or_default(),
        };

        let id = self.parts.alloc(DynamicPart {
            name,
            nodes,
            profile,
            flags: MovementFlags::empty(),
            direction: 1.0,
            length,
        });
        self.by_name.insert(name, id);

        log::debug!("Registered part {name} with profile {profile_name}");
        Ok(id)
    }

    pub fn id(&self, name: &str) -> Result<PartId, AnimationError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AnimationError::UnknownPart(name.to_string()))
    }

    pub fn get(&self, id: PartId) -> Option<&DynamicPart> {
        self.parts.get(id)
    }

    pub fn set_flag(&mut self, id: PartId, direction: Direction, held: bool) {
        if let Some(part) = self.parts.get_mut(id) {
            part.set_flag(direction, held);
        }
    }

    pub fn clear_flags(&mut self, id: PartId) {
        if let Some(part) = self.parts.get_mut(id) {
            part.flags = MovementFlags::empty();
        }
    }

    pub fn at_limit(&self, scene: &Scene, id: PartId, direction: Direction) -> bool {
        self.get(id)
            .is_some_and(|part| part.at_limit(scene, direction))
    }

    /// Applies one frame of motion to every part with a held flag, in
    /// registration order.
    pub fn step_all(&mut self, scene: &mut Scene, time_delta: f32) {
        for (_, part) in self.parts.iter_mut() {
            if part.is_moving() {
                part.step(scene, time_delta);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::dof::{Axis, Rate};
    use crate::scene_graph::Object3D;
    use glam::Vec3;

    fn ring_table() -> DofTable {
        DofTable::new().with(
            "ring",
            DofProfile::new(
                Axis::Y,
                0.0,
                2.0,
                Motion::Translate,
                Rate::Fixed { per_second: 1.0 },
            )
            .bouncing(),
        )
    }

    #[test]
    fn unconfigured_profile_fails_registration() {
        let mut registry = PartRegistry::new();
        let mut scene = Scene::new();
        let node = scene.add_object(Object3D::group("jib", Vec3::ZERO));

        let err = registry
            .register(&ring_table(), "jib", "jib", vec![node])
            .unwrap_err();
        assert!(matches!(err, AnimationError::UnconfiguredProfile { .. }));
        assert!(matches!(
            registry.id("jib"),
            Err(AnimationError::UnknownPart(_))
        ));
    }

    #[test]
    fn inverted_or_nan_bounds_fail_registration() {
        let mut scene = Scene::new();
        let node = scene.add_object(Object3D::group("ring", Vec3::ZERO));
        let rate = Rate::Fixed { per_second: 1.0 };
        let table = DofTable::new()
            .with(
                "inverted",
                DofProfile::new(Axis::Y, 5.0, 1.0, Motion::Translate, rate),
            )
            .with(
                "nan",
                DofProfile::new(Axis::Y, f32::NAN, 1.0, Motion::Translate, rate),
            );

        let mut registry = PartRegistry::new();
        for profile in ["inverted", "nan"] {
            let err = registry
                .register(&table, "ring", profile, vec![node])
                .unwrap_err();
            assert!(matches!(err, AnimationError::InvalidBounds { .. }));
        }
        assert!(matches!(
            registry.id("ring"),
            Err(AnimationError::UnknownPart(_))
        ));
    }

    #[test]
    fn resize_profile_needs_a_length() {
        let table = DofTable::new().with(
            "cable",
            DofProfile::new(
                Axis::Y,
                0.0,
                1.0,
                Motion::Resize {
                    reference_length: 1.0,
                    anchor: 0.0,
                },
                Rate::Sweep { seconds: 1.0 },
            ),
        );
        let mut registry = PartRegistry::new();
        let err = registry.register(&table, "cable", "cable", Vec::new()).unwrap_err();
        assert!(matches!(err, AnimationError::MissingLength(_)));
        assert!(registry
            .register_resizable(&table, "cable", "cable", Vec::new(), 1.0)
            .is_ok());
    }

    #[test]
    fn bouncing_part_oscillates_between_bounds() {
        let mut scene = Scene::new();
        let node = scene.add_object(Object3D::group("ring", Vec3::ZERO));
        let mut registry = PartRegistry::new();
        let ring = registry
            .register(&ring_table(), "ring", "ring", vec![node])
            .unwrap();
        registry.set_flag(ring, Direction::YPositive, true);

        // 0.5 per tick: reaches 2.0 exactly on the fourth tick and turns around.
        let mut heights = Vec::new();
        for _ in 0..10 {
            registry.step_all(&mut scene, 0.5);
            heights.push(registry.get(ring).unwrap().value(&scene).unwrap());
        }
        assert_eq!(
            heights,
            vec![0.5, 1.0, 1.5, 2.0, 1.5, 1.0, 0.5, 0.0, 0.5, 1.0]
        );
    }

    #[test]
    fn idle_parts_are_not_touched() {
        let mut scene = Scene::new();
        let node = scene.add_object(Object3D::group("ring", Vec3::new(0.0, 5.0, 0.0)));
        let mut registry = PartRegistry::new();
        let ring = registry
            .register(&ring_table(), "ring", "ring", vec![node])
            .unwrap();

        registry.step_all(&mut scene, 1.0);
        assert_eq!(registry.get(ring).unwrap().value(&scene), Some(5.0));
        assert!(!registry.at_limit(&scene, ring, Direction::YPositive));
    }
}

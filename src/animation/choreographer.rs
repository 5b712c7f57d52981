use glam::Vec3;

use crate::animation::collision::{Cargo, CargoState};
use crate::animation::movement::Direction;
use crate::animation::registry::{PartId, PartRegistry};
use crate::config::CraneConfig;
use crate::scene_graph::{ObjectId, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Raising,
    Traversing,
    Rotating,
    Lowering,
    Done,
}

/// Handles to the crane pieces the pickup sequence drives or measures.
#[derive(Debug, Clone, Copy)]
pub struct CraneRig {
    pub top: PartId,
    pub trolley: PartId,
    pub cable: PartId,
    pub claw: PartId,
    pub claw_node: ObjectId,
    pub container_node: ObjectId,
    /// Height of the container floor's upper face above the container origin.
    pub container_floor: f32,
}

impl CraneRig {
    pub fn owned_parts(&self) -> [PartId; 4] {
        [self.top, self.trolley, self.cable, self.claw]
    }
}

/// Angle between two world positions as seen from above the scene origin.
/// Zero when either lies on the vertical axis.
fn horizontal_angle(a: Vec3, b: Vec3) -> f32 {
    let a = Vec3::new(a.x, 0.0, a.z);
    let b = Vec3::new(b.x, 0.0, b.z);
    if a.length_squared() == 0.0 || b.length_squared() == 0.0 {
        return 0.0;
    }

    a.angle_between(b)
}

/// Collision-triggered pickup sequence. While a sequence runs, this is the
/// only writer of movement flags for the parts in [`CraneRig::owned_parts`].
pub struct Choreographer {
    stage: Stage,
    cargo: Option<usize>,
    stage_elapsed: f32,
    grab_offset: Vec3,
    rotation_threshold: f32,
    deposit_length: f32,
    stage_timeout: f32,
}

impl Choreographer {
    pub fn new(config: &CraneConfig) -> Self {
        Self {
            stage: Stage::Idle,
            cargo: None,
            stage_elapsed: 0.0,
            grab_offset: config.grab_offset,
            rotation_threshold: config.rotation_threshold,
            deposit_length: config.deposit_length,
            stage_timeout: config.stage_timeout(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_active(&self) -> bool {
        self.stage != Stage::Idle
    }

    /// Index of the cargo object currently carried.
    pub fn cargo(&self) -> Option<usize> {
        self.cargo
    }

    pub fn owns(&self, rig: &CraneRig, part: PartId) -> bool {
        self.is_active() && rig.owned_parts().contains(&part)
    }

    fn enter(&mut self, stage: Stage) {
        log::info!("Pickup {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
        self.stage_elapsed = 0.0;
    }

    /// Takes over the crane: hangs `cargo[index]` under the claw and drops
    /// any manual input on the owned parts.
    pub fn begin(
        &mut self,
        scene: &mut Scene,
        parts: &mut PartRegistry,
        rig: &CraneRig,
        cargo: &mut [Cargo],
        index: usize,
    ) {
        if self.is_active() {
            return;
        }
        let Some(item) = cargo.get_mut(index) else {
            return;
        };

        item.state = CargoState::Grabbed;
        scene.set_object_parent(item.object, Some(rig.claw_node));
        scene.set_object_translation(item.object, self.grab_offset);

        for part in rig.owned_parts() {
            parts.clear_flags(part);
        }

        self.cargo = Some(index);
        self.enter(Stage::Raising);
    }

    /// Runs the current stage's flag logic. A stage that reaches its target
    /// hands over to the next one within the same call.
    pub fn advance(
        &mut self,
        scene: &mut Scene,
        parts: &mut PartRegistry,
        rig: &CraneRig,
        cargo: &mut [Cargo],
        time_delta: f32,
    ) {
        if !self.is_active() {
            return;
        }

        self.stage_elapsed += time_delta;
        if self.stage_elapsed > self.stage_timeout {
            log::error!(
                "Pickup stalled in {:?} after {:.1}s, returning cargo",
                self.stage,
                self.stage_elapsed
            );
            self.abort(scene, parts, rig, cargo);
            return;
        }

        while let Some(next) = self.evaluate(scene, parts, rig, cargo) {
            self.enter(next);
            if next == Stage::Idle {
                break;
            }
        }
    }

    fn evaluate(
        &mut self,
        scene: &mut Scene,
        parts: &mut PartRegistry,
        rig: &CraneRig,
        cargo: &mut [Cargo],
    ) -> Option<Stage> {
        match self.stage {
            Stage::Idle => None,
            Stage::Raising => {
                let reached = parts.at_limit(scene, rig.cable, Direction::YPositive);
                parts.set_flag(rig.cable, Direction::YPositive, !reached);
                parts.set_flag(rig.claw, Direction::YPositive, !reached);
                reached.then_some(Stage::Traversing)
            }
            Stage::Traversing => {
                let reached = parts.at_limit(scene, rig.trolley, Direction::XPositive);
                parts.set_flag(rig.trolley, Direction::XPositive, !reached);
                reached.then_some(Stage::Rotating)
            }
            Stage::Rotating => {
                let angle = horizontal_angle(
                    scene.world_position(rig.container_node),
                    scene.world_position(rig.claw_node),
                );
                log::trace!("Claw is {angle:.3} rad off the container");

                let aligned = angle.abs() <= self.rotation_threshold;
                parts.set_flag(rig.top, Direction::YPositive, !aligned);
                aligned.then_some(Stage::Lowering)
            }
            Stage::Lowering => {
                let length = parts
                    .get(rig.cable)
                    .and_then(|cable| cable.value(scene))
                    .unwrap_or_default();
                let reached = length >= self.deposit_length;
                parts.set_flag(rig.cable, Direction::YNegative, !reached);
                parts.set_flag(rig.claw, Direction::YNegative, !reached);
                reached.then_some(Stage::Done)
            }
            Stage::Done => {
                self.release(scene, parts, rig, cargo);
                Some(Stage::Idle)
            }
        }
    }

    /// Sets the carried object down on the container floor.
    fn release(
        &mut self,
        scene: &mut Scene,
        parts: &mut PartRegistry,
        rig: &CraneRig,
        cargo: &mut [Cargo],
    ) {
        for part in rig.owned_parts() {
            parts.clear_flags(part);
        }

        let Some(index) = self.cargo.take() else {
            return;
        };
        let Some(item) = cargo.get_mut(index) else {
            return;
        };

        scene.set_object_parent(item.object, Some(rig.container_node));
        scene.set_object_translation(
            item.object,
            Vec3::new(0.0, rig.container_floor + item.rest_height, 0.0),
        );
        item.state = CargoState::Deposited;
        log::info!("Cargo {index} deposited");
    }

    /// Gives up on a stalled sequence: the object goes back where it spawned.
    fn abort(
        &mut self,
        scene: &mut Scene,
        parts: &mut PartRegistry,
        rig: &CraneRig,
        cargo: &mut [Cargo],
    ) {
        for part in rig.owned_parts() {
            parts.clear_flags(part);
        }

        if let Some(index) = self.cargo.take() {
            if let Some(item) = cargo.get_mut(index) {
                scene.set_object_parent(item.object, None);
                scene.set_object_translation(item.object, item.spawn);
                item.state = CargoState::Live;
            }
        }

        self.enter(Stage::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_angle_ignores_height() {
        let a = Vec3::new(1.0, 10.0, 0.0);
        let b = Vec3::new(0.0, -3.0, 2.0);
        assert!((horizontal_angle(a, b) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(horizontal_angle(Vec3::Y, b), 0.0);
    }
}

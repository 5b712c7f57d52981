use std::collections::HashMap;

use glam::Vec3;

use crate::animation::movement::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn of(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    pub fn with(self, mut v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
        v
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Adds to the Euler angle on the profile axis. Unclamped rotations keep
    /// accumulating and are never wrapped back into `[min, max]`.
    Rotate { clamp: bool },
    Translate,
    /// The node hangs from `anchor` along the negative axis and its mesh was
    /// built `reference_length` long. Input along the positive axis shortens
    /// it, which reels the hanging end up.
    Resize { reference_length: f32, anchor: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rate {
    /// Crosses the whole `[min, max]` range in this many seconds.
    Sweep { seconds: f32 },
    /// Constant speed in units (or radians) per second.
    Fixed { per_second: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DofProfile {
    pub axis: Axis,
    pub min: f32,
    pub max: f32,
    pub motion: Motion,
    pub rate: Rate,
    /// Reverse the part's direction sign whenever the clamped value lands
    /// exactly on `min` or `max`.
    pub bounce: bool,
}

impl DofProfile {
    pub fn new(axis: Axis, min: f32, max: f32, motion: Motion, rate: Rate) -> Self {
        Self {
            axis,
            min,
            max,
            motion,
            rate,
            bounce: false,
        }
    }

    pub fn bouncing(mut self) -> Self {
        self.bounce = true;
        self
    }

    pub fn velocity(&self) -> f32 {
        match self.rate {
            Rate::Sweep { seconds } => (self.max - self.min) / seconds,
            Rate::Fixed { per_second } => per_second,
        }
    }

    pub fn is_clamped(&self) -> bool {
        !matches!(self.motion, Motion::Rotate { clamp: false })
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Exact comparison; clamping produces the bound bit for bit.
    pub fn lands_on_bound(&self, value: f32) -> bool {
        value == self.min || value == self.max
    }

    /// The bound the controlled value heads to while `direction` is held, or
    /// `None` if the direction is off-axis or the profile is unbounded.
    pub fn limit_toward(&self, direction: Direction) -> Option<f32> {
        if direction.axis() != self.axis || !self.is_clamped() {
            return None;
        }

        let increases = match self.motion {
            Motion::Resize { .. } => !direction.is_positive(),
            Motion::Rotate { .. } | Motion::Translate => direction.is_positive(),
        };

        Some(if increases { self.max } else { self.min })
    }
}

/// Named motion profiles for one scene. Parts look their profile up here
/// once, when they are registered.
#[derive(Debug, Clone, Default)]
pub struct DofTable {
    profiles: HashMap<&'static str, DofProfile>,
}

impl DofTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, profile: DofProfile) -> Self {
        self.profiles.insert(name, profile);
        self
    }

    pub fn get(&self, name: &str) -> Option<&DofProfile> {
        self.profiles.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn sweep_velocity_covers_range_in_time() {
        let profile = DofProfile::new(
            Axis::X,
            3.5,
            18.0,
            Motion::Translate,
            Rate::Sweep { seconds: 4.0 },
        );
        assert_eq!(profile.velocity(), 14.5 / 4.0);

        let spin = DofProfile::new(
            Axis::Y,
            -PI,
            PI,
            Motion::Rotate { clamp: false },
            Rate::Fixed { per_second: 0.5 },
        );
        assert_eq!(spin.velocity(), 0.5);
        assert!(!spin.is_clamped());
        assert_eq!(spin.limit_toward(Direction::YPositive), None);
    }

    #[test]
    fn resize_limits_run_against_the_axis() {
        let cable = DofProfile::new(
            Axis::Y,
            0.0,
            15.0,
            Motion::Resize {
                reference_length: 10.0,
                anchor: -1.0,
            },
            Rate::Sweep { seconds: 4.0 },
        );
        assert_eq!(cable.limit_toward(Direction::YPositive), Some(0.0));
        assert_eq!(cable.limit_toward(Direction::YNegative), Some(15.0));
        assert_eq!(cable.limit_toward(Direction::XPositive), None);
    }

    #[test]
    fn table_lookup() {
        let table = DofTable::new().with(
            "trolley",
            DofProfile::new(
                Axis::X,
                0.0,
                1.0,
                Motion::Translate,
                Rate::Sweep { seconds: 1.0 },
            ),
        );
        assert!(table.get("trolley").is_some());
        assert!(table.get("jib").is_none());
        assert_eq!(Axis::Z.with(Vec3::ONE, 4.0), Vec3::new(1.0, 1.0, 4.0));
    }
}

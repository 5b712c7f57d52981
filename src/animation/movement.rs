use bitflags::bitflags;
use glam::Vec3;

use crate::animation::dof::Axis;

bitflags! {
    /// Directional inputs currently held for one dynamic part.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MovementFlags: u8 {
        const X_POSITIVE = 1 << 0;
        const X_NEGATIVE = 1 << 1;
        const Y_POSITIVE = 1 << 2;
        const Y_NEGATIVE = 1 << 3;
        const Z_POSITIVE = 1 << 4;
        const Z_NEGATIVE = 1 << 5;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    XPositive,
    XNegative,
    YPositive,
    YNegative,
    ZPositive,
    ZNegative,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::XPositive,
        Direction::XNegative,
        Direction::YPositive,
        Direction::YNegative,
        Direction::ZPositive,
        Direction::ZNegative,
    ];

    pub fn unit(self) -> Vec3 {
        match self {
            Direction::XPositive => Vec3::X,
            Direction::XNegative => Vec3::NEG_X,
            Direction::YPositive => Vec3::Y,
            Direction::YNegative => Vec3::NEG_Y,
            Direction::ZPositive => Vec3::Z,
            Direction::ZNegative => Vec3::NEG_Z,
        }
    }

    pub fn flag(self) -> MovementFlags {
        match self {
            Direction::XPositive => MovementFlags::X_POSITIVE,
            Direction::XNegative => MovementFlags::X_NEGATIVE,
            Direction::YPositive => MovementFlags::Y_POSITIVE,
            Direction::YNegative => MovementFlags::Y_NEGATIVE,
            Direction::ZPositive => MovementFlags::Z_POSITIVE,
            Direction::ZNegative => MovementFlags::Z_NEGATIVE,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::XPositive | Direction::XNegative => Axis::X,
            Direction::YPositive | Direction::YNegative => Axis::Y,
            Direction::ZPositive | Direction::ZNegative => Axis::Z,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(
            self,
            Direction::XPositive | Direction::YPositive | Direction::ZPositive
        )
    }
}

/// Per-frame displacement for a set of held flags: the held unit vectors are
/// summed (so opposing flags cancel), normalized, then scaled by
/// `velocity * time_delta`. No held flag, or only cancelling ones, gives zero.
pub fn displacement(flags: MovementFlags, velocity: f32, time_delta: f32) -> Vec3 {
    let sum: Vec3 = Direction::ALL
        .iter()
        .filter(|direction| flags.contains(direction.flag()))
        .map(|direction| direction.unit())
        .sum();

    sum.normalize_or_zero() * (velocity * time_delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_is_zero_not_nan() {
        let d = displacement(MovementFlags::empty(), 3.0, 0.016);
        assert_eq!(d, Vec3::ZERO);
        assert!(!d.is_nan());
    }

    #[test]
    fn opposing_flags_cancel() {
        let flags = MovementFlags::Y_POSITIVE | MovementFlags::Y_NEGATIVE;
        assert_eq!(displacement(flags, 3.0, 1.0), Vec3::ZERO);

        let flags = flags | MovementFlags::X_POSITIVE;
        assert!(displacement(flags, 2.0, 0.5).abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn diagonal_is_normalized_before_scaling() {
        let flags = MovementFlags::X_POSITIVE | MovementFlags::Z_NEGATIVE;
        let d = displacement(flags, 4.0, 0.25);
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!(d.x > 0.0 && d.z < 0.0);
    }

    #[test]
    fn direction_tables_agree() {
        for direction in Direction::ALL {
            let unit = direction.unit();
            assert_eq!(direction.axis().of(unit).abs(), 1.0);
            assert_eq!(direction.axis().of(unit) > 0.0, direction.is_positive());
            assert_eq!(direction.flag().bits().count_ones(), 1);
        }
    }
}

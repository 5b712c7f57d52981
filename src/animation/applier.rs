//! Transform appliers, one per [`Motion`] variant. Each takes the component
//! of the frame's displacement on the profile axis and returns the new
//! controlled value.

use crate::animation::dof::{DofProfile, Motion};
use crate::scene_graph::transform::Transform;

pub fn rotate(transform: &mut Transform, profile: &DofProfile, clamp: bool, delta: f32) -> f32 {
    let rotation = transform.rotation();
    let mut value = profile.axis.of(rotation) + delta;
    if clamp {
        value = profile.clamp(value);
    }

    transform.set_rotation(profile.axis.with(rotation, value));
    value
}

pub fn translate(transform: &mut Transform, profile: &DofProfile, delta: f32) -> f32 {
    let translation = transform.translation();
    let value = profile.clamp(profile.axis.of(translation) + delta);

    transform.set_translation(profile.axis.with(translation, value));
    value
}

/// Changes the logical length of a hanging node and re-derives its position
/// (so the anchored end stays put) and its scale along the axis (relative to
/// the length its mesh was built at).
pub fn resize(
    transform: &mut Transform,
    profile: &DofProfile,
    reference_length: f32,
    anchor: f32,
    length: f32,
    delta: f32,
) -> f32 {
    let length = profile.clamp(length - delta);

    let translation = profile.axis.with(transform.translation(), anchor - length / 2.0);
    let scale = profile.axis.with(transform.scale(), length / reference_length);
    transform.set_translation(translation);
    transform.set_scale(scale);

    length
}

/// Dispatches on the profile's motion kind. `length` is only read by resize
/// profiles.
pub fn apply(transform: &mut Transform, profile: &DofProfile, length: f32, delta: f32) -> f32 {
    match profile.motion {
        Motion::Rotate { clamp } => rotate(transform, profile, clamp, delta),
        Motion::Translate => translate(transform, profile, delta),
        Motion::Resize {
            reference_length,
            anchor,
        } => resize(transform, profile, reference_length, anchor, length, delta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::dof::{Axis, Rate};
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::{FRAC_PI_4, PI};

    const SEED: u64 = 0x00C0_FFEE;

    fn sweep(axis: Axis, min: f32, max: f32, motion: Motion) -> DofProfile {
        DofProfile::new(axis, min, max, motion, Rate::Sweep { seconds: 4.0 })
    }

    #[test]
    fn bounded_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let profiles = [
            sweep(Axis::Z, -FRAC_PI_4, 0.0, Motion::Rotate { clamp: true }),
            sweep(Axis::X, 3.5, 18.0, Motion::Translate),
            sweep(
                Axis::Y,
                0.0,
                15.0,
                Motion::Resize {
                    reference_length: 10.0,
                    anchor: -1.0,
                },
            ),
        ];

        for profile in profiles {
            let mut transform = Transform::from_translation(Vec3::ZERO);
            let mut value = profile.min;
            for _ in 0..2000 {
                let delta = rng.gen_range(-3.0..3.0);
                value = apply(&mut transform, &profile, value, delta);
                assert!(value >= profile.min && value <= profile.max, "{value} escaped");
            }
        }
    }

    #[test]
    fn unclamped_rotation_accumulates_past_pi() {
        let profile = sweep(Axis::Y, -PI, PI, Motion::Rotate { clamp: false });
        let mut transform = Transform::from_translation(Vec3::ZERO);
        let mut value = 0.0;
        for _ in 0..10 {
            value = apply(&mut transform, &profile, 0.0, 1.0);
        }
        assert_eq!(value, 10.0);
        assert_eq!(transform.rotation().y, 10.0);
    }

    #[test]
    fn translation_clamps_exactly_on_far_bound() {
        let profile = sweep(Axis::X, 3.5, 18.0, Motion::Translate);
        let mut transform = Transform::from_translation(Vec3::new(5.0, 2.0, 0.0));
        let step = profile.velocity() / 60.0;
        let ticks = (13.0 / step) as usize + 10;

        let mut value = 5.0;
        for _ in 0..ticks {
            value = translate(&mut transform, &profile, step);
        }
        assert_eq!(value, 18.0);
        assert_eq!(transform.translation(), Vec3::new(18.0, 2.0, 0.0));
        assert!(profile.lands_on_bound(value));
    }

    #[test]
    fn resize_clamps_and_keeps_anchor() {
        let profile = sweep(
            Axis::Y,
            0.0,
            9.0,
            Motion::Resize {
                reference_length: 9.0,
                anchor: -1.0,
            },
        );
        let mut transform = Transform::from_translation(Vec3::ZERO);

        // Paying out from fully reeled in: cumulative delta exceeds the range.
        let mut length = 0.0;
        for _ in 0..20 {
            length = resize(&mut transform, &profile, 9.0, -1.0, length, -0.5);
        }
        assert_eq!(length, 9.0);
        assert_eq!(transform.scale().y, 1.0);
        assert_eq!(transform.translation().y, -1.0 - 4.5);

        // The top end stays at the anchor while the length shrinks.
        let length = resize(&mut transform, &profile, 9.0, -1.0, length, 3.0);
        assert_eq!(length, 6.0);
        let top = transform.translation().y + length / 2.0;
        assert_eq!(top, -1.0);
        assert!((transform.scale().y - 6.0 / 9.0).abs() < 1e-6);
    }
}

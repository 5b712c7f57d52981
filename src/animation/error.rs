use thiserror::Error;

/// Faults surfaced while wiring the animation core to a scene. Everything
/// here is raised at construction time; the per-frame path cannot fail.
#[derive(Error, Debug)]
pub enum AnimationError {
    #[error("part `{part}` refers to unconfigured DOF profile `{profile}`")]
    UnconfiguredProfile { part: String, profile: String },

    #[error("no dynamic part named `{0}`")]
    UnknownPart(String),

    #[error("part `{0}` uses a resize profile but was registered without a length")]
    MissingLength(String),

    #[error("part `{part}` has invalid DOF bounds [{min}, {max}]")]
    InvalidBounds { part: String, min: f32, max: f32 },

    #[error(
        "no free spot for an object of radius {radius} after {attempts} attempts and a grid scan"
    )]
    NoFreePlacement { radius: f32, attempts: usize },
}

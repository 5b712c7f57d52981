//! Procedural animation core: motion profiles, held-input flags, transform
//! appliers, collision checks and the pickup choreography.

pub mod applier;
pub mod choreographer;
pub mod collision;
pub mod dof;
pub mod error;
pub mod movement;
pub mod registry;

pub use choreographer::{Choreographer, CraneRig, Stage};
pub use collision::{Cargo, CargoState, PlacementArea};
pub use dof::{Axis, DofProfile, DofTable, Motion, Rate};
pub use error::AnimationError;
pub use movement::Direction;
pub use registry::{PartId, PartRegistry};

pub mod object3d;
pub mod primitive;
pub mod scene;
pub mod transform;

// Re-export main types for convenience
pub use object3d::{Object3D, ObjectId};
pub use primitive::Primitive;
pub use scene::Scene;

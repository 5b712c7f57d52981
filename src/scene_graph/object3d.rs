use glam::Vec3;
use id_arena::Id;

use crate::scene_graph::primitive::Primitive;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

pub struct Object3D {
    pub name: String,
    pub transform: Transform,
    pub primitive: Option<Primitive>,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
}

impl Object3D {
    /// An empty node used to group children, like a three.js `Group`.
    pub fn group(name: impl Into<String>, translation: Vec3) -> Self {
        Self {
            name: name.into(),
            transform: Transform::from_translation(translation),
            ..Default::default()
        }
    }

    pub fn mesh(name: impl Into<String>, primitive: Primitive, translation: Vec3) -> Self {
        Self {
            name: name.into(),
            transform: Transform::from_translation(translation),
            primitive: Some(primitive),
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.set_rotation(rotation);
        self
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Transform::from_translation(Vec3::ZERO),
            primitive: None,
            parent_id: None,
            child_ids: Vec::new(),
        }
    }
}

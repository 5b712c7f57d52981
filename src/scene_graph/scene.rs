use glam::{Mat4, Vec3};
use id_arena::Arena;

use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::transform::Transform;

pub struct Scene {
    pub objects: Arena<Object3D>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    /// Adds `object` and attaches it under `parent` in one step.
    pub fn add_child(&mut self, parent: ObjectId, object: Object3D) -> ObjectId {
        let object_id = self.add_object(object);
        self.set_object_parent(object_id, Some(parent));
        object_id
    }

    #[cfg(test)]
    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    /// Nodes that carry geometry, as opposed to grouping nodes.
    pub fn mesh_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|(_, object)| object.primitive.is_some())
            .count()
    }

    /// Updates all object transforms in hierarchical order
    fn update_transforms(&self) {
        let root_objects = self.objects.iter().filter_map(|(id, object)| {
            if object.parent_id.is_none() {
                Some(id)
            } else {
                None
            }
        });

        for root_id in root_objects {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY);
        }
    }

    /// Recursively updates an object's world transform and its children
    fn update_object_transform_recursive(&self, object_id: ObjectId, parent_world_matrix: Mat4) {
        if let Some(object) = self.objects.get(object_id) {
            if object.transform.is_world_dirty() {
                let local_matrix = *object.transform.get_local_matrix();
                let world_matrix = parent_world_matrix * local_matrix;
                object.transform.set_world_matrix(world_matrix);
            }

            let world_matrix = *object.transform.get_world_matrix();
            for &child_id in &object.child_ids {
                self.update_object_transform_recursive(child_id, world_matrix);
            }
        }
    }

    /// Invalidates world transforms for an object and all its descendants
    pub fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        if let Some(object) = self.objects.get(object_id) {
            object.transform.invalidate_world();

            for &child_id in &object.child_ids {
                self.invalidate_object_hierarchy(child_id);
            }
        }
    }

    /// Sets the parent of an object and updates child relationships.
    /// The local transform is kept as is, so the object jumps to the same
    /// offset relative to its new parent.
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }

        self.invalidate_object_hierarchy(child_id);

        if let Some(child) = self.objects.get(child_id) {
            let parent_name = new_parent_id
                .and_then(|id| self.objects.get(id))
                .map_or("scene root", |parent| parent.name.as_str());
            log::trace!("{} now under {parent_name}", child.name);
        }
    }

    pub fn set_object_translation(&mut self, object_id: ObjectId, translation: Vec3) {
        self.modify_transform(object_id, |transform| {
            transform.set_translation(translation)
        });
    }

    #[cfg(test)]
    pub fn set_object_rotation(&mut self, object_id: ObjectId, rotation: Vec3) {
        self.modify_transform(object_id, |transform| transform.set_rotation(rotation));
    }

    /// Runs `f` against the object's local transform and invalidates the
    /// world transforms below it. Returns `None` for a stale id.
    pub fn modify_transform<R>(
        &mut self,
        object_id: ObjectId,
        f: impl FnOnce(&mut Transform) -> R,
    ) -> Option<R> {
        let result = self
            .objects
            .get_mut(object_id)
            .map(|object| f(&mut object.transform))?;
        self.invalidate_object_hierarchy(object_id);
        Some(result)
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    /// World matrix computed from the current local transforms, independent
    /// of the per-frame cache refreshed in `late_update`.
    pub fn world_matrix(&self, object_id: ObjectId) -> Mat4 {
        let Some(object) = self.objects.get(object_id) else {
            return Mat4::IDENTITY;
        };

        let local_matrix = *object.transform.get_local_matrix();
        match object.parent_id {
            Some(parent_id) => self.world_matrix(parent_id) * local_matrix,
            None => local_matrix,
        }
    }

    pub fn world_position(&self, object_id: ObjectId) -> Vec3 {
        self.world_matrix(object_id).transform_point3(Vec3::ZERO)
    }

    pub fn late_update(&mut self) {
        self.update_transforms();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_position_composes_parents() {
        let mut scene = Scene::new();
        let root = scene.add_object(Object3D::group("root", Vec3::new(0.0, 1.0, 0.0)));
        let arm = scene.add_child(root, Object3D::group("arm", Vec3::new(2.0, 0.0, 0.0)));
        let tip = scene.add_child(arm, Object3D::group("tip", Vec3::new(0.0, -3.0, 0.0)));

        assert!(scene
            .world_position(tip)
            .abs_diff_eq(Vec3::new(2.0, -2.0, 0.0), 1e-6));

        scene.set_object_rotation(root, Vec3::new(0.0, std::f32::consts::PI, 0.0));
        assert!(scene
            .world_position(tip)
            .abs_diff_eq(Vec3::new(-2.0, -2.0, 0.0), 1e-5));
    }

    #[test]
    fn reparenting_moves_child_lists() {
        let mut scene = Scene::new();
        let a = scene.add_object(Object3D::group("a", Vec3::ZERO));
        let b = scene.add_object(Object3D::group("b", Vec3::new(5.0, 0.0, 0.0)));
        let cargo = scene.add_child(a, Object3D::group("cargo", Vec3::Y));

        scene.set_object_parent(cargo, Some(b));

        assert!(scene.get_object(a).unwrap().child_ids.is_empty());
        assert_eq!(scene.get_object(b).unwrap().child_ids, vec![cargo]);
        assert_eq!(scene.get_object(cargo).unwrap().parent_id, Some(b));
        assert!(scene
            .world_position(cargo)
            .abs_diff_eq(Vec3::new(5.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    fn late_update_refreshes_cached_world_matrices() {
        let mut scene = Scene::new();
        let root = scene.add_object(Object3D::group("root", Vec3::ZERO));
        let child = scene.add_child(root, Object3D::group("child", Vec3::X));

        scene.late_update();
        scene.set_object_translation(root, Vec3::Z);
        scene.late_update();

        let cached = *scene.get_object_transform(child).unwrap().get_world_matrix();
        assert_eq!(cached, scene.world_matrix(child));
    }
}

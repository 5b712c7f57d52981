use glam::{EulerRot, Mat4, Quat, Vec3};
use std::cell::{Cell, Ref, RefCell};

/// Local transform of a scene node. Rotation is kept as XYZ Euler angles so
/// that animation code can drive a single axis directly.
#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec3,
    rotation: Vec3,
    scale: Vec3,

    local_matrix: RefCell<Mat4>,
    world_matrix: RefCell<Mat4>,
    local_dirty: Cell<bool>,
    world_dirty: Cell<bool>,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            local_matrix: RefCell::new(Mat4::IDENTITY),
            world_matrix: RefCell::new(Mat4::IDENTITY),
            local_dirty: Cell::new(true),
            world_dirty: Cell::new(true),
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    pub fn get_local_matrix(&self) -> Ref<'_, Mat4> {
        if self.local_dirty.get() {
            let matrix =
                Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.translation);

            self.local_matrix.replace(matrix);
            self.local_dirty.set(false);
            self.invalidate_world();
        }

        self.local_matrix.borrow()
    }

    pub fn get_world_matrix(&self) -> Ref<'_, Mat4> {
        self.world_matrix.borrow()
    }

    pub fn set_world_matrix(&self, world_matrix: Mat4) {
        self.world_matrix.replace(world_matrix);
        self.world_dirty.set(false);
    }

    pub fn invalidate_local(&self) {
        self.local_dirty.set(true);
        self.world_dirty.set(true);
    }

    pub fn invalidate_world(&self) {
        self.world_dirty.set(true);
    }

    pub fn is_world_dirty(&self) -> bool {
        self.world_dirty.get()
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.invalidate_local();
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.invalidate_local();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.invalidate_local();
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn local_matrix_tracks_setters() {
        let mut transform = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let point = transform.get_local_matrix().transform_point3(Vec3::ZERO);
        assert!(point.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-6));

        transform.set_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let x_axis = transform.get_local_matrix().transform_vector3(Vec3::X);
        assert!(x_axis.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));

        transform.set_scale(Vec3::new(1.0, 2.0, 1.0));
        let up = transform.get_local_matrix().transform_vector3(Vec3::Y);
        assert!(up.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn world_matrix_is_dirty_until_refreshed() {
        let mut transform = Transform::from_translation(Vec3::ZERO);
        assert!(transform.is_world_dirty());
        transform.set_world_matrix(Mat4::IDENTITY);
        assert!(!transform.is_world_dirty());
        transform.set_translation(Vec3::Y);
        assert!(transform.is_world_dirty());
    }
}

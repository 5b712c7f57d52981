use glam::{Mat4, Vec3};

/// Region every orthographic camera keeps fully in view.
const VIEW_MIN: Vec3 = Vec3::new(-20.0, -15.0, -20.0);
const VIEW_MAX: Vec3 = Vec3::new(20.0, 35.0, 20.0);

const ORTHOGRAPHIC_DISTANCE: f32 = 25.0;
const ORTHOGRAPHIC_NEAR: f32 = 0.5;
const ORTHOGRAPHIC_FAR: f32 = 1000.0;
const PERSPECTIVE_DISTANCE: f32 = 30.0;
const PERSPECTIVE_FOV_DEGREES: f32 = 70.0;
const PERSPECTIVE_NEAR: f32 = 1.0;
const PERSPECTIVE_FAR: f32 = 1000.0;

/// Where the mobile camera sits relative to the claw.
const MOBILE_OFFSET: Vec3 = Vec3::new(5.0, 5.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKind {
    Front,
    Side,
    Top,
    Orthographic,
    Perspective,
    Mobile,
}

impl CameraKind {
    pub const ALL: [CameraKind; 6] = [
        CameraKind::Front,
        CameraKind::Side,
        CameraKind::Top,
        CameraKind::Orthographic,
        CameraKind::Perspective,
        CameraKind::Mobile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CameraKind::Front => "front",
            CameraKind::Side => "side",
            CameraKind::Top => "top",
            CameraKind::Orthographic => "orthographic",
            CameraKind::Perspective => "perspective",
            CameraKind::Mobile => "mobile",
        }
    }
}

/// Orthographic view volume bounds in camera space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoFrustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl OrthoFrustum {
    /// Smallest frustum with the given aspect ratio that shows the view
    /// region. `bottom_axis` and `side_axis` are the world directions of the
    /// screen's horizontal and vertical edges. Mirroring flips both.
    pub fn fit(bottom_axis: Vec3, side_axis: Vec3, aspect: f32, mirror: bool) -> Self {
        let max_left = bottom_axis.dot(VIEW_MAX);
        let min_right = bottom_axis.dot(VIEW_MIN);
        let min_top = side_axis.dot(VIEW_MAX);
        let max_bottom = side_axis.dot(VIEW_MIN);

        let min_width = (min_right - max_left).abs();
        let min_height = (min_top - max_bottom).abs();
        let offset_x = (min_right + max_left) / 2.0;
        let offset_y = (min_top + max_bottom) / 2.0;

        let mut height = min_height;
        let mut width = height * aspect;
        if width < min_width {
            width = min_width;
            height = width / aspect;
        }

        if mirror {
            width = -width;
            height = -height;
        }

        Self {
            left: -width / 2.0 + offset_x,
            right: width / 2.0 + offset_x,
            top: height / 2.0 + offset_y,
            bottom: -height / 2.0 + offset_y,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Projection {
    Orthographic {
        bottom_axis: Vec3,
        side_axis: Vec3,
        mirror: bool,
        frustum: OrthoFrustum,
    },
    Perspective {
        aspect: f32,
    },
}

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
}

impl Camera {
    fn orthographic(eye: Vec3, up: Vec3, bottom_axis: Vec3, side_axis: Vec3, mirror: bool) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up,
            projection: Projection::Orthographic {
                bottom_axis,
                side_axis,
                mirror,
                frustum: OrthoFrustum::fit(bottom_axis, side_axis, 1.0, mirror),
            },
        }
    }

    fn perspective(eye: Vec3) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::Perspective { aspect: 1.0 },
        }
    }

    pub fn preset(kind: CameraKind) -> Self {
        match kind {
            CameraKind::Front => Self::orthographic(
                Vec3::Z * ORTHOGRAPHIC_DISTANCE,
                Vec3::Y,
                Vec3::NEG_X,
                Vec3::Y,
                false,
            ),
            CameraKind::Side => Self::orthographic(
                Vec3::X * ORTHOGRAPHIC_DISTANCE,
                Vec3::Y,
                Vec3::NEG_Z,
                Vec3::Y,
                false,
            ),
            CameraKind::Top => Self::orthographic(
                Vec3::Y * ORTHOGRAPHIC_DISTANCE,
                Vec3::NEG_Z,
                Vec3::X,
                Vec3::NEG_Z,
                true,
            ),
            CameraKind::Orthographic => Self::orthographic(
                Vec3::splat(PERSPECTIVE_DISTANCE),
                Vec3::Y,
                Vec3::new(1.0, 0.0, 1.0).normalize(),
                Vec3::Y,
                false,
            ),
            CameraKind::Perspective => Self::perspective(Vec3::splat(PERSPECTIVE_DISTANCE)),
            CameraKind::Mobile => Self::perspective(MOBILE_OFFSET),
        }
    }

    /// Recomputes the projection for a new viewport aspect ratio.
    pub fn refresh(&mut self, aspect: f32) {
        match &mut self.projection {
            Projection::Orthographic {
                bottom_axis,
                side_axis,
                mirror,
                frustum,
            } => *frustum = OrthoFrustum::fit(*bottom_axis, *side_axis, aspect, *mirror),
            Projection::Perspective { aspect: current } => *current = aspect,
        }
    }

    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn get_projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Orthographic { frustum, .. } => Mat4::orthographic_rh(
                frustum.left,
                frustum.right,
                frustum.bottom,
                frustum.top,
                ORTHOGRAPHIC_NEAR,
                ORTHOGRAPHIC_FAR,
            ),
            Projection::Perspective { aspect } => Mat4::perspective_rh(
                PERSPECTIVE_FOV_DEGREES.to_radians(),
                aspect,
                PERSPECTIVE_NEAR,
                PERSPECTIVE_FAR,
            ),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.get_projection_matrix() * self.get_view_matrix()
    }
}

/// The six presets plus the one currently shown.
pub struct CameraRig {
    cameras: Vec<(CameraKind, Camera)>,
    active: CameraKind,
    aspect: f32,
}

impl CameraRig {
    pub fn new(aspect: f32) -> Self {
        let mut rig = Self {
            cameras: CameraKind::ALL
                .into_iter()
                .map(|kind| (kind, Camera::preset(kind)))
                .collect(),
            active: CameraKind::Front,
            aspect,
        };
        rig.resize(aspect);
        rig
    }

    pub fn active_kind(&self) -> CameraKind {
        self.active
    }

    pub fn get(&self, kind: CameraKind) -> Option<&Camera> {
        self.cameras
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, camera)| camera)
    }

    fn get_mut(&mut self, kind: CameraKind) -> Option<&mut Camera> {
        self.cameras
            .iter_mut()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, camera)| camera)
    }

    pub fn active(&self) -> Option<&Camera> {
        self.get(self.active)
    }

    /// Switches cameras, fitting the new one to the current viewport first.
    pub fn select(&mut self, kind: CameraKind) {
        let aspect = self.aspect;
        if let Some(camera) = self.get_mut(kind) {
            camera.refresh(aspect);
            self.active = kind;
            log::info!("Switched to {} camera", kind.label());
        }
    }

    pub fn resize(&mut self, aspect: f32) {
        if !(aspect.is_finite() && aspect > 0.0) {
            log::warn!("Ignoring degenerate aspect ratio {aspect}");
            return;
        }

        self.aspect = aspect;
        let active = self.active;
        if let Some(camera) = self.get_mut(active) {
            camera.refresh(aspect);
        }
    }

    /// Keeps the mobile camera at a fixed offset from the claw, looking the
    /// same way relative to it.
    pub fn follow(&mut self, claw_world: Mat4) {
        if let Some(camera) = self.get_mut(CameraKind::Mobile) {
            camera.eye = claw_world.transform_point3(MOBILE_OFFSET);
            camera.target = camera.eye + claw_world.transform_vector3(-MOBILE_OFFSET);
        }
    }
}

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI};

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::collision;
use crate::animation::{
    AnimationError, Axis, Cargo, CargoState, Choreographer, CraneRig, Direction, DofProfile,
    DofTable, Motion, PartRegistry, PlacementArea, Rate, Stage,
};
use crate::config::CraneConfig;
use crate::math::bounds::{BoundingSphere, Rect};
use crate::scene_graph::{Object3D, ObjectId, Primitive, Scene};

// Box sizes are (width, height, depth) along (X, Y, Z).
const BASE: Vec3 = Vec3::new(6.0, 2.0, 6.0);
const TOWER: Vec3 = Vec3::new(2.0, 17.0, 2.0);
const CAB: Vec3 = Vec3::new(4.0, 3.0, 4.0);
const APEX_SIDE: f32 = 4.0;
const APEX_HEIGHT: f32 = 5.0;
const JIB: Vec3 = Vec3::new(19.0, 2.0, 2.0);
const COUNTERJIB: Vec3 = Vec3::new(11.0, 2.0, 2.0);
const COUNTERWEIGHT: Vec3 = Vec3::new(4.0, 2.0, 2.0);
const PENDANT_RADIUS: f32 = 0.1;
const REAR_PENDANT_LENGTH: f32 = 10.0;
const FRONT_PENDANT_LENGTH: f32 = 18.5;
const TROLLEY: Vec3 = Vec3::new(3.0, 2.0, 2.0);
const CABLE_RADIUS: f32 = 0.3;
/// The cable mesh is built at this length, which is also its starting length.
const CABLE_LENGTH: f32 = 10.0;
const CABLE_MAX_LENGTH: f32 = 15.0;
const CLAW_WRIST_RADIUS: f32 = 0.5;
const FINGER_BODY: Vec3 = Vec3::new(1.5, 0.2, 0.2);
const FINGER_TIP_SIDE: f32 = 0.2;
const FINGER_TIP_LENGTH: f32 = 1.0;

const CONTAINER_POSITION: Vec3 = Vec3::new(12.0, 0.0, 15.0);
const CONTAINER_FLOOR: Vec3 = Vec3::new(10.0, 0.2, 6.0);
const CONTAINER_WALL_HEIGHT: f32 = 7.0;
const CONTAINER_WALL_THICKNESS: f32 = 0.2;

/// Name, shape and resting height of each cargo object.
const CARGO: [(&str, Primitive, f32); 5] = [
    (
        "object1",
        Primitive::Box {
            size: Vec3::new(2.0, 3.0, 2.0),
        },
        1.5,
    ),
    ("object2", Primitive::Dodecahedron { radius: 1.5 }, 1.5),
    ("object3", Primitive::Icosahedron { radius: 2.0 }, 2.0),
    ("object4", Primitive::Torus { radius: 1.75 }, 1.75),
    ("object5", Primitive::TorusKnot { radius: 1.0 }, 1.8),
];

pub const CABLE_PARTS: [&str; 2] = ["cable", "claw"];

fn crane_profiles(config: &CraneConfig) -> DofTable {
    let sweep = Rate::Sweep {
        seconds: config.movement_time,
    };

    DofTable::new()
        .with(
            "top",
            DofProfile::new(Axis::Y, -PI, PI, Motion::Rotate { clamp: false }, sweep),
        )
        .with(
            "trolley",
            DofProfile::new(
                Axis::X,
                CAB.x / 2.0 + TROLLEY.x / 2.0,
                JIB.x - 1.0,
                Motion::Translate,
                sweep,
            ),
        )
        .with(
            "cable",
            DofProfile::new(
                Axis::Y,
                0.0,
                CABLE_MAX_LENGTH,
                Motion::Resize {
                    reference_length: CABLE_LENGTH,
                    anchor: -TROLLEY.y / 2.0,
                },
                sweep,
            ),
        )
        .with(
            "claw",
            DofProfile::new(
                Axis::Y,
                -(TROLLEY.y / 2.0 + CABLE_MAX_LENGTH + CLAW_WRIST_RADIUS),
                -(TROLLEY.y / 2.0 + CLAW_WRIST_RADIUS),
                Motion::Translate,
                sweep,
            ),
        )
        .with(
            "finger",
            DofProfile::new(Axis::Z, -FRAC_PI_4, 0.0, Motion::Rotate { clamp: true }, sweep),
        )
}

fn mesh(
    scene: &mut Scene,
    parent: ObjectId,
    name: &str,
    primitive: Primitive,
    at: Vec3,
) -> ObjectId {
    scene.add_child(parent, Object3D::mesh(name, primitive, at))
}

fn cuboid(scene: &mut Scene, parent: ObjectId, name: &str, size: Vec3, at: Vec3) -> ObjectId {
    mesh(scene, parent, name, Primitive::Box { size }, at)
}

pub struct CraneDemo {
    pub parts: PartRegistry,
    pub rig: CraneRig,
    pub cargo: Vec<Cargo>,
    pub choreographer: Choreographer,
    claw_reach: f32,
}

impl CraneDemo {
    pub fn build(scene: &mut Scene, config: &CraneConfig) -> Result<Self, AnimationError> {
        let base = scene.add_object(Object3D::group("baseGroup", Vec3::Y * (BASE.y / 2.0)));
        cuboid(scene, base, "base", BASE, Vec3::ZERO);
        cuboid(
            scene,
            base,
            "tower",
            TOWER,
            Vec3::Y * (BASE.y / 2.0 + TOWER.y / 2.0),
        );

        let top = scene.add_child(
            base,
            Object3D::group("topGroup", Vec3::Y * (BASE.y / 2.0 + TOWER.y)),
        );
        build_top(scene, top);

        let trolley = scene.add_child(
            top,
            Object3D::group("trolleyGroup", Vec3::new(JIB.x - 1.0, TROLLEY.y, 0.0)),
        );
        cuboid(scene, trolley, "trolley", TROLLEY, Vec3::ZERO);
        let cable = mesh(
            scene,
            trolley,
            "cable",
            Primitive::Cylinder {
                radius: CABLE_RADIUS,
                height: CABLE_LENGTH,
            },
            Vec3::Y * -((CABLE_LENGTH + TROLLEY.y) / 2.0),
        );

        let claw = scene.add_child(
            trolley,
            Object3D::group(
                "clawGroup",
                Vec3::Y * -(TROLLEY.y / 2.0 + CABLE_LENGTH + CLAW_WRIST_RADIUS),
            ),
        );
        mesh(
            scene,
            claw,
            "clawWrist",
            Primitive::Sphere {
                radius: CLAW_WRIST_RADIUS,
            },
            Vec3::ZERO,
        );
        let fingers = [0.0, PI, FRAC_PI_2, -FRAC_PI_2]
            .into_iter()
            .map(|yaw| build_finger(scene, claw, yaw))
            .collect();

        let container = build_container(scene);
        let cargo = scatter_cargo(scene, config)?;

        let table = crane_profiles(config);
        let mut parts = PartRegistry::new();
        let rig = CraneRig {
            top: parts.register(&table, "top", "top", vec![top])?,
            trolley: parts.register(&table, "trolley", "trolley", vec![trolley])?,
            cable: parts.register_resizable(&table, "cable", "cable", vec![cable], CABLE_LENGTH)?,
            claw: parts.register(&table, "claw", "claw", vec![claw])?,
            claw_node: claw,
            container_node: container,
            container_floor: CONTAINER_FLOOR.y,
        };
        parts.register(&table, "fingers", "finger", fingers)?;

        log::info!(
            "Built crane scene: {} objects, {} meshes, {} cargo",
            scene.objects.len(),
            scene.mesh_count(),
            cargo.len()
        );

        Ok(Self {
            parts,
            rig,
            cargo,
            choreographer: Choreographer::new(config),
            claw_reach: config.claw_reach,
        })
    }

    /// One frame: collision check, choreography stage, then DOF application.
    pub fn update(&mut self, scene: &mut Scene, time_delta: f32) {
        if !self.choreographer.is_active() {
            if let Some(index) =
                collision::find_collision(scene, self.rig.claw_node, self.claw_reach, &self.cargo)
            {
                log::info!("Claw touched cargo {index}");
                self.choreographer
                    .begin(scene, &mut self.parts, &self.rig, &mut self.cargo, index);
            }
        }

        self.choreographer.advance(
            scene,
            &mut self.parts,
            &self.rig,
            &mut self.cargo,
            time_delta,
        );
        self.parts.step_all(scene, time_delta);
    }

    /// Manual input. Parts owned by a running pickup sequence ignore it.
    pub fn drive(&mut self, part_names: &[&str], direction: Direction, held: bool) {
        for name in part_names {
            let id = match self.parts.id(name) {
                Ok(id) => id,
                Err(err) => {
                    log::warn!("{err}");
                    continue;
                }
            };

            if self.choreographer.owns(&self.rig, id) {
                log::trace!("Ignoring input for {name} during pickup");
                continue;
            }
            self.parts.set_flag(id, direction, held);
        }
    }

    pub fn stage(&self) -> Stage {
        self.choreographer.stage()
    }

    pub fn deposited(&self) -> usize {
        self.cargo
            .iter()
            .filter(|item| item.state == CargoState::Deposited)
            .count()
    }
}

fn build_top(scene: &mut Scene, top: ObjectId) {
    cuboid(scene, top, "cab", CAB, Vec3::Y * (CAB.y / 2.0));
    let apex = Object3D::mesh(
        "apex",
        Primitive::Pyramid {
            side: APEX_SIDE,
            height: APEX_HEIGHT,
        },
        Vec3::Y * (CAB.y + APEX_HEIGHT / 2.0),
    )
    .with_rotation(Vec3::new(0.0, FRAC_PI_4, 0.0));
    scene.add_child(top, apex);

    cuboid(
        scene,
        top,
        "counterjib",
        COUNTERJIB,
        Vec3::new(-(CAB.x + COUNTERJIB.x) / 2.0, CAB.y + COUNTERJIB.y / 2.0, 0.0),
    );
    cuboid(
        scene,
        top,
        "counterweight",
        COUNTERWEIGHT,
        Vec3::new(-COUNTERJIB.x + 1.0, COUNTERWEIGHT.y, 0.0),
    );
    cuboid(
        scene,
        top,
        "jib",
        JIB,
        Vec3::new((CAB.x + JIB.x) / 2.0, CAB.y + JIB.y / 2.0, 0.0),
    );

    for (name, length, x, tilt) in [
        ("rearPendant", REAR_PENDANT_LENGTH, -REAR_PENDANT_LENGTH / 2.0, -PI / 2.4),
        ("frontPendant", FRONT_PENDANT_LENGTH, FRONT_PENDANT_LENGTH / 2.0, PI / 2.2),
    ] {
        let pendant = Object3D::mesh(
            name,
            Primitive::Cylinder {
                radius: PENDANT_RADIUS,
                height: length,
            },
            Vec3::new(x, CAB.y / 2.0 + APEX_HEIGHT, 0.0),
        )
        .with_rotation(Vec3::new(0.0, 0.0, tilt));
        scene.add_child(top, pendant);
    }
}

/// A finger hinges at the wrist; `yaw` spreads the four fingers around it.
fn build_finger(scene: &mut Scene, claw: ObjectId, yaw: f32) -> ObjectId {
    let body = scene.add_child(
        claw,
        Object3D::group("fingerBodyGroup", Vec3::ZERO)
            .with_rotation(Vec3::new(0.0, yaw, -FRAC_PI_4)),
    );
    cuboid(
        scene,
        body,
        "clawFingerBody",
        FINGER_BODY,
        Vec3::X * (CLAW_WRIST_RADIUS + FINGER_BODY.x / 2.0),
    );

    let tip = scene.add_child(
        body,
        Object3D::group("fingerTipGroup", Vec3::X * (CLAW_WRIST_RADIUS + FINGER_BODY.x))
            .with_rotation(Vec3::new(0.0, 0.0, -FRAC_PI_3)),
    );
    let tip_mesh = Object3D::mesh(
        "clawFingerTip",
        Primitive::Pyramid {
            side: FINGER_TIP_SIDE,
            height: FINGER_TIP_LENGTH,
        },
        Vec3::X * (FINGER_TIP_LENGTH / 2.0),
    )
    .with_rotation(Vec3::new(0.0, 0.0, -FRAC_PI_2));
    scene.add_child(tip, tip_mesh);

    body
}

fn build_container(scene: &mut Scene) -> ObjectId {
    let container = scene.add_object(Object3D::group("containerGroup", CONTAINER_POSITION));
    let wall_y = CONTAINER_WALL_HEIGHT / 2.0;

    cuboid(
        scene,
        container,
        "containerFloor",
        CONTAINER_FLOOR,
        Vec3::Y * (CONTAINER_FLOOR.y / 2.0),
    );
    for side in [-1.0, 1.0] {
        cuboid(
            scene,
            container,
            "smallContainerWall",
            Vec3::new(CONTAINER_WALL_THICKNESS, CONTAINER_WALL_HEIGHT, CONTAINER_FLOOR.z),
            Vec3::new(side * CONTAINER_FLOOR.x / 2.0, wall_y, 0.0),
        );
        cuboid(
            scene,
            container,
            "bigContainerWall",
            Vec3::new(CONTAINER_FLOOR.x, CONTAINER_WALL_HEIGHT, CONTAINER_WALL_THICKNESS),
            Vec3::new(0.0, wall_y, side * CONTAINER_FLOOR.z / 2.0),
        );
    }

    container
}

/// Footprints cargo must stay clear of: the crane base and the container.
fn cargo_area(config: &CraneConfig) -> PlacementArea {
    PlacementArea {
        reach: JIB.x + CAB.x / 2.0,
        obstacles: vec![
            Rect::centered(Vec2::ZERO, Vec2::new(BASE.x, BASE.z)),
            Rect::centered(
                Vec2::new(CONTAINER_POSITION.x, CONTAINER_POSITION.z),
                Vec2::new(CONTAINER_FLOOR.x, CONTAINER_FLOOR.z),
            ),
        ],
        max_attempts: config.placement_attempts,
    }
}

fn scatter_cargo(scene: &mut Scene, config: &CraneConfig) -> Result<Vec<Cargo>, AnimationError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let area = cargo_area(config);

    let mut placed: Vec<BoundingSphere> = Vec::new();
    let mut cargo = Vec::new();
    for (name, primitive, rest_height) in CARGO {
        let radius = primitive.bounding_sphere().radius;
        let position = area.place_randomly(&mut rng, radius, rest_height, &placed)?;
        log::debug!("Placed {name} at {position}");

        let object = scene.add_object(Object3D::mesh(name, primitive, position));
        placed.push(BoundingSphere::new(position, radius));
        cargo.push(Cargo {
            object,
            radius,
            rest_height,
            spawn: position,
            state: CargoState::Live,
        });
    }

    Ok(cargo)
}

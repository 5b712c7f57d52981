use anyhow::Context;
use glam::Mat4;
use winit::keyboard::KeyCode;

use crate::camera::CameraRig;
use crate::carousel::CarouselDemo;
use crate::config::CraneConfig;
use crate::crane::CraneDemo;
use crate::input::{self, Action, HeldKeys};
use crate::scene_graph::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoChoice {
    Crane,
    Carousel,
}

pub enum ActiveDemo {
    Crane(CraneDemo),
    Carousel(CarouselDemo),
}

pub struct DemoState {
    pub scene: Scene,
    pub cameras: CameraRig,
    pub config: CraneConfig,
    pub demo: ActiveDemo,
    pub wireframe: bool,
    held: HeldKeys,
}

impl DemoState {
    pub fn new(choice: DemoChoice, config: CraneConfig) -> anyhow::Result<Self> {
        let mut scene = Scene::new();
        let demo = match choice {
            DemoChoice::Crane => ActiveDemo::Crane(
                CraneDemo::build(&mut scene, &config).context("Failed to build crane scene")?,
            ),
            DemoChoice::Carousel => ActiveDemo::Carousel(
                CarouselDemo::build(&mut scene, &config)
                    .context("Failed to build carousel scene")?,
            ),
        };

        Ok(Self {
            scene,
            cameras: CameraRig::new(1.0),
            config,
            demo,
            wireframe: false,
            held: HeldKeys::default(),
        })
    }

    fn binding(&self, code: KeyCode) -> Option<Action> {
        match self.demo {
            ActiveDemo::Crane(_) => input::crane_binding(code),
            ActiveDemo::Carousel(_) => input::carousel_binding(code),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool, repeat: bool) {
        if repeat {
            return;
        }
        self.held.update(code, pressed);

        let Some(action) = self.binding(code) else {
            return;
        };
        if !pressed && !action.is_held() {
            return;
        }

        match (action, &mut self.demo) {
            (Action::SelectCamera(kind), _) => self.cameras.select(kind),
            (Action::ToggleWireframe, _) => {
                self.wireframe = !self.wireframe;
                log::info!("Wireframe {}", if self.wireframe { "on" } else { "off" });
            }
            (Action::Drive { parts, direction }, ActiveDemo::Crane(crane)) => {
                crane.drive(parts, direction, pressed)
            }
            (Action::ToggleMotion(name), ActiveDemo::Carousel(carousel)) => carousel.toggle(name),
            (action, _) => log::debug!("{action:?} has no effect in this demo"),
        }
    }

    /// Advances the active demo by `time_delta` seconds, clamped to the
    /// configured maximum.
    pub fn update(&mut self, time_delta: f32) {
        let time_delta = time_delta.clamp(0.0, self.config.max_time_delta);

        match &mut self.demo {
            ActiveDemo::Crane(crane) => {
                crane.update(&mut self.scene, time_delta);
                self.cameras.follow(self.scene.world_matrix(crane.rig.claw_node));
            }
            ActiveDemo::Carousel(carousel) => carousel.update(&mut self.scene, time_delta),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.cameras.resize(width as f32 / height as f32);
    }

    pub fn view_projection(&self) -> Mat4 {
        self.cameras
            .active()
            .map(|camera| camera.view_projection())
            .unwrap_or(Mat4::IDENTITY)
    }

    /// One-line status shown in the window title.
    pub fn hud_text(&self) -> String {
        let status = match &self.demo {
            ActiveDemo::Crane(crane) => format!(
                "pickup: {:?} | carrying: {} | deposited: {}/{}",
                crane.stage(),
                crane
                    .choreographer
                    .cargo()
                    .map_or("-".to_string(), |index| format!("#{index}")),
                crane.deposited(),
                crane.cargo.len()
            ),
            ActiveDemo::Carousel(carousel) => format!("moving rings: {}", carousel.moving_rings()),
        };
        let keys = if self.held.is_empty() {
            "-".to_string()
        } else {
            self.held.label()
        };

        format!(
            "{status} | camera: {} | wireframe: {} | keys: {keys}",
            self.cameras.active_kind().label(),
            if self.wireframe { "on" } else { "off" },
        )
    }
}

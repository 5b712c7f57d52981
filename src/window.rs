use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    config::CraneConfig,
    demo::{DemoChoice, DemoState},
    engine,
};

const TITLE: &str = "Crane";

struct App {
    window: Option<Arc<Window>>,
    demo_state: DemoState,
    last_frame: Instant,
    last_title: String,
}

impl App {
    fn from_demo_state(demo_state: DemoState) -> Self {
        Self {
            window: None,
            demo_state,
            last_frame: Instant::now(),
            last_title: String::new(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if let Err(err) = engine::update(&mut self.demo_state, delta_time) {
            log::error!("Error during engine::update: {err:?}");
            event_loop.exit();
            return;
        }
        log::trace!("view-projection {}", self.demo_state.view_projection());

        let Some(window) = self.window.as_ref() else {
            return;
        };

        let title = format!("{TITLE} | {}", self.demo_state.hud_text());
        if title != self.last_title {
            window.set_title(&title);
            self.last_title = title;
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes().with_title(TITLE);
        match event_loop.create_window(window_attributes) {
            Ok(window) => {
                let size = window.inner_size();
                self.demo_state.resize(size.width, size.height);
                self.last_frame = Instant::now();
                window.request_redraw();
                self.window = Some(Arc::new(window));
            }
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.demo_state.resize(new_size.width, new_size.height);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                self.demo_state
                    .handle_key(code, state == ElementState::Pressed, repeat);
            }
            _ => (),
        }
    }
}

pub fn run(choice: DemoChoice, config: CraneConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let demo_state = DemoState::new(choice, config).context("Failed to create demo state")?;
    let mut app = App::from_demo_state(demo_state);
    event_loop.run_app(&mut app)?;

    Ok(())
}

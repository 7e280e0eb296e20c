//! Scene Viewer - Main Entry Point
//!
//! Interactive 3D scene viewer: loads a scene document, maintains a live
//! transform hierarchy, and routes pointer input through a split-screen
//! viewport manager.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use sceneview_core::FrameTimer;
use sceneview_display::{
    ViewportLayout, ViewportManager, ViewportManip, ViewportPointerEvent, ViewportTriggerEvent,
};
use sceneview_platform::{PointerTracker, Window};
use sceneview_resources::SceneDocument;
use sceneview_scene::{RenderObject, Transform, TransformRef};

/// Downstream consumer that turns viewport events into manipulation logs.
///
/// Stands in for the manipulation controller a full viewer would attach.
#[derive(Default)]
struct ManipLogger {
    dragging: bool,
}

impl ViewportManip for ManipLogger {
    fn on_pointer(&mut self, event: &ViewportPointerEvent) -> bool {
        use sceneview_display::PointerEventType;

        match event.event.event_type {
            PointerEventType::Down => {
                self.dragging = event.viewport.is_some();
                if let Some(viewport) = event.viewport {
                    info!(
                        viewport = viewport.index(),
                        device_x = event.device_x,
                        device_y = event.device_y,
                        "begin manipulation"
                    );
                }
                self.dragging
            }
            PointerEventType::Move => {
                if self.dragging {
                    debug!(
                        device_x = event.device_x,
                        device_y = event.device_y,
                        "drag"
                    );
                }
                self.dragging
            }
            PointerEventType::Up => {
                let consumed = self.dragging;
                self.dragging = false;
                consumed
            }
        }
    }

    fn on_trigger(&mut self, event: &ViewportTriggerEvent) -> bool {
        info!(
            kind = ?event.event.kind,
            viewport = event.viewport.map(|v| v.index()),
            "trigger"
        );
        false
    }
}

struct App {
    window: Option<Window>,
    scene_roots: Vec<TransformRef>,
    viewports: ViewportManager,
    tracker: PointerTracker,
    timer: FrameTimer,
    scene_path: PathBuf,
}

impl App {
    fn new(scene_path: PathBuf) -> Self {
        let mut viewports = ViewportManager::new();
        viewports.set_next(Box::new(ManipLogger::default()));
        viewports.enable_home_grid(true);

        Self {
            window: None,
            scene_roots: Vec::new(),
            viewports,
            tracker: PointerTracker::new(),
            timer: FrameTimer::new(),
            scene_path,
        }
    }

    fn load_scene(&mut self) {
        match SceneDocument::load(&self.scene_path).and_then(|doc| doc.instantiate()) {
            Ok(roots) => {
                info!("Scene ready: {} root node(s)", roots.len());
                self.scene_roots = roots;
            }
            Err(e) => {
                error!("Failed to load scene: {}", e);
            }
        }
    }

    fn update_scene(&mut self) {
        for root in &self.scene_roots {
            Transform::update_hierarchy(root);
            RenderObject::update_world(&root.borrow().object(), false);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match Window::new(event_loop, 1280, 720, "Scene Viewer") {
                Ok(window) => {
                    self.viewports.set_canvas_size(window.width(), window.height());
                    self.tracker.set_target_bounds(window.target_bounds());
                    self.viewports.set_layout(ViewportLayout::Quad);

                    self.load_scene();

                    info!("Initialization complete, entering main loop");
                    self.window = Some(window);
                }
                Err(e) => {
                    error!("Failed to create window: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(ref mut window) = self.window {
                    window.resize(size.width, size.height);
                    self.tracker.set_target_bounds(window.target_bounds());
                }
                self.viewports.set_canvas_size(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .tracker
                    .on_cursor_moved(position.x as f32, position.y as f32);
                self.viewports.on_pointer(&event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = button.into();
                match state {
                    ElementState::Pressed => {
                        let event = self.tracker.on_button_pressed(button);
                        self.viewports.on_pointer(&event);
                    }
                    ElementState::Released => {
                        let (event, trigger) = self.tracker.on_button_released(button);
                        self.viewports.on_pointer(&event);
                        if let Some(trigger) = trigger {
                            self.viewports.on_trigger(&trigger);
                        }
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32,
                };
                let trigger = self.tracker.on_wheel(amount);
                self.viewports.on_trigger(&trigger);
            }
            WindowEvent::RedrawRequested => {
                let _delta = self.timer.delta_secs();
                self.update_scene();

                if self.timer.frame_count() % 300 == 0 {
                    debug!(
                        fps = self.timer.fps(),
                        viewports = self.viewports.viewports().len(),
                        "frame stats"
                    );
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    sceneview_core::init_logging();
    info!("Starting Scene Viewer");

    let scene_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/scenes/demo.json"));

    // Create event loop
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create app and run
    let mut app = App::new(scene_path);
    event_loop.run_app(&mut app)?;

    Ok(())
}

//! A single viewport region of the render surface.

use glam::{Vec2, Vec3};

use sceneview_scene::Camera;

/// Camera projection choice for a viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraType {
    Perspective,
    Orthographic,
}

/// Preset viewing direction for a viewport camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraView {
    Left,
    Right,
    Top,
    Bottom,
    Front,
    Back,
}

impl CameraView {
    /// Camera position for this view at the given orbit distance.
    fn position(self, distance: f32) -> Vec3 {
        match self {
            CameraView::Left => Vec3::new(-distance, 0.0, 0.0),
            CameraView::Right => Vec3::new(distance, 0.0, 0.0),
            CameraView::Top => Vec3::new(0.0, distance, 0.0),
            CameraView::Bottom => Vec3::new(0.0, -distance, 0.0),
            CameraView::Front => Vec3::new(0.0, 0.0, distance),
            CameraView::Back => Vec3::new(0.0, 0.0, -distance),
        }
    }
}

/// Absolute pixel rectangle on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Orbit distance of preset viewport cameras.
const VIEW_DISTANCE: f32 = 10.0;
/// Half-height of the orthographic view volume for preset cameras.
const ORTHO_SIZE: f32 = 5.0;

/// One rectangular region of the render surface.
///
/// The normalized rectangle is the source of truth; the pixel rectangle is
/// derived from it and the canvas size, and recomputed whenever either
/// changes. Viewports are created and indexed by the viewport manager.
#[derive(Clone, Debug)]
pub struct Viewport {
    left: f32,
    top: f32,
    width: f32,
    height: f32,

    canvas_width: f32,
    canvas_height: f32,
    region: ScreenRect,

    index: usize,
    camera: Option<Camera>,
    camera_view: Option<(CameraType, CameraView)>,
    home_grid: bool,
}

impl Viewport {
    /// Create a viewport covering the given normalized rectangle, each
    /// coordinate in [0, 1] relative to the canvas.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        let mut viewport = Self {
            left,
            top,
            width,
            height,
            canvas_width: 100.0,
            canvas_height: 100.0,
            region: ScreenRect::default(),
            index: 0,
            camera: None,
            camera_view: None,
            home_grid: false,
        };
        viewport.update_region();
        viewport
    }

    /// Assign a preset camera, builder style.
    pub fn with_camera(mut self, camera_type: CameraType, view: CameraView) -> Self {
        self.set_camera(camera_type, view);
        self
    }

    /// Assign a preset camera: projection per `camera_type`, position and
    /// orientation per `view`, aspect ratio from the current pixel region.
    pub fn set_camera(&mut self, camera_type: CameraType, view: CameraView) {
        let mut camera = Camera::new();
        camera.position = view.position(VIEW_DISTANCE);
        camera.look_at(Vec3::ZERO);

        let aspect = self.aspect();
        match camera_type {
            CameraType::Perspective => {
                camera.set_perspective(45.0_f32.to_radians(), aspect, 0.1, 1000.0);
            }
            CameraType::Orthographic => {
                camera.set_orthographic(ORTHO_SIZE, aspect, 0.1, 1000.0);
            }
        }

        self.camera = Some(camera);
        self.camera_view = Some((camera_type, view));
    }

    /// The preset camera, if one was assigned.
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// The assigned camera type and view, if any.
    pub fn camera_view(&self) -> Option<(CameraType, CameraView)> {
        self.camera_view
    }

    /// Reposition the viewport within the canvas. Only the normalized
    /// rectangle changes; identity, index, and camera assignment persist.
    pub fn set(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.left = left;
        self.top = top;
        self.width = width;
        self.height = height;
        self.update_region();
    }

    /// Update the canvas dimensions and recompute the pixel rectangle.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_width = width as f32;
        self.canvas_height = height as f32;
        self.update_region();
    }

    /// The normalized rectangle as (left, top, width, height).
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        (self.left, self.top, self.width, self.height)
    }

    /// The derived pixel rectangle.
    pub fn region(&self) -> ScreenRect {
        self.region
    }

    /// Position of this viewport within its manager.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Assign the position within the manager. Called by the manager when
    /// viewports are (re)built.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Toggle home grid visibility for this viewport.
    pub fn enable_home_grid(&mut self, state: bool) {
        self.home_grid = state;
    }

    /// Whether the home grid is visible in this viewport.
    pub fn home_grid_enabled(&self) -> bool {
        self.home_grid
    }

    /// Whether the canvas-local point lies inside this viewport's pixel
    /// rectangle. The right and bottom edges are exclusive so a point on a
    /// shared split border belongs to exactly one viewport.
    pub fn is_point_inside(&self, x: f32, y: f32) -> bool {
        x >= self.region.x
            && x < self.region.x + self.region.width
            && y >= self.region.y
            && y < self.region.y + self.region.height
    }

    /// Map a canvas-local point to normalized device coordinates for this
    /// viewport: [-1, 1] on both axes with +y up.
    pub fn device_coords(&self, x: f32, y: f32) -> Vec2 {
        let ndc_x = ((x - self.region.x) / self.region.width) * 2.0 - 1.0;
        let ndc_y = 1.0 - ((y - self.region.y) / self.region.height) * 2.0;
        Vec2::new(ndc_x, ndc_y)
    }

    fn aspect(&self) -> f32 {
        self.region.width / self.region.height
    }

    fn update_region(&mut self) {
        self.region = ScreenRect {
            x: self.left * self.canvas_width,
            y: self.top * self.canvas_height,
            width: self.width * self.canvas_width,
            height: self.height * self.canvas_height,
        };

        if let Some(camera) = self.camera.as_mut() {
            camera.set_aspect(self.region.width / self.region.height);
        }
    }
}

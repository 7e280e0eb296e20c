//! Viewport manager: layout selection, hit testing, event dispatch.

use tracing::debug;

use crate::events::{
    PointerEvent, PointerEventType, TriggerEvent, ViewportManip, ViewportPointerEvent,
    ViewportTriggerEvent,
};
use crate::viewport::{CameraType, CameraView, Viewport};

/// Partitioning scheme of the render surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportLayout {
    /// One viewport covering the whole canvas
    Single,
    /// Two viewports side by side, divided at the horizontal split ratio
    HorizontalSplit,
    /// Two viewports stacked, divided at the vertical split ratio
    VerticalSplit,
    /// Four viewports: perspective plus orthographic top/left/front panes
    Quad,
}

/// Callback invoked when the layout mode changes.
pub type LayoutListener = Box<dyn FnMut(ViewportLayout, &[Viewport])>;

/// Owns the viewport partitioning of one render surface and routes pointer
/// input to the viewport that should receive it.
///
/// Continuous pointer streams keep sticky viewport ownership for the duration
/// of a gesture; discrete trigger events always resolve the viewport fresh.
/// Enriched events are forwarded to at most one downstream [`ViewportManip`]
/// consumer.
pub struct ViewportManager {
    layout: ViewportLayout,
    horizontal_split: f32,
    vertical_split: f32,
    canvas_width: u32,
    canvas_height: u32,
    viewports: Vec<Viewport>,
    active_viewport: Option<usize>,
    next: Option<Box<dyn ViewportManip>>,
    layout_listeners: Vec<LayoutListener>,
}

impl ViewportManager {
    /// Create a manager with the single-viewport layout and a 100x100
    /// canvas.
    pub fn new() -> Self {
        let mut manager = Self {
            layout: ViewportLayout::Single,
            horizontal_split: 0.5,
            vertical_split: 0.5,
            canvas_width: 100,
            canvas_height: 100,
            viewports: Vec::new(),
            active_viewport: None,
            next: None,
            layout_listeners: Vec::new(),
        };
        manager.viewports = manager.build_viewports(ViewportLayout::Single);
        manager.configure_viewports();
        manager
    }

    /// The current layout mode.
    pub fn layout(&self) -> ViewportLayout {
        self.layout
    }

    /// Select a layout mode.
    ///
    /// A differing mode rebuilds the whole viewport sequence from the layout
    /// table, resets canvas sizes and indices, clears the active viewport,
    /// and notifies layout subscribers. Selecting the current mode again is a
    /// no-op.
    pub fn set_layout(&mut self, layout: ViewportLayout) {
        if layout == self.layout {
            return;
        }

        self.layout = layout;
        self.viewports = self.build_viewports(layout);
        self.active_viewport = None;
        self.configure_viewports();

        debug!(?layout, count = self.viewports.len(), "viewport layout changed");

        for listener in &mut self.layout_listeners {
            listener(layout, &self.viewports);
        }
    }

    /// The horizontal split ratio.
    pub fn horizontal_split(&self) -> f32 {
        self.horizontal_split
    }

    /// The vertical split ratio.
    pub fn vertical_split(&self) -> f32 {
        self.vertical_split
    }

    /// Update the split ratios and reposition the existing viewports in
    /// place. No viewports are reallocated and no layout notification is
    /// emitted; does nothing to the single layout.
    ///
    /// Ratios are expected in (0, 1) and are not clamped; out-of-range
    /// values produce degenerate rectangles.
    pub fn set_split(&mut self, h: f32, v: f32) {
        self.horizontal_split = h;
        self.vertical_split = v;

        match self.layout {
            ViewportLayout::Single => {}
            ViewportLayout::HorizontalSplit => {
                self.viewports[0].set(0.0, 0.0, h, 1.0);
                self.viewports[1].set(h, 0.0, 1.0 - h, 1.0);
            }
            ViewportLayout::VerticalSplit => {
                self.viewports[0].set(0.0, 0.0, 1.0, v);
                self.viewports[1].set(0.0, v, 1.0, 1.0 - v);
            }
            ViewportLayout::Quad => {
                self.viewports[0].set(0.0, 0.0, h, v);
                self.viewports[1].set(h, 0.0, 1.0 - h, v);
                self.viewports[2].set(0.0, v, h, 1.0 - v);
                self.viewports[3].set(h, v, 1.0 - h, 1.0 - v);
            }
        }
    }

    /// Store the canvas dimensions and propagate them to every viewport so
    /// each recomputes its pixel rectangle.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_width = width;
        self.canvas_height = height;

        for viewport in &mut self.viewports {
            viewport.set_canvas_size(width, height);
        }
    }

    /// Broadcast home grid visibility to every viewport.
    pub fn enable_home_grid(&mut self, state: bool) {
        for viewport in &mut self.viewports {
            viewport.enable_home_grid(state);
        }
    }

    /// The current viewport sequence.
    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    /// The viewport owning the in-progress pointer gesture, if any.
    pub fn active_viewport(&self) -> Option<&Viewport> {
        self.active_viewport.and_then(|index| self.viewports.get(index))
    }

    /// Register the downstream consumer, replacing any previous one.
    pub fn set_next(&mut self, next: Box<dyn ViewportManip>) {
        self.next = Some(next);
    }

    /// Remove the downstream consumer.
    pub fn clear_next(&mut self) {
        self.next = None;
    }

    /// Subscribe to layout-change notifications.
    pub fn on_layout_changed(&mut self, listener: impl FnMut(ViewportLayout, &[Viewport]) + 'static) {
        self.layout_listeners.push(Box::new(listener));
    }

    /// Route a pointer event.
    ///
    /// The owning viewport is re-resolved on hover samples (no pointers down,
    /// move) and on primary pointer-down; every other event reuses the
    /// remembered active viewport, which keeps a drag attached to its
    /// originating viewport even when the pointer leaves its bounds. The
    /// enriched event always reaches the consumer; without a resolved
    /// viewport it carries neutral (0, 0) device coordinates.
    ///
    /// Returns the consumer's result, or false when no consumer is
    /// registered.
    pub fn on_pointer(&mut self, event: &PointerEvent) -> bool {
        let x = event.client_x - event.target.left;
        let y = event.client_y - event.target.top;

        let resolve = (event.pointer_count == 0 && event.event_type == PointerEventType::Move)
            || (event.primary && event.event_type == PointerEventType::Down);
        if resolve {
            self.active_viewport = self.viewports.iter().position(|v| v.is_point_inside(x, y));
        }

        let viewport = self.active_viewport.and_then(|index| self.viewports.get(index));
        let (device_x, device_y) = match viewport {
            Some(viewport) => {
                let coords = viewport.device_coords(x, y);
                (coords.x, coords.y)
            }
            None => (0.0, 0.0),
        };

        let enriched = ViewportPointerEvent {
            event,
            viewport,
            device_x,
            device_y,
        };

        match self.next.as_mut() {
            Some(next) => next.on_pointer(&enriched),
            None => false,
        }
    }

    /// Route a trigger event.
    ///
    /// The owning viewport is always resolved fresh; the active-viewport
    /// memory is neither consulted nor written. Forwarding matches
    /// [`ViewportManager::on_pointer`].
    pub fn on_trigger(&mut self, event: &TriggerEvent) -> bool {
        let x = event.client_x - event.target.left;
        let y = event.client_y - event.target.top;

        let viewport = self.viewports.iter().find(|v| v.is_point_inside(x, y));
        let (device_x, device_y) = match viewport {
            Some(viewport) => {
                let coords = viewport.device_coords(x, y);
                (coords.x, coords.y)
            }
            None => (0.0, 0.0),
        };

        let enriched = ViewportTriggerEvent {
            event,
            viewport,
            device_x,
            device_y,
        };

        match self.next.as_mut() {
            Some(next) => next.on_trigger(&enriched),
            None => false,
        }
    }

    fn build_viewports(&self, layout: ViewportLayout) -> Vec<Viewport> {
        let h = self.horizontal_split;
        let v = self.vertical_split;

        match layout {
            ViewportLayout::Single => vec![Viewport::new(0.0, 0.0, 1.0, 1.0)],
            ViewportLayout::HorizontalSplit => vec![
                Viewport::new(0.0, 0.0, h, 1.0),
                Viewport::new(h, 0.0, 1.0 - h, 1.0),
            ],
            ViewportLayout::VerticalSplit => vec![
                Viewport::new(0.0, 0.0, 1.0, v),
                Viewport::new(0.0, v, 1.0, 1.0 - v),
            ],
            ViewportLayout::Quad => vec![
                // The first pane keeps the interactive perspective camera;
                // only the orthographic panes get preset cameras.
                Viewport::new(0.0, 0.0, h, v),
                Viewport::new(h, 0.0, 1.0 - h, v)
                    .with_camera(CameraType::Orthographic, CameraView::Top),
                Viewport::new(0.0, v, h, 1.0 - v)
                    .with_camera(CameraType::Orthographic, CameraView::Left),
                Viewport::new(h, v, 1.0 - h, 1.0 - v)
                    .with_camera(CameraType::Orthographic, CameraView::Front),
            ],
        }
    }

    fn configure_viewports(&mut self) {
        let (width, height) = (self.canvas_width, self.canvas_height);
        for (index, viewport) in self.viewports.iter_mut().enumerate() {
            viewport.set_index(index);
            viewport.set_canvas_size(width, height);
        }
    }
}

impl Default for ViewportManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{TargetBounds, TriggerKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Record {
        pointer_calls: Vec<(Option<usize>, f32, f32)>,
        trigger_calls: Vec<(Option<usize>, f32, f32)>,
        consume: bool,
    }

    struct RecordingManip(Rc<RefCell<Record>>);

    impl ViewportManip for RecordingManip {
        fn on_pointer(&mut self, event: &ViewportPointerEvent) -> bool {
            let mut record = self.0.borrow_mut();
            record.pointer_calls.push((
                event.viewport.map(|v| v.index()),
                event.device_x,
                event.device_y,
            ));
            record.consume
        }

        fn on_trigger(&mut self, event: &ViewportTriggerEvent) -> bool {
            let mut record = self.0.borrow_mut();
            record.trigger_calls.push((
                event.viewport.map(|v| v.index()),
                event.device_x,
                event.device_y,
            ));
            record.consume
        }
    }

    fn recording_manager() -> (ViewportManager, Rc<RefCell<Record>>) {
        let record = Rc::new(RefCell::new(Record::default()));
        let mut manager = ViewportManager::new();
        manager.set_next(Box::new(RecordingManip(record.clone())));
        (manager, record)
    }

    fn pointer(event_type: PointerEventType, x: f32, y: f32, count: u32, primary: bool) -> PointerEvent {
        PointerEvent {
            event_type,
            client_x: x,
            client_y: y,
            pointer_count: count,
            primary,
            target: TargetBounds::default(),
        }
    }

    fn trigger(x: f32, y: f32) -> TriggerEvent {
        TriggerEvent {
            kind: TriggerKind::Click,
            client_x: x,
            client_y: y,
            wheel_delta: 0.0,
            target: TargetBounds::default(),
        }
    }

    #[test]
    fn test_new_has_single_full_viewport() {
        let manager = ViewportManager::new();
        assert_eq!(manager.layout(), ViewportLayout::Single);
        assert_eq!(manager.viewports().len(), 1);
        assert_eq!(manager.viewports()[0].rect(), (0.0, 0.0, 1.0, 1.0));
        assert_eq!(manager.viewports()[0].index(), 0);
        assert!(manager.active_viewport().is_none());
    }

    #[test]
    fn test_layout_table_counts_and_rects() {
        let mut manager = ViewportManager::new();

        manager.set_layout(ViewportLayout::HorizontalSplit);
        assert_eq!(manager.viewports().len(), 2);
        assert_eq!(manager.viewports()[0].rect(), (0.0, 0.0, 0.5, 1.0));
        assert_eq!(manager.viewports()[1].rect(), (0.5, 0.0, 0.5, 1.0));

        manager.set_layout(ViewportLayout::VerticalSplit);
        assert_eq!(manager.viewports().len(), 2);
        assert_eq!(manager.viewports()[0].rect(), (0.0, 0.0, 1.0, 0.5));
        assert_eq!(manager.viewports()[1].rect(), (0.0, 0.5, 1.0, 0.5));

        manager.set_layout(ViewportLayout::Quad);
        assert_eq!(manager.viewports().len(), 4);
        assert_eq!(manager.viewports()[0].rect(), (0.0, 0.0, 0.5, 0.5));
        assert_eq!(manager.viewports()[1].rect(), (0.5, 0.0, 0.5, 0.5));
        assert_eq!(manager.viewports()[2].rect(), (0.0, 0.5, 0.5, 0.5));
        assert_eq!(manager.viewports()[3].rect(), (0.5, 0.5, 0.5, 0.5));
        for (index, viewport) in manager.viewports().iter().enumerate() {
            assert_eq!(viewport.index(), index);
        }
    }

    #[test]
    fn test_quad_panes_cover_canvas_for_any_split() {
        let mut manager = ViewportManager::new();
        manager.set_layout(ViewportLayout::Quad);
        manager.set_split(0.3, 0.7);

        let area: f32 = manager
            .viewports()
            .iter()
            .map(|v| {
                let (_, _, w, h) = v.rect();
                w * h
            })
            .sum();
        assert!((area - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quad_camera_assignments() {
        let mut manager = ViewportManager::new();
        manager.set_layout(ViewportLayout::Quad);

        let viewports = manager.viewports();
        assert!(viewports[0].camera_view().is_none());
        assert_eq!(
            viewports[1].camera_view(),
            Some((CameraType::Orthographic, CameraView::Top))
        );
        assert_eq!(
            viewports[2].camera_view(),
            Some((CameraType::Orthographic, CameraView::Left))
        );
        assert_eq!(
            viewports[3].camera_view(),
            Some((CameraType::Orthographic, CameraView::Front))
        );
    }

    #[test]
    fn test_same_layout_is_noop() {
        let notified = Rc::new(RefCell::new(0u32));
        let mut manager = ViewportManager::new();
        let counter = notified.clone();
        manager.on_layout_changed(move |_, _| *counter.borrow_mut() += 1);

        manager.enable_home_grid(true);
        manager.set_layout(ViewportLayout::Single);

        assert_eq!(*notified.borrow(), 0);
        // The viewport instance was not replaced.
        assert!(manager.viewports()[0].home_grid_enabled());
    }

    #[test]
    fn test_layout_change_notifies_subscribers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut manager = ViewportManager::new();
        let sink = seen.clone();
        manager.on_layout_changed(move |layout, viewports| {
            sink.borrow_mut().push((layout, viewports.len()));
        });

        manager.set_layout(ViewportLayout::Quad);
        manager.set_layout(ViewportLayout::HorizontalSplit);

        assert_eq!(
            *seen.borrow(),
            vec![
                (ViewportLayout::Quad, 4),
                (ViewportLayout::HorizontalSplit, 2)
            ]
        );
    }

    #[test]
    fn test_set_split_repositions_in_place() {
        let notified = Rc::new(RefCell::new(0u32));
        let mut manager = ViewportManager::new();
        let counter = notified.clone();
        manager.on_layout_changed(move |_, _| *counter.borrow_mut() += 1);

        manager.set_layout(ViewportLayout::Quad);
        assert_eq!(*notified.borrow(), 1);

        // Mark the instances so replacement would be observable.
        manager.enable_home_grid(true);
        manager.set_split(0.25, 0.75);

        assert_eq!(manager.viewports().len(), 4);
        assert_eq!(manager.viewports()[0].rect(), (0.0, 0.0, 0.25, 0.75));
        assert_eq!(manager.viewports()[1].rect(), (0.25, 0.0, 0.75, 0.75));
        assert_eq!(manager.viewports()[2].rect(), (0.0, 0.75, 0.25, 0.25));
        assert_eq!(manager.viewports()[3].rect(), (0.25, 0.75, 0.75, 0.25));
        for (index, viewport) in manager.viewports().iter().enumerate() {
            assert_eq!(viewport.index(), index);
            assert!(viewport.home_grid_enabled());
        }
        assert_eq!(*notified.borrow(), 1);
    }

    #[test]
    fn test_set_split_ignores_single_layout() {
        let mut manager = ViewportManager::new();
        manager.set_split(0.2, 0.8);

        assert_eq!(manager.viewports()[0].rect(), (0.0, 0.0, 1.0, 1.0));
        assert_eq!(manager.horizontal_split(), 0.2);
        assert_eq!(manager.vertical_split(), 0.8);
    }

    #[test]
    fn test_canvas_size_propagates() {
        let mut manager = ViewportManager::new();
        manager.set_layout(ViewportLayout::Quad);
        manager.set_canvas_size(800, 600);

        let region = manager.viewports()[0].region();
        assert_eq!(region.x, 0.0);
        assert_eq!(region.y, 0.0);
        assert_eq!(region.width, 400.0);
        assert_eq!(region.height, 300.0);

        let region = manager.viewports()[3].region();
        assert_eq!(region.x, 400.0);
        assert_eq!(region.y, 300.0);
    }

    #[test]
    fn test_pointer_down_resolves_and_maps_coords() {
        let (mut manager, record) = recording_manager();
        manager.set_layout(ViewportLayout::Quad);
        manager.set_canvas_size(800, 600);

        manager.on_pointer(&pointer(PointerEventType::Down, 100.0, 100.0, 1, true));

        let calls = &record.borrow().pointer_calls;
        assert_eq!(calls.len(), 1);
        let (viewport, device_x, device_y) = calls[0];
        assert_eq!(viewport, Some(0));
        // (100, 100) inside the 400x300 region.
        assert!((device_x - (-0.5)).abs() < 1e-6);
        assert!((device_y - (1.0 / 3.0)).abs() < 1e-6);
        assert_eq!(manager.active_viewport().unwrap().index(), 0);
    }

    #[test]
    fn test_drag_sticks_to_origin_viewport() {
        let (mut manager, record) = recording_manager();
        manager.set_layout(ViewportLayout::HorizontalSplit);
        manager.set_canvas_size(800, 600);

        // Down in the right-hand viewport.
        manager.on_pointer(&pointer(PointerEventType::Down, 600.0, 300.0, 1, true));
        // Drag far outside every viewport.
        manager.on_pointer(&pointer(PointerEventType::Move, -50.0, -50.0, 1, true));
        manager.on_pointer(&pointer(PointerEventType::Up, -50.0, -50.0, 0, true));

        {
            let calls = &record.borrow().pointer_calls;
            assert_eq!(calls[0].0, Some(1));
            assert_eq!(calls[1].0, Some(1));
            assert_eq!(calls[2].0, Some(1));
        }

        // A fresh trigger at the same coordinates resolves to no viewport.
        manager.on_trigger(&trigger(-50.0, -50.0));
        assert_eq!(record.borrow().trigger_calls[0].0, None);
    }

    #[test]
    fn test_hover_move_reresolves() {
        let (mut manager, record) = recording_manager();
        manager.set_layout(ViewportLayout::HorizontalSplit);
        manager.set_canvas_size(800, 600);

        manager.on_pointer(&pointer(PointerEventType::Move, 100.0, 300.0, 0, true));
        manager.on_pointer(&pointer(PointerEventType::Move, 700.0, 300.0, 0, true));

        let calls = &record.borrow().pointer_calls;
        assert_eq!(calls[0].0, Some(0));
        assert_eq!(calls[1].0, Some(1));
    }

    #[test]
    fn test_secondary_pointer_down_keeps_active() {
        let (mut manager, record) = recording_manager();
        manager.set_layout(ViewportLayout::HorizontalSplit);
        manager.set_canvas_size(800, 600);

        manager.on_pointer(&pointer(PointerEventType::Down, 100.0, 300.0, 1, true));
        // A second, non-primary pointer lands in the other viewport.
        manager.on_pointer(&pointer(PointerEventType::Down, 700.0, 300.0, 2, false));

        let calls = &record.borrow().pointer_calls;
        assert_eq!(calls[0].0, Some(0));
        assert_eq!(calls[1].0, Some(0));
    }

    #[test]
    fn test_unresolved_event_still_forwarded_neutral() {
        let (mut manager, record) = recording_manager();
        manager.set_canvas_size(800, 600);

        let consumed = manager.on_pointer(&pointer(PointerEventType::Move, 5000.0, 5000.0, 0, true));

        assert!(!consumed);
        let calls = &record.borrow().pointer_calls;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (None, 0.0, 0.0));
    }

    #[test]
    fn test_consumer_result_passthrough() {
        let (mut manager, record) = recording_manager();
        record.borrow_mut().consume = true;

        assert!(manager.on_pointer(&pointer(PointerEventType::Move, 50.0, 50.0, 0, true)));
        assert!(manager.on_trigger(&trigger(50.0, 50.0)));
    }

    #[test]
    fn test_no_consumer_returns_false() {
        let mut manager = ViewportManager::new();
        assert!(!manager.on_pointer(&pointer(PointerEventType::Down, 50.0, 50.0, 1, true)));
        assert!(!manager.on_trigger(&trigger(50.0, 50.0)));
    }

    #[test]
    fn test_trigger_does_not_update_active_memory() {
        let (mut manager, record) = recording_manager();
        manager.set_layout(ViewportLayout::HorizontalSplit);
        manager.set_canvas_size(800, 600);

        manager.on_pointer(&pointer(PointerEventType::Down, 100.0, 300.0, 1, true));
        manager.on_trigger(&trigger(700.0, 300.0));

        // Trigger resolved viewport 1 but the gesture owner is unchanged.
        assert_eq!(record.borrow().trigger_calls[0].0, Some(1));
        assert_eq!(manager.active_viewport().unwrap().index(), 0);
    }

    #[test]
    fn test_layout_change_clears_active_viewport() {
        let mut manager = ViewportManager::new();
        manager.set_canvas_size(800, 600);
        manager.on_pointer(&pointer(PointerEventType::Down, 100.0, 100.0, 1, true));
        assert!(manager.active_viewport().is_some());

        manager.set_layout(ViewportLayout::Quad);
        assert!(manager.active_viewport().is_none());
    }

    #[test]
    fn test_target_bounds_offset_applies() {
        let (mut manager, record) = recording_manager();
        manager.set_canvas_size(800, 600);

        let mut event = pointer(PointerEventType::Down, 150.0, 120.0, 1, true);
        event.target = TargetBounds::new(100.0, 100.0, 800.0, 600.0);
        manager.on_pointer(&event);

        // Canvas-local (50, 20) inside the 800x600 viewport.
        let (viewport, device_x, device_y) = record.borrow().pointer_calls[0];
        assert_eq!(viewport, Some(0));
        assert!((device_x - (50.0 / 800.0 * 2.0 - 1.0)).abs() < 1e-6);
        assert!((device_y - (1.0 - 20.0 / 600.0 * 2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_home_grid_broadcast() {
        let mut manager = ViewportManager::new();
        manager.set_layout(ViewportLayout::Quad);
        manager.enable_home_grid(true);
        assert!(manager.viewports().iter().all(|v| v.home_grid_enabled()));

        manager.enable_home_grid(false);
        assert!(manager.viewports().iter().all(|v| !v.home_grid_enabled()));
    }
}

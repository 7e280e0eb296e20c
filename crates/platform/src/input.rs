//! Translation of raw mouse input into pointer and trigger events.

use std::collections::HashSet;

use sceneview_display::{
    PointerEvent, PointerEventType, TargetBounds, TriggerEvent, TriggerKind,
};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Left,
        }
    }
}

/// Maximum cursor travel, in pixels, for a press/release pair to still count
/// as a click.
const CLICK_SLOP: f32 = 4.0;

/// Tracks mouse state and synthesizes the pointer/trigger event stream
/// consumed by the viewport manager.
///
/// A mouse is a single pointer: the pointer count is 1 while any button is
/// held and 0 otherwise, and every mouse event is primary.
#[derive(Debug, Default)]
pub struct PointerTracker {
    pressed: HashSet<MouseButton>,
    cursor: (f32, f32),
    press_position: Option<(f32, f32)>,
    bounds: TargetBounds,
}

impl PointerTracker {
    /// Create a new tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the target bounds stamped onto produced events. Call on
    /// window creation and resize.
    pub fn set_target_bounds(&mut self, bounds: TargetBounds) {
        self.bounds = bounds;
    }

    /// Current pointer count: 1 while any button is held, 0 otherwise.
    pub fn pointer_count(&self) -> u32 {
        if self.pressed.is_empty() { 0 } else { 1 }
    }

    /// Whether a button is currently held.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(&button)
    }

    /// Handle cursor movement, producing a pointer move event.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) -> PointerEvent {
        self.cursor = (x, y);
        self.pointer_event(PointerEventType::Move)
    }

    /// Handle a button press, producing a pointer down event.
    pub fn on_button_pressed(&mut self, button: MouseButton) -> PointerEvent {
        if self.pressed.insert(button) && self.pressed.len() == 1 {
            self.press_position = Some(self.cursor);
        }
        self.pointer_event(PointerEventType::Down)
    }

    /// Handle a button release, producing a pointer up event and, when the
    /// cursor stayed within the click slop since the press, a trigger event
    /// (click for the left button, context menu for the right).
    pub fn on_button_released(
        &mut self,
        button: MouseButton,
    ) -> (PointerEvent, Option<TriggerEvent>) {
        self.pressed.remove(&button);
        let event = self.pointer_event(PointerEventType::Up);

        let mut trigger = None;
        if self.pressed.is_empty() {
            if let Some((x, y)) = self.press_position.take() {
                let travel = ((self.cursor.0 - x).powi(2) + (self.cursor.1 - y).powi(2)).sqrt();
                let kind = match button {
                    MouseButton::Left => Some(TriggerKind::Click),
                    MouseButton::Right => Some(TriggerKind::ContextMenu),
                    MouseButton::Middle => None,
                };
                if travel <= CLICK_SLOP {
                    trigger = kind.map(|kind| self.trigger_event(kind, 0.0));
                }
            }
        }

        (event, trigger)
    }

    /// Handle a scroll wheel step, producing a wheel trigger event.
    pub fn on_wheel(&mut self, delta: f32) -> TriggerEvent {
        self.trigger_event(TriggerKind::Wheel, delta)
    }

    fn pointer_event(&self, event_type: PointerEventType) -> PointerEvent {
        PointerEvent {
            event_type,
            client_x: self.cursor.0,
            client_y: self.cursor.1,
            pointer_count: self.pointer_count(),
            primary: true,
            target: self.bounds,
        }
    }

    fn trigger_event(&self, kind: TriggerKind, wheel_delta: f32) -> TriggerEvent {
        TriggerEvent {
            kind,
            client_x: self.cursor.0,
            client_y: self.cursor.1,
            wheel_delta,
            target: self.bounds,
        }
    }
}

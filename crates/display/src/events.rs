//! Pointer and trigger event types.
//!
//! Raw device events carry absolute client coordinates plus the bounding
//! rectangle of the surface that produced them. The viewport manager enriches
//! them with the resolved viewport and normalized device coordinates before
//! handing them to the downstream consumer.

use crate::viewport::Viewport;

/// Phase of a continuous pointer interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Move,
    Up,
}

/// Kind of a discrete trigger interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    Click,
    DoubleClick,
    ContextMenu,
    Wheel,
}

/// Bounding rectangle of the surface an event originated from, in client
/// coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TargetBounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// A pointer move/down/up event in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub event_type: PointerEventType,
    /// Absolute horizontal client coordinate
    pub client_x: f32,
    /// Absolute vertical client coordinate
    pub client_y: f32,
    /// Number of pointers currently down
    pub pointer_count: u32,
    /// Whether this event comes from the primary pointer
    pub primary: bool,
    /// Bounding rectangle of the originating surface
    pub target: TargetBounds,
}

/// A discrete trigger event (click, double click, context menu, wheel) in
/// client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerEvent {
    pub kind: TriggerKind,
    pub client_x: f32,
    pub client_y: f32,
    /// Scroll amount for [`TriggerKind::Wheel`], zero otherwise
    pub wheel_delta: f32,
    pub target: TargetBounds,
}

/// A pointer event enriched with the resolved viewport and normalized device
/// coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ViewportPointerEvent<'a> {
    pub event: &'a PointerEvent,
    /// The viewport owning this event, if any
    pub viewport: Option<&'a Viewport>,
    /// Normalized device x, or 0 when no viewport was resolved
    pub device_x: f32,
    /// Normalized device y, or 0 when no viewport was resolved
    pub device_y: f32,
}

/// A trigger event enriched with the resolved viewport and normalized device
/// coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ViewportTriggerEvent<'a> {
    pub event: &'a TriggerEvent,
    pub viewport: Option<&'a Viewport>,
    pub device_x: f32,
    pub device_y: f32,
}

/// Downstream consumer of enriched viewport events.
///
/// The manager forwards every event to at most one registered consumer and
/// returns its result: `true` when the event was consumed.
pub trait ViewportManip {
    fn on_pointer(&mut self, event: &ViewportPointerEvent) -> bool;
    fn on_trigger(&mut self, event: &ViewportTriggerEvent) -> bool;
}

//! Viewport partitioning and pointer event routing.
//!
//! This crate owns the split-screen presentation of a render surface:
//! - Individual viewport regions with cameras and coordinate mapping
//! - The viewport manager: layout selection, hit testing, event dispatch
//! - Pointer and trigger event types and the downstream consumer contract

pub mod events;
pub mod manager;
pub mod viewport;

pub use events::{
    PointerEvent, PointerEventType, TargetBounds, TriggerEvent, TriggerKind, ViewportManip,
    ViewportPointerEvent, ViewportTriggerEvent,
};
pub use manager::{ViewportLayout, ViewportManager};
pub use viewport::{CameraType, CameraView, ScreenRect, Viewport};

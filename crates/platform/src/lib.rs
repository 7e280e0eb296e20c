//! Platform abstraction layer for the scene viewer.
//!
//! This crate provides platform-specific functionality:
//! - Window management via winit
//! - Translation of raw mouse input into pointer and trigger events

mod input;
mod window;

pub use input::{MouseButton, PointerTracker};
pub use window::Window;

// Re-export winit types that users might need
pub use winit::event::WindowEvent;
pub use winit::event_loop::EventLoop;

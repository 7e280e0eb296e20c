//! Core utilities for the sceneview scene viewer.
//!
//! This crate provides foundational types and utilities used across the viewer:
//! - Error types and result aliases
//! - Logging initialization
//! - Frame timing

mod error;
mod logging;
mod timer;

pub use error::{Error, Result};
pub use logging::init_logging;
pub use timer::FrameTimer;

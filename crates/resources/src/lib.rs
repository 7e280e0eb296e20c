//! Scene document loading and management.
//!
//! This crate handles the viewer's scene descriptions:
//! - JSON document loading and saving
//! - Structural validation
//! - Instantiation into a live transform hierarchy

mod document;
mod error;

pub use document::{NodeData, SceneDocument};
pub use error::{ResourceError, ResourceResult};

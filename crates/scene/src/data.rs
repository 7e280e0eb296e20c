//! Scene description data types.
//!
//! The wire shape consumed and produced by transform components. A node's
//! transformation is either an explicit column-major 4x4 matrix or any subset
//! of translation / rotation (quaternion x,y,z,w) / scale; absent fields are
//! omitted from the serialized form, so an identity transform serializes to
//! an empty object.

use serde::{Deserialize, Serialize};

/// Transformation data for a single scene node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformData {
    /// Explicit local matrix, 16 numbers, column-major. Takes precedence
    /// over the TRS fields when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<[f32; 16]>,

    /// Translation vector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f32; 3]>,

    /// Rotation quaternion as x, y, z, w.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 4]>,

    /// Scale vector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f32; 3]>,
}

impl TransformData {
    /// Whether no field is present, i.e. the data describes an identity
    /// transform.
    pub fn is_identity(&self) -> bool {
        self.matrix.is_none()
            && self.translation.is_none()
            && self.rotation.is_none()
            && self.scale.is_none()
    }
}

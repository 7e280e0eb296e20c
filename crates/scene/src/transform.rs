//! Hierarchical transform component.
//!
//! This module provides the [`Transform`] component: mutable TRS or matrix
//! inputs with per-field change tracking, a derived local matrix output, and
//! hierarchy operations that keep the logical component tree and the backing
//! [`RenderObject`] tree in lockstep.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use sceneview_scene::Transform;
//!
//! let node = Transform::new();
//! node.borrow_mut().position.set(Vec3::new(1.0, 2.0, 3.0));
//! node.borrow_mut().update();
//!
//! let local = node.borrow().local_matrix();
//! assert_eq!(local.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::data::TransformData;
use crate::object::{ObjectRef, RenderObject};

/// Shared handle to a transform component.
pub type TransformRef = Rc<RefCell<Transform>>;

/// An input field with a change flag.
///
/// The flag is set on assignment and cleared when the owning component
/// consumes the value during [`Transform::update`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Input<T> {
    value: T,
    changed: bool,
}

impl<T> Input<T> {
    fn with_value(value: T) -> Self {
        Self {
            value,
            changed: false,
        }
    }

    /// Assign a new value and mark the field as changed.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.changed = true;
    }

    /// Whether the field has been assigned since it was last consumed.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Clear the change flag without consuming the value.
    pub fn clear_changed(&mut self) {
        self.changed = false;
    }

    fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }
}

impl<T: Copy> Input<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        self.value
    }
}

/// Axis order in which Euler rotation angles are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationOrder {
    #[default]
    Xyz,
    Yzx,
    Zxy,
    Xzy,
    Yxz,
    Zyx,
}

impl RotationOrder {
    fn euler(self) -> EulerRot {
        match self {
            RotationOrder::Xyz => EulerRot::XYZ,
            RotationOrder::Yzx => EulerRot::YZX,
            RotationOrder::Zxy => EulerRot::ZXY,
            RotationOrder::Xzy => EulerRot::XZY,
            RotationOrder::Yxz => EulerRot::YXZ,
            RotationOrder::Zyx => EulerRot::ZYX,
        }
    }
}

/// Hierarchical transform component.
///
/// Exactly one of the two input modes is authoritative per update cycle: if
/// the `matrix` input changed since the last [`Transform::update`], it is
/// adopted verbatim and the TRS inputs are ignored for that cycle; otherwise
/// the local matrix is recomposed from position, rotation, and scale.
///
/// Each component owns a backing [`RenderObject`]; `add_child` and
/// `remove_child` keep the two trees topologically identical.
pub struct Transform {
    /// Position input
    pub position: Input<Vec3>,
    /// Euler rotation input, in degrees
    pub rotation: Input<Vec3>,
    /// Rotation axis order input
    pub order: Input<RotationOrder>,
    /// Scale input
    pub scale: Input<Vec3>,
    /// Explicit local matrix input
    pub matrix: Input<Mat4>,

    out_matrix: Mat4,
    object: ObjectRef,
    parent: Weak<RefCell<Transform>>,
    children: Vec<TransformRef>,
}

impl Transform {
    /// Create a new detached component with an identity transform.
    pub fn new() -> TransformRef {
        Rc::new(RefCell::new(Self {
            position: Input::with_value(Vec3::ZERO),
            rotation: Input::with_value(Vec3::ZERO),
            order: Input::with_value(RotationOrder::Xyz),
            scale: Input::with_value(Vec3::ONE),
            matrix: Input::with_value(Mat4::IDENTITY),
            out_matrix: Mat4::IDENTITY,
            object: RenderObject::new(),
            parent: Weak::new(),
            children: Vec::new(),
        }))
    }

    /// The local matrix output, valid after the last [`Transform::update`].
    pub fn local_matrix(&self) -> Mat4 {
        self.out_matrix
    }

    /// The world matrix of the backing object, valid after the last
    /// [`RenderObject::update_world`] pass.
    pub fn world_matrix(&self) -> Mat4 {
        self.object.borrow().world_matrix
    }

    /// The backing render object wrapped by this component.
    pub fn object(&self) -> ObjectRef {
        self.object.clone()
    }

    /// The parent component, if attached.
    pub fn parent(&self) -> Option<TransformRef> {
        self.parent.upgrade()
    }

    /// The child components.
    pub fn children(&self) -> &[TransformRef] {
        &self.children
    }

    /// Consume changed inputs and recompute the local matrix.
    ///
    /// Called once per scene update cycle, after all input mutations for the
    /// cycle and before any consumer reads the output. Assignment alone never
    /// triggers recomputation.
    pub fn update(&mut self) {
        let mut object = self.object.borrow_mut();

        if self.matrix.take_changed() {
            object.matrix = self.matrix.get();
            object.world_needs_update = true;
        } else {
            if self.position.take_changed() {
                object.position = self.position.get();
            }
            let rotation_changed = self.rotation.take_changed();
            let order_changed = self.order.take_changed();
            if rotation_changed || order_changed {
                let degrees = self.rotation.get();
                object.rotation = Quat::from_euler(
                    self.order.get().euler(),
                    degrees.x.to_radians(),
                    degrees.y.to_radians(),
                    degrees.z.to_radians(),
                );
            }
            if self.scale.take_changed() {
                object.scale = self.scale.get();
            }

            object.compose_local();
        }

        self.out_matrix = object.matrix;
    }

    /// Attach `child` under `parent`, in the logical tree and the backing
    /// render-object tree.
    ///
    /// Relative transforms are preserved purely through parent/child matrix
    /// composition; nothing is re-baked.
    pub fn add_child(parent: &TransformRef, child: &TransformRef) {
        let previous = child.borrow().parent();
        if let Some(previous) = previous {
            Self::remove_child(&previous, child);
        }

        child.borrow_mut().parent = Rc::downgrade(parent);
        parent.borrow_mut().children.push(child.clone());

        let parent_object = parent.borrow().object();
        let child_object = child.borrow().object();
        RenderObject::attach(&parent_object, &child_object);
    }

    /// Detach `child` from `parent`.
    ///
    /// The backing render object is detached first, then the logical link is
    /// removed.
    pub fn remove_child(parent: &TransformRef, child: &TransformRef) {
        let parent_object = parent.borrow().object();
        let child_object = child.borrow().object();
        RenderObject::detach(&parent_object, &child_object);

        parent.borrow_mut().children.retain(|c| !Rc::ptr_eq(c, child));
        child.borrow_mut().parent = Weak::new();
    }

    /// Attach a foreign renderable object under this component's backing
    /// object, outside the logical tree.
    pub fn add_object(&self, object: &ObjectRef) {
        RenderObject::attach(&self.object, object);
    }

    /// Detach a foreign renderable object from this component's backing
    /// object.
    pub fn remove_object(&self, object: &ObjectRef) {
        RenderObject::detach(&self.object, object);
    }

    /// Detach `node` from the hierarchy and release its links.
    ///
    /// The backing object is detached from its render-object parent, then all
    /// of its render-object children are detached (the child list is
    /// snapshotted first since detachment mutates it), then the logical links
    /// are released. Safe to call on an already-detached node.
    pub fn dispose(node: &TransformRef) {
        let object = node.borrow().object();

        let object_parent = object.borrow().parent();
        if let Some(object_parent) = object_parent {
            RenderObject::detach(&object_parent, &object);
        }
        let object_children: Vec<ObjectRef> = object.borrow().children().to_vec();
        for child in &object_children {
            RenderObject::detach(&object, child);
        }

        let parent = node.borrow().parent();
        if let Some(parent) = parent {
            parent.borrow_mut().children.retain(|c| !Rc::ptr_eq(c, node));
        }
        let children: Vec<TransformRef> = node.borrow().children.clone();
        for child in &children {
            child.borrow_mut().parent = Weak::new();
        }
        let mut node = node.borrow_mut();
        node.children.clear();
        node.parent = Weak::new();
    }

    /// Run one update cycle over the hierarchy rooted at `root`, parents
    /// before children.
    ///
    /// World matrices are propagated separately; see
    /// [`RenderObject::update_world`].
    pub fn update_hierarchy(root: &TransformRef) {
        root.borrow_mut().update();
        let children: Vec<TransformRef> = root.borrow().children.clone();
        for child in &children {
            Self::update_hierarchy(child);
        }
    }

    /// Populate the inputs from scene description data.
    ///
    /// If `data` carries a matrix, it wins: the TRS change flags are cleared
    /// so the next [`Transform::update`] takes the matrix path. Otherwise the
    /// present TRS fields are assigned (a quaternion rotation is converted to
    /// an Euler-XYZ degree vector and the order forced to XYZ), the matrix
    /// flag is cleared, and an update runs immediately so the output reflects
    /// the new values before any external read.
    pub fn from_data(&mut self, data: &TransformData) {
        if let Some(matrix) = data.matrix {
            self.matrix.set(Mat4::from_cols_array(&matrix));

            self.position.clear_changed();
            self.rotation.clear_changed();
            self.order.clear_changed();
            self.scale.clear_changed();
        } else {
            if let Some(translation) = data.translation {
                self.position.set(Vec3::from_array(translation));
            }
            if let Some(rotation) = data.rotation {
                let quat = Quat::from_xyzw(rotation[0], rotation[1], rotation[2], rotation[3]);
                let (x, y, z) = quat.to_euler(EulerRot::XYZ);
                self.rotation
                    .set(Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees()));
                self.order.set(RotationOrder::Xyz);
            }
            if let Some(scale) = data.scale {
                self.scale.set(Vec3::from_array(scale));
            }

            self.matrix.clear_changed();

            self.update();
        }
    }

    /// Decompose the current local matrix into scene description data.
    ///
    /// Fields equal to the identity defaults (zero translation, identity
    /// quaternion, unit scale) are omitted, compared exactly rather than with
    /// an epsilon. An identity transform yields empty data.
    pub fn to_data(&self) -> TransformData {
        let (scale, rotation, translation) =
            self.object.borrow().matrix.to_scale_rotation_translation();

        let mut data = TransformData::default();

        if translation.x != 0.0 || translation.y != 0.0 || translation.z != 0.0 {
            data.translation = Some(translation.to_array());
        }
        if rotation.x != 0.0 || rotation.y != 0.0 || rotation.z != 0.0 || rotation.w != 1.0 {
            data.rotation = Some(rotation.to_array());
        }
        if scale.x != 1.0 || scale.y != 1.0 || scale.z != 1.0 {
            data.scale = Some(scale.to_array());
        }

        data
    }
}

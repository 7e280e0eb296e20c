//! Render-object hierarchy.
//!
//! This module provides [`RenderObject`], the renderable node tree consumed
//! by a rendering backend. Each object carries a local transformation and a
//! derived world matrix; world matrices are recomputed on demand via
//! [`RenderObject::update_world`], driven by a per-node propagation flag.
//!
//! Objects live behind [`ObjectRef`] handles. The tree is single-threaded:
//! parents hold strong references to their children, children hold a weak
//! reference back to their parent.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::{Mat4, Quat, Vec3};

/// Shared handle to a node in the render-object tree.
pub type ObjectRef = Rc<RefCell<RenderObject>>;

/// A node in the renderable hierarchy.
///
/// The local matrix is authoritative; the TRS fields are staging values that
/// [`RenderObject::compose_local`] folds into it. The world matrix is derived
/// and only valid after [`RenderObject::update_world`] has run.
#[derive(Debug)]
pub struct RenderObject {
    /// Position relative to the parent
    pub position: Vec3,
    /// Rotation relative to the parent
    pub rotation: Quat,
    /// Scale relative to the parent
    pub scale: Vec3,
    /// Local transformation matrix
    pub matrix: Mat4,
    /// Derived world transformation matrix
    pub world_matrix: Mat4,
    /// Set when the world matrix is stale and must be propagated
    pub world_needs_update: bool,
    parent: Weak<RefCell<RenderObject>>,
    children: Vec<ObjectRef>,
}

impl Default for RenderObject {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            world_needs_update: false,
            parent: Weak::new(),
            children: Vec::new(),
        }
    }
}

impl RenderObject {
    /// Create a new detached object with an identity transform.
    pub fn new() -> ObjectRef {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Get the parent object, if attached.
    pub fn parent(&self) -> Option<ObjectRef> {
        self.parent.upgrade()
    }

    /// Get the child objects.
    pub fn children(&self) -> &[ObjectRef] {
        &self.children
    }

    /// Attach `child` under `parent`.
    ///
    /// A child has at most one parent: if `child` is already attached
    /// somewhere it is detached from there first. The child's world matrix
    /// becomes stale until the next [`RenderObject::update_world`] pass.
    pub fn attach(parent: &ObjectRef, child: &ObjectRef) {
        let previous = child.borrow().parent();
        if let Some(previous) = previous {
            Self::detach(&previous, child);
        }

        child.borrow_mut().parent = Rc::downgrade(parent);
        child.borrow_mut().world_needs_update = true;
        parent.borrow_mut().children.push(child.clone());
    }

    /// Detach `child` from `parent`.
    ///
    /// Does nothing if `child` is not currently a child of `parent`.
    pub fn detach(parent: &ObjectRef, child: &ObjectRef) {
        let mut parent_ref = parent.borrow_mut();
        let count = parent_ref.children.len();
        parent_ref.children.retain(|c| !Rc::ptr_eq(c, child));

        if parent_ref.children.len() != count {
            drop(parent_ref);
            let mut child_ref = child.borrow_mut();
            child_ref.parent = Weak::new();
            child_ref.world_needs_update = true;
        }
    }

    /// Recompose the local matrix from the position, rotation, and scale
    /// fields and mark the world matrix for propagation.
    pub fn compose_local(&mut self) {
        self.matrix = Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position);
        self.world_needs_update = true;
    }

    /// Recompute world matrices down the subtree rooted at `object`.
    ///
    /// A node is recomputed when its propagation flag is set or when `force`
    /// is true; recomputation forces every descendant as well, so a dirty
    /// parent updates its whole subtree in one pass.
    pub fn update_world(object: &ObjectRef, force: bool) {
        let (propagate, children) = {
            let mut node = object.borrow_mut();
            let propagate = force || node.world_needs_update;

            if propagate {
                let parent_world = node
                    .parent
                    .upgrade()
                    .map(|parent| parent.borrow().world_matrix)
                    .unwrap_or(Mat4::IDENTITY);
                node.world_matrix = parent_world * node.matrix;
                node.world_needs_update = false;
            }

            (propagate, node.children.clone())
        };

        for child in &children {
            Self::update_world(child, propagate);
        }
    }
}

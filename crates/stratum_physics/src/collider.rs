//! Positioned solids
//!
//! A [`Collider`] is a [`ColliderShape`] placed at an integer root position,
//! together with its cached plane views and the metadata the engine needs to
//! classify it: whether it blocks, which reactions it carries, and which
//! actor it belongs to.

use bitflags::bitflags;
use slotmap::new_key_type;
use stratum_math::{IVec3, Point2, Shape2D};

use crate::reaction::{Reaction, ReactionHub, ReactionKind};
use crate::shapes::{Axis, ColliderShape, ShapeProjection, TrianglePrism};

// Define generational key type for colliders
new_key_type! {
    /// Key to a collider in the collision world
    ///
    /// Stale keys (the collider was removed) resolve to `None` rather than
    /// to whatever later took the slot.
    pub struct ColliderKey;
}

bitflags! {
    /// Physical classification of a collider
    ///
    /// An empty set is a passthrough collider: it never stops movement and is
    /// only of interest if it carries reactions.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BodyType: u8 {
        /// Stops movement
        const BLOCKING = 1 << 0;
    }
}

/// Reference id of a collider that is not registered to an actor
pub const UNREGISTERED: i32 = -1;

/// A solid at a position
#[derive(Clone, Debug, PartialEq)]
pub struct Collider {
    shape: ColliderShape,
    projection: ShapeProjection,
    pos: IVec3,
    name: String,
    reference: i32,
    /// Blocking / passthrough classification
    pub body: BodyType,
    /// Reactions reported when this collider is hit or interacted with
    pub reactions: ReactionHub,
}

impl Collider {
    /// Create a collider from any shape. New colliders are blocking.
    pub fn new(pos: IVec3, shape: ColliderShape, name: impl Into<String>) -> Self {
        Self {
            shape,
            projection: shape.project(pos),
            pos,
            name: name.into(),
            reference: UNREGISTERED,
            body: BodyType::BLOCKING,
            reactions: ReactionHub::new(),
        }
    }

    /// Create a box spanning `w` on x, `h` on y and `d` on z from `pos`
    pub fn block(pos: IVec3, w: i32, h: i32, d: i32, name: impl Into<String>) -> Self {
        Self::new(pos, ColliderShape::Block { w, h, d }, name)
    }

    /// Create a right-triangular prism
    ///
    /// `p2` and `p3` are relative to `pos` in the cross-section plane of
    /// `axis` (see [`TrianglePrism`]).
    pub fn triangle(
        pos: IVec3,
        p2: Point2,
        p3: Point2,
        depth: i32,
        axis: Axis,
        name: impl Into<String>,
    ) -> Self {
        Self::new(pos, ColliderShape::Triangle(TrianglePrism::new(p2, p3, depth, axis)), name)
    }

    /// Set whether this collider blocks movement
    pub fn with_blocking(mut self, blocking: bool) -> Self {
        self.body.set(BodyType::BLOCKING, blocking);
        self
    }

    /// Attach a reaction
    pub fn with_reaction(mut self, kind: ReactionKind, reaction: Reaction) -> Self {
        self.reactions.push(kind, reaction);
        self
    }

    /// Set the reference id
    pub fn with_reference(mut self, reference: i32) -> Self {
        self.reference = reference;
        self
    }

    /// Same geometry, classification and reactions, unregistered
    pub fn copy(&self) -> Self {
        Self {
            name: format!("copy-of-{}", self.name),
            reference: UNREGISTERED,
            ..self.clone()
        }
    }

    /// Root position
    #[inline]
    pub fn pos(&self) -> IVec3 {
        self.pos
    }

    /// Move the root to `pos`, keeping all three views in step
    pub fn set_pos(&mut self, pos: IVec3) {
        self.translate(pos - self.pos);
    }

    /// Move by `delta`, keeping all three views in step
    pub fn translate(&mut self, delta: IVec3) {
        self.pos += delta;
        self.projection.translate(delta);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Actor reference id, [`UNREGISTERED`] by default
    pub fn reference(&self) -> i32 {
        self.reference
    }

    pub fn set_reference(&mut self, reference: i32) {
        self.reference = reference;
    }

    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    pub fn projection(&self) -> &ShapeProjection {
        &self.projection
    }

    pub fn xy(&self) -> &Shape2D {
        &self.projection.xy
    }

    pub fn xz(&self) -> &Shape2D {
        &self.projection.xz
    }

    pub fn zy(&self) -> &Shape2D {
        &self.projection.zy
    }

    pub fn is_blocking(&self) -> bool {
        self.body.contains(BodyType::BLOCKING)
    }

    /// Carries at least one reaction of `kind`
    pub fn is_reactive(&self, kind: ReactionKind) -> bool {
        self.reactions.has_reactions(kind)
    }

    /// Span on x at world (y, z)
    pub fn x_depth(&self, y: i32, z: i32) -> i32 {
        self.shape.x_depth(y - self.pos.y, z - self.pos.z)
    }

    /// Span on y at world (x, z)
    pub fn y_depth(&self, x: i32, z: i32) -> i32 {
        self.shape.y_depth(x - self.pos.x, z - self.pos.z)
    }

    /// Height above the root at world (x, y)
    pub fn z_depth(&self, x: i32, y: i32) -> i32 {
        self.shape.z_depth(x - self.pos.x, y - self.pos.y)
    }

    /// Elevation of the top surface at world (x, y)
    pub fn surface_at(&self, x: i32, y: i32) -> i32 {
        self.pos.z + self.z_depth(x, y)
    }

    /// Min and max corners of the bounding box
    pub fn bounds(&self) -> (IVec3, IVec3) {
        let xy = self.projection.xy.bounds();
        let xz = self.projection.xz.bounds();
        (
            IVec3::new(xy.x, xy.y, xz.y),
            IVec3::new(xy.right(), xy.bottom(), xz.bottom()),
        )
    }

    /// Midpoint of the bounding box
    pub fn center(&self) -> IVec3 {
        let (min, max) = self.bounds();
        IVec3::new(
            min.x + (max.x - min.x) / 2,
            min.y + (max.y - min.y) / 2,
            min.z + (max.z - min.z) / 2,
        )
    }

    /// Overlap with `other` on all three planes
    pub fn is_colliding(&self, other: &Collider) -> bool {
        self.projection.overlaps(&other.projection)
    }

    /// Overlap with `other` on all three planes if moved by `delta`
    pub fn would_collide(&self, other: &Collider, delta: IVec3) -> bool {
        self.projection.translated(delta).overlaps(&other.projection)
    }
}

/// Unit axis vector pointing from `from` to `to` along their largest difference
pub fn cast_direction(from: IVec3, to: IVec3) -> IVec3 {
    (to - from).dominant_axis()
}

//! Pseudo-3D collision for Stratum
//!
//! This crate resolves movement between integer-positioned solids:
//! - Blocks and right-triangular prisms, each seen through three 2D plane views
//! - Collider set queries (overlap, floor finding, classification filters)
//! - Axis-by-axis movement resolution with slope and corner handling
//! - Weight-based shoving of lighter movers
//! - Reaction tables reported back to the caller

pub mod collider;
pub mod collision;
pub mod direction;
pub mod mover;
pub mod reaction;
pub mod resolve;
pub mod shapes;
pub mod shove;
pub mod world;

// Re-export commonly used types
pub use collider::{cast_direction, BodyType, Collider, ColliderKey, UNREGISTERED};
pub use collision::{ColliderSet, NO_FLOOR};
pub use direction::Direction;
pub use mover::{Mover, DASH_MULTIPLIER, DEFAULT_JUMP_VELOCITY};
pub use reaction::{Reaction, ReactionHub, ReactionKind};
pub use resolve::{prevent_collision, resolve_movement, Motion, MoveOutcome};
pub use shapes::{Axis, ColliderShape, ShapeProjection, TrianglePrism};
pub use shove::shove;
pub use world::{CollisionWorld, MovementConfig, StepReport};

//! Rooms and actors for Stratum
//!
//! This crate sits on top of the collision engine:
//!
//! - [`ShapeTemplate`] / [`ColliderTemplate`] - Serializable collider descriptions in tile units
//! - [`Room`] - Loadable/saveable room (RON)
//! - [`RoomValidator`] - Geometry checks run before a room reaches the engine
//! - [`Actor`] - A named mover with stage-level state
//! - [`Stage`] - Runs a room tick by tick and carries out collider reactions

mod actor;
mod room;
mod room_validator;
mod shapes;
mod stage;

pub use actor::{Actor, ActorFlags, ActorId, ActorInput, PLAYER_EXTENT, PLAYER_WEIGHT};
pub use room::{ColliderTemplate, Room, RoomLoadError, RoomSaveError, BOUNDARY_DEPTH};
pub use room_validator::{RoomValidator, ValidationError};
pub use shapes::{to_pixels, ShapeTemplate};
pub use stage::{Stage, StageEvent};

// Re-export engine types for convenient access through stratum_core
pub use stratum_math::{IVec3, Vec3};
pub use stratum_physics::{
    Axis, Collider, ColliderKey, CollisionWorld, Direction, Mover, MovementConfig, Reaction, ReactionKind,
};

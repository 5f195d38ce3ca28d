//! Room serialization
//!
//! A [`Room`] is the level loader's view of a stage: its size in tiles and
//! the colliders that make it up. Rooms are loaded from and saved to RON
//! files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use stratum_math::IVec3;
use stratum_physics::{Collider, Reaction, ReactionHub, ReactionKind};

use crate::room_validator::{RoomValidator, ValidationError};
use crate::shapes::{to_pixels, ShapeTemplate};

/// Depth of the invisible walls around a room
pub const BOUNDARY_DEPTH: i32 = 99999;

fn default_blocking() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// A collider as written in a room file, in tile units
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColliderTemplate {
    pub name: String,
    /// Root position [x, y, z]
    pub position: [f32; 3],
    pub shape: ShapeTemplate,
    /// Whether movers are stopped by it
    #[serde(default = "default_blocking", skip_serializing_if = "is_true")]
    pub blocking: bool,
    /// Movement weight; a collider with a weight is a mover
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    #[serde(default, skip_serializing_if = "ReactionHub::is_empty")]
    pub reactions: ReactionHub,
}

impl ColliderTemplate {
    /// Create a blocking collider template
    pub fn new(name: impl Into<String>, position: [f32; 3], shape: ShapeTemplate) -> Self {
        Self {
            name: name.into(),
            position,
            shape,
            blocking: true,
            weight: None,
            reactions: ReactionHub::new(),
        }
    }

    pub fn with_blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    /// Make this collider a mover with the given weight
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_reaction(mut self, kind: ReactionKind, reaction: Reaction) -> Self {
        self.reactions.push(kind, reaction);
        self
    }

    /// Root position in pixels
    pub fn pixel_position(&self, tile_size: i32) -> IVec3 {
        let [x, y, z] = self.position;
        IVec3::new(
            to_pixels(x, tile_size),
            to_pixels(y, tile_size),
            to_pixels(z, tile_size),
        )
    }

    /// Create the collider at `tile_size` pixels per tile unit
    pub fn to_collider(&self, tile_size: i32) -> Collider {
        let mut collider = Collider::new(
            self.pixel_position(tile_size),
            self.shape.to_shape(tile_size),
            self.name.clone(),
        )
        .with_blocking(self.blocking);
        collider.reactions = self.reactions.clone();
        collider
    }
}

/// A serializable room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room name (for display/debugging)
    pub name: String,
    /// Width in tiles
    pub width: f32,
    /// Height in tiles
    pub height: f32,
    pub colliders: Vec<ColliderTemplate>,
    /// Player spawn position [x, y, z] in tiles
    #[serde(default)]
    pub spawn: Option<[f32; 3]>,
}

impl Room {
    /// Create a new empty room
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            colliders: Vec::new(),
            spawn: None,
        }
    }

    /// Load a room from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RoomLoadError> {
        let contents = fs::read_to_string(path)?;
        let room: Room = ron::from_str(&contents)?;
        log::info!("Loaded room '{}' with {} colliders", room.name, room.colliders.len());
        Ok(room)
    }

    /// Load a room and reject it if validation finds any problem
    pub fn load_validated<P: AsRef<Path>>(path: P, tile_size: i32) -> Result<Self, RoomLoadError> {
        let room = Self::load(path)?;
        RoomValidator::validate_or_error(&room, tile_size).map_err(RoomLoadError::Invalid)?;
        Ok(room)
    }

    /// Save a room to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RoomSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add a collider template to this room
    pub fn add_collider(&mut self, collider: ColliderTemplate) {
        self.colliders.push(collider);
    }

    /// Set the player spawn position
    pub fn with_spawn(mut self, x: f32, y: f32, z: f32) -> Self {
        self.spawn = Some([x, y, z]);
        self
    }

    /// Room size in pixels (width, height)
    pub fn pixel_size(&self, tile_size: i32) -> (i32, i32) {
        (to_pixels(self.width, tile_size), to_pixels(self.height, tile_size))
    }

    /// Spawn position in pixels
    pub fn pixel_spawn(&self, tile_size: i32) -> Option<IVec3> {
        self.spawn.map(|[x, y, z]| {
            IVec3::new(
                to_pixels(x, tile_size),
                to_pixels(y, tile_size),
                to_pixels(z, tile_size),
            )
        })
    }

    /// Four tall walls one tile thick just outside the room
    ///
    /// Returned north, east, south, west. The north and south walls also
    /// cover the corners.
    pub fn boundaries(&self, tile_size: i32) -> Vec<Collider> {
        let (width, height) = self.pixel_size(tile_size);
        let t = tile_size;
        vec![
            Collider::block(IVec3::new(-t, -t, 0), width + 2 * t, t, BOUNDARY_DEPTH, "boundary-north"),
            Collider::block(IVec3::new(width, -t, 0), t, height + 2 * t, BOUNDARY_DEPTH, "boundary-east"),
            Collider::block(IVec3::new(-t, height, 0), width + 2 * t, t, BOUNDARY_DEPTH, "boundary-south"),
            Collider::block(IVec3::new(-t, -t, 0), t, height + 2 * t, BOUNDARY_DEPTH, "boundary-west"),
        ]
    }
}

/// Error loading a room
#[derive(Debug)]
pub enum RoomLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// The room parsed but failed validation
    Invalid(Vec<ValidationError>),
}

impl From<io::Error> for RoomLoadError {
    fn from(e: io::Error) -> Self {
        RoomLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for RoomLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        RoomLoadError::Parse(e)
    }
}

impl std::fmt::Display for RoomLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomLoadError::Io(e) => write!(f, "IO error: {}", e),
            RoomLoadError::Parse(e) => write!(f, "Parse error: {}", e),
            RoomLoadError::Invalid(errors) => {
                write!(f, "Invalid room ({} problems)", errors.len())?;
                for error in errors {
                    write!(f, "; {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for RoomLoadError {}

/// Error saving a room
#[derive(Debug)]
pub enum RoomSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for RoomSaveError {
    fn from(e: io::Error) -> Self {
        RoomSaveError::Io(e)
    }
}

impl From<ron::Error> for RoomSaveError {
    fn from(e: ron::Error) -> Self {
        RoomSaveError::Serialize(e)
    }
}

impl std::fmt::Display for RoomSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomSaveError::Io(e) => write!(f, "IO error: {}", e),
            RoomSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for RoomSaveError {}

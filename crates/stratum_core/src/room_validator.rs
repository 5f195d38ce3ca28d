//! Room validation
//!
//! The collision engine assumes well-formed geometry and has no error paths
//! of its own. [`RoomValidator`] rejects the rooms it could not handle:
//! non-positive extents, degenerate or non-right triangles, and duplicate
//! collider names.

use std::collections::HashSet;

use stratum_math::Triangle2;
use stratum_physics::{ColliderShape, TrianglePrism};

use crate::room::Room;

/// Validation error found in a room
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Room has no colliders
    EmptyRoom,
    /// Width or height is not positive once scaled
    InvalidDimensions { width: i32, height: i32 },
    /// Tile size must be at least one pixel
    InvalidTileSize(i32),
    /// Duplicate collider name found
    DuplicateName(String),
    /// A block extent or extrusion depth is zero or negative once scaled
    NonPositiveExtent(String),
    /// Triangle has a zero-length edge or no area
    DegenerateTriangle(String),
    /// Triangle has no right angle
    NotRightTriangle(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyRoom => write!(f, "Room has no colliders"),
            ValidationError::InvalidDimensions { width, height } => {
                write!(f, "Invalid room dimensions: {}x{}", width, height)
            }
            ValidationError::InvalidTileSize(size) => write!(f, "Invalid tile size: {}", size),
            ValidationError::DuplicateName(name) => {
                write!(f, "Duplicate collider name: '{}'", name)
            }
            ValidationError::NonPositiveExtent(name) => {
                write!(f, "Collider '{}' has a zero or negative extent", name)
            }
            ValidationError::DegenerateTriangle(name) => {
                write!(f, "Collider '{}' is a degenerate triangle", name)
            }
            ValidationError::NotRightTriangle(name) => {
                write!(f, "Collider '{}' is not a right triangle", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn is_degenerate(prism: &TrianglePrism) -> bool {
    let [a, b, c] = prism.section();
    a == b || b == c || a == c || Triangle2::new(a, b, c).doubled_area() == 0
}

/// Room validator that checks geometry before it reaches the engine
///
/// Shapes are checked after scaling to pixels, since flooring a small
/// fractional extent can collapse it to zero.
pub struct RoomValidator;

impl RoomValidator {
    /// Validate a room at `tile_size` pixels per tile, returning all errors found
    pub fn validate(room: &Room, tile_size: i32) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if tile_size < 1 {
            errors.push(ValidationError::InvalidTileSize(tile_size));
            return errors;
        }

        if room.colliders.is_empty() {
            errors.push(ValidationError::EmptyRoom);
        }

        let (width, height) = room.pixel_size(tile_size);
        if width <= 0 || height <= 0 {
            errors.push(ValidationError::InvalidDimensions { width, height });
        }

        let mut seen_names = HashSet::new();
        for template in &room.colliders {
            if !seen_names.insert(template.name.as_str()) {
                errors.push(ValidationError::DuplicateName(template.name.clone()));
            }

            match template.shape.to_shape(tile_size) {
                ColliderShape::Block { w, h, d } => {
                    if w <= 0 || h <= 0 || d <= 0 {
                        errors.push(ValidationError::NonPositiveExtent(template.name.clone()));
                    }
                }
                ColliderShape::Triangle(prism) => {
                    if prism.depth <= 0 {
                        errors.push(ValidationError::NonPositiveExtent(template.name.clone()));
                    }
                    if is_degenerate(&prism) {
                        errors.push(ValidationError::DegenerateTriangle(template.name.clone()));
                    } else if !prism.is_right() {
                        errors.push(ValidationError::NotRightTriangle(template.name.clone()));
                    }
                }
            }
        }

        for error in &errors {
            log::warn!("Room '{}': {}", room.name, error);
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(room: &Room, tile_size: i32) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(room, tile_size);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

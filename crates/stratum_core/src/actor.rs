//! Actors: named movers owned by the stage
//!
//! An actor is the stage's handle on one mover in the collision world. Its
//! collider carries the actor's index as reference id, so collision results
//! can be mapped back to the actor.

use bitflags::bitflags;
use stratum_math::IVec3;
use stratum_physics::{ColliderKey, UNREGISTERED};

/// Extents of the player's collider (w, h, d)
pub const PLAYER_EXTENT: IVec3 = IVec3::new(8, 8, 16);

/// Weight of the player; lighter than push blocks
pub const PLAYER_WEIGHT: i32 = 5;

bitflags! {
    /// Behaviour flags for an actor
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ActorFlags: u8 {
        /// Takes part in collision
        const CAN_COLLIDE = 1 << 0;
        /// Driven by [`ActorInput`]
        const CONTROLLED = 1 << 1;
        /// Not drawn; gets no shadow
        const INVISIBLE = 1 << 2;
    }
}

/// Index of an actor on its stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActorId(pub usize);

impl ActorId {
    /// Reference id stored on the actor's collider
    ///
    /// [`UNREGISTERED`] if the index does not fit.
    pub fn reference(self) -> i32 {
        i32::try_from(self.0).unwrap_or(UNREGISTERED)
    }

    /// Actor id from a collider reference id, if it names one
    pub fn from_reference(reference: i32) -> Option<Self> {
        usize::try_from(reference).ok().map(ActorId)
    }
}

/// One tick of input for a controlled actor
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActorInput {
    /// Ground-plane velocity (x, y)
    pub walk: (f32, f32),
    /// Jump button is down
    pub jump: bool,
    pub dash: bool,
}

impl ActorInput {
    pub fn walking(vx: f32, vy: f32) -> Self {
        Self { walk: (vx, vy), ..Default::default() }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_dash(mut self) -> Self {
        self.dash = true;
        self
    }
}

/// A mover with a name and stage-level state
#[derive(Clone, Debug)]
pub struct Actor {
    pub name: String,
    key: ColliderKey,
    pub flags: ActorFlags,
    /// Jump held on the latest input; picks strong bounces
    pub jump_held: bool,
    /// Elevation of the floor under the actor, if any
    pub shadow_z: Option<i32>,
}

impl Actor {
    pub(crate) fn new(name: impl Into<String>, key: ColliderKey, flags: ActorFlags) -> Self {
        Self {
            name: name.into(),
            key,
            flags,
            jump_held: false,
            shadow_z: None,
        }
    }

    /// Key of the actor's collider in the collision world
    pub fn key(&self) -> ColliderKey {
        self.key
    }

    pub fn is_controlled(&self) -> bool {
        self.flags.contains(ActorFlags::CONTROLLED)
    }

    pub fn is_visible(&self) -> bool {
        !self.flags.contains(ActorFlags::INVISIBLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_roundtrip() {
        let id = ActorId(3);
        assert_eq!(ActorId::from_reference(id.reference()), Some(id));
        assert_eq!(ActorId::from_reference(-1), None);
    }

    #[test]
    fn test_oversized_index_is_unregistered() {
        let id = ActorId(i32::MAX as usize + 1);
        assert_eq!(id.reference(), UNREGISTERED);
        assert_eq!(ActorId::from_reference(id.reference()), None);
    }

    #[test]
    fn test_flags() {
        let actor = Actor::new("ghost", ColliderKey::default(), ActorFlags::INVISIBLE);
        assert!(!actor.is_visible());
        assert!(!actor.is_controlled());

        let player = Actor::new("player", ColliderKey::default(), ActorFlags::CAN_COLLIDE | ActorFlags::CONTROLLED);
        assert!(player.is_visible());
        assert!(player.is_controlled());
    }

    #[test]
    fn test_input_builders() {
        let input = ActorInput::walking(1.0, -0.5).with_jump();
        assert_eq!(input.walk, (1.0, -0.5));
        assert!(input.jump);
        assert!(!input.dash);
    }
}

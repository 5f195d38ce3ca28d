//! Movement state for colliders that move on their own
//!
//! Velocities are fractional. Each tick the whole-number part of
//! `velocity + remainder` is handed to the resolver and the fraction is kept
//! for the next tick, so slow movers still get somewhere.

use stratum_math::{IVec3, Vec3};

use crate::direction::Direction;
use crate::resolve::{Motion, MoveOutcome};
use crate::world::MovementConfig;

/// Default upward velocity for a jump
pub const DEFAULT_JUMP_VELOCITY: f32 = 3.5;

/// Dash speed as a multiple of a unit facing step
pub const DASH_MULTIPLIER: f32 = 2.5;

/// Mover state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mover {
    /// Units per tick
    pub velocity: Vec3,
    /// Fraction of a unit carried over from previous ticks
    remainder: Vec3,
    /// Standing on something
    pub grounded: bool,
    /// Has dashed since last touching the ground
    pub dashed: bool,
    /// Heavier movers shove lighter ones
    pub weight: i32,
    pub facing: Direction,
    /// Takes part in collision at all
    pub can_collide: bool,
}

impl Default for Mover {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Mover {
    pub fn new(weight: i32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            remainder: Vec3::ZERO,
            grounded: false,
            dashed: false,
            weight,
            facing: Direction::default(),
            can_collide: true,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_can_collide(mut self, can_collide: bool) -> Self {
        self.can_collide = can_collide;
        self
    }

    /// Set the ground-plane velocity, leaving z alone
    pub fn set_walk(&mut self, vx: f32, vy: f32) {
        self.velocity.x = vx;
        self.velocity.y = vy;
    }

    /// Turn to face the ground-plane component of the velocity, if any
    pub fn face_velocity(&mut self) {
        if let Some(dir) = Direction::from_velocity(self.velocity) {
            self.facing = dir;
        }
    }

    /// Take this tick's whole-number displacement
    pub fn displacement(&mut self) -> IVec3 {
        let (whole, fraction) = (self.velocity + self.remainder).split_whole();
        self.remainder = fraction;
        whole
    }

    /// Build this tick's motion request
    pub fn motion(&mut self) -> Motion {
        Motion::new(self.displacement())
            .with_grounded(self.grounded)
            .with_facing(self.facing)
    }

    /// Update velocity and contact state from a resolve
    ///
    /// Vertical velocity stops on ground or ceiling contact; otherwise
    /// gravity pulls it down to the terminal velocity. A mover that did not
    /// move vertically keeps its grounded state.
    pub fn apply_outcome(&mut self, outcome: &MoveOutcome, config: &MovementConfig) {
        if outcome.hit_ground || outcome.hit_ceiling {
            self.velocity.z = 0.0;
            self.remainder.z = 0.0;
        } else {
            self.velocity.z = (self.velocity.z - config.gravity).max(config.terminal_velocity);
        }

        if outcome.hit_ground {
            self.grounded = true;
        } else if outcome.applied.z != 0 || outcome.hit_ceiling {
            self.grounded = false;
        }

        if self.grounded {
            self.dashed = false;
        }
    }

    /// Not travelling on the ground plane, and vertically no faster than the
    /// sub-unit drift gravity leaves on a resting mover
    pub fn is_at_rest(&self) -> bool {
        self.velocity.x == 0.0 && self.velocity.y == 0.0 && self.velocity.z.abs() < 1.0
    }

    /// Launch upward; always succeeds
    pub fn launch(&mut self, vz: f32) {
        self.velocity.z = vz;
        self.grounded = false;
    }

    /// Jump if standing on something
    pub fn jump(&mut self, vz: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.launch(vz);
        true
    }

    /// Burst along the facing direction, once per landing
    pub fn dash(&mut self) -> bool {
        if self.dashed || !self.grounded {
            return false;
        }
        let step = Vec3::from(self.facing.to_vec()).normalized() * DASH_MULTIPLIER;
        self.set_walk(step.x, step.y);
        self.dashed = true;
        true
    }
}

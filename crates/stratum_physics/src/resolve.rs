//! Axis-by-axis movement resolution
//!
//! A requested displacement is resolved in a fixed order: Z, then X, then Y.
//! Each axis is tested against the colliders that overlap the subject on
//! the plane that does *not* see that axis, and a candidate only stops the
//! subject when the two planes that do see it both report a collision.
//! After the three axes, [`resolve_movement`] optionally lets a grounded
//! mover walk up or down one-unit steps and slide around corners it only
//! clipped.

use stratum_math::{resolve, IVec3};

use crate::collider::Collider;
use crate::collision::ColliderSet;
use crate::direction::Direction;
use crate::world::MovementConfig;

/// Contact flags and the displacement actually applied
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub hit_ground: bool,
    pub hit_ceiling: bool,
    pub hit_wall: bool,
    pub applied: IVec3,
}

/// A displacement request from a mover
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Motion {
    pub delta: IVec3,
    /// The mover was standing on something before this tick
    pub grounded: bool,
    pub facing: Direction,
}

impl Motion {
    pub fn new(delta: IVec3) -> Self {
        Self { delta, grounded: false, facing: Direction::default() }
    }

    pub fn with_grounded(mut self, grounded: bool) -> Self {
        self.grounded = grounded;
        self
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }
}

/// Pick the plane answer that lets the subject travel further
///
/// The subject is free as soon as either plane separates, so the 3D limit
/// is the larger of the two safe displacements.
fn less_restrictive(delta: i32, a: i32, b: i32) -> i32 {
    if delta > 0 {
        a.max(b)
    } else {
        a.min(b)
    }
}

/// Keep `candidate` if it is a smaller correction than `current`
///
/// A walk that crossed zero or overshot the request means the subject is
/// already embedded; it may not advance further in, so that axis stops.
fn tighter(delta: i32, current: i32, candidate: i32) -> i32 {
    let candidate = if candidate.signum() == -delta.signum() || candidate.abs() > delta.abs() {
        0
    } else {
        candidate
    };
    if candidate.abs() < current.abs() {
        candidate
    } else {
        current
    }
}

/// Safe z displacement, and whether it hit the ground or a ceiling
pub fn resolve_z(dz: i32, subject: &Collider, set: &ColliderSet) -> (i32, bool, bool) {
    if dz == 0 {
        return (0, false, false);
    }
    let mut rz = dz;
    let mut hit = false;
    for c in set.colliding_xy(subject).colliders() {
        let xz = resolve(subject.xz(), c.xz(), 0, dz);
        let zy = resolve(subject.zy(), c.zy(), dz, 0);
        if xz.colliding && zy.colliding {
            let z = less_restrictive(dz, xz.dy, zy.dx);
            log::trace!("z: '{}' limits {} to {}", c.name(), dz, z);
            rz = tighter(dz, rz, z);
            hit = true;
        }
    }
    (rz, hit && dz < 0, hit && dz > 0)
}

/// Safe x displacement, and whether a wall was hit
pub fn resolve_x(dx: i32, subject: &Collider, set: &ColliderSet) -> (i32, bool) {
    if dx == 0 {
        return (0, false);
    }
    let mut rx = dx;
    let mut hit = false;
    for c in set.colliding_zy(subject).colliders() {
        let xy = resolve(subject.xy(), c.xy(), dx, 0);
        let xz = resolve(subject.xz(), c.xz(), dx, 0);
        if xy.colliding && xz.colliding {
            let x = less_restrictive(dx, xy.dx, xz.dx);
            log::trace!("x: '{}' limits {} to {}", c.name(), dx, x);
            rx = tighter(dx, rx, x);
            hit = true;
        }
    }
    (rx, hit)
}

/// Safe y displacement, and whether a wall was hit
pub fn resolve_y(dy: i32, subject: &Collider, set: &ColliderSet) -> (i32, bool) {
    if dy == 0 {
        return (0, false);
    }
    let mut ry = dy;
    let mut hit = false;
    for c in set.colliding_xz(subject).colliders() {
        let xy = resolve(subject.xy(), c.xy(), 0, dy);
        let zy = resolve(subject.zy(), c.zy(), 0, dy);
        if xy.colliding && zy.colliding {
            let y = less_restrictive(dy, xy.dy, zy.dy);
            log::trace!("y: '{}' limits {} to {}", c.name(), dy, y);
            ry = tighter(dy, ry, y);
            hit = true;
        }
    }
    (ry, hit)
}

/// Move `subject` by as much of `delta` as `set` allows, one axis at a time
///
/// The subject is translated as a side effect. No slope or corner handling.
pub fn prevent_collision(delta: IVec3, subject: &mut Collider, set: &ColliderSet) -> MoveOutcome {
    let (az, hit_ground, hit_ceiling) = resolve_z(delta.z, subject, set);
    subject.translate(IVec3::along_z(az));

    let (ax, hit_wall_x) = resolve_x(delta.x, subject, set);
    subject.translate(IVec3::along_x(ax));

    let (ay, hit_wall_y) = resolve_y(delta.y, subject, set);
    subject.translate(IVec3::along_y(ay));

    MoveOutcome {
        hit_ground,
        hit_ceiling,
        hit_wall: hit_wall_x || hit_wall_y,
        applied: IVec3::new(ax, ay, az),
    }
}

/// Full movement resolution for one mover
///
/// Runs [`prevent_collision`], then slope traversal and glancing correction
/// as enabled in `config`.
pub fn resolve_movement(
    motion: &Motion,
    subject: &mut Collider,
    set: &ColliderSet,
    config: &MovementConfig,
) -> MoveOutcome {
    let mut out = prevent_collision(motion.delta, subject, set);

    if config.slope_traversal && motion.grounded {
        traverse_slope(motion, subject, set, &mut out);
    }

    if config.glancing_correction && out.hit_wall && motion.facing.is_orthogonal() {
        glance(motion.facing, subject, set, &mut out);
    }

    out
}

fn commit(subject: &mut Collider, out: &mut MoveOutcome, step: IVec3) {
    subject.translate(step);
    out.applied += step;
}

fn traverse_slope(motion: &Motion, subject: &mut Collider, set: &ColliderSet, out: &mut MoveOutcome) {
    if out.hit_wall {
        let remainder = IVec3::new(motion.delta.x - out.applied.x, motion.delta.y - out.applied.y, 0);
        if set.would_collide(remainder, subject) && !set.would_collide(remainder + IVec3::Z, subject) {
            log::debug!("'{}' steps up by {:?}", subject.name(), remainder + IVec3::Z);
            commit(subject, out, remainder + IVec3::Z);
            out.hit_wall = false;
            out.hit_ground = true;
        }
    } else if !out.hit_ground
        && !set.would_collide(-IVec3::Z, subject)
        && set.would_collide(IVec3::along_z(-2), subject)
    {
        log::debug!("'{}' steps down", subject.name());
        commit(subject, out, -IVec3::Z);
        out.hit_ground = true;
    }
}

fn glance(facing: Direction, subject: &mut Collider, set: &ColliderSet, out: &mut MoveOutcome) {
    let f = facing.to_vec();
    let nudges = if facing.is_horizontal() {
        [IVec3::new(f.x, -1, 0), IVec3::new(f.x, 1, 0)]
    } else {
        [IVec3::new(-1, f.y, 0), IVec3::new(1, f.y, 0)]
    };
    if let Some(nudge) = nudges.into_iter().find(|n| !set.would_collide(*n, subject)) {
        log::debug!("'{}' glances by {:?}", subject.name(), nudge);
        commit(subject, out, nudge);
    }
}

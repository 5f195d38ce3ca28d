//! Collision world and per-tick movement

use slotmap::{SecondaryMap, SlotMap};
use stratum_math::IVec3;

use crate::collider::{Collider, ColliderKey};
use crate::collision::ColliderSet;
use crate::mover::Mover;
use crate::reaction::ReactionKind;
use crate::resolve::{prevent_collision, resolve_movement, MoveOutcome};
use crate::shove::shove;

/// Configuration for movement resolution
#[derive(Clone, Debug, PartialEq)]
pub struct MovementConfig {
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Lowest vertical velocity (negative = down)
    pub terminal_velocity: f32,
    /// Let grounded movers climb and descend one-unit steps
    pub slope_traversal: bool,
    /// Slide around corners that were only clipped
    pub glancing_correction: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: 0.25,
            terminal_velocity: -6.0,
            slope_traversal: true,
            glancing_correction: true,
        }
    }
}

/// What happened to one mover during a tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub outcome: MoveOutcome,
    /// Colliders with collision reactions the mover ran into
    pub touched: Vec<ColliderKey>,
    /// Lighter colliders pushed aside, with their own outcomes
    pub shoved: Vec<(ColliderKey, MoveOutcome)>,
}

/// Every collider in a room, plus movement state for the ones that move
pub struct CollisionWorld {
    colliders: SlotMap<ColliderKey, Collider>,
    movers: SecondaryMap<ColliderKey, Mover>,
    /// Movement configuration
    pub config: MovementConfig,
}

impl CollisionWorld {
    /// Create a new world with default configuration
    pub fn new() -> Self {
        Self::with_config(MovementConfig::default())
    }

    /// Create a new world with custom configuration
    pub fn with_config(config: MovementConfig) -> Self {
        Self {
            colliders: SlotMap::with_key(),
            movers: SecondaryMap::new(),
            config,
        }
    }

    /// Add a fixture that never moves on its own
    pub fn add_collider(&mut self, collider: Collider) -> ColliderKey {
        self.colliders.insert(collider)
    }

    /// Add a collider with movement state
    pub fn add_mover(&mut self, collider: Collider, mover: Mover) -> ColliderKey {
        let key = self.colliders.insert(collider);
        self.movers.insert(key, mover);
        key
    }

    /// Remove a collider (and its movement state)
    pub fn remove(&mut self, key: ColliderKey) -> Option<Collider> {
        self.movers.remove(key);
        self.colliders.remove(key)
    }

    pub fn get(&self, key: ColliderKey) -> Option<&Collider> {
        self.colliders.get(key)
    }

    pub fn get_mut(&mut self, key: ColliderKey) -> Option<&mut Collider> {
        self.colliders.get_mut(key)
    }

    pub fn mover(&self, key: ColliderKey) -> Option<&Mover> {
        self.movers.get(key)
    }

    pub fn mover_mut(&mut self, key: ColliderKey) -> Option<&mut Mover> {
        self.movers.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColliderKey, &Collider)> {
        self.colliders.iter()
    }

    /// Keys of every collider with movement state
    pub fn mover_keys(&self) -> Vec<ColliderKey> {
        self.movers.keys().collect()
    }

    /// This tick's collider set: fixtures plus movers that can collide
    pub fn collider_set(&self) -> ColliderSet<'_> {
        self.colliders
            .iter()
            .filter(|(key, _)| self.movers.get(*key).map_or(true, |m| m.can_collide))
            .collect()
    }

    /// Advance every mover by one tick, in insertion order
    pub fn step(&mut self) -> Vec<(ColliderKey, StepReport)> {
        self.mover_keys()
            .into_iter()
            .filter_map(|key| self.step_mover(key).map(|report| (key, report)))
            .collect()
    }

    /// Advance one mover by one tick
    ///
    /// Finds reactive colliders in the way, resolves against the blocking
    /// colliders that are not lighter movers, shoves the lighter movers it
    /// ends up overlapping, then updates the mover's velocity and contact
    /// state. `None` when `key` is not a mover.
    pub fn step_mover(&mut self, key: ColliderKey) -> Option<StepReport> {
        let mut mover = *self.movers.get(key)?;
        let mut subject = self.colliders.get(key)?.clone();
        mover.face_velocity();
        let motion = mover.motion();

        let (outcome, touched, shovable) = if mover.can_collide {
            let others = self.collider_set().exclude_self(key);
            let touched: Vec<ColliderKey> = others
                .reactive(ReactionKind::OnCollision)
                .colliding_after(motion.delta, &subject)
                .keys()
                .collect();
            let blocking = others.blocking();
            let shovable: Vec<ColliderKey> = blocking
                .filter(|k, _| self.movers.get(k).is_some_and(|m| m.weight < mover.weight))
                .keys()
                .collect();
            let solid = blocking.filter(|k, _| !shovable.contains(&k));
            let outcome = resolve_movement(&motion, &mut subject, &solid, &self.config);
            (outcome, touched, shovable)
        } else {
            subject.translate(motion.delta);
            (MoveOutcome { applied: motion.delta, ..Default::default() }, Vec::new(), Vec::new())
        };

        let anchor = subject.copy();
        if let Some(slot) = self.colliders.get_mut(key) {
            *slot = subject;
        }

        let (shoved_keys, candidates): (Vec<ColliderKey>, Vec<&mut Collider>) = self
            .colliders
            .iter_mut()
            .filter(|(k, c)| shovable.contains(k) && anchor.is_colliding(c))
            .unzip();
        let shoved = shoved_keys.into_iter().zip(shove(outcome.applied, &anchor, candidates)).collect();

        mover.apply_outcome(&outcome, &self.config);
        if let Some(slot) = self.movers.get_mut(key) {
            *slot = mover;
        }

        log::trace!("{:?} moved by {:?}: {:?}", key, outcome.applied, outcome);

        Some(StepReport { outcome, touched, shoved })
    }

    /// Move a collider by `delta` as far as the blocking colliders allow
    ///
    /// Used for scripted displacement (push blocks); no slopes, no shoving.
    pub fn nudge(&mut self, key: ColliderKey, delta: IVec3) -> Option<MoveOutcome> {
        let mut subject = self.colliders.get(key)?.clone();
        let outcome = {
            let solid = self.collider_set().exclude_self(key).blocking();
            prevent_collision(delta, &mut subject, &solid)
        };
        if let Some(slot) = self.colliders.get_mut(key) {
            *slot = subject;
        }
        Some(outcome)
    }

    /// Elevation of the highest blocking surface under a collider
    pub fn find_floor(&self, key: ColliderKey) -> Option<i32> {
        let subject = self.colliders.get(key)?;
        Some(self.collider_set().exclude_self(key).blocking().find_floor(subject))
    }

    /// Colliders with interaction reactions one facing-step ahead of a mover
    pub fn interact(&self, key: ColliderKey) -> Vec<ColliderKey> {
        let (Some(subject), Some(mover)) = (self.colliders.get(key), self.movers.get(key)) else {
            return Vec::new();
        };
        self.collider_set()
            .exclude_self(key)
            .reactive(ReactionKind::OnInteraction)
            .colliding_after(mover.facing.to_vec(), subject)
            .keys()
            .collect()
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::NO_FLOOR;
    use crate::direction::Direction;
    use crate::reaction::Reaction;
    use stratum_math::Vec3;

    fn world_with_floor() -> (CollisionWorld, ColliderKey) {
        let mut world = CollisionWorld::new();
        let floor = world.add_collider(Collider::block(IVec3::new(-64, -64, 0), 128, 128, 16, "floor"));
        (world, floor)
    }

    #[test]
    fn test_mover_falls_and_lands() {
        let (mut world, _) = world_with_floor();
        let hero = world.add_mover(Collider::block(IVec3::new(0, 0, 20), 8, 8, 8, "hero"), Mover::new(2));

        for _ in 0..40 {
            world.step();
        }

        assert_eq!(world.get(hero).unwrap().pos().z, 16);
        let mover = world.mover(hero).unwrap();
        assert!(mover.grounded);
    }

    #[test]
    fn test_heavy_mover_shoves_light_one() {
        let mut world = CollisionWorld::new();
        let heavy = world.add_mover(
            Collider::block(IVec3::new(0, 0, 0), 8, 8, 8, "heavy"),
            Mover::new(5).with_velocity(Vec3::new(4.0, 0.0, 0.0)),
        );
        let light = world.add_mover(Collider::block(IVec3::new(10, 0, 0), 8, 8, 8, "light"), Mover::new(1));
        world.config.gravity = 0.0;

        let report = world.step_mover(heavy).unwrap();

        assert_eq!(world.get(heavy).unwrap().pos().x, 4);
        assert_eq!(world.get(light).unwrap().pos().x, 12);
        assert_eq!(report.shoved.len(), 1);
        assert_eq!(report.shoved[0].0, light);
    }

    #[test]
    fn test_heavy_landing_on_light_does_not_sink_it() {
        let (mut world, _) = world_with_floor();
        let light = world.add_mover(Collider::block(IVec3::new(0, 0, 16), 8, 8, 8, "light"), Mover::new(1));
        let heavy = world.add_mover(Collider::block(IVec3::new(0, 0, 40), 8, 8, 8, "heavy"), Mover::new(5));

        for _ in 0..200 {
            world.step();
        }

        assert_eq!(world.get(heavy).unwrap().pos().z, 16);
        assert_eq!(world.get(light).unwrap().pos().z, 8, "pressed flush under the heavy mover");

        for _ in 0..20 {
            let report = world.step_mover(light).unwrap();
            assert!(report.outcome.hit_ground);
            assert_eq!(report.outcome.applied.z, 0);
        }
        assert_eq!(world.get(light).unwrap().pos().z, 8);
        assert!(world.mover(light).unwrap().grounded);
    }

    #[test]
    fn test_light_mover_is_blocked_by_heavy_one() {
        let mut world = CollisionWorld::new();
        world.add_mover(Collider::block(IVec3::new(10, 0, 0), 8, 8, 8, "heavy"), Mover::new(5));
        let light = world.add_mover(
            Collider::block(IVec3::new(0, 0, 0), 8, 8, 8, "light"),
            Mover::new(1).with_velocity(Vec3::new(4.0, 0.0, 0.0)),
        );
        world.config.gravity = 0.0;

        let report = world.step_mover(light).unwrap();

        assert!(report.outcome.hit_wall);
        assert_eq!(world.get(light).unwrap().pos().x, 2);
        assert!(report.shoved.is_empty());
    }

    #[test]
    fn test_touched_reports_reactive_colliders() {
        let (mut world, _) = world_with_floor();
        let pad = world.add_collider(
            Collider::block(IVec3::new(0, 0, 16), 16, 16, 2, "pad")
                .with_blocking(false)
                .with_reaction(ReactionKind::OnCollision, Reaction::Bounce { weak: 3.3, strong: 5.0 }),
        );
        let hero = world.add_mover(
            Collider::block(IVec3::new(2, 2, 20), 8, 8, 8, "hero"),
            Mover::new(1).with_velocity(Vec3::new(0.0, 0.0, -3.0)),
        );

        let report = world.step_mover(hero).unwrap();
        assert_eq!(report.touched, vec![pad]);
    }

    #[test]
    fn test_find_floor_excludes_self() {
        let (mut world, _) = world_with_floor();
        let hero = world.add_mover(Collider::block(IVec3::new(0, 0, 30), 8, 8, 8, "hero"), Mover::new(1));
        assert_eq!(world.find_floor(hero), Some(16));

        let lonely = CollisionWorld::new();
        assert_eq!(lonely.find_floor(hero), None);

        let mut empty = CollisionWorld::new();
        let k = empty.add_collider(Collider::block(IVec3::ZERO, 8, 8, 8, "solo"));
        assert_eq!(empty.find_floor(k), Some(NO_FLOOR));
    }

    #[test]
    fn test_interact_probes_facing_step() {
        let (mut world, _) = world_with_floor();
        let sign = world.add_collider(
            Collider::block(IVec3::new(8, 0, 16), 8, 8, 8, "sign")
                .with_reaction(ReactionKind::OnInteraction, Reaction::Message { lines: vec!["hello".into()] }),
        );
        let hero = world.add_mover(
            Collider::block(IVec3::new(0, 0, 16), 8, 8, 8, "hero"),
            Mover::new(1).with_facing(Direction::Right),
        );
        assert_eq!(world.interact(hero), vec![sign]);

        world.mover_mut(hero).unwrap().facing = Direction::Left;
        assert!(world.interact(hero).is_empty());
    }

    #[test]
    fn test_nudge_stops_at_wall() {
        let (mut world, _) = world_with_floor();
        world.add_collider(Collider::block(IVec3::new(32, 0, 16), 8, 8, 8, "wall"));
        let block = world.add_collider(Collider::block(IVec3::new(16, 0, 16), 8, 8, 8, "push"));

        let outcome = world.nudge(block, IVec3::along_x(16)).unwrap();

        assert!(outcome.hit_wall);
        assert_eq!(world.get(block).unwrap().pos().x, 24);
    }

    #[test]
    fn test_non_colliding_mover_passes_through() {
        let (mut world, _) = world_with_floor();
        let ghost = world.add_mover(
            Collider::block(IVec3::new(0, 0, 10), 8, 8, 8, "ghost"),
            Mover::new(1).with_can_collide(false).with_velocity(Vec3::new(0.0, 0.0, -3.0)),
        );
        world.step_mover(ghost);
        assert_eq!(world.get(ghost).unwrap().pos().z, 7);
        assert_eq!(world.collider_set().len(), 1);
    }
}

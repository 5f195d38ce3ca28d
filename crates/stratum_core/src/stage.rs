//! The stage: one room's collision world plus the actors in it
//!
//! Each tick the stage steps every mover through the collision world,
//! turns the reactions they ran into into [`StageEvent`]s, and then runs the
//! queued events in order. Reactions never run while a mover is being
//! resolved.

use std::collections::{HashMap, VecDeque};

use stratum_math::{IVec3, Vec3};
use stratum_physics::{
    cast_direction, Collider, ColliderKey, CollisionWorld, Mover, MovementConfig, Reaction, ReactionKind,
    DEFAULT_JUMP_VELOCITY, NO_FLOOR,
};

use crate::actor::{Actor, ActorFlags, ActorId, ActorInput, PLAYER_EXTENT, PLAYER_WEIGHT};
use crate::room::Room;

/// Something a reaction asked the stage to do
#[derive(Clone, Debug, PartialEq)]
pub enum StageEvent {
    /// Set a mover's vertical velocity
    Launch { key: ColliderKey, velocity: f32 },
    /// Move a collider as far as blocking colliders allow
    MoveBy { key: ColliderKey, delta: IVec3 },
    /// Show text from a named source
    Message { source: String, lines: Vec<String> },
}

/// A running room
pub struct Stage {
    name: String,
    world: CollisionWorld,
    actors: Vec<Actor>,
    events: VecDeque<StageEvent>,
    /// Consecutive ticks each (mover, push target) pair has been in contact
    leaning: HashMap<(ColliderKey, ColliderKey), u32>,
    messages: Vec<String>,
    ticks: u64,
}

impl Stage {
    /// Create an empty stage
    pub fn new(name: impl Into<String>, config: MovementConfig) -> Self {
        Self {
            name: name.into(),
            world: CollisionWorld::with_config(config),
            actors: Vec::new(),
            events: VecDeque::new(),
            leaning: HashMap::new(),
            messages: Vec::new(),
            ticks: 0,
        }
    }

    /// Instantiate a room: boundaries first, then its colliders in file order
    ///
    /// Colliders with a weight become movers. No actors are spawned.
    pub fn from_room(room: &Room, tile_size: i32, config: MovementConfig) -> Self {
        let mut stage = Self::new(room.name.clone(), config);

        for wall in room.boundaries(tile_size) {
            stage.world.add_collider(wall);
        }
        for template in &room.colliders {
            let collider = template.to_collider(tile_size);
            match template.weight {
                Some(weight) => stage.world.add_mover(collider, Mover::new(weight)),
                None => stage.world.add_collider(collider),
            };
        }

        log::info!("Stage '{}' ready with {} colliders", stage.name, stage.world.len());
        stage
    }

    /// Add an actor; its collider's reference id becomes the actor's index
    pub fn spawn_actor(
        &mut self,
        name: impl Into<String>,
        mut collider: Collider,
        mut mover: Mover,
        flags: ActorFlags,
    ) -> ActorId {
        let id = ActorId(self.actors.len());
        collider.set_reference(id.reference());
        mover.can_collide = flags.contains(ActorFlags::CAN_COLLIDE);
        let key = self.world.add_mover(collider, mover);
        self.actors.push(Actor::new(name, key, flags));
        id
    }

    /// Add the controlled player actor at `pos`
    pub fn spawn_player(&mut self, pos: IVec3) -> ActorId {
        let e = PLAYER_EXTENT;
        self.spawn_actor(
            "player",
            Collider::block(pos, e.x, e.y, e.z, "player"),
            Mover::new(PLAYER_WEIGHT),
            ActorFlags::CAN_COLLIDE | ActorFlags::CONTROLLED,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut CollisionWorld {
        &mut self.world
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0)
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// The actor's collider
    pub fn collider(&self, id: ActorId) -> Option<&Collider> {
        self.world.get(self.actor(id)?.key())
    }

    /// The actor's movement state
    pub fn mover(&self, id: ActorId) -> Option<&Mover> {
        self.world.mover(self.actor(id)?.key())
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Every message line shown so far
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Take the shown message lines, leaving none
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Queue an event for the end of the current (or next) tick
    pub fn queue(&mut self, event: StageEvent) {
        self.events.push_back(event);
    }

    /// Apply one tick of input to a controlled actor
    ///
    /// Returns false if the actor does not exist or is not controlled.
    pub fn control(&mut self, id: ActorId, input: ActorInput) -> bool {
        let Some(actor) = self.actors.get_mut(id.0) else {
            return false;
        };
        if !actor.is_controlled() {
            return false;
        }
        actor.jump_held = input.jump;
        let Some(mover) = self.world.mover_mut(actor.key()) else {
            return false;
        };

        mover.set_walk(input.walk.0, input.walk.1);
        if input.jump {
            mover.jump(DEFAULT_JUMP_VELOCITY);
        }
        if input.dash {
            mover.dash();
        }
        true
    }

    /// Advance the stage by one tick
    pub fn tick(&mut self) {
        let mut leaning = HashMap::new();

        for key in self.world.mover_keys() {
            let Some(pre_pos) = self.world.get(key).map(Collider::pos) else {
                continue;
            };
            let pre_velocity = self.world.mover(key).map_or(Vec3::ZERO, |m| m.velocity);
            let Some(report) = self.world.step_mover(key) else {
                continue;
            };
            for object in report.touched {
                self.collide(key, object, pre_pos, pre_velocity, &mut leaning);
            }
        }

        self.leaning = leaning;
        self.process_events();
        self.update_shadows();
        self.ticks += 1;
    }

    /// Run the interaction reactions of whatever the actor is facing
    ///
    /// Returns how many colliders responded.
    pub fn interact(&mut self, id: ActorId) -> usize {
        let Some(subject) = self.actor(id).map(Actor::key) else {
            return 0;
        };
        let targets = self.world.interact(subject);

        for &object in &targets {
            let Some(target) = self.world.get(object) else {
                continue;
            };
            let source = target.name().to_string();
            for reaction in target.reactions.get(ReactionKind::OnInteraction).to_vec() {
                match reaction {
                    Reaction::Bounce { weak, .. } => {
                        self.events.push_back(StageEvent::Launch { key: subject, velocity: weak });
                    }
                    Reaction::Push { distance, .. } => {
                        if let Some(delta) = self.push_delta(subject, object, distance) {
                            self.events.push_back(StageEvent::MoveBy { key: object, delta });
                        }
                    }
                    Reaction::Message { lines } => {
                        self.events.push_back(StageEvent::Message { source: source.clone(), lines });
                    }
                }
            }
        }

        self.process_events();
        targets.len()
    }

    fn collide(
        &mut self,
        subject: ColliderKey,
        object: ColliderKey,
        pre_pos: IVec3,
        pre_velocity: Vec3,
        leaning: &mut HashMap<(ColliderKey, ColliderKey), u32>,
    ) {
        let Some(target) = self.world.get(object) else {
            return;
        };
        let top = target.bounds().1.z;
        let source = target.name().to_string();

        for reaction in target.reactions.get(ReactionKind::OnCollision).to_vec() {
            match reaction {
                Reaction::Bounce { weak, strong } => {
                    // only when coming down onto the top
                    if pre_pos.z >= top && pre_velocity.z < 0.0 {
                        let velocity = if self.jump_held(subject) { strong } else { weak };
                        self.events.push_back(StageEvent::Launch { key: subject, velocity });
                    }
                }
                Reaction::Push { distance, after_ticks } => {
                    // a block already on the move does not count as leaned on
                    if !self.world.mover(object).map_or(true, Mover::is_at_rest) {
                        continue;
                    }
                    let count = self.leaning.get(&(subject, object)).copied().unwrap_or(0) + 1;
                    if count > after_ticks {
                        if let Some(delta) = self.push_delta(subject, object, distance) {
                            self.events.push_back(StageEvent::MoveBy { key: object, delta });
                        }
                        leaning.insert((subject, object), 0);
                    } else {
                        leaning.insert((subject, object), count);
                    }
                }
                Reaction::Message { lines } => {
                    self.events.push_back(StageEvent::Message { source: source.clone(), lines });
                }
            }
        }
    }

    /// Ground-plane push from `subject` towards `object`, scaled by `distance`
    fn push_delta(&self, subject: ColliderKey, object: ColliderKey, distance: i32) -> Option<IVec3> {
        let from = self.world.get(subject)?.center();
        let to = self.world.get(object)?.center();
        let mut axis = cast_direction(from, to);
        axis.z = 0;
        if axis.is_zero() {
            return None;
        }
        Some(axis * distance)
    }

    fn jump_held(&self, key: ColliderKey) -> bool {
        self.world
            .get(key)
            .and_then(|c| ActorId::from_reference(c.reference()))
            .and_then(|id| self.actors.get(id.0))
            .is_some_and(|actor| actor.jump_held)
    }

    fn process_events(&mut self) {
        while let Some(event) = self.events.pop_front() {
            match event {
                StageEvent::Launch { key, velocity } => {
                    if let Some(mover) = self.world.mover_mut(key) {
                        mover.launch(velocity);
                        log::debug!("{:?} launched at {}", key, velocity);
                    }
                }
                StageEvent::MoveBy { key, delta } => {
                    if let Some(outcome) = self.world.nudge(key, delta) {
                        log::debug!("{:?} pushed by {:?}, moved {:?}", key, delta, outcome.applied);
                    }
                }
                StageEvent::Message { source, lines } => {
                    for line in lines {
                        log::info!("{}: {}", source, line);
                        self.messages.push(line);
                    }
                }
            }
        }
    }

    fn update_shadows(&mut self) {
        for actor in &mut self.actors {
            actor.shadow_z = if actor.is_visible() {
                self.world.find_floor(actor.key()).filter(|&z| z != NO_FLOOR)
            } else {
                None
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::ColliderTemplate;
    use crate::shapes::ShapeTemplate;

    fn flat_stage() -> Stage {
        let mut stage = Stage::new("flat", MovementConfig::default());
        stage
            .world_mut()
            .add_collider(Collider::block(IVec3::new(-64, -64, 0), 128, 128, 16, "floor"));
        stage
    }

    #[test]
    fn test_from_room_adds_boundaries_and_colliders() {
        let mut room = Room::new("Test", 4.0, 4.0);
        room.add_collider(ColliderTemplate::new("floor", [0.0, 0.0, 0.0], ShapeTemplate::block(4.0, 4.0, 1.0)));
        room.add_collider(
            ColliderTemplate::new("crate", [1.0, 1.0, 1.0], ShapeTemplate::block(1.0, 1.0, 1.0)).with_weight(10),
        );

        let stage = Stage::from_room(&room, 16, MovementConfig::default());

        assert_eq!(stage.name(), "Test");
        assert_eq!(stage.world().len(), 6);
        assert_eq!(stage.world().mover_keys().len(), 1);
    }

    #[test]
    fn test_spawn_sets_reference() {
        let mut stage = flat_stage();
        let first = stage.spawn_player(IVec3::new(0, 0, 16));
        let second = stage.spawn_actor(
            "ghost",
            Collider::block(IVec3::new(20, 0, 16), 8, 8, 8, "ghost"),
            Mover::new(1),
            ActorFlags::INVISIBLE,
        );

        assert_eq!(stage.collider(first).unwrap().reference(), 0);
        assert_eq!(stage.collider(second).unwrap().reference(), 1);
        assert!(!stage.mover(second).unwrap().can_collide);
    }

    #[test]
    fn test_control_requires_controlled_flag() {
        let mut stage = flat_stage();
        let player = stage.spawn_player(IVec3::new(0, 0, 16));
        let npc = stage.spawn_actor(
            "npc",
            Collider::block(IVec3::new(20, 0, 16), 8, 8, 8, "npc"),
            Mover::new(1),
            ActorFlags::CAN_COLLIDE,
        );

        assert!(stage.control(player, ActorInput::walking(1.0, 0.0)));
        assert!(!stage.control(npc, ActorInput::walking(1.0, 0.0)));
        assert_eq!(stage.mover(player).unwrap().velocity.x, 1.0);
        assert_eq!(stage.mover(npc).unwrap().velocity.x, 0.0);
    }

    #[test]
    fn test_shadow_follows_floor() {
        let mut stage = flat_stage();
        let player = stage.spawn_player(IVec3::new(0, 0, 40));
        stage.tick();
        assert_eq!(stage.actor(player).unwrap().shadow_z, Some(16));
        assert_eq!(stage.tick_count(), 1);
    }

    #[test]
    fn test_invisible_actor_has_no_shadow() {
        let mut stage = flat_stage();
        let ghost = stage.spawn_actor(
            "ghost",
            Collider::block(IVec3::new(0, 0, 40), 8, 8, 8, "ghost"),
            Mover::new(1),
            ActorFlags::CAN_COLLIDE | ActorFlags::INVISIBLE,
        );
        stage.tick();
        assert_eq!(stage.actor(ghost).unwrap().shadow_z, None);
    }

    #[test]
    fn test_queued_events_run_in_order() {
        let mut stage = flat_stage();
        stage.queue(StageEvent::Message { source: "a".into(), lines: vec!["first".into()] });
        stage.queue(StageEvent::Message { source: "b".into(), lines: vec!["second".into(), "third".into()] });
        stage.tick();
        assert_eq!(stage.take_messages(), vec!["first", "second", "third"]);
        assert!(stage.messages().is_empty());
    }

    #[test]
    fn test_interact_shows_message() {
        let mut stage = flat_stage();
        stage.world_mut().add_collider(
            Collider::block(IVec3::new(8, 0, 16), 8, 8, 8, "sign").with_reaction(
                ReactionKind::OnInteraction,
                Reaction::Message { lines: vec!["Welcome".into()] },
            ),
        );
        let player = stage.spawn_player(IVec3::new(0, 0, 16));
        let key = stage.actor(player).unwrap().key();
        stage.world_mut().mover_mut(key).unwrap().facing = stratum_physics::Direction::Right;

        assert_eq!(stage.interact(player), 1);
        assert_eq!(stage.messages(), ["Welcome"]);
    }
}

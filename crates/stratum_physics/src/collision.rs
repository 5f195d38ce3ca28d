//! Collider set queries
//!
//! A [`ColliderSet`] is an ordered view over borrowed colliders. It is
//! rebuilt every tick and never owns or mutates anything; every filter
//! returns a new set that keeps the relative order of its input.

use stratum_math::IVec3;

use crate::collider::{Collider, ColliderKey};
use crate::reaction::ReactionKind;

/// Returned by [`ColliderSet::find_floor`] when nothing is underneath
pub const NO_FLOOR: i32 = -99;

/// Ordered sequence of colliders
#[derive(Clone, Debug, Default)]
pub struct ColliderSet<'a> {
    entries: Vec<(ColliderKey, &'a Collider)>,
}

impl<'a> ColliderSet<'a> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// A set holding a single unregistered collider
    pub fn single(collider: &'a Collider) -> Self {
        Self { entries: vec![(ColliderKey::default(), collider)] }
    }

    pub fn push(&mut self, key: ColliderKey, collider: &'a Collider) {
        self.entries.push((key, collider));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColliderKey, &'a Collider)> + '_ {
        self.entries.iter().copied()
    }

    pub fn colliders(&self) -> impl Iterator<Item = &'a Collider> + '_ {
        self.entries.iter().map(|(_, c)| *c)
    }

    pub fn keys(&self) -> impl Iterator<Item = ColliderKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn contains(&self, key: ColliderKey) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// Keep the members for which `keep` returns true
    pub fn filter(&self, mut keep: impl FnMut(ColliderKey, &Collider) -> bool) -> Self {
        self.entries
            .iter()
            .filter(|(k, c)| keep(*k, *c))
            .copied()
            .collect()
    }

    /// Members overlapping the subject on all three planes
    pub fn currently_colliding(&self, subject: &Collider) -> Self {
        self.filter(|_, c| subject.is_colliding(c))
    }

    /// Members the subject would overlap after moving by `delta`
    pub fn colliding_after(&self, delta: IVec3, subject: &Collider) -> Self {
        self.filter(|_, c| subject.would_collide(c, delta))
    }

    /// Whether the subject would overlap anything after moving by `delta`
    pub fn would_collide(&self, delta: IVec3, subject: &Collider) -> bool {
        self.colliders().any(|c| subject.would_collide(c, delta))
    }

    /// Members overlapping the subject's top-down view
    pub fn colliding_xy(&self, subject: &Collider) -> Self {
        self.filter(|_, c| c.xy().is_colliding(subject.xy()))
    }

    /// Members overlapping the subject's front view
    pub fn colliding_xz(&self, subject: &Collider) -> Self {
        self.filter(|_, c| c.xz().is_colliding(subject.xz()))
    }

    /// Members overlapping the subject's side view
    pub fn colliding_zy(&self, subject: &Collider) -> Self {
        self.filter(|_, c| c.zy().is_colliding(subject.zy()))
    }

    /// Highest surface under the subject's root that is at or below its z
    ///
    /// Surfaces are sampled at the subject's root (x, y). [`NO_FLOOR`] when
    /// no member qualifies.
    pub fn find_floor(&self, subject: &Collider) -> i32 {
        let pos = subject.pos();
        self.colliding_xy(subject)
            .colliders()
            .map(|c| c.surface_at(pos.x, pos.y))
            .filter(|&z| z <= pos.z)
            .fold(NO_FLOOR, i32::max)
    }

    /// Members that block movement
    pub fn blocking(&self) -> Self {
        self.filter(|_, c| c.is_blocking())
    }

    /// Members carrying reactions of `kind`
    pub fn reactive(&self, kind: ReactionKind) -> Self {
        self.filter(|_, c| c.is_reactive(kind))
    }

    /// Everything except the member stored under `key`
    pub fn exclude_self(&self, key: ColliderKey) -> Self {
        self.filter(|k, _| k != key)
    }

    /// Everything whose reference id is not `reference`
    pub fn exclude_by_ref(&self, reference: i32) -> Self {
        self.filter(|_, c| c.reference() != reference)
    }
}

impl<'a> FromIterator<(ColliderKey, &'a Collider)> for ColliderSet<'a> {
    fn from_iter<I: IntoIterator<Item = (ColliderKey, &'a Collider)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction::Reaction;
    use slotmap::SlotMap;

    fn arena() -> (SlotMap<ColliderKey, Collider>, Vec<ColliderKey>) {
        let mut colliders = SlotMap::with_key();
        let keys = vec![
            colliders.insert(Collider::block(IVec3::new(0, 0, 0), 32, 32, 8, "floor")),
            colliders.insert(
                Collider::block(IVec3::new(0, 0, 8), 8, 8, 4, "step")
                    .with_reaction(ReactionKind::OnCollision, Reaction::Bounce { weak: 3.3, strong: 5.0 }),
            ),
            colliders.insert(Collider::block(IVec3::new(20, 0, 8), 4, 4, 4, "ghost").with_blocking(false)),
        ];
        (colliders, keys)
    }

    fn set(colliders: &SlotMap<ColliderKey, Collider>) -> ColliderSet<'_> {
        colliders.iter().collect()
    }

    #[test]
    fn test_filters_preserve_order() {
        let (colliders, keys) = arena();
        let all = set(&colliders);
        let blocking: Vec<_> = all.blocking().keys().collect();
        assert_eq!(blocking, vec![keys[0], keys[1]]);
        let reactive: Vec<_> = all.reactive(ReactionKind::OnCollision).keys().collect();
        assert_eq!(reactive, vec![keys[1]]);
        let rest: Vec<_> = all.exclude_self(keys[1]).keys().collect();
        assert_eq!(rest, vec![keys[0], keys[2]]);
    }

    #[test]
    fn test_exclude_by_ref() {
        let mut colliders: SlotMap<ColliderKey, Collider> = SlotMap::with_key();
        colliders.insert(Collider::block(IVec3::ZERO, 8, 8, 8, "a").with_reference(3));
        colliders.insert(Collider::block(IVec3::ZERO, 8, 8, 8, "b").with_reference(4));
        let all = set(&colliders);
        let names: Vec<_> = all.exclude_by_ref(3).colliders().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["b"]);
    }

    #[test]
    fn test_would_collide_is_non_mutating() {
        let (colliders, _) = arena();
        let all = set(&colliders);
        let mover = Collider::block(IVec3::new(40, 0, 8), 4, 4, 4, "mover");
        assert!(!all.would_collide(IVec3::ZERO, &mover));
        assert!(all.would_collide(IVec3::new(-18, 0, 0), &mover));
        assert_eq!(all.colliding_after(IVec3::new(-18, 0, 0), &mover).len(), 1);
        assert_eq!(mover.pos(), IVec3::new(40, 0, 8));
    }

    #[test]
    fn test_currently_colliding() {
        let (colliders, _) = arena();
        let all = set(&colliders);
        let mover = Collider::block(IVec3::new(4, 4, 6), 4, 4, 4, "mover");
        let hits: Vec<_> = all.currently_colliding(&mover).colliders().map(|c| c.name()).collect();
        assert_eq!(hits, vec!["floor", "step"]);
    }

    #[test]
    fn test_find_floor_takes_highest_below() {
        let (colliders, _) = arena();
        let all = set(&colliders).blocking();
        let above_step = Collider::block(IVec3::new(2, 2, 20), 4, 4, 4, "mover");
        assert_eq!(all.find_floor(&above_step), 12);
        let beside_step = Collider::block(IVec3::new(12, 2, 20), 4, 4, 4, "mover");
        assert_eq!(all.find_floor(&beside_step), 8);
    }

    #[test]
    fn test_find_floor_sentinel() {
        let (colliders, _) = arena();
        let all = set(&colliders);
        let outside = Collider::block(IVec3::new(100, 100, 0), 4, 4, 4, "mover");
        assert_eq!(all.find_floor(&outside), NO_FLOOR);
        let below = Collider::block(IVec3::new(2, 2, -10), 4, 4, 4, "mover");
        assert_eq!(all.find_floor(&below), NO_FLOOR);
    }
}

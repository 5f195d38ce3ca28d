//! Shoving lighter colliders out of a mover's way
//!
//! A heavy mover resolves its own movement without the lighter blocking
//! colliders in the set, so it ends up overlapping them. Each of those is then
//! carried along by the mover's displacement and walked back towards where
//! it came from until it no longer overlaps the mover. The net effect is that
//! the lighter collider moves by the displacement minus its own correction
//! and ends up flush against the mover.

use stratum_math::IVec3;

use crate::collider::Collider;
use crate::collision::ColliderSet;
use crate::resolve::{prevent_collision, MoveOutcome};

/// Displace every candidate in favour of the mover
///
/// `anchor` is the mover at its post-move position; only its geometry is
/// used. Candidates are resolved one at a time against the anchor alone, in
/// iteration order, and their outcomes are returned in the same order.
pub fn shove<'c>(
    delta: IVec3,
    anchor: &Collider,
    candidates: impl IntoIterator<Item = &'c mut Collider>,
) -> Vec<MoveOutcome> {
    let set = ColliderSet::single(anchor);
    candidates
        .into_iter()
        .map(|candidate| {
            candidate.translate(delta);
            let outcome = prevent_collision(-delta, candidate, &set);
            log::debug!(
                "'{}' shoved '{}' to {:?}",
                anchor.name(),
                candidate.name(),
                candidate.pos()
            );
            outcome
        })
        .collect()
}

//! Reactions attached to colliders
//!
//! The engine only stores and reports reactions. Running them (launching a
//! mover, moving a push block, opening a message window) is up to the caller.

use serde::{Deserialize, Serialize};

/// When a reaction should fire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    /// A mover ran into the collider
    OnCollision,
    /// A mover faced the collider and pressed interact
    OnInteraction,
}

/// Plain-data reaction, executed by the actor layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Reaction {
    /// Launch a mover that lands on top upward; `strong` when jump is held
    Bounce { weak: f32, strong: f32 },
    /// Move the collider by `distance` along the dominant axis away from the
    /// mover, once the mover has leaned on it for more than `after_ticks`
    /// consecutive ticks
    Push { distance: i32, after_ticks: u32 },
    /// Show some text
    Message { lines: Vec<String> },
}

/// Ordered reaction lists for one collider
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionHub {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_collision: Vec<Reaction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_interaction: Vec<Reaction>,
}

impl ReactionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reaction to the list for `kind`
    pub fn push(&mut self, kind: ReactionKind, reaction: Reaction) {
        match kind {
            ReactionKind::OnCollision => self.on_collision.push(reaction),
            ReactionKind::OnInteraction => self.on_interaction.push(reaction),
        }
    }

    pub fn has_reactions(&self, kind: ReactionKind) -> bool {
        !self.get(kind).is_empty()
    }

    /// Reactions for `kind`, in insertion order
    pub fn get(&self, kind: ReactionKind) -> &[Reaction] {
        match kind {
            ReactionKind::OnCollision => &self.on_collision,
            ReactionKind::OnInteraction => &self.on_interaction,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.on_collision.is_empty() && self.on_interaction.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut hub = ReactionHub::new();
        hub.push(ReactionKind::OnCollision, Reaction::Bounce { weak: 3.3, strong: 5.0 });
        hub.push(ReactionKind::OnCollision, Reaction::Push { distance: 16, after_ticks: 20 });

        let reactions = hub.get(ReactionKind::OnCollision);
        assert_eq!(reactions.len(), 2);
        assert!(matches!(reactions[0], Reaction::Bounce { .. }));
        assert!(matches!(reactions[1], Reaction::Push { .. }));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut hub = ReactionHub::new();
        assert!(hub.is_empty());
        hub.push(ReactionKind::OnInteraction, Reaction::Message { lines: vec!["hi".into()] });

        assert!(hub.has_reactions(ReactionKind::OnInteraction));
        assert!(!hub.has_reactions(ReactionKind::OnCollision));
        assert!(hub.get(ReactionKind::OnCollision).is_empty());
    }
}

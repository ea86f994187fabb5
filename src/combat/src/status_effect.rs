//! Status effect counters for combatants
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Poison,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusKind::Poison => write!(f, "poison"),
        }
    }
}

/// Active effects and the turns each has left
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: BTreeMap<StatusKind, u32>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or refreshes the counter; zero turns removes the effect.
    pub fn apply(&mut self, kind: StatusKind, turns: u32) {
        if turns == 0 {
            self.effects.remove(&kind);
        } else {
            self.effects.insert(kind, turns);
        }
    }

    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.remove(&kind);
    }

    pub fn turns_left(&self, kind: StatusKind) -> u32 {
        self.effects.get(&kind).copied().unwrap_or(0)
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.turns_left(kind) > 0
    }

    /// Decrements the counter and drops the effect when it reaches zero.
    /// Returns true if the effect was active before the tick.
    pub fn tick(&mut self, kind: StatusKind) -> bool {
        let Some(turns) = self.effects.get_mut(&kind) else {
            return false;
        };
        *turns = turns.saturating_sub(1);
        if *turns == 0 {
            self.effects.remove(&kind);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

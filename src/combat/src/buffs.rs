// src/combat/src/buffs.rs

/// Per-battle player modifiers. Dropped when the battle ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatBuffs {
    /// Next basic attack deals double damage
    pub double_damage: bool,
    /// Remaining charges of the 1.5x attack boost
    pub boost_attack: u32,
    /// Remaining turns of raised critical chance (cosmetic)
    pub critical_boost: u32,
    /// Next enemy attack may be evaded
    pub dodge: bool,
    /// Halves every enemy hit until the battle ends
    pub mana_shield: bool,
    /// Defense added to the next enemy attack only
    pub guard: i32,
    /// Player was given the opening turn by an artifact
    pub first_strike: bool,
}

impl CombatBuffs {
    /// End-of-round decay of the turn counters.
    pub fn decay(&mut self) {
        self.boost_attack = self.boost_attack.saturating_sub(1);
        self.critical_boost = self.critical_boost.saturating_sub(1);
    }

    /// Takes the guard bonus, leaving zero behind.
    pub fn take_guard(&mut self) -> i32 {
        std::mem::take(&mut self.guard)
    }
}

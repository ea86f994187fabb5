//src/catalog/src/effect.rs
use serde::{Deserialize, Serialize};
use strum::Display;

/// 效果触发时机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Trigger {
    /// Evaluated once before the first turn.
    BattleStart,
    /// Activated by the player as a turn action.
    Attack,
    /// Always on; no combat mechanics of its own.
    Passive,
    /// Fires with the player's first basic attack of the encounter.
    FirstAttack,
}

/// Predicate over live combat state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Always,
    /// True until the player's first attack has landed.
    FirstAttack,
    /// Enemy HP strictly above `percent` of its maximum.
    EnemyHpAbove { percent: u8 },
    /// Player HP strictly below `percent` of its maximum.
    PlayerHpBelow { percent: u8 },
    EnemyHpFull,
}

/// What a satisfied effect does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    BonusDamage(i32),
    /// Damage equal to `percent` of the enemy's max HP.
    MaxHpPercentDamage(u8),
    DoubleNextHit,
    FirstStrike,
    Aura(Aura),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aura {
    Royal,
    Rhythm,
}

/// Trigger-gated conditional modifier attached to an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Effect {
    pub trigger: Trigger,
    pub condition: Condition,
    pub outcome: Outcome,
}

impl Effect {
    pub const fn new(trigger: Trigger, condition: Condition, outcome: Outcome) -> Self {
        Self {
            trigger,
            condition,
            outcome,
        }
    }

    pub fn grants_first_strike(&self) -> bool {
        self.trigger == Trigger::BattleStart && self.outcome == Outcome::FirstStrike
    }

    /// Effects delivered with the opening basic attack.
    pub fn is_opening(&self) -> bool {
        match self.trigger {
            Trigger::FirstAttack => true,
            Trigger::BattleStart => self.outcome != Outcome::FirstStrike,
            Trigger::Attack | Trigger::Passive => false,
        }
    }
}

/// Snapshot of combat state a [`Condition`] is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectContext {
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub enemy_hp: i32,
    pub enemy_max_hp: i32,
    pub first_attack: bool,
}

impl Condition {
    pub fn holds(&self, ctx: &EffectContext) -> bool {
        // i64 keeps the percentage products exact
        match *self {
            Condition::Always => true,
            Condition::FirstAttack => ctx.first_attack,
            Condition::EnemyHpAbove { percent } => {
                i64::from(ctx.enemy_hp) * 100 > i64::from(ctx.enemy_max_hp) * i64::from(percent)
            }
            Condition::PlayerHpBelow { percent } => {
                i64::from(ctx.player_hp) * 100 < i64::from(ctx.player_max_hp) * i64::from(percent)
            }
            Condition::EnemyHpFull => ctx.enemy_hp >= ctx.enemy_max_hp,
        }
    }
}

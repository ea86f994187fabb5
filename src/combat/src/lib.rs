// src/combat/src/lib.rs
//! Enemy model and the turn-based battle engine.

pub mod action;
pub mod buffs;
pub mod combatant;
pub mod dice;
pub mod engine;
pub mod enemy;
pub mod rules;
pub mod status_effect;

pub use crate::action::{BattleController, BattleView, PlayerAction, Rejection, ScriptedController};
pub use crate::buffs::CombatBuffs;
pub use crate::combatant::Combatant;
pub use crate::dice::{Dice, FixedDice, GameRng};
pub use crate::engine::{
    Battle, BattleConfig, BattleReport, BattleState, CombatError, Outcome, resolve_battle,
};
pub use crate::enemy::{DEFAULT_DROP_CHANCE, Enemy};
pub use crate::status_effect::{StatusEffects, StatusKind};

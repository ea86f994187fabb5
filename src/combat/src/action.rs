// src/combat/src/action.rs
//! Player choices and the controller seam that supplies them.

use std::collections::VecDeque;
use std::fmt;

use catalog::ArtifactId;
use hero::Player;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffs::CombatBuffs;
use crate::enemy::Enemy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack,
    /// Index into the active class's skill list
    Skill(usize),
    /// Activate an equipped artifact with an attack-triggered effect
    Artifact(ArtifactId),
    Defend,
    Flee,
    Inspect,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Attack => write!(f, "attack"),
            PlayerAction::Skill(index) => write!(f, "skill #{}", index + 1),
            PlayerAction::Artifact(id) => write!(f, "artifact {id}"),
            PlayerAction::Defend => write!(f, "defend"),
            PlayerAction::Flee => write!(f, "flee"),
            PlayerAction::Inspect => write!(f, "inspect"),
        }
    }
}

/// Why a player choice was refused. A rejected choice never consumes the turn.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("no skill at position {}", .0 + 1)]
    InvalidSkill(usize),
    #[error("not enough mana: need {needed}, have {available}")]
    InsufficientMana { needed: i32, available: i32 },
    #[error("no equipped artifact has a usable effect")]
    NoUsableArtifact,
    #[error("{0} cannot be activated")]
    InvalidChoice(String),
}

/// Read-only battle state handed to a controller.
#[derive(Debug, Clone, Copy)]
pub struct BattleView<'a> {
    pub player: &'a Player,
    pub enemy: &'a Enemy,
    pub buffs: &'a CombatBuffs,
    pub usable_artifacts: &'a [ArtifactId],
    pub round: u32,
}

/// Supplies player decisions during a battle.
pub trait BattleController {
    fn choose_action(&mut self, view: &BattleView<'_>) -> PlayerAction;

    /// Called when a choice was refused; the controller is asked again.
    fn on_rejected(&mut self, _rejection: &Rejection) {}

    /// Called for `Inspect`; the controller is asked again.
    fn on_inspect(&mut self, _view: &BattleView<'_>) {}
}

/// Plays a fixed list of actions, then repeats the fallback.
#[derive(Debug, Clone)]
pub struct ScriptedController {
    actions: VecDeque<PlayerAction>,
    fallback: PlayerAction,
    pub rejections: Vec<Rejection>,
    pub inspections: usize,
}

impl ScriptedController {
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            fallback: PlayerAction::Attack,
            rejections: Vec::new(),
            inspections: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: PlayerAction) -> Self {
        self.fallback = fallback;
        self
    }
}

impl BattleController for ScriptedController {
    fn choose_action(&mut self, _view: &BattleView<'_>) -> PlayerAction {
        self.actions
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn on_rejected(&mut self, rejection: &Rejection) {
        self.rejections.push(rejection.clone());
    }

    fn on_inspect(&mut self, _view: &BattleView<'_>) {
        self.inspections += 1;
    }
}

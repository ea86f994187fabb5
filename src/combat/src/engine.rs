// src/combat/src/engine.rs
//! Turn-based battle state machine.

use std::fmt;

use catalog::{ArtifactId, CatalogError, Effect, EffectContext, Outcome as EffectOutcome, Race, SkillEffect, Trigger};
use hero::{HeroError, Player};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::action::{BattleController, BattleView, PlayerAction, Rejection};
use crate::buffs::CombatBuffs;
use crate::combatant::Combatant;
use crate::dice::Dice;
use crate::enemy::Enemy;
use crate::rules;
use crate::status_effect::StatusKind;

#[derive(Debug, Error, PartialEq)]
pub enum CombatError {
    #[error("{0} has no HP left and cannot fight")]
    CannotEnterBattle(String),
    #[error("gave up after {0} consecutive rejected actions")]
    TooManyRejectedActions(u32),
    #[error("gave up after {0} consecutive inspections")]
    TooManyInspections(u32),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Hero(#[from] HeroError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
    Fled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Victory => write!(f, "victory"),
            Outcome::Defeat => write!(f, "defeat"),
            Outcome::Fled => write!(f, "fled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    PlayerTurn,
    EnemyTurn,
    Resolved(Outcome),
}

impl BattleState {
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            BattleState::Resolved(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Consecutive rejected choices tolerated before the battle is forfeited
    pub max_rejected_actions: u32,
    /// Consecutive inspections tolerated before the battle is forfeited
    pub max_inspections: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rejected_actions: 20,
            max_inspections: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BattleReport {
    pub outcome: Outcome,
    /// Rounds played, one per consumed action on either side
    pub turns: u32,
    pub log: Vec<String>,
    /// Races unlocked by this battle's victory
    pub unlocked: Vec<Race>,
    /// Resolved as a defeat because of an internal error or too many rejections
    pub forfeited: bool,
}

/// What a player choice did to the turn
#[derive(Debug)]
enum Resolution {
    Consumed,
    Rejected(Rejection),
    Inspected,
}

pub struct Battle<'a> {
    player: &'a mut Player,
    enemy: &'a mut Enemy,
    dice: &'a mut dyn Dice,
    config: BattleConfig,
    state: BattleState,
    buffs: CombatBuffs,
    opening: Vec<(ArtifactId, Effect)>,
    usable: Vec<ArtifactId>,
    attacked: bool,
    rounds: u32,
    rejected: u32,
    inspected: u32,
    log: Vec<String>,
    unlocked: Vec<Race>,
    forfeited: bool,
}

impl<'a> Battle<'a> {
    /// Sets up a battle and evaluates battle-start effects.
    pub fn new(
        player: &'a mut Player,
        enemy: &'a mut Enemy,
        dice: &'a mut dyn Dice,
        config: BattleConfig,
    ) -> Result<Self, CombatError> {
        if player.is_defeated() {
            return Err(CombatError::CannotEnterBattle(player.name().to_string()));
        }

        let state = if Combatant::speed(&*player) >= enemy.speed {
            BattleState::PlayerTurn
        } else {
            BattleState::EnemyTurn
        };
        let mut battle = Self {
            player,
            enemy,
            dice,
            config,
            state,
            buffs: CombatBuffs::default(),
            opening: Vec::new(),
            usable: Vec::new(),
            attacked: false,
            rounds: 0,
            rejected: 0,
            inspected: 0,
            log: Vec::new(),
            unlocked: Vec::new(),
            forfeited: false,
        };
        battle.record(format!(
            "Battle against {} (level {})!",
            battle.enemy.name, battle.enemy.level
        ));
        if let Err(err) = battle.arm_effects() {
            battle.forfeit(err);
        }
        Ok(battle)
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn buffs(&self) -> &CombatBuffs {
        &self.buffs
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn player(&self) -> &Player {
        &*self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &*self.enemy
    }

    pub fn view(&self) -> BattleView<'_> {
        BattleView {
            player: &*self.player,
            enemy: &*self.enemy,
            buffs: &self.buffs,
            usable_artifacts: &self.usable,
            round: self.rounds,
        }
    }

    fn arm_effects(&mut self) -> Result<(), CombatError> {
        let catalog = std::sync::Arc::clone(self.player.catalog());
        let ctx = self.context();
        for id in self.player.equipped() {
            let artifact = catalog.get_artifact(id.as_str())?;
            let Some(effect) = artifact.effect else {
                continue;
            };
            if effect.trigger == Trigger::Attack {
                self.usable.push(id.clone());
            } else if effect.grants_first_strike() {
                if effect.condition.holds(&ctx) {
                    self.state = BattleState::PlayerTurn;
                    self.buffs.first_strike = true;
                }
            } else if effect.is_opening() {
                self.opening.push((id.clone(), effect));
            }
        }
        if self.buffs.first_strike {
            self.record("An artifact grants you the first strike!".to_string());
        }
        Ok(())
    }

    fn context(&self) -> EffectContext {
        EffectContext {
            player_hp: self.player.current_hp(),
            player_max_hp: self.player.max_hp(),
            enemy_hp: self.enemy.hp,
            enemy_max_hp: self.enemy.max_hp,
            first_attack: !self.attacked,
        }
    }

    fn record(&mut self, line: String) {
        debug!(target: "battle", "{line}");
        self.log.push(line);
    }

    fn forfeit(&mut self, err: CombatError) {
        error!(error = %err, enemy = %self.enemy.name, "battle forfeited");
        self.record(format!("The battle is lost: {err}"));
        self.forfeited = true;
        self.state = BattleState::Resolved(Outcome::Defeat);
    }

    /// Advances the battle by one controller decision or one enemy action.
    pub fn step(&mut self, controller: &mut dyn BattleController) -> BattleState {
        match self.state {
            BattleState::Resolved(_) => {}
            BattleState::PlayerTurn => self.player_turn(controller),
            BattleState::EnemyTurn => {
                self.rounds += 1;
                self.enemy_attack();
                if self.player.is_defeated() {
                    self.record("You were defeated...".to_string());
                    self.state = BattleState::Resolved(Outcome::Defeat);
                } else {
                    self.end_round(BattleState::PlayerTurn);
                }
            }
        }
        self.state
    }

    /// Plays the battle to the end.
    pub fn run(mut self, controller: &mut dyn BattleController) -> BattleReport {
        while self.state.outcome().is_none() {
            self.step(controller);
        }
        self.into_report()
    }

    pub fn into_report(self) -> BattleReport {
        BattleReport {
            outcome: self.state.outcome().unwrap_or(Outcome::Defeat),
            turns: self.rounds,
            log: self.log,
            unlocked: self.unlocked,
            forfeited: self.forfeited,
        }
    }

    fn player_turn(&mut self, controller: &mut dyn BattleController) {
        let action = controller.choose_action(&self.view());
        debug!(target: "battle", %action, "player action");
        match self.resolve_action(action) {
            Err(err) => self.forfeit(err),
            Ok(Resolution::Consumed) => {
                self.rejected = 0;
                self.inspected = 0;
                self.rounds += 1;
                if self.state.outcome().is_some() {
                    return;
                }
                if self.enemy.is_alive() {
                    self.end_round(BattleState::EnemyTurn);
                } else {
                    self.record(format!("{} is defeated!", self.enemy.name));
                    self.win();
                }
            }
            Ok(Resolution::Rejected(rejection)) => {
                self.record(format!("{rejection}"));
                controller.on_rejected(&rejection);
                self.rejected += 1;
                if self.rejected > self.config.max_rejected_actions {
                    self.forfeit(CombatError::TooManyRejectedActions(self.rejected));
                }
            }
            Ok(Resolution::Inspected) => {
                controller.on_inspect(&self.view());
                self.inspected += 1;
                if self.inspected > self.config.max_inspections {
                    self.forfeit(CombatError::TooManyInspections(self.inspected));
                }
            }
        }
    }

    fn resolve_action(&mut self, action: PlayerAction) -> Result<Resolution, CombatError> {
        match action {
            PlayerAction::Attack => {
                self.basic_attack();
                Ok(Resolution::Consumed)
            }
            PlayerAction::Skill(index) => self.use_skill(index),
            PlayerAction::Artifact(id) => self.use_artifact(&id),
            PlayerAction::Defend => {
                self.buffs.guard = rules::DEFEND_BONUS;
                self.buffs.dodge = true;
                self.record("You brace yourself, defense is raised for this turn!".to_string());
                Ok(Resolution::Consumed)
            }
            PlayerAction::Flee => {
                self.try_flee();
                Ok(Resolution::Consumed)
            }
            PlayerAction::Inspect => Ok(Resolution::Inspected),
        }
    }

    fn basic_attack(&mut self) {
        let ctx = self.context();
        let mut damage = rules::basic_damage(Combatant::attack(&*self.player), self.enemy.defense);
        if self.buffs.double_damage {
            damage *= 2;
            self.buffs.double_damage = false;
        }
        if self.buffs.boost_attack > 0 {
            damage = rules::boosted(damage);
            self.buffs.boost_attack -= 1;
        }
        self.attacked = true;

        let mut bonus = 0;
        for (id, effect) in std::mem::take(&mut self.opening) {
            if !effect.condition.holds(&ctx) {
                continue;
            }
            let extra = self.outcome_damage(effect.outcome);
            if extra > 0 {
                self.record(format!("{id} strikes first for {extra} extra damage!"));
            }
            bonus += extra;
        }

        let total = damage + bonus;
        self.enemy.take_damage(total);
        self.record(format!("You attack {} for {total} damage!", self.enemy.name));
    }

    /// Damage dealt by an effect outcome. Flag outcomes are armed here and deal none.
    fn outcome_damage(&mut self, outcome: EffectOutcome) -> i32 {
        match outcome {
            EffectOutcome::BonusDamage(amount) => amount,
            EffectOutcome::MaxHpPercentDamage(percent) => rules::percent_of(self.enemy.max_hp, percent),
            EffectOutcome::DoubleNextHit => {
                self.buffs.double_damage = true;
                0
            }
            EffectOutcome::FirstStrike | EffectOutcome::Aura(_) => 0,
        }
    }

    fn use_skill(&mut self, index: usize) -> Result<Resolution, CombatError> {
        let Some(skill) = self.player.skills().get(index).cloned() else {
            return Ok(Resolution::Rejected(Rejection::InvalidSkill(index)));
        };
        match self.player.spend_mana(skill.mana_cost) {
            Ok(()) => {}
            Err(HeroError::InsufficientMana { needed, available }) => {
                return Ok(Resolution::Rejected(Rejection::InsufficientMana { needed, available }));
            }
            Err(other) => return Err(other.into()),
        }
        self.record(format!("You use {}!", skill.name));

        if let Some(damage) = skill.damage {
            let attack = Combatant::attack(&*self.player);
            let first = rules::skill_damage(attack, damage.multiplier, self.enemy.defense);
            self.enemy.take_damage(first);
            self.record(format!("{} deals {first} damage!", skill.name));
            for _ in 1..damage.hits {
                let extra = rules::extra_hit_damage(attack, damage.multiplier, self.enemy.defense);
                self.enemy.take_damage(extra);
                self.record(format!("Extra hit: {extra} damage!"));
            }
        }

        match skill.effect {
            None => {}
            Some(SkillEffect::Heal(amount)) => {
                let healed = self.player.heal(amount);
                self.record(format!("You recover {healed} HP!"));
            }
            Some(SkillEffect::BoostAttack) => {
                self.buffs.boost_attack = rules::BOOST_ATTACK_TURNS;
                self.record(format!("Attack is boosted for {} turns!", rules::BOOST_ATTACK_TURNS));
            }
            Some(SkillEffect::Poison) => {
                self.enemy.status.apply(StatusKind::Poison, rules::POISON_TURNS);
                self.record(format!("{} is poisoned!", self.enemy.name));
            }
            Some(SkillEffect::Dodge) => {
                self.buffs.dodge = true;
                self.record("You get ready to dodge!".to_string());
            }
            Some(SkillEffect::CriticalBoost) => {
                self.buffs.critical_boost = rules::CRITICAL_BOOST_TURNS;
                self.record("Critical hit chance is raised!".to_string());
            }
            Some(SkillEffect::ManaShield) => {
                self.buffs.mana_shield = true;
                self.record("A mana shield surrounds you!".to_string());
            }
        }
        Ok(Resolution::Consumed)
    }

    fn use_artifact(&mut self, id: &ArtifactId) -> Result<Resolution, CombatError> {
        if self.usable.is_empty() {
            return Ok(Resolution::Rejected(Rejection::NoUsableArtifact));
        }
        if !self.usable.contains(id) {
            return Ok(Resolution::Rejected(Rejection::InvalidChoice(id.to_string())));
        }
        let effect = self
            .player
            .catalog()
            .get_artifact(id.as_str())?
            .effect;
        let Some(effect) = effect else {
            return Ok(Resolution::Rejected(Rejection::InvalidChoice(id.to_string())));
        };

        if !effect.condition.holds(&self.context()) {
            self.record(format!("The conditions for {id} are not met!"));
            return Ok(Resolution::Consumed);
        }
        let damage = self.outcome_damage(effect.outcome);
        if damage > 0 {
            self.enemy.take_damage(damage);
            self.record(format!("{id} activates for {damage} damage!"));
        } else if effect.outcome == EffectOutcome::DoubleNextHit {
            self.record(format!("{id} activates, your next attack deals double damage!"));
        } else {
            self.record(format!("{id} activates, but nothing happens."));
        }
        Ok(Resolution::Consumed)
    }

    fn try_flee(&mut self) {
        let stats = self.player.total_stats();
        let chance = rules::flee_chance(stats.speed, self.enemy.speed, stats.luck);
        if self.dice.chance(chance) {
            self.record("You escaped from the battle!".to_string());
            self.state = BattleState::Resolved(Outcome::Fled);
        } else {
            self.record("You failed to escape!".to_string());
        }
    }

    fn enemy_attack(&mut self) {
        let stats = self.player.total_stats();
        let guard = self.buffs.take_guard();
        let mut damage = rules::basic_damage(self.enemy.attack, stats.defense + guard);

        if std::mem::take(&mut self.buffs.dodge)
            && self.dice.chance(rules::dodge_chance(stats.speed, self.enemy.speed))
        {
            self.record(format!("{} attacks, but you dodge!", self.enemy.name));
            return;
        }
        if self.buffs.mana_shield {
            damage = rules::shielded(damage);
            self.record("The mana shield softens the blow!".to_string());
        }
        let dealt = self.player.take_damage(damage);
        self.record(format!("{} hits you for {dealt} damage!", self.enemy.name));
    }

    /// Poison tick, buff decay, then hand the turn over.
    fn end_round(&mut self, next: BattleState) {
        if self.enemy.status.has(StatusKind::Poison) {
            let damage = rules::poison_tick(self.enemy.max_hp);
            self.enemy.take_damage(damage);
            self.enemy.status.tick(StatusKind::Poison);
            self.record(format!("Poison deals {damage} damage to {}!", self.enemy.name));
            if !self.enemy.is_alive() {
                self.record(format!("{} succumbs to the poison!", self.enemy.name));
                self.win();
                return;
            }
        }
        self.buffs.decay();
        self.state = next;
    }

    fn win(&mut self) {
        self.unlocked = self.player.record_victory();
        info!(enemy = %self.enemy.name, wins = self.player.battle_wins(), "battle won");
        self.state = BattleState::Resolved(Outcome::Victory);
    }
}

/// Runs a full battle, mutating the player and enemy in place.
pub fn resolve_battle(
    player: &mut Player,
    enemy: &mut Enemy,
    dice: &mut dyn Dice,
    controller: &mut dyn BattleController,
    config: BattleConfig,
) -> Result<BattleReport, CombatError> {
    let battle = Battle::new(player, enemy, dice, config)?;
    Ok(battle.run(controller))
}

// src/world/src/lib.rs
//! Encounters: spawning enemies per location, running the battle and
//! settling its consequences on the player.

pub mod bestiary;

use catalog::{ArtifactId, Location, Race};
use chrono::{Local, NaiveTime};
use combat::{BattleConfig, BattleController, BattleReport, CombatError, Dice, Enemy, Outcome, resolve_battle};
use hero::Player;
use thiserror::Error;
use tracing::{info, warn};

pub use crate::bestiary::{MAX_ENEMY_LEVEL, MIN_ENEMY_LEVEL, build_enemy, enemy_pool, loot_table, quest_for};

/// HP restored after a victory
pub const VICTORY_HP: i32 = 15;
/// Mana restored after a victory
pub const VICTORY_MANA: i32 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    #[error("no enemies roam {0}")]
    NoEnemies(Location),
    #[error(transparent)]
    Combat(#[from] CombatError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncounterReport {
    pub location: Location,
    pub enemy: String,
    pub level: u32,
    pub outcome: Outcome,
    pub battle: BattleReport,
    pub quest_completed: Option<String>,
    pub loot: Option<ArtifactId>,
    /// Every race unlocked during the encounter, battle included
    pub unlocked: Vec<Race>,
}

/// Random enemy for the location: uniform species, level 1 to 5.
pub fn spawn_enemy(location: Location, dice: &mut dyn Dice) -> Result<Enemy, WorldError> {
    let pool = enemy_pool(location);
    if pool.is_empty() {
        return Err(WorldError::NoEnemies(location));
    }
    let species = pool[dice.pick(pool.len())];
    let level = dice.range_inclusive(MIN_ENEMY_LEVEL, MAX_ENEMY_LEVEL);
    Ok(build_enemy(species, level, dice))
}

/// Fights a random enemy at the player's current location.
pub fn run_encounter(
    player: &mut Player,
    dice: &mut dyn Dice,
    controller: &mut dyn BattleController,
    config: BattleConfig,
) -> Result<EncounterReport, WorldError> {
    let location = player.location();
    let enemy = spawn_enemy(location, dice)?;
    fight(player, enemy, dice, controller, config)
}

/// Fights the given enemy and settles rewards or penalties.
pub fn fight(
    player: &mut Player,
    mut enemy: Enemy,
    dice: &mut dyn Dice,
    controller: &mut dyn BattleController,
    config: BattleConfig,
) -> Result<EncounterReport, WorldError> {
    info!(enemy = %enemy.name, level = enemy.level, location = %player.location(), "enemy appears");
    let battle = resolve_battle(player, &mut enemy, dice, controller, config)?;

    let mut quest_completed = None;
    let mut loot = None;
    match battle.outcome {
        Outcome::Victory => {
            if let Some(quest) = quest_for(&enemy.name) {
                if player.complete_quest(quest) {
                    quest_completed = Some(quest.to_string());
                }
            }
            if let Some(drop) = enemy.loot.take() {
                if dice.chance(enemy.drop_chance) {
                    if player.owns(drop.as_str()) {
                        info!(artifact = %drop, "loot already owned, skipped");
                    } else {
                        match player.add_to_inventory(drop.clone()) {
                            Ok(()) => {
                                info!(artifact = %drop, enemy = %enemy.name, "loot dropped");
                                loot = Some(drop);
                            }
                            Err(err) => warn!(artifact = %drop, %err, "loot could not be stored"),
                        }
                    }
                }
            }
            player.heal(VICTORY_HP);
            player.restore_mana(VICTORY_MANA);
        }
        Outcome::Defeat => {
            let hp = player.max_hp().div_euclid(2);
            let mana = player.max_mana().div_euclid(2);
            player.set_vitals(hp, mana);
            warn!(hp, mana, "defeated, recovering");
        }
        Outcome::Fled => {}
    }

    let mut unlocked = battle.unlocked.clone();
    unlocked.extend(player.evaluate_unlocks());

    Ok(EncounterReport {
        location: player.location(),
        enemy: enemy.name,
        level: enemy.level,
        outcome: battle.outcome,
        battle,
        quest_completed,
        loot,
        unlocked,
    })
}

/// Moves the player, stamping the local wall-clock time.
pub fn travel(player: &mut Player, location: Location) {
    travel_at(player, location, Local::now().time());
}

pub fn travel_at(player: &mut Player, location: Location, time: NaiveTime) {
    player.travel_to(location, time.format("%H:%M:%S").to_string());
    info!(%location, "travelled");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use catalog::Catalog;
    use combat::{FixedDice, PlayerAction, ScriptedController};
    use pretty_assertions::assert_eq;

    fn player_at(location: Location) -> Player {
        let mut player = Player::with_starter_kit("Arjuna", Arc::new(Catalog::standard())).unwrap();
        travel_at(&mut player, location, NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        player
    }

    fn attack_only() -> ScriptedController {
        ScriptedController::new(Vec::new())
    }

    #[test]
    fn test_spawn_uses_pool_and_level_range() {
        let mut dice = FixedDice::new().with_picks(&[2, 4, 0]);
        let enemy = spawn_enemy(Location::MysteriousForest, &mut dice).unwrap();
        assert_eq!(enemy.name, "Guardian Hutan");
        assert_eq!(enemy.level, 5);
        assert_eq!(enemy.loot.as_ref().map(|id| id.as_str()), Some("Mandau"));
    }

    #[test]
    fn test_village_has_no_enemies() {
        let mut dice = FixedDice::new();
        assert_eq!(
            spawn_enemy(Location::StartingVillage, &mut dice).unwrap_err(),
            WorldError::NoEnemies(Location::StartingVillage)
        );
    }

    #[test]
    fn test_travel_records_time() {
        let player = player_at(Location::Volcano);
        assert_eq!(player.location(), Location::Volcano);
        assert_eq!(player.game_time(), "09:05:00");
    }

    #[test]
    fn test_guardian_victory_rewards() {
        let mut player = player_at(Location::MysteriousForest);
        player.unequip("Perisai Talawang").unwrap();
        // species Guardian Hutan, level 1, loot Mandau; then the drop roll
        let mut dice = FixedDice::new().with_picks(&[2, 0, 0]).with_rolls(&[0.1]);
        let report = run_encounter(&mut player, &mut dice, &mut attack_only(), BattleConfig::default()).unwrap();

        assert_eq!(report.outcome, Outcome::Victory);
        assert_eq!(report.quest_completed.as_deref(), Some("Guardian Hutan"));
        assert_eq!(report.loot.as_ref().map(|id| id.as_str()), Some("Mandau"));
        assert_eq!(report.unlocked, vec![Race::Sunda, Race::Dayak]);
        assert!(player.inventory().iter().any(|id| id == "Mandau"));
        assert_eq!(player.battle_wins(), 1);
    }

    #[test]
    fn test_owned_loot_is_skipped() {
        let mut player = player_at(Location::MysteriousForest);
        // Guardian Hutan dropping the Perisai Talawang the player already wears
        let mut dice = FixedDice::new().with_picks(&[2, 0, 1]).with_rolls(&[0.1]);
        let report = run_encounter(&mut player, &mut dice, &mut attack_only(), BattleConfig::default()).unwrap();
        assert_eq!(report.outcome, Outcome::Victory);
        assert!(report.loot.is_none());
        assert_eq!(player.equipped().len() + player.inventory().len(), 3);
    }

    #[test]
    fn test_victory_restores_some_hp() {
        let mut player = player_at(Location::OldTown);
        let enemy = Enemy::new("Pencuri", 1);
        let mut dice = FixedDice::new();
        let report = fight(&mut player, enemy, &mut dice, &mut attack_only(), BattleConfig::default()).unwrap();
        assert_eq!(report.outcome, Outcome::Victory);
        assert!(report.loot.is_none());
        // Pencuri hits for 1 three times (8 - 21/2): 140 - 3 + 15, capped at 140
        assert_eq!(player.current_hp(), 140);
    }

    #[test]
    fn test_unknown_loot_still_settles_victory() {
        let mut player = Player::new("Bima", Arc::new(Catalog::empty()));
        player.take_damage(50);
        let mut enemy = Enemy::new("Pencuri", 1).with_loot("Mandau", 1.0);
        enemy.hp = 1;
        let mut dice = FixedDice::new();
        let report = fight(&mut player, enemy, &mut dice, &mut attack_only(), BattleConfig::default()).unwrap();

        assert_eq!(report.outcome, Outcome::Victory);
        assert!(report.loot.is_none());
        assert!(player.inventory().is_empty());
        assert_eq!(player.battle_wins(), 1);
        assert_eq!(player.current_hp(), 50 + VICTORY_HP);
    }

    #[test]
    fn test_defeat_halves_vitals() {
        let mut player = player_at(Location::RoyalPalace);
        player.set_vitals(10, 55);
        let mut enemy = Enemy::new("Raja Terakhir", 5);
        enemy.speed = 100;
        let mut dice = FixedDice::new();
        let report = fight(&mut player, enemy, &mut dice, &mut attack_only(), BattleConfig::default()).unwrap();
        assert_eq!(report.outcome, Outcome::Defeat);
        assert_eq!(player.current_hp(), 70);
        assert_eq!(player.current_mana(), 27);
    }

    #[test]
    fn test_flee_changes_nothing() {
        let mut player = player_at(Location::ForbiddenCave);
        player.take_damage(40);
        let enemy = Enemy::new("Goblin Gua", 2);
        let mut dice = FixedDice::new().with_rolls(&[0.0]);
        let mut controller = ScriptedController::new([PlayerAction::Flee]);
        let report = fight(&mut player, enemy, &mut dice, &mut controller, BattleConfig::default()).unwrap();
        assert_eq!(report.outcome, Outcome::Fled);
        assert_eq!(player.current_hp(), 100);
        assert_eq!(player.battle_wins(), 0);
    }

    #[test]
    fn test_defeated_player_cannot_start() {
        let mut player = player_at(Location::Volcano);
        player.take_damage(1_000);
        let mut dice = FixedDice::new();
        let err = run_encounter(&mut player, &mut dice, &mut attack_only(), BattleConfig::default()).unwrap_err();
        assert_eq!(err, WorldError::Combat(CombatError::CannotEnterBattle("Arjuna".to_string())));
    }
}

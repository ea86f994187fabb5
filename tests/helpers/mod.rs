//! Shared builders for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use catalog::{Catalog, Class, Race};
use combat::{Enemy, FixedDice, PlayerAction, ScriptedController};
use hero::Player;

pub const ALL_RACES: [Race; 5] = [Race::Jawa, Race::Sunda, Race::Bali, Race::Dayak, Race::Bugis];
pub const ALL_CLASSES: [Class; 4] = [Class::Fighter, Class::Assassin, Class::Archer, Class::Witch];

pub fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::standard())
}

/// Every artifact id in the standard catalog, sorted
pub fn artifact_ids() -> Vec<String> {
    let mut ids: Vec<String> = catalog().artifacts().map(|a| a.id.to_string()).collect();
    ids.sort();
    ids
}

pub fn hero() -> Player {
    Player::new("Arjuna", catalog())
}

pub fn starter_hero() -> Player {
    Player::with_starter_kit("Arjuna", catalog()).unwrap()
}

/// Hero owning every listed artifact, none equipped
pub fn hero_owning(ids: &[String]) -> Player {
    let mut player = hero();
    for id in ids {
        player.add_to_inventory(id.as_str()).unwrap();
    }
    player
}

/// Hero with every race unlocked
pub fn worldly_hero() -> Player {
    let mut player = hero();
    for race in ALL_RACES {
        player.unlock_race(race);
    }
    player
}

pub fn equip_all(player: &mut Player, ids: &[&str]) {
    for id in ids {
        if !player.owns(id) {
            player.add_to_inventory(*id).unwrap();
        }
        player.equip(id).unwrap();
    }
}

/// Dice that never dodge, flee or drop loot unless told otherwise
pub fn calm_dice() -> FixedDice {
    FixedDice::new()
}

pub fn script(actions: &[PlayerAction]) -> ScriptedController {
    ScriptedController::new(actions.to_vec())
}

pub fn training_dummy() -> Enemy {
    let mut enemy = Enemy::new("Dummy", 1);
    enemy.speed = 1;
    enemy.attack = 1;
    enemy
}

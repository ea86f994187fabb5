// src/world/src/bestiary.rs
//! Enemy species per location, their loot and the quests they close.

use catalog::Location;
use combat::{Dice, Enemy};

pub const MIN_ENEMY_LEVEL: u32 = 1;
pub const MAX_ENEMY_LEVEL: u32 = 5;

/// Species that roam a location; empty for the starting village.
pub fn enemy_pool(location: Location) -> &'static [&'static str] {
    match location {
        Location::StartingVillage => &[],
        Location::MysteriousForest => &["Serigala Liar", "Penyihir Hutan", "Guardian Hutan", "Ular Raksasa"],
        Location::ForbiddenCave => &["Kelelawar Gua", "Goblin Gua", "Raksasa Batu", "Naga Kecil"],
        Location::EnchantedLake => &["Ikan Raksasa", "Roh Air", "Nyi Roro Kidul", "Katak Ajaib"],
        Location::Volcano => &["Elemental Api", "Raksasa Lava", "Burung Api", "Dewa Api"],
        Location::OldTown => &["Pencuri", "Ksatria Tua", "Raja Kota", "Penyihir Kota"],
        Location::RoyalPalace => &["Penjaga Istana", "Penyihir Kerajaan", "Pengawal Elit", "Raja Terakhir"],
    }
}

/// Possible drops of a species and the chance that one drops.
pub fn loot_table(species: &str) -> Option<(&'static [&'static str], f64)> {
    match species {
        "Guardian Hutan" => Some((&["Mandau", "Perisai Talawang"], 0.8)),
        "Nyi Roro Kidul" => Some((&["Gamelan Mini"], 0.7)),
        "Dewa Api" => Some((&["Trisula"], 0.7)),
        "Raja Kota" => Some((&["Siger"], 0.7)),
        "Raja Terakhir" => Some((&["Kris"], 0.9)),
        _ => None,
    }
}

/// Quest completed by defeating a species
pub fn quest_for(species: &str) -> Option<&'static str> {
    match species {
        "Guardian Hutan" => Some("Guardian Hutan"),
        "Nyi Roro Kidul" => Some("Quest Seni"),
        _ => None,
    }
}

/// Builds an enemy of the given species, with its loot already chosen.
pub fn build_enemy(species: &str, level: u32, dice: &mut dyn Dice) -> Enemy {
    let enemy = Enemy::new(species, level);
    match loot_table(species) {
        Some((drops, chance)) if !drops.is_empty() => {
            let drop = drops[dice.pick(drops.len())];
            enemy.with_loot(drop, chance)
        }
        _ => enemy,
    }
}

mod helpers;

use std::fs;

use catalog::{Class, Location, Race};
use error::GameError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use save::{SAVE_VERSION, SaveData, SaveSystem};
use tempfile::tempdir;

use helpers::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn save_load_keeps_totals(
        worn in prop::sample::subsequence(artifact_ids(), 0..=7),
        class in 0..ALL_CLASSES.len(),
        race in 0..ALL_RACES.len(),
        damage in 0i32..80,
    ) {
        let dir = tempdir().unwrap();
        let saves = SaveSystem::new(dir.path(), 1).unwrap();

        let mut player = worldly_hero();
        let worn: Vec<&str> = worn.iter().map(String::as_str).collect();
        equip_all(&mut player, &worn);
        player.set_class(ALL_CLASSES[class]);
        player.set_race(ALL_RACES[race]).unwrap();
        player.take_damage(damage);

        saves.save_game(0, &SaveData::new(&player)).unwrap();
        let restored = saves.load_player(0, catalog()).unwrap();

        prop_assert_eq!(restored.total_stats(), player.total_stats());
        prop_assert_eq!(restored.current_hp(), player.current_hp());
        prop_assert_eq!(restored.equipped(), player.equipped());
        prop_assert_eq!(restored.unlocked_races(), player.unlocked_races());
    }
}

#[test]
fn progress_survives_a_save() {
    let dir = tempdir().unwrap();
    let saves = SaveSystem::new(dir.path(), 3).unwrap();
    let mut player = starter_hero();
    player.complete_quest("Guardian Hutan");
    player.evaluate_unlocks();
    player.set_race(Race::Sunda).unwrap();
    player.set_class(Class::Archer);
    player.travel_to(Location::EnchantedLake, "17:45:00");

    saves.save_game(2, &SaveData::new(&player)).unwrap();
    let restored = saves.load_player(2, catalog()).unwrap();

    assert_eq!(restored.race(), Race::Sunda);
    assert_eq!(restored.class(), Class::Archer);
    assert_eq!(restored.location(), Location::EnchantedLake);
    assert_eq!(restored.game_time(), "17:45:00");
    assert_eq!(restored.completed_quests(), player.completed_quests());

    let listed = saves.list_saves().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].slot, 2);
    assert_eq!(listed[0].race, Race::Sunda);
}

#[test]
fn newer_save_version_is_refused() {
    let dir = tempdir().unwrap();
    let saves = SaveSystem::new(dir.path(), 1).unwrap();
    let json = format!(r#"{{"version": {}, "player": {{"name": "Future"}}}}"#, SAVE_VERSION + 1);
    fs::write(saves.save_path(0).unwrap(), json).unwrap();

    assert!(matches!(saves.load_game(0), Err(GameError::VersionMismatch { .. })));
    assert!(saves.load_player(0, catalog()).is_none());
}

#[test]
fn corrupt_fields_fall_back_individually() {
    let dir = tempdir().unwrap();
    let saves = SaveSystem::new(dir.path(), 1).unwrap();
    let json = r#"{
        "version": 1,
        "saved_at": "yesterday",
        "player": {
            "name": "Kartini",
            "attack": "sharp",
            "current_location": "Gunung Berapi",
            "player_class": "Assassin",
            "unlocked_races": "all of them",
            "equipped_artifacts": ["Tombak", "Tombak", "Keramon"],
            "current_hp": 9999
        }
    }"#;
    fs::write(saves.save_path(0).unwrap(), json).unwrap();

    let player = saves.load_player(0, catalog()).unwrap();
    assert_eq!(player.name(), "Kartini");
    assert_eq!(player.base_stats().attack, hero::BASE_STATS.attack);
    assert_eq!(player.location(), Location::Volcano);
    assert_eq!(player.class(), Class::Assassin);
    assert_eq!(player.unlocked_races(), &[Race::Jawa]);
    assert_eq!(player.equipped().len(), 2);
    assert_eq!(player.current_hp(), player.max_hp());
}

#[test]
fn truncated_file_is_corrupted() {
    let dir = tempdir().unwrap();
    let saves = SaveSystem::new(dir.path(), 1).unwrap();
    saves.save_game(0, &SaveData::new(&starter_hero())).unwrap();

    let path = saves.save_path(0).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::write(&path, &text[..text.len() / 2]).unwrap();

    assert!(matches!(saves.load_game(0), Err(GameError::CorruptedSave(_))));
    assert!(saves.list_saves().unwrap().is_empty());
}

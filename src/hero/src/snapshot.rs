// src/hero/src/snapshot.rs
//! Persistable player snapshot.

use std::collections::BTreeSet;
use std::sync::Arc;

use catalog::{ArtifactId, Catalog, Class, Location, Race, StatBlock};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::equipment::{EquipError, Loadout};
use crate::player::{BASE_STATS, Player, RestoredParts};

/// Flat, serde-friendly view of a [`Player`].
///
/// Stats are the un-applied base values; totals are derived again on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub name: String,
    pub base_hp: i32,
    pub base_mana: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub luck: i32,
    pub durability: i32,
    pub current_hp: i32,
    pub mana: i32,
    pub equipped_artifacts: Vec<ArtifactId>,
    pub inventory: Vec<ArtifactId>,
    pub completed_quests: Vec<String>,
    pub current_location: Location,
    pub game_time: String,
    pub race: Race,
    pub unlocked_races: Vec<Race>,
    pub battle_wins: u32,
    pub player_class: Class,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::fresh("Hero")
    }
}

impl PlayerState {
    /// State of a brand-new character; vitals are filled on restore.
    pub fn fresh(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_hp: BASE_STATS.hp,
            base_mana: BASE_STATS.mana,
            attack: BASE_STATS.attack,
            defense: BASE_STATS.defense,
            speed: BASE_STATS.speed,
            luck: BASE_STATS.luck,
            durability: BASE_STATS.durability,
            current_hp: i32::MAX,
            mana: i32::MAX,
            equipped_artifacts: Vec::new(),
            inventory: Vec::new(),
            completed_quests: Vec::new(),
            current_location: Location::default(),
            game_time: "00:00:00".to_string(),
            race: Race::default(),
            unlocked_races: vec![Race::default()],
            battle_wins: 0,
            player_class: Class::default(),
        }
    }

    pub fn base_stats(&self) -> StatBlock {
        StatBlock {
            hp: self.base_hp,
            mana: self.base_mana,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
            luck: self.luck,
            durability: self.durability,
        }
    }
}

impl Player {
    pub fn snapshot(&self) -> PlayerState {
        let base = self.base_stats();
        PlayerState {
            name: self.name().to_string(),
            base_hp: base.hp,
            base_mana: base.mana,
            attack: base.attack,
            defense: base.defense,
            speed: base.speed,
            luck: base.luck,
            durability: base.durability,
            current_hp: self.current_hp(),
            mana: self.current_mana(),
            equipped_artifacts: self.equipped().to_vec(),
            inventory: self.inventory().to_vec(),
            completed_quests: self.completed_quests().iter().cloned().collect(),
            current_location: self.location(),
            game_time: self.game_time().to_string(),
            race: self.race(),
            unlocked_races: self.unlocked_races().to_vec(),
            battle_wins: self.battle_wins(),
            player_class: self.class(),
        }
    }

    /// Rebuilds a player from a snapshot, repairing anything inconsistent
    /// with the catalog or the container invariants.
    pub fn restore(catalog: Arc<Catalog>, state: PlayerState) -> Player {
        let loadout = restore_loadout(&catalog, &state.equipped_artifacts, &state.inventory);

        let mut unlocked_races: Vec<Race> = Vec::new();
        for race in std::iter::once(Race::default()).chain(state.unlocked_races.iter().copied()) {
            if !unlocked_races.contains(&race) {
                unlocked_races.push(race);
            }
        }
        if !unlocked_races.contains(&state.race) {
            warn!(race = %state.race, "active race was not unlocked, unlocking it");
            unlocked_races.push(state.race);
        }

        let parts = RestoredParts {
            base: state.base_stats(),
            race: state.race,
            unlocked_races,
            class: state.player_class,
            loadout,
            completed_quests: state.completed_quests.into_iter().collect::<BTreeSet<_>>(),
            battle_wins: state.battle_wins,
            location: state.current_location,
            game_time: state.game_time,
            current_hp: state.current_hp,
            current_mana: state.mana,
        };

        let mut player = Player::new(state.name, catalog);
        player.restore_parts(parts);
        player
    }
}

fn restore_loadout(catalog: &Catalog, equipped: &[ArtifactId], inventory: &[ArtifactId]) -> Loadout {
    let mut loadout = Loadout::new();
    for id in equipped {
        if !keep(catalog, &mut loadout, id) {
            continue;
        }
        if let Err(EquipError::SlotsFull) = loadout.equip(id.as_str()) {
            warn!(artifact = %id, "no free slot, moved to inventory");
        }
    }
    for id in inventory {
        keep(catalog, &mut loadout, id);
    }
    loadout
}

/// Stashes `id` if it is a known, not yet seen artifact.
fn keep(catalog: &Catalog, loadout: &mut Loadout, id: &ArtifactId) -> bool {
    if !catalog.contains_artifact(id.as_str()) {
        warn!(artifact = %id, "dropping unknown artifact");
        return false;
    }
    if loadout.stash(id.clone()).is_err() {
        warn!(artifact = %id, "dropping duplicate artifact");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::standard())
    }

    fn ids(names: &[&str]) -> Vec<ArtifactId> {
        names.iter().map(|n| ArtifactId::from(*n)).collect()
    }

    #[test]
    fn test_snapshot_restore_keeps_totals() {
        let mut player = Player::with_starter_kit("Arjuna", catalog()).unwrap();
        player.add_to_inventory("Kris").unwrap();
        player.take_damage(17);
        player.complete_quest("Guardian Hutan");
        player.evaluate_unlocks();
        player.set_race(Race::Sunda).unwrap();
        player.set_class(Class::Archer);

        let restored = Player::restore(catalog(), player.snapshot());
        assert_eq!(restored.total_stats(), player.total_stats());
        assert_eq!(restored.current_hp(), player.current_hp());
        assert_eq!(restored.equipped(), player.equipped());
        assert_eq!(restored.inventory(), player.inventory());
        assert_eq!(restored.unlocked_races(), player.unlocked_races());
        assert_eq!(restored.snapshot(), player.snapshot());
    }

    #[test]
    fn test_fresh_state_fills_vitals() {
        let player = Player::restore(catalog(), PlayerState::fresh("Baru"));
        assert_eq!(player.name(), "Baru");
        assert_eq!(player.current_hp(), player.max_hp());
        assert_eq!(player.current_mana(), player.max_mana());
    }

    #[test]
    fn test_restore_repairs_containers() {
        let mut state = PlayerState::fresh("Rusak");
        state.equipped_artifacts = ids(&[
            "Tombak", "Excalibur", "Tombak", "Destar", "Clurit", "Celuk", "Bokor", "Badong",
            "Kawaca", "Siger",
        ]);
        state.inventory = ids(&["Destar", "Kris", "Kris"]);

        let player = Player::restore(catalog(), state);
        assert_eq!(
            player.equipped(),
            ids(&["Tombak", "Destar", "Clurit", "Celuk", "Bokor", "Badong", "Kawaca"]).as_slice()
        );
        assert_eq!(player.inventory(), ids(&["Siger", "Kris"]).as_slice());
    }

    #[test]
    fn test_restore_forces_active_race_unlocked() {
        let mut state = PlayerState::fresh("Rusak");
        state.race = Race::Bali;
        state.unlocked_races = vec![];
        let player = Player::restore(catalog(), state);
        assert_eq!(player.unlocked_races(), &[Race::Jawa, Race::Bali]);
        assert_eq!(player.race(), Race::Bali);
    }

    #[test]
    fn test_restore_clamps_vitals() {
        let mut state = PlayerState::fresh("Rusak");
        state.current_hp = 9999;
        state.mana = -4;
        let player = Player::restore(catalog(), state);
        assert_eq!(player.current_hp(), player.max_hp());
        assert_eq!(player.current_mana(), 0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let state: PlayerState = serde_json::from_str(r#"{"name": "Sari", "battle_wins": 4}"#).unwrap();
        assert_eq!(state.name, "Sari");
        assert_eq!(state.battle_wins, 4);
        assert_eq!(state.base_stats(), BASE_STATS);
        assert_eq!(state.player_class, Class::Fighter);
    }
}

// src/hero/src/player.rs
use std::cell::Cell;
use std::collections::BTreeSet;
use std::sync::Arc;

use catalog::{
    ArtifactId, Catalog, CatalogError, Class, Location, Race, SetBonus, Skill, StatBlock,
    UnlockProgress,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::equipment::{EquipError, Loadout};

/// 玩家初始属性
pub const BASE_STATS: StatBlock = StatBlock {
    hp: 100,
    mana: 50,
    attack: 10,
    defense: 5,
    speed: 8,
    luck: 5,
    durability: 6,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeroError {
    #[error(transparent)]
    Equip(#[from] EquipError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("race {0} is still locked")]
    RaceLocked(Race),
    #[error("not enough mana: need {needed}, have {available}")]
    InsufficientMana { needed: i32, available: i32 },
}

/// The player character.
///
/// Totals are never stored pre-applied: `total_stats()` derives them from the
/// base block plus race, class, equipment and active set bonuses. The memo is
/// cleared by every method that changes one of those inputs.
#[derive(Debug, Clone)]
pub struct Player {
    catalog: Arc<Catalog>,
    name: String,
    base: StatBlock,
    current_hp: i32,
    current_mana: i32,
    race: Race,
    unlocked_races: Vec<Race>,
    class: Class,
    loadout: Loadout,
    completed_quests: BTreeSet<String>,
    battle_wins: u32,
    location: Location,
    game_time: String,
    cached_stats: Cell<Option<StatBlock>>,
}

impl Player {
    pub fn new(name: impl Into<String>, catalog: Arc<Catalog>) -> Self {
        let mut player = Self {
            catalog,
            name: name.into(),
            base: BASE_STATS,
            current_hp: 0,
            current_mana: 0,
            race: Race::default(),
            unlocked_races: vec![Race::default()],
            class: Class::default(),
            loadout: Loadout::new(),
            completed_quests: BTreeSet::new(),
            battle_wins: 0,
            location: Location::default(),
            game_time: "00:00:00".to_string(),
            cached_stats: Cell::new(None),
        };
        player.fill_vitals();
        player
    }

    /// New character carrying and wearing the catalog's starter kit.
    pub fn with_starter_kit(name: impl Into<String>, catalog: Arc<Catalog>) -> Result<Self, HeroError> {
        let kit = catalog.starter_kit().to_vec();
        let mut player = Self::new(name, catalog);
        for id in kit {
            player.add_to_inventory(id.clone())?;
            player.equip(id.as_str())?;
        }
        player.fill_vitals();
        Ok(player)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_stats(&self) -> StatBlock {
        self.base
    }

    pub fn race(&self) -> Race {
        self.race
    }

    pub fn unlocked_races(&self) -> &[Race] {
        &self.unlocked_races
    }

    pub fn is_race_unlocked(&self, race: Race) -> bool {
        self.unlocked_races.contains(&race)
    }

    pub fn class(&self) -> Class {
        self.class
    }

    /// Skill list of the active class.
    pub fn skills(&self) -> &[Skill] {
        self.catalog.skills(self.class)
    }

    pub fn equipped(&self) -> &[ArtifactId] {
        self.loadout.equipped()
    }

    pub fn inventory(&self) -> &[ArtifactId] {
        self.loadout.inventory()
    }

    pub fn owns(&self, id: &str) -> bool {
        self.loadout.owns(id)
    }

    pub fn completed_quests(&self) -> &BTreeSet<String> {
        &self.completed_quests
    }

    pub fn battle_wins(&self) -> u32 {
        self.battle_wins
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn game_time(&self) -> &str {
        &self.game_time
    }

    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    pub fn current_mana(&self) -> i32 {
        self.current_mana
    }

    pub fn max_hp(&self) -> i32 {
        self.total_stats().hp
    }

    pub fn max_mana(&self) -> i32 {
        self.total_stats().mana
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp <= 0
    }

    /// base + race + class + equipment + active sets
    pub fn total_stats(&self) -> StatBlock {
        if let Some(stats) = self.cached_stats.get() {
            return stats;
        }
        let equipment: StatBlock = self
            .loadout
            .equipped()
            .iter()
            .filter_map(|id| self.catalog.get_artifact(id.as_str()).ok())
            .map(|artifact| artifact.stats)
            .sum();
        let sets: StatBlock = self.active_set_bonuses().iter().map(|set| set.bonus).sum();
        let total = self.base
            + self.catalog.race_bonus(self.race)
            + self.catalog.class_bonus(self.class)
            + equipment
            + sets;
        self.cached_stats.set(Some(total));
        total
    }

    pub fn active_set_bonuses(&self) -> Vec<&SetBonus> {
        self.catalog
            .set_bonuses()
            .iter()
            .filter(|set| set.is_active(self.loadout.equipped()))
            .collect()
    }

    pub fn equip(&mut self, id: &str) -> Result<(), HeroError> {
        self.loadout.equip(id)?;
        self.invalidate_stats();
        debug!(artifact = id, "equipped");
        Ok(())
    }

    pub fn unequip(&mut self, id: &str) -> Result<(), HeroError> {
        self.loadout.unequip(id)?;
        self.invalidate_stats();
        self.clamp_vitals();
        debug!(artifact = id, "unequipped");
        Ok(())
    }

    /// Adds a catalog artifact to the inventory.
    pub fn add_to_inventory(&mut self, id: impl Into<ArtifactId>) -> Result<(), HeroError> {
        let id = id.into();
        self.catalog.get_artifact(id.as_str())?;
        self.loadout.stash(id)?;
        Ok(())
    }

    pub fn set_class(&mut self, class: Class) {
        if self.class == class {
            return;
        }
        self.class = class;
        self.invalidate_stats();
        self.clamp_vitals();
        info!(%class, "class changed");
    }

    pub fn set_race(&mut self, race: Race) -> Result<(), HeroError> {
        if !self.is_race_unlocked(race) {
            return Err(HeroError::RaceLocked(race));
        }
        if self.race != race {
            self.race = race;
            self.invalidate_stats();
            self.clamp_vitals();
            info!(%race, "race changed");
        }
        Ok(())
    }

    /// Returns false if the race was already unlocked or has no unlock rule.
    pub fn unlock_race(&mut self, race: Race) -> bool {
        if self.is_race_unlocked(race) || self.catalog.unlock_rule(race).is_none() {
            return false;
        }
        self.unlocked_races.push(race);
        info!(%race, "race unlocked");
        true
    }

    /// Unlocks every race whose requirement is now met; returns the new ones.
    pub fn evaluate_unlocks(&mut self) -> Vec<Race> {
        let catalog = Arc::clone(&self.catalog);
        let ready: Vec<Race> = {
            let progress = UnlockProgress {
                completed_quests: &self.completed_quests,
                equipped: self.loadout.equipped(),
                inventory: self.loadout.inventory(),
                battle_wins: self.battle_wins,
            };
            catalog
                .race_unlocks()
                .iter()
                .filter(|rule| !self.unlocked_races.contains(&rule.race))
                .filter(|rule| rule.requirement.is_met(&progress))
                .map(|rule| rule.race)
                .collect()
        };
        ready.into_iter().filter(|race| self.unlock_race(*race)).collect()
    }

    pub fn complete_quest(&mut self, quest: &str) -> bool {
        let added = self.completed_quests.insert(quest.to_string());
        if added {
            info!(quest, "quest completed");
        }
        added
    }

    /// Counts a battle win and re-evaluates race unlocks.
    pub fn record_victory(&mut self) -> Vec<Race> {
        self.battle_wins += 1;
        self.evaluate_unlocks()
    }

    pub fn travel_to(&mut self, location: Location, game_time: impl Into<String>) {
        self.location = location;
        self.game_time = game_time.into();
    }

    /// Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let before = self.current_hp;
        self.current_hp = (self.current_hp - amount).max(0);
        before - self.current_hp
    }

    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount.max(0)).min(self.max_hp());
        (self.current_hp - before).max(0)
    }

    pub fn spend_mana(&mut self, cost: i32) -> Result<(), HeroError> {
        if self.current_mana < cost {
            return Err(HeroError::InsufficientMana {
                needed: cost,
                available: self.current_mana,
            });
        }
        self.current_mana -= cost;
        Ok(())
    }

    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let before = self.current_mana;
        self.current_mana = (self.current_mana + amount.max(0)).min(self.max_mana());
        (self.current_mana - before).max(0)
    }

    /// Sets both vitals, clamped to `0..=max`.
    pub fn set_vitals(&mut self, hp: i32, mana: i32) {
        self.current_hp = hp;
        self.current_mana = mana;
        self.clamp_vitals();
    }

    pub fn fill_vitals(&mut self) {
        let stats = self.total_stats();
        self.current_hp = stats.hp;
        self.current_mana = stats.mana;
    }

    fn clamp_vitals(&mut self) {
        let stats = self.total_stats();
        self.current_hp = self.current_hp.clamp(0, stats.hp.max(0));
        self.current_mana = self.current_mana.clamp(0, stats.mana.max(0));
    }

    fn invalidate_stats(&self) {
        self.cached_stats.set(None);
    }

    pub(crate) fn restore_parts(&mut self, parts: RestoredParts) {
        self.base = parts.base;
        self.race = parts.race;
        self.unlocked_races = parts.unlocked_races;
        self.class = parts.class;
        self.loadout = parts.loadout;
        self.completed_quests = parts.completed_quests;
        self.battle_wins = parts.battle_wins;
        self.location = parts.location;
        self.game_time = parts.game_time;
        self.invalidate_stats();
        self.set_vitals(parts.current_hp, parts.current_mana);
    }
}

/// Sanitised fields handed from a snapshot to the player.
pub(crate) struct RestoredParts {
    pub base: StatBlock,
    pub race: Race,
    pub unlocked_races: Vec<Race>,
    pub class: Class,
    pub loadout: Loadout,
    pub completed_quests: BTreeSet<String>,
    pub battle_wins: u32,
    pub location: Location,
    pub game_time: String,
    pub current_hp: i32,
    pub current_mana: i32,
}

// src/session.rs
//! One running game: the player, the shared RNG and the save slots.

use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::{Catalog, Location};
use combat::{BattleController, GameRng};
use hero::Player;
use save::{SaveData, SaveSystem};
use tracing::info;
use world::EncounterReport;

use crate::config::GameConfig;

pub struct GameSession {
    player: Player,
    rng: GameRng,
    saves: SaveSystem,
    config: GameConfig,
}

impl GameSession {
    /// Fresh hero with the starter kit.
    pub fn new(config: GameConfig, catalog: Arc<Catalog>) -> Result<Self> {
        let player = Player::with_starter_kit(config.hero_name.clone(), catalog)
            .context("Failed to hand out the starter kit")?;
        Self::with_player(config, player)
    }

    /// Resumes from the slot when it holds a readable save, otherwise starts fresh.
    pub fn resume_or_new(config: GameConfig, catalog: Arc<Catalog>, slot: usize) -> Result<Self> {
        let saves = SaveSystem::new(&config.save_dir, config.save_slots)?;
        if saves.has_save(slot) {
            if let Some(player) = saves.load_player(slot, Arc::clone(&catalog)) {
                info!(slot, hero = %player.name(), "resuming saved game");
                return Self::with_player(config, player);
            }
        }
        Self::new(config, catalog)
    }

    fn with_player(config: GameConfig, player: Player) -> Result<Self> {
        let saves = SaveSystem::new(&config.save_dir, config.save_slots)?;
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        info!(seed = rng.seed(), hero = %player.name(), "session started");
        Ok(Self {
            player,
            rng,
            saves,
            config,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn saves(&self) -> &SaveSystem {
        &self.saves
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn travel(&mut self, location: Location) {
        world::travel(&mut self.player, location);
    }

    /// Fights one random enemy at the current location.
    pub fn encounter(&mut self, controller: &mut dyn BattleController) -> Result<EncounterReport> {
        let report = world::run_encounter(&mut self.player, &mut self.rng, controller, self.config.battle)
            .with_context(|| format!("Encounter at {} failed", self.player.location()))?;
        Ok(report)
    }

    pub fn save(&self, slot: usize) -> Result<()> {
        self.saves
            .save_game(slot, &SaveData::new(&self.player))
            .with_context(|| format!("Failed to save slot {slot}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autopilot::AutoPilot;
    use combat::Outcome;

    fn config(dir: &std::path::Path) -> GameConfig {
        GameConfig {
            save_dir: dir.to_path_buf(),
            seed: Some(11),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_new_session_has_starter_kit() {
        let dir = tempfile::tempdir().unwrap();
        let session = GameSession::new(config(dir.path()), Arc::new(Catalog::standard())).unwrap();
        assert_eq!(session.player().name(), "Arjuna");
        assert_eq!(session.player().equipped().len(), 3);
        assert_eq!(session.seed(), 11);
    }

    #[test]
    fn test_village_encounter_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = GameSession::new(config(dir.path()), Arc::new(Catalog::standard())).unwrap();
        assert!(session.encounter(&mut AutoPilot::new()).is_err());
    }

    #[test]
    fn test_save_then_resume() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(Catalog::standard());
        let mut session = GameSession::new(config(dir.path()), Arc::clone(&catalog)).unwrap();
        session.travel(Location::OldTown);
        let report = session.encounter(&mut AutoPilot::new()).unwrap();
        assert!(matches!(report.outcome, Outcome::Victory | Outcome::Defeat | Outcome::Fled));
        session.save(0).unwrap();

        let resumed = GameSession::resume_or_new(config(dir.path()), catalog, 0).unwrap();
        assert_eq!(resumed.player().location(), Location::OldTown);
        assert_eq!(resumed.player().battle_wins(), session.player().battle_wins());
        assert_eq!(resumed.player().total_stats(), session.player().total_stats());
    }
}

// src/config.rs
//! 游戏配置
//!
//! Read from `artifact_wars.json` in the working directory, or from the
//! file named by `ARTIFACT_WARS_CONFIG`. A missing file means defaults.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use combat::BattleConfig;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "artifact_wars.json";
pub const CONFIG_ENV: &str = "ARTIFACT_WARS_CONFIG";
pub const SEED_ENV: &str = "ARTIFACT_WARS_SEED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub save_dir: PathBuf,
    pub save_slots: usize,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    pub log_filter: String,
    pub hero_name: String,
    /// Encounters the binary plays before saving
    pub autoplay_encounters: u32,
    pub battle: BattleConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            save_slots: 5,
            seed: None,
            log_filter: "info".to_string(),
            hero_name: "Arjuna".to_string(),
            autoplay_encounters: 5,
            battle: BattleConfig::default(),
        }
    }
}

impl GameConfig {
    /// Loads the config the binary runs with, environment included.
    pub fn load() -> Result<Self> {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        let mut config = Self::from_file(&path)?.unwrap_or_default();

        if let Ok(seed) = env::var(SEED_ENV) {
            config.apply_seed_override(&seed)?;
        }
        Ok(config)
    }

    /// `None` when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn apply_seed_override(&mut self, raw: &str) -> Result<()> {
        let seed = raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got {raw:?}"))?;
        self.seed = Some(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"seed": 7, "battle": {"max_rejected_actions": 3}}"#).unwrap();

        let config = GameConfig::from_file(&path).unwrap().unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.battle.max_rejected_actions, 3);
        assert_eq!(config.battle.max_inspections, 100);
        assert_eq!(config.save_slots, 5);
        assert_eq!(config.hero_name, "Arjuna");
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameConfig::from_file(&dir.path().join("nope.json")).unwrap().is_none());
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "save_slots = 3").unwrap();
        assert!(GameConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_seed_override() {
        let mut config = GameConfig::default();
        config.apply_seed_override(" 42 ").unwrap();
        assert_eq!(config.seed, Some(42));
        assert!(config.apply_seed_override("forty-two").is_err());
        assert_eq!(config.seed, Some(42));
    }
}

// src/save/src/lib.rs
//! 存档系统
//!
//! JSON save slots for the player record. Loading is lenient: damaged
//! fields fall back to defaults and the rest of the record survives.

mod decode;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use catalog::{Catalog, Class, Race};
use chrono::{DateTime, Utc};
use error::{GameError, handle_error};
use hero::{Player, PlayerState};
use scopeguard::ScopeGuard;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Current save format version
pub const SAVE_VERSION: u32 = 2;

/// 存档数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub player: PlayerState,
}

impl SaveData {
    pub fn new(player: &Player) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            player: player.snapshot(),
        }
    }

    /// Rebuilds the player against the given catalog.
    pub fn into_player(self, catalog: Arc<Catalog>) -> Player {
        Player::restore(catalog, self.player)
    }

    pub fn metadata(&self, slot: usize) -> SaveMetadata {
        SaveMetadata {
            slot,
            saved_at: self.saved_at,
            hero_name: self.player.name.clone(),
            race: self.player.race,
            class: self.player.player_class,
            battle_wins: self.player.battle_wins,
        }
    }
}

/// 存档元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot: usize,
    pub saved_at: DateTime<Utc>,
    pub hero_name: String,
    pub race: Race,
    pub class: Class,
    pub battle_wins: u32,
}

/// 存档系统
#[derive(Debug, Clone)]
pub struct SaveSystem {
    save_dir: PathBuf,
    max_slots: usize,
}

impl SaveSystem {
    /// 初始化存档系统
    pub fn new(save_dir: impl AsRef<Path>, max_slots: usize) -> Result<Self, GameError> {
        let save_dir = save_dir.as_ref();

        if !save_dir.exists() {
            fs::create_dir_all(save_dir)
                .with_context(|| format!("Failed to create save directory {}", save_dir.display()))?;
        }

        Ok(Self {
            save_dir: save_dir.to_path_buf(),
            max_slots,
        })
    }

    fn check_slot(&self, slot: usize) -> Result<(), GameError> {
        if slot >= self.max_slots {
            return Err(GameError::InvalidSlot {
                slot,
                max_slots: self.max_slots,
            });
        }
        Ok(())
    }

    fn slot_path(&self, slot: usize) -> PathBuf {
        self.save_dir.join(format!("save_{}.sav", slot))
    }

    /// 保存游戏状态
    pub fn save_game(&self, slot: usize, data: &SaveData) -> Result<(), GameError> {
        self.check_slot(slot)?;
        let path = self.slot_path(slot);

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| GameError::SerializationError(e.to_string()))?;

        // 先写临时文件，再原子性重命名；失败时删除临时文件
        let temp_path = scopeguard::guard(path.with_extension("tmp"), |temp| {
            let _ = fs::remove_file(temp);
        });
        {
            let mut file = fs::File::create(&*temp_path).context("Failed to create temporary save file")?;
            file.write_all(json.as_bytes()).context("Failed to write save data")?;
            file.flush().context("Failed to flush save data")?;
        }
        fs::rename(&*temp_path, &path).context("Failed to commit save file")?;
        ScopeGuard::into_inner(temp_path);

        info!(slot, hero = %data.player.name, "game saved");
        Ok(())
    }

    /// 加载游戏状态
    pub fn load_game(&self, slot: usize) -> Result<SaveData, GameError> {
        self.check_slot(slot)?;
        let path = self.slot_path(slot);

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Save file not found: {}", path.display()))?;
        let data = decode::decode_save(&text)?;

        info!(slot, hero = %data.player.name, "game loaded");
        Ok(data)
    }

    /// Loads and restores the player, or `None` after logging why it failed.
    pub fn load_player(&self, slot: usize, catalog: Arc<Catalog>) -> Option<Player> {
        match self.load_game(slot) {
            Ok(data) => Some(data.into_player(catalog)),
            Err(err) => {
                error!(slot, "{}", handle_error(&err));
                None
            }
        }
    }

    /// 获取所有存档列表(按时间倒序)
    ///
    /// Unreadable slots are skipped.
    pub fn list_saves(&self) -> Result<Vec<SaveMetadata>, GameError> {
        let mut saves = Vec::new();
        for slot in 0..self.max_slots {
            if !self.has_save(slot) {
                continue;
            }
            match self.load_game(slot) {
                Ok(data) => saves.push(data.metadata(slot)),
                Err(err) => warn!(slot, %err, "skipping unreadable save"),
            }
        }

        saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(saves)
    }

    /// 删除存档
    pub fn delete_save(&self, slot: usize) -> Result<(), GameError> {
        self.check_slot(slot)?;
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path).context("Failed to delete save file")?;
            info!(slot, "save deleted");
        }
        Ok(())
    }

    /// 获取存档目录路径
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// 检查指定槽位是否有存档
    pub fn has_save(&self, slot: usize) -> bool {
        slot < self.max_slots && self.slot_path(slot).exists()
    }

    /// 获取存档文件路径
    pub fn save_path(&self, slot: usize) -> Option<PathBuf> {
        (slot < self.max_slots).then(|| self.slot_path(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::standard())
    }

    fn hero() -> Player {
        let mut player = Player::with_starter_kit("Arjuna", catalog()).unwrap();
        player.set_class(Class::Witch);
        player.complete_quest("Guardian Hutan");
        player.take_damage(12);
        player
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let saves = SaveSystem::new(dir.path(), 3).unwrap();
        let player = hero();

        let data = SaveData::new(&player);
        saves.save_game(1, &data).unwrap();
        assert!(saves.has_save(1));
        assert!(!saves.has_save(0));

        let loaded = saves.load_game(1).unwrap();
        assert_eq!(loaded, data);

        let restored = saves.load_player(1, catalog()).unwrap();
        assert_eq!(restored.total_stats(), player.total_stats());
        assert_eq!(restored.current_hp(), player.current_hp());
        assert_eq!(restored.class(), Class::Witch);
        assert_eq!(restored.equipped(), player.equipped());
    }

    #[test]
    fn test_failed_commit_removes_temp_file() {
        let dir = tempdir().unwrap();
        let saves = SaveSystem::new(dir.path(), 1).unwrap();
        // a non-empty directory in the slot's place makes the rename fail
        let blocker = dir.path().join("save_0.sav");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        assert!(saves.save_game(0, &SaveData::new(&hero())).is_err());
        assert!(!dir.path().join("save_0.tmp").exists());
        assert!(blocker.join("keep").exists());
    }

    #[test]
    fn test_invalid_slot() {
        let dir = tempdir().unwrap();
        let saves = SaveSystem::new(dir.path(), 2).unwrap();
        let data = SaveData::new(&hero());

        let err = saves.save_game(2, &data).unwrap_err();
        assert!(matches!(err, GameError::InvalidSlot { slot: 2, max_slots: 2 }));
        assert!(saves.load_game(5).is_err());
        assert!(saves.save_path(2).is_none());
        assert!(!saves.has_save(2));
    }

    #[test]
    fn test_missing_and_corrupt_slots_give_no_player() {
        let dir = tempdir().unwrap();
        let saves = SaveSystem::new(dir.path(), 2).unwrap();
        assert!(saves.load_player(0, catalog()).is_none());

        fs::write(saves.save_path(1).unwrap(), "{ definitely not json").unwrap();
        assert!(matches!(saves.load_game(1), Err(GameError::CorruptedSave(_))));
        assert!(saves.load_player(1, catalog()).is_none());
    }

    #[test]
    fn test_damaged_field_is_defaulted() {
        let dir = tempdir().unwrap();
        let saves = SaveSystem::new(dir.path(), 1).unwrap();
        let json = r#"{
            "version": 2,
            "saved_at": "2026-01-02T03:04:05Z",
            "player": {
                "name": "Sari",
                "battle_wins": -4,
                "race": "Sunda",
                "unlocked_races": ["Jawa", "Sunda"],
                "equipped_artifacts": ["Kris", "Batu Bata Merah"],
                "mystery": true
            }
        }"#;
        fs::write(saves.save_path(0).unwrap(), json).unwrap();

        let player = saves.load_player(0, catalog()).unwrap();
        assert_eq!(player.name(), "Sari");
        assert_eq!(player.battle_wins(), 0);
        assert_eq!(player.race(), Race::Sunda);
        assert_eq!(player.equipped().len(), 1);
        assert_eq!(player.current_hp(), player.max_hp());
    }

    #[test]
    fn test_list_saves_newest_first() {
        let dir = tempdir().unwrap();
        let saves = SaveSystem::new(dir.path(), 4).unwrap();
        let player = hero();

        let mut old = SaveData::new(&player);
        old.saved_at = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let mut new = SaveData::new(&player);
        new.saved_at = Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap();
        saves.save_game(0, &old).unwrap();
        saves.save_game(2, &new).unwrap();
        fs::write(saves.save_path(3).unwrap(), "[]").unwrap();

        let listed = saves.list_saves().unwrap();
        let slots: Vec<usize> = listed.iter().map(|m| m.slot).collect();
        assert_eq!(slots, vec![2, 0]);
        assert_eq!(listed[0].hero_name, "Arjuna");
        assert_eq!(listed[0].class, Class::Witch);
    }

    #[test]
    fn test_delete_save() {
        let dir = tempdir().unwrap();
        let saves = SaveSystem::new(dir.path().join("nested"), 2).unwrap();
        saves.save_game(0, &SaveData::new(&hero())).unwrap();
        assert!(saves.has_save(0));

        saves.delete_save(0).unwrap();
        assert!(!saves.has_save(0));
        // deleting an empty slot is fine
        saves.delete_save(0).unwrap();
        assert!(!dir.path().join("nested").join("save_0.tmp").exists());
    }
}

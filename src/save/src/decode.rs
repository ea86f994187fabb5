// src/save/src/decode.rs
//! Lenient save decoding. A field that is missing or has the wrong shape
//! falls back to its default instead of failing the whole record.

use chrono::{DateTime, Utc};
use error::GameError;
use hero::PlayerState;
use serde_json::{Map, Value};
use tracing::warn;

use crate::{SAVE_VERSION, SaveData};

/// Version assumed for records written before the field existed
const LEGACY_VERSION: u32 = 1;

pub(crate) fn decode_save(text: &str) -> Result<SaveData, GameError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(root) = value else {
        return Err(GameError::CorruptedSave("save root is not an object".to_string()));
    };

    let version = match root.get("version") {
        None => LEGACY_VERSION,
        Some(v) => match v.as_u64().and_then(|v| u32::try_from(v).ok()) {
            Some(version) => version,
            None => {
                warn!(value = %v, "invalid save version, assuming legacy");
                LEGACY_VERSION
            }
        },
    };
    if version > SAVE_VERSION {
        return Err(GameError::VersionMismatch {
            found: version,
            supported: SAVE_VERSION,
        });
    }

    let saved_at = root
        .get("saved_at")
        .and_then(|v| serde_json::from_value::<DateTime<Utc>>(v.clone()).ok())
        .unwrap_or_else(|| {
            warn!("missing or invalid save timestamp");
            DateTime::<Utc>::UNIX_EPOCH
        });

    let Some(Value::Object(player)) = root.get("player") else {
        return Err(GameError::CorruptedSave("missing player record".to_string()));
    };

    Ok(SaveData {
        version: SAVE_VERSION,
        saved_at,
        player: decode_player(player),
    })
}

/// Merges each saved field over the defaults, keeping only fields that
/// deserialize on their own.
pub(crate) fn decode_player(saved: &Map<String, Value>) -> PlayerState {
    let Ok(Value::Object(mut merged)) = serde_json::to_value(PlayerState::default()) else {
        return PlayerState::default();
    };

    let missing: Vec<&str> = merged
        .keys()
        .filter(|key| !saved.contains_key(key.as_str()))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        warn!(fields = ?missing, "save is missing fields, using defaults");
    }

    for (key, value) in saved {
        if !merged.contains_key(key) {
            warn!(field = %key, "ignoring unknown save field");
            continue;
        }
        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value.clone());
        match serde_json::from_value::<PlayerState>(Value::Object(candidate)) {
            Ok(_) => {
                merged.insert(key.clone(), value.clone());
            }
            Err(err) => warn!(field = %key, %err, "invalid save field, using default"),
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Class, Race};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_bad_field_keeps_the_rest() {
        let state = decode_player(&object(json!({
            "name": "Sari",
            "battle_wins": "lots",
            "race": "Bugis",
            "player_class": "Necromancer",
            "attack": 14,
            "inventory": ["Kris", "Siger"],
        })));
        assert_eq!(state.name, "Sari");
        assert_eq!(state.battle_wins, 0);
        assert_eq!(state.race, Race::Bugis);
        assert_eq!(state.player_class, Class::Fighter);
        assert_eq!(state.attack, 14);
        assert_eq!(state.inventory.len(), 2);
    }

    #[test]
    fn test_empty_player_is_all_defaults() {
        assert_eq!(decode_player(&Map::new()), PlayerState::default());
    }

    #[test]
    fn test_malformed_records() {
        assert!(matches!(decode_save("{ nope"), Err(GameError::CorruptedSave(_))));
        assert!(matches!(decode_save("[1, 2]"), Err(GameError::CorruptedSave(_))));
        assert!(matches!(
            decode_save(r#"{"version": 2, "player": 5}"#),
            Err(GameError::CorruptedSave(_))
        ));
        assert!(matches!(
            decode_save(r#"{"version": 99, "player": {}}"#),
            Err(GameError::VersionMismatch { found: 99, .. })
        ));
    }

    #[test]
    fn test_legacy_record_without_version_or_timestamp() {
        let data = decode_save(r#"{"player": {"name": "Lama", "battle_wins": 3}}"#).unwrap();
        assert_eq!(data.version, SAVE_VERSION);
        assert_eq!(data.saved_at, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(data.player.name, "Lama");
        assert_eq!(data.player.battle_wins, 3);
    }
}

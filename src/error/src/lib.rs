//! 游戏错误处理模块
//!
//! Errors raised by the save system: IO, serialization and invalid or
//! corrupted save records.

use thiserror::Error;

/// 存档与持久化相关的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// 存档系统错误
    #[error("Save system error: {0:#}")]
    SaveError(#[from] anyhow::Error),

    /// IO操作错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 无效的存档槽位
    #[error("Invalid save slot {slot} (only {max_slots} slots)")]
    InvalidSlot { slot: usize, max_slots: usize },

    /// 存档数据损坏
    #[error("Corrupted save data: {0}")]
    CorruptedSave(String),

    /// 存档来自更新的版本
    #[error("Incompatible save version {found} (newest supported is {supported})")]
    VersionMismatch { found: u32, supported: u32 },
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Syntax | Category::Eof | Category::Data => GameError::CorruptedSave(err.to_string()),
            Category::Io => GameError::SerializationError(err.to_string()),
        }
    }
}

/// 处理游戏错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::CorruptedSave(_) => "The save file is corrupted and cannot be loaded".to_string(),
        GameError::InvalidSlot { slot, .. } => format!("Save slot {slot} does not exist"),
        GameError::VersionMismatch { found, .. } => {
            format!("The save was made by a newer version of the game (v{found})")
        }
        GameError::IoError(e) => io_message(e),
        GameError::SaveError(e) => match e.downcast_ref::<std::io::Error>() {
            Some(io) => io_message(io),
            None => error.to_string(),
        },
        GameError::SerializationError(_) => error.to_string(),
    }
}

fn io_message(e: &std::io::Error) -> String {
    match e.kind() {
        std::io::ErrorKind::NotFound => "The save file does not exist".to_string(),
        std::io::ErrorKind::PermissionDenied => "No permission to access the save file".to_string(),
        _ => format!("IO error: {e}"),
    }
}

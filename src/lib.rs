// src/lib.rs
//! Artifact Wars: configuration, logging and the game session that ties
//! the catalog, hero, battle, world and save crates together.

pub mod autopilot;
pub mod config;
pub mod logging;
pub mod session;

pub use crate::autopilot::AutoPilot;
pub use crate::config::GameConfig;
pub use crate::session::GameSession;

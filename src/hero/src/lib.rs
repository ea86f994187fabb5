// src/hero/src/lib.rs
//! Player character: base stats, race and class, artifact loadout and
//! progression counters.

mod equipment;
mod player;
mod snapshot;

pub use self::{
    equipment::{EquipError, Loadout, MAX_EQUIPPED},
    player::{BASE_STATS, HeroError, Player},
    snapshot::PlayerState,
};

// src/catalog/src/lib.rs
//! Read-only content catalog: artifacts, race and class bonuses, skills,
//! set bonuses and race unlock rules.

use std::collections::BTreeMap;
use thiserror::Error;

pub mod artifact;
pub mod effect;
pub mod identity;
pub mod location;
pub mod progression;
pub mod stats;
mod tables;

pub use crate::artifact::{Artifact, ArtifactId, Rarity, SlotKind};
pub use crate::effect::{Aura, Condition, Effect, EffectContext, Outcome, Trigger};
pub use crate::identity::{Class, ClassDef, Race, Skill, SkillDamage, SkillEffect};
pub use crate::location::Location;
pub use crate::progression::{RaceUnlock, SetBonus, UnlockProgress, UnlockRequirement};
pub use crate::stats::StatBlock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown artifact: {0}")]
    UnknownArtifact(String),
}

/// Immutable content tables shared by the character model and battle engine.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    artifacts: BTreeMap<ArtifactId, Artifact>,
    races: BTreeMap<Race, StatBlock>,
    classes: BTreeMap<Class, ClassDef>,
    sets: Vec<SetBonus>,
    unlocks: Vec<RaceUnlock>,
    starter_kit: Vec<ArtifactId>,
}

impl Catalog {
    /// Catalog with no content at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// The game's standard content tables
    pub fn standard() -> Self {
        tables::standard()
    }

    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.insert(artifact.id.clone(), artifact);
        self
    }

    pub fn with_race_bonus(mut self, race: Race, bonus: StatBlock) -> Self {
        self.races.insert(race, bonus);
        self
    }

    pub fn with_class(mut self, def: ClassDef) -> Self {
        self.classes.insert(def.class, def);
        self
    }

    pub fn with_set(mut self, set: SetBonus) -> Self {
        self.sets.push(set);
        self
    }

    pub fn with_unlock(mut self, unlock: RaceUnlock) -> Self {
        self.unlocks.retain(|u| u.race != unlock.race);
        self.unlocks.push(unlock);
        self
    }

    pub fn with_starter_kit(mut self, kit: &[&str]) -> Self {
        self.starter_kit = kit.iter().map(|id| ArtifactId::from(*id)).collect();
        self
    }

    pub fn get_artifact(&self, id: &str) -> Result<&Artifact, CatalogError> {
        self.artifacts
            .get(id)
            .ok_or_else(|| CatalogError::UnknownArtifact(id.to_string()))
    }

    pub fn contains_artifact(&self, id: &str) -> bool {
        self.artifacts.contains_key(id)
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    pub fn race_bonus(&self, race: Race) -> StatBlock {
        self.races.get(&race).copied().unwrap_or_default()
    }

    pub fn class_bonus(&self, class: Class) -> StatBlock {
        self.classes
            .get(&class)
            .map(|def| def.bonus)
            .unwrap_or_default()
    }

    pub fn skills(&self, class: Class) -> &[Skill] {
        self.classes
            .get(&class)
            .map(|def| def.skills.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_bonuses(&self) -> &[SetBonus] {
        &self.sets
    }

    pub fn race_unlocks(&self) -> &[RaceUnlock] {
        &self.unlocks
    }

    pub fn unlock_rule(&self, race: Race) -> Option<&RaceUnlock> {
        self.unlocks.iter().find(|u| u.race == race)
    }

    pub fn starter_kit(&self) -> &[ArtifactId] {
        &self.starter_kit
    }
}

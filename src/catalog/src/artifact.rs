// src/catalog/src/artifact.rs
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use strum::{Display, EnumIter, EnumString};

use crate::effect::Effect;
use crate::stats::StatBlock;

/// Catalog key of an artifact, e.g. `"Kris"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtifactId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ArtifactId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ArtifactId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ArtifactId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ArtifactId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// 装备位类型
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SlotKind {
    Weapon,
    Armor,
    Helmet,
    Accessory,
}

/// 稀有度
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Rarity {
    Starter,
    Common,
    Uncommon,
    Rare,
    Epic,
}

/// Immutable catalog entry for an equippable artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: ArtifactId,
    pub slot: SlotKind,
    pub rarity: Rarity,
    pub stats: StatBlock,
    pub effect: Option<Effect>,
    pub description: String,
}

impl Artifact {
    pub fn new(id: impl Into<ArtifactId>, slot: SlotKind, rarity: Rarity, stats: StatBlock) -> Self {
        Self {
            id: id.into(),
            slot,
            rarity,
            stats,
            effect: None,
            description: String::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.id, self.slot, self.rarity)
    }
}

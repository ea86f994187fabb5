// src/catalog/src/identity.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use strum_macros::EnumIter;

use crate::stats::StatBlock;

/// 种族（每个种族提供固定属性加成）
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum Race {
    #[default]
    Jawa,
    Sunda,
    Bali,
    Dayak,
    Bugis,
}

/// 职业（决定技能列表）
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum Class {
    #[default]
    Fighter,
    Assassin,
    Archer,
    Witch,
}

/// Side effect of a skill, resolved by the battle engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillEffect {
    Heal(i32),
    BoostAttack,
    Poison,
    Dodge,
    CriticalBoost,
    ManaShield,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillDamage {
    pub multiplier: f64,
    /// Total hits; every hit after the first lands at 0.8x.
    pub hits: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub mana_cost: i32,
    pub damage: Option<SkillDamage>,
    pub effect: Option<SkillEffect>,
    pub description: String,
}

impl Skill {
    pub fn strike(name: &str, mana_cost: i32, multiplier: f64) -> Self {
        Self {
            name: name.to_string(),
            mana_cost,
            damage: Some(SkillDamage { multiplier, hits: 1 }),
            effect: None,
            description: String::new(),
        }
    }

    pub fn utility(name: &str, mana_cost: i32, effect: SkillEffect) -> Self {
        Self {
            name: name.to_string(),
            mana_cost,
            damage: None,
            effect: Some(effect),
            description: String::new(),
        }
    }

    pub fn with_hits(mut self, hits: u32) -> Self {
        if let Some(damage) = self.damage.as_mut() {
            damage.hits = hits.max(1);
        }
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// Catalog row for a class: its stat bonus and skill list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub class: Class,
    pub bonus: StatBlock,
    pub skills: Vec<Skill>,
}

impl ClassDef {
    pub fn new(class: Class, bonus: StatBlock, skills: Vec<Skill>) -> Self {
        Self {
            class,
            bonus,
            skills,
        }
    }
}

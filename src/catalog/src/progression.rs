//! Set bonuses and race unlock rules

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::artifact::ArtifactId;
use crate::identity::Race;
use crate::stats::StatBlock;

/// Additive bonus active while every member artifact is equipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBonus {
    pub name: String,
    pub members: Vec<ArtifactId>,
    pub bonus: StatBlock,
}

impl SetBonus {
    pub fn new(name: impl Into<String>, members: &[&str], bonus: StatBlock) -> Self {
        Self {
            name: name.into(),
            members: members.iter().map(|m| ArtifactId::from(*m)).collect(),
            bonus,
        }
    }

    pub fn is_active(&self, equipped: &[ArtifactId]) -> bool {
        !self.members.is_empty() && self.members.iter().all(|m| equipped.contains(m))
    }
}

/// Progress counters an unlock requirement is checked against
#[derive(Debug, Clone, Copy)]
pub struct UnlockProgress<'a> {
    pub completed_quests: &'a BTreeSet<String>,
    pub equipped: &'a [ArtifactId],
    pub inventory: &'a [ArtifactId],
    pub battle_wins: u32,
}

impl UnlockProgress<'_> {
    pub fn owns(&self, id: &ArtifactId) -> bool {
        self.equipped.contains(id) || self.inventory.contains(id)
    }
}

/// Criteria required to unlock a race
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockRequirement {
    /// Finish a named quest
    QuestCompleted(String),
    /// Own at least `at_least` of the listed artifacts (equipped or carried)
    OwnsArtifacts {
        artifacts: Vec<ArtifactId>,
        at_least: usize,
    },
    /// Win a certain number of battles
    BattleWins(u32),
}

impl UnlockRequirement {
    pub fn is_met(&self, progress: &UnlockProgress<'_>) -> bool {
        match self {
            UnlockRequirement::QuestCompleted(quest) => progress.completed_quests.contains(quest),
            UnlockRequirement::OwnsArtifacts {
                artifacts,
                at_least,
            } => artifacts.iter().filter(|a| progress.owns(a)).count() >= *at_least,
            UnlockRequirement::BattleWins(required) => progress.battle_wins >= *required,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceUnlock {
    pub race: Race,
    pub requirement: UnlockRequirement,
    pub description: String,
}

impl RaceUnlock {
    pub fn new(race: Race, requirement: UnlockRequirement, description: impl Into<String>) -> Self {
        Self {
            race,
            requirement,
            description: description.into(),
        }
    }
}

// src/catalog/src/tables.rs
//! Standard content tables.

use crate::artifact::{Artifact, ArtifactId, Rarity, SlotKind};
use crate::effect::{Aura, Condition, Effect, Outcome, Trigger};
use crate::identity::{Class, ClassDef, Race, Skill, SkillEffect};
use crate::progression::{RaceUnlock, SetBonus, UnlockRequirement};
use crate::stats::StatBlock;
use crate::Catalog;

const Z: StatBlock = StatBlock::ZERO;

pub(crate) fn standard() -> Catalog {
    let mut catalog = Catalog::empty();
    for artifact in artifacts() {
        catalog = catalog.with_artifact(artifact);
    }

    catalog
        .with_race_bonus(Race::Jawa, StatBlock { hp: 10, mana: 5, ..Z })
        .with_race_bonus(Race::Sunda, StatBlock { speed: 2, attack: 3, ..Z })
        .with_race_bonus(Race::Bali, StatBlock { mana: 8, defense: 4, ..Z })
        .with_race_bonus(Race::Dayak, StatBlock { attack: 5, durability: 3, ..Z })
        .with_race_bonus(Race::Bugis, StatBlock { luck: 4, speed: 2, ..Z })
        .with_class(fighter())
        .with_class(assassin())
        .with_class(archer())
        .with_class(witch())
        .with_set(SetBonus::new(
            "Jawa_Complete",
            &["Kris", "Destar", "Baju Bodo"],
            StatBlock { attack: 15, mana: 10, ..Z },
        ))
        .with_set(SetBonus::new(
            "Kalimantan_Set",
            &["Mandau", "Perisai Talawang"],
            StatBlock { defense: 20, hp: 25, ..Z },
        ))
        .with_unlock(RaceUnlock::new(
            Race::Sunda,
            UnlockRequirement::QuestCompleted("Guardian Hutan".to_string()),
            "Kalahkan Guardian Hutan",
        ))
        .with_unlock(RaceUnlock::new(
            Race::Bali,
            UnlockRequirement::QuestCompleted("Quest Seni".to_string()),
            "Selesaikan Quest Seni",
        ))
        .with_unlock(RaceUnlock::new(
            Race::Dayak,
            UnlockRequirement::OwnsArtifacts {
                artifacts: vec![ArtifactId::from("Mandau"), ArtifactId::from("Perisai Talawang")],
                at_least: 2,
            },
            "Kumpulkan artefak Kalimantan",
        ))
        .with_unlock(RaceUnlock::new(
            Race::Bugis,
            UnlockRequirement::BattleWins(10),
            "Menang 10 pertempuran",
        ))
        .with_starter_kit(&["Tombak", "Perisai Talawang", "Destar"])
}

fn fighter() -> ClassDef {
    ClassDef::new(
        Class::Fighter,
        StatBlock { hp: 20, attack: 10, defense: 5, ..Z },
        vec![
            Skill::strike("Heavy Strike", 15, 2.0).with_description("A heavy blow dealing 2x damage"),
            Skill::strike("Shield Bash", 10, 1.5).with_description("A bash with the shield"),
            Skill::utility("Battle Cry", 20, SkillEffect::BoostAttack)
                .with_description("Raises attack for a few turns"),
        ],
    )
}

fn assassin() -> ClassDef {
    ClassDef::new(
        Class::Assassin,
        StatBlock { speed: 15, attack: 12, luck: 8, ..Z },
        vec![
            Skill::strike("Backstab", 20, 2.5).with_description("A strike from behind"),
            Skill::utility("Poison Dart", 15, SkillEffect::Poison)
                .with_description("Poison that drains enemy HP every turn"),
            Skill::utility("Shadow Step", 25, SkillEffect::Dodge)
                .with_description("Prepare to evade the next attack"),
        ],
    )
}

fn archer() -> ClassDef {
    ClassDef::new(
        Class::Archer,
        StatBlock { speed: 10, attack: 8, durability: 5, ..Z },
        vec![
            Skill::strike("Precision Shot", 12, 1.8).with_description("A precise, high damage shot"),
            Skill::strike("Multi Shot", 18, 1.2)
                .with_hits(3)
                .with_description("Fires several arrows at once"),
            Skill::utility("Eagle Eye", 15, SkillEffect::CriticalBoost)
                .with_description("Raises critical hit chance"),
        ],
    )
}

fn witch() -> ClassDef {
    ClassDef::new(
        Class::Witch,
        StatBlock { mana: 30, attack: 5, defense: 3, ..Z },
        vec![
            Skill::strike("Fireball", 25, 2.2).with_description("A ball of magic fire"),
            Skill::utility("Heal", 20, SkillEffect::Heal(30)).with_description("Restores HP"),
            Skill::utility("Mana Shield", 15, SkillEffect::ManaShield)
                .with_description("A shield woven from mana"),
        ],
    )
}

fn artifacts() -> Vec<Artifact> {
    use Rarity::*;
    use SlotKind::*;

    vec![
        Artifact::new("Tombak", Weapon, Starter, StatBlock { attack: 5, speed: 1, ..Z })
            .with_description("Javanese spear carried by Majapahit soldiers."),
        Artifact::new("Perisai Talawang", Armor, Starter, StatBlock { defense: 8, speed: -1, ..Z })
            .with_description("Dayak shield carved from ironwood."),
        Artifact::new("Destar", Helmet, Starter, StatBlock { defense: 3, hp: 10, ..Z })
            .with_description("Javanese folded head cloth."),
        Artifact::new("Clurit", Weapon, Common, StatBlock { attack: 8, speed: 2, ..Z })
            .with_description("Sickle-shaped blade from Madura."),
        Artifact::new("Celuk", Accessory, Common, StatBlock { luck: 3, durability: 2, ..Z })
            .with_description("Balinese silver ring."),
        Artifact::new("Bokor", Accessory, Common, StatBlock { mana: 10, defense: 2, ..Z })
            .with_description("Ceremonial offering bowl."),
        Artifact::new("Rencong", Weapon, Uncommon, StatBlock { attack: 12, speed: 3, ..Z })
            .with_effect(Effect::new(
                Trigger::BattleStart,
                Condition::FirstAttack,
                Outcome::BonusDamage(5),
            ))
            .with_description("Curved Acehnese dagger."),
        Artifact::new("Baju Bodo", Armor, Uncommon, StatBlock { defense: 12, hp: 15, ..Z })
            .with_description("Bugis-Makassar garment."),
        Artifact::new("Badong", Accessory, Uncommon, StatBlock { luck: 5, mana: 8, ..Z })
            .with_description("Torajan bracelet."),
        Artifact::new("Trisula", Weapon, Rare, StatBlock { attack: 18, speed: 1, ..Z })
            .with_effect(Effect::new(
                Trigger::Attack,
                Condition::EnemyHpAbove { percent: 50 },
                Outcome::MaxHpPercentDamage(10),
            ))
            .with_description("Three-pronged spear of the old kingdoms."),
        Artifact::new(
            "Kawaca",
            Armor,
            Rare,
            StatBlock { defense: 15, hp: 20, durability: 5, ..Z },
        )
        .with_description("Javanese armour worn by kings and knights."),
        Artifact::new("Keramon", Accessory, Rare, StatBlock { speed: 4, attack: 5, ..Z })
            .with_effect(Effect::new(
                Trigger::BattleStart,
                Condition::Always,
                Outcome::FirstStrike,
            ))
            .with_description("Small talisman box holding mantras."),
        Artifact::new(
            "Kris",
            Weapon,
            Epic,
            StatBlock { attack: 25, speed: -3, luck: 5, ..Z },
        )
        .with_effect(Effect::new(
            Trigger::FirstAttack,
            Condition::EnemyHpFull,
            Outcome::MaxHpPercentDamage(25),
        ))
        .with_description("Wavy-bladed heirloom dagger."),
        Artifact::new(
            "Mandau",
            Weapon,
            Epic,
            StatBlock { attack: 22, speed: 2, durability: 3, ..Z },
        )
        .with_effect(Effect::new(
            Trigger::Attack,
            Condition::PlayerHpBelow { percent: 30 },
            Outcome::DoubleNextHit,
        ))
        .with_description("Dayak long sword decorated with hornbill feathers."),
        Artifact::new(
            "Siger",
            Helmet,
            Epic,
            StatBlock { defense: 10, hp: 25, mana: 15, ..Z },
        )
        .with_effect(Effect::new(
            Trigger::Passive,
            Condition::Always,
            Outcome::Aura(Aura::Royal),
        ))
        .with_description("Lampung crown."),
        Artifact::new("Gamelan Mini", Accessory, Rare, StatBlock { mana: 15, luck: 3, ..Z })
            .with_effect(Effect::new(
                Trigger::Passive,
                Condition::Always,
                Outcome::Aura(Aura::Rhythm),
            ))
            .with_description("Pocket gamelan carried as a charm."),
    ]
}

// src/combat/src/enemy.rs

use catalog::ArtifactId;
use serde::{Deserialize, Serialize};

use crate::status_effect::StatusEffects;

/// 默认掉落概率
pub const DEFAULT_DROP_CHANCE: f64 = 0.3;

/// 敌人实体，属性由等级决定，只存在于一场战斗中
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub loot: Option<ArtifactId>,
    pub drop_chance: f64,
    pub status: StatusEffects,
}

impl Enemy {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        let level_i = i32::try_from(level).unwrap_or(i32::MAX);
        let scaled = |base: i32, per_level: i32| per_level.saturating_mul(level_i).saturating_add(base);
        let max_hp = scaled(50, 20);
        Self {
            name: name.into(),
            level,
            hp: max_hp,
            max_hp,
            attack: scaled(5, 3),
            defense: scaled(3, 2),
            speed: scaled(4, 1),
            loot: None,
            drop_chance: DEFAULT_DROP_CHANCE,
            status: StatusEffects::new(),
        }
    }

    /// 设置掉落神器及概率
    pub fn with_loot(mut self, id: impl Into<ArtifactId>, chance: f64) -> Self {
        self.loot = Some(id.into());
        self.drop_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// 受到伤害，返回实际扣除的生命值
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        self.hp = self.hp.saturating_sub(amount);
        amount
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

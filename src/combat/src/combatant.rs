// src/combat/src/combatant.rs

use hero::Player;

use crate::enemy::Enemy;

/// 表示可以参加战斗的活体
pub trait Combatant {
    fn name(&self) -> &str;

    /// 当前生命值
    fn hp(&self) -> i32;

    /// 最大生命值
    fn max_hp(&self) -> i32;

    fn attack(&self) -> i32;

    fn defense(&self) -> i32;

    fn speed(&self) -> i32;

    /// 是否存活
    fn is_alive(&self) -> bool {
        self.hp() > 0
    }

    /// 造成伤害，返回实际扣除量
    fn take_damage(&mut self, amount: i32) -> i32;
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> i32 {
        self.hp
    }

    fn max_hp(&self) -> i32 {
        self.max_hp
    }

    fn attack(&self) -> i32 {
        self.attack
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn speed(&self) -> i32 {
        self.speed
    }

    fn take_damage(&mut self, amount: i32) -> i32 {
        Enemy::take_damage(self, amount)
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        Player::name(self)
    }

    fn hp(&self) -> i32 {
        self.current_hp()
    }

    fn max_hp(&self) -> i32 {
        Player::max_hp(self)
    }

    fn attack(&self) -> i32 {
        self.total_stats().attack
    }

    fn defense(&self) -> i32 {
        self.total_stats().defense
    }

    fn speed(&self) -> i32 {
        self.total_stats().speed
    }

    fn take_damage(&mut self, amount: i32) -> i32 {
        Player::take_damage(self, amount)
    }
}

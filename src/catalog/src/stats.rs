// src/catalog/src/stats.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Named stat bundle used for base stats and every kind of bonus.
///
/// `hp` and `mana` are maxima; current vitals live on the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub hp: i32,
    pub mana: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub luck: i32,
    pub durability: i32,
}

impl StatBlock {
    pub const ZERO: StatBlock = StatBlock {
        hp: 0,
        mana: 0,
        attack: 0,
        defense: 0,
        speed: 0,
        luck: 0,
        durability: 0,
    };

    pub const fn add(self, other: StatBlock) -> StatBlock {
        StatBlock {
            hp: self.hp + other.hp,
            mana: self.mana + other.mana,
            attack: self.attack + other.attack,
            defense: self.defense + other.defense,
            speed: self.speed + other.speed,
            luck: self.luck + other.luck,
            durability: self.durability + other.durability,
        }
    }

    pub const fn subtract(self, other: StatBlock) -> StatBlock {
        StatBlock {
            hp: self.hp - other.hp,
            mana: self.mana - other.mana,
            attack: self.attack - other.attack,
            defense: self.defense - other.defense,
            speed: self.speed - other.speed,
            luck: self.luck - other.luck,
            durability: self.durability - other.durability,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Non-zero fields as `(name, value)` pairs, in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, i32)> {
        [
            ("hp", self.hp),
            ("mana", self.mana),
            ("attack", self.attack),
            ("defense", self.defense),
            ("speed", self.speed),
            ("luck", self.luck),
            ("durability", self.durability),
        ]
        .into_iter()
        .filter(|(_, v)| *v != 0)
        .collect()
    }
}

impl Add for StatBlock {
    type Output = StatBlock;

    fn add(self, rhs: StatBlock) -> StatBlock {
        StatBlock::add(self, rhs)
    }
}

impl Sub for StatBlock {
    type Output = StatBlock;

    fn sub(self, rhs: StatBlock) -> StatBlock {
        self.subtract(rhs)
    }
}

impl AddAssign for StatBlock {
    fn add_assign(&mut self, rhs: StatBlock) {
        *self = StatBlock::add(*self, rhs);
    }
}

impl SubAssign for StatBlock {
    fn sub_assign(&mut self, rhs: StatBlock) {
        *self = self.subtract(rhs);
    }
}

impl Neg for StatBlock {
    type Output = StatBlock;

    fn neg(self) -> StatBlock {
        StatBlock::ZERO.subtract(self)
    }
}

impl Sum for StatBlock {
    fn sum<I: Iterator<Item = StatBlock>>(iter: I) -> StatBlock {
        iter.fold(StatBlock::ZERO, StatBlock::add)
    }
}

impl<'a> Sum<&'a StatBlock> for StatBlock {
    fn sum<I: Iterator<Item = &'a StatBlock>>(iter: I) -> StatBlock {
        iter.copied().sum()
    }
}

impl fmt::Display for StatBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries()
            .into_iter()
            .map(|(name, value)| format!("{name}: {value:+}"))
            .collect();
        if parts.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

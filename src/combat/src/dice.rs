// src/combat/src/dice.rs
use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Source of randomness for battles and encounters.
pub trait Dice {
    /// Uniform value in `[0, 1)`
    fn roll(&mut self) -> f64;

    /// Uniform index in `0..len`; `len` must be non-zero
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform value in `lo..=hi`
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32;

    /// Samples an event with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.roll() < p
    }
}

/// 确定性RNG，序列化时只保存种子
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeded from the thread-local generator
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for GameRng {
    fn roll(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }
}

impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.seed)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(Self::new(seed))
    }
}

/// Replays scripted values, for tests and reproducible scenarios.
///
/// Once a queue runs dry, `roll` returns the fallback (0.99 by default, so
/// every chance check fails) and `pick` returns 0.
#[derive(Debug, Clone)]
pub struct FixedDice {
    rolls: VecDeque<f64>,
    picks: VecDeque<usize>,
    fallback: f64,
}

impl Default for FixedDice {
    fn default() -> Self {
        Self {
            rolls: VecDeque::new(),
            picks: VecDeque::new(),
            fallback: 0.99,
        }
    }
}

impl FixedDice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dice whose every roll is `value`
    pub fn always(value: f64) -> Self {
        Self {
            fallback: value,
            ..Self::default()
        }
    }

    pub fn with_rolls(mut self, rolls: &[f64]) -> Self {
        self.rolls.extend(rolls.iter().copied());
        self
    }

    /// Offsets returned by `pick` and `range_inclusive` (relative to `lo`)
    pub fn with_picks(mut self, picks: &[usize]) -> Self {
        self.picks.extend(picks.iter().copied());
        self
    }
}

impl Dice for FixedDice {
    fn roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }

    fn pick(&mut self, len: usize) -> usize {
        let pick = self.picks.pop_front().unwrap_or(0);
        pick.min(len.saturating_sub(1))
    }

    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        let span = hi.saturating_sub(lo) as usize + 1;
        lo + self.pick(span) as u32
    }
}

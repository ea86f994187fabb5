//! Damage and probability formulas. All integer halving floors toward
//! negative infinity.

/// Turns of attack boost granted by a skill
pub const BOOST_ATTACK_TURNS: u32 = 3;
/// Turns of critical boost granted by a skill
pub const CRITICAL_BOOST_TURNS: u32 = 2;
/// Turns of poison applied by a skill
pub const POISON_TURNS: u32 = 3;
/// Defense added by the Defend action
pub const DEFEND_BONUS: i32 = 5;
/// Damage factor of every extra hit of a multi-hit skill
pub const EXTRA_HIT_FACTOR: f64 = 0.8;

pub fn half(value: i32) -> i32 {
    value.div_euclid(2)
}

/// `max(1, attack - defense/2)`
pub fn basic_damage(attack: i32, defense: i32) -> i32 {
    (attack - half(defense)).max(1)
}

/// Basic damage multiplied by 1.5, floored
pub fn boosted(damage: i32) -> i32 {
    (damage * 3).div_euclid(2)
}

/// `max(1, floor(attack * multiplier) - defense/2)`
pub fn skill_damage(attack: i32, multiplier: f64, defense: i32) -> i32 {
    let raw = (f64::from(attack) * multiplier).floor() as i32;
    (raw - half(defense)).max(1)
}

/// Damage of each hit after the first
pub fn extra_hit_damage(attack: i32, multiplier: f64, defense: i32) -> i32 {
    let raw = (f64::from(attack) * multiplier * EXTRA_HIT_FACTOR).floor() as i32;
    (raw - half(defense)).max(1)
}

/// Enemy damage after a mana shield halves it
pub fn shielded(damage: i32) -> i32 {
    half(damage).max(1)
}

/// `max(1, max_hp/10)`
pub fn poison_tick(max_hp: i32) -> i32 {
    max_hp.div_euclid(10).max(1)
}

/// `floor(max_hp * percent / 100)`
pub fn percent_of(max_hp: i32, percent: u8) -> i32 {
    (i64::from(max_hp) * i64::from(percent)).div_euclid(100) as i32
}

fn speed_ratio(speed: i32, enemy_speed: i32) -> f64 {
    let total = speed + enemy_speed;
    if total <= 0 {
        return 0.0;
    }
    f64::from(speed) / f64::from(total)
}

/// `speed/(speed+enemy_speed) * 0.5 + luck * 0.01`
pub fn flee_chance(speed: i32, enemy_speed: i32, luck: i32) -> f64 {
    speed_ratio(speed, enemy_speed) * 0.5 + f64::from(luck) * 0.01
}

/// `speed/(speed+enemy_speed) * 0.3`
pub fn dodge_chance(speed: i32, enemy_speed: i32) -> f64 {
    speed_ratio(speed, enemy_speed) * 0.3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_damage() {
        assert_eq!(basic_damage(10, 4), 8);
        assert_eq!(basic_damage(10, 5), 8);
        assert_eq!(basic_damage(2, 40), 1);
        assert_eq!(basic_damage(10, -3), 12);
    }

    #[test]
    fn test_boost_floors() {
        assert_eq!(boosted(8), 12);
        assert_eq!(boosted(9), 13);
        assert_eq!(boosted(1), 1);
    }

    #[test]
    fn test_skill_damage() {
        // Heavy Strike, attack 20, enemy defense 5
        assert_eq!(skill_damage(20, 2.0, 5), 38);
        // floor(18 * 1.2 * 0.8) - 2
        assert_eq!(extra_hit_damage(18, 1.2, 5), 15);
        assert_eq!(skill_damage(1, 1.0, 50), 1);
    }

    #[test]
    fn test_enemy_side() {
        // Defend: attack 10 against defense 10 + 5
        assert_eq!(basic_damage(10, 10 + DEFEND_BONUS), 3);
        assert_eq!(shielded(3), 1);
        assert_eq!(shielded(9), 4);
        assert_eq!(poison_tick(100), 10);
        assert_eq!(poison_tick(7), 1);
        assert_eq!(percent_of(150, 25), 37);
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_probabilities() {
        assert!(approx(flee_chance(8, 8, 5), 0.3));
        assert!(approx(dodge_chance(10, 10), 0.15));
        assert!(approx(flee_chance(0, 0, 5), 0.05));
        assert_eq!(dodge_chance(-3, 1), 0.0);
    }
}

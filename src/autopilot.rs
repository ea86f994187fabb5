// src/autopilot.rs
//! Heuristic controller used by the binary's autoplay mode.

use catalog::{Condition, EffectContext, Outcome as EffectOutcome, SkillEffect};
use combat::{BattleController, BattleView, PlayerAction, Rejection};
use tracing::debug;

/// Heal once HP drops under this share of the maximum
pub const HEAL_BELOW_PERCENT: u8 = 35;

#[derive(Debug, Default)]
pub struct AutoPilot {
    /// Set after a refusal; the next choice is a plain attack.
    refused: bool,
    pub rejections: u32,
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn heal_skill(view: &BattleView<'_>) -> Option<usize> {
        let player = view.player;
        let low = Condition::PlayerHpBelow {
            percent: HEAL_BELOW_PERCENT,
        };
        if !low.holds(&context(view)) {
            return None;
        }
        player.skills().iter().position(|skill| {
            matches!(skill.effect, Some(SkillEffect::Heal(_))) && skill.mana_cost <= player.current_mana()
        })
    }

    fn ready_artifact(view: &BattleView<'_>) -> Option<PlayerAction> {
        let catalog = view.player.catalog();
        let ctx = context(view);
        view.usable_artifacts.iter().find_map(|id| {
            let effect = catalog.get_artifact(id.as_str()).ok()?.effect?;
            let worthwhile = match effect.outcome {
                EffectOutcome::BonusDamage(_) | EffectOutcome::MaxHpPercentDamage(_) => true,
                EffectOutcome::DoubleNextHit => !view.buffs.double_damage,
                EffectOutcome::FirstStrike | EffectOutcome::Aura(_) => false,
            };
            (worthwhile && effect.condition.holds(&ctx)).then(|| PlayerAction::Artifact(id.clone()))
        })
    }

    /// Strongest affordable damage skill, if it beats a plain attack.
    fn strike_skill(view: &BattleView<'_>) -> Option<usize> {
        let mana = view.player.current_mana();
        view.player
            .skills()
            .iter()
            .enumerate()
            .filter(|(_, skill)| skill.mana_cost <= mana)
            .filter_map(|(index, skill)| {
                let damage = skill.damage?;
                let weight = damage.multiplier * (1.0 + 0.8 * f64::from(damage.hits.saturating_sub(1)));
                (weight > 1.0).then_some((index, weight))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}

fn context(view: &BattleView<'_>) -> EffectContext {
    EffectContext {
        player_hp: view.player.current_hp(),
        player_max_hp: view.player.max_hp(),
        enemy_hp: view.enemy.hp,
        enemy_max_hp: view.enemy.max_hp,
        first_attack: false,
    }
}

impl BattleController for AutoPilot {
    fn choose_action(&mut self, view: &BattleView<'_>) -> PlayerAction {
        if std::mem::take(&mut self.refused) {
            return PlayerAction::Attack;
        }
        let action = Self::heal_skill(view)
            .map(PlayerAction::Skill)
            .or_else(|| Self::ready_artifact(view))
            .or_else(|| Self::strike_skill(view).map(PlayerAction::Skill))
            .unwrap_or(PlayerAction::Attack);
        debug!(%action, round = view.round, "autopilot choice");
        action
    }

    fn on_rejected(&mut self, rejection: &Rejection) {
        debug!(%rejection, "autopilot choice refused");
        self.rejections += 1;
        self.refused = true;
    }
}

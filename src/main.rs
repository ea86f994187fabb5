// src/main.rs
use std::sync::Arc;

use anyhow::Result;
use artifact_wars::{AutoPilot, GameConfig, GameSession, logging};
use catalog::{Catalog, Location};
use combat::Outcome;
use tracing::{info, warn};

const AUTOSAVE_SLOT: usize = 0;

fn main() -> Result<()> {
    let config = GameConfig::load()?;
    logging::setup_logger(&config.log_filter);

    let catalog = Arc::new(Catalog::standard());
    let mut session = GameSession::resume_or_new(config.clone(), catalog, AUTOSAVE_SLOT)?;
    let mut pilot = AutoPilot::new();
    let battlegrounds: Vec<Location> = Location::battlegrounds().collect();

    println!(
        "{} the {} {} sets out (seed {})",
        session.player().name(),
        session.player().race(),
        session.player().class(),
        session.seed()
    );

    for round in 0..config.autoplay_encounters as usize {
        if session.player().is_defeated() {
            warn!("hero is too weak to continue");
            break;
        }
        let Some(&location) = battlegrounds.get(round % battlegrounds.len().max(1)) else {
            break;
        };
        session.travel(location);

        let report = session.encounter(&mut pilot)?;
        let verdict = match report.outcome {
            Outcome::Victory => "won",
            Outcome::Defeat => "lost",
            Outcome::Fled => "fled",
        };
        println!(
            "[{location}] {} (lv {}): {verdict} in {} turns",
            report.enemy, report.level, report.battle.turns
        );
        if let Some(loot) = &report.loot {
            println!("  found {loot}");
        }
        for race in &report.unlocked {
            println!("  unlocked race {race}");
        }
    }

    let player = session.player();
    println!(
        "HP {}/{}  Mana {}/{}  Wins {}",
        player.current_hp(),
        player.max_hp(),
        player.current_mana(),
        player.max_mana(),
        player.battle_wins()
    );
    session.save(AUTOSAVE_SLOT)?;
    info!(slot = AUTOSAVE_SLOT, "progress saved");
    Ok(())
}

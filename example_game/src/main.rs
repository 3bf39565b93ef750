//! Example Game - A short console fight driven by a stat_core container
//!
//! This demo shows:
//! - Loading a container from TOML (with clamp handlers)
//! - Timed buffs applied and removed as modifiers
//! - A custom handler capping hp at the current max_hp
//! - Change notifications, the debug dump and a JSON snapshot

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use stat_core::prelude::*;
use stat_core::{load_container, parse_container, ConfigError};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const ROUNDS: u32 = 12;
const ENEMY_ATTACK: f64 = 18.0;

/// A buff that stays on the player for a number of rounds
struct ActiveBuff {
    stat: &'static str,
    modifier_id: &'static str,
    rounds_left: u32,
}

/// Roll one of the buffs the player can pick up
fn roll_buff(rng: &mut ChaCha8Rng) -> (ActiveBuff, StatModifier) {
    match rng.gen_range(0..4) {
        0 => (
            ActiveBuff { stat: "attack", modifier_id: "whetstone", rounds_left: 3 },
            StatModifier::additive("whetstone", 6.0),
        ),
        1 => (
            ActiveBuff { stat: "attack", modifier_id: "battle_cry", rounds_left: 2 },
            StatModifier::multiplicative("battle_cry", 0.5),
        ),
        2 => (
            ActiveBuff { stat: "armour", modifier_id: "stone_skin", rounds_left: 2 },
            StatModifier::overriding("stone_skin", 80.0, 1),
        ),
        _ => (
            ActiveBuff { stat: "max_hp", modifier_id: "fortify", rounds_left: 4 },
            StatModifier::custom("fortify", |base, current| current + base * 0.25),
        ),
    }
}

fn load_player() -> Result<StatsContainer, ConfigError> {
    let path = Path::new("config/player.toml");
    if path.exists() {
        return load_container(path);
    }
    parse_container(include_str!("../../config/player.toml"))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut player = load_player()?;

    // hp already has a min clamp from the config; replace it with one that also respects max_hp
    player.unregister_base_value_handler("hp");
    player.register_base_value_handler(BaseValueHandler::new("hp", |_, value, container| {
        let max = container.get_current_value("max_hp").unwrap_or(f64::INFINITY);
        value.max(0.0).min(max)
    }))?;

    let hp_log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&hp_log);
    player.subscribe(ChangeKind::BaseValueChanged, move |event| {
        if event.stat_key == "hp" {
            sink.borrow_mut().push(event.new_base_value - event.old_base_value);
        }
    });
    player.subscribe(ChangeKind::ModifierAdded, |event| {
        info!("{} is now {}", event.stat_key, event.stat.current_value());
    });

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut buffs: Vec<ActiveBuff> = Vec::new();
    let mut enemy_hp = 150.0;

    for round in 1..=ROUNDS {
        if rng.gen_bool(0.4) {
            let (buff, modifier) = roll_buff(&mut rng);
            info!("round {}: picked up {}", round, buff.modifier_id);
            player.apply_modifier(buff.stat, modifier);
            buffs.push(buff);
        }

        let attack = player.get_current_value("attack")?;
        let hit = attack * rng.gen_range(0.8..1.2);
        enemy_hp -= hit;
        info!("round {}: player hits for {:.1}, enemy at {:.1}", round, hit, enemy_hp);
        if enemy_hp <= 0.0 {
            info!("enemy defeated in round {}", round);
            player.add_to_base_value("gold", rng.gen_range(10.0..25.0), false)?;
            break;
        }

        let armour = player.get_current_value("armour")?;
        let damage = ENEMY_ATTACK * 100.0 / (100.0 + armour.max(0.0));
        let hp = player.get_base_value("hp")? - damage;
        player.set_base_value("hp", hp, false)?;
        if player.get_base_value("hp")? <= 0.0 {
            warn!("player fell in round {}", round);
            break;
        }

        for buff in &mut buffs {
            buff.rounds_left -= 1;
            if buff.rounds_left == 0 {
                player.remove_modifier(buff.stat, buff.modifier_id);
            }
        }
        buffs.retain(|b| b.rounds_left > 0);
    }

    info!("hp changes: {:?}", hp_log.borrow());
    print!("{}", player.get_debug_info());
    println!("{}", serde_json::to_string_pretty(&player.get_state())?);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

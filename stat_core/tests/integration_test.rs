//! Integration test: Build container -> Stack modifiers -> Intercept writes -> Snapshot
//!
//! Exercises the public API the way a game logic layer would.

use stat_core::prelude::*;
use stat_core::{parse_container, StatRecord};
use std::cell::RefCell;
use std::rc::Rc;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_hp_modifier_lifecycle() {
    let mut container = StatsContainer::new("player");
    container.add_stat(Stat::new("hp", 100.0)).unwrap();

    container.apply_modifier("hp", StatModifier::additive("sword", 20.0));
    assert!(approx(container.get_current_value("hp").unwrap(), 120.0));

    container.apply_modifier("hp", StatModifier::multiplicative("rage", 0.5));
    assert!(approx(container.get_current_value("hp").unwrap(), 180.0));

    container.apply_modifier("hp", StatModifier::overriding("invulnerable", 999.0, 1));
    assert!(approx(container.get_current_value("hp").unwrap(), 999.0));

    assert!(container.remove_modifier("hp", "invulnerable"));
    assert!(approx(container.get_current_value("hp").unwrap(), 180.0));

    assert!(container.remove_modifier("hp", "sword"));
    assert!(container.remove_modifier("hp", "rage"));
    assert!(approx(container.get_current_value("hp").unwrap(), 100.0));
    assert!(approx(container.get_base_value("hp").unwrap(), 100.0));
}

#[test]
fn test_override_masks_custom_until_removed() {
    let mut container = StatsContainer::new("player");
    container.add_stat(Stat::new("armour", 50.0)).unwrap();

    container.apply_modifier("armour", StatModifier::custom("double", |_, v| v * 2.0));
    assert!(approx(container.get_current_value("armour").unwrap(), 100.0));

    container.apply_modifier("armour", StatModifier::overriding("broken", 0.0, 0));
    container.apply_modifier("armour", StatModifier::overriding("shattered", -10.0, 0));
    assert!(approx(container.get_current_value("armour").unwrap(), 0.0));

    container.remove_modifier("armour", "broken");
    assert!(approx(container.get_current_value("armour").unwrap(), -10.0));

    container.remove_modifier("armour", "shattered");
    assert!(approx(container.get_current_value("armour").unwrap(), 100.0));
}

#[test]
fn test_damage_through_clamp_handler() {
    let mut container = StatsContainer::new("player");
    container.add_stat(Stat::new("hp", 30.0)).unwrap();
    container
        .register_base_value_handler(BaseValueHandler::non_negative("hp"))
        .unwrap();

    container.add_to_base_value("hp", -50.0, false).unwrap();
    assert!(approx(container.get_base_value("hp").unwrap(), 0.0));

    container.set_base_value("hp", -5.0, true).unwrap();
    assert!(approx(container.get_base_value("hp").unwrap(), -5.0));
}

#[test]
fn test_handler_sees_stat_and_container() {
    let mut container = StatsContainer::new("player");
    container.add_stat(Stat::new("max_hp", 120.0)).unwrap();
    container.add_stat(Stat::new("hp", 100.0)).unwrap();
    container.apply_modifier("max_hp", StatModifier::additive("belt", 30.0));

    container
        .register_base_value_handler(BaseValueHandler::new("hp", |stat, value, container| {
            let cap = container.get_current_value("max_hp").unwrap_or(stat.base_value());
            value.min(cap)
        }))
        .unwrap();

    container.set_base_value("hp", 400.0, false).unwrap();
    assert!(approx(container.get_base_value("hp").unwrap(), 150.0));
}

#[test]
fn test_notifications_reach_container_listener() {
    let mut container = StatsContainer::new("player");
    container
        .add_stats(vec![Stat::new("hp", 100.0), Stat::new("mp", 50.0)])
        .unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    container.subscribe_all(move |event| {
        sink.borrow_mut().push(format!(
            "{:?} {} {} -> {} (current {})",
            event.kind,
            event.stat_key,
            event.old_base_value,
            event.new_base_value,
            event.stat.current_value()
        ))
    });

    container.apply_modifier("mp", StatModifier::additive("ring", 10.0));
    container.set_base_value("hp", 90.0, false).unwrap();
    container.remove_modifier("mp", "ring");
    container.apply_modifier("missing", StatModifier::additive("ring", 10.0));

    assert_eq!(
        *log.borrow(),
        vec![
            "ModifierAdded mp 50 -> 50 (current 60)".to_string(),
            "BaseValueChanged hp 100 -> 90 (current 90)".to_string(),
            "ModifierRemoved mp 50 -> 50 (current 50)".to_string(),
        ]
    );
}

#[test]
fn test_snapshot_round_trip_through_json() {
    let mut container = parse_container(
        r#"
id = "save_slot"

[[stats]]
name = "hp"
base = 100

[[stats.modifiers]]
id = "ring"
kind = "additive"
magnitude = 20

[[stats]]
name = "gold"
base = 15
"#,
    )
    .unwrap();

    container.add_to_base_value("gold", 5.0, false).unwrap();
    let json = serde_json::to_string(&container.get_state()).unwrap();

    let mut restored = StatsContainer::new("save_slot");
    let state: StatsContainerState = serde_json::from_str(&json).unwrap();
    restored.apply_state(&state).unwrap();

    assert_eq!(restored.get_state(), container.get_state());
    assert_eq!(
        restored.get_state().stats[1],
        StatRecord { name: "gold".to_string(), base_value: 20.0 }
    );
    // Modifiers are not part of the snapshot
    assert!(approx(restored.get_current_value("hp").unwrap(), 100.0));
    assert!(approx(container.get_current_value("hp").unwrap(), 120.0));
}

#[test]
fn test_errors_are_reported() {
    let mut container = StatsContainer::default();
    container.add_stat(Stat::new("hp", 1.0)).unwrap();

    assert!(matches!(
        container.add_stat(Stat::new("hp", 1.0)),
        Err(StatError::DuplicateStat(_))
    ));
    assert!(matches!(
        container.get_current_value("nope"),
        Err(StatError::NotFound(_))
    ));
    assert!(matches!(
        StatModifier::new("c", ModifierKind::Custom, 0.0, 0, None),
        Err(StatError::MissingCustomFunction(_))
    ));
    assert_eq!(
        container.get_debug_info(),
        "= [STATS<DefaultStats>]\n- hp: 1 (Base: 1)\n"
    );
}

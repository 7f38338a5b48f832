use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;

use tank_versus_cubes::compute::{init_state, tick, TickInput};
use tank_versus_cubes::config::Config;
use tank_versus_cubes::entities::Mode;

#[test]
fn load_partial_file_overrides_tuning() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "tuning": {{ "starting_lives": 9, "boss_health": 5 }}, "extreme": {{ "shot_delay_ms": 50 }} }}"#).unwrap();

    let cfg = Config::load(file.path()).unwrap();
    assert_eq!(cfg.tuning.starting_lives, 9);
    assert_eq!(cfg.extreme.shot_delay_ms, 50);
    // Untouched fields inside a partially given section keep their defaults
    assert_eq!(cfg.extreme.enemy_health, 3);
    assert_eq!(cfg.tuning.enemy_speed, 2);

    let s = init_state(Mode::Extreme { target: 10 }, &cfg);
    assert_eq!(s.lives, 9);
    assert_eq!(s.boss.health, 5);
}

#[test]
fn load_missing_file_names_the_path() {
    let err = Config::load(std::path::Path::new("/nonexistent/tank.json")).unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/tank.json"));
}

#[test]
fn load_rejects_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    assert!(Config::load(file.path()).is_err());
}

#[test]
fn load_rejects_interval_that_overflows_ticks() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "tuning": {{ "boss_fire_interval_secs": 100000000 }} }}"#).unwrap();
    let err = Config::load(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("boss_fire_interval_secs"));
}

#[test]
fn huge_intervals_built_in_code_do_not_break_the_boss_phase() {
    let mut cfg = Config::default();
    cfg.tuning.boss_fire_interval_secs = 100_000_000;
    cfg.tuning.boss_minion_interval_secs = u32::MAX;
    cfg.tuning.minion_fire_phase_secs = u32::MAX;
    cfg.tuning.enemy_spawn_interval_ms = u64::MAX;

    let mut s = init_state(Mode::ScoreRace { target: 10 }, &cfg);
    s.score = 9;
    let mut rng = StdRng::seed_from_u64(3);
    for i in 1..=5 {
        s = tick(&s, &TickInput { now_ms: i * 16, ..TickInput::default() }, &mut rng);
    }
    assert!(s.boss.active);
    assert_eq!(s.boss.shoot_timer, 5);
    assert!(s.enemy_bullets.is_empty());
}

use tank_versus_cubes::compute::init_state;
use tank_versus_cubes::config::Config;
use tank_versus_cubes::entities::*;
use tank_versus_cubes::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state(mode: Mode) -> GameState {
    init_state(mode, &Config::default())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn boss_phase() -> GameState {
    let mut s = make_state(Mode::ScoreRace { target: 10 });
    s.score = 9;
    s.boss.active = true;
    s.boss_spawned = true;
    s.boss.rect.y = 100;
    s
}

// ── enemies ───────────────────────────────────────────────────────────────────

#[test]
fn new_enemy_within_field() {
    let s = make_state(Mode::Infinite);
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let e = new_enemy(&s, &mut rng);
        assert!(e.rect.left() >= 0 && e.rect.right() <= 650);
        assert_eq!(e.rect.y, -50);
        assert_eq!(e.speed, 2);
    }
}

#[test]
fn enemy_timer_fires_once_per_interval() {
    let mut s = make_state(Mode::Infinite);
    let mut rng = seeded_rng();

    s.now_ms = 1_000;
    enemy_timer(&mut s, &mut rng);
    enemy_timer(&mut s, &mut rng);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.next_enemy_spawn_ms, 2_000);

    s.now_ms = 2_010;
    enemy_timer(&mut s, &mut rng);
    assert_eq!(s.enemies.len(), 2);
}

#[test]
fn enemy_timer_skips_missed_periods() {
    let mut s = make_state(Mode::Infinite);
    let mut rng = seeded_rng();
    s.now_ms = 5_500;
    enemy_timer(&mut s, &mut rng);
    enemy_timer(&mut s, &mut rng);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.next_enemy_spawn_ms, 6_500);
}

// ── boss activation ───────────────────────────────────────────────────────────

#[test]
fn boss_never_activates_in_infinite() {
    let mut s = make_state(Mode::Infinite);
    for score in 0..100 {
        s.score = score;
        activate_boss_if_due(&mut s);
        assert!(!s.boss.active);
    }
}

#[test]
fn boss_activation_needs_exact_score() {
    let mut s = make_state(Mode::Extreme { target: 20 });
    s.score = 18;
    activate_boss_if_due(&mut s);
    assert!(!s.boss.active);
    s.score = 20;
    activate_boss_if_due(&mut s);
    assert!(!s.boss.active);
    s.score = 19;
    activate_boss_if_due(&mut s);
    assert!(s.boss.active);
}

#[test]
fn boss_activation_is_idempotent() {
    let mut s = make_state(Mode::ScoreRace { target: 10 });
    s.score = 9;
    activate_boss_if_due(&mut s);
    assert!(s.boss_spawned);

    // Boss gone while the score still reads target - 1: no second boss.
    s.boss.active = false;
    s.enemies.push(new_enemy(&s, &mut seeded_rng()));
    activate_boss_if_due(&mut s);
    assert!(!s.boss.active);
    assert_eq!(s.enemies.len(), 1);
}

// ── boss timers ───────────────────────────────────────────────────────────────

#[test]
fn boss_fires_every_two_seconds() {
    let mut s = boss_phase();
    let mut rng = seeded_rng();
    for _ in 0..119 {
        boss_timers(&mut s, &mut rng);
    }
    assert!(s.enemy_bullets.is_empty());
    boss_timers(&mut s, &mut rng);
    assert_eq!(s.enemy_bullets.len(), 1);
    assert_eq!(s.boss.shoot_timer, 0);

    let shot = &s.enemy_bullets[0];
    assert_eq!(shot.owner, BulletOwner::Boss);
    assert_eq!(shot.damage, 2);
    assert_eq!(shot.size, 20);
    assert_eq!(shot.color, ORANGE);
    assert_eq!(shot.rect(), Rect::new(313, 300, 20, 20));
    // Player centre (325, 615) is straight below the boss centre (325, 200).
    assert_eq!(shot.direction, (0.0, 1.0));
}

#[test]
fn boss_shot_offset_follows_bullet_size() {
    let mut s = boss_phase();
    s.config.tuning.boss_bullet_size = 40;
    let shot = boss_shot(&s);
    // Boss centre x is 325; a 40 px bullet starts 22 px left of it.
    assert_eq!(shot.rect(), Rect::new(303, 300, 40, 40));
}

#[test]
fn boss_spawns_minion_every_five_seconds() {
    let mut s = boss_phase();
    let mut rng = seeded_rng();
    for _ in 0..299 {
        boss_timers(&mut s, &mut rng);
    }
    assert!(s.minions.is_empty());
    boss_timers(&mut s, &mut rng);
    assert_eq!(s.minions.len(), 1);
    assert_eq!(s.boss.spawn_timer, 0);

    let m = &s.minions[0];
    assert_eq!(m.rect.y, s.boss.rect.bottom());
    assert!(m.rect.x >= 50 && m.rect.x <= 600);
    assert_eq!((m.health, m.damage, m.speed), (3, 1, 1));
}

#[test]
fn minion_phase_is_randomised_below_two_seconds() {
    let s = boss_phase();
    let mut rng = seeded_rng();
    let phases: Vec<u32> = (0..100).map(|_| new_minion(&s, &mut rng).shoot_timer).collect();
    assert!(phases.iter().all(|&p| p < 120));
    assert!(phases.iter().any(|&p| p != phases[0]));
}

#[test]
fn seeded_spawns_are_reproducible() {
    let s = boss_phase();
    let a = new_minion(&s, &mut StdRng::seed_from_u64(99));
    let b = new_minion(&s, &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}

// ── minion fire ───────────────────────────────────────────────────────────────

#[test]
fn minion_fires_every_three_seconds_at_player() {
    let s = boss_phase();
    let mut m = Minion {
        rect: Rect::new(305, 300, 40, 40),
        speed: 1,
        damage: 1,
        health: 3,
        max_health: 3,
        shoot_timer: 178,
    };
    let target = s.player.rect.center();

    assert!(minion_fire(&mut m, target, &s).is_none());
    let shot = minion_fire(&mut m, target, &s).expect("due on tick 180");
    assert_eq!(m.shoot_timer, 0);
    assert_eq!(shot.owner, BulletOwner::Minion);
    assert_eq!(shot.damage, 1);
    assert_eq!(shot.size, 6);
    assert_eq!(shot.color, YELLOW);
    assert_eq!(shot.rect(), Rect::new(325, 340, 6, 6));
    assert_eq!(shot.direction, (0.0, 1.0));
}

#[test]
fn aim_from_player_center_is_safe() {
    let s = make_state(Mode::Infinite);
    let c = s.player.rect.center();
    let (dx, dy) = aim_direction(c, c);
    assert!(dx.is_finite() && dy.is_finite());
}

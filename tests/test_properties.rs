use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tank_versus_cubes::collision::{bullets_vs_boss, bullets_vs_enemies};
use tank_versus_cubes::compute::{can_fire, init_state, player_shoot, tick, TickInput};
use tank_versus_cubes::config::Config;
use tank_versus_cubes::entities::*;
use tank_versus_cubes::spawner::aim_direction;

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Infinite),
        (10u32..=75).prop_map(|target| Mode::ScoreRace { target }),
        (10u32..=75).prop_map(|target| Mode::Extreme { target }),
    ]
}

fn inputs_strategy() -> impl Strategy<Value = Vec<(bool, bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 50..400)
}

/// Run a session from `start`, checking `check(prev, next)` after every tick.
fn run(
    start: GameState,
    inputs: &[(bool, bool, bool)],
    seed: u64,
    mut check: impl FnMut(&GameState, &GameState),
) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = start;
    for (i, &(left, right, fire)) in inputs.iter().enumerate() {
        let input = TickInput { left, right, fire, now_ms: (i as u64 + 1) * 16 };
        let next = tick(&state, &input, &mut rng);
        check(&state, &next);
        state = next;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn lives_never_go_up(mode in mode_strategy(), inputs in inputs_strategy(), seed in any::<u64>()) {
        let start = init_state(mode, &Config::default());
        run(start, &inputs, seed, |prev, next| {
            assert!(next.lives <= prev.lives);
        });
    }

    #[test]
    fn session_lost_exactly_when_lives_run_out(
        mode in mode_strategy(),
        inputs in inputs_strategy(),
        seed in any::<u64>(),
        lives in 1i32..=3,
    ) {
        let mut start = init_state(mode, &Config::default());
        start.lives = lives;
        run(start, &inputs, seed, |prev, next| {
            if prev.status != GameStatus::Playing {
                assert_eq!(next.status, prev.status);
                return;
            }
            match next.status {
                GameStatus::Playing => assert!(next.lives > 0),
                GameStatus::Lost => assert!(next.lives <= 0),
                GameStatus::Won => {}
            }
        });
    }

    #[test]
    fn no_enemies_while_boss_is_up(
        target in 10u32..=75,
        extreme in any::<bool>(),
        inputs in inputs_strategy(),
        seed in any::<u64>(),
    ) {
        let mode = if extreme { Mode::Extreme { target } } else { Mode::ScoreRace { target } };
        let mut start = init_state(mode, &Config::default());
        start.score = target - 1;
        start.lives = 1_000;
        run(start, &inputs, seed, |_, next| {
            assert!(next.boss_spawned);
            if next.boss.active {
                assert!(next.enemies.is_empty());
            }
        });
    }

    #[test]
    fn boss_comes_at_most_once(
        target in 10u32..=75,
        inputs in inputs_strategy(),
        seed in any::<u64>(),
    ) {
        let mut start = init_state(Mode::ScoreRace { target }, &Config::default());
        start.score = target - 1;
        start.boss_spawned = true;
        start.lives = 1_000;
        run(start, &inputs, seed, |_, next| {
            assert!(!next.boss.active);
        });
    }

    #[test]
    fn stacked_bullets_cost_one_per_enemy(stack in 1usize..8, health in 1i32..=3) {
        let mut s = init_state(Mode::Infinite, &Config::default());
        s.enemies.push(Enemy { rect: Rect::new(100, 100, 50, 50), health, max_health: health, speed: 2 });
        for i in 0..stack {
            s.bullets.push(Projectile::upward(110 + i as i32, 110, 8, 10.0));
        }
        bullets_vs_enemies(&mut s);
        prop_assert_eq!(s.bullets.len(), stack - 1);
        if health == 1 {
            prop_assert!(s.enemies.is_empty());
            prop_assert_eq!(s.score, 1);
        } else {
            prop_assert_eq!(s.enemies[0].health, health - 1);
            prop_assert_eq!(s.score, 0);
        }
    }

    #[test]
    fn stacked_bullets_cost_one_per_boss_pass(stack in 1usize..8) {
        let mut s = init_state(Mode::ScoreRace { target: 10 }, &Config::default());
        s.boss.active = true;
        s.boss.rect.y = 100;
        for i in 0..stack {
            s.bullets.push(Projectile::upward(300 + i as i32, 150, 8, 10.0));
        }
        bullets_vs_boss(&mut s);
        prop_assert_eq!(s.bullets.len(), stack - 1);
        prop_assert_eq!(s.boss.health, 79);
    }

    #[test]
    fn second_shot_inside_delay_is_rejected(
        extreme in any::<bool>(),
        start_ms in 0u64..100_000,
        gap in 0u64..400,
    ) {
        let mode = if extreme { Mode::Extreme { target: 20 } } else { Mode::ScoreRace { target: 20 } };
        let delay = if extreme { 100 } else { 300 };
        let mut s = init_state(mode, &Config::default());
        s.now_ms = start_ms;
        let mut s = player_shoot(&s);
        prop_assert_eq!(s.bullets.len(), 1);

        s.now_ms = start_ms + gap;
        prop_assert_eq!(can_fire(&s), gap >= delay);
        let expected = if gap >= delay { 2 } else { 1 };
        prop_assert_eq!(player_shoot(&s).bullets.len(), expected);
    }

    #[test]
    fn aim_is_unit_or_zero(ax in -1000i32..1000, ay in -1000i32..1000, bx in -1000i32..1000, by in -1000i32..1000) {
        let (dx, dy) = aim_direction((ax, ay), (bx, by));
        let len = dx.hypot(dy);
        if (ax, ay) == (bx, by) {
            prop_assert_eq!(len, 0.0);
        } else {
            prop_assert!((len - 1.0).abs() < 1e-4);
        }
    }
}

/// Timer- and threshold-driven entity creation.
///
/// Every function here mutates the state it is given; `compute::tick` calls
/// them on its working copy.  Randomness only comes through the injected RNG.

use rand::Rng;

use crate::entities::{
    BulletOwner, Enemy, GameState, Minion, Projectile, Rect, ORANGE, YELLOW,
};
use crate::progression;

/// Unit vector from `from` toward `to`.  Coincident points use a distance
/// of 1, which yields `(0.0, 0.0)` rather than NaN.
pub fn aim_direction(from: (i32, i32), to: (i32, i32)) -> (f32, f32) {
    let dx = (to.0 - from.0) as f32;
    let dy = (to.1 - from.1) as f32;
    let mut dist = dx.hypot(dy);
    if dist == 0.0 {
        dist = 1.0;
    }
    (dx / dist, dy / dist)
}

// ── Enemies ───────────────────────────────────────────────────────────────────

pub fn new_enemy(state: &GameState, rng: &mut impl Rng) -> Enemy {
    let size = state.config.tuning.enemy_size;
    let health = state.rules().enemy_health;
    let x = rng.gen_range(0..=(state.width() - size).max(0));
    Enemy {
        rect: Rect::new(x, -size, size, size),
        health,
        max_health: health,
        speed: state.config.tuning.enemy_speed,
    }
}

/// Once-per-interval enemy timer.  The timer keeps running while the boss
/// is up; it just produces nothing.
pub fn enemy_timer(state: &mut GameState, rng: &mut impl Rng) {
    if state.now_ms < state.next_enemy_spawn_ms {
        return;
    }
    let interval = state.config.tuning.enemy_spawn_interval_ms.max(1);
    state.next_enemy_spawn_ms = state.next_enemy_spawn_ms.saturating_add(interval);
    if state.next_enemy_spawn_ms <= state.now_ms {
        // Skip missed periods instead of bursting after a stall.
        state.next_enemy_spawn_ms = state.now_ms.saturating_add(interval);
    }

    if !state.boss.active {
        let enemy = new_enemy(state, rng);
        log::debug!("enemy spawned at x={} (hp {})", enemy.rect.x, enemy.health);
        state.enemies.push(enemy);
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

/// Bring the boss in when the mode says so.  Clears every regular enemy.
pub fn activate_boss_if_due(state: &mut GameState) {
    if !progression::boss_due(state) {
        return;
    }
    state.boss.active = true;
    state.boss_spawned = true;
    state.enemies.clear();
    log::info!("boss activated at score {}", state.score);
}

/// Aimed shot from the boss's bottom edge, its left edge two pixels left of
/// a centred bullet.
pub fn boss_shot(state: &GameState) -> Projectile {
    let t = &state.config.tuning;
    let boss = &state.boss.rect;
    Projectile {
        x: (boss.center_x() - t.boss_bullet_size / 2 - 2) as f32,
        y: boss.bottom() as f32,
        size: t.boss_bullet_size,
        speed: t.boss_bullet_speed,
        direction: aim_direction(boss.center(), state.player.rect.center()),
        color: ORANGE,
        damage: t.boss_bullet_damage,
        owner: BulletOwner::Boss,
    }
}

/// Advance the boss's minion and fire counters by one tick.
pub fn boss_timers(state: &mut GameState, rng: &mut impl Rng) {
    let minion_every = state.config.tuning.boss_minion_interval_ticks();
    let fire_every = state.config.tuning.boss_fire_interval_ticks();

    state.boss.spawn_timer += 1;
    state.boss.shoot_timer += 1;

    if state.boss.spawn_timer >= minion_every {
        let minion = new_minion(state, rng);
        log::debug!("minion spawned at x={}", minion.rect.x);
        state.minions.push(minion);
        state.boss.spawn_timer = 0;
    }
    if state.boss.shoot_timer >= fire_every {
        let shot = boss_shot(state);
        state.enemy_bullets.push(shot);
        state.boss.shoot_timer = 0;
    }
}

// ── Minions ───────────────────────────────────────────────────────────────────

pub fn new_minion(state: &GameState, rng: &mut impl Rng) -> Minion {
    let t = &state.config.tuning;
    let lo = t.minion_spawn_margin;
    let hi = (state.width() - t.minion_spawn_margin).max(lo);
    let x = rng.gen_range(lo..=hi);
    // Random initial phase so minions don't fire in lockstep.
    let phase = rng.gen_range(0..t.minion_fire_phase_ticks().max(1));
    Minion {
        rect: Rect::new(x, state.boss.rect.bottom(), t.minion_size, t.minion_size),
        speed: t.minion_speed,
        damage: t.minion_damage,
        health: t.minion_health,
        max_health: t.minion_health,
        shoot_timer: phase,
    }
}

/// Tick one minion's fire counter, returning a shot when it is due.
pub fn minion_fire(
    minion: &mut Minion,
    target: (i32, i32),
    state: &GameState,
) -> Option<Projectile> {
    let t = &state.config.tuning;
    minion.shoot_timer += 1;
    if minion.shoot_timer < t.minion_fire_interval_ticks() {
        return None;
    }
    minion.shoot_timer = 0;
    Some(Projectile {
        x: minion.rect.center_x() as f32,
        y: minion.rect.bottom() as f32,
        size: t.minion_bullet_size,
        speed: t.minion_bullet_speed,
        direction: aim_direction(minion.rect.center(), target),
        color: YELLOW,
        damage: minion.damage,
        owner: BulletOwner::Minion,
    })
}

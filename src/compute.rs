/// Game-logic entry points.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.

use rand::Rng;

use crate::collision;
use crate::config::Config;
use crate::entities::{Boss, GameState, GameStatus, Mode, Outcome, Player, Projectile, Rect};
use crate::progression;
use crate::spawner;

/// Everything the frame loop feeds into one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Movement keys currently held.
    pub left: bool,
    pub right: bool,
    /// Fire key went down since the previous tick (edge, not held).
    pub fire: bool,
    /// Milliseconds since the session started.
    pub now_ms: u64,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state for a session.
pub fn init_state(mode: Mode, config: &Config) -> GameState {
    let t = &config.tuning;
    let (width, height) = (config.field.width, config.field.height);

    log::info!(
        "new session: {} mode, target {:?}, field {}x{}",
        mode.label(),
        mode.target(),
        width,
        height
    );

    GameState {
        player: Player {
            rect: Rect::new(
                width / 2 - t.player_size / 2,
                height - t.player_size - t.player_floor_gap,
                t.player_size,
                t.player_size,
            ),
            speed: t.player_speed,
        },
        enemies: Vec::new(),
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        minions: Vec::new(),
        boss: Boss {
            rect: Rect::new(width / 2 - t.boss_size / 2, -t.boss_size, t.boss_size, t.boss_size),
            health: t.boss_health,
            max_health: t.boss_health,
            speed: t.boss_speed,
            active: false,
            spawn_timer: 0,
            shoot_timer: 0,
        },
        boss_spawned: false,
        score: 0,
        lives: t.starting_lives,
        mode,
        status: GameStatus::Playing,
        frame: 0,
        now_ms: 0,
        last_shot_ms: None,
        next_enemy_spawn_ms: t.enemy_spawn_interval_ms,
        config: config.clone(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player(state: &GameState, left: bool, right: bool) -> GameState {
    let mut next = state.clone();
    next.player.step(left, right, state.width());
    next
}

/// Whether the gun has cooled down at the state's current clock.
pub fn can_fire(state: &GameState) -> bool {
    if state.status != GameStatus::Playing {
        return false;
    }
    match state.last_shot_ms {
        None => true,
        Some(last) => state.now_ms.saturating_sub(last) >= state.rules().shot_delay_ms,
    }
}

/// Fire one bullet from the player's top-centre, rate-limited by the mode's
/// shot delay.  A rejected shot returns the state unchanged.
pub fn player_shoot(state: &GameState) -> GameState {
    if !can_fire(state) {
        return state.clone();
    }
    let size = state.config.tuning.player_bullet_size;
    let p = &state.player.rect;
    let bullet = Projectile::upward(p.center_x() - size / 2, p.top(), size, state.rules().bullet_speed);

    let mut next = state.clone();
    next.bullets.push(bullet);
    next.last_shot_ms = Some(state.now_ms);
    next
}

// ── Per-frame tick (nearly pure, RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A state that has already reached a terminal status is returned as-is.
pub fn tick(state: &GameState, input: &TickInput, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;
    next.now_ms = input.now_ms.max(state.now_ms);

    // ── 1. Timers & fire request ─────────────────────────────────────────────
    spawner::enemy_timer(&mut next, rng);
    if input.fire {
        next = player_shoot(&next);
    }

    // ── 2. Player movement ───────────────────────────────────────────────────
    next = move_player(&next, input.left, input.right);

    // ── 3. Boss activation ───────────────────────────────────────────────────
    spawner::activate_boss_if_due(&mut next);

    // ── 4. Enemies ───────────────────────────────────────────────────────────
    for enemy in &mut next.enemies {
        enemy.advance();
    }
    collision::enemies_vs_player(&mut next);

    // ── 5. Player bullets ────────────────────────────────────────────────────
    for bullet in &mut next.bullets {
        bullet.advance();
    }
    next.bullets.retain(|b| b.rect().bottom() >= 0);

    // ── 6. Regular wave or boss phase ────────────────────────────────────────
    if next.boss.active {
        let hover_y = next.config.tuning.boss_hover_y;
        next.boss.advance(hover_y);
        spawner::boss_timers(&mut next, rng);
    } else {
        collision::bullets_vs_enemies(&mut next);
    }

    // ── 7. Boss hits ─────────────────────────────────────────────────────────
    if collision::bullets_vs_boss(&mut next) && progression::target_reached(&next) {
        progression::finish(&mut next, Outcome::Won);
        return next;
    }

    // ── 8. Minions ───────────────────────────────────────────────────────────
    let target = next.player.rect.center();
    let minions = std::mem::take(&mut next.minions);
    for mut minion in minions {
        minion.advance();
        if let Some(shot) = spawner::minion_fire(&mut minion, target, &next) {
            next.enemy_bullets.push(shot);
        }
        // Both checks run even if the first one already removed the minion.
        let shot_down = collision::bullets_vs_minion(&mut next, &mut minion);
        let got_through = collision::minion_vs_player(&mut next, &minion);
        if !shot_down && !got_through {
            next.minions.push(minion);
        }
    }

    // ── 9. Hostile bullets ───────────────────────────────────────────────────
    for bullet in &mut next.enemy_bullets {
        bullet.advance();
    }
    collision::enemy_bullets_vs_player(&mut next);

    // ── 10. Loss ─────────────────────────────────────────────────────────────
    if progression::out_of_lives(&next) {
        progression::finish(&mut next, Outcome::Lost);
    }

    next
}

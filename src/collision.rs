/// Collision & damage resolution.
///
/// Each pass assumes movement for the tick has already happened.  Removal
/// is immediate: an entity taken out of its collection here is gone for the
/// rest of the tick.
///
/// Tie-break shared by every "bullets vs target" pass: the target scans the
/// live player bullets in container order and consumes only the first one
/// that overlaps.  Other overlapping bullets survive until the next tick.

use crate::entities::{GameState, Minion, Projectile, Rect};

/// Index of the first player bullet overlapping `target`.
fn first_hit(bullets: &[Projectile], target: &Rect) -> Option<usize> {
    bullets.iter().position(|b| b.rect().intersects(target))
}

/// Enemies that touch the player or fall past the bottom edge cost a life.
pub fn enemies_vs_player(state: &mut GameState) {
    let player = state.player.rect;
    let height = state.height();
    let before = state.enemies.len();
    state
        .enemies
        .retain(|e| !(e.rect.intersects(&player) || e.rect.top() > height));
    let lost = (before - state.enemies.len()) as i32;
    if lost > 0 {
        state.lives -= lost;
        log::debug!("{} enemy(ies) got through, lives now {}", lost, state.lives);
    }
}

/// Player bullets against regular enemies.  Does nothing while the boss is up.
pub fn bullets_vs_enemies(state: &mut GameState) {
    if state.boss.active {
        return;
    }
    let mut i = 0;
    while i < state.enemies.len() {
        let Some(bi) = first_hit(&state.bullets, &state.enemies[i].rect) else {
            i += 1;
            continue;
        };
        state.bullets.remove(bi);
        let enemy = &mut state.enemies[i];
        enemy.health -= 1;
        if enemy.health <= 0 {
            state.enemies.remove(i);
            state.score += 1;
        } else {
            i += 1;
        }
    }
}

/// Player bullets against the boss.  Returns `true` on the tick the boss dies.
pub fn bullets_vs_boss(state: &mut GameState) -> bool {
    if !state.boss.active {
        return false;
    }
    let Some(bi) = first_hit(&state.bullets, &state.boss.rect) else {
        return false;
    };
    state.bullets.remove(bi);
    state.boss.health -= 1;
    if state.boss.health > 0 {
        return false;
    }
    state.boss.active = false;
    state.score += 1;
    log::info!("boss defeated, score {}", state.score);
    true
}

/// Player bullets against one minion.  The minion must already be out of
/// `state.minions`; returns `true` when it was shot down (score applied).
pub fn bullets_vs_minion(state: &mut GameState, minion: &mut Minion) -> bool {
    let Some(bi) = first_hit(&state.bullets, &minion.rect) else {
        return false;
    };
    state.bullets.remove(bi);
    minion.health -= 1;
    if minion.health <= 0 {
        state.score += 1;
        return true;
    }
    false
}

/// A minion touching the player or reaching the bottom edge costs a life.
/// Returns `true` when that happened.
pub fn minion_vs_player(state: &mut GameState, minion: &Minion) -> bool {
    if minion.rect.intersects(&state.player.rect) || minion.rect.bottom() >= state.height() {
        state.lives -= 1;
        log::debug!("minion got through, lives now {}", state.lives);
        return true;
    }
    false
}

/// Hostile bullets: a hit costs `damage` lives, leaving the field removes
/// the bullet harmlessly.
pub fn enemy_bullets_vs_player(state: &mut GameState) {
    let player = state.player.rect;
    let (width, height) = (state.width(), state.height());
    let mut damage = 0;
    state.enemy_bullets.retain(|b| {
        let r = b.rect();
        if r.intersects(&player) {
            damage += b.damage;
            return false;
        }
        !(r.top() > height || r.bottom() < 0 || r.left() < 0 || r.right() > width)
    });
    if damage > 0 {
        state.lives -= damage;
        log::debug!("player hit for {}, lives now {}", damage, state.lives);
    }
}

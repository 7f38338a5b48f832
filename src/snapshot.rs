/// Read-only view of a tick, handed to whatever draws the game.

use crate::entities::{
    BulletOwner, GameState, Rect, Rgb, BLUE, DARK_RED, GREEN, RED,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
    Minion,
    PlayerBullet,
    BossBullet,
    MinionBullet,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntitySnapshot {
    pub kind: EntityKind,
    pub rect: Rect,
    pub color: Rgb,
    /// `health / max_health`, or `None` for kinds without health or whose
    /// bar is not shown (single-hit enemies).
    pub health_ratio: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudSnapshot {
    pub score: u32,
    pub lives: i32,
    pub target: Option<u32>,
    /// `(health, max_health)` while the boss is active.
    pub boss_health: Option<(i32, i32)>,
}

fn ratio(health: i32, max: i32) -> f32 {
    if max <= 0 {
        0.0
    } else {
        (health.max(0) as f32 / max as f32).min(1.0)
    }
}

/// Every live entity in draw order: player, enemies, player bullets, hostile
/// bullets, minions, boss.
pub fn entities(state: &GameState) -> Vec<EntitySnapshot> {
    let mut out = Vec::with_capacity(
        2 + state.enemies.len()
            + state.bullets.len()
            + state.enemy_bullets.len()
            + state.minions.len(),
    );

    out.push(EntitySnapshot {
        kind: EntityKind::Player,
        rect: state.player.rect,
        color: GREEN,
        health_ratio: None,
    });

    for e in &state.enemies {
        out.push(EntitySnapshot {
            kind: EntityKind::Enemy,
            rect: e.rect,
            color: RED,
            health_ratio: (e.max_health > 1).then(|| ratio(e.health, e.max_health)),
        });
    }

    for b in state.bullets.iter().chain(&state.enemy_bullets) {
        let kind = match b.owner {
            BulletOwner::Player => EntityKind::PlayerBullet,
            BulletOwner::Boss => EntityKind::BossBullet,
            BulletOwner::Minion => EntityKind::MinionBullet,
        };
        out.push(EntitySnapshot { kind, rect: b.rect(), color: b.color, health_ratio: None });
    }

    for m in &state.minions {
        out.push(EntitySnapshot {
            kind: EntityKind::Minion,
            rect: m.rect,
            color: BLUE,
            health_ratio: Some(ratio(m.health, m.max_health)),
        });
    }

    if state.boss.active {
        out.push(EntitySnapshot {
            kind: EntityKind::Boss,
            rect: state.boss.rect,
            color: DARK_RED,
            health_ratio: Some(ratio(state.boss.health, state.boss.max_health)),
        });
    }

    out
}

pub fn hud(state: &GameState) -> HudSnapshot {
    HudSnapshot {
        score: state.score,
        lives: state.lives,
        target: state.mode.target(),
        boss_health: state
            .boss
            .active
            .then_some((state.boss.health, state.boss.max_health)),
    }
}

/// Mode rules: when the boss shows up, and when a session is over.

use crate::entities::{GameState, GameStatus, Outcome, SessionEnd};

/// True when a targeted mode sits exactly one point below its target and
/// the boss has not appeared yet this session.
pub fn boss_due(state: &GameState) -> bool {
    match state.mode.target() {
        Some(target) => !state.boss_spawned && state.score + 1 == target,
        None => false,
    }
}

/// Checked after the boss dies.
pub fn target_reached(state: &GameState) -> bool {
    state.mode.target().is_some_and(|target| state.score >= target)
}

pub fn out_of_lives(state: &GameState) -> bool {
    state.lives <= 0
}

/// Freeze the session in a terminal state.  Only the first call has effect.
pub fn finish(state: &mut GameState, outcome: Outcome) {
    if state.status != GameStatus::Playing {
        return;
    }
    state.status = match outcome {
        Outcome::Won => GameStatus::Won,
        Outcome::Lost => GameStatus::Lost,
    };
    log::info!(
        "session over: {:?} with score {} ({} mode, frame {})",
        outcome,
        state.score,
        state.mode.label(),
        state.frame
    );
}

/// The terminal event, once the session has one.
pub fn session_end(state: &GameState) -> Option<SessionEnd> {
    let outcome = match state.status {
        GameStatus::Playing => return None,
        GameStatus::Won => Outcome::Won,
        GameStatus::Lost => Outcome::Lost,
    };
    Some(SessionEnd { outcome, score: state.score })
}

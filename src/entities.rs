/// All game entity types: plain data plus each kind's own movement rule.
///
/// Movement methods only touch `self`; anything involving two entities
/// (collisions, spawning, scoring) lives in the other modules.

use crate::config::Config;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Integer pixel rectangle, origin top-left, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> (i32, i32) {
        (self.center_x(), self.center_y())
    }

    /// Overlap test.  Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Colour hint handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const RED: Rgb = Rgb(200, 0, 0);
pub const GREEN: Rgb = Rgb(0, 200, 0);
pub const BLUE: Rgb = Rgb(0, 100, 255);
pub const DARK_RED: Rgb = Rgb(150, 0, 0);
pub const ORANGE: Rgb = Rgb(255, 100, 0);
pub const YELLOW: Rgb = Rgb(255, 255, 0);

// ── Modes & status ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// No boss, no win condition.
    Infinite,
    /// Boss at `target - 1`, beating it wins.
    ScoreRace { target: u32 },
    /// Same as `ScoreRace` with tougher enemies and a faster gun.
    Extreme { target: u32 },
}

impl Mode {
    pub fn target(&self) -> Option<u32> {
        match self {
            Mode::Infinite => None,
            Mode::ScoreRace { target } | Mode::Extreme { target } => Some(*target),
        }
    }

    pub fn is_extreme(&self) -> bool {
        matches!(self, Mode::Extreme { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Infinite => "INFINITE",
            Mode::ScoreRace { .. } => "SCORE",
            Mode::Extreme { .. } => "EXTREME",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Emitted once when a session reaches a terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionEnd {
    pub outcome: Outcome,
    pub score: u32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Boss,
    Minion,
}

/// A bullet of any owner.  Position is kept in fractional pixels so aimed
/// shots travel along their true angle; `rect()` snaps it for collisions.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub size: i32,
    pub speed: f32,
    /// Unit vector fixed at creation.
    pub direction: (f32, f32),
    pub color: Rgb,
    pub damage: i32,
    pub owner: BulletOwner,
}

impl Projectile {
    /// A player bullet travelling straight up.
    pub fn upward(x: i32, y: i32, size: i32, speed: f32) -> Self {
        Self {
            x: x as f32,
            y: y as f32,
            size,
            speed,
            direction: (0.0, -1.0),
            color: WHITE,
            damage: 1,
            owner: BulletOwner::Player,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x.floor() as i32, self.y.floor() as i32, self.size, self.size)
    }

    pub fn advance(&mut self) {
        self.x += self.direction.0 * self.speed;
        self.y += self.direction.1 * self.speed;
    }
}

// ── Player & hostiles ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub speed: i32,
}

impl Player {
    /// Shift horizontally by `speed` in each requested direction, kept
    /// inside `[0, field_width]`.
    pub fn step(&mut self, left: bool, right: bool, field_width: i32) {
        if left {
            self.rect.x = (self.rect.x - self.speed).max(0);
        }
        if right {
            self.rect.x = (self.rect.x + self.speed).min(field_width - self.rect.w);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    pub speed: i32,
}

impl Enemy {
    pub fn advance(&mut self) {
        self.rect.y += self.speed;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    pub speed: i32,
    pub active: bool,
    /// Ticks since the last minion spawn.
    pub spawn_timer: u32,
    /// Ticks since the last shot.
    pub shoot_timer: u32,
}

impl Boss {
    /// Descend until the top edge reaches `hover_y`, then hold.
    pub fn advance(&mut self, hover_y: i32) {
        if self.rect.top() < hover_y {
            self.rect.y += self.speed;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Minion {
    pub rect: Rect,
    pub speed: i32,
    pub damage: i32,
    pub health: i32,
    pub max_health: i32,
    pub shoot_timer: u32,
}

impl Minion {
    pub fn advance(&mut self) {
        self.rect.y += self.speed;
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so the update functions in
/// `compute` can return a new copy without mutating their input.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Player bullets.
    pub bullets: Vec<Projectile>,
    /// Boss and minion bullets.
    pub enemy_bullets: Vec<Projectile>,
    pub minions: Vec<Minion>,
    pub boss: Boss,
    /// Set the first time the boss activates; never cleared.
    pub boss_spawned: bool,
    pub score: u32,
    pub lives: i32,
    pub mode: Mode,
    pub status: GameStatus,
    pub frame: u64,
    /// Session clock as of the last tick, in milliseconds.
    pub now_ms: u64,
    pub last_shot_ms: Option<u64>,
    pub next_enemy_spawn_ms: u64,
    pub config: Config,
}

impl GameState {
    pub fn width(&self) -> i32 {
        self.config.field.width
    }

    pub fn height(&self) -> i32 {
        self.config.field.height
    }

    /// The rule set in force for this session's mode.
    pub fn rules(&self) -> &crate::config::ModeRules {
        if self.mode.is_extreme() {
            &self.config.extreme
        } else {
            &self.config.normal
        }
    }
}

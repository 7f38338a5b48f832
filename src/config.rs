/// Tuning tables: every number the simulation reads lives here.
///
/// `Config::default()` reproduces the stock game.  A JSON file may override
/// any subset of fields; missing fields fall back to their defaults.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// Fixed simulation rate.  Per-second timers are expressed in ticks of this.
pub const TICK_RATE: u32 = 60;

/// Longest period any per-second timer may be configured to.
pub const MAX_INTERVAL_SECS: u32 = 3600;

/// Lowest and highest target score the mode selection accepts.
pub const TARGET_MIN: u32 = 10;
pub const TARGET_MAX: u32 = 75;
pub const TARGET_DEFAULT: u32 = 20;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self { width: 650, height: 650 }
    }
}

/// Per-mode rule set.  Infinite and score modes share `normal`.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeRules {
    pub enemy_health: i32,
    pub bullet_speed: f32,
    pub shot_delay_ms: u64,
}

impl ModeRules {
    pub fn normal() -> Self {
        Self { enemy_health: 1, bullet_speed: 10.0, shot_delay_ms: 300 }
    }

    pub fn extreme() -> Self {
        Self { enemy_health: 3, bullet_speed: 15.0, shot_delay_ms: 100 }
    }
}

/// A rule set as written in a config file.  Missing fields fall back to
/// the base rules of the section they appear in, not to `normal`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct ModeOverrides {
    enemy_health: Option<i32>,
    bullet_speed: Option<f32>,
    shot_delay_ms: Option<u64>,
}

impl ModeOverrides {
    fn over(self, base: ModeRules) -> ModeRules {
        ModeRules {
            enemy_health: self.enemy_health.unwrap_or(base.enemy_health),
            bullet_speed: self.bullet_speed.unwrap_or(base.bullet_speed),
            shot_delay_ms: self.shot_delay_ms.unwrap_or(base.shot_delay_ms),
        }
    }
}

/// Sizes, speeds, health pools and timer periods of every entity kind.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EntityTuning {
    pub starting_lives: i32,

    pub player_size: i32,
    pub player_speed: i32,
    /// Gap between the player's bottom edge and the field's bottom edge.
    pub player_floor_gap: i32,
    pub player_bullet_size: i32,

    pub enemy_size: i32,
    pub enemy_speed: i32,
    pub enemy_spawn_interval_ms: u64,

    pub boss_size: i32,
    pub boss_speed: i32,
    pub boss_health: i32,
    /// The boss stops descending once its top edge reaches this row.
    pub boss_hover_y: i32,
    pub boss_minion_interval_secs: u32,
    pub boss_fire_interval_secs: u32,
    pub boss_bullet_size: i32,
    pub boss_bullet_speed: f32,
    pub boss_bullet_damage: i32,

    pub minion_size: i32,
    pub minion_speed: i32,
    pub minion_health: i32,
    pub minion_damage: i32,
    /// Minions spawn with their left edge in `[margin, width - margin]`.
    pub minion_spawn_margin: i32,
    pub minion_fire_interval_secs: u32,
    /// A new minion's fire counter starts at a random tick below this span.
    pub minion_fire_phase_secs: u32,
    pub minion_bullet_size: i32,
    pub minion_bullet_speed: f32,
}

impl Default for EntityTuning {
    fn default() -> Self {
        Self {
            starting_lives: 5,

            player_size: 50,
            player_speed: 7,
            player_floor_gap: 10,
            player_bullet_size: 8,

            enemy_size: 50,
            enemy_speed: 2,
            enemy_spawn_interval_ms: 1000,

            boss_size: 200,
            boss_speed: 1,
            boss_health: 80,
            boss_hover_y: 100,
            boss_minion_interval_secs: 5,
            boss_fire_interval_secs: 2,
            boss_bullet_size: 20,
            boss_bullet_speed: 5.0,
            boss_bullet_damage: 2,

            minion_size: 40,
            minion_speed: 1,
            minion_health: 3,
            minion_damage: 1,
            minion_spawn_margin: 50,
            minion_fire_interval_secs: 3,
            minion_fire_phase_secs: 2,
            minion_bullet_size: 6,
            minion_bullet_speed: 5.0,
        }
    }
}

impl EntityTuning {
    pub fn boss_minion_interval_ticks(&self) -> u32 {
        self.boss_minion_interval_secs.saturating_mul(TICK_RATE)
    }

    pub fn boss_fire_interval_ticks(&self) -> u32 {
        self.boss_fire_interval_secs.saturating_mul(TICK_RATE)
    }

    pub fn minion_fire_interval_ticks(&self) -> u32 {
        self.minion_fire_interval_secs.saturating_mul(TICK_RATE)
    }

    pub fn minion_fire_phase_ticks(&self) -> u32 {
        self.minion_fire_phase_secs.saturating_mul(TICK_RATE)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawConfig")]
pub struct Config {
    pub field: FieldConfig,
    pub normal: ModeRules,
    pub extreme: ModeRules,
    pub tuning: EntityTuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            normal: ModeRules::normal(),
            extreme: ModeRules::extreme(),
            tuning: EntityTuning::default(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    field: FieldConfig,
    normal: ModeOverrides,
    extreme: ModeOverrides,
    tuning: EntityTuning,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            field: raw.field,
            normal: raw.normal.over(ModeRules::normal()),
            extreme: raw.extreme.over(ModeRules::extreme()),
            tuning: raw.tuning,
        }
    }
}

impl Config {
    /// Read a (possibly partial) JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let t = &self.tuning;
        ensure!(
            self.field.width > 0 && self.field.height > 0,
            "field must be at least 1x1, got {}x{}",
            self.field.width,
            self.field.height
        );
        for (name, secs) in [
            ("boss_minion_interval_secs", t.boss_minion_interval_secs),
            ("boss_fire_interval_secs", t.boss_fire_interval_secs),
            ("minion_fire_interval_secs", t.minion_fire_interval_secs),
            ("minion_fire_phase_secs", t.minion_fire_phase_secs),
        ] {
            ensure!(
                secs <= MAX_INTERVAL_SECS,
                "{} is {}, above the {} s limit",
                name,
                secs,
                MAX_INTERVAL_SECS
            );
        }
        ensure!(
            t.enemy_spawn_interval_ms <= MAX_INTERVAL_SECS as u64 * 1000,
            "enemy_spawn_interval_ms is {}, above the {} s limit",
            t.enemy_spawn_interval_ms,
            MAX_INTERVAL_SECS
        );
        Ok(())
    }
}

/// Clamp a slider/CLI value into the accepted target range.
pub fn clamp_target(target: u32) -> u32 {
    target.clamp(TARGET_MIN, TARGET_MAX)
}

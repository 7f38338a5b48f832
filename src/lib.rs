//! Tank versus cubes: the simulation core.
//!
//! - `entities`: entity data and per-kind movement
//! - `config`: tuning tables, JSON-loadable
//! - `spawner`: timed and threshold spawns, aimed shots
//! - `collision`: hit resolution, score and life deltas
//! - `progression`: boss trigger and win/lose transitions
//! - `compute`: session construction and the per-frame `tick`
//! - `snapshot`: read-only view for a renderer
//!
//! Nothing here touches the terminal; the binary owns all I/O.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod progression;
pub mod snapshot;
pub mod spawner;

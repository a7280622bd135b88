//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only, owned by the session
//! - No rendering or platform dependencies
//!
//! The embedder samples input into a `TickInput`, calls `tick` once per
//! frame, and reads fighter state back for display.

pub mod collision;
pub mod policy;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{damage_against, resolve_hit};
pub use policy::{PolicyConfig, PolicyIntent};
pub use rect::Rect;
pub use state::{
    ActiveAttack, AttackKind, ControlSource, Facing, Fighter, MatchPhase, MatchState, Outcome,
};
pub use tick::{FighterIntent, TickInput, tick};

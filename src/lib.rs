//! Stick Duel - a two-fighter arena brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, combat, opponent policy)
//! - `settings`: Data-driven tunables with JSON persistence
//!
//! Rendering and input wiring live in the embedder; the library exposes the
//! per-tick update (`sim::tick`) and read-only fighter state.

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
///
/// All rates are per simulation tick. One tick is one displayed frame; the
/// simulation does no variable-timestep compensation.
pub mod consts {
    /// Simulation tick rate (matches display refresh)
    pub const TICK_HZ: u32 = 60;

    /// Arena dimensions (world pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    /// Arena floor line - fighter bottom edges rest here
    pub const ARENA_FLOOR: f32 = 400.0;

    /// Fighter body extents
    pub const FIGHTER_WIDTH: f32 = 50.0;
    pub const FIGHTER_HEIGHT: f32 = 100.0;

    /// Starting positions (human left, opponent right, facing each other)
    pub const HUMAN_START_X: f32 = 100.0;
    pub const OPPONENT_START_X: f32 = 650.0;
    pub const START_Y: f32 = 200.0;

    /// Gravity acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Jump launch velocity (negative = up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Stamina cost deducted once at jump launch
    pub const JUMP_STAMINA_COST: f32 = 10.0;

    /// Default horizontal speed (pixels/tick), tunable via `Settings`
    pub const DEFAULT_MOVE_SPEED: f32 = 3.0;

    /// Health and stamina gauge bounds
    pub const GAUGE_MAX: f32 = 100.0;
    /// Stamina drained per tick while blocking on the ground
    pub const BLOCK_STAMINA_DRAIN: f32 = 0.5;
    /// Stamina regained per tick while grounded and not blocking
    pub const STAMINA_REGEN: f32 = 0.2;

    /// Damage dealt by an unblocked hit
    pub const BASE_DAMAGE: f32 = 10.0;

    /// Attack hitbox stays active this many ticks (200 ms)
    pub const ATTACK_ACTIVE_TICKS: u32 = 12;
    /// Punch cooldown (500 ms)
    pub const PUNCH_COOLDOWN_TICKS: u64 = 30;
    /// Kick cooldown (800 ms) - bigger hitbox, slower recovery
    pub const KICK_COOLDOWN_TICKS: u64 = 48;
}

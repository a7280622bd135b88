//! Fight state and core simulation types
//!
//! Both fighters and the session that owns them live here. Everything needed
//! to replay a match deterministically (fighters, tick counter, RNG) is part
//! of `MatchState`; there are no module-level globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::policy::PolicyConfig;
use super::rect::Rect;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Pre-session, waiting for start
    Idle,
    /// Active gameplay
    Running,
    /// A fighter's health reached zero; state is frozen
    Over,
}

/// Who won the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    HumanWins,
    OpponentWins,
    /// Both fighters hit zero health on the same tick
    Draw,
}

/// Which way a fighter faces (attack side and draw mirroring)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// Where a fighter's per-tick inputs come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlSource {
    /// Sampled keyboard state
    Human,
    /// Opponent decision policy
    Policy,
}

/// Attack varieties with per-kind hitbox geometry and cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    Punch,
    Kick,
}

impl AttackKind {
    /// Hitbox extents (width, height)
    pub fn hitbox_size(&self) -> (f32, f32) {
        match self {
            AttackKind::Punch => (50.0, 20.0),
            AttackKind::Kick => (70.0, 30.0),
        }
    }

    /// Vertical hitbox offset from the fighter's top edge
    ///
    /// Punches land at torso height, kicks at the lower body.
    pub fn vertical_offset(&self) -> f32 {
        match self {
            AttackKind::Punch => 0.0,
            AttackKind::Kick => FIGHTER_HEIGHT / 2.0,
        }
    }

    /// Minimum ticks between attack activations (shared clock per fighter)
    pub fn cooldown_ticks(&self) -> u64 {
        match self {
            AttackKind::Punch => PUNCH_COOLDOWN_TICKS,
            AttackKind::Kick => KICK_COOLDOWN_TICKS,
        }
    }
}

/// A strike in its active window
///
/// The hitbox is computed once at activation and does not follow the fighter
/// afterwards; a fighter can walk out from under its own extended limb.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActiveAttack {
    pub kind: AttackKind,
    pub hitbox: Rect,
    /// Remaining active ticks; the attack expires when this reaches zero
    pub ticks_left: u32,
}

/// One of the two combatants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    /// Top-left corner of the body rect
    pub pos: Vec2,
    /// Velocity (pixels/tick)
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    /// Health gauge, 0..=100
    pub health: f32,
    /// Stamina gauge, 0..=100
    pub stamina: f32,
    /// True while off the ground due to a jump
    pub airborne: bool,
    pub facing: Facing,
    /// True only while block is held and stamina remains
    pub blocking: bool,
    /// Present exactly during an attack's active window
    pub attack: Option<ActiveAttack>,
    /// Tick of the most recent attack start, for cooldown gating
    pub last_attack_tick: Option<u64>,
    pub control: ControlSource,
    /// True while moving horizontally on the ground
    pub walking: bool,
    /// Walk-cycle counter for leg animation, reset when idle
    pub walk_frame: u32,
}

impl Fighter {
    pub fn new(x: f32, y: f32, control: ControlSource, facing: Facing) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            width: FIGHTER_WIDTH,
            height: FIGHTER_HEIGHT,
            health: GAUGE_MAX,
            stamina: GAUGE_MAX,
            airborne: false,
            facing,
            blocking: false,
            attack: None,
            last_attack_tick: None,
            control,
            walking: false,
            walk_frame: 0,
        }
    }

    /// Body rectangle for collision and rendering
    pub fn body_rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Whether an attack's active window is open
    #[inline]
    pub fn is_attacking(&self) -> bool {
        self.attack.is_some()
    }

    /// Whether `kind` may be activated at tick `now` (shared cooldown clock)
    pub fn cooldown_ready(&self, kind: AttackKind, now: u64) -> bool {
        match self.last_attack_tick {
            Some(last) => now - last > kind.cooldown_ticks(),
            None => true,
        }
    }

    /// Begin an attack, spawning its hitbox at the leading edge
    ///
    /// Silently denied while blocking or within the cooldown window; returns
    /// whether the attack actually started.
    pub fn start_attack(&mut self, kind: AttackKind, now: u64) -> bool {
        if self.blocking || !self.cooldown_ready(kind, now) {
            return false;
        }

        let (w, h) = kind.hitbox_size();
        let y = self.pos.y + kind.vertical_offset();
        let x = match self.facing {
            Facing::Right => self.pos.x + self.width,
            Facing::Left => self.pos.x - w,
        };

        self.attack = Some(ActiveAttack {
            kind,
            hitbox: Rect::new(x, y, w, h),
            ticks_left: ATTACK_ACTIVE_TICKS,
        });
        self.last_attack_tick = Some(now);
        log::debug!("{:?} fighter starts {:?} at tick {}", self.control, kind, now);
        true
    }

    /// Count down the active window, clearing the attack at expiry
    pub fn advance_attack_window(&mut self) {
        if let Some(ref mut attack) = self.attack {
            attack.ticks_left = attack.ticks_left.saturating_sub(1);
            if attack.ticks_left == 0 {
                self.attack = None;
            }
        }
    }
}

/// Complete session state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// RNG driving the opponent policy's random draws
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: MatchPhase,
    /// Set exactly once, on the transition to `Over`
    pub outcome: Option<Outcome>,
    /// Horizontal speed applied to both fighters (pixels/tick)
    pub movement_speed: f32,
    /// Opponent decision thresholds
    pub policy: PolicyConfig,
    pub human: Fighter,
    pub opponent: Fighter,
}

impl MatchState {
    /// Create a session in `Idle` with both fighters at starting positions
    pub fn new(seed: u64) -> Self {
        let (human, opponent) = Self::spawn_fighters();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: MatchPhase::Idle,
            outcome: None,
            movement_speed: DEFAULT_MOVE_SPEED,
            policy: PolicyConfig::default(),
            human,
            opponent,
        }
    }

    fn spawn_fighters() -> (Fighter, Fighter) {
        let human = Fighter::new(HUMAN_START_X, START_Y, ControlSource::Human, Facing::Right);
        let opponent = Fighter::new(
            OPPONENT_START_X,
            START_Y,
            ControlSource::Policy,
            Facing::Left,
        );
        (human, opponent)
    }

    /// Enter `Running` from `Idle`; no-op in any other phase
    pub fn start(&mut self) {
        if self.phase == MatchPhase::Idle {
            self.phase = MatchPhase::Running;
            log::info!("match started (seed {})", self.seed);
        }
    }

    /// Discard both fighters and begin a fresh session
    ///
    /// Clears all attack and cooldown state; valid from any phase.
    pub fn restart(&mut self, seed: u64) {
        let (human, opponent) = Self::spawn_fighters();
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.time_ticks = 0;
        self.phase = MatchPhase::Running;
        self.outcome = None;
        self.human = human;
        self.opponent = opponent;
        log::info!("match restarted (seed {})", seed);
    }

    /// Update the shared movement speed; takes effect on the next tick
    pub fn set_movement_speed(&mut self, speed: f32) {
        self.movement_speed = speed;
    }
}

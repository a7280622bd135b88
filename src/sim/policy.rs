//! Opponent decision policy
//!
//! A stateless reaction function: each tick it looks at the two fighters and
//! produces an intent for the policy-controlled one. All randomness comes
//! from the RNG handed in by the caller, so a seeded session replays the
//! same decisions.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{AttackKind, Fighter};

/// Distance thresholds and probabilities driving the opponent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Close the gap while the human is more than this far to the left
    pub approach_left: f32,
    /// Close the gap while the human is more than this far to the right
    pub approach_right: f32,
    /// Attack when within this horizontal distance
    pub attack_range: f32,
    /// React to a human attack within this distance
    pub block_react_range: f32,
    /// Chance of blocking on each tick the reaction condition holds
    pub block_chance: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            approach_left: 150.0,
            approach_right: 150.0,
            attack_range: 120.0,
            block_react_range: 150.0,
            block_chance: 0.5,
        }
    }
}

/// What the opponent wants to do this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyIntent {
    /// Horizontal movement: -1 left, 0 hold, 1 right
    pub move_dir: i8,
    /// Attack to launch, already vetted against the cooldown clock
    pub attack: Option<AttackKind>,
    /// Hold block this tick
    pub block: bool,
}

/// Decide the opponent's intent from the current world state
///
/// The block decision is an independent draw every tick, so the opponent
/// flickers in and out of block while the human's attack window is open
/// rather than committing to a sustained guard.
pub fn decide(
    human: &Fighter,
    opponent: &Fighter,
    config: &PolicyConfig,
    now: u64,
    rng: &mut impl Rng,
) -> PolicyIntent {
    let distance = human.pos.x - opponent.pos.x;

    let move_dir = if distance > config.approach_right {
        1
    } else if distance < -config.approach_left {
        -1
    } else {
        0
    };

    let attack = if distance.abs() < config.attack_range {
        let kind = if rng.random_bool(0.5) {
            AttackKind::Punch
        } else {
            AttackKind::Kick
        };
        opponent.cooldown_ready(kind, now).then_some(kind)
    } else {
        None
    };

    let block = human.is_attacking()
        && distance.abs() < config.block_react_range
        && rng.random_bool(config.block_chance);

    PolicyIntent {
        move_dir,
        attack,
        block,
    }
}

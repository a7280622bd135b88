//! Fixed timestep simulation tick
//!
//! One tick is one displayed frame. Each tick: update the human fighter from
//! sampled input, decide and apply the opponent's intent, resolve hits in
//! both directions, then check for a finished match.

use super::collision::resolve_hit;
use super::policy::{self, PolicyIntent};
use super::state::{AttackKind, Facing, Fighter, MatchPhase, MatchState, Outcome};
use crate::consts::*;

/// Sampled input state for a single tick (deterministic)
///
/// The embedder builds this from whatever input device it wires up; the
/// simulation never reads key state globally.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub block: bool,
    pub punch: bool,
    pub kick: bool,
}

/// A fighter's resolved wishes for one tick, from either control source
#[derive(Debug, Clone, Copy, Default)]
pub struct FighterIntent {
    /// Horizontal movement: -1 left, 0 hold, 1 right
    pub move_dir: i8,
    pub jump: bool,
    pub block: bool,
    pub attack: Option<AttackKind>,
}

impl TickInput {
    /// Resolve raw key state into an intent (left wins over right, punch
    /// over kick, matching key-scan order)
    pub fn intent(&self) -> FighterIntent {
        let move_dir = if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        };

        let attack = if self.punch {
            Some(AttackKind::Punch)
        } else if self.kick {
            Some(AttackKind::Kick)
        } else {
            None
        };

        FighterIntent {
            move_dir,
            jump: self.jump,
            block: self.block,
            attack,
        }
    }
}

impl From<PolicyIntent> for FighterIntent {
    fn from(intent: PolicyIntent) -> Self {
        // The policy never jumps
        Self {
            move_dir: intent.move_dir,
            jump: false,
            block: intent.block,
            attack: intent.attack,
        }
    }
}

/// Advance the session by one tick
///
/// No-op unless the match is `Running`; a finished match stays frozen until
/// an explicit restart.
pub fn tick(state: &mut MatchState, input: &TickInput) {
    if state.phase != MatchPhase::Running {
        return;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;
    let speed = state.movement_speed;

    // Human fighter from sampled input
    update_fighter(&mut state.human, &input.intent(), speed, now);

    // Opponent from the decision policy (sees the human's post-update state,
    // so it reacts to an attack the same tick it starts)
    let intent = policy::decide(
        &state.human,
        &state.opponent,
        &state.policy,
        now,
        &mut state.rng,
    );
    update_fighter(&mut state.opponent, &intent.into(), speed, now);

    // Hits resolve both directions before the terminal check, so a mutual
    // knockout is seen as such rather than as whoever resolved first
    resolve_hit(&mut state.human, &mut state.opponent);
    resolve_hit(&mut state.opponent, &mut state.human);

    check_match_over(state);
}

/// Apply one tick of kinematics, stamina economy, and attack lifecycle
fn update_fighter(fighter: &mut Fighter, intent: &FighterIntent, speed: f32, now: u64) {
    // Expire the previous attack's active window
    fighter.advance_attack_window();

    // Blocking requires stamina; hitting zero forces the guard down
    fighter.blocking = intent.block && fighter.stamina > 0.0;

    // Stamina economy. Airborne fighters neither drain nor regen - the jump
    // already paid its cost at launch.
    if !fighter.airborne {
        if fighter.blocking {
            fighter.stamina = (fighter.stamina - BLOCK_STAMINA_DRAIN).max(0.0);
        } else {
            fighter.stamina = (fighter.stamina + STAMINA_REGEN).min(GAUGE_MAX);
        }
    }

    // Horizontal movement, suppressed while blocking
    if intent.move_dir != 0 && !fighter.blocking {
        fighter.vel.x = intent.move_dir as f32 * speed;
        fighter.facing = if intent.move_dir < 0 {
            Facing::Left
        } else {
            Facing::Right
        };
        fighter.walking = true;
    } else {
        fighter.vel.x = 0.0;
        fighter.walking = false;
    }

    if fighter.walking && !fighter.airborne {
        fighter.walk_frame += 1;
    } else if !fighter.walking {
        fighter.walk_frame = 0;
    }

    // Jump launch
    if intent.jump
        && !fighter.airborne
        && fighter.stamina >= JUMP_STAMINA_COST
        && !fighter.blocking
    {
        fighter.vel.y = JUMP_IMPULSE;
        fighter.airborne = true;
        fighter.stamina -= JUMP_STAMINA_COST;
    }

    // Gravity applies unconditionally
    fighter.vel.y += GRAVITY;

    // Integrate and clamp to the arena
    fighter.pos += fighter.vel;
    fighter.pos.x = fighter.pos.x.clamp(0.0, ARENA_WIDTH - fighter.width);

    // Ground contact
    if fighter.pos.y + fighter.height >= ARENA_FLOOR {
        fighter.pos.y = ARENA_FLOOR - fighter.height;
        fighter.vel.y = 0.0;
        fighter.airborne = false;
    }

    // Attack request last, once position and stance are settled
    if let Some(kind) = intent.attack {
        fighter.start_attack(kind, now);
    }
}

fn check_match_over(state: &mut MatchState) {
    let human_down = state.human.health <= 0.0;
    let opponent_down = state.opponent.health <= 0.0;
    if !human_down && !opponent_down {
        return;
    }

    let outcome = match (human_down, opponent_down) {
        (true, true) => Outcome::Draw,
        (true, false) => Outcome::OpponentWins,
        (false, true) => Outcome::HumanWins,
        (false, false) => unreachable!(),
    };

    state.phase = MatchPhase::Over;
    state.outcome = Some(outcome);
    log::info!(
        "match over after {} ticks: {:?}",
        state.time_ticks,
        outcome
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running_match(seed: u64) -> MatchState {
        let mut state = MatchState::new(seed);
        state.start();
        state
    }

    /// Tick until both fighters have settled on the ground
    fn settle(state: &mut MatchState) {
        for _ in 0..60 {
            tick(state, &TickInput::default());
        }
        assert!(!state.human.airborne);
        assert!(!state.opponent.airborne);
    }

    #[test]
    fn test_idle_session_does_not_tick() {
        let mut state = MatchState::new(1);
        let before = state.human.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.human.pos, before);

        state.start();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_fighters_fall_to_floor() {
        let mut state = running_match(1);
        settle(&mut state);
        assert_eq!(state.human.pos.y, ARENA_FLOOR - FIGHTER_HEIGHT);
        assert_eq!(state.human.vel.y, 0.0);
    }

    #[test]
    fn test_movement_and_facing() {
        let mut state = running_match(1);
        settle(&mut state);
        let x0 = state.human.pos.x;

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.human.pos.x, x0 + DEFAULT_MOVE_SPEED);
        assert_eq!(state.human.facing, Facing::Right);
        assert!(state.human.walking);
        assert_eq!(state.human.walk_frame, 1);

        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.human.facing, Facing::Left);

        tick(&mut state, &TickInput::default());
        assert!(!state.human.walking);
        assert_eq!(state.human.walk_frame, 0);
    }

    #[test]
    fn test_movement_speed_tunable_mid_session() {
        let mut state = running_match(1);
        settle(&mut state);
        state.set_movement_speed(7.0);

        let x0 = state.human.pos.x;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.human.pos.x, x0 + 7.0);
    }

    #[test]
    fn test_arena_bounds_clamp() {
        let mut state = running_match(1);
        settle(&mut state);

        let input = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input);
        }
        assert_eq!(state.human.pos.x, 0.0);
    }

    #[test]
    fn test_jump_costs_stamina_and_lifts_off() {
        let mut state = running_match(1);
        settle(&mut state);
        let stamina0 = state.human.stamina;

        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.human.airborne);
        assert_eq!(state.human.stamina, stamina0 - JUMP_STAMINA_COST);
        assert_eq!(state.human.vel.y, JUMP_IMPULSE + GRAVITY);

        // Already airborne: held jump is denied, no second deduction
        tick(&mut state, &input);
        assert_eq!(state.human.stamina, stamina0 - JUMP_STAMINA_COST);
    }

    #[test]
    fn test_jump_denied_without_stamina() {
        let mut state = running_match(1);
        settle(&mut state);
        state.human.stamina = 9.0;

        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        // Regen runs but the launch threshold was not met at jump time
        assert!(!state.human.airborne);
    }

    #[test]
    fn test_jump_denied_while_blocking() {
        let mut state = running_match(1);
        settle(&mut state);

        let input = TickInput {
            jump: true,
            block: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.human.blocking);
        assert!(!state.human.airborne);
    }

    #[test]
    fn test_block_drains_then_regens() {
        let mut state = running_match(1);
        settle(&mut state);
        state.human.stamina = 50.0;

        let input = TickInput {
            block: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.human.blocking);
        assert_eq!(state.human.stamina, 50.0 - BLOCK_STAMINA_DRAIN);

        tick(&mut state, &TickInput::default());
        assert!(!state.human.blocking);
        assert_eq!(
            state.human.stamina,
            50.0 - BLOCK_STAMINA_DRAIN + STAMINA_REGEN
        );
    }

    #[test]
    fn test_block_ends_at_zero_stamina() {
        let mut state = running_match(1);
        settle(&mut state);
        state.human.stamina = 0.0;

        let input = TickInput {
            block: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(!state.human.blocking);
    }

    #[test]
    fn test_blocking_suppresses_movement_and_attack() {
        let mut state = running_match(1);
        settle(&mut state);
        let x0 = state.human.pos.x;

        let input = TickInput {
            right: true,
            block: true,
            punch: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.human.pos.x, x0);
        assert!(!state.human.is_attacking());
    }

    #[test]
    fn test_attack_lands_once_per_activation() {
        let mut state = running_match(1);
        settle(&mut state);
        // Park the opponent inside punch range and keep it passive
        state.opponent.pos.x = state.human.pos.x + state.human.width + 10.0;
        state.policy.attack_range = 0.0;
        state.policy.block_chance = 0.0;

        let press = TickInput {
            punch: true,
            ..Default::default()
        };
        tick(&mut state, &press);
        assert_eq!(state.opponent.health, 90.0);
        assert!(!state.human.is_attacking());

        // Held button across the rest of the would-be active window and the
        // cooldown: no further damage
        for _ in 0..PUNCH_COOLDOWN_TICKS {
            tick(&mut state, &press);
        }
        assert_eq!(state.opponent.health, 90.0);

        // Cooldown over: a fresh activation may land again
        tick(&mut state, &press);
        assert_eq!(state.opponent.health, 80.0);
    }

    #[test]
    fn test_blocked_hit_at_half_stamina() {
        let mut state = running_match(1);
        settle(&mut state);
        state.opponent.pos.x = state.human.pos.x + state.human.width + 10.0;
        state.policy.attack_range = 0.0;
        // Force the opponent to hold block while the punch is incoming
        state.policy.block_chance = 1.0;
        state.opponent.stamina = 50.0;

        let press = TickInput {
            punch: true,
            ..Default::default()
        };
        tick(&mut state, &press);

        // Block drain ran before the hit, so mitigation uses 49.5 stamina
        assert!(state.opponent.blocking);
        assert!((state.opponent.health - 95.0).abs() < 0.1);
    }

    #[test]
    fn test_simultaneous_ko_is_a_draw() {
        let mut state = running_match(1);
        settle(&mut state);
        state.human.health = 5.0;
        state.opponent.health = 5.0;
        // Stop the policy from blocking or attacking on its own
        state.policy.attack_range = 0.0;
        state.policy.block_chance = 0.0;

        // Face-to-face, both attacks started by hand on the same tick
        state.opponent.pos.x = state.human.pos.x + state.human.width + 10.0;
        let now = state.time_ticks;
        assert!(state.human.start_attack(AttackKind::Punch, now));
        assert!(state.opponent.start_attack(AttackKind::Punch, now));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, MatchPhase::Over);
        assert_eq!(state.outcome, Some(Outcome::Draw));
        assert_eq!(state.human.health, 0.0);
        assert_eq!(state.opponent.health, 0.0);

        // Frozen: further ticks change nothing
        let ticks = state.time_ticks;
        let pos = state.human.pos;
        let input = TickInput {
            right: true,
            jump: true,
            punch: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input);
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.human.pos, pos);
    }

    #[test]
    fn test_opponent_approaches_then_holds() {
        let mut state = running_match(1);
        settle(&mut state);
        // Keep the opponent from attacking so it only walks
        state.policy.attack_range = 0.0;

        // Human at 100, opponent at 650: the opponent closes leftward until
        // the gap is inside the approach threshold
        let mut prev_x = state.opponent.pos.x;
        loop {
            tick(&mut state, &TickInput::default());
            let distance = state.human.pos.x - state.opponent.pos.x;
            if distance.abs() <= state.policy.approach_left {
                break;
            }
            assert!(state.opponent.pos.x < prev_x, "opponent must move left");
            prev_x = state.opponent.pos.x;
            assert!(state.time_ticks < 1000, "opponent never closed the gap");
        }

        // Inside the threshold: holds position
        let x = state.opponent.pos.x;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.opponent.pos.x, x);
        assert_eq!(state.opponent.facing, Facing::Left);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = running_match(99999);
        let mut b = running_match(99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                punch: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for round in 0..200 {
            let input = inputs[round % inputs.len()];
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.human.pos, b.human.pos);
        assert_eq!(a.opponent.pos, b.opponent.pos);
        assert_eq!(a.human.health, b.human.health);
        assert_eq!(a.opponent.health, b.opponent.health);
        assert_eq!(a.opponent.blocking, b.opponent.blocking);
    }

    proptest! {
        /// Gauges stay clamped to [0, 100] under arbitrary input streams
        #[test]
        fn prop_gauges_stay_in_bounds(seed in any::<u64>(), presses in prop::collection::vec(0u8..64, 1..400)) {
            let mut state = running_match(seed);
            for bits in presses {
                let input = TickInput {
                    left: bits & 1 != 0,
                    right: bits & 2 != 0,
                    jump: bits & 4 != 0,
                    block: bits & 8 != 0,
                    punch: bits & 16 != 0,
                    kick: bits & 32 != 0,
                };
                tick(&mut state, &input);

                for fighter in [&state.human, &state.opponent] {
                    prop_assert!((0.0..=GAUGE_MAX).contains(&fighter.health));
                    prop_assert!((0.0..=GAUGE_MAX).contains(&fighter.stamina));
                }
            }
        }
    }
}

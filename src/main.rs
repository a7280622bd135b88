//! Stick Duel entry point
//!
//! Headless demo runner: the opponent policy drives both fighters (the human
//! slot is mirrored), so the binary exercises the full simulation without a
//! renderer. Pass a seed argument to replay a specific match.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use stick_duel::Settings;
use stick_duel::consts::TICK_HZ;
use stick_duel::sim::{MatchPhase, MatchState, Outcome, PolicyIntent, TickInput, policy, tick};

/// Demo match length cap (two minutes of simulated time)
const MAX_DEMO_TICKS: u64 = 120 * TICK_HZ as u64;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let settings = Settings::load();

    let mut state = MatchState::new(seed);
    state.set_movement_speed(settings.effective_speed());
    state.start();

    // The human slot gets its own decision stream so the session RNG stays
    // on the same sequence it would see under real input.
    let mut demo_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));

    while state.phase == MatchPhase::Running && state.time_ticks < MAX_DEMO_TICKS {
        let intent = policy::decide(
            &state.opponent,
            &state.human,
            &state.policy,
            state.time_ticks,
            &mut demo_rng,
        );
        tick(&mut state, &demo_input(intent));
    }

    let seconds = state.time_ticks as f32 / TICK_HZ as f32;
    match state.outcome {
        Some(Outcome::HumanWins) => println!("Blue wins after {seconds:.1}s"),
        Some(Outcome::OpponentWins) => println!("Red wins after {seconds:.1}s"),
        Some(Outcome::Draw) => println!("Double knockout after {seconds:.1}s - draw"),
        None => println!(
            "Time limit reached: blue {:.0} health, red {:.0} health",
            state.human.health, state.opponent.health
        ),
    }
}

/// Translate a mirrored policy decision into human key state
fn demo_input(intent: PolicyIntent) -> TickInput {
    use stick_duel::sim::AttackKind;

    TickInput {
        left: intent.move_dir < 0,
        right: intent.move_dir > 0,
        jump: false,
        block: intent.block,
        punch: intent.attack == Some(AttackKind::Punch),
        kick: intent.attack == Some(AttackKind::Kick),
    }
}

//! Flappy Dragon headless driver
//!
//! The playable build is the WASM module (`WebGame`). Natively this runs a
//! scripted session at 60 Hz with a simple autopilot and logs what happens.
//! `RUST_LOG=debug` shows spawns, cues and countdown ticks.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Dragon (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `WebGame`, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy_dragon::audio::LogAudio;
    use flappy_dragon::persistence::JsonFileStore;
    use flappy_dragon::sim::{Action, GameEvent, GamePhase, Session, tick};
    use flappy_dragon::{Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Two minutes of game time
    const MAX_FRAMES: u32 = 60 * 120;

    pub fn run() {
        let seed = std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(2024);
        let store = JsonFileStore::in_dir(std::env::temp_dir());
        log::info!("High score file: {}", store.path().display());

        let mut session = Session::new(
            seed,
            Tuning::default(),
            Settings::default(),
            Box::new(LogAudio),
            Box::new(store),
        );
        session.handle_resize(400.0, 600.0);
        session.set_sprites_ready(true);
        session.handle_action(Action::Jump);

        let mut now = 0.0;
        for frame in 0..MAX_FRAMES {
            if frame == 600 {
                // Exercise pause and the resume countdown once
                session.handle_action(Action::Pause);
            }
            if frame == 700 {
                session.handle_action(Action::Jump);
            }

            if session.phase() == GamePhase::Running && should_flap(&session) {
                session.handle_action(Action::Jump);
            }

            tick(&mut session, now);
            now += FRAME_MS;

            for event in session.drain_events() {
                match event {
                    GameEvent::PhaseChanged { from, to } => {
                        log::info!("frame {}: {} -> {}", frame, from.as_str(), to.as_str())
                    }
                    GameEvent::Scored { score, .. } => {
                        log::info!("frame {}: score {}", frame, score)
                    }
                    GameEvent::NewHighScore(best) => {
                        log::info!("frame {}: new best {}", frame, best)
                    }
                    GameEvent::Collided(hit) => log::info!("frame {}: hit {:?}", frame, hit),
                    _ => {}
                }
            }

            if session.phase() == GamePhase::GameOver {
                break;
            }
        }

        println!(
            "Final score: {} (best {}), phase {}",
            session.score,
            session.high_score,
            session.phase().as_str()
        );
    }

    /// Flap when sinking below the middle of the next gap
    fn should_flap(session: &Session) -> bool {
        let player = &session.player;
        if player.velocity < 0.0 {
            return false;
        }
        let target = session
            .obstacles
            .obstacles
            .iter()
            .find(|o| o.right() > player.pos.x)
            .map(|o| o.top_height + o.gap() * 0.6)
            .or_else(|| session.viewport().map(|v| v.height / 2.0))
            .unwrap_or(0.0);
        player.bottom() > target
    }
}

//! Game phase state machine
//!
//! One enum replaces the menu/running/paused/game-over flags. Timed phases
//! (the resume countdown and the death sequence) are counters driven by the
//! frame clock, so anything that stops frames from advancing the session
//! also stops them.

use serde::{Deserialize, Serialize};

/// Abstract, pre-debounced player input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Jump,
    Pause,
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Title screen, waiting for the first jump
    #[default]
    Menu,
    /// Resuming from pause: 3, 2, 1...
    Countdown,
    /// Active gameplay
    Running,
    /// Simulation frozen by the player
    Paused,
    /// Hit something; explosion plays out, input locked
    Dying,
    /// Run ended, waiting for a jump to retry
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "Menu",
            GamePhase::Countdown => "Countdown",
            GamePhase::Running => "Running",
            GamePhase::Paused => "Paused",
            GamePhase::Dying => "Dying",
            GamePhase::GameOver => "GameOver",
        }
    }
}

/// Countdown starts from this number
pub const COUNTDOWN_FROM: u8 = 3;
/// Milliseconds per countdown number
pub const COUNTDOWN_STEP_MS: f32 = 1000.0;
/// How long the death sequence lasts before the game-over screen
pub const DYING_DURATION_MS: f32 = 1000.0;

/// What the session must do in response to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Action not meaningful (or locked out) in this phase
    Dropped,
    /// Fresh run: reset the world, now Running
    Start,
    /// Jump the player on the next simulation step
    Jump,
    /// Now Paused
    Paused,
    /// Countdown started at `COUNTDOWN_FROM`
    CountdownStarted,
    /// Countdown abandoned, back to Paused
    CountdownCancelled,
}

/// Something a timer did during `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSignal {
    /// Countdown moved to this number ("get ready")
    CountdownTick(u8),
    /// Countdown finished, now Running
    Resumed,
    /// Death sequence finished, now GameOver
    GameOver,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseMachine {
    phase: GamePhase,
    /// Countdown number showing
    countdown_remaining: u8,
    /// Time spent on the current countdown number
    countdown_elapsed_ms: f32,
    dying_elapsed_ms: f32,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Number on screen while counting down
    pub fn countdown(&self) -> Option<u8> {
        (self.phase == GamePhase::Countdown).then_some(self.countdown_remaining)
    }

    /// True only while the world should be simulated
    pub fn is_simulating(&self) -> bool {
        self.phase == GamePhase::Running
    }

    fn enter(&mut self, next: GamePhase) {
        log::info!("Phase {} -> {}", self.phase.as_str(), next.as_str());
        self.phase = next;
        // Leaving a timed phase drops whatever it had pending
        self.countdown_remaining = 0;
        self.countdown_elapsed_ms = 0.0;
        self.dying_elapsed_ms = 0.0;
    }

    pub fn on_action(&mut self, action: Action) -> Response {
        use GamePhase::*;

        match (self.phase, action) {
            (Menu | GameOver, Action::Jump) => {
                self.enter(Running);
                Response::Start
            }
            (Running, Action::Jump) => Response::Jump,
            (Running, Action::Pause) => {
                self.enter(Paused);
                Response::Paused
            }
            (Paused, Action::Jump | Action::Pause) => {
                self.enter(Countdown);
                self.countdown_remaining = COUNTDOWN_FROM;
                Response::CountdownStarted
            }
            (Countdown, Action::Pause) => {
                self.enter(Paused);
                Response::CountdownCancelled
            }
            (Countdown, Action::Jump) | (Dying, _) | (Menu | GameOver, Action::Pause) => {
                Response::Dropped
            }
        }
    }

    /// The player hit something. Returns true only for the hit that ends the
    /// life; later reports in the same life are ignored.
    pub fn on_collision(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.enter(GamePhase::Dying);
        true
    }

    /// Run the phase timers for `raw_ms` of wall-clock time
    pub fn advance(&mut self, raw_ms: f32) -> Vec<PhaseSignal> {
        let mut signals = Vec::new();

        match self.phase {
            GamePhase::Countdown => {
                self.countdown_elapsed_ms += raw_ms;
                while self.phase == GamePhase::Countdown
                    && self.countdown_elapsed_ms >= COUNTDOWN_STEP_MS
                {
                    self.countdown_elapsed_ms -= COUNTDOWN_STEP_MS;
                    self.countdown_remaining -= 1;
                    if self.countdown_remaining == 0 {
                        self.enter(GamePhase::Running);
                        signals.push(PhaseSignal::Resumed);
                    } else {
                        log::debug!("Countdown {}", self.countdown_remaining);
                        signals.push(PhaseSignal::CountdownTick(self.countdown_remaining));
                    }
                }
            }
            GamePhase::Dying => {
                self.dying_elapsed_ms += raw_ms;
                if self.dying_elapsed_ms >= DYING_DURATION_MS {
                    self.enter(GamePhase::GameOver);
                    signals.push(PhaseSignal::GameOver);
                }
            }
            _ => {}
        }

        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> PhaseMachine {
        let mut machine = PhaseMachine::new();
        assert_eq!(machine.on_action(Action::Jump), Response::Start);
        machine
    }

    #[test]
    fn test_starts_in_menu() {
        let machine = PhaseMachine::new();
        assert_eq!(machine.phase(), GamePhase::Menu);
        assert!(!machine.is_simulating());
    }

    #[test]
    fn test_menu_ignores_pause() {
        let mut machine = PhaseMachine::new();
        assert_eq!(machine.on_action(Action::Pause), Response::Dropped);
        assert_eq!(machine.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_running_jump_and_pause() {
        let mut machine = running();
        assert_eq!(machine.on_action(Action::Jump), Response::Jump);
        assert_eq!(machine.phase(), GamePhase::Running);
        assert_eq!(machine.on_action(Action::Pause), Response::Paused);
        assert_eq!(machine.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_countdown_runs_three_steps() {
        let mut machine = running();
        machine.on_action(Action::Pause);
        assert_eq!(machine.on_action(Action::Jump), Response::CountdownStarted);
        assert_eq!(machine.countdown(), Some(3));

        assert!(machine.advance(999.0).is_empty());
        assert_eq!(machine.advance(1.0), vec![PhaseSignal::CountdownTick(2)]);
        assert_eq!(machine.advance(1000.0), vec![PhaseSignal::CountdownTick(1)]);
        assert_eq!(machine.phase(), GamePhase::Countdown);
        assert_eq!(machine.advance(1000.0), vec![PhaseSignal::Resumed]);
        assert_eq!(machine.phase(), GamePhase::Running);
        assert_eq!(machine.countdown(), None);
    }

    #[test]
    fn test_jump_during_countdown_dropped() {
        let mut machine = running();
        machine.on_action(Action::Pause);
        machine.on_action(Action::Pause);
        machine.advance(500.0);
        assert_eq!(machine.on_action(Action::Jump), Response::Dropped);
        assert_eq!(machine.countdown(), Some(3));
    }

    #[test]
    fn test_cancelled_countdown_leaves_nothing_pending() {
        let mut machine = running();
        machine.on_action(Action::Pause);
        machine.on_action(Action::Pause);
        machine.advance(1500.0);
        assert_eq!(machine.countdown(), Some(2));

        assert_eq!(machine.on_action(Action::Pause), Response::CountdownCancelled);
        assert_eq!(machine.phase(), GamePhase::Paused);
        // Paused time never ticks a countdown
        assert!(machine.advance(10_000.0).is_empty());

        // A new countdown starts over from the top with a fresh timer
        machine.on_action(Action::Jump);
        assert_eq!(machine.countdown(), Some(3));
        assert!(machine.advance(999.0).is_empty());
    }

    #[test]
    fn test_one_death_per_life() {
        let mut machine = running();
        assert!(machine.on_collision());
        assert!(!machine.on_collision());
        assert_eq!(machine.phase(), GamePhase::Dying);
    }

    #[test]
    fn test_dying_locks_input_then_game_over() {
        let mut machine = running();
        machine.on_collision();
        assert_eq!(machine.on_action(Action::Jump), Response::Dropped);
        assert_eq!(machine.on_action(Action::Pause), Response::Dropped);
        assert!(machine.advance(600.0).is_empty());
        assert_eq!(machine.advance(400.0), vec![PhaseSignal::GameOver]);
        assert_eq!(machine.phase(), GamePhase::GameOver);

        assert_eq!(machine.on_action(Action::Pause), Response::Dropped);
        assert_eq!(machine.on_action(Action::Jump), Response::Start);
        assert_eq!(machine.phase(), GamePhase::Running);
    }

    #[test]
    fn test_collision_outside_running_ignored() {
        let mut machine = PhaseMachine::new();
        assert!(!machine.on_collision());
        let mut machine = running();
        machine.on_action(Action::Pause);
        assert!(!machine.on_collision());
        assert_eq!(machine.phase(), GamePhase::Paused);
    }
}

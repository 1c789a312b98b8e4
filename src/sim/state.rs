//! The session: the single mutable world
//!
//! Everything the game knows lives in one `Session`. Hosts feed it actions,
//! resizes and frame timestamps; renderers read a `Snapshot`; audio and
//! persistence hang off it as fire-and-forget hooks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::clock::Clock;
use super::collision::Collision;
use super::obstacle::{Obstacle, ObstacleField};
use super::particles::{EXPLOSION_COLOR, EXPLOSION_PARTICLES, Particle, ParticleSystem};
use super::phase::{Action, GamePhase, PhaseMachine, Response};
use super::player::{BodyShape, PlayerBody};
use crate::audio::{AudioCue, AudioNotifier, NullAudio};
use crate::persistence::{HighScoreStore, MemoryStore};
use crate::settings::Settings;
use crate::tuning::{Physics, Tuning, Viewport};

/// Things that happened, for hosts that want more than a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    Jumped,
    ObstacleSpawned { id: u32 },
    Scored { obstacle_id: u32, score: u32 },
    NewHighScore(u32),
    Collided(Collision),
    /// Countdown showing this number ("get ready")
    CountdownTick(u8),
}

/// Read-only view of one frame for drawing
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub countdown: Option<u8>,
    pub score: u32,
    pub high_score: u32,
    pub viewport: Option<Viewport>,
    pub player: &'a PlayerBody,
    pub player_frame: usize,
    pub player_tilt: f32,
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
}

pub struct Session {
    pub tuning: Tuning,
    pub settings: Settings,
    pub clock: Clock,
    pub player: PlayerBody,
    pub obstacles: ObstacleField,
    pub particles: ParticleSystem,
    /// Points this run
    pub score: u32,
    /// Best score ever seen (stored + this process)
    pub high_score: u32,
    pub(super) machine: PhaseMachine,
    pub(super) viewport: Option<Viewport>,
    pub(super) physics: Option<Physics>,
    /// Jump waiting for the next simulation step
    pub(super) jump_requested: bool,
    /// Player has been put at the start position for this run
    pub(super) placed: bool,
    pub(super) rng: Pcg32,
    events: Vec<GameEvent>,
    audio: Box<dyn AudioNotifier>,
    store: Box<dyn HighScoreStore>,
}

impl Session {
    /// Create a session in the menu, reading the stored high score
    pub fn new(
        seed: u64,
        tuning: Tuning,
        settings: Settings,
        audio: Box<dyn AudioNotifier>,
        mut store: Box<dyn HighScoreStore>,
    ) -> Self {
        let high_score = store.load_high_score().unwrap_or(0);
        log::info!("Session created (seed {}, best {})", seed, high_score);

        Self {
            clock: Clock::new(&tuning),
            particles: ParticleSystem::with_capacity(settings.max_particles()),
            tuning,
            settings,
            player: PlayerBody::default(),
            obstacles: ObstacleField::new(),
            score: 0,
            high_score,
            machine: PhaseMachine::new(),
            viewport: None,
            physics: None,
            jump_requested: false,
            placed: false,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            audio,
            store,
        }
    }

    /// Default tuning, silent, remembering the high score in memory only
    pub fn headless(seed: u64) -> Self {
        Self::new(
            seed,
            Tuning::default(),
            Settings::default(),
            Box::new(NullAudio),
            Box::new(MemoryStore::default()),
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    pub fn countdown(&self) -> Option<u8> {
        self.machine.countdown()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn physics(&self) -> Option<&Physics> {
        self.physics.as_ref()
    }

    pub fn jump_pending(&self) -> bool {
        self.jump_requested
    }

    /// Feed one debounced action. Actions the current phase does not accept
    /// are dropped, not queued.
    pub fn handle_action(&mut self, action: Action) {
        let before = self.machine.phase();
        match self.machine.on_action(action) {
            Response::Start => self.reset(),
            Response::Jump => self.jump_requested = true,
            // A jump latched before pausing would fire after the countdown
            Response::Paused => self.jump_requested = false,
            Response::CountdownCancelled => {}
            Response::CountdownStarted => {
                self.events.push(GameEvent::CountdownTick(super::phase::COUNTDOWN_FROM));
            }
            Response::Dropped => {
                log::debug!("{:?} dropped in {}", action, before.as_str());
            }
        }
        self.note_phase(before);
    }

    /// Viewport changed. Only geometry is recomputed; invalid sizes are
    /// ignored until a valid one arrives.
    pub fn handle_resize(&mut self, width: f32, height: f32) {
        let viewport = match Viewport::new(width, height) {
            Ok(viewport) => viewport,
            Err(e) => {
                log::warn!("Ignoring resize: {}", e);
                return;
            }
        };

        self.viewport = Some(viewport);
        self.physics = Some(self.tuning.resolve(viewport));
        self.player.resize(viewport);

        // A run started before any valid viewport still needs its player placed
        if !self.placed && self.phase() != GamePhase::Menu {
            self.player.reset(viewport);
            self.placed = true;
        }
    }

    /// Sprites loaded (or failed); switches the body between sprite and
    /// placeholder sizing
    pub fn set_sprites_ready(&mut self, ready: bool) {
        self.player.shape = if ready {
            BodyShape::Sprite
        } else {
            BodyShape::Placeholder
        };
        if let Some(viewport) = self.viewport {
            self.player.resize(viewport);
        }
    }

    /// Replace the settings; the particle cap follows
    pub fn apply_settings(&mut self, settings: Settings) {
        self.particles.max_particles = settings.max_particles();
        self.particles.particles.truncate(self.particles.max_particles);
        self.settings = settings;
    }

    /// Everything that happened since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase(),
            countdown: self.countdown(),
            score: self.score,
            high_score: self.high_score,
            viewport: self.viewport,
            player: &self.player,
            player_frame: self.player.sprite_frame(),
            player_tilt: self.player.tilt(),
            obstacles: &self.obstacles.obstacles,
            particles: &self.particles.particles,
        }
    }

    /// Fresh run: zero score, empty field, player at the start position
    fn reset(&mut self) {
        self.score = 0;
        self.obstacles.clear();
        self.jump_requested = false;
        match self.viewport {
            Some(viewport) => {
                self.player.resize(viewport);
                self.player.reset(viewport);
                self.placed = true;
            }
            None => self.placed = false,
        }
        log::info!("New run (best {})", self.high_score);
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(super) fn cue(&mut self, cue: AudioCue) {
        if self.settings.muted {
            return;
        }
        match cue {
            AudioCue::Jump => self.audio.on_jump(),
            AudioCue::Score => self.audio.on_score(),
            AudioCue::Collision => self.audio.on_collision(),
        }
    }

    /// Record a phase change made since `before`
    pub(super) fn note_phase(&mut self, before: GamePhase) {
        let after = self.machine.phase();
        if after != before {
            self.events.push(GameEvent::PhaseChanged {
                from: before,
                to: after,
            });
        }
    }

    /// One obstacle cleared
    pub(super) fn award_point(&mut self, obstacle_id: u32) {
        self.score += 1;
        self.events.push(GameEvent::Scored {
            obstacle_id,
            score: self.score,
        });
        self.cue(AudioCue::Score);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save_high_score(self.high_score);
            self.events.push(GameEvent::NewHighScore(self.high_score));
        }
    }

    /// The player hit something; only the first hit of a life counts
    pub(super) fn collide(&mut self, collision: Collision) {
        let before = self.machine.phase();
        if !self.machine.on_collision() {
            return;
        }
        log::info!("Collision with {:?} at score {}", collision, self.score);
        self.events.push(GameEvent::Collided(collision));
        self.cue(AudioCue::Collision);

        let count = self.settings.burst_size(EXPLOSION_PARTICLES);
        let origin: Vec2 = self.player.center();
        self.particles
            .spawn_burst(origin, EXPLOSION_COLOR, count, &mut self.rng);

        self.note_phase(before);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_new_session_in_menu() {
        let session = Session::headless(1);
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 0);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_loads_stored_high_score() {
        let store = Rc::new(RefCell::new(MemoryStore::with_high_score(12)));
        let session = Session::new(
            1,
            Tuning::default(),
            Settings::default(),
            Box::new(NullAudio),
            Box::new(store.clone()),
        );
        assert_eq!(session.high_score, 12);
        assert!(store.borrow().writes.is_empty());
    }

    #[test]
    fn test_start_resets_world() {
        let mut session = Session::headless(1);
        session.handle_resize(400.0, 500.0);
        session.score = 5;
        session.obstacles.obstacles.push(Obstacle {
            id: 0,
            x: 10.0,
            width: 50.0,
            top_height: 100.0,
            bottom_y: 250.0,
            passed: false,
        });
        session.obstacles.spawn_accumulator_ms = 1234.0;
        session.player.velocity = 7.0;

        session.handle_action(Action::Jump);
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.score, 0);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.obstacles.spawn_accumulator_ms, 0.0);
        assert_eq!(session.player.pos, Vec2::new(80.0, 250.0));
        assert_eq!(session.player.velocity, 0.0);
        // Starting is not a jump
        assert!(!session.jump_pending());
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Menu,
                to: GamePhase::Running
            }]
        );
    }

    #[test]
    fn test_invalid_resize_keeps_geometry() {
        let mut session = Session::headless(1);
        session.handle_resize(400.0, 500.0);
        let width = session.player.width;
        session.handle_resize(0.0, 500.0);
        session.handle_resize(-10.0, -10.0);
        assert_eq!(session.viewport(), Some(Viewport::new(400.0, 500.0).unwrap()));
        assert_eq!(session.player.width, width);
    }

    #[test]
    fn test_resize_never_changes_phase() {
        let mut session = Session::headless(1);
        session.handle_resize(400.0, 500.0);
        session.handle_action(Action::Jump);
        session.handle_action(Action::Pause);
        session.drain_events();

        session.handle_resize(800.0, 600.0);
        assert_eq!(session.phase(), GamePhase::Paused);
        assert!(session.drain_events().is_empty());
        assert_eq!(session.player.width, 64.0);
    }

    #[test]
    fn test_run_started_before_viewport_is_placed_on_resize() {
        let mut session = Session::headless(1);
        session.handle_action(Action::Jump);
        assert_eq!(session.player.pos, crate::sim::player::OFFSCREEN_POS);
        session.handle_resize(400.0, 500.0);
        assert_eq!(session.player.pos, Vec2::new(80.0, 250.0));
    }

    #[test]
    fn test_sprite_readiness_switches_size() {
        let mut session = Session::headless(1);
        session.handle_resize(400.0, 500.0);
        assert_eq!(session.player.width, 32.0);
        session.set_sprites_ready(true);
        assert!((session.player.height - 64.0).abs() < 1e-4);
    }

    #[test]
    fn test_snapshot_reflects_world() {
        let mut session = Session::headless(1);
        session.handle_resize(400.0, 500.0);
        session.handle_action(Action::Jump);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Running);
        assert_eq!(snapshot.player.pos, session.player.pos);
        assert!(snapshot.obstacles.is_empty());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
    }

    #[test]
    fn test_apply_settings_caps_particles() {
        let mut session = Session::headless(1);
        let mut rng = Pcg32::seed_from_u64(3);
        session.particles.spawn_burst(Vec2::ZERO, 0, 50, &mut rng);
        session.apply_settings(Settings {
            particles: false,
            ..Default::default()
        });
        assert!(session.particles.is_empty());
        assert_eq!(session.particles.max_particles, 0);
    }
}

//! Audio cue hooks
//!
//! The simulation never plays sound itself. It fires cues at an
//! `AudioNotifier` and carries on; whatever sits behind the trait (Web Audio,
//! a native mixer, nothing) cannot influence game state.

use std::cell::RefCell;
use std::rc::Rc;

/// Sound cues raised by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Player jumped
    Jump,
    /// Obstacle passed
    Score,
    /// Player hit an obstacle or the floor
    Collision,
}

impl AudioCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::Jump => "jump",
            AudioCue::Score => "point",
            AudioCue::Collision => "death",
        }
    }

    /// Playback volume for this cue
    pub fn volume(&self) -> f32 {
        match self {
            AudioCue::Jump => 0.2,
            AudioCue::Score => 0.3,
            AudioCue::Collision => 0.4,
        }
    }
}

/// Fire-and-forget sink for audio cues
pub trait AudioNotifier {
    fn on_jump(&mut self) {
        self.cue(AudioCue::Jump);
    }

    fn on_score(&mut self) {
        self.cue(AudioCue::Score);
    }

    fn on_collision(&mut self) {
        self.cue(AudioCue::Collision);
    }

    fn cue(&mut self, cue: AudioCue);
}

impl<T: AudioNotifier + ?Sized> AudioNotifier for Rc<RefCell<T>> {
    fn cue(&mut self, cue: AudioCue) {
        self.borrow_mut().cue(cue);
    }
}

/// Keeps every cue, oldest first
#[derive(Debug, Default, Clone)]
pub struct CueLog {
    pub cues: Vec<AudioCue>,
}

impl AudioNotifier for CueLog {
    fn cue(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioNotifier for NullAudio {
    fn cue(&mut self, _cue: AudioCue) {}
}

/// Writes cues to the log (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioNotifier for LogAudio {
    fn cue(&mut self, cue: AudioCue) {
        log::debug!("sfx {} @ {:.1}", cue.as_str(), cue.volume());
    }
}

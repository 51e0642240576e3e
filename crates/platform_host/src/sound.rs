//! UI sound-cue contracts.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Short feedback tones played by the shell and games.
pub enum SoundCue {
    /// Navigation and button presses.
    Click,
    /// A small in-game event (tile placed, mole popped).
    Pop,
    /// A completed action.
    Success,
    /// A failed action.
    Fail,
}

impl SoundCue {
    /// Oscillator frequency in hertz.
    pub const fn frequency_hz(self) -> f32 {
        match self {
            Self::Click => 800.0,
            Self::Pop => 600.0,
            Self::Success => 1046.5,
            Self::Fail => 196.0,
        }
    }

    /// Tone length in seconds.
    pub const fn duration_secs(self) -> f64 {
        match self {
            Self::Click => 0.05,
            Self::Pop => 0.08,
            Self::Success => 0.25,
            Self::Fail => 0.3,
        }
    }
}

/// Host service that plays [`SoundCue`] tones.
pub trait SoundService {
    /// Plays one cue. Failures are swallowed by the implementation.
    fn play(&self, cue: SoundCue);
}

#[derive(Debug, Clone, Copy, Default)]
/// Silent sound service.
pub struct NoopSoundService;

impl SoundService for NoopSoundService {
    fn play(&self, _cue: SoundCue) {}
}

#[derive(Debug, Clone, Default)]
/// Sound service that records played cues.
pub struct RecordingSoundService {
    played: Rc<RefCell<Vec<SoundCue>>>,
}

impl RecordingSoundService {
    /// Returns the cues played so far.
    pub fn played(&self) -> Vec<SoundCue> {
        self.played.borrow().clone()
    }
}

impl SoundService for RecordingSoundService {
    fn play(&self, cue: SoundCue) {
        self.played.borrow_mut().push(cue);
    }
}

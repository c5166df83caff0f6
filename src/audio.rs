//! Audio port.
//!
//! The game core never owns a sound device. It is handed an [`AudioPort`]
//! and fires cues at it; playback failures stay on the implementation side.

/// Fire-and-forget sound cues emitted by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Flap,
    Score,
    /// Collision impact, played immediately.
    Hit,
    /// Death sting, played shortly after the impact.
    Die,
    Start,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Flap => "flap",
            Cue::Score => "score",
            Cue::Hit => "hit",
            Cue::Die => "die",
            Cue::Start => "start",
        }
    }
}

/// Capability set the core needs from the surrounding application.
pub trait AudioPort {
    fn play(&mut self, cue: Cue);
    /// Start the background music loop.
    fn start_loop(&mut self);
    /// Stop the background music loop.
    fn stop_loop(&mut self);
    /// Flip mute. Returns the new muted state.
    fn toggle_mute(&mut self) -> bool;
}

/// Audio sink for hosts without a sound device: logs cues, tracks mute.
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
    looping: bool,
}

impl LogAudio {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            looping: false,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

impl AudioPort for LogAudio {
    fn play(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        tracing::debug!(cue = cue.name(), "play cue");
    }

    fn start_loop(&mut self) {
        if self.looping || self.muted {
            return;
        }
        self.looping = true;
        tracing::debug!("background loop started");
    }

    fn stop_loop(&mut self) {
        if self.looping {
            tracing::debug!("background loop stopped");
        }
        self.looping = false;
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.stop_loop();
        }
        tracing::info!(muted = self.muted, "mute toggled");
        self.muted
    }
}

/// Records every call the core makes.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub cues: Vec<Cue>,
    pub loop_starts: u32,
    pub loop_stops: u32,
    pub muted: bool,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }
}

impl AudioPort for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn start_loop(&mut self) {
        self.loop_starts += 1;
    }

    fn stop_loop(&mut self) {
        self.loop_stops += 1;
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }
}

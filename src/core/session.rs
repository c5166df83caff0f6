//! Session state machine, score bookkeeping and queued commands.

use super::constants::DIE_CUE_DELAY_TICKS;
use super::difficulty::tier_for_score;
use crate::audio::{AudioPort, Cue};
use crate::utils::persistence::HighScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the first start command.
    Idle,
    Running,
    GameOver,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::GameOver => "game_over",
        }
    }
}

/// Input-derived commands, drained once per tick before physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Flap,
    Start,
    Restart,
    ToggleMenu,
    ToggleMute,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    /// Menu overlay, orthogonal to `state`.
    pub menu_open: bool,
    pub score: u32,
    pub high_score: u32,
    pub tier: u32,
    pub muted: bool,
    /// The last game over set a new high score.
    pub new_record: bool,
    /// Ticks until the delayed death cue fires.
    pending_die: Option<u32>,
    music_on: bool,
}

impl Session {
    pub fn new(high_score: u32, muted: bool) -> Self {
        Self {
            state: SessionState::Idle,
            menu_open: false,
            score: 0,
            high_score,
            tier: 1,
            muted,
            new_record: false,
            pending_die: None,
            music_on: false,
        }
    }

    /// What the single primary input means in the current state.
    pub fn primary_command(&self) -> Command {
        match self.state {
            SessionState::Idle => Command::Start,
            SessionState::Running => Command::Flap,
            SessionState::GameOver => Command::Restart,
        }
    }

    /// Simulation stages run only while Running with the menu closed.
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Running && !self.menu_open
    }

    /// Enter Running from Idle or GameOver. Resets score and cancels any
    /// scheduled cue. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.state == SessionState::Running {
            return false;
        }
        tracing::info!(from = self.state.name(), "session started");
        self.state = SessionState::Running;
        self.score = 0;
        self.tier = 1;
        self.new_record = false;
        self.pending_die = None;
        true
    }

    /// Award one point; the tier follows immediately.
    pub fn add_point(&mut self) {
        self.score += 1;
        let tier = tier_for_score(self.score);
        if tier != self.tier {
            tracing::info!(tier, score = self.score, "difficulty tier raised");
        }
        self.tier = tier;
    }

    /// Running -> GameOver. Persists a new high score. Returns false when
    /// not running, so repeated collisions do nothing.
    pub fn end(&mut self, store: &mut dyn HighScoreStore) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.state = SessionState::GameOver;
        self.pending_die = Some(DIE_CUE_DELAY_TICKS);
        tracing::info!(score = self.score, high_score = self.high_score, "game over");

        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_record = true;
            if let Err(e) = store.save(self.score) {
                tracing::warn!(error = %e, "failed to persist high score");
            }
        }
        true
    }

    /// Count down scheduled cues; returns a cue when one is due.
    pub fn tick_cues(&mut self) -> Option<Cue> {
        let remaining = self.pending_die.as_mut()?;
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            self.pending_die = None;
            return Some(Cue::Die);
        }
        None
    }

    pub fn die_cue_pending(&self) -> bool {
        self.pending_die.is_some()
    }

    /// Background music plays only while Idle, unmuted, with the menu
    /// closed. The port is called on edges only.
    pub fn sync_music(&mut self, audio: &mut dyn AudioPort) {
        let want = self.state == SessionState::Idle && !self.menu_open && !self.muted;
        if want == self.music_on {
            return;
        }
        if want {
            audio.start_loop();
        } else {
            audio.stop_loop();
        }
        self.music_on = want;
    }

    /// Record a mute flip. The next `sync_music` turns it into a loop edge.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::utils::persistence::MemoryHighScoreStore;

    #[test]
    fn test_primary_command_by_state() {
        let mut session = Session::new(0, false);
        assert_eq!(session.primary_command(), Command::Start);
        session.start();
        assert_eq!(session.primary_command(), Command::Flap);
        session.end(&mut MemoryHighScoreStore::default());
        assert_eq!(session.primary_command(), Command::Restart);
    }

    #[test]
    fn test_start_only_from_idle_or_game_over() {
        let mut session = Session::new(0, false);
        assert!(session.start());
        session.add_point();
        assert!(!session.start());
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut store = MemoryHighScoreStore::default();
        let mut session = Session::new(0, false);
        session.start();
        session.add_point();
        assert!(session.end(&mut store));
        assert!(!session.end(&mut store));
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_high_score_written_only_when_beaten() {
        let mut store = MemoryHighScoreStore::with_value(5);
        let mut session = Session::new(5, false);
        session.start();
        for _ in 0..5 {
            session.add_point();
        }
        session.end(&mut store);
        assert_eq!(store.writes, 0);
        assert_eq!(session.high_score, 5);
        assert!(!session.new_record);

        session.start();
        for _ in 0..6 {
            session.add_point();
        }
        session.end(&mut store);
        assert_eq!(store.writes, 1);
        assert_eq!(store.value, 6);
        assert_eq!(session.high_score, 6);
        assert!(session.new_record);
    }

    #[test]
    fn test_store_failure_keeps_session_high_score() {
        let mut store = MemoryHighScoreStore::default();
        store.fail_writes = true;
        let mut session = Session::new(0, false);
        session.start();
        session.add_point();
        assert!(session.end(&mut store));
        assert_eq!(session.high_score, 1);
        assert_eq!(store.value, 0);
    }

    #[test]
    fn test_tier_follows_score() {
        let mut session = Session::new(0, false);
        session.start();
        for _ in 0..10 {
            session.add_point();
        }
        assert_eq!(session.tier, 2);
        session.end(&mut MemoryHighScoreStore::default());
        session.start();
        assert_eq!(session.tier, 1);
    }

    #[test]
    fn test_die_cue_after_delay() {
        let mut session = Session::new(0, false);
        session.start();
        session.end(&mut MemoryHighScoreStore::default());
        for _ in 1..DIE_CUE_DELAY_TICKS {
            assert_eq!(session.tick_cues(), None);
        }
        assert_eq!(session.tick_cues(), Some(Cue::Die));
        assert_eq!(session.tick_cues(), None);
    }

    #[test]
    fn test_restart_cancels_die_cue() {
        let mut session = Session::new(0, false);
        session.start();
        session.end(&mut MemoryHighScoreStore::default());
        session.tick_cues();
        session.start();
        assert!(!session.die_cue_pending());
    }

    #[test]
    fn test_music_edges_only() {
        let mut audio = RecordingAudio::new();
        let mut session = Session::new(0, false);
        session.sync_music(&mut audio);
        session.sync_music(&mut audio);
        assert_eq!(audio.loop_starts, 1);

        session.menu_open = true;
        session.sync_music(&mut audio);
        assert_eq!(audio.loop_stops, 1);
        session.menu_open = false;
        session.sync_music(&mut audio);
        assert_eq!(audio.loop_starts, 2);

        session.start();
        session.sync_music(&mut audio);
        session.sync_music(&mut audio);
        assert_eq!(audio.loop_stops, 2);

        // Game over does not bring the music back.
        session.end(&mut MemoryHighScoreStore::default());
        session.sync_music(&mut audio);
        assert_eq!(audio.loop_starts, 2);
    }

    #[test]
    fn test_mute_flips_pair_loop_calls() {
        let mut audio = RecordingAudio::new();
        let mut session = Session::new(0, false);
        session.sync_music(&mut audio);

        session.set_muted(true);
        session.sync_music(&mut audio);
        session.sync_music(&mut audio);
        assert_eq!((audio.loop_starts, audio.loop_stops), (1, 1));

        session.set_muted(false);
        session.sync_music(&mut audio);
        assert_eq!((audio.loop_starts, audio.loop_stops), (2, 1));
    }

    #[test]
    fn test_starting_muted_never_starts_loop() {
        let mut audio = RecordingAudio::new();
        let mut session = Session::new(0, true);
        session.sync_music(&mut audio);
        assert_eq!(audio.loop_starts, 0);
    }
}

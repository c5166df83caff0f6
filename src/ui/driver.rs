//! Terminal host: owns the frame loop, feeds input and asset loads into the
//! game, and draws each tick's pixels.

use crate::assets::{AssetLoader, AssetSource, BuiltinAsset, SpriteSources};
use crate::audio::AudioPort;
use crate::core::constants::REALTIME_FRAME_MS;
use crate::core::{Command, Game, TickEvent, TickResult, Viewport};
use crate::render::pixel::PixelSurface;
use crate::ui::flappy_scene::render_game;
use crate::ui::game_common::game_layout;
use crate::ui::input::{map_key, map_mouse, HostAction};
use crate::utils::persistence::HighScoreStore;
use crate::utils::settings::Settings;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use rand::Rng;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Pixel size of the play area for a terminal of `cols` x `rows`.
pub fn play_area(cols: u16, rows: u16) -> Rect {
    game_layout(Rect::new(0, 0, cols, rows)).content
}

pub struct Driver<R: Rng, A: AudioPort> {
    pub game: Game<R>,
    pub surface: PixelSurface,
    pub audio: A,
    pub store: Box<dyn HighScoreStore>,
    pub loader: AssetLoader,
    /// Effective settings (file merged with command-line overrides).
    pub settings: Settings,
}

impl<R: Rng, A: AudioPort> Driver<R, A> {
    pub fn new(
        game: Game<R>,
        audio: A,
        store: Box<dyn HighScoreStore>,
        loader: AssetLoader,
        settings: Settings,
        cols: u16,
        rows: u16,
    ) -> Self {
        let area = play_area(cols, rows);
        let surface = PixelSurface::new(
            area.width as usize,
            area.height as usize * 2,
            game.config.surface_width,
            game.config.surface_height,
        );
        Self {
            game,
            surface,
            audio,
            store,
            loader,
            settings,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let requests = self.game.initial_loads();
        self.loader.spawn_all(requests);
        let frame_time = Duration::from_millis(REALTIME_FRAME_MS);

        loop {
            let frame_start = Instant::now();

            while event::poll(Duration::ZERO)? {
                if self.handle_event(event::read()?) == Flow::Quit {
                    tracing::info!(score = self.game.score(), "quit");
                    return Ok(());
                }
            }

            self.pump_assets();
            let result = self.game.tick(&mut self.surface, &mut self.audio, &mut *self.store);
            self.after_tick(&result);

            let custom_images = self.settings.has_custom_images();
            terminal.draw(|frame| {
                let area = frame.size();
                render_game(frame, area, &self.surface, &self.game, custom_images);
            })?;

            let elapsed = frame_start.elapsed();
            if elapsed < frame_time {
                std::thread::sleep(frame_time - elapsed);
            }
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Flow {
        let action = match event {
            Event::Key(key) => map_key(key, self.game.menu_open()),
            Event::Mouse(mouse) => map_mouse(mouse),
            Event::Resize(cols, rows) => {
                self.resize(cols, rows);
                None
            }
            _ => None,
        };
        match action {
            Some(action) => self.apply(action),
            None => Flow::Continue,
        }
    }

    pub fn apply(&mut self, action: HostAction) -> Flow {
        match action {
            HostAction::Primary => self.game.primary_action(),
            HostAction::ToggleMenu => self.game.push(Command::ToggleMenu),
            HostAction::ToggleMute => self.game.push(Command::ToggleMute),
            HostAction::ReloadCustomImages => {
                if !self.settings.has_custom_images() {
                    tracing::info!("no custom images configured");
                    return Flow::Continue;
                }
                let background = self.settings.background_source();
                let sprites = self.settings.sprite_sources();
                self.swap_images(background, sprites);
            }
            HostAction::RevertDefaultImages => {
                self.swap_images(
                    AssetSource::Builtin(BuiltinAsset::Background),
                    SpriteSources::builtin(),
                );
            }
            HostAction::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn swap_images(&mut self, background: AssetSource, sprites: SpriteSources) {
        let request = self.game.set_background_source(background);
        self.loader.spawn(request);
        let requests = self.game.set_player_sprite_sources(sprites);
        self.loader.spawn_all(requests);
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let area = play_area(cols, rows);
        self.game
            .resize(Viewport::from_terminal(area.width, area.height));
        self.surface.resize(
            area.width as usize,
            area.height as usize * 2,
            self.game.config.surface_width,
            self.game.config.surface_height,
        );
    }

    /// Hand finished loads to the game, spawning any fallback it asks for.
    pub fn pump_assets(&mut self) {
        for (ticket, result) in self.loader.poll() {
            if let Some(fallback) = self.game.complete_load(ticket, result) {
                self.loader.spawn(fallback);
            }
        }
    }

    fn after_tick(&mut self, result: &TickResult) {
        for event in &result.events {
            match event {
                TickEvent::GameOver { score, new_record } => {
                    tracing::info!(score, new_record, "round over");
                }
                TickEvent::MuteToggled { muted } => {
                    self.settings.muted = *muted;
                    // Only the mute flag is written back; command-line image
                    // overrides stay out of the settings file.
                    let mut stored = Settings::load();
                    stored.muted = *muted;
                    if let Err(e) = stored.save() {
                        tracing::warn!(error = %e, "failed to save settings");
                    }
                }
                _ => {}
            }
        }
    }
}

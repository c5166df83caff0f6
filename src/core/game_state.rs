//! Everything one running game owns, plus the calls the host makes between
//! ticks: queue commands, feed asset loads, swap sources, resize.

use super::config::{GameConfig, Viewport};
use super::effects::Effects;
use super::obstacles::ObstacleField;
use super::player::Player;
use super::session::{Command, Session, SessionState};
use crate::assets::{
    AssetError, AssetGate, AssetSource, Image, LoadRequest, LoadTicket, SpriteSources,
};
use crate::render::gradient::GradientCache;
use rand::Rng;
use std::collections::VecDeque;

/// Simulation state for a single game.
#[derive(Debug)]
pub struct Game<R: Rng> {
    pub config: GameConfig,
    pub player: Player,
    pub field: ObstacleField,
    pub effects: Effects,
    pub session: Session,
    pub assets: AssetGate,
    pub gradients: GradientCache,
    pub(crate) commands: VecDeque<Command>,
    pub(crate) rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(
        config: GameConfig,
        background: AssetSource,
        sprites: SpriteSources,
        high_score: u32,
        muted: bool,
        rng: R,
    ) -> Self {
        tracing::info!(
            device = config.device.name(),
            width = config.surface_width,
            height = config.surface_height,
            high_score,
            "game created"
        );
        Self {
            player: Player::new(&config),
            field: ObstacleField::new(),
            effects: Effects::new(),
            session: Session::new(high_score, muted),
            assets: AssetGate::new(background, sprites),
            gradients: GradientCache::new(),
            commands: VecDeque::new(),
            config,
            rng,
        }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Queue a command for the next tick.
    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Queue whatever the primary input means right now.
    pub fn primary_action(&mut self) {
        let command = self.session.primary_command();
        self.push(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    // ── Assets ──────────────────────────────────────────────────

    /// Requests for every asset slot; issue once at startup.
    pub fn initial_loads(&mut self) -> Vec<LoadRequest> {
        self.assets.request_all()
    }

    /// Feed a finished load back in. May return a fallback request.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Image, AssetError>,
    ) -> Option<LoadRequest> {
        self.assets.complete(ticket, result)
    }

    /// Swap the background image. The simulation pauses until it loads;
    /// obstacles and score are left alone.
    pub fn set_background_source(&mut self, source: AssetSource) -> LoadRequest {
        tracing::info!(source = %source.describe(), "background source changed");
        self.assets.request_background(source)
    }

    /// Swap all three player sprites, with the same gating as the background.
    pub fn set_player_sprite_sources(&mut self, sources: SpriteSources) -> Vec<LoadRequest> {
        tracing::info!(
            resting = %sources.resting.describe(),
            flapping = %sources.flapping.describe(),
            defeated = %sources.defeated.describe(),
            "player sprite sources changed"
        );
        self.assets.request_sprites(sources)
    }

    pub fn assets_ready(&self) -> bool {
        self.assets.is_ready()
    }

    pub fn waiting_on(&self) -> Vec<&'static str> {
        self.assets.waiting_on()
    }

    /// A load failed with nothing left to fall back to.
    pub fn assets_failed(&self) -> bool {
        self.assets.has_failures()
    }

    // ── Surface ─────────────────────────────────────────────────

    /// Follow a viewport change. In-flight obstacles and particles keep
    /// their absolute coordinates.
    pub fn resize(&mut self, viewport: Viewport) {
        self.config.resize(viewport);
        tracing::debug!(
            width = self.config.surface_width,
            height = self.config.surface_height,
            "surface resized"
        );
    }

    // ── Round lifecycle ─────────────────────────────────────────

    /// Fresh player, no obstacles, no effects, spawn counter at zero.
    pub(crate) fn reset_round(&mut self) {
        self.player = Player::new(&self.config);
        self.field.clear();
        self.effects.clear();
    }

    // ── Flags for overlays ──────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn is_idle(&self) -> bool {
        self.session.state == SessionState::Idle
    }

    pub fn is_running(&self) -> bool {
        self.session.state == SessionState::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.session.state == SessionState::GameOver
    }

    pub fn menu_open(&self) -> bool {
        self.session.menu_open
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn high_score(&self) -> u32 {
        self.session.high_score
    }

    pub fn tier(&self) -> u32 {
        self.session.tier
    }

    pub fn is_muted(&self) -> bool {
        self.session.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetKind, BuiltinAsset};
    use crate::core::config::DeviceClass;
    use crate::core::obstacles::Obstacle;
    use crate::render::color::Rgba;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn game() -> Game<ChaCha8Rng> {
        Game::new(
            GameConfig::resolve(DeviceClass::Full, Viewport::new(160, 80)),
            AssetSource::Builtin(BuiltinAsset::Background),
            SpriteSources::builtin(),
            7,
            false,
            ChaCha8Rng::seed_from_u64(1),
        )
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = game();
        assert!(game.is_idle());
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 7);
        assert!(!game.assets_ready());
    }

    #[test]
    fn test_primary_action_queues_by_state() {
        let mut game = game();
        game.primary_action();
        assert_eq!(game.commands.front(), Some(&Command::Start));
        game.session.state = SessionState::Running;
        game.primary_action();
        assert_eq!(game.commands.back(), Some(&Command::Flap));
        assert_eq!(game.pending_commands(), 2);
    }

    #[test]
    fn test_source_swap_keeps_obstacles() {
        let mut game = game();
        for req in game.initial_loads() {
            game.complete_load(req.ticket, Ok(Image::new(1, 1, Rgba::WHITE)));
        }
        assert!(game.assets_ready());
        game.field.obstacles.push(Obstacle {
            x: 100.0,
            top_height: 100.0,
            gap: 160.0,
            width: 60,
            speed: 3.0,
            passed: false,
            gradient: None,
        });
        game.session.score = 4;

        let req = game.set_background_source(AssetSource::file("sky.png"));
        assert_eq!(req.ticket.kind, AssetKind::Background);
        assert!(!game.assets_ready());
        assert_eq!(game.field.len(), 1);
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn test_resize_keeps_obstacle_coordinates() {
        let mut game = game();
        game.field.obstacles.push(Obstacle {
            x: 321.0,
            top_height: 100.0,
            gap: 160.0,
            width: 60,
            speed: 3.0,
            passed: false,
            gradient: None,
        });
        game.resize(Viewport::new(320, 80));
        assert_eq!(game.config.surface_width, 2560.0);
        assert_eq!(game.field.obstacles[0].x, 321.0);
    }
}

//! The per-tick orchestration.
//!
//! [`Game::tick`] drains queued commands, then runs the stages in a fixed
//! order: background, physics, spawn check, effects update, obstacle
//! move/draw/score/collide, player draw, HUD, boundary check, effects
//! draw. It returns a [`TickResult`] so the presentation layer can react
//! without the simulation knowing about any UI types.

use super::collision::{hits_boundary, hits_obstacle, try_pass};
use super::constants::PUFF_TRAIL_OFFSET;
use super::effects::ParticleKind;
use super::game_state::Game;
use super::session::{Command, SessionState};
use crate::audio::{AudioPort, Cue};
use crate::render::pipeline;
use crate::render::{RenderError, Surface};
use crate::utils::persistence::HighScoreStore;
use rand::Rng;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    Started,
    Flapped,
    Scored { score: u32 },
    TierChanged { tier: u32 },
    GameOver { score: u32, new_record: bool },
    MenuToggled { open: bool },
    MuteToggled { muted: bool },
    /// A draw stage failed; the rest of the frame still ran.
    RenderSkipped(RenderError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
    /// Assets are not ready; nothing was simulated or drawn.
    pub stalled: bool,
}

impl<R: Rng> Game<R> {
    /// Advance one frame and draw it onto `surface`.
    pub fn tick(
        &mut self,
        surface: &mut dyn Surface,
        audio: &mut dyn AudioPort,
        store: &mut dyn HighScoreStore,
    ) -> TickResult {
        let mut result = TickResult::default();
        let ready = self.assets.is_ready();
        self.drain_commands(ready, audio, &mut result);

        if !ready {
            result.stalled = true;
            surface.clear(pipeline::SKY);
            self.session.sync_music(audio);
            return result;
        }

        if let Some(cue) = self.session.tick_cues() {
            audio.play(cue);
        }

        // Background and ground
        if let Err(e) = pipeline::draw_background(surface, self.assets.background(), &self.config) {
            skip_frame_stage(e, &mut result);
        }
        pipeline::draw_ground(surface, &self.config);

        // Physics
        if self.session.is_active() {
            self.player.integrate(self.config.gravity);
            self.player.tick_animation();
        }

        // Spawn check
        if self.session.is_active() {
            self.field
                .spawn_check(&self.config, self.session.tier, &mut self.rng);
        }

        if self.config.features.effects {
            self.effects.update();
        }

        self.obstacle_stage(surface, audio, store, &mut result);

        // Player
        let sprite = self.assets.sprite(self.player.mode);
        if let Err(e) = pipeline::draw_player(surface, &self.player, sprite) {
            skip_frame_stage(e, &mut result);
        }

        if self.session.state != SessionState::Idle {
            pipeline::draw_hud(surface, self.session.score);
        }

        // Boundary check
        if self.session.is_active()
            && hits_boundary(&self.player.bounds(), self.config.ground_y())
            && self.session.end(store)
        {
            self.on_game_over(audio, &mut result);
        }

        if self.config.features.effects {
            pipeline::draw_effects(surface, &self.effects);
        }

        self.session.sync_music(audio);
        result
    }

    fn drain_commands(&mut self, ready: bool, audio: &mut dyn AudioPort, result: &mut TickResult) {
        while let Some(command) = self.commands.pop_front() {
            if self.session.menu_open && command != Command::ToggleMenu {
                tracing::debug!(?command, "command ignored while menu is open");
                continue;
            }
            match command {
                Command::ToggleMenu => {
                    self.session.menu_open = !self.session.menu_open;
                    tracing::debug!(open = self.session.menu_open, "menu toggled");
                    result.events.push(TickEvent::MenuToggled {
                        open: self.session.menu_open,
                    });
                }
                Command::ToggleMute => {
                    let muted = audio.toggle_mute();
                    self.session.set_muted(muted);
                    result.events.push(TickEvent::MuteToggled { muted });
                }
                Command::Start | Command::Restart => {
                    if !ready {
                        tracing::debug!(?command, "start ignored while assets load");
                        continue;
                    }
                    if self.session.start() {
                        self.reset_round();
                        audio.play(Cue::Start);
                        result.events.push(TickEvent::Started);
                    }
                }
                Command::Flap => {
                    if ready && self.session.is_active() {
                        self.flap(audio);
                        result.events.push(TickEvent::Flapped);
                    }
                }
            }
        }
    }

    fn flap(&mut self, audio: &mut dyn AudioPort) {
        self.player.flap(self.config.flap_strength);
        audio.play(Cue::Flap);
        if self.config.features.effects {
            let (x, y) = self.player.trailing_point(PUFF_TRAIL_OFFSET);
            self.effects.puff(x, y);
            self.effects.emit(ParticleKind::Flap, x, y, &mut self.rng);
        }
    }

    /// Move, draw, score and collide every obstacle, then retire the ones
    /// that left the surface. Once the session ends mid-loop the remaining
    /// obstacles are only moved and drawn.
    fn obstacle_stage(
        &mut self,
        surface: &mut dyn Surface,
        audio: &mut dyn AudioPort,
        store: &mut dyn HighScoreStore,
        result: &mut TickResult,
    ) {
        let moving = self.session.is_active();
        let bounds = self.player.bounds();
        let (cx, cy) = (bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0);
        let mut ended = false;

        for obstacle in self.field.obstacles.iter_mut() {
            if moving {
                obstacle.advance();
            }
            pipeline::draw_obstacle(surface, obstacle, &self.config, &mut self.gradients);

            if !self.session.is_active() {
                continue;
            }
            if try_pass(&bounds, obstacle) {
                let tier = self.session.tier;
                self.session.add_point();
                audio.play(Cue::Score);
                result.events.push(TickEvent::Scored {
                    score: self.session.score,
                });
                if self.session.tier != tier {
                    result.events.push(TickEvent::TierChanged {
                        tier: self.session.tier,
                    });
                }
                if self.config.features.effects {
                    self.effects.emit(ParticleKind::Score, cx, cy, &mut self.rng);
                }
            }
            if hits_obstacle(&bounds, obstacle) && self.session.end(store) {
                ended = true;
            }
        }
        self.field.retire();

        if ended {
            self.on_game_over(audio, result);
        }
    }

    fn on_game_over(&mut self, audio: &mut dyn AudioPort, result: &mut TickResult) {
        self.player.defeat();
        audio.play(Cue::Hit);
        if self.config.features.effects {
            let bounds = self.player.bounds();
            self.effects.emit(
                ParticleKind::Collision,
                bounds.x + bounds.width / 2.0,
                bounds.y + bounds.height / 2.0,
                &mut self.rng,
            );
        }
        result.events.push(TickEvent::GameOver {
            score: self.session.score,
            new_record: self.session.new_record,
        });
    }
}

/// A failed draw stage never ends the loop; note it and carry on.
fn skip_frame_stage(error: RenderError, result: &mut TickResult) {
    tracing::debug!(%error, "render stage skipped");
    result.events.push(TickEvent::RenderSkipped(error));
}

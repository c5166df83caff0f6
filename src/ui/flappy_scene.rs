//! The game screen: pixel play area, status bar and state overlays.

use crate::core::{Game, SessionState};
use crate::render::pixel::PixelSurface;
use crate::ui::game_common::{controls_line, game_layout, render_panel, render_status_bar};
use crate::ui::pixel_view::PixelView;
use rand::Rng;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};

const CONTROLS: [(&str, &str); 4] = [
    ("[Space]", "Flap"),
    ("[M]", "Menu"),
    ("[S]", "Sound"),
    ("[Q]", "Quit"),
];

/// Which panel sits on top of the play area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Menu { custom_images: bool },
    /// `failed` once a load has failed with no fallback left to try.
    Waiting {
        assets: Vec<&'static str>,
        failed: bool,
    },
    Title { high_score: u32 },
    GameOver {
        score: u32,
        high_score: u32,
        new_record: bool,
    },
}

/// Menu first, then the asset gate, then the session state.
pub fn overlay_for<R: Rng>(game: &Game<R>, custom_images: bool) -> Option<Overlay> {
    if game.menu_open() {
        return Some(Overlay::Menu { custom_images });
    }
    if !game.assets_ready() {
        return Some(Overlay::Waiting {
            assets: game.waiting_on(),
            failed: game.assets_failed(),
        });
    }
    match game.state() {
        SessionState::Idle => Some(Overlay::Title {
            high_score: game.high_score(),
        }),
        SessionState::GameOver => Some(Overlay::GameOver {
            score: game.score(),
            high_score: game.high_score(),
            new_record: game.session.new_record,
        }),
        SessionState::Running => None,
    }
}

/// Line 1 of the status bar.
pub fn status_text<R: Rng>(game: &Game<R>) -> String {
    let sound = if game.is_muted() { "muted" } else { "sound on" };
    format!(
        "Score: {}  Best: {}  Tier: {}  ({})",
        game.score(),
        game.high_score(),
        game.tier(),
        sound
    )
}

pub fn render_game<R: Rng>(
    frame: &mut Frame,
    area: Rect,
    surface: &PixelSurface,
    game: &Game<R>,
    custom_images: bool,
) {
    let layout = game_layout(area);

    let block = Block::default()
        .title(" Flapper ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, layout.frame);
    frame.render_widget(PixelView::new(surface), layout.content);

    let status_color = match game.state() {
        SessionState::Running => Color::White,
        SessionState::Idle => Color::Cyan,
        SessionState::GameOver => Color::Red,
    };
    let status = Line::from(Span::styled(
        status_text(game),
        Style::default().fg(status_color),
    ));
    render_status_bar(frame, layout.status_bar, status, controls_line(&CONTROLS));

    if let Some(overlay) = overlay_for(game, custom_images) {
        render_overlay(frame, layout.content, &overlay);
    }
}

fn render_overlay(frame: &mut Frame, area: Rect, overlay: &Overlay) {
    match overlay {
        Overlay::Menu { custom_images } => {
            let reload_style = if *custom_images {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let lines = vec![
                Line::from(vec![
                    Span::styled("[1] ", Style::default().fg(Color::Yellow)),
                    Span::styled("Reload custom images", reload_style),
                ]),
                Line::from(vec![
                    Span::styled("[2] ", Style::default().fg(Color::Yellow)),
                    Span::styled("Use default images", Style::default().fg(Color::White)),
                ]),
            ];
            render_panel(frame, area, "Menu", Color::Yellow, lines, "[M] Close");
        }
        Overlay::Waiting { assets, failed } => {
            let names = if assets.is_empty() {
                "images".to_string()
            } else {
                assets.join(", ")
            };
            if *failed {
                let lines = vec![Line::from(Span::styled(
                    format!("Could not load {}", names),
                    Style::default().fg(Color::White),
                ))];
                render_panel(frame, area, "Image failed", Color::Red, lines, "[M] Menu");
            } else {
                let lines = vec![Line::from(Span::styled(
                    format!("Loading {}...", names),
                    Style::default().fg(Color::White),
                ))];
                render_panel(frame, area, "Please wait", Color::Cyan, lines, "[M] Menu");
            }
        }
        Overlay::Title { high_score } => {
            let lines = vec![Line::from(Span::styled(
                format!("Best: {}", high_score),
                Style::default().fg(Color::White),
            ))];
            render_panel(frame, area, "FLAPPER", Color::Green, lines, "[Space] Start");
        }
        Overlay::GameOver {
            score,
            high_score,
            new_record,
        } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("Score: {}", score),
                    Style::default().fg(Color::White),
                )),
                Line::from(Span::styled(
                    format!("Best: {}", high_score),
                    Style::default().fg(Color::Gray),
                )),
            ];
            if *new_record {
                lines.push(Line::from(Span::styled(
                    "New record!",
                    Style::default().fg(Color::Yellow),
                )));
            }
            render_panel(frame, area, "GAME OVER", Color::Red, lines, "[Space] Restart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetError, AssetSource, BuiltinAsset, SpriteSources};
    use crate::core::{DeviceClass, GameConfig, Viewport};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn game() -> Game<ChaCha8Rng> {
        let config = GameConfig::resolve(DeviceClass::Full, Viewport::new(80, 40));
        Game::new(
            config,
            AssetSource::Builtin(BuiltinAsset::Background),
            SpriteSources::builtin(),
            7,
            false,
            ChaCha8Rng::seed_from_u64(3),
        )
    }

    #[test]
    fn test_waiting_before_assets_load() {
        let g = game();
        assert!(matches!(
            overlay_for(&g, false),
            Some(Overlay::Waiting { ref assets, failed: false }) if !assets.is_empty()
        ));
    }

    #[test]
    fn test_waiting_reports_failed_load() {
        let mut g = game();
        let requests = g.initial_loads();
        // The built-in background has no fallback.
        let background = requests[0].ticket;
        let err = AssetError::Empty("background".to_string());
        assert!(g.complete_load(background, Err(err)).is_none());
        assert!(matches!(
            overlay_for(&g, false),
            Some(Overlay::Waiting { failed: true, .. })
        ));
    }

    #[test]
    fn test_menu_wins_over_waiting() {
        let mut g = game();
        g.session.menu_open = true;
        assert_eq!(
            overlay_for(&g, true),
            Some(Overlay::Menu {
                custom_images: true
            })
        );
    }

    #[test]
    fn test_status_text_shows_mute() {
        let mut g = game();
        assert!(status_text(&g).contains("Best: 7"));
        assert!(status_text(&g).contains("sound on"));
        g.session.muted = true;
        assert!(status_text(&g).contains("muted"));
    }
}

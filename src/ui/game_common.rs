//! Shared layout and overlay components.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Height of the status bar under the play area.
pub const STATUS_ROWS: u16 = 2;

/// Areas of the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    /// Outer border area.
    pub frame: Rect,
    /// Pixel play area inside the border.
    pub content: Rect,
    /// Status bar (2 lines) under the play area.
    pub status_bar: Rect,
}

/// Split the screen into a bordered play area and a status bar.
///
/// ```text
/// ┌─ Flapper ───────────────────────┐
/// │                                 │
/// │   [content area]                │
/// │                                 │
/// │ [status bar - 2 lines]          │
/// └─────────────────────────────────┘
/// ```
pub fn game_layout(area: Rect) -> GameLayout {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_ROWS)])
        .split(inner);
    GameLayout {
        frame: area,
        content: chunks[0],
        status_bar: chunks[1],
    }
}

/// Key hints for the second status row, e.g. `[Space] Flap  [Q] Quit`.
pub fn controls_line(controls: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(controls.len() * 3);
    for (key, action) in controls {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Score line over key hints, centred. Rows past the area are clipped.
pub fn render_status_bar(frame: &mut Frame, area: Rect, status: Line<'_>, controls: Line<'_>) {
    let rows = Paragraph::new(vec![status, controls]).alignment(Alignment::Center);
    frame.render_widget(rows, area);
}

/// A rect of at most `width` x `height` centred in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Render a bordered panel centred over `area`, leaving the rest visible.
///
/// The title is bold in `color`; `hint` goes on the last line in dark gray.
pub fn render_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    color: Color,
    lines: Vec<Line<'_>>,
    hint: &str,
) {
    let body_width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let width = body_width.max(title.len()).max(hint.len()) as u16 + 6;
    // Border, title, gap, body, gap, hint.
    let height = lines.len() as u16 + 6;
    let panel = centered_rect(width, height, area);

    frame.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let mut text = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    text.extend(lines);
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_layout_reserves_border_and_status() {
        let layout = game_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.content, Rect::new(1, 1, 78, 20));
        assert_eq!(layout.status_bar, Rect::new(1, 21, 78, 2));
    }

    #[test]
    fn test_layout_tiny_terminal() {
        let layout = game_layout(Rect::new(0, 0, 4, 3));
        assert_eq!(layout.content.width, 2);
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(10, 5, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(15, 8, 10, 4));
        assert_eq!(centered_rect(50, 50, area), area);
    }

    #[test]
    fn test_controls_line_spacing() {
        let line = controls_line(&[("[Space]", "Flap"), ("[Q]", "Quit")]);
        assert_eq!(line.spans.len(), 5);
        assert_eq!(line.width(), "[Space] Flap  [Q] Quit".len());
    }

    #[test]
    fn test_status_bar_draws_both_rows() {
        let mut terminal = Terminal::new(TestBackend::new(40, 2)).expect("backend");
        terminal
            .draw(|frame| {
                let area = frame.size();
                let controls = controls_line(&[("[Q]", "Quit")]);
                render_status_bar(frame, area, Line::from("Score: 3"), controls);
            })
            .expect("draw");
        let buf = terminal.backend().buffer();
        let row = |y: u16| (0..40).map(|x| buf.get(x, y).symbol()).collect::<String>();
        assert!(row(0).contains("Score: 3"));
        assert!(row(1).contains("[Q] Quit"));
    }
}

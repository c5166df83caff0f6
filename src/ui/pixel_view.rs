//! Half-block widget: two pixel rows per terminal cell, upper pixel in the
//! foreground of '▀' and lower pixel in the background.

use crate::render::color::Rgba;
use crate::render::pixel::PixelSurface;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

pub const HALF_BLOCK: char = '▀';

pub fn to_color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

pub struct PixelView<'a> {
    surface: &'a PixelSurface,
}

impl<'a> PixelView<'a> {
    pub fn new(surface: &'a PixelSurface) -> Self {
        Self { surface }
    }
}

impl Widget for PixelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = area.height.min((self.surface.height() / 2) as u16);
        let cols = area.width.min(self.surface.width() as u16);
        for row in 0..rows {
            for col in 0..cols {
                let x = col as usize;
                let y = row as usize * 2;
                let top = self.surface.get(x, y);
                let bottom = self.surface.get(x, y + 1);
                buf.get_mut(area.x + col, area.y + row)
                    .set_char(HALF_BLOCK)
                    .set_fg(to_color(top))
                    .set_bg(to_color(bottom));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collision::Bounds;
    use crate::render::color::Fill;
    use crate::render::Surface;

    #[test]
    fn test_two_pixel_rows_per_cell() {
        let mut surface = PixelSurface::new(2, 2, 2.0, 2.0);
        surface.clear(Rgba::BLACK);
        surface.fill_rect(Bounds::new(0.0, 0.0, 2.0, 1.0), &Fill::Solid(Rgba::WHITE));

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        PixelView::new(&surface).render(area, &mut buf);

        let cell = buf.get(1, 0);
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_larger_area_than_surface_is_safe() {
        let surface = PixelSurface::new(1, 2, 1.0, 2.0);
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = Buffer::empty(area);
        PixelView::new(&surface).render(area, &mut buf);
        assert_eq!(buf.get(3, 3).symbol(), " ");
    }
}

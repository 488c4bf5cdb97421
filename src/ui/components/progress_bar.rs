use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Below this share of time left the bar switches to the warning colour.
const LOW_TIME: f64 = 0.25;

pub struct ProgressBar<'a> {
    pub label: String,
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    /// `progress` is the 0-100 remaining-time value of the current word.
    pub fn from_progress(label: &str, progress: f64, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            ratio: (progress / 100.0).clamp(0.0, 1.0),
            theme,
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio * inner.width as f64).round() as u16;
        let fill = if self.ratio < LOW_TIME {
            colors.warning()
        } else {
            colors.bar_filled()
        };

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(fill)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_maps_to_ratio() {
        let theme = Theme::default();
        assert_eq!(ProgressBar::from_progress("Time", 40.0, &theme).ratio, 0.4);
        assert_eq!(ProgressBar::from_progress("Time", -3.0, &theme).ratio, 0.0);
        assert_eq!(ProgressBar::from_progress("Time", 120.0, &theme).ratio, 1.0);
    }

    #[test]
    fn test_render_fills_proportionally() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        ProgressBar::from_progress("Time", 50.0, &theme).render(area, &mut buf);
        assert_eq!(buf[(1, 1)].bg, theme.colors.bar_filled());
        assert_eq!(buf[(10, 1)].bg, theme.colors.bar_empty());
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use typeblitz::session::state::Snapshot;

use crate::ui::theme::Theme;

pub struct StatsHeader<'a> {
    snapshot: &'a Snapshot,
    theme: &'a Theme,
}

impl<'a> StatsHeader<'a> {
    pub fn new(snapshot: &'a Snapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }
}

/// `m:ss` for the session clock.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

impl Widget for StatsHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let snap = self.snapshot;
        let label = Style::default().fg(colors.header_fg());
        let value = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled(format!(" {} ", snap.session.mode), value),
            Span::styled("  Tier ", label),
            Span::styled(
                snap.session.tier.label(),
                Style::default()
                    .fg(colors.tier(snap.session.tier))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Score ", label),
            Span::styled(snap.score.words_completed.to_string(), value),
            Span::styled("  Best ", label),
            Span::styled(snap.session.high_score.to_string(), value),
            Span::styled("  Acc ", label),
            Span::styled(format!("{:.0}%", snap.accuracy), value),
            Span::styled("  WPM ", label),
            Span::styled(snap.wpm.to_string(), value),
        ];

        if let Some(secs) = snap.session.session_time_remaining {
            let style = if secs <= 10 {
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD)
            } else {
                value
            };
            spans.push(Span::styled("  Left ", label));
            spans.push(Span::styled(format_clock(secs), style));
        }

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()));
        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}

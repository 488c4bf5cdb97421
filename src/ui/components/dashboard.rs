use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use typeblitz::session::events::{EndReason, SessionSummary};

use crate::ui::theme::Theme;

/// End-of-session results.
pub struct Dashboard<'a> {
    pub summary: &'a SessionSummary,
    pub reason: EndReason,
    pub new_best: bool,
    pub theme: &'a Theme,
}

fn headline(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Completed => "Word list cleared",
        EndReason::TimedOut => "Time's up",
        EndReason::Quit => "Session ended",
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let summary = self.summary;

        let block = Block::bordered()
            .title(format!(" {} ", summary.mode))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let mut title_spans = vec![Span::styled(
            headline(self.reason),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )];
        if self.new_best {
            title_spans.push(Span::styled(
                "  New high score!",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Paragraph::new(Line::from(title_spans))
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let acc_color = if summary.accuracy >= 95.0 {
            colors.success()
        } else if summary.accuracy >= 85.0 {
            colors.warning()
        } else {
            colors.text_incorrect()
        };

        let rows = [
            ("  Words:    ", summary.words_completed.to_string(), colors.accent()),
            ("  Accuracy: ", format!("{:.0}%", summary.accuracy), acc_color),
            ("  Speed:    ", format!("{} WPM", summary.wpm), colors.accent()),
            ("  Reached:  ", summary.tier.label().to_string(), colors.tier(summary.tier)),
            ("  Best:     ", summary.high_score.to_string(), colors.fg()),
        ];
        for (i, (name, value, color)) in rows.into_iter().enumerate() {
            Paragraph::new(Line::from(vec![
                Span::styled(name, Style::default().fg(colors.fg())),
                Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ]))
            .render(layout[i + 1], buf);
        }

        Paragraph::new(Line::from(vec![
            Span::styled("  [r] Play again  ", Style::default().fg(colors.accent())),
            Span::styled("[q/Esc] Menu", Style::default().fg(colors.accent())),
        ]))
        .render(layout[7], buf);
    }
}

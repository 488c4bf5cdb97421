use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use typeblitz::engine::input::CharStatus;
use typeblitz::session::state::{SessionPhase, Snapshot};

use crate::ui::theme::Theme;

/// The current word, coloured per position, or the countdown while it runs.
pub struct TypingArea<'a> {
    snapshot: &'a Snapshot,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(snapshot: &'a Snapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }
}

/// Letters spaced out so single words read at a glance.
fn spaced(ch: char) -> String {
    format!("{ch} ")
}

fn word_spans<'a>(word: &str, statuses: &[CharStatus], theme: &Theme) -> Vec<Span<'a>> {
    let colors = &theme.colors;
    let cursor = statuses.len();
    word.chars()
        .enumerate()
        .map(|(idx, expected)| match statuses.get(idx) {
            Some(CharStatus::Correct) => Span::styled(
                spaced(expected),
                Style::default()
                    .fg(colors.text_correct())
                    .add_modifier(Modifier::BOLD),
            ),
            Some(CharStatus::Incorrect(actual)) => Span::styled(
                spaced(*actual),
                Style::default()
                    .fg(colors.text_incorrect())
                    .bg(colors.text_incorrect_bg())
                    .add_modifier(Modifier::UNDERLINED),
            ),
            None if idx == cursor => Span::styled(
                spaced(expected),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::UNDERLINED),
            ),
            None => Span::styled(spaced(expected), Style::default().fg(colors.text_pending())),
        })
        .collect()
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let tier_color = colors.tier(self.snapshot.session.tier);

        let block = Block::bordered()
            .title(format!(" {} ", self.snapshot.session.tier))
            .border_style(Style::default().fg(tier_color))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let body = match (self.snapshot.session.phase, &self.snapshot.round.current_word) {
            (SessionPhase::Countdown(remaining), _) => Line::from(Span::styled(
                format!("{remaining}"),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            (SessionPhase::Idle, _) => Line::from(Span::styled(
                "Press Enter to start",
                Style::default().fg(colors.text_pending()),
            )),
            (_, Some(word)) => Line::from(word_spans(word, &self.snapshot.statuses, self.theme)),
            (_, None) => Line::from(""),
        };

        let top_pad = inner.height.saturating_sub(1) / 2;
        let mut lines = vec![Line::from(""); top_pad as usize];
        lines.push(body);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_spans_mark_each_position() {
        let theme = Theme::default();
        let statuses = vec![CharStatus::Correct, CharStatus::Incorrect('x')];
        let spans = word_spans("apple", &statuses, &theme);
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].content, "a ");
        assert_eq!(spans[1].content, "x ");
        assert_eq!(spans[2].content, "p ");
        assert!(spans[2].style.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(spans[4].style.fg, Some(theme.colors.text_pending()));
    }

    #[test]
    fn test_correct_letters_use_correct_colour() {
        let theme = Theme::default();
        let spans = word_spans("hi", &[CharStatus::Correct, CharStatus::Correct], &theme);
        assert!(spans.iter().all(|s| s.style.fg == Some(theme.colors.text_correct())));
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use typeblitz::engine::tier::DifficultyTier;
use typeblitz::session::mode::GameMode;
use typeblitz::session::state::Settings;

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Play(GameMode),
    AdjustTimeLimit,
    ToggleSound,
    Quit,
}

pub struct MenuItem {
    pub key: char,
    pub label: String,
    pub description: String,
    pub action: MenuAction,
}

pub struct Menu {
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

/// Minutes offered by the time limit entry, cycled in order.
pub const TIME_LIMIT_STEPS: [u32; 6] = [0, 1, 2, 3, 5, 10];

pub fn next_time_limit(current: u32) -> u32 {
    TIME_LIMIT_STEPS
        .iter()
        .copied()
        .find(|&m| m > current)
        .unwrap_or(TIME_LIMIT_STEPS[0])
}

fn practice_item(key: char, tier: DifficultyTier) -> MenuItem {
    MenuItem {
        key,
        label: format!("Practice: {tier}"),
        description: format!("{} words, ends when the list runs out", tier.length_band()),
        action: MenuAction::Play(GameMode::Practice(tier)),
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        Self {
            items: vec![
                practice_item('1', DifficultyTier::Easy),
                practice_item('2', DifficultyTier::Medium),
                practice_item('3', DifficultyTier::Hard),
                MenuItem {
                    key: 't',
                    label: "Timeless".to_string(),
                    description: "Climb from easy to hard; the clock only stops you if set".to_string(),
                    action: MenuAction::Play(GameMode::Timeless),
                },
                MenuItem {
                    key: 'l',
                    label: "Session time limit".to_string(),
                    description: "Applies to timeless sessions".to_string(),
                    action: MenuAction::AdjustTimeLimit,
                },
                MenuItem {
                    key: 's',
                    label: "Sound".to_string(),
                    description: "Terminal bell on mistakes, words and level ups".to_string(),
                    action: MenuAction::ToggleSound,
                },
                MenuItem {
                    key: 'q',
                    label: "Quit".to_string(),
                    description: String::new(),
                    action: MenuAction::Quit,
                },
            ],
            selected: 0,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        self.items[self.selected].action
    }

    pub fn action_for_key(&self, key: char) -> Option<MenuAction> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.action)
    }
}

pub struct MenuView<'a> {
    pub menu: &'a Menu,
    pub settings: Settings,
    pub theme: &'a Theme,
}

impl MenuView<'_> {
    fn value_for(&self, action: MenuAction) -> Option<String> {
        match action {
            MenuAction::AdjustTimeLimit => Some(match self.settings.session_time_limit_minutes {
                0 => "off".to_string(),
                m => format!("{m} min"),
            }),
            MenuAction::ToggleSound => Some(if self.settings.sound_enabled { "on" } else { "off" }.to_string()),
            _ => None,
        }
    }
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "typeblitz",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Type the word before the bar runs out",
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.menu
                    .items
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.menu.items.iter().enumerate() {
            let is_selected = i == self.menu.selected;
            let indicator = if is_selected { ">" } else { " " };

            let mut label_spans = vec![Span::styled(
                format!(" {indicator} [{}] {}", item.key, item.label),
                Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.fg() })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            )];
            if let Some(value) = self.value_for(item.action) {
                label_spans.push(Span::styled(
                    format!("  {value}"),
                    Style::default().fg(colors.warning()),
                ));
            }

            let lines = vec![
                Line::from(label_spans),
                Line::from(Span::styled(
                    format!("     {}", item.description),
                    Style::default().fg(colors.text_pending()),
                )),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use typeblitz::config::Config;
use typeblitz::engine::input::Key;
use typeblitz::generator::pool::WordPool;
use typeblitz::session::controller::SessionController;
use typeblitz::session::events::{EndReason, GameEvent, SessionSummary};
use typeblitz::session::mode::GameMode;
use typeblitz::session::state::SessionPhase;
use typeblitz::store::HighScoreStore;

use crate::ui::components::menu::{Menu, MenuAction, next_time_limit};
use crate::ui::theme::Theme;

/// How long the level-up note stays on screen.
const NOTICE_MS: u64 = 1_500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Game,
    Result,
}

pub struct Notice {
    pub text: String,
    pub remaining_ms: u64,
}

pub struct LastResult {
    pub reason: EndReason,
    pub summary: SessionSummary,
    pub new_best: bool,
}

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu,
    pub theme: Theme,
    pub config: Config,
    pub controller: SessionController<Box<dyn HighScoreStore>>,
    pub notice: Option<Notice>,
    pub last_result: Option<LastResult>,
    pub should_quit: bool,
    /// Persist settings changes to the config file.
    pub save_config: bool,
    new_best: bool,
    bells: u32,
}

impl App {
    pub fn new(
        config: Config,
        pool: WordPool,
        store: Box<dyn HighScoreStore>,
        theme: Theme,
        seed: Option<u64>,
    ) -> Self {
        let mode = config.starting_mode();
        let options = config.session_options();
        let controller = match seed {
            Some(seed) => SessionController::seeded(pool, store, mode, options, seed),
            None => SessionController::new(pool, store, mode, options),
        };
        Self {
            screen: AppScreen::Menu,
            menu: Menu::new(),
            theme,
            config,
            controller,
            notice: None,
            last_result: None,
            should_quit: false,
            save_config: true,
            new_best: false,
            bells: 0,
        }
    }

    /// Jump straight into a session, skipping the menu.
    pub fn play(&mut self, mode: GameMode) {
        self.controller.select_mode(mode);
        self.new_best = false;
        self.notice = None;
        self.controller.begin();
        self.screen = AppScreen::Game;
        self.process_events();
    }

    /// Number of bells to ring since the last call.
    pub fn take_bells(&mut self) -> u32 {
        std::mem::take(&mut self.bells)
    }

    pub fn tick(&mut self, delta_ms: u64) {
        self.controller.advance(delta_ms);
        if let Some(notice) = &mut self.notice {
            notice.remaining_ms = notice.remaining_ms.saturating_sub(delta_ms);
            if notice.remaining_ms == 0 {
                self.notice = None;
            }
        }
        self.process_events();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.controller.quit();
            self.should_quit = true;
            return;
        }
        match self.screen {
            AppScreen::Menu => self.handle_menu_key(key),
            AppScreen::Game => self.handle_game_key(key),
            AppScreen::Result => self.handle_result_key(key),
        }
        self.process_events();
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu.prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu.next();
                None
            }
            KeyCode::Enter => Some(self.menu.selected_action()),
            KeyCode::Esc => Some(MenuAction::Quit),
            KeyCode::Char(c) => self.menu.action_for_key(c),
            _ => None,
        };
        if let Some(action) = action {
            self.run_menu_action(action);
        }
    }

    fn run_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Play(mode) => self.play(mode),
            MenuAction::AdjustTimeLimit => {
                self.config.session_time_limit_minutes =
                    next_time_limit(self.config.session_time_limit_minutes);
                self.apply_settings();
            }
            MenuAction::ToggleSound => {
                self.config.sound_enabled = !self.config.sound_enabled;
                self.apply_settings();
            }
            MenuAction::Quit => self.should_quit = true,
        }
    }

    fn apply_settings(&mut self) {
        self.controller.update_settings(self.config.settings());
        if self.save_config {
            if let Err(e) = self.config.save() {
                log::warn!("settings not saved: {e:#}");
            }
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        match (self.controller.phase(), key.code) {
            (_, KeyCode::Esc) => {
                if self.controller.phase().is_running() {
                    self.controller.quit();
                } else {
                    self.back_to_menu();
                }
            }
            (SessionPhase::Idle, KeyCode::Enter) => self.controller.begin(),
            (_, code) => {
                if let Some(key) = to_game_key(code) {
                    self.controller.key(key);
                }
            }
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') => {
                let mode = self.controller.mode();
                self.controller.restart();
                self.play(mode);
            }
            KeyCode::Char('q') | KeyCode::Esc => self.back_to_menu(),
            _ => {}
        }
    }

    fn back_to_menu(&mut self) {
        self.controller.restart();
        self.notice = None;
        self.screen = AppScreen::Menu;
    }

    fn ring(&mut self) {
        if self.config.sound_enabled {
            self.bells += 1;
        }
    }

    fn process_events(&mut self) {
        for event in self.controller.drain_events() {
            match event {
                GameEvent::WordMismatch(mismatch) => {
                    log::trace!(
                        "mismatch at {}: expected {}, got {}",
                        mismatch.position,
                        mismatch.expected,
                        mismatch.actual
                    );
                    self.ring();
                }
                GameEvent::WordCompleted { .. } => self.ring(),
                GameEvent::TierAdvanced { to, .. } => {
                    self.ring();
                    self.notice = Some(Notice {
                        text: format!("Level up! Now playing {to}"),
                        remaining_ms: NOTICE_MS,
                    });
                }
                GameEvent::HighScore { .. } => self.new_best = true,
                GameEvent::SessionEnded { reason, summary } => {
                    self.last_result = Some(LastResult {
                        reason,
                        summary,
                        new_best: self.new_best,
                    });
                    self.notice = None;
                    self.screen = AppScreen::Result;
                }
                GameEvent::CountdownTick { .. }
                | GameEvent::SessionStarted { .. }
                | GameEvent::WordShown { .. }
                | GameEvent::WordExpired { .. } => {}
            }
        }
    }
}

fn to_game_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Enter => Some(Key::Enter),
        _ => None,
    }
}

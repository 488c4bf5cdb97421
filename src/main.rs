mod app;
mod event;
mod ui;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use typeblitz::config::Config;
use typeblitz::engine::tier::DifficultyTier;
use typeblitz::generator::dictionary;
use typeblitz::session::mode::GameMode;
use typeblitz::store::{HighScoreStore, JsonStore, MemoryStore};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use ui::components::dashboard::Dashboard;
use ui::components::menu::MenuView;
use ui::components::progress_bar::ProgressBar;
use ui::components::stats_header::{StatsHeader, format_clock};
use ui::components::typing_area::TypingArea;
use ui::layout::{GameLayout, centered_rect, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(name = "typeblitz", version, about = "Type each word before its timer runs out")]
struct Cli {
    #[arg(short, long, help = "Start straight into a mode (practice, timeless)")]
    mode: Option<String>,

    #[arg(short, long, help = "Practice difficulty (easy, medium, hard)")]
    difficulty: Option<DifficultyTier>,

    #[arg(long, help = "Timeless session limit in minutes, 0 for none")]
    time_limit: Option<u32>,

    #[arg(long, help = "Seed for word selection")]
    seed: Option<u64>,

    #[arg(long, help = "Directory with easy.json, medium.json and hard.json")]
    words_dir: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Disable the terminal bell")]
    mute: bool,
}

fn init_logging() -> Result<()> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("typeblitz");
    fs::create_dir_all(&dir)?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("typeblitz.log"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn open_store() -> Box<dyn HighScoreStore> {
    match JsonStore::new() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("high scores will not persist: {e}");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("logging disabled: {e:#}");
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("using default config: {e:#}");
        Config::default()
    });
    if let Some(minutes) = cli.time_limit {
        config.session_time_limit_minutes = minutes;
    }
    if let Some(difficulty) = cli.difficulty {
        config.default_difficulty = difficulty;
    }
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if cli.mute {
        config.sound_enabled = false;
    }

    let words_dir = cli.words_dir.clone().or_else(|| config.word_list_dir.clone());
    let pool = match &words_dir {
        Some(dir) => dictionary::from_dir(dir)
            .with_context(|| format!("loading word lists from {}", dir.display()))?,
        None => dictionary::bundled().context("loading bundled word lists")?,
    };

    let start_mode = match &cli.mode {
        Some(name) => Some(
            GameMode::from_name(name, config.default_difficulty)
                .with_context(|| format!("unknown mode {name:?}"))?,
        ),
        None => None,
    };

    let theme = Theme::load(&config.theme, &Config::config_dir()).unwrap_or_else(|| {
        log::warn!(
            "theme {:?} not found, using default (bundled: {})",
            config.theme,
            Theme::available_themes().join(", ")
        );
        Theme::default()
    });

    let mut app = App::new(config, pool, open_store(), theme, cli.seed);
    // Command-line overrides are for this run only.
    app.save_config = cli.time_limit.is_none()
        && cli.difficulty.is_none()
        && cli.theme.is_none()
        && !cli.mute;
    if let Some(mode) = start_mode {
        app.play(mode);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick = Duration::from_millis(app.config.tick_ms.clamp(10, 100));
    let events = EventHandler::new(tick);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("{err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    let mut last = Instant::now();
    loop {
        terminal.draw(|frame| render(frame, app))?;

        let event = events.next()?;

        // Whole milliseconds only; the remainder carries into the next frame.
        let delta_ms = last.elapsed().as_millis() as u64;
        last += Duration::from_millis(delta_ms);
        app.tick(delta_ms);

        match event {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.take_bells() > 0 {
            let backend = terminal.backend_mut();
            backend.write_all(b"\x07")?;
            backend.flush()?;
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Game => render_game(frame, app),
        AppScreen::Result => render_result(frame, app),
    }
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, hints: &[&str], area: ratatui::layout::Rect) {
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(app.theme.colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let menu_area = centered_rect(64, 24, layout[0]);
    frame.render_widget(
        MenuView {
            menu: &app.menu,
            settings: app.controller.settings(),
            theme: &app.theme,
        },
        menu_area,
    );

    render_footer(frame, app, &["[j/k] Move", "[Enter] Select", "[q] Quit"], layout[1]);
}

fn render_game(frame: &mut ratatui::Frame, app: &App) {
    let snapshot = app.controller.snapshot();
    let colors = &app.theme.colors;
    let layout = GameLayout::new(frame.area());

    frame.render_widget(StatsHeader::new(&snapshot, &app.theme), layout.header);
    frame.render_widget(TypingArea::new(&snapshot, &app.theme), layout.word);

    let timer_label = match snapshot.session.session_time_remaining {
        Some(secs) => format!("Word  |  Session {}", format_clock(secs)),
        None => "Word".to_string(),
    };
    frame.render_widget(
        ProgressBar::from_progress(&timer_label, snapshot.round.progress, &app.theme),
        layout.timer,
    );

    if let Some(notice) = &app.notice {
        let note = Paragraph::new(Line::from(Span::styled(
            notice.text.as_str(),
            Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(note, layout.notice);
    }

    render_footer(frame, app, &["[Esc] End session", "[Backspace] Fix"], layout.footer);
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    let Some(result) = &app.last_result else {
        return;
    };
    let area = centered_rect(48, 12, frame.area());
    frame.render_widget(
        Dashboard {
            summary: &result.summary,
            reason: result.reason,
            new_best: result.new_best,
            theme: &app.theme,
        },
        area,
    );
}

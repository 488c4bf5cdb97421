use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    /// No input arrived within the tick rate.
    Tick,
    Resize,
}

/// Terminal input pumped from a background thread.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let app_event = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        // Key releases arrive on some terminals; only presses type.
                        Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                            AppEvent::Key(key)
                        }
                        Ok(Event::Resize(_, _)) => AppEvent::Resize,
                        Ok(_) => continue,
                        Err(e) => {
                            log::error!("terminal read failed: {e}");
                            return;
                        }
                    },
                    Ok(false) => AppEvent::Tick,
                    Err(e) => {
                        log::error!("terminal poll failed: {e}");
                        return;
                    }
                };
                if tx.send(app_event).is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

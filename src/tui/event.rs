use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    idle_tick: Duration,
}

impl EventHandler {
    pub fn new(idle_tick: Duration) -> Self {
        Self { idle_tick }
    }

    /// Wait up to `timeout` (capped at the idle tick) for the next input.
    pub fn next(&self, timeout: Duration) -> Result<AppEvent> {
        if event::poll(timeout.min(self.idle_tick))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(AppEvent::Key(key)),
                Event::Mouse(mouse) => return Ok(AppEvent::Mouse(mouse)),
                Event::Resize(width, height) => return Ok(AppEvent::Resize(width, height)),
                _ => {}
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Dismiss,
    OpenLink,
    ScrollUp,
    ScrollDown,
    Grow,
    Shrink,
    None,
}

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub enum AppEvent {
    Char(char),
    Quit,
    Redraw,
}

/// Blocking, single-threaded key reader. One call yields one turn's input.
pub struct EventHandler {
    quit_key: char,
}

impl EventHandler {
    pub fn new(quit_key: char) -> Self {
        Self { quit_key }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(ev) = self.translate(key) {
                        return Ok(ev);
                    }
                }
                Event::Resize(_, _) => return Ok(AppEvent::Redraw),
                _ => {}
            }
        }
    }

    fn translate(&self, key: KeyEvent) -> Option<AppEvent> {
        // Only presses count; repeats and releases would inflate attempts.
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(AppEvent::Quit);
        }
        match key.code {
            KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char(ch) if ch == self.quit_key => Some(AppEvent::Quit),
            KeyCode::Char(ch) => Some(AppEvent::Char(ch)),
            KeyCode::Enter => Some(AppEvent::Char('\n')),
            _ => None,
        }
    }
}

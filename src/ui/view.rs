use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::keymap::Keymap;
use crate::ui::screen::ScreenBuffer;

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;
const WARNING: Color = Color::Yellow;

/// Draws the current screen contents: first line as a heading, the rest as
/// body text, and the latest notice in a status line.
pub struct GameView<'a> {
    screen: &'a ScreenBuffer,
    quit_key: char,
}

impl<'a> GameView<'a> {
    pub fn new(screen: &'a ScreenBuffer, keymap: &Keymap) -> Self {
        Self {
            screen,
            quit_key: keymap.quit,
        }
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" stonecut ")
            .border_style(Style::default().fg(ACCENT));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let lines: Vec<Line> = self
            .screen
            .lines()
            .iter()
            .enumerate()
            .map(|(i, text)| {
                if i == 0 {
                    Line::from(Span::styled(
                        format!(" {text}"),
                        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!(" {text}"))
                }
            })
            .collect();
        Paragraph::new(lines).render(layout[0], buf);

        if let Some(notice) = self.screen.notice() {
            Paragraph::new(Line::from(Span::styled(
                format!(" {notice}"),
                Style::default().fg(WARNING).add_modifier(Modifier::BOLD),
            )))
            .render(layout[1], buf);
        }

        let footer = format!(" [{}/Esc] Quit", self.quit_key);
        Paragraph::new(Line::from(Span::styled(footer, Style::default().fg(MUTED))))
            .render(layout[2], buf);
    }
}

/// Where the game writes what the player should see.
pub trait OutputSink {
    /// Drop everything currently shown, including any notice.
    fn clear(&mut self);
    fn write_line(&mut self, line: &str);
    /// Short message shown alongside the current screen without replacing it.
    fn notify(&mut self, message: &str);
}

/// In-memory screen contents, redrawn by the terminal loop every frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScreenBuffer {
    lines: Vec<String>,
    notice: Option<String>,
}

impl ScreenBuffer {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl OutputSink for ScreenBuffer {
    fn clear(&mut self) {
        self.lines.clear();
        self.notice = None;
    }

    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn notify(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }
}

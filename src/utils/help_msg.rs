use std::ops::{Deref, DerefMut};

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use super::key_events::KeyEvent;

/// One key binding shown in the help bar or help popup
#[derive(Debug, Clone)]
pub(crate) struct HelpEntry {
    key: KeyEvent,
    desc: String,
}

impl HelpEntry {
    pub(crate) fn new<T: Into<String>, K: Into<KeyEvent>>(event: K, desc: T) -> Self {
        Self {
            key: event.into(),
            desc: desc.into(),
        }
    }
    pub(crate) fn key(&self) -> String {
        self.key.to_string()
    }

    pub(crate) fn desc(&self) -> &str {
        &self.desc
    }

    fn spans(&self) -> [Span<'_>; 2] {
        [
            Span::raw(format!("{}: ", self.desc)),
            Span::styled(
                self.key(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]
    }
}

impl std::fmt::Display for HelpEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.desc(), self.key())
    }
}

impl From<HelpEntry> for String {
    fn from(val: HelpEntry) -> Self {
        val.to_string()
    }
}

#[derive(Default, Clone, Debug)]
pub(crate) struct HelpMsg {
    slices: Vec<HelpEntry>,
}

impl From<Vec<HelpEntry>> for HelpMsg {
    fn from(slices: Vec<HelpEntry>) -> Self {
        Self { slices }
    }
}

impl HelpMsg {
    pub(crate) fn extend(&mut self, other: &HelpMsg) {
        self.slices.extend(other.slices.iter().cloned());
    }

    pub(crate) fn push(&mut self, entry: HelpEntry) {
        self.slices.push(entry);
    }

    /// Render as a single bordered help bar
    pub(crate) fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let mut spans = Vec::with_capacity(self.slices.len() * 3);
        for (i, entry) in self.slices.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            }
            spans.extend(entry.spans());
        }
        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(paragraph, area);
    }
}

impl Deref for HelpMsg {
    type Target = Vec<HelpEntry>;

    fn deref(&self) -> &Self::Target {
        &self.slices
    }
}

impl DerefMut for HelpMsg {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.slices
    }
}

impl From<&HelpMsg> for String {
    fn from(val: &HelpMsg) -> Self {
        val.slices
            .iter()
            .map(HelpEntry::to_string)
            .collect::<Vec<String>>()
            .join(" | ")
    }
}

impl From<HelpMsg> for String {
    fn from(val: HelpMsg) -> Self {
        (&val).into()
    }
}

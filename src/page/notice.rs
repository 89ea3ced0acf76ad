use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    actions::{Action, ActionSender, LayerManageAction},
    app::layer_manager::EventHandlingStatus,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::{EventLoopParticipant, Layer, WidgetExt, contact::SELECTED_COLOR};

const TITLE: &str = "Message Sent!";

/// Modal confirmation shown over the form after it was accepted
pub(crate) struct Notice {
    message: String,
    tx: ActionSender,
}

impl Notice {
    pub fn new(tx: ActionSender, message: String) -> Self {
        Self { message, tx }
    }

    #[cfg(test)]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl EventLoopParticipant for Notice {
    fn handle_events(&self, event: &Event) -> EventHandlingStatus {
        if let Event::Key(key) = event {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.tx.send(LayerManageAction::Pop);
            }
        }
        EventHandlingStatus::Consumed
    }

    fn update(&mut self, _action: Action) {}
}

impl Layer for Notice {
    fn get_help_msg(&self) -> HelpMsg {
        vec![HelpEntry::new(KeyCode::Enter, "Close")].into()
    }
}

impl WidgetExt for Notice {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // borders and padding take 4 columns
        let width = (self.message.width() as u16 + 4)
            .max(TITLE.width() as u16 + 4)
            .min(area.width.saturating_sub(4));
        let inner_width = width.saturating_sub(4).max(1);
        let lines = (self.message.width() as u16).div_ceil(inner_width).max(1);
        let height = (lines + 4).min(area.height);

        let [show_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [show_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(show_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SELECTED_COLOR))
            .title(Line::from(TITLE).bold().centered())
            .padding(Padding::uniform(1));

        frame.render_widget(Clear, show_area);
        frame.render_widget(
            Paragraph::new(self.message.as_str())
                .wrap(Wrap { trim: true })
                .centered()
                .block(block),
            show_area,
        );
    }
}

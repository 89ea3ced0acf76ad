use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, palette::tailwind},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Padding,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::{
    actions::{Action, ActionSender, LayerManageAction},
    app::layer_manager::EventHandlingStatus,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::{EventLoopParticipant, Layer, WidgetExt};

/// Modal list of the key bindings of the layer below
pub(crate) struct HelpPopup {
    help_msg: HelpMsg,

    key_width: u16,
    desc_width: u16,
    list_state: ListState,

    tx: ActionSender,
}

impl HelpPopup {
    /// `None` when there is nothing to show
    pub fn new(tx: ActionSender, msg: HelpMsg) -> Option<Self> {
        let key_width = msg.iter().map(|entry| entry.key().width()).max()?;
        let desc_width = msg
            .iter()
            .map(|entry| entry.desc().width())
            .max()
            .unwrap_or_default();

        Some(Self {
            help_msg: msg,
            key_width: key_width as u16,
            desc_width: desc_width as u16,
            list_state: ListState::default(),
            tx,
        })
    }

    fn content_width(&self) -> u16 {
        // two columns, a gap, borders and padding
        self.key_width + self.desc_width + 3 + 4
    }
}

#[derive(Clone, Debug)]
pub enum HelpPopupAction {
    Up,
    Down,
    Start,
    End,
}
impl From<HelpPopupAction> for Action {
    fn from(value: HelpPopupAction) -> Self {
        Action::HelpPopup(value)
    }
}

impl EventLoopParticipant for HelpPopup {
    fn handle_events(&self, event: &Event) -> EventHandlingStatus {
        let Event::Key(key) = event else {
            return EventHandlingStatus::Consumed;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => self.tx.send(LayerManageAction::Pop),
            KeyCode::Char('j') | KeyCode::Down => self.tx.send(HelpPopupAction::Down),
            KeyCode::Char('k') | KeyCode::Up => self.tx.send(HelpPopupAction::Up),
            KeyCode::Char('g') | KeyCode::Home => self.tx.send(HelpPopupAction::Start),
            KeyCode::Char('G') | KeyCode::End => self.tx.send(HelpPopupAction::End),
            _ => {}
        }
        // nothing gets past the popup
        EventHandlingStatus::Consumed
    }

    fn update(&mut self, action: Action) {
        let Action::HelpPopup(action) = action else {
            return;
        };
        match action {
            HelpPopupAction::Up => self.list_state.select_previous(),
            HelpPopupAction::Down => self.list_state.select_next(),
            HelpPopupAction::Start => self.list_state.select_first(),
            HelpPopupAction::End => self.list_state.select_last(),
        }
    }
}

impl Layer for HelpPopup {
    fn get_help_msg(&self) -> HelpMsg {
        vec![
            HelpEntry::new('j', "Go Down"),
            HelpEntry::new('k', "Go Up"),
            HelpEntry::new('g', "Go to Top"),
            HelpEntry::new('G', "Go to Bottom"),
            HelpEntry::new(KeyCode::Esc, "Close help"),
        ]
        .into()
    }
}

impl WidgetExt for HelpPopup {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [body, bottom_help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(area);

        let width = self
            .content_width()
            .max(body.width.saturating_sub(4).min(50))
            .min(body.width);
        let height = (self.help_msg.len() as u16 + 4).min(body.height);
        let [show_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(body);
        let [show_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(show_area);

        frame.render_widget(Clear, bottom_help_area);
        self.get_help_msg().render(frame, bottom_help_area);

        frame.render_widget(Clear, show_area);
        self.render_list(frame, show_area);
    }
}

impl HelpPopup {
    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let selected_row_style = Style::default()
            .add_modifier(Modifier::REVERSED)
            .fg(LIST_COLORS.selected_row_fg);

        let block = Block::new()
            .title(Line::raw("Help").centered())
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(LIST_COLORS.border_fg))
            .padding(Padding::uniform(1));

        let key_width = self.key_width as usize;
        let items: Vec<ListItem> = self
            .help_msg
            .iter()
            .map(|entry| {
                let key = entry.key();
                let pad = key_width.saturating_sub(key.width());
                ListItem::from(Line::from(vec![
                    Span::styled(
                        format!("{key}{}", " ".repeat(pad)),
                        Style::default()
                            .fg(LIST_COLORS.key_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(entry.desc().to_string()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(selected_row_style)
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

struct ListColors {
    selected_row_fg: Color,
    key_fg: Color,
    border_fg: Color,
}

impl Default for ListColors {
    fn default() -> Self {
        Self {
            selected_row_fg: tailwind::INDIGO.c400,
            key_fg: Color::Cyan,
            border_fg: tailwind::SLATE.c400,
        }
    }
}

lazy_static::lazy_static! {
    static ref LIST_COLORS: ListColors = ListColors::default();
}

//! Single-line text input used for every text field of the form.
//!
//! An [`InputComp`] is idle until its owner focuses it with
//! [`InputComp::get_switch_mode_action`]. While focused, Enter starts editing and Enter or Esc
//! stop it again. Leaving keeps the value.
//!
//! Edits are applied in [`Component::update`](super::Component::update). Every change is
//! reported back as an [`InputAction::Change`] tagged with the component id, and the owner
//! reads it with [`InputComp::parse_change_action`]. Pasted line breaks become spaces.
//!
//! The title carries a required marker when asked to. An invalid input gets a red border
//! while it is not focused.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    actions::{Action, ActionSender, CompAction},
    app::layer_manager::EventHandlingStatus,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
    utils::key_events::KeyEvent,
};

pub(crate) const REQUIRED_MARK_COLOR: Color = Color::Rgb(0x0d, 0x6e, 0xff);

#[derive(Clone, Debug)]
pub(crate) struct InputComp {
    id: u64,
    input: Input,
    mode: InputMode,

    title: String,
    required: bool,
    invalid: bool,

    tx: ActionSender,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputMode {
    #[default]
    Idle,
    Focused,
}

#[derive(Clone, Debug)]
pub(crate) enum InputAction {
    SwitchMode(InputMode),
    HandleKey(KeyEvent),
    HandlePaste(String),
    Exit(),

    /// The value after an edit, for the owner
    Change(String),
}

impl InputComp {
    pub fn new<K: Into<String>>(tx: ActionSender, id: u64, title: K) -> Self {
        Self {
            id,
            input: Input::default(),
            mode: InputMode::default(),
            title: title.into(),
            required: false,
            invalid: false,
            tx,
        }
    }

    pub fn get_switch_mode_action(&self, mode: InputMode) -> Action {
        self.get_action(InputAction::SwitchMode(mode))
    }

    pub fn parse_change_action(&self, action: &Action) -> Option<String> {
        match self.unwrap_action(action)? {
            InputAction::Change(s) => Some(s),
            _ => None,
        }
    }

    fn get_action(&self, action: InputAction) -> Action {
        Action::Comp((CompAction::Input(action), self.id))
    }

    fn unwrap_action(&self, action: &Action) -> Option<InputAction> {
        let Action::Comp((CompAction::Input(action), id)) = action else {
            return None;
        };
        if *id != self.id {
            return None;
        }
        Some(action.clone())
    }

    /// Mark the title with a required marker
    pub fn set_required(self, b: bool) -> Self {
        Self { required: b, ..self }
    }

    /// Show the input with an error border while it is not focused
    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    pub fn reset(&mut self) {
        self.input.reset();
    }

    #[cfg(test)]
    pub fn value(&self) -> &str {
        self.input.value()
    }

    #[cfg(test)]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn get_help_msg(&self, inputing: bool) -> HelpMsg {
        let mut msg = HelpMsg::default();
        if matches!(self.mode, InputMode::Focused) {
            let desc = if inputing { "quit input" } else { "Start input" };
            msg.push(HelpEntry::new(KeyCode::Enter, desc));
        }
        msg
    }

    fn send_change(&self) {
        self.tx.send(self.get_action(InputAction::Change(
            self.input.value().to_string(),
        )));
    }
}

impl super::Component for InputComp {
    fn handle_events(&self, event: &Event, input_mode: bool) -> EventHandlingStatus {
        if matches!(self.mode, InputMode::Idle) {
            return EventHandlingStatus::ShouldPropagate;
        }
        if input_mode {
            match event {
                Event::Key(key) => {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                        self.tx.send(self.get_action(InputAction::Exit()))
                    } else {
                        self.tx
                            .send(self.get_action(InputAction::HandleKey((*key).into())))
                    }
                    EventHandlingStatus::Consumed
                }
                Event::Paste(s) => {
                    self.tx
                        .send(self.get_action(InputAction::HandlePaste(s.clone())));
                    EventHandlingStatus::Consumed
                }
                _ => EventHandlingStatus::ShouldPropagate,
            }
        } else {
            match event {
                Event::Key(key) if key.code == KeyCode::Enter => {
                    self.tx.send(Action::SwitchInputMode(true));
                    EventHandlingStatus::Consumed
                }
                _ => EventHandlingStatus::ShouldPropagate,
            }
        }
    }

    fn update(&mut self, action: &Action) {
        let Some(action) = self.unwrap_action(action) else {
            return;
        };

        match action {
            InputAction::SwitchMode(input_mode) => {
                self.mode = input_mode;
            }
            InputAction::HandleKey(key_event) => {
                if self
                    .input
                    .handle_event(&crossterm::event::Event::Key(key_event.into()))
                    .is_some()
                {
                    self.send_change();
                }
            }
            InputAction::HandlePaste(string) => {
                // single line input, line breaks become spaces
                string
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .for_each(|c| {
                        self.input.handle(tui_input::InputRequest::InsertChar(c));
                    });
                self.send_change();
            }
            InputAction::Exit() => {
                self.tx.send(Action::SwitchInputMode(false));
            }
            InputAction::Change(_) => {}
        }
    }

    fn draw(&self, frame: &mut Frame, area: &Rect, input_mode: bool) {
        let width = area.width.max(3) - 3;
        let scroll = self.input.visual_scroll(width as usize);
        let style = match self.mode {
            InputMode::Focused => {
                if input_mode {
                    Color::Yellow.into()
                } else {
                    Color::Cyan.into()
                }
            }
            InputMode::Idle => Style::default(),
        };
        let border_style = if self.invalid && matches!(self.mode, InputMode::Idle) {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };

        let mut title = vec![Span::raw(self.title.as_str())];
        if self.required {
            title.push(Span::styled(" *", Style::default().fg(REQUIRED_MARK_COLOR)));
        }

        let input_widget = Paragraph::new(self.input.value())
            .style(style)
            .scroll((0, scroll as u16))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title(Line::from(title)),
            );
        frame.render_widget(input_widget, *area);

        if matches!(self.mode, InputMode::Focused) && input_mode {
            // Ratatui hides the cursor unless it's explicitly set. Position the  cursor past the
            // end of the input text and one line down from the border to the input line
            let x = self.input.visual_cursor().max(scroll) - scroll + 1;
            frame.set_cursor_position((area.x + x as u16, area.y + 1))
        }
    }
}

//! The Contact Us page.
//!
//! Draws the form, turns key presses and clicks into [`ContactAction`]s and feeds them to
//! its [`FormController`]. Text fields are [`InputComp`]s that report every edit, so each
//! keystroke reaches the controller as a change.

use crossterm::event::{
    KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use crate::{
    actions::{Action, ActionSender, LayerManageAction, Layers},
    app::layer_manager::EventHandlingStatus,
    component::{
        Component,
        input::{InputComp, InputMode, REQUIRED_MARK_COLOR},
    },
    libs::form::{Field, FormController, QueryType, TextField},
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::{EventLoopParticipant, Layer, WidgetExt};

pub(crate) const SELECTED_COLOR: Color = Color::Rgb(0x0c, 0x7d, 0x69);
const SELECTED_BG: Color = Color::Rgb(0xf0, 0xf8, 0xf7);
const ERROR_COLOR: Color = Color::Red;
const FORM_WIDTH: u16 = 72;
const CONSENT_LABEL: &str = "I consent to be contacted for the purpose of this enquiry";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Text(TextField),
    Query(QueryType),
    Consent,
    Submit,
}

impl Focus {
    const ORDER: [Focus; 8] = [
        Focus::Text(TextField::FirstName),
        Focus::Text(TextField::LastName),
        Focus::Text(TextField::Email),
        Focus::Query(QueryType::Enquiry),
        Focus::Query(QueryType::Support),
        Focus::Text(TextField::Message),
        Focus::Consent,
        Focus::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// The other control on a row holding two
    fn sibling(self) -> Option<Self> {
        match self {
            Focus::Text(TextField::FirstName) => Some(Focus::Text(TextField::LastName)),
            Focus::Text(TextField::LastName) => Some(Focus::Text(TextField::FirstName)),
            Focus::Query(query_type) => Some(Focus::Query(query_type.other())),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ContactAction {
    MoveFocus(Focus),
    SelectQueryType(QueryType),
    ToggleConsent,
    Submit,
}

impl From<ContactAction> for Action {
    fn from(value: ContactAction) -> Self {
        Action::Contact(value)
    }
}

/// Where the clickable controls were drawn last frame
#[derive(Clone, Copy, Debug, Default)]
struct HitAreas {
    texts: [Rect; 4],
    queries: [Rect; 2],
    consent: Rect,
    submit: Rect,
}

pub(crate) struct ContactForm {
    controller: FormController,
    focus: Focus,
    input_mode: bool,

    inputs: [InputComp; 4],
    areas: HitAreas,

    tx: ActionSender,
}

impl ContactForm {
    pub fn new(tx: ActionSender, input_mode: bool) -> Self {
        let inputs = TextField::ALL.map(|field| {
            InputComp::new(tx.clone(), field.index() as u64 + 1, field.label())
                .set_required(true)
        });
        Self {
            controller: FormController::new(),
            focus: Focus::Text(TextField::FirstName),
            input_mode,
            inputs,
            areas: HitAreas::default(),
            tx,
        }
    }

    fn input(&self, field: TextField) -> &InputComp {
        &self.inputs[field.index()]
    }

    fn handle_key(&self, key: &CrosstermKeyEvent) -> EventHandlingStatus {
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                self.tx.send(ContactAction::MoveFocus(self.focus.next()))
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
                self.tx.send(ContactAction::MoveFocus(self.focus.prev()))
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                match self.focus.sibling() {
                    Some(sibling) => self.tx.send(ContactAction::MoveFocus(sibling)),
                    None => return EventHandlingStatus::ShouldPropagate,
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                Focus::Query(query_type) => {
                    self.tx.send(ContactAction::SelectQueryType(query_type))
                }
                Focus::Consent => self.tx.send(ContactAction::ToggleConsent),
                Focus::Submit => self.tx.send(ContactAction::Submit),
                Focus::Text(_) => return EventHandlingStatus::ShouldPropagate,
            },
            _ => return EventHandlingStatus::ShouldPropagate,
        }
        EventHandlingStatus::Consumed
    }

    fn handle_mouse(&self, mouse: &MouseEvent) -> EventHandlingStatus {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return EventHandlingStatus::ShouldPropagate;
        }
        let position = Position::new(mouse.column, mouse.row);

        let (focus, action) = if let Some(field) = TextField::ALL
            .into_iter()
            .find(|field| self.areas.texts[field.index()].contains(position))
        {
            (Focus::Text(field), None)
        } else if let Some(query_type) = QueryType::ALL
            .into_iter()
            .zip(self.areas.queries)
            .find_map(|(query_type, area)| area.contains(position).then_some(query_type))
        {
            (
                Focus::Query(query_type),
                Some(ContactAction::SelectQueryType(query_type)),
            )
        } else if self.areas.consent.contains(position) {
            (Focus::Consent, Some(ContactAction::ToggleConsent))
        } else if self.areas.submit.contains(position) {
            (Focus::Submit, Some(ContactAction::Submit))
        } else {
            return EventHandlingStatus::ShouldPropagate;
        };

        if self.input_mode {
            self.tx.send(Action::SwitchInputMode(false));
        }
        self.tx.send(ContactAction::MoveFocus(focus));
        if let Some(action) = action {
            self.tx.send(action);
        }
        EventHandlingStatus::Consumed
    }

    fn perform(&mut self, action: ContactAction) {
        match action {
            ContactAction::MoveFocus(focus) => {
                self.focus = focus;
                for field in TextField::ALL {
                    let mode = if focus == Focus::Text(field) {
                        InputMode::Focused
                    } else {
                        InputMode::Idle
                    };
                    self.tx.send(self.input(field).get_switch_mode_action(mode));
                }
            }
            ContactAction::SelectQueryType(query_type) => {
                self.controller.select_query_type(query_type)
            }
            ContactAction::ToggleConsent => self.controller.toggle_consent(),
            ContactAction::Submit => {
                let outcome = self.controller.submit();
                for field in TextField::ALL {
                    let invalid = self.controller.errors().contains(field.into());
                    self.inputs[field.index()].set_invalid(invalid);
                }
                if let Some(notice) = outcome.notice() {
                    self.inputs.iter_mut().for_each(InputComp::reset);
                    self.tx
                        .send(LayerManageAction::popup(Layers::Notice(notice.to_string())));
                }
            }
        }
    }

    fn render_error(&self, frame: &mut Frame, field: Field, area: Rect) {
        if let Some(message) = self.controller.errors().get(field) {
            frame.render_widget(
                Paragraph::new(message).style(Style::default().fg(ERROR_COLOR)),
                area,
            );
        }
    }

    fn render_text_field(&self, frame: &mut Frame, field: TextField, area: Rect) -> Rect {
        let [input_area, error_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);
        self.input(field).draw(frame, &input_area, self.input_mode);
        self.render_error(frame, field.into(), error_area);
        input_area
    }

    fn render_query_type(&self, frame: &mut Frame, area: Rect) -> [Rect; 2] {
        let [label_area, options_area, error_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);
        frame.render_widget(required_label("Query Type"), label_area);

        let option_areas: [Rect; 2] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(1)
                .areas(options_area);
        let selected = self.controller.state().query_type;
        let has_error = self.controller.errors().contains(Field::QueryType);

        for (query_type, option_area) in QueryType::ALL.into_iter().zip(option_areas) {
            let is_selected = selected == Some(query_type);
            let border_style = if is_selected {
                Style::default().fg(SELECTED_COLOR)
            } else if has_error {
                Style::default().fg(ERROR_COLOR)
            } else {
                Style::default()
            };
            let mut style = if is_selected {
                Style::default().fg(SELECTED_COLOR).bg(SELECTED_BG)
            } else {
                Style::default()
            };
            if self.focus == Focus::Query(query_type) {
                style = style.add_modifier(Modifier::BOLD).fg(Color::Cyan);
            }
            let marker = if is_selected { "(•)" } else { "( )" };
            frame.render_widget(
                Paragraph::new(format!("{marker} {}", query_type.label()))
                    .style(style)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded)
                            .border_style(border_style)
                            .padding(Padding::horizontal(1)),
                    ),
                option_area,
            );
        }

        self.render_error(frame, Field::QueryType, error_area);
        option_areas
    }

    fn render_consent(&self, frame: &mut Frame, area: Rect) -> Rect {
        let [check_area, error_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
        let marker_style = if self.controller.errors().contains(Field::Consent) {
            Style::default().fg(ERROR_COLOR)
        } else {
            Style::default()
        };
        let label_style = if self.focus == Focus::Consent {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let marker = if self.controller.state().consent {
            "[x] "
        } else {
            "[ ] "
        };
        frame.render_widget(
            Line::from(vec![
                Span::styled(marker, marker_style),
                Span::styled(CONSENT_LABEL, label_style),
                Span::styled(" *", Style::default().fg(REQUIRED_MARK_COLOR)),
            ]),
            check_area,
        );
        self.render_error(frame, Field::Consent, error_area);
        check_area
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focus == Focus::Submit {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(SELECTED_COLOR)
        };
        let mut style = Style::default().fg(Color::White).bg(SELECTED_COLOR);
        if self.focus == Focus::Submit {
            style = style.add_modifier(Modifier::BOLD);
        }
        frame.render_widget(
            Paragraph::new("Submit").centered().style(style).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style),
            ),
            area,
        );
    }
}

fn required_label(label: &str) -> Line<'_> {
    Line::from(vec![
        Span::raw(label),
        Span::styled(" *", Style::default().fg(REQUIRED_MARK_COLOR)),
    ])
}

impl EventLoopParticipant for ContactForm {
    fn handle_events(&self, event: &Event) -> EventHandlingStatus {
        match event {
            // submitting never leaves the page, whatever mode it is in
            Event::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('s') =>
            {
                if self.input_mode {
                    self.tx.send(Action::SwitchInputMode(false));
                }
                self.tx.send(ContactAction::Submit);
                EventHandlingStatus::Consumed
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {
                if let Focus::Text(field) = self.focus {
                    let status = self.input(field).handle_events(event, self.input_mode);
                    if status == EventHandlingStatus::Consumed || self.input_mode {
                        return status;
                    }
                }
                match event {
                    Event::Key(key) => self.handle_key(key),
                    _ => EventHandlingStatus::ShouldPropagate,
                }
            }
        }
    }

    fn update(&mut self, action: Action) {
        match &action {
            Action::SwitchInputMode(mode) => self.input_mode = *mode,
            Action::Contact(contact_action) => self.perform(contact_action.clone()),
            _ => {}
        }

        for field in TextField::ALL {
            if let Some(value) = self.input(field).parse_change_action(&action) {
                self.controller.set_text(field, value);
            }
        }
        self.inputs
            .iter_mut()
            .for_each(|input| input.update(&action));
    }
}

impl Layer for ContactForm {
    fn init(&mut self) {
        self.tx.send(ContactAction::MoveFocus(self.focus));
    }

    fn get_help_msg(&self) -> HelpMsg {
        let submit_key = CrosstermKeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        if self.input_mode {
            let mut msg = match self.focus {
                Focus::Text(field) => self.input(field).get_help_msg(true),
                _ => HelpMsg::default(),
            };
            msg.push(HelpEntry::new(submit_key, "Submit form"));
            return msg;
        }

        let mut msg: HelpMsg = match self.focus {
            Focus::Text(field) => self.input(field).get_help_msg(false),
            Focus::Query(_) => vec![HelpEntry::new(' ', "Select")].into(),
            Focus::Consent => vec![HelpEntry::new(' ', "Toggle")].into(),
            Focus::Submit => vec![HelpEntry::new(KeyCode::Enter, "Submit")].into(),
        };
        msg.extend(
            &vec![
                HelpEntry::new(KeyCode::Tab, "Next"),
                HelpEntry::new(KeyCode::BackTab, "Previous"),
                HelpEntry::new(submit_key, "Submit form"),
                HelpEntry::new('?', "Help"),
                HelpEntry::new('q', "Quit"),
            ]
            .into(),
        );
        msg
    }
}

impl WidgetExt for ContactForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [form_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(area);
        let [panel] = Layout::horizontal([Constraint::Length(form_area.width.min(FORM_WIDTH))])
            .flex(Flex::Center)
            .areas(form_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from("Contact Us").bold().centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let [names, email, query, message, consent, submit] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Length(3),
        ])
        .areas(inner);
        let [first_name, last_name] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(1)
                .areas(names);

        let texts = [
            self.render_text_field(frame, TextField::FirstName, first_name),
            self.render_text_field(frame, TextField::LastName, last_name),
            self.render_text_field(frame, TextField::Email, email),
            self.render_text_field(frame, TextField::Message, message),
        ];
        let queries = self.render_query_type(frame, query);
        let consent = self.render_consent(frame, consent);
        self.render_submit(frame, submit);

        self.areas = HitAreas {
            texts,
            queries,
            consent,
            submit,
        };

        self.get_help_msg().render(frame, help_area);
    }
}

#[cfg(test)]
impl ContactForm {
    pub(crate) fn controller(&self) -> &FormController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use tokio::sync::mpsc::UnboundedReceiver;

    use crate::{
        libs::form::{CONFIRMATION_NOTICE, FormState},
        utils::key_events::test_utils::{get_click_evt, get_ctrl_evt, get_key_evt},
    };

    use super::*;

    struct Harness {
        page: ContactForm,
        rx: UnboundedReceiver<Action>,
        /// layer changes requested by the page
        layer_actions: Vec<LayerManageAction>,
        terminal: Terminal<TestBackend>,
    }

    impl Harness {
        fn new() -> Self {
            let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
            let mut harness = Self {
                page: ContactForm::new(tx.into(), false),
                rx,
                layer_actions: vec![],
                terminal: Terminal::new(TestBackend::new(80, 30)).unwrap(),
            };
            harness.page.init();
            harness.pump();
            harness
        }

        fn pump(&mut self) {
            while let Ok(action) = self.rx.try_recv() {
                if let Action::Layer(layer_action) = &action {
                    self.layer_actions.push(layer_action.clone());
                }
                self.page.update(action);
            }
        }

        fn event(&mut self, event: Event) -> EventHandlingStatus {
            let status = self.page.handle_events(&event);
            self.pump();
            status
        }

        fn keys(&mut self, events: impl IntoIterator<Item = Event>) {
            for event in events {
                let _ = self.event(event);
            }
        }

        fn type_str(&mut self, s: &str) {
            self.keys([get_key_evt(KeyCode::Enter)]);
            self.keys(s.chars().map(Event::from));
            self.keys([get_key_evt(KeyCode::Enter)]);
        }

        fn tab(&mut self, n: usize) {
            for _ in 0..n {
                self.keys([get_key_evt(KeyCode::Tab)]);
            }
        }

        fn draw(&mut self) -> &Buffer {
            let page = &mut self.page;
            self.terminal
                .draw(|f| {
                    let area = f.area();
                    page.render(f, area)
                })
                .unwrap();
            self.terminal.backend().buffer()
        }

        fn screen(&mut self) -> String {
            let buffer = self.draw().clone();
            (0..buffer.area.height)
                .map(|y| {
                    (0..buffer.area.width)
                        .map(|x| buffer[(x, y)].symbol())
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join("\n")
        }

        fn state(&self) -> &FormState {
            self.page.controller.state()
        }

        fn fill_valid(&mut self) {
            self.type_str("Jane");
            self.tab(1);
            self.type_str("Doe");
            self.tab(1);
            self.type_str("jane@doe.com");
            self.tab(1);
            self.keys([' '.into()]);
            self.tab(2);
            self.type_str("Hi");
            self.tab(1);
            self.keys([' '.into()]);
            self.tab(1);
        }
    }

    fn corner_fg(buffer: &Buffer, area: Rect) -> Color {
        buffer[(area.x, area.y)].fg
    }

    #[test]
    fn test_focus_traversal() {
        let mut h = Harness::new();
        assert_eq!(h.page.focus, Focus::Text(TextField::FirstName));
        assert_eq!(h.page.input(TextField::FirstName).mode(), InputMode::Focused);

        h.tab(3);
        assert_eq!(h.page.focus, Focus::Query(QueryType::Enquiry));
        assert!(
            h.page
                .inputs
                .iter()
                .all(|input| input.mode() == InputMode::Idle)
        );

        h.tab(5);
        assert_eq!(h.page.focus, Focus::Text(TextField::FirstName));

        h.keys([get_key_evt(KeyCode::BackTab)]);
        assert_eq!(h.page.focus, Focus::Submit);
        h.keys(['k'.into()]);
        assert_eq!(h.page.focus, Focus::Consent);
        h.keys(['j'.into(), 'j'.into()]);
        assert_eq!(h.page.focus, Focus::Text(TextField::FirstName));
    }

    #[test]
    fn test_sideways_focus() {
        let mut h = Harness::new();
        h.keys(['l'.into()]);
        assert_eq!(h.page.focus, Focus::Text(TextField::LastName));
        h.keys([get_key_evt(KeyCode::Left)]);
        assert_eq!(h.page.focus, Focus::Text(TextField::FirstName));

        h.tab(4);
        assert_eq!(h.page.focus, Focus::Query(QueryType::Support));
        h.keys(['h'.into()]);
        assert_eq!(h.page.focus, Focus::Query(QueryType::Enquiry));

        h.tab(2);
        assert_eq!(h.page.focus, Focus::Text(TextField::Message));
        assert_eq!(
            h.event(get_key_evt(KeyCode::Right)),
            EventHandlingStatus::ShouldPropagate
        );
    }

    #[test]
    fn test_typing_updates_state() {
        let mut h = Harness::new();
        h.keys([get_key_evt(KeyCode::Enter)]);
        assert!(h.page.input_mode);
        h.keys(['J'.into(), 'o'.into()]);
        // changes arrive on every keystroke
        assert_eq!(h.state().first_name, "Jo");
        h.keys([get_key_evt(KeyCode::Backspace), get_key_evt(KeyCode::Enter)]);
        assert!(!h.page.input_mode);
        assert_eq!(h.state().first_name, "J");

        h.keys([get_key_evt(KeyCode::Tab)]);
        h.type_str("Doe");
        h.keys([get_key_evt(KeyCode::Tab)]);
        h.keys([get_key_evt(KeyCode::Enter), Event::Paste("jane@doe.com".into())]);
        assert_eq!(h.state().last_name, "Doe");
        assert_eq!(h.state().email, "jane@doe.com");
    }

    #[test]
    fn test_keys_while_typing_stay_in_input() {
        let mut h = Harness::new();
        h.keys([get_key_evt(KeyCode::Enter)]);
        assert_eq!(h.event('q'.into()), EventHandlingStatus::Consumed);
        assert_eq!(h.event('j'.into()), EventHandlingStatus::Consumed);
        assert_eq!(h.page.focus, Focus::Text(TextField::FirstName));
        assert_eq!(h.state().first_name, "qj");
    }

    #[test]
    fn test_query_type_exclusive() {
        let mut h = Harness::new();
        h.tab(3);
        h.keys([' '.into()]);
        assert_eq!(h.state().query_type, Some(QueryType::Enquiry));
        h.tab(1);
        h.keys([get_key_evt(KeyCode::Enter)]);
        assert_eq!(h.state().query_type, Some(QueryType::Support));

        let buffer = h.draw().clone();
        let [enquiry, support] = h.page.areas.queries;
        assert_eq!(corner_fg(&buffer, support), SELECTED_COLOR);
        assert_eq!(corner_fg(&buffer, enquiry), Color::Reset);
        assert!(h.screen().contains("(•) Support Request"));
    }

    #[test]
    fn test_consent_toggle() {
        let mut h = Harness::new();
        h.keys([get_key_evt(KeyCode::BackTab), get_key_evt(KeyCode::BackTab)]);
        assert_eq!(h.page.focus, Focus::Consent);
        h.keys([' '.into()]);
        assert!(h.state().consent);
        assert!(h.screen().contains("[x] I consent to be contacted"));
        h.keys([' '.into()]);
        assert!(!h.state().consent);
    }

    #[test]
    fn test_mouse() {
        let mut h = Harness::new();
        h.draw();
        let areas = h.page.areas;

        let support = areas.queries[1];
        h.keys([get_click_evt(support.x + 2, support.y + 1)]);
        assert_eq!(h.state().query_type, Some(QueryType::Support));
        assert_eq!(h.page.focus, Focus::Query(QueryType::Support));

        h.keys([get_click_evt(areas.consent.x, areas.consent.y)]);
        assert!(h.state().consent);
        assert_eq!(h.page.focus, Focus::Consent);

        let email = areas.texts[TextField::Email.index()];
        h.keys([get_click_evt(email.x + 1, email.y + 1)]);
        assert_eq!(h.page.focus, Focus::Text(TextField::Email));
        assert_eq!(h.page.input(TextField::Email).mode(), InputMode::Focused);

        assert_eq!(
            h.event(get_click_evt(0, 0)),
            EventHandlingStatus::ShouldPropagate
        );
    }

    #[test]
    fn test_click_leaves_input_mode() {
        let mut h = Harness::new();
        h.draw();
        h.keys([get_key_evt(KeyCode::Enter), 'a'.into()]);
        assert!(h.page.input_mode);

        let submit = h.page.areas.submit;
        h.keys([get_click_evt(submit.x + 1, submit.y + 1)]);
        assert!(!h.page.input_mode);
        assert_eq!(h.page.focus, Focus::Submit);
        assert_eq!(h.page.controller.errors().len(), 5);
    }

    #[test]
    fn test_rejected_submit() {
        let mut h = Harness::new();
        h.type_str("Jane");
        let before = h.state().clone();

        assert_eq!(h.event(get_ctrl_evt('s')), EventHandlingStatus::Consumed);
        assert!(h.layer_actions.is_empty());
        assert_eq!(h.state(), &before);
        assert_eq!(h.page.controller.errors().len(), 5);
        assert!(!h.page.controller.errors().contains(Field::FirstName));

        // move focus away so the error borders show
        h.keys([get_key_evt(KeyCode::BackTab)]);
        let buffer = h.draw().clone();
        let areas = h.page.areas;
        assert_eq!(corner_fg(&buffer, areas.texts[TextField::FirstName.index()]), Color::Reset);
        assert_eq!(corner_fg(&buffer, areas.texts[TextField::LastName.index()]), ERROR_COLOR);
        assert_eq!(corner_fg(&buffer, areas.queries[0]), ERROR_COLOR);
        assert_eq!(corner_fg(&buffer, areas.queries[1]), ERROR_COLOR);
        assert_eq!(buffer[(areas.consent.x + 1, areas.consent.y)].fg, ERROR_COLOR);

        let screen = h.screen();
        assert!(screen.contains("Last Name is required."));
        assert!(!screen.contains("First Name is required."));
    }

    #[test]
    fn test_submit_while_typing() {
        let mut h = Harness::new();
        h.keys([get_key_evt(KeyCode::Enter), 'a'.into()]);
        assert_eq!(h.event(get_ctrl_evt('s')), EventHandlingStatus::Consumed);
        assert!(!h.page.input_mode);
        assert_eq!(h.state().first_name, "a");
        assert_eq!(h.page.controller.errors().len(), 5);
    }

    #[test]
    fn test_errors_refresh_only_on_submit() {
        let mut h = Harness::new();
        h.keys([get_ctrl_evt('s')]);
        assert!(h.screen().contains("First Name is required."));

        h.type_str("Jane");
        assert!(h.screen().contains("First Name is required."));

        h.keys([get_ctrl_evt('s')]);
        assert!(!h.screen().contains("First Name is required."));
    }

    #[test]
    fn test_query_error_clears_on_next_submit() {
        let mut h = Harness::new();
        h.keys([get_ctrl_evt('s')]);
        assert!(h.page.controller.errors().contains(Field::QueryType));

        h.tab(3);
        h.keys([' '.into()]);
        // still shown until the next attempt
        assert!(h.screen().contains("Please select a query type."));
        h.keys([get_ctrl_evt('s')]);
        assert!(!h.page.controller.errors().contains(Field::QueryType));
        assert!(!h.screen().contains("Please select a query type."));
    }

    #[test]
    fn test_accepted_submit() {
        let mut h = Harness::new();
        h.fill_valid();
        assert_eq!(h.page.focus, Focus::Submit);
        assert_eq!(h.state().message, "Hi");
        assert!(h.state().consent);
        assert_eq!(h.state().query_type, Some(QueryType::Enquiry));

        assert_eq!(
            h.event(get_key_evt(KeyCode::Enter)),
            EventHandlingStatus::Consumed
        );

        assert!(matches!(
            h.layer_actions.as_slice(),
            [LayerManageAction::Push(config)]
                if matches!(&config.layer, Layers::Notice(msg) if msg == CONFIRMATION_NOTICE)
                    && config.render_self
        ));
        assert_eq!(h.state(), &FormState::default());
        assert!(h.page.controller.errors().is_empty());
        assert!(h.page.inputs.iter().all(|input| input.value().is_empty()));

        let screen = h.screen();
        assert!(!screen.contains("Jane"));
        assert!(screen.contains("( ) General Enquiry"));
        assert!(screen.contains("[ ] I consent"));
    }

    #[test]
    fn test_only_consent_missing() {
        let mut h = Harness::new();
        h.fill_valid();
        h.page.controller.set_consent(false);
        h.keys([get_key_evt(KeyCode::Enter)]);
        assert!(h.layer_actions.is_empty());
        assert_eq!(h.page.controller.errors().len(), 1);
        assert!(
            h.screen()
                .contains("To Submit this form, please consent to being contacted")
        );
    }

    #[test]
    fn test_help_msg() {
        let mut h = Harness::new();
        let msg: String = h.page.get_help_msg().into();
        assert!(msg.starts_with("Start input: enter | Next: tab"));
        assert!(msg.contains("Submit form: ctrl-s"));

        h.keys([get_key_evt(KeyCode::Enter)]);
        let msg: String = h.page.get_help_msg().into();
        assert_eq!(msg, "quit input: enter | Submit form: ctrl-s");

        h.keys([get_key_evt(KeyCode::Enter), get_key_evt(KeyCode::BackTab)]);
        let msg: String = h.page.get_help_msg().into();
        assert!(msg.starts_with("Submit: enter"));
    }

    #[test]
    fn test_render_layout() {
        let mut h = Harness::new();
        let screen = h.screen();
        for text in [
            "Contact Us",
            "First Name *",
            "Last Name *",
            "Email Address *",
            "Query Type *",
            "( ) General Enquiry",
            "( ) Support Request",
            "Message *",
            "[ ] I consent to be contacted for the purpose of this enquiry *",
            "Submit",
        ] {
            assert!(screen.contains(text), "missing {text}");
        }
    }
}

pub(crate) mod layer_manager;

use crate::{
    actions::{Action, LayerManageAction, Layers},
    tui::{self, Event},
};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use layer_manager::{EventHandlingStatus, LayerManager};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tracing::debug;

pub struct RootState {
    pub should_quit: bool,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    /// A text input owns the keyboard
    pub input_mode: bool,
}

impl RootState {
    pub fn new() -> Self {
        let (action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel();
        Self {
            should_quit: false,
            action_tx,
            action_rx,
            input_mode: false,
        }
    }

    pub fn send_action<T: Into<Action>>(&self, action: T) {
        // the receiver lives in this struct, so sending cannot fail while `self` exists
        let _ = self.action_tx.send(action.into());
    }

    pub fn try_recv(&mut self) -> Result<Action, TryRecvError> {
        self.action_rx.try_recv()
    }
}

pub struct App {
    layers: LayerManager,
    pub state: RootState,
    pub tui: tui::TuiEnum,
}

impl App {
    pub fn new(state: RootState, tui: tui::TuiEnum) -> Self {
        Self {
            layers: LayerManager::new(&state),
            state,
            tui,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        loop {
            let e = self.tui.next().await?;
            self.handle_event(e);
            self.drain_actions()?;

            // application exit
            if self.state.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    fn drain_actions(&mut self) -> Result<()> {
        while let Ok(action) = self.state.try_recv() {
            self.perform_action(action)?;
        }
        Ok(())
    }

    /// Convert a [`tui::Event`] to actions
    ///
    /// Input events go to the layer stack first. Only the ones it leaves unhandled
    /// reach the app-wide key bindings.
    fn handle_event(&mut self, event: Event) {
        match &event {
            Event::Tick => self.state.send_action(Action::Tick),
            Event::Render | Event::Resize(_, _) => self.state.send_action(Action::Render),
            Event::Error => self.state.send_action(Action::Quit),
            Event::Init | Event::FocusGained | Event::FocusLost => {}

            Event::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c') =>
            {
                self.state.send_action(Action::Quit)
            }

            Event::Key(_) | Event::Mouse(_) | Event::Paste(_) => {
                if self.layers.handle_event(&event) == EventHandlingStatus::Consumed {
                    return;
                }
                let Event::Key(key) = &event else {
                    return;
                };
                if self.state.input_mode {
                    return;
                }
                match (key.modifiers, key.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('z')) => {
                        self.state.send_action(Action::Suspend)
                    }
                    (_, KeyCode::Char('q')) => self.state.send_action(Action::Quit),
                    (_, KeyCode::Char('?')) => self.state.send_action(LayerManageAction::popup(
                        Layers::Help(self.layers.help_msg()),
                    )),
                    _ => {}
                }
            }
        }
    }

    /// Perform an action
    ///
    /// This SHOULD be the only place where the state of the application is changed.
    ///
    /// It handles application-wide actions like quitting and changing the layer stack
    /// and hands everything else to the layers.
    fn perform_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.state.should_quit = true;
            }
            Action::Tick => {}
            Action::Render => {
                let layers = &mut self.layers;
                self.tui.draw(|f| layers.render(f))?;
            }
            Action::Suspend => {
                self.tui.suspend()?;
                self.state.send_action(Action::Render);
            }
            Action::Layer(layer_action) => {
                self.layers.handle_layer_action(&layer_action, &self.state);
                self.state.send_action(Action::Render);
            }
            Action::SwitchInputMode(mode) => {
                debug!("Switching input mode to {}", mode);
                self.state.input_mode = mode;
                self.layers.handle_action(action);
            }
            _ => self.layers.handle_action(action),
        }
        Ok(())
    }
}

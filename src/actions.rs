use color_eyre::eyre::Context;

use crate::{
    component::input::InputAction,
    page::{contact::ContactAction, help_popup::HelpPopupAction},
    utils::help_msg::HelpMsg,
};

#[derive(Clone, Debug)]
pub enum Action {
    Tick,
    Render,
    Quit,
    Suspend,
    SwitchInputMode(bool),

    Layer(LayerManageAction),

    Contact(ContactAction),
    HelpPopup(HelpPopupAction),

    Comp((CompAction, u64)),
}

/// Layers that can be placed on the layer stack
#[derive(Clone, Debug, strum::Display)]
pub enum Layers {
    Notice(String),
    Help(HelpMsg),
}

#[derive(Clone, Debug)]
pub struct LayerPushConfig {
    pub layer: Layers,
    /// Whether the layer below keeps rendering
    pub render_self: bool,
}

#[derive(Clone, Debug)]
pub enum LayerManageAction {
    Push(LayerPushConfig),
    Pop,
}

impl LayerManageAction {
    /// Push `layer` as a popup, keeping the current layer visible below it
    pub fn popup(layer: Layers) -> Self {
        LayerManageAction::Push(LayerPushConfig {
            layer,
            render_self: true,
        })
    }
}

impl From<LayerManageAction> for Action {
    fn from(value: LayerManageAction) -> Self {
        Action::Layer(value)
    }
}

#[derive(Clone, Debug)]
pub enum CompAction {
    Input(InputAction),
}

#[derive(Clone, Debug)]
pub struct ActionSender(pub tokio::sync::mpsc::UnboundedSender<Action>);

impl ActionSender {
    pub fn send<T: Into<Action>>(&self, action: T) {
        self.0.send(action.into()).with_context(||"Action Receiver is dropped or closed, which should not happen if app is still running.").unwrap();
    }
}
impl From<tokio::sync::mpsc::UnboundedSender<Action>> for ActionSender {
    fn from(value: tokio::sync::mpsc::UnboundedSender<Action>) -> Self {
        ActionSender(value)
    }
}

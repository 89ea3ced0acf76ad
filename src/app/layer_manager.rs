use std::ops::{Deref, DerefMut};

use crate::{
    actions::{Action, LayerManageAction, Layers},
    page::{Layer, contact::ContactForm, help_popup::HelpPopup, notice::Notice},
    tui::Event,
};
use ratatui::Frame;
use tracing::{info, warn};

use super::RootState;

/// Whether a layer used an event or left it to the layers below and the app
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventHandlingStatus {
    Consumed,
    ShouldPropagate,
}

pub(crate) struct BoxedLayer(Box<dyn Layer>);
impl Deref for BoxedLayer {
    type Target = dyn Layer;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
impl DerefMut for BoxedLayer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.0
    }
}
impl From<Box<dyn Layer>> for BoxedLayer {
    fn from(layer: Box<dyn Layer>) -> Self {
        Self(layer)
    }
}
impl BoxedLayer {
    fn into_layer_config(self, render: bool) -> LayerConfig {
        LayerConfig {
            layer: self,
            render,
        }
    }
}

pub(crate) struct LayerConfig {
    layer: BoxedLayer,
    render: bool,
}

impl Deref for LayerConfig {
    type Target = BoxedLayer;

    fn deref(&self) -> &Self::Target {
        &self.layer
    }
}
impl DerefMut for LayerConfig {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.layer
    }
}

pub(crate) struct LayerManager {
    layers: Vec<LayerConfig>,
}

impl Deref for LayerManager {
    type Target = Vec<LayerConfig>;

    fn deref(&self) -> &Self::Target {
        &self.layers
    }
}

impl LayerManager {
    pub(crate) fn new(state: &RootState) -> Self {
        Self {
            layers: vec![LayerManager::contact_layer(state).into_layer_config(true)],
        }
    }

    pub(crate) fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        self.layers
            .iter_mut()
            .filter(|page| page.render)
            .for_each(|page| page.render(f, area));
    }

    /// Pass the event to the top layer; layers below a popup stay passive
    pub(crate) fn handle_event(&self, event: &Event) -> EventHandlingStatus {
        match self.layers.last() {
            Some(layer) => layer.handle_events(event),
            None => EventHandlingStatus::ShouldPropagate,
        }
    }

    /// Handle LayerManageAction for root app, updating the layer stack
    pub(crate) fn handle_layer_action(&mut self, action: &LayerManageAction, state: &RootState) {
        match action {
            LayerManageAction::Push(target) => {
                let Some(layer) = LayerManager::get_layer(&target.layer, state) else {
                    return;
                };
                if let Some(top) = self.layers.last_mut() {
                    top.render = target.render_self;
                }
                self.layers.push(layer.into_layer_config(true));
                info!(
                    "Pushing a {} page, current page will {} render, new layer stack length {}",
                    target.layer,
                    if target.render_self { "still" } else { "not" },
                    self.layers.len()
                );
            }
            LayerManageAction::Pop => {
                self.layers.pop();
                if self.layers.is_empty() {
                    self.layers
                        .push(LayerManager::contact_layer(state).into_layer_config(true));
                }
                if let Some(top) = self.layers.last_mut() {
                    top.render = true;
                }
                info!(
                    "Popping page, current layer stack length {}",
                    self.layers.len()
                );
            }
        }
    }

    /// Passing the action to every layer, top first
    ///
    /// Layers below the top still need actions such as [`Action::SwitchInputMode`]
    /// to stay in sync when they become the top again.
    pub(crate) fn handle_action(&mut self, action: Action) {
        self.layers
            .iter_mut()
            .rev()
            .for_each(|layer| layer.update(action.clone()));
    }

    /// Help message of the top layer
    pub(crate) fn help_msg(&self) -> crate::utils::help_msg::HelpMsg {
        self.layers
            .last()
            .map(|layer| layer.get_help_msg())
            .unwrap_or_default()
    }

    fn contact_layer(state: &RootState) -> BoxedLayer {
        let mut page = Box::new(ContactForm::new(
            state.action_tx.clone().into(),
            state.input_mode,
        )) as Box<dyn Layer>;
        page.init();
        page.into()
    }

    /// Get a new layer based on the given layer type
    fn get_layer(layer: &Layers, state: &RootState) -> Option<BoxedLayer> {
        let mut page = match layer {
            Layers::Notice(message) => Box::new(Notice::new(
                state.action_tx.clone().into(),
                message.clone(),
            )) as Box<dyn Layer>,
            Layers::Help(help_msg) => {
                let help = HelpPopup::new(state.action_tx.clone().into(), help_msg.clone());
                match help {
                    Some(help) => Box::new(help) as Box<dyn Layer>,
                    None => {
                        warn!("Help message is empty");
                        return None;
                    }
                }
            }
        };
        page.init();
        Some(page.into())
    }
}

#[cfg(test)]
impl LayerManager {
    pub(crate) fn top(&self) -> &dyn Layer {
        &***self.layers.last().expect("No page in stack")
    }

    pub(crate) fn top_mut(&mut self) -> &mut dyn Layer {
        &mut ***self.layers.last_mut().expect("No page in stack")
    }

    pub(crate) fn is_rendered(&self, index: usize) -> bool {
        self.layers[index].render
    }
}

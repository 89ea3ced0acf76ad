pub(crate) mod input;

use ratatui::{Frame, layout::Rect};

use crate::{actions::Action, app::layer_manager::EventHandlingStatus, tui::Event};

/// A reusable widget owned by a layer.
///
/// Components talk to their owner through [`Action::Comp`] actions tagged with their id.
pub(crate) trait Component {
    #[must_use]
    fn handle_events(&self, event: &Event, input_mode: bool) -> EventHandlingStatus;

    fn update(&mut self, action: &Action);

    fn draw(&self, frame: &mut Frame, area: &Rect, input_mode: bool);
}

//! Application state and update/view logic.

use kroma_ui::prelude::*;

use crate::message::Message;

/// Color shown at startup.
const INITIAL_COLOR: &str = "#884646";

pub struct KromaApp {
    picker: PickerState,
}

impl Application for KromaApp {
    type Message = Message;

    fn new() -> Self {
        Self {
            picker: PickerState::new(parse_color(INITIAL_COLOR)),
        }
    }

    fn title(&self) -> String {
        "Kroma".to_string()
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::Picker(state) => {
                self.picker = state;
            }
            Message::ColorPicked(color) => {
                log::info!("color committed: {}", color.hex);
                // Full representation for shell tooling that scrapes the log.
                match serde_json::to_string(&color) {
                    Ok(json) => log::debug!("{}", json),
                    Err(e) => log::warn!("failed to serialize color: {}", e),
                }
            }
        }
    }

    fn view(&self) -> Element<Message> {
        Element::new(
            color_picker(&self.picker)
                .on_state_change(Message::Picker)
                .on_change(Message::ColorPicked),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kroma_ui::PickerDragging;

    #[test]
    fn starts_with_reference_color() {
        let app = KromaApp::new();
        assert_eq!(app.picker.color.hex, "#884646");
        assert_eq!(app.picker.dragging, PickerDragging::Idle);
    }

    #[test]
    fn picker_message_replaces_state() {
        let mut app = KromaApp::new();
        let replacement = PickerState::new(parse_color("#00ff00"));

        app.update(Message::Picker(replacement.clone()));
        assert_eq!(app.picker, replacement);
    }
}

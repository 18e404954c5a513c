//! Widget trait and related types.

use crate::event::Event;
use crate::layout::{Bounds, Size};
use crate::renderer::Renderer;

/// The core widget trait that all UI elements implement.
pub trait Widget<M> {
    /// Calculate the size this widget wants given available space.
    fn layout(&mut self, available: Size) -> Size;

    /// Draw the widget to the renderer.
    fn draw(&self, renderer: &mut Renderer, bounds: Bounds);

    /// Handle an event, optionally producing messages.
    fn on_event(&mut self, event: &Event, bounds: Bounds) -> EventResult<M> {
        let _ = (event, bounds);
        EventResult::None
    }
}

/// The outcome of dispatching an event to a widget.
///
/// A single interaction can replace the widget's external state *and* commit
/// a value; `Messages` carries both to `update` in order.
#[derive(Debug)]
pub enum EventResult<M> {
    /// The event produced no message.
    None,
    /// The event produced one message.
    Message(M),
    /// The event produced several messages, delivered in order.
    Messages(Vec<M>),
}

impl<M> EventResult<M> {
    /// Append a possible message, upgrading the variant as needed.
    pub fn push(self, message: Option<M>) -> Self {
        match (self, message) {
            (result, None) => result,
            (EventResult::None, Some(m)) => EventResult::Message(m),
            (EventResult::Message(first), Some(m)) => EventResult::Messages(vec![first, m]),
            (EventResult::Messages(mut all), Some(m)) => {
                all.push(m);
                EventResult::Messages(all)
            }
        }
    }

    /// Collect the messages into a vec (empty for `None`).
    pub fn into_messages(self) -> Vec<M> {
        match self {
            EventResult::None => Vec::new(),
            EventResult::Message(m) => vec![m],
            EventResult::Messages(all) => all,
        }
    }
}

impl<M> From<Option<M>> for EventResult<M> {
    fn from(message: Option<M>) -> Self {
        match message {
            Some(m) => EventResult::Message(m),
            None => EventResult::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_upgrades_variants() {
        let result: EventResult<u32> = EventResult::None;
        let result = result.push(None);
        assert!(matches!(result, EventResult::None));

        let result = result.push(Some(1));
        assert!(matches!(result, EventResult::Message(1)));

        let result = result.push(Some(2));
        assert_eq!(result.into_messages(), vec![1, 2]);
    }
}

//! Page - the capability every tab content implements

use ratatui::text::Text;

use crate::message::{Command, Message};

/// An independently stateful view shown under a tab.
///
/// The skeleton treats pages as black boxes: it only initializes them,
/// forwards messages and asks for their rendered body.
pub trait Page: Send {
    /// Commands to run when the page starts
    fn init(&mut self) -> Vec<Command> {
        Vec::new()
    }

    /// React to a message
    fn update(&mut self, msg: &Message) -> Vec<Command>;

    /// Body text drawn inside the frame
    fn render(&self) -> Text<'static>;
}

//! Module trait for input-handling UI components

use crossterm::event::{KeyEvent, MouseEvent};

use super::Action;

/// Trait for UI modules that can handle input
pub trait Module {
    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent) -> Action;

    /// Handle mouse input; most modules ignore it
    fn handle_mouse(&mut self, _mouse: MouseEvent) -> Action {
        Action::None
    }
}

// Input manager - turns raw key events into action edges

use super::action::{Action, InputSource};
use super::bindings::KeyBindings;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A bound key went down or came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
}

/// Keeps key bindings and the set of actions currently held
#[derive(Debug, Default)]
pub struct InputManager {
    bindings: KeyBindings,
    pressed: HashSet<Action>,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::defaults())
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> Option<InputEvent> {
        // Only process physical key presses
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return None;
        };
        self.process_key(key_code, event.state, event.repeat)
    }

    /// Resolve a key transition to an action edge
    ///
    /// Key repeats are dropped. Releases always pass through.
    pub fn process_key(
        &mut self,
        key_code: KeyCode,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputEvent> {
        let action = self.bindings.get_action(InputSource::key(key_code))?;

        match state {
            ElementState::Pressed => {
                if repeat {
                    return None;
                }
                self.pressed.insert(action);
                Some(InputEvent::Pressed(action))
            }
            ElementState::Released => {
                self.pressed.remove(&action);
                Some(InputEvent::Released(action))
            }
        }
    }

    /// Forget all held actions (e.g. on focus loss)
    ///
    /// Returns a release edge for every action that was still held, since the
    /// window will not see those keys come up.
    pub fn reset(&mut self) -> Vec<InputEvent> {
        self.pressed.drain().map(InputEvent::Released).collect()
    }
}

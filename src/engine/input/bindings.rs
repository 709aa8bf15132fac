// Key binding table with remapping

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys) to game actions
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,
}

impl KeyBindings {
    /// Create an empty binding table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a binding table from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut table = Self::new();
        for (source, action) in bindings {
            table.bind(source, action);
        }
        table
    }

    /// The stock arrow keys / WASD / Space layout
    pub fn defaults() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Bind an input source to an action, replacing any previous binding of that source
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

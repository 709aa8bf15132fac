// Input handling system
//
// Translates winit keyboard events into game actions.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `bindings`: Key-to-action table with remapping
// - `manager`: Resolves key events into press/release edges
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputEvent, InputManager};
//
// let mut input = InputManager::new();
//
// // In your event loop, process keyboard events
// match input.process_keyboard_event(&key_event) {
//     Some(InputEvent::Pressed(action)) => game.on_action_pressed(action),
//     Some(InputEvent::Released(action)) => game.on_action_released(action),
//     None => {}
// }
// ```

mod action;
mod bindings;
mod manager;

// Re-export commonly used types
pub use action::Action;
pub use manager::{InputEvent, InputManager};

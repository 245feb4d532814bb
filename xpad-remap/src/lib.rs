mod combo;
mod command;
mod error;
mod gamepad;
pub mod launch;
pub mod mapping;
mod watcher;

pub use combo::{Combo, ComboTracker};
pub use command::{RemapCommand, XBOXDRV};
pub use error::{Error, Result};
pub use gamepad::{Gamepad, GamepadEvents};
pub use watcher::RemapProcess;

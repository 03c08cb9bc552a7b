pub mod codec;
mod session;
mod stack;
mod store;

pub use keypad::PadModel;
pub use session::DeepControl;
pub use stack::{PadStack, DEFAULT_DIAL_VALUE, DEFAULT_DIRECTION_LEVELS};
pub use store::StateStore;

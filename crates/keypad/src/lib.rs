mod layout;
mod pad;

pub use layout::{KeypadLayout, DIAL_PAD, DIRECTION_PAD};
pub use pad::PadModel;

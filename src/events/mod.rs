pub mod keyboard;
pub mod sensors;

pub use keyboard::wire_global_keydown;
pub use sensors::{wire_fullscreen_change, wire_orientation};

//! Pointer input mapping and the paint brush.

mod hue;
mod pointer;

pub use hue::HueBrush;
pub use pointer::PointerMap;

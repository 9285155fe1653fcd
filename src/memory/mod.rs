//! Region allocation over the shared simulation buffer.

mod arena;

pub use arena::{ArenaError, LinearArena, Region, TypedRegion};

//! Flakefield Engine - browser host for the snow accumulation toy
//!
//! The simulation itself lives in an external wasm module and is treated as
//! a black box. This crate owns everything around it:
//! - memory/       - bump allocation of shared-buffer regions
//! - playfield/    - the cell grid and its compact snapshot codec
//! - domain/       - settings
//! - input/        - pointer mapping and the paint brush
//! - snapshot/     - session persistence of the playfield
//! - simulation/   - tick driver, module boundary, wasm facade

#[macro_use]
pub mod core;
pub mod domain;
pub mod input;
pub mod memory;
pub mod playfield;
pub mod simulation;
pub mod snapshot;

use wasm_bindgen::prelude::*;

pub use domain::settings::Settings;
pub use memory::{ArenaError, LinearArena, Region, TypedRegion};
pub use playfield::{CodecError, Playfield};
pub use simulation::{DriverState, SnowfieldCore, StepError, StepRoutine, TickOutcome};
pub use snapshot::{MemoryStore, SnapshotError, SnapshotGateway, StateStore};

#[cfg(target_arch = "wasm32")]
pub use simulation::{boot, Snowfield};

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"❄️ Flakefield engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

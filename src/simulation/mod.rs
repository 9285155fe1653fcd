//! Tick driver for the snow toy.
//!
//! The driver owns the playfield and the cadence around the external step
//! routine; the routine itself stays a black box behind [`StepRoutine`].
//! The host calls [`SnowfieldCore::tick`] once per display callback; the
//! skip factor decides which callbacks actually step.

use thiserror::Error;

use crate::domain::settings::Settings;
use crate::playfield::Playfield;
use crate::snapshot::{SnapshotError, SnapshotGateway};

#[path = "init/init.rs"]
mod init;
#[path = "step/step.rs"]
mod step;

#[cfg(target_arch = "wasm32")]
mod facade;
#[cfg(target_arch = "wasm32")]
mod module;

#[cfg(target_arch = "wasm32")]
pub use facade::{boot, Snowfield};
#[cfg(target_arch = "wasm32")]
pub use module::{BootError, ExternalSim};

/// Failure of the external step routine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("simulation step failed: {0}")]
    Failed(String),
    /// An earlier step failure latched the driver; the session is over.
    #[error("tick loop halted by an earlier step failure")]
    Halted,
}

/// The narrow interface to the external simulation routine.
///
/// The routine receives the generation counter and the grid for the
/// synchronous span of one call, and must write only the cells it was
/// given. Any auxiliary scratch region it needs is granted once at boot
/// by the implementation and never crosses this boundary.
pub trait StepRoutine {
    fn step_frame(
        &mut self,
        generation: u32,
        cells: &mut [u32],
        width: u32,
        height: u32,
    ) -> Result<(), StepError>;
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Stepped,
    /// Swallowed by the skip factor; nothing ran.
    Skipped,
}

/// Driver lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No tick has run yet.
    Idle,
    Running,
    /// A step failure ended the session.
    Halted,
}

/// The frame driver: playfield, generation counter, cadence, dirty flag.
pub struct SnowfieldCore {
    settings: Settings,
    playfield: Playfield,
    stepper: Box<dyn StepRoutine>,

    // State
    generation: u64,
    frame_counter: u64,
    dirty: bool,
    halted: bool,
}

impl SnowfieldCore {
    pub fn new(settings: Settings, stepper: Box<dyn StepRoutine>) -> Self {
        init::create_core(settings, stepper)
    }

    pub fn width(&self) -> u32 {
        self.playfield.width()
    }

    pub fn height(&self) -> u32 {
        self.playfield.height()
    }

    /// Completed simulation steps.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Display callbacks seen, stepped or not.
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn state(&self) -> DriverState {
        if self.halted {
            DriverState::Halted
        } else if self.frame_counter == 0 {
            DriverState::Idle
        } else {
            DriverState::Running
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_skip_frames(&mut self, skip_frames: u32) {
        self.settings.skip_frames = skip_frames.max(1);
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }

    /// Run one display callback's worth of work.
    ///
    /// A step failure is session-fatal: the driver latches into
    /// [`DriverState::Halted`] and every later call reports
    /// [`StepError::Halted`].
    pub fn tick(&mut self) -> Result<TickOutcome, StepError> {
        step::tick(self)
    }

    /// Paint one cell and mark the state dirty. Returns false when the
    /// cell is out of bounds.
    pub fn paint(&mut self, x: u32, y: u32, color: u32) -> bool {
        let painted = self.playfield.set_cell(x, y, color);
        if painted {
            self.dirty = true;
        }
        painted
    }

    /// Clear the playfield (a paint operation as far as persistence is
    /// concerned).
    pub fn clear(&mut self) {
        self.playfield.clear();
        self.dirty = true;
    }

    // === Presentation access ===

    pub fn pixels_ptr(&self) -> *const u32 {
        self.playfield.pixels_ptr()
    }

    pub fn pixels_len_elements(&self) -> usize {
        self.playfield.pixels_len_elements()
    }

    pub fn pixels_len_bytes(&self) -> usize {
        self.playfield.pixels_len_bytes()
    }

    // === Persistence hooks ===

    /// Save the playfield if anything changed since the last save.
    /// Returns Ok(true) when a snapshot was written.
    pub fn save_state(&mut self, gateway: &mut SnapshotGateway) -> Result<bool, SnapshotError> {
        if !self.dirty {
            return Ok(false);
        }
        gateway.save(&self.playfield)?;
        self.dirty = false;
        Ok(true)
    }

    /// Fail-soft restore from the gateway's snapshot slot.
    pub fn restore_state(&mut self, gateway: &SnapshotGateway) -> bool {
        gateway.load(&mut self.playfield)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

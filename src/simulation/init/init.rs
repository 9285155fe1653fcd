use crate::domain::settings::Settings;
use crate::playfield::Playfield;

use super::{SnowfieldCore, StepRoutine};

pub(super) fn create_core(settings: Settings, stepper: Box<dyn StepRoutine>) -> SnowfieldCore {
    let playfield = Playfield::new(settings.width, settings.height);
    SnowfieldCore {
        settings,
        playfield,
        stepper,
        generation: 0,
        frame_counter: 0,
        dirty: false,
        halted: false,
    }
}

use super::{SnowfieldCore, StepError, TickOutcome};

pub(super) fn tick(core: &mut SnowfieldCore) -> Result<TickOutcome, StepError> {
    if core.halted {
        return Err(StepError::Halted);
    }

    // The skip factor gates on the callback counter, not the generation:
    // skipped callbacks still advance the cadence.
    let slot = core.frame_counter;
    core.frame_counter += 1;
    let skip = u64::from(core.settings.skip_frames.max(1));
    if slot % skip != 0 {
        return Ok(TickOutcome::Skipped);
    }

    let width = core.playfield.width();
    let height = core.playfield.height();
    let generation = core.generation as u32;
    if let Err(e) = core
        .stepper
        .step_frame(generation, core.playfield.cells_mut(), width, height)
    {
        core.halted = true;
        return Err(e);
    }

    core.generation += 1;
    core.dirty = true;
    Ok(TickOutcome::Stepped)
}

use wasm_bindgen::prelude::*;

use crate::domain::settings::Settings;
use crate::input::{HueBrush, PointerMap};
use crate::snapshot::{SessionStore, SnapshotGateway};

use super::module::ExternalSim;
use super::{SnowfieldCore, TickOutcome};

/// Load the simulation module and assemble a ready-to-tick toy.
///
/// The async module load is the only suspension point in the whole
/// engine; any failure here aborts startup rather than returning a
/// degraded toy. A stored snapshot, if any, is restored before the first
/// tick.
#[wasm_bindgen]
pub async fn boot(module_url: String, settings_json: Option<String>) -> Result<Snowfield, JsValue> {
    let settings = match settings_json {
        Some(json) => Settings::from_json(&json).map_err(|e| JsValue::from_str(&e))?,
        None => Settings::default(),
    };

    let sim = ExternalSim::load(&module_url, &settings)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    // Persistence is best-effort: no sessionStorage just means the
    // snapshot dies with the page.
    let gateway = match SessionStore::open() {
        Ok(store) => SnapshotGateway::new(Box::new(store), settings.storage_key.as_str()),
        Err(e) => {
            console_warn!("session storage unavailable, snapshots stay in memory: {e}");
            SnapshotGateway::in_memory(settings.storage_key.as_str())
        }
    };

    let pointer = PointerMap::new(settings.width, settings.height, settings.pressure_threshold);
    let mut core = SnowfieldCore::new(settings, Box::new(sim));
    core.restore_state(&gateway);

    Ok(Snowfield {
        core,
        gateway,
        pointer,
        brush: HueBrush::new(),
    })
}

/// The JS-facing toy: driver, persistence gateway, and input state.
#[wasm_bindgen]
pub struct Snowfield {
    core: SnowfieldCore,
    gateway: SnapshotGateway,
    pointer: PointerMap,
    brush: HueBrush,
}

#[wasm_bindgen]
impl Snowfield {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.core.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.core.height()
    }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 {
        self.core.generation()
    }

    /// Run one display callback. Returns true when the simulation
    /// actually stepped (false when the skip factor swallowed it).
    ///
    /// A step failure is rethrown to the host and the driver stays
    /// halted; the host should stop scheduling callbacks.
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        match self.core.tick() {
            Ok(TickOutcome::Stepped) => Ok(true),
            Ok(TickOutcome::Skipped) => Ok(false),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Pointer handler: gate on pressure, map to a cell, paint the next
    /// brush color. Returns true when a cell was painted.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(
        &mut self,
        page_x: f64,
        page_y: f64,
        surface_width: f64,
        surface_height: f64,
        pressure: f32,
    ) -> bool {
        if !self.pointer.accepts_pressure(pressure) {
            return false;
        }
        let Some((x, y)) = self
            .pointer
            .map(page_x, page_y, surface_width, surface_height)
        else {
            return false;
        };
        let color = self.brush.next_color();
        self.core.paint(x, y, color)
    }

    /// Orientation hook: rotate pointer mapping for landscape display.
    #[wasm_bindgen(js_name = setRotated)]
    pub fn set_rotated(&mut self, rotated: bool) {
        self.pointer.set_rotated(rotated);
    }

    /// pagehide/visibilitychange hook. No-op unless the field changed.
    pub fn save(&mut self) -> Result<bool, JsValue> {
        self.core
            .save_state(&mut self.gateway)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// visibilitychange(visible) hook: fail-soft snapshot restore.
    pub fn restore(&mut self) -> bool {
        self.core.restore_state(&self.gateway)
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    #[wasm_bindgen(js_name = setSkipFrames)]
    pub fn set_skip_frames(&mut self, skip_frames: u32) {
        self.core.set_skip_frames(skip_frames);
    }

    /// Pointer to the RGBA pixel buffer (for ImageData over wasm memory).
    pub fn pixels_ptr(&self) -> *const u32 {
        self.core.pixels_ptr()
    }

    pub fn pixels_len_elements(&self) -> usize {
        self.core.pixels_len_elements()
    }

    pub fn pixels_len_bytes(&self) -> usize {
        self.core.pixels_len_bytes()
    }
}

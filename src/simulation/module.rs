//! The external simulation module boundary.
//!
//! Mirrors the reference host bootstrap: fetch the wasm binary, compile
//! and instantiate it, grow its exported memory, then carve the playfield
//! and scratch regions out of the linear buffer starting at the module's
//! `__heap_base`. The module's memory never leaks past this type; the
//! driver only ever sees the [`StepRoutine`] trait.

use js_sys::{Array, Function, Reflect, Uint32Array, WebAssembly};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::domain::settings::Settings;
use crate::memory::{ArenaError, LinearArena, TypedRegion};

use super::{StepError, StepRoutine};

/// Startup failure of the external module. Always fatal: the toy never
/// runs in a degraded no-simulation state.
#[derive(Debug, Error)]
pub enum BootError {
    #[error("module fetch failed: {0}")]
    Fetch(String),
    #[error("module compile failed: {0}")]
    Compile(String),
    #[error("module instantiate failed: {0}")]
    Instantiate(String),
    #[error("module export '{0}' missing or of the wrong type")]
    BadExport(String),
    #[error(transparent)]
    Memory(#[from] ArenaError),
}

/// The instantiated simulation module plus the regions granted to it.
pub struct ExternalSim {
    memory: WebAssembly::Memory,
    step_fn: Function,
    grid: TypedRegion<u32>,
    aux: TypedRegion<u32>,
}

impl ExternalSim {
    /// Fetch, compile, and instantiate the module at `url`, then carve
    /// the grid and auxiliary regions for a `settings`-sized playfield.
    pub async fn load(url: &str, settings: &Settings) -> Result<Self, BootError> {
        let window = web_sys::window().ok_or_else(|| BootError::Fetch("no window".into()))?;

        let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| BootError::Fetch(format!("{e:?}")))?
            .dyn_into()
            .map_err(|_| BootError::Fetch("fetch did not return a Response".into()))?;
        let buffer = JsFuture::from(
            response
                .array_buffer()
                .map_err(|e| BootError::Fetch(format!("{e:?}")))?,
        )
        .await
        .map_err(|e| BootError::Fetch(format!("{e:?}")))?;

        let module: WebAssembly::Module = JsFuture::from(WebAssembly::compile(&buffer))
            .await
            .map_err(|e| BootError::Compile(format!("{e:?}")))?
            .dyn_into()
            .map_err(|_| BootError::Compile("compile did not return a Module".into()))?;

        let instance: WebAssembly::Instance =
            JsFuture::from(WebAssembly::instantiate_module(&module, &js_sys::Object::new()))
                .await
                .map_err(|e| BootError::Instantiate(format!("{e:?}")))?
                .dyn_into()
                .map_err(|_| BootError::Instantiate("instantiate did not return an Instance".into()))?;

        let exports = instance.exports();

        let memory: WebAssembly::Memory = Reflect::get(&exports, &"memory".into())
            .map_err(|_| BootError::BadExport("memory".into()))?
            .dyn_into()
            .map_err(|_| BootError::BadExport("memory".into()))?;
        memory.grow(settings.memory_pages);

        let step_fn: Function = Reflect::get(&exports, &"stepFrame".into())
            .map_err(|_| BootError::BadExport("stepFrame".into()))?
            .dyn_into()
            .map_err(|_| BootError::BadExport("stepFrame".into()))?;

        let heap_base = export_global_usize(&exports, "__heap_base")?;

        // The buffer object is only valid until the next grow, so read its
        // size after growing.
        let capacity = memory
            .buffer()
            .unchecked_into::<js_sys::ArrayBuffer>()
            .byte_length() as usize;

        let mut arena = LinearArena::with_base(capacity, heap_base);
        let cells = settings.cell_count();
        let grid = arena.allocate_array::<u32>(cells)?;
        let aux = arena.allocate_array::<u32>(cells)?;

        console_log!(
            "simulation module ready: heap base {heap_base}, {capacity} bytes, grid at {}, scratch at {}",
            grid.byte_offset(),
            aux.byte_offset()
        );

        Ok(Self {
            memory,
            step_fn,
            grid,
            aux,
        })
    }

    /// A fresh typed view over the grid region. Views are rebuilt per use
    /// because growing the memory detaches old buffers.
    fn grid_view(&self) -> Uint32Array {
        Uint32Array::new_with_byte_offset_and_length(
            &self.memory.buffer(),
            self.grid.byte_offset() as u32,
            self.grid.count() as u32,
        )
    }
}

impl StepRoutine for ExternalSim {
    fn step_frame(
        &mut self,
        generation: u32,
        cells: &mut [u32],
        width: u32,
        height: u32,
    ) -> Result<(), StepError> {
        if cells.len() != self.grid.count() {
            return Err(StepError::Failed(format!(
                "grid size mismatch: {} cells for a region of {}",
                cells.len(),
                self.grid.count()
            )));
        }

        self.grid_view().copy_from(cells);

        let args = Array::of5(
            &generation.into(),
            &(self.grid.byte_offset() as u32).into(),
            &width.into(),
            &height.into(),
            &(self.aux.byte_offset() as u32).into(),
        );
        self.step_fn
            .apply(&JsValue::NULL, &args)
            .map_err(|e| StepError::Failed(format!("{e:?}")))?;

        self.grid_view().copy_to(cells);
        Ok(())
    }
}

fn export_global_usize(exports: &JsValue, name: &str) -> Result<usize, BootError> {
    let global: WebAssembly::Global = Reflect::get(exports, &JsValue::from_str(name))
        .map_err(|_| BootError::BadExport(name.to_string()))?
        .dyn_into()
        .map_err(|_| BootError::BadExport(name.to_string()))?;
    global
        .value()
        .as_f64()
        .map(|v| v as usize)
        .ok_or_else(|| BootError::BadExport(name.to_string()))
}

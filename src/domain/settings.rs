//! Toy settings, optionally loaded from a host-supplied JSON blob.

use serde::{Deserialize, Serialize};

/// Everything the host can tune without rebuilding the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in cells.
    pub width: u32,
    /// Playfield height in cells.
    pub height: u32,
    /// Step the simulation on every Nth display callback (1 = every one).
    pub skip_frames: u32,
    /// Minimum pointer pressure that counts as painting.
    pub pressure_threshold: f32,
    /// Session storage key for the playfield snapshot.
    pub storage_key: String,
    /// Pages to grow the simulation module's memory by before carving
    /// regions (64 KiB each; 256 pages = 16 MiB).
    pub memory_pages: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 72,
            height: 128,
            skip_frames: 1,
            pressure_threshold: 0.25,
            storage_key: "flakefield".to_string(),
            memory_pages: 256,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: Settings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), String> {
        // Columns 0 and width-1 are walls; painting needs at least one
        // interior column.
        if self.width < 3 {
            return Err(format!("width {} too small (minimum 3)", self.width));
        }
        if self.height == 0 {
            return Err("height must be at least 1".to_string());
        }
        if self.skip_frames == 0 {
            return Err("skip_frames must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.pressure_threshold) {
            return Err(format!(
                "pressure_threshold {} outside 0..=1",
                self.pressure_threshold
            ));
        }
        if self.storage_key.is_empty() {
            return Err("storage_key must not be empty".to_string());
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }
}

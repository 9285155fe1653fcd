//! Display-to-playfield coordinate mapping.

/// Maps pointer positions from display coordinates to grid cells.
///
/// The scale factor comes from the display width alone (cells are square,
/// the canvas preserves the aspect ratio). Under landscape orientation the
/// canvas is shown rotated 90°, so pointer coordinates rotate back before
/// scaling. Hits on column 0, column width−1, or outside the rows are
/// dropped, never clamped: the two edge columns are the simulation's walls
/// and stay unpaintable.
#[derive(Debug, Clone)]
pub struct PointerMap {
    width: u32,
    height: u32,
    rotated: bool,
    pressure_threshold: f32,
}

impl PointerMap {
    pub fn new(width: u32, height: u32, pressure_threshold: f32) -> Self {
        Self {
            width,
            height,
            rotated: false,
            pressure_threshold,
        }
    }

    pub fn set_rotated(&mut self, rotated: bool) {
        self.rotated = rotated;
    }

    pub fn rotated(&self) -> bool {
        self.rotated
    }

    /// Whether a pointer event with this pressure paints at all.
    pub fn accepts_pressure(&self, pressure: f32) -> bool {
        pressure > self.pressure_threshold
    }

    /// Map a display position to a paintable cell, or None to drop it.
    ///
    /// `surface_width`/`surface_height` are the displayed canvas size in
    /// the same units as `page_x`/`page_y`.
    pub fn map(
        &self,
        page_x: f64,
        page_y: f64,
        surface_width: f64,
        surface_height: f64,
    ) -> Option<(u32, u32)> {
        if surface_width <= 0.0 {
            return None;
        }

        let (mut x, mut y) = (page_x, page_y);
        if self.rotated {
            let new_y = surface_height - 1.0 - x;
            x = y;
            y = new_y;
        }

        let scale = f64::from(self.width) / surface_width;
        let gx = (x * scale) as i64;
        let gy = (y * scale) as i64;

        if gx >= 1 && gx < i64::from(self.width) - 1 && gy >= 0 && gy < i64::from(self.height) {
            Some((gx as u32, gy as u32))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> PointerMap {
        PointerMap::new(72, 128, 0.25)
    }

    #[test]
    fn scales_display_coordinates_to_cells() {
        // 720px wide canvas over a 72-cell field: 10px per cell.
        let m = map();
        assert_eq!(m.map(15.0, 25.0, 720.0, 1280.0), Some((1, 2)));
        assert_eq!(m.map(355.0, 1279.0, 720.0, 1280.0), Some((35, 127)));
    }

    #[test]
    fn edge_columns_are_never_paintable() {
        let m = map();
        // Column 0 and column width-1 drop.
        assert_eq!(m.map(5.0, 100.0, 720.0, 1280.0), None);
        assert_eq!(m.map(715.0, 100.0, 720.0, 1280.0), None);
        // One cell inward is fine.
        assert_eq!(m.map(15.0, 100.0, 720.0, 1280.0), Some((1, 10)));
        assert_eq!(m.map(705.0, 100.0, 720.0, 1280.0), Some((70, 10)));
    }

    #[test]
    fn out_of_range_rows_are_dropped_not_clamped() {
        let m = map();
        assert_eq!(m.map(100.0, -5.0, 720.0, 1280.0), None);
        assert_eq!(m.map(100.0, 1285.0, 720.0, 1280.0), None);
    }

    #[test]
    fn landscape_rotation_swaps_axes() {
        let mut m = map();
        m.set_rotated(true);
        // The canvas keeps its 720×1280 layout geometry; only its CSS
        // presentation rotates. page (100, 300) -> x=300,
        // y=1280-1-100=1179 -> cell (30, 117).
        assert_eq!(m.map(100.0, 300.0, 720.0, 1280.0), Some((30, 117)));
        // Rotation can push a hit into the dropped wall columns too.
        assert_eq!(m.map(100.0, 5.0, 720.0, 1280.0), None);
    }

    #[test]
    fn pressure_gate_uses_threshold() {
        let m = map();
        assert!(!m.accepts_pressure(0.0));
        assert!(!m.accepts_pressure(0.25));
        assert!(m.accepts_pressure(0.3));
    }

    #[test]
    fn degenerate_surface_is_dropped() {
        let m = map();
        assert_eq!(m.map(10.0, 10.0, 0.0, 0.0), None);
    }
}

//! The paint brush: a slowly cycling hue with a saturation wobble.

use std::f64::consts::PI;

/// Produces one paint color per painted cell, walking the hue wheel one
/// degree at a time while the saturation breathes between 0.75 and 1.0.
#[derive(Debug, Default, Clone)]
pub struct HueBrush {
    angle: u32,
}

impl HueBrush {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle(&self) -> u32 {
        self.angle
    }

    /// Next paint color as a little-endian RGBA cell value (alpha 255).
    pub fn next_color(&mut self) -> u32 {
        let angle = f64::from(self.angle);
        let sat = (1.0 - 0.125) + (angle / 180.0 / 4.0 * PI).cos() * 0.125;
        let [r, g, b] = hsl_to_rgb(angle, sat, 0.5);
        self.angle = self.angle.wrapping_add(1);
        u32::from_le_bytes([
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            255,
        ])
    }
}

/// HSL to RGB, hue in degrees, all channels in 0..=1.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let k = |n: f64| (n + h / 30.0) % 12.0;
    let a = s * l.min(1.0 - l);
    let f = |n: f64| l - a * (-1.0f64).max((k(n) - 3.0).min((9.0 - k(n)).min(1.0)));
    [f(0.0), f(8.0), f(4.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_red_at_zero_hue() {
        let [r, g, b] = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((r - 1.0).abs() < 1e-9);
        assert!(g.abs() < 1e-9);
        assert!(b.abs() < 1e-9);
    }

    #[test]
    fn hue_wraps_past_a_full_turn() {
        let a = hsl_to_rgb(10.0, 1.0, 0.5);
        let b = hsl_to_rgb(370.0, 1.0, 0.5);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn brush_colors_are_opaque_and_never_empty() {
        let mut brush = HueBrush::new();
        for _ in 0..720 {
            let color = brush.next_color();
            assert_eq!(color.to_le_bytes()[3], 255);
            assert_ne!(color, 0);
        }
    }

    #[test]
    fn brush_advances_one_degree_per_cell() {
        let mut brush = HueBrush::new();
        let first = brush.next_color();
        let second = brush.next_color();
        assert_eq!(brush.angle(), 2);
        assert_ne!(first, second);
    }
}

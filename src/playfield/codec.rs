//! Compact snapshot codec for the playfield.
//!
//! Layout: one mode byte, then the payload.
//! - Mode 0 (raw): every cell verbatim, little-endian 4-byte form.
//! - Mode N in 1..=255 (palette): N×4 palette bytes, then one index byte
//!   per cell in row-major order.
//!
//! Palette mode needs a zero entry in slot 0 (empty cells dominate the
//! field, and the decoder relies on `palette[0] == 0` meaning "empty").
//! A grid whose distinct values do not include 0 therefore encodes raw;
//! raw is always exact, so nothing is lost beyond compactness.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// Mode byte for the verbatim fallback encoding.
pub const RAW_MODE: u8 = 0;

/// Padding entry appended when a grid has a single distinct value, so a
/// palette always has at least two entries. All-bits-one is never a real
/// single-value grid color here: reaching palette mode requires the value
/// 0 to be present.
const PALETTE_SENTINEL: u32 = u32::MAX;

const MAX_PALETTE: usize = 255;

/// Structural validation failure of a stored blob.
///
/// Stored bytes are client-controlled; every length and index is checked
/// before use and the decoder never reads past the blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("empty blob")]
    Empty,
    #[error("blob length {actual} does not match mode {mode} (expected {expected})")]
    LengthMismatch {
        mode: u8,
        expected: usize,
        actual: usize,
    },
    #[error("palette index {index} out of range for palette of {palette_len}")]
    IndexOutOfRange { index: u8, palette_len: u8 },
}

/// Encode a cell grid into its compact byte form.
///
/// Distinct values are enumerated in first-appearance order, which keeps
/// the output deterministic for a given grid.
pub fn encode(cells: &[u32]) -> Vec<u8> {
    let mut palette: Vec<u32> = Vec::new();
    let mut seen: HashSet<u32> = HashSet::new();
    for &cell in cells {
        if seen.insert(cell) {
            if palette.len() == MAX_PALETTE {
                // 256th distinct value: palette indices no longer fit a byte.
                return encode_raw(cells);
            }
            palette.push(cell);
        }
    }

    let Some(zero_slot) = palette.iter().position(|&v| v == 0) else {
        return encode_raw(cells);
    };

    if palette.len() == 1 {
        palette.push(PALETTE_SENTINEL);
    }
    palette.swap(0, zero_slot);

    let lookup: HashMap<u32, u8> = palette
        .iter()
        .enumerate()
        .map(|(slot, &value)| (value, slot as u8))
        .collect();

    let mut blob = Vec::with_capacity(1 + palette.len() * 4 + cells.len());
    blob.push(palette.len() as u8);
    for &entry in &palette {
        blob.extend_from_slice(&entry.to_le_bytes());
    }
    for &cell in cells {
        blob.push(lookup[&cell]);
    }
    blob
}

fn encode_raw(cells: &[u32]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(1 + cells.len() * 4);
    blob.push(RAW_MODE);
    for &cell in cells {
        blob.extend_from_slice(&cell.to_le_bytes());
    }
    blob
}

/// Decode a blob back into exactly `cell_count` cells.
pub fn decode(blob: &[u8], cell_count: usize) -> Result<Vec<u32>, CodecError> {
    let (&mode, payload) = blob.split_first().ok_or(CodecError::Empty)?;

    if mode == RAW_MODE {
        let expected = 1 + cell_count * 4;
        if blob.len() != expected {
            return Err(CodecError::LengthMismatch {
                mode,
                expected,
                actual: blob.len(),
            });
        }
        return Ok(payload
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect());
    }

    let palette_len = mode as usize;
    let expected = 1 + palette_len * 4 + cell_count;
    if blob.len() != expected {
        return Err(CodecError::LengthMismatch {
            mode,
            expected,
            actual: blob.len(),
        });
    }

    let (palette_bytes, indices) = payload.split_at(palette_len * 4);
    let palette: Vec<u32> = palette_bytes
        .chunks_exact(4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    let mut cells = Vec::with_capacity(cell_count);
    for &index in indices {
        if index as usize >= palette_len {
            return Err(CodecError::IndexOutOfRange {
                index,
                palette_len: mode,
            });
        }
        cells.push(palette[index as usize]);
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_grid_encodes_with_sentinel_palette() {
        // 2×2, every cell empty.
        let cells = [0u32; 4];
        let blob = encode(&cells);

        assert_eq!(blob[0], 2);
        assert_eq!(&blob[1..5], &[0, 0, 0, 0]);
        assert_eq!(&blob[5..9], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&blob[9..], &[0, 0, 0, 0]);

        assert_eq!(decode(&blob, 4).unwrap(), cells);
    }

    #[test]
    fn two_color_grid_round_trips() {
        let cells = [0x1122_3344, 0, 0x1122_3344, 0];
        let blob = encode(&cells);
        assert_eq!(decode(&blob, 4).unwrap(), cells);
    }

    #[test]
    fn palette_slot_zero_holds_zero_after_swap() {
        // Zero appears late, so it lands in a non-zero slot before the swap.
        let cells = [7, 9, 7, 0, 9, 7];
        let blob = encode(&cells);

        let mode = blob[0] as usize;
        assert!(mode >= 1);
        let slot0 = u32::from_le_bytes([blob[1], blob[2], blob[3], blob[4]]);
        assert_eq!(slot0, 0);
        assert_eq!(decode(&blob, cells.len()).unwrap(), cells);
    }

    #[test]
    fn palette_order_is_deterministic() {
        let cells = [5, 0, 6, 5, 0];
        assert_eq!(encode(&cells), encode(&cells));
    }

    #[test]
    fn over_255_distinct_values_use_raw_mode() {
        // 300 distinct values on a 20×15 grid.
        let cells: Vec<u32> = (1..=300u32).collect();
        let blob = encode(&cells);

        assert_eq!(blob[0], RAW_MODE);
        assert_eq!(blob.len(), 1 + 4 * cells.len());
        assert_eq!(decode(&blob, cells.len()).unwrap(), cells);
    }

    #[test]
    fn exactly_255_distinct_values_stay_in_palette_mode() {
        let cells: Vec<u32> = (0..255u32).collect();
        let blob = encode(&cells);
        assert_eq!(blob[0], 255);
        assert_eq!(decode(&blob, cells.len()).unwrap(), cells);
    }

    #[test]
    fn grid_without_zero_falls_back_to_raw() {
        let cells = [3u32, 4, 3, 4];
        let blob = encode(&cells);
        assert_eq!(blob[0], RAW_MODE);
        assert_eq!(decode(&blob, 4).unwrap(), cells);
    }

    #[test]
    fn single_value_all_max_grid_still_round_trips() {
        // No zero present, so the sentinel can never collide with it.
        let cells = [u32::MAX; 4];
        let blob = encode(&cells);
        assert_eq!(blob[0], RAW_MODE);
        assert_eq!(decode(&blob, 4).unwrap(), cells);
    }

    #[test]
    fn decode_rejects_empty_blob() {
        assert_eq!(decode(&[], 4), Err(CodecError::Empty));
    }

    #[test]
    fn decode_rejects_wrong_raw_length() {
        let mut blob = encode(&[1u32, 2, 3, 4]);
        assert_eq!(blob[0], RAW_MODE);
        blob.pop();
        assert!(matches!(
            decode(&blob, 4),
            Err(CodecError::LengthMismatch { mode: 0, .. })
        ));
    }

    #[test]
    fn decode_rejects_wrong_palette_length() {
        let cells = [0u32, 1, 0, 1];
        let mut blob = encode(&cells);
        let mode = blob[0];
        assert!(mode > 0);

        blob.push(0);
        assert!(matches!(
            decode(&blob, 4),
            Err(CodecError::LengthMismatch { .. })
        ));

        blob.truncate(blob.len() - 2);
        assert!(matches!(
            decode(&blob, 4),
            Err(CodecError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn decode_rejects_out_of_range_index() {
        let cells = [0u32, 1, 0, 1];
        let mut blob = encode(&cells);
        let mode = blob[0];
        let last = blob.len() - 1;
        blob[last] = mode; // first invalid index value
        assert_eq!(
            decode(&blob, 4),
            Err(CodecError::IndexOutOfRange {
                index: mode,
                palette_len: mode,
            })
        );
    }

    #[test]
    fn decode_rejects_mismatched_cell_count() {
        let blob = encode(&[0u32, 1, 0, 1]);
        assert!(decode(&blob, 5).is_err());
        assert!(decode(&blob, 3).is_err());
    }

    #[test]
    fn round_trip_survives_mixed_grids() {
        // A paint-like field: mostly empty, a handful of hues, one wall color.
        let mut cells = vec![0u32; 72 * 128];
        for (i, cell) in cells.iter_mut().enumerate() {
            match i % 97 {
                0 => *cell = 0xFF44_4444,
                1 => *cell = 0xFFAA_3311,
                2 => *cell = 0xFF11_22EE,
                _ => {}
            }
        }
        let blob = encode(&cells);
        assert!(blob[0] > 0);
        // 1 byte per cell plus the fixed table beats 4 bytes per cell.
        assert!(blob.len() < cells.len() * 4 / 2);
        assert_eq!(decode(&blob, cells.len()).unwrap(), cells);
    }
}

use serde::{Deserialize, Serialize};
use tracing::debug;

const SPEED_OF_SOUND_MPS: f64 = 343.0;
const FEET_TO_METERS: f64 = 0.3048;
const MIN_MODE_HZ: f64 = 20.0;
const MAX_MODE_HZ: f64 = 300.0;

/// Room dimensions in feet, as supplied by the caller. A dimension of `0.0`
/// means "unknown" and suppresses every mode that would require it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub length_ft: f64,
    pub width_ft: f64,
    pub height_ft: f64,
}

/// Computes axial, tangential, and oblique modal frequencies, filters to
/// the audible low-frequency band, and thins by minimum octave spacing.
/// Never fails: malformed or missing dimensions simply yield no modes.
pub fn room_modes(dims: &RoomDimensions, max_modes: usize, min_spacing_octaves: f64) -> Vec<f64> {
    let l = dims.length_ft * FEET_TO_METERS;
    let w = dims.width_ft * FEET_TO_METERS;
    let h = dims.height_ft * FEET_TO_METERS;

    let mut candidates = Vec::new();

    if l > 0.0 {
        candidates.push(SPEED_OF_SOUND_MPS / (2.0 * l));
    }
    if w > 0.0 {
        candidates.push(SPEED_OF_SOUND_MPS / (2.0 * w));
    }
    if h > 0.0 {
        candidates.push(SPEED_OF_SOUND_MPS / (2.0 * h));
    }

    if l > 0.0 && w > 0.0 {
        candidates.push(SPEED_OF_SOUND_MPS / (2.0 * (l * l + w * w).sqrt()));
    }
    if l > 0.0 && h > 0.0 {
        candidates.push(SPEED_OF_SOUND_MPS / (2.0 * (l * l + h * h).sqrt()));
    }
    if w > 0.0 && h > 0.0 {
        candidates.push(SPEED_OF_SOUND_MPS / (2.0 * (w * w + h * h).sqrt()));
    }

    if l > 0.0 && w > 0.0 && h > 0.0 {
        candidates.push(SPEED_OF_SOUND_MPS / (2.0 * (l * l + w * w + h * h).sqrt()));
    }

    candidates.retain(|f| f.is_finite() && *f >= MIN_MODE_HZ && *f <= MAX_MODE_HZ);
    candidates.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let min_ratio = 2f64.powf(min_spacing_octaves);
    let mut kept: Vec<f64> = Vec::new();
    for f in candidates {
        if kept.is_empty() || f / kept.last().unwrap() >= min_ratio {
            kept.push(f);
        }
        if kept.len() >= max_modes {
            break;
        }
    }

    debug!(count = kept.len(), "computed room modes");

    kept
}

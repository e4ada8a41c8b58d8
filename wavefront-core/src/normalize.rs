use tracing::debug;

/// Shifts `magnitudes_db` so the bin nearest `anchor_hz` reads exactly 0 dB.
/// Idempotent: the anchor bin is 0 after the first call, so a second call
/// subtracts 0 from everything.
pub fn normalize(frequencies_hz: &[f64], magnitudes_db: &[f64], anchor_hz: f64) -> Vec<f64> {
    let anchor_index = frequencies_hz
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (*a - anchor_hz).abs().partial_cmp(&(*b - anchor_hz).abs()).unwrap()
        })
        .map(|(i, _)| i);

    let Some(anchor_index) = anchor_index else {
        return magnitudes_db.to_vec();
    };

    let shift = magnitudes_db[anchor_index];
    debug!(anchor_hz, anchor_index, shift, "normalized response");

    magnitudes_db.iter().map(|m| m - shift).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn anchor_bin_becomes_zero() {
        let freqs = vec![100.0, 1000.0, 5000.0];
        let mags = vec![-2.0, 6.0, -1.0];

        let normalized = normalize(&freqs, &mags, 1000.0);
        assert_eq!(normalized[1], 0.0);
    }

    #[test]
    fn is_idempotent() {
        let freqs = vec![100.0, 1000.0, 5000.0];
        let mags = vec![-2.0, 6.0, -1.0];

        let once = normalize(&freqs, &mags, 1000.0);
        let twice = normalize(&freqs, &once, 1000.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_is_passthrough() {
        assert!(normalize(&[], &[], 1000.0).is_empty());
    }
}

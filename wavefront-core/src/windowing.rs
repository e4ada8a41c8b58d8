use tracing::debug;

/// Extracts the acoustically relevant slice of an impulse response: the
/// peak (direct sound) plus `pre_ms` before it and `post_ms` after it. No
/// taper is applied - [`crate::spectrum`] handles edge tapering for its own
/// purposes.
pub fn window_impulse(impulse: &[f32], sample_rate: u32, pre_ms: f64, post_ms: f64) -> Vec<f32> {
    if impulse.is_empty() {
        return Vec::new();
    }

    let peak = impulse
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.abs().partial_cmp(&b.abs()).unwrap())
        .map(|(i, _)| i)
        .unwrap_or(0);

    let sr = sample_rate as f64;
    let pre = ((pre_ms / 1000.0) * sr).round() as usize;
    let post = ((post_ms / 1000.0) * sr).round() as usize;

    let start = peak.saturating_sub(pre);
    let end = (peak + post).min(impulse.len());

    debug!(peak, start, end, len = impulse.len(), "windowed impulse response");

    impulse[start..end].to_vec()
}

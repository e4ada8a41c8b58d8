use tracing::debug;

/// Fractional-octave smoothing in the power domain: averaging in dB biases
/// toward peaks, so every bin within the window is converted to power,
/// averaged, and converted back.
pub fn smooth(frequencies_hz: &[f64], magnitudes_db: &[f64], fraction: f64) -> Vec<f64> {
    let factor = 2f64.powf(fraction / 2.0);

    let smoothed: Vec<f64> = frequencies_hz
        .iter()
        .enumerate()
        .map(|(i, &f_i)| {
            if f_i < 20.0 {
                return magnitudes_db[i];
            }

            let lo = f_i / factor;
            let hi = f_i * factor;

            let mut power_sum = 0.0;
            let mut count = 0usize;
            for (&f, &db) in frequencies_hz.iter().zip(magnitudes_db.iter()) {
                if f >= lo && f <= hi {
                    power_sum += 10f64.powf(db / 10.0);
                    count += 1;
                }
            }

            let mean_power = if count > 0 { power_sum / count as f64 } else { 0.0 };
            10.0 * (mean_power + 1e-12).log10()
        })
        .collect();

    debug!(bins = smoothed.len(), fraction, "applied fractional-octave smoothing");

    smoothed
}

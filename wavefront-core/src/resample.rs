use tracing::debug;

/// Linearly interpolates `(frequencies_hz, magnitudes_db)` onto `points`
/// logarithmically spaced samples between 20 Hz and 20 kHz. Samples outside
/// the source range are dropped rather than extrapolated.
pub fn resample_log(frequencies_hz: &[f64], magnitudes_db: &[f64], points: usize) -> (Vec<f64>, Vec<f64>) {
    if frequencies_hz.is_empty() || points == 0 {
        return (Vec::new(), Vec::new());
    }

    let log_lo = 20f64.log10();
    let log_hi = 20_000f64.log10();

    let targets: Vec<f64> = if points == 1 {
        vec![10f64.powf(log_lo)]
    } else {
        (0..points)
            .map(|i| {
                let t = log_lo + (log_hi - log_lo) * i as f64 / (points - 1) as f64;
                10f64.powf(t)
            })
            .collect()
    };

    let mut out_freqs = Vec::with_capacity(points);
    let mut out_mags = Vec::with_capacity(points);

    for target in targets {
        if let Some(value) = interpolate_at(frequencies_hz, magnitudes_db, target) {
            if value.is_finite() {
                out_freqs.push(target);
                out_mags.push(value);
            }
        }
    }

    debug!(points = out_freqs.len(), "resampled onto log-frequency grid");

    (out_freqs, out_mags)
}

fn interpolate_at(frequencies_hz: &[f64], magnitudes_db: &[f64], target: f64) -> Option<f64> {
    if target < frequencies_hz[0] || target > *frequencies_hz.last().unwrap() {
        return None;
    }

    match frequencies_hz.binary_search_by(|f| f.partial_cmp(&target).unwrap()) {
        Ok(i) => Some(magnitudes_db[i]),
        Err(i) => {
            if i == 0 {
                Some(magnitudes_db[0])
            } else if i >= frequencies_hz.len() {
                Some(*magnitudes_db.last().unwrap())
            } else {
                let (f0, f1) = (frequencies_hz[i - 1], frequencies_hz[i]);
                let (m0, m1) = (magnitudes_db[i - 1], magnitudes_db[i]);
                let t = (target - f0) / (f1 - f0);
                Some(m0 + t * (m1 - m0))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn produces_requested_point_count() {
        let freqs: Vec<f64> = (20..=20_000).map(|f| f as f64).collect();
        let mags = vec![0.0; freqs.len()];

        let (out_freqs, out_mags) = resample_log(&freqs, &mags, 300);
        assert_eq!(out_freqs.len(), 300);
        assert_eq!(out_mags.len(), 300);
    }

    #[test]
    fn evaluating_at_original_grid_is_identity() {
        let freqs = vec![20.0, 100.0, 1000.0, 20_000.0];
        let mags = vec![1.0, 2.0, 3.0, 4.0];

        for (i, &f) in freqs.iter().enumerate() {
            let value = interpolate_at(&freqs, &mags, f).unwrap();
            assert!((value - mags[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn out_of_range_targets_are_dropped() {
        let freqs = vec![100.0, 200.0];
        let mags = vec![0.0, 0.0];

        assert!(interpolate_at(&freqs, &mags, 50.0).is_none());
        assert!(interpolate_at(&freqs, &mags, 500.0).is_none());
    }
}

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::AnalysisError;
use crate::reference::ReferenceRegistry;
use crate::room_modes::{self, RoomDimensions};
use crate::{alignment, deconvolve, normalize, resample, smoothing, spectrum, windowing};

/// A single `(frequency, magnitude)` pair in the final display curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyPoint {
    pub frequency_hz: f64,
    pub magnitude_db: f64,
}

/// A caller-owned recording: mono PCM plus its sample rate.
#[derive(Debug, Clone)]
pub struct Recording {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// The complete result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub frequency_data: Vec<FrequencyPoint>,
    pub analysis_type: String,
    pub smoothing: String,
    pub fft_size: usize,
    pub reference: String,
    pub rt60: f64,
    pub room_modes: Vec<f64>,
}

const RT60_PLACEHOLDER: f64 = 0.5;

/// Runs the full sweep-deconvolution pipeline: looks up the reference
/// signal, aligns the recording to it, deconvolves, windows the impulse,
/// extracts a magnitude spectrum, smooths, normalizes, resamples for
/// display, and (if room dimensions are supplied) computes room modes.
#[instrument(skip_all, fields(signal_id, recording_len = recording.samples.len()))]
pub fn analyze(
    recording: &Recording,
    signal_id: &str,
    room: Option<&RoomDimensions>,
    registry: &ReferenceRegistry,
    config: &Config,
) -> Result<AnalysisResult, AnalysisError> {
    config.validate()?;

    if recording.samples.is_empty() || recording.samples.iter().any(|s| !s.is_finite()) {
        return Err(AnalysisError::InvalidRecording(
            "recording is empty or contains non-finite samples".to_string(),
        ));
    }

    let reference = registry
        .get(signal_id)
        .ok_or_else(|| AnalysisError::UnknownSignal(signal_id.to_string()))?;

    if recording.samples.len() < reference.samples.len() {
        return Err(AnalysisError::InvalidRecording(format!(
            "recording length {} is shorter than reference length {}",
            recording.samples.len(),
            reference.samples.len()
        )));
    }

    let aligned = alignment::align(&recording.samples, &reference.samples);
    let impulse = deconvolve::deconvolve(&aligned, &reference.samples, config.regularization_lambda);
    let windowed = windowing::window_impulse(
        &impulse,
        recording.sample_rate,
        config.pre_window_ms,
        config.post_window_ms,
    );

    let spectrum = spectrum::extract_spectrum(&windowed, recording.sample_rate, config.fft_size);
    let smoothed = smoothing::smooth(&spectrum.frequencies_hz, &spectrum.magnitudes_db, config.smoothing_fraction);
    let normalized = normalize::normalize(&spectrum.frequencies_hz, &smoothed, config.reference_freq_hz);
    let (out_freqs, out_mags) = resample::resample_log(&spectrum.frequencies_hz, &normalized, config.display_points);

    if out_mags.iter().any(|m| !m.is_finite()) {
        return Err(AnalysisError::NumericFailure(
            "non-finite value produced in final response".to_string(),
        ));
    }

    let frequency_data: Vec<FrequencyPoint> = out_freqs
        .into_iter()
        .zip(out_mags)
        .map(|(frequency_hz, magnitude_db)| FrequencyPoint { frequency_hz, magnitude_db })
        .collect();

    let modes = match room {
        Some(dims) => room_modes::room_modes(dims, config.mode_max, config.mode_min_spacing_octaves),
        None => Vec::new(),
    };

    info!(
        signal_id,
        recording_len = recording.samples.len(),
        room_modes = modes.len(),
        "completed analysis"
    );

    Ok(AnalysisResult {
        frequency_data,
        analysis_type: "sweep_deconvolution".to_string(),
        smoothing: format_smoothing_tag(config.smoothing_fraction),
        fft_size: config.fft_size,
        reference: signal_id.to_string(),
        rt60: RT60_PLACEHOLDER,
        room_modes: modes,
    })
}

fn format_smoothing_tag(fraction: f64) -> String {
    if fraction <= 0.0 {
        return "none".to_string();
    }
    let denominator = (1.0 / fraction).round() as i64;
    format!("1/{denominator} octave")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::signals::ExponentialSweep;

    fn registry_with_default() -> ReferenceRegistry {
        ReferenceRegistry::with_default_catalogue()
    }

    #[test]
    fn identity_recording_yields_flat_response() {
        let registry = registry_with_default();
        let reference = registry.get(crate::reference::DEFAULT_SIGNAL_ID).unwrap();

        let recording = Recording {
            samples: reference.samples.clone(),
            sample_rate: reference.sample_rate,
        };

        let result = analyze(&recording, crate::reference::DEFAULT_SIGNAL_ID, None, &registry, &Config::default())
            .expect("analysis should succeed");

        assert_eq!(result.analysis_type, "sweep_deconvolution");
        assert!(result.frequency_data.iter().all(|p| (20.0..=20_000.0).contains(&p.frequency_hz)));
        assert!(result.frequency_data.windows(2).all(|w| w[0].frequency_hz < w[1].frequency_hz));

        let max_deviation = result
            .frequency_data
            .iter()
            .filter(|p| p.frequency_hz >= 50.0 && p.frequency_hz <= 15_000.0)
            .map(|p| p.magnitude_db.abs())
            .fold(0.0f64, f64::max);
        assert!(max_deviation < 3.0, "max deviation {max_deviation}");
    }

    #[test]
    fn unknown_signal_errors() {
        let registry = registry_with_default();
        let recording = Recording {
            samples: vec![0.0; 1000],
            sample_rate: 44_100,
        };

        let result = analyze(&recording, "does_not_exist", None, &registry, &Config::default());
        assert!(matches!(result, Err(AnalysisError::UnknownSignal(_))));
    }

    #[test]
    fn shorter_recording_than_reference_is_invalid() {
        let registry = registry_with_default();
        let recording = Recording {
            samples: ExponentialSweep::new(20.0, 20_000.0, 0.5, 100, 44_100).collect_samples(),
            sample_rate: 44_100,
        };

        let result = analyze(&recording, crate::reference::DEFAULT_SIGNAL_ID, None, &registry, &Config::default());
        assert!(matches!(result, Err(AnalysisError::InvalidRecording(_))));
    }

    #[test]
    fn invalid_configuration_is_rejected_before_processing() {
        let registry = registry_with_default();
        let recording = Recording {
            samples: vec![0.1; 1000],
            sample_rate: 44_100,
        };

        let mut config = Config::default();
        config.fft_size = 100;

        let result = analyze(&recording, crate::reference::DEFAULT_SIGNAL_ID, None, &registry, &config);
        assert!(matches!(result, Err(AnalysisError::InvalidConfiguration(_))));
    }

    #[test]
    fn room_dimensions_populate_modes() {
        let registry = registry_with_default();
        let reference = registry.get(crate::reference::DEFAULT_SIGNAL_ID).unwrap();
        let recording = Recording {
            samples: reference.samples.clone(),
            sample_rate: reference.sample_rate,
        };

        let room = RoomDimensions {
            length_ft: 10.0,
            width_ft: 12.0,
            height_ft: 8.0,
        };

        let result = analyze(
            &recording,
            crate::reference::DEFAULT_SIGNAL_ID,
            Some(&room),
            &registry,
            &Config::default(),
        )
        .unwrap();

        assert!(!result.room_modes.is_empty());
    }
}

use rustfft::{num_complex::Complex32, FftPlanner};
use tracing::debug;

const MIN_AUDIBLE_HZ: f64 = 20.0;
const MAX_AUDIBLE_HZ: f64 = 20_000.0;

/// A Blackman-Harris windowed, zero-padded magnitude spectrum restricted to
/// the audible band.
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub frequencies_hz: Vec<f64>,
    pub magnitudes_db: Vec<f64>,
}

/// Four-term Blackman-Harris window, computed directly rather than pulled
/// from a window-function crate.
fn blackman_harris(len: usize) -> Vec<f32> {
    const A0: f32 = 0.358_75;
    const A1: f32 = 0.488_29;
    const A2: f32 = 0.141_28;
    const A3: f32 = 0.011_68;

    if len <= 1 {
        return vec![1.0; len];
    }

    let n = (len - 1) as f32;
    (0..len)
        .map(|i| {
            let x = std::f32::consts::PI * i as f32 / n;
            A0 - A1 * (2.0 * x).cos() + A2 * (4.0 * x).cos() - A3 * (6.0 * x).cos()
        })
        .collect()
}

/// Windows `impulse` with a Blackman-Harris taper, zero-pads to `fft_size`,
/// and returns magnitude in dB for bins within `[20, 20000]` Hz.
pub fn extract_spectrum(impulse: &[f32], sample_rate: u32, fft_size: usize) -> Spectrum {
    let window = blackman_harris(impulse.len());

    let mut buf: Vec<Complex32> = impulse
        .iter()
        .zip(window.iter())
        .map(|(s, w)| Complex32::new(s * w, 0.0))
        .chain(std::iter::repeat(Complex32::new(0.0, 0.0)))
        .take(fft_size)
        .collect();

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buf);

    let sr = sample_rate as f64;
    let bin_hz = sr / fft_size as f64;

    let mut frequencies_hz = Vec::new();
    let mut magnitudes_db = Vec::new();

    for (k, bin) in buf.iter().enumerate().take(fft_size / 2 + 1) {
        let f = k as f64 * bin_hz;
        if f < MIN_AUDIBLE_HZ || f > MAX_AUDIBLE_HZ {
            continue;
        }
        let magnitude = bin.norm() as f64;
        frequencies_hz.push(f);
        magnitudes_db.push(20.0 * (magnitude + 1e-12).log10());
    }

    debug!(fft_size, bins = frequencies_hz.len(), "extracted magnitude spectrum");

    Spectrum {
        frequencies_hz,
        magnitudes_db,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn frequencies_are_strictly_ascending_and_in_band() {
        let impulse = vec![1.0f32; 1000];
        let spectrum = extract_spectrum(&impulse, 44_100, 32_768);

        assert!(spectrum.frequencies_hz.iter().all(|&f| (20.0..=20_000.0).contains(&f)));
        assert!(spectrum.frequencies_hz.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn lengths_match() {
        let impulse = vec![1.0f32; 1000];
        let spectrum = extract_spectrum(&impulse, 44_100, 32_768);
        assert_eq!(spectrum.frequencies_hz.len(), spectrum.magnitudes_db.len());
    }

    #[test]
    fn silence_does_not_produce_nan() {
        let impulse = vec![0.0f32; 1000];
        let spectrum = extract_spectrum(&impulse, 44_100, 32_768);
        assert!(spectrum.magnitudes_db.iter().all(|m| m.is_finite()));
    }
}

use rustfft::{num_complex::Complex32, FftPlanner};
use tracing::debug;

/// Regularized spectral division: recovers the impulse response of the
/// system that turned `reference` into `recorded`.
///
/// `H[k] = Y[k] * conj(X[k]) / (|X[k]|^2 + lambda)`, `h = Re(IFFT(H))`.
///
/// The Tikhonov term `lambda` bounds the inverse filter's gain where
/// `|X[k]|` is small, which a naive `Y[k] / X[k]` division would otherwise
/// amplify into noise - sweeps do not have a flat spectrum.
pub fn deconvolve(recorded: &[f32], reference: &[f32], lambda: f64) -> Vec<f32> {
    let n = recorded.len();
    let m = reference.len();
    let len = n + m - 1;

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(len);
    let ifft = planner.plan_fft_inverse(len);

    let mut y: Vec<Complex32> = recorded
        .iter()
        .map(|&s| Complex32::new(s, 0.0))
        .chain(std::iter::repeat(Complex32::new(0.0, 0.0)))
        .take(len)
        .collect();

    let mut x: Vec<Complex32> = reference
        .iter()
        .map(|&s| Complex32::new(s, 0.0))
        .chain(std::iter::repeat(Complex32::new(0.0, 0.0)))
        .take(len)
        .collect();

    fft.process(&mut y);
    fft.process(&mut x);

    let lambda = lambda as f32;
    let mut h: Vec<Complex32> = y
        .iter()
        .zip(x.iter())
        .map(|(y_k, x_k)| (y_k * x_k.conj()) / (x_k.norm_sqr() + lambda))
        .collect();

    ifft.process(&mut h);

    let scale = 1.0 / len as f32;
    let impulse: Vec<f32> = h.into_iter().map(|c| c.re * scale).collect();

    debug!(recorded_len = n, reference_len = m, impulse_len = impulse.len(), "deconvolved impulse response");

    impulse
}

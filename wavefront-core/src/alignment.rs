use rustfft::{num_complex::Complex32, FftPlanner};
use tracing::{debug, warn};

/// Locates the reference sweep inside the recording via cross-correlation
/// and returns the recording's contribution aligned to the start of the
/// reference, i.e. `recorded[delay..delay + reference.len()]` (clamped to
/// whatever is actually available).
pub fn align(recorded: &[f32], reference: &[f32]) -> Vec<f32> {
    let n = recorded.len();
    let m = reference.len();

    if m == 0 || n == 0 {
        return recorded.to_vec();
    }

    if n < m {
        warn!(recorded_len = n, reference_len = m, "recording shorter than reference, returning full recording");
        return recorded.to_vec();
    }

    let delay = find_delay(recorded, reference);

    debug!(delay, recorded_len = n, reference_len = m, "aligned recording to reference");

    if delay >= n {
        warn!(delay, recorded_len = n, "delay exceeds recording length, returning unaligned prefix");
        return recorded.iter().copied().take(m).collect();
    }

    let end = (delay + m).min(n);
    recorded[delay..end].to_vec()
}

/// `argmax_k |c[k]|` of the valid-mode cross-correlation
/// `c[k] = sum_i recorded[k+i] * reference[i]`, for `k in 0..=(n - m)`,
/// computed via FFT for practical sweep lengths.
fn find_delay(recorded: &[f32], reference: &[f32]) -> usize {
    let n = recorded.len();
    let m = reference.len();
    let conv_len = n + m - 1;

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(conv_len);
    let ifft = planner.plan_fft_inverse(conv_len);

    let mut recorded_buf: Vec<Complex32> = recorded
        .iter()
        .map(|&s| Complex32::new(s, 0.0))
        .chain(std::iter::repeat(Complex32::new(0.0, 0.0)))
        .take(conv_len)
        .collect();

    // Correlation is convolution with the time-reversed reference.
    let mut reversed_ref_buf: Vec<Complex32> = reference
        .iter()
        .rev()
        .map(|&s| Complex32::new(s, 0.0))
        .chain(std::iter::repeat(Complex32::new(0.0, 0.0)))
        .take(conv_len)
        .collect();

    fft.process(&mut recorded_buf);
    fft.process(&mut reversed_ref_buf);

    let mut product: Vec<Complex32> = recorded_buf
        .iter()
        .zip(reversed_ref_buf.iter())
        .map(|(a, b)| a * b)
        .collect();

    ifft.process(&mut product);

    let scale = 1.0 / conv_len as f32;

    // c[k] lives at conv index (m - 1 + k) for k in 0..=(n - m).
    let valid_len = n - m + 1;
    let (mut best_k, mut best_mag) = (0usize, f32::NEG_INFINITY);
    for k in 0..valid_len {
        let mag = (product[m - 1 + k] * scale).norm();
        if mag > best_mag {
            best_mag = mag;
            best_k = k;
        }
    }

    best_k
}

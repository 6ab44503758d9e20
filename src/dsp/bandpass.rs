//! Butterworth band-pass filtering for drift and noise rejection.
//!
//! The filter is a cascade of RBJ-cookbook biquads: a 4th-order high-pass at
//! the lower critical frequency followed by a 4th-order low-pass at the upper
//! one. Each 4th-order half uses the standard Butterworth two-section Q
//! values, so the pass-band stays maximally flat.

use crate::error::{Error, Result};

/// Section Q values for a 4th-order Butterworth response
/// (poles at 22.5 and 67.5 degrees).
const BUTTERWORTH_Q4: [f32; 2] = [0.541_196_1, 1.306_563];

/// One second-order section in transposed direct form II.
#[derive(Debug, Clone, Copy)]
struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
}

impl Biquad {
    fn lowpass(cutoff_hz: f32, sample_rate: f32, q: f32) -> Self {
        let w0 = 2.0 * std::f32::consts::PI * cutoff_hz / sample_rate;
        let (sin_w0, cos_w0) = w0.sin_cos();
        let alpha = sin_w0 / (2.0 * q);

        let a0 = 1.0 + alpha;
        Self {
            b0: ((1.0 - cos_w0) / 2.0) / a0,
            b1: (1.0 - cos_w0) / a0,
            b2: ((1.0 - cos_w0) / 2.0) / a0,
            a1: (-2.0 * cos_w0) / a0,
            a2: (1.0 - alpha) / a0,
        }
    }

    fn highpass(cutoff_hz: f32, sample_rate: f32, q: f32) -> Self {
        let w0 = 2.0 * std::f32::consts::PI * cutoff_hz / sample_rate;
        let (sin_w0, cos_w0) = w0.sin_cos();
        let alpha = sin_w0 / (2.0 * q);

        let a0 = 1.0 + alpha;
        Self {
            b0: ((1.0 + cos_w0) / 2.0) / a0,
            b1: (-(1.0 + cos_w0)) / a0,
            b2: ((1.0 + cos_w0) / 2.0) / a0,
            a1: (-2.0 * cos_w0) / a0,
            a2: (1.0 - alpha) / a0,
        }
    }
}

/// Zero-state runner for one biquad.
#[derive(Debug, Default, Clone, Copy)]
struct BiquadState {
    z1: f32,
    z2: f32,
}

impl BiquadState {
    fn step(&mut self, coeffs: &Biquad, x: f32) -> f32 {
        let y = coeffs.b0 * x + self.z1;
        self.z1 = coeffs.b1 * x - coeffs.a1 * y + self.z2;
        self.z2 = coeffs.b2 * x - coeffs.a2 * y;
        y
    }
}

/// Band-pass filter as a cascade of second-order sections.
#[derive(Debug, Clone)]
pub struct BandpassFilter {
    sections: Vec<Biquad>,
}

impl BandpassFilter {
    /// Design a 4th-order Butterworth-family band-pass.
    ///
    /// `design_rate_hz` is the rate the critical frequencies are expressed
    /// against; it does not have to match the rate of the series the filter
    /// is applied to.
    pub fn butterworth(low_hz: f32, high_hz: f32, design_rate_hz: f32) -> Result<Self> {
        let nyquist = design_rate_hz / 2.0;
        if !(low_hz > 0.0 && low_hz < high_hz && high_hz < nyquist) {
            return Err(Error::InvalidBand {
                low_hz,
                high_hz,
                nyquist_hz: nyquist,
            });
        }

        let mut sections = Vec::with_capacity(4);
        for q in BUTTERWORTH_Q4 {
            sections.push(Biquad::highpass(low_hz, design_rate_hz, q));
        }
        for q in BUTTERWORTH_Q4 {
            sections.push(Biquad::lowpass(high_hz, design_rate_hz, q));
        }
        Ok(Self { sections })
    }

    /// Minimum input length for a meaningful filtered output.
    ///
    /// Mirrors the settle-length convention of sos filtering: three times the
    /// cascade's effective impulse tail per section, plus one.
    pub fn min_input_len(&self) -> usize {
        3 * (2 * self.sections.len() + 1)
    }

    /// Filter a series, returning a new series of the same length.
    ///
    /// Fails with [`Error::InsufficientData`] when the input is shorter than
    /// [`Self::min_input_len`].
    pub fn apply(&self, input: &[f32]) -> Result<Vec<f32>> {
        if input.len() < self.min_input_len() {
            return Err(Error::InsufficientData {
                got: input.len(),
                needed: self.min_input_len(),
            });
        }

        let mut states = vec![BiquadState::default(); self.sections.len()];
        let mut output = Vec::with_capacity(input.len());

        for &x in input {
            let mut v = x;
            for (coeffs, state) in self.sections.iter().zip(states.iter_mut()) {
                v = state.step(coeffs, v);
            }
            output.push(v);
        }

        Ok(output)
    }
}

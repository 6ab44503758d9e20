//! Narrow-band energy extraction via short-time Fourier analysis.

use crate::audio::AudioSignal;
use crate::error::{Error, Result};
use rustfft::{Fft, FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// An inclusive frequency band in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    /// Lower band edge in Hz.
    pub low_hz: f32,
    /// Upper band edge in Hz.
    pub high_hz: f32,
}

impl FrequencyBand {
    /// Create a band, validating it against a signal's Nyquist frequency.
    pub fn new(low_hz: f32, high_hz: f32, sample_rate: u32) -> Result<Self> {
        #[allow(clippy::cast_precision_loss)]
        let nyquist_hz = sample_rate as f32 / 2.0;
        if !(low_hz >= 0.0 && low_hz < high_hz && high_hz <= nyquist_hz) {
            return Err(Error::InvalidBand {
                low_hz,
                high_hz,
                nyquist_hz,
            });
        }
        Ok(Self { low_hz, high_hz })
    }
}

/// Time-indexed energy-in-band signal produced by [`BandEnergyExtractor`].
///
/// Times are strictly increasing; energies are non-negative.
#[derive(Debug, Clone, Default)]
pub struct EnergyTrace {
    times: Vec<f64>,
    energies: Vec<f32>,
}

impl EnergyTrace {
    /// Number of analysis frames in the trace.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the trace holds no frames.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Frame center times in seconds, ascending.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Per-frame band energies, parallel to [`Self::times`].
    pub fn energies(&self) -> &[f32] {
        &self.energies
    }
}

/// Extracts the volume-over-time of a frequency band from raw samples.
pub struct BandEnergyExtractor {
    window_size: usize,
    hop_size: usize,
    fft: Arc<dyn Fft<f32>>,
    /// Pre-computed Hann window.
    window: Vec<f32>,
    /// Reciprocal of the window sum. Spectral magnitudes are scaled by this
    /// so a unit-amplitude in-band tone reports energy near 1.0 regardless
    /// of the window geometry; the pulse threshold is calibrated against
    /// that scale.
    scale: f32,
}

impl BandEnergyExtractor {
    /// Create an extractor with the given analysis window and hop.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(window_size: usize, hop_size: usize) -> Self {
        let window: Vec<f32> = (0..window_size)
            .map(|i| {
                0.5 * (1.0
                    - ((2.0 * std::f32::consts::PI * i as f32) / (window_size as f32 - 1.0)).cos())
            })
            .collect();

        let window_sum: f32 = window.iter().sum();
        let fft = FftPlanner::new().plan_fft_forward(window_size);

        Self {
            window_size,
            hop_size,
            fft,
            window,
            scale: 1.0 / window_sum.max(f32::EPSILON),
        }
    }

    /// Extractor with the default geometry from [`crate::constants::stft`].
    pub fn with_defaults() -> Self {
        Self::new(
            crate::constants::stft::WINDOW_SIZE,
            crate::constants::stft::HOP_SIZE,
        )
    }

    /// Sum the window-normalized spectral magnitudes inside `band` for each
    /// analysis frame.
    ///
    /// The signal is zero-padded by half a window on both ends so frame `k`
    /// is centered at `k * hop / sample_rate`. A band that covers no FFT bin
    /// yields an all-zero trace, not an error.
    pub fn extract(&self, signal: &AudioSignal, band: FrequencyBand) -> Result<EnergyTrace> {
        // Re-validate so callers constructing FrequencyBand directly are
        // still checked against this signal's rate.
        let band = FrequencyBand::new(band.low_hz, band.high_hz, signal.sample_rate)?;

        let half = self.window_size / 2;
        let mut padded = vec![0.0f32; signal.samples.len() + 2 * half];
        padded[half..half + signal.samples.len()].copy_from_slice(&signal.samples);

        let num_frames = if padded.len() >= self.window_size {
            (padded.len() - self.window_size) / self.hop_size + 1
        } else {
            0
        };

        let bins = self.band_bins(band, signal.sample_rate);

        let mut times = Vec::with_capacity(num_frames);
        let mut energies = Vec::with_capacity(num_frames);
        let mut buffer: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); self.window_size];

        for frame in 0..num_frames {
            let start = frame * self.hop_size;

            for (dst, (&s, &w)) in buffer
                .iter_mut()
                .zip(padded[start..start + self.window_size].iter().zip(&self.window))
            {
                *dst = Complex::new(s * w, 0.0);
            }

            self.fft.process(&mut buffer);

            let energy: f32 = bins
                .clone()
                .map(|bin| buffer[bin].norm())
                .sum::<f32>()
                * self.scale;

            #[allow(clippy::cast_precision_loss)]
            times.push((frame * self.hop_size) as f64 / f64::from(signal.sample_rate));
            energies.push(energy);
        }

        Ok(EnergyTrace { times, energies })
    }

    /// Inclusive range of FFT bin indices whose center frequency lies in `band`.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn band_bins(&self, band: FrequencyBand, sample_rate: u32) -> std::ops::Range<usize> {
        let bin_hz = sample_rate as f32 / self.window_size as f32;
        let last = self.window_size / 2;

        let first_in = (band.low_hz / bin_hz).ceil() as usize;
        let last_in = (band.high_hz / bin_hz).floor() as usize;

        if first_in > last_in || first_in > last {
            // Degenerate band: no bin falls inside.
            return 0..0;
        }
        first_in..(last_in.min(last) + 1)
    }
}

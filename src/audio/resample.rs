//! Audio resampling using rubato.

use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

/// Resample a mono signal to the target sample rate.
///
/// Returns the input unchanged if already at the target rate.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples);
    }

    let chunk_size = 1024;
    let sub_chunks = 1;
    let channels = 1;

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        chunk_size,
        sub_chunks,
        channels,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_per_chunk = resampler.input_frames_next();
    let mut output = Vec::with_capacity(estimate_output_len(samples.len(), from_rate, to_rate));

    let mut pos = 0;
    while pos + frames_per_chunk <= samples.len() {
        let chunk = &samples[pos..pos + frames_per_chunk];
        let adapter = SequentialSlice::new(chunk, channels, frames_per_chunk).map_err(|e| {
            Error::Resample {
                reason: format!("failed to create input adapter: {e}"),
            }
        })?;

        let resampled = resampler
            .process(&adapter, 0, None)
            .map_err(|e| Error::Resample {
                reason: e.to_string(),
            })?;

        output.extend_from_slice(&resampled.take_data());
        pos += frames_per_chunk;
    }

    // Zero-pad the tail to a full chunk and keep only the proportional output.
    if pos < samples.len() {
        let remaining = samples.len() - pos;
        let mut padded = samples[pos..].to_vec();
        padded.resize(frames_per_chunk, 0.0);

        let adapter = SequentialSlice::new(&padded, channels, frames_per_chunk).map_err(|e| {
            Error::Resample {
                reason: format!("failed to create input adapter: {e}"),
            }
        })?;

        let resampled = resampler
            .process(&adapter, 0, None)
            .map_err(|e| Error::Resample {
                reason: e.to_string(),
            })?;

        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let wanted = (remaining as f64 * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize;

        let data = resampled.take_data();
        let take = wanted.min(data.len());
        output.extend_from_slice(&data[..take]);
    }

    Ok(output)
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn estimate_output_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((input_len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize + 1024
}

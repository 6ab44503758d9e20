//! Audio track extraction using symphonia.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// A single-channel audio signal at a known sample rate.
///
/// Immutable once built; everything downstream of the decoder operates on
/// this value.
#[derive(Debug, Clone)]
pub struct AudioSignal {
    /// Samples as f32 in range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioSignal {
    /// Duration of the signal in seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// Decode the first audio track of a media file to mono f32 samples.
///
/// Dashcam containers carry a stereo microphone track; only the first
/// channel is kept, matching the detector's tuning.
pub fn decode_audio_track(path: &Path) -> Result<AudioSignal> {
    let file = File::open(path).map_err(|e| Error::MediaOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::MediaOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    // First decodable audio track; video tracks report CODEC_TYPE_NULL here.
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some())
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        append_first_channel(&decoded, &mut samples);
    }

    Ok(AudioSignal {
        samples,
        sample_rate,
    })
}

/// Append the first channel of a decoded buffer, converting to f32.
fn append_first_channel(buffer: &AudioBufferRef, output: &mut Vec<f32>) {
    match buffer {
        AudioBufferRef::F32(buf) => {
            output.extend(buf.chan(0));
        }
        AudioBufferRef::S16(buf) => {
            const I16_NORM: f32 = 32768.0;
            output.extend(buf.chan(0).iter().map(|&s| f32::from(s) / I16_NORM));
        }
        AudioBufferRef::S32(buf) => {
            const I32_NORM: f32 = 2_147_483_648.0;
            #[allow(clippy::cast_precision_loss)]
            output.extend(buf.chan(0).iter().map(|&s| s as f32 / I32_NORM));
        }
        AudioBufferRef::U8(buf) => {
            output.extend(
                buf.chan(0)
                    .iter()
                    .map(|&s| (f32::from(s) - 128.0) / 128.0),
            );
        }
        _ => {
            // Unsupported sample format, skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_follows_sample_count() {
        let signal = AudioSignal {
            samples: vec![0.0; 16000],
            sample_rate: 8000,
        };
        assert!((signal.duration_secs() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn missing_file_reports_media_open() {
        let result = decode_audio_track(Path::new("/nonexistent/clip.mp4"));
        assert!(matches!(result, Err(Error::MediaOpen { .. })));
    }
}

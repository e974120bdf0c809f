//! Audio aggregation and export
//!
//! Decodes each clip, peak-normalizes it, concatenates with a fixed
//! silence gap, re-normalizes the whole track and writes a WAV file. When
//! the clips cannot be decoded (e.g. the provider returned MP3), falls
//! back to raw byte concatenation with a byte-size duration estimate —
//! degraded output always beats failing the pipeline.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Result, VoiceError};

/// Peak target, -0.1 dBFS
const PEAK_HEADROOM: f32 = 0.9886;

/// Rough encoded-audio bitrate used for the degraded duration estimate
const DEGRADED_BYTES_PER_SEC: f64 = 10_000.0;

/// Mixing options
#[derive(Debug, Clone)]
pub struct MixOptions {
    /// Silence between consecutive clips, in milliseconds
    pub gap_ms: u64,
}

impl Default for MixOptions {
    fn default() -> Self {
        Self { gap_ms: 300 }
    }
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
    /// Total duration in seconds; estimated from byte size on the
    /// degraded path
    pub duration_secs: f64,
    /// True when normalization was skipped and clips were concatenated
    /// byte-for-byte
    pub degraded: bool,
    pub clip_count: usize,
}

struct DecodedClip {
    spec: WavSpec,
    samples: Vec<i16>,
}

/// Combine clips into a single audio file at `path`.
pub fn combine_and_export(
    clips: &[Vec<u8>],
    path: &Path,
    options: &MixOptions,
) -> Result<ExportReport> {
    if clips.is_empty() {
        return Err(VoiceError::NoAudioToExport);
    }

    info!("Combining {} audio clips", clips.len());

    match decode_all(clips) {
        Some(decoded) => export_normalized(decoded, path, options, clips.len()),
        None => {
            warn!("Clips cannot be decoded as 16-bit WAV, falling back to raw concatenation");
            export_raw(clips, path)
        }
    }
}

/// Decode every clip as 16-bit integer WAV with a uniform format.
///
/// Returns `None` (degraded path) when any clip fails to decode, formats
/// differ, or the decoded track would be empty.
fn decode_all(clips: &[Vec<u8>]) -> Option<Vec<DecodedClip>> {
    let decoded: Vec<DecodedClip> = clips
        .iter()
        .map(|bytes| decode_clip(bytes))
        .collect::<Option<_>>()?;

    let spec = decoded.first()?.spec;
    if decoded.iter().any(|clip| clip.spec != spec) {
        return None;
    }
    if decoded.iter().all(|clip| clip.samples.is_empty()) {
        return None;
    }

    Some(decoded)
}

fn decode_clip(bytes: &[u8]) -> Option<DecodedClip> {
    let mut reader = WavReader::new(Cursor::new(bytes)).ok()?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return None;
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;

    Some(DecodedClip { spec, samples })
}

/// Scale samples so the peak sits just below full scale.
fn normalize(samples: &mut [i16]) {
    let peak = samples.iter().map(|s| (*s as i32).abs()).max().unwrap_or(0);
    if peak == 0 {
        return;
    }

    let gain = (i16::MAX as f32 * PEAK_HEADROOM) / peak as f32;
    for sample in samples.iter_mut() {
        let scaled = (*sample as f32 * gain).round();
        *sample = scaled.clamp(i16::MIN as f32, i16::MAX as f32) as i16;
    }
}

fn export_normalized(
    decoded: Vec<DecodedClip>,
    path: &Path,
    options: &MixOptions,
    clip_count: usize,
) -> Result<ExportReport> {
    let spec = decoded[0].spec;
    let gap_samples =
        (spec.sample_rate as u64 * options.gap_ms / 1000) as usize * spec.channels as usize;

    let mut track: Vec<i16> = Vec::new();
    for (i, mut clip) in decoded.into_iter().enumerate() {
        normalize(&mut clip.samples);
        if i > 0 {
            track.resize(track.len() + gap_samples, 0);
        }
        track.extend(clip.samples);
    }

    // Final pass over the whole concatenation for a consistent level.
    normalize(&mut track);

    let mut writer = WavWriter::create(path, spec)
        .map_err(|e| VoiceError::Export(format!("{}: {}", path.display(), e)))?;
    for sample in &track {
        writer
            .write_sample(*sample)
            .map_err(|e| VoiceError::Export(e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| VoiceError::Export(e.to_string()))?;

    let duration_secs = track.len() as f64 / (spec.sample_rate as f64 * spec.channels as f64);
    info!(
        "Audio exported: {} ({:.1}s, {} clips)",
        path.display(),
        duration_secs,
        clip_count
    );

    Ok(ExportReport {
        path: path.to_path_buf(),
        duration_secs,
        degraded: false,
        clip_count,
    })
}

fn export_raw(clips: &[Vec<u8>], path: &Path) -> Result<ExportReport> {
    let bytes = clips.concat();
    std::fs::write(path, &bytes)
        .map_err(|e| VoiceError::Export(format!("{}: {}", path.display(), e)))?;

    let duration_secs = bytes.len() as f64 / DEGRADED_BYTES_PER_SEC;
    info!(
        "Audio exported without normalization: {} (~{:.0}s estimated)",
        path.display(),
        duration_secs
    );

    Ok(ExportReport {
        path: path.to_path_buf(),
        duration_secs,
        degraded: true,
        clip_count: clips.len(),
    })
}

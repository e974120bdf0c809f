//! Per-segment speech synthesis
//!
//! Runs the TTS call once per dialogue segment, strictly sequentially,
//! recording each attempt as an explicit outcome instead of bailing on the
//! first failure. The whole run fails only when no segment succeeded.

use tracing::{info, warn};

use crate::error::{Result, SegmentFailure, VoiceError};
use crate::script::{DialogueSegment, Speaker};
use crate::tts::TtsClient;

/// Voice identifier per speaker. Opaque, provider-specific values supplied
/// by configuration.
#[derive(Debug, Clone)]
pub struct VoiceBinding {
    pub host_a: String,
    pub host_b: String,
}

impl VoiceBinding {
    pub fn voice_for(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::HostA => &self.host_a,
            Speaker::HostB => &self.host_b,
        }
    }
}

/// Non-speech markup the script generator may emit
const MARKUP_TOKENS: &[&str] = &["[laughs]", "[laugh]"];

/// Remove non-speech markup tokens from segment text.
fn strip_markup(text: &str) -> String {
    let mut text = text.to_string();
    for token in MARKUP_TOKENS {
        text = text.replace(token, "");
    }
    text.trim().to_string()
}

/// Outcome of one segment's synthesis attempt
enum Outcome {
    Rendered(Vec<u8>),
    Skipped,
    Failed(SegmentFailure),
}

/// Result of a synthesis run with at least one success
#[derive(Debug)]
pub struct SynthesisRun {
    /// Successful clips in original segment order (failed indices dropped)
    pub clips: Vec<Vec<u8>>,
    /// Failures, in original segment order
    pub failed: Vec<SegmentFailure>,
    /// Number of segments actually attempted (empty segments are skipped)
    pub attempted: usize,
}

impl SynthesisRun {
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Sequential per-segment synthesizer
pub struct Synthesizer<'a> {
    tts: &'a TtsClient,
    voices: &'a VoiceBinding,
}

impl<'a> Synthesizer<'a> {
    pub fn new(tts: &'a TtsClient, voices: &'a VoiceBinding) -> Self {
        Self { tts, voices }
    }

    /// Synthesize every segment, tolerating per-segment failures.
    ///
    /// A missing API key aborts before the loop starts (every attempt
    /// would fail identically). Transport failures, provider rejections
    /// and empty audio payloads are recorded per segment; the run fails
    /// only when zero segments succeeded.
    pub async fn synthesize_segments(
        &self,
        segments: &[DialogueSegment],
    ) -> Result<SynthesisRun> {
        if !self.tts.has_credentials() {
            return Err(VoiceError::CredentialMissing);
        }

        info!("Generating audio for {} segments", segments.len());

        let mut outcomes = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            let text = strip_markup(&segment.text);
            if text.is_empty() {
                warn!("Segment {} is empty after markup stripping, skipping", index + 1);
                outcomes.push(Outcome::Skipped);
                continue;
            }

            info!(
                "Processing segment {}/{}: {}",
                index + 1,
                segments.len(),
                segment.speaker
            );

            let voice = self.voices.voice_for(segment.speaker);
            match self.tts.synthesize(&text, voice).await {
                Ok(clip) => outcomes.push(Outcome::Rendered(clip)),
                Err(
                    error @ (VoiceError::Http(_)
                    | VoiceError::UpstreamRejection { .. }
                    | VoiceError::EmptyAudio),
                ) => {
                    warn!("Segment {} failed: {}", index + 1, error);
                    outcomes.push(Outcome::Failed(SegmentFailure {
                        index,
                        reason: error.to_string(),
                    }));
                }
                Err(other) => return Err(other),
            }
        }

        finish_run(outcomes)
    }
}

/// Fold per-segment outcomes into a run result.
fn finish_run(outcomes: Vec<Outcome>) -> Result<SynthesisRun> {
    let attempted = outcomes
        .iter()
        .filter(|o| !matches!(o, Outcome::Skipped))
        .count();

    let mut clips = Vec::new();
    let mut failed = Vec::new();
    for outcome in outcomes {
        match outcome {
            Outcome::Rendered(clip) => clips.push(clip),
            Outcome::Failed(failure) => failed.push(failure),
            Outcome::Skipped => {}
        }
    }

    if clips.is_empty() && !failed.is_empty() {
        return Err(VoiceError::AllSegmentsFailed { failures: failed });
    }

    if !failed.is_empty() {
        warn!("{} segment(s) failed, {} succeeded", failed.len(), clips.len());
    }

    Ok(SynthesisRun { clips, failed, attempted })
}

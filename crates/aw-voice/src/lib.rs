//! aw-voice: speech synthesis and audio export
//!
//! Turns a two-host dialogue script into a single audio file:
//! script segmentation, per-segment TTS with partial-failure tolerance,
//! and normalized concatenation with a silence gap between turns.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aw_voice::{
//!     combine_and_export, parse_script, MixOptions, Synthesizer, TtsClient,
//!     TtsConfig, VoiceBinding,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let segments = parse_script("Person A: hello\nPerson B: hi there");
//!
//!     let tts = TtsClient::new(TtsConfig::elevenlabs("your-api-key"))?;
//!     let voices = VoiceBinding {
//!         host_a: "voice-id-a".to_string(),
//!         host_b: "voice-id-b".to_string(),
//!     };
//!
//!     let run = Synthesizer::new(&tts, &voices)
//!         .synthesize_segments(&segments)
//!         .await?;
//!     let report = combine_and_export(
//!         &run.clips,
//!         std::path::Path::new("show.wav"),
//!         &MixOptions::default(),
//!     )?;
//!
//!     println!("Wrote {} ({:.1}s)", report.path.display(), report.duration_secs);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod mixer;
pub mod script;
pub mod synth;
pub mod tts;

pub use error::{Result, SegmentFailure, VoiceError};
pub use mixer::{combine_and_export, ExportReport, MixOptions};
pub use script::{parse_script, DialogueSegment, Speaker};
pub use synth::{Synthesizer, SynthesisRun, VoiceBinding};
pub use tts::{TtsClient, TtsConfig, TtsProvider};

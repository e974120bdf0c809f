//! Command pipelines
//!
//! Wires the client crates together: each command builds its clients from
//! the loaded configuration, runs the fetch/transform/export steps, and
//! prints a one-line result for the operator.

use std::path::Path;

use aw_core::Config;
use aw_graph::{export_messages, GraphClient};
use aw_llm::{DialogueStyle, LlmClient};
use aw_voice::{
    combine_and_export, parse_script, MixOptions, Synthesizer, TtsClient, TtsConfig,
    VoiceBinding,
};
use aw_wiki::WikiClient;
use tracing::{info, warn};

/// Article excerpt length fed to the script generator
const ARTICLE_MAX_CHARS: usize = 2000;

/// Export every message in a Teams channel, resolved from its deep link.
pub async fn run_extract(
    config: &Config,
    channel_url: &str,
    out: Option<&str>,
) -> anyhow::Result<()> {
    let client = GraphClient::new(&config.graph)?;
    let messages = client.extract_from_channel_url(channel_url).await?;

    let path = out.unwrap_or(&config.output.messages_path);
    export_messages(Path::new(path), &messages)?;

    println!("Exported {} messages to {}", messages.len(), path);
    Ok(())
}

/// Export a user's entire chat history.
pub async fn run_chats(config: &Config, user_id: &str, out: Option<&str>) -> anyhow::Result<()> {
    let client = GraphClient::new(&config.graph)?;
    let messages = client.user_chat_messages(user_id).await?;

    let path = out.unwrap_or(&config.output.messages_path);
    export_messages(Path::new(path), &messages)?;

    println!("Exported {} messages to {}", messages.len(), path);
    Ok(())
}

/// Generate a two-host radio show from a Wikipedia article.
///
/// `subject` is either an article title or a full Wikipedia URL.
pub async fn run_radio(
    config: &Config,
    subject: &str,
    style: DialogueStyle,
    out: Option<&str>,
) -> anyhow::Result<()> {
    let title = resolve_title(subject)?;
    info!("Generating a {} radio show about '{}'", style.name(), title);

    let wiki = WikiClient::new()?;
    let article = wiki.fetch_article(&title, ARTICLE_MAX_CHARS).await?;

    let llm = LlmClient::new(&config.llm)?;
    let script = llm.generate_script(&article, style).await?;

    let segments = parse_script(&script);
    if segments.is_empty() {
        anyhow::bail!("Generated script contained no speaker-labeled dialogue");
    }
    info!("Script parsed into {} dialogue segments", segments.len());

    let tts = TtsClient::new(TtsConfig::from_speech(&config.speech))?;
    let voices = VoiceBinding {
        host_a: config.speech.voice_a.clone(),
        host_b: config.speech.voice_b.clone(),
    };
    let run = Synthesizer::new(&tts, &voices)
        .synthesize_segments(&segments)
        .await?;
    if run.is_partial() {
        warn!(
            "{} of {} segments failed to synthesize; the show will have gaps",
            run.failed.len(),
            run.attempted
        );
    }

    let path = out.unwrap_or(&config.output.audio_path);
    let options = MixOptions {
        gap_ms: config.output.gap_ms,
    };
    let report = combine_and_export(&run.clips, Path::new(path), &options)?;

    if report.degraded {
        println!(
            "Radio show written to {} ({} clips concatenated, ~{:.0}s estimated)",
            report.path.display(),
            report.clip_count,
            report.duration_secs
        );
    } else {
        println!(
            "Radio show written to {} ({:.1}s, {} clips)",
            report.path.display(),
            report.duration_secs,
            report.clip_count
        );
    }
    Ok(())
}

/// Resolve the article title from a title-or-URL subject.
fn resolve_title(subject: &str) -> anyhow::Result<String> {
    if subject.starts_with("http://") || subject.starts_with("https://") {
        return aw_wiki::title_from_url(subject)
            .ok_or_else(|| anyhow::anyhow!("Not a Wikipedia article URL: {}", subject));
    }
    Ok(subject.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_title_passes_plain_titles_through() {
        assert_eq!(resolve_title("Mumbai Indians").unwrap(), "Mumbai Indians");
    }

    #[test]
    fn test_resolve_title_from_url() {
        assert_eq!(
            resolve_title("https://en.wikipedia.org/wiki/Mumbai_Indians").unwrap(),
            "Mumbai Indians"
        );
    }

    #[test]
    fn test_resolve_title_rejects_non_wiki_urls() {
        assert!(resolve_title("https://example.com/article").is_err());
    }
}

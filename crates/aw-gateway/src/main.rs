//! airwave: Teams message extraction and synthetic radio shows
//!
//! Usage:
//!   airwave extract <channel-url> [--out FILE]   - Export a Teams channel's messages as JSON
//!   airwave chats <user-id> [--out FILE]         - Export a user's chat history as JSON
//!   airwave radio <title-or-url> [--style STYLE] [--out FILE]
//!                                                - Turn a Wikipedia article into a radio show
//!   airwave --help                               - Show help

mod pipeline;

use aw_core::Config;
use aw_llm::DialogueStyle;
use tracing_subscriber::EnvFilter;

/// Run mode
enum RunMode {
    /// Export a Teams channel's messages
    Extract { channel_url: String, out: Option<String> },
    /// Export a user's chat history
    Chats { user_id: String, out: Option<String> },
    /// Generate a radio show from a Wikipedia article
    Radio {
        subject: String,
        style: DialogueStyle,
        out: Option<String>,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = match parse_args(&args) {
        Ok(mode) => mode,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'airwave --help' for usage.");
            std::process::exit(2);
        }
    };

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("airwave {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration (airwave.toml + environment)
    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    match mode {
        RunMode::Extract { channel_url, out } => {
            pipeline::run_extract(&config, &channel_url, out.as_deref()).await
        }
        RunMode::Chats { user_id, out } => {
            pipeline::run_chats(&config, &user_id, out.as_deref()).await
        }
        RunMode::Radio { subject, style, out } => {
            pipeline::run_radio(&config, &subject, style, out.as_deref()).await
        }
        _ => Ok(()),
    }
}

/// Parse command line arguments
fn parse_args(args: &[String]) -> Result<RunMode, String> {
    let mut command = None;
    let mut positional = None;
    let mut out = None;
    let mut style = DialogueStyle::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(RunMode::Help),
            "--version" | "-v" => return Ok(RunMode::Version),
            "--out" | "-o" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--out requires a file path".to_string())?;
                out = Some(value.clone());
            }
            "--style" | "-s" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--style requires a value".to_string())?;
                style = value.parse()?;
            }
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            other => {
                if command.is_none() {
                    command = Some(other.to_string());
                } else if positional.is_none() {
                    positional = Some(other.to_string());
                } else {
                    return Err(format!("Unexpected argument: {}", other));
                }
            }
        }
    }

    let command = match command {
        Some(command) => command,
        None => return Ok(RunMode::Help),
    };

    match command.as_str() {
        "extract" => {
            let channel_url =
                positional.ok_or_else(|| "extract requires a channel URL".to_string())?;
            Ok(RunMode::Extract { channel_url, out })
        }
        "chats" => {
            let user_id = positional.ok_or_else(|| "chats requires a user id".to_string())?;
            Ok(RunMode::Chats { user_id, out })
        }
        "radio" => {
            let subject = positional
                .ok_or_else(|| "radio requires an article title or Wikipedia URL".to_string())?;
            Ok(RunMode::Radio { subject, style, out })
        }
        other => Err(format!("Unknown command: {}", other)),
    }
}

/// Print help message
fn print_help() {
    println!("airwave - Teams message extraction and synthetic radio shows");
    println!();
    println!("Usage:");
    println!("  airwave extract <channel-url> [--out FILE]");
    println!("      Export every message in a Teams channel (from its deep link) as JSON");
    println!("  airwave chats <user-id> [--out FILE]");
    println!("      Export a user's entire chat history ('me' for the signed-in user) as JSON");
    println!("  airwave radio <title-or-url> [--style hinglish|tanglish] [--out FILE]");
    println!("      Generate a two-host radio show from a Wikipedia article");
    println!("  airwave --help       Show this help message");
    println!("  airwave --version    Show version");
    println!();
    println!("Environment Variables:");
    println!("  GRAPH_ACCESS_TOKEN   Microsoft Graph bearer token (extract/chats)");
    println!("  GRAPH_PAGE_SIZE      First-page size hint (default: 50)");
    println!("  LLM_API_KEY          LLM API key, GROQ_API_KEY also accepted (radio)");
    println!("  LLM_MODEL            Model name (default: llama-3.3-70b-versatile)");
    println!("  TTS_PROVIDER         elevenlabs or openai (default: elevenlabs)");
    println!("  ELEVENLABS_API_KEY   ElevenLabs API key");
    println!("  OPENAI_API_KEY       OpenAI API key");
    println!("  VOICE_A_ID           Voice for the first host");
    println!("  VOICE_B_ID           Voice for the second host");
    println!("  MESSAGES_OUTPUT_PATH Default JSON output path");
    println!("  AUDIO_OUTPUT_PATH    Default audio output path");
}

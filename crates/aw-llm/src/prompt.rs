//! Dialogue prompt construction
//!
//! Builds the two-host radio-show prompt that asks for a conversation in a
//! code-mixed style, with speakers labeled `Person A:` / `Person B:` so the
//! script segmenter can pick them apart.

/// Code-mixed conversation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogueStyle {
    /// Hindi-English mix
    #[default]
    Hinglish,
    /// Tamil-English mix
    Tanglish,
}

impl DialogueStyle {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hinglish => "Hinglish",
            Self::Tanglish => "Tanglish",
        }
    }

    fn language_mix(&self) -> &'static str {
        match self {
            Self::Hinglish => "naturally mix Hindi and English words (like real Indian conversations)",
            Self::Tanglish => "naturally mix Tamil and English words (like real Tamil conversations)",
        }
    }

    fn filler_examples(&self) -> &'static str {
        match self {
            Self::Hinglish => r#"- Occasional: "achcha", "haan", "exactly", "sahi hai"
   - Rare thinking: "let me think", "dekho"
   - Very rare: "yaar" (only once or twice), "arre" (rarely)"#,
            Self::Tanglish => r#"- Occasional: "appadiya", "seri", "correct", "exactly"
   - Rare thinking: "let me think", "paathu""#,
        }
    }
}

impl std::str::FromStr for DialogueStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hinglish" => Ok(Self::Hinglish),
            "tanglish" => Ok(Self::Tanglish),
            other => Err(format!("unknown dialogue style: {}", other)),
        }
    }
}

/// System prompt for script generation
pub fn system_prompt(style: DialogueStyle) -> String {
    format!(
        "You are an expert at creating natural, conversational scripts in {} for radio shows.",
        style.name()
    )
}

/// Build the script-generation prompt for an article.
///
/// The article is truncated to 1500 characters; longer text mostly pads
/// the context without improving the script.
pub fn dialogue_prompt(article_text: &str, style: DialogueStyle) -> String {
    let topic: String = article_text.chars().take(1500).collect();

    format!(
        r#"You are creating a natural, informative conversational script for a 2-minute radio show segment.

TOPIC: {topic}...

REQUIREMENTS:
1. Create a DEEP, INFORMATIVE conversation between two friends: Person A and Person B
2. Use {style} - {mix}
3. Make it informative and engaging - discuss key facts, details, and insights from the article
4. Include MINIMAL natural speech patterns (use sparingly, maximum 2-3 times total):
   {fillers}
   - Very rare laughter: [laughs] (only if genuinely funny)
5. Focus on CONTENT: Share specific details, numbers, facts, and insights from the article
6. Make it DEEPER: Don't just summarize - discuss implications, interesting aspects, comparisons
7. Duration: Approximately 2 minutes when spoken (aim for 350-450 words total)
8. Format: Mark each speaker clearly as "Person A:" or "Person B:"
9. Make it engaging, informative, and conversational - like two knowledgeable friends discussing

Now create a 2-minute INFORMATIVE conversation script about the topic above:"#,
        topic = topic,
        style = style.name().to_uppercase(),
        mix = style.language_mix(),
        fillers = style.filler_examples(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_str() {
        assert_eq!("hinglish".parse::<DialogueStyle>().unwrap(), DialogueStyle::Hinglish);
        assert_eq!("Tanglish".parse::<DialogueStyle>().unwrap(), DialogueStyle::Tanglish);
        assert!("klingon".parse::<DialogueStyle>().is_err());
    }

    #[test]
    fn test_prompt_contains_speaker_labels() {
        let prompt = dialogue_prompt("Some article text", DialogueStyle::Hinglish);
        assert!(prompt.contains("\"Person A:\""));
        assert!(prompt.contains("\"Person B:\""));
        assert!(prompt.contains("HINGLISH"));
    }

    #[test]
    fn test_prompt_truncates_article() {
        let article = "x".repeat(5000);
        let prompt = dialogue_prompt(&article, DialogueStyle::Tanglish);
        assert!(prompt.contains(&"x".repeat(1500)));
        assert!(!prompt.contains(&"x".repeat(1501)));
    }

    #[test]
    fn test_system_prompt_names_style() {
        assert!(system_prompt(DialogueStyle::Tanglish).contains("Tanglish"));
    }
}

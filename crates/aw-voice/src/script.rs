//! Dialogue script segmentation
//!
//! Splits a turn-taking transcript into ordered `(speaker, text)` segments
//! by speaker-label prefix matching. A label line closes the open segment
//! and starts a new one; other non-empty lines extend the open segment;
//! lines before the first label are dropped.

/// One of the two dialogue hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    HostA,
    HostB,
}

impl Speaker {
    /// The label prefix that marks this speaker's lines in a script.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HostA => "Person A:",
            Self::HostB => "Person B:",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HostA => write!(f, "Person A"),
            Self::HostB => write!(f, "Person B"),
        }
    }
}

/// One contiguous span of transcript attributed to a single speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueSegment {
    pub speaker: Speaker,
    pub text: String,
}

/// Parse a script into ordered dialogue segments.
///
/// Empty input or input without any recognized label yields an empty vec;
/// callers treat an empty result as a pipeline-abort condition.
pub fn parse_script(script: &str) -> Vec<DialogueSegment> {
    let mut segments = Vec::new();
    let mut current: Option<(Speaker, Vec<String>)> = None;

    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((speaker, rest)) = match_label(line) {
            if let Some((prev, pieces)) = current.take() {
                segments.push(DialogueSegment {
                    speaker: prev,
                    text: pieces.join(" "),
                });
            }
            let mut pieces = Vec::new();
            if !rest.is_empty() {
                pieces.push(rest.to_string());
            }
            current = Some((speaker, pieces));
        } else if let Some((_, pieces)) = current.as_mut() {
            pieces.push(line.to_string());
        }
        // No open segment yet: the line precedes the first label, drop it.
    }

    if let Some((speaker, pieces)) = current {
        segments.push(DialogueSegment {
            speaker,
            text: pieces.join(" "),
        });
    }

    segments
}

fn match_label(line: &str) -> Option<(Speaker, &str)> {
    for speaker in [Speaker::HostA, Speaker::HostB] {
        if let Some(rest) = line.strip_prefix(speaker.label()) {
            return Some((speaker, rest.trim()));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_two_speakers() {
        let segments = parse_script("Person A: hi\nPerson B: hey\nyaar");
        assert_eq!(
            segments,
            vec![
                DialogueSegment { speaker: Speaker::HostA, text: "hi".to_string() },
                DialogueSegment { speaker: Speaker::HostB, text: "hey yaar".to_string() },
            ]
        );
    }

    #[test]
    fn test_continuation_lines_joined_with_single_spaces() {
        let segments = parse_script("Person A: first\nsecond\nthird\nPerson B: reply");
        assert_eq!(segments[0].text, "first second third");
        assert_eq!(segments[1].text, "reply");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let segments = parse_script("Person A: hello\n\n\nPerson B: world\n\n");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "hello");
        assert_eq!(segments[1].text, "world");
    }

    #[test]
    fn test_leading_unlabeled_lines_dropped() {
        let segments = parse_script("Here is your script:\n\nPerson A: hello");
        assert_eq!(
            segments,
            vec![DialogueSegment { speaker: Speaker::HostA, text: "hello".to_string() }]
        );
    }

    #[test]
    fn test_no_labels_yields_empty() {
        assert!(parse_script("just some prose\nwith lines").is_empty());
        assert!(parse_script("").is_empty());
    }

    #[test]
    fn test_same_speaker_twice() {
        let segments = parse_script("Person A: one\nPerson A: two");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].speaker, Speaker::HostA);
        assert_eq!(segments[1].speaker, Speaker::HostA);
    }

    #[test]
    fn test_idempotent_on_rejoined_output() {
        let script = "Person A: Mumbai Indians won 5 titles.\nThat is the most.\nPerson B: Haan, exactly!\nPerson A: Their scouting is great.";
        let segments = parse_script(script);

        let rejoined = segments
            .iter()
            .map(|s| format!("{} {}", s.speaker.label(), s.text))
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(parse_script(&rejoined), segments);
    }
}

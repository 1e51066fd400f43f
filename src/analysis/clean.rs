//! Transcript cleanup: hesitations, stutters, and whitespace noise.
//!
//! Speech-to-text output is full of artifacts a summarizer does not need:
//! repeated words from stutters or chunk boundaries, filler words, and
//! run-on punctuation. Cleaning is a pure local transform.

/// Single-word fillers removed from transcripts.
const FILLER_WORDS: &[&str] = &["um", "uh", "er", "ah", "like"];

/// Two-word fillers removed from transcripts.
const FILLER_PHRASES: &[(&str, &str)] = &[("you", "know"), ("i", "mean")];

/// Clean a raw transcript.
///
/// Collapses immediately repeated words (case-insensitive), strips filler
/// words and phrases, normalizes runs of periods to an ellipsis, and
/// collapses whitespace.
pub fn clean_transcript(text: &str) -> String {
    let text = normalize_ellipses(text);
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let mut kept: Vec<&str> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];

        if let Some(word) = bare_word(token) {
            // Two-word fillers ("you know", "i mean").
            if i + 1 < tokens.len()
                && let Some(next) = bare_word(tokens[i + 1])
                && FILLER_PHRASES
                    .iter()
                    .any(|(a, b)| word == *a && next == *b)
            {
                i += 2;
                continue;
            }

            // Single-word fillers.
            if FILLER_WORDS.contains(&word.as_str()) {
                i += 1;
                continue;
            }

            // Immediate repetitions of the same bare word.
            if let Some(prev) = kept.last().copied()
                && bare_word(prev).as_deref() == Some(word.as_str())
            {
                i += 1;
                continue;
            }
        }

        kept.push(token);
        i += 1;
    }

    kept.join(" ")
}

/// The lowercase form of a token that is purely alphanumeric, or `None` for
/// tokens carrying punctuation. Punctuation marks a boundary the stutter
/// and filler rules must not reach across.
fn bare_word(token: &str) -> Option<String> {
    if !token.is_empty() && token.chars().all(char::is_alphanumeric) {
        Some(token.to_lowercase())
    } else {
        None
    }
}

/// Collapse runs of three or more periods into a single ellipsis.
fn normalize_ellipses(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut dots = 0usize;
    for c in text.chars() {
        if c == '.' {
            dots += 1;
        } else {
            flush_dots(&mut out, dots);
            dots = 0;
            out.push(c);
        }
    }
    flush_dots(&mut out, dots);
    out
}

fn flush_dots(out: &mut String, dots: usize) {
    if dots >= 3 {
        out.push_str("...");
    } else {
        for _ in 0..dots {
            out.push('.');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_repeated_words() {
        assert_eq!(
            clean_transcript("we we we should ship ship it"),
            "we should ship it"
        );
    }

    #[test]
    fn test_repetition_check_ignores_case() {
        assert_eq!(clean_transcript("The the budget"), "The budget");
    }

    #[test]
    fn test_removes_filler_words() {
        assert_eq!(
            clean_transcript("so um the plan is uh ready"),
            "so the plan is ready"
        );
    }

    #[test]
    fn test_removes_filler_phrases() {
        assert_eq!(
            clean_transcript("it was you know a good quarter I mean mostly"),
            "it was a good quarter mostly"
        );
    }

    #[test]
    fn test_punctuation_blocks_stutter_collapse() {
        // A sentence boundary between identical words is not a stutter.
        assert_eq!(clean_transcript("agreed. agreed"), "agreed. agreed");
    }

    #[test]
    fn test_normalizes_ellipses() {
        assert_eq!(clean_transcript("well..... maybe"), "well... maybe");
        assert_eq!(clean_transcript("end."), "end.");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_transcript("a  lot\tof\n\nspace"), "a lot of space");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_transcript(""), "");
        assert_eq!(clean_transcript("   "), "");
    }

    #[test]
    fn test_clean_text_passes_through() {
        let text = "The roadmap review went well and the launch date holds.";
        assert_eq!(clean_transcript(text), text);
    }
}

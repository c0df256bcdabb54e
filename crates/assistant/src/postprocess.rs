//! Cleanup and code extraction for raw model output
//!
//! Decoded model output arrives as one long string containing the whole
//! prompt plus the completion, with unpredictable whitespace and the
//! occasional non-ASCII artifact. The cleaning pipeline isolates the
//! reply, normalizes it to printable single-spaced ASCII, then restores
//! the structure that matters: fenced code blocks and sentence breaks.
//!
//! The non-ASCII strip is intentionally preserved from the original
//! behavior even though it is lossy for non-Latin content; see DESIGN.md.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// The prompt seed the model continues from; the reply is everything
/// after its last occurrence.
const REPLY_MARKER: &str = "Assistant: ";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(\w+)?\s").unwrap());
static FENCE_BEFORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s```").unwrap());
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.!?])\s+").unwrap());
static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap());

/// Clean raw decoded output into a presentable reply.
///
/// Steps, in order: isolate the text after the last `Assistant: ` marker
/// (the full text when absent), drop everything outside printable 7-bit
/// ASCII, collapse whitespace runs to single spaces, restore fence
/// openings and closings onto their own lines, restore sentence breaks,
/// trim.
pub fn clean(raw: &str) -> String {
    let reply = match raw.rfind(REPLY_MARKER) {
        Some(pos) => &raw[pos + REPLY_MARKER.len()..],
        None => raw,
    };

    // Whitespace survives this filter so the collapse below sees it.
    let ascii: String = reply
        .chars()
        .filter(|c| c.is_ascii() && (c.is_ascii_whitespace() || !c.is_ascii_control()))
        .collect();

    let text = WHITESPACE_RUN.replace_all(&ascii, " ");
    let text = FENCE_OPEN.replace_all(&text, "```${1}\n");
    let text = FENCE_BEFORE.replace_all(&text, "\n```");
    let text = SENTENCE_BREAK.replace_all(&text, "${1}\n");
    text.trim().to_string()
}

/// Extract every fenced code block from cleaned text, keyed by language
/// tag (`text` when the fence has no tag). Duplicate tags follow mapping
/// semantics: the last occurrence wins.
pub fn extract_code_blocks(cleaned: &str) -> HashMap<String, String> {
    let mut blocks = HashMap::new();
    for cap in CODE_BLOCK.captures_iter(cleaned) {
        let lang = cap
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or("text")
            .to_string();
        let body = cap[2].trim().to_string();
        blocks.insert(lang, body);
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_isolation_after_last_marker() {
        let raw = "system stuff\n\nUser: hi\n\nAssistant: The reply.";
        assert_eq!(clean(raw), "The reply.");
    }

    #[test]
    fn test_missing_marker_keeps_full_text() {
        assert_eq!(clean("Just some text."), "Just some text.");
    }

    #[test]
    fn test_non_ascii_is_dropped() {
        assert_eq!(clean("h\u{e9}llo w\u{f6}rld"), "hllo wrld");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(clean("a   b\t\tc\n\nd"), "a b c d");
    }

    #[test]
    fn test_sentence_breaks_restored() {
        assert_eq!(clean("One. Two! Three? Four"), "One.\nTwo!\nThree?\nFour");
    }

    #[test]
    fn test_fence_formatting_restored() {
        let cleaned = clean("Use this: ```css body {} ```");
        assert!(cleaned.contains("```css\nbody {}"), "got: {}", cleaned);
        assert!(cleaned.contains("\n```"), "got: {}", cleaned);
    }

    #[test]
    fn test_clean_is_idempotent_on_cleaned_text() {
        let raw = "Sure! Here you go. ```css\nbody {}```";
        let once = clean(raw);
        let twice = clean(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_extract_round_trip() {
        let cleaned = "```js\nconsole.log(1)```and```css\nbody{}```";
        let blocks = extract_code_blocks(cleaned);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks["js"], "console.log(1)");
        assert_eq!(blocks["css"], "body{}");
    }

    #[test]
    fn test_extract_untagged_block_keyed_text() {
        let blocks = extract_code_blocks("```\nplain body```");
        assert_eq!(blocks["text"], "plain body");
    }

    #[test]
    fn test_duplicate_tags_last_write_wins() {
        let cleaned = "```html\n<p>first</p>```then```html\n<p>second</p>```";
        let blocks = extract_code_blocks(cleaned);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks["html"], "<p>second</p>");
    }

    #[test]
    fn test_extract_from_text_without_blocks() {
        assert!(extract_code_blocks("no code here").is_empty());
    }

    #[test]
    fn test_clean_then_extract_pipeline() {
        let raw = "prompt\n\nAssistant: Change the color. ```css\nbody { color: red; } ```Done.";
        let cleaned = clean(raw);
        let blocks = extract_code_blocks(&cleaned);
        assert_eq!(blocks["css"], "body { color: red; }");
        assert!(cleaned.starts_with("Change the color."));
    }
}

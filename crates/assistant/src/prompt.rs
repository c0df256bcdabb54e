//! Prompt assembly
//!
//! Builds the completion prompt fed to the model: the fixed system
//! instruction, a bounded rendering of the current code context, and the
//! user's message. The exact layout and punctuation matter — the model
//! continues the text after the trailing `Assistant: ` seed, and the
//! response cleaner later splits on that same marker.

/// Fixed system instruction for every chat turn.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant helping to modify and improve website code.
You should:
1. Always provide specific and actionable code changes
2. Format code blocks using proper language tags (html, css, js)
3. Explain what each change does and why it's needed
4. If the request is unclear, ask for clarification
5. Focus on one change at a time
6. Validate that suggested changes are complete and correct

Current task: Analyze the provided code and suggest improvements based on the user's request.";

/// Code bodies longer than this are shortened before entering the prompt.
const TRUNCATE_THRESHOLD: usize = 1000;
/// How many characters survive at each end of a shortened body.
const TRUNCATE_KEEP: usize = 500;
const TRUNCATION_MARKER: &str = "... [code truncated] ...";

/// Shorten an oversized code body to its first and last 500 characters.
/// Counts are in characters, not bytes, so multi-byte input never splits
/// a code point.
fn truncate_code(code: &str) -> String {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() <= TRUNCATE_THRESHOLD {
        return code.to_string();
    }
    let head: String = chars[..TRUNCATE_KEEP].iter().collect();
    let tail: String = chars[chars.len() - TRUNCATE_KEEP..].iter().collect();
    format!("{}\n{}\n{}", head, TRUNCATION_MARKER, tail)
}

/// Assemble the full prompt. Empty code sections are skipped; when every
/// section is empty the `Context:` block is omitted entirely.
pub fn build_prompt(system_prompt: &str, sections: &[(&str, &str)], message: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    for (lang, code) in sections {
        if code.is_empty() {
            continue;
        }
        blocks.push(format!(
            "Current {} code:\n```{}\n{}\n```",
            lang.to_uppercase(),
            lang,
            truncate_code(code)
        ));
    }

    let mut prompt = format!("{}\n\n", system_prompt);
    if !blocks.is_empty() {
        prompt.push_str("Context:\n");
        prompt.push_str(&blocks.join("\n"));
        prompt.push_str("\n\n");
    }
    prompt.push_str(&format!("User: {}\n\nAssistant: ", message));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context_prompt_shape() {
        let prompt = build_prompt(SYSTEM_PROMPT, &[], "Hello");
        assert!(prompt.ends_with("\n\nUser: Hello\n\nAssistant: "));
        assert!(!prompt.contains("Context:"));
        assert!(prompt.starts_with(SYSTEM_PROMPT));
    }

    #[test]
    fn test_trailing_space_is_preserved() {
        let prompt = build_prompt(SYSTEM_PROMPT, &[], "x");
        assert!(prompt.ends_with("Assistant: "));
        assert!(!prompt.ends_with("Assistant:  "));
    }

    #[test]
    fn test_context_section_rendering() {
        let prompt = build_prompt("sys", &[("css", "body {}")], "make it blue");
        assert!(prompt.contains("Context:\nCurrent CSS code:\n```css\nbody {}\n```\n\n"));
        assert!(prompt.contains("User: make it blue"));
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let prompt = build_prompt("sys", &[("html", ""), ("js", "alert(1)")], "m");
        assert!(!prompt.contains("Current HTML code"));
        assert!(prompt.contains("Current JS code:\n```js\nalert(1)\n```"));
    }

    #[test]
    fn test_short_code_is_verbatim() {
        let code = "x".repeat(1000);
        let prompt = build_prompt("sys", &[("css", &code)], "m");
        assert!(prompt.contains(&code));
        assert!(!prompt.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn test_long_code_is_truncated() {
        let code: String = ('a'..='z').cycle().take(1001).collect();
        let prompt = build_prompt("sys", &[("js", &code)], "m");
        assert!(!prompt.contains(&code));
        assert!(prompt.contains(TRUNCATION_MARKER));
        let head: String = code.chars().take(500).collect();
        let tail: String = code.chars().skip(code.chars().count() - 500).collect();
        assert!(prompt.contains(&format!("{}\n{}\n{}", head, TRUNCATION_MARKER, tail)));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        // Multi-byte characters must not split; 1001 snowmen trip the limit
        let code: String = std::iter::repeat('\u{2603}').take(1001).collect();
        let prompt = build_prompt("sys", &[("css", &code)], "m");
        assert!(prompt.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn test_multiple_sections_keep_order() {
        let prompt = build_prompt("sys", &[("html", "<p>"), ("css", "a{}")], "m");
        let html_pos = prompt.find("Current HTML code").unwrap();
        let css_pos = prompt.find("Current CSS code").unwrap();
        assert!(html_pos < css_pos);
    }
}

//! Action protocol parser.
//!
//! The model replies in free text. Two markers are recognized, both
//! case-insensitive:
//!
//! ```text
//! Final Answer: <everything to end of text>
//!
//! Action: <tool name, to end of line>
//! Input: <tool input, to end of line>
//! ```
//!
//! A final answer takes precedence over an action in the same reply.

use regex_lite::Regex;
use std::sync::LazyLock;

static FINAL_ANSWER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)Final Answer:\s*(.+)").ok());

static ACTION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)Action:\s*(.+?)(?:\n|$)").ok());

static INPUT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)Input:\s*(.+?)(?:\n|$)").ok());

/// Classification of a single model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    /// A terminal answer, trimmed.
    FinalAnswer(String),
    /// A tool invocation.
    Action { tool_name: String, tool_input: String },
    /// Neither marker matched.
    None,
}

/// Parse one model reply.
pub fn parse_response(text: &str) -> ParsedResponse {
    if let Some(answer) = parse_final_answer(text) {
        return ParsedResponse::FinalAnswer(answer);
    }
    match parse_action(text) {
        Some((tool_name, tool_input)) => ParsedResponse::Action { tool_name, tool_input },
        None => ParsedResponse::None,
    }
}

/// The text after `Final Answer:`, if present and non-blank.
pub fn parse_final_answer(text: &str) -> Option<String> {
    first_capture(&FINAL_ANSWER, text)
}

/// `(tool_name, tool_input)` when both `Action:` and `Input:` are present
/// and non-blank.
pub fn parse_action(text: &str) -> Option<(String, String)> {
    let tool_name = first_capture(&ACTION, text)?;
    let tool_input = first_capture(&INPUT, text)?;
    Some((tool_name, tool_input))
}

fn first_capture(pattern: &LazyLock<Option<Regex>>, text: &str) -> Option<String> {
    let captures = pattern.as_ref()?.captures(text)?;
    let value = captures.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(name: &str, input: &str) -> ParsedResponse {
        ParsedResponse::Action {
            tool_name: name.into(),
            tool_input: input.into(),
        }
    }

    #[test]
    fn patterns_compile() {
        assert!(FINAL_ANSWER.is_some());
        assert!(ACTION.is_some());
        assert!(INPUT.is_some());
    }

    #[test]
    fn final_answer_spans_lines() {
        let parsed = parse_response("Thought: done.\nFinal Answer: line one\nline two\n\n");
        assert_eq!(parsed, ParsedResponse::FinalAnswer("line one\nline two".into()));
    }

    #[test]
    fn final_answer_is_case_insensitive() {
        assert_eq!(
            parse_response("final answer:   42  "),
            ParsedResponse::FinalAnswer("42".into())
        );
    }

    #[test]
    fn action_with_input() {
        let parsed = parse_response("I should compute.\nAction: calculator\nInput: 2 + 2\n");
        assert_eq!(parsed, action("calculator", "2 + 2"));
    }

    #[test]
    fn action_without_trailing_newline() {
        assert_eq!(
            parse_response("ACTION: web_search\ninput: rust ownership"),
            action("web_search", "rust ownership")
        );
    }

    #[test]
    fn action_trims_carriage_returns() {
        assert_eq!(
            parse_response("Action: calculator\r\nInput: 1+1\r\n"),
            action("calculator", "1+1")
        );
    }

    #[test]
    fn final_answer_wins_over_action() {
        let text = "Action: calculator\nInput: 1+1\nFinal Answer: 2";
        assert_eq!(parse_response(text), ParsedResponse::FinalAnswer("2".into()));

        let reversed = "Final Answer: 2\nAction: calculator\nInput: 1+1";
        match parse_response(reversed) {
            ParsedResponse::FinalAnswer(answer) => assert!(answer.starts_with('2')),
            other => panic!("expected final answer, got {other:?}"),
        }
    }

    #[test]
    fn action_without_input_is_none() {
        assert_eq!(parse_response("Action: calculator"), ParsedResponse::None);
        assert_eq!(parse_response("Input: 2 + 2"), ParsedResponse::None);
    }

    #[test]
    fn blank_final_answer_falls_through() {
        assert_eq!(
            parse_response("Action: calculator\nInput: 3*3\nFinal Answer:   "),
            action("calculator", "3*3")
        );
        assert_eq!(parse_response("Final Answer:"), ParsedResponse::None);
    }

    #[test]
    fn plain_text_is_none() {
        assert_eq!(parse_response("Just a chatty reply."), ParsedResponse::None);
        assert_eq!(parse_response(""), ParsedResponse::None);
    }
}

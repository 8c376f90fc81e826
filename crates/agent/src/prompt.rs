//! Prompt and observation text used by the reasoning loop.

use ressa_core::tool::ToolDescriptor;

/// System preamble for tool-free `chat`.
pub const CHAT_PREAMBLE: &str = "You are a helpful AI research assistant.";

/// Observations longer than this are cut in the exhaustion fallback.
pub const FALLBACK_OBSERVATION_CHARS: usize = 200;

/// One dispatched tool call within a single `run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediateStep {
    pub action: String,
    pub input: String,
    pub observation: String,
}

/// Render the ReAct system prompt listing every tool.
pub fn system_prompt(tools: &[ToolDescriptor]) -> String {
    let tool_lines = tools
        .iter()
        .map(|t| format!("- {}: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful AI research assistant with access to various tools.\n\n\
         Available tools:\n{tool_lines}\n\n\
         To use a tool, format your response as:\n\
         Action: <tool_name>\n\
         Input: <tool_input>\n\n\
         After receiving the tool result, you can continue reasoning or provide a final answer.\n\
         When you have a final answer, format it as:\n\
         Final Answer: <your answer>\n\n\
         Always think step by step and use tools when appropriate."
    )
}

/// The user turn that feeds a tool result back to the model.
pub fn observation_message(observation: &str) -> String {
    format!("Observation: {observation}\n\nContinue reasoning or provide final answer.")
}

/// Observation returned when the model names a tool that is not registered.
pub fn unknown_tool_observation(tool_name: &str, available: &[&str]) -> String {
    format!(
        "Error: Unknown tool '{tool_name}'. Available tools: {}",
        available.join(", ")
    )
}

/// Best-effort answer once the iteration budget runs out.
pub fn fallback_answer(steps: &[IntermediateStep]) -> String {
    let mut answer = String::from(
        "I've thought about this extensively but couldn't reach a definitive answer. \
         Let me provide what I found:\n\n",
    );

    if steps.is_empty() {
        answer.push_str("No intermediate results were generated.");
        return answer;
    }

    for step in steps {
        let preview: String = step.observation.chars().take(FALLBACK_OBSERVATION_CHARS).collect();
        answer.push_str(&format!("- Used {}: {preview}...\n", step.action));
    }
    answer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(action: &str, observation: &str) -> IntermediateStep {
        IntermediateStep {
            action: action.into(),
            input: "x".into(),
            observation: observation.into(),
        }
    }

    #[test]
    fn system_prompt_lists_tools_in_order() {
        let tools = vec![
            ToolDescriptor { name: "calculator".into(), description: "Does math.".into() },
            ToolDescriptor { name: "web_search".into(), description: "Searches.".into() },
        ];
        let prompt = system_prompt(&tools);

        assert!(prompt.starts_with("You are a helpful AI research assistant with access to various tools.\n\nAvailable tools:\n"));
        assert!(prompt.contains("- calculator: Does math.\n- web_search: Searches.\n\n"));
        assert!(prompt.contains("Action: <tool_name>\nInput: <tool_input>"));
        assert!(prompt.contains("Final Answer: <your answer>"));
        assert!(prompt.ends_with("use tools when appropriate."));
    }

    #[test]
    fn observation_format() {
        assert_eq!(
            observation_message("Result: 4"),
            "Observation: Result: 4\n\nContinue reasoning or provide final answer."
        );
    }

    #[test]
    fn unknown_tool_lists_available() {
        assert_eq!(
            unknown_tool_observation("nosuchtool", &["calculator", "summarizer"]),
            "Error: Unknown tool 'nosuchtool'. Available tools: calculator, summarizer"
        );
    }

    #[test]
    fn fallback_without_steps() {
        let answer = fallback_answer(&[]);
        assert!(answer.ends_with("Let me provide what I found:\n\nNo intermediate results were generated."));
    }

    #[test]
    fn fallback_truncates_observations() {
        let long = "y".repeat(500);
        let answer = fallback_answer(&[step("calculator", "Result: 2"), step("web_search", &long)]);

        assert!(answer.contains("- Used calculator: Result: 2...\n"));
        let expected = format!("- Used web_search: {}...\n", "y".repeat(200));
        assert!(answer.contains(&expected));
        assert!(!answer.contains(&"y".repeat(201)));
    }
}

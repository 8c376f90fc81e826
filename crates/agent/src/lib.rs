//! The reasoning loop at the heart of Ressa.
//!
//! The agent follows a **Thought → Action → Observation** cycle:
//!
//! 1. **Build context** (system prompt with tools + conversation memory + query)
//! 2. **Send to the model** via the configured provider
//! 3. **If the reply names an action**: run the tool, append the observation,
//!    loop back to step 2
//! 4. **If the reply is a final answer** (or carries no action): remember it
//!    and return it
//!
//! The loop continues until an answer is produced or the iteration budget
//! runs out, in which case a summary of the tool results is returned.

pub mod parser;
pub mod prompt;
pub mod react;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use parser::{ParsedResponse, parse_response};
pub use prompt::IntermediateStep;
pub use react::{ReactAgent, ReactOutcome};

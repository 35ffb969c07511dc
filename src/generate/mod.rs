//! Generative-model invocation and output validation.

mod client;
mod contract;
mod prompt;

pub use client::{GeminiClient, GenerativeModel};
pub use contract::{parse_note, strip_code_fence, GeneratedNote};
pub use prompt::build_prompt;

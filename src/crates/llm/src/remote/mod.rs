//! Remote LLM provider clients.

mod claude;
mod openai;

pub use claude::ClaudeClient;
pub use openai::OpenAiClient;

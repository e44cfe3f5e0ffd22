//! LLM provider clients for fieldparse.
//!
//! This crate provides the [`CompletionModel`] seam the invoker calls
//! through, plus concrete HTTP clients for remote providers:
//! - **Claude** - Anthropic's messages API
//! - **OpenAI** - OpenAI-compatible chat completions APIs
//!
//! Providers only promise "returns text"; everything about interpreting
//! that text (fences, repair, validation) lives upstream in the invoker.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::ClaudeClient;
//! use llm::{CompletionModel, CompletionRequest, RemoteLlmConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::from_env(
//!         "ANTHROPIC_API_KEY",
//!         "https://api.anthropic.com",
//!         "claude-3-5-sonnet-20241022",
//!     )?;
//!     let client = ClaudeClient::new(config)?;
//!
//!     let request = CompletionRequest::new("Summarize this CV as JSON: ...");
//!     let response = client.complete(request).await?;
//!     println!("{}", response.text);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod remote;

pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use model::{CompletionModel, CompletionRequest, CompletionResponse, UsageMetadata};

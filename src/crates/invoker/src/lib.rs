//! Resilient LLM invocation.
//!
//! This crate turns an unreliable network call into a call with a bounded,
//! predictable failure mode. [`ResilientInvoker::invoke`] wraps one
//! outbound model call with:
//!
//! - a per-attempt timeout
//! - retry with exponential backoff, bounded by an attempt budget
//! - a circuit breaker that stops hammering a failing endpoint
//! - markdown-fence stripping and JSON-repair heuristics
//! - required-field validation with a completeness score
//! - a deterministic pattern-based fallback when everything else fails
//!
//! The boundary contract: `invoke` always returns a [`ParseResult`] and
//! never returns an error. Every failure path resolves to a degraded
//! result with `is_degraded = true` and an explanatory note.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use extract::{DocumentKind, ParseRequest};
//! use invoker::ResilientInvoker;
//! use llm::remote::ClaudeClient;
//! use llm::RemoteLlmConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::from_env(
//!         "ANTHROPIC_API_KEY",
//!         "https://api.anthropic.com",
//!         "claude-3-5-sonnet-20241022",
//!     )?;
//!     let invoker = ResilientInvoker::new(Arc::new(ClaudeClient::new(config)?));
//!
//!     let request = ParseRequest::new(cv_text, DocumentKind::Cv);
//!     let result = invoker.invoke(&request).await;
//!     println!("confidence={} degraded={}", result.confidence, result.is_degraded);
//!     Ok(())
//! }
//! ```

pub mod breaker;
pub mod config;
pub mod invoker;
pub mod repair;
pub mod retry;
pub mod validate;

pub use breaker::{BreakerConfig, CircuitBreaker, CircuitState};
pub use config::InvokerConfig;
pub use invoker::ResilientInvoker;
pub use retry::RetryConfig;

// Re-export the domain types callers need alongside the invoker.
pub use extract::{DocumentKind, ParseRequest, ParseResult};

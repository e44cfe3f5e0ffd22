//! The resilient invoker.
//!
//! Wraps one outbound model call per request with timeout, bounded retry,
//! circuit breaking, JSON repair, and schema validation. The boundary
//! contract: [`ResilientInvoker::invoke`] always returns a `ParseResult`
//! and never an error — every failure path resolves to a degraded result
//! with an explanatory note.

use crate::breaker::CircuitBreaker;
use crate::config::InvokerConfig;
use crate::repair::parse_with_repair;
use crate::validate::apply_schema;
use extract::{build_prompt, FallbackExtractor, FieldSchema, ParseRequest, ParseResult};
use llm::{CompletionModel, CompletionRequest, LlmError};
use serde_json::Value;
use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

/// Confidence ceiling for results produced by the fallback path.
const DEGRADED_CONFIDENCE_CEILING: f64 = 0.3;

/// Outcome of a single attempt, driving the ATTEMPT / BACKOFF / DEGRADE
/// decision.
enum AttemptOutcome {
    /// Parsed JSON; the bool records whether repair was needed.
    Parsed(Value, bool),
    /// Transport-level failure worth retrying and counting on the breaker.
    Transient(LlmError),
    /// The endpoint answered but the payload was unusable; retry without
    /// moving the breaker.
    Malformed(LlmError),
    /// Credentials or configuration are wrong; retrying cannot help.
    Fatal(LlmError),
}

/// Turns an unreliable model call into a call with a bounded, predictable
/// failure mode.
///
/// The breaker is explicitly owned and injectable: share one instance
/// across all invokers targeting the same endpoint, and construct
/// independent instances in tests.
pub struct ResilientInvoker {
    model: Arc<dyn CompletionModel>,
    config: InvokerConfig,
    breaker: Arc<CircuitBreaker>,
    fallback: FallbackExtractor,
}

impl ResilientInvoker {
    /// Create an invoker with default configuration and its own breaker.
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self::with_config(model, InvokerConfig::default())
    }

    /// Create an invoker with explicit configuration.
    pub fn with_config(model: Arc<dyn CompletionModel>, config: InvokerConfig) -> Self {
        let breaker = Arc::new(CircuitBreaker::new(config.breaker.clone()));
        Self {
            model,
            config,
            breaker,
            fallback: FallbackExtractor::new(),
        }
    }

    /// Share a breaker with other invokers targeting the same endpoint.
    pub fn with_breaker(mut self, breaker: Arc<CircuitBreaker>) -> Self {
        self.breaker = breaker;
        self
    }

    /// The breaker guarding this invoker's endpoint.
    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    /// Parse one document. Always returns a result; never errors.
    pub async fn invoke(&self, request: &ParseRequest) -> ParseResult {
        if let Err(e) = request.validate() {
            return self.degrade(request, format!("invalid request: {}", e));
        }

        if !self.breaker.should_attempt() {
            info!("circuit open, skipping model call");
            return self.degrade(request, "circuit open - model call skipped during cooldown");
        }

        let schema = FieldSchema::for_kind(request.kind);
        let prompt = build_prompt(request.kind, &request.text);

        let mut last_failure = String::new();

        for attempt in 0..self.config.max_attempts {
            if attempt > 0 {
                // A failure on the previous attempt may have opened the
                // circuit; once it refuses, remaining attempts are skipped.
                if !self.breaker.should_attempt() {
                    info!(attempt, "circuit opened mid-invocation, stopping retries");
                    return self.degrade(
                        request,
                        format!(
                            "circuit open - retries stopped after {} attempts: {}",
                            attempt, last_failure
                        ),
                    );
                }
                let delay = self.config.retry.backoff_delay(attempt - 1);
                debug!(attempt, delay_ms = delay.as_millis() as u64, "backing off before retry");
                sleep(delay).await;
            }

            match self.attempt(&prompt).await {
                AttemptOutcome::Parsed(value, repaired) => {
                    self.breaker.record_success();
                    if attempt > 0 {
                        info!(attempt, "model call succeeded after retry");
                    }
                    return self.finish(value, repaired, &schema);
                }
                AttemptOutcome::Transient(e) => {
                    warn!(attempt, error = %e, "transient failure");
                    self.breaker.record_failure();
                    last_failure = e.to_string();
                }
                AttemptOutcome::Malformed(e) => {
                    warn!(attempt, error = %e, "unusable model response");
                    last_failure = e.to_string();
                }
                AttemptOutcome::Fatal(e) => {
                    error!(error = %e, "fatal configuration error, not retrying");
                    return self.degrade(request, format!("configuration error - not retried: {}", e));
                }
            }
        }

        self.degrade(
            request,
            format!(
                "all {} attempts failed - last error: {}",
                self.config.max_attempts, last_failure
            ),
        )
    }

    /// One network attempt under the per-attempt deadline.
    async fn attempt(&self, prompt: &str) -> AttemptOutcome {
        let request = CompletionRequest::new(prompt);

        let response = match timeout(self.config.attempt_timeout, self.model.complete(request)).await
        {
            Err(_) => {
                return AttemptOutcome::Transient(LlmError::Timeout(format!(
                    "attempt exceeded {:?}",
                    self.config.attempt_timeout
                )))
            }
            Ok(Err(e)) if e.is_auth_error() => return AttemptOutcome::Fatal(e),
            Ok(Err(e)) if e.is_retryable() => return AttemptOutcome::Transient(e),
            Ok(Err(e)) => return AttemptOutcome::Malformed(e),
            Ok(Ok(response)) => response,
        };

        match parse_with_repair(&response.text) {
            Ok((value, repaired)) => AttemptOutcome::Parsed(value, repaired),
            Err(e) => AttemptOutcome::Malformed(e),
        }
    }

    /// Build the primary-path result from parsed JSON.
    fn finish(&self, value: Value, repaired: bool, schema: &FieldSchema) -> ParseResult {
        let outcome = apply_schema(&value, schema);

        let confidence = match outcome.model_confidence {
            Some(mc) => (outcome.completeness + mc.clamp(0.0, 1.0)) / 2.0,
            None => outcome.completeness,
        };

        let mut result = ParseResult::new().with_confidence(confidence);
        result.fields = outcome.fields;
        result.parsing_notes = outcome.notes;
        if repaired {
            result.parsing_notes.push("model response required JSON repair".to_string());
        }
        result
    }

    /// Produce the degraded result for a failed invocation.
    fn degrade(&self, request: &ParseRequest, reason: impl Into<String>) -> ParseResult {
        let reason = reason.into();
        warn!(reason = %reason, "returning degraded result");

        let mut result = self.fallback.extract(request);
        result.parsing_notes.insert(0, reason);
        result.degraded(DEGRADED_CONFIDENCE_CEILING)
    }
}

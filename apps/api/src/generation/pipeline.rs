//! Generation pipeline — obtains a syntactically valid JSON document from
//! the model for a built prompt.
//!
//! Flow per attempt: model call → sanitize → repair → parse-validate.
//! Two attempts total, strictly sequential; the retry runs at a lower
//! temperature after a fixed delay. Whatever error ends the second attempt
//! is the one surfaced to the caller.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::generation_system;
use crate::generation::repair::repair;
use crate::generation::sanitize::sanitize;
use crate::llm_client::{ChatBackend, LlmError};

/// First attempt explores; the retry trades creativity for stricter syntax.
const ATTEMPT_TEMPERATURES: [f32; 2] = [0.5, 0.3];
/// Fixed inter-attempt delay. A plain sleep, not a backoff curve.
const RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
enum AttemptError {
    #[error(transparent)]
    Model(#[from] LlmError),

    #[error("JSON validation failed: {0}")]
    Validation(#[from] serde_json::Error),
}

/// Runs the fixed two-attempt schedule and returns the repaired document
/// string, not a re-serialized value, so the model's own formatting
/// survives. The parse exists purely to validate syntax.
pub async fn generate_document(llm: &dyn ChatBackend, prompt: &str) -> Result<String, AppError> {
    let system = generation_system();
    let mut last_error: Option<AttemptError> = None;

    for (index, &temperature) in ATTEMPT_TEMPERATURES.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(RETRY_DELAY).await;
        }

        match run_attempt(llm, &system, prompt, temperature).await {
            Ok(document) => {
                info!(
                    "Generation succeeded on attempt {} (temperature {})",
                    index + 1,
                    temperature
                );
                return Ok(document);
            }
            Err(e) => {
                warn!("Generation attempt {} failed: {e}", index + 1);
                last_error = Some(e);
            }
        }
    }

    Err(AppError::Generation(
        last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Unknown error".to_string()),
    ))
}

async fn run_attempt(
    llm: &dyn ChatBackend,
    system: &str,
    prompt: &str,
    temperature: f32,
) -> Result<String, AttemptError> {
    let raw = llm.complete(system, prompt, temperature).await?;
    let document = repair(&sanitize(&raw));

    // Validate syntax only; the parsed value is discarded.
    serde_json::from_str::<serde_json::Value>(&document)?;

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Plays back a fixed sequence of model responses and records the
    /// temperature of every call it receives.
    struct ScriptedBackend {
        responses: Mutex<VecDeque<Result<String, LlmError>>>,
        temperatures: Mutex<Vec<f32>>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                temperatures: Mutex::new(Vec::new()),
            }
        }

        fn temperatures(&self) -> Vec<f32> {
            self.temperatures.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            temperature: f32,
        ) -> Result<String, LlmError> {
            self.temperatures.lock().unwrap().push(temperature);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("backend called more times than scripted")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_success_returns_repaired_string() {
        let backend = ScriptedBackend::new(vec![Ok(
            "```json\n{\"projectName\": \"Atlas\",}\n```".to_string()
        )]);

        let result = generate_document(&backend, "prompt").await.unwrap();

        // Repaired string, not a re-serialized value: fences and the
        // trailing comma are gone, the model's spacing is kept.
        assert_eq!(result, "{\"projectName\": \"Atlas\"}");
        assert_eq!(backend.temperatures(), vec![0.5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_first_attempt_retries_at_lower_temperature() {
        let backend = ScriptedBackend::new(vec![
            Ok("{\"a\": }".to_string()), // unrepairable — fails validation
            Ok("{\"a\": 1}".to_string()),
        ]);

        let result = generate_document(&backend, "prompt").await.unwrap();

        assert_eq!(result, "{\"a\": 1}");
        assert_eq!(backend.temperatures(), vec![0.5, 0.3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_then_success() {
        let backend = ScriptedBackend::new(vec![
            Err(LlmError::Api {
                status: 500,
                message: "upstream exploded".to_string(),
            }),
            Ok("{\"a\": 1}".to_string()),
        ]);

        let result = generate_document(&backend, "prompt").await.unwrap();
        assert_eq!(result, "{\"a\": 1}");
        assert_eq!(backend.temperatures(), vec![0.5, 0.3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_attempts_failing_surfaces_second_error() {
        let backend = ScriptedBackend::new(vec![
            Err(LlmError::Api {
                status: 500,
                message: "first failure".to_string(),
            }),
            Err(LlmError::Api {
                status: 429,
                message: "second failure".to_string(),
            }),
        ]);

        let err = generate_document(&backend, "prompt").await.unwrap_err();

        match err {
            AppError::Generation(details) => {
                assert!(details.contains("second failure"), "got: {details}");
                assert!(!details.contains("first failure"));
            }
            other => panic!("expected Generation error, got {other:?}"),
        }
        assert_eq!(backend.temperatures(), vec![0.5, 0.3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_third_attempt_after_two_failures() {
        // The scripted backend panics if called a third time.
        let backend = ScriptedBackend::new(vec![
            Ok("{\"a\": }".to_string()),
            Ok("{\"b\": }".to_string()),
        ]);

        let err = generate_document(&backend, "prompt").await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
        assert_eq!(backend.temperatures().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_proseless_refusal_still_yields_empty_object() {
        // Sanitize maps brace-free refusals to "{}", which is valid JSON —
        // the pipeline treats that as success and the caller gets "{}".
        let backend =
            ScriptedBackend::new(vec![Ok("I cannot generate that document.".to_string())]);

        let result = generate_document(&backend, "prompt").await.unwrap();
        assert_eq!(result, "{}");
    }
}

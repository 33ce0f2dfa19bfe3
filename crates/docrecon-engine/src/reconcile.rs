//! Two-stage generative reconciliation
//!
//! Stage 1 infers a document-specific schema with per-field confidence
//! scores from the labeled source bundle; Stage 2 reconciles all sources
//! against that schema into the final JSON. Both stages share the same
//! retry policy and degrade rather than panic: Stage 1 always produces
//! *something*, Stage 2 surfaces exhaustion as an error so the caller can
//! record the document as failed.

use crate::error::EngineError;
use crate::prompt::{self, PromptSet, CONFIDENCE_MARKER, SCHEMA_MARKER};
use crate::retry::{with_backoff, RetryPolicy, Sleep, ThreadSleeper};
use crate::sanitize::sanitize_json;
use docrecon_domain::{GenerativeProvider, SourceBundle};
use tracing::{debug, info, warn};

/// Stage 1 output: two serialized JSON trees with congruent structure.
///
/// The confidence tree mirrors the schema tree's keys by prompt contract
/// only; the model is trusted, not verified (a structurally divergent
/// pair is a data-quality defect downstream consumers must tolerate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConfidence {
    /// Inferred schema with best-guess values, serialized JSON
    pub schema: String,
    /// Per-field confidence scores in [0.0, 1.0], serialized JSON
    pub confidence: String,
}

/// Failure modes of one Stage 1 attempt
enum StageError {
    /// The generative call itself failed
    Call(String),
    /// The call succeeded but the response lacked the expected markers;
    /// carries the raw response for the degraded fallback
    Shape(String),
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageError::Call(e) => write!(f, "generative call failed: {}", e),
            StageError::Shape(_) => write!(f, "response missing expected markers"),
        }
    }
}

/// Drives the two-stage reconciliation protocol for one document
pub struct Reconciler<G: GenerativeProvider> {
    provider: G,
    policy: RetryPolicy,
    sleeper: Box<dyn Sleep>,
}

impl<G: GenerativeProvider> Reconciler<G> {
    /// Create a reconciler with the default retry policy and a real sleeper
    pub fn new(provider: G) -> Self {
        Self {
            provider,
            policy: RetryPolicy::default(),
            sleeper: Box::new(ThreadSleeper),
        }
    }

    /// Override the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Inject a sleeper (tests use a recording sleeper to avoid delays)
    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleep>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Stage 1: generate the schema and confidence trees.
    ///
    /// Never fails. Marker-less responses are retried under the same
    /// policy as call failures; after exhaustion the whole sanitized
    /// response becomes the schema with an empty confidence document.
    /// If no response was obtained at all, both trees degrade to `{}`.
    pub fn schema_and_confidence(
        &self,
        bundle: &SourceBundle,
        prompts: &PromptSet,
    ) -> SchemaConfidence {
        info!("generating JSON schema and confidence scores");
        let prompt = prompt::schema_prompt(prompts, bundle);
        debug!(prompt_len = prompt.len(), "stage 1 prompt assembled");

        let outcome = with_backoff(&self.policy, &*self.sleeper, |attempt| {
            let response = self
                .provider
                .generate(&prompt)
                .map_err(|e| StageError::Call(e.to_string()))?;

            match split_markers(&response) {
                Some((schema, confidence)) => Ok(SchemaConfidence {
                    schema: sanitize_json(schema),
                    confidence: sanitize_json(confidence),
                }),
                None => {
                    warn!(attempt, "response format incorrect");
                    Err(StageError::Shape(response))
                }
            }
        });

        match outcome {
            Ok(result) => result,
            Err(StageError::Shape(response)) => {
                warn!("markers absent after all retries, using whole response as schema");
                SchemaConfidence {
                    schema: sanitize_json(&response),
                    confidence: "{}".to_string(),
                }
            }
            Err(StageError::Call(e)) => {
                warn!(error = %e, "failed to generate schema and confidence scores");
                SchemaConfidence {
                    schema: "{}".to_string(),
                    confidence: "{}".to_string(),
                }
            }
        }
    }

    /// Stage 2: generate the final reconciled JSON.
    ///
    /// The sanitized response is returned as-is; it is not guaranteed to
    /// parse. Exhausted retries surface as [`EngineError::Generation`].
    pub fn final_json(
        &self,
        schema_json: &str,
        bundle: &SourceBundle,
        prompts: &PromptSet,
    ) -> Result<String, EngineError> {
        info!("generating final structured JSON");
        let prompt = prompt::final_prompt(prompts, schema_json, bundle);
        debug!(prompt_len = prompt.len(), "stage 2 prompt assembled");

        with_backoff(&self.policy, &*self.sleeper, |_| {
            self.provider.generate(&prompt).map_err(|e| e.to_string())
        })
        .map(|response| sanitize_json(&response))
        .map_err(EngineError::Generation)
    }
}

/// Two-token scanner over a Stage 1 response.
///
/// Splits on the literal `CONFIDENCE_JSON:` marker; everything before it
/// is the schema segment (trimmed past `SCHEMA_JSON:` when present),
/// everything after is the confidence segment. Returns `None` when the
/// confidence marker is absent.
fn split_markers(response: &str) -> Option<(&str, &str)> {
    let conf_idx = response.find(CONFIDENCE_MARKER)?;
    let (head, tail) = response.split_at(conf_idx);
    let confidence = &tail[CONFIDENCE_MARKER.len()..];

    let schema = match head.find(SCHEMA_MARKER) {
        Some(idx) => &head[idx + SCHEMA_MARKER.len()..],
        None => head,
    };

    Some((schema.trim(), confidence.trim()))
}

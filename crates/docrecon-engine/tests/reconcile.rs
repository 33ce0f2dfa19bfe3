//! Two-stage reconciliation behavior against a scripted provider

use docrecon_engine::prompt::PromptSet;
use docrecon_engine::{RecordingSleeper, Reconciler};
use docrecon_domain::SourceBundle;
use docrecon_llm::MockProvider;

fn bundle() -> SourceBundle {
    let mut bundle = SourceBundle::new();
    bundle.push("ocr", "Invoice #42, total 100");
    bundle.push("layout", "Invoice #42, total 100");
    bundle.push("raw-text", "Invoice #42");
    bundle
}

fn reconciler(provider: MockProvider) -> (Reconciler<MockProvider>, RecordingSleeper) {
    let sleeper = RecordingSleeper::new();
    let reconciler = Reconciler::new(provider).with_sleeper(Box::new(sleeper.clone()));
    (reconciler, sleeper)
}

#[test]
fn stage1_parses_marked_response() {
    let provider = MockProvider::new(
        "SCHEMA_JSON:\n{\"x\":1}\nCONFIDENCE_JSON:\n{\"x\":0.8}",
    );
    let (reconciler, _) = reconciler(provider);

    let result = reconciler.schema_and_confidence(&bundle(), &PromptSet::pdf());
    assert_eq!(result.schema, "{\"x\":1}");
    assert_eq!(result.confidence, "{\"x\":0.8}");
}

#[test]
fn stage1_sanitizes_fenced_segments() {
    let provider = MockProvider::new(
        "SCHEMA_JSON:\n```json\n{\"doc\": \"invoice\"}\n```\nCONFIDENCE_JSON:\n```json\n{\"doc\": 1.0}\n```",
    );
    let (reconciler, _) = reconciler(provider);

    let result = reconciler.schema_and_confidence(&bundle(), &PromptSet::pdf());
    assert_eq!(result.schema, "{\"doc\": \"invoice\"}");
    assert_eq!(result.confidence, "{\"doc\": 1.0}");
}

#[test]
fn stage1_marker_absence_falls_back_after_retries() {
    let provider = MockProvider::new("I could not find any markers {\"guess\": true}");
    let (reconciler, _) = reconciler(provider.clone());

    let result = reconciler.schema_and_confidence(&bundle(), &PromptSet::pdf());

    // Attempted the full retry budget, then degraded without raising
    assert_eq!(provider.call_count(), 5);
    assert_eq!(result.schema, "{\"guess\": true}");
    assert_eq!(result.confidence, "{}");
}

#[test]
fn stage1_call_failure_degrades_to_empty_objects() {
    let provider = MockProvider::failing("quota exceeded");
    let (reconciler, sleeper) = reconciler(provider.clone());

    let result = reconciler.schema_and_confidence(&bundle(), &PromptSet::pdf());

    assert_eq!(provider.call_count(), 5);
    assert_eq!(result.schema, "{}");
    assert_eq!(result.confidence, "{}");
    // Sleeps between attempts only: 4 sleeps for 5 attempts
    assert_eq!(sleeper.slept().len(), 4);
}

#[test]
fn stage1_transient_failure_then_success() {
    let provider = MockProvider::new("SCHEMA_JSON:\n{}\nCONFIDENCE_JSON:\n{}");
    provider.push_error("connection reset");
    let (reconciler, sleeper) = reconciler(provider.clone());

    let result = reconciler.schema_and_confidence(&bundle(), &PromptSet::pdf());

    assert_eq!(provider.call_count(), 2);
    assert_eq!(sleeper.slept().len(), 1);
    assert_eq!(result.schema, "{}");
}

#[test]
fn stage2_returns_sanitized_response() {
    let provider = MockProvider::new("```json\n{\"total\": 100}\n```");
    let (reconciler, _) = reconciler(provider);

    let result = reconciler
        .final_json("{\"total\": \"100\"}", &bundle(), &PromptSet::pdf())
        .unwrap();
    assert_eq!(result, "{\"total\": 100}");
}

#[test]
fn stage2_exhaustion_is_an_error_with_bounded_backoff() {
    let provider = MockProvider::failing("service unavailable");
    let (reconciler, sleeper) = reconciler(provider.clone());

    let result = reconciler.final_json("{}", &bundle(), &PromptSet::pdf());

    assert!(result.is_err());
    assert_eq!(provider.call_count(), 5);

    // Unjittered schedule is 2, 4, 8, 16 seconds; jitter is within ±20%
    let expected = [2.0, 4.0, 8.0, 16.0];
    let slept = sleeper.slept();
    assert_eq!(slept.len(), expected.len());
    for (actual, want) in slept.iter().zip(expected) {
        let secs = actual.as_secs_f64();
        assert!(secs >= want * 0.8 && secs <= want * 1.2, "delay {}", secs);
    }
}

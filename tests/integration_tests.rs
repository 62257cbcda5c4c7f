//! Integration tests for the recruiter bot

use httpmock::prelude::*;
use recruiter_bot::app::{AssumeYes, Confirm, Session, SubmitOutcome};
use recruiter_bot::config::Config;
use recruiter_bot::history::{FileStorage, HistoryStore, MemoryStorage, Storage, HISTORY_KEY};
use recruiter_bot::input::InputLoader;
use recruiter_bot::llm::{AnalysisService, GeminiClient};
use recruiter_bot::{AnalysisRecord, AnalysisResult, InputError, ServiceError, ValidationFailure};
use serde_json::json;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Stands in for the hosted model. `None` fails every call.
struct StubService {
    reply: Option<AnalysisResult>,
    calls: Arc<AtomicUsize>,
}

impl StubService {
    fn replying(result: AnalysisResult) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                reply: Some(result),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn failing() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                reply: None,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl AnalysisService for StubService {
    async fn analyze(&self, _job_description: &str, _resume: &str) -> Result<AnalysisResult, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or(ServiceError::EmptyReply)
    }
}

struct AnswerNo;

impl Confirm for AnswerNo {
    fn confirm(&mut self, _question: &str) -> bool {
        false
    }
}

fn backend_result() -> AnalysisResult {
    AnalysisResult {
        job_title: "Senior Backend Engineer".to_string(),
        compatibility_score: 84,
        common_skills: vec!["Go".to_string(), "Kubernetes".to_string()],
        improvement_suggestions: vec![
            "Mention production Kubernetes scale".to_string(),
            "Quantify latency improvements".to_string(),
            "Add a short summary targeted at platform teams".to_string(),
        ],
    }
}

fn gemini_envelope(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn client_for(server: &MockServer) -> GeminiClient {
    let mut service = Config::default().service;
    service.endpoint = server.base_url();
    GeminiClient::new(&service, "test-key".to_string()).unwrap()
}

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

// Input loading

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let text = InputLoader::new()
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Kubernetes"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let text = InputLoader::new()
        .extract_text(Path::new("tests/fixtures/sample_job.md"))
        .await
        .unwrap();

    assert!(text.contains("Senior Backend Engineer"));
    assert!(text.contains("Kubernetes"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let result = InputLoader::new()
        .extract_text(Path::new("tests/fixtures/unsupported.xyz"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let result = InputLoader::new()
        .extract_text(Path::new("tests/fixtures/nonexistent.txt"))
        .await;
    assert!(result.is_err());
}

// Session orchestration

#[tokio::test]
async fn test_successful_analysis_is_prepended_to_history() {
    let (service, calls) = StubService::replying(backend_result());
    let store = HistoryStore::open(MemoryStorage::new()).unwrap();
    let mut session = Session::new(service, store);

    let outcome = session
        .submit(
            "Senior Backend Engineer, Go, Kubernetes",
            "5 years Go, Docker, Kubernetes",
        )
        .await
        .unwrap();

    let record = match outcome {
        SubmitOutcome::Completed(record) => record,
        other => panic!("expected completion, got {:?}", other),
    };

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(record.result.common_skills.contains(&"Go".to_string()));
    assert!(record.result.common_skills.contains(&"Kubernetes".to_string()));
    assert!(record.score() >= 50);
    assert_eq!(session.current(), Some(&record));
    assert_eq!(session.history().first(), Some(&record));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_empty_inputs_never_reach_the_service() {
    let (service, calls) = StubService::replying(backend_result());
    let mut session = Session::new(service, HistoryStore::open(MemoryStorage::new()).unwrap());

    let outcome = session.submit("   ", "").await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Rejected(InputError::BothEmpty)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(session.history().is_empty());
    assert!(session.current().is_none());
}

#[tokio::test]
async fn test_service_failure_leaves_state_untouched() {
    let (good, _) = StubService::replying(backend_result());
    let mut seeded = Session::new(good, HistoryStore::open(MemoryStorage::new()).unwrap());
    seeded.submit("job", "resume").await.unwrap();
    let storage = MemoryStorage::with_entry(
        HISTORY_KEY,
        &serde_json::to_string(seeded.history()).unwrap(),
    );
    let previous = seeded.history()[0].clone();

    let (failing, calls) = StubService::failing();
    let mut session = Session::new(failing, HistoryStore::open(storage).unwrap());
    session.select(&previous.id).unwrap();

    let outcome = session.submit("job", "resume").await.unwrap();

    match outcome {
        SubmitOutcome::Failed { message, .. } => assert!(message.contains("Please try again")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current(), Some(&previous));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_submission_while_busy_is_rejected() {
    let (service, calls) = StubService::replying(backend_result());
    let mut session = Session::new(service, HistoryStore::open(MemoryStorage::new()).unwrap());

    let guard = session.guard();
    let permit = guard.try_acquire().unwrap();
    let outcome = session.submit("job", "resume").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Busy));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    drop(permit);
    let outcome = session.submit("job", "resume").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Completed(_)));
}

#[tokio::test]
async fn test_clear_history_requires_confirmation() {
    let (service, _) = StubService::replying(backend_result());
    let mut session = Session::new(service, HistoryStore::open(MemoryStorage::new()).unwrap());
    session.submit("job", "resume").await.unwrap();

    assert!(!session.clear_history(&mut AnswerNo).unwrap());
    assert_eq!(session.history().len(), 1);

    assert!(session.clear_history(&mut AssumeYes).unwrap());
    assert!(session.history().is_empty());
    assert!(session.current().is_none());
    assert!(!session.store().storage().contains(HISTORY_KEY));

    assert!(session.clear_history(&mut AssumeYes).unwrap());
    assert!(session.history().is_empty());
}

// File-backed history

#[test]
fn test_file_history_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = HistoryStore::open(FileStorage::new(dir.path())).unwrap();

    let older = AnalysisRecord::new(backend_result(), chrono::Utc::now() - chrono::Duration::minutes(5));
    let newer = AnalysisRecord::now(AnalysisResult {
        job_title: "Data Engineer".to_string(),
        compatibility_score: 42,
        common_skills: vec![],
        improvement_suggestions: vec!["Add SQL projects".to_string()],
    });
    store.append(older.clone()).unwrap();
    store.append(newer.clone()).unwrap();

    let reopened = HistoryStore::open(FileStorage::new(dir.path())).unwrap();
    assert_eq!(reopened.records(), &[newer, older][..]);
}

#[test]
fn test_corrupt_history_file_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage.set(HISTORY_KEY, "{ this is not json").unwrap();

    let store = HistoryStore::open(storage.clone()).unwrap();
    assert!(store.is_empty());
    assert!(!storage.path_for(HISTORY_KEY).exists());
}

#[test]
fn test_non_utf8_history_file_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    std::fs::write(storage.path_for(HISTORY_KEY), [0xff, 0xfe, b'[', b']']).unwrap();

    let store = HistoryStore::open(storage.clone()).unwrap();
    assert!(store.is_empty());
    assert!(!storage.path_for(HISTORY_KEY).exists());
}

// Gemini adapter against a mock endpoint

#[tokio::test]
async fn test_gemini_client_parses_structured_reply() {
    let server = MockServer::start_async().await;
    let reply = json!({
        "jobTitle": "Senior Backend Engineer",
        "compatibilityScore": 81,
        "commonSkills": ["Go", "Kubernetes"],
        "improvementSuggestions": ["Add metrics", "Mention on-call", "Describe Helm charts"]
    });
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(MODEL_PATH)
                .header("x-goog-api-key", "test-key");
            then.status(200).json_body(gemini_envelope(&format!("  {}\n", reply)));
        })
        .await;

    let result = client_for(&server)
        .analyze("Senior Backend Engineer, Go, Kubernetes", "5 years Go, Docker, Kubernetes")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.job_title, "Senior Backend Engineer");
    assert_eq!(result.compatibility_score, 81);
    assert_eq!(result.common_skills, vec!["Go", "Kubernetes"]);
}

#[tokio::test]
async fn test_gemini_client_rejects_malformed_reply() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(gemini_envelope(
                r#"{"jobTitle": "QA", "compatibilityScore": "high", "commonSkills": [], "improvementSuggestions": []}"#,
            ));
        })
        .await;

    let err = client_for(&server).analyze("job", "resume").await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidResponse(ValidationFailure::WrongType { .. })
    ));
    assert!(err.to_string().contains("invalid AI response format"));
}

#[tokio::test]
async fn test_gemini_client_reports_http_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(403).body("API key not valid");
        })
        .await;

    let err = client_for(&server).analyze("job", "resume").await.unwrap_err();
    match err {
        ServiceError::Status { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_gemini_client_reports_empty_candidates() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(json!({ "candidates": [] }));
        })
        .await;

    let err = client_for(&server).analyze("job", "resume").await.unwrap_err();
    assert!(matches!(err, ServiceError::EmptyReply));
}

#[tokio::test]
async fn test_end_to_end_with_file_history() {
    let server = MockServer::start_async().await;
    let reply = serde_json::to_string(&backend_result()).unwrap();
    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(gemini_envelope(&reply));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::open(FileStorage::new(dir.path())).unwrap();
    let mut session = Session::new(client_for(&server), store);

    let job = InputLoader::new()
        .extract_text(Path::new("tests/fixtures/sample_job.md"))
        .await
        .unwrap();
    let resume = InputLoader::new()
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    let outcome = session.submit(&job, &resume).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Completed(_)));

    let reopened = HistoryStore::open(FileStorage::new(dir.path())).unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.records()[0].result, backend_result());
}

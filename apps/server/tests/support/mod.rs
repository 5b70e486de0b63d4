//! Shared helpers for integration tests: in-memory collaborators and
//! request plumbing that exercises the real router via `oneshot`.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use setu::{api::create_router, AppState, Config};
use setu_concept_map::{ConceptMap, DisplayPair, MappingRecord};
use setu_terminology::{
    CodeEntry, DiagnosisSubmission, EmrSink, Error as TerminologyError, SubmissionOutcome,
    TerminologyProvider,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt as _;

/// A terminology provider that returns canned entries and counts calls.
pub struct RecordingProvider {
    entries: Vec<CodeEntry>,
    fail: bool,
    calls: AtomicUsize,
}

impl RecordingProvider {
    pub fn returning(entries: Vec<CodeEntry>) -> Arc<Self> {
        Arc::new(Self {
            entries,
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::returning(Vec::new())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            entries: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TerminologyProvider for RecordingProvider {
    async fn lookup(&self, _query: &str) -> setu_terminology::Result<Vec<CodeEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TerminologyError::Auth("provider unavailable".to_string()));
        }
        Ok(self.entries.clone())
    }
}

/// An EMR sink that records submissions and counts calls.
pub struct RecordingEmr {
    fail: bool,
    calls: AtomicUsize,
    last_submission: Mutex<Option<DiagnosisSubmission>>,
}

impl RecordingEmr {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: AtomicUsize::new(0),
            last_submission: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: AtomicUsize::new(0),
            last_submission: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_submission(&self) -> Option<DiagnosisSubmission> {
        self.last_submission.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmrSink for RecordingEmr {
    async fn submit(
        &self,
        submission: &DiagnosisSubmission,
    ) -> setu_terminology::Result<SubmissionOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_submission.lock().unwrap() = Some(submission.clone());
        if self.fail {
            return Err(TerminologyError::UnexpectedResponse {
                service: "EMR",
                detail: "submission rejected".to_string(),
            });
        }
        Ok(SubmissionOutcome {
            status: "success".to_string(),
            message: "Diagnosis submitted successfully".to_string(),
        })
    }
}

pub fn mapping_record(
    namaste_code: &str,
    icd11_code: &str,
    icd11_display: &str,
    confidence: f64,
) -> MappingRecord {
    MappingRecord {
        namaste_code: namaste_code.to_string(),
        icd11_code: icd11_code.to_string(),
        confidence,
        display: DisplayPair {
            namaste: format!("{namaste_code} display"),
            icd11: icd11_display.to_string(),
        },
    }
}

/// The sample table shipped in `config/mapping.json`: Amavata and Jvara.
pub fn sample_map() -> ConceptMap {
    ConceptMap::from_records(vec![
        mapping_record("AY-A01.0", "MG00.1", "Rheumatoid arthritis", 0.95),
        mapping_record("AY-B01.1", "MG10.0", "Fever of unknown origin", 0.90),
    ])
}

pub fn test_router(
    map: ConceptMap,
    namaste: Arc<RecordingProvider>,
    icd11: Arc<RecordingProvider>,
    emr: Arc<RecordingEmr>,
) -> Router {
    let state = AppState::with_collaborators(Config::default(), map, namaste, icd11, emr);
    create_router(state)
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    send(router, request).await
}

pub async fn post_json(
    router: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    send(router, request).await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.expect("router oneshot");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, value)
}

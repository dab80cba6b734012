//! Shared test helpers for `fieldlink-core` integration tests.
//!
//! In-memory fakes for every port. Each fake records what it was asked to do
//! so tests can assert on side effects without a network.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fieldlink_core::{ConnectionProbe, FieldServiceClient, Notifier, Summarizer};
use fieldlink_domain::{
    Enrichment, FieldLinkError, Notification, Result as DomainResult, SummaryRequest,
};
use serde_json::{json, Value};

/// One recorded call against the fake API.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(String),
    GetCustomer(String),
    CreateCustomer(Value),
    CreateLocation(Value),
    GetJob(String),
    CreateJob(Value),
    PatchDescription(String, String),
    AddNote(String, String),
}

type Queue = Vec<(&'static str, VecDeque<DomainResult<Value>>)>;

/// Scripted field-service API.
///
/// Responses are queued per operation; an operation with an empty queue
/// answers `{}`.
#[derive(Default, Clone)]
pub struct FakeFieldService {
    calls: Arc<Mutex<Vec<Call>>>,
    responses: Arc<Mutex<Queue>>,
}

impl FakeFieldService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `operation` (e.g. `"create_job"`).
    pub fn respond(self, operation: &'static str, response: DomainResult<Value>) -> Self {
        {
            let mut responses = self.responses.lock().unwrap();
            match responses.iter_mut().find(|(op, _)| *op == operation) {
                Some((_, queue)) => queue.push_back(response),
                None => responses.push((operation, VecDeque::from([response]))),
            }
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, operation: &'static str) -> DomainResult<Value> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .iter_mut()
            .find(|(op, _)| *op == operation)
            .and_then(|(_, queue)| queue.pop_front())
            .unwrap_or_else(|| Ok(json!({})))
    }
}

#[async_trait]
impl FieldServiceClient for FakeFieldService {
    async fn search_customers(&self, query: &str) -> DomainResult<Value> {
        self.record(Call::Search(query.to_string()), "search_customers")
    }

    async fn get_customer(&self, customer_id: &str) -> DomainResult<Value> {
        self.record(Call::GetCustomer(customer_id.to_string()), "get_customer")
    }

    async fn create_customer(&self, body: &Value) -> DomainResult<Value> {
        self.record(Call::CreateCustomer(body.clone()), "create_customer")
    }

    async fn create_location(&self, body: &Value) -> DomainResult<Value> {
        self.record(Call::CreateLocation(body.clone()), "create_location")
    }

    async fn get_job(&self, job_id: &str) -> DomainResult<Value> {
        self.record(Call::GetJob(job_id.to_string()), "get_job")
    }

    async fn create_job(&self, payload: &Value) -> DomainResult<Value> {
        self.record(Call::CreateJob(payload.clone()), "create_job")
    }

    async fn patch_job_description(&self, job_id: &str, description: &str) -> DomainResult<Value> {
        self.record(
            Call::PatchDescription(job_id.to_string(), description.to_string()),
            "patch_job_description",
        )
    }

    async fn add_job_note(&self, job_id: &str, note: &str) -> DomainResult<Value> {
        self.record(Call::AddNote(job_id.to_string(), note.to_string()), "add_job_note")
    }

    fn job_url(&self, job_id: &str) -> String {
        format!("https://api.test/v1/jobs/{job_id}")
    }

    async fn probe(&self) -> DomainResult<ConnectionProbe> {
        Ok(ConnectionProbe { token_prefix: "test-token-1...".into(), ping_status: 200 })
    }
}

/// Summarizer returning a fixed result.
pub struct FakeSummarizer {
    result: DomainResult<Enrichment>,
    requests: Mutex<Vec<SummaryRequest>>,
}

impl FakeSummarizer {
    pub fn returning(result: DomainResult<Enrichment>) -> Arc<Self> {
        Arc::new(Self { result, requests: Mutex::new(Vec::new()) })
    }

    pub fn unconfigured() -> Arc<Self> {
        Self::returning(Ok(Enrichment::default()))
    }

    pub fn failing() -> Arc<Self> {
        Self::returning(Err(FieldLinkError::UpstreamHttp { status: 500, body: "boom".into() }))
    }

    pub fn requests(&self) -> Vec<SummaryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> DomainResult<Enrichment> {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

/// Notifier that records every notification and answers a fixed result.
pub struct RecordingNotifier {
    result: DomainResult<bool>,
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn delivering() -> Arc<Self> {
        Arc::new(Self { result: Ok(true), sent: Mutex::new(Vec::new()) })
    }

    pub fn undelivered() -> Arc<Self> {
        Arc::new(Self { result: Ok(false), sent: Mutex::new(Vec::new()) })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            result: Err(FieldLinkError::Template("missing partial".into())),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> DomainResult<bool> {
        self.sent.lock().unwrap().push(notification.clone());
        self.result.clone()
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use autofill_core_types::{CanonicalField, PageContext, SiteId};
use chrono::Utc;
use parking_lot::Mutex;
use record_fetch::{
    EndpointResolver, FetchError, HttpPort, HttpReply, ReportOutcome, StatusReport,
    StatusReporter, TransportError,
};
use serde_json::Value;

#[derive(Clone)]
enum Script {
    Reply(u16, &'static str),
    Down,
}

/// Transport fake answering from a per-URL script and recording every call.
#[derive(Default)]
struct ScriptedHttp {
    script: HashMap<String, Script>,
    calls: Mutex<Vec<String>>,
    posted: Mutex<Vec<Value>>,
}

impl ScriptedHttp {
    fn with(mut self, url: &str, script: Script) -> Self {
        self.script.insert(url.to_string(), script);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn answer(&self, url: &str) -> Result<HttpReply, TransportError> {
        self.calls.lock().push(url.to_string());
        match self.script.get(url).cloned().unwrap_or(Script::Down) {
            Script::Reply(status, body) => Ok(HttpReply::new(status, body)),
            Script::Down => Err(TransportError::Request {
                url: url.to_string(),
                reason: "connection refused".into(),
            }),
        }
    }
}

#[async_trait]
impl HttpPort for ScriptedHttp {
    async fn get_json(&self, url: &str) -> Result<HttpReply, TransportError> {
        self.answer(url)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, TransportError> {
        self.posted.lock().push(body.clone());
        self.answer(url)
    }
}

const GOOD: &str = r#"{"status":"success","data":{"_id":"GRV_7","state":"Kerala","city":"Kochi"}}"#;

fn urls(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("http://backend/{i}")).collect()
}

#[tokio::test]
async fn first_success_after_k_failures_stops_the_walk() {
    // each flavour of candidate-local failure ahead of the good one
    let failing = [
        Script::Down,
        Script::Reply(500, "boom"),
        Script::Reply(200, "<html>not json</html>"),
        Script::Reply(200, r#"{"status":"error","message":"No pending grievances found"}"#),
    ];
    for k in 0..failing.len() {
        let candidates = urls(failing.len() + 2);
        let mut http = ScriptedHttp::default();
        for (i, script) in failing.iter().take(k).enumerate() {
            http = http.with(&candidates[i], script.clone());
        }
        http = http.with(&candidates[k], Script::Reply(200, GOOD));
        http = http.with(
            &candidates[k + 1],
            Script::Reply(200, r#"{"state":"Later"}"#),
        );
        let http = Arc::new(http);

        let resolver = EndpointResolver::new(http.clone(), candidates.clone()).unwrap();
        let record = resolver.resolve().await.unwrap();

        assert_eq!(http.calls(), candidates[..=k].to_vec());
        assert_eq!(record.get(CanonicalField::State), Some("Kerala"));
        assert_eq!(record.identifier(), Some("GRV_7"));
    }
}

#[tokio::test]
async fn exhaustion_after_exactly_len_calls() {
    let candidates = urls(3);
    let http = Arc::new(
        ScriptedHttp::default()
            .with(&candidates[1], Script::Reply(404, "")),
    );
    let resolver = EndpointResolver::new(http.clone(), candidates.clone()).unwrap();

    let err = resolver.resolve().await.unwrap_err();

    assert_eq!(http.calls(), candidates);
    match err {
        FetchError::EndpointsExhausted { attempts, failures } => {
            assert_eq!(attempts, 3);
            assert_eq!(failures[1].url, candidates[1]);
            assert!(failures[1].reason.contains("404"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn empty_candidate_lists_are_rejected() {
    let http: Arc<dyn HttpPort> = Arc::new(ScriptedHttp::default());
    assert_eq!(
        EndpointResolver::new(http.clone(), Vec::new()).unwrap_err(),
        FetchError::NoCandidates
    );
    assert!(StatusReporter::new(http, Vec::new()).is_err());
}

fn report() -> StatusReport {
    let ctx = PageContext::new("https://consumerhelpline.gov.in/register", SiteId::ConsumerHelpline);
    StatusReport::form_filled(Some("GRV_7"), &ctx, Utc::now())
}

#[tokio::test]
async fn any_completed_call_counts_as_reported() {
    let candidates = urls(2);
    let http = Arc::new(
        ScriptedHttp::default()
            .with(&candidates[0], Script::Reply(500, "server error"))
            .with(&candidates[1], Script::Reply(200, "")),
    );
    let reporter = StatusReporter::new(http.clone(), candidates.clone()).unwrap();

    let outcome = reporter.report(&report()).await;

    assert_eq!(
        outcome,
        ReportOutcome::Delivered {
            url: candidates[0].clone(),
            attempts: 1
        }
    );
    assert_eq!(http.calls().len(), 1);
    assert_eq!(http.posted.lock()[0]["status"], "form_filled");
}

#[tokio::test]
async fn write_fallback_moves_past_transport_errors() {
    let candidates = urls(2);
    let http = Arc::new(ScriptedHttp::default().with(&candidates[1], Script::Reply(204, "")));
    let reporter = StatusReporter::new(http.clone(), candidates.clone()).unwrap();

    let outcome = reporter.spawn_report(report()).await.unwrap();

    assert_eq!(
        outcome,
        ReportOutcome::Delivered {
            url: candidates[1].clone(),
            attempts: 2
        }
    );
}

#[tokio::test]
async fn total_write_failure_is_swallowed() {
    let candidates = urls(2);
    let http = Arc::new(ScriptedHttp::default());
    let reporter = StatusReporter::new(http.clone(), candidates.clone()).unwrap();

    let outcome = reporter.report(&report()).await;

    assert_eq!(outcome, ReportOutcome::Exhausted { attempts: 2 });
    assert!(!outcome.is_delivered());
    assert_eq!(http.calls(), candidates);
}

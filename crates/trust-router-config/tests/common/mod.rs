// trust-router-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared fixtures for trust-router-config integration tests.
// Purpose: Reduce duplication across parsing and reload suites.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::Mutex;

use serde_json::Value;
use serde_json::json;
use trust_router_config::ConfigAuditEvent;
use trust_router_config::ConfigAuditSink;
use trust_router_config::ConfigDocument;
use trust_router_config::ConfigError;

/// Result type used by integration tests.
pub type TestResult = Result<(), String>;

/// Audit sink that keeps every event in memory.
#[derive(Default)]
pub struct RecordingSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<ConfigAuditEvent>>,
}

impl RecordingSink {
    /// Returns the labels of recorded events.
    pub fn labels(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .map(|events| events.iter().map(|event| event.event).collect())
            .unwrap_or_default()
    }

    /// Returns a copy of the recorded events.
    pub fn events(&self) -> Vec<ConfigAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl ConfigAuditSink for RecordingSink {
    fn record(&self, event: &ConfigAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Returns an `rp_permitted` filter accepting every `rp_realm`.
pub fn accept_all_filter() -> Value {
    json!({
        "type": "rp_permitted",
        "filter_lines": [{
            "action": "accept",
            "filter_specs": [{ "field": "rp_realm", "match": "*" }]
        }]
    })
}

/// Returns the smallest document that validates on its own.
pub fn minimal_document() -> Value {
    json!({
        "tr_internal": { "hostname": "tr.example.org" },
        "rp_clients": [{
            "gss_names": ["rp@example.org"],
            "filter": accept_all_filter()
        }],
        "idp_realms": [{
            "realm_id": "idp.example.org",
            "shared_config": "no",
            "aaa_servers": ["aaa.example.org"]
        }],
        "communities": [{
            "community_id": "apc.example.org",
            "type": "apc",
            "apcs": [],
            "idp_realms": ["idp.example.org"],
            "rp_realms": ["rp.example.org"]
        }]
    })
}

/// Wraps a JSON value as a named document.
pub fn document(name: &str, value: &Value) -> ConfigDocument {
    ConfigDocument::new(name, value.to_string())
}

/// Asserts that `result` failed with the error kind `kind`.
pub fn expect_kind<T>(result: Result<T, ConfigError>, kind: &str) -> TestResult {
    match result {
        Err(err) if err.kind() == kind => Ok(()),
        Err(err) => Err(format!("expected {kind}, got {} ({err})", err.kind())),
        Ok(_) => Err(format!("expected {kind}, got success")),
    }
}

/// Returns `count` distinct strings with the given prefix.
pub fn strings(prefix: &str, count: usize) -> Vec<Value> {
    (0 .. count).map(|idx| Value::String(format!("{prefix}{idx}"))).collect()
}

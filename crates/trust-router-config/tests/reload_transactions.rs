//! Reload transaction tests for trust-router-config.
// trust-router-config/tests/reload_transactions.rs
// =============================================================================
// Module: Reload Transaction Tests
// Description: Multi-document merges, promotion, audit events, and discovery.
// Purpose: Ensure a failed reload never disturbs the active configuration.
// =============================================================================

use std::fs;
use std::sync::Arc;

use serde_json::json;
use trust_router_config::ConfigDocument;
use trust_router_config::ConfigError;
use trust_router_config::EVENT_APPLIED;
use trust_router_config::EVENT_COMMUNITY;
use trust_router_config::EVENT_FILE_PARSING;
use trust_router_config::EVENT_INVALID;
use trust_router_config::EVENT_PARSE_FAILED;
use trust_router_config::EVENT_REVISION;
use trust_router_config::MAX_CONFIG_FILE_SIZE;
use trust_router_config::find_config_files;
use trust_router_config::load_config;
use trust_router_config::load_documents_from_dir;
use trust_router_config::reload;
use trust_router_core::ConfigManager;
use trust_router_core::Name;
use trust_router_core::Severity;
use trust_router_core::SeverityThresholds;
use trust_router_core::ThresholdSink;
use trust_router_core::ValidationIssue;

mod common;

use common::RecordingSink;
use common::TestResult;

/// Returns a manager publishing thresholds into `thresholds`.
fn manager(thresholds: &Arc<SeverityThresholds>) -> ConfigManager {
    let sink: Arc<dyn ThresholdSink> = Arc::clone(thresholds) as Arc<dyn ThresholdSink>;
    ConfigManager::new(sink)
}

// ============================================================================
// SECTION: Single Pass
// ============================================================================

#[test]
fn minimal_document_round_trips() -> TestResult {
    let sink = RecordingSink::default();
    let documents = [common::document("main.cfg", &common::minimal_document())];
    let config = load_config(&documents, &sink).map_err(|err| err.to_string())?;

    if config.internal().hostname != Some(Name::from("tr.example.org")) {
        return Err("hostname not loaded".to_string());
    }
    let realm = config
        .find_idp(&Name::from("idp.example.org"))
        .ok_or_else(|| "idp realm missing".to_string())?;
    if realm.shared_config() || realm.aaa_servers().len() != 1 {
        return Err("idp realm decoded incorrectly".to_string());
    }
    if config.find_rp_client(&Name::from("rp@example.org")).is_none() {
        return Err("rp client missing".to_string());
    }
    let community = config
        .find_community(&Name::from("apc.example.org"))
        .ok_or_else(|| "community missing".to_string())?;
    let members: Vec<&Name> = config.community_idps(community).map(|realm| realm.id()).collect();
    if members != [&Name::from("idp.example.org")] {
        return Err("community membership not resolved".to_string());
    }
    Ok(())
}

#[test]
fn empty_document_list_is_bad_params() -> TestResult {
    common::expect_kind(load_config(&[], &RecordingSink::default()), "bad_params")
}

#[test]
fn invalid_json_is_no_parse_and_names_the_file() -> TestResult {
    let documents = [ConfigDocument::new("broken.cfg", "{ not json")];
    match load_config(&documents, &RecordingSink::default()) {
        Err(err) if err.kind() == "no_parse" && err.to_string().contains("broken.cfg") => Ok(()),
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(_) => Err("broken JSON accepted".to_string()),
    }
}

#[test]
fn unknown_member_realm_is_not_found() -> TestResult {
    let mut value = common::minimal_document();
    value["communities"][0]["idp_realms"] = json!(["missing.example.org"]);
    let documents = [common::document("main.cfg", &value)];
    common::expect_kind(load_config(&documents, &RecordingSink::default()), "not_found")
}

#[test]
fn incomplete_config_reports_every_issue() -> TestResult {
    let documents = [common::document("empty.cfg", &json!({}))];
    match load_config(&documents, &RecordingSink::default()) {
        Err(ConfigError::Validation(report)) => {
            for issue in [
                ValidationIssue::MissingHostname,
                ValidationIssue::NoRpClients,
                ValidationIssue::NoCommunities,
                ValidationIssue::NoIdpRealmsOrDefaultServers,
            ] {
                if !report.contains(issue) {
                    return Err(format!("missing issue: {issue}"));
                }
            }
            Ok(())
        }
        Err(err) => Err(format!("expected validation failure, got {err}")),
        Ok(_) => Err("empty document accepted".to_string()),
    }
}

#[test]
fn default_servers_satisfy_validation_without_realms() -> TestResult {
    let mut value = common::minimal_document();
    if let Some(object) = value.as_object_mut() {
        object.remove("idp_realms");
        object.remove("communities");
    }
    value["default_servers"] = json!(["aaa.example.org"]);
    value["communities"] = json!([{
        "community_id": "apc.example.org",
        "type": "apc",
        "apcs": [],
        "idp_realms": [],
        "rp_realms": ["rp.example.org"]
    }]);
    let documents = [common::document("main.cfg", &value)];
    let config = load_config(&documents, &RecordingSink::default()).map_err(|err| err.to_string())?;
    if config.default_servers().len() != 1 {
        return Err("default server missing".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Multi-Document Merges
// ============================================================================

#[test]
fn later_documents_take_precedence() -> TestResult {
    let first = common::minimal_document();
    let second = json!({
        "idp_realms": [{
            "realm_id": "idp.example.org",
            "shared_config": "yes",
            "aaa_servers": ["aaa1.example.org", "aaa2.example.org"]
        }]
    });
    let documents =
        [common::document("a.cfg", &first), common::document("b.cfg", &second)];
    let config = load_config(&documents, &RecordingSink::default()).map_err(|err| err.to_string())?;
    let realm = config
        .find_idp(&Name::from("idp.example.org"))
        .ok_or_else(|| "idp realm missing".to_string())?;
    if !realm.shared_config() || realm.aaa_servers().len() != 2 {
        return Err("later declaration did not win".to_string());
    }
    if config.idp_realms().len() != 2 {
        return Err("both declarations should be retained".to_string());
    }
    Ok(())
}

#[test]
fn communities_resolve_against_realms_from_any_document() -> TestResult {
    let mut first = common::minimal_document();
    first["communities"][0]["idp_realms"] = json!(["late.example.org"]);
    let second = json!({
        "idp_realms": [{
            "realm_id": "late.example.org",
            "remote": 1
        }]
    });
    let documents =
        [common::document("a.cfg", &first), common::document("b.cfg", &second)];
    let config = load_config(&documents, &RecordingSink::default()).map_err(|err| err.to_string())?;
    let community = config
        .find_community(&Name::from("apc.example.org"))
        .ok_or_else(|| "community missing".to_string())?;
    if config.community_idps(community).count() != 1 {
        return Err("forward reference not resolved".to_string());
    }
    Ok(())
}

#[test]
fn later_internal_section_keeps_hostname() -> TestResult {
    let first = common::minimal_document();
    let second = json!({ "tr_internal": { "tids_port": 13000 } });
    let documents =
        [common::document("a.cfg", &first), common::document("b.cfg", &second)];
    let config = load_config(&documents, &RecordingSink::default()).map_err(|err| err.to_string())?;
    if config.internal().hostname != Some(Name::from("tr.example.org")) {
        return Err("hostname lost on merge".to_string());
    }
    if config.internal().tids_port != 13000 {
        return Err("later setting ignored".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Promotion
// ============================================================================

#[test]
fn failed_reload_keeps_previous_config() -> TestResult {
    let thresholds = Arc::new(SeverityThresholds::default());
    let manager = manager(&thresholds);
    let sink = RecordingSink::default();
    let first = reload(&manager, &[common::document("main.cfg", &common::minimal_document())], &sink)
        .map_err(|err| err.to_string())?;

    let documents = [
        common::document("a.cfg", &common::minimal_document()),
        common::document("b.cfg", &json!({ "rp_clients": "not a list" })),
        common::document("c.cfg", &common::minimal_document()),
    ];
    common::expect_kind(reload(&manager, &documents, &sink), "no_parse")?;

    let active = manager.active().ok_or_else(|| "active config lost".to_string())?;
    if !Arc::ptr_eq(&first, &active) || manager.generation() != 1 {
        return Err("failed reload replaced the active config".to_string());
    }
    if manager.has_staged().map_err(|err| err.to_string())? {
        return Err("failed reload left a staged config".to_string());
    }
    if sink.labels().last() != Some(&EVENT_PARSE_FAILED) {
        return Err("parse failure not audited".to_string());
    }
    Ok(())
}

#[test]
fn successful_reload_publishes_thresholds() -> TestResult {
    let thresholds = Arc::new(SeverityThresholds::default());
    let manager = manager(&thresholds);
    let mut value = common::minimal_document();
    value["tr_internal"]["logging"] = json!({ "log_threshold": "debug", "console_threshold": "err" });
    reload(&manager, &[common::document("main.cfg", &value)], &RecordingSink::default())
        .map_err(|err| err.to_string())?;
    if thresholds.log_threshold() != Severity::Debug
        || thresholds.console_threshold() != Severity::Err
    {
        return Err("thresholds not published".to_string());
    }
    Ok(())
}

#[test]
fn reload_emits_audit_events_in_order() -> TestResult {
    let thresholds = Arc::new(SeverityThresholds::default());
    let manager = manager(&thresholds);
    let sink = RecordingSink::default();
    let mut value = common::minimal_document();
    value["serial_number"] = json!(7);
    reload(&manager, &[common::document("main.cfg", &value)], &sink)
        .map_err(|err| err.to_string())?;
    let labels = sink.labels();
    let expected = [EVENT_FILE_PARSING, EVENT_REVISION, EVENT_APPLIED, EVENT_COMMUNITY];
    if labels != expected {
        return Err(format!("unexpected events: {}", labels.join(", ")));
    }
    let events = sink.events();
    if events[1].serial_number.as_ref().and_then(serde_json::Number::as_u64) != Some(7) {
        return Err("serial number not recorded".to_string());
    }
    if !events[3].message.contains("@idp.example.org") {
        return Err("community event lacks member realms".to_string());
    }
    Ok(())
}

#[test]
fn invalid_reload_emits_invalid_event() -> TestResult {
    let thresholds = Arc::new(SeverityThresholds::default());
    let manager = manager(&thresholds);
    let sink = RecordingSink::default();
    common::expect_kind(
        reload(&manager, &[common::document("empty.cfg", &json!({}))], &sink),
        "validation",
    )?;
    if sink.labels() != [EVENT_FILE_PARSING, EVENT_INVALID] {
        return Err(format!("unexpected events: {}", sink.labels().join(", ")));
    }
    if manager.active().is_some() {
        return Err("invalid config promoted".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

#[test]
fn discovery_orders_files_and_skips_hidden() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let write = |name: &str, contents: &str| {
        fs::write(dir.path().join(name), contents).map_err(|err| err.to_string())
    };
    write("b.cfg", "{}")?;
    write("a.cfg", "{}")?;
    write(".hidden.cfg", "{}")?;
    write("notes.txt", "{}")?;
    write("Z.cfg", "{}")?;
    fs::create_dir(dir.path().join("dir.cfg")).map_err(|err| err.to_string())?;

    let files = find_config_files(dir.path()).map_err(|err| err.to_string())?;
    let names: Vec<String> = files
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    if names != ["Z.cfg", "a.cfg", "b.cfg"] {
        return Err(format!("unexpected files: {}", names.join(", ")));
    }
    Ok(())
}

#[test]
fn directory_reload_merges_in_name_order() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    fs::write(dir.path().join("10-main.cfg"), common::minimal_document().to_string())
        .map_err(|err| err.to_string())?;
    fs::write(
        dir.path().join("20-override.cfg"),
        json!({ "tr_internal": { "hostname": "override.example.org" } }).to_string(),
    )
    .map_err(|err| err.to_string())?;

    let documents = load_documents_from_dir(dir.path()).map_err(|err| err.to_string())?;
    let config = load_config(&documents, &RecordingSink::default()).map_err(|err| err.to_string())?;
    if config.internal().hostname != Some(Name::from("override.example.org")) {
        return Err("later file did not override hostname".to_string());
    }
    Ok(())
}

#[test]
fn read_document_keeps_file_name_and_text() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("10-main.cfg");
    let text = common::minimal_document().to_string();
    fs::write(&path, &text).map_err(|err| err.to_string())?;
    let document = ConfigDocument::read(&path).map_err(|err| err.to_string())?;
    if document.name() != "10-main.cfg" || document.contents() != text {
        return Err("document name or text not preserved".to_string());
    }
    Ok(())
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("big.cfg");
    fs::write(&path, " ".repeat(MAX_CONFIG_FILE_SIZE + 1)).map_err(|err| err.to_string())?;
    common::expect_kind(ConfigDocument::read(&path), "no_parse")
}

#[test]
fn empty_directory_is_bad_params() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let documents = load_documents_from_dir(dir.path()).map_err(|err| err.to_string())?;
    common::expect_kind(load_config(&documents, &RecordingSink::default()), "bad_params")
}

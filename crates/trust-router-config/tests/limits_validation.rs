//! Limits validation tests for trust-router-config.
// trust-router-config/tests/limits_validation.rs
// =============================================================================
// Module: Limits Validation Tests
// Description: MAX_* bound enforcement for every bounded collection.
// Purpose: Ensure a bound is accepted at MAX and rejected at MAX + 1.
// =============================================================================

use serde_json::Value;
use serde_json::json;
use trust_router_config::parse_constraint;
use trust_router_config::parse_filter;
use trust_router_config::parse_rp_client;
use trust_router_core::ConstraintKind;
use trust_router_core::MAX_CONST_MATCHES;
use trust_router_core::MAX_FILTER_LINES;
use trust_router_core::MAX_FILTER_SPECS;
use trust_router_core::MAX_GSS_NAMES;

mod common;

use common::TestResult;

/// Returns a filter spec matching any example.org realm.
fn spec() -> Value {
    json!({ "field": "rp_realm", "match": "*.example.org" })
}

/// Returns an accept line holding `count` specs.
fn line_with_specs(count: usize) -> Value {
    json!({ "action": "accept", "filter_specs": vec![spec(); count] })
}

/// Returns an `rp_permitted` filter holding `count` lines.
fn filter_with_lines(count: usize) -> Value {
    json!({ "type": "rp_permitted", "filter_lines": vec![line_with_specs(1); count] })
}

// ============================================================================
// SECTION: GSS Names
// ============================================================================

#[test]
fn gss_names_at_max_gss_names_5() -> TestResult {
    let client = json!({
        "gss_names": common::strings("rp", MAX_GSS_NAMES),
        "filter": common::accept_all_filter()
    });
    let client = parse_rp_client(&client).map_err(|err| err.to_string())?;
    if client.gss_names().count() != MAX_GSS_NAMES {
        return Err("gss names were dropped".to_string());
    }
    Ok(())
}

#[test]
fn gss_names_exceeds_max_gss_names_6() -> TestResult {
    let client = json!({
        "gss_names": common::strings("rp", MAX_GSS_NAMES + 1),
        "filter": common::accept_all_filter()
    });
    common::expect_kind(parse_rp_client(&client), "no_parse")
}

#[test]
fn gss_names_empty_rejected() -> TestResult {
    let client = json!({ "gss_names": [], "filter": common::accept_all_filter() });
    common::expect_kind(parse_rp_client(&client), "no_parse")
}

// ============================================================================
// SECTION: Filter Lines and Specs
// ============================================================================

#[test]
fn filter_lines_at_max_filter_lines_8() -> TestResult {
    let filter = parse_filter(&filter_with_lines(MAX_FILTER_LINES)).map_err(|err| err.to_string())?;
    if filter.lines().len() != MAX_FILTER_LINES {
        return Err("filter lines were dropped".to_string());
    }
    Ok(())
}

#[test]
fn filter_lines_exceeds_max_filter_lines_9() -> TestResult {
    common::expect_kind(parse_filter(&filter_with_lines(MAX_FILTER_LINES + 1)), "no_parse")
}

#[test]
fn filter_specs_at_max_filter_specs_8() -> TestResult {
    let filter = json!({
        "type": "rp_permitted",
        "filter_lines": [line_with_specs(MAX_FILTER_SPECS)]
    });
    let filter = parse_filter(&filter).map_err(|err| err.to_string())?;
    if filter.lines()[0].specs().len() != MAX_FILTER_SPECS {
        return Err("filter specs were dropped".to_string());
    }
    Ok(())
}

#[test]
fn filter_specs_exceeds_max_filter_specs_9() -> TestResult {
    let filter = json!({
        "type": "rp_permitted",
        "filter_lines": [line_with_specs(MAX_FILTER_SPECS + 1)]
    });
    common::expect_kind(parse_filter(&filter), "no_parse")
}

// ============================================================================
// SECTION: Constraints
// ============================================================================

#[test]
fn constraint_at_max_const_matches_24() -> TestResult {
    let patterns = Value::Array(common::strings("realm", MAX_CONST_MATCHES));
    let constraint =
        parse_constraint(ConstraintKind::Realm, &patterns).map_err(|err| err.to_string())?;
    if constraint.matches().len() != MAX_CONST_MATCHES {
        return Err("constraint patterns were dropped".to_string());
    }
    Ok(())
}

#[test]
fn constraint_exceeds_max_const_matches_25() -> TestResult {
    let patterns = Value::Array(common::strings("realm", MAX_CONST_MATCHES + 1));
    common::expect_kind(parse_constraint(ConstraintKind::Domain, &patterns), "no_parse")
}

#[test]
fn oversized_line_constraint_fails_the_whole_filter() -> TestResult {
    let filter = json!({
        "type": "rp_permitted",
        "filter_lines": [{
            "action": "accept",
            "filter_specs": [spec()],
            "domain_constraints": common::strings("domain", MAX_CONST_MATCHES + 1)
        }]
    });
    common::expect_kind(parse_filter(&filter), "no_parse")
}

// trust-router-config/src/parse.rs
// ============================================================================
// Module: Trust Router Config Parsers
// Description: JSON decoders for every configuration entity.
// Purpose: Turn untrusted JSON documents into bounded model values.
// Dependencies: serde_json, trust-router-core
// ============================================================================

//! ## Overview
//! Each parser decodes one entity from a [`serde_json::Value`] and either
//! returns a complete value or a [`ConfigError`] naming the offending location
//! as a `$`-rooted path. Array lengths are checked against their bounds before
//! any element is converted. No parser ever returns a partially-built entity.
//!
//! Security posture: configuration documents are untrusted input and every
//! parser fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use trust_router_core::AaaServer;
use trust_router_core::Apc;
use trust_router_core::CommunityDecl;
use trust_router_core::CommunityKind;
use trust_router_core::Constraint;
use trust_router_core::ConstraintKind;
use trust_router_core::DEFAULT_EXPIRATION_INTERVAL;
use trust_router_core::Filter;
use trust_router_core::FilterAction;
use trust_router_core::FilterKind;
use trust_router_core::FilterLine;
use trust_router_core::FilterSpec;
use trust_router_core::IdpRealm;
use trust_router_core::InternalSettings;
use trust_router_core::MAX_CONST_MATCHES;
use trust_router_core::MAX_EXPIRATION_INTERVAL;
use trust_router_core::MAX_FILTER_LINES;
use trust_router_core::MAX_FILTER_SPECS;
use trust_router_core::MAX_GSS_NAMES;
use trust_router_core::ModelError;
use trust_router_core::Name;
use trust_router_core::RpClient;
use trust_router_core::Severity;
use trust_router_core::TrustConfigBuilder;
use trust_router_core::clamp_expiration_interval;

use crate::error::ConfigError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Root of every reported path.
const ROOT: &str = "$";

/// JSON object type.
type Object = Map<String, Value>;

// ============================================================================
// SECTION: Document Fragments
// ============================================================================

/// Entities decoded from one configuration document.
///
/// Lists keep the order in which entries appear in the document.
#[derive(Debug, Clone, Default)]
pub struct ConfigFragment {
    /// Revision number, when the document declares a numeric one.
    pub serial_number: Option<Number>,
    /// Internal settings, when the document has a `tr_internal` section.
    pub internal: Option<InternalSettings>,
    /// RP clients.
    pub rp_clients: Vec<RpClient>,
    /// IdP realms.
    pub idp_realms: Vec<IdpRealm>,
    /// Default AAA servers.
    pub default_servers: Vec<AaaServer>,
    /// Community declarations.
    pub communities: Vec<CommunityDecl>,
}

impl ConfigFragment {
    /// Moves every decoded entity into `builder`.
    pub fn merge_into(self, builder: &mut TrustConfigBuilder) {
        if let Some(internal) = self.internal {
            builder.apply_internal(internal);
        }
        self.rp_clients.into_iter().for_each(|client| builder.add_rp_client(client));
        self.idp_realms.into_iter().for_each(|realm| builder.add_idp_realm(realm));
        self.default_servers.into_iter().for_each(|server| builder.add_default_server(server));
        self.communities.into_iter().for_each(|community| builder.add_community(community));
    }
}

/// Decodes a whole configuration document.
///
/// # Errors
///
/// Returns [`ConfigError::NoParse`] when any section is malformed.
pub fn parse_document(value: &Value) -> Result<ConfigFragment, ConfigError> {
    let object = as_object(value, ROOT)?;
    let serial_number = object.get("serial_number").and_then(Value::as_number).cloned();
    let internal = object
        .get("tr_internal")
        .map(|section| parse_internal_at(section, &child(ROOT, "tr_internal")))
        .transpose()?;
    let rp_clients = parse_list(object, "rp_clients", parse_rp_client_at)?;
    let idp_realms = parse_list(object, "idp_realms", parse_idp_realm_at)?;
    let default_servers = parse_list(object, "default_servers", parse_aaa_server_at)?;
    let communities = parse_list(object, "communities", parse_community_at)?;
    Ok(ConfigFragment {
        serial_number,
        internal,
        rp_clients,
        idp_realms,
        default_servers,
        communities,
    })
}

/// Decodes an optional top-level list with `parse_entry`.
fn parse_list<T>(
    object: &Object,
    key: &str,
    parse_entry: fn(&Value, &str) -> Result<T, ConfigError>,
) -> Result<Vec<T>, ConfigError> {
    let Some(value) = object.get(key) else {
        return Ok(Vec::new());
    };
    let path = child(ROOT, key);
    array(value, &path)?
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(entry, &item(&path, index)))
        .collect()
}

// ============================================================================
// SECTION: Constraints and Filters
// ============================================================================

/// Decodes a constraint pattern array.
///
/// # Errors
///
/// Returns [`ConfigError::NoParse`] when the value is not a non-empty array of
/// at most [`MAX_CONST_MATCHES`] strings.
pub fn parse_constraint(kind: ConstraintKind, value: &Value) -> Result<Constraint, ConfigError> {
    parse_constraint_at(kind, value, ROOT)
}

/// Decodes a constraint pattern array found at `path`.
fn parse_constraint_at(
    kind: ConstraintKind,
    value: &Value,
    path: &str,
) -> Result<Constraint, ConfigError> {
    let entries = array(value, path)?;
    check_len(entries, path, MAX_CONST_MATCHES)?;
    let matches = string_list(entries, path)?;
    Constraint::new(kind, matches).map_err(|err| ConfigError::model(path, err))
}

/// Decodes an optional constraint; an absent or empty array means none.
fn optional_constraint(
    line: &Object,
    key: &str,
    kind: ConstraintKind,
    path: &str,
) -> Result<Option<Constraint>, ConfigError> {
    let Some(value) = line.get(key) else {
        return Ok(None);
    };
    let path = child(path, key);
    if array(value, &path)?.is_empty() {
        return Ok(None);
    }
    parse_constraint_at(kind, value, &path).map(Some)
}

/// Decodes a filter object.
///
/// # Errors
///
/// Returns [`ConfigError::NoParse`] when the filter type is not
/// `rp_permitted` or any line is malformed.
pub fn parse_filter(value: &Value) -> Result<Filter, ConfigError> {
    parse_filter_at(value, ROOT)
}

/// Decodes a filter object found at `path`.
fn parse_filter_at(value: &Value, path: &str) -> Result<Filter, ConfigError> {
    let object = as_object(value, path)?;
    let type_path = child(path, "type");
    let label = string_at(required(object, "type", path)?, &type_path)?;
    let lines_path = child(path, "filter_lines");
    let lines = array(required(object, "filter_lines", path)?, &lines_path)?;
    check_len(lines, &lines_path, MAX_FILTER_LINES)?;
    let kind = FilterKind::from_label(label)
        .ok_or_else(|| ConfigError::no_parse(&type_path, format!("unknown filter type {label}")))?;
    let lines = lines
        .iter()
        .enumerate()
        .map(|(index, line)| parse_filter_line(line, &item(&lines_path, index)))
        .collect::<Result<Vec<_>, _>>()?;
    Filter::new(kind, lines).map_err(|err| ConfigError::model(&lines_path, err))
}

/// Decodes one filter line.
fn parse_filter_line(value: &Value, path: &str) -> Result<FilterLine, ConfigError> {
    let object = as_object(value, path)?;
    let action_path = child(path, "action");
    let label = string_at(required(object, "action", path)?, &action_path)?;
    let action = FilterAction::from_label(label).ok_or_else(|| {
        ConfigError::no_parse(&action_path, format!("unknown filter action {label}"))
    })?;
    let specs_path = child(path, "filter_specs");
    let specs = array(required(object, "filter_specs", path)?, &specs_path)?;
    check_len(specs, &specs_path, MAX_FILTER_SPECS)?;
    let realm_constraint =
        optional_constraint(object, "realm_constraints", ConstraintKind::Realm, path)?;
    let domain_constraint =
        optional_constraint(object, "domain_constraints", ConstraintKind::Domain, path)?;
    let specs = specs
        .iter()
        .enumerate()
        .map(|(index, spec)| parse_filter_spec(spec, &item(&specs_path, index)))
        .collect::<Result<Vec<_>, _>>()?;
    FilterLine::new(action, specs, realm_constraint, domain_constraint)
        .map_err(|err| ConfigError::model(&specs_path, err))
}

/// Decodes one `{field, match}` filter spec.
fn parse_filter_spec(value: &Value, path: &str) -> Result<FilterSpec, ConfigError> {
    let object = as_object(value, path)?;
    let field_path = child(path, "field");
    let match_path = child(path, "match");
    let field = name_at(required(object, "field", path)?, &field_path)?;
    let pattern = name_at(required(object, "match", path)?, &match_path)?;
    let empty_path = if field.is_empty() { field_path } else { match_path };
    FilterSpec::new(field, pattern).map_err(|err| ConfigError::model(&empty_path, err))
}

// ============================================================================
// SECTION: RP Clients
// ============================================================================

/// Decodes an RP client.
///
/// # Errors
///
/// Returns [`ConfigError::NoParse`] when the GSS names or filter are invalid.
pub fn parse_rp_client(value: &Value) -> Result<RpClient, ConfigError> {
    parse_rp_client_at(value, ROOT)
}

/// Decodes an RP client found at `path`.
fn parse_rp_client_at(value: &Value, path: &str) -> Result<RpClient, ConfigError> {
    let object = as_object(value, path)?;
    let names_path = child(path, "gss_names");
    let names = array(required(object, "gss_names", path)?, &names_path)?;
    let filter = required(object, "filter", path)?;
    check_len(names, &names_path, MAX_GSS_NAMES)?;
    let filter = parse_filter_at(filter, &child(path, "filter"))?;
    let gss_names = string_list(names, &names_path)?;
    RpClient::new(gss_names, filter).map_err(|err| ConfigError::model(&names_path, err))
}

// ============================================================================
// SECTION: AAA Servers and APCs
// ============================================================================

/// Decodes one AAA server hostname.
///
/// # Errors
///
/// Returns [`ConfigError::NoParse`] when the entry is not a string.
pub fn parse_aaa_server(value: &Value) -> Result<AaaServer, ConfigError> {
    parse_aaa_server_at(value, ROOT)
}

/// Decodes one AAA server hostname found at `path`.
fn parse_aaa_server_at(value: &Value, path: &str) -> Result<AaaServer, ConfigError> {
    name_at(value, path).map(AaaServer::new)
}

/// Decodes an array of AAA server hostnames.
///
/// # Errors
///
/// Returns [`ConfigError::NoParse`] when the value is not an array of strings.
pub fn parse_aaa_servers(value: &Value) -> Result<Vec<AaaServer>, ConfigError> {
    parse_aaa_servers_at(value, ROOT)
}

/// Decodes an array of AAA server hostnames found at `path`.
fn parse_aaa_servers_at(value: &Value, path: &str) -> Result<Vec<AaaServer>, ConfigError> {
    array(value, path)?
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_aaa_server_at(entry, &item(path, index)))
        .collect()
}

/// Decodes an APC array. Only the first entry is used; an empty array
/// yields no APC.
///
/// # Errors
///
/// Returns [`ConfigError::NoParse`] when the value is not an array or its
/// first entry is not a string.
pub fn parse_apcs(value: &Value) -> Result<Option<Apc>, ConfigError> {
    parse_apcs_at(value, ROOT)
}

/// Decodes an APC array found at `path`.
fn parse_apcs_at(value: &Value, path: &str) -> Result<Option<Apc>, ConfigError> {
    let entries = array(value, path)?;
    entries.first().map(|first| name_at(first, &item(path, 0)).map(Apc::new)).transpose()
}

// ============================================================================
// SECTION: IdP Realms
// ============================================================================

/// Decodes an IdP realm.
///
/// # Errors
///
/// Returns [`ConfigError::NoParse`] when required fields are missing or
/// mistyped.
pub fn parse_idp_realm(value: &Value) -> Result<IdpRealm, ConfigError> {
    parse_idp_realm_at(value, ROOT)
}

/// Decodes an IdP realm found at `path`.
fn parse_idp_realm_at(value: &Value, path: &str) -> Result<IdpRealm, ConfigError> {
    let object = as_object(value, path)?;
    let remote = match object.get("remote") {
        None => false,
        Some(flag) => flag
            .as_number()
            .ok_or_else(|| ConfigError::no_parse(child(path, "remote"), "expected a number"))?
            .as_f64()
            .is_some_and(|flag| flag != 0.0),
    };
    let id = name_at(required(object, "realm_id", path)?, &child(path, "realm_id"))?;
    let apc = object
        .get("apcs")
        .map(|apcs| parse_apcs_at(apcs, &child(path, "apcs")))
        .transpose()?
        .flatten();
    if remote {
        return Ok(IdpRealm::remote(id, apc));
    }
    let shared_config =
        string_at(required(object, "shared_config", path)?, &child(path, "shared_config"))?
            != "no";
    let servers_path = child(path, "aaa_servers");
    let aaa_servers = parse_aaa_servers_at(required(object, "aaa_servers", path)?, &servers_path)?;
    IdpRealm::local(id, shared_config, aaa_servers, apc)
        .map_err(|err| ConfigError::model(&servers_path, err))
}

// ============================================================================
// SECTION: Communities
// ============================================================================

/// Decodes a community declaration.
///
/// Membership is resolved later, against every realm of the reload pass.
///
/// # Errors
///
/// Returns [`ConfigError::NoParse`] when required fields are missing or
/// mistyped, the type is unknown, or a COI lacks an APC.
pub fn parse_community(value: &Value) -> Result<CommunityDecl, ConfigError> {
    parse_community_at(value, ROOT)
}

/// Decodes a community declaration found at `path`.
fn parse_community_at(value: &Value, path: &str) -> Result<CommunityDecl, ConfigError> {
    let object = as_object(value, path)?;
    let id = name_at(required(object, "community_id", path)?, &child(path, "community_id"))?;
    let type_path = child(path, "type");
    let label = string_at(required(object, "type", path)?, &type_path)?;
    let apcs_path = child(path, "apcs");
    let apcs = required(object, "apcs", path)?;
    array(apcs, &apcs_path)?;
    let idps_path = child(path, "idp_realms");
    let idps = array(required(object, "idp_realms", path)?, &idps_path)?;
    let rps_path = child(path, "rp_realms");
    let rps = array(required(object, "rp_realms", path)?, &rps_path)?;

    let kind = match label {
        "apc" => CommunityKind::Apc {
            expiration_interval: parse_expiration_interval(
                object.get("expiration_interval"),
                &child(path, "expiration_interval"),
            )?,
        },
        "coi" => {
            let apc = parse_apcs_at(apcs, &apcs_path)?.ok_or_else(|| {
                ConfigError::model(&apcs_path, ModelError::MissingApc {
                    community: id.to_string(),
                })
            })?;
            CommunityKind::Coi {
                apc,
            }
        }
        other => {
            return Err(ConfigError::no_parse(type_path, format!("unknown community type {other}")));
        }
    };

    Ok(CommunityDecl {
        id,
        kind,
        idp_realms: string_list(idps, &idps_path)?,
        rp_realms: string_list(rps, &rps_path)?,
    })
}

/// Decodes and clamps an APC expiration interval.
fn parse_expiration_interval(value: Option<&Value>, path: &str) -> Result<u32, ConfigError> {
    let Some(value) = value else {
        return Ok(DEFAULT_EXPIRATION_INTERVAL);
    };
    if let Some(minutes) = value.as_i64() {
        return Ok(clamp_expiration_interval(minutes));
    }
    if value.is_u64() {
        return Ok(MAX_EXPIRATION_INTERVAL);
    }
    Err(ConfigError::no_parse(path, "expected an integer"))
}

// ============================================================================
// SECTION: Internal Settings
// ============================================================================

/// Decodes a `tr_internal` section. Absent fields take their defaults.
///
/// # Errors
///
/// Returns [`ConfigError::NoParse`] when a present field has the wrong type.
pub fn parse_internal(value: &Value) -> Result<InternalSettings, ConfigError> {
    parse_internal_at(value, ROOT)
}

/// Decodes a `tr_internal` section found at `path`.
fn parse_internal_at(value: &Value, path: &str) -> Result<InternalSettings, ConfigError> {
    let object = as_object(value, path)?;
    let defaults = InternalSettings::default();
    let hostname = object
        .get("hostname")
        .map(|hostname| name_at(hostname, &child(path, "hostname")))
        .transpose()?;
    let (log_threshold, console_threshold) = match object.get("logging") {
        None => (defaults.log_threshold, defaults.console_threshold),
        Some(logging) => {
            let logging_path = child(path, "logging");
            let logging = as_object(logging, &logging_path)?;
            (
                severity(logging, "log_threshold", &logging_path, defaults.log_threshold)?,
                severity(logging, "console_threshold", &logging_path, defaults.console_threshold)?,
            )
        }
    };
    Ok(InternalSettings {
        hostname,
        max_tree_depth: integer(object, "max_tree_depth", path, defaults.max_tree_depth)?,
        tids_port: integer(object, "tids_port", path, defaults.tids_port)?,
        trps_port: integer(object, "trps_port", path, defaults.trps_port)?,
        cfg_poll_interval: integer(object, "cfg_poll_interval", path, defaults.cfg_poll_interval)?,
        cfg_settling_time: integer(object, "cfg_settling_time", path, defaults.cfg_settling_time)?,
        trp_connect_interval: integer(
            object,
            "trp_connect_interval",
            path,
            defaults.trp_connect_interval,
        )?,
        trp_sweep_interval: integer(
            object,
            "trp_sweep_interval",
            path,
            defaults.trp_sweep_interval,
        )?,
        trp_update_interval: integer(
            object,
            "trp_update_interval",
            path,
            defaults.trp_update_interval,
        )?,
        log_threshold,
        console_threshold,
    })
}

/// Reads an optional integer setting that must fit `T`.
fn integer<T: TryFrom<u64>>(
    object: &Object,
    key: &str,
    path: &str,
    default: T,
) -> Result<T, ConfigError> {
    let Some(value) = object.get(key) else {
        return Ok(default);
    };
    value.as_u64().and_then(|raw| T::try_from(raw).ok()).ok_or_else(|| {
        ConfigError::no_parse(child(path, key), "expected a non-negative integer in range")
    })
}

/// Reads an optional severity label.
fn severity(
    object: &Object,
    key: &str,
    path: &str,
    default: Severity,
) -> Result<Severity, ConfigError> {
    object.get(key).map_or(Ok(default), |value| {
        string_at(value, &child(path, key)).map(Severity::from_label)
    })
}

// ============================================================================
// SECTION: JSON Helpers
// ============================================================================

/// Returns the path of `key` under `path`.
fn child(path: &str, key: &str) -> String {
    format!("{path}.{key}")
}

/// Returns the path of element `index` under `path`.
fn item(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

/// Requires `value` to be an object.
fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, ConfigError> {
    value.as_object().ok_or_else(|| ConfigError::no_parse(path, "expected an object"))
}

/// Requires `key` to be present in `object`.
fn required<'a>(object: &'a Object, key: &str, path: &str) -> Result<&'a Value, ConfigError> {
    object.get(key).ok_or_else(|| ConfigError::no_parse(child(path, key), "missing required field"))
}

/// Requires `value` to be an array.
fn array<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], ConfigError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ConfigError::no_parse(path, "expected an array"))
}

/// Requires `entries` to hold between one and `max` elements.
fn check_len(entries: &[Value], path: &str, max: usize) -> Result<(), ConfigError> {
    if entries.is_empty() {
        return Err(ConfigError::no_parse(path, "must not be empty"));
    }
    if entries.len() > max {
        return Err(ConfigError::no_parse(
            path,
            format!("has {} entries, maximum is {max}", entries.len()),
        ));
    }
    Ok(())
}

/// Requires `value` to be a string.
fn string_at<'a>(value: &'a Value, path: &str) -> Result<&'a str, ConfigError> {
    value.as_str().ok_or_else(|| ConfigError::no_parse(path, "expected a string"))
}

/// Requires `value` to be a string and converts it to a [`Name`].
fn name_at(value: &Value, path: &str) -> Result<Name, ConfigError> {
    string_at(value, path).map(Name::from)
}

/// Converts every element of `entries` to a [`Name`].
fn string_list(entries: &[Value], path: &str) -> Result<Vec<Name>, ConfigError> {
    entries.iter().enumerate().map(|(index, entry)| name_at(entry, &item(path, index))).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

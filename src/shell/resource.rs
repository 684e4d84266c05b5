//! Handlers for the `resource-*` subcommands.
//!
//! Handlers validate user input, raising [`ShellError::Command`] before any
//! request, then call the resource manager and print the result.

use std::io::Write;

use clap::ArgMatches;
use serde_json::{Map, Value};

use crate::clients::Transport;
use crate::rest::resources::{
    Resource, DETAILED_RESOURCE_FIELDS, RESOURCE_LIST_FIELDS, RESOURCE_SORT_FIELDS,
};
use crate::rest::{
    build_patch, field_names, invalid_fields, label_for, resolve_field, ListParams, PatchOp,
    ResourceManager, SortDir,
};
use crate::shell::commands::{
    PARAMETER_ATTRIBUTES, PARAMETER_DESCRIPTION, PARAMETER_DETAIL, PARAMETER_FIELDS,
    PARAMETER_LIMIT, PARAMETER_MARKER, PARAMETER_OP, PARAMETER_RESOURCE, PARAMETER_SORT_DIR,
    PARAMETER_SORT_KEY, PARAMETER_TYPE, PARAMETER_UUID,
};
use crate::shell::format::{print_dict, print_list, OutputFormat};
use crate::shell::errors::ShellError;

/// Fields printed after `resource-create`.
const CREATED_FIELDS: &[&str] = &["description", "type", "attributes", "uuid"];

fn check_empty_arg(value: &str, name: &str) -> Result<(), ShellError> {
    if value.trim().is_empty() {
        return Err(ShellError::Command(format!("{name} must not be empty")));
    }
    Ok(())
}

fn check_for_invalid_fields(fields: &[String]) -> Result<(), ShellError> {
    let invalid = invalid_fields(fields, DETAILED_RESOURCE_FIELDS);
    if invalid.is_empty() {
        return Ok(());
    }
    Err(ShellError::Command(format!(
        "Invalid field(s) requested: {}. Valid fields are: {}.",
        invalid.join(", "),
        field_names(DETAILED_RESOURCE_FIELDS).join(", ")
    )))
}

fn requested_fields(matches: &ArgMatches) -> Option<Vec<String>> {
    matches
        .get_many::<String>(PARAMETER_FIELDS)
        .map(|values| values.cloned().collect())
}

/// Translates the paging and sorting options into list parameters.
fn common_params_for_list(matches: &ArgMatches) -> Result<ListParams, ShellError> {
    let limit = match matches.get_one::<i64>(PARAMETER_LIMIT) {
        None => None,
        Some(&limit) => Some(u32::try_from(limit).map_err(|_| {
            ShellError::Command("Expected non-negative --limit".to_string())
        })?),
    };

    let sort_key = match matches.get_one::<String>(PARAMETER_SORT_KEY) {
        None => None,
        Some(key) => {
            let resolved = resolve_field(RESOURCE_SORT_FIELDS, key)
                .ok_or_else(|| {
                    ShellError::Command(format!(
                        "{key} is an invalid field for sorting, valid values for --sort-key are: {}",
                        field_names(RESOURCE_SORT_FIELDS).join(", ")
                    ))
                })?;
            Some(resolved.to_string())
        }
    };

    let sort_dir = matches
        .get_one::<String>(PARAMETER_SORT_DIR)
        .map(|dir| dir.parse::<SortDir>())
        .transpose()
        .map_err(ShellError::Command)?;

    Ok(ListParams {
        marker: matches.get_one::<String>(PARAMETER_MARKER).cloned(),
        limit,
        sort_key,
        sort_dir,
        ..Default::default()
    })
}

/// Splits `key=value` attributes into an object. Values are decoded as JSON
/// when possible and kept as strings otherwise.
fn args_array_to_dict<'a>(
    entries: impl IntoIterator<Item = &'a String>,
) -> Result<Map<String, Value>, ShellError> {
    let mut attributes = Map::new();
    for entry in entries {
        let (key, raw) = entry.split_once('=').ok_or_else(|| {
            ShellError::Command(format!(
                "Attributes must be a list of KEY=VALUE not \"{entry}\""
            ))
        })?;
        if key.is_empty() {
            return Err(ShellError::Command(format!(
                "Attributes must be a list of KEY=VALUE not \"{entry}\""
            )));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        attributes.insert(key.to_string(), value);
    }
    Ok(attributes)
}

/// `resource-show <resource> [--fields ...]`
///
/// # Errors
///
/// Returns [`ShellError::Command`] for an empty identifier or unknown
/// field, or the manager's error.
pub async fn do_resource_show<T: Transport, W: Write>(
    manager: &ResourceManager<'_, Resource, T>,
    matches: &ArgMatches,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), ShellError> {
    let id = matches
        .get_one::<String>(PARAMETER_RESOURCE)
        .map_or("", String::as_str);
    check_empty_arg(id, "<resource>")?;

    let fields = requested_fields(matches);
    if let Some(fields) = &fields {
        check_for_invalid_fields(fields)?;
    }

    let resource = manager.get(id, fields.as_deref()).await?;

    let shown: Vec<&str> = match &fields {
        Some(fields) => fields.iter().map(String::as_str).collect(),
        None => field_names(DETAILED_RESOURCE_FIELDS),
    };
    print_dict(out, &resource, &shown, format)
}

/// `resource-list [--detail | --fields ...] [--limit N] [--marker UUID]
/// [--sort-key K] [--sort-dir asc|desc]`
///
/// # Errors
///
/// Returns [`ShellError::Command`] for invalid options, or the manager's
/// error (including `--detail` combined with `--fields`).
pub async fn do_resource_list<T: Transport, W: Write>(
    manager: &ResourceManager<'_, Resource, T>,
    matches: &ArgMatches,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), ShellError> {
    let detail = matches.get_flag(PARAMETER_DETAIL);
    let requested = requested_fields(matches);

    let mut params = common_params_for_list(matches)?;
    params.detail = detail;

    let (fields, labels): (Vec<&str>, Vec<&str>) = if detail {
        DETAILED_RESOURCE_FIELDS.iter().map(|f| (f.name, f.label)).unzip()
    } else if let Some(requested) = &requested {
        check_for_invalid_fields(requested)?;
        requested
            .iter()
            .map(|name| (name.as_str(), label_for(DETAILED_RESOURCE_FIELDS, name)))
            .unzip()
    } else {
        RESOURCE_LIST_FIELDS.iter().map(|f| (f.name, f.label)).unzip()
    };
    params.fields = requested.clone();

    let resources = manager.list(&params).await?;
    print_list(out, &resources, &fields, &labels, format)
}

/// `resource-create [-d DESC] [-t TYPE] [-a KEY=VALUE ...] [-u UUID]`
///
/// # Errors
///
/// Returns [`ShellError::Command`] for a malformed attribute, or the
/// manager's error.
pub async fn do_resource_create<T: Transport, W: Write>(
    manager: &ResourceManager<'_, Resource, T>,
    matches: &ArgMatches,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), ShellError> {
    let mut body = Map::new();
    for (parameter, key) in [
        (PARAMETER_DESCRIPTION, "description"),
        (PARAMETER_TYPE, "type"),
        (PARAMETER_UUID, "uuid"),
    ] {
        if let Some(value) = matches.get_one::<String>(parameter) {
            body.insert(key.to_string(), Value::String(value.clone()));
        }
    }
    if let Some(entries) = matches.get_many::<String>(PARAMETER_ATTRIBUTES) {
        body.insert(
            "attributes".to_string(),
            Value::Object(args_array_to_dict(entries)?),
        );
    }

    let resource = manager.create(body).await?;
    print_dict(out, &resource, CREATED_FIELDS, format)
}

/// `resource-delete <resource>...`
///
/// Resources are deleted in order; the first failure stops the command.
///
/// # Errors
///
/// Returns [`ShellError::Command`] for an empty identifier, or the
/// manager's error.
pub async fn do_resource_delete<T: Transport, W: Write>(
    manager: &ResourceManager<'_, Resource, T>,
    matches: &ArgMatches,
    out: &mut W,
) -> Result<(), ShellError> {
    let ids: Vec<&String> = matches
        .get_many::<String>(PARAMETER_RESOURCE)
        .map(Iterator::collect)
        .unwrap_or_default();

    for id in ids {
        check_empty_arg(id, "<resource>")?;
        manager.delete(id).await?;
        writeln!(out, "Deleted resource {id}")?;
    }
    Ok(())
}

/// `resource-update <resource> <op> <path=value>...`
///
/// # Errors
///
/// Returns [`ShellError::Command`] for an empty identifier or unknown
/// operation, or the manager's error for a malformed entry.
pub async fn do_resource_update<T: Transport, W: Write>(
    manager: &ResourceManager<'_, Resource, T>,
    matches: &ArgMatches,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), ShellError> {
    let id = matches
        .get_one::<String>(PARAMETER_RESOURCE)
        .map_or("", String::as_str);
    check_empty_arg(id, "<resource>")?;

    let op = matches
        .get_one::<String>(PARAMETER_OP)
        .map_or("", String::as_str)
        .parse::<PatchOp>()
        .map_err(ShellError::Command)?;
    let entries: Vec<&String> = matches
        .get_many::<String>(PARAMETER_ATTRIBUTES)
        .map(Iterator::collect)
        .unwrap_or_default();

    let patch = build_patch(op, &entries)?;
    let resource = manager.update(id, &patch).await?;
    print_dict(out, &resource, &field_names(DETAILED_RESOURCE_FIELDS), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, HttpMethod, HttpResponse};
    use crate::config::ApiVersion;
    use crate::shell::commands::CommandRegistry;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers every request with the same body, recording method and path.
    struct EchoTransport {
        body: Value,
        calls: Mutex<Vec<(HttpMethod, String, Option<Value>)>>,
    }

    impl EchoTransport {
        fn new(body: Value) -> Self {
            Self {
                body,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(HttpMethod, String, Option<Value>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Transport for EchoTransport {
        async fn request(
            &self,
            method: HttpMethod,
            path: &str,
            body: Option<Value>,
        ) -> Result<HttpResponse, HttpError> {
            self.calls
                .lock()
                .unwrap()
                .push((method, path.to_string(), body));
            Ok(HttpResponse::new(200, HashMap::new(), self.body.clone()))
        }
    }

    fn sub_matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["arsenal"];
        argv.extend_from_slice(args);
        let matches = CommandRegistry::new()
            .cli()
            .try_get_matches_from(argv)
            .unwrap();
        matches.subcommand().unwrap().1.clone()
    }

    async fn run_list(transport: &EchoTransport, args: &[&str]) -> Result<String, ShellError> {
        let manager = ResourceManager::new(transport, &ApiVersion::V1_1);
        let mut argv = vec!["resource-list"];
        argv.extend_from_slice(args);
        let mut out = Vec::new();
        do_resource_list(&manager, &sub_matches(&argv), OutputFormat::Json, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_show_prints_requested_fields() {
        let transport = EchoTransport::new(json!({"uuid": "abc", "description": "rack"}));
        let manager = ResourceManager::new(&transport, &ApiVersion::V1_1);
        let mut out = Vec::new();

        do_resource_show(
            &manager,
            &sub_matches(&["resource-show", "abc", "--fields", "uuid", "description"]),
            OutputFormat::Json,
            &mut out,
        )
        .await
        .unwrap();

        let printed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed, json!({"uuid": "abc", "description": "rack"}));
        assert_eq!(transport.calls()[0].1, "/v1/resources/abc?fields=uuid,description");
    }

    #[tokio::test]
    async fn test_show_rejects_empty_id_and_bad_fields() {
        let transport = EchoTransport::new(json!({}));
        let manager = ResourceManager::new(&transport, &ApiVersion::V1_1);
        let mut out = Vec::new();

        let empty = do_resource_show(&manager, &sub_matches(&["resource-show", ""]), OutputFormat::Table, &mut out).await;
        assert!(matches!(empty, Err(ShellError::Command(m)) if m == "<resource> must not be empty"));

        let bad = do_resource_show(
            &manager,
            &sub_matches(&["resource-show", "abc", "--fields", "colour"]),
            OutputFormat::Table,
            &mut out,
        )
        .await;
        assert!(matches!(bad, Err(ShellError::Command(m)) if m.starts_with("Invalid field(s) requested: colour.")));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_resolves_sort_key_label() {
        let transport = EchoTransport::new(json!({"resources": [{"uuid": "a"}]}));

        run_list(&transport, &["--sort-key", "Created At", "--sort-dir", "desc", "--limit", "5"])
            .await
            .unwrap();

        assert_eq!(
            transport.calls()[0].1,
            "/v1/resources/?limit=5&sort_key=created_at&sort_dir=desc"
        );
    }

    #[tokio::test]
    async fn test_list_input_errors() {
        let transport = EchoTransport::new(json!({"resources": []}));

        let negative = run_list(&transport, &["--limit", "-1"]).await;
        assert!(matches!(negative, Err(ShellError::Command(m)) if m == "Expected non-negative --limit"));

        let sort_key = run_list(&transport, &["--sort-key", "attributes"]).await;
        assert!(matches!(sort_key, Err(ShellError::Command(m)) if m.starts_with("attributes is an invalid field for sorting")));

        let sort_dir = run_list(&transport, &["--sort-dir", "up"]).await;
        assert!(matches!(sort_dir, Err(ShellError::Command(_))));

        let both = run_list(&transport, &["--detail", "--fields", "uuid"]).await;
        assert!(matches!(both, Err(ShellError::Resource(_))));

        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_with_fields_prints_only_those() {
        let transport =
            EchoTransport::new(json!({"resources": [{"uuid": "a", "type": "rack", "description": "x"}]}));

        let printed = run_list(&transport, &["--fields", "uuid", "type"]).await.unwrap();

        let value: Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(value, json!([{"uuid": "a", "type": "rack"}]));
        assert_eq!(transport.calls()[0].1, "/v1/resources/?fields=uuid,type");
    }

    #[tokio::test]
    async fn test_create_builds_body() {
        let transport = EchoTransport::new(json!({"uuid": "new", "description": "d"}));
        let manager = ResourceManager::new(&transport, &ApiVersion::V1_1);
        let mut out = Vec::new();

        do_resource_create(
            &manager,
            &sub_matches(&["resource-create", "-d", "d", "-t", "switch", "-a", "ports=48", "-a", "vendor=acme"]),
            OutputFormat::Json,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            transport.calls()[0].2,
            Some(json!({
                "description": "d",
                "type": "switch",
                "attributes": {"ports": 48, "vendor": "acme"},
            }))
        );
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_attribute() {
        let transport = EchoTransport::new(json!({}));
        let manager = ResourceManager::new(&transport, &ApiVersion::V1_1);
        let mut out = Vec::new();

        let result = do_resource_create(
            &manager,
            &sub_matches(&["resource-create", "-a", "ports"]),
            OutputFormat::Json,
            &mut out,
        )
        .await;

        assert!(matches!(result, Err(ShellError::Command(_))));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_each_resource() {
        let transport = EchoTransport::new(Value::Null);
        let manager = ResourceManager::new(&transport, &ApiVersion::V1_1);
        let mut out = Vec::new();

        do_resource_delete(&manager, &sub_matches(&["resource-delete", "a", "b"]), &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Deleted resource a\nDeleted resource b\n"
        );
        let paths: Vec<String> = transport.calls().into_iter().map(|c| c.1).collect();
        assert_eq!(paths, vec!["/v1/resources/a", "/v1/resources/b"]);
    }

    #[tokio::test]
    async fn test_update_unknown_op_is_a_command_error() {
        let transport = EchoTransport::new(json!({}));
        let manager = ResourceManager::new(&transport, &ApiVersion::V1_1);
        let mut out = Vec::new();

        let result = do_resource_update(
            &manager,
            &sub_matches(&["resource-update", "abc", "foo", "description=x"]),
            OutputFormat::Json,
            &mut out,
        )
        .await;

        assert!(matches!(result, Err(ShellError::Command(m)) if m == "Unknown PATCH operation: foo"));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_sends_patch() {
        let transport = EchoTransport::new(json!({"uuid": "abc", "description": "x"}));
        let manager = ResourceManager::new(&transport, &ApiVersion::V1_1);
        let mut out = Vec::new();

        do_resource_update(
            &manager,
            &sub_matches(&["resource-update", "abc", "add", "description=x"]),
            OutputFormat::Json,
            &mut out,
        )
        .await
        .unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].0, HttpMethod::Patch);
        assert_eq!(
            calls[0].2,
            Some(json!([{"op": "add", "path": "/description", "value": "x"}]))
        );
    }
}

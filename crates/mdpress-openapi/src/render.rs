//! Rendering of a single OpenAPI operation to an MDX content document.
//!
//! Output is a deterministic function of the operation: front matter
//! (title, description, full-width flag) followed by a markdown body with
//! parameter, request-body, and response sections. Determinism is what
//! makes regeneration idempotent, so nothing here may depend on iteration
//! order of unordered collections.

use std::fmt::Write as _;
use std::path::PathBuf;

use mdpress_source::{FrontMatter, slugify};
use oas3::Spec;
use oas3::spec::{Operation, Parameter, ParameterIn, Response};

use crate::GenerateError;

/// A generated content document, not yet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDoc {
    /// Output path relative to the destination subtree.
    pub rel_path: PathBuf,
    /// Full file content including front matter.
    pub content: String,
}

/// Identifier used in error messages: `GET /store/orders`.
pub(crate) fn operation_label(method: &str, path: &str) -> String {
    format!("{method} {path}")
}

/// Destination-relative output path for an operation.
///
/// Operations are grouped by their first tag (`<tag>/<method>-<path>.mdx`);
/// untagged operations land in the destination root.
pub(crate) fn operation_rel_path(method: &str, path: &str, operation: &Operation) -> PathBuf {
    let file = format!("{}-{}.mdx", method.to_lowercase(), slugify(path));
    match operation.tags.first() {
        Some(tag) => PathBuf::from(slugify(tag)).join(file),
        None => PathBuf::from(file),
    }
}

/// Render one operation to a content document.
pub(crate) fn render_operation(
    spec: &Spec,
    path: &str,
    method: &str,
    operation: &Operation,
) -> Result<RenderedDoc, GenerateError> {
    let label = operation_label(method, path);
    let title = operation
        .summary
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| label.clone());

    let front = FrontMatter {
        title: Some(title),
        description: operation.description.clone().filter(|d| !d.is_empty()),
        order: None,
        icon: None,
        full: Some(true),
    };
    let yaml = serde_yaml::to_string(&front).map_err(|e| GenerateError::Schema {
        operation: label.clone(),
        message: format!("front matter serialization failed: {e}"),
    })?;

    let mut body = String::new();
    let _ = writeln!(body, "## `{label}`");

    if let Some(description) = operation.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(body, "\n{description}");
    }

    render_parameters(&mut body, spec, operation, &label)?;
    render_request_body(&mut body, spec, operation, &label)?;
    render_responses(&mut body, spec, operation, &label)?;

    Ok(RenderedDoc {
        rel_path: operation_rel_path(method, path, operation),
        content: format!("---\n{yaml}---\n\n{body}"),
    })
}

fn location_label(location: &ParameterIn) -> &'static str {
    match location {
        ParameterIn::Query => "query",
        ParameterIn::Path => "path",
        ParameterIn::Header => "header",
        ParameterIn::Cookie => "cookie",
    }
}

fn render_parameters(
    body: &mut String,
    spec: &Spec,
    operation: &Operation,
    label: &str,
) -> Result<(), GenerateError> {
    let parameters: Vec<Parameter> = operation
        .parameters
        .iter()
        .map(|r| {
            r.resolve(spec).map_err(|e| GenerateError::Schema {
                operation: label.to_owned(),
                message: format!("unresolved parameter reference: {e}"),
            })
        })
        .collect::<Result<_, _>>()?;

    if parameters.is_empty() {
        return Ok(());
    }

    let _ = writeln!(body, "\n### Parameters\n");
    let _ = writeln!(body, "| Name | In | Required | Description |");
    let _ = writeln!(body, "| --- | --- | --- | --- |");
    for param in &parameters {
        let _ = writeln!(
            body,
            "| `{}` | {} | {} | {} |",
            param.name,
            location_label(&param.location),
            if param.required.unwrap_or(false) { "yes" } else { "no" },
            param.description.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn render_request_body(
    body: &mut String,
    spec: &Spec,
    operation: &Operation,
    label: &str,
) -> Result<(), GenerateError> {
    let Some(body_ref) = operation.request_body.as_ref() else {
        return Ok(());
    };
    let request_body = body_ref.resolve(spec).map_err(|e| GenerateError::Schema {
        operation: label.to_owned(),
        message: format!("unresolved request body reference: {e}"),
    })?;

    let _ = writeln!(body, "\n### Request Body\n");
    let required = request_body.required.unwrap_or(false);
    let _ = writeln!(body, "Required: {}\n", if required { "yes" } else { "no" });
    // BTreeMap: media types come out in sorted order.
    for media_type in request_body.content.keys() {
        let _ = writeln!(body, "- `{media_type}`");
    }
    Ok(())
}

fn render_responses(
    body: &mut String,
    spec: &Spec,
    operation: &Operation,
    label: &str,
) -> Result<(), GenerateError> {
    let Some(responses) = operation.responses.as_ref() else {
        return Ok(());
    };
    if responses.is_empty() {
        return Ok(());
    }

    let _ = writeln!(body, "\n### Responses\n");
    let _ = writeln!(body, "| Status | Description | Content |");
    let _ = writeln!(body, "| --- | --- | --- |");
    for (status, response_ref) in responses {
        let response: Response = response_ref.resolve(spec).map_err(|e| GenerateError::Schema {
            operation: label.to_owned(),
            message: format!("unresolved response reference for status {status}: {e}"),
        })?;
        let media_types: Vec<&str> = response.content.keys().map(String::as_str).collect();
        let _ = writeln!(
            body,
            "| {} | {} | {} |",
            status,
            response.description.as_deref().unwrap_or("-"),
            if media_types.is_empty() {
                "-".to_owned()
            } else {
                media_types.join(", ")
            },
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn spec(json: serde_json::Value) -> Spec {
        oas3::from_json(json.to_string()).unwrap()
    }

    fn petstore() -> Spec {
        spec(serde_json::json!({
            "openapi": "3.0.0",
            "info": { "title": "Petstore", "version": "1.0.0" },
            "paths": {
                "/pets/{petId}": {
                    "get": {
                        "tags": ["Pets"],
                        "summary": "Find pet by ID",
                        "description": "Returns a single pet.",
                        "parameters": [{
                            "name": "petId",
                            "in": "path",
                            "required": true,
                            "description": "ID of the pet",
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Successful response",
                                "content": { "application/json": {} }
                            },
                            "404": { "description": "Pet not found" }
                        }
                    }
                }
            }
        }))
    }

    fn first_operation(spec: &Spec) -> (String, String, Operation) {
        let (path, method, operation) = spec.operations().next().unwrap();
        (path, method.as_str().to_owned(), operation.clone())
    }

    #[test]
    fn test_rel_path_groups_by_tag() {
        let spec = petstore();
        let (path, method, operation) = first_operation(&spec);

        let rel = operation_rel_path(&method, &path, &operation);

        assert_eq!(rel, PathBuf::from("pets/get-pets-petid.mdx"));
    }

    #[test]
    fn test_rel_path_untagged_lands_in_root() {
        let spec = spec(serde_json::json!({
            "openapi": "3.0.0",
            "info": { "title": "T", "version": "1" },
            "paths": { "/status": { "get": { "responses": {} } } }
        }));
        let (path, method, operation) = first_operation(&spec);

        let rel = operation_rel_path(&method, &path, &operation);

        assert_eq!(rel, PathBuf::from("get-status.mdx"));
    }

    #[test]
    fn test_render_includes_front_matter_and_sections() {
        let spec = petstore();
        let (path, method, operation) = first_operation(&spec);

        let doc = render_operation(&spec, &path, &method, &operation).unwrap();

        assert!(doc.content.starts_with("---\n"));
        assert!(doc.content.contains("title: Find pet by ID"));
        assert!(doc.content.contains("full: true"));
        assert!(doc.content.contains("## `GET /pets/{petId}`"));
        assert!(doc.content.contains("| `petId` | path | yes | ID of the pet |"));
        assert!(doc.content.contains("| 200 | Successful response | application/json |"));
        assert!(doc.content.contains("| 404 | Pet not found | - |"));
    }

    #[test]
    fn test_render_title_falls_back_to_method_and_path() {
        let spec = spec(serde_json::json!({
            "openapi": "3.0.0",
            "info": { "title": "T", "version": "1" },
            "paths": { "/status": { "get": { "responses": {} } } }
        }));
        let (path, method, operation) = first_operation(&spec);

        let doc = render_operation(&spec, &path, &method, &operation).unwrap();

        assert!(doc.content.contains("title: GET /status"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let spec = petstore();
        let (path, method, operation) = first_operation(&spec);

        let first = render_operation(&spec, &path, &method, &operation).unwrap();
        let second = render_operation(&spec, &path, &method, &operation).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unresolved_parameter_ref_is_schema_error() {
        let spec = spec(serde_json::json!({
            "openapi": "3.0.0",
            "info": { "title": "T", "version": "1" },
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [{ "$ref": "#/components/parameters/Missing" }],
                        "responses": {}
                    }
                }
            }
        }));
        let (path, method, operation) = first_operation(&spec);

        let result = render_operation(&spec, &path, &method, &operation);

        assert!(matches!(result, Err(GenerateError::Schema { .. })));
    }
}

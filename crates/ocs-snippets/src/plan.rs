use serde::Serialize;
use serde_json::Value;

use ocs_core::extract::{AuthMaterials, RequestShape};
use ocs_core::parse::operation::{HttpMethod, Operation};
use ocs_core::parse::request_body::RequestBodyOrRef;
use ocs_core::parse::security::{ApiKeyLocation, SecurityScheme, SecuritySchemeType};
use ocs_core::parse::spec::OpenApiSpec;

const DEFAULT_BASE_URL: &str = "https://example.com";

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// A flattened, language-agnostic view of one request. Built once per
/// operation; every language template renders from the same plan.
#[derive(Debug, Clone, Serialize)]
pub struct RequestPlan {
    /// Uppercase HTTP method.
    pub method: String,
    /// Full URL: base + path with parameter examples substituted + query string.
    pub url: String,
    pub headers: Vec<Header>,
    /// Pretty-printed JSON body.
    pub body: Option<String>,
    /// The body as a Python literal (`True`/`None` instead of `true`/`null`).
    pub body_python: Option<String>,
}

impl RequestPlan {
    pub fn build(
        spec: &OpenApiSpec,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
        shape: &RequestShape,
        auth: &AuthMaterials,
    ) -> Self {
        let base = spec
            .servers
            .first()
            .map(|s| s.url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut rendered_path = path.to_string();
        for (name, value) in &shape.path {
            rendered_path = rendered_path.replace(
                &format!("{{{name}}}"),
                &urlencoding::encode(&plain(value)),
            );
        }

        let mut query: Vec<(String, String)> = shape
            .query
            .iter()
            .map(|(name, value)| (name.clone(), plain(value)))
            .collect();

        let mut headers = Vec::new();
        if shape.body.is_some() {
            headers.push(Header {
                name: "Content-Type".to_string(),
                value: body_content_type(operation),
            });
        }
        for (name, value) in &shape.header {
            headers.push(Header {
                name: name.clone(),
                value: plain(value),
            });
        }

        let mut cookies: Vec<(String, String)> = shape
            .cookie
            .iter()
            .map(|(name, value)| (name.clone(), plain(value)))
            .collect();

        for (key, credential) in auth {
            if let Some(scheme) = security_scheme(spec, key) {
                apply_auth(scheme, key, credential, &mut headers, &mut query, &mut cookies);
            }
        }

        if !cookies.is_empty() {
            let joined = cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            headers.push(Header {
                name: "Cookie".to_string(),
                value: joined,
            });
        }

        let url = if query.is_empty() {
            format!("{base}{rendered_path}")
        } else {
            let pairs = query
                .iter()
                .map(|(name, value)| {
                    format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
                })
                .collect::<Vec<_>>()
                .join("&");
            format!("{base}{rendered_path}?{pairs}")
        };

        let body = shape
            .body
            .as_ref()
            .map(|value| serde_json::to_string_pretty(value).unwrap_or_default());
        let body_python = shape.body.as_ref().map(python_literal);

        Self {
            method: method.as_str().to_ascii_uppercase(),
            url,
            headers,
            body,
            body_python,
        }
    }
}

fn security_scheme<'a>(spec: &'a OpenApiSpec, key: &str) -> Option<&'a SecurityScheme> {
    spec.components
        .as_ref()
        .and_then(|c| c.security_schemes.get(key))
}

/// Fold one materialized credential into the request, at the location its
/// scheme declares.
fn apply_auth(
    scheme: &SecurityScheme,
    key: &str,
    credential: &str,
    headers: &mut Vec<Header>,
    query: &mut Vec<(String, String)>,
    cookies: &mut Vec<(String, String)>,
) {
    match scheme.scheme_type {
        SecuritySchemeType::ApiKey => {
            let name = scheme.name.clone().unwrap_or_else(|| key.to_string());
            match scheme.location {
                Some(ApiKeyLocation::Query) => query.push((name, credential.to_string())),
                Some(ApiKeyLocation::Cookie) => cookies.push((name, credential.to_string())),
                Some(ApiKeyLocation::Header) | None => headers.push(Header {
                    name,
                    value: credential.to_string(),
                }),
            }
        }
        SecuritySchemeType::Http => {
            let value = if scheme.scheme.as_deref() == Some("basic") {
                format!("Basic {credential}")
            } else {
                format!("Bearer {credential}")
            };
            headers.push(Header {
                name: "Authorization".to_string(),
                value,
            });
        }
        SecuritySchemeType::OAuth2 | SecuritySchemeType::OpenIdConnect => {
            headers.push(Header {
                name: "Authorization".to_string(),
                value: format!("Bearer {credential}"),
            });
        }
        // Certificate auth has no request-line representation.
        SecuritySchemeType::MutualTLS => {}
    }
}

/// Content type of the request body, defaulting to JSON.
fn body_content_type(operation: &Operation) -> String {
    match operation.request_body.as_ref() {
        Some(RequestBodyOrRef::RequestBody(body)) => body
            .content
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| "application/json".to_string()),
        _ => "application/json".to_string(),
    }
}

/// Render a JSON value for use inside a URL or header: strings unquoted,
/// everything else compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a JSON value as a Python literal.
fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(_) => value.to_string(),
        Value::Array(items) => {
            let inner = items
                .iter()
                .map(python_literal)
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{inner}]")
        }
        Value::Object(map) => {
            let inner = map
                .iter()
                .map(|(k, v)| format!("{}: {}", Value::String(k.clone()), python_literal(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{inner}}}")
        }
    }
}

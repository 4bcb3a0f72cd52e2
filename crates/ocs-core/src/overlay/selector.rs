use crate::parse::operation::HttpMethod;

/// Build the JSONPath-style expression addressing one operation inside
/// the original document.
///
/// `path` is substituted verbatim; a path template that itself contains
/// `"` or `]` produces a selector that will not address the intended
/// node. Callers own that constraint.
pub fn json_path_selector(path: &str, method: HttpMethod) -> String {
    format!("$[\"paths\"][\"{}\"][\"{}\"]", path, method.as_str())
}

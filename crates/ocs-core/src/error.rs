use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),
}

/// Why a single operation could not yield a code sample. These are
/// collected per operation, never propagated as pipeline failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Multiple example groups are not supported")]
    ExampleGroups,

    #[error("Multiple requestBodyExamples are not supported")]
    MultipleBodySources,

    #[error("Multiple requestBodyExamples[0].examples are not supported")]
    MultipleBodyExamples,

    #[error("Multiple parameter examples are not supported")]
    MultipleParameterExamples,
}

/// Invocation-fatal pipeline failures. Anything here aborts the whole run
/// before any overlay is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

#[derive(Debug, Error)]
#[error("language not supported: {requested} (supported: {supported})")]
pub struct UnsupportedLanguage {
    pub requested: String,
    pub supported: String,
}

use log::debug;

use crate::extract::{materialize_auth, select_examples};
use crate::overlay::selector::json_path_selector;
use crate::parse::spec::OpenApiSpec;
use crate::{Language, SnippetRenderer};

/// A generated sample for one operation.
#[derive(Debug, Clone)]
pub struct CodeSample {
    pub lang: String,
    pub label: Option<String>,
    pub source: String,
    pub selector: String,
}

/// A per-operation failure. Collected alongside samples, never thrown.
#[derive(Debug, Clone)]
pub struct SampleError {
    pub selector: String,
    pub error: String,
}

/// Visit every operation in document order and produce exactly one
/// outcome per operation: a code sample or a sample error. No operation's
/// outcome affects any other's.
pub fn walk_operations(
    spec: &OpenApiSpec,
    renderer: &dyn SnippetRenderer,
    language: Language,
) -> (Vec<CodeSample>, Vec<SampleError>) {
    let mut samples = Vec::new();
    let mut errors = Vec::new();

    for (path, item) in &spec.paths {
        for (&method, operation) in &item.operations {
            let selector = json_path_selector(path, method);

            let shape = match select_examples(operation) {
                Ok(shape) => shape,
                Err(err) => {
                    debug!("skipping {selector}: {err}");
                    errors.push(SampleError {
                        selector,
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            let auth = materialize_auth(spec, operation);

            match renderer.render(spec, path, method, operation, &shape, &auth, language) {
                Some(snippet) => samples.push(CodeSample {
                    lang: snippet.highlight,
                    label: None,
                    source: snippet.source,
                    selector,
                }),
                None => errors.push(SampleError {
                    selector,
                    error: "Could not generate code snippet".to_string(),
                }),
            }
        }
    }

    (samples, errors)
}

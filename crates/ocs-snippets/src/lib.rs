//! Renders request plans into source text, one minijinja template per
//! target language.

mod plan;

use log::warn;
use minijinja::{Environment, context};

use ocs_core::extract::{AuthMaterials, RequestShape};
use ocs_core::parse::operation::{HttpMethod, Operation};
use ocs_core::parse::spec::OpenApiSpec;
use ocs_core::{Language, Snippet, SnippetRenderer};

pub use plan::RequestPlan;

/// The built-in snippet renderer: flattens each request into a
/// [`RequestPlan`] and runs it through the target language's template.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_filter("sh_escape", shell_escape);
        env.add_filter("js_escape", js_escape);
        env.add_template("shell", include_str!("../templates/shell.j2"))
            .expect("template should be valid");
        env.add_template("javascript", include_str!("../templates/javascript.j2"))
            .expect("template should be valid");
        env.add_template("python", include_str!("../templates/python.j2"))
            .expect("template should be valid");
        env.add_template("go", include_str!("../templates/go.j2"))
            .expect("template should be valid");
        Self { env }
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SnippetRenderer for TemplateRenderer {
    fn render(
        &self,
        spec: &OpenApiSpec,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
        shape: &RequestShape,
        auth: &AuthMaterials,
        language: Language,
    ) -> Option<Snippet> {
        let plan = RequestPlan::build(spec, path, method, operation, shape, auth);

        let template = self.env.get_template(language.as_str()).ok()?;
        let source = template
            .render(context! {
                method => plan.method,
                url => plan.url,
                headers => plan.headers,
                body => plan.body,
                body_python => plan.body_python,
            })
            .map_err(|err| warn!("rendering {language} snippet failed: {err}"))
            .ok()?;

        Some(Snippet {
            source,
            highlight: language.highlight().to_string(),
        })
    }
}

/// Make a string safe inside a single-quoted shell word.
fn shell_escape(value: String) -> String {
    value.replace('\'', "'\\''")
}

/// Make a string safe inside a single-quoted JS string literal.
fn js_escape(value: String) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}

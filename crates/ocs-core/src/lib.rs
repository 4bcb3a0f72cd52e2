pub mod error;
pub mod extract;
pub mod overlay;
pub mod parse;
pub mod pipeline;
pub mod walk;

use std::fmt;
use std::str::FromStr;

use crate::error::UnsupportedLanguage;
use crate::extract::request::{AuthMaterials, RequestShape};
use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::spec::OpenApiSpec;

/// A rendered snippet: source text plus the syntax-highlighting tag that
/// documentation sites attach to it.
#[derive(Debug, Clone)]
pub struct Snippet {
    pub source: String,
    pub highlight: String,
}

/// Snippet target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Shell,
    JavaScript,
    Python,
    Go,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Shell,
        Language::JavaScript,
        Language::Python,
        Language::Go,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Shell => "shell",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Go => "go",
        }
    }

    /// The highlight tag emitted into `x-codeSamples` entries.
    pub fn highlight(&self) -> &'static str {
        self.as_str()
    }

    /// Comma-separated list of recognized language names, for error messages.
    pub fn supported_list() -> String {
        Language::ALL
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnsupportedLanguage {
                requested: s.to_string(),
                supported: Language::supported_list(),
            })
    }
}

/// Trait for snippet renderers that turn one operation's request shape and
/// auth materials into source text.
///
/// Returning `None` means the renderer could not produce a snippet; the
/// walker records that as a per-operation error rather than aborting.
pub trait SnippetRenderer {
    #[allow(clippy::too_many_arguments)]
    fn render(
        &self,
        spec: &OpenApiSpec,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
        shape: &RequestShape,
        auth: &AuthMaterials,
        language: Language,
    ) -> Option<Snippet>;
}

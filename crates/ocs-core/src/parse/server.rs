use serde::{Deserialize, Serialize};

/// A server URL definition. The first server's URL becomes the base URL of
/// rendered snippets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

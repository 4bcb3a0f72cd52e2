use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::example::ExampleObject;
use super::schema::SchemaOrRef;

/// A media type object: the schema plus its authored examples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, ExampleObject>,
}

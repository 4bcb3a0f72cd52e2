use indexmap::IndexMap;
use serde_json::Value;

use crate::parse::parameter::ParameterLocation;

/// The canonical request input handed to snippet renderers: one optional
/// body value plus per-location parameter example buckets. An empty bucket
/// means no parameter of that location carried an example.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestShape {
    pub body: Option<Value>,
    pub path: IndexMap<String, Value>,
    pub query: IndexMap<String, Value>,
    pub header: IndexMap<String, Value>,
    pub cookie: IndexMap<String, Value>,
}

impl RequestShape {
    pub fn bucket_mut(&mut self, location: ParameterLocation) -> &mut IndexMap<String, Value> {
        match location {
            ParameterLocation::Path => &mut self.path,
            ParameterLocation::Query => &mut self.query,
            ParameterLocation::Header => &mut self.header,
            ParameterLocation::Cookie => &mut self.cookie,
        }
    }
}

/// Placeholder credential strings keyed by security-scheme key.
pub type AuthMaterials = IndexMap<String, String>;

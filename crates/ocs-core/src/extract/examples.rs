use log::debug;
use serde_json::{Value, json};

use super::request::RequestShape;
use crate::error::ExtractError;
use crate::parse::media_type::MediaType;
use crate::parse::operation::Operation;
use crate::parse::parameter::ParameterOrRef;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};

/// Extract the single representative request shape for an operation, or
/// fail if the document offers more than one candidate anywhere.
///
/// Checks run in a fixed order: example groups first (an unconditional
/// precondition), then the request body, then parameters in declaration
/// order. The first ambiguity found fails the whole operation.
pub fn select_examples(operation: &Operation) -> Result<RequestShape, ExtractError> {
    if !operation.example_groups.is_empty() {
        return Err(ExtractError::ExampleGroups);
    }

    let mut shape = RequestShape {
        body: select_body_example(operation)?,
        ..RequestShape::default()
    };

    for param in &operation.parameters {
        let ParameterOrRef::Parameter(param) = param else {
            // Unresolved reference; nothing usable to extract.
            debug!("skipping unresolved parameter ref");
            continue;
        };

        if !param.examples.is_empty() {
            // Ambiguity is fatal even when a single `example` is also set.
            return Err(ExtractError::MultipleParameterExamples);
        }

        if let Some(example) = &param.example {
            shape
                .bucket_mut(param.location)
                .insert(param.name.clone(), example.clone());
        }
    }

    Ok(shape)
}

/// Pick the request body example, if any. Each declared content type is
/// one example source; more than one source, or one source with several
/// named examples, is ambiguous.
fn select_body_example(operation: &Operation) -> Result<Option<Value>, ExtractError> {
    let Some(RequestBodyOrRef::RequestBody(body)) = operation.request_body.as_ref() else {
        return Ok(None);
    };

    if body.content.len() > 1 {
        return Err(ExtractError::MultipleBodySources);
    }
    let Some(media) = body.content.values().next() else {
        return Ok(None);
    };

    let mut candidates = media_example_candidates(media);
    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.pop()),
        _ => Err(ExtractError::MultipleBodyExamples),
    }
}

/// Candidate example values for one media type, in precedence order:
/// named `examples`, the single `example`, then the schema (its own
/// example or a value synthesized from its structure).
fn media_example_candidates(media: &MediaType) -> Vec<Value> {
    if !media.examples.is_empty() {
        return media
            .examples
            .values()
            .filter_map(|ex| ex.value.clone())
            .collect();
    }
    if let Some(example) = &media.example {
        return vec![example.clone()];
    }
    if let Some(schema) = &media.schema {
        return synthesize_example(schema).into_iter().collect();
    }
    Vec::new()
}

/// Build an example value from a schema when none was authored. Keeps
/// snippets useful for body-bearing operations without examples: property
/// names survive, leaf values fall back to type placeholders.
pub fn synthesize_example(schema_or_ref: &SchemaOrRef) -> Option<Value> {
    match schema_or_ref {
        // Only left in place for circular references; don't expand.
        SchemaOrRef::Ref { .. } => None,
        SchemaOrRef::Schema(schema) => synthesize_schema(schema),
    }
}

fn synthesize_schema(schema: &Schema) -> Option<Value> {
    if let Some(example) = &schema.example {
        return Some(example.clone());
    }
    if let Some(default) = &schema.default_value {
        return Some(default.clone());
    }
    if let Some(first) = schema.enum_values.first() {
        return Some(first.clone());
    }

    if !schema.all_of.is_empty() {
        return synthesize_all_of(&schema.all_of);
    }
    if let Some(variant) = schema.one_of.first().or_else(|| schema.any_of.first()) {
        return synthesize_example(variant);
    }

    if !schema.properties.is_empty() {
        return Some(synthesize_object(schema));
    }

    match schema.schema_type.as_ref().and_then(|t| t.primary()) {
        Some(SchemaType::Object) => Some(json!({})),
        Some(SchemaType::Array) => {
            let item = schema.items.as_deref().and_then(synthesize_example);
            Some(Value::Array(item.into_iter().collect()))
        }
        Some(SchemaType::String) => Some(json!("string")),
        Some(SchemaType::Integer) => Some(json!(0)),
        Some(SchemaType::Number) => Some(json!(0.0)),
        Some(SchemaType::Boolean) => Some(json!(true)),
        Some(SchemaType::Null) => Some(Value::Null),
        None => None,
    }
}

fn synthesize_object(schema: &Schema) -> Value {
    let mut map = serde_json::Map::new();
    for (name, prop) in &schema.properties {
        if let Some(value) = synthesize_example(prop) {
            map.insert(name.clone(), value);
        }
    }
    Value::Object(map)
}

/// Merge `allOf` branches; object branches merge key-wise, the first
/// non-object branch wins outright.
fn synthesize_all_of(branches: &[SchemaOrRef]) -> Option<Value> {
    let mut merged = serde_json::Map::new();
    for branch in branches {
        match synthesize_example(branch) {
            Some(Value::Object(map)) => merged.extend(map),
            Some(other) => return Some(other),
            None => {}
        }
    }
    if merged.is_empty() {
        None
    } else {
        Some(Value::Object(merged))
    }
}

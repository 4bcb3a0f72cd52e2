use log::debug;

use super::request::AuthMaterials;
use crate::parse::operation::Operation;
use crate::parse::spec::OpenApiSpec;

/// Synthesize one placeholder credential per distinct security scheme the
/// operation requires. Never fails; unresolvable scheme keys are skipped.
///
/// Operations without their own `security` inherit the document-level
/// requirements. Alternative requirement groups are flattened in encounter
/// order, and duplicate keys across groups collapse to one entry.
pub fn materialize_auth(spec: &OpenApiSpec, operation: &Operation) -> AuthMaterials {
    let mut materials = AuthMaterials::new();

    let requirements = operation
        .security
        .as_deref()
        .or(spec.security.as_deref())
        .unwrap_or_default();
    let schemes = spec.components.as_ref().map(|c| &c.security_schemes);

    for requirement in requirements {
        for key in requirement.keys() {
            if !schemes.is_some_and(|s| s.contains_key(key)) {
                debug!("skipping unknown security scheme key: {key}");
                continue;
            }
            materials
                .entry(key.clone())
                .or_insert_with(|| placeholder(key));
        }
    }

    materials
}

/// The placeholder credential for a scheme key: `MY_` plus the key with
/// every non-alphanumeric character replaced by `_`, upper-cased. A pure
/// function of the key.
pub fn placeholder(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("MY_{}", sanitized.to_uppercase())
}

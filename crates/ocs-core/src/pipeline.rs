use log::debug;

use crate::error::PipelineError;
use crate::overlay::{self, Overlay};
use crate::parse::{self, ref_resolve::RefResolver};
use crate::walk::{self, SampleError};
use crate::{Language, SnippetRenderer};

/// The overlay plus the per-operation errors that accompanied it.
#[derive(Debug)]
pub struct GenerationResult {
    pub overlay: Overlay,

    /// `None` when every operation produced a sample — callers branch on
    /// presence, so this is never `Some(vec![])`.
    pub errors: Option<Vec<SampleError>>,
}

/// Run the whole pipeline over raw document text: parse, dereference,
/// walk every operation, assemble the overlay. Parse and dereference
/// failures are fatal; everything past that point is collected per
/// operation.
pub fn generate_overlay(
    raw: &str,
    language: Language,
    renderer: &dyn SnippetRenderer,
) -> Result<GenerationResult, PipelineError> {
    let spec = parse::from_str(raw)?;
    let mut resolver = RefResolver::new(&spec);
    let resolved = resolver.resolve_spec(&spec)?;

    let (samples, errors) = walk::walk_operations(&resolved, renderer, language);
    debug!(
        "walked {} paths: {} samples, {} errors",
        resolved.paths.len(),
        samples.len(),
        errors.len()
    );

    let overlay = overlay::assemble_overlay(&samples);
    Ok(GenerationResult {
        overlay,
        errors: (!errors.is_empty()).then_some(errors),
    })
}

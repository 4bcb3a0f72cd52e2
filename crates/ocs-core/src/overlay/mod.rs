//! The overlay document: a patch expressing one `x-codeSamples` update
//! per successfully processed operation.

pub mod selector;

use serde::Serialize;

use crate::walk::CodeSample;

pub const OVERLAY_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize)]
pub struct Overlay {
    pub overlay: String,
    pub info: OverlayInfo,
    pub actions: Vec<OverlayAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverlayInfo {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverlayAction {
    pub target: String,
    pub update: SampleUpdate,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleUpdate {
    #[serde(rename = "x-codeSamples")]
    pub code_samples: Vec<CodeSampleEntry>,
}

/// The presentation-trimmed sample as it appears inside the overlay.
#[derive(Debug, Clone, Serialize)]
pub struct CodeSampleEntry {
    pub lang: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub source: String,
}

/// Build the overlay from the walk's successful samples, one action per
/// sample in walk order. An empty input yields an empty action list.
pub fn assemble_overlay(samples: &[CodeSample]) -> Overlay {
    Overlay {
        overlay: OVERLAY_VERSION.to_string(),
        info: OverlayInfo {
            title: "Code Samples".to_string(),
            version: "0.0.0".to_string(),
        },
        actions: samples
            .iter()
            .map(|sample| OverlayAction {
                target: sample.selector.clone(),
                update: SampleUpdate {
                    code_samples: vec![CodeSampleEntry {
                        lang: sample.lang.clone(),
                        label: sample.label.clone(),
                        source: sample.source.clone(),
                    }],
                },
            })
            .collect(),
    }
}

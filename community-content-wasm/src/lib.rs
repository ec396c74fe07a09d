//! WASM bindings for community-content: powers the in-browser page preview.

use wasm_bindgen::prelude::*;

use community_content::core::assemble::GenerationReport;
use community_content::core::pipeline::ContentGenerator;
use community_content::schema::content::CommunityContent;
use community_content::schema::neighborhood::{County, NeighborhoodInput};
use community_content::schema::template_kind::TemplateKind;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct FailureInfo {
    index: usize,
    slug: String,
    message: String,
}

#[derive(serde::Serialize)]
struct ReportInfo {
    records: Vec<CommunityContent>,
    failures: Vec<FailureInfo>,
}

impl From<GenerationReport> for ReportInfo {
    fn from(report: GenerationReport) -> Self {
        Self {
            records: report.records,
            failures: report
                .failures
                .into_iter()
                .map(|f| FailureInfo {
                    index: f.index,
                    message: f.error.to_string(),
                    slug: f.slug,
                })
                .collect(),
        }
    }
}

#[derive(serde::Serialize)]
struct PreviewInfo {
    template: &'static str,
    content: CommunityContent,
}

fn js_err(context: &str, e: impl std::fmt::Display) -> JsError {
    JsError::new(&format!("{context}: {e}"))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// A generator with the built-in Austin metro templates.
#[wasm_bindgen]
pub struct ContentPreview {
    generator: ContentGenerator,
}

#[wasm_bindgen]
impl ContentPreview {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<ContentPreview, JsError> {
        let generator = ContentGenerator::builder()
            .seed(seed)
            .build()
            .map_err(|e| js_err("Generator error", e))?;
        Ok(ContentPreview { generator })
    }

    /// Generate a whole table. Input is a JSON array of neighborhoods;
    /// output is `{ records, failures }`.
    pub fn generate(&self, inputs_json: &str) -> Result<String, JsError> {
        let inputs: Vec<NeighborhoodInput> =
            serde_json::from_str(inputs_json).map_err(|e| js_err("Invalid input JSON", e))?;
        let report = self
            .generator
            .generate(&inputs)
            .map_err(|e| js_err("Generation error", e))?;
        serde_json::to_string(&ReportInfo::from(report))
            .map_err(|e| js_err("Serialization error", e))
    }

    /// Render one neighborhood and report which template it used.
    pub fn preview(&self, input_json: &str) -> Result<String, JsError> {
        let input: NeighborhoodInput =
            serde_json::from_str(input_json).map_err(|e| js_err("Invalid input JSON", e))?;
        let selection = self
            .generator
            .select(&input)
            .map_err(|e| js_err("Selection error", e))?;
        let content = self
            .generator
            .generate_one(&input)
            .map_err(|e| js_err("Render error", e))?;
        serde_json::to_string(&PreviewInfo {
            template: selection.kind.id(),
            content,
        })
        .map_err(|e| js_err("Serialization error", e))
    }

    /// Reset the generator with a new seed.
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        *self = ContentPreview::new(seed)?;
        Ok(())
    }

    /// Return JSON array of county names the generator accepts.
    pub fn counties() -> String {
        let names: Vec<&str> = County::ALL.iter().map(|c| c.name()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON array of template identifiers.
    pub fn template_kinds() -> String {
        let ids: Vec<&str> = TemplateKind::ALL.iter().map(|k| k.id()).collect();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }
}

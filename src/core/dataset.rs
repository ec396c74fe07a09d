/// Dataset input and output: loading neighborhood tables, writing records.

use std::path::Path;
use thiserror::Error;

use crate::schema::content::CommunityContent;
use crate::schema::neighborhood::NeighborhoodInput;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported dataset extension for '{0}' (expected .ron or .json)")]
    UnsupportedFormat(String),
}

/// Load a neighborhood table. The format follows the file extension.
pub fn load_inputs(path: &Path) -> Result<Vec<NeighborhoodInput>, DatasetError> {
    let contents = std::fs::read_to_string(path)?;
    match path.extension().and_then(|s| s.to_str()) {
        Some("ron") => parse_inputs_ron(&contents),
        Some("json") => parse_inputs_json(&contents),
        _ => Err(DatasetError::UnsupportedFormat(path.display().to_string())),
    }
}

pub fn parse_inputs_ron(input: &str) -> Result<Vec<NeighborhoodInput>, DatasetError> {
    Ok(ron::from_str(input)?)
}

pub fn parse_inputs_json(input: &str) -> Result<Vec<NeighborhoodInput>, DatasetError> {
    Ok(serde_json::from_str(input)?)
}

/// Records as a pretty-printed JSON array.
pub fn render_json(records: &[CommunityContent]) -> Result<String, DatasetError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Records as a TypeScript data module the website can import directly.
pub fn render_typescript(records: &[CommunityContent]) -> Result<String, DatasetError> {
    let body = render_json(records)?;
    Ok(format!(
        "// Generated by community_gen. Do not edit by hand.\n\
         \n\
         export interface CommunityContent {{\n\
         \x20 slug: string;\n\
         \x20 description: string;\n\
         \x20 highlights: string[];\n\
         \x20 bestFor: string[];\n\
         \x20 nearbyLandmarks: string[];\n\
         }}\n\
         \n\
         export const communityContent: CommunityContent[] = {body};\n"
    ))
}

/// Output encoding for [`write_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    TypeScript,
}

pub fn write_records(
    path: &Path,
    records: &[CommunityContent],
    format: OutputFormat,
) -> Result<(), DatasetError> {
    let rendered = match format {
        OutputFormat::Json => render_json(records)?,
        OutputFormat::TypeScript => render_typescript(records)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, rendered)?;
    Ok(())
}

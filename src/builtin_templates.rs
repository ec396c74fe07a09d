//! Built-in template data compiled into the crate.

use crate::core::template::{TemplateError, TemplateSet};

/// Austin metro templates, covering every template kind.
pub const AUSTIN_METRO: &str = include_str!("../template_data/austin_metro/templates.ron");

/// Parse the built-in Austin metro templates.
pub fn austin_metro() -> Result<TemplateSet, TemplateError> {
    TemplateSet::parse_ron(AUSTIN_METRO)
}

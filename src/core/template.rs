/// Prose templates: placeholder parsing, definitions per kind, RON loading.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::schema::template_kind::TemplateKind;

/// Number of highlight bullets every record carries.
pub const HIGHLIGHT_COUNT: usize = 5;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    TemplateParse(String),
    #[error("unknown placeholder '{{{0}}}'")]
    UnknownPlaceholder(String),
    #[error("unknown template kind '{0}'")]
    UnknownKind(String),
    #[error("template '{kind}' must list exactly {expected} highlight claims, found {actual}")]
    ClaimCount {
        kind: String,
        expected: usize,
        actual: usize,
    },
    #[error("template '{kind}' paragraph {index} has no alternative with a non-zero weight")]
    EmptyParagraph { kind: String, index: usize },
    #[error("template '{0}' has no paragraphs")]
    NoParagraphs(String),
    #[error("template '{0}' uses {{anchor}}, which only landmark_anchored records carry")]
    AnchorOutsideAnchoredKind(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A named value a template can interpolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placeholder {
    Name,
    Slug,
    County,
    Direction,
    Distance,
    City,
    /// School districts joined with "or".
    Schools,
    /// Highways joined with "and".
    Highways,
    /// One landmark by position: `{landmark.0}` .. `{landmark.4}`.
    Landmark(usize),
    /// First persona tag, lowercased.
    Persona,
    Anchor,
}

/// Landmarks addressable by `{landmark.N}`.
const LANDMARK_SLOTS: usize = 5;

impl Placeholder {
    fn parse(content: &str) -> Result<Placeholder, TemplateError> {
        let placeholder = match content {
            "name" => Self::Name,
            "slug" => Self::Slug,
            "county" => Self::County,
            "direction" => Self::Direction,
            "distance" => Self::Distance,
            "city" => Self::City,
            "schools" => Self::Schools,
            "highways" => Self::Highways,
            "persona" => Self::Persona,
            "anchor" => Self::Anchor,
            other => {
                let index = other
                    .strip_prefix("landmark.")
                    .and_then(|n| n.parse::<usize>().ok())
                    .filter(|n| *n < LANDMARK_SLOTS)
                    .ok_or_else(|| TemplateError::UnknownPlaceholder(other.to_string()))?;
                Self::Landmark(index)
            }
        };
        Ok(placeholder)
    }

    /// Input field name reported when the placeholder cannot be resolved.
    pub fn field(&self) -> String {
        match self {
            Self::Name => "name".to_string(),
            Self::Slug => "slug".to_string(),
            Self::County => "county".to_string(),
            Self::Direction => "direction".to_string(),
            Self::Distance => "distance_miles".to_string(),
            Self::City => "city".to_string(),
            Self::Schools => "school_districts".to_string(),
            Self::Highways => "highways".to_string(),
            Self::Landmark(i) => format!("landmarks[{i}]"),
            Self::Persona => "persona_tags".to_string(),
            Self::Anchor => "anchor".to_string(),
        }
    }
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Record field interpolation: `{schools}`, `{landmark.2}`, ...
    Field(Placeholder),
}

/// A parsed template: a sequence of segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{placeholder}` → `Field`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if chars[i] == '{' {
                if i + 1 < len && chars[i + 1] == '{' {
                    literal_buf.push('{');
                    i += 2;
                    continue;
                }

                if !literal_buf.is_empty() {
                    segments.push(TemplateSegment::Literal(std::mem::take(&mut literal_buf)));
                }

                let start = i + 1;
                let mut end = start;
                while end < len && chars[end] != '}' {
                    if chars[end] == '{' {
                        return Err(TemplateError::TemplateParse(
                            "nested braces are not allowed".to_string(),
                        ));
                    }
                    end += 1;
                }

                if end >= len {
                    return Err(TemplateError::TemplateParse("unclosed brace".to_string()));
                }

                let content: String = chars[start..end].iter().collect();
                let content = content.trim();
                if content.is_empty() {
                    return Err(TemplateError::TemplateParse("empty braces".to_string()));
                }

                segments.push(TemplateSegment::Field(Placeholder::parse(content)?));
                i = end + 1;
            } else if chars[i] == '}' {
                if i + 1 < len && chars[i + 1] == '}' {
                    literal_buf.push('}');
                    i += 2;
                    continue;
                }
                return Err(TemplateError::TemplateParse(
                    "unmatched closing brace".to_string(),
                ));
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    /// Placeholders referenced by this template, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            TemplateSegment::Field(p) => Some(*p),
            TemplateSegment::Literal(_) => None,
        })
    }
}

/// A weighted text alternative within a paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    pub weight: u32,
    pub template: Template,
}

/// One paragraph of a description: a set of weighted alternatives, exactly
/// one of which is rendered per record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphRule {
    pub alternatives: Vec<Alternative>,
}

/// How the five highlight bullets are produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HighlightStyle {
    /// Each landmark becomes `prefix + landmark`.
    ConvenienceAccess { prefix: String },
    /// Five fixed claims, rendered against the record.
    Claims(Vec<Template>),
}

/// Everything needed to render one [`TemplateKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub kind: TemplateKind,
    pub paragraphs: Vec<ParagraphRule>,
    pub highlights: HighlightStyle,
    /// Used for `bestFor` when the record has no persona tags.
    pub default_best_for: Vec<String>,
}

impl TemplateDefinition {
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    /// Every placeholder any alternative or claim of this definition uses.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut found = Vec::new();
        let paragraph_templates = self
            .paragraphs
            .iter()
            .flat_map(|p| p.alternatives.iter().map(|a| &a.template));
        let claim_templates: Vec<&Template> = match &self.highlights {
            HighlightStyle::Claims(claims) => claims.iter().collect(),
            HighlightStyle::ConvenienceAccess { .. } => Vec::new(),
        };
        for template in paragraph_templates.chain(claim_templates) {
            for p in template.placeholders() {
                if !found.contains(&p) {
                    found.push(p);
                }
            }
        }
        found
    }

    fn validate(&self) -> Result<(), TemplateError> {
        if self.paragraphs.is_empty() {
            return Err(TemplateError::NoParagraphs(self.id().to_string()));
        }
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            if paragraph.alternatives.iter().all(|a| a.weight == 0) {
                return Err(TemplateError::EmptyParagraph {
                    kind: self.id().to_string(),
                    index,
                });
            }
        }
        if let HighlightStyle::Claims(claims) = &self.highlights {
            if claims.len() != HIGHLIGHT_COUNT {
                return Err(TemplateError::ClaimCount {
                    kind: self.id().to_string(),
                    expected: HIGHLIGHT_COUNT,
                    actual: claims.len(),
                });
            }
        }
        // Only anchored records reach LandmarkAnchored, and only they have an anchor
        if self.kind != TemplateKind::LandmarkAnchored
            && self.placeholders().contains(&Placeholder::Anchor)
        {
            return Err(TemplateError::AnchorOutsideAnchoredKind(self.id().to_string()));
        }
        Ok(())
    }
}

/// The loaded template definitions, keyed by kind.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TemplateSet {
    pub definitions: HashMap<TemplateKind, TemplateDefinition>,
}

// RON deserialization helpers. The file format keys templates by their
// string id and keeps template text unparsed.

#[derive(Debug, Deserialize)]
struct RonAlternative {
    weight: u32,
    text: String,
}

#[derive(Debug, Deserialize)]
enum RonHighlights {
    ConvenienceAccess { prefix: String },
    Claims(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Template")]
struct RonTemplate {
    paragraphs: Vec<Vec<RonAlternative>>,
    highlights: RonHighlights,
    #[serde(default)]
    default_best_for: Vec<String>,
}

impl TemplateSet {
    /// Load a template set from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<TemplateSet, TemplateError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a template set from a RON string.
    pub fn parse_ron(input: &str) -> Result<TemplateSet, TemplateError> {
        let raw: HashMap<String, RonTemplate> = ron::from_str(input)?;
        let mut definitions = HashMap::new();

        for (id, ron_template) in raw {
            let kind = TemplateKind::ALL
                .iter()
                .copied()
                .find(|k| k.id() == id)
                .ok_or_else(|| TemplateError::UnknownKind(id.clone()))?;

            let mut paragraphs = Vec::new();
            for ron_paragraph in ron_template.paragraphs {
                let mut alternatives = Vec::new();
                for alt in ron_paragraph {
                    alternatives.push(Alternative {
                        weight: alt.weight,
                        template: Template::parse(&alt.text)?,
                    });
                }
                paragraphs.push(ParagraphRule { alternatives });
            }

            let highlights = match ron_template.highlights {
                RonHighlights::ConvenienceAccess { prefix } => {
                    HighlightStyle::ConvenienceAccess { prefix }
                }
                RonHighlights::Claims(claims) => HighlightStyle::Claims(
                    claims
                        .iter()
                        .map(|c| Template::parse(c))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
            };

            let definition = TemplateDefinition {
                kind,
                paragraphs,
                highlights,
                default_best_for: ron_template.default_best_for,
            };
            definition.validate()?;
            definitions.insert(kind, definition);
        }

        Ok(TemplateSet { definitions })
    }

    /// Merge another template set into this one. Definitions from `other`
    /// override definitions in `self` with the same kind.
    pub fn merge(&mut self, other: TemplateSet) {
        for (kind, definition) in other.definitions {
            self.definitions.insert(kind, definition);
        }
    }

    pub fn get(&self, kind: TemplateKind) -> Option<&TemplateDefinition> {
        self.definitions.get(&kind)
    }

    /// Kinds with no definition in this set.
    pub fn missing_kinds(&self) -> Vec<TemplateKind> {
        TemplateKind::ALL
            .iter()
            .copied()
            .filter(|k| !self.definitions.contains_key(k))
            .collect()
    }
}

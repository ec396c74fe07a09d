/// Template rendering: placeholder substitution and list-length contracts.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

use crate::core::error::{GenerationError, ListBounds};
use crate::core::template::{
    HighlightStyle, ParagraphRule, Placeholder, Template, TemplateDefinition, TemplateSegment,
    HIGHLIGHT_COUNT,
};
use crate::schema::neighborhood::{County, NeighborhoodInput};

pub const LANDMARK_BOUNDS: ListBounds = ListBounds::exactly(5);
pub const SCHOOL_DISTRICT_BOUNDS: ListBounds = ListBounds::between(1, 3);
pub const HIGHLIGHT_BOUNDS: ListBounds = ListBounds::exactly(HIGHLIGHT_COUNT);
pub const BEST_FOR_BOUNDS: ListBounds = ListBounds::between(3, 4);

/// Paragraph separator inside a description.
const PARAGRAPH_BREAK: &str = "\n\n";

/// Word placed before the last item when joining a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    Or,
    And,
}

impl Conjunction {
    fn word(&self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
        }
    }
}

/// Join display items: `A`, `A or B`, `A, B or C`.
pub fn join_list<S: AsRef<str>>(items: &[S], conjunction: Conjunction) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!("{} {} {}", head.join(", "), conjunction.word(), last.as_ref())
        }
    }
}

/// Format miles without a trailing `.0`: 8.0 → "8", 12.5 → "12.5".
pub fn format_distance(miles: f64) -> String {
    // Adding 0.0 turns -0.0 into 0.0
    let rounded = (miles * 10.0).round() / 10.0 + 0.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Lowercase the first letter of a label so it reads mid-sentence. Labels
/// led by an acronym ("UT students", "LGBTQ+ families") are kept as written.
pub fn lowercase_first(label: &str) -> String {
    let first_word = label.split_whitespace().next().unwrap_or_default();
    if first_word.chars().skip(1).any(char::is_uppercase) {
        return label.to_string();
    }
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Per-run settings the renderer reads.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub city: &'a str,
    pub seed: u64,
}

/// The four rendered fields of a record, before assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFields {
    pub description: String,
    pub highlights: Vec<String>,
    pub best_for: Vec<String>,
    pub nearby_landmarks: Vec<String>,
}

/// Seed for one record's alternative choices. Depends only on the run seed
/// and the slug, so reordering the input does not change any record. The
/// digest is fixed-width, so native and wasm32 builds agree.
pub fn record_seed(seed: u64, slug: &str) -> u64 {
    let digest = Sha256::digest(slug.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    seed.wrapping_add(u64::from_le_bytes(head))
}

/// Render one record against its selected template definition.
pub fn render(
    input: &NeighborhoodInput,
    county: County,
    definition: &TemplateDefinition,
    ctx: &RenderContext<'_>,
) -> Result<RenderedFields, GenerationError> {
    check_len(input, "landmarks", input.landmarks.len(), LANDMARK_BOUNDS)?;
    check_len(
        input,
        "school_districts",
        input.school_districts.len(),
        SCHOOL_DISTRICT_BOUNDS,
    )?;

    let best_for = if input.persona_tags.is_empty() {
        definition.default_best_for.clone()
    } else {
        input.persona_tags.clone()
    };

    let resolver = Resolver {
        input,
        county,
        city: ctx.city,
        best_for: &best_for,
    };
    let mut rng = StdRng::seed_from_u64(record_seed(ctx.seed, &input.slug));

    let mut paragraphs = Vec::with_capacity(definition.paragraphs.len());
    for paragraph in &definition.paragraphs {
        let template = choose_alternative(paragraph, &mut rng);
        paragraphs.push(resolver.render_template(template)?);
    }
    let description = paragraphs.join(PARAGRAPH_BREAK);

    let highlights = match &definition.highlights {
        HighlightStyle::ConvenienceAccess { prefix } => input
            .landmarks
            .iter()
            .enumerate()
            .map(|(i, landmark)| {
                resolver
                    .non_empty(landmark, Placeholder::Landmark(i))
                    .map(|l| format!("{prefix}{l}"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        HighlightStyle::Claims(claims) => claims
            .iter()
            .map(|claim| resolver.render_template(claim))
            .collect::<Result<Vec<_>, _>>()?,
    };
    check_len(input, "highlights", highlights.len(), HIGHLIGHT_BOUNDS)?;

    check_len(input, "best_for", best_for.len(), BEST_FOR_BOUNDS)?;
    let best_for = best_for
        .iter()
        .map(|tag| resolver.non_empty(tag, Placeholder::Persona))
        .collect::<Result<Vec<_>, _>>()?;

    let nearby_landmarks = input
        .landmarks
        .iter()
        .map(|landmark| landmark.trim().to_string())
        .collect();

    Ok(RenderedFields {
        description,
        highlights,
        best_for,
        nearby_landmarks,
    })
}

/// Pick one alternative by weight. Single-alternative paragraphs skip the
/// draw so adding an alternative elsewhere does not shift their output.
fn choose_alternative<'t>(paragraph: &'t ParagraphRule, rng: &mut StdRng) -> &'t Template {
    if let [only] = paragraph.alternatives.as_slice() {
        return &only.template;
    }
    let weights: Vec<u32> = paragraph.alternatives.iter().map(|a| a.weight).collect();
    match WeightedIndex::new(&weights) {
        Ok(dist) => &paragraph.alternatives[dist.sample(rng)].template,
        // Definitions are validated on load; fall back to the first entry
        // for hand-built ones.
        Err(_) => &paragraph.alternatives[0].template,
    }
}

fn check_len(
    input: &NeighborhoodInput,
    field: &str,
    actual: usize,
    expected: ListBounds,
) -> Result<(), GenerationError> {
    if expected.contains(actual) {
        Ok(())
    } else {
        Err(GenerationError::InvalidListLength {
            slug: input.slug.clone(),
            field: field.to_string(),
            expected,
            actual,
        })
    }
}

struct Resolver<'a> {
    input: &'a NeighborhoodInput,
    county: County,
    city: &'a str,
    best_for: &'a [String],
}

impl Resolver<'_> {
    fn render_template(&self, template: &Template) -> Result<String, GenerationError> {
        let mut out = String::new();
        for segment in &template.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Field(placeholder) => out.push_str(&self.resolve(*placeholder)?),
            }
        }
        Ok(out)
    }

    fn resolve(&self, placeholder: Placeholder) -> Result<String, GenerationError> {
        let input = self.input;
        match placeholder {
            Placeholder::Name => self.non_empty(&input.name, placeholder),
            Placeholder::Slug => self.non_empty(&input.slug, placeholder),
            Placeholder::County => Ok(self.county.name().to_string()),
            Placeholder::Direction => self.non_empty(&input.direction, placeholder),
            Placeholder::Distance => Ok(format_distance(input.distance_miles)),
            Placeholder::City => self.non_empty(self.city, placeholder),
            Placeholder::Schools => {
                self.joined(&input.school_districts, Conjunction::Or, placeholder)
            }
            Placeholder::Highways => self.joined(&input.highways, Conjunction::And, placeholder),
            Placeholder::Landmark(i) => match input.landmarks.get(i) {
                Some(landmark) => self.non_empty(landmark, placeholder),
                None => Err(self.missing(placeholder)),
            },
            Placeholder::Persona => match self.best_for.first() {
                Some(tag) => self.non_empty(tag, placeholder).map(|t| lowercase_first(&t)),
                None => Err(self.missing(placeholder)),
            },
            Placeholder::Anchor => input
                .anchor
                .map(|anchor| anchor.phrase().to_string())
                .ok_or_else(|| self.missing(placeholder)),
        }
    }

    fn joined(
        &self,
        items: &[String],
        conjunction: Conjunction,
        placeholder: Placeholder,
    ) -> Result<String, GenerationError> {
        if items.is_empty() {
            return Err(self.missing(placeholder));
        }
        let trimmed = items
            .iter()
            .map(|item| self.non_empty(item, placeholder))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(join_list(&trimmed, conjunction))
    }

    fn non_empty(&self, value: &str, placeholder: Placeholder) -> Result<String, GenerationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err(self.missing(placeholder))
        } else {
            Ok(trimmed.to_string())
        }
    }

    fn missing(&self, placeholder: Placeholder) -> GenerationError {
        GenerationError::MissingField {
            slug: self.input.slug.clone(),
            field: placeholder.field(),
        }
    }
}

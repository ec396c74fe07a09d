/// Template selection: distance buckets with a landmark-anchor override.

use serde::{Deserialize, Serialize};

use crate::core::error::GenerationError;
use crate::schema::neighborhood::{is_valid_slug, County, NeighborhoodInput};
use crate::schema::template_kind::TemplateKind;

/// Upper bounds (inclusive, in miles) of the distance buckets. A distance
/// exactly on a bound belongs to the closer-to-town bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceBuckets {
    pub in_town_max: f64,
    pub suburb_max: f64,
    pub outer_ring_max: f64,
}

impl Default for DistanceBuckets {
    fn default() -> Self {
        Self {
            in_town_max: 7.0,
            suburb_max: 16.0,
            outer_ring_max: 24.0,
        }
    }
}

impl DistanceBuckets {
    /// Bucket a validated distance.
    pub fn classify(&self, distance_miles: f64) -> TemplateKind {
        if distance_miles <= self.in_town_max {
            TemplateKind::InTownWalkable
        } else if distance_miles <= self.suburb_max {
            TemplateKind::EstablishedSuburb
        } else if distance_miles <= self.outer_ring_max {
            TemplateKind::OuterRing
        } else {
            TemplateKind::Exurban
        }
    }
}

/// The outcome of selection: which template, plus the validated county the
/// renderer needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub kind: TemplateKind,
    pub county: County,
}

/// Pick the template for a record. Pure: the same record and buckets always
/// give the same selection.
pub fn select(
    input: &NeighborhoodInput,
    buckets: &DistanceBuckets,
) -> Result<Selection, GenerationError> {
    check_slug(&input.slug)?;
    if input.county.trim().is_empty() {
        return Err(missing(input, "county"));
    }
    let county = input
        .known_county()
        .ok_or_else(|| GenerationError::UnknownCounty {
            slug: input.slug.clone(),
            county: input.county.clone(),
        })?;

    let distance = input.distance_miles;
    if distance.is_nan() {
        return Err(missing(input, "distance_miles"));
    }
    if !distance.is_finite() || distance < 0.0 {
        return Err(GenerationError::InvalidDistance {
            slug: input.slug.clone(),
            distance,
        });
    }

    let kind = if input.anchor.is_some() {
        TemplateKind::LandmarkAnchored
    } else {
        buckets.classify(distance)
    };

    Ok(Selection { kind, county })
}

/// Reject blank or malformed slugs before they are claimed.
pub fn check_slug(slug: &str) -> Result<(), GenerationError> {
    if slug.trim().is_empty() {
        return Err(GenerationError::MissingField {
            slug: slug.to_string(),
            field: "slug".to_string(),
        });
    }
    if !is_valid_slug(slug) {
        return Err(GenerationError::InvalidSlug {
            slug: slug.to_string(),
        });
    }
    Ok(())
}

fn missing(input: &NeighborhoodInput, field: &str) -> GenerationError {
    GenerationError::MissingField {
        slug: input.slug.clone(),
        field: field.to_string(),
    }
}

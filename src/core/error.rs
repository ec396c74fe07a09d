/// Per-record generation failures.

use std::fmt;
use thiserror::Error;

use crate::schema::template_kind::TemplateKind;

/// Allowed length range for a list-valued field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBounds {
    pub min: usize,
    pub max: usize,
}

impl ListBounds {
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        (self.min..=self.max).contains(&len)
    }
}

impl fmt::Display for ListBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// Why one input record produced no output. None of these stop the run on
/// their own; see `DuplicatePolicy` for the one exception.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("{slug}: unknown county '{county}'")]
    UnknownCounty { slug: String, county: String },
    #[error("{slug}: missing value for field '{field}'")]
    MissingField { slug: String, field: String },
    #[error("{slug}: field '{field}' must have {expected} entries, found {actual}")]
    InvalidListLength {
        slug: String,
        field: String,
        expected: ListBounds,
        actual: usize,
    },
    #[error("slug '{slug}' must be lowercase words joined by hyphens")]
    InvalidSlug { slug: String },
    #[error("{slug}: distance {distance} is not a non-negative number of miles")]
    InvalidDistance { slug: String, distance: f64 },
    #[error("duplicate slug '{slug}' at index {second_index} (first seen at index {first_index})")]
    DuplicateSlug {
        slug: String,
        first_index: usize,
        second_index: usize,
    },
    #[error("{slug}: no template defined for '{}'", .kind.id())]
    NoTemplate { slug: String, kind: TemplateKind },
}

impl GenerationError {
    /// Slug of the record the error belongs to.
    pub fn slug(&self) -> &str {
        match self {
            Self::UnknownCounty { slug, .. }
            | Self::MissingField { slug, .. }
            | Self::InvalidListLength { slug, .. }
            | Self::InvalidSlug { slug }
            | Self::InvalidDistance { slug, .. }
            | Self::DuplicateSlug { slug, .. }
            | Self::NoTemplate { slug, .. } => slug,
        }
    }
}

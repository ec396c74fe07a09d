/// Record assembly: slug uniqueness, ordering, and failure collection.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::GenerationError;
use crate::core::render::RenderedFields;
use crate::schema::content::CommunityContent;

/// What to do when a slug appears a second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Stop the whole run at the first duplicate.
    AbortRun,
    /// Keep the first occurrence, report the later one as a failure.
    #[default]
    SkipDuplicate,
}

/// Slugs claimed so far in one run, with the input index that claimed them.
#[derive(Debug, Clone, Default)]
pub struct SlugLedger {
    seen: FxHashMap<String, usize>,
}

impl SlugLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `slug` for the record at `index`. Fails if an earlier record
    /// already holds it; the earlier claim is kept.
    pub fn claim(&mut self, slug: &str, index: usize) -> Result<(), GenerationError> {
        if let Some(&first_index) = self.seen.get(slug) {
            return Err(GenerationError::DuplicateSlug {
                slug: slug.to_string(),
                first_index,
                second_index: index,
            });
        }
        self.seen.insert(slug.to_string(), index);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// One input that produced no record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    pub index: usize,
    pub slug: String,
    pub error: GenerationError,
}

/// Output of a generation run: records in input order plus failures.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub records: Vec<CommunityContent>,
    pub failures: Vec<RecordFailure>,
}

impl GenerationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Folds rendered records into a [`GenerationReport`].
#[derive(Debug)]
pub struct Assembler {
    policy: DuplicatePolicy,
    ledger: SlugLedger,
    report: GenerationReport,
}

impl Assembler {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ledger: SlugLedger::new(),
            report: GenerationReport::default(),
        }
    }

    /// Claim the slug of input `index`. Under `AbortRun` a duplicate is
    /// returned as an error; under `SkipDuplicate` it is recorded as a
    /// failure and `Ok(false)` tells the caller to skip the record.
    pub fn claim(&mut self, index: usize, slug: &str) -> Result<bool, GenerationError> {
        match self.ledger.claim(slug, index) {
            Ok(()) => Ok(true),
            Err(err) => match self.policy {
                DuplicatePolicy::AbortRun => Err(err),
                DuplicatePolicy::SkipDuplicate => {
                    warn!(slug, index, "skipping duplicate slug");
                    self.fail(index, slug, err);
                    Ok(false)
                }
            },
        }
    }

    /// Append a rendered record, or record its failure.
    pub fn accept(
        &mut self,
        index: usize,
        slug: &str,
        rendered: Result<RenderedFields, GenerationError>,
    ) {
        match rendered {
            Ok(fields) => self.report.records.push(CommunityContent {
                slug: slug.to_string(),
                description: fields.description,
                highlights: fields.highlights,
                best_for: fields.best_for,
                nearby_landmarks: fields.nearby_landmarks,
            }),
            Err(err) => {
                warn!(slug, index, error = %err, "record failed");
                self.fail(index, slug, err);
            }
        }
    }

    fn fail(&mut self, index: usize, slug: &str, error: GenerationError) {
        self.report.failures.push(RecordFailure {
            index,
            slug: slug.to_string(),
            error,
        });
    }

    pub fn finish(self) -> GenerationReport {
        self.report
    }
}

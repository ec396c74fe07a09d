/// The content pipeline: NeighborhoodInput → CommunityContent orchestration.
///
/// Wires together template selection, rendering and record assembly.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::builtin_templates;
use crate::core::assemble::{Assembler, DuplicatePolicy, GenerationReport};
use crate::core::config::{ConfigError, GeneratorConfig};
use crate::core::error::GenerationError;
use crate::core::render::{self, RenderContext, RenderedFields};
use crate::core::select::{self, check_slug, DistanceBuckets, Selection};
use crate::core::template::{TemplateError, TemplateSet};
use crate::schema::content::CommunityContent;
use crate::schema::neighborhood::NeighborhoodInput;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation aborted: {0}")]
    Aborted(GenerationError),
}

/// The top-level generator. Built via `ContentGenerator::builder()`.
///
/// Generation takes `&self`: all per-run state lives in the run itself, so
/// one generator can serve any number of runs.
#[derive(Debug, Clone)]
pub struct ContentGenerator {
    templates: TemplateSet,
    buckets: DistanceBuckets,
    city: String,
    seed: u64,
    duplicate_policy: DuplicatePolicy,
}

/// Builder for constructing a `ContentGenerator`.
pub struct ContentGeneratorBuilder {
    config: GeneratorConfig,
    config_path: Option<PathBuf>,
    templates_path: Option<PathBuf>,
    use_builtin: bool,
    /// Directly provided templates (for testing without files).
    templates: Option<TemplateSet>,
    seed: Option<u64>,
    city: Option<String>,
    buckets: Option<DistanceBuckets>,
    duplicate_policy: Option<DuplicatePolicy>,
}

impl ContentGenerator {
    pub fn builder() -> ContentGeneratorBuilder {
        ContentGeneratorBuilder {
            config: GeneratorConfig::default(),
            config_path: None,
            templates_path: None,
            use_builtin: true,
            templates: None,
            seed: None,
            city: None,
            buckets: None,
            duplicate_policy: None,
        }
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Choose the template for one record.
    pub fn select(&self, input: &NeighborhoodInput) -> Result<Selection, GenerationError> {
        select::select(input, &self.buckets)
    }

    /// Select and render one record without touching any run state.
    pub fn render(&self, input: &NeighborhoodInput) -> Result<RenderedFields, GenerationError> {
        let selection = self.select(input)?;
        debug!(slug = %input.slug, template = selection.kind.id(), "selected template");

        let definition =
            self.templates
                .get(selection.kind)
                .ok_or_else(|| GenerationError::NoTemplate {
                    slug: input.slug.clone(),
                    kind: selection.kind,
                })?;

        let ctx = RenderContext {
            city: &self.city,
            seed: self.seed,
        };
        render::render(input, selection.county, definition, &ctx)
    }

    /// Generate a single record. Slug uniqueness is not checked here.
    pub fn generate_one(
        &self,
        input: &NeighborhoodInput,
    ) -> Result<CommunityContent, GenerationError> {
        let fields = self.render(input)?;
        Ok(CommunityContent {
            slug: input.slug.clone(),
            description: fields.description,
            highlights: fields.highlights,
            best_for: fields.best_for,
            nearby_landmarks: fields.nearby_landmarks,
        })
    }

    /// Generate records for a whole table, in input order.
    ///
    /// Failing records are collected in the report and never stop the run.
    /// The only exception is a duplicate slug under
    /// [`DuplicatePolicy::AbortRun`].
    pub fn generate(
        &self,
        inputs: &[NeighborhoodInput],
    ) -> Result<GenerationReport, PipelineError> {
        let mut assembler = Assembler::new(self.duplicate_policy);

        for (index, input) in inputs.iter().enumerate() {
            // A blank or malformed slug never enters the ledger
            if let Err(err) = check_slug(&input.slug) {
                assembler.accept(index, &input.slug, Err(err));
                continue;
            }
            if !assembler
                .claim(index, &input.slug)
                .map_err(PipelineError::Aborted)?
            {
                continue;
            }
            assembler.accept(index, &input.slug, self.render(input));
        }

        let report = assembler.finish();
        info!(
            inputs = inputs.len(),
            records = report.records.len(),
            failures = report.failures.len(),
            "generation finished"
        );
        Ok(report)
    }
}

impl ContentGeneratorBuilder {
    /// Start from an already loaded config.
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the config from a RON file at build time.
    pub fn config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Template file merged over the built-in templates.
    pub fn templates_path(mut self, path: impl AsRef<Path>) -> Self {
        self.templates_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skip the built-in templates; only explicitly provided ones are used.
    pub fn without_builtin_templates(mut self) -> Self {
        self.use_builtin = false;
        self
    }

    /// Provide templates directly (for testing without files). Replaces the
    /// built-in set.
    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string());
        self
    }

    pub fn buckets(mut self, buckets: DistanceBuckets) -> Self {
        self.buckets = Some(buckets);
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<ContentGenerator, PipelineError> {
        let config = match self.config_path {
            Some(ref path) => GeneratorConfig::load_from_ron(path)?,
            None => self.config,
        };

        // Provided templates replace the built-ins; file templates override both
        let mut templates = match self.templates {
            Some(set) => set,
            None if self.use_builtin => builtin_templates::austin_metro()?,
            None => TemplateSet::default(),
        };
        for path in [config.templates.as_ref(), self.templates_path.as_ref()]
            .into_iter()
            .flatten()
        {
            debug!(path = %path.display(), "loading templates");
            templates.merge(TemplateSet::load_from_ron(path)?);
        }

        Ok(ContentGenerator {
            templates,
            buckets: self.buckets.unwrap_or(config.buckets),
            city: self.city.unwrap_or(config.city),
            seed: self.seed.unwrap_or(config.seed),
            duplicate_policy: self.duplicate_policy.unwrap_or(config.duplicate_policy),
        })
    }
}

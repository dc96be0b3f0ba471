//! # Pipeline
//!
//! Runs extraction and then a sequence of [`Step`]s for each message. Each step returns a new
//! content record; a step that fails is skipped (the content from before it is kept), the failure
//! is logged with the step name and recorded in the outcome, and the remaining steps still run.

use std::sync::Arc;

use relay_core::{NormalizedContent, RawMessage};
use tracing::{debug, info, instrument, warn};

use crate::config::{OriginProfile, PipelineConfig};
use crate::error::{PipelineError, StepError};
use crate::extract::extract;
use crate::footer::FooterComposer;
use crate::pricing::PriceRewriter;
use crate::rules::StaticRules;
use crate::tagger::SourceTagger;

/// One transformation applied after extraction. Must be pure.
pub trait Step: Send + Sync {
    /// Name used in logs and [`StepFailure`].
    fn name(&self) -> &'static str;

    /// Returns the transformed content. `content` is never modified.
    fn apply(
        &self,
        content: &NormalizedContent,
        profile: &OriginProfile,
    ) -> Result<NormalizedContent, StepError>;
}

/// A step that failed for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: &'static str,
    pub error: StepError,
}

/// Result of [`Pipeline::process`]: final content plus any skipped steps.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub content: NormalizedContent,
    pub failures: Vec<StepFailure>,
}

impl ProcessOutcome {
    /// True when every step succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Extraction followed by ordered steps, with an explicit config.
#[derive(Clone)]
pub struct Pipeline {
    config: Arc<PipelineConfig>,
    steps: Vec<Arc<dyn Step>>,
}

impl Pipeline {
    /// Standard pipeline: tagger, price rewriter, static rules, footer. Compiles all patterns once.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let rules = StaticRules::new(&config.price_remap, &config.keyword_remap)?;
        let footer = FooterComposer::new(config.contact.clone());
        Ok(Self::empty(config)
            .add_step(Arc::new(SourceTagger))
            .add_step(Arc::new(PriceRewriter::new()?))
            .add_step(Arc::new(rules))
            .add_step(Arc::new(footer)))
    }

    /// Pipeline that only extracts; add steps with [`Pipeline::add_step`].
    pub fn empty(config: PipelineConfig) -> Self {
        Self {
            config: Arc::new(config),
            steps: Vec::new(),
        }
    }

    /// Appends a step (runs after the ones already added).
    pub fn add_step(mut self, step: Arc<dyn Step>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Transforms one message. Never fails as a whole; see [`ProcessOutcome::failures`].
    #[instrument(skip(self, raw), fields(origin = raw.origin, message_id = %raw.id))]
    pub fn process(&self, raw: &RawMessage) -> ProcessOutcome {
        let profile = self.config.profile_for(raw.origin);
        let mut content = extract(raw);
        let mut failures = Vec::new();

        debug!(
            tag = %profile.tag,
            text_len = content.text.len(),
            media = content.media.len(),
            media_kind = ?content.media_kind,
            "step: content extracted"
        );

        for step in &self.steps {
            match step.apply(&content, &profile) {
                Ok(next) => {
                    debug!(step = step.name(), "step: done");
                    content = next;
                }
                Err(error) => {
                    warn!(
                        step = step.name(),
                        error = %error,
                        "step: failed, keeping content from before this step"
                    );
                    failures.push(StepFailure {
                        step: step.name(),
                        error,
                    });
                }
            }
        }

        info!(
            text_len = content.text.len(),
            failed_steps = failures.len(),
            "step: pipeline finished"
        );

        ProcessOutcome { content, failures }
    }
}

/// Applies `f` to each non-empty text field (text, then caption) and returns the new record.
pub(crate) fn try_map_fields<F>(
    content: &NormalizedContent,
    mut f: F,
) -> Result<NormalizedContent, StepError>
where
    F: FnMut(&str) -> Result<String, StepError>,
{
    let mut next = content.clone();
    if !content.text.is_empty() {
        next.text = f(&content.text)?;
    }
    if !content.caption.is_empty() {
        next.caption = f(&content.caption)?;
    }
    Ok(next)
}

//! Relay: pipeline + dispatcher for one destination chat.

use async_trait::async_trait;
use relay_core::{DispatchReport, Dispatcher, Handler, RawMessage, Result};
use relay_pipeline::Pipeline;
use tracing::{error, info, instrument, warn};

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The origin is configured but disabled; nothing was processed.
    Disabled,
    /// Processed and handed to the dispatcher. `failed_steps` lists pipeline steps that were
    /// skipped for this message.
    Dispatched {
        report: DispatchReport,
        failed_steps: Vec<&'static str>,
    },
}

/// Processes inbound messages and sends the result to the destination chat.
#[derive(Clone)]
pub struct Relay {
    pipeline: Pipeline,
    dispatcher: Dispatcher,
}

impl Relay {
    pub fn new(pipeline: Pipeline, dispatcher: Dispatcher) -> Self {
        Self {
            pipeline,
            dispatcher,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Runs the pipeline on `raw` and dispatches the result after the origin's pacing delay.
    #[instrument(skip(self, raw), fields(origin = raw.origin, message_id = %raw.id))]
    pub async fn relay(&self, raw: RawMessage) -> Result<RelayOutcome> {
        let config = self.pipeline.config();
        if config.profile(raw.origin).is_some_and(|p| !p.enabled) {
            info!("Origin disabled, message dropped");
            return Ok(RelayOutcome::Disabled);
        }

        let outcome = self.pipeline.process(&raw);
        for failure in &outcome.failures {
            warn!(step = failure.step, error = %failure.error, "Pipeline step skipped");
        }

        let report = self
            .dispatcher
            .dispatch(&outcome.content, config.delay_for(raw.origin))
            .await
            .map_err(|e| {
                error!(error = %e, "Dispatch failed");
                e
            })?;

        Ok(RelayOutcome::Dispatched {
            report,
            failed_steps: outcome.failures.iter().map(|f| f.step).collect(),
        })
    }
}

#[async_trait]
impl Handler for Relay {
    async fn handle(&self, raw: RawMessage) -> Result<()> {
        self.relay(raw).await.map(|_| ())
    }
}

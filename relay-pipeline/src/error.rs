//! Error types for the pipeline.
//!
//! [`PipelineError`] is returned when building a pipeline; [`StepError`] when a single step gives
//! up on a message; [`PriceError`] when one amount cannot be re-priced (that amount is left as is).

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors building a [`crate::Pipeline`] from config.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}

/// Failure of one step on one message; the orchestrator keeps the previous content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("Invalid source tag: {0:?}")]
    InvalidTag(String),

    #[error("Step failed: {0}")]
    Failed(String),
}

/// Failure to re-price a single matched amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Price overflow for amount {0}")]
    Overflow(Decimal),
}

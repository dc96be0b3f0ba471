//! # relay-pipeline
//!
//! Pure content transformation for relayed messages. A [`Pipeline`] runs, in order:
//!
//! 1. [`extract`]: raw message → [`relay_core::NormalizedContent`]
//! 2. [`SourceTagger`]: `"[<tag>] "` prefix from the origin profile
//! 3. [`PriceRewriter`]: currency-tagged amounts re-priced (watch vs non-watch)
//! 4. [`StaticRules`]: legacy price literals and keyword remap
//! 5. [`FooterComposer`]: delivery notice and contact block, appended once
//!
//! No I/O; configuration is passed in as a [`PipelineConfig`].

pub mod chain;
pub mod config;
pub mod error;
pub mod extract;
pub mod footer;
pub mod pricing;
pub mod rules;
pub mod tagger;

pub use chain::{Pipeline, ProcessOutcome, Step, StepFailure};
pub use config::{ContactInfo, OriginProfile, PipelineConfig, PricingFormula};
pub use error::{PipelineError, PriceError, StepError};
pub use extract::extract;
pub use footer::FooterComposer;
pub use pricing::{is_watch_item, Currency, PriceMatch, PriceRewriter, PriceScanner};
pub use rules::StaticRules;
pub use tagger::SourceTagger;

//! Pipeline configuration: per-origin profiles, pricing formula, footer texts and remap tables.
//!
//! Built by the application's config loader and passed into [`crate::Pipeline::new`]; nothing here
//! reads the environment.

use std::borrow::Cow;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PriceError;

/// Delivery notice appended when the origin has no override.
pub const DEFAULT_DELIVERY_NOTICE: &str = "Quick Free delivery 3/4 days";

/// Pacing delay before each outbound send when the origin has no override.
pub const DEFAULT_SEND_DELAY: Duration = Duration::from_secs(2);

/// Brand names and generic terms that classify a message as a watch item.
pub const DEFAULT_WATCH_KEYWORDS: &[&str] = &[
    "watch",
    "watchs",
    "watches",
    "timepiece",
    "chronograph",
    "analog",
    "digital watch",
    "luxury watch",
    "sports watch",
    "casio",
    "rolex",
    "omega",
    "seiko",
    "citizen",
    "tag",
    "hublot",
    "breitling",
    "ap",
    "audemars",
];

/// Legacy price literals, applied in this order.
pub const DEFAULT_PRICE_REMAP: &[(&str, &str)] = &[
    ("1000", "1200"),
    ("500", "600"),
    ("85", "95"),
    ("90", "100"),
    ("50", "60"),
    ("30", "35"),
    ("25", "30"),
];

/// Keyword substitutions (case-insensitive), applied in this order.
pub const DEFAULT_KEYWORD_REMAP: &[(&str, &str)] = &[
    ("AAA", "Premium"),
    ("NEW STOCK", "FRESH STOCK"),
    ("old", "new"),
    ("cheap", "affordable"),
];

/// Markup formula: watches get a flat markup, everything else a multiplier plus a flat fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingFormula {
    pub watch_flat_markup: Decimal,
    pub nonwatch_multiplier: Decimal,
    pub nonwatch_flat_fee: Decimal,
    /// Round the new price up to the next whole unit.
    pub round_up: bool,
}

impl Default for PricingFormula {
    fn default() -> Self {
        Self {
            watch_flat_markup: Decimal::from(105),
            nonwatch_multiplier: Decimal::new(165, 2),
            nonwatch_flat_fee: Decimal::from(5),
            round_up: true,
        }
    }
}

impl PricingFormula {
    /// New price for `amount`. Ceiling when `round_up` is set; otherwise the exact value.
    pub fn apply(&self, amount: Decimal, is_watch: bool) -> Result<Decimal, PriceError> {
        let raw = if is_watch {
            amount.checked_add(self.watch_flat_markup)
        } else {
            amount
                .checked_mul(self.nonwatch_multiplier)
                .and_then(|v| v.checked_add(self.nonwatch_flat_fee))
        }
        .ok_or(PriceError::Overflow(amount))?;

        Ok(if self.round_up { raw.ceil() } else { raw })
    }
}

/// Contact block appended to outgoing messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub link: String,
    pub text: String,
    pub shop_name: String,
    pub auto_add: bool,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            link: "https://t.me/BFSshopuk".to_string(),
            text: "For orders message here".to_string(),
            shop_name: "BFS".to_string(),
            auto_add: true,
        }
    }
}

/// Settings for one source chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginProfile {
    pub id: i64,
    pub name: String,
    /// Short label placed in the `"[<tag>] "` prefix.
    pub tag: String,
    pub send_delay: Duration,
    pub watch_keywords: Vec<String>,
    pub formula: PricingFormula,
    pub delivery_notice: String,
    pub enabled: bool,
}

/// Everything the pipeline reads. Passed explicitly; tests build synthetic ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub profiles: Vec<OriginProfile>,
    pub watch_keywords: Vec<String>,
    pub formula: PricingFormula,
    pub delivery_notice: String,
    pub contact: ContactInfo,
    pub price_remap: Vec<(String, String)>,
    pub keyword_remap: Vec<(String, String)>,
    pub default_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
            watch_keywords: to_strings(DEFAULT_WATCH_KEYWORDS),
            formula: PricingFormula::default(),
            delivery_notice: DEFAULT_DELIVERY_NOTICE.to_string(),
            contact: ContactInfo::default(),
            price_remap: to_pairs(DEFAULT_PRICE_REMAP),
            keyword_remap: to_pairs(DEFAULT_KEYWORD_REMAP),
            default_delay: DEFAULT_SEND_DELAY,
        }
    }
}

impl PipelineConfig {
    /// Profile for a configured origin seeded from the global defaults.
    ///
    /// `ordinal` is the 1-based position in the source list; it names the synthesized tag
    /// (`G<ordinal>`) when `tag` is `None`.
    pub fn profile_with_defaults(
        &self,
        id: i64,
        ordinal: usize,
        name: impl Into<String>,
        tag: Option<String>,
    ) -> OriginProfile {
        OriginProfile {
            id,
            name: name.into(),
            tag: tag.unwrap_or_else(|| format!("G{}", ordinal)),
            send_delay: self.default_delay,
            watch_keywords: self.watch_keywords.clone(),
            formula: self.formula.clone(),
            delivery_notice: self.delivery_notice.clone(),
            enabled: true,
        }
    }

    /// Configured profile for `origin`, if any.
    pub fn profile(&self, origin: i64) -> Option<&OriginProfile> {
        self.profiles.iter().find(|p| p.id == origin)
    }

    /// Configured profile, or one synthesized from global defaults with tag `G<origin>`.
    pub fn profile_for(&self, origin: i64) -> Cow<'_, OriginProfile> {
        match self.profile(origin) {
            Some(profile) => Cow::Borrowed(profile),
            None => Cow::Owned(OriginProfile {
                id: origin,
                name: format!("Unknown source {}", origin),
                tag: format!("G{}", origin),
                send_delay: self.default_delay,
                watch_keywords: self.watch_keywords.clone(),
                formula: self.formula.clone(),
                delivery_notice: self.delivery_notice.clone(),
                enabled: true,
            }),
        }
    }

    /// Outbound pacing for `origin`: the profile's delay, else the global default.
    pub fn delay_for(&self, origin: i64) -> Duration {
        self.profile(origin)
            .map(|p| p.send_delay)
            .unwrap_or(self.default_delay)
    }

    pub fn origin_ids(&self) -> Vec<i64> {
        self.profiles.iter().map(|p| p.id).collect()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn to_pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(old, new)| (old.to_string(), new.to_string()))
        .collect()
}

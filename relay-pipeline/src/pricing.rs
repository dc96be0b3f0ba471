//! Price rewriting.
//!
//! A [`PriceScanner`] runs an ordered list of typed matchers over the text. Each match carries the
//! amount, its currency and the byte range it covers; overlapping matches are resolved in favour of
//! the earlier matcher (then the leftmost match). The [`PriceRewriter`] re-prices every accepted
//! match and splices the results in right to left, so ranges stay valid and identical amounts
//! elsewhere in the text are never touched.
//!
//! Matcher priority:
//!
//! | matcher       | example          | rendered as |
//! |---------------|------------------|-------------|
//! | pound         | `£35`, `£99.99`  | `£N`        |
//! | dollar        | `$40`            | `£N`        |
//! | unit word     | `1000 taka`, `500 rs`, `20 rupees` | `৳N` |
//! | trailing ৳    | `1000৳`          | `৳N`        |
//! | leading ৳     | `৳ 1000`         | `৳N`        |
//! | labeled field | `price: 50`, `cost 70` | label kept, `৳N` |

use std::ops::Range;
use std::str::FromStr;

use regex::Regex;
use relay_core::NormalizedContent;
use rust_decimal::Decimal;
use tracing::warn;

use crate::chain::{try_map_fields, Step};
use crate::config::{OriginProfile, PricingFormula};
use crate::error::{PipelineError, PriceError, StepError};

const AMOUNT: &str = r"(\d+(?:\.\d{2})?)";

/// Currency a match was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Pound,
    Dollar,
    Taka,
}

impl Currency {
    /// Marker used when rendering the new price. Dollar amounts are shown in pounds.
    pub fn display_marker(&self) -> &'static str {
        match self {
            Currency::Pound | Currency::Dollar => "£",
            Currency::Taka => "৳",
        }
    }
}

/// What part of a match the new price replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replace {
    /// Amount and its currency marker.
    Whole,
    /// Only the amount; a leading label such as `price:` stays.
    AmountOnly,
}

struct Matcher {
    name: &'static str,
    regex: Regex,
    currency: Currency,
    replace: Replace,
}

/// One recognised monetary amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceMatch {
    pub matcher: &'static str,
    pub currency: Currency,
    /// Digits as written, e.g. `"99.99"`.
    pub amount: String,
    /// Bytes replaced by the new price.
    pub range: Range<usize>,
}

/// Ordered typed matchers for currency-tagged amounts.
pub struct PriceScanner {
    matchers: Vec<Matcher>,
}

impl PriceScanner {
    pub fn new() -> Result<Self, PipelineError> {
        let matcher = |name, pattern: String, currency, replace| -> Result<Matcher, PipelineError> {
            Ok(Matcher {
                name,
                regex: Regex::new(&pattern)?,
                currency,
                replace,
            })
        };

        Ok(Self {
            matchers: vec![
                matcher("pound", format!("£{}", AMOUNT), Currency::Pound, Replace::Whole)?,
                matcher("dollar", format!(r"\${}", AMOUNT), Currency::Dollar, Replace::Whole)?,
                matcher(
                    "unit_word",
                    format!(r"(?i){}\s*(?:taka|tk|rupees|rupee|rs)\b", AMOUNT),
                    Currency::Taka,
                    Replace::Whole,
                )?,
                matcher(
                    "trailing_taka",
                    format!(r"{}\s*৳", AMOUNT),
                    Currency::Taka,
                    Replace::Whole,
                )?,
                matcher(
                    "leading_taka",
                    format!(r"৳\s*{}", AMOUNT),
                    Currency::Taka,
                    Replace::Whole,
                )?,
                matcher(
                    "labeled",
                    format!(r"(?i)\b(?:price|cost)[:\s]*{}", AMOUNT),
                    Currency::Taka,
                    Replace::AmountOnly,
                )?,
            ],
        })
    }

    /// Non-overlapping matches, sorted by position.
    pub fn scan(&self, text: &str) -> Vec<PriceMatch> {
        let mut accepted: Vec<PriceMatch> = Vec::new();

        for matcher in &self.matchers {
            for caps in matcher.regex.captures_iter(text) {
                let (Some(whole), Some(amount)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let overlaps = accepted
                    .iter()
                    .any(|m| whole.start() < m.range.end && m.range.start < whole.end());
                if overlaps {
                    continue;
                }
                let range = match matcher.replace {
                    Replace::Whole => whole.range(),
                    Replace::AmountOnly => amount.range(),
                };
                accepted.push(PriceMatch {
                    matcher: matcher.name,
                    currency: matcher.currency,
                    amount: amount.as_str().to_string(),
                    range,
                });
            }
        }

        accepted.sort_by_key(|m| m.range.start);
        accepted
    }
}

/// True when any keyword occurs in `text` as a case-insensitive substring.
pub fn is_watch_item(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|k| lower.contains(&k.to_lowercase()))
}

/// Re-prices every recognised amount under the origin's formula.
pub struct PriceRewriter {
    scanner: PriceScanner,
}

impl PriceRewriter {
    pub fn new() -> Result<Self, PipelineError> {
        Ok(Self {
            scanner: PriceScanner::new()?,
        })
    }

    /// Rewrites all amounts in `text`. The watch/non-watch classification is computed once for the
    /// whole text. An amount that cannot be re-priced is left as written.
    pub fn rewrite(&self, text: &str, keywords: &[String], formula: &PricingFormula) -> String {
        let matches = self.scanner.scan(text);
        if matches.is_empty() {
            return text.to_string();
        }

        let is_watch = is_watch_item(text, keywords);
        let mut out = text.to_string();

        for m in matches.iter().rev() {
            match reprice(&m.amount, is_watch, formula) {
                Ok(price) => {
                    out.replace_range(
                        m.range.clone(),
                        &format!("{}{}", m.currency.display_marker(), price),
                    );
                }
                Err(e) => {
                    warn!(
                        matcher = m.matcher,
                        amount = %m.amount,
                        error = %e,
                        "Price left unmodified"
                    );
                }
            }
        }

        out
    }
}

/// New whole-unit price for a written amount. Without `round_up` the fraction is dropped for display.
fn reprice(amount: &str, is_watch: bool, formula: &PricingFormula) -> Result<Decimal, PriceError> {
    let value =
        Decimal::from_str(amount).map_err(|_| PriceError::InvalidAmount(amount.to_string()))?;
    Ok(formula.apply(value, is_watch)?.trunc().normalize())
}

impl Step for PriceRewriter {
    fn name(&self) -> &'static str {
        "price_rewriter"
    }

    fn apply(
        &self,
        content: &NormalizedContent,
        profile: &OriginProfile,
    ) -> Result<NormalizedContent, StepError> {
        try_map_fields(content, |text| {
            Ok(self.rewrite(text, &profile.watch_keywords, &profile.formula))
        })
    }
}

//! Static rule engine: legacy price-literal remap followed by keyword remap.
//!
//! Both tables are ordered and compiled once in [`StaticRules::new`]. Replacement strings are
//! inserted literally.

use regex::{NoExpand, Regex};
use relay_core::NormalizedContent;

use crate::chain::{try_map_fields, Step};
use crate::config::OriginProfile;
use crate::error::{PipelineError, StepError};

struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn new(pattern: &str, replacement: String) -> Result<Self, PipelineError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement,
        })
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, NoExpand(&self.replacement))
            .into_owned()
    }
}

/// Compiled legacy price and keyword tables.
pub struct StaticRules {
    price_rules: Vec<Rule>,
    keyword_rules: Vec<Rule>,
}

impl StaticRules {
    pub fn new(
        price_remap: &[(String, String)],
        keyword_remap: &[(String, String)],
    ) -> Result<Self, PipelineError> {
        let mut price_rules = Vec::with_capacity(price_remap.len() * 6);
        for (old, new) in price_remap {
            if old.is_empty() {
                return Err(PipelineError::Config("empty legacy price literal".to_string()));
            }
            let old = regex::escape(old);
            price_rules.push(Rule::new(&format!(r"\b{}\b", old), new.clone())?);
            price_rules.push(Rule::new(&format!(r"৳\s*{}\b", old), format!("৳ {}", new))?);
            price_rules.push(Rule::new(
                &format!(r"\b{}\s*taka", old),
                format!("{} taka", new),
            )?);
            price_rules.push(Rule::new(&format!(r"\b{}\s*tk", old), format!("{} tk", new))?);
            price_rules.push(Rule::new(&format!(r"£{}\b", old), format!("£{}", new))?);
            price_rules.push(Rule::new(&format!(r"\${}\b", old), format!("${}", new))?);
        }

        let keyword_rules = keyword_remap
            .iter()
            .filter(|(old, _)| !old.is_empty())
            .map(|(old, new)| Rule::new(&format!("(?i){}", regex::escape(old)), new.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            price_rules,
            keyword_rules,
        })
    }

    /// Applies every price rule, then every keyword rule, in table order.
    pub fn apply_text(&self, text: &str) -> String {
        self.price_rules
            .iter()
            .chain(&self.keyword_rules)
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}

impl Step for StaticRules {
    fn name(&self) -> &'static str {
        "static_rules"
    }

    fn apply(
        &self,
        content: &NormalizedContent,
        _profile: &OriginProfile,
    ) -> Result<NormalizedContent, StepError> {
        try_map_fields(content, |text| Ok(self.apply_text(text)))
    }
}

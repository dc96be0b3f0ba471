//! Pipeline settings from env: global pricing, footer texts and one profile per source chat.
//!
//! Source `n` (1-based position in SOURCE_GROUP_IDS) reads GROUP_<n>_DELAY,
//! GROUP_<n>_DELIVERY_MESSAGE and GROUP_<n>_ENABLED; its tag comes from SOURCE_GROUP_LETTERS
//! (`<id>:<tag>` pairs) or defaults to `G<n>`.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use relay_core::parse_chat_id;
use relay_pipeline::{ContactInfo, PipelineConfig, PricingFormula};

use super::env::{flag, list, parsed, var};

/// Builds the pipeline config from env, falling back to built-in defaults for anything unset.
pub fn load_pipeline_config() -> Result<PipelineConfig> {
    let defaults = PipelineConfig::default();

    let formula = PricingFormula {
        watch_flat_markup: parsed("WATCH_FLAT_MARKUP", defaults.formula.watch_flat_markup)?,
        nonwatch_multiplier: parsed("NON_WATCH_MULTIPLIER", defaults.formula.nonwatch_multiplier)?,
        nonwatch_flat_fee: parsed("NON_WATCH_DELIVERY_FEE", defaults.formula.nonwatch_flat_fee)?,
        round_up: flag("ROUND_UP_PRICES", defaults.formula.round_up),
    };

    let contact = ContactInfo {
        link: var("TELEGRAM_LINK").unwrap_or(defaults.contact.link.clone()),
        text: var("CONTACT_TEXT").unwrap_or(defaults.contact.text.clone()),
        shop_name: var("SHOP_NAME").unwrap_or(defaults.contact.shop_name.clone()),
        auto_add: flag("AUTO_ADD_CONTACT", defaults.contact.auto_add),
    };

    let watch_keywords = match list("WATCH_KEYWORDS") {
        keywords if keywords.is_empty() => defaults.watch_keywords.clone(),
        keywords => keywords,
    };

    let mut config = PipelineConfig {
        watch_keywords,
        formula,
        delivery_notice: var("DELIVERY_MESSAGE").unwrap_or(defaults.delivery_notice.clone()),
        contact,
        default_delay: Duration::from_secs(parsed(
            "MESSAGE_DELAY",
            defaults.default_delay.as_secs(),
        )?),
        ..defaults
    };

    let names = source_names();
    let tags = source_tags()?;
    for (i, id) in source_ids()?.into_iter().enumerate() {
        let n = i + 1;
        let name = names
            .get(i)
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Source Group {}", n));

        let mut profile = config.profile_with_defaults(id, n, name, tags.get(&id).cloned());
        profile.send_delay = Duration::from_secs(parsed(
            &format!("GROUP_{}_DELAY", n),
            config.default_delay.as_secs(),
        )?);
        if let Some(notice) = var(&format!("GROUP_{}_DELIVERY_MESSAGE", n)) {
            profile.delivery_notice = notice;
        }
        profile.enabled = flag(&format!("GROUP_{}_ENABLED", n), true);
        config.profiles.push(profile);
    }

    Ok(config)
}

/// SOURCE_GROUP_IDS, else the single SOURCE_GROUP_ID, else none.
fn source_ids() -> Result<Vec<i64>> {
    let ids = match list("SOURCE_GROUP_IDS") {
        ids if ids.is_empty() => var("SOURCE_GROUP_ID").into_iter().collect(),
        ids => ids,
    };
    ids.iter()
        .map(|id| parse_chat_id(id).context("Invalid source group id"))
        .collect()
}

/// Positional names; blank entries keep their position.
fn source_names() -> Vec<String> {
    var("SOURCE_GROUP_NAMES")
        .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
        .unwrap_or_default()
}

fn source_tags() -> Result<HashMap<i64, String>> {
    list("SOURCE_GROUP_LETTERS")
        .iter()
        .map(|pair| -> Result<(i64, String)> {
            let (id, tag) = pair.split_once(':').with_context(|| {
                format!("SOURCE_GROUP_LETTERS entry {:?} is not <id>:<tag>", pair)
            })?;
            let tag = tag.trim();
            if tag.is_empty() {
                anyhow::bail!("SOURCE_GROUP_LETTERS entry {:?} has an empty tag", pair);
            }
            Ok((
                parse_chat_id(id).context("Invalid id in SOURCE_GROUP_LETTERS")?,
                tag.to_string(),
            ))
        })
        .collect()
}

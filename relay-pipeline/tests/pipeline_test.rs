//! End-to-end tests for [`relay_pipeline::Pipeline`].
//!
//! Each test builds an explicit [`PipelineConfig`] with one configured origin tagged `S`, runs a
//! raw message through the standard steps and checks the exact output.

use std::sync::Arc;

use relay_core::{MediaField, MediaHandle, MediaItem, MediaKind, NormalizedContent, RawMessage};
use relay_pipeline::{OriginProfile, Pipeline, PipelineConfig, Step, StepError};

const SOURCE: i64 = -1001;
const FOOTER: &str =
    "\n\nQuick Free delivery 3/4 days\n\nFor orders message here\nhttps://t.me/BFSshopuk";

fn config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    let profile = config.profile_with_defaults(SOURCE, 1, "Sam", Some("S".to_string()));
    config.profiles.push(profile);
    config
}

fn pipeline() -> Pipeline {
    Pipeline::new(config()).unwrap()
}

/// **Test: non-watch item is tagged, re-priced and footed.**
#[test]
fn test_non_watch_message() {
    let raw = RawMessage::new("1", SOURCE).with_text("Gucci wallet for £35 - Boxed");

    let outcome = pipeline().process(&raw);

    assert!(outcome.is_clean());
    assert_eq!(
        outcome.content.text,
        format!("[S] Gucci wallet for £63 - Boxed{}", FOOTER)
    );
}

/// **Test: watch item gets the flat markup.**
#[test]
fn test_watch_message() {
    let raw = RawMessage::new("2", SOURCE).with_text("Casio Watch - £150");

    let outcome = pipeline().process(&raw);

    assert_eq!(outcome.content.text, format!("[S] Casio Watch - £255{}", FOOTER));
}

/// **Test: dynamic rewrite runs before the keyword remap.**
///
/// `cheap` contains the watch keyword `ap`, so `1000 taka` takes the flat markup.
#[test]
fn test_rewrite_then_keyword_remap() {
    let raw = RawMessage::new("3", SOURCE).with_text("old price 1000 taka, now cheap");

    let outcome = pipeline().process(&raw);

    assert_eq!(
        outcome.content.text,
        format!("[S] new price ৳1105, now affordable{}", FOOTER)
    );
}

/// **Test: a bare legacy literal with no currency is remapped.**
#[test]
fn test_legacy_literal_remap() {
    let raw = RawMessage::new("4", SOURCE).with_text("Bag £35, only 1000 made");

    let outcome = pipeline().process(&raw);

    assert_eq!(
        outcome.content.text,
        format!("[S] Bag £63, only 1200 made{}", FOOTER)
    );
}

/// **Test: text without prices only gains the tag and footer.**
#[test]
fn test_no_price_only_tag_and_footer() {
    let raw = RawMessage::new("5", SOURCE).with_text("Restock Monday");

    let outcome = pipeline().process(&raw);

    assert_eq!(outcome.content.text, format!("[S] Restock Monday{}", FOOTER));
}

/// **Test: empty message stays empty.**
#[test]
fn test_empty_message_stays_empty() {
    let outcome = pipeline().process(&RawMessage::new("6", SOURCE));

    assert!(outcome.is_clean());
    assert!(outcome.content.is_empty());
}

/// **Test: unknown origin is tagged `G<origin>` and uses global defaults.**
#[test]
fn test_unknown_origin_uses_synthesized_tag() {
    let raw = RawMessage::new("7", -42).with_text("Restock Monday");

    let outcome = pipeline().process(&raw);

    assert!(outcome.content.text.starts_with("[G-42] Restock Monday"));
}

/// **Test: per-origin delivery notice overrides the global one.**
#[test]
fn test_origin_delivery_notice() {
    let mut config = config();
    config.profiles[0].delivery_notice = "2/4 weeks delivery".to_string();
    let pipeline = Pipeline::new(config).unwrap();
    let raw = RawMessage::new("8", SOURCE).with_text("Bag");

    let outcome = pipeline.process(&raw);

    assert_eq!(
        outcome.content.text,
        "[S] Bag\n\n2/4 weeks delivery\n\nFor orders message here\nhttps://t.me/BFSshopuk"
    );
}

/// **Test: captioned album keeps media order and transforms the caption.**
#[test]
fn test_captioned_album() {
    let raw = RawMessage::new("9", SOURCE)
        .with_caption("Bags £35")
        .with_media(MediaField::Album(vec![
            MediaItem::new(MediaKind::Photo, MediaHandle::new("p1")),
            MediaItem::new(MediaKind::Photo, MediaHandle::new("p2")),
        ]));

    let outcome = pipeline().process(&raw);
    let expected = format!("[S] Bags £63{}", FOOTER);

    assert_eq!(outcome.content.text, expected);
    assert_eq!(outcome.content.caption, expected);
    assert_eq!(
        outcome.content.media,
        vec![MediaHandle::new("p1"), MediaHandle::new("p2")]
    );
    assert_eq!(outcome.content.outgoing_caption(), Some(expected.as_str()));
}

/// **Test: invalid tag fails only the tagger; the other steps still run.**
#[test]
fn test_failed_step_is_skipped() {
    let mut config = config();
    config.profiles[0].tag = String::new();
    let pipeline = Pipeline::new(config).unwrap();
    let raw = RawMessage::new("10", SOURCE).with_text("Bag £35");

    let outcome = pipeline.process(&raw);

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].step, "source_tagger");
    assert_eq!(outcome.content.text, format!("Bag £63{}", FOOTER));
}

struct Failing;

impl Step for Failing {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn apply(
        &self,
        _content: &NormalizedContent,
        _profile: &OriginProfile,
    ) -> Result<NormalizedContent, StepError> {
        Err(StepError::Failed("boom".to_string()))
    }
}

struct Upper;

impl Step for Upper {
    fn name(&self) -> &'static str {
        "upper"
    }

    fn apply(
        &self,
        content: &NormalizedContent,
        _profile: &OriginProfile,
    ) -> Result<NormalizedContent, StepError> {
        Ok(NormalizedContent {
            text: content.text.to_uppercase(),
            ..content.clone()
        })
    }
}

/// **Test: custom steps run in insertion order and a failure keeps the previous content.**
#[test]
fn test_custom_steps() {
    let pipeline = Pipeline::empty(config())
        .add_step(Arc::new(Failing))
        .add_step(Arc::new(Upper));
    let raw = RawMessage::new("11", SOURCE).with_text("bag");

    let outcome = pipeline.process(&raw);

    assert_eq!(pipeline.step_names(), vec!["failing", "upper"]);
    assert_eq!(outcome.content.text, "BAG");
    assert_eq!(
        outcome.failures[0].error,
        StepError::Failed("boom".to_string())
    );
}

/// **Test: standard step order.**
#[test]
fn test_standard_step_order() {
    assert_eq!(
        pipeline().step_names(),
        vec!["source_tagger", "price_rewriter", "static_rules", "footer_composer"]
    );
}

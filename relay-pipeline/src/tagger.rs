//! Source tagging: `"[<tag>] "` prefix on text and caption.
//!
//! Not idempotent; a message must pass through exactly once.

use relay_core::NormalizedContent;

use crate::chain::{try_map_fields, Step};
use crate::config::OriginProfile;
use crate::error::StepError;

/// Prefixes each non-empty field with the origin's tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceTagger;

/// `"[<tag>] <text>"`.
pub fn tag_text(text: &str, tag: &str) -> String {
    format!("[{}] {}", tag, text)
}

impl Step for SourceTagger {
    fn name(&self) -> &'static str {
        "source_tagger"
    }

    fn apply(
        &self,
        content: &NormalizedContent,
        profile: &OriginProfile,
    ) -> Result<NormalizedContent, StepError> {
        let tag = profile.tag.trim();
        if tag.is_empty() || tag.contains(']') {
            return Err(StepError::InvalidTag(profile.tag.clone()));
        }
        try_map_fields(content, |text| Ok(tag_text(text, tag)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;

    fn profile(tag: &str) -> OriginProfile {
        PipelineConfig::default().profile_with_defaults(-1, 1, "Sam", Some(tag.to_string()))
    }

    #[test]
    fn test_tags_text_and_caption() {
        let content = NormalizedContent {
            text: "bag".to_string(),
            caption: "bag".to_string(),
            ..Default::default()
        };
        let tagged = SourceTagger.apply(&content, &profile("S")).unwrap();
        assert_eq!(tagged.text, "[S] bag");
        assert_eq!(tagged.caption, "[S] bag");
    }

    #[test]
    fn test_empty_fields_stay_empty() {
        let content = NormalizedContent {
            text: "bag".to_string(),
            ..Default::default()
        };
        let tagged = SourceTagger.apply(&content, &profile("S")).unwrap();
        assert_eq!(tagged.text, "[S] bag");
        assert!(tagged.caption.is_empty());

        let empty = SourceTagger
            .apply(&NormalizedContent::default(), &profile("S"))
            .unwrap();
        assert!(empty.text.is_empty());
    }

    /// Re-tagging double-prefixes; the pipeline relies on running this step once.
    #[test]
    fn test_tagging_twice_double_prefixes() {
        let content = NormalizedContent {
            text: "[S] bag".to_string(),
            ..Default::default()
        };
        let tagged = SourceTagger.apply(&content, &profile("S")).unwrap();
        assert_eq!(tagged.text, "[S] [S] bag");
    }

    #[test]
    fn test_invalid_tag_is_rejected() {
        let content = NormalizedContent {
            text: "bag".to_string(),
            ..Default::default()
        };
        assert_eq!(
            SourceTagger.apply(&content, &profile(" ")),
            Err(StepError::InvalidTag(" ".to_string()))
        );
        assert!(SourceTagger.apply(&content, &profile("A]B")).is_err());
    }
}

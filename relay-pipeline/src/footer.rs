//! Footer composition: delivery notice and contact block, each appended at most once.

use relay_core::NormalizedContent;

use crate::chain::{try_map_fields, Step};
use crate::config::{ContactInfo, OriginProfile};
use crate::error::StepError;

/// Appends the origin's delivery notice and the global contact block.
#[derive(Debug, Clone)]
pub struct FooterComposer {
    contact: ContactInfo,
}

impl FooterComposer {
    pub fn new(contact: ContactInfo) -> Self {
        Self { contact }
    }

    /// Appends `"\n\n<notice>"` unless the notice is already present (case-insensitive), then the
    /// contact block under the same rule when `auto_add` is set. Empty text is returned as is.
    pub fn compose(&self, text: &str, delivery_notice: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut out = text.to_string();
        if !contains_ignore_case(&out, delivery_notice) {
            out.push_str("\n\n");
            out.push_str(delivery_notice);
        }

        if self.contact.auto_add && !contains_ignore_case(&out, &self.contact.text) {
            out.push_str("\n\n");
            out.push_str(&self.contact.text);
            out.push('\n');
            out.push_str(&self.contact.link);
        }

        out
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Step for FooterComposer {
    fn name(&self) -> &'static str {
        "footer_composer"
    }

    fn apply(
        &self,
        content: &NormalizedContent,
        profile: &OriginProfile,
    ) -> Result<NormalizedContent, StepError> {
        try_map_fields(content, |text| {
            Ok(self.compose(text, &profile.delivery_notice))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTICE: &str = "Quick Free delivery 3/4 days";

    fn composer() -> FooterComposer {
        FooterComposer::new(ContactInfo::default())
    }

    #[test]
    fn test_appends_notice_and_contact() {
        let out = composer().compose("[S] bag £63", NOTICE);
        assert_eq!(
            out,
            "[S] bag £63\n\nQuick Free delivery 3/4 days\n\nFor orders message here\nhttps://t.me/BFSshopuk"
        );
    }

    #[test]
    fn test_compose_is_idempotent() {
        let composer = composer();
        let once = composer.compose("bag", NOTICE);
        let twice = composer.compose(&once, NOTICE);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_existing_notice_any_case_is_not_repeated() {
        let out = composer().compose("bag\nQUICK FREE DELIVERY 3/4 DAYS", NOTICE);
        assert_eq!(out.matches("\n\n").count(), 1);
        assert!(out.ends_with("https://t.me/BFSshopuk"));
    }

    #[test]
    fn test_contact_disabled() {
        let composer = FooterComposer::new(ContactInfo {
            auto_add: false,
            ..ContactInfo::default()
        });
        let out = composer.compose("bag", "2/4 weeks delivery");
        assert_eq!(out, "bag\n\n2/4 weeks delivery");
    }

    #[test]
    fn test_empty_text_gets_no_footer() {
        assert_eq!(composer().compose("", NOTICE), "");
    }
}

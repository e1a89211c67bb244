//! Static support page content.

use serde::{Deserialize, Serialize};

/// A way to reach the support team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactChannel {
    /// Channel name (e.g. "Telegram").
    pub label: String,
    /// Handle or address shown to the customer.
    pub handle: String,
    /// Link that opens the channel.
    pub url: String,
}

/// A frequently asked question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Content of the support tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupportInfo {
    #[serde(default)]
    pub contacts: Vec<ContactChannel>,
    #[serde(default)]
    pub faq: Vec<FaqEntry>,
}

impl Default for SupportInfo {
    fn default() -> Self {
        Self {
            contacts: vec![
                ContactChannel {
                    label: "Telegram".to_string(),
                    handle: "@videoshop_support".to_string(),
                    url: "https://t.me/videoshop_support".to_string(),
                },
                ContactChannel {
                    label: "Email".to_string(),
                    handle: "support@videoshop.example".to_string(),
                    url: "mailto:support@videoshop.example".to_string(),
                },
            ],
            faq: vec![
                FaqEntry {
                    question: "How do I get access to a lesson?".to_string(),
                    answer: "After payment the link is sent to you by the shop bot.".to_string(),
                },
                FaqEntry {
                    question: "Can I get a refund?".to_string(),
                    answer: "Yes, within 14 days of purchase.".to_string(),
                },
                FaqEntry {
                    question: "Are there discounts?".to_string(),
                    answer: "Follow our Telegram channel for promotions.".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_support_info() {
        let info = SupportInfo::default();
        assert_eq!(info.contacts.len(), 2);
        assert_eq!(info.faq.len(), 3);
        assert!(info.contacts[1].url.starts_with("mailto:"));
    }

    #[test]
    fn test_partial_support_info_deserializes() {
        let info: SupportInfo = serde_json::from_str(r#"{"faq": []}"#).unwrap();
        assert!(info.contacts.is_empty());
        assert!(info.faq.is_empty());
    }
}

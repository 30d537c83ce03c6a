use serde::{Deserialize, Serialize};

use super::Metadata;

/// SMS event as published on the SMS topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub recipient: String,
    pub message_body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl SmsMessage {
    pub fn new(recipient: impl Into<String>, message_body: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message_body: message_body.into(),
            priority: None,
            metadata: Metadata::new(),
        }
    }
}

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Metadata;

/// Delivery priority requested from the push provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushPriority {
    High,
    Normal,
    Low,
    /// Any other value the producer sent; rejected by [`is_valid`](Self::is_valid)
    #[serde(untagged)]
    Other(String),
}

impl PushPriority {
    pub fn is_valid(&self) -> bool {
        !matches!(self, PushPriority::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            PushPriority::High => "high",
            PushPriority::Normal => "normal",
            PushPriority::Low => "low",
            PushPriority::Other(s) => s,
        }
    }
}

impl fmt::Display for PushPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Push notification event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    pub user_id: String,
    pub device_tokens: Vec<String>,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<PushPriority>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_action: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl PushMessage {
    pub fn new(
        user_id: impl Into<String>,
        device_tokens: Vec<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            device_tokens,
            title: title.into(),
            body: body.into(),
            image_url: None,
            priority: None,
            data: HashMap::new(),
            badge: None,
            sound: None,
            click_action: None,
            metadata: Metadata::new(),
        }
    }
}

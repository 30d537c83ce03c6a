//! Notification kind tag

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The notification variants this client publishes
///
/// The wire tag (`as_str`) is what consumers switch on; it appears as the
/// envelope `type` field, the `type` record header, and the id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Email,
    Sms,
    InApp,
    Push,
    Feedback,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 5] = [
        NotificationKind::Email,
        NotificationKind::Sms,
        NotificationKind::InApp,
        NotificationKind::Push,
        NotificationKind::Feedback,
    ];

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Email => "email",
            NotificationKind::Sms => "sms",
            NotificationKind::InApp => "in_app",
            NotificationKind::Push => "push",
            NotificationKind::Feedback => "feedback",
        }
    }

    /// Human-readable label used in delivery log lines
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Email => "Email",
            NotificationKind::Sms => "SMS",
            NotificationKind::InApp => "In-App Notification",
            NotificationKind::Push => "Push Notification",
            NotificationKind::Feedback => "Feedback",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown notification kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for NotificationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(NotificationKind::Email),
            "sms" => Ok(NotificationKind::Sms),
            "in_app" | "in-app" | "inapp" => Ok(NotificationKind::InApp),
            "push" => Ok(NotificationKind::Push),
            "feedback" => Ok(NotificationKind::Feedback),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

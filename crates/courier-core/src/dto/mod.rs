//! Payload types published under each notification kind
//!
//! Field names follow the JSON contract the notification consumers read.
//! Optional fields are left out of the JSON when unset.

mod email;
mod feedback;
mod inapp;
mod push;
mod sms;

pub use email::{EmailContact, EmailMessage, SendEmailRequest};
pub use feedback::FeedbackMessage;
pub use inapp::InAppMessage;
pub use push::{PushMessage, PushPriority};
pub use sms::SmsMessage;

/// Free-form key/value bag carried by most payloads
pub type Metadata = std::collections::HashMap<String, serde_json::Value>;

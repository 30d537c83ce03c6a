use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Metadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

impl EmailContact {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    pub fn named(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }
}

/// Email event as published on the email topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub recipients: Vec<EmailContact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailContact>,
    pub subject: String,
    /// `otp`, `message`, `transaction`, ...
    #[serde(rename = "type")]
    pub email_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub transaction_details: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl EmailMessage {
    pub fn new(
        recipients: Vec<EmailContact>,
        subject: impl Into<String>,
        email_type: impl Into<String>,
    ) -> Self {
        Self {
            recipients,
            cc: Vec::new(),
            subject: subject.into(),
            email_type: email_type.into(),
            otp_code: None,
            receiver: None,
            message_body: None,
            link: None,
            customer_name: None,
            transaction_details: Metadata::new(),
            priority: None,
            metadata: Metadata::new(),
        }
    }

    /// The send request the email consumer builds from this event
    pub fn to_send_request(&self) -> SendEmailRequest {
        SendEmailRequest {
            recipients: self.recipients.clone(),
            cc: self.cc.clone(),
            subject: self.subject.clone(),
            email_type: self.email_type.clone(),
            otp_code: self.otp_code.clone(),
            receiver: self.receiver.clone(),
            message_body: self.message_body.clone(),
            link: self.link.clone(),
            customer_name: self.customer_name.clone(),
            transaction_details: self.transaction_details.clone(),
        }
    }
}

/// Provider-facing send request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SendEmailRequest {
    #[validate(length(min = 1, message = "recipients are required"))]
    pub recipients: Vec<EmailContact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailContact>,
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type is required"))]
    pub email_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub transaction_details: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_message_json_names() {
        let mut message = EmailMessage::new(
            vec![EmailContact::named("Abebe", "abebe@example.com")],
            "Your code",
            "otp",
        );
        message.otp_code = Some("482913".to_string());

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "recipients": [{ "name": "Abebe", "email": "abebe@example.com" }],
                "subject": "Your code",
                "type": "otp",
                "otp_code": "482913"
            })
        );
    }

    #[test]
    fn test_email_message_parses_consumer_shape() {
        let raw = json!({
            "recipients": [{ "email": "a@example.com" }],
            "cc": [{ "email": "b@example.com", "name": "B" }],
            "subject": "Receipt",
            "type": "transaction",
            "transaction_details": { "amount": 120 },
            "priority": 2
        });
        let message: EmailMessage = serde_json::from_value(raw).unwrap();

        assert_eq!(message.recipients, vec![EmailContact::new("a@example.com")]);
        assert_eq!(message.cc[0].name.as_deref(), Some("B"));
        assert_eq!(message.transaction_details["amount"], json!(120));
        assert_eq!(message.priority, Some(2));
    }

    #[test]
    fn test_send_request_validation() {
        let message = EmailMessage::new(vec![EmailContact::new("a@example.com")], "Hi", "message");
        assert!(message.to_send_request().validate().is_ok());

        let empty = EmailMessage::new(Vec::new(), "", "message").to_send_request();
        let errors = empty.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("recipients"));
        assert!(fields.contains_key("subject"));
        assert!(!fields.contains_key("email_type"));
    }
}

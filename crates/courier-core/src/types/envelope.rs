//! Wire envelope wrapped around every outgoing notification

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record header carrying the envelope id
pub const HEADER_MESSAGE_ID: &str = "message_id";
/// Record header carrying the kind tag
pub const HEADER_TYPE: &str = "type";
/// Record header carrying the RFC3339 creation time
pub const HEADER_TIMESTAMP: &str = "timestamp";

/// Uniform wrapper placed around every published payload
///
/// Serialized shape:
///
/// ```json
/// {
///   "id": "email-1718000000000000000",
///   "type": "email",
///   "payload": { ... },
///   "created_at": "2024-06-10T06:13:20Z",
///   "headers": { "message_id": "...", "type": "email", "timestamp": "..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    /// `<kind>-<unix nanos>`
    pub id: String,
    /// Kind tag (`email`, `sms`, `in_app`, `push`, `feedback`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// The serialized notification payload
    pub payload: Value,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl NotificationEnvelope {
    /// Wrap `payload` under `kind`, stamped with the current time
    pub fn new<T: Serialize + ?Sized>(kind: &str, payload: &T) -> serde_json::Result<Self> {
        Self::at(kind, payload, Utc::now())
    }

    /// Wrap `payload` under `kind` with an explicit creation time
    pub fn at<T: Serialize + ?Sized>(
        kind: &str,
        payload: &T,
        created_at: DateTime<Utc>,
    ) -> serde_json::Result<Self> {
        let payload = serde_json::to_value(payload)?;
        let id = message_id(kind, created_at);

        let mut envelope = Self {
            id,
            kind: kind.to_string(),
            payload,
            created_at,
            headers: BTreeMap::new(),
        };
        for (key, value) in envelope.record_headers() {
            envelope.headers.insert(key.to_string(), value);
        }
        Ok(envelope)
    }

    /// Creation time formatted as RFC3339 with second precision
    pub fn timestamp(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// The three headers attached to the broker record, in wire order
    pub fn record_headers(&self) -> [(&'static str, String); 3] {
        [
            (HEADER_MESSAGE_ID, self.id.clone()),
            (HEADER_TYPE, self.kind.clone()),
            (HEADER_TIMESTAMP, self.timestamp()),
        ]
    }

    /// Serialize to the JSON bytes placed on the wire
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Parse an envelope back from wire bytes
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Decode the payload into its typed form
    pub fn decode_payload<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.payload.clone())
    }
}

/// Envelope id: the kind tag followed by the creation time in unix nanoseconds
pub fn message_id(kind: &str, created_at: DateTime<Utc>) -> String {
    format!("{}-{}", kind, created_at.timestamp_nanos_opt().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 6, 13, 20).unwrap()
    }

    #[test]
    fn test_envelope_id_and_headers() {
        let envelope = NotificationEnvelope::at("sms", &json!({ "recipient": "+251900000000" }), fixed_time()).unwrap();

        assert_eq!(envelope.id, "sms-1718000000000000000");
        assert_eq!(envelope.kind, "sms");
        assert_eq!(envelope.timestamp(), "2024-06-10T06:13:20Z");

        let headers = envelope.record_headers();
        assert_eq!(headers[0], ("message_id", envelope.id.clone()));
        assert_eq!(headers[1], ("type", "sms".to_string()));
        assert_eq!(headers[2], ("timestamp", "2024-06-10T06:13:20Z".to_string()));

        assert_eq!(envelope.headers.get("message_id"), Some(&envelope.id));
        assert_eq!(envelope.headers.len(), 3);
    }

    #[test]
    fn test_wire_shape() {
        let envelope = NotificationEnvelope::at("email", &json!({ "subject": "Hi" }), fixed_time()).unwrap();
        let wire: Value = serde_json::from_slice(&envelope.to_bytes().unwrap()).unwrap();

        assert_eq!(wire["type"], "email");
        assert_eq!(wire["payload"]["subject"], "Hi");
        assert_eq!(wire["id"], Value::String(envelope.id.clone()));
        assert!(wire["created_at"].as_str().unwrap().starts_with("2024-06-10T06:13:20"));
        assert_eq!(wire["headers"]["type"], "email");
        assert_eq!(wire["headers"]["timestamp"], "2024-06-10T06:13:20Z");
    }

    #[test]
    fn test_envelope_parses_without_headers() {
        let raw = r#"{"id":"push-1","type":"push","payload":{"title":"t"},"created_at":"2024-06-10T06:13:20Z"}"#;
        let envelope = NotificationEnvelope::from_slice(raw.as_bytes()).unwrap();

        assert_eq!(envelope.kind, "push");
        assert!(envelope.headers.is_empty());
    }

    #[test]
    fn test_typed_payloads_survive_the_wire() {
        use crate::dto::{EmailContact, EmailMessage, InAppMessage, PushMessage, PushPriority};

        let mut push = PushMessage::new("u-7", vec!["tok-a".into()], "Ping", "You have mail");
        push.priority = Some(PushPriority::Other("urgent".to_string()));
        push.data.insert("thread".into(), "42".into());

        let mut in_app = InAppMessage::new("u-7", "Statement ready", "Your May statement is ready", "info");
        in_app.expires_at = Some(Utc.timestamp_opt(1_718_000_000, 123_456_789).unwrap());
        in_app.metadata.insert("score".into(), json!(0.75));

        let mut email = EmailMessage::new(vec![EmailContact::new("a@example.com")], "Your code", "otp");
        email.otp_code = Some("123456".into());
        email.transaction_details.insert("amount".into(), json!(12.5));

        let push_wire = NotificationEnvelope::new("push", &push).unwrap().to_bytes().unwrap();
        let in_app_wire = NotificationEnvelope::new("in_app", &in_app).unwrap().to_bytes().unwrap();
        let email_wire = NotificationEnvelope::new("email", &email).unwrap().to_bytes().unwrap();

        let decoded_push: PushMessage = NotificationEnvelope::from_slice(&push_wire).unwrap().decode_payload().unwrap();
        let decoded_in_app: InAppMessage = NotificationEnvelope::from_slice(&in_app_wire)
            .unwrap()
            .decode_payload()
            .unwrap();
        let decoded_email: EmailMessage = NotificationEnvelope::from_slice(&email_wire).unwrap().decode_payload().unwrap();

        assert_eq!(decoded_push, push);
        assert_eq!(decoded_in_app, in_app);
        assert_eq!(decoded_email, email);
    }

    #[test]
    fn test_envelope_itself_survives_the_wire() {
        let created_at = Utc.timestamp_opt(1_718_000_000, 987_654_321).unwrap();
        let envelope = NotificationEnvelope::at("sms", &json!({ "recipient": "+251900000000" }), created_at).unwrap();

        let decoded = NotificationEnvelope::from_slice(&envelope.to_bytes().unwrap()).unwrap();

        assert_eq!(decoded, envelope);
        assert_eq!(decoded.id, "sms-1718000000987654321");
    }

    #[test]
    fn test_message_id_uses_nanos() {
        let at = Utc.timestamp_opt(1, 500).unwrap();
        assert_eq!(message_id("feedback", at), "feedback-1000000500");
    }
}

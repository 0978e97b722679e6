use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// When set, a successful login must be followed by a 2FA verification
    /// before the session counts as fully authenticated.
    pub two_factor_enabled: bool,
}

/// Second-factor delivery method supported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwoFactorMethod {
    /// Authenticator-app codes; setup returns a provisioning QR code.
    Totp,
    /// One-time codes delivered by email.
    Email,
}

impl TwoFactorMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Totp => "totp",
            Self::Email => "email",
        }
    }
}

impl std::fmt::Display for TwoFactorMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TwoFactorMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "totp" => Ok(Self::Totp),
            "email" => Ok(Self::Email),
            other => Err(format!("unknown 2FA method {other:?}, expected totp or email")),
        }
    }
}

/// A WhatsApp contact visible to the paired account.
///
/// The set is replaced wholesale on every refresh; ids are unique within
/// one fetched set but carry no meaning across refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_time: Option<DateTime<Utc>>,
}

/// Delivery status reported by the backend for a sent message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Failed,
    Pending,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message from the sent-history endpoint. Created by the backend on
/// send; the client only ever reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub id: String,
    /// Contact id the message was sent to.
    pub contact: String,
    pub message: String,
    /// Number of repeats requested, always >= 1.
    pub count: u32,
    pub sent_at: DateTime<Utc>,
    pub status: MessageStatus,
}

/// A message queued for future delivery. Same shape as [`SentMessage`]
/// plus the delivery instant; `sent_at` is absent until the backend has
/// actually dispatched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMessage {
    pub id: String,
    pub contact: String,
    pub message: String,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    pub status: MessageStatus,
    pub scheduled_for: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_wire_format_is_camel_case() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","name":"Ada","email":"ada@example.com","twoFactorEnabled":true}"#,
        )
        .unwrap();
        assert!(user.two_factor_enabled);
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn scheduled_message_tolerates_missing_sent_at() {
        let msg: ScheduledMessage = serde_json::from_str(
            r#"{
                "id": "m1",
                "contact": "c1",
                "message": "hello",
                "count": 3,
                "status": "pending",
                "scheduledFor": "2026-09-01T14:30:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(msg.sent_at, None);
        assert_eq!(msg.status, MessageStatus::Pending);
        assert_eq!(msg.count, 3);
    }

    #[test]
    fn contact_round_trips_optional_fields() {
        let contact = Contact {
            id: "c1".into(),
            name: "Bob".into(),
            phone_number: "+15550100".into(),
            last_message: None,
            last_message_time: None,
        };
        let json = serde_json::to_string(&contact).unwrap();
        assert!(!json.contains("lastMessage"));
        let back: Contact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, contact);
    }
}

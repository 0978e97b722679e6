//! WhatsApp pairing and messaging endpoints (`/api/whatsapp/*`).
//!
//! All routes here require the bearer token. List endpoints return the
//! backend's complete current view; the caller replaces its cache wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use waveline_shared::{Contact, ScheduledMessage, SentMessage};

use crate::client::{expect_success, ApiClient};
use crate::error::ApiError;

/// Pairing code from `GET /api/whatsapp/qr-code`, valid until `expires_at`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub qr_code: String,
    pub expires_at: DateTime<Utc>,
}

/// Generic `{success, message}` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

/// Acknowledgement carrying the id of a newly created message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReceipt {
    pub success: bool,
    pub message: String,
    pub message_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectPhoneRequest<'a> {
    phone_number: &'a str,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    contact: &'a str,
    message: &'a str,
    count: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleMessageRequest<'a> {
    contact: &'a str,
    message: &'a str,
    count: u32,
    scheduled_for: DateTime<Utc>,
}

impl ApiClient {
    /// `GET /api/whatsapp/qr-code`
    pub async fn qr_code(&self) -> Result<QrCode, ApiError> {
        let resp = self.get("/api/whatsapp/qr-code").send().await?;
        let resp = expect_success(resp, "Failed to get WhatsApp QR code").await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/whatsapp/connect`
    pub async fn connect_phone(&self, phone_number: &str) -> Result<Ack, ApiError> {
        let resp = self
            .post("/api/whatsapp/connect")
            .json(&ConnectPhoneRequest { phone_number })
            .send()
            .await?;
        let resp = expect_success(resp, "Failed to connect to WhatsApp").await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/whatsapp/verify-qr`
    pub async fn verify_qr(&self) -> Result<Ack, ApiError> {
        let resp = self.post("/api/whatsapp/verify-qr").send().await?;
        let resp = expect_success(resp, "Failed to verify WhatsApp QR code").await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/whatsapp/disconnect`
    pub async fn disconnect(&self) -> Result<Ack, ApiError> {
        let resp = self.post("/api/whatsapp/disconnect").send().await?;
        let resp = expect_success(resp, "Failed to disconnect from WhatsApp").await?;
        Ok(resp.json().await?)
    }

    /// `GET /api/whatsapp/contacts`
    pub async fn contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let resp = self.get("/api/whatsapp/contacts").send().await?;
        let resp = expect_success(resp, "Failed to get WhatsApp contacts").await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/whatsapp/send`
    pub async fn send_message(
        &self,
        contact: &str,
        message: &str,
        count: u32,
    ) -> Result<SendReceipt, ApiError> {
        let resp = self
            .post("/api/whatsapp/send")
            .json(&SendMessageRequest {
                contact,
                message,
                count,
            })
            .send()
            .await?;
        let resp = expect_success(resp, "Failed to send WhatsApp message").await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/whatsapp/schedule`
    pub async fn schedule_message(
        &self,
        contact: &str,
        message: &str,
        count: u32,
        scheduled_for: DateTime<Utc>,
    ) -> Result<SendReceipt, ApiError> {
        let resp = self
            .post("/api/whatsapp/schedule")
            .json(&ScheduleMessageRequest {
                contact,
                message,
                count,
                scheduled_for,
            })
            .send()
            .await?;
        let resp = expect_success(resp, "Failed to schedule WhatsApp message").await?;
        Ok(resp.json().await?)
    }

    /// `GET /api/whatsapp/messages`
    pub async fn sent_messages(&self) -> Result<Vec<SentMessage>, ApiError> {
        let resp = self.get("/api/whatsapp/messages").send().await?;
        let resp = expect_success(resp, "Failed to get sent messages").await?;
        Ok(resp.json().await?)
    }

    /// `GET /api/whatsapp/scheduled`
    pub async fn scheduled_messages(&self) -> Result<Vec<ScheduledMessage>, ApiError> {
        let resp = self.get("/api/whatsapp/scheduled").send().await?;
        let resp = expect_success(resp, "Failed to get scheduled messages").await?;
        Ok(resp.json().await?)
    }

    /// `DELETE /api/whatsapp/scheduled/{id}`
    pub async fn cancel_scheduled(&self, id: &str) -> Result<Ack, ApiError> {
        let resp = self
            .delete(&format!("/api/whatsapp/scheduled/{id}"))
            .send()
            .await?;
        let resp = expect_success(resp, "Failed to cancel scheduled message").await?;
        Ok(resp.json().await?)
    }
}

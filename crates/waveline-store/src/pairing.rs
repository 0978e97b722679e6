//! WhatsApp pairing state and the cached backend views.
//!
//! The store owns a single `connected` flag plus the contact, sent-message,
//! and scheduled-message caches. Every refresh replaces its cache wholesale;
//! overlapping refreshes are last-write-wins with no locking or in-flight
//! tracking.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::{debug, info, warn};

use waveline_api::whatsapp::QrCode;
use waveline_api::ApiClient;
use waveline_shared::{Contact, ScheduledMessage, SentMessage};

use crate::error::PairingError;

/// Owner of the pairing status and the contact/message caches.
///
/// Reads session state only through the shared [`ApiClient`] token; it
/// never mutates it.
pub struct PairingStore {
    api: Arc<ApiClient>,
    connected: bool,
    contacts: Vec<Contact>,
    sent_messages: Vec<SentMessage>,
    scheduled_messages: Vec<ScheduledMessage>,
}

impl PairingStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            connected: false,
            contacts: Vec::new(),
            sent_messages: Vec::new(),
            scheduled_messages: Vec::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn sent_messages(&self) -> &[SentMessage] {
        &self.sent_messages
    }

    pub fn scheduled_messages(&self) -> &[ScheduledMessage] {
        &self.scheduled_messages
    }

    /// Request a pairing code for display. Does not mark the pairing
    /// connected; that happens once [`Self::verify_qr_code`] succeeds.
    pub async fn connect_with_qr(&self) -> Result<QrCode, PairingError> {
        Ok(self.api.qr_code().await?)
    }

    /// Tell the backend the code was scanned. On failure (expired or
    /// unscanned code) the store stays not-connected.
    pub async fn verify_qr_code(&mut self) -> Result<(), PairingError> {
        self.api.verify_qr().await?;
        self.connected = true;
        info!("WhatsApp pairing verified");
        self.refresh_contacts().await;
        Ok(())
    }

    pub async fn connect_with_phone(&mut self, phone_number: &str) -> Result<(), PairingError> {
        self.api.connect_phone(phone_number).await?;
        self.connected = true;
        info!("WhatsApp connected by phone number");
        self.refresh_contacts().await;
        Ok(())
    }

    /// Tear down the pairing. On failure nothing is cleared locally: the
    /// external service still holds an active session, so the caller must
    /// retry rather than be shown a falsely disconnected state.
    pub async fn disconnect(&mut self) -> Result<(), PairingError> {
        self.api.disconnect().await?;
        self.connected = false;
        self.contacts.clear();
        info!("WhatsApp disconnected");
        Ok(())
    }

    /// Fire-and-forget send. No deduplication: calling this twice produces
    /// two backend sends.
    pub async fn send_message(
        &mut self,
        contact: &str,
        message: &str,
        count: u32,
    ) -> Result<(), PairingError> {
        require_count(count)?;
        self.api.send_message(contact, message, count).await?;
        self.refresh_sent_messages().await;
        Ok(())
    }

    /// Schedule a send for `date` at `time` (`"HH:MM"`, local wall clock).
    pub async fn schedule_message(
        &mut self,
        contact: &str,
        message: &str,
        count: u32,
        date: NaiveDate,
        time: &str,
    ) -> Result<(), PairingError> {
        require_count(count)?;
        let scheduled_for = combine_local(date, time)?;
        self.api
            .schedule_message(contact, message, count, scheduled_for)
            .await?;
        self.refresh_scheduled_messages().await;
        Ok(())
    }

    /// Cancel a scheduled message. Removal is inferred from the server's
    /// updated list, not computed locally.
    pub async fn cancel_scheduled_message(&mut self, id: &str) -> Result<(), PairingError> {
        self.api.cancel_scheduled(id).await?;
        self.refresh_scheduled_messages().await;
        Ok(())
    }

    /// Replace the contact cache with the backend's current view.
    ///
    /// The connected flag is inferred from list non-emptiness because the
    /// backend exposes no status endpoint. The heuristic conflates "no
    /// contacts yet" and "backend unreachable" with "not paired"; it is
    /// preserved for wire compatibility. On failure the previous contact
    /// cache stays in place but `connected` is forced off.
    pub async fn refresh_contacts(&mut self) {
        match self.api.contacts().await {
            Ok(contacts) => {
                self.connected = !contacts.is_empty();
                self.contacts = contacts;
            }
            Err(e) => {
                warn!(error = %e, "contact refresh failed");
                self.connected = false;
            }
        }
    }

    /// Replace the sent-message cache; on failure the previous cache stays.
    pub async fn refresh_sent_messages(&mut self) {
        match self.api.sent_messages().await {
            Ok(messages) => self.sent_messages = messages,
            Err(e) => warn!(error = %e, "sent-message refresh failed"),
        }
    }

    /// Replace the scheduled-message cache; on failure the previous cache
    /// stays.
    pub async fn refresh_scheduled_messages(&mut self) {
        match self.api.scheduled_messages().await {
            Ok(messages) => self.scheduled_messages = messages,
            Err(e) => warn!(error = %e, "scheduled-message refresh failed"),
        }
    }

    /// Run all three refreshes, as the dashboard does on mount. No-op
    /// without a session token.
    pub async fn refresh_all(&mut self) {
        if !self.api.has_token() {
            debug!("skipping refresh, no session");
            return;
        }
        self.refresh_contacts().await;
        self.refresh_sent_messages().await;
        self.refresh_scheduled_messages().await;
    }
}

fn require_count(count: u32) -> Result<(), PairingError> {
    if count == 0 {
        return Err(PairingError::Rejected(
            "Repeat count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Combine a calendar date and an `"HH:MM"` wall-clock time, interpreted in
/// the local timezone, into the UTC instant sent to the backend.
fn combine_local(date: NaiveDate, time: &str) -> Result<DateTime<Utc>, PairingError> {
    let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| {
        PairingError::Rejected(format!("Invalid time \"{time}\", expected HH:MM"))
    })?;

    let naive = date.and_time(time);
    let local = Local.from_local_datetime(&naive).earliest().ok_or_else(|| {
        PairingError::Rejected(format!("{naive} does not exist in the local timezone"))
    })?;

    Ok(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_local_matches_the_local_timezone_instant() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let combined = combine_local(date, "14:30").unwrap();

        let expected = Local
            .from_local_datetime(&date.and_hms_opt(14, 30, 0).unwrap())
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(combined, expected);
    }

    #[test]
    fn combine_local_accepts_single_digit_hours() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(combine_local(date, "9:05").is_ok());
    }

    #[test]
    fn combine_local_rejects_malformed_times() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        for bad in ["25:00", "14:60", "half past", "", "14.30"] {
            assert!(combine_local(date, bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn zero_repeat_count_is_rejected() {
        assert!(require_count(0).is_err());
        assert!(require_count(1).is_ok());
    }
}

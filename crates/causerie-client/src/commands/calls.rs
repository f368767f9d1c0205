use causerie_store::{Call, CallDirection, CallType, ContactId, RecordKey};
use chrono::Local;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::state::{AppState, Latency};

/// Display timestamp of a call placed now, matching the log's
/// "Today, 11:45" form.
fn call_timestamp() -> String {
    format!("Today, {}", Local::now().format("%H:%M"))
}

impl AppState {
    /// The call log, newest first.
    pub async fn list_calls(&self) -> Result<Vec<Call>> {
        let _guard = self.locks.acquire(&[RecordKey::Calls]).await;
        self.with_db(|db| db.load_calls()).await
    }

    /// Prepend a call to the log and return the whole log.  A call for an
    /// unknown contact is not logged; the log comes back unchanged.
    pub async fn append_call(
        &self,
        contact_id: ContactId,
        kind: CallType,
        direction: CallDirection,
    ) -> Result<Vec<Call>> {
        let _guard = self
            .locks
            .acquire(&[RecordKey::Contacts, RecordKey::Calls])
            .await;
        self.simulate_latency(Latency::Normal).await;

        if self.with_db(|db| db.get_contact(contact_id)).await?.is_none() {
            debug!(contact_id, "call for unknown contact, nothing logged");
            return self.with_db(|db| db.load_calls()).await;
        }
        self.prepend_call(contact_id, kind, direction).await
    }

    /// Place an outgoing call.  Blocked and unknown contacts are refused
    /// before anything is logged.
    pub async fn start_call(&self, contact_id: ContactId, kind: CallType) -> Result<Vec<Call>> {
        let _guard = self
            .locks
            .acquire(&[RecordKey::Contacts, RecordKey::Calls])
            .await;

        let contact = self
            .with_db(|db| db.get_contact(contact_id))
            .await?
            .ok_or(ClientError::ContactNotFound(contact_id))?;

        if contact.is_blocked {
            warn!(contact_id, "refusing to call a blocked contact");
            return Err(ClientError::ContactBlocked(contact_id));
        }

        info!(contact_id, kind = ?kind, "starting call");
        self.simulate_latency(Latency::Normal).await;
        self.prepend_call(contact_id, kind, CallDirection::Outgoing)
            .await
    }

    /// Caller holds the `Contacts` and `Calls` locks.
    async fn prepend_call(
        &self,
        contact_id: ContactId,
        kind: CallType,
        direction: CallDirection,
    ) -> Result<Vec<Call>> {
        let call = Call {
            id: self.next_id(),
            contact_id,
            kind,
            direction,
            timestamp: call_timestamp(),
        };

        self.with_db(|db| {
            let mut calls = db.load_calls()?;
            calls.insert(0, call);
            db.save_calls(&calls)?;
            Ok(calls)
        })
        .await
    }
}

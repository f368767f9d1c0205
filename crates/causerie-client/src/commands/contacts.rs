use causerie_store::{Contact, ContactId, RecordKey};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::state::{AppState, Latency};

/// Contacts with status updates, split the way the status screen shows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFeed {
    /// At least one update not yet viewed.
    pub recent: Vec<Contact>,
    /// Every update viewed.
    pub viewed: Vec<Contact>,
}

impl AppState {
    /// All contacts in storage order.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let _guard = self.locks.acquire(&[RecordKey::Contacts]).await;
        self.with_db(|db| db.load_contacts()).await
    }

    /// Append a new offline contact and return the updated list.
    pub async fn add_contact(&self, name: &str, phone: &str, avatar_url: &str) -> Result<Vec<Contact>> {
        let _guard = self.locks.acquire(&[RecordKey::Contacts]).await;
        self.simulate_latency(Latency::Normal).await;

        self.with_db(|db| {
            let mut contacts = db.load_contacts()?;

            let mut id = self.next_id();
            while contacts.iter().any(|c| c.id == id) {
                id = self.next_id();
            }

            contacts.push(Contact::new(id, name, phone, avatar_url));
            db.save_contacts(&contacts)?;

            info!(contact_id = id, "contact added");
            Ok(contacts)
        })
        .await
    }

    pub async fn set_archived(&self, contact_id: ContactId, archived: bool) -> Result<Vec<Contact>> {
        self.modify_contact(Latency::Normal, contact_id, |contact| {
            contact.is_archived = archived;
        })
        .await
    }

    pub async fn set_blocked(&self, contact_id: ContactId, blocked: bool) -> Result<Vec<Contact>> {
        self.modify_contact(Latency::Normal, contact_id, |contact| {
            contact.is_blocked = blocked;
        })
        .await
    }

    /// Flag one of the contact's status updates as seen.
    pub async fn mark_status_viewed(&self, contact_id: ContactId, status_id: i64) -> Result<Vec<Contact>> {
        self.modify_contact(Latency::Half, contact_id, |contact| {
            if let Some(update) = contact
                .status_updates
                .iter_mut()
                .flatten()
                .find(|u| u.id == status_id)
            {
                update.viewed = true;
            }
        })
        .await
    }

    /// Reset the unread counter of a chat.
    pub async fn mark_thread_read(&self, contact_id: ContactId) -> Result<Vec<Contact>> {
        self.modify_contact(Latency::Normal, contact_id, |contact| {
            contact.unread_count = Some(0);
        })
        .await
    }

    /// Contacts whose name contains `query`, ignoring case.
    pub async fn search_contacts(&self, query: &str) -> Result<Vec<Contact>> {
        let needle = query.trim().to_lowercase();
        let mut contacts = self.list_contacts().await?;
        contacts.retain(|c| c.name.to_lowercase().contains(&needle));
        Ok(contacts)
    }

    pub async fn archived_contacts(&self) -> Result<Vec<Contact>> {
        let mut contacts = self.list_contacts().await?;
        contacts.retain(|c| c.is_archived);
        Ok(contacts)
    }

    /// Directory view: every contact sorted by name.
    pub async fn contacts_by_name(&self) -> Result<Vec<Contact>> {
        let mut contacts = self.list_contacts().await?;
        contacts.sort_by_cached_key(|c| c.name.to_lowercase());
        Ok(contacts)
    }

    pub async fn status_feed(&self) -> Result<StatusFeed> {
        let (recent, viewed): (Vec<Contact>, Vec<Contact>) = self
            .list_contacts()
            .await?
            .into_iter()
            .filter(Contact::has_status_updates)
            .partition(Contact::has_unviewed_status);

        Ok(StatusFeed { recent, viewed })
    }

    /// Read-modify-write of a single contact.  An unknown id leaves storage
    /// untouched and returns the list as is.
    pub(crate) async fn modify_contact(
        &self,
        latency: Latency,
        contact_id: ContactId,
        edit: impl FnOnce(&mut Contact),
    ) -> Result<Vec<Contact>> {
        let _guard = self.locks.acquire(&[RecordKey::Contacts]).await;
        self.simulate_latency(latency).await;

        self.with_db(|db| {
            let mut contacts = db.load_contacts()?;
            match contacts.iter_mut().find(|c| c.id == contact_id) {
                Some(contact) => {
                    edit(contact);
                    db.save_contacts(&contacts)?;
                }
                None => debug!(contact_id, "contact not found, nothing to update"),
            }
            Ok(contacts)
        })
        .await
    }
}

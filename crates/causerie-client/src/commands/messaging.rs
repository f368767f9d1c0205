use causerie_store::{ContactId, Message, MessageId, RecordKey, LOCAL_USER};
use tracing::debug;

use crate::commands::clock_time;
use crate::error::{ClientError, Result};
use crate::state::{AppState, Latency};

impl AppState {
    /// Messages exchanged with `contact_id`, oldest first.  Empty when there
    /// is no thread.
    pub async fn get_thread(&self, contact_id: ContactId) -> Result<Vec<Message>> {
        let _guard = self.locks.acquire(&[RecordKey::Messages]).await;
        self.with_db(|db| db.load_thread(contact_id)).await
    }

    /// Append `message` to the contact's thread and refresh the chat-list
    /// preview.  An incoming message un-archives the contact.  Nothing is
    /// stored for an unknown contact.
    pub async fn append_message(&self, contact_id: ContactId, message: Message) -> Result<Vec<Message>> {
        self.deliver(contact_id, message, false).await
    }

    /// Send a text message as the local user.
    pub async fn send_text(&self, contact_id: ContactId, text: &str) -> Result<Vec<Message>> {
        let text = non_blank(text)?;
        let message = Message::text(self.next_id(), LOCAL_USER, text, clock_time());
        self.deliver(contact_id, message, false).await
    }

    /// Record a text message from the contact.  Counts as unread.
    pub async fn receive_text(&self, contact_id: ContactId, text: &str) -> Result<Vec<Message>> {
        let text = non_blank(text)?;
        let message = Message::text(self.next_id(), contact_id, text, clock_time());
        self.deliver(contact_id, message, true).await
    }

    /// Add or remove the local user's `emoji` reaction on one message.
    /// Returns the thread unchanged if the message does not exist.
    pub async fn toggle_reaction(
        &self,
        contact_id: ContactId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<Vec<Message>> {
        let _guard = self.locks.acquire(&[RecordKey::Messages]).await;
        self.simulate_latency(Latency::Half).await;

        self.with_db(|db| {
            let mut threads = db.load_threads()?;
            let Some(thread) = threads.get_mut(&contact_id) else {
                return Ok(Vec::new());
            };

            let Some(message) = thread.iter_mut().find(|m| m.id == message_id) else {
                debug!(contact_id, message_id, "message not found, reaction ignored");
                return Ok(thread.clone());
            };
            message.toggle_reaction(emoji, LOCAL_USER);

            let updated = thread.clone();
            db.save_threads(&threads)?;
            Ok(updated)
        })
        .await
    }

    /// Empty the thread and reset the contact's preview and unread counter.
    pub async fn clear_thread(&self, contact_id: ContactId) -> Result<()> {
        let _guard = self
            .locks
            .acquire(&[RecordKey::Contacts, RecordKey::Messages])
            .await;
        self.simulate_latency(Latency::Normal).await;

        self.with_db(|db| {
            let mut threads = db.load_threads()?;
            let mut contacts = db.load_contacts()?;

            let had_thread = match threads.get_mut(&contact_id) {
                Some(thread) => {
                    thread.clear();
                    true
                }
                None => false,
            };

            match contacts.iter_mut().find(|c| c.id == contact_id) {
                Some(contact) => {
                    contact.last_message = Some(String::new());
                    contact.last_message_time = Some(String::new());
                    contact.unread_count = Some(0);
                    db.save_conversation(&contacts, &threads)
                }
                None if had_thread => db.save_threads(&threads),
                None => Ok(()),
            }
        })
        .await?;

        debug!(contact_id, "thread cleared");
        Ok(())
    }

    async fn deliver(&self, contact_id: ContactId, message: Message, count_unread: bool) -> Result<Vec<Message>> {
        let _guard = self
            .locks
            .acquire(&[RecordKey::Contacts, RecordKey::Messages])
            .await;
        self.simulate_latency(Latency::Normal).await;

        self.with_db(|db| {
            let mut threads = db.load_threads()?;
            let mut contacts = db.load_contacts()?;

            let Some(contact) = contacts.iter_mut().find(|c| c.id == contact_id) else {
                debug!(contact_id, "message for unknown contact, nothing stored");
                return Ok(threads.remove(&contact_id).unwrap_or_default());
            };

            contact.last_message = Some(message.preview());
            contact.last_message_time = Some(message.timestamp.clone());

            if message.is_incoming() {
                if contact.is_archived {
                    debug!(contact_id, "incoming message, contact unarchived");
                    contact.is_archived = false;
                }
                if count_unread {
                    let unread = contact.unread_count.unwrap_or(0).saturating_add(1);
                    contact.unread_count = Some(unread);
                }
            }

            let thread = threads.entry(contact_id).or_default();
            thread.push(message);
            let updated = thread.clone();

            db.save_conversation(&contacts, &threads)?;
            Ok(updated)
        })
        .await
    }
}

fn non_blank(text: &str) -> Result<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ClientError::InvalidInput("message text must not be empty".into()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{onboarded_state, slow_onboarded_state, test_state};
    use causerie_store::{Contact, FileInfo, Reaction};
    use std::time::Duration;

    async fn contact(state: &AppState, id: ContactId) -> Contact {
        state
            .list_contacts()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.id == id)
            .unwrap()
    }

    #[tokio::test]
    async fn unknown_thread_is_empty() {
        let (state, _dir) = test_state();
        assert!(state.get_thread(12).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_creates_thread_and_updates_preview() {
        let (state, _dir) = onboarded_state().await;
        assert!(state.get_thread(2).await.unwrap().is_empty());

        let file = Message::file(
            50,
            LOCAL_USER,
            FileInfo {
                name: "Invoice.pdf".into(),
                size: "80 KB".into(),
            },
            "16:00",
        );
        let thread = state.append_message(2, file.clone()).await.unwrap();

        assert_eq!(thread, vec![file]);
        let benjamin = contact(&state, 2).await;
        assert_eq!(benjamin.last_message.as_deref(), Some("File: Invoice.pdf"));
        assert_eq!(benjamin.last_message_time.as_deref(), Some("16:00"));
    }

    #[tokio::test]
    async fn voice_preview() {
        let (state, _dir) = onboarded_state().await;
        state
            .append_message(3, Message::voice(60, LOCAL_USER, "0:12", None, "16:05"))
            .await
            .unwrap();
        assert_eq!(
            contact(&state, 3).await.last_message.as_deref(),
            Some("Voice message (0:12)")
        );
    }

    #[tokio::test]
    async fn incoming_message_unarchives_contact() {
        let (state, _dir) = onboarded_state().await;
        assert!(contact(&state, 6).await.is_archived);

        state
            .append_message(6, Message::text(70, 6, "Call me back", "17:00"))
            .await
            .unwrap();

        assert!(!contact(&state, 6).await.is_archived);
    }

    #[tokio::test]
    async fn outgoing_message_keeps_archive_flag() {
        let (state, _dir) = onboarded_state().await;
        state.send_text(6, "Will do").await.unwrap();
        assert!(contact(&state, 6).await.is_archived);
    }

    #[tokio::test]
    async fn send_and_receive_text() {
        let (state, _dir) = onboarded_state().await;

        let thread = state.send_text(3, "  Lunch?  ").await.unwrap();
        let sent = thread.last().unwrap();
        assert_eq!(sent.sender_id, LOCAL_USER);
        assert_eq!(sent.text, "Lunch?");
        assert_eq!(sent.timestamp.len(), 5);

        let thread = state.receive_text(3, "Sure").await.unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[1].sender_id, 3);
        assert_ne!(thread[0].id, thread[1].id);

        let chloe = contact(&state, 3).await;
        assert_eq!(chloe.last_message.as_deref(), Some("Sure"));
        assert_eq!(chloe.unread_count, Some(1));

        state.receive_text(3, "12:30?").await.unwrap();
        assert_eq!(contact(&state, 3).await.unread_count, Some(2));
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let (state, _dir) = onboarded_state().await;
        let err = state.send_text(1, "   ").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
        assert_eq!(state.get_thread(1).await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn reaction_toggle_is_its_own_inverse() {
        let (state, _dir) = onboarded_state().await;
        let original = state.get_thread(1).await.unwrap();

        let once = state.toggle_reaction(1, 3, "👍").await.unwrap();
        assert_eq!(
            once[2].reactions,
            Some(vec![Reaction {
                emoji: "👍".into(),
                users: vec![LOCAL_USER],
            }])
        );

        let twice = state.toggle_reaction(1, 3, "👍").await.unwrap();
        assert_eq!(twice, original);
    }

    #[tokio::test]
    async fn reaction_removal_keeps_other_reactors() {
        let (state, _dir) = onboarded_state().await;

        let thread = state.toggle_reaction(1, 5, "👍").await.unwrap();
        let reactions = thread[4].reactions.as_ref().unwrap();

        assert_eq!(reactions[0].emoji, "👍");
        assert_eq!(reactions[0].users, vec![2]);
        assert_eq!(reactions[1].emoji, "🎉");
    }

    #[tokio::test]
    async fn reaction_on_unknown_message_is_a_no_op() {
        let (state, _dir) = onboarded_state().await;
        let original = state.get_thread(1).await.unwrap();

        assert_eq!(state.toggle_reaction(1, 999, "😂").await.unwrap(), original);
        assert!(state.toggle_reaction(2, 1, "😂").await.unwrap().is_empty());
        assert_eq!(state.get_thread(1).await.unwrap(), original);
    }

    #[tokio::test]
    async fn clear_thread_resets_preview() {
        let (state, _dir) = onboarded_state().await;

        state.clear_thread(1).await.unwrap();

        assert!(state.get_thread(1).await.unwrap().is_empty());
        let alice = contact(&state, 1).await;
        assert_eq!(alice.unread_count, Some(0));
        assert_eq!(alice.last_message.as_deref(), Some(""));
        assert_eq!(alice.last_message_time.as_deref(), Some(""));

        let raw = state.inspect_records().await.unwrap();
        assert_eq!(raw["messages"]["1"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let (state, _dir) = onboarded_state().await;

        let mut tasks = Vec::new();
        for i in 0..20 {
            let state = state.clone();
            tasks.push(tokio::spawn(async move {
                state.send_text(4, &format!("message {i}")).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(state.get_thread(4).await.unwrap().len(), 5 + 20);
    }

    #[tokio::test]
    async fn message_for_unknown_contact_is_not_stored() {
        let (state, _dir) = onboarded_state().await;
        let before = state.inspect_records().await.unwrap();

        let thread = state
            .append_message(999, Message::text(80, 999, "Who is this?", "18:00"))
            .await
            .unwrap();
        assert!(thread.is_empty());
        assert!(state.send_text(999, "Wrong number").await.unwrap().is_empty());

        let after = state.inspect_records().await.unwrap();
        assert_eq!(after, before);
        assert!(after["messages"].get("999").is_none());
    }

    #[tokio::test]
    async fn unread_counter_saturates() {
        let (state, _dir) = onboarded_state().await;
        state
            .with_db(|db| {
                let mut contacts = db.load_contacts()?;
                for c in contacts.iter_mut().filter(|c| c.id == 3) {
                    c.unread_count = Some(u32::MAX);
                }
                db.save_contacts(&contacts)
            })
            .await
            .unwrap();

        state.receive_text(3, "Still there?").await.unwrap();

        let chloe = contact(&state, 3).await;
        assert_eq!(chloe.unread_count, Some(u32::MAX));
        assert_eq!(chloe.last_message.as_deref(), Some("Still there?"));
    }

    #[tokio::test(start_paused = true)]
    async fn thread_read_waits_for_pending_send() {
        let (state, _dir) = slow_onboarded_state(Duration::from_millis(300)).await;

        let sender = state.clone();
        let send = tokio::spawn(async move { sender.send_text(7, "On my way").await.unwrap() });
        tokio::time::sleep(Duration::from_millis(10)).await;

        let thread = state.get_thread(7).await.unwrap();
        assert_eq!(thread.len(), 3);
        assert_eq!(thread[2].text, "On my way");
        send.await.unwrap();
    }
}

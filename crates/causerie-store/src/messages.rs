//! Load/save for message threads, keyed by contact id.
//!
//! [`Database::save_conversation`] writes the contact list and the threads in
//! one transaction so a chat preview never disagrees with its thread.

use crate::database::Database;
use crate::error::Result;
use crate::models::{Contact, ContactId, Message, Threads};
use crate::records::RecordKey;

impl Database {
    /// Load every thread, keyed by contact.  An absent record yields no threads.
    pub fn load_threads(&self) -> Result<Threads> {
        Ok(self.load_json(RecordKey::Messages)?.unwrap_or_default())
    }

    pub fn save_threads(&self, threads: &Threads) -> Result<()> {
        self.save_json(RecordKey::Messages, threads)
    }

    /// Write the thread map and the contact list together, so a chat-list
    /// preview never disagrees with the thread it summarizes.
    pub fn save_conversation(&self, contacts: &[Contact], threads: &Threads) -> Result<()> {
        self.save_records(&[
            (RecordKey::Contacts, serde_json::to_string(contacts)?),
            (RecordKey::Messages, serde_json::to_string(threads)?),
        ])
    }

    /// Messages exchanged with `contact_id`, oldest first; empty when none.
    pub fn load_thread(&self, contact_id: ContactId) -> Result<Vec<Message>> {
        Ok(self
            .load_threads()?
            .remove(&contact_id)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        (db, dir)
    }

    #[test]
    fn unknown_thread_is_empty() {
        let (db, _dir) = test_db();
        assert!(db.load_thread(42).unwrap().is_empty());
    }

    #[test]
    fn threads_are_keyed_by_contact_id_string() {
        let (db, _dir) = test_db();
        let mut threads = Threads::new();
        threads.insert(4, vec![Message::text(1, 0, "Can you send the report?", "14:50")]);
        db.save_threads(&threads).unwrap();

        let raw = db.load_value(RecordKey::Messages).unwrap().unwrap();
        assert_eq!(raw["4"][0]["text"], json!("Can you send the report?"));

        assert_eq!(db.load_thread(4).unwrap().len(), 1);
        assert_eq!(db.load_threads().unwrap(), threads);
    }

    #[test]
    fn conversation_writes_both_records() {
        let (db, _dir) = test_db();
        let mut contact = Contact::new(4, "Karim", "+4", "k.png");
        contact.last_message = Some("On my way".into());
        let mut threads = Threads::new();
        threads.insert(4, vec![Message::text(1, 4, "On my way", "10:02")]);

        db.save_conversation(&[contact.clone()], &threads).unwrap();

        assert_eq!(db.load_contacts().unwrap(), vec![contact]);
        assert_eq!(db.load_threads().unwrap(), threads);
    }

    #[test]
    fn empty_thread_key_survives() {
        let (db, _dir) = test_db();
        let mut threads = Threads::new();
        threads.insert(1, Vec::new());
        db.save_threads(&threads).unwrap();

        assert!(db.load_threads().unwrap().contains_key(&1));
    }
}

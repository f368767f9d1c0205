//! Load/save for the call log, stored newest first.

use crate::database::Database;
use crate::error::Result;
use crate::models::Call;
use crate::records::RecordKey;

impl Database {
    /// Load the call log, newest first.  An absent record yields an empty log.
    pub fn load_calls(&self) -> Result<Vec<Call>> {
        Ok(self.load_json(RecordKey::Calls)?.unwrap_or_default())
    }

    pub fn save_calls(&self, calls: &[Call]) -> Result<()> {
        self.save_json(RecordKey::Calls, calls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CallDirection, CallType};

    #[test]
    fn calls_round_trip_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        assert!(db.load_calls().unwrap().is_empty());

        let calls = vec![
            Call {
                id: 2,
                contact_id: 3,
                kind: CallType::Audio,
                direction: CallDirection::Missed,
                timestamp: "Today, 09:00".into(),
            },
            Call {
                id: 1,
                contact_id: 2,
                kind: CallType::Video,
                direction: CallDirection::Outgoing,
                timestamp: "Yesterday, 18:30".into(),
            },
        ];
        db.save_calls(&calls).unwrap();

        assert_eq!(db.load_calls().unwrap(), calls);
    }
}

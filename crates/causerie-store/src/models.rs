//! Domain model structs persisted in the local record store.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names so records and backups share one JSON shape.  Optional fields are
//! skipped when absent so a load/save cycle never invents them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Numeric contact identifier.
pub type ContactId = i64;

/// Message identifier, unique within one thread.
pub type MessageId = i64;

/// Author of a message or reaction: [`LOCAL_USER`] or a contact id.
pub type SenderId = i64;

/// Sender id of the local user.
pub const LOCAL_USER: SenderId = 0;

/// Placeholder phone number written by the legacy upgrade.
pub const UNKNOWN_NUMBER: &str = "unknown number";

/// Default presence line for newly added contacts.
pub const DEFAULT_CONTACT_PRESENCE: &str = "offline";

/// Default status line for a new profile.
pub const DEFAULT_USER_STATUS: &str = "Available";

/// Display timestamp given to freshly posted status updates.
pub const JUST_NOW: &str = "just now";

/// Chat background restored by an appearance reset.
pub const DEFAULT_CHAT_BACKGROUND: &str = "https://picsum.photos/id/1015/1080/1920";

/// Message threads keyed by contact.
pub type Threads = BTreeMap<ContactId, Vec<Message>>;

fn is_false(v: &bool) -> bool {
    !*v
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Audience allowed to see a piece of profile information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Everyone,
    MyContacts,
    Nobody,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    pub read_receipts: bool,
    pub last_seen: Visibility,
    pub profile_photo: Visibility,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            read_receipts: true,
            last_seen: Visibility::MyContacts,
            profile_photo: Visibility::Everyone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceSettings {
    pub dark_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_background: Option<String>,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            chat_background: None,
        }
    }
}

/// The single local profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub phone: String,
    pub avatar_url: String,
    /// Free-text status line.
    pub status: String,
    pub privacy_settings: PrivacySettings,
    pub notification_settings: NotificationSettings,
    pub appearance_settings: AppearanceSettings,
    /// Identity assigned by a remote sync handshake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
    /// The user's own status updates, oldest first.
    #[serde(default)]
    pub status_updates: Vec<StatusUpdate>,
}

impl User {
    /// Build a fresh profile with default settings and no status updates.
    pub fn new(name: impl Into<String>, phone: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            avatar_url: avatar_url.into(),
            status: DEFAULT_USER_STATUS.to_string(),
            privacy_settings: PrivacySettings::default(),
            notification_settings: NotificationSettings::default(),
            appearance_settings: AppearanceSettings::default(),
            server_id: None,
            status_updates: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Status updates
// ---------------------------------------------------------------------------

/// An ephemeral photo update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub id: i64,
    pub image_url: String,
    pub timestamp: String,
    /// Only meaningful on updates received from contacts.
    #[serde(default, skip_serializing_if = "is_false")]
    pub viewed: bool,
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub avatar_url: String,
    /// Presence line ("online", "offline", "last seen ...").
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_updates: Option<Vec<StatusUpdate>>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_blocked: bool,
}

impl Contact {
    /// Build a newly added contact: offline, not archived, not blocked.
    pub fn new(
        id: ContactId,
        name: impl Into<String>,
        phone: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            avatar_url: avatar_url.into(),
            status: DEFAULT_CONTACT_PRESENCE.to_string(),
            last_message: None,
            last_message_time: None,
            unread_count: None,
            status_updates: None,
            is_archived: false,
            is_blocked: false,
        }
    }

    /// Whether the contact has posted at least one status update.
    pub fn has_status_updates(&self) -> bool {
        self.status_updates.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Whether any posted status update is still unviewed.
    pub fn has_unviewed_status(&self) -> bool {
        self.status_updates
            .as_ref()
            .is_some_and(|s| s.iter().any(|u| !u.viewed))
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Voice,
    File,
    System,
}

/// Attachment metadata stored alongside a file message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    /// Human-readable size, e.g. "1.2 MB".
    pub size: String,
}

/// One emoji and the senders who reacted with it, in first-reaction order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reaction {
    pub emoji: String,
    pub users: Vec<SenderId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: SenderId,
    /// Body text; empty for non-text messages.
    pub text: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_info: Option<FileInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_duration: Option<String>,
    /// Opaque reference to the recorded audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<Reaction>>,
}

impl Message {
    /// A plain text message.
    pub fn text(
        id: MessageId,
        sender_id: SenderId,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sender_id,
            text: text.into(),
            timestamp: timestamp.into(),
            kind: MessageType::Text,
            file_info: None,
            voice_duration: None,
            audio_url: None,
            reactions: None,
        }
    }

    /// A file attachment message.
    pub fn file(
        id: MessageId,
        sender_id: SenderId,
        file_info: FileInfo,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            kind: MessageType::File,
            file_info: Some(file_info),
            ..Self::text(id, sender_id, "", timestamp)
        }
    }

    /// A recorded voice message.
    pub fn voice(
        id: MessageId,
        sender_id: SenderId,
        duration: impl Into<String>,
        audio_url: Option<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            kind: MessageType::Voice,
            voice_duration: Some(duration.into()),
            audio_url,
            ..Self::text(id, sender_id, "", timestamp)
        }
    }

    /// Whether the message was sent by the contact rather than the local user.
    pub fn is_incoming(&self) -> bool {
        self.sender_id != LOCAL_USER
    }

    /// Text shown as the last-message preview in the chat list.
    pub fn preview(&self) -> String {
        match (self.kind, &self.file_info, &self.voice_duration) {
            (MessageType::File, Some(info), _) => format!("File: {}", info.name),
            (MessageType::Voice, _, Some(duration)) => format!("Voice message ({duration})"),
            _ => self.text.clone(),
        }
    }

    /// Add `user` to the reactors of `emoji`, or remove them if already there.
    ///
    /// Reaction entries left without users are dropped, and an emptied
    /// reaction list is removed entirely.
    pub fn toggle_reaction(&mut self, emoji: &str, user: SenderId) {
        let mut reactions = self.reactions.take().unwrap_or_default();

        match reactions.iter_mut().find(|r| r.emoji == emoji) {
            Some(reaction) => match reaction.users.iter().position(|u| *u == user) {
                Some(idx) => {
                    reaction.users.remove(idx);
                }
                None => reaction.users.push(user),
            },
            None => reactions.push(Reaction {
                emoji: emoji.to_string(),
                users: vec![user],
            }),
        }

        reactions.retain(|r| !r.users.is_empty());
        self.reactions = (!reactions.is_empty()).then_some(reactions);
    }
}

// ---------------------------------------------------------------------------
// Call
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Audio,
    Video,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Incoming,
    Outgoing,
    Missed,
}

/// One entry of the call log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub id: i64,
    pub contact_id: ContactId,
    #[serde(rename = "type")]
    pub kind: CallType,
    pub direction: CallDirection,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_are_not_invented() {
        let stored = json!({
            "id": 3,
            "name": "Chloé Martin",
            "phone": "+33 7 00 11 22 33",
            "avatarUrl": "c.png",
            "status": "online",
            "isArchived": false,
            "isBlocked": false
        });

        let contact: Contact = serde_json::from_value(stored.clone()).unwrap();
        assert_eq!(serde_json::to_value(&contact).unwrap(), stored);
    }

    #[test]
    fn message_type_uses_wire_names() {
        let msg = Message::voice(5, 4, "0:45", None, "14:55");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], json!("voice"));
        assert_eq!(value["voiceDuration"], json!("0:45"));
        assert!(value.get("audioUrl").is_none());
    }

    #[test]
    fn preview_per_message_type() {
        let text = Message::text(1, 0, "hello", "10:00");
        assert_eq!(text.preview(), "hello");

        let file = Message::file(
            2,
            0,
            FileInfo {
                name: "report.pdf".into(),
                size: "1.2 MB".into(),
            },
            "10:01",
        );
        assert_eq!(file.preview(), "File: report.pdf");

        let voice = Message::voice(3, 1, "0:12", Some("blob:1".into()), "10:02");
        assert_eq!(voice.preview(), "Voice message (0:12)");
    }

    #[test]
    fn toggle_reaction_adds_then_removes() {
        let mut msg = Message::text(1, 1, "hi", "10:00");

        msg.toggle_reaction("👍", LOCAL_USER);
        assert_eq!(
            msg.reactions,
            Some(vec![Reaction {
                emoji: "👍".into(),
                users: vec![LOCAL_USER]
            }])
        );

        msg.toggle_reaction("👍", LOCAL_USER);
        assert_eq!(msg.reactions, None);
    }

    #[test]
    fn toggle_reaction_joins_existing_entry_and_keeps_others() {
        let mut msg = Message::text(5, 1, "10h?", "15:31");
        msg.reactions = Some(vec![
            Reaction {
                emoji: "👍".into(),
                users: vec![2],
            },
            Reaction {
                emoji: "🎉".into(),
                users: vec![1],
            },
        ]);
        let original = msg.clone();

        msg.toggle_reaction("👍", LOCAL_USER);
        assert_eq!(msg.reactions.as_ref().unwrap()[0].users, vec![2, LOCAL_USER]);

        msg.toggle_reaction("👍", LOCAL_USER);
        assert_eq!(msg, original);
    }

    #[test]
    fn viewed_defaults_to_false_and_round_trips_as_absent() {
        let update: StatusUpdate =
            serde_json::from_value(json!({ "id": 1, "imageUrl": "s.png", "timestamp": "5 minutes ago" }))
                .unwrap();
        assert!(!update.viewed);
        assert!(serde_json::to_value(&update).unwrap().get("viewed").is_none());
    }

    #[test]
    fn new_user_has_documented_defaults() {
        let user = User::new("Alice", "+222 45 25 12 34", "a.png");
        assert!(user.privacy_settings.read_receipts);
        assert_eq!(user.privacy_settings.last_seen, Visibility::MyContacts);
        assert_eq!(user.privacy_settings.profile_photo, Visibility::Everyone);
        assert!(user.notification_settings.enabled);
        assert!(user.appearance_settings.dark_mode);
        assert!(user.status_updates.is_empty());
        assert!(user.server_id.is_none());
    }
}

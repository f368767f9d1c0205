//! Demo dataset written alongside a freshly created profile.

use crate::models::{
    Call, CallDirection, CallType, Contact, FileInfo, Message, Reaction, StatusUpdate, Threads,
    LOCAL_USER,
};

fn status(id: i64, image: u32, timestamp: &str, viewed: bool) -> StatusUpdate {
    StatusUpdate {
        id,
        image_url: format!("https://picsum.photos/id/{image}/1080/1920"),
        timestamp: timestamp.to_string(),
        viewed,
    }
}

fn contact(id: i64, name: &str, phone: &str, avatar: u32, presence: &str) -> Contact {
    Contact {
        status: presence.to_string(),
        ..Contact::new(
            id,
            name,
            phone,
            format!("https://picsum.photos/id/{avatar}/200/200"),
        )
    }
}

fn with_last(mut c: Contact, preview: &str, time: &str) -> Contact {
    c.last_message = Some(preview.to_string());
    c.last_message_time = Some(time.to_string());
    c
}

fn reacted(mut m: Message, reactions: &[(&str, &[i64])]) -> Message {
    m.reactions = Some(
        reactions
            .iter()
            .map(|(emoji, users)| Reaction {
                emoji: emoji.to_string(),
                users: users.to_vec(),
            })
            .collect(),
    );
    m
}

/// Seed contact list.
pub fn contacts() -> Vec<Contact> {
    let mut alice = with_last(
        contact(1, "Alice Dubois", "+33 6 12 34 56 78", 1011, "online"),
        "Ok, see you later!",
        "15:32",
    );
    alice.unread_count = Some(2);
    alice.status_updates = Some(vec![
        status(1, 11, "5 minutes ago", false),
        status(2, 12, "20 minutes ago", false),
    ]);

    let mut benjamin = with_last(
        contact(2, "Benjamin Lemoine", "+33 6 87 65 43 21", 1012, "last seen yesterday at 20:15"),
        "Photo: A beautiful sunset",
        "Yesterday",
    );
    benjamin.status_updates = Some(vec![status(1, 21, "2 hours ago", true)]);

    let chloe = with_last(
        contact(3, "Chloé Martin", "+33 7 00 11 22 33", 1027, "typing..."),
        "Yes, that's a great idea.",
        "15:29",
    );

    let david = with_last(
        contact(4, "David Garcia", "+33 6 99 88 77 66", 1005, "online"),
        "Voice message (0:45)",
        "14:55",
    );

    let mut emilie = with_last(
        contact(5, "Émilie Petit", "+33 7 55 44 33 22", 1013, "last seen 2h ago"),
        "Document: Final_Report.pdf",
        "13:10",
    );
    emilie.status_updates = Some(vec![status(1, 51, "47 minutes ago", false)]);

    let mut mum = with_last(
        contact(6, "Mum", "+33 6 01 02 03 04", 1016, "online"),
        "Call me when you can ❤️",
        "11:45",
    );
    mum.unread_count = Some(1);
    mum.status_updates = Some(vec![status(1, 61, "6 hours ago", true)]);
    mum.is_archived = true;

    let ahmed = with_last(
        contact(7, "Ahmed Fall", "+222 45 25 12 34", 1025, "travelling"),
        "Salam! How are you?",
        "10:05",
    );

    vec![alice, benjamin, chloe, david, emilie, mum, ahmed]
}

/// Seed message threads.
pub fn threads() -> Threads {
    let mut threads = Threads::new();

    threads.insert(
        1,
        vec![
            Message::text(1, 1, "Hi! How are you?", "15:28"),
            reacted(
                Message::text(2, LOCAL_USER, "Hey! Good, and you?", "15:29"),
                &[("❤️", &[1])],
            ),
            Message::text(3, 1, "Great! Free for a coffee tomorrow?", "15:30"),
            Message::text(4, LOCAL_USER, "Sure! What time?", "15:31"),
            reacted(
                Message::text(5, 1, "10am at the corner café?", "15:31"),
                &[("👍", &[LOCAL_USER, 2]), ("🎉", &[1])],
            ),
            Message::text(6, LOCAL_USER, "Perfect!", "15:32"),
            Message::text(7, 1, "Ok, see you later!", "15:32"),
        ],
    );

    threads.insert(
        4,
        vec![
            Message::text(1, LOCAL_USER, "Can you send me the report?", "14:50"),
            Message::text(2, 4, "Yes, of course.", "14:51"),
            Message::file(
                3,
                4,
                FileInfo {
                    name: "Analysis_Q2.docx".to_string(),
                    size: "1.2 MB".to_string(),
                },
                "14:52",
            ),
            Message::text(4, LOCAL_USER, "Thanks! I'll have a look.", "14:53"),
            Message::voice(5, 4, "0:45", None, "14:55"),
        ],
    );

    threads.insert(
        7,
        vec![
            Message::text(1, 7, "Salam! How are you?", "10:05"),
            Message::text(
                2,
                LOCAL_USER,
                "Wa alaikum salam! Doing well, alhamdulillah. And you?",
                "10:06",
            ),
        ],
    );

    threads
}

/// Seed call log, newest first.
pub fn calls() -> Vec<Call> {
    let call = |id, contact_id, kind, direction, timestamp: &str| Call {
        id,
        contact_id,
        kind,
        direction,
        timestamp: timestamp.to_string(),
    };

    vec![
        call(1, 2, CallType::Video, CallDirection::Outgoing, "Today, 11:45"),
        call(2, 3, CallType::Audio, CallDirection::Incoming, "Yesterday, 18:30"),
        call(3, 4, CallType::Audio, CallDirection::Missed, "Yesterday, 14:12"),
        call(4, 1, CallType::Video, CallDirection::Outgoing, "25/07/2024"),
    ]
}

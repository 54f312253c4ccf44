//! Thread assembly over a flat message collection

use std::collections::HashMap;

use crate::entities::Message;
use crate::value_objects::Timestamp;

use super::view::ThreadView;

/// Validate a message's timestamp, repairing it from the first attachment's
/// creation time when the message has none
///
/// Returns `None` when the message has no usable timestamp and must be dropped.
pub fn repair_timestamp(message: &mut Message) -> Option<Timestamp> {
    if !message.has_timestamp() {
        let created = message.attachment_created()?.to_string();
        message.ts = created;
    }
    Timestamp::parse(&message.ts).ok()
}

/// Build the two-level thread view from messages in any order
///
/// Roots and each reply group are sorted by numeric timestamp. The sort is
/// stable, so equal timestamps keep their input order. Replies are grouped by
/// their `thread_ts`; a root's advertised `reply_count` is not consulted.
pub fn assemble(messages: Vec<Message>) -> ThreadView {
    let mut roots: Vec<(Timestamp, Message)> = Vec::new();
    let mut groups: HashMap<String, Vec<(Timestamp, Message)>> = HashMap::new();
    let mut dropped = 0;

    for mut message in messages {
        let Some(ts) = repair_timestamp(&mut message) else {
            dropped += 1;
            continue;
        };

        match message.thread_root().map(str::to_owned) {
            Some(root) => groups.entry(root).or_default().push((ts, message)),
            None => roots.push((ts, message)),
        }
    }

    ThreadView {
        roots: into_chronological(roots),
        replies_by_root: groups
            .into_iter()
            .map(|(root, replies)| (root, into_chronological(replies)))
            .collect(),
        dropped,
    }
}

fn into_chronological(mut entries: Vec<(Timestamp, Message)>) -> Vec<Message> {
    entries.sort_by(|(a, _), (b, _)| a.cmp_chronological(b));
    entries.into_iter().map(|(_, message)| message).collect()
}

//! Two-level thread view and its lazily expanded display rows

use std::collections::{HashMap, HashSet};

use crate::entities::Message;

/// Result of thread assembly
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadView {
    /// Root messages in chronological order
    pub roots: Vec<Message>,
    /// Replies keyed by their root's timestamp, each in chronological order
    pub replies_by_root: HashMap<String, Vec<Message>>,
    /// Messages dropped for lacking a valid timestamp
    pub dropped: usize,
}

/// One display row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThreadRow<'a> {
    Root {
        message: &'a Message,
        reply_count: usize,
    },
    Reply {
        root_ts: &'a str,
        message: &'a Message,
    },
}

impl ThreadView {
    /// Replies to the root with timestamp `root_ts`
    pub fn replies(&self, root_ts: &str) -> &[Message] {
        self.replies_by_root
            .get(root_ts)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of replies grouped under `root_ts`
    pub fn reply_count(&self, root_ts: &str) -> usize {
        self.replies(root_ts).len()
    }

    /// Total number of retained messages
    pub fn message_count(&self) -> usize {
        self.roots.len() + self.replies_by_root.values().map(Vec::len).sum::<usize>()
    }

    /// Flatten into display rows
    ///
    /// Every root is emitted; replies are materialized only for roots whose
    /// timestamp is in `expanded`. Expansion state stays with the caller.
    pub fn rows<'a>(&'a self, expanded: &HashSet<String>) -> Vec<ThreadRow<'a>> {
        let mut rows = Vec::with_capacity(self.roots.len());
        for root in &self.roots {
            let replies = self.replies(&root.ts);
            rows.push(ThreadRow::Root {
                message: root,
                reply_count: replies.len(),
            });
            if expanded.contains(&root.ts) {
                rows.extend(replies.iter().map(|reply| ThreadRow::Reply {
                    root_ts: root.ts.as_str(),
                    message: reply,
                }));
            }
        }
        rows
    }
}

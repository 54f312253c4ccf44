//! Domain and cache results to DTO mappers

use archive_cache::{CacheError, CacheResult, MessageCount};
use archive_core::{ThreadView, WorkspaceMetadata};

use super::responses::{
    CountResultResponse, ErrorBody, MessageCountResponse, ThreadResponse, ThreadViewResponse,
    WorkspaceMetadataResponse,
};

// ============================================================================
// Count Mappers
// ============================================================================

impl MessageCountResponse {
    pub fn new(channel: impl Into<String>, count: &MessageCount) -> Self {
        Self {
            channel: channel.into(),
            message_count: count.count,
            cached: count.is_cached(),
            persisted: count.is_persisted(),
        }
    }
}

impl From<&CacheError> for ErrorBody {
    fn from(err: &CacheError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.domain().to_string(),
        }
    }
}

impl From<(String, CacheResult<MessageCount>)> for CountResultResponse {
    fn from((channel, result): (String, CacheResult<MessageCount>)) -> Self {
        match result {
            Ok(count) => Self::Counted(MessageCountResponse::new(channel, &count)),
            Err(err) => Self::Failed {
                error: ErrorBody::from(&err),
                channel,
            },
        }
    }
}

impl WorkspaceMetadataResponse {
    pub fn new(
        workspace: impl Into<String>,
        snapshot: Option<&WorkspaceMetadata>,
        last_error: Option<&CacheError>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            loaded: snapshot.is_some(),
            channels: snapshot
                .map(|metadata| {
                    metadata
                        .channels
                        .iter()
                        .map(|(key, entry)| (key.to_string(), entry.clone()))
                        .collect()
                })
                .unwrap_or_default(),
            last_error: last_error.map(ErrorBody::from),
        }
    }
}

// ============================================================================
// Thread Mappers
// ============================================================================

impl ThreadViewResponse {
    pub fn new(channel: impl Into<String>, view: ThreadView) -> Self {
        let ThreadView {
            roots,
            mut replies_by_root,
            dropped,
        } = view;

        let roots = roots
            .into_iter()
            .map(|message| {
                let replies = replies_by_root.remove(&message.ts).unwrap_or_default();
                ThreadResponse {
                    reply_count: replies.len(),
                    replies,
                    message,
                }
            })
            .collect();

        Self {
            channel: channel.into(),
            roots,
            dropped_count: dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_cache::CountSource;
    use archive_core::{assemble, DomainError, Message};

    #[test]
    fn test_count_result_mapping() {
        let ok = CountResultResponse::from((
            "general".to_string(),
            Ok(MessageCount {
                count: 8,
                source: CountSource::Computed,
                persist_error: None,
            }),
        ));
        assert_eq!(
            ok,
            CountResultResponse::Counted(MessageCountResponse {
                channel: "general".to_string(),
                message_count: 8,
                cached: false,
                persisted: true,
            })
        );

        let failed = CountResultResponse::from((
            "nope".to_string(),
            Err(CacheError::Count {
                workspace: "acme".to_string(),
                channel: "nope".to_string(),
                source: DomainError::ChannelNotFound {
                    workspace: "acme".to_string(),
                    channel: "nope".to_string(),
                },
            }),
        ));
        match failed {
            CountResultResponse::Failed { channel, error } => {
                assert_eq!(channel, "nope");
                assert_eq!(error.code, "UNKNOWN_CHANNEL");
            }
            CountResultResponse::Counted(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_thread_view_mapping() {
        let view = assemble(vec![
            Message::new("1", "U1", "root"),
            Message::new("3", "U2", "second reply").in_thread("1"),
            Message::new("2", "U2", "first reply").in_thread("1"),
            Message::new("", "U3", "no timestamp"),
        ]);

        let response = ThreadViewResponse::new("general", view);
        assert_eq!(response.roots.len(), 1);
        assert_eq!(response.roots[0].reply_count, 2);
        assert_eq!(response.roots[0].replies[0].text, "first reply");
        assert_eq!(response.dropped_count, 1);
    }
}

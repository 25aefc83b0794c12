// Server-sent event utilities: inbound frame decoding and outbound dashboard stream
use crate::application::dashboard_service::DashboardService;
use axum::response::sse::{Event, KeepAlive, Sse};
use bytes::BytesMut;
use futures::stream::Stream;
use futures::StreamExt;
use std::convert::Infallible;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Pending bytes allowed without a complete event before the buffer is dropped.
pub const MAX_PENDING_BYTES: usize = 1 << 20;

/// Incremental decoder for a `text/event-stream` body. Yields the joined
/// `data:` payload of each complete event.
#[derive(Debug)]
pub struct EventDecoder {
    buffer: BytesMut,
    /// Bytes already searched for a frame terminator.
    scanned: usize,
    limit: usize,
}

impl Default for EventDecoder {
    fn default() -> Self {
        Self::with_limit(MAX_PENDING_BYTES)
    }
}

impl EventDecoder {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buffer: BytesMut::new(),
            scanned: 0,
            limit,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));

        let mut payloads = Vec::new();
        loop {
            // Back up one byte: the terminator may straddle two chunks.
            let start = self.scanned.saturating_sub(1);
            let Some(offset) = self.buffer[start..].windows(2).position(|w| w == b"\n\n") else {
                self.scanned = self.buffer.len();
                break;
            };

            let frame = self.buffer.split_to(start + offset + 2);
            self.scanned = 0;
            let text = String::from_utf8_lossy(&frame);

            let data: Vec<&str> = text
                .lines()
                .filter_map(|line| line.strip_prefix("data:"))
                .map(|d| d.strip_prefix(' ').unwrap_or(d))
                .collect();

            if !data.is_empty() {
                payloads.push(data.join("\n"));
            }
        }

        if self.buffer.len() > self.limit {
            tracing::warn!(
                "Dropping {} pending upstream bytes without an event terminator",
                self.buffer.len()
            );
            self.buffer.clear();
            self.scanned = 0;
        }
        payloads
    }
}

/// One `dashboard` event immediately, then one after every store change.
/// Changes that land during a render are coalesced into the next one.
pub fn dashboard_events(
    service: DashboardService,
    changes: watch::Receiver<u64>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = async_stream::stream! {
        let mut changes = WatchStream::new(changes);

        while let Some(version) = changes.next().await {
            match service.render_dashboard().await {
                Ok(dashboard) => match Event::default()
                    .event("dashboard")
                    .id(version.to_string())
                    .json_data(&dashboard)
                {
                    Ok(event) => yield Ok::<_, Infallible>(event),
                    Err(e) => tracing::error!("Failed to encode dashboard event: {}", e),
                },
                Err(e) => {
                    tracing::error!("Dashboard render failed: {:#}", e);
                    yield Ok(Event::default().event("error").data(e.to_string()));
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ordering::OrderingPolicy;
    use crate::domain::registry::VariableRegistry;
    use crate::infrastructure::live_store::InMemoryLiveState;
    use axum::response::IntoResponse;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_decodes_complete_events() {
        let mut decoder = EventDecoder::default();
        let payloads = decoder.push(b"data: {\"time\": 1}\n\ndata: {\"time\": 2}\n\n");
        assert_eq!(payloads, vec![r#"{"time": 1}"#, r#"{"time": 2}"#]);
    }

    #[test]
    fn test_buffers_partial_frames() {
        let mut decoder = EventDecoder::default();
        assert!(decoder.push(b"data: {\"time\"").is_empty());
        assert!(decoder.push(b": 3}\n").is_empty());
        assert_eq!(decoder.push(b"\n"), vec![r#"{"time": 3}"#]);
    }

    #[test]
    fn test_crlf_and_comment_frames() {
        let mut decoder = EventDecoder::default();
        let payloads = decoder.push(b": keep-alive\r\n\r\nevent: row\r\ndata:{\"time\": 4}\r\n\r\n");
        assert_eq!(payloads, vec![r#"{"time": 4}"#]);
    }

    #[test]
    fn test_multiline_data_joined() {
        let mut decoder = EventDecoder::default();
        let payloads = decoder.push(b"data: {\"time\":\ndata: 5}\n\n");
        assert_eq!(payloads, vec!["{\"time\":\n5}"]);
    }

    #[test]
    fn test_unterminated_stream_is_capped() {
        let mut decoder = EventDecoder::with_limit(16);
        assert!(decoder.push(b"data: 0123456789abcdef0123456789").is_empty());
        assert!(decoder.buffer.is_empty());

        assert_eq!(decoder.push(b"data: 7\n\n"), vec!["7"]);
    }

    #[test]
    fn test_scan_resumes_where_it_stopped() {
        let mut decoder = EventDecoder::default();
        assert!(decoder.push(b"data: 8\n").is_empty());
        assert_eq!(decoder.scanned, 8);
        assert_eq!(decoder.push(b"\ndata: 9\n\n"), vec!["8", "9"]);
        assert_eq!(decoder.scanned, 0);
    }

    async fn next_event<S>(body: &mut S) -> String
    where
        S: Stream<Item = Result<bytes::Bytes, axum::Error>> + Unpin,
    {
        let mut text = String::new();
        while !text.contains("\n\n") {
            let chunk = tokio::time::timeout(Duration::from_secs(5), body.next())
                .await
                .expect("timed out waiting for event")
                .expect("stream ended")
                .unwrap();
            text.push_str(&String::from_utf8_lossy(&chunk));
        }
        text
    }

    #[tokio::test]
    async fn test_dashboard_events_follow_store_changes() {
        let store = Arc::new(InMemoryLiveState::new(5).unwrap());
        let service = DashboardService::new(
            store.clone(),
            Arc::new(VariableRegistry::default()),
            OrderingPolicy::default(),
            Vec::new(),
        );

        let mut body = dashboard_events(service, store.subscribe())
            .into_response()
            .into_body()
            .into_data_stream();

        let first = next_event(&mut body).await;
        assert!(first.contains("event: dashboard\n"), "{}", first);
        assert!(first.contains("id: 0\n"), "{}", first);
        assert!(first.contains("\"steps\":0"), "{}", first);

        store
            .append(&serde_json::from_str(r#"{"time": 1, "Reactor Level": 75.0}"#).unwrap())
            .await;

        let second = next_event(&mut body).await;
        assert!(second.contains("event: dashboard\n"), "{}", second);
        assert!(second.contains("id: 1\n"), "{}", second);
        assert!(second.contains("Reactor Level"), "{}", second);
    }
}

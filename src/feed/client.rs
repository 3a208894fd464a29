//! HTTP event-stream client
//!
//! Holds one `text/event-stream` request open and feeds the body through an
//! [`SseDecoder`]. Dropped connections are retried with exponential backoff;
//! the last event id is sent back so the server can resume.

use futures_util::{pin_mut, Stream, StreamExt};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::Client;
use tracing::Instrument;

use super::backoff::backoff_delay;
use super::sse::SseDecoder;
use super::{FeedError, FeedHandler, FeedResult};
use crate::config::FeedsConfig;

/// Event-stream subscriber
pub struct FeedClient {
    client: Client,
    config: FeedsConfig,
}

impl FeedClient {
    pub fn new(config: FeedsConfig) -> FeedResult<Self> {
        // No overall timeout: the body stays open for the life of the feed
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self { client, config })
    }

    /// Subscribe to `url` and hand every `message` event to `handler`.
    ///
    /// Only returns on a fatal handler error or once
    /// `max_reconnect_attempts` consecutive reconnects have failed.
    pub async fn subscribe<H: FeedHandler>(&self, url: &str, handler: &mut H) -> FeedResult<()> {
        let subscription = uuid::Uuid::new_v4();
        let span = tracing::info_span!("feed", name = handler.name(), %subscription);

        self.run(url, handler).instrument(span).await
    }

    async fn run<H: FeedHandler>(&self, url: &str, handler: &mut H) -> FeedResult<()> {
        let mut decoder = SseDecoder::new();
        let mut attempts: u32 = 0;

        loop {
            match self.connect(url, decoder.last_event_id()).await {
                Ok(response) => {
                    tracing::info!(url, "Connected to feed");
                    attempts = 0;
                    decoder.reset();

                    let result = pump(response.bytes_stream(), &mut decoder, handler).await;
                    match result {
                        Err(e) if e.is_fatal() => return Err(e),
                        Err(e) => tracing::warn!(error = %e, "Feed stream failed"),
                        Ok(()) => tracing::info!("Feed stream ended"),
                    }
                }
                Err(e) => {
                    tracing::warn!(url, error = %e, "Failed to connect to feed");
                }
            }

            let max = self.config.max_reconnect_attempts;
            if max > 0 && attempts >= max {
                tracing::error!(attempts, "Giving up on feed");
                return Err(FeedError::ReconnectLimit(attempts));
            }

            let delay = backoff_delay(attempts, decoder.retry());
            attempts += 1;
            tracing::info!(attempt = attempts, delay_ms = delay.as_millis() as u64, "Reconnecting");
            tokio::time::sleep(delay).await;
        }
    }

    async fn connect(
        &self,
        url: &str,
        last_event_id: Option<&str>,
    ) -> FeedResult<reqwest::Response> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");

        if let Some(id) = last_event_id {
            request = request.header("Last-Event-ID", id);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        Ok(response)
    }
}

/// Decode `stream` and dispatch its `message` events until it ends.
///
/// Handler errors that are not fatal are logged and the message skipped.
/// A transport error or a fatal handler error ends the pump.
pub async fn pump<S, B, E, H>(stream: S, decoder: &mut SseDecoder, handler: &mut H) -> FeedResult<()>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<FeedError>,
    H: FeedHandler + ?Sized,
{
    pin_mut!(stream);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::into)?;

        for event in decoder.feed(chunk.as_ref()) {
            if event.event != "message" {
                tracing::debug!(event = %event.event, "Ignoring named event");
                continue;
            }

            if let Err(e) = handler.on_event(event).await {
                if e.is_fatal() {
                    return Err(e);
                }
                tracing::warn!(handler = handler.name(), error = %e, "Skipping feed message");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::SseEvent;
    use async_trait::async_trait;
    use futures_util::stream;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl FeedHandler for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        async fn on_event(&mut self, event: SseEvent) -> Result<(), FeedError> {
            match self.fail_on {
                Some("bad") if event.data == "bad" => Err(FeedError::Status(0)),
                Some("stop") if event.data == "stop" => Err(FeedError::Closed),
                _ => {
                    self.seen.push(event.data);
                    Ok(())
                }
            }
        }
    }

    fn chunks(parts: &[&'static str]) -> impl Stream<Item = Result<&'static [u8], FeedError>> {
        stream::iter(parts.iter().map(|p| Ok(p.as_bytes())).collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_pump_dispatches_messages() {
        let mut decoder = SseDecoder::new();
        let mut handler = Recorder::default();

        pump(
            chunks(&["data: one\n", "\nevent: ping\ndata: x\n\n", "id: 7\ndata: two\n\n"]),
            &mut decoder,
            &mut handler,
        )
        .await
        .unwrap();

        assert_eq!(handler.seen, vec!["one", "two"]);
        assert_eq!(decoder.last_event_id(), Some("7"));
    }

    #[tokio::test]
    async fn test_pump_skips_bad_message() {
        let mut decoder = SseDecoder::new();
        let mut handler = Recorder {
            fail_on: Some("bad"),
            ..Default::default()
        };

        pump(
            chunks(&["data: a\n\ndata: bad\n\ndata: b\n\n"]),
            &mut decoder,
            &mut handler,
        )
        .await
        .unwrap();

        assert_eq!(handler.seen, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_pump_stops_on_fatal() {
        let mut decoder = SseDecoder::new();
        let mut handler = Recorder {
            fail_on: Some("stop"),
            ..Default::default()
        };

        let err = pump(
            chunks(&["data: a\n\ndata: stop\n\ndata: b\n\n"]),
            &mut decoder,
            &mut handler,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, FeedError::Closed));
        assert_eq!(handler.seen, vec!["a"]);
    }

    #[tokio::test]
    async fn test_pump_transport_error() {
        let mut decoder = SseDecoder::new();
        let mut handler = Recorder::default();
        let items: Vec<Result<&'static [u8], FeedError>> =
            vec![Ok(&b"data: a\n\n"[..]), Err(FeedError::Status(500))];

        let err = pump(stream::iter(items), &mut decoder, &mut handler)
            .await
            .unwrap_err();

        assert!(matches!(err, FeedError::Status(500)));
        assert_eq!(handler.seen, vec!["a"]);
    }

    #[tokio::test]
    async fn test_subscribe_gives_up() {
        let config = FeedsConfig {
            max_reconnect_attempts: 1,
            connect_timeout_secs: 1,
            ..Default::default()
        };
        let client = FeedClient::new(config).unwrap();
        let mut handler = Recorder::default();

        // Bind then drop, leaving a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        tokio::time::pause();
        let err = client
            .subscribe(&format!("http://{}/feed", addr), &mut handler)
            .await
            .unwrap_err();

        assert!(matches!(err, FeedError::ReconnectLimit(1)));
    }
}

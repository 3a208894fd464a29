//! Event-stream feeds
//!
//! Both overlays are driven by server-sent event streams:
//!
//! - the team feed carries a full roster snapshot per message
//! - the commit feed carries one push notification per message
//!
//! [`sse`] decodes the wire format and [`backoff_delay`] paces reconnects;
//! both build for every target. The HTTP client and the terminal handlers
//! need the `native` feature.

mod backoff;
pub mod sse;

#[cfg(feature = "native")]
mod client;
#[cfg(feature = "native")]
mod dashboard;
#[cfg(feature = "native")]
mod error;
#[cfg(feature = "native")]
mod ticker;

pub use backoff::backoff_delay;
pub use sse::{SseDecoder, SseEvent};

#[cfg(feature = "native")]
pub use client::{pump, FeedClient};
#[cfg(feature = "native")]
pub use dashboard::DashboardHandler;
#[cfg(feature = "native")]
pub use error::{FeedError, FeedResult};
#[cfg(feature = "native")]
pub use ticker::{TickerCommand, TickerDriver, TickerHandle, TickerHandler};

/// Consumer of one feed's messages
#[cfg(feature = "native")]
#[async_trait::async_trait]
pub trait FeedHandler: Send {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Handle one `message` event. Non-fatal errors skip the message; fatal
    /// ones (see [`FeedError::is_fatal`]) end the subscription.
    async fn on_event(&mut self, event: SseEvent) -> Result<(), FeedError>;
}

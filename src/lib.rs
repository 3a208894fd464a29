//! # jamfeed
//!
//! Live overlays for a code-jam event, driven by two server-sent event
//! streams: a team dashboard rebuilt from every roster snapshot, and a
//! commit ticker that shows one push notification at a time.
//!
//! ## Modules
//!
//! - [`roster`]: snapshot decoding, classification, timezone layout, stats
//! - [`ticker`]: commit payloads and the card queue state machine
//! - [`overlay`]: popover placement and avatar fade-in bookkeeping
//! - [`feed`]: event-stream decoding and (with `native`) the HTTP client
//! - [`render`]: plain-text rendering for the terminal tools
//! - [`config`]: TOML configuration with environment overrides
//!
//! The browser overlay lives in the `overlay-ui` crate and uses this crate
//! without the `native` feature.
//!
//! ## Quick Start
//!
//! ```rust
//! use jamfeed::roster::{Dashboard, LayoutMetrics, Roster};
//!
//! let roster = Roster::parse(r#"{"None":[{"name":"ana","timezone":-5}]}"#).unwrap();
//! let dashboard = Dashboard::build(&roster, &LayoutMetrics::default()).unwrap();
//!
//! assert_eq!(dashboard.stats.lfg_count, 1);
//! assert_eq!(dashboard.layout.placed()[0].style(), "left: 28%; top: 30px;");
//! ```

pub mod config;
pub mod feed;
#[cfg(feature = "native")]
pub mod logging;
pub mod overlay;
pub mod render;
pub mod roster;
pub mod ticker;

pub use config::Config;
pub use roster::{Dashboard, Roster, RosterError, RosterStats};
pub use ticker::{CommitEvent, Ticker};

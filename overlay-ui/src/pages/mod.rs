//! Pages
//!
//! One page per overlay, each its own browser source.

pub mod dashboard;
pub mod ticker;

pub use dashboard::Dashboard;
pub use ticker::Ticker;

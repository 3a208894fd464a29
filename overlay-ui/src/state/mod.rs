//! State Management
//!
//! Global overlay state and event-stream connections.

pub mod feed;
pub mod global;

pub use feed::FeedSource;
pub use global::{provide_global_state, DashboardSnapshot, GlobalState, MemberWidget, TeamWidget};

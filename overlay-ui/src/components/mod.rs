//! UI Components
//!
//! Reusable Leptos components for the overlays.

pub mod commit_card;
pub mod image_gate;
pub mod member_card;
pub mod roster_views;

pub use commit_card::CommitCard;
pub use image_gate::watch_images;
pub use member_card::MemberCard;
pub use roster_views::{MemberList, StatsBar, TeamGrid, TimezoneLayout};

//! Overlay widget helpers
//!
//! Browser-independent pieces of the member widgets: where a popover opens
//! and which avatars are still loading.

pub mod fade;
pub mod placement;

pub use fade::{PendingImages, POLL_INTERVAL_MS};
pub use placement::{place_popover, Horizontal, PopoverPosition, Rect, Vertical};

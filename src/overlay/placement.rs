//! Popover placement
//!
//! Picks the quadrant a member popover opens into, so it stays on screen.
//! Offsets are relative to the trigger element (the popover is positioned
//! absolutely inside it).

use serde::{Deserialize, Serialize};

/// Axis-aligned box in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Which side of the trigger the popover opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Below,
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Right,
    Left,
}

/// Offsets for the four CSS inset properties. `None` means `auto`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PopoverPosition {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl PopoverPosition {
    pub fn vertical(&self) -> Vertical {
        if self.bottom.is_some() {
            Vertical::Above
        } else {
            Vertical::Below
        }
    }

    pub fn horizontal(&self) -> Horizontal {
        if self.right.is_some() {
            Horizontal::Left
        } else {
            Horizontal::Right
        }
    }

    /// Inline style setting all four properties, so nothing from a previous
    /// placement survives.
    pub fn style(&self) -> String {
        fn inset(value: Option<f64>) -> String {
            value
                .map(|v| format!("{}px", v))
                .unwrap_or_else(|| "auto".to_string())
        }

        format!(
            "top: {}; right: {}; bottom: {}; left: {};",
            inset(self.top),
            inset(self.right),
            inset(self.bottom),
            inset(self.left)
        )
    }
}

/// Place a popover next to `trigger` within `viewport`.
///
/// Upper half of the viewport opens below the trigger, lower half above it
/// (anchored by `bottom`). Left half opens to the right, right half to the
/// left with an extra `gutter`.
pub fn place_popover(trigger: &Rect, viewport: &Rect, gutter: f64) -> PopoverPosition {
    let mut position = PopoverPosition::default();

    if trigger.top < viewport.center_y() {
        position.top = Some(trigger.height);
    } else {
        position.bottom = Some(trigger.height);
    }

    if trigger.left < viewport.center_x() {
        position.left = Some(trigger.width);
    } else {
        position.right = Some(trigger.width + gutter);
    }

    position
}

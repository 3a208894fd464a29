//! Timezone layout for unassigned members
//!
//! Members are dropped into 25 columns (UTC-12 .. UTC+12) and stacked
//! vertically. Each column starts lower when its neighbours to the west are
//! occupied, so that name labels in adjacent columns do not overlap:
//!
//! ```text
//! offset[0] = 0
//! offset[1] = len[0]
//! offset[i] = len[i-1] + (len[i-2] if len[i-1] > 0 else 0)
//! ```
//!
//! This is not a general packing algorithm. The overlay stylesheet is tuned
//! for exactly these offsets, so keep the rule as is.

use serde::{Deserialize, Serialize};

use super::error::{RosterError, RosterResult};
use super::types::{timezone_label, Member, MAX_TIMEZONE, MIN_TIMEZONE};

/// Number of timezone columns
pub const BUCKET_COUNT: usize = (MAX_TIMEZONE - MIN_TIMEZONE + 1) as usize;

/// Presentation constants for the layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Height of one stacked member, in px
    pub row_height: f64,
    /// Gap above the first row, in px
    pub base_margin: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            row_height: 90.0,
            base_margin: 30.0,
        }
    }
}

/// Column index for a timezone
pub fn bucket_index(timezone: i32) -> Option<usize> {
    if (MIN_TIMEZONE..=MAX_TIMEZONE).contains(&timezone) {
        Some((timezone - MIN_TIMEZONE) as usize)
    } else {
        None
    }
}

/// Timezone shown above a column
pub fn bucket_label(index: usize) -> String {
    timezone_label(index as i32 + MIN_TIMEZONE)
}

/// Per-column start offset, in rows, from the column lengths
pub fn bucket_offsets(lengths: &[usize]) -> Vec<usize> {
    (0..lengths.len())
        .map(|i| match i {
            0 => 0,
            1 => lengths[0],
            _ => {
                let prior = lengths[i - 1];
                if prior > 0 {
                    prior + lengths[i - 2]
                } else {
                    prior
                }
            }
        })
        .collect()
}

/// A member with its computed position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMember<'a> {
    pub member: &'a Member,
    /// Column index (`timezone + 12`)
    pub bucket: usize,
    /// Position within its column
    pub rank: usize,
    /// Horizontal position, percent of container width
    pub left_percent: f64,
    /// Vertical position, px
    pub top_px: f64,
}

impl PlacedMember<'_> {
    /// Inline style for an absolutely positioned widget
    pub fn style(&self) -> String {
        format!("left: {}%; top: {}px;", self.left_percent, self.top_px)
    }
}

/// Result of laying out one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct TimezoneLayout<'a> {
    buckets: Vec<Vec<&'a Member>>,
    offsets: Vec<usize>,
    placed: Vec<PlacedMember<'a>>,
}

impl<'a> TimezoneLayout<'a> {
    /// Place members into columns. Fails on a timezone outside -12..=12.
    pub fn build(members: &[&'a Member], metrics: &LayoutMetrics) -> RosterResult<Self> {
        let mut buckets: Vec<Vec<&'a Member>> = vec![Vec::new(); BUCKET_COUNT];

        for member in members {
            let index = bucket_index(member.timezone).ok_or_else(|| {
                RosterError::TimezoneOutOfRange {
                    member: member.name.clone(),
                    timezone: member.timezone,
                }
            })?;
            buckets[index].push(*member);
        }

        let lengths: Vec<usize> = buckets.iter().map(Vec::len).collect();
        let offsets = bucket_offsets(&lengths);
        let column_width = 100.0 / BUCKET_COUNT as f64;

        let mut placed = Vec::with_capacity(members.len());
        for (bucket, column) in buckets.iter().enumerate() {
            for (rank, &member) in column.iter().enumerate() {
                placed.push(PlacedMember {
                    member,
                    bucket,
                    rank,
                    left_percent: bucket as f64 * column_width,
                    top_px: offsets[bucket] as f64 * metrics.row_height
                        + rank as f64 * metrics.row_height
                        + metrics.base_margin,
                });
            }
        }

        Ok(Self {
            buckets,
            offsets,
            placed,
        })
    }

    /// Members of one column, in feed order
    pub fn bucket(&self, index: usize) -> &[&'a Member] {
        self.buckets.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Start offset (rows) of one column
    pub fn offset(&self, index: usize) -> usize {
        self.offsets.get(index).copied().unwrap_or(0)
    }

    /// Placed members, column by column
    pub fn placed(&self) -> &[PlacedMember<'a>] {
        &self.placed
    }

    /// Lookup by member name
    pub fn position_of(&self, name: &str) -> Option<&PlacedMember<'a>> {
        self.placed.iter().find(|p| p.member.name == name)
    }

    /// Indices of non-empty columns
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_empty())
            .map(|(i, _)| i)
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Height the container needs to show every member, px
    pub fn content_height(&self, metrics: &LayoutMetrics) -> f64 {
        self.placed
            .iter()
            .map(|p| p.top_px + metrics.row_height)
            .fold(metrics.base_margin, f64::max)
    }
}

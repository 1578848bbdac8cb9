//! Angular interval arithmetic on headings.
//!
//! Allowable growth directions are kept as a list of disjoint, non-wrapping
//! sub-ranges of `[0, 360]`. An arc that crosses 0/360 is always stored as two
//! pieces, so every range satisfies `0 <= start < end <= 360`.

use rand::Rng;
use retina_data::{normalize_heading, Vector2D};
use serde::{Deserialize, Serialize};

/// Ranges narrower than this are treated as empty.
const MIN_WIDTH: f64 = f64::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingRange {
    pub start: f64,
    pub end: f64,
}

impl HeadingRange {
    #[inline]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub const fn full() -> Self {
        Self::new(0.0, 360.0)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn contains(&self, degrees: f64) -> bool {
        degrees >= self.start && degrees <= self.end
    }

    #[inline]
    fn overlaps(&self, other: &HeadingRange) -> bool {
        other.start < self.end && other.end > self.start
    }
}

/// The arc `[heading - deviation, heading + deviation]`, split at 0/360.
pub fn ranges_around(heading: f64, deviation: f64) -> Vec<HeadingRange> {
    if deviation >= 180.0 {
        return vec![HeadingRange::full()];
    }

    let heading = normalize_heading(heading);
    let low = heading - deviation;
    let high = heading + deviation;

    if low < 0.0 {
        vec![
            HeadingRange::new(0.0, high),
            HeadingRange::new(low + 360.0, 360.0),
        ]
    } else if high > 360.0 {
        vec![
            HeadingRange::new(0.0, high - 360.0),
            HeadingRange::new(low, 360.0),
        ]
    } else {
        vec![HeadingRange::new(low, high)]
    }
}

/// The smaller arc spanned by `a` and `b` as seen from `tip`, split at 0/360.
pub fn subtended_ranges(tip: Vector2D, a: Vector2D, b: Vector2D) -> Vec<HeadingRange> {
    let first = tip.angle_heading_to(a);
    let second = tip.angle_heading_to(b);
    let (low, high) = if first <= second {
        (first, second)
    } else {
        (second, first)
    };

    if high - low <= 180.0 {
        vec![HeadingRange::new(low, high)]
    } else {
        [HeadingRange::new(0.0, low), HeadingRange::new(high, 360.0)]
            .into_iter()
            .filter(|r| r.width() > MIN_WIDTH)
            .collect()
    }
}

/// Removes `exclusion` from every range in `ranges`.
///
/// Handles the exclusion containing a range (range removed), being contained
/// by it (range split in two), clipping either side, or missing it entirely.
///
/// # Examples
/// ```
/// use retina_core::heading::{exclude_range, HeadingRange};
///
/// let split = exclude_range(&[HeadingRange::full()], HeadingRange::new(90.0, 180.0));
/// assert_eq!(split, vec![HeadingRange::new(0.0, 90.0), HeadingRange::new(180.0, 360.0)]);
/// assert!(exclude_range(&[HeadingRange::full()], HeadingRange::full()).is_empty());
/// ```
pub fn exclude_range(ranges: &[HeadingRange], exclusion: HeadingRange) -> Vec<HeadingRange> {
    let mut remaining = Vec::with_capacity(ranges.len() + 1);

    for range in ranges {
        if exclusion.width() <= MIN_WIDTH || !range.overlaps(&exclusion) {
            remaining.push(*range);
            continue;
        }

        if exclusion.start > range.start {
            remaining.push(HeadingRange::new(range.start, exclusion.start));
        }
        if exclusion.end < range.end {
            remaining.push(HeadingRange::new(exclusion.end, range.end));
        }
    }

    remaining.retain(|r| r.width() > MIN_WIDTH);
    remaining
}

/// Total angular measure of a range list.
pub fn total_width(ranges: &[HeadingRange]) -> f64 {
    ranges.iter().map(HeadingRange::width).sum()
}

/// Draws a heading uniformly over the union of `ranges`.
///
/// Each sub-range is weighted by its angular width, not by its position in
/// the list. Returns `None` when the ranges have no measure.
pub fn generate_random_in_allowable_ranges<R: Rng>(
    ranges: &[HeadingRange],
    rng: &mut R,
) -> Option<f64> {
    let total = total_width(ranges);
    if total <= MIN_WIDTH {
        return None;
    }

    let mut pick = rng.gen_range(0.0..total);
    for range in ranges {
        let width = range.width();
        if pick < width {
            return Some(normalize_heading(range.start + pick));
        }
        pick -= width;
    }

    ranges.last().map(|r| normalize_heading(r.end))
}

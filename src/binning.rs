//! Equal-width speed bins and fixed direction sub-sectors
//!
//! Both cuts use left-closed half-open intervals `[low, high)` so a value on
//! an inner edge always lands in the upper bin, for speed and direction alike.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fixed direction sub-sectors around the circle
pub const DIRECTION_SUB_SECTORS: usize = 32;

/// Width of a direction sub-sector in degrees
pub const SUB_SECTOR_WIDTH: f64 = 360.0 / DIRECTION_SUB_SECTORS as f64;

/// Fraction of the observed range used to widen the outer speed edge
const EDGE_ADJUSTMENT: f64 = 0.001;

/// One speed interval `[low, high)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBin {
    pub index: usize,
    pub low: f64,
    pub high: f64,
}

impl SpeedBin {
    /// Display label, e.g. `"0.00-2.50"`
    pub fn label(&self) -> String {
        format!("{:.2}-{:.2}", self.low, self.high)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value < self.high
    }
}

impl fmt::Display for SpeedBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}-{:.2}", self.low, self.high)
    }
}

/// Equal-width partition of the observed speed range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedBins {
    edges: Vec<f64>,
}

impl SpeedBins {
    /// Cut the finite values into `bins` equal-width intervals.
    ///
    /// The intervals span the observed `[min, max]`; the top edge is pushed up
    /// by 0.1% of the range so `max` itself falls in the last bin. A range of
    /// zero width is widened by 0.1% of the value on both sides (±0.001 at
    /// zero). Returns `None` when `bins` is zero or no value is finite.
    pub fn equal_width<I>(values: I, bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        if bins == 0 {
            return None;
        }

        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })?;

        let (low, high) = if min == max {
            let adj = if min == 0.0 {
                EDGE_ADJUSTMENT
            } else {
                min.abs() * EDGE_ADJUSTMENT
            };
            (min - adj, max + adj)
        } else {
            (min, max)
        };

        let width = (high - low) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| low + width * i as f64).collect();
        edges[bins] = high;
        if min != max {
            edges[bins] += (max - min) * EDGE_ADJUSTMENT;
        }
        if edges[bins] <= max {
            edges[bins] = max.next_up();
        }

        Some(Self { edges })
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn bin(&self, index: usize) -> Option<SpeedBin> {
        if index >= self.len() {
            return None;
        }
        Some(SpeedBin {
            index,
            low: self.edges[index],
            high: self.edges[index + 1],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = SpeedBin> + '_ {
        (0..self.len()).filter_map(move |i| self.bin(i))
    }

    /// Index of the bin containing `value`, `None` when outside every bin
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        let first = *self.edges.first()?;
        let last = *self.edges.last()?;
        if !value.is_finite() || value < first || value >= last {
            return None;
        }
        let upper = self.edges.partition_point(|edge| *edge <= value);
        Some((upper - 1).min(self.len() - 1))
    }
}

/// 11.25° sub-sector holding a direction in degrees.
///
/// Valid headings are `[0, 360]`; 360° is the same heading as 0° and maps to
/// sub-sector 0. NaN and anything outside that range yield `None`.
pub fn direction_sub_sector(degrees: f64) -> Option<usize> {
    if degrees.is_nan() || !(0.0..=360.0).contains(&degrees) {
        return None;
    }
    if degrees == 360.0 {
        return Some(0);
    }
    let sub = (degrees / SUB_SECTOR_WIDTH).floor() as usize;
    Some(sub.min(DIRECTION_SUB_SECTORS - 1))
}

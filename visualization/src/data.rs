//! Data preparation: statistics table → stacked polar segments

use windrose::{CompassPoint, SpeedBin, WindStats};

/// One stacked bar segment on the rose
#[derive(Debug, Clone, PartialEq)]
pub struct RoseSegment {
    pub direction: CompassPoint,
    /// Speed bin index, selects the segment color
    pub speed_index: usize,
    /// Stacked value where the segment starts
    pub inner: f64,
    /// Stacked value where the segment ends
    pub outer: f64,
    pub frequency: f64,
}

/// Segments, legend entries and radial extent of a wind rose
#[derive(Debug, Clone, PartialEq)]
pub struct RoseData {
    pub segments: Vec<RoseSegment>,
    /// Observed speed bins, lightest first
    pub legend: Vec<SpeedBin>,
    /// Largest stacked total over all directions
    pub max_total: f64,
    pub normalized: bool,
    /// Requested number of speed bins
    pub bins: usize,
}

impl RoseData {
    /// Stack each direction's speed bins outward in ascending speed order
    pub fn from_stats(stats: &WindStats) -> Self {
        let mut segments = Vec::with_capacity(stats.len());
        let mut stacked = [0.0f64; windrose::compass::COMPASS_POINTS];

        // rows are sorted by direction, then speed bin
        for row in stats.iter() {
            let base = &mut stacked[row.direction.index()];
            segments.push(RoseSegment {
                direction: row.direction,
                speed_index: row.speed_bin.index,
                inner: *base,
                outer: *base + row.frequency,
                frequency: row.frequency,
            });
            *base += row.frequency;
        }

        Self {
            segments,
            legend: stats.observed_speed_bins(),
            max_total: stacked.into_iter().fold(0.0, f64::max),
            normalized: stats.is_normalized(),
            bins: stats.bins(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

//! Wind speed/direction frequency statistics
//!
//! The engine turns a dataset with `speed` and `direction` columns into a
//! tidy table with one row per observed (compass point, speed bin) pair:
//!
//! 1. **Rename**: optional column mapping applied before validation
//! 2. **Speed cut**: `bins` equal-width intervals over the observed range
//! 3. **Direction cut**: 32 fixed 11.25° sub-sectors collapsed to 16 points
//! 4. **Count**: occurrences per (point, speed bin); empty pairs are absent
//! 5. **Normalize**: optional percentages with two decimals summing to 100
//!
//! Records whose speed or direction is missing or out of range are dropped
//! and counted in [`WindStats::dropped`].

use crate::binning::{SpeedBin, SpeedBins, direction_sub_sector};
use crate::compass::{COMPASS_POINTS, CompassPoint};
use crate::dataset::{ColumnMapping, DIRECTION_COLUMN, SPEED_COLUMN, WindDataset};
use crate::error::{Result, WindRoseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of speed bins, one per color of a typical 9-10 color palette
pub const DEFAULT_BINS: usize = 9;

/// Hundredths of a percent in a whole
const PERCENT_SCALE: u64 = 10_000;

/// Parameters of a statistics computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Number of equal-width speed bins
    pub bins: usize,
    /// Report percentages instead of raw counts
    pub normalized: bool,
    /// Source column name → canonical name (`speed` / `direction`)
    pub column_mapping: ColumnMapping,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            normalized: true,
            column_mapping: ColumnMapping::new(),
        }
    }
}

/// One row of the frequency table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindStatsRow {
    pub direction: CompassPoint,
    pub speed_bin: SpeedBin,
    pub speed_label: String,
    /// Raw number of records in this (direction, speed) pair
    pub count: u64,
    /// Percentage when normalized, otherwise equal to `count`
    pub frequency: f64,
}

/// Binned frequency table produced by [`StatsEngine::compute`]
#[derive(Debug, Clone, PartialEq)]
pub struct WindStats {
    rows: Vec<WindStatsRow>,
    bins: usize,
    normalized: bool,
    speed_bins: Option<SpeedBins>,
    total_count: u64,
    dropped: usize,
}

impl WindStats {
    pub fn rows(&self) -> &[WindStatsRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindStatsRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Requested number of speed bins
    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Speed partition, `None` when no record had a usable speed
    pub fn speed_bins(&self) -> Option<&SpeedBins> {
        self.speed_bins.as_ref()
    }

    /// Records that fell into some (direction, speed) pair
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Records dropped for missing or out-of-range speed/direction
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Observed compass points in clockwise order
    pub fn directions(&self) -> Vec<CompassPoint> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if seen.last() != Some(&row.direction) {
                seen.push(row.direction);
            }
        }
        seen
    }

    /// Observed speed bins in ascending order
    pub fn observed_speed_bins(&self) -> Vec<SpeedBin> {
        let mut bins: BTreeMap<usize, SpeedBin> = BTreeMap::new();
        for row in &self.rows {
            bins.entry(row.speed_bin.index).or_insert(row.speed_bin);
        }
        bins.into_values().collect()
    }

    /// Labels of the observed speed bins in ascending order
    pub fn speed_labels(&self) -> Vec<String> {
        self.observed_speed_bins().iter().map(SpeedBin::label).collect()
    }

    pub fn total_frequency(&self) -> f64 {
        self.rows.iter().map(|r| r.frequency).sum()
    }

    /// Summed frequency per compass point, indexed clockwise from N
    pub fn direction_totals(&self) -> [f64; COMPASS_POINTS] {
        let mut totals = [0.0; COMPASS_POINTS];
        for row in &self.rows {
            totals[row.direction.index()] += row.frequency;
        }
        totals
    }

    /// Largest stacked total over all compass points
    pub fn max_direction_total(&self) -> f64 {
        self.direction_totals().into_iter().fold(0.0, f64::max)
    }
}

/// Computes wind statistics with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct StatsEngine {
    config: StatsConfig,
}

impl StatsEngine {
    pub fn new(config: StatsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn compute(&self, dataset: &WindDataset) -> Result<WindStats> {
        let mapping = if self.config.column_mapping.is_empty() {
            None
        } else {
            Some(&self.config.column_mapping)
        };
        compute(dataset, self.config.bins, self.config.normalized, mapping)
    }
}

/// Compute the (direction, speed bin, frequency) table of `dataset`.
///
/// Fails with [`WindRoseError::MissingColumns`] before touching any row when
/// `speed` or `direction` is absent after applying `column_mapping`.
pub fn compute(
    dataset: &WindDataset,
    bins: usize,
    normalized: bool,
    column_mapping: Option<&ColumnMapping>,
) -> Result<WindStats> {
    let renamed;
    let data = match column_mapping {
        Some(mapping) => {
            renamed = dataset.renamed(mapping);
            &renamed
        }
        None => dataset,
    };

    let missing: Vec<String> = [SPEED_COLUMN, DIRECTION_COLUMN]
        .into_iter()
        .filter(|name| !data.has_column(name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(WindRoseError::MissingColumns { missing });
    }
    if bins == 0 {
        return Err(WindRoseError::InvalidBins { bins });
    }

    let speed = required_column(data, SPEED_COLUMN)?;
    let direction = required_column(data, DIRECTION_COLUMN)?;

    for (row, value) in speed.iter().enumerate() {
        if let Some(v) = *value {
            if v.is_finite() && v < 0.0 {
                return Err(WindRoseError::NegativeSpeed { row, value: v });
            }
        }
    }

    let Some(speed_bins) = SpeedBins::equal_width(speed.iter().flatten().copied(), bins) else {
        tracing::debug!(records = data.len(), "no usable speed values, empty statistics");
        return Ok(WindStats {
            rows: Vec::new(),
            bins,
            normalized,
            speed_bins: None,
            total_count: 0,
            dropped: data.len(),
        });
    };

    // bins whose two-decimal labels coincide are counted as one
    let label_group = label_groups(&speed_bins);

    let mut counts: BTreeMap<(CompassPoint, usize), u64> = BTreeMap::new();
    let mut dropped = 0usize;
    for (s, d) in speed.iter().zip(direction) {
        let speed_bin = s
            .and_then(|v| speed_bins.bin_of(v))
            .map(|bin| label_group[bin]);
        let sub_sector = d.and_then(direction_sub_sector);
        match (speed_bin, sub_sector) {
            (Some(bin), Some(sub)) => {
                *counts
                    .entry((CompassPoint::from_sub_sector(sub), bin))
                    .or_insert(0) += 1;
            }
            _ => dropped += 1,
        }
    }

    let total_count: u64 = counts.values().sum();
    let raw: Vec<u64> = counts.values().copied().collect();
    let frequencies: Vec<f64> = if normalized {
        percentages(&raw)
    } else {
        raw.iter().map(|&c| c as f64).collect()
    };

    let rows = counts
        .into_iter()
        .zip(frequencies)
        .filter_map(|(((direction, bin), count), frequency)| {
            let speed_bin = speed_bins.bin(bin)?;
            Some(WindStatsRow {
                direction,
                speed_label: speed_bin.label(),
                speed_bin,
                count,
                frequency,
            })
        })
        .collect::<Vec<_>>();

    if dropped > 0 {
        tracing::debug!(dropped, "dropped records with missing or out-of-range speed/direction");
    }
    tracing::debug!(
        rows = rows.len(),
        bins,
        normalized,
        total_count,
        "computed wind statistics"
    );

    Ok(WindStats {
        rows,
        bins,
        normalized,
        speed_bins: Some(speed_bins),
        total_count,
        dropped,
    })
}

/// For each bin, the index of the first bin printing the same label.
///
/// Edges ascend, so equal labels are always adjacent.
fn label_groups(speed_bins: &SpeedBins) -> Vec<usize> {
    let mut groups = Vec::with_capacity(speed_bins.len());
    let mut current: Option<(usize, String)> = None;
    for bin in speed_bins.iter() {
        let label = bin.label();
        match &current {
            Some((first, previous)) if *previous == label => groups.push(*first),
            _ => {
                groups.push(bin.index);
                current = Some((bin.index, label));
            }
        }
    }
    groups
}

fn required_column<'a>(data: &'a WindDataset, name: &str) -> Result<&'a [Option<f64>]> {
    data.numeric_column(name)?
        .ok_or_else(|| WindRoseError::MissingColumns {
            missing: vec![name.to_string()],
        })
}

/// Percent shares with two decimals that add up to exactly 100.00.
///
/// Every share is floored to a hundredth of a percent, then the leftover
/// hundredths go to the largest remainders (earlier entries win ties).
fn percentages(counts: &[u64]) -> Vec<f64> {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }

    let scaled: Vec<u128> = counts
        .iter()
        .map(|&c| u128::from(c) * u128::from(PERCENT_SCALE))
        .collect();
    let total = u128::from(total);
    let mut hundredths: Vec<u64> = scaled.iter().map(|&s| (s / total) as u64).collect();

    let assigned: u64 = hundredths.iter().sum();
    let leftover = (PERCENT_SCALE - assigned) as usize;

    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| (scaled[b] % total).cmp(&(scaled[a] % total)).then(a.cmp(&b)));
    for &idx in order.iter().take(leftover) {
        hundredths[idx] += 1;
    }

    hundredths.into_iter().map(|h| h as f64 / 100.0).collect()
}

//! # Windrose
//!
//! Binned wind speed/direction frequency statistics for wind rose diagrams.
//!
//! ## Quick Start
//!
//! ```rust
//! use windrose::{CompassPoint, WindDataset, compute};
//!
//! // (speed, direction in degrees)
//! let dataset = WindDataset::from_records(vec![
//!     (5.0, 0.0),
//!     (10.0, 5.0),
//!     (5.0, 180.0),
//!     (10.0, 185.0),
//! ]);
//!
//! // Two speed bins, raw counts, canonical column names
//! let stats = compute(&dataset, 2, false, None).unwrap();
//!
//! assert_eq!(stats.directions(), vec![CompassPoint::N, CompassPoint::S]);
//! for row in stats.rows() {
//!     println!("{} {} {}", row.direction, row.speed_label, row.frequency);
//! }
//! ```
//!
//! ## Algorithm
//!
//! 1. **Speed**: `bins` equal-width intervals over the observed min/max
//! 2. **Direction**: 32 fixed 11.25° sub-sectors merged pairwise into the
//!    16 compass points, with N straddling 0°
//! 3. **Frequency**: counts per (compass point, speed bin), optionally
//!    normalized to percentages summing to 100
//!
//! Records with a missing or out-of-range speed or direction are dropped and
//! reported through [`WindStats::dropped`].

pub mod binning;
pub mod compass;
pub mod config;
pub mod dataset;
pub mod error;
pub mod report;
pub mod stats;

// Re-export commonly used types for convenience
pub use binning::{SpeedBin, SpeedBins};
pub use compass::CompassPoint;
pub use config::{RenderSettings, WindRoseConfig};
pub use dataset::{Column, ColumnMapping, DIRECTION_COLUMN, SPEED_COLUMN, WindDataset};
pub use error::{Result, WindRoseError};
pub use stats::{DEFAULT_BINS, StatsConfig, StatsEngine, WindStats, WindStatsRow, compute};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

//! Wind Rose Visualization Library
//!
//! Renders [`windrose::WindStats`] as a polar stacked-bar chart: one bar per
//! compass direction, stacked outward by speed bin, colored from a named or
//! custom color sequence over a background template.
//!
//! # Architecture
//!
//! - `data`: statistics table → stacked polar segments
//! - `layouts`: disc, legend and wedge geometry
//! - `styles`: background templates and visual styling
//! - `palettes`: named color sequences and color parsing
//! - `chart`: plotters drawing of the rose
//! - `export`: figure construction and save/show/return handling

pub mod chart;
pub mod data;
pub mod errors;
pub mod export;
pub mod layouts;
pub mod palettes;
pub mod styles;

// Re-export key types for convenience
pub use data::{RoseData, RoseSegment};
pub use errors::{Result, VisualizationError};
pub use export::{Figure, OutputMode, RenderOptions, RenderOutcome, WindRoseRenderer};
pub use layouts::PolarLayout;
pub use palettes::{ColorSpec, Palette};
pub use styles::{ColorScheme, RoseStyle, Template};

/// Version of the visualization library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default chart dimensions
pub const DEFAULT_WIDTH: u32 = 900;
pub const DEFAULT_HEIGHT: u32 = 900;

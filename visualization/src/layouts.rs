//! Polar chart layout: plot disc, legend column and wedge geometry
//!
//! Headings follow the compass convention: 0° points up (north) and angles
//! grow clockwise, so screen coordinates are `x = cx + r·sin θ`,
//! `y = cy - r·cos θ`.

use crate::errors::{Result, VisualizationError};
use serde::{Deserialize, Serialize};

/// Chart layout configuration and calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolarLayout {
    /// Total chart width in pixels
    pub width: u32,
    /// Total chart height in pixels
    pub height: u32,
    /// Margin configuration
    pub margins: Margins,
    /// Width reserved on the right for the speed legend
    pub legend_width: u32,
    /// Height reserved at the top for the title
    pub title_height: u32,
    /// Gap between the disc edge and the compass labels
    pub label_gap: u32,
}

impl Default for PolarLayout {
    fn default() -> Self {
        Self {
            width: 900,
            height: 900,
            margins: Margins::default(),
            legend_width: 160,
            title_height: 40,
            label_gap: 18,
        }
    }
}

impl PolarLayout {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Area left for the disc and its labels: (left, top, right, bottom)
    pub fn plot_area(&self) -> (u32, u32, u32, u32) {
        let left = self.margins.left;
        let top = self.margins.top + self.title_height;
        let right = self
            .width
            .saturating_sub(self.margins.right + self.legend_width);
        let bottom = self.height.saturating_sub(self.margins.bottom);
        (left, top, right, bottom)
    }

    /// Reject sizes that leave no room for the disc
    pub fn validate(&self) -> Result<()> {
        if self.plot_radius() < 20.0 {
            return Err(VisualizationError::LayoutError {
                message: format!(
                    "chart size {}x{} leaves no room for the polar plot",
                    self.width, self.height
                ),
            });
        }
        Ok(())
    }

    pub fn center(&self) -> (i32, i32) {
        let (left, top, right, bottom) = self.plot_area();
        (
            ((left + right.max(left)) / 2) as i32,
            ((top + bottom.max(top)) / 2) as i32,
        )
    }

    /// Radius of the disc in pixels, leaving room for compass labels
    pub fn plot_radius(&self) -> f64 {
        let (left, top, right, bottom) = self.plot_area();
        let w = right.saturating_sub(left) as f64;
        let h = bottom.saturating_sub(top) as f64;
        (w.min(h) / 2.0 - self.label_gap as f64 * 1.5).max(0.0)
    }

    /// Top-left corner of the legend column
    pub fn legend_origin(&self) -> (i32, i32) {
        let x = self.width.saturating_sub(self.margins.right + self.legend_width) + 10;
        let y = self.margins.top + self.title_height;
        (x as i32, y as i32)
    }
}

/// Margin configuration for chart layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 30,
            right: 20,
            top: 20,
            bottom: 30,
        }
    }
}

/// Screen position of a point at `radius` pixels along compass `heading`
pub fn polar_to_screen(center: (i32, i32), radius: f64, heading_deg: f64) -> (i32, i32) {
    let theta = heading_deg.to_radians();
    (
        (center.0 as f64 + radius * theta.sin()).round() as i32,
        (center.1 as f64 - radius * theta.cos()).round() as i32,
    )
}

/// Outline of an annular wedge centred on `heading_deg`.
///
/// The inner arc runs clockwise and the outer arc back, `steps` segments
/// each; a zero inner radius collapses the inner arc to the centre.
pub fn wedge(
    center: (i32, i32),
    inner: f64,
    outer: f64,
    heading_deg: f64,
    width_deg: f64,
    steps: usize,
) -> Vec<(i32, i32)> {
    let steps = steps.max(1);
    let start = heading_deg - width_deg / 2.0;
    let step = width_deg / steps as f64;

    let mut points = Vec::with_capacity(2 * (steps + 1));
    if inner <= 0.0 {
        points.push(center);
    } else {
        points.extend((0..=steps).map(|i| polar_to_screen(center, inner, start + step * i as f64)));
    }
    points.extend(
        (0..=steps)
            .rev()
            .map(|i| polar_to_screen(center, outer, start + step * i as f64)),
    );
    points
}

/// Ring values from zero up to at least `max_value`, on a 1/2/2.5/5 × 10ⁿ step
pub fn radial_ticks(max_value: f64, target_count: usize) -> Vec<f64> {
    if !max_value.is_finite() || max_value <= 0.0 {
        return vec![1.0];
    }

    let raw_step = max_value / target_count.max(1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let count = (max_value / step).ceil().max(1.0) as usize;
    (1..=count).map(|i| step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_to_screen_compass_convention() {
        let c = (100, 100);
        assert_eq!(polar_to_screen(c, 10.0, 0.0), (100, 90));
        assert_eq!(polar_to_screen(c, 10.0, 90.0), (110, 100));
        assert_eq!(polar_to_screen(c, 10.0, 180.0), (100, 110));
        assert_eq!(polar_to_screen(c, 10.0, 270.0), (90, 100));
    }

    #[test]
    fn test_wedge_point_count() {
        let solid = wedge((0, 0), 0.0, 50.0, 0.0, 22.5, 4);
        assert_eq!(solid.len(), 1 + 5);
        assert_eq!(solid[0], (0, 0));

        let ring = wedge((0, 0), 10.0, 50.0, 90.0, 22.5, 4);
        assert_eq!(ring.len(), 10);
    }

    #[test]
    fn test_radial_ticks() {
        assert_eq!(radial_ticks(23.0, 5), vec![5.0, 10.0, 15.0, 20.0, 25.0]);
        assert_eq!(radial_ticks(4.0, 4), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(radial_ticks(0.0, 5), vec![1.0]);
        let ticks = radial_ticks(0.37, 5);
        assert!(*ticks.last().unwrap() >= 0.37);
    }

    #[test]
    fn test_layout_geometry() {
        let layout = PolarLayout::default();
        layout.validate().unwrap();
        let (cx, cy) = layout.center();
        assert!(cx > 0 && cy > 0);
        assert!(layout.plot_radius() > 100.0);
        assert!(layout.legend_origin().0 > cx);
    }

    #[test]
    fn test_tiny_layout_rejected() {
        assert!(PolarLayout::with_size(120, 80).validate().is_err());
    }
}

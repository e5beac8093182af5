//! Polar stacked-bar drawing
//!
//! Only primitive elements are used (circles, paths, polygons, rectangles
//! and text) so the chart renders on any plotters backend without a
//! coordinate system or font metrics.

use crate::data::RoseData;
use crate::errors::Result;
use crate::layouts::{PolarLayout, polar_to_screen, radial_ticks, wedge};
use crate::styles::RoseStyle;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use windrose::CompassPoint;

/// Arc segments per wedge edge
const WEDGE_STEPS: usize = 8;

/// Side of a legend color swatch in pixels
const SWATCH_SIZE: i32 = 14;

/// Draw a complete wind rose onto `root`.
///
/// `bin_colors[i]` colors speed bin `i`; bins beyond the slice reuse colors
/// cyclically.
pub fn draw_rose<DB>(
    root: &DrawingArea<DB, Shift>,
    data: &RoseData,
    bin_colors: &[RGBColor],
    style: &RoseStyle,
    layout: &PolarLayout,
    title: Option<&str>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    layout.validate()?;
    let scheme = &style.colors;
    let center = layout.center();
    let radius = layout.plot_radius();
    let font_size = style.font_size as f64;

    root.fill(&scheme.background)?;
    root.draw(&Circle::new(center, radius as i32, scheme.plot_background.filled()))?;

    let ticks = radial_ticks(data.max_total, style.grid_style.target_rings);
    let radial_max = ticks.last().copied().unwrap_or(1.0);
    let scale = |value: f64| radius * value / radial_max;

    // grid
    let grid_line = scheme.grid.stroke_width(style.grid_style.line_width);
    if style.grid_style.show_rings {
        for tick in &ticks {
            root.draw(&Circle::new(center, scale(*tick) as i32, grid_line))?;
        }
    }
    if style.grid_style.show_spokes {
        for point in CompassPoint::ALL {
            let end = polar_to_screen(center, radius, point.center_degrees());
            root.draw(&PathElement::new(vec![center, end], grid_line))?;
        }
    }

    // bars
    let bar_width = style.bar_width_degrees();
    for segment in &data.segments {
        if segment.outer <= segment.inner {
            continue;
        }
        let color = match bin_colors.len() {
            0 => scheme.text,
            n => bin_colors[segment.speed_index % n],
        };
        let outline = wedge(
            center,
            scale(segment.inner),
            scale(segment.outer),
            segment.direction.center_degrees(),
            bar_width,
            WEDGE_STEPS,
        );
        if style.show_borders {
            let mut closed = outline.clone();
            closed.push(outline[0]);
            root.draw(&Polygon::new(outline, color.filled()))?;
            root.draw(&PathElement::new(closed, scheme.border.stroke_width(1)))?;
        } else {
            root.draw(&Polygon::new(outline, color.filled()))?;
        }
    }

    // compass labels
    let label_style = TextStyle::from((style.font_family, font_size).into_font())
        .color(&scheme.text)
        .pos(Pos::new(HPos::Center, VPos::Center));
    for point in CompassPoint::ALL {
        let pos = polar_to_screen(
            center,
            radius + layout.label_gap as f64,
            point.center_degrees(),
        );
        root.draw(&Text::new(point.label().to_string(), pos, label_style.clone()))?;
    }

    // ring values along the NNE half-sector
    let tick_style = TextStyle::from((style.font_family, font_size * 0.85).into_font())
        .color(&scheme.text)
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    for tick in &ticks {
        let pos = polar_to_screen(center, scale(*tick), 11.25);
        root.draw(&Text::new(format_tick(*tick, data.normalized), pos, tick_style.clone()))?;
    }

    draw_legend(root, data, bin_colors, style, layout)?;

    if let Some(title) = title {
        let title_style = TextStyle::from((style.font_family, font_size * 1.5).into_font())
            .color(&scheme.text)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let pos = (
            (layout.width / 2) as i32,
            (layout.margins.top + layout.title_height / 2) as i32,
        );
        root.draw(&Text::new(title.to_string(), pos, title_style))?;
    }

    Ok(())
}

fn draw_legend<DB>(
    root: &DrawingArea<DB, Shift>,
    data: &RoseData,
    bin_colors: &[RGBColor],
    style: &RoseStyle,
    layout: &PolarLayout,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let scheme = &style.colors;
    let (x, y) = layout.legend_origin();
    let font_size = style.font_size as f64;
    let row_height = (style.font_size as i32 + 10).max(SWATCH_SIZE + 6);
    let text_style = TextStyle::from((style.font_family, font_size).into_font())
        .color(&scheme.text)
        .pos(Pos::new(HPos::Left, VPos::Center));

    root.draw(&Text::new("speed".to_string(), (x, y), text_style.clone()))?;

    for (row, bin) in data.legend.iter().enumerate() {
        let top = y + row_height * (row as i32 + 1) - SWATCH_SIZE / 2;
        let color = match bin_colors.len() {
            0 => scheme.text,
            n => bin_colors[bin.index % n],
        };
        root.draw(&Rectangle::new(
            [(x, top), (x + SWATCH_SIZE, top + SWATCH_SIZE)],
            color.filled(),
        ))?;
        root.draw(&Text::new(
            bin.label(),
            (x + SWATCH_SIZE + 8, top + SWATCH_SIZE / 2),
            text_style.clone(),
        ))?;
    }
    Ok(())
}

fn format_tick(value: f64, normalized: bool) -> String {
    let number = if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').to_string()
    };
    if normalized {
        format!("{}%", number)
    } else {
        number
    }
}

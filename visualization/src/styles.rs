//! Background templates and visual styling for wind rose charts

use plotters::style::RGBColor;
use std::fmt;

/// Template used when none, or an unknown one, is requested
pub const DEFAULT_TEMPLATE: Template = Template::PlotlyDark;

/// Colors of the non-data parts of the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Page background
    pub background: RGBColor,
    /// Disc behind the polar bars
    pub plot_background: RGBColor,
    /// Radial rings and spokes
    pub grid: RGBColor,
    /// Titles, labels and legend text
    pub text: RGBColor,
    /// Outline drawn around each bar segment
    pub border: RGBColor,
}

/// Named background themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Plotly,
    PlotlyWhite,
    PlotlyDark,
    Ggplot2,
    Seaborn,
    SimpleWhite,
    Presentation,
    None,
}

impl Template {
    pub const ALL: [Template; 8] = [
        Template::Plotly,
        Template::PlotlyWhite,
        Template::PlotlyDark,
        Template::Ggplot2,
        Template::Seaborn,
        Template::SimpleWhite,
        Template::Presentation,
        Template::None,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Template::Plotly => "plotly",
            Template::PlotlyWhite => "plotly_white",
            Template::PlotlyDark => "plotly_dark",
            Template::Ggplot2 => "ggplot2",
            Template::Seaborn => "seaborn",
            Template::SimpleWhite => "simple_white",
            Template::Presentation => "presentation",
            Template::None => "none",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
    }

    /// Look up a template, warning and falling back to the default when unknown
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            let valid: Vec<&str> = Self::ALL.iter().map(|t| t.name()).collect();
            tracing::warn!(
                "invalid template '{}', using {}; valid templates: {}",
                name,
                DEFAULT_TEMPLATE.name(),
                valid.join(", ")
            );
            DEFAULT_TEMPLATE
        })
    }

    pub fn color_scheme(self) -> ColorScheme {
        match self {
            Template::Plotly | Template::Presentation => ColorScheme {
                background: RGBColor(255, 255, 255),
                plot_background: RGBColor(229, 236, 246),
                grid: RGBColor(255, 255, 255),
                text: RGBColor(42, 63, 95),
                border: RGBColor(229, 236, 246),
            },
            Template::PlotlyWhite => ColorScheme {
                background: RGBColor(255, 255, 255),
                plot_background: RGBColor(255, 255, 255),
                grid: RGBColor(235, 240, 248),
                text: RGBColor(42, 63, 95),
                border: RGBColor(255, 255, 255),
            },
            Template::PlotlyDark => ColorScheme {
                background: RGBColor(17, 17, 17),
                plot_background: RGBColor(17, 17, 17),
                grid: RGBColor(40, 52, 66),
                text: RGBColor(242, 245, 250),
                border: RGBColor(17, 17, 17),
            },
            Template::Ggplot2 => ColorScheme {
                background: RGBColor(255, 255, 255),
                plot_background: RGBColor(237, 237, 237),
                grid: RGBColor(255, 255, 255),
                text: RGBColor(51, 51, 51),
                border: RGBColor(237, 237, 237),
            },
            Template::Seaborn => ColorScheme {
                background: RGBColor(255, 255, 255),
                plot_background: RGBColor(234, 234, 242),
                grid: RGBColor(255, 255, 255),
                text: RGBColor(36, 36, 36),
                border: RGBColor(234, 234, 242),
            },
            Template::SimpleWhite => ColorScheme {
                background: RGBColor(255, 255, 255),
                plot_background: RGBColor(255, 255, 255),
                grid: RGBColor(232, 232, 232),
                text: RGBColor(36, 36, 36),
                border: RGBColor(255, 255, 255),
            },
            Template::None => ColorScheme {
                background: RGBColor(255, 255, 255),
                plot_background: RGBColor(255, 255, 255),
                grid: RGBColor(200, 200, 200),
                text: RGBColor(0, 0, 0),
                border: RGBColor(255, 255, 255),
            },
        }
    }

    /// Base font size for labels
    pub fn font_size(self) -> u32 {
        match self {
            Template::Presentation => 18,
            _ => 12,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visual styling configuration for the rose
#[derive(Debug, Clone)]
pub struct RoseStyle {
    /// Color scheme to use
    pub colors: ColorScheme,
    /// Bar width relative to the 22.5° sector (0.1 to 1.0)
    pub bar_width_ratio: f64,
    /// Whether to outline bar segments
    pub show_borders: bool,
    /// Grid line style
    pub grid_style: GridStyle,
    /// Font size for labels
    pub font_size: u32,
    pub font_family: &'static str,
}

impl Default for RoseStyle {
    fn default() -> Self {
        Self::from_template(DEFAULT_TEMPLATE)
    }
}

impl RoseStyle {
    pub fn from_template(template: Template) -> Self {
        Self {
            colors: template.color_scheme(),
            bar_width_ratio: 0.95,
            show_borders: true,
            grid_style: GridStyle::default(),
            font_size: template.font_size(),
            font_family: "sans-serif",
        }
    }

    /// Angular width of one bar in degrees
    pub fn bar_width_degrees(&self) -> f64 {
        windrose::compass::SECTOR_WIDTH * self.bar_width_ratio.clamp(0.1, 1.0)
    }
}

/// Grid line styling options
#[derive(Debug, Clone)]
pub struct GridStyle {
    /// Whether to draw the concentric radial rings
    pub show_rings: bool,
    /// Whether to draw the 16 compass spokes
    pub show_spokes: bool,
    /// Grid line width
    pub line_width: u32,
    /// Number of rings aimed for when picking the radial step
    pub target_rings: usize,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            show_rings: true,
            show_spokes: true,
            line_width: 1,
            target_rings: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_names_round_trip() {
        for template in Template::ALL {
            assert_eq!(Template::from_name(template.name()), Some(template));
        }
        assert_eq!(Template::from_name("PLOTLY_DARK"), Some(Template::PlotlyDark));
    }

    #[test]
    fn test_unknown_template_falls_back() {
        assert_eq!(Template::resolve("solarized"), DEFAULT_TEMPLATE);
        assert_eq!(Template::resolve("ggplot2"), Template::Ggplot2);
    }

    #[test]
    fn test_dark_template_has_light_text() {
        let scheme = Template::PlotlyDark.color_scheme();
        assert!(scheme.text.0 > 200 && scheme.background.0 < 50);
    }

    #[test]
    fn test_templates_draw_full_grid() {
        for template in Template::ALL {
            let grid = RoseStyle::from_template(template).grid_style;
            assert!(grid.show_rings && grid.show_spokes);
            assert_eq!(grid.target_rings, 5);
        }
    }

    #[test]
    fn test_bar_width_is_clamped() {
        let mut style = RoseStyle::default();
        style.bar_width_ratio = 3.0;
        assert_eq!(style.bar_width_degrees(), 22.5);
        style.bar_width_ratio = 0.0;
        assert!((style.bar_width_degrees() - 2.25).abs() < 1e-12);
    }
}
